//! Configuration resolution
//!
//! A [`Config`] is built once per engine instance by merging, in increasing
//! priority: built-in defaults < environment variables < explicit caller
//! overrides. Resolution fails closed: a missing required field is a
//! construction error, never a runtime surprise.

use crate::error::{ConfigError, Result};

const DEFAULT_TEMPERATURE: f64 = 0.2;
const DEFAULT_DURATION_RANGE: (u64, u64) = (500, 5000);

/// Immutable, fully-resolved configuration for one engine instance
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Provider API key
    pub api_key: String,
    /// Provider organization id
    pub organization: String,
    /// Model identifier, e.g. "gpt-4"
    pub model: String,
    /// Temperature used when a call does not override it
    pub default_temperature: f64,
    /// Informational (min, max) bound in milliseconds on generated
    /// path durations
    pub duration_range: (u64, u64),
}

/// Caller-supplied overrides; any field left `None` falls back to the
/// environment, then to the built-in default.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub organization: Option<String>,
    pub model: Option<String>,
    pub default_temperature: Option<f64>,
    pub duration_range: Option<(u64, u64)>,
}

impl Config {
    /// Resolves configuration from defaults, the environment, and overrides.
    ///
    /// Recognized environment variables: `OPENAI_API_KEY`,
    /// `OPENAI_ORGANIZATION`, `OPENAI_MODEL`, `OPENAI_TEMPERATURE` and
    /// `CURSORWEAVE_DURATION_RANGE` ("min,max"). A `.env` file is loaded
    /// best-effort before reading the environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        // Missing .env files are fine; only explicit values matter.
        let _ = dotenvy::dotenv();
        Self::resolve_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Resolution against an injected environment lookup, used by tests to
    /// stay independent of the process environment.
    pub fn resolve_with_env(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let api_key = overrides
            .api_key
            .or_else(|| env("OPENAI_API_KEY"))
            .ok_or(ConfigError::MissingField("api_key"))?;

        let organization = overrides
            .organization
            .or_else(|| env("OPENAI_ORGANIZATION"))
            .ok_or(ConfigError::MissingField("organization"))?;

        let model = overrides
            .model
            .or_else(|| env("OPENAI_MODEL"))
            .ok_or(ConfigError::MissingField("model"))?;

        let default_temperature = match overrides.default_temperature {
            Some(value) => value,
            None => match env("OPENAI_TEMPERATURE") {
                Some(raw) => parse_temperature(&raw)?,
                None => DEFAULT_TEMPERATURE,
            },
        };

        let duration_range = match overrides.duration_range {
            Some(range) => range,
            None => match env("CURSORWEAVE_DURATION_RANGE") {
                Some(raw) => parse_duration_range(&raw)?,
                None => DEFAULT_DURATION_RANGE,
            },
        };

        Ok(Self {
            api_key,
            organization,
            model,
            default_temperature,
            duration_range,
        })
    }
}

fn parse_temperature(raw: &str) -> std::result::Result<f64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: "default_temperature",
        value: raw.to_string(),
    })
}

fn parse_duration_range(raw: &str) -> std::result::Result<(u64, u64), ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        field: "duration_range",
        value: raw.to_string(),
    };

    let (min, max) = raw.split_once(',').ok_or_else(invalid)?;
    let min = min.trim().parse().map_err(|_| invalid())?;
    let max = max.trim().parse().map_err(|_| invalid())?;

    Ok((min, max))
}
