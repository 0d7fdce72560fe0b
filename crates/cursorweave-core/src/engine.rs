//! Path completion engine
//!
//! Composes the prompt set, the completion client, and the response parser
//! into the one public operation: ask the model for a humanlike cursor path
//! between two screen points. The engine exclusively owns its configuration,
//! its client, and its prompts; instances are fully independent.

use crate::client::{ChatTransport, CompletionClient, HttpTransport};
use crate::config::{Config, ConfigOverrides};
use crate::error::Result;
use crate::parser::parse_response;
use crate::prompts::PromptSet;
use crate::types::{PathOptions, PathSample, PathSpec};

/// Outcome of a path completion call.
///
/// A dry run is a deliberate short-circuit for inspection, not a failure, so
/// it is a success variant rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PathCompletion {
    /// Parsed, time-normalized samples from a real completion
    Samples(Vec<PathSample>),
    /// The prompts that would have been sent; no request was made
    DryRun { prompts: Vec<String> },
}

impl PathCompletion {
    /// Returns the samples, or `None` for a dry run.
    pub fn into_samples(self) -> Option<Vec<PathSample>> {
        match self {
            Self::Samples(samples) => Some(samples),
            Self::DryRun { .. } => None,
        }
    }
}

/// Engine for LLM-completed mouse paths
#[derive(Debug)]
pub struct CursorEngine<T: ChatTransport = HttpTransport> {
    config: Config,
    client: CompletionClient<T>,
    prompts: PromptSet,
}

impl CursorEngine<HttpTransport> {
    /// Creates an engine backed by the HTTP transport.
    ///
    /// Configuration is merged once here (defaults < environment <
    /// `overrides`) and immutable afterwards; missing required values fail
    /// construction.
    pub fn new(overrides: ConfigOverrides) -> Result<Self> {
        let config = Config::resolve(overrides)?;
        let transport = HttpTransport::new(&config);
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: ChatTransport> CursorEngine<T> {
    /// Creates an engine over an explicit transport, e.g. a test double.
    pub fn with_transport(config: Config, transport: T) -> Self {
        let client = CompletionClient::new(transport, &config.model, config.default_temperature);
        Self {
            config,
            client,
            prompts: PromptSet::default(),
        }
    }

    /// Replaces the default prompt set.
    pub fn with_prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = prompts;
        self
    }

    /// The model identifier in use
    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the owned prompt set, e.g. for
    /// [`PromptSet::update_instruction`].
    pub fn prompts_mut(&mut self) -> &mut PromptSet {
        &mut self.prompts
    }

    /// The full prompt sequence for one path request: instruction prompts
    /// followed by the rendered request prompt. Useful for debugging.
    pub fn path_prompts(&self, spec: &PathSpec) -> Vec<String> {
        let mut prompts = self.prompts.instruction_prompts();
        prompts.push(self.prompts.request_prompt(spec));
        prompts
    }

    /// Requests a humanlike mouse path between two points.
    ///
    /// Builds the prompts, sends one completion request, and parses the
    /// reply into timestamped samples. With `dry_run` set the request is
    /// never sent and the composed prompts come back instead. One in-flight
    /// call per engine; no internal retries.
    pub async fn complete_path(
        &mut self,
        spec: &PathSpec,
        options: PathOptions,
    ) -> Result<PathCompletion> {
        let prompts = self.path_prompts(spec);

        if options.dry_run {
            tracing::warn!("dry run requested, skipping completion request");
            tracing::debug!(?prompts, "prompts that would have been sent");
            return Ok(PathCompletion::DryRun { prompts });
        }

        tracing::debug!(
            model = %self.config.model,
            prompts = prompts.len(),
            "requesting path completion"
        );

        let raw = self.client.complete(&prompts, options.temperature).await?;
        let samples = parse_response(&raw, options.timestamp_delta)?;

        tracing::debug!(samples = samples.len(), "parsed completion response");
        Ok(PathCompletion::Samples(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::MockTransport;
    use crate::types::ScreenPoint;
    use std::sync::atomic::Ordering;

    fn config() -> Config {
        Config {
            api_key: "sk-test".to_string(),
            organization: "org-test".to_string(),
            model: "gpt-4".to_string(),
            default_temperature: 0.2,
            duration_range: (500, 5000),
        }
    }

    fn spec() -> PathSpec {
        PathSpec {
            start: ScreenPoint::new(0.0, 0.0),
            end: ScreenPoint::new(100.0, 50.0),
            duration_ms: 1000,
        }
    }

    #[tokio::test]
    async fn test_complete_path_parses_samples() {
        let body = r#"[{"x":0,"y":0,"deltaTime":0},{"x":100,"y":50,"deltaTime":40}]"#;
        let transport = MockTransport::ok(&["gpt-4"], body);
        let mut engine = CursorEngine::with_transport(config(), transport);

        let samples = engine
            .complete_path(&spec(), PathOptions::default())
            .await
            .unwrap()
            .into_samples()
            .unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].timestamp, samples[0].timestamp + 40);
    }

    #[tokio::test]
    async fn test_dry_run_returns_prompts_without_request() {
        let transport = MockTransport::ok(&["gpt-4"], "[]");
        let mut engine = CursorEngine::with_transport(config(), transport);

        let options = PathOptions {
            dry_run: true,
            ..Default::default()
        };
        let outcome = engine.complete_path(&spec(), options).await.unwrap();

        match outcome {
            PathCompletion::DryRun { prompts } => {
                assert_eq!(prompts, engine.path_prompts(&spec()));
                assert!(prompts.last().unwrap().contains("Duration: 1000"));
            }
            PathCompletion::Samples(_) => panic!("expected a dry run"),
        }

        assert_eq!(engine.client.transport.list_calls.load(Ordering::SeqCst), 0);
        assert_eq!(engine.client.transport.chat_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_prompt_updates_flow_into_requests() {
        let transport = MockTransport::ok(&["gpt-4"], "[]");
        let mut engine = CursorEngine::with_transport(config(), transport);

        assert!(engine.prompts_mut().update_instruction("init", "custom guidance"));

        let prompts = engine.path_prompts(&spec());
        assert_eq!(prompts[0], "custom guidance");
    }

    #[test]
    fn test_model_accessor() {
        let transport = MockTransport::ok(&["gpt-4"], "[]");
        let engine = CursorEngine::with_transport(config(), transport);
        assert_eq!(engine.model(), "gpt-4");
    }
}
