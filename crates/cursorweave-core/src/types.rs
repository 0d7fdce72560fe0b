//! Core data types shared across the crate

use serde::{Deserialize, Serialize};

/// A point on the screen in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// x coordinate in pixels
    pub x: f64,
    /// y coordinate in pixels
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Describes the path to request from the model.
///
/// Purely descriptive; never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    /// Coordinates at which the path should start
    pub start: ScreenPoint,
    /// Coordinates at which the path should end
    pub end: ScreenPoint,
    /// Duration of the full gesture in milliseconds
    pub duration_ms: u64,
}

/// One point as produced by the model, before time normalization.
///
/// `delta_time` is the time elapsed in milliseconds since the previous point
/// in the sequence; the first point's delta is conventionally 0. Negative
/// deltas are representable and passed through untouched by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub delta_time: f64,
}

/// One normalized point in the output sequence, with absolute timestamp.
///
/// Invariant: within a parsed sequence, `timestamp[0]` is the base time and
/// `timestamp[i] = timestamp[i-1] + delta_time[i]` for all i > 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSample {
    pub x: f64,
    pub y: f64,
    pub delta_time: f64,
    /// Absolute time in milliseconds
    pub timestamp: i64,
}

/// Per-call options for path completion
#[derive(Debug, Clone, Copy, Default)]
pub struct PathOptions {
    /// Offset in milliseconds applied to the first sample's timestamp
    pub timestamp_delta: i64,
    /// Temperature override for this call; defaults from the engine config
    pub temperature: Option<f64>,
    /// Build prompts but never contact the remote service
    pub dry_run: bool,
}
