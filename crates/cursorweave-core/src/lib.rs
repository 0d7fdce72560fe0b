//! cursorweave-core - LLM-completed humanlike mouse paths
//!
//! Asks a chat-completion model to invent a natural mouse-cursor path
//! between two screen points and turns the reply into timestamped
//! coordinate samples. There is no local path-generation algorithm; the
//! library owns prompt composition, the completion client, and the
//! response validation/normalization pipeline.
//!
//! # Usage
//!
//! ```no_run
//! use cursorweave_core::{ConfigOverrides, CursorEngine, PathOptions, PathSpec, ScreenPoint};
//!
//! # async fn run() -> cursorweave_core::Result<()> {
//! let mut engine = CursorEngine::new(ConfigOverrides {
//!     model: Some("gpt-4".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let spec = PathSpec {
//!     start: ScreenPoint::new(0.0, 0.0),
//!     end: ScreenPoint::new(640.0, 480.0),
//!     duration_ms: 1200,
//! };
//!
//! let outcome = engine.complete_path(&spec, PathOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod parser;
pub mod prompts;
pub mod schema;
pub mod types;

pub use client::{
    ChatReply, ChatTransport, CompletionClient, HttpTransport, ModelCatalog, Readiness,
};
pub use config::{Config, ConfigOverrides};
pub use engine::{CursorEngine, PathCompletion};
pub use error::{ConfigError, CursorweaveError, Result};
pub use parser::{parse_response, parse_response_at};
pub use prompts::{Prompt, PromptSet};
pub use schema::validate_points;
pub use types::{PathOptions, PathPoint, PathSample, PathSpec, ScreenPoint};
