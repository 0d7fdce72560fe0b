//! cursorweave-cdp - path replay over the Chrome DevTools Protocol
//!
//! Consumes the core engine and forwards each completed sample, in order, as
//! an `Input.dispatchMouseEvent` command. The actual protocol session is
//! behind the [`MouseEventSink`] trait; any CDP client that can send a raw
//! command can plug in.

use async_trait::async_trait;
use serde::Serialize;

use cursorweave_core::{ChatTransport, CursorEngine, PathCompletion, PathOptions, PathSample, PathSpec};

/// Parameters for one `Input.dispatchMouseEvent` move command.
///
/// Serializes to the CDP wire shape: `type` is always `"mouseMoved"`, no
/// button is held, and no modifiers apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseMoveEvent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: f64,
    pub y: f64,
    /// Absolute time in milliseconds
    pub timestamp: i64,
    pub modifiers: u8,
    pub button: &'static str,
    pub click_count: u8,
}

impl From<&PathSample> for MouseMoveEvent {
    fn from(sample: &PathSample) -> Self {
        Self {
            kind: "mouseMoved",
            x: sample.x,
            y: sample.y,
            timestamp: sample.timestamp,
            modifiers: 0,
            button: "none",
            click_count: 0,
        }
    }
}

/// Seam to the browser-control session.
///
/// Implementations send one `Input.dispatchMouseEvent` command per call,
/// in the order the calls arrive.
#[async_trait]
pub trait MouseEventSink: Send {
    async fn dispatch(&mut self, event: &MouseMoveEvent) -> anyhow::Result<()>;
}

/// Drives the core engine and replays completed paths through a sink.
#[derive(Debug)]
pub struct PathExecutor<T: ChatTransport, S: MouseEventSink> {
    engine: CursorEngine<T>,
    sink: S,
}

impl<T: ChatTransport, S: MouseEventSink> PathExecutor<T, S> {
    pub fn new(engine: CursorEngine<T>, sink: S) -> Self {
        Self { engine, sink }
    }

    pub fn engine_mut(&mut self) -> &mut CursorEngine<T> {
        &mut self.engine
    }

    /// Completes a path and dispatches one mouse-move per sample, in order.
    ///
    /// A dry-run completion is an error here: this consumer exists to replay
    /// samples and has nothing to do with prompt previews.
    pub async fn execute_path(&mut self, spec: &PathSpec, options: PathOptions) -> anyhow::Result<()> {
        let outcome = self.engine.complete_path(spec, options).await?;

        let samples = match outcome {
            PathCompletion::Samples(samples) => samples,
            PathCompletion::DryRun { .. } => {
                anyhow::bail!("dry run completions cannot be replayed")
            }
        };

        tracing::debug!(samples = samples.len(), "replaying path");
        for sample in &samples {
            self.sink.dispatch(&MouseMoveEvent::from(sample)).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursorweave_core::{
        ChatReply, Config, ConfigOverrides, ModelCatalog, Result, ScreenPoint,
    };

    struct StubTransport {
        content: String,
    }

    #[async_trait]
    impl ChatTransport for StubTransport {
        async fn list_models(&self) -> Result<ModelCatalog> {
            Ok(ModelCatalog {
                status: 200,
                models: vec!["gpt-4".to_string()],
            })
        }

        async fn chat(
            &self,
            _model: &str,
            _messages: &[String],
            _temperature: f64,
        ) -> Result<ChatReply> {
            Ok(ChatReply {
                status: 200,
                content: Some(self.content.clone()),
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<MouseMoveEvent>,
    }

    #[async_trait]
    impl MouseEventSink for RecordingSink {
        async fn dispatch(&mut self, event: &MouseMoveEvent) -> anyhow::Result<()> {
            self.events.push(event.clone());
            Ok(())
        }
    }

    fn engine(content: &str) -> CursorEngine<StubTransport> {
        let config = Config::resolve_with_env(
            ConfigOverrides {
                api_key: Some("sk-test".to_string()),
                organization: Some("org-test".to_string()),
                model: Some("gpt-4".to_string()),
                ..Default::default()
            },
            |_| None,
        )
        .unwrap();

        CursorEngine::with_transport(
            config,
            StubTransport {
                content: content.to_string(),
            },
        )
    }

    fn spec() -> PathSpec {
        PathSpec {
            start: ScreenPoint::new(0.0, 0.0),
            end: ScreenPoint::new(50.0, 50.0),
            duration_ms: 400,
        }
    }

    #[tokio::test]
    async fn test_execute_path_dispatches_in_order() {
        let body = r#"[
            {"x": 0.0, "y": 0.0, "deltaTime": 0},
            {"x": 25.0, "y": 30.0, "deltaTime": 80},
            {"x": 50.0, "y": 50.0, "deltaTime": 90}
        ]"#;
        let mut executor = PathExecutor::new(engine(body), RecordingSink::default());

        executor
            .execute_path(&spec(), PathOptions::default())
            .await
            .unwrap();

        let events = &executor.sink.events;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, "mouseMoved");
        assert_eq!(events[1].x, 25.0);
        assert_eq!(events[2].timestamp, events[1].timestamp + 90);
    }

    #[tokio::test]
    async fn test_dry_run_is_rejected() {
        let mut executor = PathExecutor::new(engine("[]"), RecordingSink::default());

        let options = PathOptions {
            dry_run: true,
            ..Default::default()
        };
        let err = executor.execute_path(&spec(), options).await.unwrap_err();

        assert!(err.to_string().contains("dry run"));
        assert!(executor.sink.events.is_empty());
    }

    #[test]
    fn test_event_serializes_to_cdp_shape() {
        let sample = PathSample {
            x: 1.5,
            y: 2.5,
            delta_time: 10.0,
            timestamp: 1_700_000_000_000,
        };

        let value = serde_json::to_value(MouseMoveEvent::from(&sample)).unwrap();

        assert_eq!(value["type"], "mouseMoved");
        assert_eq!(value["x"], 1.5);
        assert_eq!(value["y"], 2.5);
        assert_eq!(value["modifiers"], 0);
        assert_eq!(value["button"], "none");
        assert_eq!(value["clickCount"], 0);
    }
}
