//! Prints the prompt sequence a path completion would send, without
//! contacting the provider.
//!
//! Requires OPENAI_API_KEY, OPENAI_ORGANIZATION and OPENAI_MODEL (or a .env
//! file providing them).

use cursorweave_core::{
    ConfigOverrides, CursorEngine, PathCompletion, PathOptions, PathSpec, ScreenPoint,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut engine = CursorEngine::new(ConfigOverrides::default())?;
    println!("model: {}", engine.model());

    let spec = PathSpec {
        start: ScreenPoint::new(100.0, 100.0),
        end: ScreenPoint::new(800.0, 450.0),
        duration_ms: 1500,
    };

    let options = PathOptions {
        dry_run: true,
        ..Default::default()
    };

    match engine.complete_path(&spec, options).await? {
        PathCompletion::DryRun { prompts } => {
            for (index, prompt) in prompts.iter().enumerate() {
                println!("--- prompt {} ---\n{}\n", index + 1, prompt);
            }
        }
        PathCompletion::Samples(_) => unreachable!("dry run never completes"),
    }

    Ok(())
}
