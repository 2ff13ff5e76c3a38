//! todo-agent - Interactive CLI Entry Point
//!
//! Runs the read-eval loop that connects the operator's terminal to the
//! agent loop.

use todo_agent::{agent::Agent, config::Config, store::TaskStore};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_agent=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    // Open the task store
    let store = TaskStore::open(&config.db_path)?;
    info!("Task store ready at {}", config.db_path.display());

    let mut agent = Agent::new(&config, store);

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line = String::new();

    loop {
        stdout.write_all(b">> ").await?;
        stdout.flush().await?;

        line.clear();
        // EOF on stdin means no further turns can arrive.
        if stdin.read_line(&mut line).await? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match agent.run_turn(input).await {
            Ok(output) => println!("{}", output),
            // Turn errors are never fatal: report and re-prompt.
            Err(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}
