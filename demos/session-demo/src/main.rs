//! Walkthrough of the emulated persistent session against a real instance.
//!
//! Run with: cargo run -p session-demo
//!
//! Requires INSTANCE_ID, AWS_REGION, AWS_ACCESS_KEY_ID and
//! AWS_SECRET_ACCESS_KEY in the environment (or a .env file).

use anyhow::Result;
use remote_shell_executor::{SsmExecutor, TargetConfig};
use remote_shell_session::ShellSession;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = TargetConfig::from_env()?;
    let executor = SsmExecutor::new(&config).await;
    let mut session = ShellSession::connect(executor, config.instance_id.clone()).await;

    println!("Current directory:");
    println!("{}", session.execute("pwd").await);

    println!("\nListing directory contents:");
    println!("{}", session.execute("ls -la").await);

    println!("\nChanging directory:");
    println!("{}", session.execute("cd /tmp").await);

    println!("\nVerifying current directory:");
    println!("{}", session.execute("pwd").await);

    println!("\nCreating a file:");
    println!("{}", session.execute("touch test_persistence.txt").await);

    println!("\nListing the file:");
    println!("{}", session.execute("ls -la test_persistence.txt").await);

    println!("\nSetting an environment variable:");
    println!("{}", session.execute("TEST_VAR=hello_world").await);

    println!("\nReading the environment variable:");
    println!("{}", session.execute("echo $TEST_VAR").await);

    println!("\nRunning multiple commands:");
    println!(
        "{}",
        session
            .execute("mkdir -p test_dir && cd test_dir && pwd && touch inside_file.txt && ls -la")
            .await
    );

    println!("\nVerifying the directory set by the compound command stuck:");
    println!("{}", session.execute("pwd").await);

    println!("\nCurrent session state:");
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);

    Ok(())
}
