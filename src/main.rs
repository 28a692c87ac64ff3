//! jniforge - native build orchestration for Android library packaging
//!
//! Command-line entry point that wires the toolchain locator, the clean
//! and native-build tasks, and the packaging handoff together.

use std::env;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use jniforge::commands::{BuildCommand, CleanCommand, ToolchainCommand};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let args: Vec<String> = env::args().skip(1).collect();
    let project_dir = env::current_dir()?;

    match args.first().map(String::as_str) {
        Some("build") => {
            let command = BuildCommand::from_args(project_dir, &args[1..])?;
            command.execute().await
        }
        Some("clean") => CleanCommand { project_dir }.execute().await,
        Some("toolchain") => ToolchainCommand { project_dir }.execute().await,
        Some(other) => anyhow::bail!("unknown command: {}", other),
        None => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("jniforge {}", jniforge::VERSION);
    println!();
    println!("USAGE:");
    println!("  jniforge build [debug|release|--all]   clean, compile, and package");
    println!("  jniforge clean                         remove native library outputs");
    println!("  jniforge toolchain                     resolve and print the pinned NDK");
}
