//! Plugin Release - concatenate, document and package a plugin.
//!
//! Runs the release pipeline and exits with a stage-specific code on failure.

use plugin_release::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
