//! Documentation generation.
//!
//! Runs the external generator as `<tool> -c <config>` from the project root
//! and waits for it, bounded by the configured timeout. Its output is
//! forwarded to the log line by line. A non-zero exit aborts the pipeline.

use crate::release::{
    Result, Settings,
    error::{Error, ErrorExt},
    pipeline::tool_detection::locate_tool,
};
use std::{
    path::PathBuf,
    process::Stdio,
    time::{Duration, Instant},
};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
};

/// Grace period for reaping a killed generator.
const KILL_GRACE: Duration = Duration::from_secs(10);

/// Result of a successful documentation run.
#[derive(Debug, Clone)]
pub struct DocsReport {
    /// Resolved tool executable
    pub tool: PathBuf,
    /// Configuration file passed to the tool
    pub config: PathBuf,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Invokes the documentation generator and waits for it to finish.
///
/// # Errors
///
/// * [`Error::NotFound`] - tool not on `PATH`, or configuration file missing
/// * [`Error::CommandFailed`] - tool could not be spawned
/// * [`Error::ToolTimeout`] - tool ran past [`Settings::doc_timeout`] and was killed
/// * [`Error::ToolFailure`] - tool exited unsuccessfully
pub async fn generate_docs(settings: &Settings) -> Result<DocsReport> {
    let tool = locate_tool(settings.doc_tool(), settings.root())?;
    let config = settings.doc_config();
    tokio::fs::metadata(&config)
        .await
        .fs_context("locating documentation config", &config)?;

    let command = format!("{} -c {}", settings.doc_tool(), config.display());
    log::info!("Running {}", command);
    let started = Instant::now();

    let mut child = Command::new(&tool)
        .arg("-c")
        .arg(&config)
        .current_dir(settings.root())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|error| Error::CommandFailed {
            command: command.clone(),
            error,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let tool_name = settings.doc_tool();

    // Output draining sits inside the timeout too, a hung tool may hold its pipes open.
    let run = async {
        tokio::join!(
            forward_lines(stdout, log::Level::Info, tool_name),
            forward_lines(stderr, log::Level::Warn, tool_name),
        );
        child.wait().await
    };
    let outcome = tokio::time::timeout(settings.doc_timeout(), run).await;

    let status = match outcome {
        Ok(Ok(status)) => status,
        Ok(Err(error)) => return Err(Error::CommandFailed { command, error }),
        Err(_elapsed) => {
            log::warn!("{} timed out, terminating process...", command);
            if let Err(e) = child.start_kill() {
                log::warn!("Failed to kill {}: {}", tool_name, e);
            }
            match tokio::time::timeout(KILL_GRACE, child.wait()).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => log::warn!("Failed to reap {}: {}", tool_name, e),
                Err(_) => log::warn!(
                    "{} still running {}s after kill",
                    tool_name,
                    KILL_GRACE.as_secs()
                ),
            }
            return Err(Error::ToolTimeout {
                command,
                timeout: settings.doc_timeout(),
            });
        }
    };

    if !status.success() {
        return Err(Error::ToolFailure {
            command,
            code: status.code(),
        });
    }

    let elapsed = started.elapsed();
    log::info!("Documentation generated in {:.1}s", elapsed.as_secs_f64());
    Ok(DocsReport {
        tool,
        config,
        elapsed,
    })
}

async fn forward_lines<R>(stream: Option<R>, level: log::Level, tool: &str)
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return;
    };
    // Stopping early would close the pipe under the tool, so read to EOF
    // whatever the bytes are.
    let mut reader = BufReader::new(stream);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                log::log!(level, "[{}] {}", tool, text.trim_end_matches(['\r', '\n']));
            }
            Err(e) => {
                log::debug!("Reading {} output failed: {}", tool, e);
                let _ = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await;
                break;
            }
        }
    }
}
