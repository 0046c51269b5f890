//! Stage execution with terminal reporting.

use crate::{
    cli::RuntimeConfig,
    error::Result,
    release::{Pipeline, Settings, Stage, StageReport},
};
use std::time::Instant;

/// Runs `stages` in order, printing a section per stage.
///
/// Returns exit code 0 on success. The first failing stage aborts the run and
/// its error is returned to the caller.
pub async fn release(
    settings: Settings,
    stages: &[Stage],
    runtime_config: &RuntimeConfig,
) -> Result<i32> {
    let pipeline = Pipeline::new(settings);
    let started = Instant::now();

    for (index, &stage) in stages.iter().enumerate() {
        runtime_config.section(&format!(
            "[{}/{}] {}",
            index + 1,
            stages.len(),
            stage_title(stage)
        ))?;

        let report = pipeline.run_stage(stage).await?;
        print_report(&report, runtime_config)?;
    }

    runtime_config.success(&format!(
        "Release finished in {:.1}s",
        started.elapsed().as_secs_f64()
    ))?;
    Ok(0)
}

fn stage_title(stage: Stage) -> &'static str {
    match stage {
        Stage::Aggregate => "Concatenating modules",
        Stage::Docs => "Generating documentation",
        Stage::Package => "Packaging demo",
    }
}

fn print_report(report: &StageReport, runtime_config: &RuntimeConfig) -> std::io::Result<()> {
    match report {
        StageReport::Aggregate(report) => {
            for module in &report.modules {
                runtime_config.verbose_println(&format!("  + {module}"))?;
            }
            runtime_config.success(&format!(
                "{} ({} modules, {} bytes)",
                report.artifact.display(),
                report.modules.len(),
                report.size
            ))?;
            runtime_config.indent(&format!("sha256 {}", report.checksum))
        }
        StageReport::Docs(report) => runtime_config.success(&format!(
            "Documentation generated with {} in {:.1}s",
            report.tool.display(),
            report.elapsed.as_secs_f64()
        )),
        StageReport::DocsSkipped => runtime_config.warn("Documentation stage skipped"),
        StageReport::Package(report) => {
            runtime_config.progress(&format!(
                "Installed {}",
                report.bundled_artifact.display()
            ))?;
            runtime_config.success(&format!(
                "{} ({} files, {} directories, {} bytes)",
                report.archive.display(),
                report.stats.files,
                report.stats.directories,
                report.size
            ))?;
            runtime_config.indent(&format!("sha256 {}", report.checksum))?;
            if let Some(sidecar) = &report.checksum_file {
                runtime_config.indent(&format!("checksum written to {}", sidecar.display()))?;
            }
            Ok(())
        }
    }
}
