//! Input validation without side effects.

use crate::{
    cli::RuntimeConfig,
    error::Result,
    release::{Pipeline, Settings},
};

/// Validates every stage's inputs and prints what a release would do.
pub async fn check(settings: Settings, runtime_config: &RuntimeConfig) -> Result<i32> {
    let pipeline = Pipeline::new(settings);
    let preflight = pipeline.preflight().await?;
    let settings = pipeline.settings();

    runtime_config.section(&format!(
        "Modules ({}) -> {}",
        preflight.modules.len(),
        settings.artifact_path().display()
    ))?;
    for module in &preflight.modules {
        runtime_config.indent(&format!("{:>3}. {}", module.rank + 1, module.name))?;
    }

    runtime_config.section("Documentation")?;
    match &preflight.doc_tool {
        Some(tool) => runtime_config.indent(&format!(
            "{} -c {}",
            tool.display(),
            settings.doc_config().display()
        ))?,
        None => runtime_config.indent("disabled")?,
    }

    runtime_config.section("Package")?;
    runtime_config.indent(&format!(
        "{} -> {}",
        settings.artifact_path().display(),
        settings.demo_artifact_path().display()
    ))?;
    runtime_config.indent(&format!(
        "{} -> {}",
        preflight.demo_dir.display(),
        preflight.archive.display()
    ))?;

    runtime_config.success("All inputs present")?;
    Ok(0)
}
