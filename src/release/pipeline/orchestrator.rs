//! Main pipeline orchestration.

use super::{Stage, tool_detection::locate_tool};
use crate::{
    bail,
    error::{ReleaseError, Result},
    release::{
        AggregateReport, DocsReport, PackageReport, PlannedModule, Settings, aggregate, docs,
        error::ErrorExt,
        package,
    },
};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

/// Outcome of one stage.
#[derive(Debug, Clone)]
pub enum StageReport {
    /// Artifact written
    Aggregate(AggregateReport),
    /// Documentation generated
    Docs(DocsReport),
    /// Docs stage disabled by configuration
    DocsSkipped,
    /// Bundle updated and archive written
    Package(PackageReport),
}

impl StageReport {
    /// Stage this report belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Aggregate(_) => Stage::Aggregate,
            Self::Docs(_) | Self::DocsSkipped => Stage::Docs,
            Self::Package(_) => Stage::Package,
        }
    }
}

/// Reports of every stage that ran, in order.
#[derive(Debug, Clone)]
pub struct ReleaseSummary {
    /// Per-stage outcomes
    pub reports: Vec<StageReport>,
    /// Total wall-clock time
    pub elapsed: Duration,
}

impl ReleaseSummary {
    /// Returns the report for `stage`, if it ran.
    pub fn report(&self, stage: Stage) -> Option<&StageReport> {
        self.reports.iter().find(|r| r.stage() == stage)
    }
}

/// Input checks performed without writing anything.
#[derive(Debug, Clone)]
pub struct Preflight {
    /// Modules in artifact order
    pub modules: Vec<PlannedModule>,
    /// Resolved documentation tool, `None` when docs are disabled
    pub doc_tool: Option<PathBuf>,
    /// Demo directory that will be archived
    pub demo_dir: PathBuf,
    /// Archive that will be written
    pub archive: PathBuf,
}

/// Release pipeline orchestrator.
///
/// # Examples
///
/// ```no_run
/// use plugin_release::release::{Pipeline, SettingsBuilder};
///
/// # async fn example() -> plugin_release::Result<()> {
/// let settings = SettingsBuilder::new()
///     .root("/work/bullet-hell")
///     .build()
///     .map_err(plugin_release::ReleaseError::Config)?;
/// let summary = Pipeline::new(settings).run().await?;
/// println!("{} stages in {:?}", summary.reports.len(), summary.elapsed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Pipeline {
    settings: Settings,
}

impl Pipeline {
    /// Creates a pipeline for the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the pipeline settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs all stages in order.
    pub async fn run(&self) -> Result<ReleaseSummary> {
        self.run_stages(&Stage::ALL).await
    }

    /// Runs the given stages in the order provided, stopping at the first failure.
    pub async fn run_stages(&self, stages: &[Stage]) -> Result<ReleaseSummary> {
        let started = Instant::now();
        let mut reports = Vec::with_capacity(stages.len());
        for &stage in stages {
            reports.push(self.run_stage(stage).await?);
        }
        Ok(ReleaseSummary {
            reports,
            elapsed: started.elapsed(),
        })
    }

    /// Runs a single stage.
    pub async fn run_stage(&self, stage: Stage) -> Result<StageReport> {
        log::info!("Stage {} starting", stage);
        let report = match stage {
            Stage::Aggregate => aggregate::aggregate(&self.settings)
                .await
                .map(StageReport::Aggregate),
            Stage::Docs if !self.settings.docs_enabled() => {
                log::info!("Documentation disabled, skipping");
                Ok(StageReport::DocsSkipped)
            }
            Stage::Docs => docs::generate_docs(&self.settings)
                .await
                .map(StageReport::Docs),
            Stage::Package => package::package(&self.settings)
                .await
                .map(StageReport::Package),
        };

        match report {
            Ok(report) => {
                log::info!("Stage {} finished", stage);
                Ok(report)
            }
            Err(source) => {
                log::error!("Stage {} failed: {}", stage, source);
                Err(ReleaseError::Stage { stage, source })
            }
        }
    }

    /// Validates every stage's inputs without producing output.
    ///
    /// The artifact itself is not required, a full run builds it first.
    pub async fn preflight(&self) -> Result<Preflight> {
        let modules = aggregate::plan_modules(&self.settings)
            .await
            .map_err(|source| ReleaseError::Stage {
                stage: Stage::Aggregate,
                source,
            })?;

        let doc_tool = if self.settings.docs_enabled() {
            Some(self.check_docs().await.map_err(|source| ReleaseError::Stage {
                stage: Stage::Docs,
                source,
            })?)
        } else {
            None
        };

        let demo_dir = self.settings.demo_dir();
        self.check_demo_dir()
            .await
            .map_err(|source| ReleaseError::Stage {
                stage: Stage::Package,
                source,
            })?;

        Ok(Preflight {
            modules,
            doc_tool,
            demo_dir,
            archive: self.settings.archive_path(),
        })
    }

    async fn check_docs(&self) -> crate::release::Result<PathBuf> {
        let tool = locate_tool(self.settings.doc_tool(), self.settings.root())?;
        let config = self.settings.doc_config();
        tokio::fs::metadata(&config)
            .await
            .fs_context("locating documentation config", &config)?;
        Ok(tool)
    }

    async fn check_demo_dir(&self) -> crate::release::Result<()> {
        let demo_dir = self.settings.demo_dir();
        let metadata = tokio::fs::metadata(&demo_dir)
            .await
            .fs_context("reading demo directory", &demo_dir)?;
        if !metadata.is_dir() {
            bail!("{} is not a directory", demo_dir.display());
        }
        Ok(())
    }
}
