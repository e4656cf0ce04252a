//! # Pipeline Orchestrator
//!
//! Sequences the generation stages based on which optional inputs are
//! present and enforces the fail-fast vs. best-effort policy per stage:
//!
//! ```text
//! INIT → SKELETON → API_STUBS? → DB_STAGE? → CLEANUP → DONE
//!                                                    ↘ FAILED (fatal error)
//! ```
//!
//! `API_STUBS` runs only when an API specification was supplied and any
//! failure there is fatal — an invalid spec is a configuration problem, not
//! a partial result. `DB_STAGE` runs only when url, username and password
//! are all present; internally it is a fixed sequence (introspect, flush
//! metadata, generate interfaces, remove metadata, baseline) because both
//! database stages share the live connection and the interface generator
//! requires the complete, closed metadata set. Per-entity generation
//! failures and cleanup failures only ever produce warnings. Nothing is
//! rolled back: a failed run leaves its partial working directory behind
//! for diagnosis.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::config::GenerationContext;
use crate::error::PipelineError;
use crate::generator::repository::GenerationSummary;
use crate::generator::{api, baseline, metadata, repository, skeleton};
use crate::introspect::{self, IntrospectConfig};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Skeleton,
    ApiStubs,
    DbStage,
    Cleanup,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "INIT",
            Stage::Skeleton => "SKELETON",
            Stage::ApiStubs => "API_STUBS",
            Stage::DbStage => "DB_STAGE",
            Stage::Cleanup => "CLEANUP",
            Stage::Done => "DONE",
        };
        write!(f, "{name}")
    }
}

/// A fatal error attributed to the stage it happened in.
#[derive(Debug, thiserror::Error)]
#[error("stage {stage} failed: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub source: PipelineError,
}

/// What a completed run produced.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub project_dir: PathBuf,
    pub warnings: Vec<String>,
    /// Present only when the database stage ran.
    pub repositories: Option<GenerationSummary>,
}

fn fail(stage: Stage) -> impl FnOnce(PipelineError) -> StageFailure {
    move |source| StageFailure { stage, source }
}

/// Run the full pipeline for one generation context.
///
/// # Errors
///
/// The first fatal error aborts the run; subsequent stages are not
/// attempted and the failure names the stage it happened in.
pub async fn run(ctx: &GenerationContext) -> Result<PipelineReport, StageFailure> {
    let mut report = PipelineReport {
        project_dir: ctx.project_dir.clone(),
        ..PipelineReport::default()
    };

    ctx.identity.validate().map_err(fail(Stage::Init))?;
    fs::create_dir_all(&ctx.project_dir)
        .map_err(PipelineError::from)
        .map_err(fail(Stage::Init))?;
    tracing::info!("🚀 generating project in {}", ctx.project_dir.display());

    skeleton::generate(&ctx.identity, &ctx.project_dir).map_err(fail(Stage::Skeleton))?;

    if let Some(spec_path) = &ctx.api_spec {
        tracing::info!("📄 generating API stubs from {}", spec_path.display());
        api::generate(&api::ApiStubConfig {
            spec_path,
            package_root: &ctx.identity.package_root,
            project_dir: &ctx.project_dir,
        })
        .map_err(fail(Stage::ApiStubs))?;
    } else {
        tracing::debug!("no API specification supplied, skipping {}", Stage::ApiStubs);
    }

    match &ctx.credentials {
        Some(credentials) => {
            run_db_stage(ctx, credentials, &mut report).await?;
            cleanup(ctx, &mut report);
        }
        None => {
            tracing::debug!("no database credentials supplied, skipping {}", Stage::DbStage);
        }
    }

    tracing::info!("🎉 pipeline reached {}", Stage::Done);
    Ok(report)
}

/// The database stage: introspect, flush metadata, generate interfaces,
/// remove the metadata file, then write the migration baseline — in that
/// fixed order, one connection at a time.
async fn run_db_stage(
    ctx: &GenerationContext,
    credentials: &crate::config::DatabaseCredentials,
    report: &mut PipelineReport,
) -> Result<(), StageFailure> {
    tracing::info!("🗄️  running {}", Stage::DbStage);
    let config = IntrospectConfig::new(&ctx.identity.package_root, &ctx.project_dir);

    let set = introspect::introspect(credentials, &config)
        .await
        .map_err(fail(Stage::DbStage))?;
    if set.is_empty() {
        let warning = "schema introspection produced no entities with primary keys".to_string();
        tracing::warn!("⚠️  {warning}");
        report.warnings.push(warning);
    }

    let path = metadata::metadata_path(&ctx.project_dir);
    metadata::flush(&set, &path).map_err(fail(Stage::DbStage))?;

    let loaded = metadata::load(&path).map_err(fail(Stage::DbStage))?;
    let summary = repository::generate(&loaded, &ctx.identity, &ctx.project_dir);
    if summary.failed > 0 {
        report.warnings.push(format!(
            "{} of {} data-access interfaces failed to generate",
            summary.failed,
            summary.failed + summary.generated
        ));
    }
    report.repositories = Some(summary);

    // The exchange file is consumed; remove it regardless of per-entity
    // failures. Failure to delete is a warning, never an abort.
    match fs::remove_file(&path) {
        Ok(()) => tracing::info!("🧹 removed transient metadata file {}", path.display()),
        Err(err) => {
            let warning = PipelineError::Cleanup(format!(
                "transient metadata file {} could not be removed: {err}",
                path.display()
            ));
            tracing::warn!("⚠️  {warning}");
            report.warnings.push(warning.to_string());
        }
    }

    baseline::generate(credentials, &config)
        .await
        .map_err(fail(Stage::DbStage))?;
    Ok(())
}

/// Final sweep: make sure no transient state survives the run. Best effort
/// only; failures are logged and the pipeline still reaches DONE.
fn cleanup(ctx: &GenerationContext, report: &mut PipelineReport) {
    tracing::debug!("running {}", Stage::Cleanup);
    let path = metadata::metadata_path(&ctx.project_dir);
    if path.exists() {
        if let Err(err) = fs::remove_file(&path) {
            let warning = PipelineError::Cleanup(format!(
                "leftover metadata file {} could not be removed: {err}",
                path.display()
            ));
            tracing::warn!("⚠️  {warning}");
            report.warnings.push(warning.to_string());
        }
    }
}
