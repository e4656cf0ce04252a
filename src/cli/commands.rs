use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{
    BuildTool, DatabaseCredentials, GenerationContext, ProjectIdentity, TargetRuntime,
};
use crate::pipeline;

/// Command-line interface for springforge
///
/// Provides the `generate` command that scaffolds a backend service project
/// from a project identity, an optional API specification and optional
/// database credentials.
#[derive(Parser)]
#[command(name = "springforge")]
#[command(about = "springforge CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for springforge
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a backend service project
    Generate {
        /// Build tool for the generated project
        #[arg(long, value_enum, default_value_t = BuildTool::Gradle)]
        build_tool: BuildTool,

        /// Group identifier of the generated artifact
        #[arg(long, default_value = "com.example")]
        group_id: String,

        /// Artifact identifier of the generated project
        #[arg(long, default_value = "demo")]
        artifact_id: String,

        /// Project name; also used for the working directory name
        #[arg(long, default_value = "demo")]
        name: String,

        /// Project description
        #[arg(long, default_value = "Demo project for Spring Boot")]
        description: String,

        /// Package root the generated sources live under
        #[arg(long, default_value = "com.example.demo")]
        package_name: String,

        /// JVM language version of the generated project
        #[arg(long, default_value = "17")]
        jvm_version: String,

        /// Path to an OpenAPI specification (YAML or JSON); enables the API stub stage
        #[arg(long)]
        api_spec: Option<PathBuf>,

        /// Database connection URL; with username and password enables the database stage
        #[arg(long, env = "SPRINGFORGE_DB_URL")]
        db_url: Option<String>,

        /// Database username
        #[arg(long, env = "SPRINGFORGE_DB_USERNAME")]
        db_username: Option<String>,

        /// Database password
        #[arg(long, env = "SPRINGFORGE_DB_PASSWORD")]
        db_password: Option<String>,

        /// Target runtime for the generated deployment manifest
        #[arg(long, value_enum, default_value_t = TargetRuntime::Gke)]
        runtime: TargetRuntime,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error when any fatal pipeline stage fails; the failing stage
/// and cause are part of the error message.
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            build_tool,
            group_id,
            artifact_id,
            name,
            description,
            package_name,
            jvm_version,
            api_spec,
            db_url,
            db_username,
            db_password,
            runtime,
        } => {
            let identity = ProjectIdentity {
                build_tool,
                group_id,
                artifact_id,
                name,
                description,
                package_root: package_name,
                jvm_version,
                runtime,
            };
            let credentials = DatabaseCredentials::from_parts(db_url, db_username, db_password);
            let ctx = GenerationContext::new(Path::new("."), identity, api_spec, credentials);

            let report = pipeline::run(&ctx).await?;
            for warning in &report.warnings {
                tracing::warn!("{warning}");
            }
            if let Some(summary) = report.repositories {
                println!(
                    "✅ generated {} data-access interfaces ({} failed)",
                    summary.generated, summary.failed
                );
            }
            println!("✅ project generated at {}", report.project_dir.display());
            Ok(())
        }
    }
}
