//! Project skeleton generation.
//!
//! Renders the static project frame: build files, ignore file, base
//! application entry point, environment configs, deployment manifest and the
//! changelog master. Build-tool dispatch is a static `match`; only Gradle has
//! a generator today and anything else is rejected before any file is
//! written.

use askama::Template;
use std::path::Path;

use crate::config::{BuildTool, ProjectIdentity, TargetRuntime};
use crate::error::PipelineError;
use crate::naming::package_to_path;

use super::templates::{
    write_file, ApplicationDevYmlTemplate, ApplicationGcpYmlTemplate, ApplicationTemplate,
    ApplicationTestsTemplate, ApplicationUtYmlTemplate, ApplicationYmlTemplate,
    BuildGradleTemplate, ChangelogMasterTemplate, ComposeTemplate, GitignoreTemplate,
    ServiceManifestTemplate, SettingsGradleTemplate, TestcontainersTemplate,
};

/// Generate the project skeleton for the configured build tool.
///
/// # Errors
///
/// [`PipelineError::Configuration`] for a build tool without a generator;
/// template or I/O errors otherwise.
pub fn generate(identity: &ProjectIdentity, project_dir: &Path) -> Result<(), PipelineError> {
    match identity.build_tool {
        BuildTool::Gradle => generate_gradle(identity, project_dir),
        BuildTool::Maven => Err(PipelineError::Configuration(format!(
            "unsupported build tool: {}",
            identity.build_tool
        ))),
    }
}

fn generate_gradle(identity: &ProjectIdentity, project_dir: &Path) -> Result<(), PipelineError> {
    let package_path = package_to_path(&identity.package_root);
    let main_java = project_dir
        .join("src")
        .join("main")
        .join("java")
        .join(&package_path);
    let test_java = project_dir
        .join("src")
        .join("test")
        .join("java")
        .join(&package_path);
    let resources = project_dir.join("src").join("main").join("resources");

    write_file(
        &project_dir.join("settings.gradle"),
        &SettingsGradleTemplate {
            name: identity.name.clone(),
        }
        .render()?,
    )?;
    write_file(
        &project_dir.join("build.gradle"),
        &BuildGradleTemplate {
            group_id: identity.group_id.clone(),
            description: identity.description.clone(),
            jvm_version: identity.jvm_version.clone(),
        }
        .render()?,
    )?;
    write_file(&project_dir.join(".gitignore"), &GitignoreTemplate.render()?)?;
    write_file(
        &project_dir.join("compose.yaml"),
        &ComposeTemplate {
            name: identity.name.clone(),
        }
        .render()?,
    )?;

    write_file(
        &main_java.join("Application.java"),
        &ApplicationTemplate {
            package_root: identity.package_root.clone(),
        }
        .render()?,
    )?;
    write_file(
        &test_java.join("ApplicationTests.java"),
        &ApplicationTestsTemplate {
            package_root: identity.package_root.clone(),
        }
        .render()?,
    )?;
    write_file(
        &test_java.join("TestcontainersConfiguration.java"),
        &TestcontainersTemplate {
            package_root: identity.package_root.clone(),
        }
        .render()?,
    )?;

    write_file(
        &resources.join("application.yml"),
        &ApplicationYmlTemplate {
            name: identity.name.clone(),
        }
        .render()?,
    )?;
    write_file(
        &resources.join("application-gcp.yml"),
        &ApplicationGcpYmlTemplate {
            name: identity.name.clone(),
        }
        .render()?,
    )?;
    write_file(
        &project_dir.join("config").join("application-dev.yml"),
        &ApplicationDevYmlTemplate {
            name: identity.name.clone(),
            package_root: identity.package_root.clone(),
        }
        .render()?,
    )?;
    write_file(
        &project_dir.join("config").join("application-ut.yml"),
        &ApplicationUtYmlTemplate {
            name: identity.name.clone(),
        }
        .render()?,
    )?;

    write_file(
        &project_dir.join("dev-resources").join("service.yaml"),
        &ServiceManifestTemplate {
            name: identity.name.clone(),
            cloud_run: identity.runtime == TargetRuntime::CloudRun,
        }
        .render()?,
    )?;
    write_file(
        &resources
            .join("db")
            .join("changelog")
            .join("db.changelog-master.yaml"),
        &ChangelogMasterTemplate.render()?,
    )?;

    tracing::info!("✅ generated {} skeleton at {}", identity.build_tool, project_dir.display());
    Ok(())
}
