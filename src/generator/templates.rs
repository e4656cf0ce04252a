use askama::Template;
use std::fs;
use std::io;
use std::path::Path;

/// One Java field of a generated entity or DTO class.
///
/// Getter/setter names are precomputed so templates stay logic-less.
#[derive(Debug, Clone)]
pub struct JavaField {
    /// lowerCamelCase field name
    pub field_name: String,
    /// Java type (simple name)
    pub java_type: String,
    /// Getter method name (e.g. `getCreatedAt`)
    pub getter_name: String,
    /// Setter method name (e.g. `setCreatedAt`)
    pub setter_name: String,
    /// Raw column name this field maps to (entities only; empty for DTOs)
    pub column_name: String,
    /// Whether this column is (part of) the primary key
    pub primary_key: bool,
    /// Whether the column accepts NULL
    pub nullable: bool,
}

impl JavaField {
    pub fn new(field_name: &str, java_type: &str) -> Self {
        let pascal = {
            let mut chars = field_name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        };
        Self {
            field_name: field_name.to_string(),
            java_type: java_type.to_string(),
            getter_name: format!("get{pascal}"),
            setter_name: format!("set{pascal}"),
            column_name: String::new(),
            primary_key: false,
            nullable: true,
        }
    }
}

/// One operation of a generated REST interface.
#[derive(Debug, Clone)]
pub struct ApiMethod {
    /// Mapping annotation (`GetMapping`, `PostMapping`, ...)
    pub annotation: String,
    /// Route path as it appears in the specification
    pub path: String,
    /// lowerCamelCase Java method name
    pub name: String,
    /// Return DTO or primitive type
    pub return_type: String,
    /// Full parameter list, already formatted (`@PathVariable("id") Long id, ...`)
    pub params: String,
}

/// Template data for the generated `settings.gradle`.
#[derive(Template)]
#[template(path = "settings.gradle.txt")]
pub struct SettingsGradleTemplate {
    pub name: String,
}

/// Template data for the generated `build.gradle`.
#[derive(Template)]
#[template(path = "build.gradle.txt")]
pub struct BuildGradleTemplate {
    pub group_id: String,
    pub description: String,
    pub jvm_version: String,
}

/// Template for the generated `.gitignore`.
#[derive(Template)]
#[template(path = "gitignore.txt")]
pub struct GitignoreTemplate;

/// Template data for the generated `compose.yaml`.
#[derive(Template)]
#[template(path = "compose.yaml.txt")]
pub struct ComposeTemplate {
    pub name: String,
}

/// Template data for the base application entry point.
#[derive(Template)]
#[template(path = "Application.java.txt")]
pub struct ApplicationTemplate {
    pub package_root: String,
}

/// Template data for the context-loads smoke test.
#[derive(Template)]
#[template(path = "ApplicationTests.java.txt")]
pub struct ApplicationTestsTemplate {
    pub package_root: String,
}

/// Template data for the Testcontainers test configuration.
#[derive(Template)]
#[template(path = "TestcontainersConfiguration.java.txt")]
pub struct TestcontainersTemplate {
    pub package_root: String,
}

/// Template data for `src/main/resources/application.yml`.
#[derive(Template)]
#[template(path = "application.yml.txt")]
pub struct ApplicationYmlTemplate {
    pub name: String,
}

/// Template data for `src/main/resources/application-gcp.yml`.
#[derive(Template)]
#[template(path = "application-gcp.yml.txt")]
pub struct ApplicationGcpYmlTemplate {
    pub name: String,
}

/// Template data for `config/application-dev.yml`.
#[derive(Template)]
#[template(path = "application-dev.yml.txt")]
pub struct ApplicationDevYmlTemplate {
    pub name: String,
    pub package_root: String,
}

/// Template data for `config/application-ut.yml`.
#[derive(Template)]
#[template(path = "application-ut.yml.txt")]
pub struct ApplicationUtYmlTemplate {
    pub name: String,
}

/// Template data for the runtime deployment manifest.
#[derive(Template)]
#[template(path = "service.yaml.txt")]
pub struct ServiceManifestTemplate {
    pub name: String,
    /// Knative manifest when true, Deployment + Service when false
    pub cloud_run: bool,
}

/// Template for the static Liquibase changelog master.
#[derive(Template)]
#[template(path = "db.changelog-master.yaml.txt")]
pub struct ChangelogMasterTemplate;

/// Template data for one generated JPA entity class.
#[derive(Template)]
#[template(path = "Entity.java.txt")]
pub struct EntityClassTemplate {
    pub package_name: String,
    pub class_name: String,
    pub table_name: String,
    pub imports: Vec<String>,
    pub fields: Vec<JavaField>,
}

/// Template data for engine-emitted schema/catalog marker classes.
#[derive(Template)]
#[template(path = "SchemaMarker.java.txt")]
pub struct SchemaMarkerTemplate {
    pub package_name: String,
    pub class_name: String,
    pub schema_name: String,
}

/// Template data for one generated data-access interface.
#[derive(Template)]
#[template(path = "JpaRepository.java.txt")]
pub struct RepositoryTemplate {
    pub package_name: String,
    pub class_name: String,
    pub pojo_class_name: String,
    pub pojo_package_name: String,
    pub primary_key_type: String,
    pub imports: Vec<String>,
}

/// Template data for one generated REST interface.
#[derive(Template)]
#[template(path = "ApiInterface.java.txt")]
pub struct ApiInterfaceTemplate {
    pub package_name: String,
    pub dto_package: String,
    pub class_name: String,
    pub imports: Vec<String>,
    pub methods: Vec<ApiMethod>,
}

/// Template data for one generated DTO class.
#[derive(Template)]
#[template(path = "Dto.java.txt")]
pub struct DtoTemplate {
    pub package_name: String,
    pub class_name: String,
    pub imports: Vec<String>,
    pub fields: Vec<JavaField>,
}

/// Write rendered output, creating parent directories as needed.
/// Existing files are overwritten so re-runs stay idempotent.
pub(crate) fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}
