#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::metadata::EntityMetadata;
use super::*;
use crate::config::{BuildTool, ProjectIdentity, TargetRuntime};
use crate::error::PipelineError;
use std::fs;
use std::path::Path;

fn identity(build_tool: BuildTool, runtime: TargetRuntime) -> ProjectIdentity {
    ProjectIdentity {
        build_tool,
        group_id: "com.example".into(),
        artifact_id: "demo".into(),
        name: "demo".into(),
        description: "Demo project for Spring Boot".into(),
        package_root: "com.example.demo".into(),
        jvm_version: "17".into(),
        runtime,
    }
}

fn order_item_metadata() -> EntityMetadata {
    EntityMetadata {
        table_name: "tb_order_item".into(),
        entity_class_name: "OrderItem".into(),
        entity_package_name: "com.example.demo.infrastructure.repositories.tables.pojos".into(),
        primary_key_type: "Long".into(),
    }
}

#[test]
fn test_repository_interface_for_order_item() {
    let dir = tempfile::tempdir().unwrap();
    let identity = identity(BuildTool::Gradle, TargetRuntime::Gke);

    let summary = repository::generate(&[order_item_metadata()], &identity, dir.path());
    assert_eq!(summary.generated, 1);
    assert_eq!(summary.failed, 0);

    let path = dir
        .path()
        .join("src/main/java/com/example/demo/infrastructure/repositories/OrderItemRepository.java");
    let source = fs::read_to_string(path).unwrap();
    assert!(source.contains("package com.example.demo.infrastructure.repositories;"));
    assert!(source
        .contains("import com.example.demo.infrastructure.repositories.tables.pojos.OrderItem;"));
    assert!(source.contains(
        "public interface OrderItemRepository extends JpaRepository<OrderItem, Long> {"
    ));
}

#[test]
fn test_repository_generation_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let identity = identity(BuildTool::Gradle, TargetRuntime::Gke);
    let set = vec![order_item_metadata()];
    let path = dir
        .path()
        .join("src/main/java/com/example/demo/infrastructure/repositories/OrderItemRepository.java");

    repository::generate(&set, &identity, dir.path());
    let first = fs::read(&path).unwrap();
    repository::generate(&set, &identity, dir.path());
    let second = fs::read(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_repository_uuid_key_pulls_import() {
    let dir = tempfile::tempdir().unwrap();
    let identity = identity(BuildTool::Gradle, TargetRuntime::Gke);
    let set = vec![EntityMetadata {
        table_name: "users".into(),
        entity_class_name: "Users".into(),
        entity_package_name: "com.example.demo.infrastructure.repositories.tables.pojos".into(),
        primary_key_type: "UUID".into(),
    }];

    let summary = repository::generate(&set, &identity, dir.path());
    assert_eq!(summary.generated, 1);

    let source = fs::read_to_string(
        dir.path()
            .join("src/main/java/com/example/demo/infrastructure/repositories/UsersRepository.java"),
    )
    .unwrap();
    assert!(source.contains("import java.util.UUID;"));
    assert!(source.contains("JpaRepository<Users, UUID>"));
}

#[test]
fn test_gradle_skeleton_layout() {
    let dir = tempfile::tempdir().unwrap();
    let identity = identity(BuildTool::Gradle, TargetRuntime::Gke);

    skeleton::generate(&identity, dir.path()).unwrap();

    for relative in [
        "settings.gradle",
        "build.gradle",
        ".gitignore",
        "compose.yaml",
        "config/application-dev.yml",
        "config/application-ut.yml",
        "dev-resources/service.yaml",
        "src/main/java/com/example/demo/Application.java",
        "src/test/java/com/example/demo/ApplicationTests.java",
        "src/test/java/com/example/demo/TestcontainersConfiguration.java",
        "src/main/resources/application.yml",
        "src/main/resources/application-gcp.yml",
        "src/main/resources/db/changelog/db.changelog-master.yaml",
    ] {
        assert!(dir.path().join(relative).exists(), "missing {relative}");
    }

    let settings = fs::read_to_string(dir.path().join("settings.gradle")).unwrap();
    assert_eq!(settings.trim(), "rootProject.name = 'demo'");

    let build = fs::read_to_string(dir.path().join("build.gradle")).unwrap();
    assert!(build.contains("group = 'com.example'"));
    assert!(build.contains("JavaLanguageVersion.of(17)"));

    let application =
        fs::read_to_string(dir.path().join("src/main/java/com/example/demo/Application.java"))
            .unwrap();
    assert!(application.contains("package com.example.demo;"));

    let manifest = fs::read_to_string(dir.path().join("dev-resources/service.yaml")).unwrap();
    assert!(manifest.contains("kind: Deployment"));
}

#[test]
fn test_cloud_run_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let identity = identity(BuildTool::Gradle, TargetRuntime::CloudRun);

    skeleton::generate(&identity, dir.path()).unwrap();

    let manifest = fs::read_to_string(dir.path().join("dev-resources/service.yaml")).unwrap();
    assert!(manifest.contains("serving.knative.dev/v1"));
    assert!(!manifest.contains("kind: Deployment"));
}

#[test]
fn test_maven_skeleton_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let identity = identity(BuildTool::Maven, TargetRuntime::Gke);

    let err = skeleton::generate(&identity, dir.path()).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
    assert!(err.to_string().contains("MAVEN"));
    assert!(!dir.path().join("settings.gradle").exists());
    assert!(!dir.path().join("build.gradle").exists());
}

#[test]
fn test_api_stub_generation_from_spec() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = dir.path().join("openapi.yaml");
    fs::write(
        &spec_path,
        r#"openapi: 3.1.0
info:
  title: Pet Store
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: list_pets
      tags: [pets]
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Pet'
    post:
      operationId: add_pet
      tags: [pets]
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Pet'
      responses:
        '201':
          description: Created
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Pet'
  /pets/{petId}:
    get:
      operationId: get_pet
      tags: [pets]
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: integer
            format: int64
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Pet'
components:
  schemas:
    Pet:
      type: object
      properties:
        id:
          type: integer
          format: int64
        name:
          type: string
        created_at:
          type: string
          format: date-time
"#,
    )
    .unwrap();

    let project_dir = dir.path().join("out");
    api::generate(&api::ApiStubConfig {
        spec_path: &spec_path,
        package_root: "com.example.demo",
        project_dir: &project_dir,
    })
    .unwrap();

    let interface = fs::read_to_string(
        project_dir.join("src/main/java/com/example/demo/interfaces/rest/PetsApi.java"),
    )
    .unwrap();
    assert!(interface.contains("package com.example.demo.interfaces.rest;"));
    assert!(interface.contains("public interface PetsApi {"));
    assert!(interface.contains("ResponseEntity<List<Pet>> listPets();"));
    assert!(interface
        .contains("ResponseEntity<Pet> getPet(@PathVariable(\"petId\") Long petId);"));
    assert!(interface.contains("ResponseEntity<Pet> addPet(@RequestBody Pet body);"));

    let dto = fs::read_to_string(
        project_dir.join("src/main/java/com/example/demo/interfaces/rest/dto/Pet.java"),
    )
    .unwrap();
    assert!(dto.contains("package com.example.demo.interfaces.rest.dto;"));
    assert!(dto.contains("private Long id;"));
    assert!(dto.contains("private String name;"));
    assert!(dto.contains("private OffsetDateTime createdAt;"));
    assert!(dto.contains("import java.time.OffsetDateTime;"));
}

#[test]
fn test_api_stub_generation_rejects_invalid_spec() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = dir.path().join("openapi.yaml");
    fs::write(&spec_path, "not: [valid").unwrap();

    let err = api::generate(&api::ApiStubConfig {
        spec_path: &spec_path,
        package_root: "com.example.demo",
        project_dir: dir.path(),
    })
    .unwrap_err();
    assert!(matches!(err, PipelineError::Spec(_)));
}

#[test]
fn test_write_file_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b").join("c.txt");
    templates::write_file(&nested, "payload").unwrap();
    assert_eq!(fs::read_to_string(nested).unwrap(), "payload");
}

#[test]
fn test_metadata_path_stays_inside_source_tree() {
    let path = metadata::metadata_path(Path::new("proj"));
    assert!(path.starts_with("proj"));
    assert!(path.to_string_lossy().ends_with("repository-metadata.json"));
}
