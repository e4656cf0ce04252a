//! # Generator Module
//!
//! Code generation stages of the scaffolding pipeline. Each submodule is one
//! independently invocable generator:
//!
//! - **[`skeleton`]** - Build files, base entry point and environment configs
//! - **[`api`]** - REST interface and DTO stubs from an OpenAPI document
//! - **[`metadata`]** - Entity metadata exchange between the database stages
//! - **[`repository`]** - One data-access interface per introspected entity
//! - **[`baseline`]** - Initial migration changelog from the live schema
//! - **[`templates`]** - Askama template structs shared by all generators
//!
//! The generators do not talk to each other; sequencing and the hand-off of
//! intermediate artifacts belong to [`crate::pipeline`].
//!
//! ## Generated Structure
//!
//! A generated project has this shape (database- and API-derived parts only
//! when the corresponding inputs were supplied):
//!
//! ```text
//! demo-4213f2/
//! ├── build.gradle
//! ├── settings.gradle
//! ├── compose.yaml
//! ├── config/
//! │   ├── application-dev.yml
//! │   └── application-ut.yml
//! ├── dev-resources/
//! │   └── service.yaml
//! └── src/
//!     ├── main/java/com/example/demo/
//!     │   ├── Application.java
//!     │   ├── interfaces/rest/           # API stubs
//!     │   └── infrastructure/repositories/
//!     │       ├── *Repository.java       # data-access interfaces
//!     │       └── tables/pojos/*.java    # entity models
//!     └── main/resources/
//!         ├── application.yml
//!         └── db/changelog/              # changelog master + baseline
//! ```

pub mod api;
pub mod baseline;
pub mod metadata;
pub mod repository;
pub mod skeleton;
pub mod templates;

#[cfg(test)]
mod tests;

pub use metadata::{EntityMetadata, EntityMetadataSet};
pub use repository::GenerationSummary;
