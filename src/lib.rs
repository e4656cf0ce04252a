//! # springforge
//!
//! **springforge** scaffolds Spring Boot style backend service projects:
//! given a project identity (names, package root, build tool, target
//! runtime) it produces a runnable Gradle source tree, optionally augmented
//! with REST interface stubs from an [OpenAPI](https://spec.openapis.org/)
//! specification and with a JPA data-access layer derived from a live
//! PostgreSQL schema.
//!
//! ## Architecture
//!
//! The library is organized into a handful of modules:
//!
//! - **[`config`]** - Project identity, database credentials and the per-run
//!   generation context
//! - **[`naming`]** - Pure mapping from raw schema identifiers to Java
//!   type, package and field names
//! - **[`generator`]** - The individual generation stages (skeleton, API
//!   stubs, data-access interfaces, migration baseline) and the metadata
//!   exchange between them
//! - **[`introspect`]** - Live PostgreSQL schema introspection and entity
//!   source emission
//! - **[`pipeline`]** - The orchestrator sequencing the stages and owning
//!   the transient metadata lifecycle
//! - **[`cli`]** - The `springforge` command-line surface
//!
//! ## Generation Flow
//!
//! ```text
//! CLI input → GenerationContext
//!     → Skeleton Generator            (always)
//!     → API Stub Generator            (when --api-spec is given)
//!     → Schema Introspector           (when db url/user/password are given)
//!         → Entity Metadata Set → flush to repository-metadata.json
//!     → Data-Access Interface Gen.    (consumes the metadata file)
//!     → metadata cleanup
//!     → Schema Baseline Generator
//! ```
//!
//! The pipeline is strictly sequential: a stage never starts before its
//! predecessor completed, and the metadata set is always complete before
//! interface generation begins.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod introspect;
pub mod naming;
pub mod pipeline;

pub use config::{
    BuildTool, DatabaseCredentials, GenerationContext, ProjectIdentity, TargetRuntime,
};
pub use error::PipelineError;
pub use pipeline::{PipelineReport, Stage, StageFailure};
