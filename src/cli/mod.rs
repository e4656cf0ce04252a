//! # CLI Module
//!
//! Command-line surface of the scaffolder: a single `generate` command that
//! accepts the project identity plus the optional API specification and
//! database credentials gating the corresponding pipeline stages.
//!
//! ## Usage
//!
//! ```bash
//! springforge generate \
//!     --group-id com.acme \
//!     --artifact-id orders \
//!     --name orders \
//!     --package-name com.acme.orders \
//!     --api-spec openapi.yaml \
//!     --db-url postgres://localhost:5432/orders \
//!     --db-username orders \
//!     --db-password secret
//! ```
//!
//! Every identity option carries a sensible default, so a bare
//! `springforge generate` produces a runnable skeleton. Leaving out
//! `--api-spec` skips the API stub stage; leaving out any of the three
//! database options skips the database stage.

mod commands;


pub use commands::{run_cli, Cli, Commands};
