//! # repmerge
//!
//! Merges per-replicate experiment output files into one long-format CSV
//! table per source filename. The upstream evolutionary-computation
//! framework writes each run's results under a directory named by its
//! condition (world, brain architecture, brain hyperparameter tokens) and
//! replicate id; this crate enumerates every condition of a configured
//! sweep, locates each run's file, keeps the allow-listed columns, tags
//! every row with the condition's display values, and concatenates the lot.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repmerge::{produce_merged_table, Config};
//!
//! let config = Config::default();
//! let table = produce_merged_table(&config, "max.csv")?;
//!
//! println!("merged {} rows", table.len());
//! table.write_csv("merged_max.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration
//!
//! The sweep's axes are data, not code: worlds, brain architectures, and
//! each architecture's directory-token/display-label pairs live in a YAML
//! config (see [`Config`]).
//!
//! ```rust
//! use repmerge::Config;
//!
//! let mut config = Config::default();
//! config.replicates.first = 101;
//! config.replicates.last = 109;
//! ```

pub mod condition;
pub mod config;
pub mod merge;
pub mod table;

pub use condition::{AxisValue, BrainAxes, Condition, SubAxis};
pub use config::Config;
pub use merge::{produce_merged_table, MergeError};
pub use table::MergedTable;
