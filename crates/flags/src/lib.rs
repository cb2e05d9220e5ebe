//! Declarative command-line configuration for experiment scripts.
//!
//! Independent experiment scripts share one pool of possible flags (data
//! directories, database prefixes, algorithm parameters, resource limits).
//! Each script activates only the subset it needs on a [`ConfigBuilder`],
//! finalizes once against the real process arguments, and reads the
//! resulting immutable [`Config`] for the rest of its life.
//!
//! ```no_run
//! use bcb_flags::ConfigBuilder;
//!
//! let mut flags = ConfigBuilder::new("pairwise alignment benchmark");
//! flags.activate_all(["results-dir", "cpu", "seq-hhm-db"]).unwrap();
//! let config = flags.finalize_or_exit();
//! let results_dir = config.str("results-dir").unwrap();
//! # let _ = results_dir;
//! ```
//!
//! Activation order is significant: flags are validated (and echoed when
//! verbose) in exactly the order they were activated, and validation stops
//! at the first failure.

pub mod builder;
pub mod builtins;
pub mod catalog;
mod config;
pub mod env;
pub mod error;
pub mod validators;
pub mod value;

pub use builder::ConfigBuilder;
pub use builtins::VERBOSE;
pub use catalog::{Catalog, FlagDef, RegisterFn};
pub use config::{Config, active, config};
pub use error::FlagError;
pub use validators::{Outcome, Validator};
pub use value::{FlagType, FlagValue};
