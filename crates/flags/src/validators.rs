//! Validators run against parsed flag values.
//!
//! A validator either succeeds or produces a human-readable refusal; there
//! are no other outcomes. Validators with environment prerequisites are
//! composed with [`Validator::Dependent`], which short-circuits: a failing
//! prerequisite is reported as-is and the value check never runs.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::env;
use crate::value::FlagValue;

/// Outcome of one validation step.
pub type Outcome = Result<(), String>;

/// Validation bound to a flag.
///
/// Both forms hold plain `fn` pointers so catalog entries stay static data.
#[derive(Clone, Copy)]
pub enum Validator {
	/// A single check against the parsed value.
	Simple(fn(&FlagValue) -> Outcome),
	/// A prerequisite gate in front of the value check. The prerequisite
	/// typically probes the process environment rather than the value.
	Dependent {
		prereq: fn() -> Outcome,
		check: fn(&FlagValue) -> Outcome,
	},
}

impl Validator {
	pub fn run(&self, value: &FlagValue) -> Outcome {
		match self {
			Validator::Simple(check) => check(value),
			Validator::Dependent { prereq, check } => {
				prereq()?;
				check(value)
			}
		}
	}
}

impl fmt::Debug for Validator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Validator::Simple(_) => f.write_str("Validator::Simple"),
			Validator::Dependent { .. } => f.write_str("Validator::Dependent"),
		}
	}
}

/// Success iff the value names a path readable by this process.
pub fn verify_path(value: &FlagValue) -> Outcome {
	readable(Path::new(str_of(value)?))
}

/// The underlying path check, exposed for validators that derive paths
/// from the flag value instead of taking it verbatim.
pub fn readable(path: &Path) -> Outcome {
	if env::is_readable(path) {
		Ok(())
	} else {
		Err(format!("Cannot read {}", path.display()))
	}
}

/// Success if the path is already readable; otherwise creates the
/// directory (and parents) and re-checks readability.
///
/// Created directories persist even if a later validator fails.
pub fn make_path(value: &FlagValue) -> Outcome {
	let path = Path::new(str_of(value)?);
	if env::is_readable(path) {
		return Ok(());
	}
	fs::create_dir_all(path)
		.map_err(|e| format!("Cannot makedirs for {} because {}", path.display(), e))?;
	debug!(path = %path.display(), "created missing directory");
	readable(path)
}

/// Checks that `var` is set and points at a readable location.
pub fn verify_env_dir(var: &str) -> Outcome {
	let Some(value) = env::var(var) else {
		return Err(format!("{var} environment variable is not set."));
	};
	if !env::is_readable(Path::new(&value)) {
		return Err(format!("{var} is not accessible: {value}"));
	}
	Ok(())
}

pub(crate) fn str_of(value: &FlagValue) -> Result<&str, String> {
	value
		.as_str()
		.ok_or_else(|| format!("expected a string value, got \"{value}\""))
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicBool, Ordering};

	use serial_test::serial;

	use super::*;

	fn str_value(s: &str) -> FlagValue {
		FlagValue::Str(s.to_string())
	}

	#[test]
	fn verify_path_accepts_readable_dir() {
		let dir = tempfile::tempdir().unwrap();
		assert_eq!(verify_path(&str_value(dir.path().to_str().unwrap())), Ok(()));
	}

	#[test]
	fn verify_path_names_the_missing_path() {
		let err = verify_path(&str_value("/nonexistent/bcb/results")).unwrap_err();
		assert_eq!(err, "Cannot read /nonexistent/bcb/results");
	}

	#[test]
	fn verify_path_rejects_non_string_values() {
		let err = verify_path(&FlagValue::Int(4)).unwrap_err();
		assert!(err.contains("expected a string"));
	}

	#[test]
	fn make_path_creates_missing_directories() {
		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("results").join("run-1");
		assert_eq!(make_path(&str_value(target.to_str().unwrap())), Ok(()));
		assert!(target.is_dir());
	}

	#[test]
	fn make_path_reports_uncreatable_paths() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("occupied");
		fs::write(&file, b"x").unwrap();
		let target = file.join("sub");
		let err = make_path(&str_value(target.to_str().unwrap())).unwrap_err();
		assert!(err.starts_with("Cannot makedirs for"));
		assert!(err.contains(target.to_str().unwrap()));
	}

	#[test]
	#[serial]
	fn verify_env_dir_reports_unset_variable() {
		unsafe { std::env::remove_var("BCB_TEST_TOOL") };
		let err = verify_env_dir("BCB_TEST_TOOL").unwrap_err();
		assert_eq!(err, "BCB_TEST_TOOL environment variable is not set.");
	}

	#[test]
	#[serial]
	fn verify_env_dir_reports_unreadable_target() {
		unsafe { std::env::set_var("BCB_TEST_TOOL", "/nonexistent/hhsuite") };
		let err = verify_env_dir("BCB_TEST_TOOL").unwrap_err();
		assert_eq!(err, "BCB_TEST_TOOL is not accessible: /nonexistent/hhsuite");
		unsafe { std::env::remove_var("BCB_TEST_TOOL") };
	}

	#[test]
	#[serial]
	fn verify_env_dir_accepts_readable_target() {
		let dir = tempfile::tempdir().unwrap();
		unsafe { std::env::set_var("BCB_TEST_TOOL", dir.path()) };
		assert_eq!(verify_env_dir("BCB_TEST_TOOL"), Ok(()));
		unsafe { std::env::remove_var("BCB_TEST_TOOL") };
	}

	static DEPENDENT_RAN: AtomicBool = AtomicBool::new(false);

	fn failing_prereq() -> Outcome {
		Err("tool is not configured".to_string())
	}

	fn recording_check(_: &FlagValue) -> Outcome {
		DEPENDENT_RAN.store(true, Ordering::SeqCst);
		Ok(())
	}

	#[test]
	fn dependent_validator_short_circuits_on_prereq_failure() {
		let validator = Validator::Dependent {
			prereq: failing_prereq,
			check: recording_check,
		};
		let err = validator.run(&str_value("nr20")).unwrap_err();
		assert_eq!(err, "tool is not configured");
		assert!(!DEPENDENT_RAN.load(Ordering::SeqCst));
	}
}
