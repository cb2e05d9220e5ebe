//! The immutable configuration snapshot and activation queries.

use std::process;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::error::FlagError;
use crate::value::FlagValue;

static PUBLISHED: OnceLock<Config> = OnceLock::new();

/// Immutable flag name → value mapping produced by
/// [`ConfigBuilder::finalize`](crate::ConfigBuilder::finalize).
///
/// A name is a key iff it was in the ledger at finalization time (the
/// implicit `verbose` entry included). Nothing adds, removes, or
/// overwrites entries after creation.
#[derive(Debug, Clone)]
pub struct Config {
	values: FxHashMap<String, FlagValue>,
}

impl Config {
	pub(crate) fn new(values: FxHashMap<String, FlagValue>) -> Self {
		Self { values }
	}

	/// Whether `name` was activated this run.
	pub fn is_active(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	pub fn get(&self, name: &str) -> Option<&FlagValue> {
		self.values.get(name)
	}

	pub fn str(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(FlagValue::as_str)
	}

	pub fn int(&self, name: &str) -> Option<i64> {
		self.get(name).and_then(FlagValue::as_int)
	}

	pub fn bool(&self, name: &str) -> Option<bool> {
		self.get(name).and_then(FlagValue::as_bool)
	}

	pub fn list(&self, name: &str) -> Option<&[String]> {
		self.get(name).and_then(FlagValue::as_list)
	}

	/// Activated names, in no particular order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.values.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Enforce, after the fact, that a prerequisite flag was activated by
	/// whatever activation path ran.
	pub fn require(&self, name: &str) -> Result<(), FlagError> {
		if self.is_active(name) {
			Ok(())
		} else {
			Err(FlagError::MissingFlag(name.to_string()))
		}
	}

	pub fn require_all<'a>(
		&self,
		names: impl IntoIterator<Item = &'a str>,
	) -> Result<(), FlagError> {
		for name in names {
			self.require(name)?;
		}
		Ok(())
	}

	/// Like [`Config::require_all`], but writes the required-flag message
	/// to stderr and terminates the process on the first missing name.
	pub fn require_or_exit<'a>(&self, names: impl IntoIterator<Item = &'a str>) {
		for name in names {
			if let Err(err) = self.require(name) {
				eprintln!("{err}");
				process::exit(1);
			}
		}
	}

	/// Publish this snapshot as the process-wide configuration consulted
	/// by [`config`] and [`active`].
	///
	/// At most one snapshot can be published per process; a second call
	/// fails with [`FlagError::AlreadyFinalized`].
	pub fn publish(self) -> Result<&'static Config, FlagError> {
		let mut stored = false;
		let published = PUBLISHED.get_or_init(|| {
			stored = true;
			self
		});
		if stored {
			Ok(published)
		} else {
			Err(FlagError::AlreadyFinalized)
		}
	}
}

/// The process-wide snapshot, once one has been published.
pub fn config() -> Result<&'static Config, FlagError> {
	PUBLISHED.get().ok_or(FlagError::NotFinalized)
}

/// Whether `name` was activated, per the published snapshot.
pub fn active(name: &str) -> Result<bool, FlagError> {
	Ok(config()?.is_active(name))
}
