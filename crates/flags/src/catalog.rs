//! The static registry of available experiment flags.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::builtins;
use crate::error::FlagError;
use crate::validators::Validator;
use crate::value::FlagType;

/// Registration thunk: adds the flag's argument to the parser under
/// construction. Called at most once per process, only when the owning
/// flag is activated.
pub type RegisterFn = fn(clap::Command) -> clap::Command;

/// Definition of an available flag (static input).
///
/// `value_type` must match the argument the registration thunk installs,
/// and the argument must always yield a value (a default, or an action
/// such as `SetTrue` that implies one); a definition violating either is
/// a programmer error, reported at finalization for the missing-value
/// case.
#[derive(Clone, Copy)]
pub struct FlagDef {
	pub name: &'static str,
	pub value_type: FlagType,
	pub register: RegisterFn,
	pub validator: Option<Validator>,
}

impl fmt::Debug for FlagDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FlagDef")
			.field("name", &self.name)
			.field("value_type", &self.value_type)
			.field("validator", &self.validator)
			.finish()
	}
}

/// Read-only name → definition table.
///
/// Populated before any script logic runs and never mutated afterward;
/// entries do not capture or depend on activation order.
pub struct Catalog {
	defs: FxHashMap<&'static str, FlagDef>,
}

impl Catalog {
	/// The shared experiment flag pool.
	pub fn builtin() -> Self {
		Self::from_defs(builtins::all())
	}

	/// A catalog over an explicit set of definitions. Later entries win on
	/// duplicate names.
	pub fn from_defs(defs: impl IntoIterator<Item = FlagDef>) -> Self {
		let mut table = FxHashMap::default();
		for def in defs {
			table.insert(def.name, def);
		}
		Self { defs: table }
	}

	pub fn lookup(&self, name: &str) -> Result<&FlagDef, FlagError> {
		self.defs.get(name).ok_or_else(|| FlagError::UnknownFlag {
			name: name.to_string(),
			suggestion: self.suggest(name),
		})
	}

	pub fn contains(&self, name: &str) -> bool {
		self.defs.contains_key(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.defs.keys().copied()
	}

	/// Closest known name within an edit distance of 3. Ties go to the
	/// lexicographically first name, so the suggestion is stable across
	/// runs.
	fn suggest(&self, name: &str) -> Option<String> {
		let mut known: Vec<&'static str> = self.defs.keys().copied().collect();
		known.sort_unstable();
		known
			.into_iter()
			.min_by_key(|candidate| strsim::levenshtein(name, candidate))
			.filter(|candidate| strsim::levenshtein(name, candidate) <= 3)
			.map(str::to_string)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_catalog_contains_the_shared_pool() {
		let catalog = Catalog::builtin();
		for name in [
			"pdb-dir",
			"sabmark-dir",
			"sabmark-set",
			"frag-lib",
			"bow-db",
			"pdb-hhm-db",
			"seq-hhm-db",
			"hhfrag-inc",
			"hhfrag-min",
			"hhfrag-max",
			"blits",
			"results-dir",
			"cpu",
			"no-cache",
			"ignore-cache",
			"tmp-dir",
			"verbose",
		] {
			assert!(catalog.contains(name), "missing builtin flag {name}");
		}
	}

	#[test]
	fn lookup_unknown_name_suggests_the_closest_flag() {
		let catalog = Catalog::builtin();
		let err = catalog.lookup("pdb-dirs").unwrap_err();
		match err {
			FlagError::UnknownFlag { name, suggestion } => {
				assert_eq!(name, "pdb-dirs");
				assert_eq!(suggestion.as_deref(), Some("pdb-dir"));
			}
			other => panic!("expected UnknownFlag, got {other:?}"),
		}
	}

	#[test]
	fn equidistant_typo_gets_a_stable_suggestion() {
		// "hhfrag-mix" is one edit from both hhfrag-max and hhfrag-min;
		// the tie must resolve the same way on every run.
		for _ in 0..4 {
			let catalog = Catalog::builtin();
			let err = catalog.lookup("hhfrag-mix").unwrap_err();
			match err {
				FlagError::UnknownFlag { suggestion, .. } => {
					assert_eq!(suggestion.as_deref(), Some("hhfrag-max"));
				}
				other => panic!("expected UnknownFlag, got {other:?}"),
			}
		}
	}

	#[test]
	fn lookup_distant_name_has_no_suggestion() {
		let catalog = Catalog::builtin();
		let err = catalog.lookup("zzzzzzzzzzzz").unwrap_err();
		match err {
			FlagError::UnknownFlag { suggestion, .. } => assert_eq!(suggestion, None),
			other => panic!("expected UnknownFlag, got {other:?}"),
		}
	}

	#[test]
	fn lookup_keeps_the_bound_validator() {
		let catalog = Catalog::builtin();
		assert!(catalog.lookup("results-dir").unwrap().validator.is_some());
		assert!(catalog.lookup("cpu").unwrap().validator.is_none());
	}
}
