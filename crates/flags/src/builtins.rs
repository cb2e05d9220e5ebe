//! The shared pool of experiment flags.
//!
//! Defaults that depend on the running process (CPU count, scratch and
//! results directories, fragment library root) are computed inside the
//! registration thunks, at activation time.

use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, value_parser};

use crate::catalog::FlagDef;
use crate::env;
use crate::validators::{self, Outcome, Validator, str_of};
use crate::value::{FlagType, FlagValue};

/// Name of the implicit diagnostic-verbosity flag. Always present in the
/// finalized snapshot.
pub const VERBOSE: &str = "verbose";

/// Every flag in the shared pool.
pub fn all() -> Vec<FlagDef> {
	vec![
		FlagDef {
			name: "pdb-dir",
			value_type: FlagType::Str,
			register: |cmd| {
				cmd.arg(
					Arg::new("pdb-dir")
						.long("pdb-dir")
						.value_name("DIR")
						.default_value("/data/bio/pdb")
						.help("The location of a full PDB directory."),
				)
			},
			validator: Some(Validator::Simple(validators::verify_path)),
		},
		FlagDef {
			name: "sabmark-dir",
			value_type: FlagType::Str,
			register: |cmd| {
				cmd.arg(
					Arg::new("sabmark-dir")
						.long("sabmark-dir")
						.value_name("DIR")
						.default_value("/data/bio/SABmark")
						.help(
							"The location of the SABmark directory with PDB files, \
							 and \"sup_fp\" and \"twi_fp\" sub-directories.",
						),
				)
			},
			validator: Some(Validator::Simple(validators::verify_path)),
		},
		FlagDef {
			name: "sabmark-set",
			value_type: FlagType::Str,
			register: |cmd| {
				cmd.arg(
					Arg::new("sabmark-set")
						.long("sabmark-set")
						.value_name("SET")
						.value_parser(["twilight", "superfamily"])
						.default_value("superfamily")
						.help("The SABmark alignment set to use."),
				)
			},
			validator: None,
		},
		FlagDef {
			name: "frag-lib",
			value_type: FlagType::Str,
			register: |cmd| {
				cmd.arg(
					Arg::new("frag-lib")
						.long("frag-lib")
						.value_name("FILE")
						.default_value(default_frag_lib())
						.help("Path to a structure fragment library."),
				)
			},
			validator: None,
		},
		FlagDef {
			name: "bow-db",
			value_type: FlagType::Str,
			register: |cmd| {
				cmd.arg(
					Arg::new("bow-db")
						.long("bow-db")
						.value_name("DIR")
						.default_value("/data/bio/bowdbs/pdb")
						.help("The location of a BOW database."),
				)
			},
			validator: Some(Validator::Simple(validators::verify_path)),
		},
		FlagDef {
			name: "pdb-hhm-db",
			value_type: FlagType::Str,
			register: |cmd| {
				cmd.arg(
					Arg::new("pdb-hhm-db")
						.long("pdb-hhm-db")
						.value_name("PREFIX")
						.default_value("pdb-select25-2012")
						.help(
							"The prefix of a PDB-HHM database generated by \
							 `build-pdb-hhm-db`. The full path is derived from the \
							 HHLIB environment variable.",
						),
				)
			},
			validator: Some(Validator::Dependent {
				prereq: verify_hhsuite,
				check: verify_pdb_hhm_db,
			}),
		},
		FlagDef {
			name: "seq-hhm-db",
			value_type: FlagType::Str,
			register: |cmd| {
				cmd.arg(
					Arg::new("seq-hhm-db")
						.long("seq-hhm-db")
						.value_name("PREFIX")
						.default_value("nr20")
						.help(
							"The prefix of an HHblits database downloaded from the \
							 HHsuite databases. The full path is derived from the \
							 HHLIB environment variable. Typical values: nr20 or \
							 uniprot20.",
						),
				)
			},
			validator: Some(Validator::Dependent {
				prereq: verify_hhsuite,
				check: verify_seq_hhm_db,
			}),
		},
		FlagDef {
			name: "hhfrag-inc",
			value_type: FlagType::Int,
			register: |cmd| {
				cmd.arg(
					Arg::new("hhfrag-inc")
						.long("hhfrag-inc")
						.value_name("N")
						.value_parser(value_parser!(i64))
						.default_value("5")
						.help("The window increment step to use with HHfrag."),
				)
			},
			validator: None,
		},
		FlagDef {
			name: "hhfrag-min",
			value_type: FlagType::Int,
			register: |cmd| {
				cmd.arg(
					Arg::new("hhfrag-min")
						.long("hhfrag-min")
						.value_name("N")
						.value_parser(value_parser!(i64))
						.default_value("30")
						.help("The minimum window size to use with HHfrag."),
				)
			},
			validator: None,
		},
		FlagDef {
			name: "hhfrag-max",
			value_type: FlagType::Int,
			register: |cmd| {
				cmd.arg(
					Arg::new("hhfrag-max")
						.long("hhfrag-max")
						.value_name("N")
						.value_parser(value_parser!(i64))
						.default_value("35")
						.help("The maximum window size to use with HHfrag."),
				)
			},
			validator: None,
		},
		FlagDef {
			name: "blits",
			value_type: FlagType::Bool,
			register: |cmd| {
				cmd.arg(
					Arg::new("blits")
						.long("noblits")
						.action(ArgAction::SetFalse)
						.help("When set, HHsearch will be used in lieu of HHblits."),
				)
			},
			validator: None,
		},
		FlagDef {
			name: "results-dir",
			value_type: FlagType::Str,
			register: |cmd| {
				cmd.arg(
					Arg::new("results-dir")
						.long("results-dir")
						.value_name("DIR")
						.default_value(default_results_dir())
						.help("The directory where results are stored."),
				)
			},
			validator: Some(Validator::Simple(validators::make_path)),
		},
		FlagDef {
			name: "cpu",
			value_type: FlagType::Int,
			register: |cmd| {
				cmd.arg(
					Arg::new("cpu")
						.long("cpu")
						.value_name("N")
						.value_parser(value_parser!(i64))
						.default_value(default_cpu())
						.help("The maximum number of CPUs executing simultaneously."),
				)
			},
			validator: None,
		},
		FlagDef {
			name: "no-cache",
			value_type: FlagType::StrList,
			register: |cmd| {
				cmd.arg(
					Arg::new("no-cache")
						.long("no-cache")
						.value_name("EXT")
						.action(ArgAction::Append)
						.num_args(1..)
						.help(
							"A list of extensions for which to force regeneration. \
							 That is, if a file generated by a command already exists \
							 and has an extension in this list, then the file will be \
							 overwritten instead of reused.",
						),
				)
			},
			validator: None,
		},
		FlagDef {
			name: "ignore-cache",
			value_type: FlagType::Bool,
			register: |cmd| {
				cmd.arg(
					Arg::new("ignore-cache")
						.long("ignore-cache")
						.action(ArgAction::SetTrue)
						.help("When set, the cache is never used."),
				)
			},
			validator: None,
		},
		FlagDef {
			name: "tmp-dir",
			value_type: FlagType::Str,
			register: |cmd| {
				cmd.arg(
					Arg::new("tmp-dir")
						.long("tmp-dir")
						.value_name("DIR")
						.default_value(default_tmp_dir())
						.help(
							"A scratch directory to store transient data for this \
							 experiment.",
						),
				)
			},
			validator: Some(Validator::Simple(validators::make_path)),
		},
		verbose(),
	]
}

/// Definition of the implicit verbosity flag. The finalizer falls back to
/// this when the active catalog has no entry named `verbose`.
pub fn verbose() -> FlagDef {
	FlagDef {
		name: VERBOSE,
		value_type: FlagType::Bool,
		register: |cmd| {
			cmd.arg(
				Arg::new(VERBOSE)
					.long("quiet")
					.action(ArgAction::SetFalse)
					.help("Suppress per-flag diagnostic output."),
			)
		},
		validator: None,
	}
}

fn default_frag_lib() -> String {
	let root = env::var("FRAGLIB_PATH").unwrap_or_else(|| "/data/bio/fraglibs".to_string());
	Path::new(&root)
		.join("structure")
		.join("400-11.json")
		.display()
		.to_string()
}

fn default_results_dir() -> String {
	Path::new(".")
		.join("experiments")
		.join("results")
		.join(env::program_name())
		.display()
		.to_string()
}

fn default_tmp_dir() -> String {
	std::env::temp_dir()
		.join("bcb")
		.join(env::program_name())
		.display()
		.to_string()
}

fn default_cpu() -> String {
	std::thread::available_parallelism()
		.map(|n| n.get())
		.unwrap_or(1)
		.to_string()
}

fn verify_hhsuite() -> Outcome {
	validators::verify_env_dir("HHLIB")
}

/// `$HHLIB/data/<prefix>`. Only called behind the `verify_hhsuite`
/// prerequisite, but re-reads the variable rather than assuming it.
fn hhsuite_db_path(prefix: &str) -> Result<PathBuf, String> {
	let lib = env::var("HHLIB")
		.ok_or_else(|| "HHLIB environment variable is not set.".to_string())?;
	Ok(Path::new(&lib).join("data").join(prefix))
}

/// An HHblits database is a family of files; check the two load-bearing
/// ones.
fn verify_seq_hhm_db(value: &FlagValue) -> Outcome {
	let base = hhsuite_db_path(str_of(value)?)?;
	validators::readable(&suffixed(&base, "_hhm_db"))?;
	validators::readable(&suffixed(&base, "_a3m_db"))
}

fn verify_pdb_hhm_db(value: &FlagValue) -> Outcome {
	validators::readable(&hhsuite_db_path(str_of(value)?)?)
}

fn suffixed(base: &Path, suffix: &str) -> PathBuf {
	let mut joined = base.as_os_str().to_os_string();
	joined.push(suffix);
	PathBuf::from(joined)
}
