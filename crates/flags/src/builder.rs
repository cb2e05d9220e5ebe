//! Activation ledger and the finalize pipeline.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process;

use clap::ArgMatches;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::builtins;
use crate::catalog::{Catalog, FlagDef};
use crate::config::Config;
use crate::env;
use crate::error::FlagError;
use crate::validators::Validator;
use crate::value::{FlagType, FlagValue};

/// One activation: a name plus the validator bound at activation time.
struct ActivationEntry {
	name: &'static str,
	value_type: FlagType,
	validator: Option<Validator>,
}

/// Accumulates flag activations for one process run, then finalizes into a
/// [`Config`].
///
/// The ledger is append-only and insertion-ordered: activation order is
/// validation order and diagnostic-print order. `finalize` consumes the
/// builder, which is what makes finalization a once-only operation.
pub struct ConfigBuilder {
	catalog: Catalog,
	command: clap::Command,
	ledger: Vec<ActivationEntry>,
	diag: Box<dyn Write>,
}

impl ConfigBuilder {
	/// A builder over the builtin catalog.
	pub fn new(description: &str) -> Self {
		Self::with_catalog(description, Catalog::builtin())
	}

	/// A builder over an explicit catalog. The builtin `verbose`
	/// definition is still used as a fallback if the catalog lacks one.
	pub fn with_catalog(description: &str, catalog: Catalog) -> Self {
		Self {
			catalog,
			command: clap::Command::new(env::program_name()).about(description.to_string()),
			ledger: Vec::new(),
			diag: Box::new(io::stderr()),
		}
	}

	/// Redirect diagnostic output (default: stderr).
	pub fn with_diagnostics(mut self, sink: impl Write + 'static) -> Self {
		self.diag = Box::new(sink);
		self
	}

	/// Activate a catalog flag by name: append it to the ledger and
	/// register its argument with the parser.
	///
	/// An unknown name fails here, at activation time.
	pub fn activate(&mut self, name: &str) -> Result<(), FlagError> {
		let def = *self.catalog.lookup(name)?;
		self.push(def);
		Ok(())
	}

	/// Activate several catalog flags, in order.
	pub fn activate_all<'a>(
		&mut self,
		names: impl IntoIterator<Item = &'a str>,
	) -> Result<(), FlagError> {
		for name in names {
			self.activate(name)?;
		}
		Ok(())
	}

	/// Activate a one-off flag that is not part of the shared catalog.
	pub fn activate_custom(&mut self, def: FlagDef) {
		self.push(def);
	}

	fn push(&mut self, def: FlagDef) {
		debug!(flag = def.name, "activated");
		let command = std::mem::replace(&mut self.command, clap::Command::new(""));
		self.command = (def.register)(command);
		self.ledger.push(ActivationEntry {
			name: def.name,
			value_type: def.value_type,
			validator: def.validator,
		});
	}

	fn is_activated(&self, name: &str) -> bool {
		self.ledger.iter().any(|entry| entry.name == name)
	}

	/// Parse `argv`, validate every activated flag in activation order,
	/// and produce the immutable snapshot.
	///
	/// Validation is fail-fast: the first failing validator is written to
	/// the diagnostic sink (`Error setting flag <name>: <message>`) and no
	/// further entries are validated or echoed. When the resolved
	/// `verbose` value is true, each passing flag is echoed as
	/// `Flag <name> set to "<value>".` in ledger order.
	pub fn finalize<I, T>(mut self, argv: I) -> Result<Config, FlagError>
	where
		I: IntoIterator<Item = T>,
		T: Into<OsString> + Clone,
	{
		// Diagnostic output must always be controllable, even for scripts
		// that never asked for the verbosity flag.
		if !self.is_activated(builtins::VERBOSE) {
			let def = self
				.catalog
				.lookup(builtins::VERBOSE)
				.map(|def| *def)
				.unwrap_or_else(|_| builtins::verbose());
			self.push(def);
		}

		let Self {
			command,
			ledger,
			mut diag,
			..
		} = self;

		let matches = command.try_get_matches_from(argv)?;
		let verbose = matches
			.get_one::<bool>(builtins::VERBOSE)
			.copied()
			.unwrap_or(false);

		let mut values = FxHashMap::default();
		for entry in &ledger {
			let Some(value) = extract(&matches, entry.name, entry.value_type) else {
				let reason =
					"no value was parsed; the flag's definition must install a default".to_string();
				let _ = writeln!(diag, "Error setting flag {}: {}", entry.name, reason);
				return Err(FlagError::Validation {
					name: entry.name.to_string(),
					reason,
				});
			};
			if let Some(validator) = &entry.validator {
				if let Err(reason) = validator.run(&value) {
					let _ = writeln!(diag, "Error setting flag {}: {}", entry.name, reason);
					return Err(FlagError::Validation {
						name: entry.name.to_string(),
						reason,
					});
				}
			}
			if verbose {
				let _ = writeln!(diag, "Flag {} set to \"{}\".", entry.name, value);
			}
			values.insert(entry.name.to_string(), value);
		}

		debug!(flags = values.len(), "finalized flag configuration");
		Ok(Config::new(values))
	}

	/// Finalize against the real process arguments, terminating the
	/// process on any parse or validation failure.
	///
	/// Parse failures exit through the parser (its message, its status);
	/// validation failures exit with status 1 after the diagnostic line
	/// has been written.
	pub fn finalize_or_exit(self) -> Config {
		let argv: Vec<OsString> = std::env::args_os().collect();
		match self.finalize(argv) {
			Ok(config) => config,
			Err(FlagError::Parse(err)) => err.exit(),
			Err(err @ FlagError::UnknownFlag { .. }) => {
				eprintln!("{err}");
				process::exit(1);
			}
			// Validation: the message is already on the diagnostic sink.
			Err(_) => process::exit(1),
		}
	}
}

/// `None` means the argument produced no value at all: it was absent from
/// the command line and its registration installed no default.
fn extract(matches: &ArgMatches, name: &str, ty: FlagType) -> Option<FlagValue> {
	match ty {
		FlagType::Bool => matches.get_one::<bool>(name).copied().map(FlagValue::Bool),
		FlagType::Int => matches.get_one::<i64>(name).copied().map(FlagValue::Int),
		FlagType::Str => matches.get_one::<String>(name).cloned().map(FlagValue::Str),
		// An absent list flag is legitimately an empty list.
		FlagType::StrList => Some(FlagValue::StrList(
			matches
				.get_many::<String>(name)
				.map(|vals| vals.cloned().collect())
				.unwrap_or_default(),
		)),
	}
}
