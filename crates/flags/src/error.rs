//! Error types for flag activation and finalization.
//!
//! Every fatal kind names the offending flag in its message; the
//! `Validation` and `MissingFlag` display strings are the exact lines
//! written to the diagnostic stream.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlagError {
	/// A script activated a name absent from the catalog. Raised at
	/// activation time, never deferred to finalization.
	#[error("could not find flag '{name}' in the catalog{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	UnknownFlag {
		/// The unrecognized flag name.
		name: String,
		/// A known name close enough to be the likely intent.
		suggestion: Option<String>,
	},

	/// The command line could not be parsed. Message and exit status are
	/// the parser's own.
	#[error(transparent)]
	Parse(#[from] clap::Error),

	/// A validator rejected a successfully parsed value.
	#[error("Error setting flag {name}: {reason}")]
	Validation {
		/// The flag whose validator failed.
		name: String,
		/// The validator's message.
		reason: String,
	},

	/// A required flag was never activated.
	#[error("Flag {0} is required by this experiment.")]
	MissingFlag(String),

	/// The process-wide snapshot was queried before any finalize ran.
	#[error("flag configuration has not been finalized")]
	NotFinalized,

	/// A snapshot was already published for this process.
	#[error("flag configuration was already finalized")]
	AlreadyFinalized,
}
