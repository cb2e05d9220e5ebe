//! Process environment and filesystem accessibility probes.

use std::fs;
use std::path::{Path, PathBuf};

/// Read an environment variable. An empty value counts as unset.
pub fn var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Whether the process can actually read `path`.
///
/// Metadata alone only proves existence, so readability is probed by
/// opening the file or listing the directory.
pub fn is_readable(path: &Path) -> bool {
	match fs::metadata(path) {
		Ok(meta) if meta.is_dir() => fs::read_dir(path).is_ok(),
		Ok(_) => fs::File::open(path).is_ok(),
		Err(_) => false,
	}
}

/// Basename of the running executable, used in per-script default paths.
pub(crate) fn program_name() -> String {
	std::env::args_os()
		.next()
		.map(PathBuf::from)
		.and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
		.unwrap_or_else(|| "experiment".to_string())
}
