//! Typed flag payloads.

use std::fmt;

/// Type of a flag's parsed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagType {
	Bool,
	Int,
	Str,
	StrList,
}

/// A parsed flag payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
	Bool(bool),
	Int(i64),
	Str(String),
	StrList(Vec<String>),
}

impl FlagValue {
	pub fn type_of(&self) -> FlagType {
		match self {
			FlagValue::Bool(_) => FlagType::Bool,
			FlagValue::Int(_) => FlagType::Int,
			FlagValue::Str(_) => FlagType::Str,
			FlagValue::StrList(_) => FlagType::StrList,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			FlagValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			FlagValue::Int(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			FlagValue::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			FlagValue::StrList(items) => Some(items),
			_ => None,
		}
	}
}

/// Rendering used by the verbose `Flag <name> set to "<value>".` echo.
impl fmt::Display for FlagValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FlagValue::Bool(b) => write!(f, "{b}"),
			FlagValue::Int(n) => write!(f, "{n}"),
			FlagValue::Str(s) => f.write_str(s),
			FlagValue::StrList(items) => f.write_str(&items.join(", ")),
		}
	}
}
