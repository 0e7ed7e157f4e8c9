//! Per-field validity rules, independent of the browser's constraint validation API.

use crate::{Error, Result};
use core::{
	convert::TryFrom,
	fmt::{self, Display, Formatter},
};
use regex::Regex;
use tracing::warn;
use url::Url;
use web_sys::HtmlInputElement;

/// The outcome of validating one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validity {
	pub valid: bool,
	/// Empty iff `valid`.
	pub message: String,
}

impl Validity {
	#[must_use]
	pub fn valid() -> Self {
		Self { valid: true, message: String::new() }
	}

	#[must_use]
	pub fn invalid(message: impl Into<String>) -> Self {
		Self { valid: false, message: message.into() }
	}
}

/// Decides whether a field's current value is acceptable.
///
/// Implemented by [`Constraints`] and by any `Fn(&str) -> Validity`.
pub trait Validator {
	fn validate(&self, value: &str) -> Validity;
}

impl<F> Validator for F
where
	F: Fn(&str) -> Validity,
{
	fn validate(&self, value: &str) -> Validity {
		self(value)
	}
}

/// Value kinds with a built-in syntax check, like `<input type="url">`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
	Text,
	Url,
	Email,
}

impl InputKind {
	/// Maps an `<input>` `type` attribute. Types without a syntax check are [`InputKind::Text`].
	#[must_use]
	pub fn from_type(input_type: &str) -> Self {
		match input_type.to_ascii_lowercase().as_str() {
			"url" => Self::Url,
			"email" => Self::Email,
			_ => Self::Text,
		}
	}

	fn accepts(self, value: &str) -> bool {
		match self {
			Self::Text => true,
			Self::Url => Url::parse(value).is_ok(),
			Self::Email => match value.split_once('@') {
				Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !value.contains(char::is_whitespace),
				None => false,
			},
		}
	}
}

/// The first rule a value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
	ValueMissing,
	TypeMismatch(InputKind),
	PatternMismatch,
	TooLong { max: usize, len: usize },
	TooShort { min: usize, len: usize },
}

impl Display for Failure {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match *self {
			Failure::ValueMissing => f.write_str("Please fill out this field."),
			Failure::TypeMismatch(InputKind::Url) => f.write_str("Please enter a URL."),
			Failure::TypeMismatch(InputKind::Email) => f.write_str("Please enter an email address."),
			Failure::TypeMismatch(InputKind::Text) => f.write_str("Please enter a valid value."),
			Failure::PatternMismatch => f.write_str("Please match the requested format."),
			Failure::TooLong { max, len } => write!(f, "Please shorten this text to no more than {} characters (you are currently using {} characters).", max, len),
			Failure::TooShort { min, len } => write!(f, "Please lengthen this text to {} characters or more (you are currently using {} characters).", min, len),
		}
	}
}

#[derive(Debug, Clone)]
struct Pattern {
	source: String,
	regex: Regex,
}

/// The default [`Validator`]: `required`, `minlength`, `maxlength`, `pattern` and the `url`/`email` types.
///
/// Rules other than `required` don't apply to empty values.
/// Lengths are counted in UTF-16 code units.
#[derive(Debug, Clone)]
pub struct Constraints {
	required: bool,
	min_length: Option<usize>,
	max_length: Option<usize>,
	pattern: Option<Pattern>,
	kind: InputKind,
	pattern_message: Option<String>,
}

impl Default for Constraints {
	fn default() -> Self {
		Self::new()
	}
}

impl Constraints {
	/// Accepts everything.
	#[must_use]
	pub fn new() -> Self {
		Self {
			required: false,
			min_length: None,
			max_length: None,
			pattern: None,
			kind: InputKind::Text,
			pattern_message: None,
		}
	}

	#[must_use]
	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	#[must_use]
	pub fn min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	#[must_use]
	pub fn max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	#[must_use]
	pub fn kind(mut self, kind: InputKind) -> Self {
		self.kind = kind;
		self
	}

	/// Shown instead of the default text when the value doesn't match the pattern.
	#[must_use]
	pub fn pattern_message(mut self, message: impl Into<String>) -> Self {
		self.pattern_message = Some(message.into());
		self
	}

	/// `pattern` must match the whole value.
	///
	/// It's read with the HTML `pattern` attribute's meaning: `\d`, `\w` and `\b` are ASCII-only.
	///
	/// # Errors
	///
	/// Iff `pattern` isn't a valid regular expression.
	pub fn pattern(mut self, pattern: &str) -> Result<Self> {
		let regex = Regex::new(&format!("^(?:{})$", translate_pattern(pattern))).map_err(|source| Error::Pattern { pattern: pattern.to_owned(), source })?;
		self.pattern = Some(Pattern { source: pattern.to_owned(), regex });
		Ok(self)
	}

	/// Reads the constraint attributes off `input`.
	///
	/// Like browsers, this ignores an invalid `pattern` (with a warning) instead of failing.
	#[must_use]
	pub fn from_input(input: &HtmlInputElement, message_attribute: &str) -> Self {
		let mut constraints = Self::new().required(input.required()).kind(InputKind::from_type(&input.type_()));
		if let Ok(min_length) = usize::try_from(input.min_length()) {
			constraints = constraints.min_length(min_length);
		}
		if let Ok(max_length) = usize::try_from(input.max_length()) {
			constraints = constraints.max_length(max_length);
		}
		if let Some(message) = input.get_attribute(message_attribute) {
			constraints = constraints.pattern_message(message);
		}

		let pattern = input.pattern();
		if pattern.is_empty() {
			return constraints;
		}
		match constraints.clone().pattern(&pattern) {
			Ok(constraints) => constraints,
			Err(error) => {
				warn!("Ignoring pattern of field {:?}: {}", input.id(), error);
				constraints
			}
		}
	}

	/// The first broken rule, in the order browsers report them.
	#[must_use]
	pub fn check(&self, value: &str) -> Option<Failure> {
		if value.is_empty() {
			return if self.required { Some(Failure::ValueMissing) } else { None };
		}

		if !self.kind.accepts(value) {
			return Some(Failure::TypeMismatch(self.kind));
		}

		if let Some(pattern) = &self.pattern {
			if !pattern.regex.is_match(value) {
				return Some(Failure::PatternMismatch);
			}
		}

		let len = value.encode_utf16().count();
		match (self.min_length, self.max_length) {
			(_, Some(max)) if len > max => Some(Failure::TooLong { max, len }),
			(Some(min), _) if len < min => Some(Failure::TooShort { min, len }),
			_ => None,
		}
	}

	#[must_use]
	pub fn pattern_source(&self) -> Option<&str> {
		self.pattern.as_ref().map(|pattern| pattern.source.as_str())
	}
}

impl Validator for Constraints {
	fn validate(&self, value: &str) -> Validity {
		match self.check(value) {
			None => Validity::valid(),
			Some(failure @ Failure::PatternMismatch) => Validity::invalid(self.pattern_message.clone().unwrap_or_else(|| failure.to_string())),
			Some(failure) => Validity::invalid(failure.to_string()),
		}
	}
}

/// Rewrites an HTML `pattern` into [`regex`] syntax where the two disagree.
///
/// [`regex`]'s Perl classes are Unicode-aware, browsers' aren't.
/// Inside a class, `\b` is a backspace and `[`, `&`, `~` are literals.
fn translate_pattern(pattern: &str) -> String {
	let mut translated = String::with_capacity(pattern.len());
	let mut in_class = false;
	let mut chars = pattern.chars();
	while let Some(c) = chars.next() {
		match (c, in_class) {
			('\\', _) => match (chars.next(), in_class) {
				(Some('d'), false) => translated.push_str("[0-9]"),
				(Some('d'), true) => translated.push_str("0-9"),
				(Some('w'), false) => translated.push_str("[0-9A-Za-z_]"),
				(Some('w'), true) => translated.push_str("0-9A-Za-z_"),
				(Some('D'), _) => translated.push_str("[^0-9]"),
				(Some('W'), _) => translated.push_str("[^0-9A-Za-z_]"),
				(Some('b'), false) => translated.push_str(r"(?-u:\b)"),
				(Some('B'), false) => translated.push_str(r"(?-u:\B)"),
				(Some('b'), true) => translated.push_str(r"\x08"),
				(Some(escaped), _) => {
					translated.push('\\');
					translated.push(escaped);
				}
				(None, _) => translated.push('\\'),
			},
			('[', false) => {
				in_class = true;
				translated.push(c);
			}
			(']', true) => {
				in_class = false;
				translated.push(c);
			}
			('[' | '&' | '~', true) => {
				translated.push('\\');
				translated.push(c);
			}
			_ => translated.push(c),
		}
	}
	translated
}
