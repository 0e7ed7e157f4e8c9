use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong while wiring dialogs, forms and cards to the page.
///
/// Failures that happen *inside* event handlers are logged instead, since there is nobody to return them to.
#[derive(Debug, Error)]
pub enum Error {
	#[error("No element matches {selector:?}.")]
	MissingElement { selector: String },

	#[error("Invalid pattern {pattern:?}: {source}")]
	Pattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	/// Only `<input>` elements can be validated.
	#[error("Field {id:?} isn't an <input> element.")]
	UnsupportedField { id: String },

	#[error("Invalid configuration or payload: {0}")]
	Config(#[from] serde_json::Error),

	#[error("Ошибка {status}: {message}")]
	Api { status: u16, message: String },

	/// A DOM call threw. The [`JsValue`] is stringified since it's neither [`Send`] nor [`std::error::Error`].
	#[error("DOM call failed: {0}")]
	Dom(String),
}

impl From<JsValue> for Error {
	fn from(value: JsValue) -> Self {
		Self::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

impl Error {
	pub(crate) fn missing(selector: impl Into<String>) -> Self {
		Self::MissingElement { selector: selector.into() }
	}
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
