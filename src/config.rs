//! Selectors and class names shared between the page markup and this crate.
//!
//! Every configuration `struct` defaults to the stock Mesto markup and can be deserialized from JSON with `camelCase` keys.
//! Missing keys fall back to their defaults, so page wiring only needs to spell out what differs.

use crate::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
	Ok(serde_json::from_str(json)?)
}

/// Configuration of the form validation engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
	/// Selects the forms [`FormValidation::attach_all`](`crate::validation::FormValidation::attach_all`) manages.
	pub form_selector: String,
	/// Selects the fields within one form. Every match must be an `<input>`, attaching fails otherwise.
	pub input_selector: String,
	/// Selects the submit control within one form.
	pub submit_selector: String,
	/// Added to the submit control while any field is invalid.
	pub inactive_button_class: String,
	/// Added to an invalid field.
	pub input_error_class: String,
	/// Added to a visible error message.
	pub error_class: String,
	/// The error element of field `x` carries the class `x` + this suffix.
	pub error_suffix: String,
	/// Attribute holding the message shown on pattern mismatch.
	pub message_attribute: String,
}

impl Default for ValidationConfig {
	fn default() -> Self {
		Self {
			form_selector: ".popup__form".to_owned(),
			input_selector: ".popup__input".to_owned(),
			submit_selector: ".popup__button".to_owned(),
			inactive_button_class: "popup__button_disabled".to_owned(),
			input_error_class: "popup__input_type_error".to_owned(),
			error_class: "popup__error_visible".to_owned(),
			error_suffix: "-input-error".to_owned(),
			message_attribute: "data-error-message".to_owned(),
		}
	}
}

impl ValidationConfig {
	/// # Errors
	///
	/// Iff `json` isn't a (partial) [`ValidationConfig`] object.
	pub fn from_json(json: &str) -> Result<Self> {
		from_json(json)
	}

	/// The class of the error element belonging to the field with id `field_id`.
	#[must_use]
	pub fn error_class_for(&self, field_id: &str) -> String {
		format!("{}{}", field_id, self.error_suffix)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialogConfig {
	/// Selects the dialogs [`DialogManager::attach_all`](`crate::dialog::DialogManager::attach_all`) sets up.
	pub dialog_selector: String,
	pub opened_class: String,
	/// Selects the close control inside a dialog.
	pub close_selector: String,
	/// [***KeyboardEvent.key***](https://developer.mozilla.org/en-US/docs/Web/API/KeyboardEvent/key) that dismisses the topmost dialog.
	pub dismiss_key: String,
}

impl Default for DialogConfig {
	fn default() -> Self {
		Self {
			dialog_selector: ".popup".to_owned(),
			opened_class: "popup_is-opened".to_owned(),
			close_selector: ".popup__close".to_owned(),
			dismiss_key: "Escape".to_owned(),
		}
	}
}

impl DialogConfig {
	/// # Errors
	///
	/// Iff `json` isn't a (partial) [`DialogConfig`] object.
	pub fn from_json(json: &str) -> Result<Self> {
		from_json(json)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardConfig {
	/// Selects the `<template>` cards are cloned from, document-wide.
	pub template_selector: String,
	pub card_selector: String,
	pub image_selector: String,
	pub title_selector: String,
	pub like_button_selector: String,
	pub like_active_class: String,
	pub like_count_selector: String,
	pub delete_button_selector: String,
}

impl Default for CardConfig {
	fn default() -> Self {
		Self {
			template_selector: "#card-template".to_owned(),
			card_selector: ".card".to_owned(),
			image_selector: ".card__image".to_owned(),
			title_selector: ".card__title".to_owned(),
			like_button_selector: ".card__like-button".to_owned(),
			like_active_class: "card__like-button_is-active".to_owned(),
			like_count_selector: ".card__like-count".to_owned(),
			delete_button_selector: ".card__delete-button".to_owned(),
		}
	}
}

impl CardConfig {
	/// # Errors
	///
	/// Iff `json` isn't a (partial) [`CardConfig`] object.
	pub fn from_json(json: &str) -> Result<Self> {
		from_json(json)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightboxConfig {
	pub image_selector: String,
	pub caption_selector: String,
}

impl Default for LightboxConfig {
	fn default() -> Self {
		Self {
			image_selector: ".popup__image".to_owned(),
			caption_selector: ".popup__caption".to_owned(),
		}
	}
}
