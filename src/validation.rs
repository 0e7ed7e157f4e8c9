//! Declarative form validation.
//!
//! Each attached form re-validates a field on every `input` event and then re-scans all of its fields
//! to decide whether the submit control is enabled. The submit control is disabled iff any field is invalid.

use crate::{
	config::ValidationConfig,
	listener::Listener,
	validity::{Constraints, Validator, Validity},
	Error, Result,
};
use core::cell::RefCell;
use hashbrown::HashMap;
use std::rc::{Rc, Weak};
use tracing::{error, instrument, trace, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{css, Document, Element, HtmlInputElement};

#[cfg(feature = "dangerous-logging")]
fn loggable(value: &str) -> &str {
	value
}

#[cfg(not(feature = "dangerous-logging"))]
fn loggable(_: &str) -> &str {
	"<redacted>"
}

/// Field id → the element that displays that field's error message.
#[derive(Debug, Clone, Default)]
pub struct ErrorMap(HashMap<String, Element>);

impl ErrorMap {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Looks up the error element of each field by the `<field id><error suffix>` class within `form`.
	///
	/// Fields without such an element are left out.
	///
	/// # Errors
	///
	/// Iff the DOM rejects a resulting selector. Field ids are CSS-escaped, so this shouldn't happen.
	pub fn by_convention<'a>(form: &Element, field_ids: impl IntoIterator<Item = &'a str>, config: &ValidationConfig) -> Result<Self> {
		let mut map = Self::new();
		for id in field_ids {
			if id.is_empty() {
				continue;
			}
			if let Some(error) = form.query_selector(&format!(".{}", css::escape(&config.error_class_for(id))))? {
				map.insert(id, error);
			}
		}
		Ok(map)
	}

	pub fn insert(&mut self, field_id: impl Into<String>, error: Element) -> Option<Element> {
		self.0.insert(field_id.into(), error)
	}

	#[must_use]
	pub fn get(&self, field_id: &str) -> Option<&Element> {
		self.0.get(field_id)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

struct Field {
	input: HtmlInputElement,
	id: String,
	error: Option<Element>,
	validator: Box<dyn Validator>,
}

impl Field {
	fn validity(&self) -> Validity {
		let value = self.input.value();
		let validity = self.validator.validate(&value);
		trace!(field = %self.id, value = loggable(&value), valid = validity.valid, "Validated.");
		validity
	}

	fn show_error(&self, message: &str, config: &ValidationConfig) {
		let error = match &self.error {
			Some(error) => error,
			None => return warn!("No error element for field {:?}.", self.id),
		};
		if let Err(error) = self.input.class_list().add_1(&config.input_error_class) {
			error!("Failed to mark field {:?} as invalid: {:?}", self.id, error);
		}
		error.set_text_content(Some(message));
		if let Err(error) = error.class_list().add_1(&config.error_class) {
			error!("Failed to show error of field {:?}: {:?}", self.id, error);
		}
	}

	fn hide_error(&self, config: &ValidationConfig) {
		if let Err(error) = self.input.class_list().remove_1(&config.input_error_class) {
			error!("Failed to mark field {:?} as valid: {:?}", self.id, error);
		}
		if let Some(error) = &self.error {
			if let Err(error) = error.class_list().remove_1(&config.error_class) {
				error!("Failed to hide error of field {:?}: {:?}", self.id, error);
			}
			error.set_text_content(Some(""));
		}
	}
}

fn find_fields(form: &Element, config: &ValidationConfig) -> Result<Vec<HtmlInputElement>> {
	let nodes = form.query_selector_all(&config.input_selector)?;
	let mut inputs = Vec::with_capacity(nodes.length() as usize);
	for i in 0..nodes.length() {
		match nodes.get(i).map(|node| node.dyn_into::<HtmlInputElement>()) {
			Some(Ok(input)) => inputs.push(input),
			Some(Err(node)) => {
				let id = node.dyn_ref::<Element>().map(Element::id).unwrap_or_default();
				return Err(Error::UnsupportedField { id });
			}
			None => error!("Field {} vanished during enumeration.", i),
		}
	}
	Ok(inputs)
}

fn find_submit(form: &Element, config: &ValidationConfig) -> Result<Element> {
	form.query_selector(&config.submit_selector)?
		.ok_or_else(|| Error::missing(config.submit_selector.clone()))
}

fn set_submit_enabled(submit: &Element, enabled: bool, config: &ValidationConfig) {
	if let Err(error) = submit.toggle_attribute_with_force("disabled", !enabled) {
		error!("Failed to toggle `disabled` on submit control: {:?}", error);
	}
	if let Err(error) = submit.class_list().toggle_with_force(&config.inactive_button_class, !enabled) {
		error!("Failed to toggle {:?} on submit control: {:?}", config.inactive_button_class, error);
	}
}

/// One form with validation listeners on all of its fields.
///
/// Clones share the same form. The listeners stay installed for as long as any clone lives
/// and are removed when the last one is dropped. Keep it (or its [`FormValidation`]) alive for the page's lifetime,
/// e.g. via [`FormValidation::leak`].
#[derive(Clone)]
pub struct ValidatedForm {
	inner: Rc<FormInner>,
}

struct FormInner {
	form: Element,
	config: ValidationConfig,
	fields: Vec<Field>,
	submit: Element,
	listeners: RefCell<Vec<Listener<dyn Fn()>>>,
}

impl core::fmt::Debug for ValidatedForm {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ValidatedForm")
			.field("form", &self.inner.form)
			.field("fields", &self.inner.fields.iter().map(|field| &field.id).collect::<Vec<_>>())
			.finish()
	}
}

impl ValidatedForm {
	/// Attaches validation to `form`, finding error elements by naming convention
	/// and validating each field by its own constraint attributes.
	///
	/// # Errors
	///
	/// Iff `form` has no submit control, a field isn't an `<input>` or a selector is malformed.
	pub fn attach(form: &Element, config: &ValidationConfig) -> Result<Self> {
		let inputs = find_fields(form, config)?;
		let ids = inputs.iter().map(|input| input.id()).collect::<Vec<_>>();
		let errors = ErrorMap::by_convention(form, ids.iter().map(String::as_str), config)?;
		let message_attribute = config.message_attribute.clone();
		Self::attach_with(form, config, errors, move |input: &HtmlInputElement| {
			Box::new(Constraints::from_input(input, &message_attribute)) as Box<dyn Validator>
		})
	}

	/// Attaches validation to `form` with explicit error elements and validators.
	///
	/// Fields missing from `errors` still take part in enabling the submit control,
	/// but can't display a message.
	///
	/// # Errors
	///
	/// Iff `form` has no submit control or a selector is malformed.
	#[instrument(skip(errors, validator_for))]
	pub fn attach_with(
		form: &Element,
		config: &ValidationConfig,
		errors: ErrorMap,
		validator_for: impl Fn(&HtmlInputElement) -> Box<dyn Validator>,
	) -> Result<Self> {
		let submit = find_submit(form, config)?;
		let fields = find_fields(form, config)?
			.into_iter()
			.map(|input| {
				let id = input.id();
				let error = errors.get(&id).cloned();
				if error.is_none() {
					warn!("Field {:?} has no error element. It can block submission without explanation.", id);
				}
				Field {
					validator: validator_for(&input),
					input,
					id,
					error,
				}
			})
			.collect::<Vec<_>>();

		let inner = Rc::new(FormInner {
			form: form.clone(),
			config: config.clone(),
			fields,
			submit,
			listeners: RefCell::default(),
		});
		inner.refresh_submit();

		for (i, field) in inner.fields.iter().enumerate() {
			let weak: Weak<FormInner> = Rc::downgrade(&inner);
			let listener = Closure::wrap(Box::new(move || {
				if let Some(inner) = weak.upgrade() {
					inner.validate_field(i);
					inner.refresh_submit();
				}
			}) as Box<dyn Fn()>);
			let listener = Listener::add(field.input.as_ref(), "input", listener)?;
			inner.listeners.borrow_mut().push(listener);
		}
		trace!("Attached validation to {} field(s).", inner.fields.len());

		Ok(Self { inner })
	}

	#[must_use]
	pub fn form(&self) -> &Element {
		&self.inner.form
	}

	#[must_use]
	pub fn submit(&self) -> &Element {
		&self.inner.submit
	}

	/// Field ids in document order.
	pub fn field_ids(&self) -> impl Iterator<Item = &str> + '_ {
		self.inner.fields.iter().map(|field| field.id.as_str())
	}

	/// Whether every field currently accepts its value.
	#[must_use]
	pub fn is_valid(&self) -> bool {
		self.inner.is_valid()
	}

	/// Validates the field with id `field_id` and shows or hides its error, as an `input` event would,
	/// but without touching the submit control.
	///
	/// Returns [`None`] iff there is no such field.
	pub fn validate_field(&self, field_id: &str) -> Option<Validity> {
		let i = self.inner.fields.iter().position(|field| field.id == field_id)?;
		Some(self.inner.validate_field(i))
	}

	/// Enables the submit control iff every field is valid.
	pub fn refresh_submit(&self) {
		self.inner.refresh_submit();
	}

	/// Hides all error messages and refreshes the submit control. The listeners stay installed.
	#[instrument]
	pub fn clear(&self) {
		for field in &self.inner.fields {
			field.hide_error(&self.inner.config);
		}
		self.inner.refresh_submit();
	}
}

impl FormInner {
	fn is_valid(&self) -> bool {
		self.fields.iter().all(|field| field.validity().valid)
	}

	fn validate_field(&self, i: usize) -> Validity {
		let field = &self.fields[i];
		let validity = field.validity();
		if validity.valid {
			field.hide_error(&self.config);
		} else {
			field.show_error(&validity.message, &self.config);
		}
		validity
	}

	fn refresh_submit(&self) {
		set_submit_enabled(&self.submit, self.is_valid(), &self.config);
	}
}

/// All forms of a document that are under validation.
///
/// Validation stops once this (and every [`ValidatedForm`] clone taken from it) is dropped.
#[derive(Debug, Clone, Default)]
pub struct FormValidation {
	forms: Vec<ValidatedForm>,
}

impl FormValidation {
	/// [`ValidatedForm::attach`]es every form matching [`ValidationConfig::form_selector`].
	///
	/// # Errors
	///
	/// Iff any matching form can't be attached.
	#[instrument(skip(document))]
	pub fn attach_all(document: &Document, config: &ValidationConfig) -> Result<Self> {
		let nodes = document.query_selector_all(&config.form_selector)?;
		let mut forms = Vec::with_capacity(nodes.length() as usize);
		for i in 0..nodes.length() {
			let form = nodes
				.get(i)
				.and_then(|node| node.dyn_into::<Element>().ok())
				.ok_or_else(|| Error::missing(config.form_selector.clone()))?;
			forms.push(ValidatedForm::attach(&form, config)?);
		}
		trace!("Attached validation to {} form(s).", forms.len());
		Ok(Self { forms })
	}

	/// Keeps validation running for the rest of the page's lifetime.
	#[must_use]
	pub fn leak(self) -> &'static Self {
		Box::leak(Box::new(self))
	}

	#[must_use]
	pub fn forms(&self) -> &[ValidatedForm] {
		&self.forms
	}

	#[must_use]
	pub fn get(&self, form: &Element) -> Option<&ValidatedForm> {
		self.forms.iter().find(|validated| validated.form() == form)
	}

	/// [`ValidatedForm::clear`]s `form`.
	///
	/// Returns `false` iff `form` isn't under validation.
	pub fn clear(&self, form: &Element) -> bool {
		match self.get(form) {
			Some(validated) => {
				validated.clear();
				true
			}
			None => false,
		}
	}
}

/// Hides all error messages of `form` and refreshes its submit control, whether or not it's attached.
///
/// Error elements are found by naming convention and fields validated by their constraint attributes.
///
/// # Errors
///
/// Iff `form` has no submit control, a field isn't an `<input>` or a selector is malformed.
#[instrument]
pub fn clear(form: &Element, config: &ValidationConfig) -> Result<()> {
	let inputs = find_fields(form, config)?;
	let submit = find_submit(form, config)?;
	let ids = inputs.iter().map(|input| input.id()).collect::<Vec<_>>();
	let errors = ErrorMap::by_convention(form, ids.iter().map(String::as_str), config)?;

	let mut valid = true;
	for (input, id) in inputs.into_iter().zip(ids) {
		let field = Field {
			validator: Box::new(Constraints::from_input(&input, &config.message_attribute)),
			error: errors.get(&id).cloned(),
			input,
			id,
		};
		valid &= field.validity().valid;
		field.hide_error(config);
	}
	set_submit_enabled(&submit, valid, config);
	Ok(())
}
