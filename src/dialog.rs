//! Opening, closing and dismissing modal dialogs.
//!
//! Any number of dialogs may be open at once. They are tracked in opening order,
//! and the dismiss key (Escape by default) only ever closes the topmost one.
//! The single document-level `keydown` listener is installed while at least one dialog is open.

use crate::{config::DialogConfig, listener::Listener, Error, Result};
use core::cell::RefCell;
use js_sys::Function;
use std::rc::{Rc, Weak};
use tracing::{debug, error, instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, EventTarget, KeyboardEvent, MouseEvent};

/// Open items in opening order. The last one is the current one.
///
/// An item is contained at most once.
#[derive(Debug, Clone)]
pub struct OpenStack<T>(Vec<T>);

impl<T> Default for OpenStack<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> OpenStack<T> {
	#[must_use]
	pub fn new() -> Self {
		Self(Vec::new())
	}

	#[must_use]
	pub fn top(&self) -> Option<&T> {
		self.0.last()
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

impl<T: PartialEq> OpenStack<T> {
	/// Moves `item` to the top, adding it if necessary.
	///
	/// Returns whether the stack was empty before.
	pub fn push(&mut self, item: T) -> bool {
		let was_empty = self.0.is_empty();
		self.0.retain(|open| *open != item);
		self.0.push(item);
		was_empty
	}

	/// Removes `item` from wherever it is.
	///
	/// Returns whether this emptied the stack.
	pub fn remove(&mut self, item: &T) -> bool {
		let len = self.0.len();
		self.0.retain(|open| open != item);
		len != self.0.len() && self.0.is_empty()
	}

	#[must_use]
	pub fn contains(&self, item: &T) -> bool {
		self.0.contains(item)
	}
}

/// Owner of the open-dialog state of one page.
///
/// Clones share that state. Dropping the last clone removes every listener it installed,
/// so keep one alive for as long as the page runs, e.g. via [`DialogManager::leak`].
#[derive(Clone)]
pub struct DialogManager {
	inner: Rc<Inner>,
}

struct Inner {
	document: Document,
	config: DialogConfig,
	open: RefCell<OpenStack<Element>>,
	dismiss_listener_installed: RefCell<bool>,
	dismiss_handler: Closure<dyn Fn(KeyboardEvent)>,
	/// Listeners installed by [`DialogManager::attach`].
	attached: RefCell<Vec<Listener<dyn Fn(MouseEvent)>>>,
}

impl core::fmt::Debug for DialogManager {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("DialogManager")
			.field("config", &self.inner.config)
			.field("open", &self.inner.open.borrow().len())
			.field("attached_listeners", &self.inner.attached.borrow().len())
			.finish()
	}
}

impl DialogManager {
	#[must_use]
	#[instrument(skip(document))]
	pub fn new(document: Document, config: DialogConfig) -> Self {
		let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
			let weak = weak.clone();
			Inner {
				document,
				config,
				open: RefCell::default(),
				dismiss_listener_installed: RefCell::new(false),
				dismiss_handler: Closure::wrap(Box::new(move |event: KeyboardEvent| {
					if let Some(inner) = weak.upgrade() {
						if event.key() == inner.config.dismiss_key {
							inner.close_top();
						}
					}
				}) as Box<dyn Fn(KeyboardEvent)>),
				attached: RefCell::default(),
			}
		});
		Self { inner }
	}

	/// Keeps this manager and its listeners for the rest of the page's lifetime.
	#[must_use]
	pub fn leak(self) -> &'static Self {
		Box::leak(Box::new(self))
	}

	#[must_use]
	pub fn config(&self) -> &DialogConfig {
		&self.inner.config
	}

	/// Shows `dialog` and makes it the current one.
	pub fn open(&self, dialog: &Element) {
		self.inner.open(dialog);
	}

	/// Hides `dialog`. If another dialog is current, it stays current.
	pub fn close(&self, dialog: &Element) {
		self.inner.close(dialog);
	}

	/// Closes the current dialog, if any, and returns it.
	pub fn close_current(&self) -> Option<Element> {
		self.inner.close_top()
	}

	/// The dialog the dismiss key would close.
	#[must_use]
	pub fn current(&self) -> Option<Element> {
		self.inner.open.borrow().top().cloned()
	}

	#[must_use]
	pub fn is_open(&self, dialog: &Element) -> bool {
		self.inner.open.borrow().contains(dialog)
	}

	#[must_use]
	pub fn open_count(&self) -> usize {
		self.inner.open.borrow().len()
	}

	/// Makes `dialog` close on backdrop presses and on clicks of its close control, if it has one.
	///
	/// # Errors
	///
	/// Iff the close control query throws, i.e. the configured selector is malformed.
	#[instrument(skip(self))]
	pub fn attach(&self, dialog: &Element) -> Result<()> {
		let backdrop = {
			let weak = Rc::downgrade(&self.inner);
			let dialog = dialog.clone();
			Closure::wrap(Box::new(move |event: MouseEvent| {
				let target: &EventTarget = dialog.as_ref();
				if event.target().as_ref() == Some(target) {
					if let Some(inner) = weak.upgrade() {
						trace!("Backdrop pressed.");
						inner.close(&dialog);
					}
				}
			}) as Box<dyn Fn(MouseEvent)>)
		};
		let backdrop = Listener::add(dialog.as_ref(), "mousedown", backdrop)?;
		self.inner.attached.borrow_mut().push(backdrop);

		match dialog.query_selector(&self.inner.config.close_selector)? {
			Some(close_button) => {
				let weak = Rc::downgrade(&self.inner);
				let dialog = dialog.clone();
				let close = Closure::wrap(Box::new(move |_: MouseEvent| {
					if let Some(inner) = weak.upgrade() {
						inner.close(&dialog);
					}
				}) as Box<dyn Fn(MouseEvent)>);
				let close = Listener::add(close_button.as_ref(), "click", close)?;
				self.inner.attached.borrow_mut().push(close);
			}
			None => debug!("Dialog has no close control matching {:?}.", self.inner.config.close_selector),
		}
		Ok(())
	}

	/// [`attach`](`DialogManager::attach`)es every dialog in the document, returning how many there were.
	///
	/// # Errors
	///
	/// Iff a configured selector is malformed.
	#[instrument(skip(self))]
	pub fn attach_all(&self) -> Result<usize> {
		let dialogs = self.inner.document.query_selector_all(&self.inner.config.dialog_selector)?;
		for i in 0..dialogs.length() {
			let dialog = dialogs
				.get(i)
				.and_then(|node| node.dyn_into::<Element>().ok())
				.ok_or_else(|| Error::missing(self.inner.config.dialog_selector.clone()))?;
			self.attach(&dialog)?;
		}
		trace!("Attached {} dialog(s).", dialogs.length());
		Ok(dialogs.length() as usize)
	}
}

impl Inner {
	#[instrument(skip(self))]
	fn open(&self, dialog: &Element) {
		if let Err(error) = dialog.class_list().add_1(&self.config.opened_class) {
			error!("Failed to mark dialog as opened: {:?}", error);
		}
		if self.open.borrow_mut().push(dialog.clone()) {
			self.set_dismiss_listener(true);
		}
		trace!("{} dialog(s) open.", self.open.borrow().len());
	}

	#[instrument(skip(self))]
	fn close(&self, dialog: &Element) {
		if let Err(error) = dialog.class_list().remove_1(&self.config.opened_class) {
			error!("Failed to mark dialog as closed: {:?}", error);
		}
		if self.open.borrow_mut().remove(dialog) {
			self.set_dismiss_listener(false);
		}
		trace!("{} dialog(s) open.", self.open.borrow().len());
	}

	fn close_top(&self) -> Option<Element> {
		let top = self.open.borrow().top().cloned();
		if let Some(top) = &top {
			self.close(top);
		}
		top
	}

	fn set_dismiss_listener(&self, installed: bool) {
		let mut current = self.dismiss_listener_installed.borrow_mut();
		if *current == installed {
			return;
		}

		let handler = self.dismiss_handler.as_ref().unchecked_ref::<Function>();
		let result = if installed {
			self.document.add_event_listener_with_callback("keydown", handler)
		} else {
			self.document.remove_event_listener_with_callback("keydown", handler)
		};
		match result {
			Ok(()) => {
				*current = installed;
				trace!(installed, "Toggled dismiss listener.");
			}
			Err(error) => error!("Failed to toggle dismiss listener: {:?}", error),
		}
	}
}

impl Drop for Inner {
	fn drop(&mut self) {
		// The document outlives this manager, so it mustn't keep calling into a dropped `Closure`.
		self.set_dismiss_listener(false);
	}
}
