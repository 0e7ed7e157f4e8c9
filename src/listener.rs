//! Event listeners that unregister themselves.

use crate::Result;
use js_sys::Function;
use tracing::{error, trace};
use wasm_bindgen::{
	closure::{Closure, WasmClosure},
	JsCast,
};
use web_sys::EventTarget;

/// A [`Closure`] registered on `target` for `event_type` events.
///
/// Dropping it removes the listener from `target` before the [`Closure`] is freed,
/// so the page never calls into a dropped handler.
pub(crate) struct Listener<T: ?Sized + WasmClosure> {
	target: EventTarget,
	event_type: &'static str,
	closure: Closure<T>,
}

impl<T: ?Sized + WasmClosure> Listener<T> {
	pub(crate) fn add(target: &EventTarget, event_type: &'static str, closure: Closure<T>) -> Result<Self> {
		target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref::<Function>())?;
		Ok(Self {
			target: target.clone(),
			event_type,
			closure,
		})
	}
}

impl<T: ?Sized + WasmClosure> Drop for Listener<T> {
	fn drop(&mut self) {
		match self
			.target
			.remove_event_listener_with_callback(self.event_type, self.closure.as_ref().unchecked_ref::<Function>())
		{
			Ok(()) => trace!(event_type = self.event_type, "Removed listener."),
			Err(error) => error!("Failed to remove {:?} listener: {:?}", self.event_type, error),
		}
	}
}
