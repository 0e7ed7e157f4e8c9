//! The full-size image viewer opened from a card.

use crate::{config::LightboxConfig, dialog::DialogManager, Error, Result};
use tracing::instrument;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement};

/// The dialog that shows one card's image at full size, with its name as caption.
#[derive(Debug, Clone)]
pub struct Lightbox {
	dialog: Element,
	image: HtmlImageElement,
	caption: Element,
}

impl Lightbox {
	/// # Errors
	///
	/// Iff `dialog` lacks the image or the caption element.
	pub fn new(dialog: Element, config: &LightboxConfig) -> Result<Self> {
		let image = dialog
			.query_selector(&config.image_selector)?
			.and_then(|image| image.dyn_into::<HtmlImageElement>().ok())
			.ok_or_else(|| Error::missing(config.image_selector.clone()))?;
		let caption = dialog
			.query_selector(&config.caption_selector)?
			.ok_or_else(|| Error::missing(config.caption_selector.clone()))?;
		Ok(Self { dialog, image, caption })
	}

	#[must_use]
	pub fn dialog(&self) -> &Element {
		&self.dialog
	}

	#[instrument(skip(dialogs))]
	pub fn show(&self, dialogs: &DialogManager, name: &str, link: &str) {
		self.image.set_src(link);
		self.image.set_alt(name);
		self.caption.set_text_content(Some(name));
		dialogs.open(&self.dialog);
	}
}
