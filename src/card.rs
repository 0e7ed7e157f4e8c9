//! Photo cards, cloned from a `<template>` in the page.

use crate::{config::CardConfig, listener::Listener, model::Card, Error, Result};
use core::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{error, instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlImageElement, HtmlTemplateElement};

/// What the user asked a card to do. Carrying it out (usually via [`crate::api`]) is up to the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
	Delete { card_id: String },
	/// `like` is the requested new state.
	ToggleLike { card_id: String, like: bool },
	/// The image was clicked.
	Open { name: String, link: String },
}

fn required(parent: &Element, selector: &str) -> Result<Element> {
	parent.query_selector(selector)?.ok_or_else(|| Error::missing(selector))
}

/// One rendered card and its listeners.
///
/// The listeners are removed once the last clone is dropped.
#[derive(Clone)]
pub struct CardView {
	inner: Rc<CardInner>,
}

struct CardInner {
	element: Element,
	like_button: Element,
	like_count: Option<Element>,
	config: CardConfig,
	user_id: String,
	card: RefCell<Card>,
	listeners: RefCell<Vec<Listener<dyn Fn()>>>,
}

impl core::fmt::Debug for CardView {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("CardView").field("card_id", &self.inner.card.borrow().id).finish()
	}
}

impl CardView {
	/// Clones a card element from the template and fills it in for the user with id `user_id`.
	///
	/// The delete button is removed unless that user owns the card.
	///
	/// # Errors
	///
	/// Iff the template or any required part of the card is missing.
	#[instrument(skip(document, card, config, on_action), fields(card_id = %card.id))]
	pub fn render(document: &Document, card: Card, user_id: &str, config: &CardConfig, on_action: impl Fn(CardAction) + 'static) -> Result<Self> {
		let template = document
			.query_selector(&config.template_selector)?
			.and_then(|template| template.dyn_into::<HtmlTemplateElement>().ok())
			.ok_or_else(|| Error::missing(config.template_selector.clone()))?;
		let element = template
			.content()
			.query_selector(&config.card_selector)?
			.ok_or_else(|| Error::missing(config.card_selector.clone()))?
			.clone_node_with_deep(true)?
			.dyn_into::<Element>()
			.map_err(|node| Error::Dom(format!("Cloned card isn't an element: {:?}", node)))?;

		let image = required(&element, &config.image_selector)?
			.dyn_into::<HtmlImageElement>()
			.map_err(|_| Error::missing(format!("img{}", config.image_selector)))?;
		image.set_src(&card.link);
		image.set_alt(&format!("Фотография места: {}", card.name));
		required(&element, &config.title_selector)?.set_text_content(Some(&card.name));

		let delete_button = element.query_selector(&config.delete_button_selector)?;
		let delete_button = match delete_button {
			Some(button) if !card.is_owned_by(user_id) => {
				button.remove();
				None
			}
			other => other,
		};

		let inner = Rc::new(CardInner {
			like_button: required(&element, &config.like_button_selector)?,
			like_count: element.query_selector(&config.like_count_selector)?,
			element,
			config: config.clone(),
			user_id: user_id.to_owned(),
			card: RefCell::new(card),
			listeners: RefCell::default(),
		});
		inner.render_likes();

		let on_action: Rc<dyn Fn(CardAction)> = Rc::new(on_action);
		let image: &Element = image.as_ref();
		inner.listen(image, &on_action, |card, _| CardAction::Open {
			name: card.name.clone(),
			link: card.link.clone(),
		})?;
		inner.listen(&inner.like_button, &on_action, |card, user_id| CardAction::ToggleLike {
			card_id: card.id.clone(),
			like: !card.is_liked_by(user_id),
		})?;
		if let Some(delete_button) = &delete_button {
			inner.listen(delete_button, &on_action, |card, _| CardAction::Delete { card_id: card.id.clone() })?;
		}

		Ok(Self { inner })
	}

	#[must_use]
	pub fn element(&self) -> &Element {
		&self.inner.element
	}

	#[must_use]
	pub fn card(&self) -> Card {
		self.inner.card.borrow().clone()
	}

	/// Shows like state and count of `card`, usually the server's answer to a like request.
	pub fn update(&self, card: Card) {
		*self.inner.card.borrow_mut() = card;
		self.inner.render_likes();
	}

	/// # Errors
	///
	/// Iff the DOM refuses the insertion.
	pub fn append_to(&self, list: &Element) -> Result<()> {
		Ok(list.append_with_node_1(&self.inner.element)?)
	}

	/// # Errors
	///
	/// Iff the DOM refuses the insertion.
	pub fn prepend_to(&self, list: &Element) -> Result<()> {
		Ok(list.prepend_with_node_1(&self.inner.element)?)
	}

	/// Takes the card off the page.
	pub fn remove(&self) {
		trace!(card_id = %self.inner.card.borrow().id, "Removing card.");
		self.inner.element.remove();
	}
}

impl CardInner {
	fn render_likes(&self) {
		let card = self.card.borrow();
		if let Err(error) = self
			.like_button
			.class_list()
			.toggle_with_force(&self.config.like_active_class, card.is_liked_by(&self.user_id))
		{
			error!("Failed to toggle like state: {:?}", error);
		}
		if let Some(like_count) = &self.like_count {
			like_count.set_text_content(Some(&card.like_count().to_string()));
		}
	}

	fn listen(
		self: &Rc<Self>,
		target: &Element,
		on_action: &Rc<dyn Fn(CardAction)>,
		action: impl Fn(&Card, &str) -> CardAction + 'static,
	) -> Result<()> {
		let weak: Weak<Self> = Rc::downgrade(self);
		let on_action = Rc::clone(on_action);
		let listener = Closure::wrap(Box::new(move || {
			if let Some(inner) = weak.upgrade() {
				let action = action(&inner.card.borrow(), &inner.user_id);
				trace!(?action, "Card action.");
				on_action(action);
			}
		}) as Box<dyn Fn()>);
		let listener = Listener::add(target.as_ref(), "click", listener)?;
		self.listeners.borrow_mut().push(listener);
		Ok(())
	}
}
