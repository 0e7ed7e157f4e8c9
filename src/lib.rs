//! Dialog lifecycle and declarative form validation for the Mesto photo-card gallery.
//!
//! - [`dialog::DialogManager`] owns which dialogs are open and dismisses the topmost one with Escape.
//! - [`validation::FormValidation`] keeps submit controls disabled while any field of their form is invalid,
//!   using pluggable [`validity::Validator`]s.
//! - [`card::CardView`] and [`lightbox::Lightbox`] render the gallery itself,
//!   while [`api`] describes the REST calls behind it.

#![doc(html_root_url = "https://docs.rs/mesto-dom/0.1.0")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod api;
pub mod card;
pub mod config;
pub mod dialog;
mod error;
pub mod lightbox;
mod listener;
pub mod model;
pub mod validation;
pub mod validity;

pub use error::{Error, Result};
