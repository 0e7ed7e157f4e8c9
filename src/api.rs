//! Requests the Mesto REST API understands, and decoding of its responses.
//!
//! Sending them is up to the caller: This module only describes what to send and how to read the reply.

use crate::{Error, Result};
use core::fmt::{self, Display, Formatter};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
	/// Without trailing slash, e.g. `https://nomoreparties.co/v1/wff-cohort-38`.
	pub base_url: String,
	pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
	Put,
	Patch,
	Delete,
}

impl Method {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}

impl Display for Method {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One API call, ready to be handed to `fetch` or any other HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
	pub method: Method,
	pub url: String,
	/// JSON.
	pub body: Option<String>,
	pub headers: Vec<(&'static str, String)>,
}

#[derive(Serialize)]
struct ProfileUpdate<'a> {
	name: &'a str,
	about: &'a str,
}

#[derive(Serialize)]
struct AvatarUpdate<'a> {
	avatar: &'a str,
}

#[derive(Serialize)]
struct NewCard<'a> {
	name: &'a str,
	link: &'a str,
}

impl ApiConfig {
	fn request(&self, method: Method, path: &str, body: Option<String>) -> Request {
		Request {
			method,
			url: format!("{}{}", self.base_url.trim_end_matches('/'), path),
			body,
			headers: vec![("authorization", self.token.clone()), ("Content-Type", "application/json".to_owned())],
		}
	}

	/// Responds with a [`Profile`](`crate::model::Profile`).
	#[must_use]
	pub fn get_profile(&self) -> Request {
		self.request(Method::Get, "/users/me", None)
	}

	/// Responds with the updated [`Profile`](`crate::model::Profile`).
	///
	/// # Errors
	///
	/// Never in practice; serialization of string pairs can't fail.
	pub fn update_profile(&self, name: &str, about: &str) -> Result<Request> {
		Ok(self.request(Method::Patch, "/users/me", Some(serde_json::to_string(&ProfileUpdate { name, about })?)))
	}

	/// Responds with the updated [`Profile`](`crate::model::Profile`).
	///
	/// # Errors
	///
	/// Never in practice; serialization of a string can't fail.
	pub fn update_avatar(&self, avatar: &str) -> Result<Request> {
		Ok(self.request(Method::Patch, "/users/me/avatar", Some(serde_json::to_string(&AvatarUpdate { avatar })?)))
	}

	/// Responds with a list of [`Card`](`crate::model::Card`)s.
	#[must_use]
	pub fn get_cards(&self) -> Request {
		self.request(Method::Get, "/cards", None)
	}

	/// Responds with the new [`Card`](`crate::model::Card`).
	///
	/// # Errors
	///
	/// Never in practice; serialization of string pairs can't fail.
	pub fn create_card(&self, name: &str, link: &str) -> Result<Request> {
		Ok(self.request(Method::Post, "/cards", Some(serde_json::to_string(&NewCard { name, link })?)))
	}

	#[must_use]
	pub fn delete_card(&self, card_id: &str) -> Request {
		self.request(Method::Delete, &format!("/cards/{}", card_id), None)
	}

	/// Likes (`PUT`) or unlikes (`DELETE`) a card. Responds with the updated [`Card`](`crate::model::Card`).
	#[must_use]
	pub fn set_like(&self, card_id: &str, like: bool) -> Request {
		self.request(if like { Method::Put } else { Method::Delete }, &format!("/cards/likes/{}", card_id), None)
	}
}

/// Decodes a response body, turning non-2xx statuses into [`Error::Api`].
///
/// # Errors
///
/// Iff `status` isn't a success or `body` doesn't decode as `T`.
pub fn parse_response<T: DeserializeOwned>(status: u16, status_text: &str, body: &str) -> Result<T> {
	if (200..300).contains(&status) {
		return Ok(serde_json::from_str(body)?);
	}

	let message = serde_json::from_str::<Value>(body)
		.ok()
		.and_then(|value| value.get("message").and_then(Value::as_str).map(ToOwned::to_owned))
		.filter(|message| !message.is_empty())
		.unwrap_or_else(|| status_text.to_owned());
	Err(Error::Api { status, message })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::Profile;

	fn config() -> ApiConfig {
		ApiConfig {
			base_url: "https://nomoreparties.co/v1/wff-cohort-38/".to_owned(),
			token: "token".to_owned(),
		}
	}

	#[test]
	fn paths() {
		let config = config();
		assert_eq!(config.get_profile().url, "https://nomoreparties.co/v1/wff-cohort-38/users/me");
		assert_eq!(config.get_cards().url, "https://nomoreparties.co/v1/wff-cohort-38/cards");
		assert_eq!(config.delete_card("c1").url, "https://nomoreparties.co/v1/wff-cohort-38/cards/c1");
		assert_eq!(config.update_avatar("x").unwrap().url, "https://nomoreparties.co/v1/wff-cohort-38/users/me/avatar");
	}

	#[test]
	fn like_toggles_method() {
		let config = config();
		let like = config.set_like("c1", true);
		assert_eq!(like.method, Method::Put);
		assert_eq!(like.url, "https://nomoreparties.co/v1/wff-cohort-38/cards/likes/c1");
		assert_eq!(config.set_like("c1", false).method, Method::Delete);
	}

	#[test]
	fn bodies_and_headers() {
		let request = config().update_profile("Jacques", "Explorer").unwrap();
		assert_eq!(request.method.to_string(), "PATCH");
		let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
		assert_eq!(body, serde_json::json!({"name": "Jacques", "about": "Explorer"}));
		assert!(request.headers.contains(&("authorization", "token".to_owned())));

		let request = config().create_card("Архыз", "https://example.com/a.jpg").unwrap();
		assert_eq!(request.method, Method::Post);
		assert!(request.body.unwrap().contains("\"link\":\"https://example.com/a.jpg\""));
	}

	#[test]
	fn success_decodes() {
		let profile: Profile = parse_response(200, "OK", r#"{"name":"J","about":"E","avatar":"a","_id":"me"}"#).unwrap();
		assert_eq!(profile.id, "me");
	}

	#[test]
	fn failure_uses_server_message() {
		let error = parse_response::<Profile>(403, "Forbidden", r#"{"message":"Нельзя удалить чужую карточку"}"#).unwrap_err();
		assert_eq!(error.to_string(), "Ошибка 403: Нельзя удалить чужую карточку");
	}

	#[test]
	fn failure_without_json_falls_back_to_status_text() {
		match parse_response::<Profile>(502, "Bad Gateway", "<html>") {
			Err(Error::Api { status, message }) => {
				assert_eq!(status, 502);
				assert_eq!(message, "Bad Gateway");
			}
			other => panic!("unexpected {:?}", other),
		}
	}
}
