//! Payloads of the Mesto REST API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
	pub name: String,
	pub about: String,
	pub avatar: String,
	#[serde(rename = "_id")]
	pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
	pub name: String,
	pub link: String,
	#[serde(default)]
	pub likes: Vec<Profile>,
	#[serde(rename = "_id")]
	pub id: String,
	pub owner: Profile,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
}

impl Card {
	#[must_use]
	pub fn is_liked_by(&self, user_id: &str) -> bool {
		self.likes.iter().any(|profile| profile.id == user_id)
	}

	#[must_use]
	pub fn is_owned_by(&self, user_id: &str) -> bool {
		self.owner.id == user_id
	}

	#[must_use]
	pub fn like_count(&self) -> usize {
		self.likes.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const CARD: &str = r#"{
		"likes": [{"name": "Jacques", "about": "Explorer", "avatar": "https://example.com/a.jpg", "_id": "me", "cohort": "wff-cohort-38"}],
		"_id": "card-1",
		"name": "Архыз",
		"link": "https://pictures.s3.yandex.net/frontend-developer/cards-compressed/arkhyz.jpg",
		"owner": {"name": "Other", "about": "Someone", "avatar": "https://example.com/b.jpg", "_id": "other"},
		"createdAt": "2024-10-01T12:00:00.000Z"
	}"#;

	#[test]
	fn card_from_api() {
		let card: Card = serde_json::from_str(CARD).unwrap();
		assert_eq!(card.id, "card-1");
		assert_eq!(card.like_count(), 1);
		assert!(card.is_liked_by("me"));
		assert!(!card.is_liked_by("other"));
		assert!(card.is_owned_by("other"));
		assert!(!card.is_owned_by("me"));
		assert_eq!(card.created_at.as_deref(), Some("2024-10-01T12:00:00.000Z"));
	}

	#[test]
	fn profile_keeps_underscore_id() {
		let profile = Profile {
			name: "Jacques".to_owned(),
			about: "Explorer".to_owned(),
			avatar: "https://example.com/a.jpg".to_owned(),
			id: "me".to_owned(),
		};
		let json = serde_json::to_value(&profile).unwrap();
		assert_eq!(json["_id"], "me");
		assert!(json.get("id").is_none());
	}
}
