//! Request and response bodies of the open discussions API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub image: Option<String>,
    pub image_small: Option<String>,
    pub image_medium: Option<String>,
}

impl UserProfile {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), image: None, image_small: None, image_medium: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub profile: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChannel {
    pub title: String,
    pub name: String,
    pub public_description: String,
    pub channel_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub upvoted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub text: String,
}

/// Posts and comments are both answered with their new id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedItem {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Upvoted,
    Downvoted,
}

impl Vote {
    /// PATCH body casting this vote.
    pub fn body(&self) -> serde_json::Value {
        match self {
            Vote::Upvoted => serde_json::json!({ "upvoted": true }),
            Vote::Downvoted => serde_json::json!({ "downvoted": true }),
        }
    }
}

/// Channel membership roles, each with its own collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRole {
    Contributor,
    Moderator,
    Subscriber,
}

impl ChannelRole {
    pub fn collection(&self) -> &'static str {
        match self {
            ChannelRole::Contributor => "contributors",
            ChannelRole::Moderator => "moderators",
            ChannelRole::Subscriber => "subscribers",
        }
    }

    /// Key carrying the username when adding a member.
    pub fn name_field(&self) -> &'static str {
        match self {
            ChannelRole::Contributor => "contributor_name",
            ChannelRole::Moderator => "moderator_name",
            ChannelRole::Subscriber => "subscriber_name",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_item_accepts_string_ids() {
        let item: CreatedItem = serde_json::from_str(r#"{"id": "3k", "title": "x"}"#).unwrap();
        assert_eq!(item.id, "3k");
    }

    #[test]
    fn user_payload_nests_profile() {
        let payload = UserPayload { profile: UserProfile::named("Ada Lovelace") };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "profile": {"name": "Ada Lovelace", "image": null, "image_small": null, "image_medium": null}
            })
        );
    }

    #[test]
    fn vote_bodies() {
        assert_eq!(Vote::Upvoted.body(), serde_json::json!({"upvoted": true}));
        assert_eq!(Vote::Downvoted.body(), serde_json::json!({"downvoted": true}));
    }
}
