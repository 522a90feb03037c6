//! Cinema backend request and response types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// Backend identifiers arrive either as JSON strings or as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(deserialize_with = "deserialize_id")] String);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(
    /// Actor identifier.
    ActorId
);
entity_id!(
    /// City identifier.
    CityId
);
entity_id!(
    /// Category identifier.
    CategoryId
);
entity_id!(
    /// Director identifier.
    DirectorId
);
entity_id!(
    /// Movie identifier.
    MovieId
);

/// Bearer token of the logged-in operator.
///
/// `Debug` is redacted so the token never ends up in logs.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// A record of a reference list shown as a selectable option.
pub trait ReferenceRecord {
    /// Identifier as sent back to the backend.
    fn id(&self) -> &str;

    /// Human-readable label.
    fn display_name(&self) -> &str;
}

/// An actor from `actors/getall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRef {
    /// Actor ID.
    pub actor_id: ActorId,
    /// Actor name.
    pub actor_name: String,
}

/// A city from `cities/getall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRef {
    /// City ID.
    pub city_id: CityId,
    /// City name.
    pub city_name: String,
}

/// A category from `categories/getall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
}

/// A director from `directors/getall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorRef {
    /// Director ID.
    pub director_id: DirectorId,
    /// Director name.
    pub director_name: String,
}

impl ReferenceRecord for ActorRef {
    fn id(&self) -> &str {
        self.actor_id.as_str()
    }

    fn display_name(&self) -> &str {
        &self.actor_name
    }
}

impl ReferenceRecord for CityRef {
    fn id(&self) -> &str {
        self.city_id.as_str()
    }

    fn display_name(&self) -> &str {
        &self.city_name
    }
}

impl ReferenceRecord for CategoryRef {
    fn id(&self) -> &str {
        self.category_id.as_str()
    }

    fn display_name(&self) -> &str {
        &self.category_name
    }
}

impl ReferenceRecord for DirectorRef {
    fn id(&self) -> &str {
        self.director_id.as_str()
    }

    fn display_name(&self) -> &str {
        &self.director_name
    }
}

/// Request body for `directors/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDirector {
    /// Free-text director name.
    pub director_name: String,
    /// Operator token, also sent as the bearer credential.
    pub token: AccessToken,
}

/// Response body of `directors/add`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDirector {
    /// ID assigned by the backend.
    pub director_id: DirectorId,
    /// Stored name, if echoed back.
    #[serde(default)]
    pub director_name: Option<String>,
}

/// Request body for `movies/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    /// Movie title.
    pub movie_name: String,
    /// Summary text.
    pub description: String,
    /// Running time in minutes.
    pub duration: u32,
    /// Release date (`YYYY-MM-DD`).
    pub release_date: NaiveDate,
    /// Trailer link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<Url>,
    /// Selected category.
    pub category_id: CategoryId,
    /// Resolved director.
    pub director_id: DirectorId,
    /// Free-text director name, when the director was created from it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director_name: Option<String>,
    /// Whether the movie is currently showing.
    pub is_in_vision: bool,
    /// Operator token, also sent as the bearer credential.
    pub user_access_token: AccessToken,
}

/// Response body of `movies/add`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMovie {
    /// ID assigned by the backend.
    pub movie_id: MovieId,
    /// Stored title, if echoed back.
    #[serde(default)]
    pub movie_name: Option<String>,
}
