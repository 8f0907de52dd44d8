//! Records exchanged with the backend.
//!
//! Both records are transient: user info is fetched fresh on every page load
//! and interaction logs are sent once and forgotten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown in the settings button until the user is known.
pub const LOADING_LABEL: &str = "Loading...";

/// Body of `GET /api/user-info`.
///
/// Anonymous visitors get `{"authenticated": false}` with no `user` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, deserialize_with = "lenient::strictly_true")]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::strictly_true")]
    pub is_admin: bool,
}

impl UserRecord {
    /// Full name when present and non-empty, the email otherwise.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.fullname.as_deref()).or_else(|| non_empty(self.email.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// What the nav header knows about the current visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavIdentity {
    pub authenticated: bool,
    pub display_name: Option<String>,
    pub is_admin: bool,
}

impl NavIdentity {
    /// Reduce a user-info response to the header state.
    ///
    /// Unauthenticated responses yield the default identity, so the admin
    /// button stays hidden and the placeholder label stays in place.
    #[must_use]
    pub fn from_user_info(info: &UserInfo) -> Self {
        if !info.authenticated {
            return Self::default();
        }

        let user = info.user.as_ref();
        Self {
            authenticated: true,
            display_name: user.and_then(UserRecord::display_name).map(str::to_owned),
            is_admin: user.is_some_and(|u| u.is_admin),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(LOADING_LABEL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    UserClick,
}

/// The element an interaction happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub id: String,
    pub kind: String,
    pub value: Option<String>,
}

impl ElementRef {
    #[must_use]
    pub fn button(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "button".to_string(),
            value: Some(value.into()),
        }
    }
}

/// Body of `POST /api/log-interaction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionLog {
    pub action: String,
    pub page: String,
    pub element_id: Option<String>,
    pub element_type: Option<String>,
    pub element_value: Option<String>,
    pub interaction_type: InteractionType,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl InteractionLog {
    #[must_use]
    pub fn new(action: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            page: page.into(),
            element_id: None,
            element_type: None,
            element_value: None,
            interaction_type: InteractionType::UserClick,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn page_view(page: impl Into<String>) -> Self {
        Self::new("page_view", page)
    }

    #[must_use]
    pub fn with_element(mut self, element: ElementRef) -> Self {
        self.element_id = Some(element.id);
        self.element_type = Some(element.kind);
        self.element_value = element.value;
        self
    }

    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Tolerant decoders for flags and ids the backend may send loosely typed.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Only JSON `true` counts; `1`, `"true"` and `null` all read as `false`.
    pub fn strictly_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(Value::deserialize(deserializer)?.as_i64())
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2025-03-01T12:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
