//! User record types and their persisted JSON shape.
//!
//! Records are stored as `{id, login, password, userType, tag: [{text}]}` so
//! data written by earlier versions of the form keeps loading unchanged.
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Account type of a user record, persisted as the enum key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    #[default]
    #[serde(rename = "LDAP")]
    Ldap,
    #[serde(rename = "local")]
    Local,
}

impl UserType {
    pub const ALL: [UserType; 2] = [UserType::Ldap, UserType::Local];

    /// Persisted key (`"LDAP"` or `"local"`).
    pub fn key(self) -> &'static str {
        match self {
            UserType::Ldap => "LDAP",
            UserType::Local => "local",
        }
    }

    /// Label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            UserType::Ldap => "LDAP",
            UserType::Local => "Local",
        }
    }

    /// Cycle to the other type.
    pub fn toggled(self) -> Self {
        match self {
            UserType::Ldap => UserType::Local,
            UserType::Local => UserType::Ldap,
        }
    }
}

/// A single free-form tag attached to a user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
}

impl Tag {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One user entry of the form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub login: String,
    pub password: String,
    pub user_type: UserType,
    #[serde(rename = "tag")]
    pub tags: Vec<Tag>,
}

impl UserRecord {
    /// Placeholder record: empty login and password, LDAP, no tags.
    pub fn placeholder(id: i64) -> Self {
        Self { id, ..Self::default() }
    }

    pub fn tags_text(&self) -> String {
        format_tags(&self.tags)
    }
}

/// Split a `;`-separated tag field into tags, dropping blank pieces.
pub fn parse_tags(input: &str) -> Vec<Tag> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Tag::new)
        .collect()
}

pub fn format_tags(tags: &[Tag]) -> String {
    tags.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join("; ")
}

/// Issues record ids from the millisecond clock.
///
/// Each id is `max(now_ms, last + 1)`, so ids stay timestamp-like but two
/// records created within the same millisecond still get distinct ids.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Seed from existing records so new ids never collide with loaded ones.
    pub fn seeded(records: &[UserRecord]) -> Self {
        let last = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self { last }
    }

    pub fn next_id(&mut self) -> i64 {
        self.next_at(now_millis())
    }

    pub fn next_at(&mut self, now_ms: i64) -> i64 {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    pub fn last(&self) -> i64 {
        self.last
    }
}

pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
