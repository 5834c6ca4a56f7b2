//! Idempotency key shapes consumed from the host platform's key store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource kind an idempotency key is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Event,
}

impl AsRef<str> for ResourceType {
    fn as_ref(&self) -> &str {
        match self {
            Self::Event => "EVENT",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// A deduplication token issued by the host platform's key store.
///
/// At most one successful completion occurs per distinct key; storage and
/// locking belong to the platform, not this plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdempotencyKey {
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
}

impl IdempotencyKey {
    pub fn new(idempotency_key: impl Into<String>) -> Self {
        Self {
            idempotency_key: idempotency_key.into(),
            created_at: Utc::now(),
        }
    }
}
