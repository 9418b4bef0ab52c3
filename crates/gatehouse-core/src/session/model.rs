//! Session domain model.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GatehouseError, Result};

/// The record representing an authenticated user.
///
/// A `Session` exists if and only if the user is authenticated. It is never
/// mutated after creation; a new login replaces it wholesale.
///
/// Serialized form (the durable slot value):
///
/// ```json
/// {"email":"a@b.com","loginTime":"2025-01-01T09:30:00.123Z"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// User-supplied login identifier. Not validated as a real email.
    pub email: String,
    /// Time of the successful login, ISO-8601 in UTC.
    pub login_time: DateTime<Utc>,
}

impl Session {
    /// Creates a session for `email` stamped with the current time.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            login_time: Utc::now(),
        }
    }

    /// Serializes the session into the durable slot format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a durable slot value.
    ///
    /// Rejects records with an empty `email`, since such a record can never
    /// be produced by a successful login.
    pub fn from_json(raw: &str) -> Result<Self> {
        let session: Session = serde_json::from_str(raw)?;
        if session.email.is_empty() {
            return Err(GatehouseError::json("session record has an empty email"));
        }
        Ok(session)
    }

    /// Login time rendered in the local timezone for display.
    pub fn login_time_local(&self) -> String {
        self.login_time
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}
