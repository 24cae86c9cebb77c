//! Contact details with verification state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact value (email address or phone number) and its verification state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedData {
    pub data: String,
    pub verified: bool,
    #[serde(default)]
    pub date_verified: Option<DateTime<Utc>>,
}

impl VerifiedData {
    /// A value verified at `at`
    pub fn verified_at(data: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            data: data.into(),
            verified: true,
            date_verified: Some(at),
        }
    }

    /// A value that has not been verified
    pub fn unverified(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            verified: false,
            date_verified: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.data.trim().is_empty()
    }
}
