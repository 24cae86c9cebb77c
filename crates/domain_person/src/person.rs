//! The person document
//!
//! A `Person` is one member record in the `persons` container. The document
//! identifier doubles as the partition key.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Document, PersonId};

use crate::address::Address;
use crate::contact::VerifiedData;
use crate::credentials::Login;
use crate::error::PersonError;

/// Localization recorded for newly registered members
pub const DEFAULT_LOCALIZATION: &str = "tr-TR";

/// Date of birth recorded when registration does not supply one
pub fn default_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(1980, 5, 2).unwrap_or(NaiveDate::MIN)
}

/// Gender as captured by the registration form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = PersonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "unspecified" => Ok(Gender::Unspecified),
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(PersonError::invalid(format!("Unknown gender: {}", other))),
        }
    }
}

/// First and last name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub first: String,
    pub last: String,
}

/// Profile picture URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePicture {
    pub large: String,
    pub medium: String,
    pub thumbnail: String,
}

/// A registered member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub active: bool,
    #[serde(default)]
    pub gender: Gender,
    pub name: Name,
    pub login: Login,
    pub location: Address,
    pub email: VerifiedData,
    pub phone: VerifiedData,
    #[serde(default)]
    pub picture: Option<ProfilePicture>,
    pub date_of_birth: NaiveDate,
    pub localization: String,
    pub registered: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Details supplied when registering a member
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub username: String,
    /// Plain text password, hashed on registration
    pub password: String,
    pub date_of_birth: Option<NaiveDate>,
    pub location: Address,
}

/// Fields a member edit may change
#[derive(Debug, Clone, PartialEq)]
pub struct PersonEdit {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub location: Address,
}

impl Person {
    /// Container holding person documents
    pub const CONTAINER: &'static str = "persons";

    /// Builds a new member record from registration details
    ///
    /// The record gets a fresh identifier, contact details verified at `now`,
    /// the default localization and, unless given, the default date of birth.
    ///
    /// # Errors
    ///
    /// Returns `PersonError::Credential` if the password cannot be hashed
    pub fn register(details: NewPerson, now: DateTime<Utc>) -> Result<Self, PersonError> {
        let login = Login::create(details.username, &details.password)?;

        Ok(Self {
            id: PersonId::new(),
            active: true,
            gender: details.gender,
            name: Name {
                first: details.first_name,
                last: details.last_name,
            },
            login,
            location: details.location,
            email: VerifiedData::verified_at(details.email, now),
            phone: VerifiedData::verified_at(details.phone, now),
            picture: None,
            date_of_birth: details.date_of_birth.unwrap_or_else(default_date_of_birth),
            localization: DEFAULT_LOCALIZATION.to_string(),
            registered: now,
            last_updated: now,
        })
    }

    /// Applies an edit
    ///
    /// Only names, contact details, gender and address change. New contact
    /// details are recorded as unverified.
    pub fn apply_edit(&mut self, edit: PersonEdit, now: DateTime<Utc>) {
        self.name.first = edit.first_name;
        self.name.last = edit.last_name;
        self.email = VerifiedData::unverified(edit.email);
        self.phone = VerifiedData::unverified(edit.phone);
        self.gender = edit.gender;
        self.location = edit.location;
        self.last_updated = now;
    }

    /// Returns "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.first.trim(), self.name.last.trim())
            .trim()
            .to_string()
    }

    /// Age in whole years on `today`
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let mut age = today.year() - self.date_of_birth.year();
        if (today.month(), today.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }
}

impl Document for Person {
    fn id(&self) -> &str {
        self.id.as_str()
    }
}
