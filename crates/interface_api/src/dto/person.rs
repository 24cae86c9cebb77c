//! Person DTOs
//!
//! Form bodies use the legacy field names (`first`, `last`, `postcode`, ...)
//! posted by the registration and edit pages.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use domain_person::{Address, Gender, Name, NewPerson, Person, PersonEdit, ProfilePicture, VerifiedData};

/// Registration form
///
/// Missing fields read as empty so validation reports them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AddPersonForm {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 3, max = 30, message = "Phone number must be between 3-30 characters"))]
    pub phone: String,
    pub gender: String,
    #[validate(length(min = 1, max = 50, message = "Username must be between 1-50 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Optional `YYYY-MM-DD`
    pub birthdate: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
}

impl AddPersonForm {
    /// Trims every field except the password
    pub fn normalized(self) -> Self {
        Self {
            first: self.first.trim().to_string(),
            last: self.last.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            gender: self.gender.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password,
            birthdate: self.birthdate.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            postcode: self.postcode.trim().to_string(),
            country: self.country.trim().to_string(),
        }
    }

    /// Validates the form and converts it into registration details
    ///
    /// # Errors
    ///
    /// Every field message, sorted
    pub fn to_new_person(&self) -> Result<NewPerson, Vec<String>> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => validation_messages(&e),
        };

        let gender = self.gender.parse::<Gender>().map_err(|e| errors.push(e.to_string()));
        let date_of_birth = if self.birthdate.is_empty() {
            Ok(None)
        } else {
            NaiveDate::parse_from_str(&self.birthdate, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| errors.push(format!("Invalid date of birth: {}", self.birthdate)))
        };

        match (gender, date_of_birth) {
            (Ok(gender), Ok(date_of_birth)) if errors.is_empty() => Ok(NewPerson {
                first_name: self.first.clone(),
                last_name: self.last.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                gender,
                username: self.username.clone(),
                password: self.password.clone(),
                date_of_birth,
                location: Address::new(&self.address, &self.city, &self.postcode, &self.country),
            }),
            _ => Err(errors),
        }
    }
}

/// Edit form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EditPersonForm {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 3, max = 30, message = "Phone number must be between 3-30 characters"))]
    pub phone: String,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
}

impl EditPersonForm {
    pub fn normalized(self) -> Self {
        Self {
            first: self.first.trim().to_string(),
            last: self.last.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            gender: self.gender.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            postcode: self.postcode.trim().to_string(),
            country: self.country.trim().to_string(),
        }
    }

    /// Validates the form and converts it into an edit
    pub fn to_edit(&self) -> Result<PersonEdit, Vec<String>> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => validation_messages(&e),
        };

        match self.gender.parse::<Gender>() {
            Ok(gender) if errors.is_empty() => Ok(PersonEdit {
                first_name: self.first.clone(),
                last_name: self.last.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                gender,
                location: Address::new(&self.address, &self.city, &self.postcode, &self.country),
            }),
            Ok(_) => Err(errors),
            Err(e) => {
                errors.push(e.to_string());
                Err(errors)
            }
        }
    }
}

impl From<&Person> for EditPersonForm {
    fn from(person: &Person) -> Self {
        Self {
            first: person.name.first.clone(),
            last: person.name.last.clone(),
            email: person.email.data.clone(),
            phone: person.phone.data.clone(),
            gender: person.gender.to_string(),
            address: person.location.address.clone(),
            city: person.location.city.clone(),
            postcode: person.location.post_code.clone(),
            country: person.location.country.clone(),
        }
    }
}

/// Flattens validator errors into sorted messages
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages
}

/// A person as listed by `/ListRecords`
///
/// Leaves out the password hash and the user key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: String,
    pub active: bool,
    pub gender: Gender,
    pub name: Name,
    pub username: String,
    pub location: Address,
    pub email: VerifiedData,
    pub phone: VerifiedData,
    pub picture: Option<ProfilePicture>,
    pub date_of_birth: NaiveDate,
    pub localization: String,
    pub registered: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id.into_inner(),
            active: person.active,
            gender: person.gender,
            name: person.name,
            username: person.login.username,
            location: person.location,
            email: person.email,
            phone: person.phone,
            picture: person.picture,
            date_of_birth: person.date_of_birth,
            localization: person.localization,
            registered: person.registered,
            last_updated: person.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_form() -> AddPersonForm {
        AddPersonForm {
            first: " Deniz ".to_string(),
            last: "Celik".to_string(),
            email: "deniz@example.com".to_string(),
            phone: "5551234567".to_string(),
            gender: "male".to_string(),
            username: "dcelik".to_string(),
            password: "secret1".to_string(),
            birthdate: String::new(),
            address: "Kordon".to_string(),
            city: "Izmir".to_string(),
            postcode: "35000".to_string(),
            country: "TR".to_string(),
        }
    }

    #[test]
    fn test_valid_add_form_converts() {
        let details = add_form().normalized().to_new_person().unwrap();
        assert_eq!(details.first_name, "Deniz");
        assert_eq!(details.gender, Gender::Male);
        assert_eq!(details.date_of_birth, None);
        assert_eq!(details.location.post_code, "35000");
    }

    #[test]
    fn test_add_form_collects_every_error() {
        let mut form = add_form();
        form.first = "   ".to_string();
        form.email = "deniz".to_string();
        form.gender = "robot".to_string();
        form.birthdate = "02/05/1980".to_string();

        let errors = form.normalized().to_new_person().unwrap_err();
        assert_eq!(errors.len(), 4, "{:?}", errors);
        assert!(errors.contains(&"First name is required".to_string()));
        assert!(errors.contains(&"Email must be a valid address".to_string()));
    }

    #[test]
    fn test_birthdate_is_parsed() {
        let mut form = add_form();
        form.birthdate = "1988-07-14".to_string();
        let details = form.to_new_person().unwrap();
        assert_eq!(details.date_of_birth, NaiveDate::from_ymd_opt(1988, 7, 14));
    }

    #[test]
    fn test_edit_form_rejects_bad_email() {
        let form = EditPersonForm {
            first: "A".to_string(),
            last: "B".to_string(),
            email: "nope".to_string(),
            phone: "123".to_string(),
            ..EditPersonForm::default()
        };
        assert_eq!(form.to_edit().unwrap_err(), vec!["Email must be a valid address"]);
    }
}
