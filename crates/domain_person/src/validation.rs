//! Person validation rules
//!
//! # Validation Rules
//!
//! - First and last name are required
//! - Email must be a syntactically valid address
//! - Phone may only contain digits, spaces and `+ - ( )`
//! - Date of birth must be in the past, age at most 150 years
//! - Username and localization are required
//!
//! Unverified contact details and members without an address only produce
//! warnings.

use chrono::Utc;
use validator::ValidateEmail;

use crate::person::Person;

/// Result of person validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the person is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for person records
///
/// # Examples
///
/// ```rust,ignore
/// use domain_person::validation::PersonValidator;
///
/// let result = PersonValidator::validate(&person);
/// if !result.is_valid {
///     for error in result.errors {
///         println!("Validation error: {}", error);
///     }
/// }
/// ```
pub struct PersonValidator;

impl PersonValidator {
    /// Validates a person record
    pub fn validate(person: &Person) -> ValidationResult {
        let mut result = ValidationResult::ok();

        Self::validate_name(person, &mut result);
        result.merge(Self::validate_contact(&person.email.data, &person.phone.data));
        Self::validate_birth(person, &mut result);

        if person.login.username.trim().is_empty() {
            result.add_error("Username is required");
        }
        if person.localization.trim().is_empty() {
            result.add_error("Localization is required");
        }
        if person.location.format().is_empty() {
            result.add_warning("No address recorded");
        }
        if !person.email.verified || !person.phone.verified {
            result.add_warning("Contact details are not verified");
        }

        result
    }

    /// Validates an email address and phone number pair
    pub fn validate_contact(email: &str, phone: &str) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if email.trim().is_empty() {
            result.add_error("Email is required");
        } else if !email.trim().validate_email() {
            result.add_error(format!("Invalid email format: {}", email));
        }

        if phone.trim().is_empty() {
            result.add_error("Phone number is required");
        } else if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
        {
            result.add_error(format!("Invalid phone number: {}", phone));
        }

        result
    }

    fn validate_name(person: &Person, result: &mut ValidationResult) {
        if person.name.first.trim().is_empty() {
            result.add_error("First name is required");
        }
        if person.name.last.trim().is_empty() {
            result.add_error("Last name is required");
        }
    }

    fn validate_birth(person: &Person, result: &mut ValidationResult) {
        let today = Utc::now().date_naive();
        if person.date_of_birth > today {
            result.add_error("Date of birth cannot be in the future");
            return;
        }

        let age = person.age_on(today);
        if age > 150 {
            result.add_error(format!("Invalid age: {} years", age));
        }
    }
}
