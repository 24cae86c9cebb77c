//! Person registry service
//!
//! `PersonService` holds the registry's use cases on top of the typed
//! `Repository<Person>`. It receives the document store at construction:
//!
//! ```rust,ignore
//! let service = PersonService::new(store.clone());
//! let person = service.register(details).await?;
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use core_kernel::{DocumentStore, QuerySpec, Repository};

use crate::error::PersonError;
use crate::person::{NewPerson, Person, PersonEdit};
use crate::validation::PersonValidator;

/// Registry use cases for members
#[derive(Debug, Clone)]
pub struct PersonService {
    persons: Repository<Person>,
}

impl PersonService {
    /// Creates a service over the `persons` container of `store`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_repository(Repository::new(store, Person::CONTAINER))
    }

    pub fn with_repository(persons: Repository<Person>) -> Self {
        Self { persons }
    }

    pub fn repository(&self) -> &Repository<Person> {
        &self.persons
    }

    /// Lists every member
    pub async fn list(&self) -> Result<Vec<Person>, PersonError> {
        Ok(self.persons.list().await?)
    }

    /// Looks up a member by identifier
    pub async fn get(&self, id: &str) -> Result<Option<Person>, PersonError> {
        Ok(self.persons.get(id).await?)
    }

    /// Looks up a member by login username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Person>, PersonError> {
        let spec = QuerySpec::select_all().where_eq("login.username", username.trim());
        Ok(self.persons.find_one(&spec).await?)
    }

    /// Registers a new member
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the resulting record breaks a validation rule
    /// - `UsernameTaken` if another member already uses the username
    /// - `Store` if the document could not be created
    ///
    /// The username check and the insert are separate store calls, so two
    /// concurrent registrations of one username can both succeed.
    #[instrument(skip(self, details), fields(username = %details.username))]
    pub async fn register(&self, details: NewPerson) -> Result<Person, PersonError> {
        let person = Person::register(details, Utc::now())?;

        let validation = PersonValidator::validate(&person);
        if !validation.is_valid {
            warn!(errors = ?validation.errors, "Rejected registration");
            return Err(PersonError::validation_failed(validation.errors));
        }

        if self.find_by_username(&person.login.username).await?.is_some() {
            warn!("Rejected registration of a taken username");
            return Err(PersonError::UsernameTaken(person.login.username));
        }

        let created = self.persons.create(&person).await?;
        info!(id = %created.id, "Registered person");
        Ok(created)
    }

    /// Applies an edit to an existing member
    ///
    /// # Errors
    ///
    /// - `PersonNotFound` if no member is stored under `id`
    /// - `ValidationFailed` if the edited record breaks a validation rule
    #[instrument(skip(self, edit))]
    pub async fn edit(&self, id: &str, edit: PersonEdit) -> Result<Person, PersonError> {
        let mut person = self
            .persons
            .get(id)
            .await?
            .ok_or_else(|| PersonError::not_found(id))?;

        person.apply_edit(edit, Utc::now());

        let validation = PersonValidator::validate(&person);
        if !validation.is_valid {
            warn!(errors = ?validation.errors, "Rejected edit");
            return Err(PersonError::validation_failed(validation.errors));
        }

        let stored_id = person.id.as_str().to_string();
        let updated = self.persons.replace(&stored_id, &person).await.map_err(|e| {
            if e.is_not_found() {
                PersonError::not_found(id)
            } else {
                PersonError::Store(e)
            }
        })?;
        info!(id = %updated.id, "Updated person");
        Ok(updated)
    }

    /// Deletes a member
    ///
    /// # Errors
    ///
    /// `PersonNotFound` if no member is stored under `id`
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), PersonError> {
        if id.trim().is_empty() || !self.persons.delete(id).await? {
            return Err(PersonError::not_found(id));
        }
        info!(id, "Deleted person");
        Ok(())
    }
}
