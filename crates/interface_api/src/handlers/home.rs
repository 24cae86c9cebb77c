//! Member pages
//!
//! - `GET /` list, `GET /ListRecords` JSON list
//! - `GET|POST /Add` registration
//! - `GET|POST /Edit/:id` edit, 404 for unknown ids
//! - `GET /Delete/:id` delete, 404 for unknown ids
//!
//! Successful writes redirect to `/` with 303 See Other. Rejected forms are
//! rendered again with their errors: 422 for invalid input, 409 for a taken
//! username.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::{info, warn};

use domain_person::PersonError;

use crate::dto::person::{AddPersonForm, EditPersonForm, PersonResponse};
use crate::{error::ApiError, views, AppState};

fn unprocessable(page: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
}

fn conflict(page: String) -> Response {
    (StatusCode::CONFLICT, Html(page)).into_response()
}

/// Lists every member
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let persons = state.persons.list().await?;
    Ok(Html(views::index_page(&persons)))
}

/// Lists every member as JSON
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<PersonResponse>>, ApiError> {
    let persons = state.persons.list().await?;
    Ok(Json(persons.into_iter().map(PersonResponse::from).collect()))
}

/// Registration form
pub async fn add_form() -> Html<String> {
    Html(views::add_page(&AddPersonForm::default(), &[]))
}

/// Registers a member
pub async fn add_person(
    State(state): State<AppState>,
    Form(form): Form<AddPersonForm>,
) -> Result<Response, ApiError> {
    let form = form.normalized();
    let details = match form.to_new_person() {
        Ok(details) => details,
        Err(errors) => {
            warn!(?errors, "Rejected registration form");
            return Ok(unprocessable(views::add_page(&form, &errors)));
        }
    };

    match state.persons.register(details).await {
        Ok(person) => {
            info!(id = %person.id, "Member added");
            Ok(Redirect::to("/").into_response())
        }
        Err(PersonError::ValidationFailed(errors)) => {
            Ok(unprocessable(views::add_page(&form, &errors)))
        }
        Err(e @ PersonError::UsernameTaken(_)) => {
            warn!(username = %form.username, "Rejected registration of a taken username");
            Ok(conflict(views::add_page(&form, &[e.to_string()])))
        }
        Err(e) => Err(e.into()),
    }
}

/// Edit form, prefilled from the stored member
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let person = state
        .persons
        .get(&id)
        .await?
        .ok_or_else(|| PersonError::not_found(&id))?;

    Ok(Html(views::edit_page(&id, &EditPersonForm::from(&person), &[])))
}

/// Applies an edit
pub async fn edit_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EditPersonForm>,
) -> Result<Response, ApiError> {
    let form = form.normalized();
    let edit = match form.to_edit() {
        Ok(edit) => edit,
        Err(errors) => {
            warn!(%id, ?errors, "Rejected edit form");
            return Ok(unprocessable(views::edit_page(&id, &form, &errors)));
        }
    };

    match state.persons.edit(&id, edit).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(PersonError::ValidationFailed(errors)) => {
            Ok(unprocessable(views::edit_page(&id, &form, &errors)))
        }
        Err(e) => {
            if e.is_not_found() {
                warn!(%id, "Edit of unknown member");
            }
            Err(e.into())
        }
    }
}

/// Deletes a member
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    state.persons.remove(&id).await.map_err(|e| {
        if e.is_not_found() {
            warn!(%id, "Delete of unknown member");
        }
        ApiError::from(e)
    })?;
    Ok(Redirect::to("/"))
}
