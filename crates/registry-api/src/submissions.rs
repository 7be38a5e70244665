use axum::{Form, extract::State, response::Redirect};
use tracing::info;

use registry_crypto::Cipher;
use registry_db::EncryptedSubmission;
use registry_types::api::SubmitForm;
use registry_types::models::Registration;

use crate::AppState;
use crate::error::ApiError;

const NAME_MAX: usize = 100;
const INSTAGRAM_MAX: usize = 100;
const ENTRY_NUMBER_MAX: usize = 32;
const GENDER_MAX: usize = 32;

/// POST /submit — normalize, encrypt each field, append, redirect to /success.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Redirect, ApiError> {
    let registration = normalize(&form)?;

    let encrypted = encrypt_registration(&state.cipher, &registration)
        .map_err(ApiError::Encryption)?;

    let id = state.store.insert(&encrypted).map_err(ApiError::Storage)?;
    info!("Submission {} stored", id);

    Ok(Redirect::to("/success"))
}

/// Length-check the raw form, then trim every field, drop leading `@` from the
/// handle and upper-case the entry number. Fields empty after that are rejected.
pub fn normalize(form: &SubmitForm) -> Result<Registration, ApiError> {
    let name = bounded("name", &form.name, NAME_MAX)?.trim();
    let instagram = bounded("instagram", &form.instagram, INSTAGRAM_MAX)?
        .trim()
        .trim_start_matches('@');
    let entry_number = bounded("entry_number", &form.entry_number, ENTRY_NUMBER_MAX)?
        .trim()
        .to_uppercase();
    let gender = bounded("gender", &form.gender, GENDER_MAX)?.trim();

    Ok(Registration {
        name: non_empty("name", name.to_string())?,
        instagram: non_empty("instagram", instagram.to_string())?,
        entry_number: non_empty("entry_number", entry_number)?,
        gender: non_empty("gender", gender.to_string())?,
    })
}

pub fn encrypt_registration(
    cipher: &Cipher,
    registration: &Registration,
) -> anyhow::Result<EncryptedSubmission> {
    Ok(EncryptedSubmission {
        name_enc: cipher.encrypt(&registration.name)?,
        instagram_enc: cipher.encrypt(&registration.instagram)?,
        entry_enc: cipher.encrypt(&registration.entry_number)?,
        gender_enc: cipher.encrypt(&registration.gender)?,
    })
}

fn bounded<'a>(field: &str, value: &'a str, max: usize) -> Result<&'a str, ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value)
}

fn non_empty(field: &str, value: String) -> Result<String, ApiError> {
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}
