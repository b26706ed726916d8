//! Input validation for API requests.
//!
//! Field validators return `Result<(), String>`; the request validators
//! collect their failures with [`ValidationErrorBuilder`] into a single
//! `INVALID_REQUEST` error.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{ApiError, ValidationErrorBuilder};
use crate::db::{
    is_zero_time, CreateUserRequest, EventRequest, LoginRequest, NewEvent, UpdateUserRequest,
};

lazy_static! {
    /// Regex for validating email addresses (local@domain.tld)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)+$"
    ).unwrap();
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email is too long (max 254 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}

fn validate_required(value: &Option<String>, field: &str) -> Result<(), String> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(format!("{} is required", field)),
    }
}

pub fn validate_create_user(req: &CreateUserRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_email(&req.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_password(&req.password) {
        errors.add("password", e);
    }

    errors.finish()
}

pub fn validate_login(req: &LoginRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_email(&req.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_password(&req.password) {
        errors.add("password", e);
    }

    errors.finish()
}

/// Only a supplied, non-empty email is checked
pub fn validate_update_user(req: &UpdateUserRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(email) = req.email.as_deref().filter(|e| !e.is_empty()) {
        if let Err(e) = validate_email(email) {
            errors.add("email", e);
        }
    }

    errors.finish()
}

/// Check every field of a create request and produce the event to insert
pub fn validate_create_event(req: EventRequest) -> Result<NewEvent, ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_required(&req.name, "Name") {
        errors.add("name", e);
    }
    if let Err(e) = validate_required(&req.description, "Description") {
        errors.add("description", e);
    }
    if let Err(e) = validate_required(&req.location, "Location") {
        errors.add("location", e);
    }
    let event_time = req.event_time.filter(|t| !is_zero_time(t));
    if event_time.is_none() {
        errors.add("event_time", "Event time is required");
    }

    errors.finish()?;

    match (req.name, req.description, req.location, event_time) {
        (Some(name), Some(description), Some(location), Some(event_time)) => Ok(NewEvent {
            name,
            description,
            location,
            event_time,
        }),
        _ => Err(ApiError::invalid_request("Invalid Request")),
    }
}
