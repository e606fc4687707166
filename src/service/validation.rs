//! Request checks beyond what deserialization already enforces (types and enum values).

use crate::error::AppError;
use crate::model::{PetInput, UserInput};
use std::collections::HashSet;
use std::path::Path;

pub struct RequestValidator;

impl RequestValidator {
    /// Parse an integer id from a path segment.
    pub fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| AppError::Validation(format!("{} must be an integer, got '{}'", what, raw)))
    }

    /// Parse a required query parameter into an enumerated value.
    pub fn parse_required<T>(value: Option<&String>, name: &str) -> Result<T, AppError>
    where
        T: std::str::FromStr<Err = AppError>,
    {
        let raw = value
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation(format!("{} is required", name)))?;
        raw.parse()
    }

    /// Tag names are the natural key for find-or-create, so they must not be blank.
    pub fn validate_pet(input: &PetInput) -> Result<(), AppError> {
        if let Some(tag) = input.tags.iter().find(|t| t.name.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "tag names must not be empty (tag id {:?})",
                tag.id
            )));
        }
        Ok(())
    }

    /// Full update identifies the pet by the body id.
    pub fn require_pet_id(input: &PetInput) -> Result<i64, AppError> {
        input.id.ok_or_else(|| AppError::Validation("id is required".into()))
    }

    pub fn validate_user(input: &UserInput) -> Result<(), AppError> {
        if input.username.trim().is_empty() {
            return Err(AppError::Validation("username is required".into()));
        }
        Ok(())
    }

    /// A bulk create must contain at least one user and no username twice.
    pub fn validate_users(inputs: &[UserInput]) -> Result<(), AppError> {
        if inputs.is_empty() {
            return Err(AppError::Validation("at least one user is required".into()));
        }
        let mut seen = HashSet::new();
        for input in inputs {
            Self::validate_user(input)?;
            if !seen.insert(input.username.as_str()) {
                return Err(AppError::Validation(format!(
                    "username '{}' appears more than once",
                    input.username
                )));
            }
        }
        Ok(())
    }

    /// The declared media type must be in the `image/` category.
    pub fn validate_image_content_type(content_type: Option<&str>) -> Result<(), AppError> {
        match content_type {
            Some(ct) if ct.trim().to_ascii_lowercase().starts_with("image/") => Ok(()),
            other => Err(AppError::UploadRejected(format!(
                "the uploaded file is not an image (content type {})",
                other.unwrap_or("missing")
            ))),
        }
    }

    /// Reduce a client filename to its final path component so it cannot leave the upload directory.
    pub fn sanitize_filename(raw: Option<&str>) -> Result<String, AppError> {
        let raw = raw.unwrap_or("").replace('\\', "/");
        let name = Path::new(&raw)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::trim)
            .unwrap_or("");
        if name.is_empty() || name == "." || name == ".." {
            return Err(AppError::BadRequest("uploaded file must have a file name".into()));
        }
        Ok(name.to_string())
    }
}
