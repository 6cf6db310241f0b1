use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{FieldError, StudentError};
use super::sanitizer::sanitize_text;

/// Store-assigned identifier of a student document
///
/// # Invariants
/// - Always a well-formed 12 byte ObjectId (24 hex characters on the wire)
/// - Is immutable after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId(ObjectId);

impl StudentId {
    /// Generates a fresh identifier
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parses an identifier received from a client
    ///
    /// # Returns
    /// * `Ok(StudentId)` - If `raw` is a valid ObjectId hex string
    /// * `Err(StudentError::InvalidIdentifier)` - Otherwise
    ///
    /// # Example
    /// ```
    /// use student_records_api::domain::student::StudentId;
    ///
    /// assert!(StudentId::parse("65f1c0a2b3d4e5f607182930").is_ok());
    /// assert!(StudentId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, StudentError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| StudentError::InvalidIdentifier(raw.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for StudentId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Postal address of a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub country: String,
}

impl Address {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }

    /// Returns a copy with markup stripped from every sub-field
    pub fn sanitized(&self) -> Self {
        Self {
            city: sanitize_text(&self.city),
            country: sanitize_text(&self.country),
        }
    }

    /// True when no sub-field carries any content
    pub fn is_blank(&self) -> bool {
        self.city.is_empty() && self.country.is_empty()
    }
}

/// Exclusive bounds on a student's age
pub const MIN_AGE_EXCLUSIVE: i64 = 0;
pub const MAX_AGE_EXCLUSIVE: i64 = 150;

/// Validates an age, which must lie strictly between 0 and 150
pub fn validate_age(age: i64) -> Result<i32, FieldError> {
    if age <= MIN_AGE_EXCLUSIVE {
        return Err(FieldError::new(
            "age",
            format!("Input should be greater than {}", MIN_AGE_EXCLUSIVE),
            "greater_than",
        ));
    }
    if age >= MAX_AGE_EXCLUSIVE {
        return Err(FieldError::new(
            "age",
            format!("Input should be less than {}", MAX_AGE_EXCLUSIVE),
            "less_than",
        ));
    }
    // Bounded by the checks above.
    Ok(age as i32)
}

/// Validates a sanitized name, which must not be empty
pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::new(
            "name",
            "Name cannot be empty",
            "string_too_short",
        ));
    }
    Ok(())
}
