use super::errors::{FieldError, StudentError, StudentResult};
use super::patch::{StudentPatch, StudentUpdate};
use super::sanitizer::sanitize_text;
use super::value_objects::{validate_age, validate_name, Address, StudentId};

/// A validated, sanitized student that has not been persisted yet
///
/// # Invariants
/// - Name is non-empty after sanitization
/// - Age lies strictly between 0 and 150
/// - No field contains markup
///
/// # Example
/// ```
/// use student_records_api::domain::student::{Address, NewStudent};
///
/// let student = NewStudent::new(
///     "<script>alert(1)</script>Jane",
///     22,
///     Address::new("Lima", "Peru"),
/// )
/// .expect("valid student");
///
/// assert_eq!(student.name(), "Jane");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    name: String,
    age: i32,
    address: Address,
}

impl NewStudent {
    /// Sanitizes and validates the input
    ///
    /// # Returns
    /// * `Ok(NewStudent)` - If every constraint holds
    /// * `Err(StudentError::Validation)` - With one entry per violated field
    pub fn new(name: &str, age: i64, address: Address) -> StudentResult<Self> {
        let name = sanitize_text(name);
        let address = address.sanitized();

        let mut errors: Vec<FieldError> = Vec::new();
        if let Err(e) = validate_name(&name) {
            errors.push(e);
        }
        let age = match validate_age(age) {
            Ok(age) => age,
            Err(e) => {
                errors.push(e);
                0
            }
        };

        if !errors.is_empty() {
            return Err(StudentError::Validation(errors));
        }

        Ok(Self { name, age, address })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}

/// A persisted student document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: String,
    age: i32,
    address: Address,
}

impl Student {
    /// Reconstitutes a student from persisted data
    ///
    /// Used by repositories; performs no validation.
    pub fn from_persistence(id: StudentId, name: String, age: i32, address: Address) -> Self {
        Self {
            id,
            name,
            age,
            address,
        }
    }

    /// Attaches the store-assigned id to a new student
    pub fn from_new(id: StudentId, student: NewStudent) -> Self {
        Self {
            id,
            name: student.name,
            age: student.age,
            address: student.address,
        }
    }

    /// Computes the changes a patch makes to this student
    ///
    /// Only fields carried by the patch are part of the result. A patched
    /// address is merged key-wise over the current one and sanitized; when
    /// the merged address ends up blank it is left out of the changes.
    pub fn merge(&self, patch: StudentPatch) -> StudentUpdate {
        let address = patch.address.and_then(|partial| {
            let merged = Address {
                city: partial.city.unwrap_or_else(|| self.address.city.clone()),
                country: partial.country.unwrap_or_else(|| self.address.country.clone()),
            }
            .sanitized();
            (!merged.is_blank()).then_some(merged)
        });

        StudentUpdate {
            name: patch.name,
            age: patch.age,
            address,
        }
    }

    /// Applies previously computed changes
    pub fn apply(&mut self, update: &StudentUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(address) = &update.address {
            self.address = address.clone();
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}
