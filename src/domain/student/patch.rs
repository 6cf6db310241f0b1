use serde::{Deserialize, Deserializer};

use super::errors::{FieldError, StudentError, StudentResult};
use super::sanitizer::sanitize_text;
use super::value_objects::{validate_age, validate_name, Address};

/// State of a single field in a partial update body
///
/// A missing key and a key explicitly set to `null` are kept apart so the
/// null policy is applied deliberately rather than by accident of
/// deserialization. Use with `#[serde(default)]` so a missing key becomes
/// [`PatchField::Absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchField<T> {
    /// Key not present in the body
    Absent,
    /// Key present with a `null` value
    Null,
    /// Key present with a value
    Set(T),
}

impl<T> PatchField<T> {
    /// Applies the omit-nulls policy: only a set value survives
    pub fn into_value(self) -> Option<T> {
        match self {
            PatchField::Set(value) => Some(value),
            PatchField::Absent | PatchField::Null => None,
        }
    }
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Absent
    }
}

impl<'de, T> Deserialize<'de> for PatchField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => PatchField::Set(value),
            None => PatchField::Null,
        })
    }
}

/// Address sub-fields supplied by a patch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressPatch {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Validated partial update of a student
///
/// `None` means "leave unchanged". The name is already sanitized; address
/// sub-fields are sanitized once merged over the stored address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<AddressPatch>,
}

impl StudentPatch {
    /// Validates the supplied fields
    ///
    /// # Business Rules Enforced
    /// - A supplied name must be non-empty once sanitized
    /// - A supplied age must lie strictly between 0 and 150
    pub fn new(
        name: Option<String>,
        age: Option<i64>,
        address: Option<AddressPatch>,
    ) -> StudentResult<Self> {
        let mut errors: Vec<FieldError> = Vec::new();

        let name = name.map(|raw| sanitize_text(&raw));
        if let Some(name) = &name {
            if let Err(e) = validate_name(name) {
                errors.push(e);
            }
        }

        let age = match age.map(validate_age).transpose() {
            Ok(age) => age,
            Err(e) => {
                errors.push(e);
                None
            }
        };

        if !errors.is_empty() {
            return Err(StudentError::Validation(errors));
        }

        Ok(Self { name, age, address })
    }
}

/// Field values to write for an update, produced by [`super::Student::merge`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<Address>,
}

impl StudentUpdate {
    /// True when the update would not change anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.address.is_none()
    }
}
