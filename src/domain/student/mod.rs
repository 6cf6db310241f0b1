// Student domain module
// Contains the student aggregate, value objects, patch types and sanitization

#![allow(clippy::module_inception)]

pub mod errors;
pub mod patch;
pub mod sanitizer;
pub mod student;
pub mod value_objects;

// Re-export main types for convenience
pub use errors::{FieldError, StudentError, StudentResult};
pub use patch::{AddressPatch, PatchField, StudentPatch, StudentUpdate};
pub use student::{NewStudent, Student};
pub use value_objects::{Address, StudentId};
