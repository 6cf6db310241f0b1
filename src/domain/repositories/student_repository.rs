use async_trait::async_trait;

use crate::domain::student::{NewStudent, Student, StudentId, StudentUpdate};

/// Optional criteria for listing students
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Exact match on `address.country`
    pub country: Option<String>,
    /// Inclusive lower bound on `age`
    pub min_age: Option<i64>,
}

impl StudentFilter {
    /// Checks a student against the filter
    pub fn matches(&self, student: &Student) -> bool {
        let country_ok = self
            .country
            .as_deref()
            .map_or(true, |country| student.address().country == country);
        let age_ok = self
            .min_age
            .map_or(true, |min| i64::from(student.age()) >= min);
        country_ok && age_ok
    }
}

/// Repository trait for Student documents
///
/// Defines the contract for persisting and retrieving students.
/// Implementations should handle database-specific details.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a new student; the store assigns the id
    async fn insert(&self, student: &NewStudent) -> Result<StudentId, String>;

    /// Find all students matching the filter, in the store's natural order
    async fn find(&self, filter: &StudentFilter) -> Result<Vec<Student>, String>;

    /// Find a student by its ID
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, String>;

    /// Write the given changes; returns false when no document matched
    async fn update(&self, id: StudentId, changes: &StudentUpdate) -> Result<bool, String>;

    /// Delete a student by ID; returns false when nothing was deleted
    async fn delete(&self, id: StudentId) -> Result<bool, String>;
}
