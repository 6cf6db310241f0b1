use std::sync::Arc;

use crate::domain::repositories::{StudentFilter, StudentRepository};
use crate::domain::student::{
    NewStudent, Student, StudentError, StudentId, StudentPatch, StudentResult,
};

/// Business operations on students
///
/// Wraps an injected repository; cloning is cheap and every clone shares
/// the same store handle.
#[derive(Clone)]
pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    /// Persists a new student and returns the store-assigned id
    ///
    /// Duplicates are allowed.
    pub async fn create(&self, student: NewStudent) -> StudentResult<StudentId> {
        let id = self
            .repository
            .insert(&student)
            .await
            .map_err(StudentError::Storage)?;

        tracing::info!(student_id = %id, "Created student");
        Ok(id)
    }

    /// Lists students matching the filter, in the store's natural order
    pub async fn list(&self, filter: &StudentFilter) -> StudentResult<Vec<Student>> {
        self.repository
            .find(filter)
            .await
            .map_err(StudentError::Storage)
    }

    /// Fetches a single student
    pub async fn fetch(&self, id: StudentId) -> StudentResult<Student> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(StudentError::Storage)?
            .ok_or_else(|| StudentError::NotFound(id.to_string()))
    }

    /// Applies a partial update
    ///
    /// The existing document is read first so a patched address can be
    /// merged over the stored one. The read and the write are not atomic: a
    /// document deleted in between makes the write match nothing, which is
    /// reported as `NotFound`.
    pub async fn update(&self, id: StudentId, patch: StudentPatch) -> StudentResult<()> {
        let existing = self.fetch(id).await?;
        let changes = existing.merge(patch);

        if changes.is_empty() {
            tracing::debug!(student_id = %id, "Update carried no changes");
            return Ok(());
        }

        let matched = self
            .repository
            .update(id, &changes)
            .await
            .map_err(StudentError::Storage)?;

        if !matched {
            return Err(StudentError::NotFound(id.to_string()));
        }

        tracing::info!(student_id = %id, "Updated student");
        Ok(())
    }

    /// Deletes a student
    pub async fn delete(&self, id: StudentId) -> StudentResult<()> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(StudentError::Storage)?;

        if !deleted {
            return Err(StudentError::NotFound(id.to_string()));
        }

        tracing::info!(student_id = %id, "Deleted student");
        Ok(())
    }
}
