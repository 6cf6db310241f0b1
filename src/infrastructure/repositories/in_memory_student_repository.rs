use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::repositories::{StudentFilter, StudentRepository};
use crate::domain::student::{NewStudent, Student, StudentId, StudentUpdate};

/// In-memory implementation of StudentRepository
///
/// Keeps students in insertion order behind an async read-write lock.
/// Clones share the same underlying data. Intended for tests and local
/// runs without a database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStudentRepository {
    students: Arc<RwLock<Vec<Student>>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn insert(&self, student: &NewStudent) -> Result<StudentId, String> {
        let id = StudentId::generate();
        self.students
            .write()
            .await
            .push(Student::from_new(id, student.clone()));
        Ok(id)
    }

    async fn find(&self, filter: &StudentFilter) -> Result<Vec<Student>, String> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .filter(|student| filter.matches(student))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, String> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .find(|student| student.id() == id)
            .cloned())
    }

    async fn update(&self, id: StudentId, changes: &StudentUpdate) -> Result<bool, String> {
        let mut students = self.students.write().await;
        match students.iter_mut().find(|student| student.id() == id) {
            Some(student) => {
                student.apply(changes);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: StudentId) -> Result<bool, String> {
        let mut students = self.students.write().await;
        let before = students.len();
        students.retain(|student| student.id() != id);
        Ok(students.len() < before)
    }
}
