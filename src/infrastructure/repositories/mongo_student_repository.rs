use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use crate::domain::repositories::{StudentFilter, StudentRepository};
use crate::domain::student::{Address, NewStudent, Student, StudentId, StudentUpdate};

/// Name of the collection holding student documents
pub const STUDENTS_COLLECTION: &str = "students";

/// Shape of a student document in MongoDB
#[derive(Debug, Serialize, Deserialize)]
struct StudentDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    age: i32,
    address: Address,
}

impl StudentDocument {
    fn into_student(self) -> Result<Student, String> {
        let id = self
            .id
            .ok_or_else(|| "Student document without _id".to_string())?;
        Ok(Student::from_persistence(
            id.into(),
            self.name,
            self.age,
            self.address,
        ))
    }
}

/// MongoDB implementation of StudentRepository
///
/// Holds a single collection handle; the driver pools connections internally
/// so one instance is shared by every request.
#[derive(Clone)]
pub struct MongoStudentRepository {
    collection: Collection<StudentDocument>,
}

impl MongoStudentRepository {
    /// Creates a repository on an already connected client
    ///
    /// # Arguments
    /// * `client` - MongoDB client
    /// * `database` - Name of the database holding the `students` collection
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            collection: client.database(database).collection(STUDENTS_COLLECTION),
        }
    }

    /// Connects to MongoDB and verifies the server answers a `ping`
    pub async fn connect(uri: &str, database: &str) -> Result<Self, String> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| format!("Failed to create MongoDB client: {}", e))?;

        client
            .database(database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| format!("Failed to connect to MongoDB: {}", e))?;

        Ok(Self::new(&client, database))
    }
}

/// Translates a list filter into a MongoDB query document
fn filter_document(filter: &StudentFilter) -> Document {
    let mut query = Document::new();
    if let Some(country) = &filter.country {
        query.insert("address.country", country.as_str());
    }
    if let Some(min_age) = filter.min_age {
        query.insert("age", doc! { "$gte": min_age });
    }
    query
}

/// Translates changes into the body of a `$set` operator
fn set_document(changes: &StudentUpdate) -> Document {
    let mut set = Document::new();
    if let Some(name) = &changes.name {
        set.insert("name", name.as_str());
    }
    if let Some(age) = changes.age {
        set.insert("age", age);
    }
    if let Some(address) = &changes.address {
        set.insert(
            "address",
            doc! { "city": address.city.as_str(), "country": address.country.as_str() },
        );
    }
    set
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn insert(&self, student: &NewStudent) -> Result<StudentId, String> {
        let document = StudentDocument {
            id: None,
            name: student.name().to_string(),
            age: student.age(),
            address: student.address().clone(),
        };

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|e| format!("Failed to insert student: {}", e))?;

        result
            .inserted_id
            .as_object_id()
            .map(StudentId::from)
            .ok_or_else(|| format!("Unexpected inserted id: {}", result.inserted_id))
    }

    async fn find(&self, filter: &StudentFilter) -> Result<Vec<Student>, String> {
        let documents: Vec<StudentDocument> = self
            .collection
            .find(filter_document(filter))
            .await
            .map_err(|e| format!("Failed to list students: {}", e))?
            .try_collect()
            .await
            .map_err(|e| format!("Failed to read students: {}", e))?;

        documents
            .into_iter()
            .map(StudentDocument::into_student)
            .collect()
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, String> {
        self.collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(|e| format!("Failed to find student by id: {}", e))?
            .map(StudentDocument::into_student)
            .transpose()
    }

    async fn update(&self, id: StudentId, changes: &StudentUpdate) -> Result<bool, String> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.as_object_id() },
                doc! { "$set": set_document(changes) },
            )
            .await
            .map_err(|e| format!("Failed to update student: {}", e))?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: StudentId) -> Result<bool, String> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(|e| format!("Failed to delete student: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(filter_document(&StudentFilter::default()), doc! {});
    }

    #[test]
    fn filter_uses_nested_country_and_gte_age() {
        let filter = StudentFilter {
            country: Some("USA".to_string()),
            min_age: Some(18),
        };
        assert_eq!(
            filter_document(&filter),
            doc! { "address.country": "USA", "age": { "$gte": 18_i64 } }
        );
    }

    #[test]
    fn set_document_contains_only_changed_fields() {
        let changes = StudentUpdate {
            name: None,
            age: Some(30),
            address: Some(Address::new("Lima", "Peru")),
        };
        assert_eq!(
            set_document(&changes),
            doc! { "age": 30, "address": { "city": "Lima", "country": "Peru" } }
        );
    }
}
