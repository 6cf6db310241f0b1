//! Request and response bodies of the student routes.

use serde::{Deserialize, Serialize};

use crate::domain::repositories::StudentFilter;
use crate::domain::student::{
    Address, AddressPatch, NewStudent, PatchField, Student, StudentPatch, StudentResult,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressSchema {
    pub city: String,
    pub country: String,
}

impl From<&Address> for AddressSchema {
    fn from(address: &Address) -> Self {
        Self {
            city: address.city.clone(),
            country: address.country.clone(),
        }
    }
}

/// Request body for creating a student
#[derive(Debug, Deserialize)]
pub struct CreateStudentSchema {
    pub name: String,
    pub age: i64,
    pub address: AddressSchema,
}

impl CreateStudentSchema {
    /// Sanitizes and range-checks the body
    pub fn into_new_student(self) -> StudentResult<NewStudent> {
        NewStudent::new(
            &self.name,
            self.age,
            Address::new(self.address.city, self.address.country),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialAddressSchema {
    #[serde(default)]
    pub city: PatchField<String>,
    #[serde(default)]
    pub country: PatchField<String>,
}

/// Request body for a partial update
///
/// Every field is optional; `null` values are dropped. Unknown keys are
/// ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentSchema {
    #[serde(default)]
    pub name: PatchField<String>,
    #[serde(default)]
    pub age: PatchField<i64>,
    #[serde(default)]
    pub address: PatchField<PartialAddressSchema>,
}

impl UpdateStudentSchema {
    /// Drops null values and validates what remains
    pub fn into_patch(self) -> StudentResult<StudentPatch> {
        let address = self.address.into_value().map(|address| AddressPatch {
            city: address.city.into_value(),
            country: address.country.into_value(),
        });
        StudentPatch::new(self.name.into_value(), self.age.into_value(), address)
    }
}

/// Query parameters of the list route
#[derive(Debug, Default, Deserialize)]
pub struct ListStudentsQuery {
    pub country: Option<String>,
    pub age: Option<i64>,
}

impl From<ListStudentsQuery> for StudentFilter {
    fn from(query: ListStudentsQuery) -> Self {
        Self {
            country: query.country.filter(|country| !country.is_empty()),
            min_age: query.age,
        }
    }
}

/// Response from student creation
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Full student projection
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub name: String,
    pub age: i32,
    pub address: AddressSchema,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name().to_string(),
            age: student.age(),
            address: AddressSchema::from(student.address()),
        }
    }
}

/// Student projection used in lists (address omitted)
#[derive(Debug, Serialize)]
pub struct StudentListItem {
    pub name: String,
    pub age: i32,
}

impl From<&Student> for StudentListItem {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name().to_string(),
            age: student.age(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListStudentsResponse {
    pub data: Vec<StudentListItem>,
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::StudentError;

    #[test]
    fn update_schema_drops_nulls() {
        let body: UpdateStudentSchema = serde_json::from_str(
            r#"{"name": null, "age": 30, "address": {"city": "Cusco", "country": null}}"#,
        )
        .unwrap();
        let patch = body.into_patch().unwrap();

        assert_eq!(patch.name, None);
        assert_eq!(patch.age, Some(30));
        assert_eq!(
            patch.address,
            Some(AddressPatch {
                city: Some("Cusco".to_string()),
                country: None,
            })
        );
    }

    #[test]
    fn update_schema_ignores_unknown_keys() {
        let body: UpdateStudentSchema =
            serde_json::from_str(r#"{"grade": "A", "age": 19}"#).unwrap();
        assert_eq!(body.into_patch().unwrap().age, Some(19));
    }

    #[test]
    fn update_schema_rejects_out_of_range_age() {
        let body: UpdateStudentSchema = serde_json::from_str(r#"{"age": 150}"#).unwrap();
        assert!(matches!(
            body.into_patch(),
            Err(StudentError::Validation(_))
        ));
    }

    #[test]
    fn create_schema_requires_address() {
        assert!(serde_json::from_str::<CreateStudentSchema>(r#"{"name": "A", "age": 3}"#).is_err());
    }

    #[test]
    fn empty_country_query_is_ignored() {
        let filter = StudentFilter::from(ListStudentsQuery {
            country: Some(String::new()),
            age: Some(18),
        });
        assert_eq!(filter.country, None);
        assert_eq!(filter.min_age, Some(18));
    }
}
