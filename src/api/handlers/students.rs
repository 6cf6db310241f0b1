use axum::{extract::State, http::StatusCode, Json};

use crate::api::errors::ApiError;
use crate::api::extractors::{JsonBody, QueryParams, StudentIdPath};
use crate::api::schemas::{
    CreateStudentSchema, CreatedResponse, DetailResponse, ListStudentsQuery,
    ListStudentsResponse, StudentListItem, StudentResponse, UpdateStudentSchema,
};
use crate::services::StudentService;

/// Create a new student
///
/// POST /students/
pub async fn create_student(
    State(service): State<StudentService>,
    JsonBody(body): JsonBody<CreateStudentSchema>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let student = body.into_new_student()?;
    let id = service.create(student).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}

/// List students, optionally filtered by country and minimum age
///
/// GET /students/?country=..&age=..
pub async fn list_students(
    State(service): State<StudentService>,
    QueryParams(query): QueryParams<ListStudentsQuery>,
) -> Result<Json<ListStudentsResponse>, ApiError> {
    let students = service.list(&query.into()).await?;
    let data = students.iter().map(StudentListItem::from).collect();

    Ok(Json(ListStudentsResponse { data }))
}

/// Get a student by ID
///
/// GET /students/:id
pub async fn fetch_student(
    State(service): State<StudentService>,
    StudentIdPath(id): StudentIdPath,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = service.fetch(id).await?;

    Ok(Json(StudentResponse::from(&student)))
}

/// Partially update a student
///
/// PATCH /students/:id
pub async fn update_student(
    State(service): State<StudentService>,
    StudentIdPath(id): StudentIdPath,
    JsonBody(body): JsonBody<UpdateStudentSchema>,
) -> Result<StatusCode, ApiError> {
    let patch = body.into_patch()?;
    service.update(id, patch).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a student
///
/// DELETE /students/:id
pub async fn delete_student(
    State(service): State<StudentService>,
    StudentIdPath(id): StudentIdPath,
) -> Result<Json<DetailResponse>, ApiError> {
    service.delete(id).await?;

    Ok(Json(DetailResponse {
        detail: "Student deleted successfully",
    }))
}
