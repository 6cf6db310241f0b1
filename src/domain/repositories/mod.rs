// Repository interfaces (ports)
// Implementations live in the infrastructure layer

pub mod student_repository;

pub use student_repository::{StudentFilter, StudentRepository};
