// Application services
// Orchestrate domain rules over injected repositories

pub mod student_service;

pub use student_service::StudentService;
