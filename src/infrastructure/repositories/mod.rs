// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_student_repository;
pub mod mongo_student_repository;

pub use in_memory_student_repository::InMemoryStudentRepository;
pub use mongo_student_repository::MongoStudentRepository;
