pub mod root;
pub mod students;
