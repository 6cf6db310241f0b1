// Infrastructure layer module
// Document store adapters for the domain repository ports

pub mod repositories;
