//! Student Records API Library
//!
//! This library provides the core functionality for the student records API,
//! including domain logic, repositories, services and the HTTP layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
