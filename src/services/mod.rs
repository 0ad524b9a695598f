pub mod account_service;
pub mod application_service;
pub mod authorization;
pub mod job_service;
pub mod resume_storage;
