//! Persistence seams, one trait per entity with a PostgreSQL implementation.

pub mod account_repository;
pub mod application_repository;
pub mod job_repository;
pub mod profile_repository;

pub use account_repository::{AccountRepository, PgAccountRepository};
pub use application_repository::{ApplicationRepository, PgApplicationRepository};
pub use job_repository::{JobRepository, PgJobRepository};
pub use profile_repository::{PgProfileRepository, ProfileRepository};
