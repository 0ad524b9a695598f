pub mod account;
pub mod application;
pub mod job;
pub mod user_profile;
