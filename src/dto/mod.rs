pub mod account_dto;
pub mod job_dto;
