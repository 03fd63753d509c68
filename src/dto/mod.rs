pub mod application_dto;
pub mod job_dto;
pub mod saved_job_dto;
pub mod shortlist_dto;
