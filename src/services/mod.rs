pub mod application_service;
pub mod feedback_service;
pub mod job_service;
pub mod record_service;
pub mod saved_job_service;
pub mod shortlist_service;
