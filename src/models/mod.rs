pub mod application;
pub mod entity;
pub mod job;
pub mod reference;
pub mod saved_job;
pub mod shortlist;
