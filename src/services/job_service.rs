use crate::models::job::Job;
use crate::services::record_service::RecordService;

pub type JobService = RecordService<Job>;
