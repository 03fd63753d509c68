use crate::error::Result;
use crate::models::application::Application;
use crate::services::record_service::RecordService;

pub type ApplicationService = RecordService<Application>;

impl RecordService<Application> {
    /// Applications submitted for `job_id`, newest first.
    pub async fn list_by_job(&self, job_id: i64) -> Result<Vec<Application>> {
        self.list_where("job_id_c", job_id).await
    }
}
