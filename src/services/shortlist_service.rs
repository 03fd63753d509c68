use crate::error::Result;
use crate::models::shortlist::ShortlistRequest;
use crate::services::record_service::RecordService;

pub type ShortlistService = RecordService<ShortlistRequest>;

impl RecordService<ShortlistRequest> {
    pub async fn list_by_employer(&self, employer_id: &str) -> Result<Vec<ShortlistRequest>> {
        self.list_where("employer_id_c", employer_id).await
    }
}
