use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A user-facing message the SPA shows as a toast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub seq: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct FeedbackQueue {
    last_seq: u64,
    notices: VecDeque<Notice>,
}

/// Bounded queue of notices. Posting never fails and never blocks on a
/// reader; once full, the oldest notice is dropped.
#[derive(Clone)]
pub struct FeedbackService {
    queue: Arc<Mutex<FeedbackQueue>>,
    capacity: usize,
}

impl FeedbackService {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(FeedbackQueue::default())),
            capacity: capacity.max(1),
        }
    }

    fn queue(&self) -> MutexGuard<'_, FeedbackQueue> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn success(&self, message: impl Into<String>) {
        self.post(NoticeLevel::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.post(NoticeLevel::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.post(NoticeLevel::Error, message.into());
    }

    fn post(&self, level: NoticeLevel, message: String) {
        tracing::debug!(?level, "notice: {}", message);
        let mut queue = self.queue();
        queue.last_seq += 1;
        let notice = Notice {
            seq: queue.last_seq,
            level,
            message,
            created_at: Utc::now(),
        };
        queue.notices.push_back(notice);
        while queue.notices.len() > self.capacity {
            queue.notices.pop_front();
        }
    }

    /// Notices posted after sequence number `after`, oldest first.
    pub fn since(&self, after: u64) -> Vec<Notice> {
        self.queue()
            .notices
            .iter()
            .filter(|n| n.seq > after)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_returns_only_newer_notices() {
        let feedback = FeedbackService::new(10);
        feedback.success("Job posted successfully");
        feedback.error("Failed to delete job");
        feedback.info("Job already saved");

        let all = feedback.since(0);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].level, NoticeLevel::Success);

        let newer = feedback.since(all[1].seq);
        assert_eq!(newer.len(), 1);
        assert_eq!(newer[0].message, "Job already saved");
    }

    #[test]
    fn oldest_notices_are_dropped_at_capacity() {
        let feedback = FeedbackService::new(2);
        for n in 0..5 {
            feedback.error(format!("failure {}", n));
        }
        let kept: Vec<String> = feedback.since(0).into_iter().map(|n| n.message).collect();
        assert_eq!(kept, vec!["failure 3", "failure 4"]);
    }

    #[test]
    fn levels_serialize_lowercase() {
        let value = serde_json::to_value(NoticeLevel::Success).unwrap();
        assert_eq!(value, serde_json::json!("success"));
    }
}
