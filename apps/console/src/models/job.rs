use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPayload {
    pub title: String,
    pub description: String,
    pub location: String,
}

impl Resource for Job {
    const COLLECTION: &'static str = "jobs";
    type Payload = JobPayload;

    fn id(&self) -> i64 {
        self.id
    }
}
