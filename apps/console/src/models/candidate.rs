use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Server-relative path, set only after a successful upload.
    #[serde(default)]
    pub resume_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePayload {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Resource for Candidate {
    const COLLECTION: &'static str = "candidates";
    type Payload = CandidatePayload;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body returned by `POST /candidates/{id}/upload_resume/`.
///
/// Deployed backends disagree on the key naming the stored file, so all
/// three known spellings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub resume_path: Option<String>,
}

impl UploadResponse {
    pub fn stored_path(&self) -> Option<&str> {
        self.resume_url
            .as_deref()
            .or(self.file_path.as_deref())
            .or(self.resume_path.as_deref())
    }
}
