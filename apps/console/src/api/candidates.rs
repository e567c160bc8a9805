use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use super::ResourceApi;
use crate::errors::ApiError;
use crate::models::{Candidate, UploadResponse};

impl ResourceApi<Candidate> {
    /// POST /candidates/{id}/upload_resume/ with the file in multipart field `file`.
    pub async fn upload_resume(
        &self,
        id: i64,
        file_name: &str,
        contents: Bytes,
    ) -> Result<UploadResponse, ApiError> {
        let part = Part::bytes(contents.to_vec()).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        self.http()
            .post_multipart(&format!("/candidates/{id}/upload_resume/"), form)
            .await
    }
}
