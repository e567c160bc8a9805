//! Resume upload panel on the candidates page.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use askama::Template;
use bytes::Bytes;
use tracing::{debug, error};

use crate::api::ResourceApi;
use crate::errors::AppError;
use crate::models::Candidate;
use crate::render::{self, ResumePanelView};
use crate::ui::Ui;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
const UPLOAD_LABEL: &str = "Upload Resume";
const UPLOADING_LABEL: &str = "Uploading...";

pub struct ResumePanel {
    api: ResourceApi<Candidate>,
    ui: Arc<dyn Ui>,
    options: Vec<(i64, String)>,
    selected: Option<i64>,
    file: Option<PathBuf>,
    button_label: &'static str,
    button_disabled: bool,
    link_href: Option<String>,
}

impl ResumePanel {
    pub fn new(api: ResourceApi<Candidate>, ui: Arc<dyn Ui>) -> Self {
        Self {
            api,
            ui,
            options: Vec::new(),
            selected: None,
            file: None,
            button_label: UPLOAD_LABEL,
            button_disabled: false,
            link_href: None,
        }
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn link_href(&self) -> Option<&str> {
        self.link_href.as_deref()
    }

    pub fn button(&self) -> (&'static str, bool) {
        (self.button_label, self.button_disabled)
    }

    /// Rebuilds the candidate select from a fresh list. Keeps the current
    /// selection if it is still listed, otherwise selects the first entry.
    pub async fn sync(&mut self, candidates: &[Candidate]) {
        self.options = candidates
            .iter()
            .map(|c| (c.id, format!("{} ({})", c.name, c.email)))
            .collect();

        let still_listed = self
            .selected
            .is_some_and(|id| self.options.iter().any(|(o, _)| *o == id));
        if !still_listed {
            self.selected = self.options.first().map(|(id, _)| *id);
        }

        match self.selected {
            Some(_) => self.refresh_link().await,
            None => self.link_href = None,
        }
    }

    /// Selection change. Unknown ids are refused.
    pub async fn select(&mut self, id: i64) {
        if !self.options.iter().any(|(o, _)| *o == id) {
            self.ui
                .alert(&format!("No candidate with id {id} is listed."))
                .await;
            return;
        }
        self.selected = Some(id);
        self.refresh_link().await;
    }

    pub fn choose_file(&mut self, path: impl Into<PathBuf>) {
        self.file = Some(path.into());
    }

    /// Re-reads the selected candidate and points the link at its stored
    /// resume. Failures are logged only.
    pub async fn refresh_link(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        match self.api.get_by_id(id).await {
            Ok(candidate) => {
                self.link_href = candidate
                    .resume_path
                    .as_deref()
                    .map(|path| self.api.http().resolve(path));
            }
            Err(e) => error!("Failed to load candidate details: {e}"),
        }
    }

    /// Uploads the chosen file for the selected candidate.
    ///
    /// Missing selection or file fails locally. An unrecognised extension
    /// asks for confirmation first. The button is disabled while the request
    /// runs and restored afterwards whatever the outcome.
    pub async fn upload(&mut self) -> bool {
        let Some(id) = self.selected else {
            self.ui.alert("Please select a candidate first.").await;
            return false;
        };
        let Some(path) = self.file.clone() else {
            self.ui.alert("Please choose a file to upload.").await;
            return false;
        };

        if !has_allowed_extension(&path)
            && !self
                .ui
                .confirm("File type not recognized. Continue upload?")
                .await
        {
            return false;
        }

        self.button_disabled = true;
        self.button_label = UPLOADING_LABEL;

        let result = self.send(id, &path).await;

        let uploaded = match result {
            Ok(message) => {
                self.refresh_link().await;
                self.ui.alert(&message).await;
                self.file = None;
                true
            }
            Err(e) => {
                error!("Upload error: {e}");
                self.ui.alert(&format!("Upload failed: {e}")).await;
                false
            }
        };

        self.button_disabled = false;
        self.button_label = UPLOAD_LABEL;
        uploaded
    }

    async fn send(&self, id: i64, path: &Path) -> Result<String, AppError> {
        let contents = Bytes::from(tokio::fs::read(path).await?);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());

        let response = self.api.upload_resume(id, &file_name, contents).await?;
        debug!(
            "Stored resume for candidate {id} at {:?}",
            response.stored_path()
        );
        Ok(response
            .message
            .unwrap_or_else(|| "Resume uploaded successfully".to_string()))
    }

    pub fn to_html(&self) -> Result<String, AppError> {
        let (label, disabled) = self.button();
        let file = self
            .file()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let view = ResumePanelView {
            options: &render::select_options(&self.options, self.selected)?,
            link: &render::resume_link(self.link_href())?,
            file: &file,
            label,
            disabled,
        };
        Ok(view.render()?)
    }
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}
