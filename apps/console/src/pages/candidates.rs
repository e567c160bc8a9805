use std::path::PathBuf;
use std::sync::Arc;

use super::crud::{CrudPage, RowAction};
use super::form::{FieldValues, FormBinding};
use super::resume::ResumePanel;
use crate::api::ResourceApi;
use crate::errors::AppError;
use crate::models::{Candidate, CandidatePayload};
use crate::ui::Ui;

impl FormBinding for Candidate {
    const FIELDS: &'static [&'static str] = &["name", "email", "phone"];
    const LABEL: &'static str = "candidate";
    const PLURAL: &'static str = "candidates";
    const ADD_LABEL: &'static str = "Add Candidate";
    const DELETE_PROMPT: &'static str = "Are you sure you want to delete this candidate?";

    fn form_values(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), self.phone.clone()]
    }

    fn to_payload(values: &FieldValues) -> Result<CandidatePayload, AppError> {
        Ok(CandidatePayload {
            name: values.get("name").to_string(),
            email: values.get("email").to_string(),
            phone: values.get("phone").to_string(),
        })
    }

    fn table_cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), self.phone.clone()]
    }
}

/// Candidate table and form, plus the resume upload panel whose select
/// follows the table after every reload.
pub struct CandidatesPage {
    pub crud: CrudPage<Candidate>,
    pub resume: ResumePanel,
}

impl CandidatesPage {
    pub fn new(api: ResourceApi<Candidate>, ui: Arc<dyn Ui>) -> Self {
        Self {
            crud: CrudPage::new(api.clone(), ui.clone()),
            resume: ResumePanel::new(api, ui),
        }
    }

    pub async fn load(&mut self) -> bool {
        let loaded = self.crud.load().await;
        if loaded {
            self.resume.sync(self.crud.items()).await;
        }
        loaded
    }

    pub async fn submit(&mut self) -> bool {
        let saved = self.crud.submit().await;
        if saved {
            self.resume.sync(self.crud.items()).await;
        }
        saved
    }

    pub async fn dispatch(&mut self, id: i64, action: RowAction) -> bool {
        let reloaded = self.crud.dispatch(id, action).await;
        if reloaded {
            self.resume.sync(self.crud.items()).await;
        }
        reloaded
    }

    pub async fn select(&mut self, id: i64) {
        self.resume.select(id).await;
    }

    pub fn choose_file(&mut self, path: impl Into<PathBuf>) {
        self.resume.choose_file(path);
    }

    pub async fn upload(&mut self) -> bool {
        self.resume.upload().await
    }

    pub fn to_html(&self) -> Result<String, AppError> {
        Ok(format!("{}\n{}", self.crud.to_html()?, self.resume.to_html()?))
    }
}
