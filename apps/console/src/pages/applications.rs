use std::sync::Arc;

use askama::Template;
use tracing::error;

use super::crud::{CrudPage, RowAction};
use super::form::{FieldValues, FormBinding};
use crate::api::Api;
use crate::errors::AppError;
use crate::models::{Application, ApplicationPayload};
use crate::render::{self, ApplicationsView};
use crate::ui::Ui;

impl FormBinding for Application {
    const FIELDS: &'static [&'static str] = &["candidate_id", "job_id"];
    const LABEL: &'static str = "application";
    const PLURAL: &'static str = "applications";
    const ADD_LABEL: &'static str = "Add Application";
    const DELETE_PROMPT: &'static str = "Delete this application?";

    fn form_values(&self) -> Vec<String> {
        vec![
            self.candidate_id().map(|id| id.to_string()).unwrap_or_default(),
            self.job_id().map(|id| id.to_string()).unwrap_or_default(),
        ]
    }

    fn to_payload(values: &FieldValues) -> Result<ApplicationPayload, AppError> {
        Ok(ApplicationPayload {
            candidate_id: parse_id(values, "candidate_id")?,
            job_id: parse_id(values, "job_id")?,
        })
    }

    fn table_cells(&self) -> Vec<String> {
        vec![self.candidate_name(), self.job_title()]
    }
}

fn parse_id(values: &FieldValues, field: &str) -> Result<i64, AppError> {
    values
        .get(field)
        .parse()
        .map_err(|_| AppError::Validation(format!("{field} must be a numeric id.")))
}

fn option_label(options: &[(i64, String)], id: Option<i64>) -> Option<String> {
    let id = id?;
    options
        .iter()
        .find(|(value, _)| *value == id)
        .map(|(_, label)| label.clone())
}

/// Application table and form. The form picks a candidate and a job from
/// selects filled alongside the list.
pub struct ApplicationsPage {
    pub crud: CrudPage<Application>,
    api: Api,
    candidate_options: Vec<(i64, String)>,
    job_options: Vec<(i64, String)>,
}

impl ApplicationsPage {
    pub fn new(api: Api, ui: Arc<dyn Ui>) -> Self {
        Self {
            crud: CrudPage::new(api.applications.clone(), ui),
            api,
            candidate_options: Vec::new(),
            job_options: Vec::new(),
        }
    }

    pub fn candidate_options(&self) -> &[(i64, String)] {
        &self.candidate_options
    }

    pub fn job_options(&self) -> &[(i64, String)] {
        &self.job_options
    }

    pub async fn load(&mut self) -> bool {
        self.load_options().await;
        self.crud.load().await
    }

    pub async fn submit(&mut self) -> bool {
        let saved = self.crud.submit().await;
        if saved {
            self.default_selections();
        }
        saved
    }

    pub async fn dispatch(&mut self, id: i64, action: RowAction) -> bool {
        let reloaded = self.crud.dispatch(id, action).await;
        self.default_selections();
        reloaded
    }

    pub fn cancel(&mut self) {
        self.crud.cancel();
        self.default_selections();
    }

    /// Select contents are a convenience; failures are logged and leave the
    /// previous options in place.
    async fn load_options(&mut self) {
        let (candidates, jobs) = tokio::join!(self.api.candidates.list(), self.api.jobs.list());

        match candidates {
            Ok(candidates) => {
                self.candidate_options = candidates.into_iter().map(|c| (c.id, c.name)).collect();
            }
            Err(e) => error!("Error loading candidates: {e}"),
        }
        match jobs {
            Ok(jobs) => {
                self.job_options = jobs.into_iter().map(|j| (j.id, j.title)).collect();
            }
            Err(e) => error!("Error loading jobs: {e}"),
        }
        self.default_selections();
    }

    /// Empty selects fall back to their first option.
    fn default_selections(&mut self) {
        if self.crud.form().value("candidate_id") == Some("") {
            if let Some((id, _)) = self.candidate_options.first() {
                self.crud.set_field("candidate_id", id.to_string());
            }
        }
        if self.crud.form().value("job_id") == Some("") {
            if let Some((id, _)) = self.job_options.first() {
                self.crud.set_field("job_id", id.to_string());
            }
        }
    }

    /// Lists carry bare ids, so names come from the nested record when
    /// present, then from the select options, then `#<id>`.
    fn row_cells(&self, application: &Application) -> Vec<String> {
        let candidate = application
            .candidate
            .as_ref()
            .map(|c| c.name.clone())
            .or_else(|| option_label(&self.candidate_options, application.candidate_id()))
            .unwrap_or_else(|| application.candidate_name());
        let job = application
            .job
            .as_ref()
            .map(|j| j.title.clone())
            .or_else(|| option_label(&self.job_options, application.job_id()))
            .unwrap_or_else(|| application.job_title());
        vec![candidate, job]
    }

    pub fn to_html(&self) -> Result<String, AppError> {
        let selected = |field: &str| {
            self.crud
                .form()
                .value(field)
                .and_then(|v| v.parse::<i64>().ok())
        };
        let view = ApplicationsView {
            candidates: &render::select_options(self.candidate_options(), selected("candidate_id"))?,
            jobs: &render::select_options(self.job_options(), selected("job_id"))?,
            crud: &self.crud.to_html_with(|a| self.row_cells(a))?,
        };
        Ok(view.render()?)
    }
}
