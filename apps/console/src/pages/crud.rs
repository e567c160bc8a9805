//! Generic list/edit/delete page, shared by candidates, jobs and applications.
//!
//! State lives in the page value: the form is either creating or editing one
//! id. Every successful write re-fetches the list from the backend; nothing
//! shown in the table is ever patched locally.

use std::sync::Arc;

use askama::Template;
use tracing::error;

use super::form::{FormBinding, FormMode, FormState};
use crate::api::ResourceApi;
use crate::errors::AppError;
use crate::render::{self, CrudView};
use crate::ui::Ui;

/// A rendered row, registered under its record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBinding {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

pub struct CrudPage<R: FormBinding> {
    api: ResourceApi<R>,
    ui: Arc<dyn Ui>,
    form: FormState,
    items: Vec<R>,
    rows: Vec<RowBinding>,
}

impl<R: FormBinding> CrudPage<R> {
    pub fn new(api: ResourceApi<R>, ui: Arc<dyn Ui>) -> Self {
        Self {
            api,
            ui,
            form: FormState::new(R::FIELDS, R::ADD_LABEL),
            items: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[RowBinding] {
        &self.rows
    }

    #[cfg(test)]
    pub fn table_body(&self) -> Result<String, AppError> {
        self.table_body_with(R::table_cells)
    }

    /// Table rows with the text cells produced by `cells` instead of
    /// `FormBinding::table_cells`.
    pub fn table_body_with<F>(&self, cells: F) -> Result<String, AppError>
    where
        F: Fn(&R) -> Vec<String>,
    {
        self.items
            .iter()
            .map(|r| render::table_row(r.id(), &cells(r)))
            .collect()
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        self.form.set(field, value)
    }

    /// Fetches the list and rebinds the table rows. Returns false (after
    /// alerting) if the fetch failed; the table is left empty in that case.
    pub async fn load(&mut self) -> bool {
        self.items.clear();
        self.bind_rows();

        match self.api.list().await {
            Ok(items) => {
                self.items = items;
                self.bind_rows();
                true
            }
            Err(e) => {
                error!("Failed to load {}: {e}", R::PLURAL);
                self.ui
                    .alert(&format!("Failed to load {}: {e}", R::PLURAL))
                    .await;
                false
            }
        }
    }

    /// Routes a row button press to its handler. Ids that were not rendered
    /// are refused. Returns true if the list was reloaded.
    pub async fn dispatch(&mut self, id: i64, action: RowAction) -> bool {
        if !self.rows.iter().any(|row| row.id == id) {
            self.ui
                .alert(&format!("No {} with id {id} is listed.", R::LABEL))
                .await;
            return false;
        }
        match action {
            RowAction::Edit => {
                self.start_edit(id).await;
                false
            }
            RowAction::Delete => self.delete(id).await,
        }
    }

    /// Idle -> Editing(id). The record is fetched fresh so the form shows
    /// the server's current values.
    pub async fn start_edit(&mut self, id: i64) {
        match self.api.get_by_id(id).await {
            Ok(record) => self.form.begin_edit(id, record.form_values()),
            Err(e) => {
                error!("Failed to fetch {} {id}: {e}", R::LABEL);
                self.ui
                    .alert(&format!("Failed to fetch {}: {e}", R::LABEL))
                    .await;
            }
        }
    }

    /// Editing(id) -> Idle.
    pub fn cancel(&mut self) {
        self.form.reset();
    }

    /// Creates or updates depending on the form mode. On success the form
    /// is reset and the list reloaded; on failure the form keeps its values.
    /// Returns true if a write went through.
    pub async fn submit(&mut self) -> bool {
        let Some(values) = self.form.trimmed() else {
            self.ui.alert("Please fill all fields.").await;
            return false;
        };

        let payload = match R::to_payload(&values) {
            Ok(payload) => payload,
            Err(e) => {
                self.ui.alert(&e.to_string()).await;
                return false;
            }
        };

        let result = match self.form.mode() {
            FormMode::Create => self.api.create(&payload).await,
            FormMode::Editing(id) => self.api.update(id, &payload).await,
        };

        match result {
            Ok(_) => {
                self.form.reset();
                self.load().await;
                true
            }
            Err(e) => {
                error!(status = ?e.status(), "Saving {} failed: {e}", R::LABEL);
                self.ui.alert(&format!("Error: {e}")).await;
                false
            }
        }
    }

    /// Deletes after confirmation. A declined prompt makes no request.
    /// Returns true if the record was deleted.
    pub async fn delete(&mut self, id: i64) -> bool {
        if !self.ui.confirm(R::DELETE_PROMPT).await {
            return false;
        }

        match self.api.remove(id).await {
            Ok(_) => {
                if self.form.mode() == FormMode::Editing(id) {
                    self.form.reset();
                }
                self.load().await;
                true
            }
            Err(e) => {
                error!(status = ?e.status(), "Deleting {} {id} failed: {e}", R::LABEL);
                self.ui.alert(&format!("Delete failed: {e}")).await;
                false
            }
        }
    }

    pub fn to_html(&self) -> Result<String, AppError> {
        self.to_html_with(R::table_cells)
    }

    pub fn to_html_with<F>(&self, cells: F) -> Result<String, AppError>
    where
        F: Fn(&R) -> Vec<String>,
    {
        let view = CrudView {
            form: &self.form.to_html()?,
            label: R::LABEL,
            rows: &self.table_body_with(cells)?,
        };
        Ok(view.render()?)
    }

    fn bind_rows(&mut self) {
        self.rows = self.items.iter().map(|r| RowBinding { id: r.id() }).collect();
    }
}
