use askama::Template;

use crate::errors::AppError;
use crate::models::Resource;
use crate::render::{FormInput, FormView};

pub const SAVE_LABEL: &str = "Save Changes";

/// Binds a resource to its entry form and its table row.
pub trait FormBinding: Resource {
    /// Form field names, in form order.
    const FIELDS: &'static [&'static str];
    const LABEL: &'static str;
    const PLURAL: &'static str;
    /// Submit label while creating.
    const ADD_LABEL: &'static str;
    const DELETE_PROMPT: &'static str;

    /// Current values, one per entry of `FIELDS`.
    fn form_values(&self) -> Vec<String>;

    fn to_payload(values: &FieldValues) -> Result<Self::Payload, AppError>;

    /// Unescaped text cells shown after the id column.
    fn table_cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Editing(i64),
}

/// Trimmed, non-empty form values ready to become a payload.
#[derive(Debug, Clone)]
pub struct FieldValues {
    fields: &'static [&'static str],
    values: Vec<String>,
}

impl FieldValues {
    pub fn get(&self, field: &str) -> &str {
        self.fields
            .iter()
            .position(|f| *f == field)
            .map(|i| self.values[i].as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    mode: FormMode,
    fields: &'static [&'static str],
    values: Vec<String>,
    add_label: &'static str,
}

impl FormState {
    pub fn new(fields: &'static [&'static str], add_label: &'static str) -> Self {
        Self {
            mode: FormMode::Create,
            fields,
            values: vec![String::new(); fields.len()],
            add_label,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.index(field).map(|i| self.values[i].as_str())
    }

    /// Returns false for an unknown field.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        match self.index(field) {
            Some(i) => {
                self.values[i] = value.into();
                true
            }
            None => false,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => self.add_label,
            FormMode::Editing(_) => SAVE_LABEL,
        }
    }

    pub fn cancel_visible(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    /// Idle -> Editing(id), with the form populated from the record.
    pub fn begin_edit(&mut self, id: i64, values: Vec<String>) {
        self.values = values;
        self.values.resize(self.fields.len(), String::new());
        self.mode = FormMode::Editing(id);
    }

    /// Back to Create with an empty form.
    pub fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.values.iter_mut().for_each(String::clear);
    }

    /// Trimmed values, or `None` if any field is empty after trimming.
    pub fn trimmed(&self) -> Option<FieldValues> {
        let values: Vec<String> = self.values.iter().map(|v| v.trim().to_string()).collect();
        if values.iter().any(String::is_empty) {
            return None;
        }
        Some(FieldValues {
            fields: self.fields,
            values,
        })
    }

    pub fn to_html(&self) -> Result<String, AppError> {
        let mode = match self.mode {
            FormMode::Create => "create".to_string(),
            FormMode::Editing(id) => format!("edit:{id}"),
        };
        let view = FormView {
            mode,
            inputs: self
                .fields
                .iter()
                .zip(&self.values)
                .map(|(name, value)| FormInput { name, value })
                .collect(),
            submit_label: self.submit_label(),
            cancel_visible: self.cancel_visible(),
        };
        Ok(view.render()?)
    }

    fn index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }
}
