use super::crud::CrudPage;
use super::form::{FieldValues, FormBinding};
use crate::errors::AppError;
use crate::models::{Job, JobPayload};

pub type JobsPage = CrudPage<Job>;

impl FormBinding for Job {
    const FIELDS: &'static [&'static str] = &["title", "location", "description"];
    const LABEL: &'static str = "job";
    const PLURAL: &'static str = "jobs";
    const ADD_LABEL: &'static str = "Add Job";
    const DELETE_PROMPT: &'static str = "Delete this job?";

    fn form_values(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.location.clone(),
            self.description.clone(),
        ]
    }

    fn to_payload(values: &FieldValues) -> Result<JobPayload, AppError> {
        Ok(JobPayload {
            title: values.get("title").to_string(),
            description: values.get("description").to_string(),
            location: values.get("location").to_string(),
        })
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.location.clone(),
            self.description.clone(),
        ]
    }
}
