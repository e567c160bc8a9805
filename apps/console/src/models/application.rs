use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Resource;

/// Application record. List and get return flat ids; update and delete
/// return the nested candidate and job, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    #[serde(default)]
    pub candidate_id: Option<i64>,
    #[serde(default)]
    pub job_id: Option<i64>,
    #[serde(default)]
    pub candidate: Option<CandidateRef>,
    #[serde(default)]
    pub job: Option<JobRef>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub applied_at: Option<DateTime<Utc>>,
}

/// Denormalized candidate fields carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRef {
    pub id: i64,
    pub name: String,
}

/// Denormalized job fields carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRef {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub candidate_id: i64,
    pub job_id: i64,
}

impl Application {
    pub fn candidate_id(&self) -> Option<i64> {
        self.candidate_id
            .or_else(|| self.candidate.as_ref().map(|c| c.id))
    }

    pub fn job_id(&self) -> Option<i64> {
        self.job_id.or_else(|| self.job.as_ref().map(|j| j.id))
    }

    pub fn candidate_name(&self) -> String {
        match (&self.candidate, self.candidate_id()) {
            (Some(c), _) => c.name.clone(),
            (None, Some(id)) => format!("#{id}"),
            (None, None) => String::new(),
        }
    }

    pub fn job_title(&self) -> String {
        match (&self.job, self.job_id()) {
            (Some(j), _) => j.title.clone(),
            (None, Some(id)) => format!("#{id}"),
            (None, None) => String::new(),
        }
    }
}

/// Accepts RFC 3339 timestamps and the naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// form, which is read as UTC. Anything else is dropped rather than failing
/// the whole record.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }))
}

impl Resource for Application {
    const COLLECTION: &'static str = "applications";
    type Payload = ApplicationPayload;

    fn id(&self) -> i64 {
        self.id
    }
}
