pub mod application;
pub mod candidate;
pub mod job;

use serde::{de::DeserializeOwned, Serialize};

pub use application::{Application, ApplicationPayload};
pub use candidate::{Candidate, CandidatePayload, UploadResponse};
pub use job::{Job, JobPayload};

/// Ties a backend record to its REST collection.
///
/// Records are passed through unchanged; the only thing the console relies
/// on is that every record has an id.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Path segment under the base URL, e.g. `candidates`.
    const COLLECTION: &'static str;

    /// Body sent on create and update.
    type Payload: Serialize + Send + Sync;

    fn id(&self) -> i64;
}
