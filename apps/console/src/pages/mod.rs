pub mod applications;
pub mod candidates;
pub mod crud;
pub mod dashboard;
pub mod form;
pub mod jobs;
pub mod resume;

pub use applications::ApplicationsPage;
pub use candidates::CandidatesPage;
pub use crud::RowAction;
pub use dashboard::Dashboard;
pub use jobs::JobsPage;
