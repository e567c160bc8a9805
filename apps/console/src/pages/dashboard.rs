//! Dashboard: totals for all three collections and the most recent
//! candidates and jobs. Renders all of it or none of it.

use std::sync::Arc;

use askama::Template;
use tracing::{error, warn};

use crate::api::Api;
use crate::errors::AppError;
use crate::models::{Candidate, Job, Resource};
use crate::render::{self, DashboardView, RecentItem};
use crate::ui::{ToastKind, Ui};

const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub candidates: usize,
    pub jobs: usize,
    pub applications: usize,
}

pub struct Dashboard {
    api: Api,
    ui: Arc<dyn Ui>,
    counts: Option<Counts>,
    recent_candidates: Vec<Candidate>,
    recent_jobs: Vec<Job>,
}

impl Dashboard {
    pub fn new(api: Api, ui: Arc<dyn Ui>) -> Self {
        Self {
            api,
            ui,
            counts: None,
            recent_candidates: Vec::new(),
            recent_jobs: Vec::new(),
        }
    }

    /// `None` until the first successful load.
    pub fn counts(&self) -> Option<Counts> {
        self.counts
    }

    /// Newest first, at most five.
    pub fn recent_candidates(&self) -> &[Candidate] {
        &self.recent_candidates
    }

    pub fn recent_jobs(&self) -> &[Job] {
        &self.recent_jobs
    }

    /// Fetches the three lists concurrently. If any fetch fails nothing is
    /// updated and a single error toast is shown.
    pub async fn load(&mut self) -> bool {
        let fetched = tokio::try_join!(
            async {
                self.api.candidates.list().await.map_err(|e| {
                    warn!("Candidates fetch: {e}");
                    AppError::FetchFailed("Candidates")
                })
            },
            async {
                self.api.jobs.list().await.map_err(|e| {
                    warn!("Jobs fetch: {e}");
                    AppError::FetchFailed("Jobs")
                })
            },
            async {
                self.api.applications.list().await.map_err(|e| {
                    warn!("Applications fetch: {e}");
                    AppError::FetchFailed("Applications")
                })
            },
        );

        let (candidates, jobs, applications) = match fetched {
            Ok(lists) => lists,
            Err(e) => {
                error!("Dashboard init error: {e}");
                self.ui
                    .toast("Failed to load dashboard data", ToastKind::Error)
                    .await;
                return false;
            }
        };

        self.counts = Some(Counts {
            candidates: candidates.len(),
            jobs: jobs.len(),
            applications: applications.len(),
        });
        self.recent_candidates = most_recent(&candidates, RECENT_LIMIT);
        self.recent_jobs = most_recent(&jobs, RECENT_LIMIT);
        true
    }

    pub fn to_html(&self) -> Result<String, AppError> {
        let count = |n: fn(&Counts) -> usize| {
            self.counts()
                .map_or_else(|| "-".to_string(), |c| n(&c).to_string())
        };
        let candidates: Vec<RecentItem<'_>> = self
            .recent_candidates()
            .iter()
            .map(|c| RecentItem::new(c.id, &c.name, &c.email))
            .collect();
        let jobs: Vec<RecentItem<'_>> = self
            .recent_jobs()
            .iter()
            .map(|j| RecentItem::new(j.id, &j.title, &j.location))
            .collect();

        let view = DashboardView {
            candidates: &count(|c| c.candidates),
            jobs: &count(|c| c.jobs),
            applications: &count(|c| c.applications),
            recent_candidates: &render::recent_list(&candidates)?,
            recent_jobs: &render::recent_list(&jobs)?,
        };
        Ok(view.render()?)
    }
}

/// Highest ids first; ids are assigned in creation order.
fn most_recent<R: Resource + Clone>(items: &[R], limit: usize) -> Vec<R> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|r| std::cmp::Reverse(r.id()));
    sorted.truncate(limit);
    sorted
}
