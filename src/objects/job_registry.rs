//! Bookkeeping for download jobs that are being polled.
//!
//! The registry does no I/O. The owner asks it for a sequence number before
//! every status request ([`JobRegistry::issue_poll`]) and feeds the outcome
//! back in through [`JobRegistry::apply`], which answers with the [`Effect`]s
//! to carry out. Responses are applied in arrival order, but one carrying a
//! sequence number at or below the last applied one for its job is dropped.

use super::{DownloadJob, JobState, StatusResponse};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Status(StatusResponse),
    /// The status request failed before a usable body arrived.
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The job's visual representation must show this state.
    Render(DownloadJob),
    NotifySuccess { id: String, title: String },
    RefreshLibrary,
    ScheduleRemoval(String),
    StopPolling(String),
}

#[derive(Debug)]
struct TrackedJob {
    job: DownloadJob,
    issued: u64,
    applied: u64,
}

#[derive(Debug)]
pub struct JobRegistry {
    jobs: HashMap<String, TrackedJob>,
    // oldest first
    order: Vec<String>,
    clamp_progress: bool,
}

impl JobRegistry {
    pub fn new(clamp_progress: bool) -> Self {
        Self {
            jobs: HashMap::new(),
            order: Vec::new(),
            clamp_progress,
        }
    }

    /// Starts tracking `id`. Returns `None` when the id is already tracked,
    /// in which case nothing changes and no second poller must be started.
    pub fn start(&mut self, id: &str, title: &str) -> Option<DownloadJob> {
        if self.jobs.contains_key(id) {
            log::debug!("job {} is already tracked", id);
            return None;
        }

        let job = DownloadJob::new(id, title);

        self.jobs.insert(
            id.to_string(),
            TrackedJob {
                job: job.clone(),
                issued: 0,
                applied: 0,
            },
        );
        self.order.push(id.to_string());

        Some(job)
    }

    /// Next sequence number for a status request, or `None` once the job
    /// is terminal or unknown (polling must stop).
    pub fn issue_poll(&mut self, id: &str) -> Option<u64> {
        let tracked = self.jobs.get_mut(id)?;

        if tracked.job.state.is_terminal() {
            return None;
        }

        tracked.issued += 1;
        Some(tracked.issued)
    }

    pub fn apply(&mut self, id: &str, seq: u64, outcome: PollOutcome) -> Vec<Effect> {
        let clamp = self.clamp_progress;
        let tracked = match self.jobs.get_mut(id) {
            Some(tracked) => tracked,
            None => {
                log::debug!("dropping status for untracked job {}", id);
                return Vec::new();
            }
        };

        if tracked.job.state.is_terminal() {
            return Vec::new();
        }

        if seq <= tracked.applied {
            log::debug!(
                "dropping stale status #{} for job {} (applied #{})",
                seq,
                id,
                tracked.applied
            );
            return Vec::new();
        }

        tracked.applied = seq;

        let job = &mut tracked.job;
        let status = match outcome {
            PollOutcome::Status(status) => status,
            PollOutcome::Unreachable(reason) => {
                log::warn!("lost track of job {}: {}", id, reason);
                job.state = JobState::Unreachable;
                return vec![Effect::Render(job.clone()), Effect::StopPolling(id.into())];
            }
        };

        match JobState::from_status(&status.status) {
            JobState::Completed => {
                job.state = JobState::Completed;
                job.progress_percent = 100.0;

                let title = match status.title {
                    Some(title) if !title.is_empty() => title,
                    _ => job.title.clone(),
                };

                vec![
                    Effect::Render(job.clone()),
                    Effect::NotifySuccess {
                        id: id.into(),
                        title,
                    },
                    Effect::ScheduleRemoval(id.into()),
                    Effect::RefreshLibrary,
                    Effect::StopPolling(id.into()),
                ]
            }
            state @ (JobState::Failed | JobState::NotFound) => {
                job.state = state;
                vec![Effect::Render(job.clone()), Effect::StopPolling(id.into())]
            }
            _ => {
                job.apply_progress(&status, clamp);
                vec![Effect::Render(job.clone())]
            }
        }
    }

    /// Forgets the job entirely. Late responses for it are ignored.
    pub fn purge(&mut self, id: &str) -> Option<DownloadJob> {
        self.order.retain(|tracked_id| tracked_id != id);
        self.jobs.remove(id).map(|tracked| tracked.job)
    }

    pub fn get(&self, id: &str) -> Option<&DownloadJob> {
        self.jobs.get(id).map(|tracked| &tracked.job)
    }

    pub fn is_polling(&self, id: &str) -> bool {
        self.get(id).map_or(false, |job| !job.state.is_terminal())
    }

    /// Newest first.
    pub fn jobs(&self) -> Vec<DownloadJob> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(value: f64) -> PollOutcome {
        PollOutcome::Status(StatusResponse {
            status: "downloading".into(),
            progress: value,
            speed: None,
            eta: None,
            title: None,
        })
    }

    fn terminal(status: &str, title: Option<&str>) -> PollOutcome {
        PollOutcome::Status(StatusResponse {
            status: status.into(),
            progress: 0.0,
            speed: None,
            eta: None,
            title: title.map(String::from),
        })
    }

    #[test]
    fn starting_twice_tracks_one_job() {
        let mut registry = JobRegistry::new(true);

        assert!(registry.start("abc123", "clip").is_some());
        assert!(registry.start("abc123", "other title").is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("abc123").unwrap().title, "clip");
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut registry = JobRegistry::new(false);
        registry.start("j", "clip");

        let first = registry.issue_poll("j").unwrap();
        let second = registry.issue_poll("j").unwrap();

        assert_eq!(registry.apply("j", second, progress(60.0)).len(), 1);
        assert!(registry.apply("j", first, progress(30.0)).is_empty());
        assert_eq!(registry.get("j").unwrap().progress_percent, 60.0);
    }

    #[test]
    fn completion_carries_reported_title() {
        let mut registry = JobRegistry::new(true);
        registry.start("j", "snapshot");

        let seq = registry.issue_poll("j").unwrap();
        let effects = registry.apply("j", seq, terminal("completed", Some("Final Name")));

        assert!(effects.contains(&Effect::NotifySuccess {
            id: "j".into(),
            title: "Final Name".into()
        }));
        assert_eq!(registry.get("j").unwrap().title, "snapshot");
        assert_eq!(registry.get("j").unwrap().progress_percent, 100.0);
    }

    #[test]
    fn completion_without_title_uses_snapshot() {
        let mut registry = JobRegistry::new(true);
        registry.start("j", "snapshot");

        let seq = registry.issue_poll("j").unwrap();
        let effects = registry.apply("j", seq, terminal("completed", None));

        assert!(effects.contains(&Effect::NotifySuccess {
            id: "j".into(),
            title: "snapshot".into()
        }));
    }

    #[test]
    fn failure_is_terminal_without_refresh_or_removal() {
        let mut registry = JobRegistry::new(true);
        registry.start("j", "clip");

        let seq = registry.issue_poll("j").unwrap();
        let effects = registry.apply("j", seq, terminal("failed", None));

        assert!(!effects.contains(&Effect::RefreshLibrary));
        assert!(!effects.contains(&Effect::ScheduleRemoval("j".into())));
        assert!(effects.contains(&Effect::StopPolling("j".into())));
        assert_eq!(registry.get("j").unwrap().state, JobState::Failed);
        assert_eq!(registry.issue_poll("j"), None);
    }

    #[test]
    fn transport_failure_becomes_unreachable() {
        let mut registry = JobRegistry::new(true);
        registry.start("j", "clip");

        let first = registry.issue_poll("j").unwrap();
        let second = registry.issue_poll("j").unwrap();
        let effects = registry.apply("j", first, PollOutcome::Unreachable("offline".into()));

        assert_eq!(effects.len(), 2);
        assert_eq!(registry.get("j").unwrap().state, JobState::Unreachable);
        assert!(!registry.is_polling("j"));
        // an in-flight request arriving afterwards cannot revive the job
        assert!(registry.apply("j", second, progress(80.0)).is_empty());
    }

    #[test]
    fn purge_forgets_the_job() {
        let mut registry = JobRegistry::new(true);
        registry.start("old", "a");
        registry.start("new", "b");

        assert_eq!(
            registry.jobs().iter().map(|j| j.id.as_str()).collect::<Vec<_>>(),
            vec!["new", "old"]
        );

        assert!(registry.purge("old").is_some());
        assert!(registry.apply("old", 1, progress(10.0)).is_empty());
        assert_eq!(registry.len(), 1);
        assert!(registry.start("old", "a again").is_some());
    }
}
