use super::StatusResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    InProgress,
    Completed,
    Failed,
    NotFound,
    /// The status endpoint could not be queried or answered garbage.
    Unreachable,
}

impl JobState {
    /// Maps a backend status string. Anything that is not one of the three
    /// terminal values counts as progress.
    pub fn from_status(status: &str) -> Self {
        match status {
            "completed" => JobState::Completed,
            "failed" => JobState::Failed,
            "not_found" => JobState::NotFound,
            _ => JobState::InProgress,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::Pending | JobState::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadJob {
    pub id: String,
    /// Snapshot taken when the job was created; status polls never change it.
    pub title: String,
    pub state: JobState,
    pub progress_percent: f64,
    pub speed: Option<String>,
    pub eta: Option<String>,
}

impl DownloadJob {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            state: JobState::Pending,
            progress_percent: 0.0,
            speed: None,
            eta: None,
        }
    }

    pub(crate) fn apply_progress(&mut self, status: &StatusResponse, clamp: bool) {
        let reported = match status.progress.is_finite() {
            true => status.progress,
            false => 0.0,
        };

        self.progress_percent = match clamp {
            true => reported.clamp(0.0, 100.0).max(self.progress_percent),
            false => reported,
        };
        self.speed = status.speed.clone();
        self.eta = status.eta.clone();
        self.state = JobState::InProgress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(progress: f64) -> StatusResponse {
        StatusResponse {
            status: "downloading".into(),
            progress,
            speed: Some("1.2MiB/s".into()),
            eta: Some("00:12".into()),
            title: None,
        }
    }

    #[test]
    fn status_vocabulary() {
        assert_eq!(JobState::from_status("completed"), JobState::Completed);
        assert_eq!(JobState::from_status("failed"), JobState::Failed);
        assert_eq!(JobState::from_status("not_found"), JobState::NotFound);
        assert_eq!(JobState::from_status("starting"), JobState::InProgress);
        assert_eq!(JobState::from_status("finished"), JobState::InProgress);
        assert!(!JobState::Pending.is_terminal());
        assert!(!JobState::InProgress.is_terminal());
        assert!(JobState::Unreachable.is_terminal());
    }

    #[test]
    fn clamped_progress_never_goes_back() {
        let mut job = DownloadJob::new("1", "clip");

        job.apply_progress(&status(55.0), true);
        job.apply_progress(&status(40.0), true);
        assert_eq!(job.progress_percent, 55.0);

        job.apply_progress(&status(250.0), true);
        assert_eq!(job.progress_percent, 100.0);
        assert_eq!(job.speed.as_deref(), Some("1.2MiB/s"));
    }

    #[test]
    fn unclamped_progress_is_taken_as_reported() {
        let mut job = DownloadJob::new("1", "clip");

        job.apply_progress(&status(55.0), false);
        job.apply_progress(&status(40.0), false);
        assert_eq!(job.progress_percent, 40.0);

        job.apply_progress(&status(f64::NAN), false);
        assert_eq!(job.progress_percent, 0.0);
    }
}
