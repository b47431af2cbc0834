//! Display model for the active download list: one row per job.

use super::{DownloadJob, JobState};

#[derive(Debug, Clone, PartialEq)]
pub struct JobRow {
    pub id: String,
    pub title: String,
    pub state: JobState,
    pub percent_label: String,
    pub bar_width: f64,
    pub speed_label: String,
    pub eta_label: String,
}

impl From<&DownloadJob> for JobRow {
    fn from(job: &DownloadJob) -> Self {
        let percent_label = match job.state {
            JobState::Completed => "Completed!".to_string(),
            JobState::Failed => "Failed".to_string(),
            JobState::NotFound => "Not found".to_string(),
            JobState::Unreachable => "Connection lost".to_string(),
            JobState::Pending | JobState::InProgress => format!("{}%", job.progress_percent),
        };
        let (speed_label, eta_label) = match job.state {
            JobState::Pending => ("Speed: --".to_string(), "ETA: --".to_string()),
            _ => (
                format!("Speed: {}", job.speed.as_deref().unwrap_or("N/A")),
                format!("ETA: {}", job.eta.as_deref().unwrap_or("N/A")),
            ),
        };

        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            state: job.state,
            percent_label,
            bar_width: job.progress_percent.clamp(0.0, 100.0),
            speed_label,
            eta_label,
        }
    }
}

impl JobRow {
    pub fn is_failure(&self) -> bool {
        matches!(
            self.state,
            JobState::Failed | JobState::NotFound | JobState::Unreachable
        )
    }
}

/// Rows in display order (newest first). Applying the same update twice
/// leaves the rows unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobViews {
    rows: Vec<JobRow>,
}

impl JobViews {
    pub fn replace_all(&mut self, jobs: &[DownloadJob]) {
        self.rows = jobs.iter().map(JobRow::from).collect();
    }

    pub fn upsert(&mut self, job: &DownloadJob) {
        let row = JobRow::from(job);

        match self.rows.iter_mut().find(|r| r.id == job.id) {
            Some(existing) => *existing = row,
            None => self.rows.insert(0, row),
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.rows.retain(|r| r.id != id);
    }

    pub fn rows(&self) -> &[JobRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
