//! Job store for tracking generation job status.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{DatasetResult, GenerateJobStatus, GenerateJobStatusResponse};

/// In-memory store for tracking generation jobs.
pub struct JobStore {
    jobs: HashMap<Uuid, JobRecord>,
}

/// Internal record for one job.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub job_id: Uuid,
    pub status: GenerateJobStatus,
    pub filename: Option<String>,
    pub requested_pairs: usize,
    pub generated_pairs: usize,
    pub result: Option<DatasetResult>,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl JobRecord {
    /// Create a new pending record.
    pub fn new(job_id: Uuid, filename: Option<String>, requested_pairs: usize) -> Self {
        Self {
            job_id,
            status: GenerateJobStatus::Pending,
            filename,
            requested_pairs,
            generated_pairs: 0,
            result: None,
            error: None,
            started_at: None,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the job as started.
    pub fn start(&mut self) {
        self.status = GenerateJobStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Record generation progress.
    pub fn update_progress(&mut self, generated_pairs: usize) {
        self.generated_pairs = generated_pairs;
    }

    /// Mark the job as completed with its result.
    pub fn complete(&mut self, result: DatasetResult) {
        self.status = GenerateJobStatus::Completed;
        self.generated_pairs = result.qa_pairs.len();
        self.result = Some(result);
        self.completed_at = Some(Utc::now());
    }

    /// Mark the job as failed.
    pub fn fail(&mut self, error: String) {
        self.status = GenerateJobStatus::Failed;
        self.error = Some(error);
        self.completed_at = Some(Utc::now());
    }

    /// Convert to the API response type.
    pub fn to_response(&self) -> GenerateJobStatusResponse {
        GenerateJobStatusResponse {
            job_id: self.job_id,
            status: self.status,
            filename: self.filename.clone(),
            requested_pairs: self.requested_pairs,
            generated_pairs: self.generated_pairs,
            error: self.error.clone(),
            started_at: self.started_at,
            completed_at: self.completed_at,
            result: self.result.clone(),
        }
    }
}

impl JobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            jobs: HashMap::new(),
        }
    }

    /// Create a new job and return its ID.
    pub fn create_job(&mut self, filename: Option<String>, requested_pairs: usize) -> Uuid {
        let job_id = Uuid::new_v4();
        let record = JobRecord::new(job_id, filename, requested_pairs);
        self.jobs.insert(job_id, record);
        job_id
    }

    /// Get a job by ID.
    pub fn get_job(&self, job_id: Uuid) -> Option<&JobRecord> {
        self.jobs.get(&job_id)
    }

    /// Start a job.
    pub fn start_job(&mut self, job_id: Uuid) -> bool {
        if let Some(job) = self.jobs.get_mut(&job_id) {
            job.start();
            true
        } else {
            false
        }
    }

    /// Update job progress.
    pub fn update_job_progress(&mut self, job_id: Uuid, generated_pairs: usize) -> bool {
        if let Some(job) = self.jobs.get_mut(&job_id) {
            job.update_progress(generated_pairs);
            true
        } else {
            false
        }
    }

    /// Complete a job with its result.
    pub fn complete_job(&mut self, job_id: Uuid, result: DatasetResult) -> bool {
        if let Some(job) = self.jobs.get_mut(&job_id) {
            job.complete(result);
            true
        } else {
            false
        }
    }

    /// Fail a job.
    pub fn fail_job(&mut self, job_id: Uuid, error: String) -> bool {
        if let Some(job) = self.jobs.get_mut(&job_id) {
            job.fail(error);
            true
        } else {
            false
        }
    }

    /// Get job status as an API response.
    pub fn get_job_status(&self, job_id: Uuid) -> Option<GenerateJobStatusResponse> {
        self.jobs.get(&job_id).map(|j| j.to_response())
    }

    /// Drop finished jobs older than one hour.
    pub fn cleanup_old_jobs(&mut self) {
        let cutoff = Utc::now() - chrono::Duration::hours(1);
        self.jobs.retain(|_, job| match job.status {
            GenerateJobStatus::Completed | GenerateJobStatus::Failed => {
                job.completed_at.map_or(true, |t| t > cutoff)
            }
            _ => true,
        });
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_lifecycle_pending_running_completed() {
        let mut store = JobStore::new();
        let job_id = store.create_job(Some("doc.txt".to_string()), 25);

        let status = store.get_job_status(job_id).unwrap();
        assert_eq!(status.status, GenerateJobStatus::Pending);
        assert_eq!(status.requested_pairs, 25);

        store.start_job(job_id);
        assert_eq!(
            store.get_job(job_id).unwrap().status,
            GenerateJobStatus::Running
        );

        let result = DatasetResult {
            summary: "s".to_string(),
            qa_pairs: Vec::new(),
            curated: None,
        };
        store.complete_job(job_id, result);

        let status = store.get_job_status(job_id).unwrap();
        assert_eq!(status.status, GenerateJobStatus::Completed);
        assert!(status.completed_at.is_some());
        assert!(status.result.is_some());
    }

    #[test]
    fn failed_jobs_keep_their_error() {
        let mut store = JobStore::new();
        let job_id = store.create_job(None, 10);
        store.start_job(job_id);
        store.fail_job(job_id, "gateway unreachable".to_string());

        let status = store.get_job_status(job_id).unwrap();
        assert_eq!(status.status, GenerateJobStatus::Failed);
        assert_eq!(status.error.as_deref(), Some("gateway unreachable"));
    }

    #[test]
    fn unknown_jobs_are_not_found() {
        let store = JobStore::new();
        assert!(store.get_job_status(Uuid::new_v4()).is_none());
    }

    #[test]
    fn cleanup_keeps_unfinished_jobs() {
        let mut store = JobStore::new();
        let running = store.create_job(None, 5);
        store.start_job(running);
        let finished = store.create_job(None, 5);
        store.fail_job(finished, "x".to_string());

        store.cleanup_old_jobs();

        // Both survive: the failed one completed well inside the hour
        assert!(store.get_job(running).is_some());
        assert!(store.get_job(finished).is_some());
    }
}
