use std::fmt;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use cloudprint_core::{Error, Result};

use crate::connection::Connection;

/// Status of a print job as reported by the print service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintJobStatus {
    /// Waiting in the printer queue.
    Queued,
    /// Currently printing.
    InProgress,
    /// Printed.
    Done,
    /// Failed, see [`PrintJob::error_code`].
    Error,
    /// Handed to the printer, outcome unknown.
    Submitted,
    /// A status this client does not know, kept verbatim.
    Other(String),
}

impl PrintJobStatus {
    /// The wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            PrintJobStatus::Queued => "QUEUED",
            PrintJobStatus::InProgress => "IN_PROGRESS",
            PrintJobStatus::Done => "DONE",
            PrintJobStatus::Error => "ERROR",
            PrintJobStatus::Submitted => "SUBMITTED",
            PrintJobStatus::Other(s) => s,
        }
    }
}

impl From<&str> for PrintJobStatus {
    fn from(value: &str) -> Self {
        match value {
            "QUEUED" => PrintJobStatus::Queued,
            "IN_PROGRESS" => PrintJobStatus::InProgress,
            "DONE" => PrintJobStatus::Done,
            "ERROR" => PrintJobStatus::Error,
            "SUBMITTED" => PrintJobStatus::Submitted,
            other => PrintJobStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for PrintJobStatus {
    fn from(value: String) -> Self {
        PrintJobStatus::from(value.as_str())
    }
}

impl fmt::Display for PrintJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PrintJob mirrors the last fetched state of a remote print job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    id: String,
    status: PrintJobStatus,
    error_code: Option<String>,
}

impl PrintJob {
    /// Create a print job from already known state.
    pub fn new(
        id: impl Into<String>,
        status: impl Into<PrintJobStatus>,
        error_code: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            error_code,
        }
    }

    /// The job id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The job status.
    pub fn status(&self) -> &PrintJobStatus {
        &self.status
    }

    /// The error code, usually only set when the status is [`PrintJobStatus::Error`].
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// Whether the job waits in the printer queue.
    pub fn is_queued(&self) -> bool {
        self.status == PrintJobStatus::Queued
    }

    /// Whether the job is printing.
    pub fn is_in_progress(&self) -> bool {
        self.status == PrintJobStatus::InProgress
    }

    /// Whether the job has printed.
    pub fn is_done(&self) -> bool {
        self.status == PrintJobStatus::Done
    }

    /// Whether the job failed.
    pub fn is_error(&self) -> bool {
        self.status == PrintJobStatus::Error
    }

    /// Whether the job was handed to the printer with an unknown outcome.
    pub fn is_submitted(&self) -> bool {
        self.status == PrintJobStatus::Submitted
    }

    /// Re-fetch this job and overwrite its status and error code.
    ///
    /// Fails with a not found error when the job is gone remotely.
    pub async fn refresh(&mut self, jobs: &PrintJobCollection) -> Result<&mut Self> {
        jobs.refresh(self).await
    }

    /// Delete this job remotely.
    pub async fn delete(&self, jobs: &PrintJobCollection) -> Result<()> {
        jobs.delete(&self.id).await
    }

    pub(crate) fn from_value(value: Value) -> Result<Self> {
        let raw: RawPrintJob = serde_json::from_value(value)
            .map_err(|e| Error::connection("failed to parse print job").with_source(e))?;
        Ok(raw.into())
    }
}

/// A job entry as returned by the API.
///
/// The listing and lookup paths have been seen to spell the error code both
/// as `errorCode` and `error_code`; both are read here and `errorCode` wins.
#[derive(Debug, Deserialize)]
struct RawPrintJob {
    id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, rename = "errorCode")]
    error_code_camel: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

impl From<RawPrintJob> for PrintJob {
    fn from(raw: RawPrintJob) -> Self {
        let error_code = raw
            .error_code_camel
            .filter(|v| !v.is_empty())
            .or(raw.error_code.filter(|v| !v.is_empty()));

        PrintJob::new(raw.id, raw.status.unwrap_or_default(), error_code)
    }
}

#[derive(Debug, Default, Deserialize)]
struct JobsResponse {
    #[serde(default)]
    jobs: Option<Vec<RawPrintJob>>,
}

/// PrintJobCollection reads print jobs through a [`Connection`].
#[derive(Clone, Debug)]
pub struct PrintJobCollection {
    connection: Connection,
}

impl PrintJobCollection {
    /// Create a new collection.
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// List every job visible to the current credentials.
    pub async fn all(&self) -> Result<Vec<PrintJob>> {
        Ok(self
            .fetch_jobs()
            .await?
            .into_iter()
            .map(PrintJob::from)
            .collect())
    }

    /// Find a job by id, `None` if it does not exist.
    ///
    /// The API has no single-job endpoint, so this scans the full listing.
    pub async fn find(&self, id: &str) -> Result<Option<PrintJob>> {
        Ok(self
            .fetch_jobs()
            .await?
            .into_iter()
            .find(|job| job.id == id)
            .map(PrintJob::from))
    }

    /// Re-fetch `job` and overwrite its status and error code in place.
    pub async fn refresh<'a>(&self, job: &'a mut PrintJob) -> Result<&'a mut PrintJob> {
        let Some(latest) = self.find(&job.id).await? else {
            return Err(Error::not_found(format!(
                "print job {} no longer exists",
                job.id
            )));
        };

        debug!("print job {} is now {}", job.id, latest.status);
        job.status = latest.status;
        job.error_code = latest.error_code;
        Ok(job)
    }

    /// Delete a job by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.connection.get("/deletejob", &[("jobid", id)]).await?;
        Ok(())
    }

    async fn fetch_jobs(&self) -> Result<Vec<RawPrintJob>> {
        let Some(body) = self.connection.get("/jobs", &[]).await? else {
            return Ok(Vec::new());
        };

        let resp: JobsResponse = serde_json::from_value(body)
            .map_err(|e| Error::connection("failed to parse job listing").with_source(e))?;
        Ok(resp.jobs.unwrap_or_default())
    }
}
