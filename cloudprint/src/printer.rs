use log::debug;
use serde::Deserialize;

use cloudprint_core::{Error, Result};

use crate::connection::Connection;
use crate::print_job::PrintJob;

/// Printer is the last fetched state of a registered printer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Printer {
    /// Printer id.
    pub id: String,
    /// Printer name as registered.
    #[serde(default)]
    pub name: String,
    /// Name shown to users.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Status message reported by the printer.
    #[serde(default)]
    pub status: Option<String>,
    /// `ONLINE`, `OFFLINE`, `DORMANT` or `UNKNOWN`.
    #[serde(default)]
    pub connection_status: Option<String>,
    /// Tags attached to the printer, e.g. `^own`.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Printer {
    /// Whether the service reports the printer as reachable.
    pub fn is_online(&self) -> bool {
        self.connection_status.as_deref() == Some("ONLINE")
    }

    /// Whether the printer carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Submit a document to this printer.
    ///
    /// Returns `None` when the service accepted the request but reported no job.
    pub async fn print(
        &self,
        printers: &PrinterCollection,
        request: &PrintRequest,
    ) -> Result<Option<PrintJob>> {
        printers.submit(&self.id, request).await
    }
}

/// A document to submit to a printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintRequest {
    /// Job title.
    pub title: String,
    /// Document content, or its URL when `content_type` is `url`.
    pub content: String,
    /// MIME type of `content`, or `url`.
    pub content_type: String,
}

impl PrintRequest {
    /// Create a request with inline content.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// Create a request that lets the service fetch the document from `url`.
    pub fn url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(title, url, "url")
    }
}

#[derive(Debug, Default, Deserialize)]
struct PrintersResponse {
    #[serde(default)]
    printers: Option<Vec<Printer>>,
}

/// PrinterCollection reads printers and submits jobs through a [`Connection`].
#[derive(Clone, Debug)]
pub struct PrinterCollection {
    connection: Connection,
}

impl PrinterCollection {
    /// Create a new collection.
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// List every printer visible to the current credentials.
    pub async fn all(&self) -> Result<Vec<Printer>> {
        self.fetch_printers("/search", &[]).await
    }

    /// List printers matching a free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<Printer>> {
        self.fetch_printers("/search", &[("q", query)]).await
    }

    /// Find a printer by id, `None` if it does not exist.
    pub async fn find(&self, id: &str) -> Result<Option<Printer>> {
        Ok(self
            .fetch_printers("/printer", &[("printerid", id)])
            .await?
            .into_iter()
            .find(|p| p.id == id))
    }

    /// Submit a document to the printer with `printer_id`.
    pub async fn submit(
        &self,
        printer_id: &str,
        request: &PrintRequest,
    ) -> Result<Option<PrintJob>> {
        debug!("submitting {:?} to printer {printer_id}", request.title);

        let body = self
            .connection
            .post(
                "/submit",
                &[
                    ("printerid", printer_id),
                    ("title", &request.title),
                    ("content", &request.content),
                    ("contentType", &request.content_type),
                ],
            )
            .await?;

        match body.and_then(|mut v| v.get_mut("job").map(serde_json::Value::take)) {
            Some(job) if !job.is_null() => PrintJob::from_value(job).map(Some),
            _ => Ok(None),
        }
    }

    async fn fetch_printers(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<Printer>> {
        let Some(body) = self.connection.get(path, query).await? else {
            return Ok(Vec::new());
        };

        let resp: PrintersResponse = serde_json::from_value(body)
            .map_err(|e| Error::connection("failed to parse printer listing").with_source(e))?;
        Ok(resp.printers.unwrap_or_default())
    }
}
