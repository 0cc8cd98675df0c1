//! Endpoint invocation and the result pane.
//!
//! A request runs on its own task and reports back over a channel as a
//! [`RunnerEvent`]. Each request carries the generation of the modal that
//! started it so that results arriving after the modal was closed or
//! reopened can be dropped.

use std::io::Write;

use tempfile::{Builder, TempPath};
use tokio::sync::mpsc;

use crate::client::{GatewayClient, Payload};

/// A binary payload written to a temporary file that lives as long as the
/// pane showing it.
#[derive(Debug)]
pub struct ObjectUrl {
    path: TempPath,
    content_type: String,
    size: usize,
    alt: String,
}

impl ObjectUrl {
    /// Write `bytes` to a fresh temporary file.
    pub fn create(bytes: &[u8], content_type: &str, alt: &str) -> std::io::Result<Self> {
        let suffix = content_type
            .strip_prefix("image/")
            .map(|sub| format!(".{}", sub.split(['+', ';']).next().unwrap_or(sub)))
            .unwrap_or_default();

        let mut file = Builder::new()
            .prefix("apidex-")
            .suffix(&suffix)
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self {
            path: file.into_temp_path(),
            content_type: content_type.to_string(),
            size: bytes.len(),
            alt: alt.to_string(),
        })
    }

    /// `file://` URL for the local copy.
    #[must_use]
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// Declared content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alternative text, the item's name.
    #[must_use]
    pub fn alt(&self) -> &str {
        &self.alt
    }
}

/// What the result pane currently shows.
#[derive(Debug, Default)]
pub enum ResultContent {
    /// Nothing yet.
    #[default]
    Empty,
    /// Pretty-printed JSON.
    Json(String),
    /// An image saved locally.
    Image(ObjectUrl),
    /// A plain notice, such as a validation message.
    Notice(String),
    /// A failed request, already prefixed with `Error: `.
    Error(String),
}

/// Outcome of one request.
#[derive(Debug)]
pub struct Completed {
    /// The absolute URL that was requested.
    pub url: String,
    /// Rendered content, or the failure message.
    pub result: Result<ResultContent, String>,
}

/// A finished request tagged with the modal generation that started it.
#[derive(Debug)]
pub struct RunnerEvent {
    /// Generation of the modal that issued the request.
    pub generation: u64,
    /// What happened.
    pub completed: Completed,
}

/// Loading indicator plus content area of the modal.
#[derive(Debug, Default)]
pub struct ResultPane {
    /// Whether the loading indicator is shown.
    pub loading: bool,
    /// Whether the content area is shown.
    pub content_visible: bool,
    /// Current content.
    pub content: ResultContent,
    /// The literal URL of the last successful request.
    pub endpoint: Option<String>,
}

impl ResultPane {
    /// Show the loading indicator and hide the content area.
    pub fn begin(&mut self) {
        self.loading = true;
        self.content_visible = false;
        self.endpoint = None;
    }

    /// Show a notice without touching the loading indicator.
    pub fn notice(&mut self, message: impl Into<String>) {
        self.content = ResultContent::Notice(message.into());
        self.content_visible = true;
        self.endpoint = None;
    }

    /// Apply a request outcome.
    ///
    /// This is the only way a pending pane leaves the loading state, so the
    /// indicator is cleared on success and failure alike.
    pub fn settle(&mut self, completed: Completed) {
        match completed.result {
            Ok(content) => {
                self.content = content;
                self.endpoint = Some(completed.url);
            }
            Err(message) => {
                self.content = ResultContent::Error(format!("Error: {message}"));
                self.endpoint = None;
            }
        }
        self.loading = false;
        self.content_visible = true;
    }
}

/// Request `url` and render the response.
///
/// JSON bodies are pretty-printed with two-space indentation; `image/*`
/// bodies are saved to an [`ObjectUrl`] with `alt` as alternative text.
pub async fn run(client: &GatewayClient, url: String, alt: &str) -> Completed {
    let result = match client.fetch(&url).await {
        Ok(Payload::Json(value)) => serde_json::to_string_pretty(&value)
            .map(ResultContent::Json)
            .map_err(|e| e.to_string()),
        Ok(Payload::Image {
            content_type,
            bytes,
        }) => ObjectUrl::create(&bytes, &content_type, alt)
            .map(ResultContent::Image)
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match &result {
        Ok(_) => tracing::debug!(%url, "Request completed"),
        Err(message) => tracing::warn!(%url, error = %message, "Request failed"),
    }

    Completed { url, result }
}

/// Spawn [`run`] and deliver its outcome on `tx`.
///
/// A panicking request still reports back as a failure.
pub fn spawn(
    client: GatewayClient,
    url: String,
    alt: String,
    generation: u64,
    tx: mpsc::Sender<RunnerEvent>,
) {
    tokio::spawn(async move {
        let task_url = url.clone();
        let handle = tokio::spawn(async move { run(&client, task_url, &alt).await });

        let completed = match handle.await {
            Ok(completed) => completed,
            Err(e) => Completed {
                url,
                result: Err(e.to_string()),
            },
        };

        if tx
            .send(RunnerEvent {
                generation,
                completed,
            })
            .await
            .is_err()
        {
            tracing::debug!("Result receiver dropped");
        }
    });
}
