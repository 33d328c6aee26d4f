//! Remote render client.
//!
//! [`RenderClient`] posts one [`PlotRequest`] and returns the body of a
//! successful response. [`RenderWorker`] runs one such call on a background
//! thread so the ui keeps drawing while the service works. There is no retry
//! and no cancellation; a caller that loses interest just ignores the
//! result by its generation number.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::{PlotctlError, Result};
use crate::request::PlotRequest;

/// Error body the render service sends with a failure status.
#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
}

/// Blocking HTTP client for the render service.
#[derive(Debug, Clone)]
pub struct RenderClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl RenderClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Post a request and return the drawing program text.
    pub fn render(&self, request: &PlotRequest) -> Result<String> {
        tracing::debug!(
            "POST {} with {} plot item(s)",
            self.config.endpoint,
            request.plot.len()
        );

        let response = self.http.post(&self.config.endpoint).json(request).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = service_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "no details".to_string());
            return Err(PlotctlError::server(status.as_u16(), message));
        }

        Ok(body)
    }
}

/// Pull the message out of a failure body, falling back to the raw text.
fn service_message(body: &str) -> Option<String> {
    if let Ok(err) = serde_json::from_str::<ServiceError>(body) {
        return Some(err.error);
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Outcome of one background render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// The service answered with a drawing program.
    Rendered {
        /// Submission the response belongs to.
        generation: u64,
        /// Response body.
        body: String,
    },
    /// The call failed.
    Failed {
        /// Submission the failure belongs to.
        generation: u64,
        /// Error description.
        message: String,
    },
}

impl WorkerMessage {
    /// Submission the message belongs to.
    pub fn generation(&self) -> u64 {
        match self {
            WorkerMessage::Rendered { generation, .. } | WorkerMessage::Failed { generation, .. } => {
                *generation
            }
        }
    }
}

/// One render call running on its own thread.
#[derive(Debug)]
pub struct RenderWorker {
    generation: u64,
    rx: Receiver<WorkerMessage>,
    _handle: JoinHandle<()>,
}

impl RenderWorker {
    /// Start posting `request` in the background.
    pub fn start(client: RenderClient, request: PlotRequest, generation: u64) -> Self {
        let (tx, rx) = channel();

        let handle = thread::spawn(move || {
            let message = match client.render(&request) {
                Ok(body) => WorkerMessage::Rendered { generation, body },
                Err(e) => WorkerMessage::Failed {
                    generation,
                    message: e.to_string(),
                },
            };
            // The receiver may be gone if the app quit meanwhile.
            let _ = tx.send(message);
        });

        Self {
            generation,
            rx,
            _handle: handle,
        }
    }

    /// Submission this worker serves.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Non-blocking check for the result.
    pub fn try_result(&self) -> Option<WorkerMessage> {
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(WorkerMessage::Failed {
                generation: self.generation,
                message: "render worker stopped unexpectedly".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_body_is_unwrapped() {
        assert_eq!(
            service_message(r#"{ "error": "invalid style: splines" }"#).as_deref(),
            Some("invalid style: splines")
        );
        assert_eq!(service_message("  bad gateway \n").as_deref(), Some("bad gateway"));
        assert_eq!(service_message(""), None);
    }

    #[test]
    fn worker_message_generation() {
        let msg = WorkerMessage::Failed {
            generation: 7,
            message: "x".into(),
        };
        assert_eq!(msg.generation(), 7);
    }
}
