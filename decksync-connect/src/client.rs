//! Blocking gateway to the note service.
//!
//! All communication is synchronous: every call blocks until the service
//! answers. Batching groups requests into one `multi` payload; nothing is
//! dispatched concurrently and nothing is retried.

use serde_json::{json, Value};

use crate::envelope::{unwrap_envelope, BatchEnvelope, Command, PROTOCOL_VERSION};
use crate::error::ConnectError;

/// Endpoint used when no override is given.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8765";

/// Seam between the gateway and the wire.
///
/// Production code goes through [`HttpTransport`]; tests substitute
/// scripted implementations.
pub trait Transport {
    /// Send one JSON payload and return the raw JSON response.
    fn exchange(&self, payload: &Value) -> Result<Value, ConnectError>;
}

/// Blocking HTTP transport posting to a fixed endpoint.
///
/// The endpoint is set once at construction and immutable thereafter.
pub struct HttpTransport {
    agent: ureq::Agent,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            url: url.into(),
        }
    }
}

impl Transport for HttpTransport {
    fn exchange(&self, payload: &Value) -> Result<Value, ConnectError> {
        let response = self
            .agent
            .post(&self.url)
            .send_json(payload)
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => ConnectError::Protocol(format!(
                    "note service answered with HTTP {code} instead of an envelope"
                )),
                ureq::Error::Transport(transport) => ConnectError::Transport {
                    url: self.url.clone(),
                    detail: transport.to_string(),
                },
            })?;
        response.into_json().map_err(|err| {
            ConnectError::Protocol(format!("response body is not valid JSON: {err}"))
        })
    }
}

/// Client for the note-service RPC protocol.
pub struct NoteService {
    transport: Box<dyn Transport>,
}

impl NoteService {
    /// Gateway over HTTP to `url`.
    pub fn connect(url: impl Into<String>) -> Self {
        Self::with_transport(Box::new(HttpTransport::new(url)))
    }

    /// Gateway over a caller-supplied transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Issue one action and unwrap its response envelope.
    pub fn call(&self, command: &Command) -> Result<Value, ConnectError> {
        tracing::debug!(action = command.action(), "calling note service");
        let payload = command.to_versioned_value()?;
        let response = self.transport.exchange(&payload)?;
        unwrap_envelope(response)
    }

    /// Submit every request in `batch` as one `multi` call.
    ///
    /// Returns exactly one unwrapped result per request, in request order.
    /// Each element is unwrapped independently; the first remote error
    /// among the sub-responses propagates.
    pub fn call_batch(&self, batch: &BatchEnvelope) -> Result<Vec<Value>, ConnectError> {
        tracing::debug!(requests = batch.len(), "submitting batched call");
        let actions = batch
            .requests()
            .iter()
            .map(Command::to_versioned_value)
            .collect::<Result<Vec<_>, _>>()?;
        let payload = json!({
            "action": "multi",
            "params": { "actions": actions },
            "version": PROTOCOL_VERSION,
        });
        let response = self.transport.exchange(&payload)?;
        let results = unwrap_envelope(response)?;
        let Value::Array(results) = results else {
            return Err(ConnectError::Protocol(
                "multi result is not a list".to_owned(),
            ));
        };
        if results.len() != batch.len() {
            return Err(ConnectError::Protocol(format!(
                "multi returned {} results for {} requests",
                results.len(),
                batch.len()
            )));
        }
        results.into_iter().map(unwrap_envelope).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
