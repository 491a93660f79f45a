// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP transport for the CIM-XML operation protocol
//!
//! One client is bound to one CIMOM URL and carries a cookie store, a
//! process-wide client id, a per-client message sequence and one reusable
//! scratch buffer. The buffer is deliberately unsynchronized: a client
//! serves one in-flight call at a time, which the `&mut self` receivers
//! enforce at compile time. The sequence counter is atomic and tolerates
//! concurrent reads.

use std::io::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::capture::CaptureSink;
use crate::errors::{WbemError, WbemResult};
use crate::model::message::Cim;
use crate::xml;

static CLIENT_COUNTER: AtomicU64 = AtomicU64::new(0);

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

fn default_timeout() -> u64 {
    30
}

fn default_cim_version() -> String {
    "2.0".to_string()
}

fn default_dtd_version() -> String {
    "2.0".to_string()
}

fn default_protocol_version() -> String {
    "1.0".to_string()
}

/// Configuration for a WBEM connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbemConfig {
    /// CIMOM endpoint, e.g. "http://192.168.1.157:5988/cimom".
    pub base_url: String,

    /// Basic-auth credentials, when the CIMOM requires them.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,

    /// Accept invalid TLS certificates (self-signed CIMOMs are common).
    #[serde(default)]
    pub insecure: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_cim_version")]
    pub cim_version: String,
    #[serde(default = "default_dtd_version")]
    pub dtd_version: String,
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
}

impl Default for WbemConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5988/cimom".to_string(),
            username: None,
            password: None,
            insecure: false,
            timeout_secs: 30,
            cim_version: default_cim_version(),
            dtd_version: default_dtd_version(),
            protocol_version: default_protocol_version(),
        }
    }
}

/// The fault-evaluation function attached to a response envelope.
pub type FaultCheck = fn(&Cim) -> WbemResult<()>;

/// A decoded response envelope together with its fault evaluator. The
/// evaluator is owned by the envelope and invoked after decode; it is
/// never serialized.
pub struct ResponseEnvelope {
    pub cim: Cim,
    check: FaultCheck,
}

impl ResponseEnvelope {
    pub fn new(check: FaultCheck) -> Self {
        Self {
            cim: Cim::default(),
            check,
        }
    }

    /// Run the attached fault-evaluation chain against the decoded envelope.
    pub fn fault(&self) -> WbemResult<()> {
        (self.check)(&self.cim)
    }
}

/// A CIM-XML client bound to one CIMOM endpoint.
pub struct WbemClient {
    http: reqwest::Client,
    config: WbemConfig,
    capture: Option<Arc<dyn CaptureSink>>,
    client_id: u64,
    sequence: AtomicU64,
    buf: Vec<u8>,
}

impl WbemClient {
    pub fn new(config: WbemConfig) -> WbemResult<Self> {
        Self::with_capture(config, None)
    }

    /// Build a client with an optional capture sink for raw traffic.
    pub fn with_capture(
        config: WbemConfig,
        capture: Option<Arc<dyn CaptureSink>>,
    ) -> WbemResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .danger_accept_invalid_certs(config.insecure)
            .build()?;
        let client_id = CLIENT_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;

        info!("WBEM client {} bound to {}", client_id, config.base_url);

        Ok(Self {
            http,
            config,
            capture,
            client_id,
            sequence: AtomicU64::new(0),
            buf: Vec::with_capacity(8 * 1024),
        })
    }

    pub fn config(&self) -> &WbemConfig {
        &self.config
    }

    /// The next message id, `"<client-id>-<sequence>"`.
    pub(crate) fn next_message_id(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.client_id, seq)
    }

    fn open_capture(&self, name: &str) -> Option<Box<dyn std::io::Write + Send>> {
        let sink = self.capture.as_ref()?;
        match sink.open(name) {
            Ok(stream) => Some(stream),
            Err(err) => {
                warn!("capture sink failed to open {}: {}", name, err);
                None
            }
        }
    }

    /// Serialize `request`, POST it with the WBEM headers, buffer the whole
    /// response, decode it into `response` and run the attached fault
    /// evaluator.
    ///
    /// `cim_object` is the raw (unescaped) CIMObject header value: the
    /// namespace path for intrinsic operations, the local instance path
    /// text for extrinsic calls.
    pub(crate) async fn round_trip(
        &mut self,
        method_name: &str,
        cim_object: &str,
        request: &Cim,
        response: &mut ResponseEnvelope,
    ) -> WbemResult<()> {
        self.buf.clear();
        self.buf.extend_from_slice(XML_HEADER.as_bytes());
        xml::encode_envelope(request, &mut self.buf)?;

        let capture_name = request
            .message
            .as_ref()
            .map(|m| format!("{}.log", m.id))
            .unwrap_or_else(|| format!("{}-req.log", self.client_id));
        let mut capture = self.open_capture(&capture_name);
        if let Some(stream) = capture.as_mut() {
            let _ = writeln!(
                stream,
                "POST {} CIMMethod={} CIMObject={}",
                self.config.base_url, method_name, cim_object
            );
            let _ = stream.write_all(&self.buf);
            let _ = stream.write_all(b"\r\n");
        }

        debug!(
            "POST {} {} ({} bytes)",
            self.config.base_url,
            method_name,
            self.buf.len()
        );

        let mut builder = self
            .http
            .post(&self.config.base_url)
            .header("Content-Type", "text/xml; charset=\"utf-8\"")
            .header("CIMProtocolVersion", self.config.protocol_version.as_str())
            .header("CIMOperation", "MethodCall")
            .header("CIMMethod", method_name)
            .header("CIMObject", urlencoding::encode(cim_object).into_owned())
            .body(self.buf.clone());
        if let Some(username) = &self.config.username {
            builder = builder.basic_auth(username, self.config.password.as_deref());
        }

        let res = builder.send().await?;
        let status = res.status();

        // Pegasus bug: an error response may come back with HTTP/1.0, no
        // Content-Length and a connection that never closes. Reading the
        // body would hang, so synthesize the error from the CIMError and
        // PGErrorDetail headers instead.
        if res.content_length().unwrap_or(0) == 0
            && !(status.is_success() || status.is_redirection())
        {
            let cim_error = header_text(&res, "CIMError");
            let error_detail = header_text(&res, "PGErrorDetail");
            let detail = match (cim_error, error_detail) {
                (Some(cim_error), Some(detail)) => format!("{cim_error}: {detail}"),
                (Some(cim_error), None) => cim_error,
                (None, Some(detail)) => detail,
                (None, None) => status.to_string(),
            };
            if let Some(stream) = capture.as_mut() {
                let _ = writeln!(stream, "{status}\r\n{detail}");
            }
            return Err(WbemError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        let body = res.bytes().await?;
        self.buf.clear();
        self.buf.extend_from_slice(&body);

        if let Some(stream) = capture.as_mut() {
            let _ = writeln!(stream, "{status}");
            let _ = stream.write_all(&self.buf);
        }

        if status != StatusCode::OK {
            let detail = if self.buf.is_empty() {
                status.to_string()
            } else {
                format!("{}: {}", status, String::from_utf8_lossy(&self.buf))
            };
            return Err(WbemError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        response.cim = match xml::decode_envelope(&self.buf) {
            Ok(cim) => cim,
            Err(source) => {
                return Err(WbemError::Decode {
                    bytes: self.buf.clone(),
                    source,
                })
            }
        };

        if let Err(fault) = response.fault() {
            return Err(WbemError::Fault {
                bytes: self.buf.clone(),
                source: Box::new(fault),
            });
        }
        Ok(())
    }
}

fn header_text(res: &reqwest::Response, name: &str) -> Option<String> {
    res.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
