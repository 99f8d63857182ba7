//! The probe client: one TCP session against the backend dispatch service.
//!
//! A probe run walks a fixed sequence: connect, send one command frame,
//! poll for a response frame whose payload contains a success marker:
//!
//! ```text
//! Disconnected ── connect ──▶ Connected ── send_command ──▶ Sent
//!                                                            │
//!                       poll_for_response ◀─────────────────┘
//!                        │         │        │
//!                     Success   TimedOut   Error
//! ```
//!
//! Polling is deliberately simple: each read attempt is bounded by the
//! remaining deadline, and after an empty read the client sleeps for a
//! short fixed interval before retrying.  This is a diagnostic tool, not a
//! production event loop; the only cancellation mechanism is deadline
//! expiry.  Any socket error aborts the session; the connection is
//! dropped on scope exit and nothing is retried.

use std::net::SocketAddr;
use std::time::Duration;

use lanadmin_core::protocol::{
    decode_header, decode_text, encode_frame, Frame, ProtocolError, HEADER_SIZE,
};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

/// Default address of the backend dispatch service.
pub const DEFAULT_BACKEND_HOST: &str = "127.0.0.1";
/// Default TCP port of the backend dispatch service.
pub const DEFAULT_BACKEND_PORT: u16 = 9091;
/// Client identifier attached to outgoing frames by default.
pub const DEFAULT_CLIENT_ID: u32 = 100;
/// Backend instance targeted by default.
pub const DEFAULT_BACKEND_ID: u32 = 1;
/// Command payload sent when none is given on the command line.
pub const DEFAULT_COMMAND: &str = "file_list .";
/// Substring that marks a successful response payload.
pub const DEFAULT_SUCCESS_MARKER: &str = "DATA:FILES:";

/// Configuration for one probe session.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Address of the backend dispatch service's TCP endpoint.
    pub backend_addr: SocketAddr,
    /// Opaque identifier attached to outgoing frames.
    pub client_id: u32,
    /// Opaque identifier of the backend instance the probe targets.
    pub backend_id: u32,
    /// Upper bound on TCP connection establishment.
    pub connect_timeout: Duration,
    /// Total time to wait for a matching response, measured from the start
    /// of polling.
    pub response_timeout: Duration,
    /// Sleep between unsuccessful read attempts while polling.
    pub poll_interval: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            backend_addr: format!("{DEFAULT_BACKEND_HOST}:{DEFAULT_BACKEND_PORT}")
                .parse()
                .unwrap(),
            client_id: DEFAULT_CLIENT_ID,
            backend_id: DEFAULT_BACKEND_ID,
            connect_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// Errors that can occur during a probe session.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The TCP connection could not be established at the OS level.
    #[error("failed to connect to backend at {addr}: {source}")]
    ConnectFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The connect attempt did not complete within the configured timeout.
    #[error("timed out connecting to backend at {addr} after {timeout:?}")]
    ConnectTimedOut { addr: SocketAddr, timeout: Duration },

    /// An I/O error occurred on the established connection.
    #[error("probe connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the connection in the middle of a frame header.
    ///
    /// A close *before* any header byte is the normal "no frame" signal
    /// and is not an error; a close part-way through the 12-byte header
    /// leaves the stream unparseable.
    #[error("stream closed mid-header after {received} of 12 bytes")]
    TruncatedHeader { received: usize },

    /// Frame bytes could not be decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Terminal outcome of a completed (non-erroring) probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A frame whose payload contained the success marker arrived in time.
    Success {
        /// The lossy-decoded payload text of the matching frame.
        response: String,
    },
    /// The deadline elapsed without a matching frame.
    TimedOut {
        /// The deadline that was exhausted.
        waited: Duration,
    },
}

/// A connected probe session.
///
/// Owns the TCP stream; dropping the client closes the connection, which
/// covers every exit path including errors.
pub struct ProbeClient {
    config: ProbeConfig,
    stream: TcpStream,
}

impl ProbeClient {
    /// Opens a TCP connection to the backend, bounded by the configured
    /// connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ConnectTimedOut`] when the timeout elapses and
    /// [`ProbeError::ConnectFailed`] on OS-level connection failure.
    pub async fn connect(config: ProbeConfig) -> Result<Self, ProbeError> {
        let addr = config.backend_addr;
        let stream = time::timeout(config.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| ProbeError::ConnectTimedOut {
                addr,
                timeout: config.connect_timeout,
            })?
            .map_err(|source| ProbeError::ConnectFailed { addr, source })?;

        info!("connected to backend at {addr}");
        Ok(Self { config, stream })
    }

    /// Encodes `command` into one frame and writes it as a single
    /// transmission.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Io`] if the write fails; the session is not
    /// usable afterwards.
    pub async fn send_command(&mut self, command: &str) -> Result<(), ProbeError> {
        let bytes = encode_frame(
            command.as_bytes(),
            self.config.client_id,
            self.config.backend_id,
        );
        self.stream.write_all(&bytes).await?;
        debug!(
            "sent command frame: {command:?} ({} bytes, client_id={}, backend_id={})",
            bytes.len(),
            self.config.client_id,
            self.config.backend_id
        );
        Ok(())
    }

    /// Polls for a response frame whose payload contains `marker`.
    ///
    /// Decodes one frame per attempt, bounded by the time remaining until
    /// the deadline; after an empty read (connection closed or idle) it
    /// sleeps for the poll interval before retrying.  Deadline expiry is a
    /// normal outcome ([`ProbeOutcome::TimedOut`]), not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on socket or header decode failures, which
    /// abort the session.
    pub async fn poll_for_response(&mut self, marker: &str) -> Result<ProbeOutcome, ProbeError> {
        let deadline = Instant::now() + self.config.response_timeout;

        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(ProbeOutcome::TimedOut {
                    waited: self.config.response_timeout,
                });
            }

            match time::timeout(deadline - now, read_frame(&mut self.stream)).await {
                Err(_) => {
                    return Ok(ProbeOutcome::TimedOut {
                        waited: self.config.response_timeout,
                    });
                }
                Ok(Err(e)) => return Err(e),
                Ok(Ok(None)) => {
                    debug!("no frame available; retrying in {:?}", self.config.poll_interval);
                    time::sleep(self.config.poll_interval).await;
                }
                Ok(Ok(Some(frame))) => {
                    if frame.is_truncated() {
                        warn!(
                            "frame truncated: header declared {} bytes, received {}",
                            frame.header.payload_len,
                            frame.payload.len()
                        );
                    }
                    let text = decode_text(&frame.payload);
                    if text.contains(marker) {
                        info!("matching response received ({} bytes)", frame.payload.len());
                        return Ok(ProbeOutcome::Success { response: text });
                    }
                    debug!(
                        "frame without success marker ({} bytes); continuing to poll",
                        frame.payload.len()
                    );
                }
            }
        }
    }
}

/// Reads one frame from `stream`.
///
/// Returns `Ok(None)` when the stream is cleanly closed before any header
/// byte arrives (the "no frame" signal).  The payload is accumulated until
/// the declared length is reached or the stream closes early; on early
/// close the frame carries the bytes collected so far rather than an
/// error, so callers must treat decoded frames as potentially truncated
/// (see [`Frame::is_truncated`]).
///
/// # Errors
///
/// Returns [`ProbeError::TruncatedHeader`] when the stream closes after a
/// partial header, and [`ProbeError::Io`] on read failures.
pub async fn read_frame<S>(stream: &mut S) -> Result<Option<Frame>, ProbeError>
where
    S: AsyncRead + Unpin,
{
    let mut header_buf = [0u8; HEADER_SIZE];
    let mut filled = 0;
    while filled < HEADER_SIZE {
        let n = stream.read(&mut header_buf[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(ProbeError::TruncatedHeader { received: filled });
        }
        filled += n;
    }

    let header = decode_header(&header_buf)?;

    // Accumulate the payload in bounded chunks; the declared length is not
    // trusted for a single up-front allocation.
    let mut payload = Vec::new();
    let mut remaining = header.payload_len as usize;
    let mut chunk = [0u8; 4096];
    while remaining > 0 {
        let want = remaining.min(chunk.len());
        let n = stream.read(&mut chunk[..want]).await?;
        if n == 0 {
            // Early close: hand back what arrived.
            break;
        }
        payload.extend_from_slice(&chunk[..n]);
        remaining -= n;
    }

    Ok(Some(Frame { header, payload }))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
