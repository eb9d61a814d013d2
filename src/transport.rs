// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The transport engine: executes one HTTP exchange per request descriptor.
//!
//! The engine knows nothing about individual filesystem operations; it takes
//! an [`HttpRequest`] describing method, URL, redirect handling, streaming
//! endpoints and the single status code that counts as success, and returns
//! an [`HttpReply`]. Status mismatches are turned into errors here, after an
//! attempt to read the body as the gateway's remote-exception envelope.

use std::io;
use std::io::Read;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use http::header::LOCATION;
use http::StatusCode;
use log::debug;
use reqwest::blocking::Body;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::error::Result;
use crate::message;

const COPY_BUFFER_SIZE: usize = 16 * 1024;

/// HTTP method of a gateway request.
///
/// POST is declared because the wire protocol defines it, but no operation
/// of this client issues one; the engine rejects it before touching the
/// network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Put,
    Post,
    Delete,
}

/// Describes a single HTTP exchange to perform.
///
/// A descriptor lives for one call to [`Transport::execute`] and carries no
/// identity beyond it.
pub(crate) struct HttpRequest<'a> {
    method: Method,
    url: String,
    follow_redirects: bool,
    source: Option<Box<dyn Read + Send + 'static>>,
    sink: Option<&'a mut dyn Write>,
    expect_status: StatusCode,
}

impl<'a> HttpRequest<'a> {
    pub fn new(method: Method, url: impl Into<String>, expect_status: StatusCode) -> Self {
        Self {
            method,
            url: url.into(),
            follow_redirects: false,
            source: None,
            sink: None,
            expect_status,
        }
    }

    /// Let the transport follow redirect statuses instead of reporting them.
    pub fn follow_redirects(mut self) -> Self {
        self.follow_redirects = true;
        self
    }

    /// Stream `source` as the request body. The length is not known up
    /// front, so the body goes out with chunked transfer encoding.
    pub fn source(mut self, source: Box<dyn Read + Send + 'static>) -> Self {
        self.source = Some(source);
        self
    }

    /// Stream the response body into `sink` when the exchange succeeds.
    pub fn sink(mut self, sink: &'a mut dyn Write) -> Self {
        self.sink = Some(sink);
        self
    }
}

/// The outcome of a successful [`Transport::execute`] call.
#[derive(Debug)]
pub(crate) struct HttpReply {
    /// Final HTTP status code; always equals the expected status, since a
    /// mismatch is reported as an error instead.
    pub status: StatusCode,
    /// Body bytes captured for diagnostics when the status mismatched.
    /// Control responses only; bulk transfers never take that path.
    pub unexpected_body: Vec<u8>,
    /// The redirect target, populated only when redirects were not being
    /// followed and the gateway answered with one.
    pub redirect: Option<String>,
}

/// A slot for an error raised by the caller-supplied source while the HTTP
/// stack was pulling request bytes through it. The stack folds such errors
/// into its own generic failure, so the real cause is recorded out-of-band
/// and re-surfaced after the exchange.
type SourceFailure = Arc<Mutex<Option<io::Error>>>;

struct RecordingReader {
    inner: Box<dyn Read + Send + 'static>,
    failure: SourceFailure,
}

impl Read for RecordingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Short reads, including zero for end of stream, pass through as-is.
        match self.inner.read(buf) {
            Ok(n) => Ok(n),
            Err(err) => {
                let recorded = io::Error::new(err.kind(), err.to_string());
                *lock(&self.failure) = Some(recorded);
                Err(err)
            }
        }
    }
}

fn lock(failure: &SourceFailure) -> std::sync::MutexGuard<'_, Option<io::Error>> {
    match failure.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Executes HTTP exchanges for the client.
///
/// Redirect handling is a per-client policy in the underlying HTTP stack,
/// so the engine owns two clients built once at construction: one that
/// follows redirects and one that reports them. Both share the configured
/// timeouts and are dropped with the engine.
pub(crate) struct Transport {
    direct: Client,
    following: Client,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let direct = Self::build_client(config, Policy::none())?;
        let following = Self::build_client(config, Policy::limited(10))?;
        Ok(Self { direct, following })
    }

    fn build_client(config: &ClientConfig, redirect: Policy) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(concat!("webhdfs-client/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect);
        // An unset data-transfer timeout leaves the exchange unbounded.
        if let Some(timeout) = config.data_transfer_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        builder.build().map_err(|err| {
            Error::new(ErrorKind::ConfigInvalid, "cannot build http client").set_source(err)
        })
    }

    /// Perform the exchange described by `req`.
    ///
    /// Fails when the HTTP stack cannot complete the exchange, when the
    /// caller-supplied source or sink fails mid-stream, or when the final
    /// status differs from the expected one.
    pub fn execute(&self, req: HttpRequest<'_>) -> Result<HttpReply> {
        let HttpRequest {
            method,
            url,
            follow_redirects,
            source,
            sink,
            expect_status,
        } = req;

        let client = if follow_redirects {
            &self.following
        } else {
            &self.direct
        };

        let builder = match method {
            Method::Get => client.get(&url),
            Method::Put => client.put(&url),
            Method::Delete => client.delete(&url),
            Method::Post => {
                return Err(
                    Error::new(ErrorKind::Unsupported, "POST requests are not implemented")
                        .with_context("url", &url),
                );
            }
        };

        let mut source_failure: Option<SourceFailure> = None;
        let builder = match source {
            Some(reader) => {
                let failure = SourceFailure::default();
                source_failure = Some(failure.clone());
                builder.body(Body::new(RecordingReader {
                    inner: reader,
                    failure,
                }))
            }
            // PUT without a source is a zero-length upload.
            None => builder,
        };

        let mut resp = builder.send().map_err(|err| {
            // A source failure makes the stack report a generic send error;
            // the recorded cause wins over it.
            if let Some(io_err) = source_failure.as_ref().and_then(|f| lock(f).take()) {
                Error::new(ErrorKind::LocalIo, "request data source failed").set_source(io_err)
            } else {
                Error::new(ErrorKind::Transport, "http exchange failed")
                    .with_context("url", &url)
                    .set_source(err)
            }
        })?;

        let status = resp.status();
        debug!("{method:?} {url} answered {status}");

        let mut reply = HttpReply {
            status,
            unexpected_body: Vec::new(),
            redirect: None,
        };

        if !follow_redirects {
            if let Some(location) = resp.headers().get(LOCATION) {
                let location = location.to_str().map_err(|err| {
                    Error::new(ErrorKind::Protocol, "redirect target is not valid text")
                        .set_source(err)
                })?;
                reply.redirect = Some(location.to_string());
            }
        }

        if status != expect_status {
            // Capture is best effort; the connection may already be broken.
            let _ = resp.read_to_end(&mut reply.unexpected_body);
            return Err(unexpected_status(
                status,
                expect_status,
                &reply.unexpected_body,
            ));
        }

        if let Some(sink) = sink {
            copy_response(&mut resp, sink)?;
        }

        Ok(reply)
    }
}

/// Map a status mismatch to an error: a parseable remote-exception body
/// fails with the remote message, anything else with a generic error that
/// carries the status code and any captured body text.
fn unexpected_status(status: StatusCode, expected: StatusCode, body: &[u8]) -> Error {
    if let Some(remote) = message::parse_remote_exception(body) {
        return Error::new(ErrorKind::RemoteException, remote.message)
            .with_context("exception", remote.exception)
            .with_context("status", status.as_u16());
    }

    let mut err = Error::new(
        ErrorKind::UnexpectedResponse,
        format!("unexpected server response code: {}", status.as_u16()),
    )
    .with_context("expected", expected.as_u16());
    if !body.is_empty() {
        err = err.with_context("body", String::from_utf8_lossy(body));
    }
    err
}

/// Pump the response body into the sink, keeping transport failures and
/// sink failures on distinct error channels.
fn copy_response(resp: &mut Response, sink: &mut dyn Write) -> Result<()> {
    let mut buf = [0u8; COPY_BUFFER_SIZE];
    loop {
        let n = resp.read(&mut buf).map_err(|err| {
            Error::new(ErrorKind::Transport, "response stream interrupted").set_source(err)
        })?;
        if n == 0 {
            return Ok(());
        }
        sink.write_all(&buf[..n]).map_err(|err| {
            Error::new(ErrorKind::LocalIo, "data sink rejected response bytes").set_source(err)
        })?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_fails_without_network() {
        let transport = Transport::new(&ClientConfig::new()).expect("must build");

        // The host would never resolve; an Unsupported error proves the
        // request was rejected before any network attempt.
        let req = HttpRequest::new(
            Method::Post,
            "http://webhdfs.invalid:50070/webhdfs/v1/x?op=APPEND",
            StatusCode::OK,
        );
        let err = transport.execute(req).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let transport = Transport::new(&ClientConfig::new()).expect("must build");

        let req = HttpRequest::new(
            Method::Get,
            // Port 1 on loopback is never a WebHDFS gateway.
            "http://127.0.0.1:1/webhdfs/v1/x?op=OPEN",
            StatusCode::OK,
        );
        let err = transport.execute(req).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_recording_reader_keeps_the_cause() {
        struct FailingSource;

        impl Read for FailingSource {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let failure = SourceFailure::default();
        let mut reader = RecordingReader {
            inner: Box::new(FailingSource),
            failure: failure.clone(),
        };

        let mut buf = [0u8; 8];
        assert!(reader.read(&mut buf).is_err());

        let recorded = lock(&failure).take().expect("must be recorded");
        assert_eq!(recorded.to_string(), "disk on fire");
    }
}
