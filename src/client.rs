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

use std::io::Read;
use std::io::Write;

use http::StatusCode;
use log::debug;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::error::Result;
use crate::message;
use crate::message::FileStatus;
use crate::ops::MakeDirOptions;
use crate::ops::ReadOptions;
use crate::ops::RemoveOptions;
use crate::ops::WriteOptions;
use crate::transport::HttpRequest;
use crate::transport::Method;
use crate::transport::Transport;
use crate::uri::percent_encode_path;
use crate::uri::UrlBuilder;

/// Default HTTP port of the gateway's name node.
pub const DEFAULT_PORT: u16 = 50070;

/// A WebHDFS client bound to one gateway.
///
/// The client owns its URL builder and transport engine for its whole
/// lifetime; both are created at construction and released on drop. Every
/// operation blocks the calling thread until the full HTTP exchange,
/// including body streaming, completes or fails. Operations take
/// `&mut self`: one client instance serves one call at a time, use one
/// instance per thread for concurrent access.
pub struct Client {
    urls: UrlBuilder,
    transport: Transport,
}

impl Client {
    /// Create a client for the gateway at `host:DEFAULT_PORT`.
    pub fn new(host: &str, config: ClientConfig) -> Result<Self> {
        Self::with_port(host, DEFAULT_PORT, config)
    }

    /// Create a client for the gateway at `host:port`.
    pub fn with_port(host: &str, port: u16, config: ClientConfig) -> Result<Self> {
        debug!("building webhdfs client for {host}:{port}");

        let urls = UrlBuilder::new(host, port, config.user());
        let transport = Transport::new(&config)?;
        Ok(Self { urls, transport })
    }

    /// Upload `source` as the file at `path`.
    ///
    /// WebHDFS requires the client to be redirected from the name node to
    /// the data node that will hold the file before any payload moves, so
    /// this issues two requests: a body-less `CREATE` expecting a temporary
    /// redirect, then a `PUT` of the data to the redirect target. A redirect
    /// status without a target aborts before any data is sent.
    pub fn write(
        &mut self,
        source: impl Read + Send + 'static,
        path: &str,
        opts: &WriteOptions,
    ) -> Result<()> {
        let url = self.urls.url_with(path, "CREATE", &opts.query_fragment());
        let reply = self.transport.execute(HttpRequest::new(
            Method::Put,
            url,
            StatusCode::TEMPORARY_REDIRECT,
        ))?;

        let Some(location) = reply.redirect else {
            return Err(Error::new(ErrorKind::Protocol, "no redirection to data node")
                .with_operation("write")
                .with_context("path", path));
        };

        debug!("write of {path} redirected to data node");
        let reply = self.transport.execute(
            HttpRequest::new(Method::Put, location, StatusCode::CREATED)
                .source(Box::new(source)),
        )?;
        debug!("write of {path} completed with {}", reply.status);
        Ok(())
    }

    /// Download the file at `path` into `sink`.
    pub fn read(&mut self, path: &str, mut sink: impl Write, opts: &ReadOptions) -> Result<()> {
        let url = self.urls.url_with(path, "OPEN", &opts.query_fragment());
        self.transport.execute(
            HttpRequest::new(Method::Get, url, StatusCode::OK)
                .follow_redirects()
                .sink(&mut sink),
        )?;
        Ok(())
    }

    /// Create the directory at `path`, including missing parents.
    pub fn make_dir(&mut self, path: &str, opts: &MakeDirOptions) -> Result<()> {
        let url = self.urls.url_with(path, "MKDIRS", &opts.query_fragment());
        let body = self.boolean_result_body(Method::Put, url)?;
        if body != message::BOOLEAN_TRUE_BODY {
            return Err(boolean_failure(
                "make_dir",
                format!("cannot create directory {path}"),
                &body,
            ));
        }
        Ok(())
    }

    /// List the entries of the directory at `path`.
    ///
    /// A reply that does not parse as a listing is a hard error; this never
    /// silently returns an empty listing.
    pub fn list_dir(&mut self, path: &str) -> Result<Vec<FileStatus>> {
        let url = self.urls.url(path, "LISTSTATUS");
        let mut body = Vec::new();
        self.transport.execute(
            HttpRequest::new(Method::Get, url, StatusCode::OK)
                .follow_redirects()
                .sink(&mut body),
        )?;
        message::parse_dir_listing(&body)
            .map_err(|err| err.with_operation("list_dir").with_context("path", path))
    }

    /// Fetch the status of the single entry at `path`.
    pub fn status(&mut self, path: &str) -> Result<FileStatus> {
        let url = self.urls.url(path, "GETFILESTATUS");
        let mut body = Vec::new();
        self.transport.execute(
            HttpRequest::new(Method::Get, url, StatusCode::OK)
                .follow_redirects()
                .sink(&mut body),
        )?;
        message::parse_file_status(&body)
            .map_err(|err| err.with_operation("status").with_context("path", path))
    }

    /// Remove the file or directory at `path`.
    pub fn remove(&mut self, path: &str, opts: &RemoveOptions) -> Result<()> {
        let url = self.urls.url_with(path, "DELETE", &opts.query_fragment());
        let body = self.boolean_result_body(Method::Delete, url)?;
        if body != message::BOOLEAN_TRUE_BODY {
            return Err(boolean_failure(
                "remove",
                format!("cannot delete {path}"),
                &body,
            ));
        }
        Ok(())
    }

    /// Rename the entry at `path` to `new_path`.
    pub fn rename(&mut self, path: &str, new_path: &str) -> Result<()> {
        let destination = format!("&destination={}", percent_encode_path(new_path));
        let url = self.urls.url_with(path, "RENAME", &destination);
        let body = self.boolean_result_body(Method::Put, url)?;
        if body != message::BOOLEAN_TRUE_BODY {
            return Err(boolean_failure(
                "rename",
                format!("cannot rename {path} to {new_path}"),
                &body,
            ));
        }
        Ok(())
    }

    /// Run a boolean-result operation and hand back the raw reply body for
    /// the strict success comparison.
    fn boolean_result_body(&mut self, method: Method, url: String) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        self.transport
            .execute(HttpRequest::new(method, url, StatusCode::OK).sink(&mut body))?;
        Ok(body)
    }
}

fn boolean_failure(operation: &'static str, message: String, reply: &[u8]) -> Error {
    Error::new(ErrorKind::OperationFailed, message)
        .with_operation(operation)
        .with_context("reply", String::from_utf8_lossy(reply))
}
