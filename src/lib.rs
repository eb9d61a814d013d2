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

//! A blocking client for the [WebHDFS](https://hadoop.apache.org/docs/stable/hadoop-project-dist/hadoop-hdfs/WebHDFS.html) REST API.
//!
//! The client translates filesystem operations into HTTP requests against
//! the distributed filesystem's gateway, streams file contents in both
//! directions without buffering whole payloads, and folds transport
//! failures, unexpected statuses and the gateway's structured remote
//! exceptions into one error model.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::io::Cursor;
//!
//! use webhdfs_client::Client;
//! use webhdfs_client::ClientConfig;
//! use webhdfs_client::ReadOptions;
//! use webhdfs_client::WriteOptions;
//!
//! fn main() -> webhdfs_client::Result<()> {
//!     let config = ClientConfig::new().with_user("hdfs");
//!     let mut client = Client::new("namenode.example.com", config)?;
//!
//!     // Upload a file; the gateway redirects us to a data node first.
//!     let data = Cursor::new(b"Hello, World!".to_vec());
//!     client.write(data, "/tmp/hello.txt", &WriteOptions::new().with_overwrite(true))?;
//!
//!     // Download it back.
//!     let mut content = Vec::new();
//!     client.read("/tmp/hello.txt", &mut content, &ReadOptions::new())?;
//!
//!     // Inspect the directory.
//!     for entry in client.list_dir("/tmp")? {
//!         println!("{} ({} bytes)", entry.path_suffix, entry.length);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency
//!
//! Every operation blocks until its HTTP exchange completes. Operations
//! take `&mut self`, so calls on one client are serialized by the borrow
//! checker; use one client instance per thread.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]
// Deny unused qualifications.
#![deny(unused_qualifications)]

mod client;
mod config;
mod error;
mod message;
mod ops;
mod transport;
mod uri;

pub use client::Client;
pub use client::DEFAULT_PORT;
pub use config::ClientConfig;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;
pub use message::FileStatus;
pub use message::FileStatusType;
pub use ops::MakeDirOptions;
pub use ops::ReadOptions;
pub use ops::RemoveOptions;
pub use ops::WriteOptions;
