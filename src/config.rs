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

use std::time::Duration;

/// Connection settings for a [`Client`](crate::Client).
///
/// The config is immutable once the client is constructed. Unset fields mean
/// "let the transport use its own default": the connect timeout falls back to
/// the HTTP stack's default and the data-transfer timeout is unbounded.
///
/// ```
/// use std::time::Duration;
///
/// use webhdfs_client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_connect_timeout(Duration::from_secs(5))
///     .with_user("hdfs");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    connect_timeout: Option<Duration>,
    data_transfer_timeout: Option<Duration>,
    user: Option<String>,
}

impl ClientConfig {
    /// Create a new `ClientConfig` with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout for establishing a connection to the gateway.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the timeout for a whole data transfer.
    ///
    /// This bounds the complete exchange including streaming the body, so
    /// pick it with the expected payload sizes in mind. Unset means
    /// unbounded.
    pub fn with_data_transfer_timeout(mut self, timeout: Duration) -> Self {
        self.data_transfer_timeout = Some(timeout);
        self
    }

    /// Set the user name sent as the `user.name` authentication parameter.
    ///
    /// An empty user name is ignored: requests stay anonymous and the
    /// parameter is omitted entirely.
    pub fn with_user(mut self, user: &str) -> Self {
        if !user.is_empty() {
            self.user = Some(user.to_string());
        }
        self
    }

    /// Get the configured connect timeout.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Get the configured data-transfer timeout.
    pub fn data_transfer_timeout(&self) -> Option<Duration> {
        self.data_transfer_timeout
    }

    /// Get the configured user name.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}
