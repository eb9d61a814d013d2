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

//! WebHDFS response messages.

use serde::Deserialize;
use serde::Deserializer;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::error::Result;

/// The exact reply body that signals success for the boolean-result
/// operations (mkdir, delete, rename). The comparison is byte equality:
/// whitespace differences, extra fields, or a `false` result all count as
/// failure.
pub(crate) const BOOLEAN_TRUE_BODY: &[u8] = br#"{"boolean":true}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RemoteExceptionWrapper {
    remote_exception: RemoteException,
}

/// RemoteException is the structured error payload returned by the gateway
/// when an operation fails logically.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoteException {
    #[serde(default = "unknown_exception")]
    pub exception: String,
    #[serde(default)]
    pub message: String,
}

fn unknown_exception() -> String {
    "Unknown".to_string()
}

/// Try to parse a response body as the gateway's remote-exception envelope.
///
/// Returns `Some` only when the body is valid JSON whose top-level object
/// has a `RemoteException` member.
pub(crate) fn parse_remote_exception(body: &[u8]) -> Option<RemoteException> {
    serde_json::from_slice::<RemoteExceptionWrapper>(body)
        .ok()
        .map(|w| w.remote_exception)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FileStatusesWrapper {
    file_statuses: FileStatuses,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FileStatuses {
    file_status: Vec<FileStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FileStatusWrapper {
    file_status: FileStatus,
}

/// One filesystem entry, as returned by directory listing and file status
/// queries. Fields are copied verbatim from the gateway's JSON; timestamps
/// are milliseconds since the epoch as the gateway sends them.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileStatus {
    /// Last access time, in epoch milliseconds.
    pub access_time: i64,
    /// Block size of the file, in bytes.
    pub block_size: u64,
    /// Owning group.
    pub group: String,
    /// Byte length of the file.
    pub length: u64,
    /// Last modification time, in epoch milliseconds.
    pub modification_time: i64,
    /// Owning user.
    pub owner: String,
    /// Name of the entry, relative to the queried directory.
    pub path_suffix: String,
    /// Permission string in octal digits, e.g. `"644"`.
    pub permission: String,
    /// Replication factor.
    pub replication: u32,
    /// Whether the entry is a file or a directory.
    #[serde(rename = "type")]
    pub ty: FileStatusType,
}

/// The two kinds of filesystem entry a [`FileStatus`] can describe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileStatusType {
    /// A regular file.
    File,
    /// A directory.
    #[default]
    Directory,
}

impl<'de> Deserialize<'de> for FileStatusType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // The gateway contract: the literal "FILE" is a file, anything else
        // is a directory.
        let ty = String::deserialize(deserializer)?;
        Ok(match ty.as_str() {
            "FILE" => FileStatusType::File,
            _ => FileStatusType::Directory,
        })
    }
}

/// Parse a `LISTSTATUS` reply body into its entries.
///
/// A body that is not valid JSON or lacks the `FileStatuses.FileStatus`
/// array is a hard error; a listing is never silently empty.
pub(crate) fn parse_dir_listing(body: &[u8]) -> Result<Vec<FileStatus>> {
    let wrapper: FileStatusesWrapper = serde_json::from_slice(body).map_err(|err| {
        Error::new(
            ErrorKind::UnexpectedResponse,
            "cannot parse directory listing",
        )
        .set_source(err)
    })?;
    Ok(wrapper.file_statuses.file_status)
}

/// Parse a `GETFILESTATUS` reply body into its single entry.
pub(crate) fn parse_file_status(body: &[u8]) -> Result<FileStatus> {
    let wrapper: FileStatusWrapper = serde_json::from_slice(body).map_err(|err| {
        Error::new(ErrorKind::UnexpectedResponse, "cannot parse file status").set_source(err)
    })?;
    Ok(wrapper.file_status)
}
