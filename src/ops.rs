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

//! Per-operation options.
//!
//! Each operation takes an immutable options value; unset fields are simply
//! omitted from the request so the gateway applies its own defaults. All
//! types serialize through the same query-fragment shape, a sequence of
//! `&name=value` pairs appended after the `op` parameter.

/// Serialize `(name, value)` pairs into a query fragment.
fn query_fragment(pairs: &[(&'static str, String)]) -> String {
    let mut fragment = String::new();
    for (name, value) in pairs {
        fragment.push('&');
        fragment.push_str(name);
        fragment.push('=');
        fragment.push_str(value);
    }
    fragment
}

/// Options for [`Client::write`](crate::Client::write).
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    overwrite: Option<bool>,
    block_size: Option<u64>,
    replication: Option<u32>,
    permission: Option<u32>,
    buffer_size: Option<usize>,
}

impl WriteOptions {
    /// Create a new `WriteOptions` with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether an existing file at the target path is overwritten.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    /// Set the block size of the created file, in bytes.
    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = Some(block_size);
        self
    }

    /// Set the replication factor of the created file.
    pub fn with_replication(mut self, replication: u32) -> Self {
        self.replication = Some(replication);
        self
    }

    /// Set the permission of the created file, as octal digits (e.g. `644`).
    pub fn with_permission(mut self, permission: u32) -> Self {
        self.permission = Some(permission);
        self
    }

    /// Set the size of the buffer used transferring data.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    pub(crate) fn query_fragment(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(v) = self.overwrite {
            pairs.push(("overwrite", v.to_string()));
        }
        if let Some(v) = self.block_size {
            pairs.push(("blocksize", v.to_string()));
        }
        if let Some(v) = self.replication {
            pairs.push(("replication", v.to_string()));
        }
        if let Some(v) = self.permission {
            pairs.push(("permission", v.to_string()));
        }
        if let Some(v) = self.buffer_size {
            pairs.push(("buffersize", v.to_string()));
        }
        query_fragment(&pairs)
    }
}

/// Options for [`Client::read`](crate::Client::read).
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    offset: Option<u64>,
    length: Option<u64>,
    buffer_size: Option<usize>,
}

impl ReadOptions {
    /// Create a new `ReadOptions` with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the byte offset to start reading from.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the number of bytes to read; unset reads to the end of the file.
    pub fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the size of the buffer used transferring data.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    pub(crate) fn query_fragment(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(v) = self.offset {
            pairs.push(("offset", v.to_string()));
        }
        if let Some(v) = self.length {
            pairs.push(("length", v.to_string()));
        }
        if let Some(v) = self.buffer_size {
            pairs.push(("buffersize", v.to_string()));
        }
        query_fragment(&pairs)
    }
}

/// Options for [`Client::make_dir`](crate::Client::make_dir).
#[derive(Debug, Clone, Default)]
pub struct MakeDirOptions {
    permission: Option<u32>,
}

impl MakeDirOptions {
    /// Create a new `MakeDirOptions` with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the permission of the created directory, as octal digits.
    pub fn with_permission(mut self, permission: u32) -> Self {
        self.permission = Some(permission);
        self
    }

    pub(crate) fn query_fragment(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(v) = self.permission {
            pairs.push(("permission", v.to_string()));
        }
        query_fragment(&pairs)
    }
}

/// Options for [`Client::remove`](crate::Client::remove).
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    recursive: Option<bool>,
}

impl RemoveOptions {
    /// Create a new `RemoveOptions` with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether directories are removed together with their contents.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = Some(recursive);
        self
    }

    pub(crate) fn query_fragment(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(v) = self.recursive {
            pairs.push(("recursive", v.to_string()));
        }
        query_fragment(&pairs)
    }
}
