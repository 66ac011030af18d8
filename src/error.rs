// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the SFTP client

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the client and its remote operations
#[derive(Debug, Error)]
pub enum Error {
    /// Private key file could not be read at construction time
    #[error("cannot read private key file '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Session establishment failed before authentication
    #[error("connecting to {host}:{port} failed: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: russh::Error,
    },

    /// The server rejected every configured credential
    #[error("authentication failed for '{username}': {reason}")]
    Authentication { username: String, reason: String },

    /// The server key did not pass the configured checking policy
    #[error("host key verification failed for {host}:{port}")]
    HostKeyVerification { host: String, port: u16 },

    /// A remote folder or file operation failed
    #[error("remote {op} on '{path}' failed: {reason}")]
    RemoteIo {
        op: &'static str,
        path: String,
        reason: String,
    },

    /// An operation was called without an active session
    #[error("not connected")]
    NotConnected,

    /// SSH transport error surfaced by russh
    #[error("SSH transport error: {0}")]
    Ssh(#[from] russh::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn remote(
        op: &'static str,
        path: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Error::RemoteIo {
            op,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for SFTP operations
pub type Result<T> = std::result::Result<T, Error>;
