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

//! Thin SFTP client: remote folder lifecycle operations over an SSH
//! session.
//!
//! Transport, key exchange, authentication negotiation and SFTP
//! framing are delegated to russh / russh-keys / russh-sftp; this
//! crate sequences calls against them:
//! - create and deep-create remote folders
//! - delete a remote folder (with `*.*` file cleanup)
//! - upload and remove files
//! - existence checks

pub mod channel;
pub mod cli;
pub mod client;
pub mod error;
pub mod host_check;
pub mod logging;
pub mod path;
pub mod session;

mod auth;
mod ops;

pub use channel::RemoteChannel;
pub use client::{ClientConfig, SftpClient};
pub use error::{Error, Result};
pub use host_check::HostKeyChecking;
pub use session::SSH_PORT;
