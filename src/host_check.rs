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

//! Host key checking policy
//!
//! Verification against known_hosts is the default; accepting unknown
//! host keys requires an explicit opt-in.

use std::path::PathBuf;

use russh_keys::key::PublicKey;

use crate::error::{Error, Result};

/// How the server's host key is checked during the handshake.
#[derive(Debug, Clone, Default)]
pub enum HostKeyChecking {
    /// Verify against the default known_hosts file (`~/.ssh/known_hosts`).
    #[default]
    KnownHosts,
    /// Verify against a specific known_hosts file.
    KnownHostsFile(PathBuf),
    /// Accept any host key. Insecure; intended for test environments.
    AcceptAll,
}

impl HostKeyChecking {
    /// Check a server key according to the policy. Unknown or changed
    /// keys fail with [`Error::HostKeyVerification`].
    pub(crate) fn verify(&self, host: &str, port: u16, server_key: &PublicKey) -> Result<bool> {
        let rejected = || Error::HostKeyVerification {
            host: host.to_string(),
            port,
        };

        match self {
            HostKeyChecking::AcceptAll => {
                tracing::warn!("host key checking disabled for {}:{}", host, port);
                Ok(true)
            }
            HostKeyChecking::KnownHostsFile(path) => {
                let known = russh_keys::check_known_hosts_path(host, port, server_key, path)
                    .map_err(|_| rejected())?;
                if known {
                    Ok(true)
                } else {
                    Err(rejected())
                }
            }
            HostKeyChecking::KnownHosts => {
                let known = russh_keys::check_known_hosts(host, port, server_key)
                    .map_err(|_| rejected())?;
                if known {
                    Ok(true)
                } else {
                    Err(rejected())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_verification_enabled() {
        assert!(matches!(
            HostKeyChecking::default(),
            HostKeyChecking::KnownHosts
        ));
    }
}
