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

//! russh-backed session: SSH connection, SFTP subsystem channel and
//! client-side working-directory emulation

use async_trait::async_trait;
use glob::{MatchOptions, Pattern};
use russh::client;
use russh_keys::key::PublicKey;
use russh_sftp::client::SftpSession;
use russh_sftp::protocol::OpenFlags;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

use crate::auth;
use crate::channel::RemoteChannel;
use crate::error::{Error, Result};
use crate::host_check::HostKeyChecking;
use crate::path;

/// SSH port used for every session.
pub const SSH_PORT: u16 = 22;

/// russh client handler; host key acceptance is delegated to the
/// configured checking policy.
pub(crate) struct ClientHandler {
    host: String,
    checking: HostKeyChecking,
}

#[async_trait]
impl client::Handler for ClientHandler {
    type Error = Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        self.checking.verify(&self.host, SSH_PORT, server_public_key)
    }
}

/// A connected SSH session with an open SFTP subsystem channel.
///
/// The SFTP protocol is stateless about directories, so the working
/// directory is tracked here and relative paths are resolved against
/// it before hitting the wire.
pub struct RusshChannel {
    handle: client::Handle<ClientHandler>,
    sftp: SftpSession,
    home: String,
    cwd: String,
}

impl RusshChannel {
    /// Connect to `host:22`, authenticate and open the SFTP channel.
    pub(crate) async fn connect(
        host: &str,
        username: &str,
        key_data: &[u8],
        passphrase: Option<&str>,
        password: Option<&str>,
        checking: HostKeyChecking,
    ) -> Result<Self> {
        let config = Arc::new(client::Config::default());
        let handler = ClientHandler {
            host: host.to_string(),
            checking,
        };

        tracing::debug!("connecting to {}:{}", host, SSH_PORT);
        let mut handle = client::connect(config, (host, SSH_PORT), handler)
            .await
            .map_err(|e| match e {
                Error::Ssh(source) => Error::Connection {
                    host: host.to_string(),
                    port: SSH_PORT,
                    source,
                },
                other => other,
            })?;

        auth::authenticate(&mut handle, username, key_data, passphrase, password).await?;

        let channel = handle.channel_open_session().await?;
        channel.request_subsystem(true, "sftp").await?;
        let sftp = SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| Error::remote("open", "sftp subsystem", e))?;

        let home = sftp
            .canonicalize(".")
            .await
            .map_err(|e| Error::remote("realpath", ".", e))?;
        let cwd = home.clone();

        Ok(Self {
            handle,
            sftp,
            home,
            cwd,
        })
    }

    /// Resolve a possibly-relative path against the working directory.
    fn resolve(&self, raw: &str) -> String {
        let normalized = path::normalize(raw);
        if normalized.starts_with('/') {
            normalized
        } else if self.cwd == "/" {
            format!("/{normalized}")
        } else {
            format!("{}/{}", self.cwd, normalized)
        }
    }
}

#[async_trait]
impl RemoteChannel for RusshChannel {
    async fn home_dir(&mut self) -> Result<String> {
        Ok(self.home.clone())
    }

    fn current_dir(&self) -> &str {
        &self.cwd
    }

    async fn change_dir(&mut self, target: &str) -> Result<()> {
        let resolved = self.resolve(target);
        // realpath collapses `..`; the metadata probe makes cd fail on
        // missing targets, which realpath alone does not guarantee.
        let canonical = self
            .sftp
            .canonicalize(resolved.clone())
            .await
            .map_err(|e| Error::remote("cd", &resolved, e))?;
        let metadata = self
            .sftp
            .metadata(canonical.clone())
            .await
            .map_err(|e| Error::remote("cd", &canonical, e))?;
        if !metadata.is_dir() {
            return Err(Error::remote("cd", &canonical, "not a directory"));
        }
        self.cwd = canonical;
        Ok(())
    }

    async fn make_dir(&mut self, target: &str) -> Result<()> {
        let resolved = self.resolve(target);
        self.sftp
            .create_dir(resolved.clone())
            .await
            .map_err(|e| Error::remote("mkdir", &resolved, e))
    }

    async fn remove_dir(&mut self, target: &str) -> Result<()> {
        let resolved = self.resolve(target);
        self.sftp
            .remove_dir(resolved.clone())
            .await
            .map_err(|e| Error::remote("rmdir", &resolved, e))
    }

    async fn remove_file(&mut self, target: &str) -> Result<()> {
        let resolved = self.resolve(target);
        self.sftp
            .remove_file(resolved.clone())
            .await
            .map_err(|e| Error::remote("rm", &resolved, e))
    }

    async fn list(&mut self, pattern: &str) -> Result<Vec<String>> {
        if pattern.contains(['*', '?', '[']) {
            let (dir, leaf) = match pattern.rsplit_once('/') {
                Some((parent, leaf)) => (self.resolve(parent), leaf),
                None => (self.cwd.clone(), pattern),
            };
            let matcher = Pattern::new(leaf).map_err(|e| Error::remote("ls", pattern, e))?;
            // A wildcard never matches a leading dot, so `*.*` skips
            // dotfiles the way server-side globs do.
            let options = MatchOptions {
                require_literal_leading_dot: true,
                ..MatchOptions::new()
            };
            let entries = self
                .sftp
                .read_dir(dir.clone())
                .await
                .map_err(|e| Error::remote("ls", &dir, e))?;
            Ok(entries
                .map(|entry| entry.file_name())
                .filter(|name| name != "." && name != "..")
                .filter(|name| matcher.matches_with(name, options))
                .collect())
        } else {
            let resolved = self.resolve(pattern);
            let metadata = self
                .sftp
                .metadata(resolved.clone())
                .await
                .map_err(|e| Error::remote("ls", &resolved, e))?;
            if metadata.is_dir() {
                let entries = self
                    .sftp
                    .read_dir(resolved.clone())
                    .await
                    .map_err(|e| Error::remote("ls", &resolved, e))?;
                Ok(entries.map(|entry| entry.file_name()).collect())
            } else {
                Ok(vec![path::trailing_segment(&resolved).to_string()])
            }
        }
    }

    async fn upload(&mut self, local: &Path, remote: &str) -> Result<()> {
        let resolved = self.resolve(remote);
        let contents = tokio::fs::read(local).await?;

        let mut file = self
            .sftp
            .open_with_flags(
                resolved.clone(),
                OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::WRITE,
            )
            .await
            .map_err(|e| Error::remote("put", &resolved, e))?;
        file.write_all(&contents)
            .await
            .map_err(|e| Error::remote("put", &resolved, e))?;
        file.flush()
            .await
            .map_err(|e| Error::remote("put", &resolved, e))?;
        file.shutdown()
            .await
            .map_err(|e| Error::remote("put", &resolved, e))?;

        tracing::debug!("uploaded {:?} to {} ({} bytes)", local, resolved, contents.len());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        // Channel first, then the session, mirroring the order the
        // resources were acquired in.
        if let Err(err) = self.sftp.close().await {
            tracing::debug!("error closing SFTP channel: {}", err);
        }
        self.handle
            .disconnect(russh::Disconnect::ByApplication, "", "")
            .await?;
        Ok(())
    }
}
