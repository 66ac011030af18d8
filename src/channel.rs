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

//! The session capability consumed by the folder operations
//!
//! SFTP itself has no notion of a working directory; implementations
//! emulate one client-side so the cd / mkdir / ls / rm call sequences
//! of the folder lifecycle stay expressible.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// What the folder lifecycle layer needs from an SFTP session.
///
/// Relative paths are resolved against the emulated working directory;
/// absolute paths are used as-is.
#[async_trait]
pub trait RemoteChannel: Send {
    /// Remote home directory of the authenticated user.
    async fn home_dir(&mut self) -> Result<String>;

    /// Current working directory.
    fn current_dir(&self) -> &str;

    /// Change the working directory. Fails if the target does not
    /// exist or is not a directory.
    async fn change_dir(&mut self, path: &str) -> Result<()>;

    /// Create a single directory (non-recursive).
    async fn make_dir(&mut self, path: &str) -> Result<()>;

    /// Remove an empty directory.
    async fn remove_dir(&mut self, path: &str) -> Result<()>;

    /// Remove a file.
    async fn remove_file(&mut self, path: &str) -> Result<()>;

    /// List entry names matching `pattern`. A plain path lists that
    /// path (directory contents, or the entry itself for a file); a
    /// pattern containing glob metacharacters is matched against the
    /// names in its parent directory.
    async fn list(&mut self, pattern: &str) -> Result<Vec<String>>;

    /// Upload the content of a local file to `remote`.
    async fn upload(&mut self, local: &Path, remote: &str) -> Result<()>;

    /// Close the channel and the underlying session.
    async fn close(&mut self) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! A recording channel for exercising operation call sequences
    //! without a server.

    use super::*;
    use crate::error::Error;
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    pub(crate) struct RecordingChannel {
        /// Every call in order, rendered as a shell-like line.
        pub(crate) calls: Vec<String>,
        pub(crate) home: String,
        pub(crate) cwd: String,
        /// Canned `list` results keyed by the requested pattern.
        pub(crate) listings: HashMap<String, Vec<String>>,
        /// Paths whose mkdir fails (e.g. already existing).
        pub(crate) failing_mkdirs: HashSet<String>,
        /// When set, `close` fails after recording the call.
        pub(crate) failing_close: bool,
        pub(crate) close_count: usize,
    }

    impl RecordingChannel {
        pub(crate) fn with_home(home: &str) -> Self {
            Self {
                home: home.to_string(),
                cwd: home.to_string(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl RemoteChannel for RecordingChannel {
        async fn home_dir(&mut self) -> Result<String> {
            Ok(self.home.clone())
        }

        fn current_dir(&self) -> &str {
            &self.cwd
        }

        async fn change_dir(&mut self, path: &str) -> Result<()> {
            self.calls.push(format!("cd {path}"));
            self.cwd = if path == ".." {
                match self.cwd.rfind('/') {
                    Some(0) | None => "/".to_string(),
                    Some(idx) => self.cwd[..idx].to_string(),
                }
            } else if path.starts_with('/') {
                path.to_string()
            } else {
                format!("{}/{}", self.cwd, path)
            };
            Ok(())
        }

        async fn make_dir(&mut self, path: &str) -> Result<()> {
            self.calls.push(format!("mkdir {path}"));
            if self.failing_mkdirs.contains(path) {
                return Err(Error::remote("mkdir", path, "failure"));
            }
            Ok(())
        }

        async fn remove_dir(&mut self, path: &str) -> Result<()> {
            self.calls.push(format!("rmdir {path}"));
            Ok(())
        }

        async fn remove_file(&mut self, path: &str) -> Result<()> {
            self.calls.push(format!("rm {path}"));
            Ok(())
        }

        async fn list(&mut self, pattern: &str) -> Result<Vec<String>> {
            self.calls.push(format!("ls {pattern}"));
            self.listings
                .get(pattern)
                .cloned()
                .ok_or_else(|| Error::remote("ls", pattern, "no such file"))
        }

        async fn upload(&mut self, local: &Path, remote: &str) -> Result<()> {
            self.calls.push(format!("put {} {remote}", local.display()));
            // The uploaded path becomes listable afterwards.
            self.listings.insert(
                remote.to_string(),
                vec![crate::path::trailing_segment(remote).to_string()],
            );
            Ok(())
        }

        async fn close(&mut self) -> Result<()> {
            self.calls.push("close".to_string());
            self.close_count += 1;
            if self.failing_close {
                return Err(Error::remote("close", "session", "connection lost"));
            }
            Ok(())
        }
    }
}
