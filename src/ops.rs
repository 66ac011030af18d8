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

//! Folder lifecycle sequencing over a [`RemoteChannel`]
//!
//! Every operation re-anchors at the remote home directory before
//! navigating, so a previous operation's working directory never
//! leaks into the next one.

use std::path::Path;

use crate::channel::RemoteChannel;
use crate::error::Result;
use crate::path;

/// Pattern used to pick up files during folder deletion. Extensionless
/// and dot-prefixed names are intentionally not matched; a directory
/// still holding such entries fails the final rmdir.
const CLEANUP_GLOB: &str = "*.*";

/// Create a single folder named `relative` under `root`. Intermediate
/// segments must already exist.
pub(crate) async fn create_folder(
    channel: &mut dyn RemoteChannel,
    root: &str,
    relative: &str,
) -> Result<()> {
    let home = channel.home_dir().await?;
    channel.change_dir(&home).await?;
    channel.change_dir(root).await?;
    channel.make_dir(&path::normalize(relative)).await
}

/// Create the full folder chain of `relative` under `root`, shallowest
/// first. An already-existing intermediate folder propagates the mkdir
/// failure unchanged.
pub(crate) async fn deep_create_folder(
    channel: &mut dyn RemoteChannel,
    root: &str,
    relative: &str,
) -> Result<()> {
    let home = channel.home_dir().await?;
    channel.change_dir(&home).await?;
    channel.change_dir(root).await?;
    for ancestor in path::ancestor_chain(relative) {
        channel.make_dir(&ancestor).await?;
        tracing::debug!("created folder {}", ancestor);
    }
    Ok(())
}

/// Delete the folder `relative` under `root`: remove its top-level
/// files matching `*.*`, step up one level, rmdir the trailing segment.
pub(crate) async fn delete_folder(
    channel: &mut dyn RemoteChannel,
    root: &str,
    relative: &str,
) -> Result<()> {
    let home = channel.home_dir().await?;
    channel.change_dir(&home).await?;

    let normalized = path::normalize(relative);
    channel.change_dir(&format!("{root}/{normalized}")).await?;
    tracing::debug!("pwd={}", channel.current_dir());

    let files = channel.list(CLEANUP_GLOB).await?;
    tracing::debug!("# files = {}", files.len());
    for file in files {
        channel.remove_file(&file).await?;
        tracing::debug!("deleted file {}", file);
    }

    channel.change_dir("..").await?;
    channel.remove_dir(path::trailing_segment(&normalized)).await
}

pub(crate) async fn put_file(
    channel: &mut dyn RemoteChannel,
    local: &Path,
    remote: &str,
) -> Result<()> {
    tracing::debug!("copying {:?} to {}", local, remote);
    channel.upload(local, remote).await
}

pub(crate) async fn delete_file(channel: &mut dyn RemoteChannel, remote: &str) -> Result<()> {
    tracing::debug!("removing {}", remote);
    channel.remove_file(remote).await
}

/// True when `path` can be listed; false on any failure. The boolean
/// does not distinguish not-found from permission errors.
pub(crate) async fn check_exists(channel: &mut dyn RemoteChannel, path: &str) -> bool {
    channel.list(path).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::testing::RecordingChannel;

    #[tokio::test]
    async fn test_create_folder_call_sequence() {
        let mut channel = RecordingChannel::with_home("/home/user");

        create_folder(&mut channel, "/home/user", "newdir")
            .await
            .unwrap();

        assert_eq!(
            channel.calls,
            vec!["cd /home/user", "cd /home/user", "mkdir newdir"]
        );
    }

    #[tokio::test]
    async fn test_deep_create_mkdirs_root_to_leaf() {
        let mut channel = RecordingChannel::with_home("/home/user");

        deep_create_folder(&mut channel, "/srv", "a/b/c").await.unwrap();

        assert_eq!(
            channel.calls,
            vec![
                "cd /home/user",
                "cd /srv",
                "mkdir a",
                "mkdir a/b",
                "mkdir a/b/c",
            ]
        );
    }

    #[tokio::test]
    async fn test_deep_create_stops_on_existing_intermediate() {
        let mut channel = RecordingChannel::with_home("/home/user");
        channel.failing_mkdirs.insert("a/b".to_string());

        let err = deep_create_folder(&mut channel, "/srv", "a/b/c")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("mkdir"));
        // The leaf is never attempted once an intermediate fails.
        assert!(!channel.calls.contains(&"mkdir a/b/c".to_string()));
        assert_eq!(channel.calls.last().unwrap(), "mkdir a/b");
    }

    #[tokio::test]
    async fn test_delete_folder_removes_files_then_rmdirs_trailing_segment() {
        let mut channel = RecordingChannel::with_home("/home/user");
        channel.listings.insert(
            "*.*".to_string(),
            vec!["a.txt".to_string(), "b.log".to_string()],
        );

        delete_folder(&mut channel, "/data", "tmp/work").await.unwrap();

        assert_eq!(
            channel.calls,
            vec![
                "cd /home/user",
                "cd /data/tmp/work",
                "ls *.*",
                "rm a.txt",
                "rm b.log",
                "cd ..",
                "rmdir work",
            ]
        );
        // rmdir gets the trailing segment only, exactly once.
        let rmdirs: Vec<_> = channel
            .calls
            .iter()
            .filter(|c| c.starts_with("rmdir"))
            .collect();
        assert_eq!(rmdirs, vec!["rmdir work"]);
    }

    #[tokio::test]
    async fn test_delete_folder_with_empty_listing() {
        let mut channel = RecordingChannel::with_home("/home/user");
        channel.listings.insert("*.*".to_string(), Vec::new());

        delete_folder(&mut channel, "/data", "only").await.unwrap();

        assert_eq!(
            channel.calls,
            vec!["cd /home/user", "cd /data/only", "ls *.*", "cd ..", "rmdir only"]
        );
    }

    #[tokio::test]
    async fn test_delete_folder_fails_when_listing_fails() {
        let mut channel = RecordingChannel::with_home("/home/user");

        let err = delete_folder(&mut channel, "/data", "tmp/work")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("ls"));
        // Neither the files nor the folder were touched.
        assert!(!channel.calls.iter().any(|c| c.starts_with("rm")));
    }

    #[tokio::test]
    async fn test_check_exists_true_on_listing_success() {
        let mut channel = RecordingChannel::with_home("/home/user");
        channel
            .listings
            .insert("/data/present".to_string(), vec!["present".to_string()]);

        assert!(check_exists(&mut channel, "/data/present").await);
    }

    #[tokio::test]
    async fn test_check_exists_false_on_any_failure() {
        let mut channel = RecordingChannel::with_home("/home/user");

        assert!(!check_exists(&mut channel, "/data/missing").await);
    }

    #[tokio::test]
    async fn test_put_then_check_exists_round_trip() {
        let mut channel = RecordingChannel::with_home("/home/user");

        put_file(&mut channel, Path::new("/tmp/local.txt"), "/data/remote.txt")
            .await
            .unwrap();

        assert!(check_exists(&mut channel, "/data/remote.txt").await);
        assert_eq!(channel.calls[0], "put /tmp/local.txt /data/remote.txt");
    }

    #[tokio::test]
    async fn test_delete_file_removes_not_uploads() {
        let mut channel = RecordingChannel::with_home("/home/user");

        delete_file(&mut channel, "/data/old.txt").await.unwrap();

        assert_eq!(channel.calls, vec!["rm /data/old.txt"]);
    }

    #[tokio::test]
    async fn test_create_folder_normalizes_backslashes() {
        let mut channel = RecordingChannel::with_home("/home/user");

        create_folder(&mut channel, "/srv", "some\\dir").await.unwrap();

        assert_eq!(channel.calls.last().unwrap(), "mkdir some/dir");
    }
}
