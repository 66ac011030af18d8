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

use anyhow::{Context, Result};
use clap::Parser;
use directories::BaseDirs;
use std::path::PathBuf;

use sftp_ops::cli::{Cli, Commands};
use sftp_ops::logging::init_logging;
use sftp_ops::{ClientConfig, HostKeyChecking, SftpClient};

/// First existing default key under ~/.ssh, if any.
fn default_identity() -> Option<PathBuf> {
    let dirs = BaseDirs::new()?;
    let ssh_dir = dirs.home_dir().join(".ssh");
    ["id_ed25519", "id_rsa", "id_ecdsa"]
        .iter()
        .map(|name| ssh_dir.join(name))
        .find(|path| path.exists())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let key_path = cli
        .identity
        .clone()
        .or_else(default_identity)
        .context("no private key found: pass -i or create ~/.ssh/id_ed25519 / ~/.ssh/id_rsa")?;

    let host_key_checking = if cli.insecure {
        HostKeyChecking::AcceptAll
    } else if let Some(path) = cli.known_hosts.clone() {
        HostKeyChecking::KnownHostsFile(path)
    } else {
        HostKeyChecking::KnownHosts
    };

    let config = ClientConfig {
        hostname: cli.host.clone(),
        username: cli.user.clone(),
        password: cli.password.clone(),
        passphrase: cli.passphrase.clone(),
        key_path,
        host_key_checking,
    };

    let mut client = SftpClient::new(config)?;
    client.connect().await?;

    // Run the command, then always release the session before
    // reporting the outcome.
    let outcome = run(&mut client, &cli.command).await;
    client.disconnect().await;
    outcome
}

async fn run(client: &mut SftpClient, command: &Commands) -> Result<()> {
    match command {
        Commands::Mkdir {
            root,
            path,
            parents,
        } => {
            if *parents {
                client.deep_create_remote_folder(root, path).await?;
            } else {
                client.create_remote_folder(root, path).await?;
            }
        }
        Commands::Rmdir { root, path } => {
            client.delete_remote_folder(root, path).await?;
        }
        Commands::Put {
            source,
            destination,
        } => {
            client.put_file(source, destination).await?;
        }
        Commands::Rm { path } => {
            client.delete_file(path).await?;
        }
        Commands::Exists { path } => {
            let exists = client.check_exists(path).await;
            println!("{exists}");
        }
    }
    Ok(())
}
