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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sftp-ops",
    version,
    about = "Remote folder lifecycle operations over SFTP",
    long_about = "sftp-ops connects to a remote host over SSH (port 22), authenticates with a\nprivate key (passphrase-aware, with optional password fallback) and performs\nremote folder and file operations: create, deep-create, delete, upload,\nremove and existence check."
)]
pub struct Cli {
    #[arg(short = 'H', long, help = "Remote host name")]
    pub host: String,

    #[arg(short = 'u', long, help = "Login user name")]
    pub user: String,

    #[arg(
        short = 'i',
        long,
        help = "SSH private key file path\nFalls back to ~/.ssh/id_ed25519, ~/.ssh/id_rsa or ~/.ssh/id_ecdsa if not specified"
    )]
    pub identity: Option<PathBuf>,

    #[arg(long, help = "Passphrase for the private key")]
    pub passphrase: Option<String>,

    #[arg(
        long,
        help = "Password to fall back to when the server rejects the key"
    )]
    pub password: Option<String>,

    #[arg(
        long,
        help = "Accept any host key without verification (insecure, testing only)"
    )]
    pub insecure: bool,

    #[arg(
        long,
        help = "known_hosts file to verify against [default: ~/.ssh/known_hosts]"
    )]
    pub known_hosts: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a remote folder under a root directory
    Mkdir {
        /// Root directory to change into first
        root: String,
        /// Folder path to create, relative to the root
        path: String,
        #[arg(
            short = 'p',
            long,
            help = "Create the full folder chain, shallowest first\nFails if an intermediate folder already exists"
        )]
        parents: bool,
    },
    /// Delete a remote folder after removing its `*.*`-matching files
    Rmdir {
        /// Root directory to change into first
        root: String,
        /// Folder path to delete, relative to the root
        path: String,
    },
    /// Upload a local file to a remote path
    Put {
        source: PathBuf,
        destination: String,
    },
    /// Remove a remote file
    Rm { path: String },
    /// Check whether a remote path exists (prints true/false)
    Exists { path: String },
}
