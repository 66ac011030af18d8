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

//! Console logging setup for the binary
//!
//! The library only emits `tracing` events; subscriber installation is
//! the binary's concern.

use tracing_subscriber::EnvFilter;

/// Create an environment filter based on verbosity level.
pub fn create_env_filter(verbosity: u8) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        // RUST_LOG takes precedence (allows debugging russh directly)
        EnvFilter::from_default_env()
    } else {
        match verbosity {
            0 => EnvFilter::new("sftp_ops=warn"),
            1 => EnvFilter::new("sftp_ops=info"),
            // -vv: include russh debug logs for SSH troubleshooting
            2 => EnvFilter::new("sftp_ops=debug,russh=debug"),
            _ => EnvFilter::new("sftp_ops=trace,russh=trace,russh_sftp=debug"),
        }
    }
}

/// Initialize console logging for the binary.
pub fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(create_env_filter(verbosity))
        .with_target(true)
        .init();
}
