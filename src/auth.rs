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

//! Private key decoding and authentication
//!
//! Publickey is the primary method; when the server rejects the key
//! and a password is configured, password authentication is tried as
//! a fallback.

use std::sync::Arc;

use russh::client::Handle;
use russh_keys::key::KeyPair;

use crate::error::{Error, Result};
use crate::session::ClientHandler;

/// Decode an in-memory private key. An empty passphrase is treated as
/// absent, for plain (unencrypted) keys.
fn decode_key(key_data: &[u8], passphrase: Option<&str>) -> std::result::Result<KeyPair, String> {
    let pem = std::str::from_utf8(key_data)
        .map_err(|_| "private key is not valid UTF-8".to_string())?;
    let passphrase = passphrase.filter(|p| !p.is_empty());
    russh_keys::decode_secret_key(pem, passphrase)
        .map_err(|e| format!("cannot decode private key: {e}"))
}

pub(crate) async fn authenticate(
    handle: &mut Handle<ClientHandler>,
    username: &str,
    key_data: &[u8],
    passphrase: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    let auth_err = |reason: String| Error::Authentication {
        username: username.to_string(),
        reason,
    };

    let key = decode_key(key_data, passphrase).map_err(&auth_err)?;

    tracing::debug!("trying publickey authentication for {}", username);
    let accepted = handle
        .authenticate_publickey(username, Arc::new(key))
        .await?;
    if accepted {
        tracing::debug!("publickey authentication successful");
        return Ok(());
    }

    if let Some(password) = password {
        tracing::debug!("publickey rejected, falling back to password authentication");
        let accepted = handle.authenticate_password(username, password).await?;
        if accepted {
            return Ok(());
        }
        return Err(auth_err(
            "private key and password were both rejected".to_string(),
        ));
    }

    Err(auth_err("private key was rejected by the server".to_string()))
}
