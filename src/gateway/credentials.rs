//! ApiMedic credential derivation.
//!
//! The token endpoint authenticates the gateway with a header computed from
//! the account credentials and the endpoint URL itself:
//!
//! ```text
//! md5Pass    = hex(MD5(password))
//! hmac       = hex(HMAC-MD5(key = md5Pass, message = authUrl))
//! authHeader = "Bearer " + username + ":" + base64(hmac)
//! ```
//!
//! Hex digests are lower-case and base64 is the standard padded alphabet
//! applied to the hex text, not to the raw MAC bytes. Pure: no I/O.

use base64::Engine;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};

use super::GatewayError;

type HmacMd5 = Hmac<Md5>;

/// Lower-case hex MD5 digest of `input`.
pub fn md5_hex(input: &str) -> String {
    format!("{:x}", Md5::digest(input.as_bytes()))
}

/// Lower-case hex HMAC-MD5 of `message` keyed by the UTF-8 bytes of `key`.
pub fn hmac_md5_hex(key: &str, message: &str) -> Result<String, GatewayError> {
    let mut mac = HmacMd5::new_from_slice(key.as_bytes())
        .map_err(|e| GatewayError::Credentials(e.to_string()))?;
    mac.update(message.as_bytes());
    Ok(format!("{:x}", mac.finalize().into_bytes()))
}

/// `username:base64(hmac)`, the credential part of the header.
pub fn derive_auth_string(
    username: &str,
    password: &str,
    auth_url: &str,
) -> Result<String, GatewayError> {
    let md5_pass = md5_hex(password);
    let hmac = hmac_md5_hex(&md5_pass, auth_url)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(hmac.as_bytes());
    Ok(format!("{username}:{encoded}"))
}

/// Full `Authorization` header value for the token endpoint.
pub fn derive_auth_header(
    username: &str,
    password: &str,
    auth_url: &str,
) -> Result<String, GatewayError> {
    Ok(format!("Bearer {}", derive_auth_string(username, password, auth_url)?))
}
