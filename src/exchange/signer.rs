//! HMAC-SHA256 request signing.
//!
//! Signed endpoints expect the full query string, including `timestamp` and
//! `recvWindow`, to be signed with the API secret and the hex digest appended
//! as the final `signature` parameter. Keys and values are form-encoded
//! before signing, so the signed text is byte-for-byte the text sent.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::error::ClientResult;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key on every authenticated request
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Build a form-encoded query string from ordered parameters.
pub fn build_query_string(params: &[(String, String)]) -> ClientResult<String> {
    Ok(serde_urlencoded::to_string(params)?)
}

/// HMAC-SHA256 request signer.
#[derive(Clone)]
pub struct HmacSigner {
    api_key: String,
    api_secret: String,
}

impl HmacSigner {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Hex-encoded HMAC-SHA256 of `payload` keyed with the API secret.
    pub fn signature(&self, payload: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(self.api_secret.as_bytes()).expect("HMAC can take any size");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Append `recvWindow` and `timestamp`, then return the encoded query with
    /// its `signature` appended.
    pub fn sign(
        &self,
        params: &mut Vec<(String, String)>,
        recv_window_ms: u64,
        timestamp_ms: i64,
    ) -> ClientResult<String> {
        if !params.iter().any(|(k, _)| k == "recvWindow") {
            params.push(("recvWindow".to_string(), recv_window_ms.to_string()));
        }
        params.push(("timestamp".to_string(), timestamp_ms.to_string()));

        let payload = build_query_string(params)?;
        let signature = self.signature(&payload);

        Ok(format!("{}&signature={}", payload, signature))
    }
}
