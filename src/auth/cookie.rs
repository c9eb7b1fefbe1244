//! Signed session cookie values: `<session id>.<hex HMAC-SHA256 tag>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Render the cookie value for a session id, signed with `secret`.
pub fn sign(session_id: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(session_id.as_bytes());
    format!("{}.{}", session_id, hex::encode(mac.finalize().into_bytes()))
}

/// Extract the session id from a cookie value, if its signature checks out.
///
/// Tampered, truncated, or unsigned values yield `None` — treated as no
/// session, never as an error.
pub fn verify<'a>(value: &'a str, secret: &str) -> Option<&'a str> {
    let (session_id, signature) = value.rsplit_once('.')?;
    let tag = hex::decode(signature).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(session_id.as_bytes());
    mac.verify_slice(&tag).ok()?;

    Some(session_id)
}
