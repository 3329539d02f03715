//! # Enveloped Credential Decoding
//!
//! An enveloped credential wraps the signed document in a single opaque
//! token: `{"type": "EnvelopedVerifiableCredential", "id":
//! "data:<mime>,<jwt>"}`. Decoding the JWT payload gives callers a
//! convenient structured view, but it is best-effort metadata only —
//! any failure yields `None` and never aborts the pipeline.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

const ENVELOPED_TYPE: &str = "EnvelopedVerifiableCredential";

/// Best-effort decode of an enveloped credential's JWT payload.
///
/// Returns `None` for non-enveloped documents and for any malformed
/// envelope (bad data URL, bad base64, bad JSON).
pub fn decode_enveloped_credential(document: &Value) -> Option<Value> {
    let obj = document.as_object()?;

    let is_enveloped = match obj.get("type")? {
        Value::String(s) => s == ENVELOPED_TYPE,
        Value::Array(types) => types.iter().any(|t| t.as_str() == Some(ENVELOPED_TYPE)),
        _ => false,
    };
    if !is_enveloped {
        return None;
    }

    // id is a data URL: "data:application/vc+jwt,<token>"
    let id = obj.get("id")?.as_str()?;
    let token = id.split_once(',')?.1;
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
