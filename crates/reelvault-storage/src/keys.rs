//! Shared key generation for storage backends.
//!
//! Key format: `{prefix}/{random}.{ext}` when a prefix is given, otherwise
//! `{random}.{ext}`. The random component is 32 bytes from a CSPRNG encoded
//! with the URL-safe unpadded base64 alphabet; uniqueness rests entirely on
//! that entropy width, with no collision detection.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;

const KEY_ENTROPY_BYTES: usize = 32;

/// Generate a storage key for the given media type and optional prefix.
///
/// The extension is the subtype of the declared media type
/// (`video/mp4` -> `mp4`).
pub fn generate_object_key(content_type: &str, prefix: Option<&str>) -> String {
    let mut raw = [0u8; KEY_ENTROPY_BYTES];
    rand::rng().fill_bytes(&mut raw);
    let name = URL_SAFE_NO_PAD.encode(raw);
    let ext = extension_for(content_type);

    match prefix {
        Some(p) => format!("{}/{}.{}", p, name, ext),
        None => format!("{}.{}", name, ext),
    }
}

fn extension_for(content_type: &str) -> &str {
    content_type.split('/').nth(1).unwrap_or("bin")
}
