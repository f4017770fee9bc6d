//! Derivation of filesystem-safe keys from user ids.
//!
//! User ids come from an external identity provider and may contain any
//! Unicode. The archive stores one file per user, so the id is reduced to a
//! readable slug plus a short blake3 digest of the exact id. Two ids that
//! slug identically ("Ana Lee" and "ana-lee") still get different keys.

use unicode_normalization::UnicodeNormalization;

use crate::error::ArchiveError;

const MAX_SLUG_LEN: usize = 48;
const DIGEST_HEX_LEN: usize = 12;

/// Derive the storage key for `user_id`.
///
/// The key is `<slug>-<digest>` where the slug is the NFKC-normalized id with
/// every character outside `[A-Za-z0-9._-]` replaced by `_`, `..` collapsed,
/// and truncated. Blank ids are rejected.
///
/// ```rust
/// use launchkit_utils::user_key::user_key;
///
/// let key = user_key("ana@example.com").unwrap();
/// assert!(key.starts_with("ana_example.com-"));
/// assert!(user_key("   ").is_err());
/// ```
pub fn user_key(user_id: &str) -> Result<String, ArchiveError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(ArchiveError::InvalidUserId(user_id.to_string()));
    }

    let normalized: String = trimmed.nfkc().collect();
    let mut slug: String = normalized
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    while slug.contains("..") {
        slug = slug.replace("..", "_");
    }
    let slug: String = slug
        .trim_matches(|c: char| c == '.' || c == '_')
        .chars()
        .take(MAX_SLUG_LEN)
        .collect();
    let slug = if slug.is_empty() { "user".to_string() } else { slug };

    let digest = blake3::hash(trimmed.as_bytes()).to_hex();
    Ok(format!("{slug}-{}", &digest.as_str()[..DIGEST_HEX_LEN]))
}
