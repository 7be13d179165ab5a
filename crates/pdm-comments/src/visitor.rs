//! Anonymous visitor ids.
//!
//! Reactions are keyed by a stable, cookie-free visitor id derived from a few
//! browser properties. The browser caches the id once computed; that cache
//! lives outside this crate.

use sha2::Digest;
use sha2::Sha256;

pub const VISITOR_ID_PREFIX: &str = "v_";

const VISITOR_ID_HEX_LEN: usize = 32;

/// Browser properties hashed into a visitor id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fingerprint {
    pub user_agent: String,
    pub language: String,
    /// Minutes from UTC as reported by the browser (`-60` for UTC+1).
    pub timezone_offset: i32,
    pub screen_width: u32,
    pub screen_height: u32,
    pub color_depth: u32,
}

impl Fingerprint {
    /// `v_` followed by the first 32 hex digits of the SHA-256 of the
    /// `|`-joined properties.
    #[must_use]
    pub fn visitor_id(&self) -> String {
        let joined = [
            self.user_agent.clone(),
            self.language.clone(),
            self.timezone_offset.to_string(),
            self.screen_width.to_string(),
            self.screen_height.to_string(),
            self.color_depth.to_string(),
        ]
        .join("|");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        let digest = format!("{:x}", hasher.finalize());

        format!("{VISITOR_ID_PREFIX}{}", &digest[..VISITOR_ID_HEX_LEN])
    }
}

/// Whether `id` has the shape produced by [`Fingerprint::visitor_id`].
#[must_use]
pub fn is_visitor_id(id: &str) -> bool {
    id.strip_prefix(VISITOR_ID_PREFIX).is_some_and(|hex| {
        hex.len() == VISITOR_ID_HEX_LEN
            && hex
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    })
}
