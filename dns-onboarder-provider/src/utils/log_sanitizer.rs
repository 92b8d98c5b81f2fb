//! Keeps API tokens and large provider responses out of logs.

/// Longest response excerpt written to the log, in bytes.
const EXCERPT_BYTES: usize = 256;

/// Leading characters of a secret that stay visible.
const SECRET_PREFIX_CHARS: usize = 4;

/// Shorten a response body for logging, cutting on a char boundary.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= EXCERPT_BYTES {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= EXCERPT_BYTES)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a secret, keeping only a short prefix for identification.
pub fn mask_secret(secret: &str) -> String {
    match secret.chars().count() {
        0 => "<empty>".to_string(),
        n if n < SECRET_PREFIX_CHARS * 2 => "****".to_string(),
        _ => {
            let prefix: String = secret.chars().take(SECRET_PREFIX_CHARS).collect();
            format!("{prefix}****")
        }
    }
}
