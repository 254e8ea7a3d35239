use std::sync::LazyLock;

use regex::Regex;

static VERSIONED_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/v\d+/(.+)\.\w+$").expect("public id pattern is valid"));

/// Extracts the public id from a delivery URL such as
/// `https://res.cloudinary.com/demo/image/upload/v1234/avatars/user_123.jpg`.
///
/// Returns an empty string when the URL has no `/v<digits>/` segment.
pub fn extract_public_id(url: &str) -> String {
    VERSIONED_PATH
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
