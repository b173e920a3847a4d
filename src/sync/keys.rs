//! Object key derivation and content types

use std::path::Path;

/// Derive the object key for a file: its path relative to `root`, with
/// separators normalized to forward slashes and `prefix` prepended verbatim.
///
/// `full_path` is expected to sit under `root` (the directory walk
/// guarantees it); the prefix is expected to already end with `/` if a
/// separator is wanted. Distinct files under one root always map to distinct
/// keys.
pub fn derive_key(root: &Path, full_path: &Path, prefix: &str) -> String {
    let rel = full_path.strip_prefix(root).unwrap_or(full_path);
    let rel = rel.to_string_lossy().replace('\\', "/");
    format!("{}{}", prefix, rel)
}

/// Content type for a file, by extension; `application/octet-stream` when
/// the extension is unknown or absent.
pub fn content_type(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}

/// Public URL of an uploaded object on a custom domain.
pub fn public_url(domain: &str, key: &str) -> String {
    format!("https://{}/{}", domain, key)
}
