use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based sanitization: safe tags (like <b>, <p>) survive,
/// dangerous tags (like <script>, <iframe>) and malicious attributes
/// (like onclick) are stripped. Applied to comment bodies before they are
/// stored, as a fail-safe against Stored XSS in the storefront SPA.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
