use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based sanitization: safe tags (like <b>, <p>) survive,
/// dangerous tags (like <script>, <iframe>) and attributes (like
/// onclick) are stripped. Applied to admin-supplied question text and
/// options before storage as a fail-safe against stored XSS in any
/// client rendering them.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
