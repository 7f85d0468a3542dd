//! Input normalization for submitted fields
//!
//! Text fields become plain, single-line display text. Colors are either a
//! valid hex color or the empty string.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap()
});
static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static LONE_LT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<").unwrap());
static OCTETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n\t ]+").unwrap());
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([A-Fa-f0-9]{3}){1,2}$").unwrap());

/// Reduce arbitrary input to safe single-line display text.
///
/// Drops `script` and `style` elements with their contents, strips other
/// markup tags, escapes a stray `<`, removes control characters and
/// percent-encoded octets, collapses whitespace runs and trims. The result is
/// a fixed point: sanitizing it again changes nothing.
pub fn sanitize_text_field(input: &str) -> String {
    let without_controls: String = input
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect();

    let unscripted = SCRIPT_STYLE.replace_all(&without_controls, "");
    let stripped = TAGS.replace_all(&unscripted, "");
    let mut text = LONE_LT.replace_all(&stripped, "&lt;").into_owned();

    // Removing one octet can splice together another, e.g. `%%4141`
    while OCTETS.is_match(&text) {
        text = OCTETS.replace_all(&text, "").into_owned();
    }

    let collapsed = WHITESPACE.replace_all(&text, " ");

    collapsed.trim().to_string()
}

/// Validate a hex color (`#rgb` or `#rrggbb`).
///
/// Anything else, including the empty string, yields the empty string.
pub fn sanitize_hex_color(input: &str) -> String {
    let trimmed = input.trim();
    if HEX_COLOR.is_match(trimmed) {
        trimmed.to_string()
    } else {
        String::new()
    }
}
