//! Deterministic display colors derived from identifiers.

use std::sync::LazyLock;

use regex::Regex;

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"hsl\(\d+,\s*\d+%,\s*(\d+)%\)").expect("hsl regex should compile")
});

/// Hue derived from a string, in `(-360, 360)`.
///
/// Mixes UTF-16 code units with `hash = c + ((hash << 5) - hash)`, where the
/// shift operates on the low 32 bits and the subtraction on the full value.
/// The remainder keeps the sign of the hash.
pub fn hue_from_string(s: &str) -> i64 {
    let mut hash: i64 = 0;
    for unit in s.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit) + (shifted - hash);
    }
    hash % 360
}

/// CSS `hsl()` color for a string (usually a hex pubkey).
pub fn color_from_string(s: &str) -> String {
    format!("hsl({}, 70%, 60%)", hue_from_string(s))
}

/// `"white"` on dark backgrounds (lightness below 50%), otherwise `"black"`.
///
/// Anything that is not an `hsl(h, s%, l%)` string gets `"black"`.
pub fn contrast_text_color(hsl: &str) -> &'static str {
    let lightness = HSL_RE
        .captures(hsl)
        .and_then(|caps| caps[1].parse::<u32>().ok());

    match lightness {
        Some(l) if l < 50 => "white",
        _ => "black",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_deterministic() {
        let a = color_from_string("3bf0c63f");
        assert_eq!(a, color_from_string("3bf0c63f"));
        assert!(a.starts_with("hsl("));
        assert!(a.ends_with(", 70%, 60%)"));
    }

    #[test]
    fn test_known_hues() {
        // "a" = 97, "ab" = 98 + (97 << 5) - 97 = 3105
        assert_eq!(hue_from_string(""), 0);
        assert_eq!(hue_from_string("a"), 97);
        assert_eq!(hue_from_string("ab"), 3105 % 360);
        assert_eq!(color_from_string("a"), "hsl(97, 70%, 60%)");
    }

    #[test]
    fn test_hue_range() {
        for s in ["npub1xyz", "banner", "0000", "ffffffffffffffffffffffffffffffffffff", "日本"] {
            let h = hue_from_string(s);
            assert!(h > -360 && h < 360, "{s}: {h}");
        }
    }

    #[test]
    fn test_contrast_text_color() {
        assert_eq!(contrast_text_color("hsl(120, 70%, 60%)"), "black");
        assert_eq!(contrast_text_color("hsl(120, 70%, 30%)"), "white");
        assert_eq!(contrast_text_color("hsl(120,70%,50%)"), "black");
        assert_eq!(contrast_text_color("#ffffff"), "black");
        assert_eq!(contrast_text_color("hsl(-20, 70%, 10%)"), "black");
    }
}
