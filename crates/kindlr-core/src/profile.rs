//! Profile metadata (kind 0 content) and display fallbacks.

use serde::Deserialize;

use crate::color::color_from_string;

/// Parsed kind 0 content. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileMetadata {
    pub name: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name_camel: Option<String>,
    pub about: Option<String>,
    pub picture: Option<String>,
    pub banner: Option<String>,
    pub website: Option<String>,
    pub nip05: Option<String>,
    pub lud16: Option<String>,
    pub lud06: Option<String>,
    pub deleted: Option<bool>,
}

/// An image URL with a color to paint when it is absent or fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageWithFallback {
    pub url: Option<String>,
    pub fallback_color: String,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ProfileMetadata {
    /// Parse kind 0 content. Malformed JSON yields an empty profile.
    pub fn from_json(content: &str) -> Self {
        match serde_json::from_str(content) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to parse profile metadata");
                Self::default()
            }
        }
    }

    /// `display_name`, then `displayName`, then `name`, then `anon#<first 4
    /// of pubkey>`, then `Anon`.
    pub fn display_name(&self, pubkey: Option<&str>) -> String {
        if let Some(name) = non_blank(&self.display_name)
            .or_else(|| non_blank(&self.display_name_camel))
            .or_else(|| non_blank(&self.name))
        {
            return name.to_string();
        }

        match pubkey {
            Some(pk) if !pk.is_empty() => {
                let short: String = pk.chars().take(4).collect();
                format!("anon#{short}")
            }
            _ => "Anon".to_string(),
        }
    }

    pub fn picture(&self, pubkey: &str) -> ImageWithFallback {
        ImageWithFallback {
            url: non_blank(&self.picture).map(str::to_string),
            fallback_color: color_from_string(pubkey),
        }
    }

    pub fn banner(&self, pubkey: &str) -> ImageWithFallback {
        ImageWithFallback {
            url: non_blank(&self.banner).map(str::to_string),
            fallback_color: color_from_string(&format!("{pubkey}banner")),
        }
    }

    /// Website with `https://` added when no scheme is given.
    pub fn website_url(&self) -> Option<String> {
        let site = non_blank(&self.website)?;
        if site.starts_with("http://") || site.starts_with("https://") {
            Some(site.to_string())
        } else {
            Some(format!("https://{site}"))
        }
    }

    /// Lightning address, preferring `lud16` over `lud06`.
    pub fn lightning(&self) -> Option<&str> {
        non_blank(&self.lud16).or_else(|| non_blank(&self.lud06))
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.unwrap_or(false)
    }
}

/// Up to two uppercase initials from a display name.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let letters: String = match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };
    letters.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBKEY: &str = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";

    #[test]
    fn test_display_name_precedence() {
        let p = ProfileMetadata::from_json(
            r#"{"name":"bob","display_name":"Bobby","displayName":"B"}"#,
        );
        assert_eq!(p.display_name(Some(PUBKEY)), "Bobby");

        let p = ProfileMetadata::from_json(r#"{"name":"bob","displayName":" B "}"#);
        assert_eq!(p.display_name(Some(PUBKEY)), "B");

        let p = ProfileMetadata::from_json(r#"{"name":"bob","display_name":"  "}"#);
        assert_eq!(p.display_name(Some(PUBKEY)), "bob");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let p = ProfileMetadata::default();
        assert_eq!(p.display_name(Some(PUBKEY)), "anon#3bf0");
        assert_eq!(p.display_name(None), "Anon");
    }

    #[test]
    fn test_invalid_json_is_empty_profile() {
        assert_eq!(ProfileMetadata::from_json("not json"), ProfileMetadata::default());
        assert_eq!(ProfileMetadata::from_json("[1,2]"), ProfileMetadata::default());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let p = ProfileMetadata::from_json(r#"{"name":"x","bot":true,"lud16":"x@y.z"}"#);
        assert_eq!(p.name.as_deref(), Some("x"));
        assert_eq!(p.lightning(), Some("x@y.z"));
    }

    #[test]
    fn test_picture_and_banner_fallbacks() {
        let p = ProfileMetadata::from_json(r#"{"picture":"https://img.test/a.png"}"#);
        let picture = p.picture(PUBKEY);
        assert_eq!(picture.url.as_deref(), Some("https://img.test/a.png"));
        assert_eq!(picture.fallback_color, color_from_string(PUBKEY));

        let banner = p.banner(PUBKEY);
        assert!(banner.url.is_none());
        assert_ne!(banner.fallback_color, picture.fallback_color);
    }

    #[test]
    fn test_website_url() {
        let p = ProfileMetadata::from_json(r#"{"website":"example.com"}"#);
        assert_eq!(p.website_url().as_deref(), Some("https://example.com"));
        let p = ProfileMetadata::from_json(r#"{"website":"http://example.com"}"#);
        assert_eq!(p.website_url().as_deref(), Some("http://example.com"));
        assert!(ProfileMetadata::default().website_url().is_none());
    }

    #[test]
    fn test_deleted() {
        assert!(ProfileMetadata::from_json(r#"{"deleted":true}"#).is_deleted());
        assert!(!ProfileMetadata::default().is_deleted());
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("jack dorsey"), "JD");
        assert_eq!(initials("fiatjaf"), "FI");
        assert_eq!(initials("a b c"), "AC");
        assert_eq!(initials(""), "");
    }
}
