//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{Markup, PreEscaped, html};

use kindlr_core::color::contrast_text_color;
use kindlr_core::links::{LinkKind, TextSegment, linkify};
use kindlr_core::profile::initials;
use kindlr_core::{KindDescriptor, SampleEvent};

/// Inline CSS for all pages.
///
/// Flat design, no external assets. Colors for avatars and banners come from
/// inline `style` attributes derived from pubkeys.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fafafa;--fg:#111;--fg2:#555;--fg3:#999;--accent:#9900CC;--accent-hover:#7a00a3;--surface:#fff;--border:rgba(153,0,204,.15);--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:960px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}
svg.icon{width:20px;height:20px;fill:currentColor;stroke:none;vertical-align:-3px;flex-shrink:0}

.topbar{width:100%;max-width:960px;display:flex;align-items:center;gap:1rem;margin-bottom:1.5rem}
.logo{font-size:1.5rem;font-weight:800;letter-spacing:-.03em;color:var(--fg)}
.logo span{color:var(--accent)}
.search{flex:1;display:flex}
.search input{flex:1;font:inherit;font-family:var(--mono);font-size:.9rem;padding:.5rem .75rem;border:1px solid var(--border);border-radius:6px;background:var(--surface);color:var(--fg)}
.search-help{font-size:.8rem;color:var(--fg3);margin:-1rem 0 1.5rem}
.search-help code{font-family:var(--mono);color:var(--fg2)}

.catalog{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:1rem}
.card{padding:1.25rem;border:1px solid var(--border);border-radius:10px;background:var(--surface);min-width:0}
.card h2{font-size:1.1rem;font-weight:700;margin:.25rem 0}
.card-desc{color:var(--fg2);font-size:.9rem}
.card-links{display:flex;gap:.75rem;font-size:.8rem;margin:.5rem 0}
.card-section{margin-top:1rem}
.card-section h3{font-size:.75rem;font-weight:600;color:var(--fg3);text-transform:uppercase;letter-spacing:.05em;margin-bottom:.5rem}
.empty{color:var(--fg3);font-style:italic}

.kind-badge{display:inline-block;background:var(--bg);color:var(--fg3);font-size:.78rem;padding:.2rem .6rem;border-radius:100px;font-weight:500;letter-spacing:.02em;text-transform:uppercase;border:1px solid var(--border)}
.variant-tabs{display:flex;gap:.5rem;flex-wrap:wrap;font-size:.8rem}

.avatar{border-radius:50%;flex-shrink:0;display:flex;align-items:center;justify-content:center;font-weight:700;text-transform:uppercase;overflow:hidden;position:relative}
.avatar img{position:absolute;inset:0;width:100%;height:100%;object-fit:cover}
.avatar.sm{width:28px;height:28px;font-size:.65rem}
.avatar.md{width:48px;height:48px;font-size:1rem}
.avatar.lg{width:96px;height:96px;font-size:2.2rem;border:3px solid var(--bg)}
.avatar-row{display:flex;align-items:center}
.avatar-row .avatar{margin-right:-8px;border:2px solid var(--surface)}
.avatar-more{margin-left:14px;font-size:.8rem;color:var(--fg3)}

.profile-banner{width:100%;height:140px;border-radius:8px;margin-bottom:-2rem;position:relative;overflow:hidden}
.profile-banner img{position:absolute;inset:0;width:100%;height:100%;object-fit:cover}
.profile-header{display:flex;align-items:flex-end;gap:1rem;position:relative;z-index:1;padding-left:.75rem}
.profile-name{font-size:1.5rem;font-weight:700;letter-spacing:-.02em;margin-top:.5rem}
.profile-line{display:flex;align-items:center;gap:.6rem}
.profile-about{margin:.75rem 0;white-space:pre-wrap;word-break:break-word;color:var(--fg2)}
.profile-meta{display:flex;gap:1.25rem;flex-wrap:wrap;font-size:.85rem;color:var(--fg3)}
.profile-deleted{color:#c0392b;font-weight:600;font-size:.85rem}
.npub{font-family:var(--mono);font-size:.75rem;color:var(--fg3)}

.note-head{display:flex;align-items:center;justify-content:space-between;gap:.5rem;margin-bottom:.5rem;font-size:.85rem}
.note-time{color:var(--fg3);font-size:.8rem;white-space:nowrap}
.content{white-space:pre-wrap;word-break:break-word;line-height:1.7}
.hashtags{display:flex;gap:.5rem;flex-wrap:wrap;margin-top:.5rem;font-size:.8rem}
.reply-context{font-size:.85rem;color:var(--fg3);margin-bottom:.5rem}

.follow-list{list-style:none;display:flex;flex-direction:column;gap:.35rem;max-height:320px;overflow-y:auto}
.follow-list li{display:flex;align-items:center;gap:.5rem}
.swatch{width:12px;height:12px;border-radius:3px;flex-shrink:0}

.fields{display:grid;grid-template-columns:max-content 1fr;gap:.35rem 1rem;font-size:.85rem}
.fields dt{color:var(--fg3);font-weight:600}
.fields dd{font-family:var(--mono);word-break:break-all;min-width:0}
.tag-row{display:flex;gap:.5rem;align-items:baseline}
.tag-label{font-size:.7rem;color:var(--fg3);text-transform:uppercase;white-space:nowrap}
.json-rows{display:grid;grid-template-columns:max-content 1fr;gap:.2rem .75rem}
.json-key{color:var(--accent)}
.json-count{font-size:.75rem;color:var(--fg3)}

.raw-json summary{cursor:pointer;font-size:.8rem;color:var(--fg3)}
.raw-json pre{font-family:var(--mono);font-size:.75rem;background:var(--bg);border:1px solid var(--border);border-radius:6px;padding:.75rem;overflow-x:auto;margin-top:.5rem;max-height:360px}

.actions{margin-top:1rem;display:flex}
.nostr-link{display:inline-flex;align-items:center;gap:.5rem;padding:.45rem 1rem;background:var(--accent);color:#fff;border-radius:6px;font-size:.85rem;font-weight:500}
.nostr-link:hover{background:var(--accent-hover);text-decoration:none}
.nostr-link svg.icon{fill:#fff;width:16px;height:16px}

.footer{text-align:center;margin-top:2rem;font-size:.8rem;color:var(--fg3)}

@media(prefers-color-scheme:dark){
:root{--bg:#0a0a0f;--fg:#e5e5e5;--fg2:#a0a0a0;--fg3:#666;--accent:#d946ef;--accent-hover:#e879f9;--surface:#111118;--border:rgba(191,0,255,.2)}
}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#fafafa;color:#1a1a2e;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#666;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#6c5ce7}
@media(prefers-color-scheme:dark){
body{background:#0f0f17;color:#e0e0e8}
.error-page p{color:#aaa}
.error-page a{color:#a29bfe}
}
"#;

/// Content-Security-Policy header value.
///
/// No scripts at all, inline styles only, HTTPS images. The search form
/// submits to this origin.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src https: data:; form-action 'self'; frame-ancestors 'none'";

/// CSP for embed views, which may be framed by other sites.
pub const CSP_HEADER_EMBED: &str =
    "default-src 'none'; style-src 'unsafe-inline'; img-src https: data:; form-action 'none'";

/// External link icon (Phosphor arrow-square-out, fill)
const ICON_EXTERNAL: &str = r#"<svg class="icon" viewBox="0 0 256 256"><path d="M228,104a12,12,0,0,1-24,0V69l-59.51,59.51a12,12,0,0,1-17-17L187,52H152a12,12,0,0,1,0-24h64a12,12,0,0,1,12,12Zm-44,44a12,12,0,0,0-12,12v52H52V92h52a12,12,0,0,0,0-24H48A20,20,0,0,0,28,88V216a20,20,0,0,0,20,20H176a20,20,0,0,0,20-20V160A12,12,0,0,0,184,148Z"/></svg>"#;

/// Lightning bolt icon (Phosphor lightning, fill)
pub const ICON_LIGHTNING: &str = r#"<svg class="icon" viewBox="0 0 256 256"><path d="M213.85,125.46l-112,120a8,8,0,0,1-13.69-7l14.66-73.33L57.45,143.37a8,8,0,0,1-5.3-11.83l112-120a8,8,0,0,1,13.69,7L163.18,91.87l45.37,21.76A8,8,0,0,1,213.85,125.46Z"/></svg>"#;

/// Render the full HTML page shell with header, search box and footer.
pub fn page_shell(title: &str, description: &str, query: &str, body_content: Markup) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                header class="topbar" {
                    a class="logo" href="/" { "kind" span { "lr" } }
                    form class="search" method="get" action="/" {
                        input type="search" name="q" value=(query)
                            placeholder="Search kinds: k=1,3 content:gm tags:imeta pubkey:abc" aria-label="Search";
                    }
                }
                main { (body_content) }
                footer class="footer" {
                    "Kind data from "
                    a href="https://github.com/nostr-protocol/nips" { "NIPs" }
                    " and "
                    a href="https://nostrbook.dev" { "nostrbook.dev" }
                }
            }
        }
    }
}

/// Minimal page for embed views: no header, no footer.
pub fn embed_shell(title: &str, body_content: Markup) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="robots" content="noindex";
                title { (title) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (body_content) }
            }
        }
    }
}

/// Render a kind badge ("Kind 30023").
pub fn kind_badge(kind: u16) -> Markup {
    html! {
        span class="kind-badge" { "Kind " (kind) }
    }
}

/// Links to the kind's reference pages.
pub fn doc_links(descriptor: &KindDescriptor) -> Markup {
    html! {
        div class="card-links" {
            a href=(descriptor.nurl) rel="noopener" target="_blank" { "NIP-" (descriptor.nip) }
            a href=(descriptor.kurl) rel="noopener" target="_blank" { "nostrbook" }
        }
    }
}

/// Round avatar: the picture over a colored circle with initials.
pub fn avatar(color: &str, picture: Option<&str>, name: &str, size: &str) -> Markup {
    let style = format!("background:{color};color:{}", contrast_text_color(color));
    html! {
        div class={"avatar " (size)} style=(style) title=(name) {
            (initials(name))
            @if let Some(url) = picture.filter(|u| is_safe_url(u)) {
                img src=(url) alt="" loading="lazy";
            }
        }
    }
}

/// Text with URLs, `nostr:` URIs and NIP-19 entities turned into links.
pub fn linkified(text: &str) -> Markup {
    html! {
        @for segment in linkify(text) {
            @match segment {
                TextSegment::Text(t) => { (t) }
                TextSegment::Link { kind: LinkKind::Http, href, text } => {
                    a href=(href) target="_blank" rel="nofollow noopener noreferrer" { (text) }
                }
                TextSegment::Link { href, text, .. } => {
                    a href=(href) rel="noopener" { (text) }
                }
            }
        }
    }
}

/// Collapsible pretty-printed JSON of an event.
pub fn raw_json(event: &SampleEvent) -> Markup {
    html! {
        details class="raw-json" {
            summary { "Raw JSON" }
            pre { code { (event.to_pretty_json()) } }
        }
    }
}

/// Render an "Open in Nostr" button.
pub fn nostr_link(nostr_uri: &str) -> Markup {
    html! {
        div class="actions" {
            a class="nostr-link" href=(nostr_uri) {
                (PreEscaped(ICON_EXTERNAL)) " Open in Nostr"
            }
        }
    }
}

/// Check if a URL is safe to use in `src` or `href` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Truncate a string to a maximum length in bytes, appending "..." if
/// truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- truncate() tests --

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("", 10), "");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_longer_than_max() {
        assert_eq!(truncate("hello world", 5), "hello...");
    }

    #[test]
    fn test_truncate_unicode_multibyte() {
        // byte 4 lands inside 'é', so it backs up to byte 3
        assert_eq!(truncate("café", 4), "caf...");
    }

    #[test]
    fn test_truncate_unicode_cjk() {
        assert_eq!(truncate("你好世界", 6), "你好...");
    }

    // -- is_safe_url() tests --

    #[test]
    fn test_is_safe_url_accepts_http_schemes() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("http://example.com"));
    }

    #[test]
    fn test_is_safe_url_rejects_other_schemes() {
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("data:text/html,<script>alert(1)</script>"));
        assert!(!is_safe_url("ftp://example.com/file"));
        assert!(!is_safe_url("/path/to/resource"));
        assert!(!is_safe_url(""));
    }

    // -- markup helpers --

    #[test]
    fn test_kind_badge_shows_number() {
        assert!(kind_badge(9999).into_string().contains("Kind 9999"));
    }

    #[test]
    fn test_nostr_link_renders_href() {
        let html = nostr_link("nostr:nevent1abc123").into_string();
        assert!(html.contains("href=\"nostr:nevent1abc123\""));
        assert!(html.contains("Open in Nostr"));
    }

    #[test]
    fn test_avatar_skips_unsafe_picture() {
        let html = avatar("hsl(10, 70%, 60%)", Some("javascript:alert(1)"), "Bob", "md").into_string();
        assert!(!html.contains("<img"));
        assert!(html.contains("BO"));
        assert!(html.contains("color:black"));
    }

    #[test]
    fn test_linkified_escapes_text_and_links_urls() {
        let html = linkified("<b>hi</b> https://example.com npub1abc").into_string();
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("href=\"nostr:npub1abc\""));
    }

    #[test]
    fn test_page_shell_keeps_query_in_search_box() {
        let html = page_shell("t", "d", "k=1 \"x\"", html! { p { "body" } }).into_string();
        assert!(html.contains("value=\"k=1 &quot;x&quot;\""));
        assert!(html.contains("<p>body</p>"));
    }
}
