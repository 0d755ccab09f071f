//! Human-readable labels for tag names.

/// Label for a tag name, or the name itself when it has no label.
pub fn tag_label(tag_type: &str) -> &str {
    match tag_type {
        "a" => "Address",
        "d" => "Identifier",
        "e" => "Event",
        "g" => "Geohash",
        "h" => "Hashtag",
        "i" => "Identity",
        "imeta" => "Image/Media",
        "k" => "Kind",
        "p" => "Profile",
        "q" => "Query",
        "r" => "Reference",
        "relay" => "Relay",
        "t" => "Tag",
        "title" => "Title",
        "description" => "Description",
        "image" => "Image",
        "previous" => "Previous",
        "proxy" => "Proxy",
        "client" => "Client",
        "alt" => "Alternative",
        other => other,
    }
}
