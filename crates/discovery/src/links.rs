//! Outbound links for a place: external map search, social tag search and the
//! in-site AR/VR preview route.

use foundation::LatLng;
use tracing::debug;

const MAPS_SEARCH: &str = "https://www.google.com/maps/search/?api=1&query=";
const SOCIAL_TAGS: &str = "https://www.instagram.com/explore/tags/";
const PREVIEW_ROUTE: &str = "/maps/ar-vr-preview/";

/// Fire-and-forget navigation sink. Nothing is returned to the page.
pub trait Navigator {
    /// Opens `url` in a new browsing context.
    fn open_external(&mut self, url: &str);
    /// Moves the current browsing context to an in-site `path`.
    fn navigate(&mut self, path: &str);
}

/// Records navigation requests instead of performing them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingNavigator {
    pub external: Vec<String>,
    pub internal: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn open_external(&mut self, url: &str) {
        debug!(url, "open external");
        self.external.push(url.to_string());
    }

    fn navigate(&mut self, path: &str) {
        debug!(path, "navigate");
        self.internal.push(path.to_string());
    }
}

/// External map search for a position; `None` for positions that would not
/// resolve to anything.
pub fn maps_search_url(position: LatLng) -> Option<String> {
    if !position.is_valid() {
        return None;
    }
    Some(format!("{MAPS_SEARCH}{},{}", position.lat, position.lng))
}

/// Hashtag search for a place name: whitespace removed, lowercased.
pub fn social_tag_url(name: &str) -> String {
    let tag: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    format!("{SOCIAL_TAGS}{}/", percent_encode(&tag))
}

/// In-site preview route: whitespace runs become `-`, lowercased. The slug is
/// left as typed; the router receives it verbatim.
pub fn preview_path(name: &str) -> String {
    format!("{PREVIEW_ROUTE}{}", slug(name))
}

pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Human title for a preview slug: `-` becomes a space and every word
/// character that follows a non-word character is capitalised.
pub fn preview_title(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut in_word = false;
    for c in slug.chars().map(|c| if c == '-' { ' ' } else { c }) {
        let word_char = c.is_alphanumeric() || c == '_';
        if word_char && !in_word {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        in_word = word_char;
    }
    title
}

// Unreserved characters (RFC 3986) pass through; everything else is %XX per byte.
fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
