//! Minimal HTML pages. Everything taken from Spotify is escaped.

use std::fmt::Write;

use crate::types::{TopArtist, TopTrack};

/// Renders the signed-in page: both top lists and a sign-out link.
///
/// # Arguments
///
/// * `artists` - Top artists; the first three genres are shown next to each
/// * `tracks` - Top tracks, shown with their artists joined by commas
///
/// # Returns
///
/// A complete HTML document. Names link to Spotify only when the external
/// URL is `https`.
pub fn top_items(artists: &[TopArtist], tracks: &[TopTrack]) -> String {
    let mut body = String::new();

    body.push_str("<h2>Top artists</h2>\n<ol class=\"artists\">\n");
    for artist in artists {
        let genres = artist.genres.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
        let _ = writeln!(
            body,
            "<li>{name}{genres}</li>",
            name = link(&artist.name, artist.external_urls.spotify.as_deref()),
            genres = if genres.is_empty() {
                String::new()
            } else {
                format!(" <small>{}</small>", escape(&genres))
            },
        );
    }
    body.push_str("</ol>\n");

    body.push_str("<h2>Top tracks</h2>\n<ol class=\"tracks\">\n");
    for track in tracks {
        let artists = track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            body,
            "<li>{name} <small>{artists}</small></li>",
            name = link(&track.name, track.external_urls.spotify.as_deref()),
            artists = escape(&artists),
        );
    }
    body.push_str("</ol>\n<p><a href=\"/logout\">Sign out</a></p>\n");

    layout("Your top artists and tracks", &body)
}

/// Renders an error page with a link back to `/`.
///
/// # Arguments
///
/// * `title` - Heading and document title
/// * `message` - Explanation shown below the heading
///
/// # Returns
///
/// A complete HTML document; both strings are escaped.
pub fn failure(title: &str, message: &str) -> String {
    let body = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<p><a href=\"/\">Start over</a></p>\n",
        escape(title),
        escape(message)
    );
    layout(title, &body)
}

/// Page shown after logout.
pub fn signed_out() -> String {
    layout(
        "Signed out",
        "<h2>Signed out</h2>\n<p><a href=\"/\">Sign in with Spotify</a></p>\n",
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn link(text: &str, href: Option<&str>) -> String {
    match href {
        Some(href) if href.starts_with("https://") => {
            format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
        }
        _ => escape(text),
    }
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
