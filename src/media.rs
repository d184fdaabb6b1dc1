//! Display helpers for listings: video embeds, image previews, star ratings.

use leptos::logging::warn;

use crate::models::user::PublicUserData;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Rewrites a YouTube watch or short link into its embeddable form.
/// Embed links and anything unrecognised come back unchanged.
pub fn youtube_embed_url(url: &str) -> String {
    if let Some((_, rest)) = url.split_once("youtube.com/watch?v=") {
        let id = rest.split('&').next().unwrap_or_default();
        return format!("{YOUTUBE_EMBED_BASE}{id}");
    }
    if let Some((_, rest)) = url.split_once("youtu.be/") {
        let id = rest.split('?').next().unwrap_or_default();
        return format!("{YOUTUBE_EMBED_BASE}{id}");
    }
    url.to_string()
}

pub fn full_name(user: &PublicUserData) -> String {
    format!("{} {}", user.first_name, user.last_name)
        .trim()
        .to_string()
}

/// Five flags, `true` for each filled star.
pub fn star_array(rating: u8) -> [bool; 5] {
    std::array::from_fn(|i| i < rating as usize)
}

/// Columns in the listing grid for a viewport width in CSS pixels.
pub fn grid_columns(width: f64) -> usize {
    if width < 600.0 {
        1
    } else if width < 960.0 {
        2
    } else if width < 1200.0 {
        3
    } else {
        4
    }
}

pub fn format_price(price: f64) -> String {
    format!("€{price:.2}")
}

/// Blob URL that renders `file` in an `<img>` without uploading it.
pub fn create_preview_url(file: &web_sys::File) -> Option<String> {
    match web_sys::Url::create_object_url_with_blob(file) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("[MEDIA] Could not create preview for {}: {:?}", file.name(), e);
            None
        }
    }
}

pub fn revoke_preview_url(url: &str) {
    if let Err(e) = web_sys::Url::revoke_object_url(url) {
        warn!("[MEDIA] Could not revoke preview {}: {:?}", url, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_links_become_embeds() {
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn short_links_become_embeds() {
        assert_eq!(
            youtube_embed_url("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn other_links_pass_through() {
        let embed = "https://www.youtube.com/embed/dQw4w9WgXcQ";
        assert_eq!(youtube_embed_url(embed), embed);
        assert_eq!(youtube_embed_url("https://vimeo.com/1"), "https://vimeo.com/1");
    }

    #[test]
    fn names_and_stars() {
        let user = PublicUserData {
            username: "ana".into(),
            first_name: "Ana".into(),
            ..Default::default()
        };
        assert_eq!(full_name(&user), "Ana");
        assert_eq!(star_array(3), [true, true, true, false, false]);
        assert_eq!(star_array(0), [false; 5]);
    }

    #[test]
    fn grid_breakpoints() {
        assert_eq!(grid_columns(320.0), 1);
        assert_eq!(grid_columns(600.0), 2);
        assert_eq!(grid_columns(1199.0), 3);
        assert_eq!(grid_columns(1920.0), 4);
        assert_eq!(format_price(12.5), "€12.50");
    }
}
