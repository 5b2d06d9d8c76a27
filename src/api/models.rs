use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, alias = "songPath", alias = "song_url")]
    pub song_path: String,
    #[serde(default, alias = "imagePath")]
    pub image_path: Option<String>,
}

impl Song {
    /// Playable URL for this song, if it has a path at all.
    pub fn stream_url(&self, media_base_url: &str) -> Option<String> {
        resolve_media_url(media_base_url, &self.song_path)
    }

    pub fn cover_url(&self, media_base_url: &str) -> Option<String> {
        self.image_path
            .as_deref()
            .and_then(|path| resolve_media_url(media_base_url, path))
    }

    pub fn display_author(&self) -> &str {
        let author = self.author.trim();
        if author.is_empty() {
            "Unknown Artist"
        } else {
            author
        }
    }
}

fn is_absolute(path: &str) -> bool {
    path.contains("://")
        || path.starts_with('/')
        || path.starts_with("data:")
        || path.starts_with("blob:")
}

/// Joins a relative media path onto the base URL. Absolute URLs and
/// root-relative paths are returned unchanged.
pub fn resolve_media_url(base: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() || is_absolute(path) {
        return Some(path.to_string());
    }
    Some(format!("{base}/{}", path.trim_start_matches("./")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(path: &str) -> Song {
        Song {
            id: "1".to_string(),
            title: "Intro".to_string(),
            song_path: path.to_string(),
            ..Song::default()
        }
    }

    #[test]
    fn relative_paths_join_the_base() {
        let song = song("songs/intro.mp3");
        assert_eq!(
            song.stream_url("https://cdn.example.com/media/").as_deref(),
            Some("https://cdn.example.com/media/songs/intro.mp3")
        );
        assert_eq!(
            resolve_media_url("/media", "./a.mp3").as_deref(),
            Some("/media/a.mp3")
        );
    }

    #[test]
    fn absolute_paths_are_untouched() {
        for path in ["https://x.test/a.mp3", "/static/a.mp3", "blob:abc"] {
            assert_eq!(
                resolve_media_url("https://cdn.example.com", path).as_deref(),
                Some(path)
            );
        }
    }

    #[test]
    fn empty_base_uses_path_as_is() {
        assert_eq!(resolve_media_url("", "a.mp3").as_deref(), Some("a.mp3"));
    }

    #[test]
    fn empty_path_has_no_url() {
        assert_eq!(song("  ").stream_url("https://cdn.example.com"), None);
        assert_eq!(song("a.mp3").cover_url("https://cdn.example.com"), None);
    }

    #[test]
    fn camel_case_payloads_deserialize() {
        let song: Song = serde_json::from_str(
            r#"{"id":"7","title":"Night","author":"","songPath":"n.mp3","imagePath":"n.jpg"}"#,
        )
        .expect("song json");
        assert_eq!(song.song_path, "n.mp3");
        assert_eq!(song.image_path.as_deref(), Some("n.jpg"));
        assert_eq!(song.display_author(), "Unknown Artist");
    }
}
