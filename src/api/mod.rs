pub mod models;

pub use models::*;

const BUNDLED_LIBRARY: &str = include_str!("../../assets/library.json");

/// Songs shipped with the app for the demo player.
pub fn bundled_library() -> Result<Vec<Song>, serde_json::Error> {
    serde_json::from_str(BUNDLED_LIBRARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_library_parses_with_unique_ids() {
        let songs = bundled_library().expect("bundled library");
        assert!(!songs.is_empty());
        let mut ids: Vec<_> = songs.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), songs.len());
        assert!(songs.iter().all(|s| s.stream_url("").is_some()));
    }
}
