//! Playlist cards and the mini player.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub description: String,
    pub spotify_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub owner: String,
    pub tracks_count: u32,
}

impl Playlist {
    /// `"Fitness App • 45 tracks"`
    pub fn meta_line(&self) -> String {
        format!("{} • {} tracks", self.owner, self.tracks_count)
    }

    /// Only http(s) links are opened
    pub fn link(&self) -> Option<url::Url> {
        url::Url::parse(&self.spotify_url)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    #[serde(default, rename = "albumArt", skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
}

/// Mini player state: a queue, a cursor and a play flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Player {
    queue: Vec<Track>,
    position: usize,
    playing: bool,
}

impl Player {
    /// Seed with `queue`, starting on the first track and playing.
    pub fn autoplay(queue: Vec<Track>) -> Self {
        let playing = !queue.is_empty();
        Self {
            queue,
            position: 0,
            playing,
        }
    }

    pub fn current(&self) -> Option<&Track> {
        self.queue.get(self.position)
    }

    pub fn is_playing(&self) -> bool {
        self.playing && self.current().is_some()
    }

    pub fn toggle(&mut self) {
        if self.current().is_some() {
            self.playing = !self.playing;
        }
    }

    /// Advance to the next track, wrapping at the end of the queue
    pub fn skip(&mut self) {
        if !self.queue.is_empty() {
            self.position = (self.position + 1) % self.queue.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str) -> Track {
        Track {
            title: title.to_string(),
            artist: "Artist".to_string(),
            album_art: None,
        }
    }

    #[test]
    fn test_autoplay_starts_on_first_track() {
        let player = Player::autoplay(vec![track("a"), track("b")]);
        assert!(player.is_playing());
        assert_eq!(player.current().map(|t| t.title.as_str()), Some("a"));
    }

    #[test]
    fn test_empty_queue_never_plays() {
        let mut player = Player::autoplay(vec![]);
        player.toggle();
        player.skip();
        assert!(!player.is_playing());
        assert!(player.current().is_none());
    }

    #[test]
    fn test_toggle_and_skip_wrap() {
        let mut player = Player::autoplay(vec![track("a"), track("b")]);
        player.toggle();
        assert!(!player.is_playing());

        player.skip();
        assert_eq!(player.current().map(|t| t.title.as_str()), Some("b"));
        player.skip();
        assert_eq!(player.current().map(|t| t.title.as_str()), Some("a"));
        // Skipping keeps the play/pause state
        assert!(!player.is_playing());
    }

    #[test]
    fn test_link_rejects_other_schemes() {
        let mut playlist = Playlist {
            name: "p".to_string(),
            description: String::new(),
            spotify_url: "https://open.spotify.com/playlist/x".to_string(),
            image_url: None,
            owner: "Gym Beast".to_string(),
            tracks_count: 60,
        };
        assert!(playlist.link().is_some());
        assert_eq!(playlist.meta_line(), "Gym Beast • 60 tracks");

        playlist.spotify_url = "javascript:alert(1)".to_string();
        assert!(playlist.link().is_none());
    }
}
