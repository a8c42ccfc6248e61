// SPDX-License-Identifier: MPL-2.0
//! Background-music track list.
//!
//! Tracks are discovered by scanning a sounds directory for `.mp3` files,
//! sorted by file name and numbered from 1. The playlist cursor advances
//! with wraparound when a track ends, unless the listener picked a
//! specific track — a picked track repeats until the selection is cleared.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// One playable track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// 1-based position in the scanned list.
    pub id: u32,
    /// Display name (file stem).
    pub name: String,
    /// Path to the audio file.
    pub file: PathBuf,
}

/// Checks if a file is a supported audio track.
fn is_supported_track(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

/// Scans a directory for `.mp3` files, sorted by file name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn scan_tracks(directory: &Path) -> Result<Vec<Track>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && is_supported_track(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files
        .into_iter()
        .enumerate()
        .map(|(index, file)| Track {
            id: index as u32 + 1,
            name: file
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string(),
            file,
        })
        .collect())
}

/// Playlist cursor with pin-to-repeat semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: usize,
    pinned: bool,
    playing: bool,
}

impl Playlist {
    /// Creates a playlist positioned on the first track, not playing.
    #[must_use]
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current: 0,
            pinned: false,
            playing: false,
        }
    }

    /// Returns the number of tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Checks if the playlist has no tracks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Returns all tracks in order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Returns the current position, or `None` for an empty playlist.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    /// Returns the current track.
    #[must_use]
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    /// Checks whether a specific track is pinned for repeat.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Checks whether playback is active.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Sets the playback flag.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Picks a specific track, pinning it so it repeats when it ends.
    ///
    /// Out-of-range indices are rejected as a no-op.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = index;
            self.pinned = true;
            true
        } else {
            false
        }
    }

    /// Clears the pinned selection; the playlist auto-advances again.
    pub fn clear_selection(&mut self) {
        self.pinned = false;
    }

    /// Advances past the ended track and returns the track to play next.
    ///
    /// A pinned track repeats; otherwise the cursor wraps to the next
    /// track. Returns `None` for an empty playlist.
    pub fn on_track_end(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        if !self.pinned {
            self.current = (self.current + 1) % self.tracks.len();
        }
        self.tracks.get(self.current)
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_track(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("failed to create test file");
        file.write_all(b"fake audio data")
            .expect("failed to write test file");
        path
    }

    fn playlist_of(count: usize) -> Playlist {
        let tracks = (0..count)
            .map(|i| Track {
                id: i as u32 + 1,
                name: format!("track_{i}"),
                file: PathBuf::from(format!("track_{i}.mp3")),
            })
            .collect();
        Playlist::new(tracks)
    }

    #[test]
    fn scan_tracks_filters_and_sorts_mp3_files() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_test_track(temp_dir.path(), "b-waltz.mp3");
        create_test_track(temp_dir.path(), "a-prelude.mp3");
        create_test_track(temp_dir.path(), "cover.jpg");
        create_test_track(temp_dir.path(), "notes.txt");

        let tracks = scan_tracks(temp_dir.path()).expect("scan failed");

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, 1);
        assert_eq!(tracks[0].name, "a-prelude");
        assert_eq!(tracks[1].id, 2);
        assert_eq!(tracks[1].name, "b-waltz");
    }

    #[test]
    fn scan_tracks_accepts_uppercase_extension() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_test_track(temp_dir.path(), "SONG.MP3");

        let tracks = scan_tracks(temp_dir.path()).expect("scan failed");
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "SONG");
    }

    #[test]
    fn scan_tracks_fails_on_missing_directory() {
        assert!(scan_tracks(Path::new("/nonexistent/sounds")).is_err());
    }

    #[test]
    fn new_playlist_starts_on_first_track() {
        let playlist = playlist_of(3);
        assert_eq!(playlist.current_index(), Some(0));
        assert!(!playlist.is_pinned());
        assert!(!playlist.is_playing());
    }

    #[test]
    fn empty_playlist_has_no_current_track() {
        let mut playlist = Playlist::default();
        assert_eq!(playlist.current_index(), None);
        assert_eq!(playlist.current_track(), None);
        assert_eq!(playlist.on_track_end(), None);
    }

    #[test]
    fn track_end_advances_with_wraparound() {
        let mut playlist = playlist_of(3);

        assert_eq!(playlist.on_track_end().map(|t| t.id), Some(2));
        assert_eq!(playlist.on_track_end().map(|t| t.id), Some(3));
        assert_eq!(playlist.on_track_end().map(|t| t.id), Some(1));
    }

    #[test]
    fn pinned_track_repeats_on_end() {
        let mut playlist = playlist_of(3);
        assert!(playlist.select(1));

        assert_eq!(playlist.on_track_end().map(|t| t.id), Some(2));
        assert_eq!(playlist.on_track_end().map(|t| t.id), Some(2));
    }

    #[test]
    fn clearing_selection_resumes_auto_advance() {
        let mut playlist = playlist_of(3);
        assert!(playlist.select(2));
        playlist.clear_selection();

        assert_eq!(playlist.on_track_end().map(|t| t.id), Some(1));
    }

    #[test]
    fn select_rejects_out_of_range_index() {
        let mut playlist = playlist_of(2);
        assert!(!playlist.select(2));
        assert_eq!(playlist.current_index(), Some(0));
        assert!(!playlist.is_pinned());
    }
}
