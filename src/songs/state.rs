use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub artist: String,
    pub title: String,
}

impl Song {
    pub fn new<A: Into<String>, T: Into<String>>(artist: A, title: T) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }
}

/// Empty until the first successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongList {
    pub songs: Rc<[Song]>,
}

impl Default for SongList {
    fn default() -> Self {
        Self {
            songs: Rc::from(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongsEvent {
    ReplaceSongs(Vec<Song>),
}

/// The fetched list replaces whatever was there; nothing is merged.
pub fn replace_songs(_state: &SongList, list: Vec<Song>) -> SongList {
    SongList {
        songs: Rc::from(list),
    }
}
