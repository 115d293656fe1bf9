mod state;
pub use state::{replace_songs, Song, SongList, SongsEvent};

mod view;
pub use view::{song_container, song_row, EMPTY_HEADING, LIST_HEADING};

mod fetch;
pub use fetch::{load_remote_list, parse_songs, HttpTransport, Transport, SONGS_PATH};

use crate::composer::{Root, Scope};
use crate::emitter::Emitter;
use crate::runtime::App;

/// Song list filled by a single remote fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SongsApp;

impl App for SongsApp {
    type State = SongList;
    type Event = SongsEvent;

    fn init(&self) -> SongList {
        SongList::default()
    }

    fn update(&self, state: &SongList, event: SongsEvent) -> SongList {
        match event {
            SongsEvent::ReplaceSongs(list) => replace_songs(state, list),
        }
    }

    fn view(&self, scope: Scope<Root>, state: &SongList, _emitter: Emitter<SongsEvent>) {
        song_container(scope, &state.songs);
    }
}
