use crate::composer::Scope;
use crate::html::Html;
use crate::songs::Song;

pub const EMPTY_HEADING: &str = "No Songs Yet!";
pub const LIST_HEADING: &str = " My favoritest songs ever!!@! ";

pub fn song_container<S>(s: Scope<S>, songs: &[Song])
where
    S: 'static,
{
    if songs.is_empty() {
        s.div(|s| s.h3(|s| s.text(EMPTY_HEADING)));
        return;
    }
    s.div(|s| {
        s.h1(|s| s.text(LIST_HEADING));
        for song in songs {
            song_row(s, song);
        }
    });
}

/// `artist - title`, with the title in italics.
pub fn song_row<S>(s: Scope<S>, song: &Song)
where
    S: 'static,
{
    s.div(|s| {
        s.h2(|s| {
            s.text(song.artist.as_str());
            s.text(" - ");
            s.i(|s| s.text(song.title.as_str()));
        });
    });
}
