use mediaload_pwa::objects::{Advance, LibraryEntry, PlaylistController, PlaylistError};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashSet;

fn entries(names: &[&str]) -> Vec<LibraryEntry> {
    names
        .iter()
        .map(|name| LibraryEntry {
            name: name.to_string(),
            path: name.to_string(),
            size: "3.1 MB".into(),
        })
        .collect()
}

#[test]
fn selection_wraps_around_both_ends() {
    let mut playlist = PlaylistController::new(entries(&["a.mp3", "b.mp3", "c.mp3"]));

    assert_eq!(playlist.select(3), Ok(0));
    assert_eq!(playlist.select(-1), Ok(2));
}

#[test]
fn track_end_moves_to_next_and_wraps() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut playlist = PlaylistController::new(entries(&["a.mp3", "b.mp3", "c.mp3"]));

    playlist.select(2).unwrap();

    assert_eq!(playlist.advance(&mut rng), Ok(Advance::Select(0)));
    assert_eq!(playlist.current().unwrap().name, "a.mp3");
}

#[test]
fn loop_replays_even_when_shuffling() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut playlist = PlaylistController::new(entries(&["a.mp3", "b.mp3", "c.mp3"]));

    playlist.select(1).unwrap();
    playlist.set_shuffle(true);
    playlist.set_loop(true);

    assert_eq!(playlist.advance(&mut rng), Ok(Advance::Replay(1)));
    assert_eq!(playlist.current_index(), Some(1));
}

#[test]
fn empty_playlist_cannot_advance() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut playlist = PlaylistController::new(Vec::new());

    assert_eq!(playlist.next(&mut rng), Err(PlaylistError::Empty));
    assert_eq!(playlist.advance(&mut rng), Err(PlaylistError::Empty));
}

#[test]
fn refresh_keeps_the_playing_file_selected() {
    let mut playlist = PlaylistController::new(entries(&["a.mp3", "b.mp3", "c.mp3"]));

    playlist.select(1).unwrap();
    playlist.replace_entries(entries(&["new.mp3", "a.mp3", "b.mp3", "c.mp3"]));
    assert_eq!(playlist.current_index(), Some(2));

    playlist.replace_entries(entries(&["a.mp3"]));
    assert_eq!(playlist.current_index(), None);
}

#[test]
fn shuffle_without_loop_picks_any_track_on_end() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut playlist = PlaylistController::new(entries(&["a.mp3", "b.mp3", "c.mp3", "d.mp3"]));
    let mut seen = HashSet::new();

    playlist.select(0).unwrap();
    playlist.set_shuffle(true);

    for _ in 0..200 {
        match playlist.advance(&mut rng) {
            Ok(Advance::Select(index)) => {
                assert!(index < playlist.len());
                assert_eq!(playlist.current_index(), Some(index));
                seen.insert(index);
            }
            other => panic!("unexpected advance result {:?}", other),
        }
    }

    assert_eq!(seen.len(), playlist.len());
}
