use super::LibraryEntry;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("the playlist is empty")]
    Empty,
}

/// What to do once a track has played to its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Start the same track again from position zero.
    Replay(usize),
    Select(usize),
}

/// Track selection over the library, with loop and shuffle.
///
/// Loop and shuffle are independent; when both are on, loop wins for
/// [`advance`](Self::advance). Under shuffle, `next` and `previous` both
/// pick a uniformly random track (which may be the current one).
#[derive(Debug, Clone, Default)]
pub struct PlaylistController {
    entries: Vec<LibraryEntry>,
    current: Option<usize>,
    loop_enabled: bool,
    shuffle_enabled: bool,
}

impl PlaylistController {
    pub fn new(entries: Vec<LibraryEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&LibraryEntry> {
        self.current.and_then(|index| self.entries.get(index))
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle_enabled = enabled;
    }

    /// Returns the new state.
    pub fn toggle_loop(&mut self) -> bool {
        self.loop_enabled = !self.loop_enabled;
        self.loop_enabled
    }

    /// Returns the new state.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle_enabled = !self.shuffle_enabled;
        self.shuffle_enabled
    }

    /// Selects `index`, wrapping a negative index to the last track and an
    /// index past the end to the first one.
    pub fn select(&mut self, index: isize) -> Result<usize, PlaylistError> {
        if self.entries.is_empty() {
            return Err(PlaylistError::Empty);
        }

        let len = self.entries.len() as isize;
        let normalized = match index {
            i if i < 0 => len - 1,
            i if i >= len => 0,
            i => i,
        } as usize;

        self.current = Some(normalized);
        Ok(normalized)
    }

    /// Called when the current track ended on its own.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Advance, PlaylistError> {
        if self.entries.is_empty() {
            return Err(PlaylistError::Empty);
        }

        match (self.loop_enabled, self.current) {
            (true, Some(index)) => Ok(Advance::Replay(index)),
            _ => self.next(rng).map(Advance::Select),
        }
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, PlaylistError> {
        self.step(1, rng)
    }

    pub fn previous<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, PlaylistError> {
        self.step(-1, rng)
    }

    fn step<R: Rng + ?Sized>(&mut self, delta: isize, rng: &mut R) -> Result<usize, PlaylistError> {
        if self.entries.is_empty() {
            return Err(PlaylistError::Empty);
        }

        match self.shuffle_enabled {
            true => {
                let index = rng.gen_range(0..self.entries.len());
                self.select(index as isize)
            }
            false => {
                let current = self.current.map_or(-1, |index| index as isize);
                self.select(current + delta)
            }
        }
    }

    /// Swaps in a freshly fetched library. The selection follows the
    /// current track by path; if that file is gone nothing is selected.
    pub fn replace_entries(&mut self, entries: Vec<LibraryEntry>) {
        let current_path = self.current().map(|entry| entry.path.clone());

        self.entries = entries;
        self.current = current_path.and_then(|path| self.position_of(&path));
    }

    pub fn position_of(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn entries(count: usize) -> Vec<LibraryEntry> {
        (0..count)
            .map(|i| LibraryEntry {
                name: format!("track{}.mp3", i),
                path: format!("audios/track{}.mp3", i),
                size: "1.00 MB".into(),
            })
            .collect()
    }

    #[test]
    fn select_wraps_around() {
        let mut playlist = PlaylistController::new(entries(3));

        assert_eq!(playlist.select(-1), Ok(2));
        assert_eq!(playlist.select(3), Ok(0));
        assert_eq!(playlist.select(1), Ok(1));
        assert_eq!(playlist.current().unwrap().name, "track1.mp3");
    }

    #[test]
    fn empty_playlist_is_rejected() {
        let mut playlist = PlaylistController::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(playlist.select(0), Err(PlaylistError::Empty));
        assert_eq!(playlist.advance(&mut rng), Err(PlaylistError::Empty));
        assert_eq!(playlist.next(&mut rng), Err(PlaylistError::Empty));
        assert_eq!(playlist.previous(&mut rng), Err(PlaylistError::Empty));
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn advance_wraps_to_first_track() {
        let mut playlist = PlaylistController::new(entries(3));
        let mut rng = StdRng::seed_from_u64(7);

        playlist.select(2).unwrap();
        assert_eq!(playlist.advance(&mut rng), Ok(Advance::Select(0)));
        assert_eq!(playlist.current_index(), Some(0));
    }

    #[test]
    fn loop_beats_shuffle() {
        let mut playlist = PlaylistController::new(entries(5));
        let mut rng = StdRng::seed_from_u64(3);

        playlist.select(3).unwrap();
        playlist.set_loop(true);
        playlist.set_shuffle(true);

        for _ in 0..20 {
            assert_eq!(playlist.advance(&mut rng), Ok(Advance::Replay(3)));
        }
        assert_eq!(playlist.current_index(), Some(3));
    }

    #[test]
    fn shuffle_stays_in_bounds_in_both_directions() {
        let mut playlist = PlaylistController::new(entries(4));
        let mut rng = StdRng::seed_from_u64(11);

        playlist.select(0).unwrap();
        assert!(playlist.toggle_shuffle());

        for _ in 0..50 {
            assert!(playlist.next(&mut rng).unwrap() < 4);
            assert!(playlist.previous(&mut rng).unwrap() < 4);
        }
    }

    #[test]
    fn navigation_from_nothing_selected() {
        let mut playlist = PlaylistController::new(entries(3));
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(playlist.next(&mut rng), Ok(0));

        let mut playlist = PlaylistController::new(entries(3));
        assert_eq!(playlist.previous(&mut rng), Ok(2));
    }

    #[test]
    fn refresh_follows_current_track_by_path() {
        let mut playlist = PlaylistController::new(entries(3));
        playlist.select(1).unwrap();

        let mut refreshed = entries(3);
        refreshed.insert(
            0,
            LibraryEntry {
                name: "new.mp3".into(),
                path: "audios/new.mp3".into(),
                size: "2.00 MB".into(),
            },
        );
        playlist.replace_entries(refreshed);
        assert_eq!(playlist.current_index(), Some(2));
        assert_eq!(playlist.current().unwrap().path, "audios/track1.mp3");

        playlist.replace_entries(entries(1));
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn toggles_are_independent() {
        let mut playlist = PlaylistController::new(entries(2));

        assert!(playlist.toggle_loop());
        assert!(playlist.toggle_shuffle());
        assert!(!playlist.toggle_loop());
        assert!(playlist.shuffle_enabled());
    }
}
