use super::LibraryEntry;
use std::collections::HashSet;

/// What the file grid shows: the last received library, the files with a
/// delete in flight and whether a refresh is pending. Cards are addressed
/// by path so that a refresh between press and action cannot retarget them.
#[derive(Debug, Clone, Default)]
pub struct LibraryView {
    entries: Option<Vec<LibraryEntry>>,
    deleting: HashSet<String>,
    refreshing: bool,
}

impl LibraryView {
    /// `None` until the first library arrives.
    pub fn entries(&self) -> Option<&[LibraryEntry]> {
        self.entries.as_deref()
    }

    pub fn replace(&mut self, entries: Vec<LibraryEntry>) {
        self.deleting
            .retain(|path| entries.iter().any(|entry| &entry.path == path));
        self.entries = Some(entries);
        self.refreshing = false;
    }

    /// Returns `false` while a refresh is already pending.
    pub fn begin_refresh(&mut self) -> bool {
        !std::mem::replace(&mut self.refreshing, true)
    }

    pub fn refresh_failed(&mut self) {
        self.refreshing = false;
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Position and entry of the file at `path`, if it is still listed.
    pub fn find(&self, path: &str) -> Option<(usize, &LibraryEntry)> {
        self.entries
            .as_ref()?
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.path == path)
    }

    pub fn mark_deleting(&mut self, path: &str) {
        self.deleting.insert(path.to_string());
    }

    /// Returns whether the card changed.
    pub fn delete_failed(&mut self, path: &str) -> bool {
        self.deleting.remove(path)
    }

    pub fn is_deleting(&self, path: &str) -> bool {
        self.deleting.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> LibraryEntry {
        LibraryEntry {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            size: "1.0 MB".into(),
        }
    }

    #[test]
    fn refresh_is_pending_until_entries_arrive() {
        let mut view = LibraryView::default();

        assert!(view.begin_refresh());
        assert!(!view.begin_refresh());
        assert!(view.is_refreshing());

        view.replace(vec![entry("audios/a.mp3")]);

        assert!(!view.is_refreshing());
        assert!(view.begin_refresh());
    }

    #[test]
    fn failed_refresh_can_be_retried() {
        let mut view = LibraryView::default();

        view.begin_refresh();
        view.refresh_failed();

        assert!(!view.is_refreshing());
        assert!(view.begin_refresh());
    }

    #[test]
    fn lookup_follows_the_path_across_refreshes() {
        let mut view = LibraryView::default();
        view.replace(vec![entry("audios/a.mp3"), entry("videos/b.mp4")]);

        assert_eq!(view.find("videos/b.mp4").map(|(i, _)| i), Some(1));

        view.replace(vec![entry("videos/b.mp4")]);

        let (index, found) = view.find("videos/b.mp4").unwrap();
        assert_eq!(index, 0);
        assert_eq!(found.name, "b.mp4");
        assert!(view.find("audios/a.mp3").is_none());
    }

    #[test]
    fn deleting_marks_are_dropped_with_their_files() {
        let mut view = LibraryView::default();
        view.replace(vec![entry("audios/a.mp3"), entry("audios/b.mp3")]);
        view.mark_deleting("audios/a.mp3");
        view.mark_deleting("audios/b.mp3");

        view.replace(vec![entry("audios/b.mp3")]);
        assert!(!view.is_deleting("audios/a.mp3"));
        assert!(view.is_deleting("audios/b.mp3"));

        assert!(view.delete_failed("audios/b.mp3"));
        assert!(!view.delete_failed("audios/b.mp3"));
    }
}
