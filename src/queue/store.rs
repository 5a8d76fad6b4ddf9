use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The three backing slots of a deck. Each maps to one newline-delimited
/// text file; a line *including its trailing newline* is a card's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    All,
    Learned,
    Unlearned,
}

impl Slot {
    pub fn file_name(self) -> &'static str {
        match self {
            Slot::All => "questions.txt",
            Slot::Learned => "learned_questions.txt",
            Slot::Unlearned => "unlearned_questions.txt",
        }
    }
}

/// Flat-file deck storage. All writes except the two append paths are full
/// rewrites with no temp-file or fsync step; a crash mid-write can truncate
/// a slot. Single-process access is assumed.
pub struct DeckStore {
    base_dir: PathBuf,
}

impl DeckStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path(&self, slot: Slot) -> PathBuf {
        self.base_dir.join(slot.file_name())
    }

    /// All lines of a slot in file order, each keeping its trailing newline
    /// (the final line may lack one).
    pub fn read_lines(&self, slot: Slot) -> io::Result<Vec<String>> {
        let content = fs::read_to_string(self.path(slot))?;
        Ok(content.split_inclusive('\n').map(str::to_string).collect())
    }

    pub fn read_set(&self, slot: Slot) -> io::Result<HashSet<String>> {
        Ok(self.read_lines(slot)?.into_iter().collect())
    }

    /// Replace the slot's contents with the given lines, in iteration order.
    pub fn overwrite<I, S>(&self, slot: Slot, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut file = fs::File::create(self.path(slot))?;
        for line in lines {
            file.write_all(line.as_ref().as_bytes())?;
        }
        Ok(())
    }

    pub fn append(&self, slot: Slot, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(slot))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_store(all: &str) -> (TempDir, DeckStore) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("questions.txt"), all).unwrap();
        let store = DeckStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn read_lines_keeps_trailing_newlines() {
        let (_dir, store) = make_store("alpha\nbeta\n");
        let lines = store.read_lines(Slot::All).unwrap();
        assert_eq!(lines, vec!["alpha\n", "beta\n"]);
    }

    #[test]
    fn read_lines_final_line_without_newline() {
        let (_dir, store) = make_store("alpha\nbeta");
        let lines = store.read_lines(Slot::All).unwrap();
        assert_eq!(lines, vec!["alpha\n", "beta"]);
    }

    #[test]
    fn read_lines_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = DeckStore::new(dir.path());
        assert!(store.read_lines(Slot::Learned).is_err());
    }

    #[test]
    fn overwrite_replaces_contents() {
        let (_dir, store) = make_store("old\n");
        store.overwrite(Slot::All, ["one\n", "two\n"]).unwrap();
        assert_eq!(
            fs::read_to_string(store.path(Slot::All)).unwrap(),
            "one\ntwo\n"
        );
    }

    #[test]
    fn append_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = DeckStore::new(dir.path());
        store.append(Slot::Unlearned, "solo\n").unwrap();
        store.append(Slot::Unlearned, "duo\n").unwrap();
        assert_eq!(
            fs::read_to_string(store.path(Slot::Unlearned)).unwrap(),
            "solo\nduo\n"
        );
    }
}
