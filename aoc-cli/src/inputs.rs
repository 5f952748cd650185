//! Local puzzle input files

use crate::error::InputError;
use std::fs;
use std::path::PathBuf;

/// Read-only store of puzzle inputs
///
/// Directory layout: `{dir}/{year}_day{day:02}.txt`. An explicit override
/// file replaces the lookup for every year/day.
pub struct InputStore {
    dir: PathBuf,
    override_file: Option<PathBuf>,
}

impl InputStore {
    pub fn new(dir: PathBuf, override_file: Option<PathBuf>) -> Self {
        Self { dir, override_file }
    }

    /// Path of the input for a year/day
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        match &self.override_file {
            Some(file) => file.clone(),
            None => self.dir.join(format!("{}_day{:02}.txt", year, day)),
        }
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        fs::read_to_string(&path).map_err(|source| InputError::Read { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), None);

        assert!(store.path(2024, 1).ends_with("2024_day01.txt"));
        assert!(store.path(2023, 25).ends_with("2023_day25.txt"));
    }

    #[test]
    fn test_read_existing_and_missing() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), None);
        assert!(!store.contains(2024, 2));
        assert!(matches!(store.read(2024, 2), Err(InputError::Read { .. })));

        fs::write(temp.path().join("2024_day02.txt"), "7 6 4 2 1\n").unwrap();
        assert!(store.contains(2024, 2));
        assert_eq!(store.read(2024, 2).unwrap(), "7 6 4 2 1\n");
    }

    #[test]
    fn test_override_file_wins() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("custom.txt");
        fs::write(&file, "mul(2,3)").unwrap();

        let store = InputStore::new(temp.path().join("unused"), Some(file.clone()));
        assert_eq!(store.path(2024, 3), file);
        assert_eq!(store.read(2024, 3).unwrap(), "mul(2,3)");
    }
}
