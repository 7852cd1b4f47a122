use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const KEY_FILE_ENV: &str = "FASHIONPROMPT_KEY_FILE";
const DEFAULT_KEY_FILE: &str = ".fashionprompt/api_key";

/// Single-slot persistent store for the user's API key.
///
/// The key is a plain string in a file, not encrypted. It is read once at
/// startup and rewritten only when the user saves a new key. The stored value
/// itself is never logged.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the slot location from `FASHIONPROMPT_KEY_FILE`, falling back
    /// to `$HOME/.fashionprompt/api_key`. Returns `None` when neither is
    /// available (no home directory in the environment).
    pub fn from_env() -> Option<Self> {
        if let Ok(path) = env::var(KEY_FILE_ENV) {
            return Some(Self::new(path));
        }
        env::var("HOME")
            .ok()
            .map(|home| Self::new(Path::new(&home).join(DEFAULT_KEY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the saved key, or `None` when the slot is empty or unreadable.
    pub fn load(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let key = contents.trim();
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }

    pub fn save(&self, key: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, key.trim())?;
        log::info!("Saved API key to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::new(dir.path().join("nested/api_key"));
        assert!(store.load().is_none());

        store.save("  my-key  ").unwrap();
        assert_eq!(store.load().as_deref(), Some("my-key"));
    }

    #[test]
    fn clear_empties_the_slot_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::new(dir.path().join("api_key"));
        store.save("my-key").unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn whitespace_only_slot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_key");
        fs::write(&path, "   \n").unwrap();
        assert!(KeyStore::new(path).load().is_none());
    }
}
