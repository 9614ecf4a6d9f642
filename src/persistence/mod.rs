//! Key-value persistence for the best score and player settings
//!
//! Backends:
//! - `LocalStorage` in the browser
//! - `FileStore` (a JSON object on disk) for native runs
//! - `MemoryStore` for tests and throwaway sessions
//!
//! Storage failures never reach the simulation: callers log and carry on.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;
pub use memory::MemoryStore;

use thiserror::Error;

/// Key the best score is stored under
pub const BEST_SCORE_KEY: &str = "flappyBunnyBest";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("failed to read {key}: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store contents: {0}")]
    Format(#[from] serde_json::Error),
}

/// A flat string-to-string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Must be durable once this returns `Ok`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Parse a stored best score.
///
/// The whole string (ignoring surrounding whitespace) must be a non-negative
/// decimal integer. Unlike a browser `parseInt`, a trailing suffix is not
/// tolerated: `"7abc"` and `"3.5"` count as absent rather than 7 and 3.
pub fn parse_best_score(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Read the best score, defaulting to 0 when missing, unparsable, or unreadable
pub fn load_best_score<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
    match store.get(BEST_SCORE_KEY) {
        Ok(Some(raw)) => parse_best_score(&raw).unwrap_or_else(|| {
            log::warn!("Ignoring unparsable best score {:?}", raw);
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            log::warn!("Could not read best score: {}", e);
            0
        }
    }
}

/// Write the best score as a decimal string
pub fn save_best_score<S: KeyValueStore + ?Sized>(store: &mut S, best: u32) -> Result<(), StoreError> {
    store.set(BEST_SCORE_KEY, &best.to_string())
}
