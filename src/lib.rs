//! Rolling accumulator: MuHash set commitments plus checkpoint files.
//!
//! The arithmetic lives in the `num3072` crate and the multiset hash in the
//! `muhash` crate; both are re-exported here. This crate adds a JSON
//! checkpoint format so an accumulator can be stored and resumed later.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use muhash::{
    element_from_data, Hash, MuHash, MuHashError, SerializedMuHash, EMPTY_MUHASH_HASH,
    HASH_SIZE, SERIALIZED_MUHASH_SIZE,
};
pub use num3072::{Num3072, ELEMENT_BYTE_SIZE, PRIME_DIFF};

/// A resumable snapshot of an accumulator.
///
/// Only the serialized (normalized) form is stored; the counters are
/// bookkeeping for the caller and take no part in the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub muhash: SerializedMuHash,
    pub elements_added: u64,
    pub elements_removed: u64,
}

impl Checkpoint {
    pub fn capture(muhash: &MuHash, elements_added: u64, elements_removed: u64) -> Self {
        Self {
            muhash: muhash.serialize(),
            elements_added,
            elements_removed,
        }
    }

    /// Rebuilds the accumulator this checkpoint was taken from.
    pub fn restore(&self) -> Result<MuHash> {
        MuHash::deserialize(&self.muhash).context("checkpoint holds an invalid muhash")
    }

    /// The digest of the checkpointed multiset.
    pub fn finalize(&self) -> Result<Hash> {
        Ok(self.restore()?.finalize())
    }
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self::capture(&MuHash::new(), 0, 0)
    }
}

/// Load a checkpoint from a JSON file
pub fn load_checkpoint(path: impl AsRef<Path>) -> Result<Checkpoint> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading checkpoint {}", path.display()))?;
    let checkpoint: Checkpoint = serde_json::from_str(&content)
        .with_context(|| format!("parsing checkpoint {}", path.display()))?;
    log::debug!(
        "loaded checkpoint {} (+{} / -{})",
        path.display(),
        checkpoint.elements_added,
        checkpoint.elements_removed
    );
    Ok(checkpoint)
}

/// Save a checkpoint to a JSON file
pub fn save_checkpoint(checkpoint: &Checkpoint, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(checkpoint)?;
    std::fs::write(path, content)
        .with_context(|| format!("writing checkpoint {}", path.display()))?;
    log::debug!("saved checkpoint {}", path.display());
    Ok(())
}
