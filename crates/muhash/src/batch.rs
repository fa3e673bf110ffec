//! Building MuHashes from many elements, optionally across threads.
//!
//! `combine` is commutative and associative, so each worker can hash its own
//! share into a private accumulator and the partial results can be combined
//! in any order.

use crate::muhash::MuHash;
use rayon::prelude::*;

impl MuHash {
    /// Combines all of `parts` into a single MuHash.
    pub fn combine_all<'a, I>(parts: I) -> MuHash
    where
        I: IntoIterator<Item = &'a MuHash>,
    {
        parts.into_iter().fold(MuHash::new(), |mut acc, part| {
            acc.combine(part);
            acc
        })
    }

    /// Hashes every element of `elements` in parallel and returns their multiset.
    pub fn par_from_elements<T>(elements: &[T]) -> MuHash
    where
        T: AsRef<[u8]> + Sync,
    {
        Self::par_from_changes(elements, &[])
    }

    /// Applies a batch of additions and removals in parallel, as one
    /// state transition would. The result is a delta that can be combined
    /// into a running MuHash.
    pub fn par_from_changes<T>(added: &[T], removed: &[T]) -> MuHash
    where
        T: AsRef<[u8]> + Sync,
    {
        debug!(
            "building muhash in parallel: {} added, {} removed, {} threads",
            added.len(),
            removed.len(),
            rayon::current_num_threads()
        );

        let (additions, removals) = rayon::join(
            || {
                added
                    .par_iter()
                    .fold(MuHash::new, |mut acc, data| {
                        acc.add(data.as_ref());
                        acc
                    })
                    .reduce(MuHash::new, merge)
            },
            || {
                removed
                    .par_iter()
                    .fold(MuHash::new, |mut acc, data| {
                        acc.remove(data.as_ref());
                        acc
                    })
                    .reduce(MuHash::new, merge)
            },
        );

        merge(additions, removals)
    }
}

fn merge(mut left: MuHash, right: MuHash) -> MuHash {
    left.combine(&right);
    left
}
