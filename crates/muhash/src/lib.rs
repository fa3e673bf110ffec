//! MuHash: a rolling multiset hash.
//!
//! A [`MuHash`] commits to a multiset of byte strings. Elements can be added
//! and removed one at a time and two MuHashes can be combined, all in constant
//! time per operation, and the result only depends on the multiset and not on
//! the order of operations. Elements are mapped into the multiplicative group
//! modulo the 3072-bit safe prime `2^3072 - 1103717` (see the `num3072` crate)
//! and multiplied together.
//!
//! ```
//! use muhash::{MuHash, EMPTY_MUHASH_HASH};
//!
//! let mut set = MuHash::new();
//! set.add(b"a");
//! set.add(b"b");
//! set.remove(b"a");
//! set.remove(b"b");
//! assert_eq!(set.finalize(), EMPTY_MUHASH_HASH);
//! ```

#[macro_use]
extern crate log;

pub mod error;
pub mod types;

mod batch;
mod element;
mod muhash;

pub use element::element_from_data;
pub use error::{MuHashError, Result};
pub use muhash::{MuHash, EMPTY_MUHASH_HASH};
pub use types::{Hash, SerializedMuHash, HASH_SIZE, SERIALIZED_MUHASH_SIZE};

pub use num3072::Num3072;
