//! The rolling multiset hash.

use crate::element::{element_from_data, keyed_blake2b, FINALIZE_KEY};
use crate::error::{MuHashError, Result};
use crate::types::{Hash, SerializedMuHash};
use num3072::Num3072;
use std::fmt;

/// `MuHash::new().finalize()`.
pub const EMPTY_MUHASH_HASH: Hash = Hash::from_bytes([
    0x54, 0x4e, 0xb3, 0x14, 0x2c, 0x00, 0x0f, 0x0a, 0xd2, 0xc7, 0x6a, 0xc4, 0x1f, 0x42, 0x22, 0xab,
    0xba, 0xba, 0xbe, 0xd8, 0x30, 0xee, 0xaf, 0xee, 0x4b, 0x6d, 0xc5, 0x6b, 0x52, 0xd5, 0xca, 0xc0,
]);

/// A multiplicative multiset hash.
///
/// Elements can be added and removed in any order and the finalized hash only
/// depends on the resulting multiset. The value is `numerator / denominator`
/// in the field; removals are collected in the denominator so that no
/// inversion is needed until the hash is serialized or finalized.
///
/// Use [`MuHash::serialize`] to store a MuHash and continue it later;
/// [`MuHash::finalize`] is one-way.
#[derive(Clone, Debug)]
pub struct MuHash {
    numerator: Num3072,
    denominator: Num3072,
}

impl MuHash {
    /// Creates the empty multiset.
    pub fn new() -> Self {
        Self {
            numerator: Num3072::ONE,
            denominator: Num3072::ONE,
        }
    }

    /// Builds the multiset of `elements`, one `add` at a time.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        elements.into_iter().collect()
    }

    /// Clears all data. Equivalent to creating a new empty set.
    pub fn reset(&mut self) {
        self.numerator.set_to_one();
        self.denominator.set_to_one();
    }

    /// Hashes `data` and adds it to the multiset.
    pub fn add(&mut self, data: &[u8]) {
        let element = element_from_data(data);
        self.add_element(&element);
    }

    /// Adds an already encoded element.
    pub fn add_element(&mut self, element: &Num3072) {
        self.numerator *= element;
    }

    /// Hashes `data` and removes it from the multiset.
    ///
    /// Removing something that was never added is allowed; the multiset then
    /// holds a negative count for it until it is added.
    pub fn remove(&mut self, data: &[u8]) {
        let element = element_from_data(data);
        self.remove_element(&element);
    }

    /// Removes an already encoded element.
    pub fn remove_element(&mut self, element: &Num3072) {
        self.denominator *= element;
    }

    /// Adds every element of `other` and removes every element `other` removed.
    pub fn combine(&mut self, other: &MuHash) {
        self.numerator *= &other.numerator;
        self.denominator *= &other.denominator;
    }

    /// Collapses the denominator into the numerator.
    pub fn normalize(&mut self) {
        if self.denominator.is_one() {
            self.numerator.reduce();
            return;
        }
        self.numerator.divide(&self.denominator);
        self.denominator.set_to_one();
    }

    pub fn numerator(&self) -> &Num3072 {
        &self.numerator
    }

    pub fn denominator(&self) -> &Num3072 {
        &self.denominator
    }

    /// The storage representation. `self` is left untouched.
    pub fn serialize(&self) -> SerializedMuHash {
        let mut normalized = self.clone();
        normalized.normalize();
        SerializedMuHash::from_bytes(normalized.numerator.reduced().to_le_bytes())
    }

    /// Parses what [`MuHash::serialize`] produced.
    ///
    /// Fails with [`MuHashError::Overflow`] if the value is not below the
    /// field prime.
    pub fn deserialize(serialized: &SerializedMuHash) -> Result<Self> {
        let numerator = Num3072::from_le_bytes(serialized.as_bytes());
        if numerator.is_overflow() {
            debug!("rejecting serialized muhash: value is not below the field prime");
            return Err(MuHashError::Overflow);
        }
        Ok(Self {
            numerator,
            denominator: Num3072::ONE,
        })
    }

    /// A BLAKE2b hash of the serialized multiset.
    pub fn finalize(&self) -> Hash {
        let serialized = self.serialize();
        keyed_blake2b(FINALIZE_KEY, serialized.as_bytes())
    }
}

impl Default for MuHash {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MuHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.serialize(), f)
    }
}

impl<T: AsRef<[u8]>> Extend<T> for MuHash {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.add(data.as_ref());
        }
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for MuHash {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut muhash = MuHash::new();
        muhash.extend(iter);
        muhash
    }
}
