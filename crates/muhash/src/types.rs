//! Fixed-size byte containers: the finalized digest and the storage form.

use crate::error::{MuHashError, Result};
use num3072::ELEMENT_BYTE_SIZE;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size in bytes of a [`Hash`].
pub const HASH_SIZE: usize = 32;

/// Size in bytes of a [`SerializedMuHash`].
pub const SERIALIZED_MUHASH_SIZE: usize = ELEMENT_BYTE_SIZE;

/// Shared byte-array plumbing: hex text form, length-checked construction and
/// serde as a hex string.
macro_rules! impl_byte_array {
    ($name:ident, $size:expr, $kind:literal) => {
        impl $name {
            pub const fn from_bytes(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }

            pub const fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }

            /// Copies `bytes` in, or fails without touching `self` if the
            /// length is wrong.
            /// Copies a slice of exactly the right length.
            pub fn from_slice(bytes: &[u8]) -> Result<Self> {
                Self::try_from(bytes)
            }

            pub fn set_bytes(&mut self, bytes: &[u8]) -> Result<()> {
                if bytes.len() != $size {
                    return Err(MuHashError::InvalidLength {
                        kind: $kind,
                        expected: $size,
                        actual: bytes.len(),
                    });
                }
                self.0.copy_from_slice(bytes);
                Ok(())
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = MuHashError;

            fn try_from(bytes: &[u8]) -> Result<Self> {
                let mut out = Self([0u8; $size]);
                out.set_bytes(bytes)?;
                Ok(out)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = MuHashError;

            fn from_str(s: &str) -> Result<Self> {
                let bytes = hex::decode(s)?;
                Self::try_from(bytes.as_slice())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// The 32-byte BLAKE2b digest of a finalized multiset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl_byte_array!(Hash, HASH_SIZE, "hash");

/// The storage representation of a MuHash: its normalized numerator as 384
/// little-endian bytes. Unlike [`Hash`] it can be turned back into a MuHash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerializedMuHash([u8; SERIALIZED_MUHASH_SIZE]);

impl_byte_array!(SerializedMuHash, SERIALIZED_MUHASH_SIZE, "serialized muhash");

impl Default for SerializedMuHash {
    fn default() -> Self {
        Self([0u8; SERIALIZED_MUHASH_SIZE])
    }
}
