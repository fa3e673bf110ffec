//! Fixed-width arithmetic modulo the 3072-bit safe prime `p = 2^3072 - 1103717`.
//!
//! `p` sits `d = 1103717` below a power of two, so reduction folds the high
//! half of a product back in as `high * d` instead of dividing, and a value
//! in `[p, 2^3072)` is brought back into range by adding `d` with carry.
//!
//! Nothing here knows about multisets; see the `muhash` crate for that.

mod limb;
mod element;

pub use limb::{Limb, LIMB_BITS};
pub use element::Num3072;

/// Bit width of a field element.
pub const ELEMENT_BIT_SIZE: usize = 3072;

/// Byte width of a field element and of its serialized form.
pub const ELEMENT_BYTE_SIZE: usize = ELEMENT_BIT_SIZE / 8;

/// Number of limbs in a field element.
pub const LIMBS: usize = ELEMENT_BIT_SIZE / LIMB_BITS;

/// `2^3072 - p`.
pub const PRIME_DIFF: Limb = 1103717;
