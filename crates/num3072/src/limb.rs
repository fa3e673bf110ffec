//! Machine-word primitives for the 3072-bit multiply and square.
//!
//! Products are accumulated into a three-limb window `[c0, c1, c2]` that is
//! shifted down by one limb every time a result limb is extracted. All
//! arithmetic wraps like unsigned C arithmetic; callers keep the window from
//! overflowing by construction.

/// A single 64-bit limb.
pub type Limb = u64;

/// Double-width limb used for a single limb product.
pub(crate) type DoubleLimb = u128;

/// Number of bits in a [`Limb`].
pub const LIMB_BITS: usize = Limb::BITS as usize;

/// Three-limb little-endian accumulator `[c0, c1, c2]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Carry3 {
    pub(crate) c0: Limb,
    pub(crate) c1: Limb,
    pub(crate) c2: Limb,
}

impl Carry3 {
    /// `[c0, c1, 0] = a * b`
    #[inline(always)]
    pub(crate) fn from_mul(a: Limb, b: Limb) -> Self {
        let t = a as DoubleLimb * b as DoubleLimb;
        Self {
            c0: t as Limb,
            c1: (t >> LIMB_BITS) as Limb,
            c2: 0,
        }
    }

    /// Extracts the lowest limb and shifts the window down by one limb.
    #[inline(always)]
    pub(crate) fn extract(&mut self) -> Limb {
        let n = self.c0;
        self.c0 = self.c1;
        self.c1 = self.c2;
        self.c2 = 0;
        n
    }

    /// `[c0, c1, c2] += a * b`
    #[inline(always)]
    pub(crate) fn mul_add(&mut self, a: Limb, b: Limb) {
        let t = a as DoubleLimb * b as DoubleLimb;
        let mut th = (t >> LIMB_BITS) as Limb;
        let tl = t as Limb;

        self.c0 = self.c0.wrapping_add(tl);
        th += (self.c0 < tl) as Limb;
        self.c1 = self.c1.wrapping_add(th);
        self.c2 = self.c2.wrapping_add((self.c1 < th) as Limb);
    }

    /// `[c0, c1, c2] += 2 * a * b`
    #[inline(always)]
    pub(crate) fn mul_dbl_add(&mut self, a: Limb, b: Limb) {
        let t = a as DoubleLimb * b as DoubleLimb;
        let th = (t >> LIMB_BITS) as Limb;
        let tl = t as Limb;

        for _ in 0..2 {
            self.c0 = self.c0.wrapping_add(tl);
            let tt = th + (self.c0 < tl) as Limb;
            self.c1 = self.c1.wrapping_add(tt);
            self.c2 = self.c2.wrapping_add((self.c1 < tt) as Limb);
        }
    }

    /// `[c0, c1, c2] += n * d`, where `c2` is overwritten (it must be zero on entry).
    #[inline(always)]
    pub(crate) fn mul_n_add(&mut self, d: &Carry3, n: Limb) {
        let mut t = d.c0 as DoubleLimb * n as DoubleLimb + self.c0 as DoubleLimb;
        self.c0 = t as Limb;
        t >>= LIMB_BITS;

        t += d.c1 as DoubleLimb * n as DoubleLimb + self.c1 as DoubleLimb;
        self.c1 = t as Limb;
        t >>= LIMB_BITS;

        self.c2 = (t as Limb).wrapping_add(d.c2.wrapping_mul(n));
    }

    /// `[c0, c1] *= n`, the top limb of the product is discarded.
    #[inline(always)]
    pub(crate) fn mul_n2(&mut self, n: Limb) {
        let mut t = self.c0 as DoubleLimb * n as DoubleLimb;
        self.c0 = t as Limb;
        t >>= LIMB_BITS;
        t += self.c1 as DoubleLimb * n as DoubleLimb;
        self.c1 = t as Limb;
    }

    /// `[c0, c1] += a`, then extracts the lowest limb. A carry out of `c1`
    /// becomes the new `c1`.
    #[inline(always)]
    pub(crate) fn add_extract2(&mut self, a: Limb) -> Limb {
        let mut carry = 0;

        self.c0 = self.c0.wrapping_add(a);
        if self.c0 < a {
            self.c1 = self.c1.wrapping_add(1);
            if self.c1 == 0 {
                carry = 1;
            }
        }

        let n = self.c0;
        self.c0 = self.c1;
        self.c1 = carry;
        n
    }
}
