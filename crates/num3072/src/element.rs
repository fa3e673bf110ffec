//! Field elements modulo `p = 2^3072 - 1103717`.

use crate::limb::{Carry3, Limb};
use crate::{ELEMENT_BYTE_SIZE, LIMBS, PRIME_DIFF};
use std::fmt;
use std::ops::{Mul, MulAssign};

/// An integer modulo `p = 2^3072 - 1103717`, stored as 48 little-endian limbs.
///
/// Values are kept lazily reduced: the limbs may hold anything in
/// `[0, 2^3072)`, including the `d = 1103717` patterns in `[p, 2^3072)`.
/// Use [`Num3072::is_overflow`] and [`Num3072::full_reduce`] (or
/// [`Num3072::reduced`]) before comparing or serializing.
#[derive(Clone, PartialEq, Eq)]
pub struct Num3072 {
    limbs: [Limb; LIMBS],
}

impl Num3072 {
    /// The additive identity.
    pub const ZERO: Self = Self { limbs: [0; LIMBS] };

    /// The multiplicative identity.
    pub const ONE: Self = {
        let mut limbs = [0; LIMBS];
        limbs[0] = 1;
        Self { limbs }
    };

    /// The modulus itself. As a field element this is an overflowed zero.
    pub const PRIME: Self = {
        let mut limbs = [Limb::MAX; LIMBS];
        limbs[0] = Limb::MAX - PRIME_DIFF + 1;
        Self { limbs }
    };

    pub const fn from_limbs(limbs: [Limb; LIMBS]) -> Self {
        Self { limbs }
    }

    pub const fn limbs(&self) -> &[Limb; LIMBS] {
        &self.limbs
    }

    /// Parses 384 little-endian bytes. The value is neither reduced nor validated.
    pub fn from_le_bytes(bytes: &[u8; ELEMENT_BYTE_SIZE]) -> Self {
        let mut limbs = [0; LIMBS];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = Limb::from_le_bytes(word);
        }
        Self { limbs }
    }

    /// Writes the limbs out as 384 little-endian bytes, as stored.
    pub fn to_le_bytes(&self) -> [u8; ELEMENT_BYTE_SIZE] {
        let mut out = [0u8; ELEMENT_BYTE_SIZE];
        for (chunk, limb) in out.chunks_exact_mut(8).zip(self.limbs.iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        out
    }

    pub fn set_to_one(&mut self) {
        *self = Self::ONE;
    }

    pub fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    /// Whether the stored value is `>= p`.
    ///
    /// Since `p` is within `d` of `2^3072`, that only happens when every limb
    /// but the lowest is all ones and the lowest limb is above `MAX - d`.
    pub fn is_overflow(&self) -> bool {
        if self.limbs[0] <= Limb::MAX - PRIME_DIFF {
            return false;
        }
        self.limbs[1..].iter().all(|&l| l == Limb::MAX)
    }

    /// Adds `d` with full carry propagation, which is `x - p` modulo `2^3072`.
    ///
    /// Only meaningful on an overflowed value; otherwise it adds `d` to the
    /// represented value.
    pub fn full_reduce(&mut self) {
        let mut window = Carry3 {
            c0: PRIME_DIFF,
            ..Default::default()
        };
        for limb in self.limbs.iter_mut() {
            *limb = window.add_extract2(*limb);
        }
    }

    /// Reduces in place if the value is overflowed.
    #[inline]
    pub fn reduce(&mut self) {
        if self.is_overflow() {
            self.full_reduce();
        }
    }

    /// Returns the canonical representative in `[0, p)`.
    pub fn reduced(&self) -> Self {
        let mut out = self.clone();
        out.reduce();
        out
    }

    /// Equality of the represented residues rather than the raw limbs.
    pub fn canonical_eq(&self, other: &Self) -> bool {
        self.reduced() == other.reduced()
    }

    /// `self = self * rhs mod p`, lazily reduced.
    ///
    /// The high half of the double-width product is folded into the low half
    /// twice using `2^3072 = d mod p`: once while limbs `0..N-2` are
    /// accumulated, once for the two carry limbs left over at the end.
    pub(crate) fn mul_in_place(&mut self, rhs: &Self) {
        let a = &self.limbs;
        let b = &rhs.limbs;
        let mut tmp = [0 as Limb; LIMBS];
        let mut carry = Carry3::default();

        for j in 0..LIMBS - 1 {
            let mut high = Carry3::from_mul(a[1 + j], b[LIMBS - 1]);
            for i in 2 + j..LIMBS {
                high.mul_add(a[i], b[LIMBS + j - i]);
            }
            carry.mul_n_add(&high, PRIME_DIFF);
            for i in 0..=j {
                carry.mul_add(a[i], b[j - i]);
            }
            tmp[j] = carry.extract();
        }

        debug_assert_eq!(carry.c2, 0);
        for i in 0..LIMBS {
            carry.mul_add(a[i], b[LIMBS - 1 - i]);
        }
        tmp[LIMBS - 1] = carry.extract();

        self.fold_carry(carry, &tmp);
    }

    /// `self = self^2 mod p`, lazily reduced. Bit-identical to multiplying by
    /// itself, with each symmetric cross product computed once and doubled.
    pub fn square(&mut self) {
        let a = &self.limbs;
        let mut tmp = [0 as Limb; LIMBS];
        let mut carry = Carry3::default();

        for j in 0..LIMBS - 1 {
            let mut high = Carry3::default();
            for i in 0..(LIMBS - 1 - j) / 2 {
                high.mul_dbl_add(a[i + j + 1], a[LIMBS - 1 - i]);
            }
            if (j + 1) & 1 == 1 {
                let mid = (LIMBS - 1 - j) / 2;
                high.mul_add(a[mid + j + 1], a[LIMBS - 1 - mid]);
            }
            carry.mul_n_add(&high, PRIME_DIFF);

            for i in 0..(j + 1) / 2 {
                carry.mul_dbl_add(a[i], a[j - i]);
            }
            if (j + 1) & 1 == 1 {
                let mid = (j + 1) / 2;
                carry.mul_add(a[mid], a[j - mid]);
            }
            tmp[j] = carry.extract();
        }

        debug_assert_eq!(carry.c2, 0);
        for i in 0..LIMBS / 2 {
            carry.mul_dbl_add(a[i], a[LIMBS - 1 - i]);
        }
        tmp[LIMBS - 1] = carry.extract();

        self.fold_carry(carry, &tmp);
    }

    /// Second reduction: `self = tmp + [c0, c1] * d`, then at most two more
    /// `full_reduce` passes to bring the result back under `2^3072`.
    #[inline(always)]
    fn fold_carry(&mut self, mut carry: Carry3, tmp: &[Limb; LIMBS]) {
        carry.mul_n2(PRIME_DIFF);
        for (limb, &t) in self.limbs.iter_mut().zip(tmp.iter()) {
            *limb = carry.add_extract2(t);
        }

        debug_assert_eq!(carry.c1, 0);
        debug_assert!(carry.c0 == 0 || carry.c0 == 1);

        if self.is_overflow() {
            self.full_reduce();
        }
        if carry.c0 > 0 {
            self.full_reduce();
        }
    }

    fn square_n_mul(&mut self, squarings: usize, rhs: &Self) {
        for _ in 0..squarings {
            self.square();
        }
        self.mul_in_place(rhs);
    }

    /// Returns `self^(p-2) mod p`, the multiplicative inverse.
    ///
    /// Uses a sliding window over repunit powers (Brumley and Järvinen, "Fast
    /// Point Decompression for Standard Elliptic Curves", 2008), so the
    /// sequence of squarings and multiplications is fixed.
    ///
    /// Zero has no inverse; by this exponentiation it maps to zero, so
    /// dividing by zero yields zero rather than an error.
    pub fn inverse(&self) -> Self {
        let base = self.reduced();

        // powers[i] = base^(2^(2^i) - 1)
        let mut powers: [Num3072; 12] = std::array::from_fn(|_| Num3072::ZERO);
        powers[0] = base;
        for i in 0..11 {
            let mut next = powers[i].clone();
            for _ in 0..(1 << i) {
                next.square();
            }
            next.mul_in_place(&powers[i]);
            powers[i + 1] = next;
        }

        let mut out = powers[11].clone();
        for &(squarings, power) in INVERSE_TAIL.iter() {
            out.square_n_mul(squarings, &powers[power]);
        }
        out.reduce();
        out
    }

    /// `self = self / rhs mod p`, fully reduced.
    pub fn divide(&mut self, rhs: &Self) {
        self.reduce();
        let inv = rhs.inverse();
        self.mul_in_place(&inv);
        self.reduce();
    }
}

/// `(squarings, power index)` steps that finish the exponent `p - 2` after
/// `powers[11] = x^(2^2048 - 1)`.
const INVERSE_TAIL: [(usize, usize); 14] = [
    (512, 9),
    (256, 8),
    (128, 7),
    (64, 6),
    (32, 5),
    (8, 3),
    (2, 1),
    (1, 0),
    (5, 2),
    (3, 0),
    (2, 0),
    (4, 0),
    (4, 1),
    (3, 0),
];

impl fmt::Debug for Num3072 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Num3072({})", hex::encode(self.to_le_bytes()))
    }
}

impl MulAssign<&Num3072> for Num3072 {
    fn mul_assign(&mut self, rhs: &Num3072) {
        self.mul_in_place(rhs);
    }
}

impl MulAssign for Num3072 {
    fn mul_assign(&mut self, rhs: Num3072) {
        self.mul_in_place(&rhs);
    }
}

impl Mul<&Num3072> for &Num3072 {
    type Output = Num3072;

    fn mul(self, rhs: &Num3072) -> Num3072 {
        let mut out = self.clone();
        out.mul_in_place(rhs);
        out
    }
}

impl Mul for Num3072 {
    type Output = Num3072;

    fn mul(mut self, rhs: Num3072) -> Num3072 {
        self.mul_in_place(&rhs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_element(rng: &mut StdRng) -> Num3072 {
        let mut limbs = [0; LIMBS];
        rng.fill(&mut limbs[..]);
        Num3072::from_limbs(limbs)
    }

    fn from_word(w: Limb) -> Num3072 {
        let mut limbs = [0; LIMBS];
        limbs[0] = w;
        Num3072::from_limbs(limbs)
    }

    fn max() -> Num3072 {
        Num3072::from_limbs([Limb::MAX; LIMBS])
    }

    #[test]
    fn test_is_overflow() {
        assert!(!Num3072::ZERO.is_overflow());
        assert!(!from_word(Limb::MAX).is_overflow());
        assert!(max().is_overflow());
        assert!(Num3072::PRIME.is_overflow());

        let mut below_prime = Num3072::PRIME;
        below_prime.limbs[0] -= 1;
        assert!(!below_prime.is_overflow());
    }

    #[test]
    fn test_full_reduce_prime_is_zero() {
        let mut p = Num3072::PRIME;
        p.full_reduce();
        assert!(p.is_zero());

        let mut m = max();
        m.full_reduce();
        assert_eq!(m, from_word(PRIME_DIFF - 1));
    }

    #[test]
    fn test_mul_max() {
        let mut p_minus_one = Num3072::PRIME;
        p_minus_one.limbs[0] -= 1;
        let copy = p_minus_one.clone();
        p_minus_one *= &copy;
        assert!(p_minus_one.is_one(), "(p-1)*(p-1) mod p should equal 1");
    }

    #[test]
    fn test_square_matches_mul() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let x = random_element(&mut rng);
            let mut squared = x.clone();
            squared.square();
            assert_eq!(squared, &x * &x);
        }
        let mut m = max();
        m.square();
        assert_eq!(m, &max() * &max());
    }

    #[test]
    fn test_double_inverse() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..5 {
            let element = random_element(&mut rng);
            let again = element.inverse().inverse();
            assert_eq!(again, element, "double inverse should round trip");
        }
    }

    #[test]
    fn test_double_inverse_edge_case() {
        let orig = Num3072::from_limbs([
            7122228832992001076, 984226626229791276, 7630161757215403889,
            6284986028532537849, 8045609952094061025, 11960578682873843289,
            13746438324198032094, 13918942278011779234, 17733507388171786846,
            10563242470999117317, 17037155475664456442, 17937456968131788544,
            12599342294785769540, 13386260146859547870, 2817582499516127913,
            652557987984108933, 9669847560665129471, 17711760030167214508,
            5376140856964249866, 18051557786492143716, 2482926987284881227,
            8605482545261324676, 7878786448874819977, 1266815984192471985,
            2678516262590404672, 14004775981272003760, 10357003870690124643,
            2730710396948079405, 4635754375072562978, 13656184258619915136,
            803512205739688286, 11844116904145642840, 5760653310472302601,
            15069027324939031326, 14913021043324743434, 17567013163360751106,
            6302557725767759643, 17458497366820989801, 3410551217786514778,
            14182717432968305815, 12471950523812677269, 2294197765573979691,
            3220941588656114052, 605606616684921311, 1440136155000853957,
            16361481774333736133, 11385241783616172231, 13968855456762740410,
        ]);
        assert_eq!(orig.inverse().inverse(), orig);
    }

    #[test]
    fn test_mul_div_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        let list: Vec<Num3072> = (0..1024).map(|_| random_element(&mut rng)).collect();

        let mut start = Num3072::ONE;
        for element in &list {
            start *= element;
        }
        assert!(!start.is_one());

        // Divide the elements back out as a product of quotients, so the
        // inverse count stays small in unoptimized builds.
        for chunk in list.chunks(128) {
            let mut product = Num3072::ONE;
            for element in chunk.iter().rev() {
                product *= element;
            }
            start.divide(&product);
        }
        assert!(start.is_one());

        for element in list.iter().take(16) {
            let mut x = element.clone();
            x *= &list[1023];
            x.divide(&list[1023]);
            assert_eq!(x, element.reduced());
        }
    }

    #[test]
    fn test_all_overflowed_values_reduce() {
        let mut overflown = max();
        for k in 0..PRIME_DIFF {
            overflown.limbs[0] = Limb::MAX - PRIME_DIFF + 1 + k;
            assert!(overflown.is_overflow(), "p + {} must be overflowed", k);
            let reduced = overflown.reduced();
            assert_eq!(reduced.limbs[0], k, "p + {}", k);
            assert!(reduced.limbs[1..].iter().all(|&limb| limb == 0), "p + {}", k);
        }
    }

    #[test]
    fn test_mul_operators_agree() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = random_element(&mut rng);
        let b = random_element(&mut rng);

        let by_ref = &a * &b;
        let by_value = a.clone() * b.clone();
        let mut assigned = a.clone();
        assigned *= &b;
        let mut assigned_value = a.clone();
        assigned_value *= b.clone();

        assert_eq!(by_ref, by_value);
        assert_eq!(by_ref, assigned);
        assert_eq!(by_ref, assigned_value);
        assert_eq!(by_ref.reduced(), (&b * &a).reduced());
    }

    #[test]
    fn test_divide_reduces_overflowed_values() {
        // p + k for a spread of k in [0, d), including the edges.
        let ks = (0..PRIME_DIFF).step_by(50_000).chain([1, PRIME_DIFF - 1]);
        for k in ks {
            let mut overflown = max();
            overflown.limbs[0] = Limb::MAX - PRIME_DIFF + 1 + k;
            assert!(overflown.is_overflow());

            let mut by_one = overflown.clone();
            by_one.divide(&Num3072::ONE);
            assert_eq!(by_one, from_word(k));

            if k != 0 {
                let mut by_self = overflown.clone();
                by_self.divide(&overflown);
                assert!(by_self.is_one());
            }
        }
    }

    #[test]
    fn test_inverse_of_zero_is_zero() {
        assert!(Num3072::ZERO.inverse().is_zero());
        assert!(Num3072::PRIME.inverse().is_zero());

        let mut x = from_word(42);
        x.divide(&Num3072::ZERO);
        assert!(x.is_zero());
    }

    #[test]
    fn test_multiply_by_zero_annihilates() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut x = random_element(&mut rng);
        x *= &Num3072::ZERO;
        assert!(x.reduced().is_zero());
    }

    #[test]
    fn test_byte_conversion() {
        let mut rng = StdRng::seed_from_u64(5);
        let x = random_element(&mut rng);
        let bytes = x.to_le_bytes();
        assert_eq!(&bytes[..8], &x.limbs[0].to_le_bytes());
        assert_eq!(Num3072::from_le_bytes(&bytes), x);
    }

    #[test]
    fn test_canonical_eq() {
        assert!(Num3072::PRIME.canonical_eq(&Num3072::ZERO));
        assert_ne!(Num3072::PRIME, Num3072::ZERO);
        assert!(!Num3072::ONE.canonical_eq(&Num3072::ZERO));
    }
}
