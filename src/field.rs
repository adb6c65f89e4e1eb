// -*- mode: rust; -*-
//
// This file is part of curve4q-dalek.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Field arithmetic modulo \\(p = 2\^{127} - 1\\), using \\(64\\)-bit
//! limbs with \\(128\\)-bit products.
//!
//! Because \\(p\\) is a Mersenne prime, reduction is cheap: bits at
//! position \\(127\\) and above fold back onto the low bits using
//! \\(2\^{127} \equiv 1 \pmod p\\), and the high half of a \\(256\\)-bit
//! product folds with \\(2\^{128} \equiv 2 \pmod p\\).
//!
//! Elements are kept fully reduced: every public operation returns the
//! canonical representative in \\([0, p)\\).

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A `FieldElement127` represents an element of the field
/// \\(\mathbb Z / (2\^{127} - 1)\\), as two `u64` limbs in little-endian
/// order.  The value is always fully reduced.
#[derive(Copy, Clone)]
pub struct FieldElement127(pub(crate) [u64; 2]);

/// The low limb of \\(p\\).
const P0: u64 = 0xffff_ffff_ffff_ffff;
/// The high limb of \\(p\\).
const P1: u64 = 0x7fff_ffff_ffff_ffff;

impl Debug for FieldElement127 {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "FieldElement127({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement127 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl FieldElement127 {
    /// The additive identity.
    pub const ZERO: FieldElement127 = FieldElement127([0, 0]);
    /// The multiplicative identity.
    pub const ONE: FieldElement127 = FieldElement127([1, 0]);
    /// The canonical representative of \\(-1\\), i.e. \\(p - 1\\).
    pub const MINUS_ONE: FieldElement127 = FieldElement127([P0 - 1, P1]);
    /// The canonical representative of \\(2\^{-1} = 2\^{126}\\).
    pub(crate) const ONE_HALF: FieldElement127 = FieldElement127([0, 1 << 62]);

    /// Fully reduce a \\(128\\)-bit value to the canonical representative
    /// in \\([0, p)\\).
    ///
    /// Bit \\(127\\) folds down with \\(2\^{127} \equiv 1\\); the result
    /// is then at most \\(2\^{127}\\), and a final borrow-free
    /// conditional subtraction of \\(p\\) (which also maps \\(p \mapsto
    /// 0\\)) produces the canonical form.
    #[inline]
    pub(crate) fn reduce(limbs: [u64; 2]) -> FieldElement127 {
        let top = limbs[1] >> 63;
        let (x0, carry) = limbs[0].overflowing_add(top);
        let x1 = (limbs[1] & P1) + carry as u64;

        // x <= 2^127 here.  x >= p exactly when x + 1 carries into bit
        // 127, and in that case x - p = x + 1 - 2^127.
        let (t0, carry) = x0.overflowing_add(1);
        let t1 = x1 + carry as u64;
        let ge_p = Choice::from((t1 >> 63) as u8);

        FieldElement127([
            u64::conditional_select(&x0, &t0, ge_p),
            u64::conditional_select(&x1, &(t1 & P1), ge_p),
        ])
    }

    /// Reduce a \\(128\\)-bit intermediate held in a `u128`.
    #[inline(always)]
    fn reduce_u128(x: u128) -> FieldElement127 {
        FieldElement127::reduce([x as u64, (x >> 64) as u64])
    }

    /// Load a field element from 16 bytes in little-endian order.
    ///
    /// Bit \\(127\\) is ignored, and non-canonical encodings of small
    /// values (e.g. \\(p\\) itself) are mapped onto their canonical
    /// representatives.
    pub(crate) fn from_bytes(bytes: &[u8; 16]) -> FieldElement127 {
        let lo = u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]);
        let hi = u64::from_le_bytes([
            bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
        ]);
        FieldElement127::reduce([lo, hi & P1])
    }

    /// Serialize to 16 bytes in little-endian order.  The encoding is
    /// canonical.
    pub(crate) fn to_bytes(self) -> [u8; 16] {
        let mut s = [0u8; 16];
        s[..8].copy_from_slice(&self.0[0].to_le_bytes());
        s[8..].copy_from_slice(&self.0[1].to_le_bytes());
        s
    }

    /// Determine whether this field element is zero.
    pub(crate) fn is_zero(&self) -> Choice {
        self.ct_eq(&FieldElement127::ZERO)
    }

    /// Bit \\(126\\) of the canonical representative, used as the
    /// "sign" of an \\(x\\)-coordinate component in point compression.
    pub(crate) fn sign_bit(&self) -> Choice {
        Choice::from(((self.0[1] >> 62) & 1) as u8)
    }

    /// Compute `self^(2^k)` by `k` repeated squarings.
    ///
    /// # Panics
    ///
    /// Panics if `k == 0` in debug builds.
    pub(crate) fn pow2k(&self, k: u32) -> FieldElement127 {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Returns the square of this field element.
    pub(crate) fn square(&self) -> FieldElement127 {
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let x0 = self.0[0];
        let x1 = self.0[1];

        let lo = m(x0, x0);
        let mid = 2 * m(x0, x1);
        let hi = m(x1, x1);

        FieldElement127::fold256(lo, mid, hi)
    }

    /// Fold the 256-bit value `lo + mid*2^64 + hi*2^128` into the field.
    ///
    /// Requires `hi < 2^126` and `mid` free of u128 overflow, which holds
    /// for products of reduced (127-bit) inputs.
    #[inline(always)]
    fn fold256(lo: u128, mid: u128, hi: u128) -> FieldElement127 {
        let carry = ((lo >> 64) + (mid & 0xffff_ffff_ffff_ffff)) >> 64;
        let low128 = lo.wrapping_add(mid << 64);
        let high128 = hi + (mid >> 64) + carry;

        // 2^128 ≡ 2 (mod p)
        let low = FieldElement127::reduce_u128(low128);
        let high = FieldElement127::reduce_u128(high128 << 1);
        &low + &high
    }

    /// Given a nonzero field element, compute its inverse
    /// \\(x\^{p-2} = x\^{2\^{127} - 3}\\).
    ///
    /// This function returns zero on input zero.
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn invert(&self) -> FieldElement127 {
        // Each temporary t_i below is self raised to the annotated
        // exponent; squaring k times shifts the exponent left by k.
        //
        //                                          exponent
        let t2  = &self.square()    * self;      // 2^2   - 1
        let t3  = &t2.pow2k(2)      * &t2;       // 2^4   - 1
        let t4  = &t3.pow2k(4)      * &t3;       // 2^8   - 1
        let t5  = &t4.pow2k(8)      * &t4;       // 2^16  - 1
        let t6  = &t5.pow2k(16)     * &t5;       // 2^32  - 1
        let t7  = &t6.pow2k(32)     * &t6;       // 2^64  - 1
        let t8  = &t7.pow2k(32)     * &t6;       // 2^96  - 1
        let t9  = &t8.pow2k(16)     * &t5;       // 2^112 - 1
        let t10 = &t9.pow2k(8)      * &t4;       // 2^120 - 1
        let t11 = &t10.pow2k(4)     * &t3;       // 2^124 - 1
        let t12 = &t11.pow2k(1)     * self;      // 2^125 - 1
        &t12.pow2k(2)               * self       // 2^127 - 3
    }

    /// Compute \\(x\^{(p-3)/4} = x\^{2\^{125} - 1}\\).
    ///
    /// For nonzero \\(x\\) the result \\(t\\) satisfies \\(x t\^2 \in
    /// \\{1, -1\\}\\): it is an inverse square root of \\(x\\) when
    /// \\(x\\) is a quadratic residue.  The caller is responsible for
    /// checking which case holds.
    pub(crate) fn invsqrt(&self) -> FieldElement127 {
        // Build x^(2^5 - 1), then accumulate 24 windows of five
        // squarings each: 31 * (1 + 2^5 + ... + 2^120) = 2^125 - 1.
        let mut t = self.square();
        t = t.square();
        t = &t * self; // 2^.. = x^5
        t = &(&t * &t) * &t; // x^15
        t = &(&t * &t) * self; // x^31

        let mut acc = t;
        for _ in 0..24 {
            t = t.pow2k(5);
            acc = &acc * &t;
        }
        acc
    }
}

impl<'a, 'b> Add<&'b FieldElement127> for &'a FieldElement127 {
    type Output = FieldElement127;
    fn add(self, rhs: &'b FieldElement127) -> FieldElement127 {
        let (lo, carry) = self.0[0].overflowing_add(rhs.0[0]);
        // Both inputs are reduced, so the high limbs sum without overflow
        // and the extra bit lands in bit 127 where reduce() folds it.
        let hi = self.0[1] + rhs.0[1] + carry as u64;
        FieldElement127::reduce([lo, hi])
    }
}

impl<'a, 'b> Sub<&'b FieldElement127> for &'a FieldElement127 {
    type Output = FieldElement127;
    fn sub(self, rhs: &'b FieldElement127) -> FieldElement127 {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b FieldElement127> for &'a FieldElement127 {
    type Output = FieldElement127;
    fn mul(self, rhs: &'b FieldElement127) -> FieldElement127 {
        /// Multiply two 64-bit limbs with a 128-bit product.
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let (x0, x1) = (self.0[0], self.0[1]);
        let (y0, y1) = (rhs.0[0], rhs.0[1]);

        let lo = m(x0, y0);
        let mid = m(x0, y1) + m(x1, y0);
        let hi = m(x1, y1);

        FieldElement127::fold256(lo, mid, hi)
    }
}

impl<'a> Neg for &'a FieldElement127 {
    type Output = FieldElement127;
    fn neg(self) -> FieldElement127 {
        // p has all 127 low bits set, so p - x is bitwise complement
        // for reduced x; reduce() maps the p (= -0) output back to 0.
        FieldElement127::reduce([self.0[0] ^ P0, self.0[1] ^ P1])
    }
}

impl<'b> AddAssign<&'b FieldElement127> for FieldElement127 {
    fn add_assign(&mut self, rhs: &'b FieldElement127) {
        *self = (self as &FieldElement127) + rhs;
    }
}

impl<'b> SubAssign<&'b FieldElement127> for FieldElement127 {
    fn sub_assign(&mut self, rhs: &'b FieldElement127) {
        *self = (self as &FieldElement127) - rhs;
    }
}

impl<'b> MulAssign<&'b FieldElement127> for FieldElement127 {
    fn mul_assign(&mut self, rhs: &'b FieldElement127) {
        *self = (self as &FieldElement127) * rhs;
    }
}

define_add_variants!(
    LHS = FieldElement127,
    RHS = FieldElement127,
    Output = FieldElement127
);
define_sub_variants!(
    LHS = FieldElement127,
    RHS = FieldElement127,
    Output = FieldElement127
);
define_mul_variants!(
    LHS = FieldElement127,
    RHS = FieldElement127,
    Output = FieldElement127
);
define_neg_variants!(LHS = FieldElement127, Output = FieldElement127);

impl ConditionallySelectable for FieldElement127 {
    fn conditional_select(
        a: &FieldElement127,
        b: &FieldElement127,
        choice: Choice,
    ) -> FieldElement127 {
        FieldElement127([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement127 {
    /// Test equality between two `FieldElement127`s.  The internal
    /// representation is canonical, so limbs compare directly.
    fn ct_eq(&self, other: &FieldElement127) -> Choice {
        self.0[0].ct_eq(&other.0[0]) & self.0[1].ct_eq(&other.0[1])
    }
}

impl Eq for FieldElement127 {}

impl PartialEq for FieldElement127 {
    fn eq(&self, other: &FieldElement127) -> bool {
        self.ct_eq(other).into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Random element a of GF(2^127-1), generated with
    /// `GF(2^127 - 1).random_element()`.
    static A: FieldElement127 = FieldElement127([0x6a06e9ab85a0bcc1, 0x26d694c3ce834960]);

    /// a^2
    static ASQ: FieldElement127 = FieldElement127([0xc7582887ed666e7f, 0x2a89c4e7dff52269]);

    /// 1/a
    static AINV: FieldElement127 = FieldElement127([0xa94deb146e0fa125, 0x60d478b2708a662a]);

    /// a^((p-3)/4)
    static AINVSQRT: FieldElement127 = FieldElement127([0x918ed3690bf2944e, 0x3a19c9001ef7c506]);

    #[test]
    fn a_mul_a_vs_a_squared_constant() {
        assert_eq!(ASQ, &A * &A);
        assert_eq!(ASQ, A.square());
    }

    #[test]
    fn a_invert_vs_inverse_of_a_constant() {
        let should_be_inverse = A.invert();
        assert_eq!(AINV, should_be_inverse);
        assert_eq!(FieldElement127::ONE, &A * &should_be_inverse);
    }

    #[test]
    fn a_invsqrt_vs_constant() {
        let t = A.invsqrt();
        assert_eq!(AINVSQRT, t);
        // x * t^2 is 1 or -1
        let xt2 = &t.square() * &A;
        assert!(xt2 == FieldElement127::ONE || xt2 == FieldElement127::MINUS_ONE);
    }

    #[test]
    fn invsqrt_relation_over_corpus() {
        // Walk a deterministic corpus derived from A by squaring.
        let mut x = A;
        for _ in 0..100 {
            x = &x.square() + &FieldElement127::ONE;
            if bool::from(x.is_zero()) {
                continue;
            }
            let t = x.invsqrt();
            let xt2 = &t.square() * &x;
            assert!(xt2 == FieldElement127::ONE || xt2 == FieldElement127::MINUS_ONE);
            assert_eq!(&x * &x.invert(), FieldElement127::ONE);
        }
    }

    #[test]
    fn add_sub_neg() {
        assert_eq!(&A - &A, FieldElement127::ZERO);
        assert_eq!(&(&A + &A) - &A, A);
        assert_eq!(-&FieldElement127::ZERO, FieldElement127::ZERO);
        assert_eq!(&FieldElement127::ZERO - &FieldElement127::ONE, FieldElement127::MINUS_ONE);
    }

    #[test]
    fn reduce_edge_cases() {
        // p reduces to 0
        assert_eq!(
            FieldElement127::reduce([0xffff_ffff_ffff_ffff, 0x7fff_ffff_ffff_ffff]),
            FieldElement127::ZERO
        );
        // 2^127 reduces to 1
        assert_eq!(
            FieldElement127::reduce([0, 0x8000_0000_0000_0000]),
            FieldElement127::ONE
        );
        // 2^128 - 1 = 2*(2^127 - 1) + 1 reduces to 1
        assert_eq!(
            FieldElement127::reduce([0xffff_ffff_ffff_ffff, 0xffff_ffff_ffff_ffff]),
            FieldElement127::ONE
        );
    }

    #[test]
    fn one_half_is_inverse_of_two() {
        let two = &FieldElement127::ONE + &FieldElement127::ONE;
        assert_eq!(&two * &FieldElement127::ONE_HALF, FieldElement127::ONE);
    }

    #[test]
    fn bytes_round_trip() {
        let bytes = A.to_bytes();
        assert_eq!(FieldElement127::from_bytes(&bytes), A);
        // A non-canonical encoding of zero (p itself) decodes to zero.
        let p_bytes = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0x7f,
        ];
        assert_eq!(FieldElement127::from_bytes(&p_bytes), FieldElement127::ZERO);
    }

    #[test]
    fn conditional_select() {
        let x = FieldElement127::conditional_select(&A, &ASQ, Choice::from(0));
        assert_eq!(x, A);
        let y = FieldElement127::conditional_select(&A, &ASQ, Choice::from(1));
        assert_eq!(y, ASQ);
    }
}
