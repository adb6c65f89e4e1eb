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

//! Arithmetic on scalars: 256-bit integers and their images modulo
//! the prime subgroup order
//! \\( N = \mathtt{0x0029cbc14e5e0a72f05397829cbc14e5dfbd004dfe0f79992fb2540ec7768ce7} \\).
//!
//! Scalars are four `u64` words in little-endian order.  Besides the
//! usual fixed-width arithmetic, this module hosts the two secret
//! recodings the multipliers consume:
//!
//! * [`Scalar::to_window_digits`], a signed 4-bit window recoding into
//!   63 odd digits in \\(\\{-15, \ldots, 15\\}\\); and
//! * [`Scalar::decompose`] / [`Scalar::recode`], the 4-dimensional
//!   lattice decomposition and joint 65-digit recoding used by the
//!   endomorphism multiplier.
//!
//! Everything operating on secret data here is branch-free with a
//! data-independent memory access pattern.

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A 256-bit integer, as four `u64` words in little-endian order.
///
/// A `Scalar` is *not* implicitly reduced: wire decoding yields the
/// masked 252-bit integer, and reduction modulo \\(N\\) happens inside
/// the multipliers where it is needed.
#[derive(Copy, Clone)]
pub struct Scalar(pub(crate) [u64; 4]);

impl Debug for Scalar {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Scalar({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Scalar, b: &Scalar, choice: Choice) -> Scalar {
        Scalar([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl Scalar {
    /// Zero.
    pub const ZERO: Scalar = Scalar([0, 0, 0, 0]);

    /// Construct a scalar from a `u64`.
    pub const fn from_u64(x: u64) -> Scalar {
        Scalar([x, 0, 0, 0])
    }

    /// Construct a scalar from 32 bytes in little-endian order, without
    /// any masking or reduction.
    pub fn from_bytes(bytes: &[u8; 32]) -> Scalar {
        let mut words = [0u64; 4];
        for (i, word) in words.iter_mut().enumerate() {
            let mut w = [0u8; 8];
            w.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            *word = u64::from_le_bytes(w);
        }
        Scalar(words)
    }

    /// Serialize to 32 bytes in little-endian order.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        for (i, word) in self.0.iter().enumerate() {
            s[i * 8..(i + 1) * 8].copy_from_slice(&word.to_le_bytes());
        }
        s
    }

    /// Whether the low bit is set.
    pub(crate) fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Fixed-width addition; the final carry is discarded.
    pub(crate) fn add(&self, rhs: &Scalar) -> Scalar {
        self.add_with_carry(rhs).0
    }

    fn add_with_carry(&self, rhs: &Scalar) -> (Scalar, u64) {
        let mut z = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let t = (self.0[i] as u128) + (rhs.0[i] as u128) + (carry as u128);
            z[i] = t as u64;
            carry = (t >> 64) as u64;
        }
        (Scalar(z), carry)
    }

    /// Fixed-width subtraction; the final borrow is discarded.
    pub(crate) fn sub(&self, rhs: &Scalar) -> Scalar {
        self.sub_with_borrow(rhs).0
    }

    fn sub_with_borrow(&self, rhs: &Scalar) -> (Scalar, u64) {
        let mut z = [0u64; 4];
        let mut borrow = 0u64;
        for i in 0..4 {
            let (t, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (t, b2) = t.overflowing_sub(borrow);
            z[i] = t;
            borrow = (b1 | b2) as u64;
        }
        (Scalar(z), borrow)
    }

    /// Subtract a small signed integer `d` with \\(-16 < d < 16\\).
    pub(crate) fn sub_signed(&self, d: i8) -> Scalar {
        let neg = Choice::from(((d as u8) >> 7) & 1);
        let mag = Scalar::from_u64(d.unsigned_abs() as u64);
        Scalar::conditional_select(&self.sub(&mag), &self.add(&mag), neg)
    }

    /// Shift right by four bits.
    pub(crate) fn shr4(&self) -> Scalar {
        let x = &self.0;
        Scalar([
            (x[0] >> 4) | (x[1] << 60),
            (x[1] >> 4) | (x[2] << 60),
            (x[2] >> 4) | (x[3] << 60),
            x[3] >> 4,
        ])
    }

    /// Shift left by `s` bits, `s < 64`.  High bits are discarded.
    fn shl_small(&self, s: u32) -> Scalar {
        if s == 0 {
            return *self;
        }
        let x = &self.0;
        Scalar([
            x[0] << s,
            (x[1] << s) | (x[0] >> (64 - s)),
            (x[2] << s) | (x[1] >> (64 - s)),
            (x[3] << s) | (x[2] >> (64 - s)),
        ])
    }

    /// Multiply by a single word, returning the low 256 bits and the
    /// overflow word.
    pub(crate) fn mul_word(&self, w: u64) -> (Scalar, u64) {
        let mut z = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let t = (self.0[i] as u128) * (w as u128) + (carry as u128);
            z[i] = t as u64;
            carry = (t >> 64) as u64;
        }
        (Scalar(z), carry)
    }

    /// The high 64 bits of the full 512-bit product, i.e.
    /// \\(\lfloor x y / 2\^{256} \rfloor \bmod 2\^{64}\\).
    ///
    /// Accumulates the four single-word rows; contributions above word
    /// four can never carry back down, so they are simply dropped.
    pub(crate) fn mul_trunc(&self, rhs: &Scalar) -> u64 {
        let mut z = [0u64; 5];
        let (row, hi) = self.mul_word(rhs.0[0]);
        z[..4].copy_from_slice(&row.0);
        z[4] = hi;

        for j in 1..4 {
            let (row, _) = self.mul_word(rhs.0[j]);
            let mut carry = 0u64;
            for k in 0..4 - j {
                let t = (z[j + k] as u128) + (row.0[k] as u128) + (carry as u128);
                z[j + k] = t as u64;
                carry = (t >> 64) as u64;
            }
            let t = (z[4] as u128) + (row.0[4 - j] as u128) + (carry as u128);
            z[4] = t as u64;
        }
        z[4]
    }

    /// Reduce modulo the subgroup order \\(N\\), in constant time.
    ///
    /// Since \\(2\^{256} < 2\^{11} N\\), eleven conditional
    /// subtractions of \\(N \cdot 2\^i\\) for \\(i = 10, \ldots, 0\\)
    /// produce the fully reduced value.  The iteration count and the
    /// memory access pattern are fixed; each subtraction is kept or
    /// discarded by a borrow-driven select.
    pub(crate) fn mod_order(&self) -> Scalar {
        let mut x = *self;
        for i in (0..=10).rev() {
            let shifted = constants::BASEPOINT_ORDER.shl_small(i);
            let (diff, borrow) = x.sub_with_borrow(&shifted);
            x.conditional_assign(&diff, Choice::from((borrow as u8) ^ 1));
        }
        x
    }

    /// Recode into 63 signed, odd 4-bit window digits.
    ///
    /// The scalar is reduced modulo \\(N\\) and forced odd by adding
    /// \\(N\\) if necessary (the group order is 246 bits, so the sum
    /// still fits).  Digits `d[0..62]` lie in \\(\\{\pm 1, \pm 3,
    /// \ldots, \pm 15\\}\\) and the top digit `d[62]` in \\(\\{1, 3,
    /// \ldots, 15\\}\\), satisfying \\(m = \sum d_i 16\^i\\).
    pub(crate) fn to_window_digits(&self) -> [i8; 63] {
        let mut x = self.mod_order();
        let odd = x.is_odd();
        x.conditional_assign(&x.add(&constants::BASEPOINT_ORDER), !odd);

        let mut digits = [0i8; 63];
        for digit in digits.iter_mut().take(62) {
            // x is odd, so (x mod 32) - 16 is odd and nonzero.
            let d = (x.0[0] & 31) as i8 - 16;
            *digit = d;
            x = x.sub_signed(d).shr4();
        }
        digits[62] = x.0[0] as i8;
        digits
    }

    /// Decompose a scalar into four 64-bit sub-scalars
    /// \\((a_1, a_2, a_3, a_4)\\) with
    /// \\(m \equiv a_1 + a_2 \lambda_\phi + a_3 \lambda_\psi +
    /// a_4 \lambda_{\phi\psi} \pmod N\\) and \\(a_1\\) odd.
    ///
    /// This is Babai rounding against the precomputed lattice basis:
    /// the \\(t_i = \lfloor m \ell_i / 2\^{256}\rfloor\\) are rounded
    /// coordinates, and all arithmetic wraps modulo \\(2\^{64}\\) by
    /// construction (the offset vector absorbs the rounding error).
    pub(crate) fn decompose(&self) -> [u64; 4] {
        let t1 = self.mul_trunc(&constants::ELL1);
        let t2 = self.mul_trunc(&constants::ELL2);
        let t3 = self.mul_trunc(&constants::ELL3);
        let t4 = self.mul_trunc(&constants::ELL4);

        let b1 = &constants::LATTICE_B1;
        let b2 = &constants::LATTICE_B2;
        let b3 = &constants::LATTICE_B3;
        let b4 = &constants::LATTICE_B4;
        let c = &constants::LATTICE_C;

        let temp = self.0[0]
            .wrapping_sub(t1.wrapping_mul(b1[0]))
            .wrapping_sub(t2.wrapping_mul(b2[0]))
            .wrapping_sub(t3.wrapping_mul(b3[0]))
            .wrapping_sub(t4.wrapping_mul(b4[0]))
            .wrapping_add(c[0]);

        // b4[0] is odd, so adding it exactly when temp is even makes
        // a1 odd, as the joint recoding requires.
        let mask = (temp & 1).wrapping_sub(1);

        let a1 = temp.wrapping_add(mask & b4[0]);
        let a2 = t1
            .wrapping_mul(b1[1])
            .wrapping_add(t2.wrapping_mul(b2[1]))
            .wrapping_sub(t3.wrapping_mul(b3[1]))
            .wrapping_sub(t4.wrapping_mul(b4[1]))
            .wrapping_add(c[1])
            .wrapping_add(mask & b4[1]);
        let a3 = t3
            .wrapping_mul(b3[2])
            .wrapping_sub(t1.wrapping_mul(b1[2]))
            .wrapping_sub(t2.wrapping_mul(b2[2]))
            .wrapping_add(t4.wrapping_mul(b4[2]))
            .wrapping_add(c[2])
            .wrapping_sub(mask & b4[2]);
        let a4 = t1
            .wrapping_mul(b1[3])
            .wrapping_sub(t2.wrapping_mul(b2[3]))
            .wrapping_sub(t3.wrapping_mul(b3[3]))
            .wrapping_add(t4.wrapping_mul(b4[3]))
            .wrapping_add(c[3])
            .wrapping_sub(mask & b4[3]);

        [a1, a2, a3, a4]
    }

    /// Jointly recode decomposed sub-scalars into 65 positions of
    /// (sign, table-index) pairs.
    ///
    /// Position `i` carries a sign bit `signs[i]` (1 = add, 0 =
    /// subtract) taken from the bits of `a1`, and a 3-bit index
    /// `digits[i]` selecting which subset of the other sub-scalars
    /// contributes there.  `signs[64]` is always 1.
    pub(crate) fn recode(a: [u64; 4]) -> ([u8; 65], [u8; 65]) {
        let mut v = a;
        let mut signs = [0u8; 65];
        let mut digits = [0u8; 65];

        for i in 0..64 {
            // Bit i+1 of a1; the pre-shift keeps the shift amount in
            // range at i = 63 (where the bit is defined to be zero).
            let b1 = (((v[0] >> 1) >> i) & 1) as u8;
            signs[i] = b1;

            for j in 1..4 {
                let bj = (v[j] & 1) as u8;
                digits[i] += bj << (j - 1);
                let carry = (b1 | bj) ^ b1;
                v[j] = (v[j] >> 1).wrapping_add(carry as u64);
            }
        }

        digits[64] = (v[1].wrapping_add(v[2] << 1).wrapping_add(v[3] << 2)) as u8;
        signs[64] = 1;

        (signs, digits)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;

    #[test]
    fn add_sub_round_trip() {
        let x = Scalar([
            0x8000000000000001,
            0x8000000000000001,
            0x8000000000000001,
            0x0000000000000001,
        ]);
        let z = Scalar([
            0x0000000000000002,
            0x0000000000000003,
            0x0000000000000003,
            0x0000000000000003,
        ]);
        assert_eq!(x.add(&x), z);
        assert_eq!(z.sub(&x), x);
    }

    #[test]
    fn sub_signed_small() {
        let x = Scalar([0xffffffffffffffff, 0, 0, 0]);
        assert_eq!(x.sub_signed(1), Scalar([0xfffffffffffffffe, 0, 0, 0]));
        assert_eq!(x.sub_signed(-1), Scalar([0, 1, 0, 0]));
    }

    #[test]
    fn shr4() {
        let x = Scalar([
            0xffffffffffffffff,
            0xeeeeeeeeeeeeeeee,
            0xdddddddddddddddd,
            0xcccccccccccccccc,
        ]);
        let y = Scalar([
            0xefffffffffffffff,
            0xdeeeeeeeeeeeeeee,
            0xcddddddddddddddd,
            0x0ccccccccccccccc,
        ]);
        assert_eq!(x.shr4(), y);
    }

    #[test]
    fn mul_word_carry() {
        let x = Scalar([u64::MAX, u64::MAX, u64::MAX, u64::MAX]);
        let (lo, hi) = x.mul_word(u64::MAX);
        // (2^256 - 1)(2^64 - 1) = (2^64 - 2)*2^256 + (2^256 - 2^64 + 1)
        assert_eq!(lo, Scalar([1, u64::MAX, u64::MAX, u64::MAX]));
        assert_eq!(hi, u64::MAX - 1);
    }

    #[test]
    fn mul_trunc_vector() {
        let x = Scalar([
            0xfed8c8822ad9f1a7,
            0x47b3e28c55984d43,
            0x052d112f54981117,
            0x92990788d66bf558,
        ]);
        assert_eq!(x.mul_trunc(&constants::ELL1), 0x11e80533457dfbc6);
    }

    #[test]
    fn mod_order_edge_cases() {
        assert_eq!(constants::BASEPOINT_ORDER.mod_order(), Scalar::ZERO);
        assert_eq!(Scalar::ZERO.mod_order(), Scalar::ZERO);
        assert_eq!(Scalar::from_u64(5).mod_order(), Scalar::from_u64(5));

        // 16*N + 5
        let x = Scalar([
            0xfb2540ec7768ce75,
            0xfbd004dfe0f79992,
            0x05397829cbc14e5d,
            0x029cbc14e5e0a72f,
        ]);
        assert_eq!(x.mod_order(), Scalar::from_u64(5));

        // 2^256 - 1
        let x = Scalar([u64::MAX, u64::MAX, u64::MAX, u64::MAX]);
        let r = Scalar([
            0xdbbd257a49e0f91f,
            0x9a5e224be13735bb,
            0x0000000000000005,
            0x0000000000000000,
        ]);
        assert_eq!(x.mod_order(), r);
    }

    #[test]
    fn window_digits_are_odd_and_reconstruct() {
        let m = Scalar([
            0xfed8c8822ad9f1a7,
            0x47b3e28c55984d43,
            0x052d112f54981117,
            0x92990788d66bf558,
        ]);
        let digits = m.to_window_digits();

        for &d in digits[..62].iter() {
            assert_eq!((d & 1), 1, "window digit {} is even", d);
            assert!((-15..=15).contains(&d));
        }
        assert!((1..=15).contains(&digits[62]));
        assert_eq!(digits[62] & 1, 1);

        // Horner reconstruction: sum d[i] * 16^i equals the reduced,
        // odd-forced scalar.
        let mut expected = m.mod_order();
        let odd = expected.is_odd();
        expected.conditional_assign(&expected.add(&constants::BASEPOINT_ORDER), !odd);

        let mut acc = Scalar::ZERO;
        for &d in digits.iter().rev() {
            for _ in 0..4 {
                acc = acc.add(&acc);
            }
            acc = acc.sub_signed(-d);
        }
        assert_eq!(acc, expected);
    }

    /// Decomposition vectors: (scalar words, expected sub-scalars).
    static DECOMPOSE_VECTORS: [([u64; 4], [u64; 4]); 5] = [
        (
            [1, 0, 0, 0],
            [
                0x72482c5251a4559d,
                0x59f95b0add276f6c,
                0x7dd2d17c4625fa78,
                0x6bc57def56ce8877,
            ],
        ),
        (
            [
                0xfed8c8822ad9f1a7,
                0x47b3e28c55984d43,
                0x052d112f54981117,
                0x92990788d66bf558,
            ],
            [
                0xa8ea3f673f711e51,
                0xa08d1eae0b9e071d,
                0x55c8df690050276f,
                0x6396739dda88830f,
            ],
        ),
        (
            // N - 1
            [
                0x2fb2540ec7768ce6,
                0xdfbd004dfe0f7999,
                0xf05397829cbc14e5,
                0x0029cbc14e5e0a72,
            ],
            [
                0xa73d3559f9c01b71,
                0x5cbd7c25c0b049bc,
                0x4f85afb2bcfe35da,
                0x9c3fb2f0a4cebdde,
            ],
        ),
        (
            [u64::MAX, u64::MAX, u64::MAX, u64::MAX],
            [
                0xda35c5f965d7bda7,
                0xa503c22b757aaf5f,
                0x453f4116cab943e7,
                0x7c2a53525734dae4,
            ],
        ),
        (
            [
                0x3ad457ab55456230,
                0x3a8b3c2c6fd86e0c,
                0x7e38f7c9cfbb9166,
                0x0028fd6cbda458f0,
            ],
            [
                0xa25fd8fc8d7d1a1b,
                0x7ee3e283627d906e,
                0x4e67311b400bf697,
                0x709a0d9fa6e65a28,
            ],
        ),
    ];

    #[test]
    fn decompose_vectors() {
        for (words, expected) in DECOMPOSE_VECTORS.iter() {
            let a = Scalar(*words).decompose();
            assert_eq!(&a, expected);
            assert_eq!(a[0] & 1, 1, "a1 must be odd");
        }
    }

    #[test]
    fn recode_vector() {
        let a = Scalar(DECOMPOSE_VECTORS[1].0).decompose();
        let (signs, digits) = Scalar::recode(a);

        let expected_signs: [u8; 65] = [
            0, 0, 0, 1, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 1, 0, 1, 1, 1, 1, 1,
            1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 0, 1, 0, 1, 1, 1, 0,
            0, 0, 1, 0, 1, 0, 1, 0, 1,
        ];
        let expected_digits: [u8; 65] = [
            7, 1, 0, 0, 6, 5, 0, 2, 5, 5, 1, 2, 0, 2, 2, 6, 0, 1, 0, 4, 2, 1, 2, 7, 1, 5, 0, 5,
            4, 0, 4, 0, 2, 5, 5, 2, 3, 7, 2, 7, 6, 7, 3, 3, 7, 4, 2, 4, 7, 4, 1, 7, 3, 4, 2, 7,
            1, 3, 5, 2, 0, 7, 1, 7, 7,
        ];
        assert_eq!(signs[..], expected_signs[..]);
        assert_eq!(digits[..], expected_digits[..]);
    }

    #[test]
    fn recode_top_digit_in_range() {
        for (words, _) in DECOMPOSE_VECTORS.iter() {
            let a = Scalar(*words).decompose();
            let (signs, digits) = Scalar::recode(a);
            assert_eq!(signs[64], 1);
            assert!(digits[64] < 8);
            for &d in digits.iter() {
                assert!(d < 8);
            }
        }
    }

    #[test]
    fn bytes_round_trip() {
        let m = Scalar([
            0xfed8c8822ad9f1a7,
            0x47b3e28c55984d43,
            0x052d112f54981117,
            0x92990788d66bf558,
        ]);
        assert_eq!(Scalar::from_bytes(&m.to_bytes()), m);
    }
}
