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

//! Group operations on the twisted Edwards curve
//! \\( -x\^2 + y\^2 = 1 + d x\^2 y\^2 \\)
//! over \\(\mathbb F\_{p\^2}\\) with \\(p = 2\^{127} - 1\\).
//!
//! ## Point representations
//!
//! The public working type is [`ExtendedPoint`]; the cached forms live
//! in [`crate::curve_models`].  Wire-format points are
//! [`CompressedEdwardsY`]: the \\(y\\)-coordinate in 32 bytes with the
//! sign of \\(x\\) tucked into the top bit of the last byte.
//!
//! ## Scalar multiplication
//!
//! Two multipliers are implemented:
//!
//! * a signed 4-bit window method over the odd multiples
//!   \\([P, 3P, \ldots, 15P]\\), usable with any curve point; and
//! * a 4-dimensional GLV/GLS method which decomposes the scalar along
//!   the curve endomorphisms \\(\phi, \psi\\) and runs one doubling
//!   per two scalar bits.  It requires its input in the prime-order
//!   subgroup, which the Diffie-Hellman driver guarantees by cofactor
//!   multiplication.
//!
//! Both run in constant time: digit recodings have fixed length,
//! table lookups scan all entries, and every conditional is a masked
//! move.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, Mul};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::curve_models::{LazyNielsPoint, ProjectiveNielsPoint, ProjectivePoint};
use crate::errors::Curve4QError;
use crate::field2::F2Element;
use crate::scalar::Scalar;
use crate::traits::{Identity, ValidityCheck};
use crate::window::LookupTable;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// A curve point compressed to its \\(y\\)-coordinate plus the sign of
/// \\(x\\), in 32 bytes.
///
/// The layout is little-endian: bytes `0..16` carry the first
/// component of \\(y\\) and bytes `16..32` the second.  Bit 7 of byte
/// 15 is reserved and must be zero; bit 7 of byte 31 is the sign of
/// \\(x\\), defined as bit 126 of its first nonzero component.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Attempt to decompress to an `ExtendedPoint`.
    ///
    /// Decompression recovers \\(x\\) from the curve equation as
    /// \\(x\^2 = (y\^2 - 1) / (d y\^2 + 1)\\) and verifies the result
    /// against the curve equation.  The input is public, so this
    /// routine is not constant-time.
    ///
    /// # Errors
    ///
    /// [`Curve4QError::MalformedPoint`] if the reserved bit is set,
    /// the square root does not exist, or the decoded point is not on
    /// the curve.
    pub fn decompress(&self) -> Result<ExtendedPoint, Curve4QError> {
        // Bit 127 of the y-coordinate encoding is reserved.
        if self.0[15] & 0x80 != 0 {
            return Err(Curve4QError::MalformedPoint);
        }
        let sign = Choice::from(self.0[31] >> 7);
        let mut y_bytes = self.0;
        y_bytes[31] &= 0x7f;

        let y = F2Element::from_bytes(&y_bytes);
        let yy = y.square();
        let u = &yy - &F2Element::ONE; // u = y² - 1
        let v = &(&constants::EDWARDS_D * &yy) + &F2Element::ONE; // v = dy² + 1

        // x = (y² - 1) / sqrt((y² - 1)(dy² + 1))
        let (is_square, t) = (&u * &v).invsqrt();
        if !bool::from(is_square) {
            return Err(Curve4QError::MalformedPoint);
        }
        let mut x = &u * &t;

        // Flip the sign of x if it does not match the compressed bit.
        x.conditional_negate(x.sign_bit() ^ sign);

        let point = AffinePoint { x, y };
        if !point.is_on_curve() {
            return Err(Curve4QError::MalformedPoint);
        }

        Ok(point.to_extended())
    }
}

// ------------------------------------------------------------------------
// Affine points
// ------------------------------------------------------------------------

/// A point on the curve in affine coordinates.
#[derive(Copy, Clone)]
pub struct AffinePoint {
    pub(crate) x: F2Element,
    pub(crate) y: F2Element,
}

impl Debug for AffinePoint {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "AffinePoint{{\n\tx: {:?},\n\ty: {:?}\n}}", &self.x, &self.y)
    }
}

impl Identity for AffinePoint {
    fn identity() -> AffinePoint {
        AffinePoint {
            x: F2Element::ZERO,
            y: F2Element::ONE,
        }
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &AffinePoint) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl Eq for AffinePoint {}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl AffinePoint {
    /// Check the affine curve equation
    /// \\(-x\^2 + y\^2 = 1 + d x\^2 y\^2\\).  Not constant-time.
    pub(crate) fn is_on_curve(&self) -> bool {
        let xx = self.x.square();
        let yy = self.y.square();
        let lhs = &yy - &xx;
        let rhs = &F2Element::ONE + &(&(&constants::EDWARDS_D * &xx) * &yy);
        lhs == rhs
    }

    /// Lift to the extended working form.
    pub(crate) fn to_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            X: self.x,
            Y: self.y,
            Z: F2Element::ONE,
            Ta: self.x,
            Tb: self.y,
        }
    }

    /// Compress to the 32-byte wire format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let mut s = self.y.to_bytes();
        s[31] |= self.x.sign_bit().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }
}

// ------------------------------------------------------------------------
// Extended points
// ------------------------------------------------------------------------

/// An `ExtendedPoint` is a point on the curve in extended projective
/// coordinates \\((X : Y : Z)\\) together with the split auxiliary
/// pair \\((T_a, T_b)\\), maintained so that \\(T_a T_b = X Y / Z\\).
///
/// The split pair lets each doubling or addition defer the
/// multiplication \\(T_a \cdot T_b\\) to the next operation that
/// actually consumes \\(T\\).
#[derive(Copy, Clone)]
pub struct ExtendedPoint {
    pub(crate) X: F2Element,
    pub(crate) Y: F2Element,
    pub(crate) Z: F2Element,
    pub(crate) Ta: F2Element,
    pub(crate) Tb: F2Element,
}

impl Debug for ExtendedPoint {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(
            f,
            "ExtendedPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tTa: {:?},\n\tTb: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.Ta, &self.Tb
        )
    }
}

impl Identity for ExtendedPoint {
    fn identity() -> ExtendedPoint {
        ExtendedPoint {
            X: F2Element::ZERO,
            Y: F2Element::ONE,
            Z: F2Element::ONE,
            Ta: F2Element::ZERO,
            Tb: F2Element::ONE,
        }
    }
}

impl ConstantTimeEq for ExtendedPoint {
    /// Projective equality: \\(X_1 Z_2 = X_2 Z_1\\) and
    /// \\(Y_1 Z_2 = Y_2 Z_1\\).
    fn ct_eq(&self, other: &ExtendedPoint) -> Choice {
        let sx = &self.X * &other.Z;
        let ox = &other.X * &self.Z;
        let sy = &self.Y * &other.Z;
        let oy = &other.Y * &self.Z;

        sx.ct_eq(&ox) & sy.ct_eq(&oy)
    }
}

impl Eq for ExtendedPoint {}

impl PartialEq for ExtendedPoint {
    fn eq(&self, other: &ExtendedPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl ValidityCheck for ExtendedPoint {
    fn is_valid(&self) -> bool {
        self.to_projective().is_valid()
    }
}

impl ExtendedPoint {
    /// Convert to the cached addend form \\((Y+X, Y-X, 2Z, 2dT)\\).
    pub(crate) fn to_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.X + &self.Y,
            Y_minus_X: &self.Y - &self.X,
            Z2: &self.Z + &self.Z,
            T2d: &constants::EDWARDS_D2 * &(&self.Ta * &self.Tb),
        }
    }

    /// Convert to the accumulator form \\((Y+X, Y-X, Z, T)\\),
    /// merging the deferred product \\(T = T_a T_b\\).
    pub(crate) fn to_lazy_niels(&self) -> LazyNielsPoint {
        LazyNielsPoint {
            Y_plus_X: &self.X + &self.Y,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T: &self.Ta * &self.Tb,
        }
    }

    /// Drop to plain projective coordinates.
    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Normalize to affine coordinates.  Costs a field inversion.
    pub fn to_affine(&self) -> AffinePoint {
        let zinv = self.Z.invert();
        AffinePoint {
            x: &self.X * &zinv,
            y: &self.Y * &zinv,
        }
    }

    /// Compress to the 32-byte wire format.
    pub fn compress(&self) -> CompressedEdwardsY {
        self.to_affine().compress()
    }

    /// Double this point.
    ///
    /// The standard extended-twisted-Edwards doubling at
    /// \\(4\mathbf M + 3\mathbf S + 6\mathbf A\\), leaving
    /// \\((T_a, T_b)\\) unmerged for the next operation.
    pub(crate) fn double(&self) -> ExtendedPoint {
        let A = self.X.square();
        let B = self.Y.square();
        let C = &F2Element::TWO * &self.Z.square();
        let D = &A + &B;
        let E = &(&self.X + &self.Y).square() - &D;
        let F = &B - &A;
        let G = &C - &F;

        ExtendedPoint {
            X: &E * &G,
            Y: &D * &F,
            Z: &F * &G,
            Ta: E,
            Tb: D,
        }
    }

    /// Multiply by the cofactor 392.
    ///
    /// Computed as \\(392 P = 2(2\^7 P + 2\^6\cdot 2 P) \ldots\\);
    /// concretely: three doublings to \\(8P\\), four more to
    /// \\(128P\\), one more to \\(256P\\), then two mixed additions
    /// of \\(128P\\) and \\(8P\\).  The result lies in the
    /// prime-order subgroup.
    pub fn mul_by_cofactor(&self) -> ExtendedPoint {
        let p1 = self.double().double().double(); // 8P
        let p2 = p1.double().double().double().double(); // 128P
        let p3 = p2.double(); // 256P
        let p3 = &p3 + &p2.to_projective_niels(); // 384P
        &p3 + &p1.to_projective_niels() // 392P
    }

    /// Signed 4-bit-window scalar multiplication, valid for any curve
    /// point.  Precomputes the odd-multiples table of `self`.
    pub(crate) fn mul_windowed(&self, scalar: &Scalar) -> ExtendedPoint {
        ExtendedPoint::mul_windowed_with_table(scalar, &LookupTable::odd_multiples(self))
    }

    /// Signed-window multiplication against a precomputed
    /// odd-multiples table.
    ///
    /// The scalar is reduced modulo the subgroup order and recoded
    /// into 63 signed odd digits; evaluation is 62 rounds of four
    /// doublings plus one mixed addition.
    pub(crate) fn mul_windowed_with_table(
        scalar: &Scalar,
        table: &LookupTable<ProjectiveNielsPoint>,
    ) -> ExtendedPoint {
        let digits = scalar.to_window_digits();

        let mut Q = table.select(digits[62]).to_extended();
        for i in (0..62).rev() {
            Q = Q.double().double().double().double();
            Q = &Q + &table.select(digits[i]);
        }
        Q
    }

    /// Four-dimensional GLV/GLS scalar multiplication.
    ///
    /// `self` must lie in the prime-order subgroup (e.g. be the output
    /// of [`ExtendedPoint::mul_by_cofactor`]); the decomposition is
    /// only congruent to the scalar modulo the subgroup order.
    pub(crate) fn mul_endo(&self, scalar: &Scalar) -> ExtendedPoint {
        ExtendedPoint::mul_endo_with_table(scalar, &LookupTable::endo_subset_sums(self))
    }

    /// Endomorphism-based multiplication against a precomputed
    /// subset-sums table: 64 doublings and 65 mixed additions.
    pub(crate) fn mul_endo_with_table(
        scalar: &Scalar,
        table: &LookupTable<ProjectiveNielsPoint>,
    ) -> ExtendedPoint {
        let a = scalar.decompose();
        let (signs, digits) = Scalar::recode(a);

        let mut Q = table
            .select_signed(digits[64], !Choice::from(signs[64]))
            .to_extended();
        for i in (0..64).rev() {
            Q = Q.double();
            Q = &Q + &table.select_signed(digits[i], !Choice::from(signs[i]));
        }
        Q
    }
}

// ------------------------------------------------------------------------
// Addition
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b ProjectiveNielsPoint> for &'a ExtendedPoint {
    type Output = ExtendedPoint;

    fn add(self, other: &'b ProjectiveNielsPoint) -> ExtendedPoint {
        &self.to_lazy_niels() + other
    }
}

impl<'a, 'b> Add<&'b ExtendedPoint> for &'a ExtendedPoint {
    type Output = ExtendedPoint;

    fn add(self, other: &'b ExtendedPoint) -> ExtendedPoint {
        self + &other.to_projective_niels()
    }
}

define_add_variants!(
    LHS = ExtendedPoint,
    RHS = ExtendedPoint,
    Output = ExtendedPoint
);

// ------------------------------------------------------------------------
// Scalar multiplication operators
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b Scalar> for &'a ExtendedPoint {
    type Output = ExtendedPoint;

    /// Scalar multiplication, correct for any curve point.
    ///
    /// Uses the windowed method; the Diffie-Hellman driver reaches the
    /// faster endomorphism path internally after cofactor clearing.
    fn mul(self, scalar: &'b Scalar) -> ExtendedPoint {
        self.mul_windowed(scalar)
    }
}

impl<'a, 'b> Mul<&'b ExtendedPoint> for &'a Scalar {
    type Output = ExtendedPoint;

    fn mul(self, point: &'b ExtendedPoint) -> ExtendedPoint {
        point.mul_windowed(self)
    }
}

define_mul_variants!(LHS = ExtendedPoint, RHS = Scalar, Output = ExtendedPoint);
define_mul_variants!(LHS = Scalar, RHS = ExtendedPoint, Output = ExtendedPoint);

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;
    use crate::field::FieldElement127;

    /// The basepoint doubled 1000 times.
    static G_DOUBLED_1000: AffinePoint = AffinePoint {
        x: F2Element {
            a: FieldElement127([0xC9099C54855859D6, 0x2C3FD8822C82270F]),
            b: FieldElement127([0xA7B3F6E2043E8E68, 0x4DA5B9E83AA7A1B2]),
        },
        y: F2Element {
            a: FieldElement127([0x3EE089F0EB49AA14, 0x2001EB3A57688396]),
            b: FieldElement127([0x1FEE5617A7E954CD, 0x0FFDB0D761421F50]),
        },
    };

    /// 1001 * basepoint, from 1000 mixed additions of G onto 2G.
    static G_CHAIN_ADD_1000: AffinePoint = AffinePoint {
        x: F2Element {
            a: FieldElement127([0x6480B1EF0A151DB0, 0x3E243958590C4D90]),
            b: FieldElement127([0xAA270F644A65D473, 0x5327AF7D84238CD0]),
        },
        y: F2Element {
            a: FieldElement127([0x5E06003D73C43EB1, 0x3EF69A49CB7E0237]),
            b: FieldElement127([0x4E752648AC2EF0AB, 0x293EB1E26DD23B4E]),
        },
    };

    /// Result of the 1000-step chained-multiplication test.
    static G_MUL_CHAIN_1000: AffinePoint = AffinePoint {
        x: F2Element {
            a: FieldElement127([0xDFD2B477BD494BEF, 0x257C122BBFC94A1B]),
            b: FieldElement127([0x769593547237C459, 0x469BF80CB5B11F01]),
        },
        y: F2Element {
            a: FieldElement127([0x281C5067996F3344, 0x0901B3817C0E936C]),
            b: FieldElement127([0x4FE8C429915F1245, 0x570B948EACACE210]),
        },
    };

    #[test]
    fn basepoint_is_on_curve() {
        assert!(constants::BASEPOINT.is_on_curve());
        assert!(AffinePoint::identity().is_on_curve());
        assert!(constants::BASEPOINT.to_extended().is_valid());
    }

    #[test]
    fn repeated_doubling_vector() {
        let mut A = constants::BASEPOINT.to_extended();
        for _ in 0..1000 {
            A = A.double();
        }
        assert_eq!(A.to_affine(), G_DOUBLED_1000);
    }

    #[test]
    fn doubling_equals_self_addition() {
        let mut A = constants::BASEPOINT.to_extended();
        for _ in 0..1000 {
            A = &A + &A.to_projective_niels();
        }
        assert_eq!(A.to_affine(), G_DOUBLED_1000);
    }

    #[test]
    fn repeated_addition_vector() {
        let G = constants::BASEPOINT.to_extended();
        let B = G.to_projective_niels();
        let mut A = G.double();
        for _ in 0..1000 {
            A = &A + &B;
        }
        assert_eq!(A.to_affine(), G_CHAIN_ADD_1000);
    }

    #[test]
    fn neutral_element_is_neutral() {
        let G = constants::BASEPOINT.to_extended();
        let O = ExtendedPoint::identity();

        let GO = &G + &O.to_projective_niels();
        let OG = &O + &G.to_projective_niels();
        assert_eq!(GO.to_affine(), constants::BASEPOINT);
        assert_eq!(OG.to_affine(), constants::BASEPOINT);
    }

    #[test]
    fn compress_decompress_round_trip() {
        let enc = constants::BASEPOINT.compress();
        assert_eq!(enc, constants::BASEPOINT_COMPRESSED);

        let dec = enc.decompress().unwrap();
        assert_eq!(dec.to_affine(), constants::BASEPOINT);
    }

    #[test]
    fn decompression_sign_handling() {
        // Flipping the sign bit decodes to the negated x.
        let mut bytes = constants::BASEPOINT_COMPRESSED.to_bytes();
        bytes[31] ^= 1 << 7;
        let minus_G = CompressedEdwardsY(bytes).decompress().unwrap();
        let aff = minus_G.to_affine();
        assert_eq!(aff.x, -&constants::BASEPOINT.x);
        assert_eq!(aff.y, constants::BASEPOINT.y);
    }

    #[test]
    fn decompression_rejects_reserved_bit() {
        let mut bytes = constants::BASEPOINT_COMPRESSED.to_bytes();
        bytes[15] |= 0x80;
        assert_eq!(
            CompressedEdwardsY(bytes).decompress(),
            Err(Curve4QError::MalformedPoint)
        );
    }

    #[test]
    fn decompression_rejects_off_curve_y() {
        // y = 2 + 0i is not the y-coordinate of any curve point.
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        assert_eq!(
            CompressedEdwardsY(bytes).decompress(),
            Err(Curve4QError::MalformedPoint)
        );
    }

    #[test]
    fn mul_windowed_by_one_and_two() {
        let G = constants::BASEPOINT.to_extended();
        assert_eq!(G.mul_windowed(&Scalar::from_u64(1)), G);
        assert_eq!(G.mul_windowed(&Scalar::from_u64(2)), G.double());
    }

    #[test]
    fn mul_endo_by_one_and_two() {
        let G = constants::BASEPOINT.to_extended();
        assert_eq!(G.mul_endo(&Scalar::from_u64(1)), G);
        assert_eq!(G.mul_endo(&Scalar::from_u64(2)), G.double());
    }

    #[test]
    fn mul_with_table_matches_fresh_table() {
        let G = constants::BASEPOINT.to_extended();
        let table = LookupTable::odd_multiples(&G);
        let m = Scalar([
            0x3ad457ab55456230,
            0x3a8b3c2c6fd86e0c,
            0x7e38f7c9cfbb9166,
            0x0028fd6cbda458f0,
        ]);
        assert_eq!(
            ExtendedPoint::mul_windowed_with_table(&m, &table),
            G.mul_windowed(&m)
        );
    }

    #[test]
    fn windowed_and_endo_multipliers_agree() {
        use rand::RngCore;
        let mut rng = rand::rng();
        let G = constants::BASEPOINT.to_extended();

        let mut P = G;
        for _ in 0..50 {
            let mut words = [0u64; 4];
            for w in words.iter_mut() {
                *w = rng.next_u64();
            }
            // Up to 254 bits.
            words[3] &= (1 << 62) - 1;
            let m = Scalar(words);

            assert_eq!(P.mul_windowed(&m), P.mul_endo(&m));
            P = P.mul_windowed(&m);
        }
    }

    #[test]
    fn chained_multiplication_vector_windowed() {
        let mut curr: [u64; 4] = [
            0x3AD457AB55456230,
            0x3A8B3C2C6FD86E0C,
            0x7E38F7C9CFBB9166,
            0x0028FD6CBDA458F0,
        ];
        let mut A = constants::BASEPOINT.to_extended();
        for _ in 0..1000 {
            curr[1] = curr[2];
            curr[2] = curr[2].wrapping_add(curr[0]);
            A = A.mul_windowed(&Scalar(curr));
        }
        assert_eq!(A.to_affine(), G_MUL_CHAIN_1000);
    }

    #[test]
    fn chained_multiplication_vector_endo() {
        let mut curr: [u64; 4] = [
            0x3AD457AB55456230,
            0x3A8B3C2C6FD86E0C,
            0x7E38F7C9CFBB9166,
            0x0028FD6CBDA458F0,
        ];
        let mut A = constants::BASEPOINT.to_extended();
        for _ in 0..1000 {
            curr[1] = curr[2];
            curr[2] = curr[2].wrapping_add(curr[0]);
            A = A.mul_endo(&Scalar(curr));
        }
        assert_eq!(A.to_affine(), G_MUL_CHAIN_1000);
    }

    #[test]
    fn cofactor_multiplication_matches_scalar() {
        let G = constants::BASEPOINT.to_extended();
        assert_eq!(G.mul_by_cofactor(), G.mul_windowed(&Scalar::from_u64(392)));
    }

    #[test]
    fn scalar_mul_operator_uses_windowed_path() {
        let G = constants::BASEPOINT.to_extended();
        let m = Scalar::from_u64(392);
        assert_eq!(&G * &m, G.mul_by_cofactor());
        assert_eq!(&m * &G, G.mul_by_cofactor());
    }
}
