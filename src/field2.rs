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

//! Arithmetic in the quadratic extension field
//! \\(\mathbb F\_{p\^2} = \mathbb F\_p[i] / (i\^2 + 1)\\) with
//! \\(p = 2\^{127} - 1\\).
//!
//! Elements are pairs \\((a, b)\\) representing \\(a + b i\\), and the
//! arithmetic is complex-number style: multiplication uses the
//! Karatsuba identity \\(ad + bc = (a+b)(c+d) - ac - bd\\) to run in
//! three base-field multiplications, and inversion multiplies the
//! conjugate by the inverted norm \\(a\^2 + b\^2\\).

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::field::FieldElement127;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// An element \\(a + b i\\) of \\(\mathbb F\_{p\^2}\\).
#[derive(Copy, Clone)]
pub struct F2Element {
    pub(crate) a: FieldElement127,
    pub(crate) b: FieldElement127,
}

impl Debug for F2Element {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "F2Element {{\n\ta: {:?},\n\tb: {:?}\n}}", &self.a, &self.b)
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for F2Element {
    fn zeroize(&mut self) {
        self.a.zeroize();
        self.b.zeroize();
    }
}

impl F2Element {
    /// The additive identity.
    pub const ZERO: F2Element = F2Element {
        a: FieldElement127::ZERO,
        b: FieldElement127::ZERO,
    };
    /// The multiplicative identity.
    pub const ONE: F2Element = F2Element {
        a: FieldElement127::ONE,
        b: FieldElement127::ZERO,
    };
    /// Two.
    pub(crate) const TWO: F2Element = F2Element {
        a: FieldElement127([2, 0]),
        b: FieldElement127::ZERO,
    };

    /// The conjugate \\(a - b i\\).
    pub(crate) fn conjugate(&self) -> F2Element {
        F2Element {
            a: self.a,
            b: -&self.b,
        }
    }

    /// Returns the square of this element, as
    /// \\((a + bi)\^2 = (a\^2 - b\^2) + 2ab \cdot i\\)
    /// (two base-field squarings and one multiplication).
    pub(crate) fn square(&self) -> F2Element {
        let aa = self.a.square();
        let bb = self.b.square();
        let ab = &self.a * &self.b;
        F2Element {
            a: &aa - &bb,
            b: &ab + &ab,
        }
    }

    /// Given a nonzero element, compute its inverse as
    /// \\(\bar x \cdot (a\^2 + b\^2)\^{-1}\\).
    ///
    /// This function returns zero on input zero.
    pub(crate) fn invert(&self) -> F2Element {
        let norm_inv = (&self.a.square() + &self.b.square()).invert();
        F2Element {
            a: &self.a * &norm_inv,
            b: &(-&self.b) * &norm_inv,
        }
    }

    /// Attempt to compute \\(1/\sqrt x\\).
    ///
    /// # Return
    ///
    /// `(Choice(1), t)` with \\(x t\^2 = 1\\) when \\(x\\) is a nonzero
    /// square, and `(Choice(0), _)` otherwise.  The second component
    /// must not be used when the first is false.
    ///
    /// Non-squares are only ever reachable from attacker-supplied
    /// encodings, so the validity bit is consumed by point decoding.
    pub(crate) fn invsqrt(&self) -> (Choice, F2Element) {
        // With n = a^2 + b^2 (the norm, in the base field), a square
        // root of x = a + bi has real part sqrt((a + sqrt(n))/2) up to
        // the choice of sqrt(n)'s sign; assemble 1/sqrt(x) from the
        // base-field routine applied to n and to one of the two
        // candidates delta = (a ± n·s)/2.
        let n = &self.a.square() + &self.b.square();
        let s = n.invsqrt();
        let norm_ok = (&(&n * &s) * &s).ct_eq(&FieldElement127::ONE);
        let c = &n * &s;

        let delta_p = &(&self.a + &c) * &FieldElement127::ONE_HALF;
        let g_p = delta_p.invsqrt();
        let ok_p = (&(&delta_p * &g_p) * &g_p).ct_eq(&FieldElement127::ONE);

        let delta_m = &(&self.a - &c) * &FieldElement127::ONE_HALF;
        let g_m = delta_m.invsqrt();
        let ok_m = (&(&delta_m * &g_m) * &g_m).ct_eq(&FieldElement127::ONE);

        let delta = FieldElement127::conditional_select(&delta_m, &delta_p, ok_p);
        let g = FieldElement127::conditional_select(&g_m, &g_p, ok_p);

        let h = &delta * &g;
        let t = F2Element {
            a: &h * &s,
            b: &(&(&(-&self.b) * &s) * &g) * &FieldElement127::ONE_HALF,
        };

        (norm_ok & (ok_p | ok_m), t)
    }

    /// Determine whether this element is zero.
    pub(crate) fn is_zero(&self) -> Choice {
        self.a.is_zero() & self.b.is_zero()
    }

    /// The "sign" of this element for point compression: bit 126 of
    /// the first nonzero component.
    pub(crate) fn sign_bit(&self) -> Choice {
        let a_nonzero = !self.a.is_zero();
        (a_nonzero & self.a.sign_bit()) | (!a_nonzero & self.b.sign_bit())
    }

    /// Load an element from 32 bytes: `a` from the first 16 bytes,
    /// `b` from the last 16, little-endian.  Bits 127 of both halves
    /// are ignored; the caller checks them against the wire format.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> F2Element {
        let mut lo = [0u8; 16];
        let mut hi = [0u8; 16];
        lo.copy_from_slice(&bytes[..16]);
        hi.copy_from_slice(&bytes[16..]);
        F2Element {
            a: FieldElement127::from_bytes(&lo),
            b: FieldElement127::from_bytes(&hi),
        }
    }

    /// Serialize to 32 bytes.  The encoding is canonical.
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s[..16].copy_from_slice(&self.a.to_bytes());
        s[16..].copy_from_slice(&self.b.to_bytes());
        s
    }
}

impl<'a, 'b> Add<&'b F2Element> for &'a F2Element {
    type Output = F2Element;
    fn add(self, rhs: &'b F2Element) -> F2Element {
        F2Element {
            a: &self.a + &rhs.a,
            b: &self.b + &rhs.b,
        }
    }
}

impl<'a, 'b> Sub<&'b F2Element> for &'a F2Element {
    type Output = F2Element;
    fn sub(self, rhs: &'b F2Element) -> F2Element {
        F2Element {
            a: &self.a - &rhs.a,
            b: &self.b - &rhs.b,
        }
    }
}

impl<'a, 'b> Mul<&'b F2Element> for &'a F2Element {
    type Output = F2Element;
    fn mul(self, rhs: &'b F2Element) -> F2Element {
        // (a + bi)(c + di) = (ac - bd) + (ad + bc)i, with
        // ad + bc = (a + b)(c + d) - ac - bd.
        let ac = &self.a * &rhs.a;
        let bd = &self.b * &rhs.b;
        let cross = &(&self.a + &self.b) * &(&rhs.a + &rhs.b);
        F2Element {
            a: &ac - &bd,
            b: &cross - &(&ac + &bd),
        }
    }
}

impl<'a> Neg for &'a F2Element {
    type Output = F2Element;
    fn neg(self) -> F2Element {
        F2Element {
            a: -&self.a,
            b: -&self.b,
        }
    }
}

impl<'b> AddAssign<&'b F2Element> for F2Element {
    fn add_assign(&mut self, rhs: &'b F2Element) {
        *self = (self as &F2Element) + rhs;
    }
}

impl<'b> SubAssign<&'b F2Element> for F2Element {
    fn sub_assign(&mut self, rhs: &'b F2Element) {
        *self = (self as &F2Element) - rhs;
    }
}

impl<'b> MulAssign<&'b F2Element> for F2Element {
    fn mul_assign(&mut self, rhs: &'b F2Element) {
        *self = (self as &F2Element) * rhs;
    }
}

define_add_variants!(LHS = F2Element, RHS = F2Element, Output = F2Element);
define_sub_variants!(LHS = F2Element, RHS = F2Element, Output = F2Element);
define_mul_variants!(LHS = F2Element, RHS = F2Element, Output = F2Element);
define_neg_variants!(LHS = F2Element, Output = F2Element);

impl ConditionallySelectable for F2Element {
    fn conditional_select(a: &F2Element, b: &F2Element, choice: Choice) -> F2Element {
        F2Element {
            a: FieldElement127::conditional_select(&a.a, &b.a, choice),
            b: FieldElement127::conditional_select(&a.b, &b.b, choice),
        }
    }
}

impl ConstantTimeEq for F2Element {
    fn ct_eq(&self, other: &F2Element) -> Choice {
        self.a.ct_eq(&other.a) & self.b.ct_eq(&other.b)
    }
}

impl Eq for F2Element {}

impl PartialEq for F2Element {
    fn eq(&self, other: &F2Element) -> bool {
        self.ct_eq(other).into()
    }
}
