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

//! This module contains internal curve representations which are not
//! part of the public API.
//!
//! # Curve representations
//!
//! Internally, we use four models for points on the twisted Edwards
//! curve \\( -x\^2 + y\^2 = 1 + d x\^2 y\^2 \\) over
//! \\(\mathbb F\_{p\^2}\\):
//!
//! * [`crate::edwards::ExtendedPoint`]: the working form.  Extended
//!   projective coordinates \\((X : Y : Z)\\) carrying the auxiliary
//!   pair \\((T_a, T_b)\\) with \\(T_a T_b = XY/Z\\).  The product is
//!   deliberately left unmerged so that the next operation can fuse
//!   the multiplication \\(T_a \cdot T_b\\) into its own chain.
//!
//! * [`ProjectiveNielsPoint`]: the cached addend form
//!   \\((Y+X,\; Y-X,\; 2Z,\; 2dT)\\), following the precomputation
//!   introduced by Niels Duif in the ed25519 paper
//!   ["High-Speed High-Security Signatures"](https://ed25519.cr.yp.to/ed25519-20110926.pdf).
//!   With \\(2dT\\) carried in the cache, each mixed addition costs
//!   eight field multiplications.
//!
//! * [`LazyNielsPoint`]: the accumulator side of a mixed addition,
//!   \\((Y+X,\; Y-X,\; Z,\; T_a T_b)\\) — a Niels point whose \\(T\\)
//!   has not been scaled by \\(2d\\) and whose \\(Z\\) is not doubled.
//!
//! * [`ProjectivePoint`]: plain projective \\((X : Y : Z)\\), the
//!   input form of the curve endomorphisms.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, Neg};

use subtle::Choice;
use subtle::ConditionallySelectable;

use crate::constants;
use crate::edwards::ExtendedPoint;
use crate::field2::F2Element;
use crate::traits::Identity;
use crate::traits::ValidityCheck;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

// ------------------------------------------------------------------------
// Internal point representations
// ------------------------------------------------------------------------

/// A `ProjectivePoint` is a point on the curve in \\(\mathbb P\^2\\).
/// A point \\((x, y)\\) in the affine model corresponds to
/// \\((x : y : 1)\\).
#[derive(Copy, Clone)]
pub struct ProjectivePoint {
    pub X: F2Element,
    pub Y: F2Element,
    pub Z: F2Element,
}

/// A pre-computed point in the \\(\mathbb P\^3\\) model of the curve,
/// represented as \\((Y+X, Y-X, 2Z, 2dT)\\) to accelerate mixed
/// addition.
#[derive(Copy, Clone)]
pub struct ProjectiveNielsPoint {
    pub Y_plus_X: F2Element,
    pub Y_minus_X: F2Element,
    pub Z2: F2Element,
    pub T2d: F2Element,
}

/// The accumulator side of a mixed addition: \\((Y+X, Y-X, Z, T)\\)
/// with \\(T = T_a T_b\\) merged but not yet scaled by \\(2d\\).
#[derive(Copy, Clone)]
pub struct LazyNielsPoint {
    pub Y_plus_X: F2Element,
    pub Y_minus_X: F2Element,
    pub Z: F2Element,
    pub T: F2Element,
}

// ------------------------------------------------------------------------
// Constructors
// ------------------------------------------------------------------------

impl Identity for ProjectivePoint {
    fn identity() -> ProjectivePoint {
        ProjectivePoint {
            X: F2Element::ZERO,
            Y: F2Element::ONE,
            Z: F2Element::ONE,
        }
    }
}

impl Identity for ProjectiveNielsPoint {
    fn identity() -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: F2Element::ONE,
            Y_minus_X: F2Element::ONE,
            Z2: F2Element::TWO,
            T2d: F2Element::ZERO,
        }
    }
}

impl Identity for LazyNielsPoint {
    fn identity() -> LazyNielsPoint {
        LazyNielsPoint {
            Y_plus_X: F2Element::ONE,
            Y_minus_X: F2Element::ONE,
            Z: F2Element::ONE,
            T: F2Element::ZERO,
        }
    }
}

// ------------------------------------------------------------------------
// Validity checks (for debugging, not CT)
// ------------------------------------------------------------------------

impl ValidityCheck for ProjectivePoint {
    fn is_valid(&self) -> bool {
        // Curve equation is    -x^2 + y^2 = 1 + d*x^2*y^2,
        // homogenized as (-X^2 + Y^2)*Z^2 = Z^4 + d*X^2*Y^2
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ = self.Z.square();
        let ZZZZ = ZZ.square();
        let lhs = &(&YY - &XX) * &ZZ;
        let rhs = &ZZZZ + &(&constants::EDWARDS_D * &(&XX * &YY));

        lhs == rhs
    }
}

// ------------------------------------------------------------------------
// Constant-time assignment
// ------------------------------------------------------------------------

impl ConditionallySelectable for ProjectiveNielsPoint {
    fn conditional_select(
        a: &ProjectiveNielsPoint,
        b: &ProjectiveNielsPoint,
        choice: Choice,
    ) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: F2Element::conditional_select(&a.Y_plus_X, &b.Y_plus_X, choice),
            Y_minus_X: F2Element::conditional_select(&a.Y_minus_X, &b.Y_minus_X, choice),
            Z2: F2Element::conditional_select(&a.Z2, &b.Z2, choice),
            T2d: F2Element::conditional_select(&a.T2d, &b.T2d, choice),
        }
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for ProjectiveNielsPoint {
    fn zeroize(&mut self) {
        self.Y_plus_X.zeroize();
        self.Y_minus_X.zeroize();
        self.Z2.zeroize();
        self.T2d.zeroize();
    }
}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl ProjectiveNielsPoint {
    /// Convert back to the working form.
    ///
    /// All coordinates pick up a factor of two here, which is harmless
    /// by projectivity; the cached \\(2dT\\) is unscaled with the
    /// precomputed \\(d\^{-1}\\).
    pub fn to_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            X: &self.Y_plus_X - &self.Y_minus_X,
            Y: &self.Y_plus_X + &self.Y_minus_X,
            Z: self.Z2,
            Ta: &constants::EDWARDS_D_INV * &self.T2d,
            Tb: F2Element::ONE,
        }
    }
}

// ------------------------------------------------------------------------
// Addition
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b ProjectiveNielsPoint> for &'a LazyNielsPoint {
    type Output = ExtendedPoint;

    /// The mixed-addition core: eight field multiplications, with the
    /// output's \\((T_a, T_b)\\) left unmerged.
    fn add(self, other: &'b ProjectiveNielsPoint) -> ExtendedPoint {
        let MM = &self.Y_minus_X * &other.Y_minus_X;
        let PP = &self.Y_plus_X * &other.Y_plus_X;
        let TT2d = &other.T2d * &self.T;
        let ZZ2 = &other.Z2 * &self.Z;

        let E = &PP - &MM;
        let F = &ZZ2 - &TT2d;
        let G = &ZZ2 + &TT2d;
        let H = &PP + &MM;

        ExtendedPoint {
            X: &E * &F,
            Y: &G * &H,
            Z: &F * &G,
            Ta: E,
            Tb: H,
        }
    }
}

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a ProjectiveNielsPoint {
    type Output = ProjectiveNielsPoint;

    fn neg(self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: self.Y_minus_X,
            Y_minus_X: self.Y_plus_X,
            Z2: self.Z2,
            T2d: -(&self.T2d),
        }
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for ProjectivePoint {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(
            f,
            "ProjectivePoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?}\n}}",
            &self.X, &self.Y, &self.Z
        )
    }
}

impl Debug for ProjectiveNielsPoint {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(
            f,
            "ProjectiveNielsPoint{{\n\tY_plus_X: {:?},\n\tY_minus_X: {:?},\n\tZ2: {:?},\n\tT2d: {:?}\n}}",
            &self.Y_plus_X, &self.Y_minus_X, &self.Z2, &self.T2d
        )
    }
}

impl Debug for LazyNielsPoint {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(
            f,
            "LazyNielsPoint{{\n\tY_plus_X: {:?},\n\tY_minus_X: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.Y_plus_X, &self.Y_minus_X, &self.Z, &self.T
        )
    }
}
