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

//! Code for the eight-entry lookup tables driving both scalar
//! multipliers.

#![allow(non_snake_case)]

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::curve_models::ProjectiveNielsPoint;
use crate::edwards::ExtendedPoint;
use crate::endo::{phi, psi};
use crate::traits::Identity;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A lookup table of eight precomputed multiples of a point \\(P\\).
///
/// Two layouts share this type:
///
/// * odd multiples \\([P, 3P, 5P, \ldots, 15P]\\) for the signed-window
///   multiplier (built by [`LookupTable::odd_multiples`]); and
/// * the subset sums of \\(\\{P, \phi(P), \psi(P), \psi\phi(P)\\}\\)
///   for the endomorphism multiplier (built by
///   [`LookupTable::endo_subset_sums`]).
///
/// Both `select` functions run in constant time: the table index is
/// materialised by scanning all eight entries with masked moves, never
/// by an indexed load, since the index is derived from a secret
/// scalar.
#[derive(Copy, Clone)]
pub struct LookupTable<T>(pub(crate) [T; 8]);

impl<T> LookupTable<T>
where
    T: Identity + ConditionallySelectable + ConditionallyNegatable,
{
    /// Given odd \\(x\\) with \\(-15 \leq x \leq 15\\), return
    /// \\(xP\\) in constant time.
    pub fn select(&self, x: i8) -> T {
        debug_assert_eq!(x & 1, 1);
        debug_assert!(x >= -15);
        debug_assert!(x <= 15);

        // Compute xabs = |x|
        let xmask = x >> 7;
        let xabs = ((x + xmask) ^ xmask) as u8;

        // Set t = identity; entry j holds (2j+1)*P.
        let mut t = T::identity();
        for j in 0..8 {
            let c = xabs.ct_eq(&(2 * j as u8 + 1));
            t.conditional_assign(&self.0[j], c);
        }
        // Now t == |x| * P.

        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_negate(neg_mask);
        // Now t == x * P.

        t
    }

    /// Given an index in \\([0, 8)\\) and a negation choice, return
    /// the (possibly negated) entry in constant time.
    pub fn select_signed(&self, index: u8, negate: Choice) -> T {
        debug_assert!(index < 8);

        let mut t = T::identity();
        for j in 0..8 {
            t.conditional_assign(&self.0[j], index.ct_eq(&(j as u8)));
        }
        t.conditional_negate(negate);

        t
    }
}

impl<T: Debug> Debug for LookupTable<T> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "LookupTable({:?})", self.0)
    }
}

#[cfg(feature = "zeroize")]
impl<T> Zeroize for LookupTable<T>
where
    T: Copy + Zeroize,
{
    fn zeroize(&mut self) {
        for x in self.0.iter_mut() {
            x.zeroize();
        }
    }
}

impl LookupTable<ProjectiveNielsPoint> {
    /// Build the odd multiples \\([P, 3P, 5P, \ldots, 15P]\\) of `P`.
    pub fn odd_multiples(P: &ExtendedPoint) -> Self {
        let P2 = P.double();
        let mut points = [P.to_projective_niels(); 8];
        for j in 0..7 {
            points[j + 1] = (&P2 + &points[j]).to_projective_niels();
        }
        LookupTable(points)
    }

    /// Build the subset sums of \\(\\{P, \phi(P), \psi(P),
    /// \psi\phi(P)\\}\\): entry \\(j = j_0 + 2 j_1 + 4 j_2\\) holds
    /// \\(P + j_0\,\phi(P) + j_1\,\psi(P) + j_2\,\psi\phi(P)\\).
    ///
    /// `P` must lie in the prime-order subgroup.
    pub fn endo_subset_sums(P: &ExtendedPoint) -> Self {
        let phiP = phi(P);
        let psiP = psi(P);
        let psiphiP = psi(&phiP);

        let Q = phiP.to_lazy_niels();
        let R = psiP.to_lazy_niels();
        let S = psiphiP.to_lazy_niels();

        let mut t = [P.to_projective_niels(); 8];
        t[1] = (&Q + &t[0]).to_projective_niels();
        t[2] = (&R + &t[0]).to_projective_niels();
        t[3] = (&R + &t[1]).to_projective_niels();
        t[4] = (&S + &t[0]).to_projective_niels();
        t[5] = (&S + &t[1]).to_projective_niels();
        t[6] = (&S + &t[2]).to_projective_niels();
        t[7] = (&S + &t[3]).to_projective_niels();
        LookupTable(t)
    }
}
