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

//! The two efficiently computable endomorphisms \\(\phi\\) and
//! \\(\psi\\) of the curve.
//!
//! Each endomorphism acts on points of the prime-order subgroup as
//! multiplication by a fixed eigenvalue modulo the subgroup order, so
//! together they decompose a 256-bit scalar multiplication into four
//! quarter-length ones (see [`crate::scalar::Scalar::decompose`]).
//!
//! Both maps are computed as \\(\hat\tau \circ \rho \circ \tau\\),
//! where \\(\tau\\) moves a point to the isogenous curve
//! \\(\hat E\\), \\(\rho\\) is \\(\upsilon\\) (for \\(\phi\\)) or
//! \\(\chi\\) (for \\(\psi\\)) acting on \\(\hat E\\), and
//! \\(\hat\tau\\) maps back.  The action involves the
//! \\(p\\)-power Frobenius on \\(\mathbb F\_{p\^2}\\), which is just
//! conjugation \\((a, b) \mapsto (a, -b)\\).

#![allow(non_snake_case)]

use crate::constants;
use crate::curve_models::ProjectivePoint;
use crate::edwards::ExtendedPoint;
use crate::field2::F2Element;

/// The map \\(\tau : E \to \hat E\\).
fn tau(P: &ProjectivePoint) -> ProjectivePoint {
    let A = P.X.square();
    let B = P.Y.square();
    let C = &A + &B;
    let D = &A - &B;

    ProjectivePoint {
        X: &(&(&constants::CTAU * &P.X) * &P.Y) * &D,
        Y: -&(&(&(&F2Element::TWO * &P.Z.square()) + &D) * &C),
        Z: &C * &D,
    }
}

/// The dual map \\(\hat\tau : \hat E \to E\\), landing in the working
/// form with \\((T_a, T_b)\\) split.
fn tau_dual(P: &ProjectivePoint) -> ExtendedPoint {
    let A = P.X.square();
    let B = P.Y.square();
    let C = &A + &B;
    let Ta = &B - &A;
    let D = &(&F2Element::TWO * &P.Z.square()) - &Ta;
    let Tb = &(&constants::CTAUDUAL * &P.X) * &P.Y;

    ExtendedPoint {
        X: &Tb * &C,
        Y: &Ta * &D,
        Z: &C * &D,
        Ta,
        Tb,
    }
}

/// The action of \\(\phi\\) on \\(\hat E\\): 23 field
/// multiplications against the constants `CPHI0..CPHI9`, with a final
/// Frobenius on all three coordinates.
fn upsilon(P: &ProjectivePoint) -> ProjectivePoint {
    let A = &(&constants::CPHI0 * &P.X) * &P.Y;
    let B = &P.Y * &P.Z;
    let C = P.Y.square();
    let D = P.Z.square();
    let F = D.square();
    let G = B.square();
    let H = C.square();
    let I = &constants::CPHI1 * &B;
    let J = &C + &(&constants::CPHI2 * &D);
    let K = &(&(&constants::CPHI8 * &G) + &H) + &(&constants::CPHI9 * &F);

    let X = &(&I + &J) * &(&I - &J);
    let X = (&(&A * &K) * &X).conjugate();

    let L = &C + &(&constants::CPHI4 * &D);
    let M = &constants::CPHI3 * &B;
    let N = &(&L + &M) * &(&L - &M);

    let Y = &(&H + &(&constants::CPHI6 * &G)) + &(&constants::CPHI7 * &F);
    let Y = (&(&(&constants::CPHI5 * &D) * &N) * &Y).conjugate();

    let Z = (&(&B * &K) * &N).conjugate();

    ProjectivePoint { X, Y, Z }
}

/// The action of \\(\psi\\) on \\(\hat E\\): 14 field multiplications
/// against the constants `CPSI1..CPSI4`, with Frobenius applied to the
/// inputs.
fn chi(P: &ProjectivePoint) -> ProjectivePoint {
    let A = P.X.conjugate();
    let B = P.Y.conjugate();
    let C = P.Z.conjugate().square();
    let D = A.square();

    let G = &B * &(&D + &(&constants::CPSI2 * &C));
    let H = -&(&D + &(&constants::CPSI4 * &C));

    ProjectivePoint {
        X: &(&(&constants::CPSI1 * &A) * &C) * &H,
        Y: &G * &(&D + &(&constants::CPSI3 * &C)),
        Z: &G * &H,
    }
}

/// The endomorphism \\(\phi = \hat\tau \circ \upsilon \circ \tau\\).
pub(crate) fn phi(P: &ExtendedPoint) -> ExtendedPoint {
    tau_dual(&upsilon(&tau(&P.to_projective())))
}

/// The endomorphism \\(\psi = \hat\tau \circ \chi \circ \tau\\).
pub(crate) fn psi(P: &ExtendedPoint) -> ExtendedPoint {
    tau_dual(&chi(&tau(&P.to_projective())))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;
    use crate::field::FieldElement127;
    use crate::traits::ValidityCheck;

    /// y-coordinate of phi applied 1000 times to the basepoint.
    static PHI_1000_Y: F2Element = F2Element {
        a: FieldElement127([0x7e2851d5a8e83fb9, 0x5474bf8ec55603ae]),
        b: FieldElement127([0xa5077613491788d5, 0x5476093dbf8bf6bf]),
    };

    /// x-coordinate of phi applied 1000 times to the basepoint.
    static PHI_1000_X: F2Element = F2Element {
        a: FieldElement127([0xd5b5a3061287db16, 0x5550aab9e7a620ee]),
        b: FieldElement127([0xec321e6cf33610fc, 0x3e61ebb9a1cb0210]),
    };

    /// x-coordinate of psi applied 1000 times to the basepoint.
    static PSI_1000_X: F2Element = F2Element {
        a: FieldElement127([0xd8f3c8c24a2bc7e2, 0x75af54edb41a2b93]),
        b: FieldElement127([0x4de2466701f009a9, 0x065249f9ede0c798]),
    };

    /// y-coordinate of psi applied 1000 times to the basepoint.
    static PSI_1000_Y: F2Element = F2Element {
        a: FieldElement127([0x1c6e119add608104, 0x06dbb85bffb7c21e]),
        b: FieldElement127([0xfd234d6c4cfa3ec1, 0x060a30903424bf13]),
    };

    #[test]
    fn phi_chain_vector() {
        let mut P = constants::BASEPOINT.to_extended();
        for _ in 0..1000 {
            P = phi(&P);
        }
        let aff = P.to_affine();
        assert_eq!(aff.x, PHI_1000_X);
        assert_eq!(aff.y, PHI_1000_Y);
    }

    #[test]
    fn psi_chain_vector() {
        let mut P = constants::BASEPOINT.to_extended();
        for _ in 0..1000 {
            P = psi(&P);
        }
        let aff = P.to_affine();
        assert_eq!(aff.x, PSI_1000_X);
        assert_eq!(aff.y, PSI_1000_Y);
    }

    #[test]
    fn endomorphism_images_are_on_curve() {
        let B = constants::BASEPOINT.to_extended();
        let phiB = phi(&B);
        let psiB = psi(&B);
        assert!(phiB.to_affine().is_on_curve());
        assert!(psiB.to_affine().is_on_curve());
        assert!(phiB.is_valid());
        assert!(psiB.is_valid());
    }
}
