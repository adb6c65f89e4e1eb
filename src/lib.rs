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

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![allow(unused_qualifications)]

//! # curve4q-dalek
//!
//! **A pure-Rust implementation of group operations and Diffie-Hellman
//! key agreement on Curve4Q (FourQ), the twisted Edwards curve
//! \\(-x\^2 + y\^2 = 1 + d x\^2 y\^2\\) over
//! \\(\mathbb F\_{p\^2}\\) with \\(p = 2\^{127} - 1\\).**
//!
//! The curve admits two efficiently computable endomorphisms, which
//! the scalar multiplier exploits: a 256-bit scalar is decomposed into
//! four 64-bit sub-scalars along the endomorphism eigenvalues, so a
//! full variable-base multiplication costs only 64 doublings.
//!
//! ## Key agreement
//!
//! The high-level API mirrors x25519-dalek: generate an
//! [`EphemeralSecret`], hand the corresponding [`PublicKey`] to the
//! peer, and call [`EphemeralSecret::diffie_hellman`] on the peer's
//! key.
//!
//! ```
//! use curve4q_dalek::{EphemeralSecret, PublicKey};
//!
//! let mut rng = rand::rng();
//!
//! let alice_secret = EphemeralSecret::random_from_rng(&mut rng);
//! let alice_public = PublicKey::from(&alice_secret);
//! let bob_secret = EphemeralSecret::random_from_rng(&mut rng);
//! let bob_public = PublicKey::from(&bob_secret);
//!
//! let alice_shared = alice_secret.diffie_hellman(&bob_public).unwrap();
//! let bob_shared = bob_secret.diffie_hellman(&alice_public).unwrap();
//!
//! assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
//! ```
//!
//! The byte-oriented functions [`scalar_base_mult`] and
//! [`scalar_mult`] are available for protocols that manage raw
//! 32-byte keys themselves.
//!
//! Exchanges are defensive by construction: peer points are validated
//! against the curve equation, multiplied by the cofactor 392 before
//! the secret scalar is applied, and exchanges yielding the neutral
//! point are rejected ([`Curve4QError::NonContributory`]), so
//! low-order inputs cannot silently fix the shared secret.
//!
//! ## Constant-time guarantees
//!
//! All operations touching secret data — the field and scalar
//! arithmetic, digit recodings, table lookups, and both scalar
//! multipliers — execute with control flow and memory access patterns
//! independent of the secret.  Table indices derived from secret
//! digits are resolved by scanning all table entries with masked
//! moves.  Point *decoding* operates on public data and takes the
//! liberty of branching.
//!
//! ## Features
//!
//! * `zeroize` (default): wipe secret key material on drop.
//! * `static_secrets`: enable the reusable [`StaticSecret`] type.

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

// Modules for low-level operations directly on field elements,
// scalars, and curve points.

pub(crate) mod field;
pub(crate) mod field2;

pub mod edwards;
pub mod scalar;

pub(crate) mod curve_models;
pub(crate) mod endo;
pub(crate) mod window;

// Low-level curve and point constants, as well as the pre-computed
// basepoint table.

pub mod constants;

// Errors, common traits, and the Diffie-Hellman layer.

pub mod dh;
pub mod errors;
pub mod traits;

pub use crate::dh::{scalar_base_mult, scalar_mult, BASEPOINT_BYTES};
pub use crate::dh::{EphemeralSecret, PublicKey, SharedSecret};
#[cfg(feature = "static_secrets")]
pub use crate::dh::StaticSecret;
pub use crate::errors::Curve4QError;
