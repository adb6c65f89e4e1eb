// -*- mode: rust; -*-
//
// This file is part of curve4q-dalek.
// Copyright (c) 2017-2021 isis lovecruft
// Copyright (c) 2019-2021 DebugSteven
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - DebugSteven <debugsteven@gmail.com>

//! Diffie-Hellman key exchange over Curve4Q.
//!
//! The byte-oriented functions [`scalar_base_mult`] and
//! [`scalar_mult`] take 32-byte scalars and points and produce 32-byte
//! outputs.  The typed [`EphemeralSecret`] / [`PublicKey`] /
//! [`SharedSecret`] API wraps them with key hygiene.
//!
//! Every exchange performs the full defensive sequence: the peer point
//! is decoded and checked against the curve equation, multiplied by
//! the cofactor 392 to clear any small-order component, multiplied by
//! the secret scalar with the endomorphism-based constant-time
//! multiplier, and the result is rejected if it is the neutral point
//! (a peer who supplies a low-order point contributes nothing to the
//! shared secret and learns it outright).

use rand_core::CryptoRng;

use crate::constants;
use crate::edwards::{AffinePoint, CompressedEdwardsY, ExtendedPoint};
use crate::errors::Curve4QError;
use crate::scalar::Scalar;
use crate::traits::IsIdentity;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The wire encoding of the basepoint, for use with the bare,
/// byte-oriented [`scalar_mult`] function.
pub const BASEPOINT_BYTES: [u8; 32] = constants::BASEPOINT_COMPRESSED.0;

/// Decode a 32-byte wire scalar: a little-endian integer whose top
/// four bits are masked off, yielding 252 bits.
fn decode_scalar(bytes: &[u8; 32]) -> Scalar {
    let mut masked = *bytes;
    masked[31] &= 0x0f;
    Scalar::from_bytes(&masked)
}

/// Multiply the basepoint's prime-subgroup image \\(392 G\\) by `m`,
/// using the precomputed table.  No neutral-point policy is applied.
fn base_mult(m: &Scalar) -> AffinePoint {
    ExtendedPoint::mul_endo_with_table(m, &constants::BASEPOINT_ENDO_TABLE).to_affine()
}

/// The core Diffie-Hellman sequence for a peer-supplied point.
fn dh_core(m: &Scalar, point: &AffinePoint) -> Result<AffinePoint, Curve4QError> {
    if !point.is_on_curve() {
        return Err(Curve4QError::PointNotOnCurve);
    }

    // Clear the cofactor; the product lands in the prime-order
    // subgroup where the endomorphism decomposition is valid.
    let p392 = point.to_extended().mul_by_cofactor();
    let q = p392.mul_endo(m).to_affine();

    if q.is_identity() {
        return Err(Curve4QError::NonContributory);
    }
    Ok(q)
}

/// Compute the 32-byte encoding of \\(\mathtt{sk} \cdot G\\) (more
/// precisely, of \\(\mathtt{sk} \cdot 392 G\\): the basepoint's
/// cofactor multiple is baked into the precomputed table).
///
/// # Errors
///
/// [`Curve4QError::NonContributory`] when the masked scalar is a
/// multiple of the subgroup order, so that the result would be the
/// neutral point.
pub fn scalar_base_mult(scalar: &[u8; 32]) -> Result<[u8; 32], Curve4QError> {
    let m = decode_scalar(scalar);
    let q = base_mult(&m);

    if q.is_identity() {
        return Err(Curve4QError::NonContributory);
    }
    Ok(q.compress().to_bytes())
}

/// Compute the 32-byte encoding of
/// \\(\mathtt{sk} \cdot 392 \cdot \mathtt{decode(peer)}\\).
///
/// # Errors
///
/// * [`Curve4QError::MalformedPoint`] if `peer` does not decode to a
///   curve point;
/// * [`Curve4QError::NonContributory`] if the exchange produces the
///   neutral point.
pub fn scalar_mult(scalar: &[u8; 32], peer: &[u8; 32]) -> Result<[u8; 32], Curve4QError> {
    let m = decode_scalar(scalar);
    let point = CompressedEdwardsY(*peer).decompress()?.to_affine();
    let q = dh_core(&m, &point)?;
    Ok(q.compress().to_bytes())
}

// ------------------------------------------------------------------------
// Typed keys
// ------------------------------------------------------------------------

/// A Diffie-Hellman public key: the wire encoding of a curve point.
///
/// Construction from bytes is lazy; validation happens when the key is
/// used in an exchange.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct PublicKey(pub(crate) CompressedEdwardsY);

impl From<[u8; 32]> for PublicKey {
    /// Given a byte array, construct a `PublicKey`.
    fn from(bytes: [u8; 32]) -> PublicKey {
        PublicKey(CompressedEdwardsY(bytes))
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl AsRef<[u8]> for PublicKey {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A short-lived Diffie-Hellman secret key that can only be used to
/// compute a single [`SharedSecret`].
///
/// The [`EphemeralSecret::diffie_hellman`] method consumes and then
/// wipes the secret key; ephemeral secrets can only be generated from
/// fresh randomness, so the compiler statically checks that they are
/// used at most once.
pub struct EphemeralSecret(pub(crate) [u8; 32]);

impl EphemeralSecret {
    /// Perform a Diffie-Hellman key agreement between `self` and
    /// `their_public` key to produce a [`SharedSecret`].
    ///
    /// # Errors
    ///
    /// Fails when the peer key is malformed, off-curve, or of low
    /// order ([`Curve4QError`]); a `SharedSecret` is only produced
    /// when the peer actually contributed to it.
    pub fn diffie_hellman(self, their_public: &PublicKey) -> Result<SharedSecret, Curve4QError> {
        scalar_mult(&self.0, their_public.as_bytes()).map(SharedSecret)
    }

    /// Generate a new [`EphemeralSecret`] with the supplied RNG.
    pub fn random_from_rng<R: CryptoRng + ?Sized>(csprng: &mut R) -> Self {
        // The secret key is random bytes; the wire mask is applied at
        // use time.
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);
        EphemeralSecret(bytes)
    }
}

impl<'a> From<&'a EphemeralSecret> for PublicKey {
    /// Given an [`EphemeralSecret`] key, compute its corresponding
    /// [`PublicKey`].
    fn from(secret: &'a EphemeralSecret) -> PublicKey {
        let m = decode_scalar(&secret.0);
        PublicKey(base_mult(&m).compress())
    }
}

impl Drop for EphemeralSecret {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for EphemeralSecret {}

/// A Diffie-Hellman secret key that can be used to compute multiple
/// [`SharedSecret`]s.
///
/// This type is identical to the [`EphemeralSecret`] type, except that
/// the [`StaticSecret::diffie_hellman`] method does not consume the
/// secret key, and the type provides serialization methods to save and
/// load key material.
///
/// # Warning
///
/// If you're uncertain about whether you should use this, then you
/// likely should not be using this.  Our strongly recommended advice is
/// to use [`EphemeralSecret`] at all times, as that type enforces
/// at compile-time that secret keys are never reused.
#[cfg(feature = "static_secrets")]
#[derive(Clone)]
pub struct StaticSecret([u8; 32]);

#[cfg(feature = "static_secrets")]
impl StaticSecret {
    /// Perform a Diffie-Hellman key agreement between `self` and
    /// `their_public` key to produce a [`SharedSecret`].
    ///
    /// # Errors
    ///
    /// As for [`EphemeralSecret::diffie_hellman`].
    pub fn diffie_hellman(&self, their_public: &PublicKey) -> Result<SharedSecret, Curve4QError> {
        scalar_mult(&self.0, their_public.as_bytes()).map(SharedSecret)
    }

    /// Generate a new [`StaticSecret`] with the supplied RNG.
    pub fn random_from_rng<R: CryptoRng + ?Sized>(csprng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);
        StaticSecret(bytes)
    }

    /// Extract this key's bytes for serialization.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

#[cfg(feature = "static_secrets")]
impl From<[u8; 32]> for StaticSecret {
    /// Load a secret key from a byte array.
    fn from(bytes: [u8; 32]) -> StaticSecret {
        StaticSecret(bytes)
    }
}

#[cfg(feature = "static_secrets")]
impl<'a> From<&'a StaticSecret> for PublicKey {
    /// Given a [`StaticSecret`] key, compute its corresponding
    /// [`PublicKey`].
    fn from(secret: &'a StaticSecret) -> PublicKey {
        let m = decode_scalar(&secret.0);
        PublicKey(base_mult(&m).compress())
    }
}

#[cfg(feature = "static_secrets")]
impl Drop for StaticSecret {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(all(feature = "static_secrets", feature = "zeroize"))]
impl ZeroizeOnDrop for StaticSecret {}

/// The result of a Diffie-Hellman key exchange.
///
/// Each party computes this using their secret key and their
/// counterparty's [`PublicKey`].  The neutral-point check has already
/// been applied: a `SharedSecret` is always a contributory secret.
pub struct SharedSecret(pub(crate) [u8; 32]);

impl SharedSecret {
    /// Convert this shared secret to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this shared secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SharedSecret {}
