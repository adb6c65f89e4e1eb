// -*- mode: rust; -*-
//
// This file is part of curve4q-dalek.
// Copyright (c) 2017-2021 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Errors which may occur when parsing points or performing key
//! agreement.
//!
//! All failures surface at the public API boundary; the arithmetic
//! layers themselves are total and never error.

use core::fmt;
use core::fmt::Display;

/// Errors produced while decoding wire-format points and running the
/// Diffie-Hellman operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Curve4QError {
    /// The 32-byte point encoding was rejected: the reserved bit was
    /// set, the decoded coordinate had no square root, or the decoded
    /// point failed the curve equation.
    MalformedPoint,
    /// A point supplied directly (not through the decoder) does not
    /// satisfy the curve equation.
    PointNotOnCurve,
    /// The key exchange produced the neutral point, i.e. the peer
    /// supplied a low-order point and did not contribute to the shared
    /// secret.
    NonContributory,
}

impl Display for Curve4QError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Curve4QError::MalformedPoint => write!(f, "Cannot decode point from wire format"),
            Curve4QError::PointNotOnCurve => write!(f, "Point is not on the curve"),
            Curve4QError::NonContributory => {
                write!(f, "Key exchange produced the neutral point")
            }
        }
    }
}

impl core::error::Error for Curve4QError {}
