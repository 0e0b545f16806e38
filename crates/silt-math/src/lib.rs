//! Dependency-free IEEE-754 rounding for freestanding Silt targets.
//!
//! The embedded GUI library floors glyph metrics and layout coordinates,
//! but the environments Silt targets ship no libm. This crate supplies a
//! bit-pattern [`floor`] that never calls a library math routine.
//!
//! # Representation
//!
//! Only the binary64 layout is supported: 1 sign bit, 11 exponent bits
//! biased by [`bits::EXPONENT_BIAS`], 52 mantissa bits. All inspection
//! goes through `f64::to_bits`, never a numeric cast.

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod bits;
pub mod floor;
mod volatile;

pub use floor::{floor, ifloor};
