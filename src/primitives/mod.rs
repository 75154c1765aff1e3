//! Fixed-size multiprecision building blocks.
//!
//! This module provides the limb-vector arithmetic the field and scalar
//! layers are built on: carry-propagating addition and subtraction,
//! schoolbook multiplication, shifts, and constant-time selection,
//! comparison and swapping.
//!
//! All routines operate on little-endian `u64` limb slices owned by the
//! caller. Lengths are runtime values but always derive from public curve
//! parameters, never from secret data, so iteration counts are public.
//!
//! Routines that branch on their operands carry a `_var` suffix and must
//! only see public inputs. Everything else is branch-free and safe for
//! secret material.

mod core;

pub(crate) use core::*;
