//! Integration test crate for the SMPTE timecode workspace.
//!
//! This crate exists solely to hold scenario tests that run parsing,
//! conversion and arithmetic together through the public API.

#[cfg(test)]
mod arithmetic;

#[cfg(test)]
mod conversions;

#[cfg(test)]
mod interop;
