//! Core data types for memscope.
//!
//! Everything the inspector reads is located by an `Address`, and every
//! pointer it follows is decoded with the process's `PointerWidth`.

pub mod address;
