//! Weak pointer behaviour driven through full draw and measure passes.

mod expansion;
mod resolution;
