//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `bmitrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny CLI probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("bmitrack_core ping={}", bmitrack_core::ping());
    println!("bmitrack_core version={}", bmitrack_core::core_version());
}
