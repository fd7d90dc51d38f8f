//! Flutter-facing FFI crate for the BMI tracker core.

pub mod api;
