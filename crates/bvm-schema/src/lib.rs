//! Shared types for bvm.
//!
//! Everything in this crate is plain data: version numbers, release lines,
//! target platforms and digests. Network and filesystem work lives in
//! `bvm-core`.

pub mod hash;
pub mod platform;
pub mod release;
pub mod version;

// Re-exports
pub use hash::*;
pub use platform::*;
pub use release::*;
pub use version::*;

/// Name of the product whose releases are managed.
pub const PRODUCT: &str = "blender";
