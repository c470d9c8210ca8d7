//! IO modules - side effects (network, filesystem)

pub mod dmg;
pub mod download;
pub mod extract;
pub mod verify;
