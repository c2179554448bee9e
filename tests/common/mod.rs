//! Common test utilities for cs-sharecode integration tests

#[allow(dead_code)]
pub mod fixtures;
#[allow(dead_code)]
pub mod helper;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use helper::*;
