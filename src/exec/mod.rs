//! Execution control
//!
//! Blocking step execution and the classify/compile/link driver.

pub mod driver;
pub mod executor;
