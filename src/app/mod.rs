//! Application core: control orchestration with zero I/O.
//!
//! The fan/lid control path and the stirrer duty cycle live here as two
//! independent services.  All interaction with the outside world happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without a broker or a device.

pub mod events;
pub mod ports;
pub mod service;
