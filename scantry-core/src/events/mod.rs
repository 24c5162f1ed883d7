//! Process-scoped scan notification channels.
//!
//! Both start empty at process startup and need no teardown beyond exit.
//! They are injected into the pipeline as explicit collaborators, never
//! reached for as ambient globals.

pub mod bus;
pub mod slot;

pub use bus::ScanEventBus;
pub use slot::LastScanSlot;
