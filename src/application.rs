//! Application layer: pipeline orchestration.

pub mod lifecycle;

pub use lifecycle::PageLifecycleController;
