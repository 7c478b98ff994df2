//! Controller layer: UI events, error classification, and command
//! dispatch from UI actions to the backend queue.

pub mod events;
pub mod orchestration;
