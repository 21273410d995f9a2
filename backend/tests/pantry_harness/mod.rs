//! Shared server harness and doubles for Pantrie end-to-end scenarios.

pub(crate) mod doubles;
pub(crate) mod harness;
mod recording_double_macro;
