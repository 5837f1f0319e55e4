//! # Narrative State
//!
//! The single source of truth for what a site visitor is looking at: the
//! selected service domain, lifecycle stage, focus layer, owning section and
//! scroll progress. This crate holds the state and its derivation rules and
//! does not contain any rendering logic.
//!
//! All writes go through [`reduce`]; [`NarrativeStore`] wraps it for a page
//! session and notifies subscribers so derived visuals can be recomputed.

pub mod domain;
pub mod environment;
pub mod reducer;
pub mod scroll;
pub mod state;
pub mod store;

pub use domain::*;
pub use environment::*;
pub use reducer::*;
pub use scroll::*;
pub use state::*;
pub use store::*;
