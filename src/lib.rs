//! Normalization, grouping, filtering and search over static-analysis
//! violation reports.
//!
//! Data flows one way: decoded text goes through [`normalize::normalize`],
//! the records are narrowed by [`filter`], arranged by [`grouping`], and
//! described for display by [`view`]. [`state::ViewState`] ties the stages
//! together as an immutable value the caller keeps between interactions.

pub mod acquire;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod filter;
pub mod grouping;
pub mod normalize;
pub mod render;
pub mod state;
pub mod types;
pub mod view;

pub use normalize::{normalize, Normalized, Payload};
pub use state::{DisplayOutput, ViewModel, ViewState};
