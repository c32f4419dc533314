// Presentation layer: the single-page dashboard.
// UI state is explicit (state.rs); handlers build it per request and render it.

pub mod download;
pub mod handlers;
pub mod notification;
pub mod render;
pub mod score;
pub mod state;
