// Request shaping and the model boundary.
// Implements: input validation, prompt assembly, the analyzer seam, JSON API handlers.
// All model calls go through llm_client, never directly to the provider.

pub mod analyzer;
pub mod handlers;
pub mod input;
pub mod models;
pub mod prompts;
