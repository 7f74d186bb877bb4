//! The story graph data model: scenes, choices, and the story container.
//!
//! Everything here is immutable at runtime. The graph is supplied fully
//! formed (typically from a RON asset) and the engine only reads it.

pub mod choice;
pub mod scene;
pub mod story;
