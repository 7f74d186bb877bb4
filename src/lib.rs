//! Scene Engine: scene playback for branching visual novels.
//!
//! Walks a static story graph, reveals each scene's text with a timed
//! character-by-character effect, gates interactive objects and choices on
//! accumulated player progress, and sequences guarded, timed transitions
//! between scenes. The engine is presentation-agnostic: every operation
//! returns the ordered commands a host must apply to its surface.

pub mod core;
pub mod schema;
