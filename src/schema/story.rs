//! The story container: scene map, first-scene designation, RON loading.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::scene::Scene;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Newtype wrapper for scene ids. Ids are hierarchical strings whose first
/// dot-segment encodes the chapter, e.g. "2.1_wrong".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort chapter number: the leading decimal digits of the first
    /// dot-segment. "2.1_wrong" parses as 2 and "3_final" as 3; ids with no
    /// leading digit have no chapter number.
    pub fn chapter_number(&self) -> Option<u32> {
        let segment = self.0.split('.').next().unwrap_or("");
        let end = segment
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(segment.len());
        if end == 0 {
            return None;
        }
        segment[..end].parse().ok()
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The full story graph: an immutable mapping from scene id to scene, plus
/// the designated first scene.
///
/// The graph is supplied fully formed and read-only. The engine performs no
/// validation beyond id existence at transition time; a dangling reference
/// degrades to a dropped transition, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub first_scene: SceneId,
    pub scenes: FxHashMap<SceneId, Scene>,
}

impl Story {
    pub fn scene(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    pub fn contains(&self, id: &SceneId) -> bool {
        self.scenes.contains_key(id)
    }

    /// Load a story from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Story, StoryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a story from a RON string.
    pub fn parse_ron(input: &str) -> Result<Story, StoryError> {
        Ok(ron::from_str(input)?)
    }
}
