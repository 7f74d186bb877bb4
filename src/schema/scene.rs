//! Scene records: the nodes of the story graph.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::choice::Choice;

/// Newtype wrapper for interactive-object ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A narrative viewpoint mode, e.g. "boy". Scenes may carry text variants
/// keyed by perspective; progress holds at most one active perspective.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Perspective(pub String);

impl Perspective {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Scene display text: a single string, or perspective-keyed variants with
/// a mandatory default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneText {
    Plain(String),
    ByPerspective {
        default: String,
        #[serde(default)]
        variants: FxHashMap<Perspective, String>,
    },
}

impl SceneText {
    /// The text shown under the given active perspective. Falls back to the
    /// default when no perspective is active or no variant matches.
    pub fn resolve(&self, perspective: Option<&Perspective>) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::ByPerspective { default, variants } => perspective
                .and_then(|p| variants.get(p))
                .map(String::as_str)
                .unwrap_or(default),
        }
    }
}

/// A clickable in-scene object. Inspecting it appends `description` below
/// the scene text and marks the id visited in player progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveObject {
    pub id: ObjectId,
    pub label: String,
    pub description: String,
}

/// State-effect directives applied to player progress when a scene is
/// entered. Each directive is explicitly present or absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneEffects {
    /// Overwrites the active perspective.
    #[serde(default)]
    pub set_perspective: Option<Perspective>,
    /// Adds the object to the visited set if absent.
    #[serde(default)]
    pub mark_object_visited: Option<ObjectId>,
    /// Adds the named daughter scene to the encountered set if absent.
    #[serde(default)]
    pub register_daughter_scene: Option<String>,
}

/// One node of the story graph: the unit of display and transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub text: SceneText,
    /// Chapter label shown above the text; absent means the label clears.
    #[serde(default)]
    pub chapter: Option<String>,
    /// Background reference; absent means no background.
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub objects: Vec<InteractiveObject>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub effects: SceneEffects,
    /// Inner-voice text surfaced as a delayed popup after the scene settles.
    #[serde(default)]
    pub thought_popup: Option<String>,
}
