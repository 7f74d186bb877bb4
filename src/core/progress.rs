//! Player progress: the single mutable record of a playthrough.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::schema::scene::{ObjectId, Perspective, SceneEffects};
use crate::schema::story::SceneId;

/// The four named daughter scenes whose completion gates the late-story
/// choice.
pub const DAUGHTER_SCENES: [&str; 4] = ["shrimp", "bunny", "monkey", "psycho"];

/// A dynamic value storable in the progress flag map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

/// Accumulated player state for one playthrough.
///
/// Created once at engine start, reset in place on restart, never destroyed
/// mid-session. Mutated only through the methods below: the transition
/// controller applies scene effects and moves the pointer, the interaction
/// gate marks objects visited.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    chapter: u32,
    perspective: Option<Perspective>,
    visited_objects: FxHashSet<ObjectId>,
    daughter_scenes: FxHashSet<String>,
    flags: FxHashMap<String, Value>,
    current_scene: SceneId,
}

impl Progress {
    pub fn new(first_scene: SceneId) -> Self {
        Self {
            chapter: 1,
            perspective: None,
            visited_objects: FxHashSet::default(),
            daughter_scenes: FxHashSet::default(),
            flags: FxHashMap::default(),
            current_scene: first_scene,
        }
    }

    /// Reset to the start-of-playthrough defaults.
    pub fn reset(&mut self, first_scene: SceneId) {
        *self = Self::new(first_scene);
    }

    /// Move the current-scene pointer and derive the chapter number from the
    /// id prefix. A prefix that does not parse keeps the previous chapter.
    pub fn enter_scene(&mut self, id: &SceneId) {
        self.current_scene = id.clone();
        if let Some(chapter) = id.chapter_number() {
            self.chapter = chapter;
        }
    }

    /// Apply a scene's state-effect directives.
    pub fn apply_effects(&mut self, effects: &SceneEffects) {
        if let Some(perspective) = &effects.set_perspective {
            self.perspective = Some(perspective.clone());
        }
        if let Some(object) = &effects.mark_object_visited {
            self.visited_objects.insert(object.clone());
        }
        if let Some(scene) = &effects.register_daughter_scene {
            self.daughter_scenes.insert(scene.clone());
        }
    }

    /// Record an object as inspected. Returns false when it was already
    /// visited; the set never holds duplicates.
    pub fn mark_object_visited(&mut self, id: &ObjectId) -> bool {
        self.visited_objects.insert(id.clone())
    }

    pub fn has_visited(&self, id: &ObjectId) -> bool {
        self.visited_objects.contains(id)
    }

    pub fn visited_object_count(&self) -> usize {
        self.visited_objects.len()
    }

    /// True once every daughter scene in [`DAUGHTER_SCENES`] has been
    /// encountered, in any order.
    pub fn has_all_daughter_scenes(&self) -> bool {
        DAUGHTER_SCENES
            .iter()
            .all(|name| self.daughter_scenes.contains(*name))
    }

    /// Reserved extension surface; nothing in the engine reads flags yet.
    pub fn set_flag(&mut self, name: impl Into<String>, value: Value) {
        self.flags.insert(name.into(), value);
    }

    pub fn flag(&self, name: &str) -> Option<&Value> {
        self.flags.get(name)
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    pub fn perspective(&self) -> Option<&Perspective> {
        self.perspective.as_ref()
    }

    pub fn current_scene(&self) -> &SceneId {
        &self.current_scene
    }

    pub fn visited_objects(&self) -> &FxHashSet<ObjectId> {
        &self.visited_objects
    }

    pub fn daughter_scenes(&self) -> &FxHashSet<String> {
        &self.daughter_scenes
    }
}
