//! Choice records: the edges of the story graph.

use serde::{Deserialize, Serialize};

use super::story::SceneId;

/// Where a choice leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceTarget {
    /// Transition to the named scene.
    Scene(SceneId),
    /// Reset player progress and return to the story's first scene.
    Restart,
}

/// Visual style tag for a choice affordance. The engine passes it through
/// unchanged for the presentation layer to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceStyle {
    Primary,
    Secondary,
}

impl Default for ChoiceStyle {
    fn default() -> Self {
        Self::Primary
    }
}

/// Semantic tag on a choice. Carries narrative/analytics meaning only; all
/// kinds resolve through the identical transition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceKind {
    Neutral,
    /// A wrong answer that loops back without branching.
    Wrong,
    /// The correct answer that moves the story forward.
    Correct,
}

impl Default for ChoiceKind {
    fn default() -> Self {
        Self::Neutral
    }
}

/// One selectable choice within a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default = "default_choice_text")]
    pub text: String,
    pub target: ChoiceTarget,
    #[serde(default)]
    pub style: ChoiceStyle,
    #[serde(default)]
    pub kind: ChoiceKind,
    /// Ineligible until this many distinct objects have been inspected.
    #[serde(default)]
    pub requires_visited_objects: Option<usize>,
    /// Ineligible until all four daughter scenes have been encountered.
    #[serde(default)]
    pub requires_all_daughter_scenes: bool,
    /// Hint shown while the choice is ineligible, overriding the built-in
    /// phrasing for its unmet requirement.
    #[serde(default)]
    pub locked_hint: Option<String>,
}

fn default_choice_text() -> String {
    "Continue".to_string()
}
