//! Conditional enablement of objects and choices from accumulated progress.

use crate::core::command::{ChoiceView, ObjectView};
use crate::core::progress::Progress;
use crate::schema::choice::Choice;
use crate::schema::scene::Scene;

/// Compute the object list for a scene, marking already-inspected entries.
pub fn object_views(scene: &Scene, progress: &Progress) -> Vec<ObjectView> {
    scene
        .objects
        .iter()
        .map(|object| ObjectView {
            id: object.id.clone(),
            label: object.label.clone(),
            visited: progress.has_visited(&object.id),
        })
        .collect()
}

/// Why a choice is currently ineligible, as hint text. `None` means the
/// choice is eligible. When several requirements are unmet the last one's
/// hint wins.
pub fn lock_hint(choice: &Choice, progress: &Progress) -> Option<String> {
    let mut hint = None;
    if let Some(required) = choice.requires_visited_objects {
        if progress.visited_object_count() < required {
            hint = Some(choice.locked_hint.clone().unwrap_or_else(|| {
                format!("Explore at least {required} things first")
            }));
        }
    }
    if choice.requires_all_daughter_scenes && !progress.has_all_daughter_scenes() {
        hint = Some(
            choice
                .locked_hint
                .clone()
                .unwrap_or_else(|| "Listen to all of her stories before moving on".to_string()),
        );
    }
    hint
}

/// Compute the choice list for a scene with eligibility and hints.
pub fn choice_views(scene: &Scene, progress: &Progress) -> Vec<ChoiceView> {
    scene
        .choices
        .iter()
        .enumerate()
        .map(|(index, choice)| {
            let hint = lock_hint(choice, progress);
            ChoiceView {
                index,
                text: choice.text.clone(),
                style: choice.style,
                enabled: hint.is_none(),
                hint,
            }
        })
        .collect()
}
