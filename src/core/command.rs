//! Outbound commands: the engine-to-presentation contract.
//!
//! The engine never touches a rendering surface. Every operation returns an
//! ordered `Vec<Command>`; the host applies them in sequence to whatever it
//! draws with.

use serde::{Deserialize, Serialize};

use crate::schema::choice::ChoiceStyle;
use crate::schema::scene::ObjectId;

/// One interactive object as the presentation layer should render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub label: String,
    pub visited: bool,
}

/// One choice as the presentation layer should render it. An ineligible
/// choice stays visible but inert, with `hint` explaining the lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub index: usize,
    pub text: String,
    pub style: ChoiceStyle,
    pub enabled: bool,
    pub hint: Option<String>,
}

/// An instruction to the presentation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Begin the outward visual transition effect.
    FadeOut,
    /// Begin the inward visual transition effect.
    FadeIn,
    /// Set or clear the scene background.
    SetBackground(Option<String>),
    /// Set the chapter label; an empty string clears it.
    SetChapterLabel(String),
    /// Clear the text area, including appended object descriptions.
    ClearText,
    /// Replace the text area with the revealed prefix so far.
    RevealText(String),
    /// Append a block below the scene text; blocks accumulate.
    AppendText(String),
    /// Replace the interactive-object list.
    ShowObjects(Vec<ObjectView>),
    /// Replace the choice list.
    ShowChoices(Vec<ChoiceView>),
    ShowToast(String),
    HideToast,
    ShowThoughtPopup(String),
    HideThoughtPopup,
}
