//! The scene transition controller and the engine facade.
//!
//! Logical time is host-driven: the host calls [`Engine::advance`] with
//! elapsed milliseconds and the engine steps its clock through every armed
//! deadline in order, so one large advance is observationally identical to
//! many small ones. All player input arrives through the `click_*` and
//! `skip_reveal`/`dismiss_thought` operations; invalid input degrades to a
//! no-op, never an error.

use tracing::debug;

use crate::core::command::Command;
use crate::core::gate;
use crate::core::notices::{ThoughtPopup, Toast};
use crate::core::progress::Progress;
use crate::core::typewriter::{Reveal, Typewriter};
use crate::schema::choice::ChoiceTarget;
use crate::schema::scene::ObjectId;
use crate::schema::story::{SceneId, Story};

/// Delay before the scene swap on a non-immediate transition.
const TRANSITION_OUT_MS: u64 = 260;

/// Delay after the swap before transitions unlock.
const TRANSITION_SETTLE_MS: u64 = 300;

/// The wrong bus answer surfaces a toast instead of consequences of its own.
const WRONG_TURN_SCENE: &str = "2.1_wrong";
const WRONG_TURN_TOAST: &str = "Это решение ни на что не повлияет";

/// Transition lifecycle. Anything but `Idle` locks out new requests;
/// requests arriving meanwhile are dropped, never queued.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TransitionState {
    Idle,
    /// Outward effect running; the swap fires at `swap_at`.
    FadeOut { target: SceneId, swap_at: u64 },
    /// Inward effect running; the guard clears at `unlock_at`.
    FadeIn { unlock_at: u64 },
}

/// The scene playback engine.
///
/// Owns the story graph, the player progress record, and the three deferred
/// schedulers (text reveal, toast, thought popup). Single-threaded and
/// timer-driven; there is no async runtime and no wall-clock access.
pub struct Engine {
    story: Story,
    progress: Progress,
    transition: TransitionState,
    typewriter: Typewriter,
    toast: Toast,
    thought: ThoughtPopup,
    now: u64,
}

impl Engine {
    /// Build an engine over a fully formed story graph. Nothing plays until
    /// [`Engine::start`].
    pub fn new(story: Story) -> Self {
        let progress = Progress::new(story.first_scene.clone());
        Self {
            story,
            progress,
            transition: TransitionState::Idle,
            typewriter: Typewriter::new(),
            toast: Toast::new(),
            thought: ThoughtPopup::new(),
            now: 0,
        }
    }

    /// Reset progress and play the story's first scene immediately. Also
    /// serves as the in-place restart.
    pub fn start(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        self.transition = TransitionState::Idle;
        self.typewriter.cancel();
        self.progress.reset(self.story.first_scene.clone());
        let first = self.story.first_scene.clone();
        self.begin_transition(first, true, &mut out);
        self.drain_due(&mut out);
        out
    }

    /// Advance the clock by `dt` milliseconds, firing every deadline that
    /// falls inside the window, each at its exact due time.
    pub fn advance(&mut self, dt: u64) -> Vec<Command> {
        let mut out = Vec::new();
        let end = self.now.saturating_add(dt);
        while let Some(at) = self.next_deadline().filter(|&at| at <= end) {
            self.now = self.now.max(at);
            self.fire_due(&mut out);
        }
        self.now = end;
        out
    }

    /// Request a transition to `target`. Unknown scenes and requests made
    /// while another transition is in flight are dropped.
    pub fn request_transition(&mut self, target: &SceneId, immediate: bool) -> Vec<Command> {
        let mut out = Vec::new();
        self.begin_transition(target.clone(), immediate, &mut out);
        self.drain_due(&mut out);
        out
    }

    /// Player clicked inside the text region while text was revealing:
    /// finish the reveal instantly and build the dependent UI.
    pub fn skip_reveal(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        if self.typewriter.skip_to_end() {
            out.push(Command::RevealText(self.typewriter.full_text().to_string()));
            self.settle_scene(&mut out);
        }
        out
    }

    /// Player clicked an interactive object of the current scene.
    pub fn click_object(&mut self, id: &ObjectId) -> Vec<Command> {
        let mut out = Vec::new();
        if !self.typewriter.is_done() {
            // The object list only exists once the reveal has settled.
            return out;
        }
        let Some(scene) = self.story.scene(self.progress.current_scene()) else {
            return out;
        };
        let Some(object) = scene.objects.iter().find(|object| &object.id == id) else {
            return out;
        };
        self.progress.mark_object_visited(id);
        out.push(Command::AppendText(object.description.clone()));
        out.push(Command::ShowObjects(gate::object_views(scene, &self.progress)));
        out.push(Command::ShowChoices(gate::choice_views(scene, &self.progress)));
        out
    }

    /// Player clicked choice `index` of the current scene. Dropped while
    /// revealing or transitioning; locked choices are inert.
    pub fn click_choice(&mut self, index: usize) -> Vec<Command> {
        let mut out = Vec::new();
        if self.transition != TransitionState::Idle || self.typewriter.is_revealing() {
            return out;
        }
        let target = {
            let Some(scene) = self.story.scene(self.progress.current_scene()) else {
                return out;
            };
            let Some(choice) = scene.choices.get(index) else {
                return out;
            };
            if gate::lock_hint(choice, &self.progress).is_some() {
                return out;
            }
            choice.target.clone()
        };
        match target {
            ChoiceTarget::Restart => {
                let first = self.story.first_scene.clone();
                self.progress.reset(first.clone());
                self.begin_transition(first, false, &mut out);
            }
            ChoiceTarget::Scene(next) => {
                self.begin_transition(next, false, &mut out);
            }
        }
        self.drain_due(&mut out);
        out
    }

    /// Player dismissed the thought popup.
    pub fn dismiss_thought(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        if self.thought.hide() {
            out.push(Command::HideThoughtPopup);
        }
        out
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn current_scene(&self) -> &SceneId {
        self.progress.current_scene()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition != TransitionState::Idle
    }

    pub fn is_revealing(&self) -> bool {
        self.typewriter.is_revealing()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    fn begin_transition(&mut self, target: SceneId, immediate: bool, out: &mut Vec<Command>) {
        if !self.story.contains(&target) {
            debug!(scene = %target, "transition dropped: unknown scene");
            return;
        }
        if self.transition != TransitionState::Idle {
            debug!(scene = %target, "transition dropped: already transitioning");
            return;
        }
        let delay = if immediate { 0 } else { TRANSITION_OUT_MS };
        out.push(Command::FadeOut);
        self.transition = TransitionState::FadeOut {
            target,
            swap_at: self.now + delay,
        };
    }

    /// Earliest armed deadline across the transition and the three
    /// schedulers.
    fn next_deadline(&self) -> Option<u64> {
        let transition = match &self.transition {
            TransitionState::Idle => None,
            TransitionState::FadeOut { swap_at, .. } => Some(*swap_at),
            TransitionState::FadeIn { unlock_at } => Some(*unlock_at),
        };
        [
            transition,
            self.typewriter.next_tick(),
            self.toast.hide_deadline(),
            self.thought.show_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Fire everything due at the current clock value.
    fn fire_due(&mut self, out: &mut Vec<Command>) {
        match self.transition.clone() {
            TransitionState::FadeOut { target, swap_at } if swap_at <= self.now => {
                self.swap_scene(target, out);
            }
            TransitionState::FadeIn { unlock_at } if unlock_at <= self.now => {
                self.transition = TransitionState::Idle;
            }
            _ => {}
        }
        self.reveal_step(out);
        if self.toast.advance(self.now) {
            out.push(Command::HideToast);
        }
        if let Some(text) = self.thought.advance(self.now) {
            out.push(Command::ShowThoughtPopup(text));
        }
    }

    /// Fire deadlines already due at the current instant, without moving the
    /// clock. Input handlers call this so an immediate transition swaps in
    /// the same operation that requested it.
    fn drain_due(&mut self, out: &mut Vec<Command>) {
        while self.next_deadline().is_some_and(|at| at <= self.now) {
            self.fire_due(out);
        }
    }

    fn reveal_step(&mut self, out: &mut Vec<Command>) {
        match self.typewriter.advance(self.now) {
            Reveal::Grew => {
                out.push(Command::RevealText(self.typewriter.partial().to_string()));
            }
            Reveal::Finished => {
                out.push(Command::RevealText(self.typewriter.full_text().to_string()));
                self.settle_scene(out);
            }
            Reveal::Unchanged => {}
        }
    }

    /// The post-delay half of a transition: move the pointer, apply the
    /// destination's effects, rebuild the surface, start the reveal.
    fn swap_scene(&mut self, target: SceneId, out: &mut Vec<Command>) {
        let Some(scene) = self.story.scene(&target) else {
            // Validated at request time; a miss now just drops the transition.
            self.transition = TransitionState::Idle;
            return;
        };
        debug!(scene = %target, "scene swap");

        self.progress.enter_scene(&target);

        if target.as_str() == WRONG_TURN_SCENE {
            self.toast.show(WRONG_TURN_TOAST, self.now);
            out.push(Command::ShowToast(WRONG_TURN_TOAST.to_string()));
        } else if self.toast.hide() {
            out.push(Command::HideToast);
        }

        // A popup armed by the previous scene must never fire into this one.
        if self.thought.hide() {
            out.push(Command::HideThoughtPopup);
        }

        self.progress.apply_effects(&scene.effects);

        out.push(Command::SetBackground(scene.background.clone()));
        out.push(Command::SetChapterLabel(
            scene.chapter.clone().unwrap_or_default(),
        ));
        out.push(Command::ClearText);

        let text = scene.text.resolve(self.progress.perspective()).to_string();
        self.typewriter.start(text, self.now);
        // The first character (and, for empty text, the whole settle path)
        // lands before the inward effect, matching the render order.
        self.reveal_step(out);

        out.push(Command::FadeIn);
        self.transition = TransitionState::FadeIn {
            unlock_at: self.now + TRANSITION_SETTLE_MS,
        };
    }

    /// Reveal completion: build objects and choices, then schedule the
    /// thought popup. Runs exactly once per scene, for natural and skipped
    /// reveals alike.
    fn settle_scene(&mut self, out: &mut Vec<Command>) {
        let Some(scene) = self.story.scene(self.progress.current_scene()) else {
            return;
        };
        out.push(Command::ShowObjects(gate::object_views(scene, &self.progress)));
        out.push(Command::ShowChoices(gate::choice_views(scene, &self.progress)));
        if self.thought.schedule(scene.thought_popup.as_deref(), self.now) {
            out.push(Command::HideThoughtPopup);
        }
    }
}
