//! Auto-expiring overlays: transient toasts and delayed thought popups.
//!
//! Each scheduler owns at most one pending deadline and disarms it before
//! re-arming, so a superseded notice can never fire into a later scene.

/// How long a toast stays visible.
pub const TOAST_DURATION_MS: u64 = 2500;

/// Delay between scene settle and the thought popup appearing.
pub const THOUGHT_DELAY_MS: u64 = 1000;

/// A transient, auto-hiding notification line.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    message: Option<String>,
    hide_at: Option<u64>,
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` and arm the auto-hide timer. Showing while already
    /// visible restarts the full duration.
    pub fn show(&mut self, message: impl Into<String>, now: u64) {
        self.message = Some(message.into());
        self.hide_at = Some(now + TOAST_DURATION_MS);
    }

    /// Hide immediately and disarm the timer. Returns true when a toast was
    /// actually visible.
    pub fn hide(&mut self) -> bool {
        self.hide_at = None;
        self.message.take().is_some()
    }

    /// Expire the toast once its deadline passes. Returns true when it hid.
    pub fn advance(&mut self, now: u64) -> bool {
        if self.hide_at.is_some_and(|at| at <= now) {
            self.hide()
        } else {
            false
        }
    }

    pub fn visible(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hide_deadline(&self) -> Option<u64> {
        self.hide_at
    }
}

#[derive(Debug, Clone)]
struct PendingThought {
    text: String,
    show_at: u64,
}

/// A delayed one-shot popup for a scene's inner-voice text.
#[derive(Debug, Clone, Default)]
pub struct ThoughtPopup {
    pending: Option<PendingThought>,
    visible: Option<String>,
}

impl ThoughtPopup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever the previous scene left behind, then arm the popup
    /// for `text` if the new scene declares one. Called unconditionally on
    /// every scene settle. Returns true when a visible popup was hidden.
    pub fn schedule(&mut self, text: Option<&str>, now: u64) -> bool {
        let was_visible = self.hide();
        if let Some(text) = text {
            self.pending = Some(PendingThought {
                text: text.to_string(),
                show_at: now + THOUGHT_DELAY_MS,
            });
        }
        was_visible
    }

    /// Cancel any pending popup and hide a visible one. Returns true when a
    /// popup was actually visible.
    pub fn hide(&mut self) -> bool {
        self.pending = None;
        self.visible.take().is_some()
    }

    /// Surface the popup once its delay elapses, returning the text to show.
    pub fn advance(&mut self, now: u64) -> Option<String> {
        if !matches!(&self.pending, Some(p) if p.show_at <= now) {
            return None;
        }
        let pending = self.pending.take()?;
        self.visible = Some(pending.text.clone());
        Some(pending.text)
    }

    pub fn visible(&self) -> Option<&str> {
        self.visible.as_deref()
    }

    pub fn show_deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.show_at)
    }
}
