//! Follow-up scheduling for animated window changes.
//!
//! A year-window change is drawn as a slide between two layouts. Once the
//! slide ends, a full refresh settles the chart. At most one follow-up is ever
//! pending: starting another transition replaces it instead of queueing.

use crate::view::RefreshKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Transitioning {
        pending: RefreshKind,
    },
}

impl TransitionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TransitionState::Idle)
    }

    pub fn pending(&self) -> Option<RefreshKind> {
        match self {
            TransitionState::Idle => None,
            TransitionState::Transitioning { pending } => Some(*pending),
        }
    }

    /// Enter `Transitioning` with `continuation`, returning the follow-up it replaced.
    pub fn begin(&mut self, continuation: RefreshKind) -> Option<RefreshKind> {
        let replaced = self.pending();
        if let Some(old) = replaced {
            log::debug!("transition restarted, dropping pending {old:?}");
        }
        *self = TransitionState::Transitioning {
            pending: continuation,
        };
        replaced
    }

    /// The transition finished: hand back its follow-up and go idle.
    pub fn complete(&mut self) -> Option<RefreshKind> {
        std::mem::take(self).pending()
    }

    /// Drop the pending follow-up without running it.
    pub fn cancel(&mut self) {
        *self = TransitionState::Idle;
    }
}
