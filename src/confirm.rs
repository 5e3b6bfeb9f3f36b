//! Countdown that keeps the delete button disabled for a few seconds after
//! the dialog opens.

use crate::money::Money;

pub const DELETE_DELAY_SECS: u32 = 5;

/// What the dialog shows about the record being deleted.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteTarget {
    pub id: i64,
    pub description: String,
    pub amount: Money,
    pub category_name: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Armed {
        target: DeleteTarget,
        remaining: u32,
    },
    Ready {
        target: DeleteTarget,
    },
}

impl DeleteConfirmation {
    /// Opens the dialog for `target`, restarting the countdown.
    pub fn arm(&mut self, target: DeleteTarget) {
        *self = DeleteConfirmation::Armed {
            target,
            remaining: DELETE_DELAY_SECS,
        };
    }

    /// One second passed.
    pub fn tick(&mut self) {
        if let DeleteConfirmation::Armed { target, remaining } = self {
            if *remaining > 1 {
                *remaining -= 1;
            } else {
                let target = target.clone();
                *self = DeleteConfirmation::Ready { target };
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    /// Hands out the target once the countdown finished and resets to idle.
    /// Does nothing while still counting down.
    pub fn take_confirmed(&mut self) -> Option<DeleteTarget> {
        match std::mem::take(self) {
            DeleteConfirmation::Ready { target } => Some(target),
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn target(&self) -> Option<&DeleteTarget> {
        match self {
            DeleteConfirmation::Idle => None,
            DeleteConfirmation::Armed { target, .. } | DeleteConfirmation::Ready { target } => {
                Some(target)
            }
        }
    }

    pub fn is_counting(&self) -> bool {
        matches!(self, DeleteConfirmation::Armed { .. })
    }

    pub fn can_confirm(&self) -> bool {
        matches!(self, DeleteConfirmation::Ready { .. })
    }

    pub fn remaining(&self) -> u32 {
        match self {
            DeleteConfirmation::Armed { remaining, .. } => *remaining,
            _ => 0,
        }
    }

    pub fn progress_percent(&self) -> u32 {
        self.remaining() * 100 / DELETE_DELAY_SECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> DeleteTarget {
        DeleteTarget {
            id: 17,
            description: "Coffee".to_string(),
            amount: Money::from_minor(25000),
            category_name: "Food".to_string(),
        }
    }

    #[test]
    fn becomes_ready_after_five_ticks() {
        let mut state = DeleteConfirmation::default();
        assert!(state.target().is_none());

        state.arm(target());
        assert_eq!(state.remaining(), 5);
        assert_eq!(state.progress_percent(), 100);
        assert!(!state.can_confirm());

        for expected in [4, 3, 2, 1] {
            state.tick();
            assert_eq!(state.remaining(), expected);
            assert!(!state.can_confirm());
        }
        state.tick();
        assert!(state.can_confirm());
        assert!(!state.is_counting());

        // stays enabled until something happens
        state.tick();
        state.tick();
        assert!(state.can_confirm());
        assert_eq!(state.target(), Some(&target()));
    }

    #[test]
    fn cancel_midway_clears_the_target() {
        let mut state = DeleteConfirmation::default();
        state.arm(target());
        state.tick();
        state.tick();
        assert_eq!(state.remaining(), 3);

        state.cancel();
        assert_eq!(state, DeleteConfirmation::Idle);
        assert_eq!(state.target(), None);
        assert_eq!(state.progress_percent(), 0);
    }

    #[test]
    fn confirm_before_ready_is_refused() {
        let mut state = DeleteConfirmation::default();
        assert_eq!(state.take_confirmed(), None);

        state.arm(target());
        state.tick();
        assert_eq!(state.take_confirmed(), None);
        assert_eq!(state.remaining(), 4);
    }

    #[test]
    fn confirm_when_ready_returns_to_idle() {
        let mut state = DeleteConfirmation::default();
        state.arm(target());
        for _ in 0..DELETE_DELAY_SECS {
            state.tick();
        }
        assert_eq!(state.take_confirmed(), Some(target()));
        assert_eq!(state, DeleteConfirmation::Idle);
    }

    #[test]
    fn rearming_restarts_the_countdown() {
        let mut state = DeleteConfirmation::default();
        state.arm(target());
        state.tick();
        let mut other = target();
        other.id = 18;
        state.arm(other.clone());
        assert_eq!(state.remaining(), 5);
        assert_eq!(state.target(), Some(&other));
    }

    #[test]
    fn tick_while_idle_is_ignored() {
        let mut state = DeleteConfirmation::default();
        state.tick();
        assert_eq!(state, DeleteConfirmation::Idle);
    }
}
