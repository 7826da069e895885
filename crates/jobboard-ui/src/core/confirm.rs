//! Two-step confirmation for destructive actions.
//!
//! # Design
//! - `Idle -> Confirming(target) -> InFlight(target) -> Idle`.
//! - Cancelling is only possible before the request is issued.

/// Confirmation state for a destructive action on `T`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ConfirmFlow<T> {
    /// Nothing pending.
    #[default]
    Idle,
    /// Waiting for the user to confirm.
    Confirming(T),
    /// Request issued, awaiting the response.
    InFlight(T),
}

impl<T: Clone> ConfirmFlow<T> {
    /// Ask for confirmation; ignored unless idle.
    pub fn request(&mut self, target: T) -> bool {
        if matches!(self, Self::Idle) {
            *self = Self::Confirming(target);
            true
        } else {
            false
        }
    }

    /// Dismiss the prompt.
    pub fn cancel(&mut self) {
        if matches!(self, Self::Confirming(_)) {
            *self = Self::Idle;
        }
    }

    /// Accept the prompt and return the target to act on.
    pub fn confirm(&mut self) -> Option<T> {
        let Self::Confirming(target) = self else {
            return None;
        };
        let target = target.clone();
        *self = Self::InFlight(target.clone());
        Some(target)
    }

    /// Mark the request as finished.
    pub fn finish(&mut self) {
        if matches!(self, Self::InFlight(_)) {
            *self = Self::Idle;
        }
    }

    /// Target of the pending action.
    #[must_use]
    pub const fn target(&self) -> Option<&T> {
        match self {
            Self::Idle => None,
            Self::Confirming(target) | Self::InFlight(target) => Some(target),
        }
    }

    /// Whether the prompt is open.
    #[must_use]
    pub const fn is_confirming(&self) -> bool {
        matches!(self, Self::Confirming(_))
    }

    /// Whether the request is outstanding.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight(_))
    }
}

#[cfg(test)]
mod tests {
    use super::ConfirmFlow;

    #[test]
    fn full_cycle_returns_target_once() {
        let mut flow = ConfirmFlow::default();
        assert!(flow.request(42));
        assert!(flow.is_confirming());
        assert_eq!(flow.confirm(), Some(42));
        assert!(flow.is_in_flight());
        assert_eq!(flow.confirm(), None);
        flow.finish();
        assert_eq!(flow, ConfirmFlow::Idle);
    }

    #[test]
    fn cancel_only_applies_before_issue() {
        let mut flow = ConfirmFlow::default();
        flow.request("resume");
        flow.cancel();
        assert_eq!(flow, ConfirmFlow::Idle);

        flow.request("resume");
        flow.confirm();
        flow.cancel();
        assert!(flow.is_in_flight());
    }

    #[test]
    fn second_request_is_ignored_while_busy() {
        let mut flow = ConfirmFlow::default();
        flow.request(1);
        assert!(!flow.request(2));
        assert_eq!(flow.target(), Some(&1));
    }
}
