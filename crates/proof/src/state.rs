use std::fmt;

use momoka_primitives::ProofError;

/// Progress of one publication through the pipeline.
///
/// Stages only move forward, one at a time. Any non-terminal state may jump
/// to [`Rejected`](Self::Rejected).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    Pending,
    PointerChecked,
    TimestampChecked,
    SignatureRecovered,
    Authorized,
    EventCrossChecked,
    Simulated,
    Accepted,
    Rejected(ProofError),
}

impl VerificationState {
    /// Successor on the happy path, `None` for terminal states.
    pub fn next(&self) -> Option<Self> {
        use VerificationState::*;
        Some(match self {
            Pending => PointerChecked,
            PointerChecked => TimestampChecked,
            TimestampChecked => SignatureRecovered,
            SignatureRecovered => Authorized,
            Authorized => EventCrossChecked,
            EventCrossChecked => Simulated,
            Simulated => Accepted,
            Accepted | Rejected(_) => return None,
        })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected(_))
    }

    /// Whether moving to `to` is a legal transition.
    pub fn can_transition_to(&self, to: &Self) -> bool {
        match to {
            Self::Rejected(_) => !self.is_terminal(),
            _ => self.next().as_ref() == Some(to),
        }
    }
}

impl fmt::Display for VerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("PENDING"),
            Self::PointerChecked => f.write_str("POINTER_CHECKED"),
            Self::TimestampChecked => f.write_str("TIMESTAMP_CHECKED"),
            Self::SignatureRecovered => f.write_str("SIGNATURE_RECOVERED"),
            Self::Authorized => f.write_str("AUTHORIZED"),
            Self::EventCrossChecked => f.write_str("EVENT_CROSSCHECKED"),
            Self::Simulated => f.write_str("SIMULATED"),
            Self::Accepted => f.write_str("ACCEPTED"),
            Self::Rejected(e) => write!(f, "REJECTED({})", e.code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_reaches_accepted() {
        let mut state = VerificationState::Pending;
        let mut steps = 0;
        while let Some(next) = state.next() {
            assert!(state.can_transition_to(&next));
            state = next;
            steps += 1;
        }
        assert_eq!(state, VerificationState::Accepted);
        assert_eq!(steps, 7);
    }

    #[test]
    fn test_no_skipping_or_leaving_terminal() {
        let rejected = VerificationState::Rejected(ProofError::EventMismatch);
        assert!(!VerificationState::Pending.can_transition_to(&VerificationState::Authorized));
        assert!(VerificationState::Simulated.can_transition_to(&rejected));
        assert!(!VerificationState::Accepted.can_transition_to(&rejected));
        assert!(!rejected.can_transition_to(&VerificationState::Pending));
    }

    #[test]
    fn test_display_uses_stage_names() {
        assert_eq!(
            VerificationState::EventCrossChecked.to_string(),
            "EVENT_CROSSCHECKED"
        );
        assert_eq!(
            VerificationState::Rejected(ProofError::SimulationFailed).to_string(),
            "REJECTED(SIMULATION_FAILED)"
        );
    }
}
