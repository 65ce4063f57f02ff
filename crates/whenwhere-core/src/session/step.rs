//! Step state for the linear session flow.

use serde::{Deserialize, Serialize};

/// Position 1, 2, or 3 in the randomized presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(u8);

impl Slot {
    pub const FIRST: Slot = Slot(1);

    /// Constructs a slot, rejecting anything outside 1..=3.
    pub fn new(number: u8) -> Option<Slot> {
        (1..=3).contains(&number).then_some(Slot(number))
    }

    /// One-based slot number, for "Experience N of 3" copy.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based index into the session's [`ExperienceOrder`].
    ///
    /// [`ExperienceOrder`]: crate::experience::ExperienceOrder
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The following slot, or `None` after the third.
    pub fn next(self) -> Option<Slot> {
        Slot::new(self.0 + 1)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The screen currently showing. Exactly one step is current at any
/// time; transitions across major steps are strictly forward. The
/// survey's internal back/forward navigation is a nested sub-state of
/// the survey component and does not appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepState {
    /// Welcome/consent form collecting participant identity.
    Welcome,
    /// Intro screen before the experience in `slot`.
    Intro { slot: Slot },
    /// The experience running in `slot`.
    Experience { slot: Slot },
    /// Four-page follow-up survey.
    Survey,
    /// Terminal thank-you screen.
    Thanks,
}

impl StepState {
    /// The next step in the fixed forward chain, or `None` when the
    /// current step has no unconditional successor (Welcome requires
    /// identity submission; Thanks is terminal).
    pub(crate) fn successor(self) -> Option<StepState> {
        match self {
            StepState::Welcome => None,
            StepState::Intro { slot } => Some(StepState::Experience { slot }),
            StepState::Experience { slot } => Some(match slot.next() {
                Some(next) => StepState::Intro { slot: next },
                None => StepState::Survey,
            }),
            StepState::Survey => Some(StepState::Thanks),
            StepState::Thanks => None,
        }
    }

    /// The slot this step presents, if it is an intro or experience step.
    pub fn slot(&self) -> Option<Slot> {
        match self {
            StepState::Intro { slot } | StepState::Experience { slot } => Some(*slot),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StepState::Thanks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_bounds() {
        assert!(Slot::new(0).is_none());
        assert!(Slot::new(4).is_none());
        assert_eq!(Slot::new(2).unwrap().index(), 1);
        assert_eq!(Slot::new(3).unwrap().next(), None);
    }

    #[test]
    fn test_successor_chain_is_linear() {
        let mut step = StepState::Intro { slot: Slot::FIRST };
        let mut visited = vec![step];
        while let Some(next) = step.successor() {
            step = next;
            visited.push(step);
        }
        assert_eq!(
            visited,
            vec![
                StepState::Intro { slot: Slot::new(1).unwrap() },
                StepState::Experience { slot: Slot::new(1).unwrap() },
                StepState::Intro { slot: Slot::new(2).unwrap() },
                StepState::Experience { slot: Slot::new(2).unwrap() },
                StepState::Intro { slot: Slot::new(3).unwrap() },
                StepState::Experience { slot: Slot::new(3).unwrap() },
                StepState::Survey,
                StepState::Thanks,
            ]
        );
    }

    #[test]
    fn test_welcome_and_thanks_have_no_successor() {
        assert_eq!(StepState::Welcome.successor(), None);
        assert_eq!(StepState::Thanks.successor(), None);
    }
}
