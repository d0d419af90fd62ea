use super::physics::Transition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollDirection {
    Inward,
    Outward,
}

/// Roll memory carried across a scan: the direction of the last same-hand
/// transition, if it was a roll. The memory is shared by both hands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlowState {
    last_roll: Option<RollDirection>,
}

impl FlowState {
    pub fn last_roll(&self) -> Option<RollDirection> {
        self.last_roll
    }

    /// Feeds one transition; returns true when it overuses a hand.
    /// Cross-hand transitions leave the state alone.
    #[inline(always)]
    pub fn advance(&mut self, transition: Transition) -> bool {
        let (overuse, next) = match transition {
            Transition::CrossHand => return false,
            Transition::InwardRoll { .. } => (
                self.last_roll == Some(RollDirection::Outward),
                Some(RollDirection::Inward),
            ),
            Transition::OutwardRoll { .. } => (
                self.last_roll == Some(RollDirection::Inward),
                Some(RollDirection::Outward),
            ),
            Transition::RowJump | Transition::Reposition => (self.last_roll.is_some(), None),
        };
        self.last_roll = next;
        overuse
    }
}
