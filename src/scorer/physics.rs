use crate::consts::{COMFORT_EFFORT_MAX, THUMB};
use crate::geometry::KeyboardGeometry;

/// Classification of one key-to-key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    CrossHand,
    /// Toward the index finger (increasing intra-hand finger and column).
    InwardRoll { comfortable: bool },
    OutwardRoll { comfortable: bool },
    /// Two non-thumb keys more than one row apart.
    RowJump,
    /// Any other same-hand movement.
    Reposition,
}

impl Transition {
    pub fn is_roll(&self) -> bool {
        matches!(self, Self::InwardRoll { .. } | Self::OutwardRoll { .. })
    }
}

#[inline(always)]
pub fn analyze_transition(geom: &KeyboardGeometry, from: usize, to: usize) -> Transition {
    let a = geom.key(from);
    let b = geom.key(to);

    if a.hand != b.hand {
        return Transition::CrossHand;
    }

    let comfortable = a.effort <= COMFORT_EFFORT_MAX && b.effort <= COMFORT_EFFORT_MAX;

    if a.hand_finger < b.hand_finger && a.hand_col < b.hand_col {
        Transition::InwardRoll { comfortable }
    } else if a.hand_finger > b.hand_finger && a.hand_col > b.hand_col {
        Transition::OutwardRoll { comfortable }
    } else if a.hand_finger != THUMB
        && b.hand_finger != THUMB
        && geom.row_of(from).abs_diff(geom.row_of(to)) > 1
    {
        Transition::RowJump
    } else {
        Transition::Reposition
    }
}
