use super::types::ScoreDetails;

// Empirically tuned weights. Changing any of them changes search behavior.
pub const BASELINE: f64 = 100_000.0;
pub const W_DISTANCE: f64 = 0.25;
pub const W_SAME_FINGER: f64 = 2.0;
pub const W_SAME_FINGER_GAP: f64 = 1.0;
pub const W_EFFORT: f64 = 0.04;
pub const W_COMFY_INWARD: f64 = -1.0;
pub const W_INWARD: f64 = -0.25;
pub const W_COMFY_OUTWARD: f64 = -0.5;
pub const W_OUTWARD: f64 = -0.125;
pub const W_ROW_JUMP: f64 = 0.0;
pub const W_FINGER_INEQUALITY: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostCategory {
    Distance,
    SameFinger,
    SameFingerGap,
    Effort,
    ComfyInward,
    Inward,
    ComfyOutward,
    Outward,
    HandOveruse,
    RowJump,
}

impl CostCategory {
    pub const ALL: [CostCategory; 10] = [
        Self::SameFinger,
        Self::SameFingerGap,
        Self::Effort,
        Self::ComfyInward,
        Self::Inward,
        Self::ComfyOutward,
        Self::Outward,
        Self::HandOveruse,
        Self::RowJump,
        Self::Distance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Distance => "Distance",
            Self::SameFinger => "Repeated Finger",
            Self::SameFingerGap => "Repeated Finger (1 gap)",
            Self::Effort => "Effort",
            Self::ComfyInward => "Comfy Inward Rolls",
            Self::Inward => "Other Inward Rolls",
            Self::ComfyOutward => "Comfy Outward Rolls",
            Self::Outward => "Other Outward Rolls",
            Self::HandOveruse => "Hand Overuse",
            Self::RowJump => "Row Jumps",
        }
    }

    /// The raw metric behind this category.
    pub fn raw(&self, d: &ScoreDetails) -> f64 {
        match self {
            Self::Distance => d.distance,
            Self::SameFinger => d.same_finger as f64,
            Self::SameFingerGap => d.same_finger_gap as f64,
            Self::Effort => d.effort as f64,
            Self::ComfyInward => d.comfy_inward as f64,
            Self::Inward => d.inward as f64,
            Self::ComfyOutward => d.comfy_outward as f64,
            Self::Outward => d.outward as f64,
            Self::HandOveruse => d.hand_overuse as f64,
            Self::RowJump => d.row_jumps as f64,
        }
    }

    /// Weighted contribution before the inequality multiplier.
    pub fn contribution(&self, d: &ScoreDetails) -> f64 {
        match self {
            Self::Distance => d.distance * W_DISTANCE,
            Self::SameFinger => d.same_finger as f64 * W_SAME_FINGER,
            Self::SameFingerGap => d.same_finger_gap as f64 * W_SAME_FINGER_GAP,
            Self::Effort => d.effort as f64 * W_EFFORT,
            Self::ComfyInward => d.comfy_inward as f64 * W_COMFY_INWARD,
            Self::Inward => d.inward as f64 * W_INWARD,
            Self::ComfyOutward => d.comfy_outward as f64 * W_COMFY_OUTWARD,
            Self::Outward => d.outward as f64 * W_OUTWARD,
            // whole pairs only
            Self::HandOveruse => (d.hand_overuse / 2) as f64,
            Self::RowJump => d.row_jumps as f64 * W_ROW_JUMP,
        }
    }
}

pub fn calculate_cost(d: &ScoreDetails) -> f64 {
    let raw: f64 = CostCategory::ALL.iter().map(|c| c.contribution(d)).sum();
    BASELINE + raw * (1.0 + d.finger_inequality * W_FINGER_INEQUALITY)
}
