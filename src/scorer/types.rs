use crate::consts::{FINGER_COUNT, HAND_COUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    // Top-line Score
    pub cost: f64,
    pub chars: u64,

    // Finger Repeats
    pub same_finger: u64,
    pub same_finger_gap: u64,

    // Rolls
    pub comfy_inward: u64,
    pub inward: u64,
    pub comfy_outward: u64,
    pub outward: u64,

    // Flow Penalties
    pub hand_overuse: u64,
    pub row_jumps: u64, // reported, not weighted

    // Travel & Effort
    pub distance: f64,
    pub effort: u64,

    // === USAGE ===
    pub finger_counts: [u64; FINGER_COUNT],
    pub hand_counts: [u64; HAND_COUNT],
    pub finger_usage: [f64; FINGER_COUNT],
    pub hand_usage: [f64; HAND_COUNT],
    pub finger_inequality: f64,
    pub hand_inequality: f64,
}
