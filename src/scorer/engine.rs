use super::costs::calculate_cost;
use super::flow::FlowState;
use super::physics::{analyze_transition, Transition};
use super::ScoreDetails;
use crate::consts::{FINGER_COUNT, HAND_COUNT, KEY_NOT_FOUND_U8};
use crate::corpus::Corpus;
use crate::error::{KeyGridError, KgResult};
use crate::geometry::KeyboardGeometry;
use crate::layout::Layout;

/// Scans `corpus` once against `layout` and returns every metric plus the cost.
///
/// All scan state (rolling window, roll memory, finger positions) lives on
/// this stack frame, so concurrent calls never observe each other.
pub fn score(layout: &Layout, corpus: &Corpus, geom: &KeyboardGeometry) -> KgResult<ScoreDetails> {
    let pos_map = layout.pos_map();
    let mut d = ScoreDetails::default();

    // Window starts on the space bar when it is placed, else empty.
    let mut prev: Option<usize> = layout.cell_of(b' ');
    let mut two_back: Option<usize> = prev;
    let mut finger_pos = geom.finger_homes;
    let mut flow = FlowState::default();

    for (offset, &byte) in corpus.bytes().iter().enumerate() {
        let cur = match pos_map[byte as usize] {
            KEY_NOT_FOUND_U8 => {
                return Err(KeyGridError::UnmappedCharacter { byte, offset })
            }
            p => p as usize,
        };
        let key = geom.key(cur);
        let finger = key.finger as usize;

        if let Some(p) = prev {
            if geom.key(p).finger == key.finger {
                d.same_finger += 1;
            }
        }
        if let Some(z) = two_back {
            if geom.key(z).finger == key.finger {
                d.same_finger_gap += 1;
            }
        }

        d.finger_counts[finger] += 1;

        if let Some(p) = prev {
            let t = analyze_transition(geom, p, cur);
            match t {
                Transition::CrossHand => {}
                Transition::InwardRoll { comfortable: true } => d.comfy_inward += 1,
                Transition::InwardRoll { comfortable: false } => d.inward += 1,
                Transition::OutwardRoll { comfortable: true } => d.comfy_outward += 1,
                Transition::OutwardRoll { comfortable: false } => d.outward += 1,
                Transition::RowJump => d.row_jumps += 1,
                Transition::Reposition => {}
            }
            if flow.advance(t) {
                d.hand_overuse += 1;
            }
        }

        d.distance += geom.distance(cur, finger_pos[finger]);
        finger_pos[finger] = cur;

        d.effort += key.effort as u64;

        two_back = prev;
        prev = Some(cur);
    }

    finalize(&mut d, corpus.len(), &geom.target_finger_usage);
    Ok(d)
}

/// Derives usage fractions, inequalities and the cost from the raw counters.
pub fn finalize(d: &mut ScoreDetails, len: usize, target: &[f64; FINGER_COUNT]) {
    let len = len as f64;
    d.chars = d.finger_counts.iter().sum();

    let mut finger_inequality = 0.0;
    for i in 0..FINGER_COUNT {
        let usage = d.finger_counts[i] as f64 / len;
        d.finger_usage[i] = usage;
        finger_inequality += (target[i] - usage).abs();
        d.hand_counts[if i < FINGER_COUNT / 2 { 0 } else { 1 }] += d.finger_counts[i];
    }

    let mut hand_inequality = 0.0;
    for h in 0..HAND_COUNT {
        let usage = d.hand_counts[h] as f64 / len;
        d.hand_usage[h] = usage;
        hand_inequality += (0.5 - usage).abs();
    }

    d.finger_inequality = finger_inequality;
    d.hand_inequality = hand_inequality;
    d.cost = calculate_cost(d);
}
