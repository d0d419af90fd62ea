use crate::error::KgResult;
use crate::optimizer::Improvement;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Flat CSV row describing one improvement.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImprovementRecord {
    pub worker: usize,
    pub generation: u64,
    pub attempts: u64,
    pub mutations: usize,
    pub stagnation: usize,
    pub cost: f64,
    pub same_finger: u64,
    pub same_finger_gap: u64,
    pub hand_overuse: u64,
    pub distance: f64,
    pub effort: u64,
    pub finger_inequality: f64,
    pub hand_inequality: f64,
    pub layout: String,
}

impl From<&Improvement> for ImprovementRecord {
    fn from(imp: &Improvement) -> Self {
        let d = &imp.details;
        Self {
            worker: imp.worker,
            generation: imp.generation,
            attempts: imp.attempts,
            mutations: imp.mutations,
            stagnation: imp.stagnation,
            cost: imp.cost,
            same_finger: d.same_finger,
            same_finger_gap: d.same_finger_gap,
            hand_overuse: d.hand_overuse,
            distance: d.distance,
            effort: d.effort,
            finger_inequality: d.finger_inequality,
            hand_inequality: d.hand_inequality,
            layout: imp.layout.free_chars(),
        }
    }
}

pub struct HistoryWriter {
    writer: csv::Writer<File>,
}

impl HistoryWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> KgResult<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }

    pub fn record(&mut self, imp: &Improvement) -> KgResult<()> {
        self.writer.serialize(ImprovementRecord::from(imp))?;
        self.writer.flush()?;
        Ok(())
    }
}
