//! JSON reference documents.
//!
//! Alternative reference sets (for example a CDC or national table) can be
//! supplied as a JSON document with two arrays of flat rows:
//!
//! ```json
//! {
//!   "lms": [{"indicator": "weight_for_age", "sex": "male", "x": 0, "l": 0.35, "m": 3.35, "s": 0.146}],
//!   "velocity": [{"indicator": "weight_for_age", "sex": "male", "start_month": 0, "end_month": 3, "mean": 1.0, "sd": 0.2}]
//! }
//! ```
//!
//! Either array may be omitted. Documents go through the same validation as
//! the bundled tables; completeness is left to the caller.
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::reference::{
    errors::ReferenceResult,
    standards::{ReferenceStandards, ReferenceTableEntry, VelocityTableEntry},
};

/// Serialized form of a reference data set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    #[serde(default)]
    pub lms: Vec<ReferenceTableEntry>,
    #[serde(default)]
    pub velocity: Vec<VelocityTableEntry>,
}

impl ReferenceStandards {
    /// Parse and validate a JSON reference document.
    pub fn from_json_str(raw: &str) -> ReferenceResult<Self> {
        let doc: ReferenceDocument = serde_json::from_str(raw)?;
        Self::from_entries(doc.lms, doc.velocity)
    }

    /// Read, parse and validate a JSON reference document.
    pub fn from_reader<R: Read>(mut reader: R) -> ReferenceResult<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::from_json_str(&raw)
    }
}
