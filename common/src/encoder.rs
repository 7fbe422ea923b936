//! Presence vector encoding
//!
//! Turns the active ingredient list of one dish component into a 0/1 vector
//! aligned with the master vocabulary, plus matched/unmatched logs.
//! Unmatched ingredients and length faults are reported, never raised.

use crate::matcher::match_ingredient;
use crate::vocabulary::MasterVocabulary;
use serde::Serialize;
use std::fmt;

/// Fixed-length 0/1 vector indexed by vocabulary position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PresenceVector(Vec<u8>);

impl PresenceVector {
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Set a position to 1; out-of-range indices are ignored
    pub fn set(&mut self, index: usize) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = 1;
        }
    }

    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|&&bit| bit == 1).count()
    }
}

impl fmt::Display for PresenceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: Vec<String> = self.0.iter().map(|b| b.to_string()).collect();
        write!(f, "[{}]", bits.join(", "))
    }
}

/// Vector length disagreed with the vocabulary length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthFault {
    pub expected: usize,
    pub actual: usize,
}

/// Result of encoding one ingredient list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub vector: PresenceVector,
    /// `"{input} -> {resolved}"` per matched ingredient
    pub matched: Vec<String>,
    /// Inputs with no vocabulary entry
    pub unmatched: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_fault: Option<LengthFault>,
}

/// Encode active ingredients against the vocabulary.
///
/// An empty vocabulary yields an empty vector and empty logs.
pub fn encode<S: AsRef<str>>(ingredients: &[S], vocabulary: &MasterVocabulary) -> Encoding {
    if vocabulary.is_empty() {
        return Encoding::default();
    }

    let mut vector = PresenceVector::zeros(vocabulary.len());
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for item in ingredients {
        let item = item.as_ref();
        let result = match_ingredient(item, vocabulary);
        match (result.index(), result.matched_name()) {
            (Some(index), Some(name)) => {
                vector.set(index);
                matched.push(format!("{} -> {}", item, name));
            }
            _ => unmatched.push(item.to_string()),
        }
    }

    let length_fault = check_length(&vector, vocabulary.len());
    tracing::debug!(
        "encoded {} ingredients: {} matched, {} unmatched",
        ingredients.len(),
        matched.len(),
        unmatched.len()
    );

    Encoding {
        vector,
        matched,
        unmatched,
        length_fault,
    }
}

fn check_length(vector: &PresenceVector, expected: usize) -> Option<LengthFault> {
    (vector.len() != expected).then_some(LengthFault {
        expected,
        actual: vector.len(),
    })
}
