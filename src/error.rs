//! Error types for diatonic

use thiserror::Error;

use crate::chord::ChordalTone;

/// Any failure raised while spelling notes, scales or chords.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("alteration {0} is outside -2..=2")]
    AlterOutOfRange(i8),
    #[error("step count must be at least 1")]
    ZeroSteps,
    #[error("scale degree {0} is out of range")]
    DegreeOutOfRange(usize),
    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: String },
    #[error("unknown mode {0:?}")]
    UnknownMode(String),
    #[error("inconsistent chord {chord}: {source}")]
    Structure {
        chord: String,
        #[source]
        source: StructureError,
    },
}

impl TheoryError {
    /// True for errors that signal a broken chord structure rather than bad
    /// caller input.
    pub fn is_internal(&self) -> bool {
        matches!(self, TheoryError::Structure { .. })
    }
}

/// A chord whose tones do not fit any spelling the namer knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("no {0} tone")]
    MissingTone(ChordalTone),
    #[error("no triad has a {lower} semitone third and a {upper} semitone upper third")]
    LowerStructure { lower: u8, upper: u8 },
    #[error("{0} semitones from the fifth is not a seventh")]
    Seventh(u8),
    #[error("{0} semitones from the root is not a ninth")]
    Ninth(u8),
    #[error("{0} semitones from the root is not an eleventh")]
    Eleventh(u8),
}

pub type Result<T> = std::result::Result<T, TheoryError>;
