//! Spelled notes: a letter plus a small alteration.
//!
//! ```
//! use diatonic::note::{Note, NoteClass};
//!
//! let d_flat: Note = "Db".parse().unwrap();
//! assert_eq!(d_flat.to_sharp(), Note::new(NoteClass::C, 1).unwrap());
//! assert_eq!(Note::natural(NoteClass::C).interval(&d_flat), 1);
//! ```
//!
//! A `Note` never forgets its spelling. `C#` and `Db` are different values
//! that compare equal only through `is_same`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::parser;

/// A single note without accidentals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteClass {
    A, B, C, D, E, F, G
}

/// The total number of `NoteClass` elements.
pub const NOTE_CLASS_COUNT: usize = 7;

/// Lowest and highest alteration a `Note` may carry.
pub const MIN_ALTER: i8 = -2;
pub const MAX_ALTER: i8 = 2;

/// Neighbours of a letter and the natural semitone distance to each.
struct Link {
    next: NoteClass,
    prev: NoteClass,
    up: i8,
    down: i8,
}

/// Indexed by `NoteClass::to_int`.
static LETTER_GRAPH: [Link; NOTE_CLASS_COUNT] = [
    Link { next: NoteClass::B, prev: NoteClass::G, up: 2, down: 2 },
    Link { next: NoteClass::C, prev: NoteClass::A, up: 1, down: 2 },
    Link { next: NoteClass::D, prev: NoteClass::B, up: 2, down: 1 },
    Link { next: NoteClass::E, prev: NoteClass::C, up: 2, down: 2 },
    Link { next: NoteClass::F, prev: NoteClass::D, up: 1, down: 2 },
    Link { next: NoteClass::G, prev: NoteClass::E, up: 2, down: 1 },
    Link { next: NoteClass::A, prev: NoteClass::F, up: 2, down: 2 },
];

impl NoteClass {
    /// Every letter, in `to_int` order.
    pub const ALL: [NoteClass; NOTE_CLASS_COUNT] = [
        NoteClass::A, NoteClass::B, NoteClass::C, NoteClass::D,
        NoteClass::E, NoteClass::F, NoteClass::G,
    ];

    /// Construct a `NoteClass` from a char representation.
    pub fn from_char(input: char) -> Option<NoteClass> {
        use self::NoteClass::*;

        match input {
            'A' => Some(A),
            'B' => Some(B),
            'C' => Some(C),
            'D' => Some(D),
            'E' => Some(E),
            'F' => Some(F),
            'G' => Some(G),
            _   => None
        }
    }

    pub fn to_char(self) -> char {
        use self::NoteClass::*;

        match self {
            A => 'A',
            B => 'B',
            C => 'C',
            D => 'D',
            E => 'E',
            F => 'F',
            G => 'G',
        }
    }

    /// Returns the ordered set of `NoteClass` for indexing.
    pub fn to_int(self) -> usize {
        use self::NoteClass::*;

        match self {
            A => 0,
            B => 1,
            C => 2,
            D => 3,
            E => 4,
            F => 5,
            G => 6
        }
    }

    fn link(self) -> &'static Link {
        &LETTER_GRAPH[self.to_int()]
    }

    /// The letter above this one, wrapping from `G` to `A`.
    pub fn next(self) -> NoteClass {
        self.link().next
    }

    /// The letter below this one, wrapping from `A` to `G`.
    pub fn prev(self) -> NoteClass {
        self.link().prev
    }

    /// Natural semitones from this letter up to the next one.
    pub fn step_up(self) -> u8 {
        self.link().up as u8
    }

    /// Natural semitones from this letter down to the previous one.
    pub fn step_down(self) -> u8 {
        self.link().down as u8
    }

    /// Compute the ascending semi-tonal difference between two base
    /// `NoteClass`'s.
    ///
    /// The value returned will be less than 12.
    pub fn difference(self, other: NoteClass) -> u8 {
        let mut class = self;
        let mut semitones = 0;

        while class != other {
            semitones += class.step_up();
            class = class.next();
        }

        semitones
    }
}

impl fmt::Display for NoteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Represents an alteration of a base `NoteClass`.
///
/// This is analagous to accidentals, with positive values representing
/// repeated sharps and negative values representing repeated flats.
pub type PitchOffset = i8;

/// A single note which may have applied accidentals.
///
/// The alteration is always within `MIN_ALTER..=MAX_ALTER`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNote", into = "RawNote")]
pub struct Note {
    class: NoteClass,
    alter: PitchOffset,
}

#[derive(Serialize, Deserialize)]
struct RawNote {
    class: NoteClass,
    alter: PitchOffset,
}

impl TryFrom<RawNote> for Note {
    type Error = TheoryError;

    fn try_from(raw: RawNote) -> Result<Note> {
        Note::new(raw.class, raw.alter)
    }
}

impl From<Note> for RawNote {
    fn from(note: Note) -> RawNote {
        RawNote { class: note.class, alter: note.alter }
    }
}

impl Note {
    /// Construct and return a new `Note`.
    pub fn new(class: NoteClass, alter: PitchOffset) -> Result<Note> {
        if !(MIN_ALTER..=MAX_ALTER).contains(&alter) {
            return Err(TheoryError::AlterOutOfRange(alter));
        }

        Ok(Note { class, alter })
    }

    /// A note with no accidental.
    pub const fn natural(class: NoteClass) -> Note {
        Note { class, alter: 0 }
    }

    pub fn class(&self) -> NoteClass {
        self.class
    }

    pub fn alter(&self) -> PitchOffset {
        self.alter
    }

    /// The ASCII accidental: `bb`, `b`, nothing, `#` or `x`.
    pub fn accidental(&self) -> &'static str {
        ["bb", "b", "", "#", "x"][(self.alter - MIN_ALTER) as usize]
    }

    pub fn accidental_unicode(&self) -> &'static str {
        ["\u{1D12B}", "\u{266D}", "", "\u{266F}", "\u{1D12A}"][(self.alter - MIN_ALTER) as usize]
    }

    pub fn name(&self) -> String {
        format!("{}{}", self.class, self.accidental())
    }

    pub fn name_unicode(&self) -> String {
        format!("{}{}", self.class, self.accidental_unicode())
    }

    /// Lower the note by `steps` semitones, keeping its letter.
    pub fn flatten(&self, steps: u8) -> Result<Note> {
        if steps == 0 {
            return Err(TheoryError::ZeroSteps);
        }

        Note::new(self.class, self.alter - Self::offset(steps)?)
    }

    /// Raise the note by `steps` semitones, keeping its letter.
    pub fn sharpen(&self, steps: u8) -> Result<Note> {
        if steps == 0 {
            return Err(TheoryError::ZeroSteps);
        }

        Note::new(self.class, self.alter + Self::offset(steps)?)
    }

    fn offset(steps: u8) -> Result<PitchOffset> {
        // Anything past the full alteration span cannot land in range.
        PitchOffset::try_from(steps)
            .ok()
            .filter(|&s| s <= MAX_ALTER - MIN_ALTER)
            .ok_or(TheoryError::AlterOutOfRange(PitchOffset::MAX))
    }

    /// Respell onto the neighbouring letter when that removes the alteration
    /// or shrinks it, e.g. `E#` to `F`, `Cx` to `D` and `Cbb` to `Bb`.
    ///
    /// Notes that cannot be simplified, like `C#`, are returned unchanged.
    pub fn simplify(&self) -> Note {
        let link = self.class.link();

        if self.alter < 0 && self.alter <= -link.down {
            Note { class: link.prev, alter: self.alter + link.down }
        } else if self.alter > 0 && self.alter >= link.up {
            Note { class: link.next, alter: self.alter - link.up }
        } else {
            *self
        }
    }

    /// Respell using naturals and sharps only.
    ///
    /// This is the canonical spelling used for every pitch comparison.
    pub fn to_sharp(&self) -> Note {
        let mut note = self.simplify();

        while note.alter < 0 {
            let link = note.class.link();
            note = Note { class: link.prev, alter: note.alter + link.down };
        }

        note
    }

    /// True when both notes name the same pitch, however spelled.
    pub fn is_same(&self, other: &Note) -> bool {
        self.to_sharp() == other.to_sharp()
    }

    /// Ascending semitones from this note up to `other`, in `0..12`.
    pub fn interval(&self, other: &Note) -> u8 {
        let me = self.to_sharp();
        let they = other.to_sharp();

        let semitones = me.class.difference(they.class) as i8 + they.alter - me.alter;
        semitones.rem_euclid(12) as u8
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.accidental())
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(input: &str) -> Result<Note> {
        parser::parse_note(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::note::NoteClass::*;

    fn note(class: NoteClass, alter: PitchOffset) -> Note {
        Note::new(class, alter).unwrap()
    }

    #[test]
    fn alter_range() {
        assert_eq!(Note::new(C, 3), Err(TheoryError::AlterOutOfRange(3)));
        assert_eq!(Note::new(C, -3), Err(TheoryError::AlterOutOfRange(-3)));
        assert!(Note::new(C, 2).is_ok());
    }

    #[test]
    fn names() {
        assert_eq!(note(B, -2).name(), "Bbb");
        assert_eq!(note(E, -1).name(), "Eb");
        assert_eq!(note(F, 1).to_string(), "F#");
        assert_eq!(note(G, 2).name(), "Gx");
        assert_eq!(note(E, -1).name_unicode(), "E\u{266D}");
        assert_eq!(note(G, 2).name_unicode(), "G\u{1D12A}");
    }

    #[test]
    fn flatten_and_sharpen() {
        assert_eq!(note(C, 0).flatten(1), Ok(note(C, -1)));
        assert_eq!(note(C, 0).sharpen(2), Ok(note(C, 2)));
        assert_eq!(note(C, -1).flatten(2), Err(TheoryError::AlterOutOfRange(-3)));
        assert_eq!(note(C, 0).sharpen(0), Err(TheoryError::ZeroSteps));
        assert!(note(C, 0).sharpen(200).is_err());
    }

    #[test]
    fn simplify_one_step() {
        assert_eq!(note(E, 1).simplify(), note(F, 0));
        assert_eq!(note(B, 1).simplify(), note(C, 0));
        assert_eq!(note(C, 2).simplify(), note(D, 0));
        assert_eq!(note(B, 2).simplify(), note(C, 1));
        assert_eq!(note(F, -1).simplify(), note(E, 0));
        assert_eq!(note(C, -2).simplify(), note(B, -1));
        assert_eq!(note(D, -2).simplify(), note(C, 0));
        assert_eq!(note(C, 1).simplify(), note(C, 1));
        assert_eq!(note(D, -1).simplify(), note(D, -1));
        assert_eq!(note(A, 0).simplify(), note(A, 0));
    }

    #[test]
    fn sharp_spelling() {
        assert_eq!(note(D, -1).to_sharp(), note(C, 1));
        assert_eq!(note(G, -1).to_sharp(), note(F, 1));
        assert_eq!(note(C, -2).to_sharp(), note(A, 1));
        assert_eq!(note(F, -2).to_sharp(), note(D, 1));
        assert_eq!(note(C, -1).to_sharp(), note(B, 0));
    }

    #[test]
    fn sameness() {
        assert!(note(C, 1).is_same(&note(D, -1)));
        assert!(note(E, 1).is_same(&note(F, 0)));
        assert!(!note(C, 1).is_same(&note(D, 0)));
        assert_ne!(note(C, 1), note(D, -1));
    }

    #[test]
    fn intervals() {
        assert_eq!(note(C, 0).interval(&note(E, 0)), 4);
        assert_eq!(note(E, 0).interval(&note(G, 0)), 3);
        assert_eq!(note(G, 0).interval(&note(C, 0)), 5);
        assert_eq!(note(C, 0).interval(&note(B, 1)), 0);
        assert_eq!(note(C, 1).interval(&note(C, 0)), 11);
        assert_eq!(note(A, 0).interval(&note(G, 1)), 11);
        assert_eq!(note(B, 0).interval(&note(F, 0)), 6);
    }

    #[test]
    fn letter_difference() {
        assert_eq!(A.difference(G), 10);
        assert_eq!(B.difference(C), 1);
        assert_eq!(C.difference(C), 0);
        assert_eq!(E.difference(D), 10);
    }

    #[test]
    fn parse() {
        assert_eq!("Ab".parse(), Ok(note(A, -1)));
        assert_eq!("bb".parse(), Ok(note(B, -1)));
        assert_eq!("C".parse(), Ok(note(C, 0)));
        assert!("H".parse::<Note>().is_err());
        assert!("Cq".parse::<Note>().is_err());
    }
}
