//! Seven-note diatonic scales.
//!
//! A scale is spelled one letter per degree, walking the letters upward from
//! the root. Each degree carries the previous degree's alteration and nudges
//! it by one whenever the natural step between the letters differs from the
//! step the mode asks for:
//!
//! ```
//! use diatonic::scale::{Mode, Scale};
//!
//! let scale = Scale::new("Eb", Mode::Minor).unwrap();
//! let names: Vec<String> = scale.notes().iter().map(|n| n.name()).collect();
//! assert_eq!(names, ["Eb", "F", "Gb", "Ab", "Bb", "Cb", "Db"]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chord::{Chord, ChordType, Inversion};
use crate::error::{Result, TheoryError};
use crate::note::Note;
use crate::parser;

/// Number of degrees in every scale.
pub const SCALE_DEGREES: usize = 7;

/// The diatonic modes a scale can be built in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lydian,
    Major,
    Mixolydian,
    Dorian,
    Minor,
    Phrygian,
    Locrian,
}

impl Mode {
    /// Every mode, in the order a picker lists them.
    pub const ALL: [Mode; SCALE_DEGREES] = [
        Mode::Major,
        Mode::Minor,
        Mode::Mixolydian,
        Mode::Dorian,
        Mode::Lydian,
        Mode::Phrygian,
        Mode::Locrian,
    ];

    pub fn steps(self) -> StepPattern {
        match self {
            Mode::Lydian => StepPattern::LYDIAN,
            Mode::Major => StepPattern::MAJOR,
            Mode::Mixolydian => StepPattern::MIXOLYDIAN,
            Mode::Dorian => StepPattern::DORIAN,
            Mode::Minor => StepPattern::MINOR,
            Mode::Phrygian => StepPattern::PHRYGIAN,
            Mode::Locrian => StepPattern::LOCRIAN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Lydian => "lydian",
            Mode::Major => "major",
            Mode::Mixolydian => "mixolydian",
            Mode::Dorian => "dorian",
            Mode::Minor => "minor",
            Mode::Phrygian => "phrygian",
            Mode::Locrian => "locrian",
        }
    }

    /// Capitalized name, as shown after the root in `Scale::name`.
    pub fn title(self) -> &'static str {
        match self {
            Mode::Lydian => "Lydian",
            Mode::Major => "Major",
            Mode::Mixolydian => "Mixolydian",
            Mode::Dorian => "Dorian",
            Mode::Minor => "Minor",
            Mode::Phrygian => "Phrygian",
            Mode::Locrian => "Locrian",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = TheoryError;

    fn from_str(input: &str) -> Result<Mode> {
        let name = input.trim().to_lowercase();
        match name.as_str() {
            "ionian" => return Ok(Mode::Major),
            "aeolian" => return Ok(Mode::Minor),
            _ => {}
        }

        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == name)
            .ok_or_else(|| TheoryError::UnknownMode(input.to_owned()))
    }
}

/// Semitones between each degree and the one below it.
///
/// The first entry belongs to the root and is always zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StepPattern([u8; SCALE_DEGREES]);

impl StepPattern {
    pub const LYDIAN: StepPattern = StepPattern([0, 2, 2, 2, 1, 2, 2]);
    pub const MAJOR: StepPattern = StepPattern([0, 2, 2, 1, 2, 2, 2]);
    pub const MIXOLYDIAN: StepPattern = StepPattern([0, 2, 2, 1, 2, 2, 1]);
    pub const DORIAN: StepPattern = StepPattern([0, 2, 1, 2, 2, 2, 1]);
    pub const MINOR: StepPattern = StepPattern([0, 2, 1, 2, 2, 1, 2]);
    pub const PHRYGIAN: StepPattern = StepPattern([0, 1, 2, 2, 2, 1, 2]);
    pub const LOCRIAN: StepPattern = StepPattern([0, 1, 2, 2, 1, 2, 2]);

    /// Major with a raised fifth. Not reachable through `Mode`.
    pub const AUGMENTED: StepPattern = StepPattern([0, 2, 2, 2, 2, 1, 2]);

    pub fn steps(&self) -> &[u8; SCALE_DEGREES] {
        &self.0
    }

    /// Spell the seven degrees starting from `root`.
    ///
    /// Fails when a degree would need more than a double sharp or flat, as
    /// `Bx major` does on its second degree.
    pub fn spell(&self, root: Note) -> Result<[Note; SCALE_DEGREES]> {
        let mut notes = [root; SCALE_DEGREES];
        let mut class = root.class();

        for degree in 1..SCALE_DEGREES {
            let natural = class.step_up();
            class = class.next();

            let previous = notes[degree - 1].alter();
            let alter = match natural.cmp(&self.0[degree]) {
                Ordering::Equal => previous,
                Ordering::Less => previous + 1,
                Ordering::Greater => previous - 1,
            };

            notes[degree] = Note::new(class, alter).map_err(|err| {
                debug!(%root, degree = degree + 1, alter, "scale degree cannot be spelled");
                err
            })?;
        }

        Ok(notes)
    }
}

/// Serializable description of a scale.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleProps {
    /// Root spelling, e.g. `"F#"`.
    pub center: String,
    pub mode: Mode,
}

impl Default for ScaleProps {
    fn default() -> ScaleProps {
        ScaleProps { center: "C".to_owned(), mode: Mode::Major }
    }
}

/// A root note and mode together with the seven notes they spell.
///
/// Scales are values: the setters return a new scale and leave this one
/// alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ScaleProps", into = "ScaleProps")]
pub struct Scale {
    root: Note,
    mode: Mode,
    notes: [Note; SCALE_DEGREES],
}

impl Default for Scale {
    /// C major.
    fn default() -> Scale {
        use crate::note::NoteClass::*;

        Scale {
            root: Note::natural(C),
            mode: Mode::Major,
            notes: [C, D, E, F, G, A, B].map(Note::natural),
        }
    }
}

impl Scale {
    /// Build a scale from a root spelling such as `"Bb"`.
    pub fn new(center: &str, mode: Mode) -> Result<Scale> {
        Scale::from_root(center.parse()?, mode)
    }

    pub fn from_root(root: Note, mode: Mode) -> Result<Scale> {
        let notes = mode.steps().spell(root)?;
        Ok(Scale { root, mode, notes })
    }

    pub fn from_props(props: &ScaleProps) -> Result<Scale> {
        Scale::new(&props.center, props.mode)
    }

    pub fn props(&self) -> ScaleProps {
        ScaleProps { center: self.center(), mode: self.mode }
    }

    pub fn set_center(&self, center: &str) -> Result<Scale> {
        Scale::new(center, self.mode)
    }

    pub fn set_mode(&self, mode: Mode) -> Result<Scale> {
        Scale::from_root(self.root, mode)
    }

    /// The root spelling as text.
    pub fn center(&self) -> String {
        self.root.name()
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn root_name(&self) -> String {
        self.root.name()
    }

    pub fn root_name_unicode(&self) -> String {
        self.root.name_unicode()
    }

    /// Root and capitalized mode, e.g. `"F# Dorian"`.
    pub fn name(&self) -> String {
        format!("{} {}", self.root_name(), self.mode.title())
    }

    pub fn name_unicode(&self) -> String {
        format!("{} {}", self.root_name_unicode(), self.mode.title())
    }

    /// Degrees one through seven, in order.
    pub fn notes(&self) -> &[Note; SCALE_DEGREES] {
        &self.notes
    }

    /// The note on a scale degree counted from one.
    ///
    /// Degrees above seven wrap around and keep their spelling, so degree 9
    /// is the same note as degree 2.
    pub fn get_note(&self, degree: usize) -> Result<Note> {
        if degree == 0 {
            return Err(TheoryError::DegreeOutOfRange(degree));
        }

        Ok(self.wrapped_note(degree))
    }

    /// `get_note` for callers that already know `degree >= 1`.
    pub(crate) fn wrapped_note(&self, degree: usize) -> Note {
        self.notes[(degree.max(1) - 1) % SCALE_DEGREES]
    }

    /// The degree holding a note that sounds the same as `note`.
    pub fn degree_of(&self, note: &Note) -> Option<u8> {
        self.notes
            .iter()
            .position(|n| n.is_same(note))
            .map(|index| index as u8 + 1)
    }

    /// The root position triad built on `degree`.
    pub fn chord_for_degree(&self, degree: u8) -> Result<Chord> {
        Chord::new(self.clone(), degree, ChordType::Triad, Inversion::Root)
    }

    /// Roman numeral analysis of the triad on `degree`.
    ///
    /// Minor triads are lower case and diminished ones also get a degree
    /// sign: `ii`, `vii°`.
    pub fn roman_for_degree(&self, degree: u8) -> Result<String> {
        const NUMERALS: [&str; SCALE_DEGREES] = ["I", "II", "III", "IV", "V", "VI", "VII"];

        if !(1..=SCALE_DEGREES as u8).contains(&degree) {
            return Err(TheoryError::DegreeOutOfRange(usize::from(degree)));
        }

        let numeral = NUMERALS[usize::from(degree) - 1];
        let chord = self.chord_for_degree(degree)?;

        let roman = if chord.is_min()? {
            numeral.to_lowercase()
        } else if chord.is_dim()? {
            format!("{}\u{b0}", numeral.to_lowercase())
        } else {
            numeral.to_owned()
        };

        Ok(roman)
    }
}

impl TryFrom<ScaleProps> for Scale {
    type Error = TheoryError;

    fn try_from(props: ScaleProps) -> Result<Scale> {
        Scale::from_props(&props)
    }
}

impl From<Scale> for ScaleProps {
    fn from(scale: Scale) -> ScaleProps {
        scale.props()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.mode.title())
    }
}

impl FromStr for Scale {
    type Err = TheoryError;

    /// Reads `"<note> <mode>"`; a bare note is taken as major.
    fn from_str(input: &str) -> Result<Scale> {
        let (root, mode) = parser::parse_scale(input)?;
        Scale::from_root(root, mode)
    }
}
