//! Defines the chords that can be built on a scale degree.
//!
//! A chord is described by its scale, the degree of its root, a shape
//! (`ChordType`), an inversion and a set of `Extensions`. Its tones are always
//! taken from the scale, so the chord on the fifth degree of C major with a
//! seventh is a dominant seventh:
//!
//! ```
//! use diatonic::chord::{Chord, ChordType, Extension, Inversion};
//! use diatonic::scale::Scale;
//!
//! let chord = Chord::new(Scale::default(), 5, ChordType::Triad, Inversion::Root)
//!     .unwrap()
//!     .set_extension(Extension::Seventh, true);
//!
//! assert_eq!(chord.name().unwrap(), "G7");
//! assert_eq!(chord.set_inversion(Inversion::First).name().unwrap(), "G7/B");
//! ```
//!
//! Chords are values. Every setter returns a new `Chord`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{Result, StructureError, TheoryError};
use crate::note::Note;
use crate::scale::{Scale, SCALE_DEGREES};
use crate::voicing::NamedNoteList;

/// The role a tone plays in a chord, counted in scale steps from the root.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChordalTone {
    N1, N2, N3, N4, N5, N7, N9, N11
}

/// The total number of `ChordalTone` elements.
pub const CHORDAL_TONE_COUNT: usize = 8;

impl ChordalTone {
    /// Every chordal tone, lowest first.
    pub const ALL: [ChordalTone; CHORDAL_TONE_COUNT] = [
        ChordalTone::N1, ChordalTone::N2, ChordalTone::N3, ChordalTone::N4,
        ChordalTone::N5, ChordalTone::N7, ChordalTone::N9, ChordalTone::N11,
    ];

    /// Allows `ChordalTone` to be used as an indexable element.
    pub fn index(self) -> usize {
        use self::ChordalTone::*;

        match self {
            N1  => 0,
            N2  => 1,
            N3  => 2,
            N4  => 3,
            N5  => 4,
            N7  => 5,
            N9  => 6,
            N11 => 7,
        }
    }

    /// The chordal number, e.g. `7` for the seventh.
    pub fn number(self) -> u8 {
        use self::ChordalTone::*;

        match self {
            N1  => 1,
            N2  => 2,
            N3  => 3,
            N4  => 4,
            N5  => 5,
            N7  => 7,
            N9  => 9,
            N11 => 11,
        }
    }

    /// The scale degree holding this tone in a chord rooted on `root`.
    pub fn scale_degree(self, root: u8) -> usize {
        usize::from(root) + usize::from(self.number()) - 1
    }
}

impl fmt::Display for ChordalTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordalTone::N1 => f.write_str("root"),
            ChordalTone::N2 => f.write_str("2nd"),
            ChordalTone::N3 => f.write_str("3rd"),
            tone => write!(f, "{}th", tone.number()),
        }
    }
}

/// The basic shape of a chord: a triad or one of the suspended chords.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordType {
    #[default]
    Triad,
    Sus2,
    Sus4,
}

impl ChordType {
    /// The tone between the root and the fifth.
    pub fn middle(self) -> ChordalTone {
        match self {
            ChordType::Triad => ChordalTone::N3,
            ChordType::Sus2 => ChordalTone::N2,
            ChordType::Sus4 => ChordalTone::N4,
        }
    }

    fn sus_label(self) -> &'static str {
        match self {
            ChordType::Triad => "",
            ChordType::Sus2 => "sus2",
            ChordType::Sus4 => "sus4",
        }
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordType::Triad => f.write_str("triad"),
            chord_type => f.write_str(chord_type.sus_label()),
        }
    }
}

/// Which chord tone sits in the bass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inversion {
    #[default]
    Root,
    First,
    Second,
    Third,
}

impl Inversion {
    pub const ALL: [Inversion; 4] = [
        Inversion::Root,
        Inversion::First,
        Inversion::Second,
        Inversion::Third,
    ];

    /// Short label shown next to a chord: `(R)`, `(1)`, `(2)` or `(3)`.
    pub fn abbrev(self) -> &'static str {
        match self {
            Inversion::Root => "(R)",
            Inversion::First => "(1)",
            Inversion::Second => "(2)",
            Inversion::Third => "(3)",
        }
    }

    /// The chordal tone placed in the bass.
    ///
    /// Third inversion names the seventh whether or not the chord has one.
    pub fn bass(self, chord_type: ChordType) -> ChordalTone {
        match self {
            Inversion::Root => ChordalTone::N1,
            Inversion::First => chord_type.middle(),
            Inversion::Second => ChordalTone::N5,
            Inversion::Third => ChordalTone::N7,
        }
    }

    /// Position of the bass tone in the ascending tone list.
    fn position(self) -> usize {
        match self {
            Inversion::Root => 0,
            Inversion::First => 1,
            Inversion::Second => 2,
            Inversion::Third => 3,
        }
    }
}

/// A tone stacked above the basic shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extension {
    #[serde(rename = "7th")]
    Seventh,
    #[serde(rename = "9th")]
    Ninth,
    #[serde(rename = "11th")]
    Eleventh,
}

impl Extension {
    pub const ALL: [Extension; 3] = [Extension::Seventh, Extension::Ninth, Extension::Eleventh];

    pub fn tone(self) -> ChordalTone {
        match self {
            Extension::Seventh => ChordalTone::N7,
            Extension::Ninth => ChordalTone::N9,
            Extension::Eleventh => ChordalTone::N11,
        }
    }
}

/// Independent on/off flags for each `Extension`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    #[serde(rename = "7th")]
    pub seventh: bool,
    #[serde(rename = "9th")]
    pub ninth: bool,
    #[serde(rename = "11th")]
    pub eleventh: bool,
}

impl Extensions {
    /// No extensions.
    pub fn new() -> Extensions {
        Extensions::default()
    }

    pub fn contains(&self, extension: Extension) -> bool {
        match extension {
            Extension::Seventh => self.seventh,
            Extension::Ninth => self.ninth,
            Extension::Eleventh => self.eleventh,
        }
    }

    /// Turn a single extension on or off.
    pub fn with(mut self, extension: Extension, value: bool) -> Extensions {
        match extension {
            Extension::Seventh => self.seventh = value,
            Extension::Ninth => self.ninth = value,
            Extension::Eleventh => self.eleventh = value,
        }
        self
    }

    /// The extensions that are switched on, lowest first.
    pub fn iter(&self) -> impl Iterator<Item = Extension> + '_ {
        Extension::ALL.into_iter().filter(move |ext| self.contains(*ext))
    }
}

/// The notes of a chord keyed by their chordal role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChordTones([Option<Note>; CHORDAL_TONE_COUNT]);

impl ChordTones {
    /// Construct and return an empty `ChordTones`.
    pub fn new() -> ChordTones {
        ChordTones::default()
    }

    /// Insert a single tone, overwriting any note already in that role.
    pub fn insert(mut self, tone: ChordalTone, note: Note) -> ChordTones {
        self.0[tone.index()] = Some(note);
        self
    }

    pub fn get(&self, tone: ChordalTone) -> Option<Note> {
        self.0[tone.index()]
    }

    pub fn contains(&self, tone: ChordalTone) -> bool {
        self.get(tone).is_some()
    }

    /// Like `get`, but a missing tone is a structural error.
    pub fn require(&self, tone: ChordalTone) -> std::result::Result<Note, StructureError> {
        self.get(tone).ok_or(StructureError::MissingTone(tone))
    }

    /// Present tones in ascending chordal order.
    pub fn iter(&self) -> impl Iterator<Item = (ChordalTone, Note)> + '_ {
        ChordalTone::ALL
            .into_iter()
            .filter_map(move |tone| self.get(tone).map(|note| (tone, note)))
    }

    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pick the tones a chord with these props is made of.
    ///
    /// The root and fifth are always present, followed by the third, second
    /// or fourth depending on the shape and one tone per enabled extension.
    fn select(props: &ChordProps) -> ChordTones {
        let tone = |t: ChordalTone| (t, props.scale.wrapped_note(t.scale_degree(props.degree)));
        let middle = props.chord_type.middle();

        [ChordalTone::N1, middle, ChordalTone::N5]
            .into_iter()
            .chain(props.extensions.iter().map(Extension::tone))
            .map(tone)
            .fold(ChordTones::new(), |tones, (t, note)| tones.insert(t, note))
    }
}

/// Serializable description of a chord.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordProps {
    pub scale: Scale,
    /// Scale degree of the root, `1..=7`.
    pub degree: u8,
    pub chord_type: ChordType,
    pub inversion: Inversion,
    pub extensions: Extensions,
}

impl Default for ChordProps {
    /// The root position triad on the first degree of C major.
    fn default() -> ChordProps {
        ChordProps {
            scale: Scale::default(),
            degree: 1,
            chord_type: ChordType::Triad,
            inversion: Inversion::Root,
            extensions: Extensions::new(),
        }
    }
}

fn check_degree(degree: u8) -> Result<u8> {
    if (1..=SCALE_DEGREES as u8).contains(&degree) {
        Ok(degree)
    } else {
        Err(TheoryError::DegreeOutOfRange(usize::from(degree)))
    }
}

/// A chord built on one degree of a scale.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ChordProps", into = "ChordProps")]
pub struct Chord {
    props: ChordProps,
    tones: ChordTones,
    keep: bool,
}

impl Default for Chord {
    fn default() -> Chord {
        Chord::build(ChordProps::default())
    }
}

impl Chord {
    /// Construct a chord without extensions.
    pub fn new(
        scale: Scale,
        degree: u8,
        chord_type: ChordType,
        inversion: Inversion,
    ) -> Result<Chord> {
        Chord::from_props(ChordProps {
            scale,
            degree,
            chord_type,
            inversion,
            extensions: Extensions::new(),
        })
    }

    pub fn from_props(props: ChordProps) -> Result<Chord> {
        check_degree(props.degree)?;
        Ok(Chord::build(props))
    }

    /// `props.degree` must already be in range.
    fn build(props: ChordProps) -> Chord {
        let tones = ChordTones::select(&props);
        trace!(degree = props.degree, scale = %props.scale, tones = tones.len(), "selected chord tones");

        Chord { props, tones, keep: false }
    }

    fn with_props(&self, update: impl FnOnce(&mut ChordProps)) -> Chord {
        let mut props = self.props.clone();
        update(&mut props);
        Chord::build(props)
    }

    pub fn props(&self) -> &ChordProps {
        &self.props
    }

    pub fn scale(&self) -> &Scale {
        &self.props.scale
    }

    pub fn degree(&self) -> u8 {
        self.props.degree
    }

    pub fn chord_type(&self) -> ChordType {
        self.props.chord_type
    }

    pub fn inversion(&self) -> Inversion {
        self.props.inversion
    }

    pub fn extensions(&self) -> Extensions {
        self.props.extensions
    }

    pub fn tones(&self) -> &ChordTones {
        &self.tones
    }

    /// UI bookkeeping flag. Never read by the chord itself.
    pub fn keep(&self) -> bool {
        self.keep
    }

    pub fn with_keep(mut self, keep: bool) -> Chord {
        self.keep = keep;
        self
    }

    pub fn set_scale(&self, scale: Scale) -> Chord {
        self.with_props(|props| props.scale = scale)
    }

    pub fn set_degree(&self, degree: u8) -> Result<Chord> {
        let degree = check_degree(degree)?;
        Ok(self.with_props(|props| props.degree = degree))
    }

    pub fn set_chord_type(&self, chord_type: ChordType) -> Chord {
        self.with_props(|props| props.chord_type = chord_type)
    }

    pub fn set_inversion(&self, inversion: Inversion) -> Chord {
        self.with_props(|props| props.inversion = inversion)
    }

    pub fn set_extension(&self, extension: Extension, value: bool) -> Chord {
        self.with_props(|props| props.extensions = props.extensions.with(extension, value))
    }

    pub fn set_extensions(&self, extensions: Extensions) -> Chord {
        self.with_props(|props| props.extensions = extensions)
    }

    /// The note on the chord's degree.
    pub fn root(&self) -> Note {
        self.props.scale.wrapped_note(usize::from(self.props.degree))
    }

    pub fn root_name(&self) -> String {
        self.root().name()
    }

    pub fn inversion_abbrev(&self) -> &'static str {
        self.props.inversion.abbrev()
    }

    /// Roman numeral of this chord's degree in its scale.
    pub fn roman_symbol(&self) -> Result<String> {
        self.props.scale.roman_for_degree(self.props.degree)
    }

    fn describe(&self) -> String {
        format!(
            "{} on degree {} of {}",
            self.props.chord_type, self.props.degree, self.props.scale
        )
    }

    fn structure_error(&self, source: StructureError) -> TheoryError {
        let chord = self.describe();
        warn!(%chord, %source, "rejecting chord structure");
        TheoryError::Structure { chord, source }
    }

    fn tone(&self, tone: ChordalTone) -> Result<Note> {
        self.tones.require(tone).map_err(|err| self.structure_error(err))
    }

    /// True when the fifth is not perfect.
    pub fn is_dim(&self) -> Result<bool> {
        Ok(self.tone(ChordalTone::N1)?.interval(&self.tone(ChordalTone::N5)?) != 7)
    }

    /// True for a triad with a minor third and a perfect fifth.
    pub fn is_min(&self) -> Result<bool> {
        if self.props.chord_type != ChordType::Triad || self.is_dim()? {
            return Ok(false);
        }

        Ok(self.tone(ChordalTone::N1)?.interval(&self.tone(ChordalTone::N3)?) == 3)
    }

    /// Move the chord into `scale`, keeping its root pitch if it can.
    ///
    /// When a note of the new scale sounds the same as the current root the
    /// degree follows that note, otherwise the degree stays put and the root
    /// takes the new scale's spelling.
    pub fn change_scale(&self, scale: Scale) -> Chord {
        let root = self.root();
        let degree = scale.degree_of(&root);

        if degree.is_none() {
            debug!(%root, %scale, "root not in new scale, keeping degree {}", self.props.degree);
        }

        self.with_props(|props| {
            props.scale = scale;
            if let Some(degree) = degree {
                props.degree = degree;
            }
        })
    }

    /// Same root spelling and same shape.
    pub fn is_same(&self, other: &Chord) -> bool {
        self.root() == other.root() && self.props.chord_type == other.props.chord_type
    }

    pub fn is_same_name(&self, other: &Chord) -> Result<bool> {
        Ok(self.name()? == other.name()?)
    }

    /// The chord symbol, e.g. `Dmin7`, `Bmin7b5`, `C(add9)`, `F(add#11)/A`.
    pub fn name(&self) -> Result<String> {
        self.compose_name().map_err(|err| self.structure_error(err))
    }

    fn compose_name(&self) -> std::result::Result<String, StructureError> {
        use self::ChordalTone::*;

        let tones = &self.tones;
        let chord_type = self.props.chord_type;

        let root = tones.require(N1)?;
        tones.require(chord_type.middle())?;
        let fifth = tones.require(N5)?;

        let mut quality = "";
        let mut ext = "";
        let mut add: Vec<&str> = Vec::new();

        if chord_type == ChordType::Triad {
            let third = tones.require(N3)?;
            let lower = root.interval(&third);
            let upper = third.interval(&fifth);

            quality = match (lower, upper) {
                (3, 3) => "dim",
                (3, 4) => "min",
                (4, 3) => "maj",
                (4, 4) => "aug",
                _ => return Err(StructureError::LowerStructure { lower, upper }),
            };
        }

        if let Some(seventh) = tones.get(N7) {
            match fifth.interval(&seventh) {
                3 => {
                    ext = "7";
                    if quality == "maj" {
                        quality = "";
                    }
                }
                4 => match quality {
                    "min" | "" => ext = "maj7",
                    "dim" => {
                        quality = "min";
                        ext = "7b5";
                    }
                    _ => ext = "7",
                },
                other => return Err(StructureError::Seventh(other)),
            }
        }

        if let Some(ninth) = tones.get(N9) {
            match root.interval(&ninth) {
                1 => add.push("b9"),
                2 if ext == "7" => ext = "9",
                2 => add.push("9"),
                3 => {
                    // A ninth that sounds like the third is just the third again.
                    if !ninth.is_same(&tones.require(N3)?) {
                        add.push("#9");
                    }
                }
                other => return Err(StructureError::Ninth(other)),
            }
        }

        if let Some(eleventh) = tones.get(N11) {
            match root.interval(&eleventh) {
                5 if ext == "9" => ext = "11",
                5 => add.push("11"),
                6 => add.push("#11"),
                other => return Err(StructureError::Eleventh(other)),
            }
        }

        if quality == "maj" && ext.is_empty() {
            quality = "";
        }

        let mut name = format!("{}{}{}{}", root.name(), quality, ext, chord_type.sus_label());

        if !add.is_empty() {
            name.push_str(&format!("(add{})", add.join(",")));
        }

        if self.props.inversion != Inversion::Root {
            let bass = tones.require(self.props.inversion.bass(chord_type))?;
            name.push('/');
            name.push_str(&bass.name());
        }

        Ok(name)
    }

    /// `name` with the accidentals drawn as music symbols.
    pub fn name_unicode(&self) -> Result<String> {
        Ok(self
            .name()?
            .replace("bb", "\u{1D12B}")
            .replace('#', "\u{266F}")
            .replace('b', "\u{266D}")
            .replace('x', "\u{1D12A}"))
    }

    /// The chord's notes, bass first.
    ///
    /// In an inversion the bass tone is pulled out of the ascending list and
    /// put in front; the rest keep their order.
    pub fn note_list(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.tones.iter().map(|(_, note)| note).collect();

        let position = self.props.inversion.position();
        if position > 0 && position < notes.len() {
            let bass = notes.remove(position);
            notes.insert(0, bass);
        }

        notes
    }
}

impl TryFrom<ChordProps> for Chord {
    type Error = TheoryError;

    fn try_from(props: ChordProps) -> Result<Chord> {
        Chord::from_props(props)
    }
}

impl From<Chord> for ChordProps {
    fn from(chord: Chord) -> ChordProps {
        chord.props
    }
}

impl NamedNoteList for Chord {
    fn keep(&self) -> bool {
        self.keep
    }

    fn name(&self) -> Result<String> {
        Chord::name(self)
    }

    fn name_unicode(&self) -> Result<String> {
        Chord::name_unicode(self)
    }

    fn note_list(&self) -> Vec<Note> {
        Chord::note_list(self)
    }

    fn is_same(&self, other: &Chord) -> bool {
        Chord::is_same(self, other)
    }
}
