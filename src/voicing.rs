//! Octave assignment for a bass-first list of chord tones.
//!
//! ```
//! use diatonic::scale::Scale;
//! use diatonic::voicing::voice_chord;
//!
//! let chord = Scale::default().chord_for_degree(1).unwrap();
//! assert_eq!(voice_chord(&chord), ["C3", "E4", "G4"]);
//! ```

use std::fmt;

use crate::error::Result;
use crate::note::{Note, NoteClass};

/// Anything that can be shown as a named, ordered list of notes.
pub trait NamedNoteList {
    /// Marker owned by the caller, e.g. a pinned entry in a chord list.
    fn keep(&self) -> bool;

    fn name(&self) -> Result<String>;

    fn name_unicode(&self) -> Result<String>;

    /// The notes, lowest first.
    fn note_list(&self) -> Vec<Note>;

    fn is_same(&self, other: &Self) -> bool
    where
        Self: Sized;
}

/// Octave of the bass tone.
pub const BASS_OCTAVE: u8 = 3;

/// Order of the letters within one octave, counted from C.
pub fn placement(class: NoteClass) -> u8 {
    match class {
        NoteClass::C => 0,
        NoteClass::D => 1,
        NoteClass::E => 2,
        NoteClass::F => 3,
        NoteClass::G => 4,
        NoteClass::A => 5,
        NoteClass::B => 6,
    }
}

/// A note placed in a specific octave.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VoicedTone {
    pub note: Note,
    pub octave: u8,
}

impl fmt::Display for VoicedTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

/// Assign octaves to `notes`, bass first.
///
/// The bass sits in `BASS_OCTAVE` and the next tone always starts an octave
/// higher. After that a tone moves up another octave whenever its letter is
/// not above the previous tone's letter. Notes are respelled with sharps.
pub fn voice_notes(notes: &[Note]) -> Vec<VoicedTone> {
    let mut octave = BASS_OCTAVE;
    let mut last: Option<u8> = None;

    notes
        .iter()
        .enumerate()
        .map(|(i, note)| {
            let note = note.to_sharp();
            let place = placement(note.class());

            if last.map_or(false, |last| place <= last) {
                octave += 1;
            }
            let voiced = VoicedTone { note, octave };

            if i == 0 {
                octave += 1;
            } else {
                last = Some(place);
            }

            voiced
        })
        .collect()
}

pub fn voice<L: NamedNoteList + ?Sized>(list: &L) -> Vec<VoicedTone> {
    voice_notes(&list.note_list())
}

/// `voice` rendered as display strings such as `"C3"` or `"A#4"`.
pub fn voice_chord<L: NamedNoteList + ?Sized>(list: &L) -> Vec<String> {
    voice(list).iter().map(VoicedTone::to_string).collect()
}
