//! # diatonic
//!
//! Spelling and naming for notes, diatonic scales and the chords built on
//! their degrees.
//!
//! The `note` module holds spelled notes and their interval arithmetic, the
//! `scale` module spells the seven modes from any root, and the `chord`
//! module picks chord tones from a scale and names the result.
//!
//! ```
//! use diatonic::chord::{Extension, Inversion};
//! use diatonic::scale::{Mode, Scale};
//! use diatonic::voicing::voice_chord;
//!
//! let scale = Scale::new("C", Mode::Minor).unwrap();
//! let chord = scale.chord_for_degree(2).unwrap();
//!
//! assert_eq!(chord.name().unwrap(), "Ddim");
//! assert_eq!(scale.roman_for_degree(2).unwrap(), "ii\u{b0}");
//!
//! let chord = chord
//!     .set_extension(Extension::Seventh, true)
//!     .set_inversion(Inversion::Third);
//! assert_eq!(chord.name().unwrap(), "Dmin7b5/C");
//! assert_eq!(voice_chord(&chord), ["C3", "D4", "F4", "G#4"]);
//! ```

pub mod chord;
pub mod error;
pub mod note;
mod parser;
pub mod scale;
pub mod voicing;

pub use chord::{Chord, ChordProps, ChordType, ChordalTone, Extension, Extensions, Inversion};
pub use error::{Result, StructureError, TheoryError};
pub use note::{Note, NoteClass};
pub use scale::{Mode, Scale, ScaleProps, StepPattern};
pub use voicing::{voice_chord, NamedNoteList, VoicedTone};
