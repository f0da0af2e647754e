//! Integration tests for diatonic
//!
//! These walk every constructible note, mode and degree through the public
//! API and check the properties the whole pipeline relies on.

use diatonic::chord::{ChordType, Extension, Extensions, Inversion};
use diatonic::note::{Note, NoteClass, MAX_ALTER, MIN_ALTER};
use diatonic::scale::{Mode, Scale, SCALE_DEGREES};
use diatonic::voicing::voice_chord;
use diatonic::TheoryError;

fn all_notes() -> Vec<Note> {
    NoteClass::ALL
        .into_iter()
        .flat_map(|class| (MIN_ALTER..=MAX_ALTER).map(move |alter| Note::new(class, alter).unwrap()))
        .collect()
}

fn all_scales() -> Vec<Scale> {
    all_notes()
        .into_iter()
        .flat_map(|root| Mode::ALL.into_iter().filter_map(move |mode| Scale::from_root(root, mode).ok()))
        .collect()
}

#[test]
fn sharp_form_never_has_flats() {
    for note in all_notes() {
        let sharp = note.to_sharp();
        assert!(sharp.alter() >= 0, "{} became {}", note, sharp);
        assert!(sharp.alter() <= 1, "{} became {}", note, sharp);
        assert!(note.is_same(&sharp));
    }
}

#[test]
fn sameness_is_reflexive_and_symmetric() {
    let notes = all_notes();
    for a in &notes {
        assert!(a.is_same(a));
        for b in &notes {
            assert_eq!(a.is_same(b), b.is_same(a), "{} vs {}", a, b);
        }
    }
}

#[test]
fn intervals_stay_within_an_octave() {
    let notes = all_notes();
    for a in &notes {
        assert_eq!(a.interval(a), 0);
        for b in &notes {
            let up = a.interval(b);
            assert!(up < 12, "{} to {} gave {}", a, b, up);
            if !a.is_same(b) {
                assert_eq!(up + b.interval(a), 12, "{} and {}", a, b);
            }
        }
    }
}

#[test]
fn names_parse_back() {
    for note in all_notes() {
        assert_eq!(note.name().parse::<Note>(), Ok(note));
        assert_eq!(note.name_unicode().parse::<Note>(), Ok(note));
    }
}

#[test]
fn scales_use_each_letter_once() {
    let scales = all_scales();
    assert_eq!(scales.len(), 203);

    for scale in scales {
        let notes = scale.notes();
        assert_eq!(notes.len(), SCALE_DEGREES);

        let mut class = scale.root().class();
        for note in notes {
            assert_eq!(note.class(), class, "{}", scale);
            class = class.next();
        }
    }
}

#[test]
fn scales_follow_their_step_pattern() {
    for scale in all_scales() {
        let steps = scale.mode().steps();
        for (i, pair) in scale.notes().windows(2).enumerate() {
            assert_eq!(pair[0].interval(&pair[1]), steps.steps()[i + 1], "{}", scale);
        }
    }
}

#[test]
fn c_major_degrees() {
    let scale = Scale::new("C", Mode::Major).unwrap();
    assert_eq!(scale.get_note(1).unwrap().name(), "C");
    assert_eq!(scale.get_note(3).unwrap().name(), "E");
    assert_eq!(scale.get_note(5).unwrap().name(), "G");
    assert_eq!(scale.chord_for_degree(1).unwrap().name().unwrap(), "C");
}

#[test]
fn dominant_seventh() {
    let scale = Scale::new("C", Mode::Major).unwrap();
    let chord = scale
        .chord_for_degree(5)
        .unwrap()
        .set_extension(Extension::Seventh, true);
    assert_eq!(chord.name().unwrap(), "G7");
}

#[test]
fn diminished_supertonic_in_minor() {
    let scale = Scale::new("C", Mode::Minor).unwrap();
    assert_eq!(scale.chord_for_degree(2).unwrap().name().unwrap(), "Ddim");
    assert_eq!(scale.roman_for_degree(2).unwrap(), "ii\u{b0}");
}

#[test]
fn voiced_c_major_triad() {
    let chord = Scale::default().chord_for_degree(1).unwrap();
    assert_eq!(voice_chord(&chord), ["C3", "E4", "G4"]);
}

#[test]
fn first_inversion_note_order() {
    let chord = Scale::default()
        .chord_for_degree(1)
        .unwrap()
        .set_inversion(Inversion::First);
    let names: Vec<String> = chord.note_list().iter().map(Note::name).collect();
    assert_eq!(names, ["E", "C", "G"]);
}

#[test]
fn every_diatonic_chord_has_a_name() {
    let shapes = [ChordType::Triad, ChordType::Sus2, ChordType::Sus4];

    for scale in all_scales() {
        for degree in 1..=SCALE_DEGREES as u8 {
            let base = scale.chord_for_degree(degree).unwrap();
            for chord_type in shapes {
                for bits in 0..8u8 {
                    let extensions = Extensions {
                        seventh: bits & 1 != 0,
                        ninth: bits & 2 != 0,
                        eleventh: bits & 4 != 0,
                    };
                    let chord = base.set_chord_type(chord_type).set_extensions(extensions);

                    let name = chord.name();
                    assert!(name.is_ok(), "{} degree {}: {:?}", scale, degree, name);
                    assert!(name.unwrap().starts_with(&chord.root_name()));
                }
            }
        }
    }
}

#[test]
fn note_list_matches_tone_count() {
    for scale in all_scales().into_iter().take(40) {
        for degree in 1..=SCALE_DEGREES as u8 {
            let chord = scale
                .chord_for_degree(degree)
                .unwrap()
                .set_extension(Extension::Seventh, true);

            for inversion in Inversion::ALL {
                let notes = chord.set_inversion(inversion).note_list();
                assert_eq!(notes.len(), 4);
                assert_eq!(notes[0], chord.tones().get(inversion.bass(chord.chord_type())).unwrap());
            }
        }
    }
}

#[test]
fn roman_numerals_follow_quality() {
    for scale in all_scales() {
        for degree in 1..=SCALE_DEGREES as u8 {
            let roman = scale.roman_for_degree(degree).unwrap();
            let chord = scale.chord_for_degree(degree).unwrap();
            let name = chord.name().unwrap();

            if name.ends_with("dim") {
                assert!(roman.ends_with('\u{b0}'), "{} {}", scale, roman);
            } else if name.ends_with("min") {
                assert_eq!(roman, roman.to_lowercase());
            } else {
                assert_eq!(roman, roman.to_uppercase());
            }
        }
    }
}

#[test]
fn bad_input_is_not_internal() {
    let errors = [
        Note::new(NoteClass::C, 3).unwrap_err(),
        "H#".parse::<Note>().unwrap_err(),
        Scale::default().get_note(0).unwrap_err(),
        Scale::default().chord_for_degree(8).unwrap_err(),
        "C bebop".parse::<Scale>().unwrap_err(),
    ];

    for err in errors {
        assert!(!err.is_internal(), "{}", err);
    }

    assert!(matches!(
        Scale::default().chord_for_degree(0),
        Err(TheoryError::DegreeOutOfRange(0))
    ));
}
