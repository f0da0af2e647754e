//! Handles parsing of note and scale names.

use combine::error::ParseError;
use combine::parser::char::{char, letter, space};
use combine::{choice, easy, eof, many1, optional, satisfy, satisfy_map, skip_many1, EasyParser, Parser, Stream};

use crate::error::{Result, TheoryError};
use crate::note::{Note, NoteClass, PitchOffset};
use crate::scale::Mode;

/// Parses a single accidental.
///
/// ```text
/// Accidental : 'bb' | 'b' | '#' | 'x' | '𝄫' | '♭' | '♯' | '𝄪'
///            ;
/// ```
fn accidental<Input>() -> impl Parser<Input, Output = PitchOffset>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let flats = char('b')
        .with(optional(char('b')))
        .map(|double: Option<char>| -> PitchOffset { if double.is_some() { -2 } else { -1 } });

    let glyphs = satisfy(|c: char| matches!(c, '#' | 'x' | '\u{266D}' | '\u{266F}' | '\u{1D12A}' | '\u{1D12B}'))
        .map(|c: char| -> PitchOffset {
            match c {
                '#' | '\u{266F}' => 1,
                'x' | '\u{1D12A}' => 2,
                '\u{266D}' => -1,
                _ => -2,
            }
        });

    choice((flats, glyphs)).expected("accidental: bb b # x")
}

/// Parses a root letter plus at most one accidental.
///
/// The letter may be given in either case, so `bb` reads as B flat.
///
/// ```text
/// Note : [A-Ga-g] Accidental?
///      ;
/// ```
fn note<Input>() -> impl Parser<Input, Output = (NoteClass, PitchOffset)>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let class = satisfy_map(|c: char| NoteClass::from_char(c.to_ascii_uppercase()))
        .expected("note: [A-G]");

    (class, optional(accidental())).map(|(class, alter)| (class, alter.unwrap_or(0)))
}

/// Parses a tonal center followed by an optional mode name.
///
/// ```text
/// Scale : Note (' '+ [a-zA-Z]+)?
///       ;
/// ```
fn scale<Input>() -> impl Parser<Input, Output = ((NoteClass, PitchOffset), Option<String>)>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let mode = skip_many1(space()).with(many1::<String, _, _>(letter())).expected("mode name");

    (note(), optional(mode))
}

fn parse_error(input: &str, err: easy::ParseError<&str>) -> TheoryError {
    let err = err.map_position(|p| p.translate_position(input));
    TheoryError::Parse {
        input: input.to_owned(),
        reason: err.to_string().trim_end().replace('\n', "; "),
    }
}

pub(crate) fn parse_note(input: &str) -> Result<Note> {
    let input = input.trim();
    let ((class, alter), _) = note()
        .skip(eof())
        .easy_parse(input)
        .map_err(|err| parse_error(input, err))?;

    Note::new(class, alter)
}

pub(crate) fn parse_scale(input: &str) -> Result<(Note, Mode)> {
    let input = input.trim();
    let (((class, alter), mode), _) = scale()
        .skip(eof())
        .easy_parse(input)
        .map_err(|err| parse_error(input, err))?;

    let mode = match mode {
        Some(name) => name.parse()?,
        None => Mode::Major,
    };

    Ok((Note::new(class, alter)?, mode))
}
