use crate::error::{Issue, MorseError, Result};
use crate::table::{lookup, Lookup, Symbol, LONG_TOKEN, SHORT_TOKEN};
use crate::{
    ASCII_LONG_MARK, ASCII_SHORT_MARK, GAP, LINE_SEPARATOR, LONG_MARK, PLAIN_WORD_GAP,
    SHORT_MARK, SIGNAL_GAP, SIGNAL_LETTER_GAP, SIGNAL_LONG_MARK_WIDTH, SIGNAL_MARK,
    SIGNAL_WORD_GAP, TAB_WORD_GAPS,
};
use std::iter::Peekable;
use std::str::Chars;

/// The two notation forms the decoder understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotationForm {
    Plain,
    Signal,
}

/// Clear text recovered from a notation string
///
/// Decoding is lossy: case and the exact whitespace styling of the original
/// text cannot be recovered. Everything that had to be skipped is listed in
/// `issues`, in the order it was met.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub issues: Vec<Issue>,
    /// Detected form, `None` when the input was empty or not notation at all
    pub form: Option<NotationForm>,
}

fn is_plain_glyph(c: char) -> bool {
    matches!(c, SHORT_MARK | LONG_MARK | ASCII_SHORT_MARK | ASCII_LONG_MARK)
}

fn is_signal_glyph(c: char) -> bool {
    c == SIGNAL_MARK || c == SIGNAL_GAP
}

/// Classify a notation string by its first non-blank character
///
/// Input made only of blanks is plain-form gap structure.
pub fn detect_form(notation: &str) -> std::result::Result<NotationForm, Issue> {
    match notation.chars().find(|c| !c.is_whitespace()) {
        None => Ok(NotationForm::Plain),
        Some(c) if is_signal_glyph(c) => Ok(NotationForm::Signal),
        Some(c) if is_plain_glyph(c) => Ok(NotationForm::Plain),
        Some(found) => Err(Issue::NotNotation { found }),
    }
}

/// Accumulates letter tokens and decoded text
#[derive(Default)]
struct TextBuilder {
    text: String,
    issues: Vec<Issue>,
    /// Token as written in the notation, for issue reports
    raw: String,
    /// Token translated to `.`/`_` model tokens
    sequence: String,
}

impl TextBuilder {
    fn push_pulse(&mut self, raw: char, token: char) {
        self.raw.push(raw);
        self.sequence.push(token);
    }

    /// Gap between two pulses of the same letter, kept for issue reports
    fn push_pulse_gap(&mut self, run: usize) {
        self.raw.extend(std::iter::repeat(SIGNAL_GAP).take(run));
    }

    /// A character with no meaning inside a letter; it spoils the token
    fn push_foreign(&mut self, c: char) {
        self.raw.push(c);
        self.sequence.push(c);
    }

    fn end_letter(&mut self) {
        if self.sequence.is_empty() {
            self.raw.clear();
            return;
        }
        match lookup(&self.sequence, Lookup::Sequence) {
            Symbol::Glyph(glyph) => self.text.push_str(glyph.literal),
            _ => {
                let token = std::mem::take(&mut self.raw);
                self.issues.push(Issue::UnknownToken { token }.logged());
            }
        }
        self.raw.clear();
        self.sequence.clear();
    }

    /// Emit the spaces and tabs of a gap run `run` glyphs wide
    fn push_gap_run(&mut self, run: usize, word_width: usize) {
        let words = run / word_width;
        for _ in 0..words / TAB_WORD_GAPS {
            self.text.push('\t');
        }
        for _ in 0..words % TAB_WORD_GAPS {
            self.text.push(' ');
        }
    }

    fn push_line_break(&mut self) {
        self.end_letter();
        self.text.push_str(LINE_SEPARATOR);
    }

    fn push_tab(&mut self) {
        self.end_letter();
        self.text.push('\t');
    }

    fn finish(mut self) -> (String, Vec<Issue>) {
        self.end_letter();
        (self.text, self.issues)
    }
}

/// Length of the run of `c` starting with the character just consumed
fn run_length(chars: &mut Peekable<Chars<'_>>, c: char) -> usize {
    let mut run = 1;
    while chars.next_if_eq(&c).is_some() {
        run += 1;
    }
    run
}

/// Consume the LF of a CRLF pair
fn skip_crlf(chars: &mut Peekable<Chars<'_>>, c: char) {
    if c == '\r' {
        chars.next_if_eq(&'\n');
    }
}

fn decode_plain(notation: &str) -> (String, Vec<Issue>) {
    let mut builder = TextBuilder::default();
    let mut chars = notation.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            GAP => {
                // one or two spaces only separate letters
                let run = run_length(&mut chars, GAP);
                builder.end_letter();
                builder.push_gap_run(run, PLAIN_WORD_GAP);
            }
            '\r' | '\n' => {
                skip_crlf(&mut chars, c);
                builder.push_line_break();
            }
            '\t' => builder.push_tab(),
            SHORT_MARK | ASCII_SHORT_MARK => builder.push_pulse(c, SHORT_TOKEN),
            LONG_MARK | ASCII_LONG_MARK => builder.push_pulse(c, LONG_TOKEN),
            other => builder.push_foreign(other),
        }
    }
    builder.finish()
}

fn decode_signal(notation: &str) -> (String, Vec<Issue>) {
    let mut builder = TextBuilder::default();
    let mut chars = notation.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            SIGNAL_MARK => {
                let run = run_length(&mut chars, SIGNAL_MARK);
                for _ in 0..run / SIGNAL_LONG_MARK_WIDTH {
                    builder.push_pulse(SIGNAL_MARK, LONG_TOKEN);
                }
                for _ in 0..run % SIGNAL_LONG_MARK_WIDTH {
                    builder.push_pulse(SIGNAL_MARK, SHORT_TOKEN);
                }
            }
            SIGNAL_GAP => {
                let run = run_length(&mut chars, SIGNAL_GAP);
                if run < SIGNAL_LETTER_GAP {
                    builder.push_pulse_gap(run);
                } else {
                    builder.end_letter();
                    builder.push_gap_run(run, SIGNAL_WORD_GAP);
                }
            }
            '\r' | '\n' => {
                skip_crlf(&mut chars, c);
                builder.push_line_break();
            }
            '\t' => builder.push_tab(),
            blank if blank.is_whitespace() => builder.end_letter(),
            other => builder.push_foreign(other),
        }
    }
    builder.finish()
}

/// Decode plain or signal notation back to clear text
///
/// Never fails: unknown tokens are skipped and input that is not notation
/// at all yields empty text. Both cases are reported in
/// [`Decoded::issues`].
pub fn decode(notation: &str) -> Decoded {
    if notation.is_empty() {
        return Decoded::default();
    }

    let form = match detect_form(notation) {
        Ok(form) => form,
        Err(issue) => {
            return Decoded {
                text: String::new(),
                issues: vec![issue.logged()],
                form: None,
            };
        }
    };

    let (text, issues) = match form {
        NotationForm::Plain => decode_plain(notation),
        NotationForm::Signal => decode_signal(notation),
    };
    log::debug!(
        "decoded {:?} notation into {} chars with {} issues",
        form,
        text.chars().count(),
        issues.len()
    );

    Decoded {
        text,
        issues,
        form: Some(form),
    }
}

/// Decode notation that may be absent
pub fn try_decode(notation: Option<&str>) -> Result<Decoded> {
    notation.map(decode).ok_or(MorseError::NullInput("morseCode"))
}
