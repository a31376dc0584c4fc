use crate::message::{Item, Message};
use crate::table::{Element, Glyph, Pulse, Symbol, Whitespace};
use crate::{
    GAP, LINE_SEPARATOR, LONG_MARK, PLAIN_LETTER_GAP, PLAIN_WORD_GAP, SHORT_MARK, SIGNAL_GAP,
    SIGNAL_LETTER_GAP, SIGNAL_LONG_MARK_WIDTH, SIGNAL_MARK, SIGNAL_WORD_GAP,
};

/// Notation kinds a message can be rendered in
///
/// Plain notation draws dits as `·` and dahs as `–`, separating letters with
/// one space and words with three. Signal notation spells out the on/off
/// keying: one `▓` per dit unit, three per dah, one `˽` between pulses,
/// three between letters and seven between words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Notation {
    #[default]
    Plain,
    Signal,
}

impl Notation {
    pub fn gap_char(self) -> char {
        match self {
            Notation::Plain => GAP,
            Notation::Signal => SIGNAL_GAP,
        }
    }

    pub fn letter_gap(self) -> String {
        let width = match self {
            Notation::Plain => PLAIN_LETTER_GAP,
            Notation::Signal => SIGNAL_LETTER_GAP,
        };
        self.gap_char().to_string().repeat(width)
    }

    pub fn word_gap(self) -> String {
        let width = match self {
            Notation::Plain => PLAIN_WORD_GAP,
            Notation::Signal => SIGNAL_WORD_GAP,
        };
        self.gap_char().to_string().repeat(width)
    }

    fn mark(self, pulse: Pulse) -> String {
        match (self, pulse) {
            (Notation::Plain, Pulse::Short) => SHORT_MARK.to_string(),
            (Notation::Plain, Pulse::Long) => LONG_MARK.to_string(),
            (Notation::Signal, Pulse::Short) => SIGNAL_MARK.to_string(),
            (Notation::Signal, Pulse::Long) => SIGNAL_MARK.to_string().repeat(SIGNAL_LONG_MARK_WIDTH),
        }
    }

    /// Separator between two pulses of the same letter
    fn pulse_gap(self) -> String {
        match self {
            Notation::Plain => String::new(),
            Notation::Signal => SIGNAL_GAP.to_string(),
        }
    }
}

/// Render the pulses of one glyph, without any trailing gap
pub fn render_glyph(glyph: &Glyph, notation: Notation) -> String {
    let mut out = String::new();
    let mut pending_gap: Option<String> = None;
    for element in glyph.elements() {
        match element {
            Element::Pulse(pulse) => {
                if let Some(gap) = pending_gap.take() {
                    out.push_str(&gap);
                }
                out.push_str(&notation.mark(pulse));
                pending_gap = Some(notation.pulse_gap());
            }
            Element::LetterGap => pending_gap = Some(notation.letter_gap()),
        }
    }
    out
}

/// Render a whitespace-class symbol as its gap
pub fn render_whitespace(whitespace: Whitespace, notation: Notation) -> String {
    if whitespace.is_line_break() {
        LINE_SEPARATOR.to_string()
    } else {
        notation.word_gap().repeat(whitespace.word_gaps())
    }
}

pub fn render_symbol(symbol: Symbol, notation: Notation) -> String {
    match symbol {
        Symbol::Glyph(glyph) => render_glyph(glyph, notation),
        Symbol::Whitespace(whitespace) => render_whitespace(whitespace, notation),
        Symbol::Invalid => String::new(),
    }
}

/// Render a whole message
pub fn encode(message: &Message, notation: Notation) -> String {
    message
        .layout()
        .map(|item| match item {
            Item::Symbol(symbol) => render_symbol(symbol, notation),
            Item::LetterGap => notation.letter_gap(),
        })
        .collect()
}

impl Message {
    pub fn notation(&self, notation: Notation) -> String {
        encode(self, notation)
    }
}
