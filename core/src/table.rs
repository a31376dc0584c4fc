//! Morse symbol table
//!
//! Every entry maps a clear-text literal to a pulse sequence written with
//! `_` (long pulse, "dah") and `.` (short pulse, "dit"). Letters, digits,
//! punctuation and a fixed set of prosigns are glyphs; space, CR, LF and tab
//! are whitespace-class symbols that render as gaps instead of pulses.

/// Model token for a long pulse
pub const LONG_TOKEN: char = '_';
/// Model token for a short pulse
pub const SHORT_TOKEN: char = '.';
/// Separator inside multi-letter prosign sequences
pub const LETTER_TOKEN: char = ' ';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pulse {
    Short,
    Long,
}

impl Pulse {
    pub fn from_token(token: char) -> Option<Self> {
        match token {
            SHORT_TOKEN => Some(Pulse::Short),
            LONG_TOKEN => Some(Pulse::Long),
            _ => None,
        }
    }
}

/// One unit of a glyph's sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    Pulse(Pulse),
    /// Letter boundary inside a multi-letter prosign
    LetterGap,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Glyph {
    pub literal: &'static str,
    pub sequence: &'static str,
}

impl Glyph {
    const fn new(literal: &'static str, sequence: &'static str) -> Self {
        Self { literal, sequence }
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.sequence.chars().filter_map(|c| match c {
            LETTER_TOKEN => Some(Element::LetterGap),
            other => Pulse::from_token(other).map(Element::Pulse),
        })
    }

    pub fn pulses(&self) -> impl Iterator<Item = Pulse> + '_ {
        self.sequence.chars().filter_map(Pulse::from_token)
    }

    pub fn pulse_count(&self) -> usize {
        self.pulses().count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Whitespace {
    Space,
    CarriageReturn,
    LineFeed,
    Tab,
}

impl Whitespace {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Whitespace::Space),
            '\r' => Some(Whitespace::CarriageReturn),
            '\n' => Some(Whitespace::LineFeed),
            '\t' => Some(Whitespace::Tab),
            _ => None,
        }
    }

    pub fn is_line_break(self) -> bool {
        matches!(self, Whitespace::CarriageReturn | Whitespace::LineFeed)
    }

    /// Width in word gaps; line breaks are never scaled and count as zero
    pub fn word_gaps(self) -> usize {
        match self {
            Whitespace::Space => 1,
            Whitespace::Tab => crate::TAB_WORD_GAPS,
            Whitespace::CarriageReturn | Whitespace::LineFeed => 0,
        }
    }
}

/// A position in a message: a table glyph, a gap-class whitespace, or the
/// invalid sentinel for characters the table does not know
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Glyph(&'static Glyph),
    Whitespace(Whitespace),
    Invalid,
}

impl Symbol {
    pub fn is_glyph(&self) -> bool {
        matches!(self, Symbol::Glyph(_))
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Symbol::Whitespace(_))
    }

    /// Clear text of this symbol; line breaks use the host line separator
    pub fn clear_text(&self) -> &'static str {
        match self {
            Symbol::Glyph(glyph) => glyph.literal,
            Symbol::Whitespace(Whitespace::Space) => " ",
            Symbol::Whitespace(Whitespace::Tab) => "\t",
            Symbol::Whitespace(_) => crate::LINE_SEPARATOR,
            Symbol::Invalid => "",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// Match against clear-text literals, case-insensitively
    Literal,
    /// Match against pulse sequences exactly
    Sequence,
}

pub static GLYPHS: &[Glyph] = &[
    Glyph::new("A", "._"),
    Glyph::new("B", "_..."),
    Glyph::new("C", "_._."),
    Glyph::new("D", "_.."),
    Glyph::new("E", "."),
    Glyph::new("F", ".._."),
    Glyph::new("G", "__."),
    Glyph::new("H", "...."),
    Glyph::new("I", ".."),
    Glyph::new("J", ".___"),
    Glyph::new("K", "_._"),
    Glyph::new("L", "._.."),
    Glyph::new("M", "__"),
    Glyph::new("N", "_."),
    Glyph::new("O", "___"),
    Glyph::new("P", ".__."),
    Glyph::new("Q", "__._"),
    Glyph::new("R", "._."),
    Glyph::new("S", "..."),
    Glyph::new("T", "_"),
    Glyph::new("U", ".._"),
    Glyph::new("V", "..._"),
    Glyph::new("W", ".__"),
    Glyph::new("X", "_.._"),
    Glyph::new("Y", "_.__"),
    Glyph::new("Z", "__.."),
    Glyph::new("0", "_____"),
    Glyph::new("1", ".____"),
    Glyph::new("2", "..___"),
    Glyph::new("3", "...__"),
    Glyph::new("4", "...._"),
    Glyph::new("5", "....."),
    Glyph::new("6", "_...."),
    Glyph::new("7", "__..."),
    Glyph::new("8", "___.."),
    Glyph::new("9", "____."),
    Glyph::new("Ä", "._._"),
    Glyph::new("Ö", "___."),
    Glyph::new("Ü", "..__"),
    Glyph::new("Å", ".__._"),
    Glyph::new("É", ".._.."),
    Glyph::new("È", "._.._"),
    Glyph::new("ß", "...__.."),
    Glyph::new("CH", "____"),
    Glyph::new("Ñ", "__.__"),
    Glyph::new(".", "._._._"),
    Glyph::new(",", "__..__"),
    Glyph::new(":", "___..."),
    Glyph::new(";", "_._._."),
    Glyph::new("?", "..__.."),
    Glyph::new("!", "_._.__"),
    Glyph::new("-", "_...._"),
    Glyph::new("_", "..__._"),
    Glyph::new("(", "_.__."),
    Glyph::new(")", "_.__._"),
    Glyph::new("'", ".____."),
    Glyph::new("=", "_..._"),
    Glyph::new("+", "._._."),
    Glyph::new("/", "_.._."),
    Glyph::new("\"", "._.._."),
    Glyph::new("@", ".__._."),
    Glyph::new("<KA>", "_._._"),
    Glyph::new("<VE>", "..._."),
    Glyph::new("<SK>", "..._._"),
    Glyph::new("<SOS>", "...___..."),
    Glyph::new("<CQD>", "_._. __._ _.."),
    Glyph::new("<HH>", "........"),
];

/// Case folding for literal lookups. Characters whose upper case is more
/// than one character (`ß`) keep their own form so they stay encodable.
fn fold_case(key: &str) -> String {
    let upper = key.to_uppercase();
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if upper.chars().count() != 1 => c.to_string(),
        _ => upper,
    }
}

/// Find the symbol for a clear-text literal or a pulse sequence
///
/// Returns [`Symbol::Invalid`] when nothing matches. Whitespace entries are
/// only reachable by literal; the decoder handles gaps structurally.
pub fn lookup(key: &str, by: Lookup) -> Symbol {
    match by {
        Lookup::Literal => {
            let mut chars = key.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if let Some(ws) = Whitespace::from_char(c) {
                    return Symbol::Whitespace(ws);
                }
            }
            let folded = fold_case(key);
            GLYPHS
                .iter()
                .find(|glyph| glyph.literal == folded)
                .map_or(Symbol::Invalid, Symbol::Glyph)
        }
        Lookup::Sequence => GLYPHS
            .iter()
            .find(|glyph| glyph.sequence == key)
            .map_or(Symbol::Invalid, Symbol::Glyph),
    }
}

/// Lookup by literal for a single character
pub fn lookup_char(c: char) -> Symbol {
    let mut buf = [0u8; 4];
    lookup(c.encode_utf8(&mut buf), Lookup::Literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_literals_are_unique() {
        let mut seen = HashSet::new();
        for glyph in GLYPHS {
            assert!(seen.insert(glyph.literal), "duplicate literal {}", glyph.literal);
        }
    }

    #[test]
    fn test_sequences_are_unique() {
        let mut seen = HashSet::new();
        for glyph in GLYPHS {
            assert!(seen.insert(glyph.sequence), "duplicate sequence {}", glyph.sequence);
        }
    }

    #[test]
    fn test_sequences_use_model_tokens_only() {
        for glyph in GLYPHS {
            assert!(!glyph.sequence.is_empty());
            assert!(glyph
                .sequence
                .chars()
                .all(|c| c == SHORT_TOKEN || c == LONG_TOKEN || c == LETTER_TOKEN));
        }
    }

    #[test]
    fn test_lookup_literal_folds_case() {
        assert_eq!(lookup("a", Lookup::Literal), lookup("A", Lookup::Literal));
        assert_eq!(lookup("ä", Lookup::Literal), lookup("Ä", Lookup::Literal));
        assert_eq!(lookup("ch", Lookup::Literal), lookup("CH", Lookup::Literal));
        match lookup("s", Lookup::Literal) {
            Symbol::Glyph(glyph) => assert_eq!(glyph.sequence, "..."),
            other => panic!("expected glyph, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_eszett_survives_case_folding() {
        match lookup_char('ß') {
            Symbol::Glyph(glyph) => assert_eq!(glyph.literal, "ß"),
            other => panic!("expected glyph, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_sequence_is_exact() {
        match lookup("_._.", Lookup::Sequence) {
            Symbol::Glyph(glyph) => assert_eq!(glyph.literal, "C"),
            other => panic!("expected glyph, got {:?}", other),
        }
        // a literal is not a sequence
        assert_eq!(lookup("C", Lookup::Sequence), Symbol::Invalid);
        assert_eq!(lookup("._._._._._", Lookup::Sequence), Symbol::Invalid);
    }

    #[test]
    fn test_lookup_whitespace() {
        assert_eq!(lookup_char(' '), Symbol::Whitespace(Whitespace::Space));
        assert_eq!(lookup_char('\r'), Symbol::Whitespace(Whitespace::CarriageReturn));
        assert_eq!(lookup_char('\n'), Symbol::Whitespace(Whitespace::LineFeed));
        assert_eq!(lookup_char('\t'), Symbol::Whitespace(Whitespace::Tab));
        // other whitespace has no entry
        assert_eq!(lookup_char('\u{a0}'), Symbol::Invalid);
    }

    #[test]
    fn test_lookup_unknown() {
        for c in ['#', '$', '%', '&', '*', '<', '>', '[', '\\', ']', '^', '`', '{', '|', '}', '~'] {
            assert_eq!(lookup_char(c), Symbol::Invalid, "{} should be invalid", c);
        }
        assert_eq!(lookup("", Lookup::Literal), Symbol::Invalid);
    }

    #[test]
    fn test_whitespace_widths() {
        assert_eq!(Whitespace::Space.word_gaps(), 1);
        assert_eq!(Whitespace::Tab.word_gaps(), 3);
        for ws in [Whitespace::CarriageReturn, Whitespace::LineFeed] {
            assert!(ws.is_line_break());
            assert_eq!(ws.word_gaps(), 0);
        }
        assert!(!Whitespace::Space.is_line_break());
        assert!(!Whitespace::Tab.is_line_break());
    }

    #[test]
    fn test_prosign_elements_split_letters() {
        let cqd = GLYPHS.iter().find(|g| g.literal == "<CQD>").unwrap();
        let gaps = cqd.elements().filter(|e| *e == Element::LetterGap).count();
        assert_eq!(gaps, 2);
        assert_eq!(cqd.pulse_count(), 11);
    }
}
