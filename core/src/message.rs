use crate::error::{Issue, MorseError, Result};
use crate::table::{lookup_char, Symbol};

/// A clear-text message parsed once into its symbol sequence
///
/// Holds one [`Symbol`] per input character (after CRLF and lone CR are
/// folded into LF). Characters without a table entry become
/// [`Symbol::Invalid`] so positions still line up with the input text.
/// Every rendering is a pure function of this sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    symbols: Vec<Symbol>,
    issues: Vec<Issue>,
}

/// One step of a message's layout: a symbol, or the inter-letter gap the
/// encoder places after it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Item {
    Symbol(Symbol),
    LetterGap,
}

/// Fold CRLF and lone CR into LF
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

impl Message {
    pub fn new(text: &str) -> Self {
        let normalized = normalize_line_breaks(text);
        let mut issues = Vec::new();
        let symbols = normalized
            .chars()
            .enumerate()
            .map(|(position, character)| {
                let symbol = lookup_char(character);
                if symbol == Symbol::Invalid {
                    issues.push(Issue::UnknownCharacter { position, character }.logged());
                }
                symbol
            })
            .collect();

        Self { symbols, issues }
    }

    /// Build a message from text that may be absent
    pub fn try_new(text: Option<&str>) -> Result<Self> {
        text.map(Self::new).ok_or(MorseError::NullInput("message"))
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Unknown characters met while building, in input order
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// The text as the table understands it: upper case, unknown characters
    /// dropped, line breaks as the host line separator
    pub fn clear_text(&self) -> String {
        self.symbols.iter().map(Symbol::clear_text).collect()
    }

    /// Whether an inter-letter gap follows the symbol at `index`
    ///
    /// Only glyphs get a gap, never the last symbol, and never a symbol
    /// followed by whitespace (the word or line gap stands in for it). The
    /// rule is positional: an invalid symbol after a glyph still counts as a
    /// neighbour.
    pub fn has_letter_gap_after(&self, index: usize) -> bool {
        match (self.symbols.get(index), self.symbols.get(index + 1)) {
            (Some(current), Some(next)) => current.is_glyph() && !next.is_whitespace(),
            _ => false,
        }
    }

    /// Symbols interleaved with the inter-letter gaps every rendering shares
    pub fn layout(&self) -> impl Iterator<Item = Item> + '_ {
        self.symbols.iter().enumerate().flat_map(move |(index, &symbol)| {
            let gap = self.has_letter_gap_after(index).then_some(Item::LetterGap);
            std::iter::once(Item::Symbol(symbol)).chain(gap)
        })
    }
}
