use crate::encoder::{render_glyph, Notation};
use crate::message::{Item, Message};
use crate::table::{Glyph, Symbol};
use crate::{GAP, LINE_SEPARATOR, PLAIN_WORD_GAP};

/// Padding around each notation token; also separates neighbouring letters
pub const STACK_FILLER: char = GAP;

/// Two parallel lines being built for one input line
#[derive(Default)]
struct LinePair {
    labels: String,
    marks: String,
}

impl LinePair {
    fn push_glyph(&mut self, glyph: &Glyph) {
        let token = render_glyph(glyph, Notation::Plain);
        let label_width = glyph.literal.chars().count();
        let token_width = token.chars().count() + 2;
        let width = token_width.max(label_width);

        let left = (width / 2).saturating_sub(label_width / 2);
        let right = width - left - label_width;
        self.labels.push_str(&" ".repeat(left));
        self.labels.push_str(glyph.literal);
        self.labels.push_str(&" ".repeat(right));

        let pad = width - token_width;
        let filler = STACK_FILLER.to_string();
        self.marks.push_str(&filler.repeat(1 + pad / 2));
        self.marks.push_str(&token);
        self.marks.push_str(&filler.repeat(1 + pad - pad / 2));
    }

    fn push_blank(&mut self, width: usize) {
        self.labels.push_str(&" ".repeat(width));
        self.marks.push_str(&" ".repeat(width));
    }

    fn flush_into(&mut self, lines: &mut Vec<String>) {
        lines.push(std::mem::take(&mut self.labels));
        lines.push(std::mem::take(&mut self.marks));
    }

    fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.marks.is_empty()
    }
}

/// Render each letter's clear text centered above its plain notation
///
/// ```text
///   S    O    S
///  ···  –––  ···
/// ```
///
/// Every input line produces a label line followed by a notation line.
pub fn stacked(message: &Message) -> String {
    let mut lines = Vec::new();
    let mut pair = LinePair::default();

    for item in message.layout() {
        match item {
            Item::Symbol(Symbol::Glyph(glyph)) => pair.push_glyph(glyph),
            Item::Symbol(Symbol::Whitespace(whitespace)) if whitespace.is_line_break() => {
                pair.flush_into(&mut lines)
            }
            Item::Symbol(Symbol::Whitespace(whitespace)) => {
                pair.push_blank(PLAIN_WORD_GAP * whitespace.word_gaps())
            }
            // the filler around each token already separates letters
            Item::Symbol(Symbol::Invalid) | Item::LetterGap => {}
        }
    }
    if !pair.is_empty() {
        pair.flush_into(&mut lines);
    }

    lines.join(LINE_SEPARATOR)
}

impl Message {
    pub fn stacked(&self) -> String {
        stacked(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_gaps(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_stacked_sos() {
        let out = Message::new("SOS").stacked();
        let lines: Vec<&str> = out.split(LINE_SEPARATOR).collect();
        assert_eq!(lines, vec!["  S    O    S  ", " ···  –––  ··· "]);
    }

    #[test]
    fn test_label_sits_over_token_midpoint() {
        let out = Message::new("A").stacked();
        let lines: Vec<&str> = out.split(LINE_SEPARATOR).collect();
        assert_eq!(lines[0], "  A ");
        assert_eq!(lines[1], " ·– ");
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn test_line_breaks_flush_pairs() {
        let out = Message::new("E\nT").stacked();
        let lines: Vec<&str> = out.split(LINE_SEPARATOR).collect();
        assert_eq!(lines, vec![" E ", " · ", " T ", " – "]);
    }

    #[test]
    fn test_whitespace_is_blank_in_both_lines() {
        let out = Message::new("E E").stacked();
        let lines: Vec<&str> = out.split(LINE_SEPARATOR).collect();
        assert_eq!(lines[0], " E     E ");
        assert_eq!(lines[1], " ·     · ");
    }

    #[test]
    fn test_notation_line_matches_plain_encoding() {
        for text in ["SOS", "Hello World", "a1?b", "tab\there", "x#y"] {
            let message = Message::new(text);
            let stacked = message.stacked();
            let marks = stacked.split(LINE_SEPARATOR).nth(1).unwrap();
            assert_eq!(strip_gaps(marks), strip_gaps(&message.notation(Notation::Plain)));
        }
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(Message::new("").stacked(), "");
    }
}
