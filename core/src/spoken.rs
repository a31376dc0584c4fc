use crate::message::{Item, Message};
use crate::table::{Element, Glyph, Pulse, Symbol, Whitespace};
use crate::{LINE_SEPARATOR, SIGNAL_WORD_GAP};

/// Blank run between spoken letters
pub const SPOKEN_LETTER_GAP: &str = "   ";
/// Separator between the pulses of one spoken letter
pub const SPOKEN_PULSE_SEPARATOR: &str = "-";

fn speak_letter(pulses: &[Pulse]) -> String {
    let last = pulses.len().saturating_sub(1);
    pulses
        .iter()
        .enumerate()
        .map(|(index, pulse)| {
            let word = match (pulse, index) {
                (Pulse::Short, 0) => "Di",
                (Pulse::Short, _) => "di",
                (Pulse::Long, 0) => "Dah",
                (Pulse::Long, _) => "dah",
            };
            if *pulse == Pulse::Short && index == last {
                format!("{}t", word)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(SPOKEN_PULSE_SEPARATOR)
}

/// Speak one glyph, e.g. `A` is `Di-dah` and `S` is `Di-di-dit`
pub fn speak_glyph(glyph: &Glyph) -> String {
    let mut letters = vec![Vec::new()];
    for element in glyph.elements() {
        match element {
            Element::Pulse(pulse) => {
                if let Some(letter) = letters.last_mut() {
                    letter.push(pulse);
                }
            }
            Element::LetterGap => letters.push(Vec::new()),
        }
    }
    letters
        .iter()
        .map(|pulses| speak_letter(pulses))
        .collect::<Vec<_>>()
        .join(SPOKEN_LETTER_GAP)
}

fn speak_whitespace(whitespace: Whitespace) -> String {
    if whitespace.is_line_break() {
        LINE_SEPARATOR.to_string()
    } else {
        " ".repeat(SIGNAL_WORD_GAP * whitespace.word_gaps())
    }
}

/// Render a message as spoken dits and dahs
pub fn spoken(message: &Message) -> String {
    message
        .layout()
        .map(|item| match item {
            Item::Symbol(Symbol::Glyph(glyph)) => speak_glyph(glyph),
            Item::Symbol(Symbol::Whitespace(whitespace)) => speak_whitespace(whitespace),
            Item::Symbol(Symbol::Invalid) => String::new(),
            Item::LetterGap => SPOKEN_LETTER_GAP.to_string(),
        })
        .collect()
}

impl Message {
    pub fn spoken(&self) -> String {
        spoken(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::GLYPHS;

    #[test]
    fn test_spoken_sos() {
        assert_eq!(
            Message::new("SOS").spoken(),
            "Di-di-dit   Dah-dah-dah   Di-di-dit"
        );
    }

    #[test]
    fn test_capitalization_and_suffix() {
        assert_eq!(Message::new("E").spoken(), "Dit");
        assert_eq!(Message::new("T").spoken(), "Dah");
        assert_eq!(Message::new("A").spoken(), "Di-dah");
        assert_eq!(Message::new("N").spoken(), "Dah-dit");
        assert_eq!(Message::new("?").spoken(), "Di-di-dah-dah-di-dit");
    }

    #[test]
    fn test_whitespace_gaps() {
        assert_eq!(Message::new("E T").spoken(), "Dit       Dah");
        assert_eq!(Message::new("E\tT").spoken(), format!("Dit{}Dah", " ".repeat(21)));
        assert_eq!(
            Message::new("E\nT").spoken(),
            format!("Dit{}Dah", LINE_SEPARATOR)
        );
    }

    #[test]
    fn test_unit_count_matches_pulse_count() {
        for glyph in GLYPHS.iter().filter(|g| !g.sequence.contains(' ')) {
            let spoken = speak_glyph(glyph);
            assert_eq!(
                spoken.split(SPOKEN_PULSE_SEPARATOR).count(),
                glyph.pulse_count(),
                "{}",
                glyph.literal
            );
        }
    }

    #[test]
    fn test_prosign_letters_are_spaced() {
        let cqd = GLYPHS.iter().find(|g| g.literal == "<CQD>").unwrap();
        assert_eq!(
            speak_glyph(cqd),
            "Dah-di-dah-dit   Dah-dah-di-dah   Dah-di-dit"
        );
    }
}
