use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MorseError {
    #[error("String object '{0}' must not be null")]
    NullInput(&'static str),

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Audio sink path is a directory: {}", .0.display())]
    InvalidSinkPath(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, MorseError>;

/// A recoverable problem met while encoding or decoding
///
/// Issues never abort the operation that found them. They are logged as
/// warnings and collected in order so callers can audit what was lost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Issue {
    /// Clear-text character with no table entry (position is in chars)
    UnknownCharacter { position: usize, character: char },

    /// Notation token that matches no table sequence
    UnknownToken { token: String },

    /// Input whose first non-blank character is not a notation glyph
    NotNotation { found: char },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::UnknownCharacter { position, character } => write!(
                f,
                "No valid Morse code available for character '{}' at position {}",
                character.escape_default(),
                position
            ),
            Issue::UnknownToken { token } => {
                write!(f, "No character found for Morse token '{}'", token)
            }
            Issue::NotNotation { found } => write!(
                f,
                "Not a valid Morse notation, unexpected character '{}'",
                found.escape_default()
            ),
        }
    }
}

impl Issue {
    /// Log this issue at warn level and pass it through
    pub(crate) fn logged(self) -> Self {
        log::warn!("{}", self);
        self
    }
}
