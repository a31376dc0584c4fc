//! Morse code transcoder library
//!
//! Converts clear text to Morse notation (plain, signal, stacked and spoken
//! renderings), decodes notation back to text, and synthesizes on/off keyed
//! 8-bit PCM audio from the signal notation

pub mod error;
pub mod table;
pub mod message;
pub mod encoder;
pub mod decoder;
pub mod stacked;
pub mod spoken;
pub mod synth;
pub mod resample;
pub mod sink;
pub mod playback;

pub use error::{Issue, MorseError, Result};
pub use table::{lookup, Glyph, Lookup, Pulse, Symbol, Whitespace, GLYPHS};
pub use message::Message;
pub use encoder::Notation;
pub use decoder::{decode, try_decode, Decoded, NotationForm};
pub use synth::Synthesizer;
pub use sink::AudioFileType;

// Plain notation glyphs
pub const SHORT_MARK: char = '·';
pub const LONG_MARK: char = '–';
pub const GAP: char = ' ';

// ASCII spellings accepted by the decoder for hand-typed notation
pub const ASCII_SHORT_MARK: char = '.';
pub const ASCII_LONG_MARK: char = '-';

// Signal notation glyphs
pub const SIGNAL_MARK: char = '▓';
pub const SIGNAL_GAP: char = '˽';

// Gap widths, in glyphs
pub const PLAIN_LETTER_GAP: usize = 1;
pub const PLAIN_WORD_GAP: usize = 3;
pub const SIGNAL_LETTER_GAP: usize = 3;
pub const SIGNAL_WORD_GAP: usize = 7;
pub const SIGNAL_LONG_MARK_WIDTH: usize = 3;
/// A tab is this many word gaps wide in every notation
pub const TAB_WORD_GAPS: usize = 3;

/// Line separator used for CR/LF in every rendering and in decoded text
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

// Audio configuration
pub const SAMPLE_RATE: i32 = 16384;
pub const SAMPLE_AMPLITUDE: f64 = 127.0;
pub const MIN_WPM: u32 = 1;
pub const MAX_WPM: u32 = 50;
pub const DEFAULT_WPM: u32 = 20;
pub const MIN_FREQUENCY: u32 = 50; // Hz
pub const MAX_FREQUENCY: u32 = 20_000; // Hz
pub const DEFAULT_FREQUENCY: u32 = 600; // Hz
/// One word (PARIS) is 50 dit units, so a dit lasts 1200 / wpm milliseconds
pub const DIT_MS_PER_WPM: u32 = 1200;
