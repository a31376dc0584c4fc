use crate::encoder::Notation;
use crate::message::Message;
use crate::{
    DEFAULT_FREQUENCY, DEFAULT_WPM, DIT_MS_PER_WPM, MAX_FREQUENCY, MAX_WPM, MIN_FREQUENCY,
    MIN_WPM, SAMPLE_AMPLITUDE, SAMPLE_RATE, SIGNAL_MARK,
};
use std::f64::consts::PI;

/// On/off keyed sine synthesizer for signal notation
///
/// Every signal notation character lasts one dit. A mark character keys a
/// continuous sine carrier on, anything else keys it off. There is no
/// envelope shaping, so transitions can click.
///
/// Output is mono signed 8-bit PCM at [`SAMPLE_RATE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Synthesizer {
    wpm: u32,
    frequency: u32,
}

impl Synthesizer {
    /// Words per minute are clamped to [1, 50], frequency to [50, 20000] Hz
    pub fn new(wpm: u32, frequency: u32) -> Self {
        Self {
            wpm: wpm.clamp(MIN_WPM, MAX_WPM),
            frequency: frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY),
        }
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Length of one dit in milliseconds
    pub fn dit_duration_ms(&self) -> i32 {
        (DIT_MS_PER_WPM / self.wpm) as i32
    }

    /// Most notation characters one chunk may hold so that
    /// `chars * dit_ms * SAMPLE_RATE` fits in an `i32`
    pub fn max_chunk_chars(&self) -> usize {
        (i32::MAX / (self.dit_duration_ms() * SAMPLE_RATE)) as usize
    }

    /// Samples produced for a chunk of `chars` notation characters
    pub fn chunk_samples(&self, chars: usize) -> usize {
        let chars = chars.min(self.max_chunk_chars()) as i32;
        (chars * self.dit_duration_ms() * SAMPLE_RATE / 1000) as usize
    }

    /// Synthesize signal notation into sample buffers, one per chunk
    pub fn render_chunks(&self, signal: &str) -> Vec<Vec<i8>> {
        let chars: Vec<char> = signal.chars().collect();
        let chunk_chars = self.max_chunk_chars();
        let step = 2.0 * PI * self.frequency as f64 / SAMPLE_RATE as f64;

        let mut offset = 0usize;
        let chunks: Vec<Vec<i8>> = chars
            .chunks(chunk_chars)
            .map(|chunk| {
                let len = self.chunk_samples(chunk.len());
                let buffer = (0..len)
                    .map(|j| {
                        // nearest notation character at this point of the chunk
                        let index = ((j as f64 / len as f64) * chunk.len() as f64) as usize;
                        if chunk[index.min(chunk.len() - 1)] == SIGNAL_MARK {
                            ((offset + j) as f64 * step).sin() * SAMPLE_AMPLITUDE
                        } else {
                            0.0
                        }
                    })
                    .map(|sample| sample.round() as i8)
                    .collect();
                offset += len;
                buffer
            })
            .collect();

        log::debug!(
            "synthesized {} notation chars into {} chunks, {} samples ({} wpm, {} Hz)",
            chars.len(),
            chunks.len(),
            offset,
            self.wpm,
            self.frequency
        );
        chunks
    }

    /// All samples for a message, chunks joined in order
    pub fn render(&self, message: &Message) -> Vec<i8> {
        self.render_chunks(&message.notation(Notation::Signal))
            .into_iter()
            .flatten()
            .collect()
    }

    /// Nominal duration of a message in milliseconds
    pub fn duration_ms(&self, message: &Message) -> u64 {
        let units = message.notation(Notation::Signal).chars().count() as u64;
        units * self.dit_duration_ms() as u64
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_WPM, DEFAULT_FREQUENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_are_clamped() {
        let synth = Synthesizer::new(0, 10);
        assert_eq!(synth.wpm(), MIN_WPM);
        assert_eq!(synth.frequency(), MIN_FREQUENCY);

        let synth = Synthesizer::new(500, 100_000);
        assert_eq!(synth.wpm(), MAX_WPM);
        assert_eq!(synth.frequency(), MAX_FREQUENCY);
    }

    #[test]
    fn test_dit_duration() {
        assert_eq!(Synthesizer::new(20, 600).dit_duration_ms(), 60);
        assert_eq!(Synthesizer::new(1, 600).dit_duration_ms(), 1200);
        assert_eq!(Synthesizer::new(50, 600).dit_duration_ms(), 24);
        assert_eq!(Synthesizer::new(7, 600).dit_duration_ms(), 171);
    }

    #[test]
    fn test_chunk_bound_prevents_overflow() {
        for wpm in MIN_WPM..=MAX_WPM {
            let synth = Synthesizer::new(wpm, 600);
            let chars = synth.max_chunk_chars();
            assert!(chars >= 1);
            let product = chars as i64 * synth.dit_duration_ms() as i64 * SAMPLE_RATE as i64;
            assert!(product <= i32::MAX as i64);
        }
        assert_eq!(Synthesizer::new(1, 600).max_chunk_chars(), 109);
    }

    #[test]
    fn test_mark_is_tone_and_gap_is_silence() {
        let synth = Synthesizer::new(20, 600);
        let chunks = synth.render_chunks("▓˽");
        assert_eq!(chunks.len(), 1);
        let samples = &chunks[0];
        assert_eq!(samples.len(), 2 * 60 * 16384 / 1000);

        let half = samples.len() / 2;
        assert!(samples[..half].iter().any(|&s| s != 0));
        assert!(samples[half + 1..].iter().all(|&s| s == 0));
        assert!(samples.iter().all(|&s| s >= -127));
    }

    #[test]
    fn test_line_breaks_are_silent_units() {
        let synth = Synthesizer::new(20, 600);
        let samples: Vec<i8> = synth.render_chunks("\n").concat();
        assert_eq!(samples.len(), synth.chunk_samples(1));
        assert!(samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_empty_signal() {
        let synth = Synthesizer::default();
        assert!(synth.render_chunks("").is_empty());
        assert!(synth.render(&Message::new("")).is_empty());
    }

    #[test]
    fn test_long_message_is_chunked() {
        let synth = Synthesizer::new(1, 600);
        let signal = "▓˽".repeat(200);
        let chunks = synth.render_chunks(&signal);
        assert_eq!(chunks.len(), 4); // 109 + 109 + 109 + 73 chars
        assert_eq!(chunks[0].len(), synth.chunk_samples(109));
        assert_eq!(chunks[3].len(), synth.chunk_samples(73));
    }

    #[test]
    fn test_render_is_deterministic() {
        let synth = Synthesizer::new(25, 700);
        let message = Message::new("CQ CQ");
        assert_eq!(synth.render(&message), synth.render(&message));
    }

    #[test]
    fn test_duration_ms() {
        let synth = Synthesizer::new(20, 600);
        // E is a single dit
        assert_eq!(synth.duration_ms(&Message::new("E")), 60);
        // S: dit gap dit gap dit
        assert_eq!(synth.duration_ms(&Message::new("S")), 300);
    }
}
