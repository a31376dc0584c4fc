use crate::error::{MorseError, Result};
use crate::message::Message;
use crate::synth::Synthesizer;
use crate::SAMPLE_RATE;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sun/NeXT audio magic number
const AU_MAGIC: &[u8; 4] = b".snd";
/// Header length in bytes, also the data offset
const AU_HEADER_SIZE: u32 = 24;
/// AU encoding tag for 8-bit linear PCM
const AU_ENCODING_LINEAR_8: u32 = 2;

/// Container written by the file sink
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AudioFileType {
    /// RIFF WAVE, 8-bit PCM
    #[default]
    Wav,
    /// Sun/NeXT audio, big-endian header, 8-bit signed linear PCM
    Au,
    /// Headerless signed 8-bit samples
    Raw,
}

impl AudioFileType {
    pub fn extension(self) -> &'static str {
        match self {
            AudioFileType::Wav => "wav",
            AudioFileType::Au => "au",
            AudioFileType::Raw => "raw",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "wav" | "wave" => Some(AudioFileType::Wav),
            "au" | "snd" => Some(AudioFileType::Au),
            "raw" | "pcm" => Some(AudioFileType::Raw),
            _ => None,
        }
    }
}

/// Write mono 8-bit samples at [`SAMPLE_RATE`] to `path`
///
/// Fails without touching the file system if `path` is a directory.
pub fn write_samples<P: AsRef<Path>>(samples: &[i8], path: P, file_type: AudioFileType) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Err(MorseError::InvalidSinkPath(path.to_path_buf()));
    }

    match file_type {
        AudioFileType::Wav => {
            let spec = WavSpec {
                channels: 1,
                sample_rate: SAMPLE_RATE as u32,
                bits_per_sample: 8,
                sample_format: SampleFormat::Int,
            };
            let mut writer = WavWriter::create(path, spec)?;
            for &sample in samples {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;
        }
        AudioFileType::Au => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(AU_MAGIC)?;
            writer.write_all(&AU_HEADER_SIZE.to_be_bytes())?;
            writer.write_all(&(samples.len() as u32).to_be_bytes())?;
            writer.write_all(&AU_ENCODING_LINEAR_8.to_be_bytes())?;
            writer.write_all(&(SAMPLE_RATE as u32).to_be_bytes())?;
            writer.write_all(&1u32.to_be_bytes())?;
            writer.write_all(&pcm_bytes(samples))?;
            writer.flush()?;
        }
        AudioFileType::Raw => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(&pcm_bytes(samples))?;
            writer.flush()?;
        }
    }

    log::debug!(
        "wrote {} samples as {:?} to {}",
        samples.len(),
        file_type,
        path.display()
    );
    Ok(())
}

fn pcm_bytes(samples: &[i8]) -> Vec<u8> {
    samples.iter().map(|&s| s as u8).collect()
}

impl Synthesizer {
    /// Synthesize a message and write it to an audio file
    pub fn write_file<P: AsRef<Path>>(
        &self,
        message: &Message,
        path: P,
        file_type: AudioFileType,
    ) -> Result<()> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(MorseError::InvalidSinkPath(path.to_path_buf()));
        }
        write_samples(&self.render(message), path, file_type)
    }
}
