use crate::error::{MorseError, Result};
use crate::message::Message;
use crate::resample::{mono_to_interleaved, pcm_to_float, resample_audio};
use crate::synth::Synthesizer;
use crate::SAMPLE_RATE;

/// Silence appended after the message before the stream is dropped
pub const DRAIN_TAIL_MS: usize = 250;

impl Synthesizer {
    /// Play a message on the default output device
    ///
    /// Blocks until the last frame, drain tail included, has been copied into
    /// the device buffer. The message itself has finished sounding by then
    /// as long as the device latency stays under [`DRAIN_TAIL_MS`]; a longer
    /// latency cuts off the end. There is no way to cancel once started.
    pub fn play(&self, message: &Message) -> Result<()> {
        play_samples(&self.render(message))
    }
}

/// Interleaved float frames for a device running at `device_rate` with
/// `channels` channels, followed by [`DRAIN_TAIL_MS`] of silence
pub fn device_frames(samples: &[i8], device_rate: usize, channels: usize) -> Vec<f32> {
    let mut mono = resample_audio(&pcm_to_float(samples), SAMPLE_RATE as usize, device_rate);
    mono.extend(std::iter::repeat(0.0).take(device_rate * DRAIN_TAIL_MS / 1000));
    mono_to_interleaved(&mono, channels)
}

#[cfg(feature = "playback")]
pub use device::play_samples;

/// Playback needs the `playback` feature; without it every call fails
#[cfg(not(feature = "playback"))]
pub fn play_samples(_samples: &[i8]) -> Result<()> {
    Err(MorseError::Device(
        "built without audio playback support (enable the `playback` feature)".to_string(),
    ))
}

#[cfg(feature = "playback")]
mod device {
    use super::device_frames;
    use crate::error::{MorseError, Result};
    use cpal::{
        traits::{DeviceTrait, HostTrait, StreamTrait},
        Device, FromSample, SampleFormat, SizedSample, StreamConfig,
    };
    use std::fmt::Display;
    use std::sync::mpsc;

    fn device_error<E: Display>(err: E) -> MorseError {
        MorseError::Device(err.to_string())
    }

    /// Play signed 8-bit samples at [`SAMPLE_RATE`] and wait until the
    /// device has consumed them
    pub fn play_samples(samples: &[i8]) -> Result<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| MorseError::Device("no default output device".to_string()))?;
        let supported = device.default_output_config().map_err(device_error)?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();

        let device_rate = config.sample_rate.0 as usize;
        let frames = device_frames(samples, device_rate, config.channels as usize);

        log::debug!(
            "playing {} frames at {} Hz on {} channels ({:?})",
            frames.len() / (config.channels as usize).max(1),
            device_rate,
            config.channels,
            sample_format
        );

        match sample_format {
            SampleFormat::F32 => run::<f32>(&device, &config, frames),
            SampleFormat::I16 => run::<i16>(&device, &config, frames),
            SampleFormat::U16 => run::<u16>(&device, &config, frames),
            SampleFormat::I8 => run::<i8>(&device, &config, frames),
            SampleFormat::I32 => run::<i32>(&device, &config, frames),
            other => Err(MorseError::Device(format!(
                "unsupported device sample format {:?}",
                other
            ))),
        }
    }

    fn run<T>(device: &Device, config: &StreamConfig, frames: Vec<f32>) -> Result<()>
    where
        T: SizedSample + FromSample<f32>,
    {
        let (done_tx, done_rx) = mpsc::channel::<std::result::Result<(), String>>();
        let error_tx = done_tx.clone();
        let mut position = 0usize;
        let mut finished = false;

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        let value = frames.get(position).copied().unwrap_or(0.0);
                        *sample = T::from_sample(value);
                        position = position.saturating_add(1);
                    }
                    if position >= frames.len() && !finished {
                        finished = true;
                        let _ = done_tx.send(Ok(()));
                    }
                },
                move |err| {
                    log::error!("audio stream error: {}", err);
                    let _ = error_tx.send(Err(err.to_string()));
                },
                None,
            )
            .map_err(device_error)?;
        stream.play().map_err(device_error)?;

        match done_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => Err(MorseError::Device(message)),
            Err(_) => Err(MorseError::Device(
                "audio stream closed before playback finished".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "playback"))]
    #[test]
    fn test_play_without_feature_reports_device_error() {
        let synth = Synthesizer::default();
        let err = synth.play(&Message::new("E")).unwrap_err();
        assert!(matches!(err, MorseError::Device(_)));
    }

    #[test]
    fn test_device_frames_resample_and_append_tail() {
        let samples = vec![64i8; SAMPLE_RATE as usize];
        let frames = device_frames(&samples, 48000, 2);

        // one second of tone plus the tail, two channels each
        let tail = 48000 * DRAIN_TAIL_MS / 1000;
        assert_eq!(frames.len(), (48000 + tail) * 2);
        assert_eq!(frames[0], 0.5);
        assert_eq!(frames[0], frames[1]);
        assert!(frames[frames.len() - 2 * tail..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_device_frames_at_native_rate() {
        let frames = device_frames(&[127, -128], SAMPLE_RATE as usize, 1);
        let tail = SAMPLE_RATE as usize * DRAIN_TAIL_MS / 1000;
        assert_eq!(frames.len(), 2 + tail);
        assert_eq!(frames[1], -1.0);
    }

    #[test]
    fn test_empty_message_is_only_tail() {
        let frames = device_frames(&[], 44100, 1);
        assert_eq!(frames.len(), 44100 * DRAIN_TAIL_MS / 1000);
    }
}
