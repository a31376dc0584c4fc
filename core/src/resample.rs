//! Sample conversions for handing synthesized PCM to an output device
//!
//! Playback converts to float, resamples with linear interpolation and fans
//! the mono signal out to the device's channels.

/// Convert signed 8-bit PCM to floats in [-1.0, 1.0)
pub fn pcm_to_float(samples: &[i8]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / 128.0).collect()
}

/// Duplicate mono audio into interleaved frames for a device
///
/// # Arguments
/// * `samples` - Mono audio samples
/// * `channels` - Device channel count
///
/// # Returns
/// Interleaved samples [C0, C1, ..., C0, C1, ...]
pub fn mono_to_interleaved(samples: &[f32], channels: usize) -> Vec<f32> {
    let channels = channels.max(1);
    let mut interleaved = Vec::with_capacity(samples.len() * channels);
    for &sample in samples {
        interleaved.extend(std::iter::repeat(sample).take(channels));
    }
    interleaved
}

/// Resample audio to a target sample rate using linear interpolation
///
/// # Arguments
/// * `samples` - Input audio samples
/// * `from_rate` - Current sample rate in Hz
/// * `to_rate` - Target sample rate in Hz
///
/// # Returns
/// Resampled audio at the target sample rate
///
/// # Example
/// ```ignore
/// let tone_16k = pcm_to_float(&pcm); // synthesizer output at 16384 Hz
/// let tone_48k = resample_audio(&tone_16k, 16384, 48000);
/// ```
pub fn resample_audio(samples: &[f32], from_rate: usize, to_rate: usize) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = to_rate as f32 / from_rate as f32;
    let new_length = ((samples.len() as f32) * ratio).ceil() as usize;
    let last = samples.len() - 1;
    let mut resampled = Vec::with_capacity(new_length);

    for i in 0..new_length {
        let src_idx = i as f32 / ratio;
        let src_idx_floor = (src_idx.floor() as usize).min(last);
        let src_idx_ceil = src_idx_floor + 1;
        let fraction = src_idx - (src_idx_floor as f32);

        let interpolated = if src_idx_ceil <= last {
            samples[src_idx_floor] * (1.0 - fraction) + samples[src_idx_ceil] * fraction
        } else {
            samples[src_idx_floor]
        };

        resampled.push(interpolated);
    }

    resampled
}
