use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

use super::signal::Signal;

/// Write a signal as 16-bit interleaved PCM, clamping out-of-range samples.
pub fn write_signal(path: &Path, signal: &Signal) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let spec = WavSpec {
        channels: signal.channel_count() as u16,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;
    for sample in signal.to_i16_interleaved() {
        writer.write_sample(sample)?;
    }
    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file: {}", path.display()))?;

    log::info!(
        "Wrote {} ({} channel(s), {:.2}s)",
        path.display(),
        signal.channel_count(),
        signal.duration()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::decode::decode_signal;

    #[test]
    fn written_file_decodes_back_to_the_same_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.wav");
        let signal = Signal::new(
            vec![vec![0, 1000, -1000, 32767], vec![5, -5, 70000, -70000]],
            8000,
        )
        .unwrap();

        write_signal(&path, &signal).unwrap();
        let back = decode_signal(&path).unwrap();

        assert_eq!(back.sample_rate(), 8000);
        assert_eq!(back.channel_count(), 2);
        assert_eq!(back.channels()[0], vec![0, 1000, -1000, 32767]);
        assert_eq!(back.channels()[1], vec![5, -5, 32767, -32768]);
    }
}
