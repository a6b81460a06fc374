use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::TranscribeError;

/// Sample rate the local Whisper model expects.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Decodes a compressed audio clip into mono f32 PCM at 16kHz.
///
/// Multi-channel sources are downmixed by averaging and anything not at
/// 16kHz is resampled.
pub fn decode_to_mono_pcm(
    data: &[u8],
    extension: Option<&str>,
) -> Result<Vec<f32>, TranscribeError> {
    let source = MediaSourceStream::new(Box::new(Cursor::new(data.to_vec())), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decode_error(format!("probe: {e}")))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| decode_error("no audio track found"))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let source_rate = codec_params
        .sample_rate
        .ok_or_else(|| decode_error("source sample rate unknown"))?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| decode_error(format!("codec: {e}")))?;

    let mut pcm: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(decode_error(format!("packet: {e}"))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping undecodable audio frame");
                continue;
            }
            Err(e) => return Err(decode_error(format!("decode: {e}"))),
        };

        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        let mut buffer = SampleBuffer::<f32>::new(frames as u64, *decoded.spec());
        buffer.copy_interleaved_ref(decoded);

        if channels > 1 {
            pcm.extend(
                buffer
                    .samples()
                    .chunks(channels)
                    .map(|frame| frame.iter().sum::<f32>() / channels as f32),
            );
        } else {
            pcm.extend_from_slice(buffer.samples());
        }
    }

    if pcm.is_empty() {
        return Err(decode_error("clip contains no audio samples"));
    }

    if source_rate != WHISPER_SAMPLE_RATE {
        pcm = resample(&pcm, source_rate, WHISPER_SAMPLE_RATE)?;
    }

    tracing::debug!(
        samples = pcm.len(),
        duration_secs = pcm.len() as f32 / WHISPER_SAMPLE_RATE as f32,
        "Clip decoded to 16kHz mono PCM"
    );

    Ok(pcm)
}

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, TranscribeError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let chunk_size = 1024;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| decode_error(format!("resampler init: {e}")))?;

    let expected_len = (samples.len() as f64 * ratio) as usize;
    let mut output = Vec::with_capacity(expected_len + chunk_size);

    for chunk in samples.chunks(chunk_size) {
        let mut input = chunk.to_vec();
        input.resize(chunk_size, 0.0);

        let processed = resampler
            .process(&[input], None)
            .map_err(|e| decode_error(format!("resample: {e}")))?;

        if let Some(channel) = processed.into_iter().next() {
            output.extend(channel);
        }
    }

    // The final chunk was zero-padded, drop the excess
    output.truncate(expected_len);

    Ok(output)
}

fn decode_error(detail: impl Into<String>) -> TranscribeError {
    TranscribeError::InvalidInput(format!("audio decode failed: {}", detail.into()))
}
