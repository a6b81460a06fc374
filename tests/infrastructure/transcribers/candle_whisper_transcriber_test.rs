use candle_core::{DType, Device};

use balss::infrastructure::transcribers::{CandleWhisperTranscriber, WHISPER_ID};

#[test]
fn given_cpu_device_when_selecting_dtype_then_returns_f32() {
    let dtype = CandleWhisperTranscriber::select_dtype(&Device::Cpu);
    assert!(matches!(dtype, DType::F32));
}

#[test]
fn given_cuda_device_when_selecting_dtype_then_returns_f16() {
    let device = Device::cuda_if_available(0).unwrap_or(Device::Cpu);
    let dtype = CandleWhisperTranscriber::select_dtype(&device);
    let expected = if device.is_cuda() {
        DType::F16
    } else {
        DType::F32
    };
    assert_eq!(dtype, expected);
}

#[test]
fn given_whisper_id_constant_when_accessed_then_matches_registry_key() {
    assert_eq!(WHISPER_ID, "whisper");
}
