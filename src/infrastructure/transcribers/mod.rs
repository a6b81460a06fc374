pub mod audio_decoder;

mod assemblyai_transcriber;
mod candle_whisper_transcriber;
mod google_stt_transcriber;
mod grok_transcriber;
mod registry_factory;
mod speechmatics_transcriber;

pub use assemblyai_transcriber::{ASSEMBLYAI_ID, AssemblyAiTranscriber};
pub use audio_decoder::{WHISPER_SAMPLE_RATE, decode_to_mono_pcm};
pub use candle_whisper_transcriber::{CandleWhisperTranscriber, WHISPER_ID};
pub use google_stt_transcriber::{GOOGLE_ID, GoogleSttTranscriber};
pub use grok_transcriber::{GROK_ID, GrokTranscriber};
pub use registry_factory::{RegistryConfig, TranscriberRegistryFactory};
pub use speechmatics_transcriber::{SPEECHMATICS_ID, SpeechmaticsTranscriber};
