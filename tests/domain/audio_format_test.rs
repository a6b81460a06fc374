use std::path::Path;

use balss::domain::AudioFormat;

#[test]
fn given_supported_extension_when_parsing_then_returns_format() {
    assert_eq!(AudioFormat::from_extension("wav"), Some(AudioFormat::Wav));
    assert_eq!(AudioFormat::from_extension("mp3"), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_extension("m4a"), Some(AudioFormat::M4a));
    assert_eq!(AudioFormat::from_extension("flac"), Some(AudioFormat::Flac));
    assert_eq!(AudioFormat::from_extension("ogg"), Some(AudioFormat::Ogg));
}

#[test]
fn given_uppercase_extension_when_parsing_then_returns_format() {
    assert_eq!(AudioFormat::from_extension("WAV"), Some(AudioFormat::Wav));
    assert_eq!(AudioFormat::from_extension("Mp3"), Some(AudioFormat::Mp3));
}

#[test]
fn given_unsupported_extension_when_parsing_then_returns_none() {
    assert_eq!(AudioFormat::from_extension("txt"), None);
    assert_eq!(AudioFormat::from_extension("pdf"), None);
    assert_eq!(AudioFormat::from_extension(""), None);
}

#[test]
fn given_path_with_supported_extension_when_parsing_then_returns_format() {
    assert_eq!(
        AudioFormat::from_path(Path::new("uploads/clip.MP3")),
        Some(AudioFormat::Mp3)
    );
}

#[test]
fn given_path_without_extension_when_parsing_then_returns_none() {
    assert_eq!(AudioFormat::from_path(Path::new("clip")), None);
}

#[test]
fn given_every_format_when_round_tripping_extension_then_parses_back() {
    for format in AudioFormat::ALL {
        assert_eq!(AudioFormat::from_extension(format.extension()), Some(format));
    }
}

#[test]
fn given_m4a_when_asking_mime_type_then_returns_audio_mp4() {
    assert_eq!(AudioFormat::M4a.mime_type(), "audio/mp4");
    assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
}
