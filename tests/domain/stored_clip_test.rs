use balss::domain::{clip_stem, is_safe_path_component, sanitize_filename};

#[test]
fn given_plain_name_when_sanitizing_then_name_is_unchanged() {
    assert_eq!(sanitize_filename("clip-01.wav"), "clip-01.wav");
}

#[test]
fn given_path_traversal_when_sanitizing_then_only_basename_survives() {
    assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_filename("C:\\Users\\me\\clip.wav"), "clip.wav");
}

#[test]
fn given_whitespace_when_sanitizing_then_replaced_with_underscores() {
    assert_eq!(sanitize_filename("my recording 1.wav"), "my_recording_1.wav");
}

#[test]
fn given_non_ascii_characters_when_sanitizing_then_they_are_dropped() {
    assert_eq!(sanitize_filename("ieraksts-ā.wav"), "ieraksts-.wav");
}

#[test]
fn given_hidden_file_when_sanitizing_then_leading_dots_are_stripped() {
    assert_eq!(sanitize_filename(".hidden.wav"), "hidden.wav");
}

#[test]
fn given_nothing_safe_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_filename("āēū"), "");
    assert_eq!(sanitize_filename("..."), "");
}

#[test]
fn given_filename_with_extension_when_taking_stem_then_extension_is_dropped() {
    assert_eq!(clip_stem("clip.wav"), "clip");
    assert_eq!(clip_stem("archive.tar.gz"), "archive.tar");
}

#[test]
fn given_filename_without_extension_when_taking_stem_then_name_is_unchanged() {
    assert_eq!(clip_stem("clip"), "clip");
    assert_eq!(clip_stem(".bashrc"), ".bashrc");
}

#[test]
fn given_plain_component_when_checking_safety_then_accepted() {
    assert!(is_safe_path_component("20250101_120000_clip.wav"));
}

#[test]
fn given_separator_or_traversal_when_checking_safety_then_rejected() {
    assert!(!is_safe_path_component(""));
    assert!(!is_safe_path_component("a/b.wav"));
    assert!(!is_safe_path_component("a\\b.wav"));
    assert!(!is_safe_path_component("..\\clip.wav"));
    assert!(!is_safe_path_component("../clip.wav"));
}
