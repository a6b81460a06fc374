use tempfile::TempDir;

use balss::application::ports::{ArtifactStore, ArtifactStoreError};
use balss::infrastructure::storage::LocalArtifactStore;

fn store() -> (LocalArtifactStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = LocalArtifactStore::new(dir.path().to_path_buf()).unwrap();
    (store, dir)
}

#[tokio::test]
async fn given_latvian_transcript_when_writing_then_reads_back_identical() {
    let (store, _dir) = store();
    let transcript = "sveiki, kā jums klājas? šodien līst.";

    store
        .write_transcript("clip", "whisper", transcript)
        .await
        .unwrap();

    let artifacts = store.read_transcripts("clip").await.unwrap();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].model_id, "whisper");
    assert_eq!(artifacts[0].transcript, transcript);
    assert!(artifacts[0].file_path.ends_with("clip_whisper.txt"));
}

#[tokio::test]
async fn given_several_models_when_reading_then_all_transcripts_are_returned() {
    let (store, _dir) = store();

    store
        .write_transcript("clip", "whisper", "viens")
        .await
        .unwrap();
    store
        .write_transcript("clip", "google", "divi")
        .await
        .unwrap();
    store
        .write_transcript("other", "whisper", "trīs")
        .await
        .unwrap();

    let artifacts = store.read_transcripts("clip").await.unwrap();

    let mut models: Vec<&str> = artifacts.iter().map(|a| a.model_id.as_str()).collect();
    models.sort();
    assert_eq!(models, vec!["google", "whisper"]);
}

#[tokio::test]
async fn given_no_artifacts_when_reading_then_returns_empty_list() {
    let (store, _dir) = store();

    let artifacts = store.read_transcripts("ghost").await.unwrap();

    assert!(artifacts.is_empty());
}

#[tokio::test]
async fn given_artifacts_when_deleting_by_stem_then_only_that_stem_is_removed() {
    let (store, _dir) = store();

    store
        .write_transcript("clip", "whisper", "viens")
        .await
        .unwrap();
    store
        .write_transcript("clip", "google", "divi")
        .await
        .unwrap();
    store
        .write_transcript("other", "whisper", "paliek")
        .await
        .unwrap();

    let deleted = store.delete_for_stem("clip").await.unwrap();

    assert_eq!(deleted.len(), 2);
    assert!(store.read_transcripts("clip").await.unwrap().is_empty());
    assert_eq!(store.read_transcripts("other").await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_no_transcripts_when_deleting_by_stem_then_returns_empty_list() {
    let (store, _dir) = store();

    let deleted = store.delete_for_stem("ghost").await.unwrap();

    assert!(deleted.is_empty());
}

#[tokio::test]
async fn given_report_when_putting_then_fetch_returns_same_bytes() {
    let (store, _dir) = store();
    let data = vec![1u8, 2, 3, 4];

    store
        .put_report("transcription_20250101_120000.csv", data.clone())
        .await
        .unwrap();

    let fetched = store
        .fetch("transcription_20250101_120000.csv")
        .await
        .unwrap();
    assert_eq!(fetched, data);
}

#[tokio::test]
async fn given_missing_file_when_fetching_then_returns_not_found() {
    let (store, _dir) = store();

    let result = store.fetch("missing.csv").await;

    assert!(matches!(result, Err(ArtifactStoreError::NotFound(_))));
}
