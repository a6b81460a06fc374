use std::sync::Arc;

use tempfile::TempDir;

use balss::application::ports::{ArtifactStore, ReportWriter};
use balss::domain::TranscriptionRecord;
use balss::infrastructure::reports::TabularReportWriter;
use balss::infrastructure::storage::LocalArtifactStore;

fn writer() -> (TabularReportWriter, Arc<dyn ArtifactStore>, TempDir) {
    let dir = TempDir::new().unwrap();
    let artifacts: Arc<dyn ArtifactStore> =
        Arc::new(LocalArtifactStore::new(dir.path().to_path_buf()).unwrap());
    (
        TabularReportWriter::new(Arc::clone(&artifacts)),
        artifacts,
        dir,
    )
}

fn sample_records() -> Vec<TranscriptionRecord> {
    let mut ok = TranscriptionRecord::pending("whisper", "OpenAI Whisper");
    ok.complete("sveiki, kā klājas".to_string(), 2.345);
    let mut bad = TranscriptionRecord::pending("google", "Google Speech-to-Text");
    bad.fail("quota exceeded".to_string(), 0.5);
    vec![ok, bad]
}

#[tokio::test]
async fn given_batch_when_writing_then_produces_timestamped_csv_and_workbook() {
    let (writer, artifacts, _dir) = writer();

    let report = writer
        .write_batch("clip.wav", &sample_records())
        .await
        .unwrap();

    assert!(report.csv_filename.starts_with("transcription_"));
    assert!(report.csv_filename.ends_with(".csv"));
    assert!(report.excel_filename.starts_with("transcription_"));
    assert!(report.excel_filename.ends_with(".xlsx"));

    let workbook = artifacts.fetch(&report.excel_filename).await.unwrap();
    // xlsx is a zip container
    assert_eq!(&workbook[..2], b"PK");
}

#[tokio::test]
async fn given_batch_when_writing_then_csv_rows_match_records() {
    let (writer, artifacts, _dir) = writer();

    let report = writer
        .write_batch("clip.wav", &sample_records())
        .await
        .unwrap();

    let csv_bytes = artifacts.fetch(&report.csv_filename).await.unwrap();
    let mut reader = csv::Reader::from_reader(csv_bytes.as_slice());

    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "timestamp",
            "filename",
            "model_id",
            "model_name",
            "status",
            "processing_time",
            "transcript",
            "error"
        ]
    );

    let rows: Vec<csv::StringRecord> =
        reader.records().map(|record| record.unwrap()).collect();
    assert_eq!(rows.len(), 2);

    assert_eq!(&rows[0][1], "clip.wav");
    assert_eq!(&rows[0][2], "whisper");
    assert_eq!(&rows[0][4], "success");
    assert_eq!(&rows[0][6], "sveiki, kā klājas");
    assert_eq!(&rows[0][7], "");

    assert_eq!(&rows[1][2], "google");
    assert_eq!(&rows[1][4], "error");
    assert_eq!(&rows[1][6], "");
    assert_eq!(&rows[1][7], "quota exceeded");
}

#[tokio::test]
async fn given_empty_batch_when_writing_then_csv_still_carries_header() {
    let (writer, artifacts, _dir) = writer();

    let report = writer.write_batch("clip.wav", &[]).await.unwrap();

    let csv_bytes = artifacts.fetch(&report.csv_filename).await.unwrap();
    let mut reader = csv::Reader::from_reader(csv_bytes.as_slice());

    assert_eq!(reader.headers().unwrap().len(), 8);
    assert_eq!(reader.records().count(), 0);
}
