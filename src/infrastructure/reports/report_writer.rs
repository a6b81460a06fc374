use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::application::ports::{ArtifactStore, ReportError, ReportPair, ReportWriter};
use crate::domain::TranscriptionRecord;

const SHEET_NAME: &str = "Transcription Results";
const COLUMNS: [&str; 8] = [
    "timestamp",
    "filename",
    "model_id",
    "model_name",
    "status",
    "processing_time",
    "transcript",
    "error",
];

/// Writes each batch as a CSV file and an Excel workbook into the artifact
/// store, named `transcription_{timestamp}` so runs sort chronologically.
pub struct TabularReportWriter {
    artifacts: Arc<dyn ArtifactStore>,
}

impl TabularReportWriter {
    pub fn new(artifacts: Arc<dyn ArtifactStore>) -> Self {
        Self { artifacts }
    }
}

#[async_trait]
impl ReportWriter for TabularReportWriter {
    async fn write_batch(
        &self,
        clip_filename: &str,
        records: &[TranscriptionRecord],
    ) -> Result<ReportPair, ReportError> {
        let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let report = ReportPair {
            csv_filename: format!("transcription_{stamp}.csv"),
            excel_filename: format!("transcription_{stamp}.xlsx"),
        };

        let csv_bytes = render_csv(&stamp, clip_filename, records)?;
        let excel_bytes = render_excel(&stamp, clip_filename, records)
            .map_err(|e| ReportError::RenderFailed(e.to_string()))?;

        self.artifacts
            .put_report(&report.csv_filename, csv_bytes)
            .await
            .map_err(|e| ReportError::PersistFailed(e.to_string()))?;
        self.artifacts
            .put_report(&report.excel_filename, excel_bytes)
            .await
            .map_err(|e| ReportError::PersistFailed(e.to_string()))?;

        Ok(report)
    }
}

fn render_csv(
    stamp: &str,
    clip_filename: &str,
    records: &[TranscriptionRecord],
) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(COLUMNS)
        .map_err(|e| ReportError::RenderFailed(e.to_string()))?;

    for record in records {
        let processing_time = format!("{:.3}", record.processing_time);
        writer
            .write_record([
                stamp,
                clip_filename,
                record.model_id.as_str(),
                record.model_name.as_str(),
                record.status.as_str(),
                processing_time.as_str(),
                record.transcript.as_str(),
                record.error.as_deref().unwrap_or(""),
            ])
            .map_err(|e| ReportError::RenderFailed(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::RenderFailed(e.to_string()))
}

fn render_excel(
    stamp: &str,
    clip_filename: &str,
    records: &[TranscriptionRecord],
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *column, &bold)?;
    }

    for (row, record) in records.iter().enumerate() {
        let row = row as u32 + 1;
        sheet.write_string(row, 0, stamp)?;
        sheet.write_string(row, 1, clip_filename)?;
        sheet.write_string(row, 2, record.model_id.as_str())?;
        sheet.write_string(row, 3, record.model_name.as_str())?;
        sheet.write_string(row, 4, record.status.as_str())?;
        sheet.write_number(row, 5, record.processing_time)?;
        sheet.write_string(row, 6, record.transcript.as_str())?;
        sheet.write_string(row, 7, record.error.as_deref().unwrap_or(""))?;
    }

    workbook.save_to_buffer()
}
