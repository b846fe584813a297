use crate::error::ExportError;
use crate::walker::TranslationReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes one `category,mapped,skipped,failed` row per translated collection.
pub fn write_report<W: Write>(report: &TranslationReport, writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["category", "mapped", "skipped", "failed"])?;

    for stats in &report.collections {
        writer.write_record([
            &stats.category,
            &stats.mapped.to_string(),
            &stats.skipped.to_string(),
            &stats.failed.to_string(),
        ])?;
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}

pub fn export_csv<P: AsRef<Path>>(report: &TranslationReport, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;
    write_report(report, file)
}
