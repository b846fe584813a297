use crate::error::ExportError;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the translated graph as pretty JSON to `writer`.
pub fn write_graph<W: Write>(graph: &Value, writer: W) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, graph)?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })
}

pub fn export_json<P: AsRef<Path>>(graph: &Value, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;
    write_graph(graph, file)
}
