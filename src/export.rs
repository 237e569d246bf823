use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::models::ScoredProblem;

const COLUMNS: [&str; 8] = [
    "id",
    "title",
    "difficulty",
    "acceptanceRate",
    "totalAccepted",
    "totalSubmissions",
    "trueDifficultyScore",
    "url",
];

pub fn write_csv(path: &Path, problems: &[ScoredProblem]) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_csv_to(&mut writer, problems).map_err(io_err)?;
    writer.flush().map_err(io_err)
}

pub fn write_csv_to<W: Write>(writer: &mut W, problems: &[ScoredProblem]) -> io::Result<()> {
    write!(writer, "{}\r\n", COLUMNS.join(","))?;

    for scored in problems {
        let p = &scored.problem;
        let fields = [
            p.id.to_string(),
            escape(&p.title),
            p.difficulty.display_name().to_string(),
            format!("{:.2}%", p.acceptance_rate * 100.0),
            p.total_accepted.to_string(),
            p.total_submitted.to_string(),
            scored.score.to_string(),
            escape(&p.url),
        ];
        write!(writer, "{}\r\n", fields.join(","))?;
    }

    Ok(())
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
