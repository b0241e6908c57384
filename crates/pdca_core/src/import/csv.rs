//! CSV reader for the PDCA bulk-upload format.
//!
//! # Responsibility
//! - Parse comma-separated text with the fixed seven-column header into
//!   [`PdcaDraft`] values.
//! - Report the 1-based source line with every rejected row.
//!
//! # Invariants
//! - The input carries no `id` column; ids are assigned by storage on
//!   append.
//! - Parsing never writes; a rejected file leaves storage untouched.

use crate::model::item::{ItemStatus, PdcaDraft, Remarks};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Required header columns, in order.
pub const EXPECTED_HEADER: [&str; 7] = [
    "task",
    "car_model",
    "dri",
    "start_date",
    "end_date",
    "status",
    "remarks",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type ImportResult<T> = Result<T, ImportError>;

/// Import-layer error for malformed upload text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Input contains no records at all.
    MissingHeader,
    /// First record does not match [`EXPECTED_HEADER`].
    HeaderMismatch { found: String },
    /// A data record failed to parse or validate.
    Row { line: usize, message: String },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeader => write!(
                f,
                "import text is empty; expected header `{}`",
                EXPECTED_HEADER.join(",")
            ),
            Self::HeaderMismatch { found } => write!(
                f,
                "unexpected header `{found}`; expected `{}`",
                EXPECTED_HEADER.join(",")
            ),
            Self::Row { line, message } => write!(f, "line {line}: {message}"),
        }
    }
}

impl Error for ImportError {}

/// Parses the bulk-upload format into drafts, in file order.
///
/// Accepts quoted fields (`""` escapes a quote), CRLF line endings and
/// newlines inside quoted fields. Blank lines are skipped.
pub fn parse_pdca_csv(content: &str) -> ImportResult<Vec<PdcaDraft>> {
    let mut records = parse_records(content).into_iter();

    let header = records.next().ok_or(ImportError::MissingHeader)?;
    check_header(&header)?;

    let mut drafts = Vec::new();
    for record in records {
        drafts.push(parse_row(&record)?);
    }
    Ok(drafts)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CsvRecord {
    /// 1-based line where the record starts.
    line: usize,
    fields: Vec<String>,
}

fn parse_records(content: &str) -> Vec<CsvRecord> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                other => field.push(other),
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                line += 1;
                flush_record(&mut records, &mut fields, &mut field, record_line);
                record_line = line;
            }
            other => field.push(other),
        }
    }
    // Unterminated trailing record (no final newline).
    flush_record(&mut records, &mut fields, &mut field, record_line);

    records
}

fn flush_record(
    records: &mut Vec<CsvRecord>,
    fields: &mut Vec<String>,
    field: &mut String,
    line: usize,
) {
    if fields.is_empty() && field.trim().is_empty() {
        field.clear();
        return;
    }
    fields.push(std::mem::take(field));
    records.push(CsvRecord {
        line,
        fields: std::mem::take(fields),
    });
}

fn check_header(record: &CsvRecord) -> ImportResult<()> {
    let matches = record.fields.len() == EXPECTED_HEADER.len()
        && record
            .fields
            .iter()
            .zip(EXPECTED_HEADER)
            .all(|(found, expected)| found.trim().eq_ignore_ascii_case(expected));

    if !matches {
        return Err(ImportError::HeaderMismatch {
            found: record.fields.join(","),
        });
    }
    Ok(())
}

fn parse_row(record: &CsvRecord) -> ImportResult<PdcaDraft> {
    if record.fields.len() != EXPECTED_HEADER.len() {
        return Err(row_error(
            record.line,
            format!(
                "expected {} fields, got {}",
                EXPECTED_HEADER.len(),
                record.fields.len()
            ),
        ));
    }

    let start_date = parse_date(record.line, "start_date", &record.fields[3])?;
    let end_date = parse_date(record.line, "end_date", &record.fields[4])?;

    let status_text = record.fields[5].trim();
    let status = ItemStatus::parse(status_text).ok_or_else(|| {
        row_error(
            record.line,
            format!("invalid status `{status_text}`; expected Open|Closed"),
        )
    })?;

    let remarks_text = record.fields[6].trim();
    let remarks = Remarks::parse(remarks_text).ok_or_else(|| {
        row_error(
            record.line,
            format!("invalid remarks `{remarks_text}`; expected On-going|Complete|Delay"),
        )
    })?;

    let draft = PdcaDraft {
        task: record.fields[0].clone(),
        car_model: record.fields[1].clone(),
        dri: record.fields[2].clone(),
        start_date,
        end_date,
        status,
        remarks,
    };
    draft
        .validate()
        .map_err(|err| row_error(record.line, err.to_string()))?;

    Ok(draft)
}

fn parse_date(line: usize, column: &str, value: &str) -> ImportResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        row_error(
            line,
            format!("invalid {column} `{}`; expected YYYY-MM-DD", value.trim()),
        )
    })
}

fn row_error(line: usize, message: String) -> ImportError {
    ImportError::Row { line, message }
}
