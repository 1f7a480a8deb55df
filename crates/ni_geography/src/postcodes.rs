//! NISRA Central Postcode Directory (CPD light).
//!
//! Some revisions of the file carry locality names with unquoted commas,
//! e.g. `NEWRY, MOURNE AND DOWN`. Those commas are escaped with a backslash
//! before the file is parsed, and the parser honours backslash escapes.

use std::path::Path;

use regex::{NoExpand, Regex};
use serde::Deserialize;
use tracing::info;

use crate::GeographyError;

const ESCAPE: char = '\\';
const QUOTE: char = '"';
const DELIMITER: char = ',';

/// Pattern and replacement for every known unescaped comma, tied to the
/// July 2024 revision of the directory.
const LOCALITY_REPAIRS: [(&str, &str); 6] = [
    (r"NEWRY,\s+MOURNE", r"NEWRY\, MOURNE"),
    (r"Newry,\s+Mourne", r"Newry\, Mourne"),
    (r"ARMAGH CITY,\s+BANBRIDGE", r"ARMAGH CITY\, BANBRIDGE"),
    (r"Armagh City,\s+Banbridge", r"Armagh City\, Banbridge"),
    (r"Armagh,\s+Banbridge", r"Armagh\, Banbridge"),
    (r"Boho,Cleenish", r"Boho\,Cleenish"),
];

const REQUIRED_COLUMNS: [&str; 3] = ["postcode", "SA2011", "DZ2021"];

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PostcodeRecord {
    /// Postcode without spaces, e.g. `BT126BA`
    pub postcode: String,
    #[serde(rename = "SA2011")]
    pub sa2011: String,
    #[serde(rename = "DZ2021")]
    pub dz2021: String,
}

pub fn repair_postcode_directory(content: &str) -> Result<String, GeographyError> {
    let mut content = content.to_string();

    for (pattern, replacement) in LOCALITY_REPAIRS {
        let regex = Regex::new(pattern)?;
        content = regex
            .replace_all(&content, NoExpand(replacement))
            .into_owned();
    }

    Ok(content)
}

/// Splits one line on delimiters that are neither escaped nor inside double
/// quotes. Escape characters are removed, `""` inside quotes is a quote.
pub fn split_escaped_line(line: &str) -> csv::StringRecord {
    let mut record = csv::StringRecord::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => {
                if let Some(escaped) = chars.next() {
                    field.push(escaped);
                }
            }
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                chars.next();
                field.push(QUOTE);
            }
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                record.push_field(&field);
                field.clear();
            }
            _ => field.push(c),
        }
    }
    record.push_field(&field);

    record
}

pub fn parse_postcode_directory(content: &str) -> Result<Vec<PostcodeRecord>, GeographyError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();
    let headers = split_escaped_line(lines.next().unwrap_or_default());

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(GeographyError::MissingColumn {
                column: column.to_string(),
                file: String::from("postcode directory"),
            });
        }
    }

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let record = split_escaped_line(line);
        if record.len() != headers.len() {
            return Err(GeographyError::MalformedRecord {
                line: index + 2,
                expected: headers.len(),
                found: record.len(),
            });
        }

        records.push(record.deserialize::<PostcodeRecord>(Some(&headers))?);
    }

    Ok(records)
}

pub fn read_postcode_directory<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PostcodeRecord>, GeographyError> {
    let bytes = std::fs::read(path.as_ref())?;
    let content = repair_postcode_directory(&String::from_utf8_lossy(&bytes))?;
    let records = parse_postcode_directory(&content)?;

    info!(
        postcodes = records.len(),
        path = %path.as_ref().display(),
        "Loaded postcode directory"
    );

    Ok(records)
}
