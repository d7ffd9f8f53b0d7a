use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use nom::{IResult, Parser};
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_while};
use nom::character::complete::char;
use nom::combinator::{all_consuming, cut, map, value};
use nom::multi::{fold_many0, separated_list0};
use nom::sequence::{preceded, terminated};
use crate::core::error::{Error, ErrorKind, Result};
use crate::ingest::RowSet;

/// Write the comma-separated intermediate copy, quoting only where needed
pub fn write_rows(path: &Path, rows: &RowSet) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        Error::new(ErrorKind::Io, format!("Failed to create CSV copy {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    for row in rows.iter() {
        let line = row
            .iter()
            .map(|field| escape_field(field))
            .collect::<Vec<_>>()
            .join(",");
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

pub fn read_rows(path: &Path) -> Result<RowSet> {
    let reader = BufReader::new(File::open(path)?);

    let mut rows = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let row = parse_record(&line).map_err(|e| {
            Error::new(e.kind, format!("{} line {}: {}", path.display(), line_no + 1, e.context))
        })?;
        rows.push(row);
    }

    Ok(RowSet::from_rows(rows))
}

pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse one CSV record into its fields
pub fn parse_record(line: &str) -> Result<Vec<String>> {
    record(line)
        .map(|(_, fields)| fields)
        .map_err(|e| Error::new(ErrorKind::Parse, format!("malformed CSV record: {}", e)))
}

fn record(input: &str) -> IResult<&str, Vec<String>> {
    all_consuming(separated_list0(char(','), alt((quoted_field, bare_field)))).parse(input)
}

fn quoted_field(input: &str) -> IResult<&str, String> {
    // once a field opens with a quote it must close with one
    preceded(
        char('"'),
        cut(terminated(
            fold_many0(
                alt((is_not("\""), value("\"", tag("\"\"")))),
                String::new,
                |mut acc: String, piece: &str| {
                    acc.push_str(piece);
                    acc
                },
            ),
            char('"'),
        )),
    )
    .parse(input)
}

fn bare_field(input: &str) -> IResult<&str, String> {
    map(take_while(|c: char| c != ','), String::from).parse(input)
}
