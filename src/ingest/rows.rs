use std::sync::LazyLock;
use regex::Regex;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Drug;
use crate::ingest::RowSet;
use crate::storage::layout::StorageLayout;

/// Source text separates multi-valued entries with "; " or ";"
static MULTI_VALUE_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("; |;").expect("static multi-value pattern is valid")
});

/// Columns before the optional trailing `reference_standard`
const REQUIRED_COLUMNS: usize = 7;

pub fn split_multi_value(raw: &str) -> Vec<String> {
    MULTI_VALUE_SPLIT.split(raw).map(String::from).collect()
}

/// Deserialize one row of trimmed fields into a drug
pub fn parse_row(row: &[String]) -> Result<Drug> {
    if row.len() < REQUIRED_COLUMNS {
        return Err(Error::new(
            ErrorKind::Parse,
            format!("expected at least {} columns, found {}", REQUIRED_COLUMNS, row.len()),
        ));
    }

    let reference_standard = match row.get(7).map(|s| s.as_str()) {
        None | Some("") => None,
        Some(raw) => Some(parse_int("reference_standard", raw)?),
    };

    Ok(Drug {
        appl_no: parse_int("appl_no", &row[0])?,
        product_no: parse_int("product_no", &row[1])?,
        form: split_multi_value(&row[2]),
        strength: split_multi_value(&row[3]),
        reference_drug: parse_int("reference_drug", &row[4])?,
        drug_name: split_multi_value(&row[5]),
        active_ingredients: split_multi_value(&row[6]),
        reference_standard,
    })
}

/// Deserialize every row, in order. Errors name the source line.
pub fn create_db(rows: &RowSet) -> Result<Vec<Drug>> {
    let mut drugs = Vec::with_capacity(rows.len());

    for (position, row) in rows.iter().enumerate() {
        let drug = parse_row(row).map_err(|e| {
            Error::new(
                e.kind,
                format!("line {}: {}", position + StorageLayout::HEADER_LINES + 1, e.context),
            )
        })?;
        drugs.push(drug);
    }

    Ok(drugs)
}

fn parse_int(column: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|e| {
        Error::new(ErrorKind::Parse, format!("{} '{}': {}", column, raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn splits_on_semicolon_with_or_without_space() {
        assert_eq!(
            split_multi_value("SULFAMETHOXAZOLE; TRIMETHOPRIM;X"),
            vec!["SULFAMETHOXAZOLE", "TRIMETHOPRIM", "X"]
        );
        assert_eq!(split_multi_value("TABLET"), vec!["TABLET"]);
    }

    #[test]
    fn parses_leading_zero_application_numbers() {
        let drug = parse_row(&row(&["000004", "004", "SOLUTION/DROPS;OPHTHALMIC", "1%", "0", "PAREDRINE", "HYDROXYAMPHETAMINE HYDROBROMIDE", "0"])).unwrap();
        assert_eq!(drug.appl_no, 4);
        assert_eq!(drug.product_no, 4);
        assert_eq!(drug.form, vec!["SOLUTION/DROPS", "OPHTHALMIC"]);
        assert_eq!(drug.reference_standard, Some(0));
    }

    #[test]
    fn missing_reference_standard_is_none() {
        let short = parse_row(&row(&["1", "1", "TABLET", "5MG", "0", "A", "B"])).unwrap();
        let empty = parse_row(&row(&["1", "1", "TABLET", "5MG", "0", "A", "B", ""])).unwrap();
        assert_eq!(short.reference_standard, None);
        assert_eq!(empty, short);
    }

    #[test]
    fn non_numeric_key_is_parse_error() {
        let err = parse_row(&row(&["ApplNo", "ProductNo", "Form", "Strength", "ReferenceDrug", "DrugName", "ActiveIngredient", "ReferenceStandard"])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert!(err.context.contains("appl_no"));
    }

    #[test]
    fn create_db_reports_file_line() {
        let rows = RowSet::from_rows(vec![
            row(&["1", "1", "TABLET", "5MG", "0", "A", "B", "0"]),
            row(&["2", "x", "TABLET", "5MG", "0", "A", "B", "0"]),
        ]);
        let err = create_db(&rows).unwrap_err();
        assert!(err.context.starts_with("line 3:"), "{}", err.context);
    }
}
