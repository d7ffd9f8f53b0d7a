use std::fmt;
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, ErrorKind, Result};
use crate::ingest::rows::{parse_row, split_multi_value};

/// Separator used when a multi-valued field is written back to the backing file
pub const MULTI_VALUE_SEPARATOR: &str = ";";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub appl_no: i64,
    pub product_no: i64,
}

impl PrimaryKey {
    pub fn new(appl_no: i64, product_no: i64) -> Self {
        PrimaryKey { appl_no, product_no }
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.appl_no, self.product_no)
    }
}

/// One drug-product entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Drug {
    pub appl_no: i64,
    pub product_no: i64,
    pub form: Vec<String>,
    pub strength: Vec<String>,
    pub reference_drug: i64,
    pub drug_name: Vec<String>,
    pub active_ingredients: Vec<String>,
    pub reference_standard: Option<i64>,
}

impl Drug {
    /// Build a drug from raw field text, splitting multi-valued fields on `;`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        appl_no: i64,
        product_no: i64,
        form: &str,
        strength: &str,
        reference_drug: i64,
        drug_name: &str,
        active_ingredients: &str,
        reference_standard: Option<i64>,
    ) -> Self {
        Drug {
            appl_no,
            product_no,
            form: split_multi_value(form),
            strength: split_multi_value(strength),
            reference_drug,
            drug_name: split_multi_value(drug_name),
            active_ingredients: split_multi_value(active_ingredients),
            reference_standard,
        }
    }

    pub fn primary_key(&self) -> PrimaryKey {
        PrimaryKey::new(self.appl_no, self.product_no)
    }

    /// Serialize to one backing-file line, without the trailing newline
    pub fn to_line(&self) -> String {
        let reference_standard = self
            .reference_standard
            .map(|v| v.to_string())
            .unwrap_or_default();

        [
            self.appl_no.to_string(),
            self.product_no.to_string(),
            self.form.join(MULTI_VALUE_SEPARATOR),
            self.strength.join(MULTI_VALUE_SEPARATOR),
            self.reference_drug.to_string(),
            self.drug_name.join(MULTI_VALUE_SEPARATOR),
            self.active_ingredients.join(MULTI_VALUE_SEPARATOR),
            reference_standard,
        ]
        .join("\t")
    }

    /// Serialize to a line that is guaranteed to parse back to `self`.
    ///
    /// Fails with `InvalidArgument` for values the line format cannot carry:
    /// line breaks, tabs, `;` inside an entry, empty sequences, padded entries.
    pub fn to_checked_line(&self) -> Result<String> {
        let line = self.to_line();
        if line.contains(['\n', '\r']) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("drug {} has a value containing a line break", self.primary_key()),
            ));
        }

        match Drug::from_line(&line) {
            Ok(parsed) if parsed == *self => Ok(line),
            _ => Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("drug {} does not survive a write to the backing file: {:?}", self.primary_key(), line),
            )),
        }
    }

    /// Parse one backing-file line
    pub fn from_line(line: &str) -> Result<Self> {
        let fields: Vec<String> = line
            .trim_end_matches(['\r', '\n'])
            .split('\t')
            .map(|field| field.trim().to_string())
            .collect();
        parse_row(&fields)
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Drug(appl_no={}, product_no={}, form={:?}, strength={:?}, reference_drug={}, drug_name={:?}, active_ingredients={:?}, reference_standard={:?})",
            self.appl_no,
            self.product_no,
            self.form,
            self.strength,
            self.reference_drug,
            self.drug_name,
            self.active_ingredients,
            self.reference_standard,
        )
    }
}
