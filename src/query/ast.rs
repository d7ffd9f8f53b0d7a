use std::fmt;
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, ErrorKind, Result};
use crate::query::field::{Field, FieldKind};

/// Value a predicate compares against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Text(v) => write!(f, "{:?}", v),
        }
    }
}

/// One `field == value` condition of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: Field,
    pub value: FieldValue,
}

impl Predicate {
    /// Build a predicate, coercing the value to the field's kind.
    ///
    /// Scalar fields take integers (numeric text is accepted); multi-valued
    /// fields compare text, so integers are rendered in decimal.
    pub fn new(field: Field, value: FieldValue) -> Result<Self> {
        let value = match (field.kind(), value) {
            (FieldKind::Scalar, FieldValue::Integer(v)) => FieldValue::Integer(v),
            (FieldKind::Scalar, FieldValue::Text(text)) => match text.trim().parse::<i64>() {
                Ok(v) => FieldValue::Integer(v),
                Err(_) => {
                    return Err(Error::new(
                        ErrorKind::InvalidArgument,
                        format!("field '{}' holds integers, got {:?}", field, text),
                    ));
                }
            },
            (FieldKind::MultiValued, FieldValue::Integer(v)) => FieldValue::Text(v.to_string()),
            (FieldKind::MultiValued, FieldValue::Text(text)) => FieldValue::Text(text),
        };

        Ok(Predicate { field, value })
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.field, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_on_scalar_field_becomes_integer() {
        let p = Predicate::new(Field::ApplNo, "020812".into()).unwrap();
        assert_eq!(p.value, FieldValue::Integer(20812));
    }

    #[test]
    fn non_numeric_text_on_scalar_field_is_rejected() {
        let err = Predicate::new(Field::ProductNo, "one".into()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn integer_on_multi_valued_field_becomes_text() {
        let p = Predicate::new(Field::Strength, 5.into()).unwrap();
        assert_eq!(p.value, FieldValue::Text("5".to_string()));
    }

    #[test]
    fn display() {
        let p = Predicate::new(Field::DrugName, "ADVIL".into()).unwrap();
        assert_eq!(p.to_string(), "drug_name = \"ADVIL\"");
    }
}
