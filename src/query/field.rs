use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Drug;

/// Every queryable column of a drug record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    ApplNo,
    ProductNo,
    Form,
    Strength,
    ReferenceDrug,
    DrugName,
    ActiveIngredients,
    ReferenceStandard,
}

/// How a field takes part in a membership test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,      // Tested as a single-element set
    MultiValued, // Tested against the whole sequence
}

/// A field's value borrowed from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Scalar(Option<i64>),
    MultiValued(&'a [String]),
}

pub struct FieldSpec {
    pub field: Field,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
    pub read: fn(&Drug) -> FieldRef<'_>,
}

/// Declaration order, matching the backing-file columns
pub static FIELD_TABLE: [FieldSpec; 8] = [
    FieldSpec { field: Field::ApplNo, name: "appl_no", aliases: &["applno", "applicationid"], kind: FieldKind::Scalar, read: read_appl_no },
    FieldSpec { field: Field::ProductNo, name: "product_no", aliases: &["productno", "productid"], kind: FieldKind::Scalar, read: read_product_no },
    FieldSpec { field: Field::Form, name: "form", aliases: &[], kind: FieldKind::MultiValued, read: read_form },
    FieldSpec { field: Field::Strength, name: "strength", aliases: &[], kind: FieldKind::MultiValued, read: read_strength },
    FieldSpec { field: Field::ReferenceDrug, name: "reference_drug", aliases: &["referencedrug", "referencedrugid"], kind: FieldKind::Scalar, read: read_reference_drug },
    FieldSpec { field: Field::DrugName, name: "drug_name", aliases: &["drugname"], kind: FieldKind::MultiValued, read: read_drug_name },
    FieldSpec { field: Field::ActiveIngredients, name: "active_ingredients", aliases: &["activeingredients", "activeingredient"], kind: FieldKind::MultiValued, read: read_active_ingredients },
    FieldSpec { field: Field::ReferenceStandard, name: "reference_standard", aliases: &["referencestandard", "referencestandardid"], kind: FieldKind::Scalar, read: read_reference_standard },
];

fn read_appl_no(drug: &Drug) -> FieldRef<'_> {
    FieldRef::Scalar(Some(drug.appl_no))
}

fn read_product_no(drug: &Drug) -> FieldRef<'_> {
    FieldRef::Scalar(Some(drug.product_no))
}

fn read_form(drug: &Drug) -> FieldRef<'_> {
    FieldRef::MultiValued(&drug.form)
}

fn read_strength(drug: &Drug) -> FieldRef<'_> {
    FieldRef::MultiValued(&drug.strength)
}

fn read_reference_drug(drug: &Drug) -> FieldRef<'_> {
    FieldRef::Scalar(Some(drug.reference_drug))
}

fn read_drug_name(drug: &Drug) -> FieldRef<'_> {
    FieldRef::MultiValued(&drug.drug_name)
}

fn read_active_ingredients(drug: &Drug) -> FieldRef<'_> {
    FieldRef::MultiValued(&drug.active_ingredients)
}

fn read_reference_standard(drug: &Drug) -> FieldRef<'_> {
    FieldRef::Scalar(drug.reference_standard)
}

impl Field {
    pub fn all() -> impl Iterator<Item = Field> {
        FIELD_TABLE.iter().map(|spec| spec.field)
    }

    /// Resolve a field name, ignoring case
    pub fn from_name(name: &str) -> Result<Field> {
        let wanted = name.trim().to_lowercase();
        FIELD_TABLE
            .iter()
            .find(|spec| spec.name == wanted || spec.aliases.contains(&wanted.as_str()))
            .map(|spec| spec.field)
            .ok_or_else(|| {
                let known: Vec<&str> = FIELD_TABLE.iter().map(|spec| spec.name).collect();
                Error::new(
                    ErrorKind::UnknownField,
                    format!("no field '{}' on drug records (expected one of: {})", name, known.join(", ")),
                )
            })
    }

    pub fn spec(self) -> &'static FieldSpec {
        // table rows are in enum declaration order
        &FIELD_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    pub fn read(self, drug: &Drug) -> FieldRef<'_> {
        (self.spec().read)(drug)
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Field::from_name(s)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
