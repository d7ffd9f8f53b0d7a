use crate::core::types::Drug;
use crate::query::ast::{FieldValue, Predicate};
use crate::query::field::FieldRef;

/// Membership test: is the predicate's value in the field's value set?
///
/// A scalar field is the set holding its one value (an absent optional field
/// is the empty set); a multi-valued field is the set of its entries.
pub fn matches(drug: &Drug, predicate: &Predicate) -> bool {
    match (predicate.field.read(drug), &predicate.value) {
        (FieldRef::Scalar(value), FieldValue::Integer(wanted)) => value.iter().any(|v| v == wanted),
        (FieldRef::MultiValued(values), FieldValue::Text(wanted)) => values.iter().any(|v| v == wanted),
        // Predicate::new coerces values to the field's kind
        _ => false,
    }
}

/// All predicates at once; the reference the iterative evaluation must agree with
pub fn matches_all(drug: &Drug, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|predicate| matches(drug, predicate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::field::Field;

    fn bactrim() -> Drug {
        Drug::new(17376, 1, "TABLET;ORAL", "400MG;80MG", 1, "BACTRIM", "SULFAMETHOXAZOLE; TRIMETHOPRIM", None)
    }

    fn predicate(field: Field, value: impl Into<FieldValue>) -> Predicate {
        Predicate::new(field, value.into()).unwrap()
    }

    #[test]
    fn scalar_is_singleton() {
        assert!(matches(&bactrim(), &predicate(Field::ApplNo, 17376)));
        assert!(!matches(&bactrim(), &predicate(Field::ApplNo, 1737)));
    }

    #[test]
    fn multi_valued_is_exact_entry_membership() {
        assert!(matches(&bactrim(), &predicate(Field::ActiveIngredients, "TRIMETHOPRIM")));
        assert!(matches(&bactrim(), &predicate(Field::Strength, "80MG")));
        assert!(!matches(&bactrim(), &predicate(Field::ActiveIngredients, "TRIMETH")));
    }

    #[test]
    fn absent_reference_standard_never_matches() {
        assert!(!matches(&bactrim(), &predicate(Field::ReferenceStandard, 0)));
        assert!(!matches(&bactrim(), &predicate(Field::ReferenceStandard, 1)));
    }

    #[test]
    fn conjunction() {
        let both = [predicate(Field::Form, "ORAL"), predicate(Field::ReferenceDrug, 1)];
        let one_fails = [predicate(Field::Form, "ORAL"), predicate(Field::ReferenceDrug, 0)];
        assert!(matches_all(&bactrim(), &both));
        assert!(!matches_all(&bactrim(), &one_fails));
    }
}
