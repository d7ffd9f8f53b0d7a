use tracing::{debug, info};
use crate::core::database::DrugDB;
use crate::core::error::Result;
use crate::core::types::Drug;
use crate::query::ast::{FieldValue, Predicate};
use crate::query::field::Field;
use crate::query::matcher::matches;

/// Chainable conjunction of field predicates over a store.
///
/// Nothing is read from the store until `results()`, which always sees the
/// store's collection as it is at that moment.
#[derive(Clone)]
pub struct Query<'a> {
    db: &'a DrugDB,
    predicates: Vec<Predicate>,
}

impl<'a> Query<'a> {
    pub(crate) fn new(db: &'a DrugDB, first: Predicate) -> Self {
        Query {
            db,
            predicates: vec![first],
        }
    }

    /// Add a predicate by field name
    pub fn filter(self, field: &str, value: impl Into<FieldValue>) -> Result<Query<'a>> {
        let field = Field::from_name(field)?;
        self.filter_field(field, value)
    }

    /// Add a predicate. Filtering a field already in the chain replaces its
    /// value but keeps its place in the evaluation order.
    pub fn filter_field(mut self, field: Field, value: impl Into<FieldValue>) -> Result<Query<'a>> {
        let predicate = Predicate::new(field, value.into())?;

        match self.predicates.iter_mut().find(|p| p.field == field) {
            Some(existing) => *existing = predicate,
            None => self.predicates.push(predicate),
        }

        Ok(self)
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Evaluate against the store's current records
    pub fn results(&self) -> Vec<Drug> {
        let results = self.db.read_for_query(|drugs| refine(drugs, &self.predicates));

        if self.db.config().log_results {
            info!(count = results.len(), "Retrieve {} records", results.len());
            for drug in &results {
                debug!("{}", drug);
            }
        }

        results
    }

    pub fn count(&self) -> usize {
        self.db.read_for_query(|drugs| refine(drugs, &self.predicates).len())
    }
}

/// Iterative refinement: the first predicate selects from the full
/// collection, each later one narrows the running result in place.
pub fn refine(drugs: &[Drug], predicates: &[Predicate]) -> Vec<Drug> {
    let mut filtered: Vec<Drug> = Vec::new();

    for (step, predicate) in predicates.iter().enumerate() {
        if step == 0 {
            for drug in drugs.iter().rev() {
                if matches(drug, predicate) {
                    filtered.push(drug.clone());
                }
            }
            // collected back to front
            filtered.reverse();
        } else {
            for i in (0..filtered.len()).rev() {
                if !matches(&filtered[i], predicate) {
                    filtered.remove(i);
                }
            }
        }
    }

    filtered
}
