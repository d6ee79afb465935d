use super::model::ModelRecord;

// ---------------------------------------------------------------------------
// Filter predicates over the EV model table
// ---------------------------------------------------------------------------

/// Equality predicates for the model table. `None` means "All" (the
/// predicate is disabled); active predicates are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelFilter {
    pub make: Option<String>,
    pub first_year: Option<i32>,
}

impl ModelFilter {
    /// Whether any predicate is active. An empty result with an inactive
    /// filter means the table itself is empty, not that nothing matched.
    pub fn is_active(&self) -> bool {
        self.make.is_some() || self.first_year.is_some()
    }

    pub fn matches(&self, record: &ModelRecord) -> bool {
        if let Some(make) = &self.make {
            if record.make != *make {
                return false;
            }
        }
        if let Some(year) = self.first_year {
            if record.first_year != year {
                return false;
            }
        }
        true
    }
}

/// Indices of model rows passing all active predicates, in source order.
pub fn filtered_indices(models: &[ModelRecord], filter: &ModelFilter) -> Vec<usize> {
    models
        .iter()
        .enumerate()
        .filter(|(_, m)| filter.matches(m))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::count_by;

    fn fixture() -> Vec<ModelRecord> {
        [("A", "a1", 2020), ("A", "a2", 2021), ("B", "b1", 2020)]
            .into_iter()
            .map(|(make, model, year)| ModelRecord {
                make: make.to_string(),
                model: model.to_string(),
                first_year: year,
            })
            .collect()
    }

    #[test]
    fn inactive_filter_returns_everything_in_order() {
        let models = fixture();
        let filter = ModelFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filtered_indices(&models, &filter), vec![0, 1, 2]);
    }

    #[test]
    fn absent_value_yields_empty_not_error() {
        let models = fixture();
        let filter = ModelFilter {
            make: Some("Nonexistent".to_string()),
            first_year: None,
        };
        assert!(filtered_indices(&models, &filter).is_empty());
    }

    #[test]
    fn predicates_combine_with_and() {
        let models = fixture();
        let filter = ModelFilter {
            make: Some("A".to_string()),
            first_year: Some(2020),
        };
        assert_eq!(filtered_indices(&models, &filter), vec![0]);
    }

    #[test]
    fn filter_then_aggregate_scenario() {
        let models = fixture();
        let filter = ModelFilter {
            make: Some("A".to_string()),
            first_year: None,
        };
        let indices = filtered_indices(&models, &filter);
        assert_eq!(indices.len(), 2);

        let counts = count_by(&models, |m| m.first_year);
        assert_eq!(counts, vec![(2020, 2), (2021, 1)]);
    }
}
