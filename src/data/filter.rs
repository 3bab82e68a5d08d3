use super::model::{DataError, HousingDataset};
use super::schema::{ControlKind, DatasetSchema};

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// One active filter predicate over a named column.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Row kept if value <= bound.
    AtMost { column: String, bound: f64 },
    /// Row kept if value >= bound.
    AtLeast { column: String, bound: f64 },
    /// Row kept if lower <= value <= upper.
    Within {
        column: String,
        lower: f64,
        upper: f64,
    },
    /// Row kept if value == 1. When `required` is false the predicate is
    /// always true (an AND with true, not an OR).
    Indicator { column: String, required: bool },
}

impl Predicate {
    pub fn column(&self) -> &str {
        match self {
            Predicate::AtMost { column, .. }
            | Predicate::AtLeast { column, .. }
            | Predicate::Within { column, .. }
            | Predicate::Indicator { column, .. } => column,
        }
    }

    fn keeps(&self, value: f64) -> bool {
        match self {
            Predicate::AtMost { bound, .. } => value <= *bound,
            Predicate::AtLeast { bound, .. } => value >= *bound,
            Predicate::Within { lower, upper, .. } => *lower <= value && value <= *upper,
            Predicate::Indicator { required, .. } => !required || value == 1.0,
        }
    }
}

/// The active set of user-chosen predicates, applied conjunctively.
/// Rebuilt from widget state on every interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub predicates: Vec<Predicate>,
}

// ---------------------------------------------------------------------------
// Default criteria
// ---------------------------------------------------------------------------

/// Build default criteria for a schema's controls, with every bound at the
/// column's observed min/max so that no row is excluded.
pub fn init_criteria(
    dataset: &HousingDataset,
    schema: &DatasetSchema,
) -> Result<FilterCriteria, DataError> {
    let mut predicates = Vec::with_capacity(schema.controls.len());
    for control in &schema.controls {
        let col = dataset.column(control.column)?;
        let (lo, hi) = col.range().unwrap_or((0.0, 0.0));
        let column = col.name.clone();
        predicates.push(match control.kind {
            ControlKind::UpperBound => Predicate::AtMost { column, bound: hi },
            ControlKind::LowerBound => Predicate::AtLeast { column, bound: lo },
            ControlKind::Range => Predicate::Within {
                column,
                lower: lo,
                upper: hi,
            },
            ControlKind::IndicatorToggle => Predicate::Indicator {
                column,
                required: false,
            },
        });
    }
    Ok(FilterCriteria { predicates })
}

// ---------------------------------------------------------------------------
// Filter application
// ---------------------------------------------------------------------------

/// Return indices of rows passing all active predicates, in original row
/// order. The dataset is never mutated; an empty result is a valid outcome.
/// Missing cells (`NaN`) never satisfy a bound and are filtered out by any
/// predicate on their column.
pub fn filtered_indices(
    dataset: &HousingDataset,
    criteria: &FilterCriteria,
) -> Result<Vec<usize>, DataError> {
    // Resolve columns up front so an unknown name fails fast instead of
    // silently passing rows through.
    let mut resolved = Vec::with_capacity(criteria.predicates.len());
    for pred in &criteria.predicates {
        resolved.push((pred, &dataset.column(pred.column())?.values));
    }

    Ok((0..dataset.len())
        .filter(|&row| resolved.iter().all(|(pred, values)| pred.keeps(values[row])))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn dataset() -> HousingDataset {
        HousingDataset::from_columns(vec![
            Column::new(
                "CRIM",
                vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0],
            ),
            Column::new(
                "CHAS",
                vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            ),
            Column::new(
                "RM",
                vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 6.5, 7.0, 7.5, 8.0],
            ),
        ])
        .unwrap()
    }

    fn at_most(column: &str, bound: f64) -> FilterCriteria {
        FilterCriteria {
            predicates: vec![Predicate::AtMost {
                column: column.into(),
                bound,
            }],
        }
    }

    #[test]
    fn default_criteria_keep_every_row() {
        let ds = dataset();
        let mut schema = crate::data::schema::DatasetSchema::boston();
        // Boston controls reference AGE which the toy table lacks; trim to
        // the columns present here.
        schema.controls.retain(|c| ds.column(c.column).is_ok());
        let criteria = init_criteria(&ds, &schema).unwrap();
        let view = filtered_indices(&ds, &criteria).unwrap();
        assert_eq!(view, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn upper_bound_keeps_subset_in_order() {
        let ds = dataset();
        let view = filtered_indices(&ds, &at_most("CRIM", 2.0)).unwrap();
        assert_eq!(view, vec![0, 1, 2, 3]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset();
        let criteria = at_most("CRIM", 3.0);
        let once = filtered_indices(&ds, &criteria).unwrap();
        // Re-filtering the surviving rows with the same criteria changes
        // nothing.
        let again: Vec<usize> = once
            .iter()
            .copied()
            .filter(|&row| ds.column("CRIM").unwrap().values[row] <= 3.0)
            .collect();
        assert_eq!(once, again);
    }

    #[test]
    fn tightening_a_bound_never_grows_the_view() {
        let ds = dataset();
        let loose = filtered_indices(&ds, &at_most("CRIM", 4.0)).unwrap();
        let tight = filtered_indices(&ds, &at_most("CRIM", 2.5)).unwrap();
        assert!(tight.len() <= loose.len());
        // And the tight view is a subset of the loose one.
        assert!(tight.iter().all(|i| loose.contains(i)));
    }

    #[test]
    fn indicator_toggle_selects_exact_rows() {
        let ds = dataset();
        let criteria = FilterCriteria {
            predicates: vec![Predicate::Indicator {
                column: "CHAS".into(),
                required: true,
            }],
        };
        assert_eq!(filtered_indices(&ds, &criteria).unwrap(), vec![2, 5, 9]);
    }

    #[test]
    fn indicator_toggle_off_is_always_true() {
        let ds = dataset();
        let criteria = FilterCriteria {
            predicates: vec![Predicate::Indicator {
                column: "CHAS".into(),
                required: false,
            }],
        };
        assert_eq!(filtered_indices(&ds, &criteria).unwrap().len(), ds.len());
    }

    #[test]
    fn range_predicate_is_inclusive() {
        let ds = HousingDataset::from_columns(vec![Column::new(
            "v",
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )])
        .unwrap();
        let criteria = FilterCriteria {
            predicates: vec![Predicate::Within {
                column: "v".into(),
                lower: 2.0,
                upper: 5.0,
            }],
        };
        let view = filtered_indices(&ds, &criteria).unwrap();
        let kept: Vec<f64> = view
            .iter()
            .map(|&i| ds.column("v").unwrap().values[i])
            .collect();
        assert_eq!(kept, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn conjunction_of_predicates() {
        let ds = dataset();
        let criteria = FilterCriteria {
            predicates: vec![
                Predicate::AtMost {
                    column: "CRIM".into(),
                    bound: 3.0,
                },
                Predicate::Indicator {
                    column: "CHAS".into(),
                    required: true,
                },
            ],
        };
        assert_eq!(filtered_indices(&ds, &criteria).unwrap(), vec![2, 5]);
    }

    #[test]
    fn out_of_range_bound_yields_empty_view_not_error() {
        let ds = dataset();
        let view = filtered_indices(&ds, &at_most("CRIM", -10.0)).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn unknown_column_is_fatal() {
        let ds = dataset();
        let err = filtered_indices(&ds, &at_most("NOPE", 1.0)).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(_)));
    }

    #[test]
    fn missing_cells_fail_bound_predicates() {
        let ds = HousingDataset::from_columns(vec![Column::new(
            "v",
            vec![1.0, f64::NAN, 3.0],
        )])
        .unwrap();
        let view = filtered_indices(&ds, &at_most("v", 5.0)).unwrap();
        assert_eq!(view, vec![0, 2]);
    }
}
