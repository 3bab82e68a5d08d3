use super::model::{DataError, HousingDataset};

// ---------------------------------------------------------------------------
// Plot-input selection
// ---------------------------------------------------------------------------
//
// These functions only select values; bucketing and visual encoding are the
// presentation layer's job.

/// Values of one column restricted to the given view, in view order.
pub fn column_series(
    dataset: &HousingDataset,
    view: &[usize],
    column: &str,
) -> Result<Vec<f64>, DataError> {
    let col = dataset.column(column)?;
    Ok(view.iter().map(|&i| col.values[i]).collect())
}

/// Index-aligned (x, y) pairs of two columns restricted to the given view:
/// pair `i` of x and y come from the same source row.
pub fn paired_series(
    dataset: &HousingDataset,
    view: &[usize],
    x_column: &str,
    y_column: &str,
) -> Result<Vec<[f64; 2]>, DataError> {
    let x = dataset.column(x_column)?;
    let y = dataset.column(y_column)?;
    Ok(view
        .iter()
        .map(|&i| [x.values[i], y.values[i]])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn dataset() -> HousingDataset {
        HousingDataset::from_columns(vec![
            Column::new("age", vec![10.0, 20.0, 30.0]),
            Column::new("value", vec![1.0, 2.0, 3.0]),
        ])
        .unwrap()
    }

    #[test]
    fn pairs_stay_index_aligned() {
        let ds = dataset();
        let view = vec![0, 1, 2];
        let pairs = paired_series(&ds, &view, "age", "value").unwrap();
        assert_eq!(pairs, vec![[10.0, 1.0], [20.0, 2.0], [30.0, 3.0]]);
    }

    #[test]
    fn view_restriction_preserves_order() {
        let ds = dataset();
        let series = column_series(&ds, &[2, 0], "value").unwrap();
        assert_eq!(series, vec![3.0, 1.0]);
    }

    #[test]
    fn empty_view_gives_empty_series() {
        let ds = dataset();
        assert!(column_series(&ds, &[], "value").unwrap().is_empty());
        assert!(paired_series(&ds, &[], "age", "value").unwrap().is_empty());
    }

    #[test]
    fn unknown_column_is_fatal() {
        let ds = dataset();
        assert!(matches!(
            column_series(&ds, &[0], "nope"),
            Err(DataError::MissingColumn(_))
        ));
    }
}
