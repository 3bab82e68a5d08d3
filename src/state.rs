use crate::color::ClassColors;
use crate::data::filter::{filtered_indices, init_criteria, FilterCriteria};
use crate::data::model::HousingDataset;
use crate::data::schema::DatasetSchema;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The loaded dataset is immutable for the rest of the session; everything
/// else is derived from it and the current widget values, and is recomputed
/// synchronously on every interaction.
pub struct AppState {
    /// Active dataset preset (feature dictionary, controls, target column).
    pub schema: DatasetSchema,

    /// Loaded dataset (None until the user loads or fetches one).
    pub dataset: Option<HousingDataset>,

    /// Current widget values as explicit predicates.
    pub criteria: FilterCriteria,

    /// Indices of rows passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Column shown in the histogram.
    pub hist_column: Option<String>,

    /// Columns shown on the scatter plot.
    pub scatter_x: Option<String>,
    pub scatter_y: Option<String>,

    /// Colours for the dataset's indicator column, if it has one.
    pub class_colors: Option<ClassColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            schema: DatasetSchema::boston(),
            dataset: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            hist_column: None,
            scatter_x: None,
            scatter_y: None,
            class_colors: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: normalize column names per the active
    /// schema, build include-everything default criteria, and pick default
    /// plot columns.
    ///
    /// A schema control naming an absent column is a configuration defect;
    /// the dataset is rejected and the error surfaced immediately.
    pub fn set_dataset(&mut self, mut dataset: HousingDataset) {
        self.schema.normalize(&mut dataset);

        let criteria = match init_criteria(&dataset, &self.schema) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Dataset does not match the {} schema: {e}", self.schema.name);
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
                return;
            }
        };

        self.criteria = criteria;
        self.visible_indices = (0..dataset.len()).collect();

        let float_cols = dataset.float_column_names();
        let target = self.schema.target.to_string();
        self.hist_column = if float_cols.contains(&target) {
            Some(target.clone())
        } else {
            float_cols.first().cloned()
        };
        self.scatter_y = self.hist_column.clone();
        self.scatter_x = float_cols.iter().find(|c| **c != target).cloned();

        self.class_colors = dataset
            .indicator_column()
            .map(|col| ClassColors::new(&col.name, &[0, 1]));

        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Switch to another dataset preset; the current dataset no longer
    /// matches it and is dropped.
    pub fn set_schema(&mut self, schema: DatasetSchema) {
        self.schema = schema;
        self.dataset = None;
        self.criteria = FilterCriteria::default();
        self.visible_indices.clear();
        self.hist_column = None;
        self.scatter_x = None;
        self.scatter_y = None;
        self.class_colors = None;
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            match filtered_indices(ds, &self.criteria) {
                Ok(view) => self.visible_indices = view,
                Err(e) => {
                    // Criteria columns were validated at load time, so this
                    // only fires on a real config defect.
                    log::error!("Filtering failed: {e}");
                    self.status_message = Some(format!("Error: {e}"));
                    self.visible_indices.clear();
                }
            }
        }
    }

    /// Reset every control to its include-everything default.
    pub fn reset_criteria(&mut self) {
        if let Some(ds) = &self.dataset {
            if let Ok(criteria) = init_criteria(ds, &self.schema) {
                self.criteria = criteria;
                self.refilter();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Predicate;
    use crate::data::model::Column;

    fn boston_like() -> HousingDataset {
        HousingDataset::from_columns(vec![
            Column::new("crim", vec![0.5, 4.0, 2.0]),
            Column::new("chas", vec![0.0, 1.0, 0.0]),
            Column::new("rm", vec![5.5, 6.5, 7.5]),
            Column::new("age", vec![30.5, 60.5, 90.5]),
            Column::new("medv", vec![24.5, 18.5, 30.5]),
        ])
        .unwrap()
    }

    #[test]
    fn ingest_normalizes_and_defaults_to_full_view() {
        let mut state = AppState::default();
        state.set_dataset(boston_like());
        let ds = state.dataset.as_ref().unwrap();
        assert!(ds.column("CRIM").is_ok());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.hist_column.as_deref(), Some("MEDV"));
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn schema_mismatch_rejects_dataset() {
        let mut state = AppState::default();
        let ds =
            HousingDataset::from_columns(vec![Column::new("unrelated", vec![1.5])]).unwrap();
        state.set_dataset(ds);
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn refilter_updates_cached_view() {
        let mut state = AppState::default();
        state.set_dataset(boston_like());
        for pred in &mut state.criteria.predicates {
            if let Predicate::AtMost { column, bound } = pred {
                if column == "CRIM" {
                    *bound = 1.0;
                }
            }
        }
        state.refilter();
        assert_eq!(state.visible_indices, vec![0]);

        state.reset_criteria();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }
}
