use super::model::HousingDataset;

// ---------------------------------------------------------------------------
// Filter control layout
// ---------------------------------------------------------------------------

/// Which widget a filter control renders as, and which predicate it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Single slider, keeps rows with value <= bound.
    UpperBound,
    /// Single slider, keeps rows with value >= bound.
    LowerBound,
    /// Two-ended slider, keeps rows with lower <= value <= upper.
    Range,
    /// Checkbox on a 0/1 column; when off the predicate is always true.
    IndicatorToggle,
}

/// One filter control of a dataset preset.
#[derive(Debug, Clone)]
pub struct ControlSpec {
    pub column: &'static str,
    pub kind: ControlKind,
    pub label: &'static str,
}

// ---------------------------------------------------------------------------
// DatasetSchema – per-preset configuration
// ---------------------------------------------------------------------------

/// Everything that varies between dataset presets: the feature dictionary,
/// the filter-control layout, the summary target column, column-name
/// normalization, and an optional remote CSV source.
#[derive(Debug, Clone)]
pub struct DatasetSchema {
    pub name: &'static str,
    /// Column whose summary statistics are shown.
    pub target: &'static str,
    /// Upper-case column names after load (Boston convention).
    pub uppercase_columns: bool,
    /// Remote CSV to fetch when the preset is selected, if any.
    pub source_url: Option<&'static str>,
    /// Feature dictionary: (column, description).
    pub dictionary: &'static [(&'static str, &'static str)],
    pub controls: Vec<ControlSpec>,
}

impl DatasetSchema {
    /// Apply the preset's column-name normalization to a freshly loaded
    /// dataset.
    pub fn normalize(&self, dataset: &mut HousingDataset) {
        if self.uppercase_columns {
            dataset.uppercase_column_names();
        }
    }

    /// Boston housing preset (selva86 CSV, upper-cased column names).
    pub fn boston() -> Self {
        DatasetSchema {
            name: "Boston Housing",
            target: "MEDV",
            uppercase_columns: true,
            source_url: Some(
                "https://raw.githubusercontent.com/selva86/datasets/master/BostonHousing.csv",
            ),
            dictionary: &[
                ("CRIM", "Per-capita crime rate by town."),
                ("ZN", "Proportion of residential land zoned for lots over 25,000 sq. ft."),
                ("INDUS", "Proportion of non-retail business acres per town."),
                ("CHAS", "Charles River dummy (1 if tract bounds the river, 0 otherwise)."),
                ("RM", "Average number of rooms per dwelling."),
                ("AGE", "Proportion of owner-occupied units built before 1940."),
                ("LSTAT", "Percentage of population with lower socio-economic status."),
                ("MEDV", "Median value of owner-occupied homes, in $1000s (target)."),
            ],
            controls: vec![
                ControlSpec {
                    column: "CRIM",
                    kind: ControlKind::UpperBound,
                    label: "Max crime rate (CRIM)",
                },
                ControlSpec {
                    column: "CHAS",
                    kind: ControlKind::IndicatorToggle,
                    label: "Bounds Charles River (CHAS = 1)",
                },
                ControlSpec {
                    column: "RM",
                    kind: ControlKind::Range,
                    label: "Rooms per dwelling (RM)",
                },
                ControlSpec {
                    column: "AGE",
                    kind: ControlKind::LowerBound,
                    label: "Min building age share (AGE)",
                },
            ],
        }
    }

    /// California housing preset (column names kept as-is).
    pub fn california() -> Self {
        DatasetSchema {
            name: "California Housing",
            target: "MedHouseVal",
            uppercase_columns: false,
            source_url: None,
            dictionary: &[
                ("MedInc", "Median income in the block group, in $10,000s."),
                ("HouseAge", "Median house age in the block group."),
                ("AveRooms", "Average number of rooms per household."),
                ("AveBedrms", "Average number of bedrooms per household."),
                ("Population", "Block group population."),
                ("AveOccup", "Average number of household members."),
                ("Latitude", "Block group latitude."),
                ("Longitude", "Block group longitude."),
                ("MedHouseVal", "Median house value, in $100,000s (target)."),
            ],
            controls: vec![
                ControlSpec {
                    column: "MedInc",
                    kind: ControlKind::UpperBound,
                    label: "Max median income (MedInc)",
                },
                ControlSpec {
                    column: "HouseAge",
                    kind: ControlKind::Range,
                    label: "House age (HouseAge)",
                },
                ControlSpec {
                    column: "AveRooms",
                    kind: ControlKind::LowerBound,
                    label: "Min rooms per household (AveRooms)",
                },
            ],
        }
    }

    /// All built-in presets, in menu order.
    pub fn presets() -> Vec<DatasetSchema> {
        vec![DatasetSchema::boston(), DatasetSchema::california()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    #[test]
    fn boston_normalization_uppercases_names() {
        let mut ds = HousingDataset::from_columns(vec![
            Column::new("crim", vec![0.1]),
            Column::new("medv", vec![24.0]),
        ])
        .unwrap();
        DatasetSchema::boston().normalize(&mut ds);
        assert!(ds.column("CRIM").is_ok());
        assert!(ds.column("crim").is_err());
    }

    #[test]
    fn california_normalization_keeps_names() {
        let mut ds =
            HousingDataset::from_columns(vec![Column::new("MedInc", vec![3.5])]).unwrap();
        DatasetSchema::california().normalize(&mut ds);
        assert!(ds.column("MedInc").is_ok());
    }
}
