use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::filter::Predicate;
use crate::data::schema::DatasetSchema;
use crate::data::stats::SummaryStats;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.label(
        RichText::new("Adjust the controls to see how the target column responds.").weak(),
    );
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Slider endpoints come from the observed min/max of each control's
    // column, captured up front so the criteria can be mutated below.
    let labels: Vec<String> = state
        .schema
        .controls
        .iter()
        .map(|c| c.label.to_string())
        .collect();
    let ranges: Vec<(f64, f64)> = state
        .schema
        .controls
        .iter()
        .map(|c| {
            dataset
                .column(c.column)
                .ok()
                .and_then(|col| col.range())
                .unwrap_or((0.0, 0.0))
        })
        .collect();
    let float_cols = dataset.float_column_names();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, pred) in state.criteria.predicates.iter_mut().enumerate() {
                let (lo, hi) = ranges[idx];

                ui.strong(labels[idx].clone());
                match pred {
                    Predicate::AtMost { bound, .. } | Predicate::AtLeast { bound, .. } => {
                        if ui.add(Slider::new(bound, lo..=hi)).changed() {
                            changed = true;
                        }
                    }
                    Predicate::Within { lower, upper, .. } => {
                        if ui
                            .add(Slider::new(lower, lo..=hi).text("from"))
                            .changed()
                        {
                            *upper = upper.max(*lower);
                            changed = true;
                        }
                        if ui.add(Slider::new(upper, lo..=hi).text("to")).changed() {
                            *lower = lower.min(*upper);
                            changed = true;
                        }
                    }
                    Predicate::Indicator { required, .. } => {
                        // The label carries the meaning; the checkbox itself
                        // stays short.
                        if ui.checkbox(required, "required").changed() {
                            changed = true;
                        }
                    }
                }
                ui.add_space(6.0);
            }

            if ui.button("Reset filters").clicked() {
                state.reset_criteria();
            }

            ui.separator();
            ui.strong("Plot columns");
            column_combo(ui, "hist_col", "Histogram", &float_cols, &mut state.hist_column);
            column_combo(ui, "scatter_x", "Scatter X", &float_cols, &mut state.scatter_x);
            column_combo(ui, "scatter_y", "Scatter Y", &float_cols, &mut state.scatter_y);
        });

    if changed {
        state.refilter();
    }
}

/// Combo box over the float-typed columns (the only eligible plot targets).
fn column_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    float_cols: &[String],
    choice: &mut Option<String>,
) {
    let current = choice.clone().unwrap_or_default();
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(current.clone())
            .show_ui(ui, |ui: &mut Ui| {
                for col in float_cols {
                    if ui.selectable_label(current == *col, col).clicked() {
                        *choice = Some(col.clone());
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Dataset", |ui: &mut Ui| {
            for preset in DatasetSchema::presets() {
                let selected = preset.name == state.schema.name;
                if ui.selectable_label(selected, preset.name).clicked() {
                    state.set_schema(preset);
                    ui.close_menu();
                }
            }
            ui.separator();
            if let Some(url) = state.schema.source_url {
                if ui.button("Fetch from source…").clicked() {
                    fetch_remote(state, url);
                    ui.close_menu();
                }
            }
            if ui.button("Open file…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.schema.name);
        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} after filters",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if state.loading {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Dataset acquisition
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open housing data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} rows from {}", dataset.len(), path.display());
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

fn fetch_remote(state: &mut AppState, url: &str) {
    state.loading = true;
    match crate::data::loader::load_remote_csv(url) {
        Ok(dataset) => {
            log::info!("Fetched {} rows from {url}", dataset.len());
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to fetch dataset: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            state.loading = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Central-panel tables
// ---------------------------------------------------------------------------

/// Feature dictionary of the active preset.
pub fn dictionary_table(ui: &mut Ui, schema: &DatasetSchema) {
    ui.push_id("dictionary", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(TableColumn::auto().at_least(90.0))
            .column(TableColumn::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Feature");
                });
                header.col(|ui| {
                    ui.strong("Description");
                });
            })
            .body(|mut body| {
                for (feature, description) in schema.dictionary {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.monospace(*feature);
                        });
                        row.col(|ui| {
                            ui.label(*description);
                        });
                    });
                }
            });
    });
}

/// Column kinds and missing-value counts of the loaded dataset.
pub fn diagnostics_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.push_id("diagnostics", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(TableColumn::auto().at_least(90.0))
            .column(TableColumn::auto().at_least(70.0))
            .column(TableColumn::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Column");
                });
                header.col(|ui| {
                    ui.strong("Type");
                });
                header.col(|ui| {
                    ui.strong("Missing");
                });
            })
            .body(|mut body| {
                for col in dataset.columns() {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.monospace(&col.name);
                        });
                        row.col(|ui| {
                            ui.label(col.kind.to_string());
                        });
                        row.col(|ui| {
                            ui.label(col.missing().to_string());
                        });
                    });
                }
            });
    });
}

/// First rows of the loaded dataset.
pub fn preview_table(ui: &mut Ui, state: &AppState, n_rows: usize) {
    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let shown = n_rows.min(dataset.len());

    ui.push_id("preview", |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui).striped(true);
        for _ in dataset.columns() {
            builder = builder.column(TableColumn::auto().at_least(60.0));
        }
        builder
            .header(20.0, |mut header| {
                for col in dataset.columns() {
                    header.col(|ui| {
                        ui.monospace(&col.name);
                    });
                }
            })
            .body(|mut body| {
                for row_idx in 0..shown {
                    body.row(18.0, |mut row| {
                        for col in dataset.columns() {
                            let v = col.values[row_idx];
                            row.col(|ui| {
                                if v.is_nan() {
                                    ui.weak("–");
                                } else {
                                    ui.label(format!("{v:.3}"));
                                }
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Summary readout
// ---------------------------------------------------------------------------

/// Summary statistics of the target column over the filtered view.
pub fn summary_section(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let target = state.schema.target;

    ui.strong(format!("Summary of {target}"));

    if state.visible_indices.is_empty() {
        ui.label(RichText::new("No data for the current filters.").color(Color32::YELLOW));
        return;
    }

    let values = match crate::data::series::column_series(dataset, &state.visible_indices, target)
    {
        Ok(v) => v,
        Err(e) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
            return;
        }
    };

    match SummaryStats::compute(&values) {
        Some(stats) => {
            egui::Grid::new("summary_grid").num_columns(2).show(ui, |ui: &mut Ui| {
                ui.label("Count");
                ui.monospace(stats.count.to_string());
                ui.end_row();
                ui.label("Mean");
                ui.monospace(format!("{:.2}", stats.mean));
                ui.end_row();
                ui.label("Median");
                ui.monospace(format!("{:.2}", stats.median));
                ui.end_row();
                ui.label("Std deviation");
                ui.monospace(format!("{:.2}", stats.std_dev));
                ui.end_row();
                ui.label("Range (max − min)");
                ui.monospace(format!("{:.2}", stats.range));
                ui.end_row();
            });
            if ui.small_button("Copy as JSON").clicked() {
                if let Ok(json) = serde_json::to_string_pretty(&stats) {
                    ui.ctx().copy_text(json);
                }
            }
        }
        None => {
            ui.label(RichText::new("No data for the current filters.").color(Color32::YELLOW));
        }
    }
}
