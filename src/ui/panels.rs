use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::{DataSource, MAX_TOP_N};
use crate::data::aggregate::{
    closed_attraction_names, closure_counts, count_attractions_by_land,
    count_attractions_by_park, extreme_wait_times, summarize_samples, wait_time_samples,
};
use crate::data::error::InvalidParameter;
use crate::data::model::{Slot, WaitTimeTable};
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                let source = state.source.clone();
                state.load(source);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows, {} parks, {} days",
                ds.len(),
                ds.parks().len(),
                ds.days().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open wait time data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load(DataSource::File(path));
    }
}

// ---------------------------------------------------------------------------
// Dashboard sections
// ---------------------------------------------------------------------------

/// Render every dashboard section top to bottom.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.dataset.take() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dataset loaded  (File → Open… or Reload)");
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Visualizing Theme Park Data");
            ui.add_space(8.0);

            park_comparison(ui, state, &table);
            ui.separator();
            land_breakdown(ui, state, &table);
            ui.separator();
            wait_extremes(ui, state, &table);
            ui.separator();
            closures(ui, state, &table);
            ui.separator();
            distribution(ui, state, &table);
        });

    state.dataset = Some(table);
}

fn park_comparison(ui: &mut Ui, state: &mut AppState, table: &WaitTimeTable) {
    ui.strong("Comparing Attraction Counts Across Parks");
    ui.label("Select as many parks as you like to compare how many attractions each one has.");

    ui.horizontal_wrapped(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.compare_all(table);
        }
        if ui.small_button("None").clicked() {
            state.compare_none();
        }
        for park in table.parks() {
            let mut checked = state.comparison.parks.contains(park);
            let text = RichText::new(park).color(state.park_colors.color_for(park));
            if ui.checkbox(&mut checked, text).changed() {
                state.toggle_compared_park(park);
            }
        }
    });

    let counts = count_attractions_by_park(table, &state.comparison.parks);
    if counts.is_empty() {
        ui.weak("No parks selected.");
    } else {
        plot::park_count_chart(ui, &counts, &state.park_colors);
    }
}

fn land_breakdown(ui: &mut Ui, state: &mut AppState, table: &WaitTimeTable) {
    ui.strong("Attraction Counts in Theme Park Lands");
    ui.label("Each park is split into lands. Pick a park to see how many attractions each land holds.");

    choice_combo(ui, "land_park", "Park", table.parks(), &mut state.lands.park);

    match count_attractions_by_land(table, &state.lands.park) {
        Ok(counts) => plot::land_count_chart(ui, &counts),
        Err(e) => parameter_error(ui, &e),
    }
}

fn wait_extremes(ui: &mut Ui, state: &mut AppState, table: &WaitTimeTable) {
    ui.strong("Highest and Lowest Wait Times");
    ui.label("Pick a day, a park and a time of day. Closed attractions are left out.");

    let mut day = state.ranking.day.clone();
    ui.horizontal(|ui: &mut Ui| {
        choice_combo(ui, "ranking_day", "Day", table.days(), &mut day);
        let parks = table.parks_on(&day);
        choice_combo(ui, "ranking_park", "Park", &parks, &mut state.ranking.park);
        ui.label("Rows");
        ui.add(egui::DragValue::new(&mut state.ranking.top_n).range(1..=MAX_TOP_N));
    });
    if day != state.ranking.day {
        state.set_ranking_day(table, day);
    }
    slot_selector(ui, &mut state.ranking.slot);

    let ranking = &state.ranking;
    match extreme_wait_times(table, &ranking.day, &ranking.park, ranking.slot, ranking.top_n) {
        Ok(extremes) => {
            let n = ranking.top_n;
            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].label(RichText::new(format!("Top {n} Highest Wait Times")).strong());
                wait_table(&mut cols[0], "highest_waits", &extremes.top);
                cols[1].label(RichText::new(format!("Top {n} Lowest Wait Times")).strong());
                wait_table(&mut cols[1], "lowest_waits", &extremes.bottom);
            });
        }
        Err(e) => parameter_error(ui, &e),
    }
}

fn closures(ui: &mut Ui, state: &mut AppState, table: &WaitTimeTable) {
    ui.strong("Ride Closures Throughout the Day");
    ui.label("Compare how many attractions were open or closed in each part of the day.");

    ui.horizontal(|ui: &mut Ui| {
        choice_combo(ui, "closure_park", "Park", table.parks(), &mut state.closures.park);
        choice_combo(ui, "closure_day", "Day", table.days(), &mut state.closures.day);
    });

    let selection = &state.closures;
    match closure_counts(table, &selection.park, &selection.day) {
        Ok(counts) => plot::closure_chart(ui, &counts),
        Err(e) => {
            parameter_error(ui, &e);
            return;
        }
    }

    ui.label("Closed attractions for:");
    slot_selector(ui, &mut state.closures.slot);
    let selection = &state.closures;
    match closed_attraction_names(table, &selection.park, &selection.day, selection.slot) {
        Ok(names) if names.is_empty() => {
            ui.weak("Every attraction was open.");
        }
        Ok(names) => {
            for name in names {
                ui.label(format!("• {name}"));
            }
        }
        Err(e) => parameter_error(ui, &e),
    }
}

fn distribution(ui: &mut Ui, state: &mut AppState, table: &WaitTimeTable) {
    ui.strong("Wait Time Distributions");
    ui.label("Wait times per day and time of day. Rows without a measured wait in every slot are skipped.");

    choice_combo(ui, "distribution_park", "Park", table.parks(), &mut state.distribution.park);

    match wait_time_samples(table, &state.distribution.park) {
        Ok(samples) if samples.is_empty() => {
            ui.weak("No fully measured wait times for this park.");
        }
        Ok(samples) => {
            let summaries = summarize_samples(&samples);
            plot::distribution_chart(ui, &summaries, &state.day_colors);
        }
        Err(e) => parameter_error(ui, &e),
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Dropdown over `options` writing the pick into `current`.
fn choice_combo(ui: &mut Ui, id: &str, label: &str, options: &[String], current: &mut String) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                ui.selectable_value(current, option.clone(), option.as_str());
            }
        });
}

/// Morning / Afternoon / Evening toggle.
fn slot_selector(ui: &mut Ui, slot: &mut Slot) {
    ui.horizontal(|ui: &mut Ui| {
        for s in Slot::ALL {
            ui.selectable_value(slot, s, s.label());
        }
    });
}

fn wait_table(ui: &mut Ui, id: &str, rows: &[(String, f64)]) {
    if rows.is_empty() {
        ui.weak("No open attractions.");
        return;
    }
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder())
            .column(Column::auto())
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("Attraction");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Wait Time");
                });
            })
            .body(|mut body| {
                for (attraction, wait) in rows {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(attraction.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{wait:.0} min"));
                        });
                    });
                }
            });
    });
}

fn parameter_error(ui: &mut Ui, e: &InvalidParameter) {
    log::debug!("Section skipped: {e}");
    ui.label(RichText::new(e.to_string()).color(Color32::RED));
}
