use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let section = &mut state.properties;

    let mut vacancy_only = section.filter.vacancy_only;
    if ui.checkbox(&mut vacancy_only, "Vacant only").changed() {
        section.set_vacancy_only(vacancy_only);
    }

    ui.add_space(8.0);
    ui.strong("Rent range");

    let Some(bounds) = section.bounds else {
        ui.add_enabled(false, Slider::new(&mut 0u32, 0..=0).text("Min rent"));
        ui.add_enabled(false, Slider::new(&mut 0u32, 0..=0).text("Max rent"));
        ui.label("No properties loaded.");
        return;
    };

    let mut min = section.filter.rent_range.min;
    if ui
        .add(Slider::new(&mut min, bounds.min..=bounds.max).text("Min rent"))
        .changed()
    {
        section.set_min_rent(min);
    }

    let mut max = section.filter.rent_range.max;
    if ui
        .add(Slider::new(&mut max, bounds.min..=bounds.max).text("Max rent"))
        .changed()
    {
        section.set_max_rent(max);
    }

    ui.add_space(8.0);
    ui.label(format!(
        "{} of {} properties shown",
        section.visible_indices.len(),
        section.records.len()
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export properties…").clicked() {
                export_properties_dialog(state);
                ui.close_menu();
            }
            let has_list = state.list.table().is_some();
            if ui
                .add_enabled(has_list, egui::Button::new("Export list sheet…"))
                .clicked()
            {
                export_list_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Reload list sheet").clicked() {
                state.list.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        let list_rows = state.list.table().map(|t| t.len());
        ui.label(match list_rows {
            Some(n) => format!("list: {n} rows"),
            None => "list: not loaded".to_string(),
        });

        ui.separator();

        ui.label(format!(
            "{} properties, {} visible",
            state.properties.records.len(),
            state.properties.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialogs
// ---------------------------------------------------------------------------

fn export_properties_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered properties")
        .set_file_name("properties.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::save_properties(&path, state.properties.visible()) {
            Ok(()) => {
                log::info!(
                    "Exported {} properties to {}",
                    state.properties.visible_indices.len(),
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export properties: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_list_dialog(state: &mut AppState) {
    let Some(table) = state.list.table() else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export list sheet")
        .set_file_name(format!("{}.csv", state.list.sheet_name))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let result = export::save_sheet(&path, table);
        match result {
            Ok(()) => {
                log::info!("Exported {} list rows to {}", table.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export list sheet: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
