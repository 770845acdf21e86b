use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RentDeskApp {
    pub state: AppState,
}

impl RentDeskApp {
    /// Takes ownership of the state and performs the initial list load.
    pub fn new(mut state: AppState) -> Self {
        state.list.reload();
        Self { state }
    }
}

impl eframe::App for RentDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: list sheet, then the rental view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    tables::list_section(ui, &mut self.state.list);
                    ui.separator();

                    let section = &self.state.properties;
                    ui.heading("Rental management");

                    ui.add_space(6.0);
                    ui.strong("Filtered properties");
                    tables::property_table(ui, section);

                    ui.add_space(12.0);
                    ui.strong("Revenue");
                    tables::metrics(ui, section);

                    ui.add_space(12.0);
                    ui.strong("Rent by property");
                    plot::rent_chart(ui, section);
                });
        });
    }
}
