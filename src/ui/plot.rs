use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::data::filter::chart_points;
use crate::state::PropertySection;

// ---------------------------------------------------------------------------
// Rent per property (bar chart)
// ---------------------------------------------------------------------------

/// Bar chart of monthly rent for the visible properties, in table order.
pub fn rent_chart(ui: &mut Ui, section: &PropertySection) {
    let points = chart_points(&section.records, &section.visible_indices);
    if points.is_empty() {
        ui.label("No properties match the current filters.");
        return;
    }

    let names: Vec<String> = points.iter().map(|(name, _)| name.to_string()).collect();
    let bars: Vec<Bar> = points
        .iter()
        .enumerate()
        .map(|(i, (name, rent))| {
            Bar::new(i as f64, f64::from(*rent))
                .name(*name)
                .width(0.6)
                .fill(section.colors.color_for(name))
        })
        .collect();

    Plot::new("rent_chart")
        .legend(Legend::default())
        .height(280.0)
        .x_axis_label("Property")
        .y_axis_label("Monthly rent (¥)")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Monthly rent"));
        });
}
