use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::SheetTable;
use crate::error::error_chain;
use crate::state::{ListSection, ListStatus, PropertySection};

use super::format::yen;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// List sheet section
// ---------------------------------------------------------------------------

/// Lookup list: success note and table, or the raw failure.
pub fn list_section(ui: &mut Ui, list: &mut ListSection) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(format!("Lookup list ({})", list.sheet_name));
        if ui.button("Reload").clicked() {
            list.reload();
        }
    });

    match &list.status {
        ListStatus::NotLoaded => {
            ui.label("Not loaded yet.");
        }
        ListStatus::Loaded(table) => {
            ui.label(
                RichText::new(format!("Loaded sheet '{}'.", list.sheet_name))
                    .color(Color32::DARK_GREEN),
            );
            sheet_table(ui, table);
        }
        ListStatus::Failed(err) => {
            ui.label(
                RichText::new(format!("Failed to load sheet '{}'.", list.sheet_name))
                    .color(Color32::RED)
                    .strong(),
            );
            let kind = if err.is_credential() {
                "Credential error"
            } else {
                "Remote access error"
            };
            egui::CollapsingHeader::new(format!("{kind} details"))
                .id_salt("list_error")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.monospace(error_chain(err));
                });
        }
    }
}

fn sheet_table(ui: &mut Ui, table: &SheetTable) {
    if table.columns.is_empty() {
        ui.label("The sheet is empty.");
        return;
    }
    if table.is_empty() {
        ui.label("The sheet has a header row but no records.");
    }

    TableBuilder::new(ui)
        .id_salt("list_table")
        .striped(true)
        .resizable(true)
        .max_scroll_height(240.0)
        .columns(Column::auto().at_least(60.0), table.columns.len())
        .header(ROW_HEIGHT, |mut header| {
            for col in &table.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(col.as_str());
                });
            }
        })
        .body(|mut body| {
            for row in 0..table.len() {
                body.row(ROW_HEIGHT, |mut tr| {
                    for col in &table.columns {
                        tr.col(|ui: &mut Ui| {
                            ui.label(table.cell(row, col).to_string());
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Property section
// ---------------------------------------------------------------------------

/// Filtered property table.
pub fn property_table(ui: &mut Ui, section: &PropertySection) {
    const HEADERS: [&str; 6] = [
        "Property",
        "Monthly rent",
        "Maintenance",
        "Tenant",
        "Lease start",
        "Vacant",
    ];

    TableBuilder::new(ui)
        .id_salt("property_table")
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .columns(Column::auto().at_least(70.0), HEADERS.len())
        .header(ROW_HEIGHT, |mut header| {
            for h in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|mut body| {
            for record in section.visible() {
                body.row(ROW_HEIGHT, |mut tr| {
                    tr.col(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(&record.name)
                                .color(section.colors.color_for(&record.name)),
                        );
                    });
                    tr.col(|ui: &mut Ui| {
                        ui.label(yen(i64::from(record.monthly_rent)));
                    });
                    tr.col(|ui: &mut Ui| {
                        ui.label(yen(i64::from(record.maintenance_cost)));
                    });
                    tr.col(|ui: &mut Ui| {
                        ui.label(record.tenant_name.as_str());
                    });
                    tr.col(|ui: &mut Ui| {
                        ui.label(record.lease_start_date.format("%Y-%m-%d").to_string());
                    });
                    tr.col(|ui: &mut Ui| {
                        ui.label(if record.is_vacant { "yes" } else { "no" });
                    });
                });
            }
        });
}

/// The three summary metrics side by side.
pub fn metrics(ui: &mut Ui, section: &PropertySection) {
    let s = &section.summary;
    let entries = [
        ("Total rent revenue", s.total_revenue),
        ("Total maintenance", s.total_maintenance),
        ("Net profit", s.net_profit),
    ];
    ui.columns(entries.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(entries) {
            col.label(RichText::new(label).weak());
            col.label(RichText::new(yen(value)).size(24.0).strong());
        }
    });
}
