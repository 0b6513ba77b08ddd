// Directory panes: parent context, current listing, entry details
use crate::app::Browser;
use crate::style;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::cell::RefCell;
use std::path::PathBuf;

const DIR_COLOR: egui::Color32 = egui::Color32::from_rgb(120, 180, 255);

impl Browser {
    pub(crate) fn render_parent_pane(&self, ui: &mut egui::Ui, next_navigation: &RefCell<Option<PathBuf>>) {
        ui.add_space(4.0);
        ui.vertical_centered(|ui| {
            ui.heading("Parent");
        });
        ui.separator();
        let dim = self.theme.dim_text();

        egui::ScrollArea::vertical()
            .id_salt("parent_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for entry in &self.parent_entries {
                    let is_active = entry.path == self.current_path;
                    let color = if is_active { DIR_COLOR } else { dim };
                    let text = egui::RichText::new(format!("{} {}", entry.icon(), entry.display_name()))
                        .color(color);
                    if ui
                        .add(egui::Label::new(text).truncate().sense(egui::Sense::click()))
                        .clicked()
                    {
                        *next_navigation.borrow_mut() = Some(entry.path.clone());
                    }
                }
            });
    }

    pub(crate) fn render_current_pane(
        &mut self,
        ui: &mut egui::Ui,
        next_selection: &RefCell<Option<usize>>,
        next_navigation: &RefCell<Option<PathBuf>>,
    ) {
        if self.entries.is_empty() {
            self.visible_rows = 0..0;
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Empty directory").color(self.theme.dim_text()));
            });
            return;
        }

        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .auto_shrink([false, false])
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(style::ICON_COL_WIDTH))
            .column(Column::remainder().clip(true))
            .column(Column::auto().at_least(70.0));

        if self.scroll_to_selection {
            if let Some(row) = self.selected_index {
                table = table.scroll_to_row(row, None);
            }
        }

        // Only rows on screen are laid out, which gives the visible range
        let mut first_drawn = usize::MAX;
        let mut last_drawn = 0;
        let this = &*self;

        table
            .header(style::HEADER_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.label("");
                });
                header.col(|ui| {
                    ui.label("Name");
                });
                header.col(|ui| {
                    ui.label("Size");
                });
            })
            .body(|body| {
                body.rows(style::ROW_HEIGHT, this.entries.len(), |mut row| {
                    let row_index = row.index();
                    let entry = &this.entries[row_index];
                    first_drawn = first_drawn.min(row_index);
                    last_drawn = last_drawn.max(row_index);

                    row.set_selected(this.is_row_selected(row_index));

                    row.col(|ui| {
                        ui.label(entry.icon());
                    });
                    row.col(|ui| {
                        let mut text = egui::RichText::new(entry.display_name());
                        if entry.is_dir {
                            text = text.color(DIR_COLOR);
                        }
                        let response = ui.add(egui::Label::new(text).truncate().sense(egui::Sense::click()));
                        if response.clicked() {
                            *next_selection.borrow_mut() = Some(row_index);
                        }
                        if response.double_clicked() {
                            *next_navigation.borrow_mut() = Some(entry.path.clone());
                        }
                    });
                    row.col(|ui| {
                        ui.label(egui::RichText::new(entry.size_label()).color(this.theme.dim_text()));
                    });
                });
            });

        self.visible_rows = if first_drawn <= last_drawn {
            first_drawn..last_drawn + 1
        } else {
            0..0
        };
        self.scroll_to_selection = false;
    }

    pub(crate) fn render_details_pane(&self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.vertical_centered(|ui| {
            ui.heading("Details");
        });
        ui.separator();

        let Some(entry) = self.selected_entry() else {
            ui.centered_and_justified(|ui| {
                ui.label("No file selected");
            });
            return;
        };

        style::truncated_label(ui, egui::RichText::new(&entry.name).strong().size(18.0));
        ui.add_space(10.0);
        egui::Grid::new("details_grid").num_columns(2).show(ui, |ui| {
            ui.label("Kind");
            ui.label(match (entry.is_dir, entry.is_symlink) {
                (true, _) => "Directory",
                (false, true) => "Symlink",
                (false, false) => "File",
            });
            ui.end_row();

            ui.label("Size");
            ui.label(entry.size_label());
            ui.end_row();

            ui.label("Modified");
            ui.label(entry.modified_label());
            ui.end_row();
        });
    }
}
