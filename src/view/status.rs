// Status bar and the line input shown in line-entry modes
use crate::app::Browser;
use crate::model::Mode;
use eframe::egui;

impl Browser {
    pub(crate) fn render_status_bar(&self, ui: &mut egui::Ui, mode: Mode, pending: &str) {
        ui.horizontal(|ui| {
            let mode_label = if self.multi_selection && mode == Mode::Normal {
                "VISUAL"
            } else {
                mode.label()
            };
            ui.label(
                egui::RichText::new(format!(" {} ", mode_label))
                    .monospace()
                    .strong()
                    .background_color(ui.visuals().selection.bg_fill),
            );
            if !pending.is_empty() {
                ui.label(egui::RichText::new(pending).monospace());
            }
            if let Some(status) = &self.status {
                ui.label(egui::RichText::new(&status.text).color(self.theme.error_text()));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let position = self.selected_index.map_or(0, |row| row + 1);
                ui.label(format!("{}/{}", position, self.entries.len()));
            });
        });
    }

    /// Returns `true` when the user edited the text this frame
    pub(crate) fn render_line_input(&mut self, ui: &mut egui::Ui, prompt: &str) -> bool {
        let mut edited = false;
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(prompt).monospace().strong());
            let output = egui::TextEdit::singleline(&mut self.line_input)
                .id_salt("line_input")
                .font(egui::TextStyle::Monospace)
                .lock_focus(true)
                .desired_width(f32::INFINITY)
                .show(ui);
            edited = output.response.changed();

            if self.focus_line {
                output.response.request_focus();
                self.focus_line = false;
            }
            if self.line_cursor_to_end {
                let end = egui::text::CCursor::new(self.line_input.chars().count());
                let mut state = output.state;
                state
                    .cursor
                    .set_char_range(Some(egui::text::CCursorRange::one(end)));
                state.store(ui.ctx(), output.response.id);
                self.line_cursor_to_end = false;
            }
        });
        edited
    }
}
