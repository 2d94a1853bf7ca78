use egui::Context;

/// State behind the overlay demo: the classic immediate-mode "hello" panel
/// with a checkbox pair, a slider, a color picker and a click counter.
pub struct DemoPanel {
    show_inspection_window: bool,
    show_another_window: bool,
    slider_value: f32,
    counter: u32,
    pub clear_color: [f32; 3],
}

impl DemoPanel {
    pub fn new(clear_color: [f32; 3]) -> Self {
        Self {
            show_inspection_window: false,
            show_another_window: false,
            slider_value: 0.0,
            counter: 0,
            clear_color,
        }
    }

    pub fn show(&mut self, ctx: &Context) {
        egui::Window::new("Hello, world!").show(ctx, |ui| {
            ui.label("This is some useful text.");
            ui.checkbox(&mut self.show_inspection_window, "Inspection Window");
            ui.checkbox(&mut self.show_another_window, "Another Window");

            ui.add(egui::Slider::new(&mut self.slider_value, 0.0..=1.0).text("float"));
            ui.horizontal(|ui| {
                ui.color_edit_button_rgb(&mut self.clear_color);
                ui.label("clear color");
            });

            ui.horizontal(|ui| {
                if ui.button("Button").clicked() {
                    self.counter += 1;
                }
                ui.label(format!("counter = {}", self.counter));
            });

            let dt = ctx.input(|input| input.stable_dt).max(f32::EPSILON);
            ui.label(format!(
                "Application average {:.3} ms/frame ({:.1} FPS)",
                dt * 1000.0,
                1.0 / dt
            ));
        });

        if self.show_inspection_window {
            egui::Window::new("Inspection")
                .open(&mut self.show_inspection_window)
                .show(ctx, |ui| {
                    ctx.inspection_ui(ui);
                });
        }

        if self.show_another_window {
            let mut open = true;
            egui::Window::new("Another Window")
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label("Hello from another window!");
                    if ui.button("Close Me").clicked() {
                        self.show_another_window = false;
                    }
                });
            if !open {
                self.show_another_window = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_runs_headless() {
        // egui needs no GPU to lay out a frame.
        let ctx = Context::default();
        let mut panel = DemoPanel::new([0.2, 0.3, 0.3]);

        let _ = ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx));

        assert_eq!(panel.counter, 0);
        assert_eq!(panel.clear_color, [0.2, 0.3, 0.3]);
    }
}
