use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiErrorCategory, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{AppModel, AppViewState},
};

const COLUMN_HEADERS: [&str; 4] = ["ID", "Name", "Department", "Email"];

pub struct DirectoryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    model: AppModel,
    api_base_url: String,
}

impl DirectoryApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            model: AppModel::default(),
            api_base_url,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.model.apply(event);
        }
    }

    fn try_login(&mut self) {
        if let Some(cmd) = self.model.login_command() {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.model.status);
        }
    }

    fn logout(&mut self) {
        let cmd = self.model.logout_command();
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.model.status);
    }

    fn show_status_banner(&self, ui: &mut egui::Ui) {
        let Some(banner) = &self.model.status_banner else {
            return;
        };
        let color = match banner.category() {
            UiErrorCategory::Auth | UiErrorCategory::Validation => ui.visuals().error_fg_color,
            UiErrorCategory::Transport | UiErrorCategory::Startup => ui.visuals().warn_fg_color,
        };
        ui.colored_label(color, banner.message());
    }

    fn show_login_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(320.0, 420.0);
            ui.add_space((avail.y * 0.15).clamp(18.0, 90.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                egui::Frame::group(ui.style())
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.heading("System login");
                        ui.weak(format!("Directory: {}", self.api_base_url));
                        ui.add_space(8.0);
                        self.show_status_banner(ui);

                        let busy = self.model.is_busy();
                        ui.label("Username");
                        let user_resp = ui.add_enabled(
                            !busy,
                            egui::TextEdit::singleline(&mut self.model.username)
                                .hint_text("admin")
                                .desired_width(f32::INFINITY),
                        );
                        ui.label("Password");
                        let pass_resp = ui.add_enabled(
                            !busy,
                            egui::TextEdit::singleline(&mut self.model.password)
                                .password(true)
                                .desired_width(f32::INFINITY),
                        );

                        let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
                        let fields_focused = user_resp.lost_focus() || pass_resp.lost_focus();

                        ui.add_space(10.0);
                        let label = if busy { "Signing in..." } else { "Sign in" };
                        let clicked = ui
                            .add_enabled(
                                self.model.can_submit(),
                                egui::Button::new(egui::RichText::new(label).strong())
                                    .min_size(egui::vec2(ui.available_width(), 32.0)),
                            )
                            .clicked();

                        if clicked || (fields_focused && enter_pressed && !busy) {
                            self.try_login();
                        }

                        if !self.model.status.is_empty() && self.model.status_banner.is_none() {
                            ui.add_space(6.0);
                            ui.weak(&self.model.status);
                        }
                    });
            });
        });
    }

    fn show_directory_screen(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("directory_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Employees");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        self.logout();
                    }
                    ui.weak(&self.model.status);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("employee_table")
                    .num_columns(COLUMN_HEADERS.len())
                    .striped(true)
                    .spacing(egui::vec2(24.0, 6.0))
                    .show(ui, |ui| {
                        for header in COLUMN_HEADERS {
                            ui.strong(header);
                        }
                        ui.end_row();

                        for employee in &self.model.records {
                            ui.label(employee.id.0.to_string());
                            ui.label(&employee.name);
                            ui.label(&employee.department);
                            ui.label(&employee.email);
                            ui.end_row();
                        }
                    });
                if self.model.records.is_empty() {
                    ui.weak("No employees returned.");
                }
            });
        });
    }
}

impl eframe::App for DirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.model.view_state {
            AppViewState::Login => self.show_login_screen(ctx),
            AppViewState::Directory => self.show_directory_screen(ctx),
        }

        if self.model.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
