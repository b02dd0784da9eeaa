use std::time::{Duration, Instant};

use client_core::{
    render::NO_PARTICIPANTS_NOTICE, ActivitiesRegion, ActivityCard, NoticeKind, PageState,
    ParticipantList,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ParticipantRef;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{events::UiEvent, orchestration::dispatch_backend_command, reducer::reduce},
};

const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

pub struct ActivitiesApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    page: PageState,
    status: String,
}

impl ActivitiesApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            page: PageState::default(),
            status: String::new(),
        };
        app.dispatch(BackendCommand::LoadRoster);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reduce(&mut self.page, &mut self.status, event, now);
        }
        self.page.tick(now);
    }

    fn show_activities(&mut self, ui: &mut egui::Ui) {
        ui.heading("Available Activities");
        ui.add_space(6.0);

        let mut remove: Option<ParticipantRef> = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match &self.page.activities {
                ActivitiesRegion::Loading => {
                    ui.label(egui::RichText::new("Loading activities...").weak());
                }
                ActivitiesRegion::Failed(notice) => {
                    ui.label(notice.as_str());
                }
                ActivitiesRegion::Cards(cards) => {
                    for card in cards {
                        if let Some(target) = show_card(ui, card) {
                            remove = Some(target);
                        }
                        ui.add_space(8.0);
                    }
                }
            });

        if let Some(ParticipantRef { activity, email }) = remove {
            self.dispatch(BackendCommand::Unregister { activity, email });
        }
    }

    fn show_signup_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Sign Up for an Activity");
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Student Email").strong());
        ui.add(
            egui::TextEdit::singleline(&mut self.page.form.email)
                .hint_text("your-email@school.edu")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);

        ui.label(egui::RichText::new("Activity").strong());
        let selected_text = if self.page.form.activity.is_empty() {
            SELECT_PLACEHOLDER.to_string()
        } else {
            self.page.form.activity.clone()
        };
        let options = &self.page.options;
        let form = &mut self.page.form;
        egui::ComboBox::from_id_salt("activity_select")
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for option in options {
                    ui.selectable_value(
                        &mut form.activity,
                        option.value.clone(),
                        option.label.as_str(),
                    );
                }
            });
        ui.add_space(8.0);

        let submission = self.page.form.submission();
        let clicked = ui
            .add_enabled(submission.is_some(), egui::Button::new("Sign Up"))
            .clicked();
        if let (true, Some(submission)) = (clicked, submission) {
            self.dispatch(BackendCommand::Enroll {
                activity: submission.activity,
                email: submission.email,
            });
        }

        ui.add_space(10.0);
        self.show_message_region(ui);

        if !self.status.is_empty() {
            ui.add_space(10.0);
            ui.small(egui::RichText::new(&self.status).weak());
        }
    }

    fn show_message_region(&self, ui: &mut egui::Ui) {
        let Some(notice) = self.page.message.visible() else {
            return;
        };
        let (fill, stroke) = match notice.kind {
            NoticeKind::Success => (
                egui::Color32::from_rgb(39, 94, 60),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(87, 163, 113)),
            ),
            NoticeKind::Error => (
                egui::Color32::from_rgb(111, 53, 53),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
            ),
        };

        egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(&notice.text).color(egui::Color32::WHITE));
            });
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(text) = self.page.alert.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Unable to unregister")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(text);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.page.dismiss_alert();
        }
    }
}

/// Draws one card; returns the participant whose removal control was clicked.
fn show_card(ui: &mut egui::Ui, card: &ActivityCard) -> Option<ParticipantRef> {
    let mut clicked = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(&card.name).strong().size(16.0));
        ui.label(card.description.as_str());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Schedule:").strong());
            ui.label(card.schedule.as_str());
        });
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Availability:").strong());
            ui.label(card.availability_line());
        });
        ui.add_space(4.0);
        ui.label(egui::RichText::new(card.participants_heading()).strong());

        match &card.participants {
            ParticipantList::Empty => {
                ui.label(egui::RichText::new(NO_PARTICIPANTS_NOTICE).italics().weak());
            }
            ParticipantList::Rows(rows) => {
                for row in rows {
                    ui.horizontal(|ui| {
                        ui.label(row.email.as_str());
                        if ui
                            .small_button("🗑")
                            .on_hover_text("Unregister participant")
                            .clicked()
                        {
                            clicked = Some(row.remove.clone());
                        }
                    });
                }
            }
        }
    });
    clicked
}

impl eframe::App for ActivitiesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(Instant::now());

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Extracurricular Activities");
            ui.add_space(6.0);
        });

        egui::SidePanel::right("signup_panel")
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| self.show_signup_form(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.show_activities(ui));

        self.show_alert(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
