// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the seller registration form.
//! Handles layout, form controls, banners, and wiring to worker threads.

pub mod components;

use std::time::Duration;

use eframe::egui;
use tracing::debug;

use crate::logic::hints::{self, ADDRESS_MAX_CHARS};
use crate::models::field::{FieldId, FieldKind, FormField, Validity};
use crate::mvu::{self, Command, Msg, Phase, RegistrationModel, Screen};
use crate::ui::components::{categories, upload};

const SUCCESS_GREEN: egui::Color32 = egui::Color32::from_rgb(39, 174, 96);

/// Follow-up steps listed on the confirmation screen.
const NEXT_STEPS: [&str; 4] = [
    "We'll verify your business documents",
    "Set up your seller account",
    "Send you login credentials via email",
    "Provide access to our seller dashboard",
];

/// Id of the focused widget when it is a text input.
fn focused_text_input(ctx: &egui::Context) -> Option<egui::Id> {
    ctx.memory(|m| m.focused())
        .filter(|id| egui::TextEdit::load_state(ctx, *id).is_some())
}

/// Stateful egui application driving a [`RegistrationModel`].
pub struct SellerRegistrationApp {
    model: RegistrationModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_tx: crossbeam_channel::Sender<Msg>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl SellerRegistrationApp {
    /// Spawn the worker pool and wrap `model`.
    pub fn new(model: RegistrationModel) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().clamp(2, 4))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }
        debug!(threads, "worker pool started");

        Self {
            model,
            inbox: Vec::new(),
            cmd_tx,
            msg_tx,
            msg_rx,
        }
    }

    /// Route a command to the pool, or to its own thread when it is a timer.
    fn dispatch(&mut self, cmd: Command) {
        if cmd.is_timer() {
            let msg_tx = self.msg_tx.clone();
            std::thread::spawn(move || {
                let _ = msg_tx.send(mvu::run_command(cmd));
            });
            self.model.pending_commands += 1;
        } else if self.cmd_tx.send(cmd).is_ok() {
            self.model.pending_commands += 1;
        }
    }
}

impl Default for SellerRegistrationApp {
    fn default() -> Self {
        Self::new(RegistrationModel::default())
    }
}

impl eframe::App for SellerRegistrationApp {
    /// Drain worker results, apply queued messages, then render one frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        self.handle_shortcuts(ctx);
        if self.model.screen == Screen::Form {
            let drops = upload::collect_drops(ctx, &self.model.upload);
            self.inbox.extend(drops.into_iter().map(Msg::Upload));
        }

        // Process pending messages in arrival order.
        let msgs = std::mem::take(&mut self.inbox);
        for msg in msgs {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                self.dispatch(cmd);
            }
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(format!("{} TECHORA Seller Registration", egui_phosphor::regular::STOREFRONT));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            self.render_banners(ui);

            egui::ScrollArea::vertical().show(ui, |ui| match self.model.screen {
                Screen::Form => self.render_form(ui),
                Screen::Confirmation => self.render_confirmation(ui),
            });
        });

        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl SellerRegistrationApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    /// Ctrl/Cmd+Enter submits; Escape drops focus from the active input.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (submit, escape) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if submit && self.model.submit_enabled() {
            self.inbox.push(Msg::SubmitRequested);
        }
        if escape && let Some(id) = focused_text_input(ctx) {
            ctx.memory_mut(|m| m.surrender_focus(id));
        }
    }

    fn render_banners(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.model.error_banner.clone() {
            let color = ui.visuals().error_fg_color;
            egui::Frame::new()
                .fill(color.gamma_multiply(0.12))
                .stroke(egui::Stroke::new(1.0, color))
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(egui_phosphor::regular::WARNING).color(color));
                        ui.label(egui::RichText::new(banner.message).color(color));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                            if ui
                                .small_button(egui_phosphor::regular::X)
                                .on_hover_text("Dismiss")
                                .clicked()
                            {
                                self.inbox.push(Msg::DismissError);
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }

        if let Some(message) = &self.model.success_banner {
            egui::Frame::new()
                .fill(SUCCESS_GREEN.gamma_multiply(0.12))
                .stroke(egui::Stroke::new(1.0, SUCCESS_GREEN))
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            egui::RichText::new(egui_phosphor::regular::CHECK_CIRCLE)
                                .color(SUCCESS_GREEN),
                        );
                        ui.label(egui::RichText::new(message).color(SUCCESS_GREEN));
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        self.render_progress(ui);
        ui.add_space(12.0);

        let fields: Vec<FormField> = self
            .model
            .fields
            .fields()
            .iter()
            .filter(|f| f.kind.is_input())
            .cloned()
            .collect();

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            for field in &fields {
                self.render_input(ui, field);
                ui.add_space(10.0);
            }
        });
        ui.add_space(12.0);

        ui.label(egui::RichText::new("Product categories").strong());
        let cat_msgs = categories::view(ui, &self.model.categories);
        self.inbox.extend(cat_msgs.into_iter().map(Msg::Categories));
        ui.add_space(12.0);

        ui.label(egui::RichText::new("Business permit or valid ID").strong());
        let permit_error = self
            .model
            .fields
            .get(FieldId::BusinessPermit)
            .and_then(|f| f.error.clone());
        let up_msgs = upload::view(ui, &self.model.upload, permit_error.as_deref());
        self.inbox.extend(up_msgs.into_iter().map(Msg::Upload));
        ui.add_space(12.0);

        self.render_terms(ui);
        ui.add_space(12.0);

        self.render_submit_button(ui);
        ui.add_space(8.0);
    }

    /// Completion bar plus the matching hint line.
    fn render_progress(&self, ui: &mut egui::Ui) {
        let progress = self.model.progress();
        let mut bar = egui::ProgressBar::new(progress.fraction())
            .text(format!("{}%", progress.percent()))
            .desired_height(14.0);
        if progress.is_complete() {
            bar = bar.fill(SUCCESS_GREEN);
        }
        ui.add(bar);

        let color = if progress.is_complete() {
            SUCCESS_GREEN
        } else {
            egui::Color32::from_gray(110)
        };
        ui.label(egui::RichText::new(progress.message()).small().color(color));
    }

    /// Render one text-like field with its label, hint, and inline error.
    fn render_input(&mut self, ui: &mut egui::Ui, field: &FormField) {
        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };
        ui.label(label);

        let mut value = field.value.clone();
        let invalid = field.validity == Validity::Invalid;
        let response = match &field.kind {
            FieldKind::Select(options) => {
                let selected = options
                    .iter()
                    .find(|o| o.value == value)
                    .map(|o| o.label.clone())
                    .unwrap_or_else(|| "Select business type".to_string());
                let inner = egui::ComboBox::from_id_salt(field.id.as_str())
                    .selected_text(selected)
                    .width(ui.available_width().min(320.0))
                    .show_ui(ui, |ui| {
                        for option in options {
                            ui.selectable_value(&mut value, option.value.clone(), &option.label);
                        }
                    });
                // A choice both edits and commits the field.
                if value != field.value {
                    self.inbox.push(Msg::FieldInput {
                        id: field.id,
                        value: value.clone(),
                    });
                    self.inbox.push(Msg::FieldBlurred(field.id));
                }
                inner.response
            }
            kind => {
                let mut edit = if *kind == FieldKind::TextArea {
                    egui::TextEdit::multiline(&mut value)
                        .desired_rows(3)
                        .char_limit(ADDRESS_MAX_CHARS)
                } else {
                    egui::TextEdit::singleline(&mut value)
                };
                edit = edit
                    .desired_width(f32::INFINITY)
                    .hint_text(self.hint_for(field));
                let response = ui.add(edit);
                if response.changed() {
                    self.inbox.push(Msg::FieldInput {
                        id: field.id,
                        value: value.clone(),
                    });
                }
                if response.lost_focus() {
                    self.inbox.push(Msg::FieldBlurred(field.id));
                }
                response
            }
        };

        if invalid {
            ui.painter().rect_stroke(
                response.rect.expand(1.0),
                2.0,
                egui::Stroke::new(1.0, ui.visuals().error_fg_color),
                egui::StrokeKind::Outside,
            );
        }

        if field.kind == FieldKind::TextArea {
            let (count, warn) = hints::address_counter(&value);
            let color = if warn {
                ui.visuals().warn_fg_color
            } else {
                egui::Color32::from_gray(110)
            };
            ui.label(
                egui::RichText::new(format!("{count}/{ADDRESS_MAX_CHARS} characters"))
                    .small()
                    .color(color),
            );
        }

        if let Some(error) = &field.error {
            ui.label(
                egui::RichText::new(error)
                    .small()
                    .color(ui.visuals().error_fg_color),
            );
        }
    }

    fn hint_for(&self, field: &FormField) -> String {
        match field.id {
            FieldId::StoreName => {
                hints::store_name_hint(&self.model.fields.value(FieldId::SellerName))
                    .unwrap_or_else(|| "e.g., Gadget Hub".to_string())
            }
            FieldId::SellerName => "Full name".to_string(),
            FieldId::EmailAddress => "you@example.com".to_string(),
            FieldId::PaypalEmail => "paypal@example.com".to_string(),
            FieldId::ContactNumber => "e.g., 9171234567".to_string(),
            FieldId::BusinessAddress => "Street, city, province".to_string(),
            _ => String::new(),
        }
    }

    fn render_terms(&mut self, ui: &mut egui::Ui) {
        let Some(field) = self.model.fields.get(FieldId::AgreeTerms) else {
            return;
        };
        let mut checked = field.is_filled();
        let error = field.error.clone();
        if ui.checkbox(&mut checked, field.label.as_str()).changed() {
            self.inbox.push(Msg::TermsToggled(checked));
        }
        if let Some(error) = error {
            ui.label(
                egui::RichText::new(error)
                    .small()
                    .color(ui.visuals().error_fg_color),
            );
        }
    }

    fn render_submit_button(&mut self, ui: &mut egui::Ui) {
        let submitting = self.model.phase == Phase::Submitting;
        let text = if submitting {
            format!("{} Submitting...", egui_phosphor::regular::HOURGLASS)
        } else {
            format!("{} Submit Registration", egui_phosphor::regular::PAPER_PLANE_TILT)
        };
        ui.horizontal(|ui| {
            let button = egui::Button::new(text).min_size(egui::vec2(200.0, 32.0));
            if ui
                .add_enabled(self.model.submit_enabled(), button)
                .on_hover_text("Ctrl/Cmd+Enter")
                .on_disabled_hover_text("A submission is already in progress")
                .clicked()
            {
                self.inbox.push(Msg::SubmitRequested);
            }
            if submitting {
                ui.add(egui::Spinner::new().size(16.0));
            }
        });
    }

    fn render_confirmation(&mut self, ui: &mut egui::Ui) {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(egui_phosphor::regular::SEAL_CHECK)
                    .size(48.0)
                    .color(SUCCESS_GREEN),
            );
            ui.label(
                egui::RichText::new("Registration Submitted Successfully!")
                    .heading()
                    .color(SUCCESS_GREEN),
            );
            ui.add_space(6.0);
            ui.label(
                "Thank you for joining TECHORA marketplace. We'll review your application \
                 and send you an email confirmation within 2-3 business days.",
            );
            ui.add_space(12.0);
        });

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("What's next?").strong());
            for step in NEXT_STEPS {
                ui.label(format!("• {step}"));
            }
        });

        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            if ui.button("Submit Another Application").clicked() {
                self.inbox.push(Msg::StartOver);
            }
        });
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} working…)", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0))
                        .on_hover_text(format!(
                            "{} task(s) running in background",
                            self.model.pending_commands
                        ));
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_press(key: egui::Key, modifiers: egui::Modifiers) -> egui::RawInput {
        egui::RawInput {
            modifiers,
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        }
    }

    fn press_submit_shortcut(app: &mut SellerRegistrationApp) {
        let ctx = egui::Context::default();
        let _ = ctx.run(
            key_press(egui::Key::Enter, egui::Modifiers::COMMAND),
            |ctx| app.handle_shortcuts(ctx),
        );
    }

    #[test]
    fn command_enter_submits_when_idle() {
        let mut app = SellerRegistrationApp::default();

        press_submit_shortcut(&mut app);

        assert_eq!(app.inbox, vec![Msg::SubmitRequested]);
    }

    #[test]
    fn command_enter_is_ignored_while_submitting() {
        let mut app = SellerRegistrationApp::default();
        app.model.phase = Phase::Submitting;

        press_submit_shortcut(&mut app);

        assert!(app.inbox.is_empty());
    }

    #[test]
    fn plain_enter_does_not_submit() {
        let mut app = SellerRegistrationApp::default();
        let ctx = egui::Context::default();

        let _ = ctx.run(key_press(egui::Key::Enter, egui::Modifiers::NONE), |ctx| {
            app.handle_shortcuts(ctx)
        });

        assert!(app.inbox.is_empty());
    }

    /// Show and focus either a text input or a button under `id`.
    fn focus_widget(ctx: &egui::Context, id: egui::Id, text_input: bool) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = if text_input {
                    let mut text = String::from("Ada");
                    ui.add(egui::TextEdit::singleline(&mut text).id(id))
                } else {
                    ui.push_id(id, |ui| ui.button("Submit")).inner
                };
                response.request_focus();
            });
        });
    }

    #[test]
    fn only_text_inputs_count_as_focused_text() {
        let id = egui::Id::new("focus_target");

        let ctx = egui::Context::default();
        focus_widget(&ctx, id, true);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            assert_eq!(focused_text_input(ctx), Some(id));
        });

        let ctx = egui::Context::default();
        focus_widget(&ctx, id, false);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            assert!(ctx.memory(|m| m.focused()).is_some());
            assert_eq!(focused_text_input(ctx), None);
        });
    }

    #[test]
    fn escape_drops_focus_from_text_input() {
        let mut app = SellerRegistrationApp::default();
        let ctx = egui::Context::default();
        focus_widget(&ctx, egui::Id::new("seller_name"), true);

        let _ = ctx.run(key_press(egui::Key::Escape, egui::Modifiers::NONE), |ctx| {
            app.handle_shortcuts(ctx);
            assert!(ctx.memory(|m| m.focused()).is_none());
        });
        assert!(app.inbox.is_empty());
    }

    fn rendered_text(output: &egui::FullOutput) -> String {
        output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                egui::Shape::Text(text) => Some(text.galley.text().to_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn confirmation_lists_next_steps() {
        let mut app = SellerRegistrationApp::default();
        let ctx = egui::Context::default();

        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| app.render_confirmation(ui));
        });
        let text = rendered_text(&output);

        assert!(text.contains("Registration Submitted Successfully!"));
        assert!(text.contains("What's next?"));
        for step in NEXT_STEPS {
            assert!(text.contains(step), "missing step: {step}");
        }
        assert!(text.contains("Submit Another Application"));
    }
}
