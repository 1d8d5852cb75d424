//! Chat panel — model selector, error notice, conversation and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use chat_types::message::Turn;

use crate::state::{ChatAction, UiState, STATUS_BUSY};
use crate::theme::*;

pub const TITLE: &str = "ATech Chatbot";

/// Render the chat panel. Returns the user's actions for this frame, in
/// the order they happened.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Vec<ChatAction> {
    let mut actions = Vec::new();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                header(ui, state);
                ui.separator();

                if let Some(notice) = &state.last_error {
                    let mut dismissed = false;
                    egui::Frame::default()
                        .fill(ERROR_BG)
                        .corner_radius(PANEL_ROUNDING)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(RichText::new(&notice.message).color(ERROR).strong());
                                    ui.label(
                                        RichText::new(&notice.detail)
                                            .color(TEXT_SECONDARY)
                                            .small(),
                                    );
                                });
                                ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                                    dismissed = ui.small_button("✕").clicked();
                                });
                            });
                        });
                    if dismissed {
                        actions.push(ChatAction::DismissError);
                    }
                    ui.add_space(6.0);
                }

                model_selector(ui, state, &mut actions);
                ui.add_space(6.0);

                // Messages area
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for turn in &state.history {
                            render_turn(ui, turn);
                            ui.add_space(4.0);
                        }

                        if state.is_busy() {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new(STATUS_BUSY).color(TEXT_SECONDARY));
                            });
                        }
                    });

                ui.add_space(8.0);
                input_row(ui, state, &mut actions);
            });
        });

    actions
}

fn header(ui: &mut egui::Ui, state: &UiState) {
    ui.horizontal(|ui| {
        ui.heading(RichText::new(TITLE).color(TEXT_PRIMARY).strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let status_color = if state.is_busy() {
                WARNING
            } else if state.last_error.is_some() {
                ERROR
            } else {
                SUCCESS
            };
            ui.label(RichText::new(&state.status_text).color(status_color).small());
        });
    });
}

fn model_selector(ui: &mut egui::Ui, state: &UiState, actions: &mut Vec<ChatAction>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Chọn Model").color(TEXT_SECONDARY).small());
        // Locked while a request is in flight
        ui.add_enabled_ui(!state.is_busy(), |ui| {
            egui::ComboBox::from_id_salt("model_select")
                .selected_text(state.selected_label())
                .show_ui(ui, |ui| {
                    for model in &state.models {
                        let label = match state.is_installed(&model.id) {
                            Some(false) => format!("{} (chưa cài)", model.label),
                            _ => model.label.clone(),
                        };
                        let selected = model.id == state.selected_model;
                        if ui.selectable_label(selected, label).clicked() && !selected {
                            actions.push(ChatAction::SelectModel(model.id.clone()));
                        }
                    }
                });
        });
    });
}

fn input_row(ui: &mut egui::Ui, state: &mut UiState, actions: &mut Vec<ChatAction>) {
    ui.horizontal(|ui| {
        let busy = state.is_busy();
        let input = egui::TextEdit::singleline(&mut state.draft)
            .hint_text("Nhập tin nhắn của bạn...")
            .desired_width(ui.available_width() - 70.0)
            .font(egui::FontId::proportional(14.0));

        let response = ui.add_enabled(!busy, input);
        if response.changed() {
            actions.push(ChatAction::InputChanged(state.draft.clone()));
        }

        let send_enabled = state.can_send();
        let send_btn = ui.add_enabled(
            send_enabled,
            egui::Button::new(RichText::new("Gửi").color(TEXT_PRIMARY))
                .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(60.0, 0.0)),
        );

        let enter_pressed =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if send_enabled && (enter_pressed || send_btn.clicked()) {
            actions.push(ChatAction::Submit);
            response.request_focus();
        }
    });
}

fn render_turn(ui: &mut egui::Ui, turn: &Turn) {
    let (bg, label_color, align) = if turn.is_user() {
        (USER_BUBBLE, ACCENT, Align::Max)
    } else {
        (ASSISTANT_BUBBLE, SUCCESS, Align::Min)
    };

    ui.with_layout(Layout::top_down(align), |ui| {
        let max_width = ui.available_width() * BUBBLE_MAX_WIDTH;
        egui::Frame::default()
            .fill(bg)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(
                    RichText::new(turn.author.label())
                        .color(label_color)
                        .strong()
                        .small(),
                );
                ui.label(RichText::new(&turn.text).color(TEXT_PRIMARY));
            });
    });
}
