//! Main egui application — renders the chat panel and forwards user
//! actions to the session controller.

use std::rc::Rc;

use egui::{self, CentralPanel, RichText, TopBottomPanel};

use chat_core::event_bus::EventBus;
use chat_core::ports::ChatBackend;
use chat_core::session::SessionController;
use chat_platform::llm::HttpChatBackend;
use chat_types::config::ChatConfig;
use chat_ui::panels::chat;
use chat_ui::state::{ChatAction, UiState};
use chat_ui::theme;

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    controller: SessionController,
    event_bus: EventBus,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: ChatConfig,
    ) -> chat_types::Result<Self> {
        let event_bus = EventBus::new();
        let backend: Rc<dyn ChatBackend> = Rc::new(HttpChatBackend::new(config.backend.clone()));
        let controller = SessionController::new(config, backend, event_bus.clone())?;

        let mut ui_state = UiState::new();
        ui_state.sync(controller.view());

        Ok(Self {
            ui_state,
            controller,
            event_bus,
            first_frame: true,
        })
    }

    /// Health-check the backend once at startup (async)
    fn probe_backend(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            controller.probe_backend().await;
            ctx.request_repaint();
        });
    }

    /// Submit the pending input (async). The controller ignores the call
    /// if a request is already in flight.
    fn dispatch_submit(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            controller.submit().await;
            ctx.request_repaint();
        });
    }

    fn apply_actions(&mut self, actions: Vec<ChatAction>, ctx: &egui::Context) {
        for action in actions {
            match action {
                ChatAction::InputChanged(text) => self.controller.update_pending_input(text),
                ChatAction::SelectModel(model) => {
                    if let Err(e) = self.controller.select_model(&model) {
                        log::warn!("Model selection rejected: {}", e);
                    }
                }
                ChatAction::DismissError => self.controller.dismiss_error(),
                ChatAction::Submit => self.dispatch_submit(ctx),
            }
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.probe_backend(ctx);
            self.first_frame = false;
        }

        // Drain events from the session controller
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }
        self.ui_state.sync(self.controller.view());

        // Keep the spinner moving
        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(chat::TITLE)
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!(
                        "Server: {} | Model: {}",
                        self.controller.config().backend.base_url,
                        self.controller
                            .config()
                            .model_label(&self.ui_state.selected_model)
                    ))
                    .color(theme::TEXT_SECONDARY)
                    .small(),
                );
            });
        });

        // ── Main content ─────────────────────────────────────
        let actions = CentralPanel::default()
            .show(ctx, |ui| chat::chat_panel(ui, &mut self.ui_state))
            .inner;
        self.apply_actions(actions, ctx);
    }
}
