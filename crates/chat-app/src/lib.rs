//! Chat App — WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It loads the configuration, builds the HTTP backend and the session
//! controller, and hands them to the egui UI.

pub mod config;

#[cfg(target_arch = "wasm32")]
mod app;


#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
const CANVAS_ID: &str = "chat_canvas";

/// WASM entry point — called from index.html
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Chat client starting...");

    let web_options = eframe::WebOptions::default();

    let document = web_sys::window()
        .expect("No window")
        .document()
        .expect("No document");
    let config = config::load_config(&document);
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .expect("No canvas element with id 'chat_canvas'")
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .expect("Element is not a canvas");

    wasm_bindgen_futures::spawn_local(async move {
        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::ChatApp::new(cc, config)?))),
            )
            .await
            .expect("Failed to start eframe");
    });
}
