#![cfg(target_arch = "wasm32")]
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod ui;

use constants::{CANVAS_ID, DATA_SRC_ATTR};
use instant::Instant;
use seismo_core::config::DEFAULT_DATA_PATH;
use seismo_core::loader::{parse_table, records_or_empty};
use seismo_core::{App, EventRecord, LoadError, ProjectionKind, UiSurface, VizParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("seismo-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let ui = Rc::new(RefCell::new(ui::DomUi::new(document.clone())));
    ui.borrow_mut().set_loading(5.0, "Fetching earthquake data");

    let url = canvas
        .get_attribute(DATA_SRC_ATTR)
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    let params = VizParams::default()
        .with_projection(ProjectionKind::Sphere)
        .with_data_path(url);
    let records = records_or_empty(fetch_table(&window, &params.data_path).await);
    ui.borrow_mut()
        .set_loading(60.0, &format!("Parsed {} events", records.len()));

    let app = {
        let mut ui = ui.borrow_mut();
        let mut app = App::new(records, params, &mut *ui);
        app.resize(width, height);
        Rc::new(RefCell::new(app))
    };
    log::info!(
        "[data] {} events, {} markers",
        app.borrow().records().len(),
        app.borrow().markers().len()
    );

    let mut gpu = frame::init_gpu(&canvas).await;
    if let Some(g) = gpu.as_mut() {
        g.set_lines(app.borrow().ground_vertices());
    }

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        app: app.clone(),
        ui: ui.clone(),
    });
    events::wire_global_keydown(app.clone(), ui.clone());
    events::wire_mode_buttons(&document, app.clone(), ui.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        ui,
        canvas,
        gpu,
        last_instant: Instant::now(),
        sprites: Vec::new(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Fetch and parse the table. Network and HTTP failures surface as
/// `LoadError::Io` so the caller handles them like a missing file.
async fn fetch_table(window: &web::Window, url: &str) -> Result<Vec<EventRecord>, LoadError> {
    let io_err = |what: String| LoadError::Io {
        path: url.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::Other, what),
    };
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| io_err(format!("fetch failed: {:?}", e)))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| io_err(format!("not a Response: {:?}", e)))?;
    if !resp.ok() {
        return Err(io_err(format!("HTTP {}", resp.status())));
    }
    let text_promise = resp
        .text()
        .map_err(|e| io_err(format!("body unavailable: {:?}", e)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| io_err(format!("body read failed: {:?}", e)))?
        .as_string()
        .ok_or_else(|| io_err("body is not text".to_string()))?;
    log::info!("[data] fetched {} bytes from {}", text.len(), url);
    parse_table(&text)
}
