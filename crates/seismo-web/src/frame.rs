use crate::dom;
use crate::input;
use crate::render;
use crate::ui::DomUi;
use instant::Instant;
use seismo_core::{App, SceneUniforms, SpriteInstance};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub app: Rc<RefCell<App>>,
    pub ui: Rc<RefCell<DomUi>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    pub sprites: Vec<SpriteInstance>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
        {
            let mut app = self.app.borrow_mut();
            let mut ui = self.ui.borrow_mut();
            app.resize(w, h);
            app.frame(dt_sec, &mut *ui);
            app.collect_sprites(&mut self.sprites);
            ui.sync_annotations(app.annotations(), input::css_per_canvas_px(&self.canvas));
        }

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(w, h);
            let uniforms = SceneUniforms::from_camera(self.app.borrow().camera());
            match gpu.render(&uniforms, &self.sprites) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[gpu] surface lost; reconfiguring next frame");
                    gpu.reconfigure();
                }
                Err(e) => log::error!("[gpu] render error: {:?}", e),
            }
        }
    }
}

/// Initialize WebGPU for `canvas`; `None` keeps the session running without
/// drawing.
pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
