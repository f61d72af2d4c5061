mod gpu;
mod ui;

use seismo_core::config::{DATA_PATH_ENV, DEFAULT_DATA_PATH};
use seismo_core::loader::{load_path, records_or_empty};
use seismo_core::{App, ProjectionKind, SceneUniforms, SpriteInstance, UiSurface, VizParams};
use std::time::{Duration, Instant};
use winit::dpi::LogicalSize;
use winit::event::*;
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);
const DOUBLE_CLICK_SLOP_PX: f32 = 6.0;
const WHEEL_LINE_PX: f32 = 16.0;

/// Turns raw left-button releases into clicks and double clicks.
#[derive(Default)]
struct ClickTracker {
    last: Option<(Instant, [f32; 2])>,
}

impl ClickTracker {
    /// Returns true when this release completes a double click.
    fn release(&mut self, now: Instant, at: [f32; 2]) -> bool {
        let double = matches!(self.last, Some((t, [x, y]))
            if now.duration_since(t) <= DOUBLE_CLICK_WINDOW
                && (at[0] - x).hypot(at[1] - y) <= DOUBLE_CLICK_SLOP_PX);
        self.last = if double { None } else { Some((now, at)) };
        double
    }
}

/// First CLI argument, then `SEISMO_DATA`, then the bundled sample.
fn data_path() -> String {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(DATA_PATH_ENV).ok())
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
}

fn wheel_px(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
        MouseScrollDelta::PixelDelta(p) => -p.y as f32,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut ui = ui::TitleUi::default();
    let params = VizParams::default()
        .with_projection(ProjectionKind::Flat)
        .with_data_path(data_path());
    ui.set_loading(5.0, &format!("Reading {}", params.data_path));
    let records = records_or_empty(load_path(&params.data_path));
    ui.set_loading(60.0, &format!("Parsed {} events", records.len()));

    let mut app = App::new(records, params, &mut ui);

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Seismic events")
        .with_inner_size(LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)?;

    let mut state = pollster::block_on(gpu::GpuState::new(&window))?;
    state.set_lines(app.ground_vertices());
    let (w, h) = state.size();
    app.resize(w, h);

    let mut sprites: Vec<SpriteInstance> = Vec::new();
    let mut clicks = ClickTracker::default();
    let mut cursor = [0.0f32; 2];
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                state.resize(size);
                app.resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor = [position.x as f32, position.y as f32];
                app.pointer_move(cursor[0], cursor[1], &mut ui);
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => app.pointer_down(cursor[0], cursor[1]),
                ElementState::Released => {
                    app.pointer_up();
                    app.click(&mut ui);
                    if clicks.release(Instant::now(), cursor) {
                        app.double_click();
                    }
                }
            },
            WindowEvent::MouseWheel { delta, .. } => app.wheel(wheel_px(delta)),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => elwt.exit(),
                Key::Character(ch) => {
                    app.handle_key(ch.as_str(), &mut ui);
                }
                _ => {}
            },
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;

            app.frame(dt, &mut ui);
            app.collect_sprites(&mut sprites);
            if let Some(title) = ui.take_title() {
                state.window.set_title(&title);
            }
            let uniforms = SceneUniforms::from_camera(app.camera());
            match state.render(&uniforms, &sprites) {
                Ok(()) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.resize(state.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    elwt.exit()
                }
                Err(e) => log::warn!("[gpu] {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_nearby_releases_make_a_double_click() {
        let mut t = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!t.release(t0, [10.0, 10.0]));
        assert!(t.release(t0 + Duration::from_millis(200), [12.0, 11.0]));
        // the pair is consumed; a third release starts over
        assert!(!t.release(t0 + Duration::from_millis(250), [12.0, 11.0]));
    }

    #[test]
    fn slow_or_distant_releases_stay_single() {
        let mut t = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!t.release(t0, [10.0, 10.0]));
        assert!(!t.release(t0 + Duration::from_millis(400), [10.0, 10.0]));
        assert!(!t.release(t0 + Duration::from_millis(450), [40.0, 10.0]));
    }

    #[test]
    fn wheel_lines_scale_to_pixels() {
        assert_eq!(wheel_px(MouseScrollDelta::LineDelta(0.0, 1.0)), -WHEEL_LINE_PX);
    }
}
