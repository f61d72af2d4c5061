use crate::constants::WHEEL_LINE_PX;
use glam::Vec2;
use web_sys as web;

/// Pointer position in canvas backing-store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w <= 0.0 || h <= 0.0 {
        return Vec2::ZERO;
    }
    let sx = (x_css / w) * canvas.width() as f32;
    let sy = (y_css / h) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Backing-store pixels per CSS pixel, for mapping back onto DOM overlays.
#[inline]
pub fn css_per_canvas_px(canvas: &web::HtmlCanvasElement) -> f32 {
    let rect = canvas.get_bounding_client_rect();
    let w = canvas.width().max(1) as f32;
    rect.width() as f32 / w
}

/// Wheel delta in pixels regardless of the event's delta mode.
#[inline]
pub fn wheel_delta_px(ev: &web::WheelEvent) -> f32 {
    let dy = ev.delta_y() as f32;
    match ev.delta_mode() {
        web::WheelEvent::DOM_DELTA_LINE => dy * WHEEL_LINE_PX,
        web::WheelEvent::DOM_DELTA_PAGE => dy * WHEEL_LINE_PX * 20.0,
        _ => dy,
    }
}
