use crate::constants::{LOADING_BAR_ID, LOADING_OVERLAY_ID, LOADING_STATUS_ID};
use crate::dom;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Fill the progress bar to `percent` and show `status` beneath it. The
/// overlay hides itself at 100%.
pub fn set_progress(document: &web::Document, percent: f32, status: &str) {
    let pct = percent.clamp(0.0, 100.0);
    if let Some(bar) = document.get_element_by_id(LOADING_BAR_ID) {
        dom::set_style(&bar, "width", &format!("{pct:.0}%"));
    }
    dom::set_text(document, LOADING_STATUS_ID, status);
    if pct >= 100.0 {
        hide(document);
    } else {
        show(document);
    }
}
