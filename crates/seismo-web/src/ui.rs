use crate::constants::*;
use crate::dom;
use crate::overlay;
use seismo_core::interaction::Annotations;
use seismo_core::{EventRecord, Mode, UiSurface};
use web_sys as web;

/// `UiSurface` backed by page elements. Missing elements are skipped
/// silently so the page can omit any panel it does not want.
pub struct DomUi {
    document: web::Document,
    // Reused spans for drifting annotation text
    annotation_pool: Vec<web::Element>,
}

impl DomUi {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            annotation_pool: Vec::new(),
        }
    }

    /// Mirror the core's annotation list into absolutely positioned spans.
    /// `scale` converts backing-store pixels back to CSS pixels.
    pub fn sync_annotations(&mut self, annotations: &Annotations, scale: f32) {
        let Some(layer) = self.document.get_element_by_id(ANNOTATION_LAYER_ID) else {
            return;
        };
        while self.annotation_pool.len() < annotations.len() {
            match self.document.create_element("span") {
                Ok(el) => {
                    let _ = layer.append_child(&el);
                    self.annotation_pool.push(el);
                }
                Err(e) => {
                    log::warn!("[ui] create_element failed: {:?}", e);
                    break;
                }
            }
        }
        let mut used = 0;
        for (a, el) in annotations.iter().zip(self.annotation_pool.iter()) {
            el.set_text_content(Some(&a.text));
            dom::set_style(el, "display", "block");
            dom::set_style(el, "left", &format!("{:.1}px", a.pos[0] * scale));
            dom::set_style(el, "top", &format!("{:.1}px", a.pos[1] * scale));
            dom::set_style(el, "opacity", &format!("{:.3}", a.opacity()));
            used += 1;
        }
        for el in self.annotation_pool.iter().skip(used) {
            dom::set_style(el, "display", "none");
        }
    }
}

impl UiSurface for DomUi {
    fn set_counter(&mut self, value: u32) {
        dom::set_text(&self.document, COUNTER_ID, &value.to_string());
    }

    fn set_loading(&mut self, percent: f32, status: &str) {
        overlay::set_progress(&self.document, percent, status);
    }

    fn show_achievement(&mut self, title: &str, description: &str) {
        dom::set_text(&self.document, ACHIEVEMENT_TITLE_ID, title);
        dom::set_text(&self.document, ACHIEVEMENT_DESC_ID, description);
        dom::set_class(&self.document, ACHIEVEMENT_ID, VISIBLE_CLASS, true);
    }

    fn hide_achievement(&mut self) {
        dom::set_class(&self.document, ACHIEVEMENT_ID, VISIBLE_CLASS, false);
    }

    fn set_fun_fact(&mut self, text: &str) {
        dom::set_text(&self.document, FUN_FACT_ID, text);
    }

    fn highlight_mode(&mut self, mode: Mode) {
        for m in Mode::ALL {
            let id = format!("{}{}", MODE_BUTTON_PREFIX, m.slug());
            dom::set_class(&self.document, &id, ACTIVE_CLASS, m == mode);
        }
    }

    fn show_details(&mut self, record: &EventRecord) {
        let text = format!(
            "M{:.1} · {}\n{} · {}\n{} {} UTC\nDepth {:.1} km",
            record.magnitude,
            record.locality,
            record.region,
            record.id,
            record.date,
            record.time,
            record.depth_km
        );
        dom::set_text(&self.document, DETAILS_ID, &text);
        dom::set_class(&self.document, DETAILS_ID, VISIBLE_CLASS, true);
    }

    fn hide_details(&mut self) {
        dom::set_class(&self.document, DETAILS_ID, VISIBLE_CLASS, false);
    }

    fn set_click_count(&mut self, count: u32) {
        dom::set_text(&self.document, CLICK_COUNT_ID, &count.to_string());
    }
}
