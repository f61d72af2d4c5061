use seismo_core::{EventRecord, Mode, UiSurface};

/// Window-title and log backed UI. The title carries mode, record counter
/// and click count; everything else goes to the log.
pub struct TitleUi {
    mode: Mode,
    counter: u32,
    clicks: u32,
    dirty: bool,
}

impl TitleUi {
    pub fn new() -> Self {
        Self {
            mode: Mode::Explorer,
            counter: 0,
            clicks: 0,
            dirty: true,
        }
    }

    /// Returns the new title once after any change.
    pub fn take_title(&mut self) -> Option<String> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(format!(
            "Seismic events | {} | {} events | {} clicks",
            self.mode.label(),
            self.counter,
            self.clicks
        ))
    }
}

impl Default for TitleUi {
    fn default() -> Self {
        Self::new()
    }
}

impl UiSurface for TitleUi {
    fn set_counter(&mut self, value: u32) {
        self.counter = value;
        self.dirty = true;
    }

    fn set_loading(&mut self, percent: f32, status: &str) {
        log::info!("[loading] {:>3.0}% {}", percent, status);
    }

    fn show_achievement(&mut self, title: &str, description: &str) {
        log::info!("[achievement] {}: {}", title, description);
    }

    fn hide_achievement(&mut self) {}

    fn set_fun_fact(&mut self, text: &str) {
        log::info!("[fact] {}", text);
    }

    fn highlight_mode(&mut self, mode: Mode) {
        log::info!("[mode] {}", mode.label());
        self.mode = mode;
        self.dirty = true;
    }

    fn show_details(&mut self, record: &EventRecord) {
        log::info!(
            "[hover] {} {} | M{:.1} at {:.1} km | {} ({})",
            record.date,
            record.time,
            record.magnitude,
            record.depth_km,
            record.locality,
            record.region
        );
    }

    fn hide_details(&mut self) {
        log::debug!("[hover] none");
    }

    fn set_click_count(&mut self, count: u32) {
        self.clicks = count;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_reported_once_per_change() {
        let mut ui = TitleUi::default();
        assert!(ui.take_title().is_some());
        assert!(ui.take_title().is_none());
        ui.highlight_mode(Mode::Rain);
        ui.set_click_count(3);
        let title = ui.take_title().unwrap_or_default();
        assert!(title.contains(Mode::Rain.label()));
        assert!(title.contains("3 clicks"));
        assert!(ui.take_title().is_none());
    }
}
