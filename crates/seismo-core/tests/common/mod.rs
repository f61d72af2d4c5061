#![allow(dead_code)]

use seismo_core::modes::Mode;
use seismo_core::record::EventRecord;
use seismo_core::ui::UiSurface;

pub const THREE_ROWS: &str = "\
Nr;Date;Time UTC;Latitude;Longitude;Depth;Magnitude;Region;Locality;Quality
1;2024-01-10;03:12:44;63.88;-22.45;10.0;1.0;Reykjanes;Grindavik;99
2;2024-01-11;14:02:10;64.02;-21.20;40.0;2.0;Hengill;Hveragerdi;97
3;2024-01-12;22:45:01;66.30;-17.10;100.0;3.4;Tjornes;Husavik;90


";

/// Records every hook call so tests can assert on UI traffic.
#[derive(Default, Debug)]
pub struct RecordingUi {
    pub counters: Vec<u32>,
    pub loading: Vec<(f32, String)>,
    pub achievements: Vec<String>,
    pub hidden_achievements: u32,
    pub fun_facts: Vec<String>,
    pub modes: Vec<Mode>,
    pub details: Vec<String>,
    pub details_hidden: u32,
    pub click_counts: Vec<u32>,
}

impl UiSurface for RecordingUi {
    fn set_counter(&mut self, value: u32) {
        self.counters.push(value);
    }
    fn set_loading(&mut self, percent: f32, status: &str) {
        self.loading.push((percent, status.to_string()));
    }
    fn show_achievement(&mut self, title: &str, _description: &str) {
        self.achievements.push(title.to_string());
    }
    fn hide_achievement(&mut self) {
        self.hidden_achievements += 1;
    }
    fn set_fun_fact(&mut self, text: &str) {
        self.fun_facts.push(text.to_string());
    }
    fn highlight_mode(&mut self, mode: Mode) {
        self.modes.push(mode);
    }
    fn show_details(&mut self, record: &EventRecord) {
        self.details.push(record.id.clone());
    }
    fn hide_details(&mut self) {
        self.details_hidden += 1;
    }
    fn set_click_count(&mut self, count: u32) {
        self.click_counts.push(count);
    }
}

/// `n` records spread over a small box with rising magnitude.
pub fn synthetic_records(n: usize) -> Vec<EventRecord> {
    (0..n)
        .map(|i| EventRecord {
            id: (i + 1).to_string(),
            date: format!("2024-02-{:02}", i % 28 + 1),
            time: "12:00:00".into(),
            latitude: 63.5 + (i % 7) as f32 * 0.3,
            longitude: -23.0 + (i % 11) as f32 * 0.5,
            depth_km: (i * 7 % 120) as f32,
            magnitude: 0.5 + (i % 30) as f32 * 0.1,
            region: "Test".into(),
            locality: format!("Site {}", i),
        })
        .collect()
}
