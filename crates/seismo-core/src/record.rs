/// One row of the event table. Loaded once and never mutated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventRecord {
    pub id: String,
    pub date: String,
    pub time: String,
    pub latitude: f32,
    pub longitude: f32,
    pub depth_km: f32,
    pub magnitude: f32,
    pub region: String,
    pub locality: String,
}

impl EventRecord {
    /// Short single-line description used by tooltips and logs.
    pub fn summary(&self) -> String {
        format!(
            "M{:.1} {} {} depth {:.1} km ({} {})",
            self.magnitude, self.region, self.locality, self.depth_km, self.date, self.time
        )
    }
}
