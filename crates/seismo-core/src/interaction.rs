use crate::camera::ray_sphere;
use crate::constants::*;
use crate::marker::Marker;
use crate::record::EventRecord;
use glam::Vec3;

/// Nearest marker hit by the ray, if any.
pub fn pick_marker(markers: &[Marker], ray_origin: Vec3, ray_dir: Vec3) -> Option<usize> {
    let mut best = None::<(usize, f32)>;
    for (i, m) in markers.iter().enumerate() {
        let radius = (m.base_size * m.scale).max(PICK_RADIUS_MIN);
        if let Some(t) = ray_sphere(ray_origin, ray_dir, m.position, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}

/// Move hover emphasis to `next`. Returns true when the hovered marker changed.
pub fn set_hover(markers: &mut [Marker], current: &mut Option<usize>, next: Option<usize>) -> bool {
    if *current == next {
        return false;
    }
    if let Some(m) = current.and_then(|i| markers.get_mut(i)) {
        m.hovered = false;
    }
    if let Some(m) = next.and_then(|i| markers.get_mut(i)) {
        m.hovered = true;
    }
    *current = next;
    true
}

#[derive(Clone, Debug, Default)]
pub struct ClickCounter {
    count: u32,
}

impl ClickCounter {
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Count one click. Returns true when the threshold is reached; the
    /// counter starts over at that point.
    pub fn click(&mut self) -> bool {
        self.count += 1;
        if self.count >= CLICK_ACHIEVEMENT_THRESHOLD {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

/// A text fragment drifting away from a clicked marker, in screen pixels.
#[derive(Clone, Debug)]
pub struct Annotation {
    pub text: String,
    pub pos: [f32; 2],
    pub vel: [f32; 2],
    pub life: f32,
}

impl Annotation {
    #[inline]
    pub fn opacity(&self) -> f32 {
        (self.life / ANNOTATION_LIFE_SEC).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Annotations {
    items: Vec<Annotation>,
}

impl Annotations {
    /// Radiate the record's facts outward from `(x, y)`, evenly spaced.
    pub fn spawn(&mut self, record: &EventRecord, x: f32, y: f32) {
        let fragments = annotation_fragments(record);
        let n = fragments.len().max(1) as f32;
        for (i, text) in fragments.into_iter().enumerate() {
            let angle = std::f32::consts::TAU * i as f32 / n - std::f32::consts::FRAC_PI_2;
            self.items.push(Annotation {
                text,
                pos: [x, y],
                vel: [angle.cos() * ANNOTATION_SPEED_PX, angle.sin() * ANNOTATION_SPEED_PX],
                life: ANNOTATION_LIFE_SEC,
            });
        }
    }

    pub fn update(&mut self, dt: f32) {
        for a in self.items.iter_mut() {
            a.pos[0] += a.vel[0] * dt;
            a.pos[1] += a.vel[1] * dt;
            a.life -= dt;
        }
        self.items.retain(|a| a.life > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn annotation_fragments(record: &EventRecord) -> Vec<String> {
    let mut out = vec![
        format!("M{:.1}", record.magnitude),
        format!("{:.1} km", record.depth_km),
    ];
    if !record.locality.is_empty() {
        out.push(record.locality.clone());
    }
    if !record.date.is_empty() {
        out.push(record.date.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Projection;

    fn marker_at(i: usize, p: Vec3) -> Marker {
        let proj = Projection::Sphere {
            radius: 0.0,
            depth_scale: 0.0,
        };
        let mut m = Marker::from_record(
            i,
            &EventRecord {
                magnitude: 1.0,
                ..Default::default()
            },
            &proj,
            1.0,
        );
        m.position = p;
        m
    }

    #[test]
    fn picks_nearest_along_ray() {
        let markers = vec![
            marker_at(0, Vec3::new(0.0, 0.0, -10.0)),
            marker_at(1, Vec3::new(0.0, 0.0, -5.0)),
            marker_at(2, Vec3::new(5.0, 0.0, -5.0)),
        ];
        assert_eq!(pick_marker(&markers, Vec3::ZERO, -Vec3::Z), Some(1));
        assert_eq!(pick_marker(&markers, Vec3::ZERO, Vec3::Z), None);
    }

    #[test]
    fn hover_moves_emphasis() {
        let mut markers = vec![marker_at(0, Vec3::ZERO), marker_at(1, Vec3::X)];
        let mut hover = None;
        assert!(set_hover(&mut markers, &mut hover, Some(0)));
        assert!(markers[0].hovered);
        assert!(!set_hover(&mut markers, &mut hover, Some(0)));
        assert!(set_hover(&mut markers, &mut hover, Some(1)));
        assert!(!markers[0].hovered);
        assert!(markers[1].hovered);
        assert!(set_hover(&mut markers, &mut hover, None));
        assert!(markers.iter().all(|m| !m.hovered));
    }

    #[test]
    fn annotations_fade_out() {
        let mut a = Annotations::default();
        a.spawn(
            &EventRecord {
                locality: "Grindavik".into(),
                date: "2024-01-14".into(),
                ..Default::default()
            },
            100.0,
            100.0,
        );
        assert_eq!(a.len(), 4);
        a.update(ANNOTATION_LIFE_SEC * 0.5);
        assert!(a.iter().all(|x| x.opacity() < 1.0 && x.opacity() > 0.0));
        a.update(ANNOTATION_LIFE_SEC);
        assert!(a.is_empty());
    }
}
