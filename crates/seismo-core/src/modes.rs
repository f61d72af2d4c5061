//! The four presentation modes and the controller that switches between them.
//!
//! Every activation gets a fresh [`Generation`]. Delayed work scheduled by an
//! activation is dropped as soon as the generation moves on, and entering a
//! mode always starts from markers at rest.

use crate::constants::*;
use crate::marker::Marker;
use crate::projection::Projection;
use crate::scheduler::{Generation, Interval, TaskQueue};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Explorer,
    History,
    Chaos,
    Rain,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Explorer, Mode::History, Mode::Chaos, Mode::Rain];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Explorer => "Explorer",
            Mode::History => "History",
            Mode::Chaos => "Chaos",
            Mode::Rain => "Rain",
        }
    }

    /// DOM id suffix for the mode buttons.
    pub fn slug(self) -> &'static str {
        match self {
            Mode::Explorer => "explorer",
            Mode::History => "history",
            Mode::Chaos => "chaos",
            Mode::Rain => "rain",
        }
    }

    #[inline]
    pub fn for_key(key: &str) -> Option<Mode> {
        match key {
            "1" => Some(Mode::Explorer),
            "2" => Some(Mode::History),
            "3" => Some(Mode::Chaos),
            "4" => Some(Mode::Rain),
            _ => None,
        }
    }
}

/// A burst the controller wants fired at a marker's current position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstRequest {
    pub marker: usize,
    pub magnitude: f32,
}

#[derive(Clone, Debug)]
struct ChaosPulse {
    period: f32,
    offset: f32,
    cycles: u32,
}

#[derive(Clone, Debug)]
struct RainDrop {
    up: Vec3,
    height: f32,
    delay: f32,
    duration: f32,
    landed: bool,
}

#[derive(Clone, Debug)]
enum ModeState {
    Explorer,
    History { interval: Interval, next: usize },
    Chaos { pulses: Vec<ChaosPulse> },
    Rain { drops: Vec<RainDrop> },
}

pub struct ModeController {
    mode: Mode,
    generation: Generation,
    state: ModeState,
    elapsed: f32,
    delayed: TaskQueue<BurstRequest>,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    pub fn new() -> Self {
        Self {
            mode: Mode::Explorer,
            generation: Generation::default(),
            state: ModeState::Explorer,
            elapsed: 0.0,
            delayed: TaskQueue::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Delayed bursts still waiting to fire for the current activation.
    pub fn pending_bursts(&self) -> usize {
        self.delayed.len()
    }

    /// Switch modes. Cancels everything the previous activation scheduled,
    /// resets every marker to rest, then applies the new mode's entry state.
    pub fn set_mode(
        &mut self,
        mode: Mode,
        markers: &mut [Marker],
        projection: &Projection,
        rng: &mut impl Rng,
    ) {
        self.generation = self.generation.next();
        self.delayed.cancel_all();
        self.elapsed = 0.0;
        for m in markers.iter_mut() {
            m.reset();
        }
        self.mode = mode;
        self.state = match mode {
            Mode::Explorer => ModeState::Explorer,
            Mode::History => {
                for m in markers.iter_mut() {
                    m.opacity = HISTORY_DIM_OPACITY;
                }
                ModeState::History {
                    interval: Interval::new(HISTORY_TICK_SEC),
                    next: 0,
                }
            }
            Mode::Chaos => {
                let pulses = markers
                    .iter()
                    .enumerate()
                    .map(|(i, m)| {
                        self.roll_chaos_burst(i, m.magnitude, rng);
                        let period = rng.gen_range(CHAOS_PERIOD_MIN..CHAOS_PERIOD_MAX);
                        ChaosPulse {
                            period,
                            offset: rng.gen_range(0.0..period),
                            cycles: 0,
                        }
                    })
                    .collect();
                ModeState::Chaos { pulses }
            }
            Mode::Rain => {
                let drops = markers
                    .iter_mut()
                    .enumerate()
                    .map(|(i, m)| {
                        let rest = m.resting_position();
                        let up = projection.up_at(rest);
                        let height =
                            RAIN_START_HEIGHT + (i % RAIN_STAGGER_BANDS) as f32 * RAIN_STAGGER_STEP;
                        m.position = rest + up * height;
                        RainDrop {
                            up,
                            height,
                            delay: i as f32 * RAIN_DELAY_PER_INDEX,
                            duration: rain_duration(m.magnitude),
                            landed: false,
                        }
                    })
                    .collect();
                ModeState::Rain { drops }
            }
        };
        log::info!(
            "[mode] entered {} ({} markers, {:?})",
            mode.label(),
            markers.len(),
            self.generation
        );
    }

    /// Advance the active mode by `dt` seconds, appending any bursts it
    /// wants fired this frame.
    pub fn update(
        &mut self,
        dt: f32,
        markers: &mut [Marker],
        rng: &mut impl Rng,
        out: &mut Vec<BurstRequest>,
    ) {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        let elapsed = self.elapsed;

        // Take the state out so the per-mode steps can borrow `self`.
        let mut state = std::mem::replace(&mut self.state, ModeState::Explorer);
        match &mut state {
            ModeState::Explorer => {}
            ModeState::History { interval, next } => {
                for _ in 0..interval.tick(dt) {
                    history_step(markers, next, out);
                }
            }
            ModeState::Chaos { pulses } => {
                for (i, (m, p)) in markers.iter_mut().zip(pulses.iter_mut()).enumerate() {
                    let t = elapsed + p.offset;
                    m.scale = 1.0 + CHAOS_PULSE_AMPLITUDE * (t / p.period * std::f32::consts::TAU).sin();
                    let cycles = (t / p.period).floor() as u32;
                    if cycles > p.cycles {
                        p.cycles = cycles;
                        self.roll_chaos_burst(i, m.magnitude, rng);
                    }
                }
            }
            ModeState::Rain { drops } => {
                for (i, (m, d)) in markers.iter_mut().zip(drops.iter_mut()).enumerate() {
                    if d.landed {
                        continue;
                    }
                    let rest = m.resting_position();
                    let progress = ((elapsed - d.delay) / d.duration).clamp(0.0, 1.0);
                    if progress >= 1.0 {
                        m.position = rest;
                        d.landed = true;
                        out.push(BurstRequest {
                            marker: i,
                            magnitude: m.magnitude,
                        });
                    } else {
                        m.position = rest + d.up * (d.height * (1.0 - ease_in_quad(progress)));
                    }
                }
            }
        }
        self.state = state;

        out.extend(self.delayed.advance(dt, self.generation));
    }

    fn roll_chaos_burst(&mut self, marker: usize, magnitude: f32, rng: &mut impl Rng) {
        if rng.gen::<f32>() < CHAOS_BURST_PROBABILITY {
            let delay = rng.gen_range(0.0..CHAOS_BURST_WINDOW_SEC);
            self.delayed.schedule(
                delay,
                self.generation,
                BurstRequest {
                    marker,
                    magnitude: magnitude * CHAOS_BURST_MAGNITUDE_SCALE,
                },
            );
        }
    }
}

/// Reveal the next marker in load order, wrapping (and dimming everything
/// again) after the last one. No-op on an empty set.
fn history_step(markers: &mut [Marker], next: &mut usize, out: &mut Vec<BurstRequest>) {
    if markers.is_empty() {
        return;
    }
    if *next >= markers.len() {
        *next = 0;
        for m in markers.iter_mut() {
            m.opacity = HISTORY_DIM_OPACITY;
        }
    }
    let m = &mut markers[*next];
    m.opacity = 1.0;
    out.push(BurstRequest {
        marker: *next,
        magnitude: m.magnitude,
    });
    *next += 1;
}

#[inline]
fn rain_duration(magnitude: f32) -> f32 {
    let mag = if magnitude.is_finite() {
        magnitude.max(0.0)
    } else {
        0.0
    };
    RAIN_BASE_DURATION + mag * RAIN_DURATION_PER_MAGNITUDE
}

#[inline]
pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_keys_map_to_modes() {
        assert_eq!(Mode::for_key("1"), Some(Mode::Explorer));
        assert_eq!(Mode::for_key("2"), Some(Mode::History));
        assert_eq!(Mode::for_key("3"), Some(Mode::Chaos));
        assert_eq!(Mode::for_key("4"), Some(Mode::Rain));
        assert_eq!(Mode::for_key("5"), None);
        assert_eq!(Mode::for_key("a"), None);
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_in_quad(0.0), 0.0);
        assert_eq!(ease_in_quad(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn rain_duration_grows_with_magnitude() {
        assert!(rain_duration(3.0) > rain_duration(1.0));
        assert_eq!(rain_duration(f32::NAN), RAIN_BASE_DURATION);
    }
}
