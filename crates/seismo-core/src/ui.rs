//! Hooks into the surrounding UI, plus the small pieces of UI state the core
//! animates itself (record counter tween, fun-fact rotation, achievements).

use crate::constants::*;
use crate::modes::{ease_out_cubic, Mode};
use crate::record::EventRecord;
use crate::scheduler::Interval;
use fnv::FnvHashSet;

/// Surface the core notifies. Front-ends map these onto DOM elements or logs.
pub trait UiSurface {
    fn set_counter(&mut self, value: u32);
    fn set_loading(&mut self, percent: f32, status: &str);
    fn show_achievement(&mut self, title: &str, description: &str);
    fn hide_achievement(&mut self);
    fn set_fun_fact(&mut self, text: &str);
    fn highlight_mode(&mut self, mode: Mode);
    fn show_details(&mut self, record: &EventRecord);
    fn hide_details(&mut self);
    fn set_click_count(&mut self, count: u32);
}

/// Animates the displayed record count from 0 up to its target.
#[derive(Clone, Debug)]
pub struct CounterTween {
    target: u32,
    elapsed: f32,
    duration: f32,
    shown: Option<u32>,
}

impl CounterTween {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            elapsed: 0.0,
            duration: COUNTER_TWEEN_SEC,
            shown: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.shown == Some(self.target)
    }

    /// Advance; returns the new display value when it changed.
    pub fn step(&mut self, dt: f32) -> Option<u32> {
        if self.is_done() {
            return None;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        let t = ease_out_cubic(self.elapsed / self.duration);
        let value = if self.elapsed >= self.duration {
            self.target
        } else {
            ((self.target as f32) * t).floor() as u32
        };
        if self.shown != Some(value) {
            self.shown = Some(value);
            Some(value)
        } else {
            None
        }
    }
}

/// Cycles a list of facts on a fixed interval.
#[derive(Clone, Debug)]
pub struct FunFacts {
    facts: Vec<String>,
    index: usize,
    interval: Interval,
}

impl FunFacts {
    pub fn new(facts: Vec<String>) -> Self {
        Self {
            facts,
            index: 0,
            interval: Interval::new(FUN_FACT_INTERVAL_SEC),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.facts.get(self.index).map(String::as_str)
    }

    /// Returns the newly shown fact when the rotation advanced.
    pub fn tick(&mut self, dt: f32) -> Option<&str> {
        let fired = self.interval.tick(dt);
        if fired == 0 || self.facts.is_empty() {
            return None;
        }
        self.index = (self.index + fired as usize) % self.facts.len();
        self.current()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Achievement {
    ClickStreak,
    AllModes,
}

impl Achievement {
    pub fn title(self) -> &'static str {
        match self {
            Achievement::ClickStreak => "Seismologist",
            Achievement::AllModes => "Full Spectrum",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::ClickStreak => "Inspected 10 earthquakes",
            Achievement::AllModes => "Tried every visualization mode",
        }
    }
}

/// Unlock bookkeeping and banner lifetime.
#[derive(Clone, Debug, Default)]
pub struct Achievements {
    unlocked: FnvHashSet<Achievement>,
    visited: FnvHashSet<Mode>,
    banner_left: Option<f32>,
}

impl Achievements {
    pub fn is_unlocked(&self, a: Achievement) -> bool {
        self.unlocked.contains(&a)
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_left.is_some()
    }

    /// Show the banner for `a`. The click streak may repeat; everything else
    /// fires once per session.
    pub fn trigger(&mut self, a: Achievement, ui: &mut dyn UiSurface) -> bool {
        let first = self.unlocked.insert(a);
        if !first && a != Achievement::ClickStreak {
            return false;
        }
        log::info!("[achievement] {}", a.title());
        ui.show_achievement(a.title(), a.description());
        self.banner_left = Some(ACHIEVEMENT_SHOW_SEC);
        true
    }

    pub fn visit_mode(&mut self, mode: Mode, ui: &mut dyn UiSurface) {
        self.visited.insert(mode);
        if Mode::ALL.iter().all(|m| self.visited.contains(m)) {
            self.trigger(Achievement::AllModes, ui);
        }
    }

    pub fn update(&mut self, dt: f32, ui: &mut dyn UiSurface) {
        if let Some(left) = self.banner_left.as_mut() {
            *left -= dt;
            if *left <= 0.0 {
                self.banner_left = None;
                ui.hide_achievement();
            }
        }
    }
}
