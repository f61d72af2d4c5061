// Integration tests for the mode controller state machine.

mod common;

use common::synthetic_records;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seismo_core::constants::*;
use seismo_core::marker::Marker;
use seismo_core::modes::{BurstRequest, Mode, ModeController};
use seismo_core::projection::{Projection, ProjectionKind};
use seismo_core::scene::SceneBuilder;

fn build(n: usize, kind: ProjectionKind) -> (Vec<Marker>, Projection) {
    let mut rng = StdRng::seed_from_u64(11);
    let scene = SceneBuilder {
        projection_kind: kind,
        star_count: 0,
    }
    .build(&synthetic_records(n), &mut rng);
    (scene.markers, scene.projection)
}

fn assert_all_at_rest(markers: &[Marker]) {
    for m in markers {
        assert_eq!(m.position, m.resting_position());
        assert_eq!(m.scale, 1.0);
    }
}

#[test]
fn every_mode_entry_starts_from_rest() {
    let (mut markers, proj) = build(40, ProjectionKind::Flat);
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctl = ModeController::new();
    let mut out = Vec::new();
    for from in Mode::ALL {
        for to in Mode::ALL {
            ctl.set_mode(from, &mut markers, &proj, &mut rng);
            for _ in 0..30 {
                ctl.update(0.05, &mut markers, &mut rng, &mut out);
            }
            ctl.set_mode(to, &mut markers, &proj, &mut rng);
            match to {
                // Rain lifts markers as part of its own entry state
                Mode::Rain => {
                    for m in &markers {
                        assert_eq!(m.scale, 1.0);
                        assert!(m.position.y > m.resting_position().y);
                    }
                }
                _ => assert_all_at_rest(&markers),
            }
        }
    }
}

#[test]
fn entering_same_mode_twice_is_idempotent() {
    let (mut markers, proj) = build(10, ProjectionKind::Flat);
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::History, &mut markers, &proj, &mut rng);
    let first: Vec<(f32, f32)> = markers.iter().map(|m| (m.scale, m.opacity)).collect();
    ctl.set_mode(Mode::History, &mut markers, &proj, &mut rng);
    let second: Vec<(f32, f32)> = markers.iter().map(|m| (m.scale, m.opacity)).collect();
    assert_eq!(first, second);
    assert_all_at_rest(&markers);
}

#[test]
fn explorer_is_identity() {
    let (mut markers, proj) = build(10, ProjectionKind::Sphere);
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::Explorer, &mut markers, &proj, &mut rng);
    let mut out = Vec::new();
    for _ in 0..100 {
        ctl.update(0.05, &mut markers, &mut rng, &mut out);
    }
    assert!(out.is_empty());
    assert!(markers.iter().all(|m| m.is_at_rest()));
}

#[test]
fn history_visits_each_marker_once_per_cycle_in_order() {
    let n = 12;
    let (mut markers, proj) = build(n, ProjectionKind::Flat);
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::History, &mut markers, &proj, &mut rng);
    assert!(markers.iter().all(|m| m.opacity == HISTORY_DIM_OPACITY));

    let mut visited = Vec::new();
    let mut out: Vec<BurstRequest> = Vec::new();
    for tick in 0..(2 * n) {
        out.clear();
        ctl.update(HISTORY_TICK_SEC, &mut markers, &mut rng, &mut out);
        assert_eq!(out.len(), 1, "one reveal per tick");
        visited.push(out[0].marker);
        let revealed = markers.iter().filter(|m| m.opacity == 1.0).count();
        assert_eq!(revealed, tick % n + 1);
    }
    let expected: Vec<usize> = (0..n).chain(0..n).collect();
    assert_eq!(visited, expected);
}

#[test]
fn history_on_empty_set_is_a_no_op() {
    let (mut markers, proj) = build(0, ProjectionKind::Flat);
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::History, &mut markers, &proj, &mut rng);
    let mut out = Vec::new();
    for _ in 0..100 {
        ctl.update(HISTORY_TICK_SEC, &mut markers, &mut rng, &mut out);
    }
    assert!(out.is_empty());
    assert_eq!(ctl.mode(), Mode::History);
}

#[test]
fn rain_altitude_never_rises_and_lands_exactly() {
    let (mut markers, proj) = build(25, ProjectionKind::Flat);
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::Rain, &mut markers, &proj, &mut rng);

    let mut prev: Vec<f32> = markers.iter().map(|m| m.position.y).collect();
    let mut landed = vec![0u32; markers.len()];
    let mut out = Vec::new();
    let dt = 1.0 / 60.0;
    for _ in 0..(60 * 10) {
        out.clear();
        ctl.update(dt, &mut markers, &mut rng, &mut out);
        for (i, m) in markers.iter().enumerate() {
            assert!(m.position.y <= prev[i], "marker {i} rose");
            prev[i] = m.position.y;
        }
        for r in &out {
            landed[r.marker] += 1;
            assert_eq!(markers[r.marker].position, markers[r.marker].resting_position());
        }
    }
    assert!(landed.iter().all(|&n| n == 1), "each drop bursts once: {landed:?}");
    assert_all_at_rest(&markers);
}

#[test]
fn rain_follows_radial_up_on_the_globe() {
    let (mut markers, proj) = build(5, ProjectionKind::Sphere);
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::Rain, &mut markers, &proj, &mut rng);
    for m in &markers {
        let rest = m.resting_position();
        assert!(m.position.length() > rest.length());
    }
}

#[test]
fn leaving_rain_mid_fall_snaps_to_rest() {
    let (mut markers, proj) = build(25, ProjectionKind::Flat);
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::Rain, &mut markers, &proj, &mut rng);
    let mut out = Vec::new();
    ctl.update(0.3, &mut markers, &mut rng, &mut out);
    ctl.set_mode(Mode::Explorer, &mut markers, &proj, &mut rng);
    assert_all_at_rest(&markers);
    out.clear();
    for _ in 0..200 {
        ctl.update(0.05, &mut markers, &mut rng, &mut out);
    }
    assert!(out.is_empty(), "no landing bursts after the mode changed");
    assert_all_at_rest(&markers);
}

#[test]
fn chaos_pulses_scale_within_amplitude() {
    let (mut markers, proj) = build(30, ProjectionKind::Flat);
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::Chaos, &mut markers, &proj, &mut rng);
    let mut out = Vec::new();
    let mut saw_change = false;
    for _ in 0..120 {
        ctl.update(1.0 / 30.0, &mut markers, &mut rng, &mut out);
        for m in &markers {
            assert!(m.scale >= 1.0 - CHAOS_PULSE_AMPLITUDE - 1e-5);
            assert!(m.scale <= 1.0 + CHAOS_PULSE_AMPLITUDE + 1e-5);
            assert_eq!(m.position, m.resting_position());
            saw_change |= (m.scale - 1.0).abs() > 1e-3;
        }
    }
    assert!(saw_change);
}

#[test]
fn chaos_bursts_are_cancelled_by_a_mode_change() {
    let (mut markers, proj) = build(255, ProjectionKind::Flat);
    let mut rng = StdRng::seed_from_u64(9);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::Chaos, &mut markers, &proj, &mut rng);
    assert!(ctl.pending_bursts() > 0, "255 rolls at 10% should schedule something");
    let g = ctl.generation();
    ctl.set_mode(Mode::Explorer, &mut markers, &proj, &mut rng);
    assert!(ctl.generation() > g);
    assert_eq!(ctl.pending_bursts(), 0);
    let mut out = Vec::new();
    for _ in 0..100 {
        ctl.update(0.05, &mut markers, &mut rng, &mut out);
    }
    assert!(out.is_empty());
}

#[test]
fn chaos_bursts_are_scaled_down() {
    let (mut markers, proj) = build(255, ProjectionKind::Flat);
    let mut rng = StdRng::seed_from_u64(9);
    let mut ctl = ModeController::new();
    ctl.set_mode(Mode::Chaos, &mut markers, &proj, &mut rng);
    let mut out = Vec::new();
    for _ in 0..60 {
        ctl.update(0.05, &mut markers, &mut rng, &mut out);
    }
    assert!(!out.is_empty());
    for r in &out {
        let expected = markers[r.marker].magnitude * CHAOS_BURST_MAGNITUDE_SCALE;
        assert!((r.magnitude - expected).abs() < 1e-6);
    }
}
