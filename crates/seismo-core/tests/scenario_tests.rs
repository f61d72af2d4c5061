// End-to-end checks through the App context with a recording UI.

mod common;

use common::{synthetic_records, RecordingUi, THREE_ROWS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use seismo_core::constants::*;
use seismo_core::loader::{load_path, parse_table, records_or_empty};
use seismo_core::particles::{particle_count, BurstEngine, BurstParams};
use seismo_core::ui::Achievement;
use seismo_core::{App, DepthBand, Mode, ProjectionKind, VizParams};
use glam::Vec3;

fn quiet_params(kind: ProjectionKind) -> VizParams {
    VizParams {
        star_count: 0,
        ..VizParams::default()
    }
    .with_projection(kind)
}

/// Hover the marker closest to the view center by pointing at its projected
/// screen position.
fn hover_central(app: &mut App, ui: &mut RecordingUi) {
    app.resize(800, 600);
    let target = app.camera().target;
    let pos = app
        .markers()
        .iter()
        .map(|m| m.position)
        .min_by(|a, b| a.distance(target).total_cmp(&b.distance(target)))
        .expect("at least one marker");
    let [x, y] = app
        .camera()
        .world_to_screen(pos, 800.0, 600.0)
        .expect("marker in front of the camera");
    app.pointer_move(x, y, ui);
    assert!(app.hovered().is_some());
}

#[test]
fn three_row_table_end_to_end() {
    let records = parse_table(THREE_ROWS).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].locality, "Husavik");

    let mut ui = RecordingUi::default();
    let app = App::new(records, quiet_params(ProjectionKind::Flat), &mut ui);
    let m = app.markers();
    assert_eq!(m.len(), 3);
    assert_eq!(m[0].band, DepthBand::Shallow);
    assert_eq!(m[1].band, DepthBand::Mid);
    assert_eq!(m[2].band, DepthBand::Deep);
    assert!(m[0].base_size < m[1].base_size);
    assert!(m[1].base_size < m[2].base_size);
    assert!((m[2].base_size - MARKER_SIZE_MAX).abs() < 1e-5);

    assert_eq!(app.mode(), Mode::Explorer);
    assert_eq!(ui.modes, vec![Mode::Explorer]);
    assert_eq!(ui.loading.last().map(|(p, _)| *p), Some(100.0));
    assert!(ui.loading.last().unwrap().1.contains('3'));
    assert!(!ui.fun_facts.is_empty());
}

#[test]
fn missing_file_leaves_an_empty_session() {
    let records = records_or_empty(load_path("/definitely/not/here/quakes.csv"));
    assert!(records.is_empty());

    let mut ui = RecordingUi::default();
    let mut app = App::new(records, quiet_params(ProjectionKind::Sphere), &mut ui);
    for mode in Mode::ALL {
        app.set_mode(mode, &mut ui);
        for _ in 0..20 {
            app.frame(0.05, &mut ui);
        }
    }
    app.click(&mut ui);
    app.double_click();
    assert!(app.markers().is_empty());
    assert!(app.bursts().is_empty());
    assert!(!app.is_flying());
}

#[test]
fn counter_tweens_up_to_the_record_count() {
    let mut ui = RecordingUi::default();
    let mut app = App::new(synthetic_records(40), quiet_params(ProjectionKind::Flat), &mut ui);
    for _ in 0..(COUNTER_TWEEN_SEC / 0.05) as usize + 5 {
        app.frame(0.05, &mut ui);
    }
    assert_eq!(ui.counters.last(), Some(&40));
    assert!(ui.counters.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn digit_keys_switch_modes() {
    let mut ui = RecordingUi::default();
    let mut app = App::new(synthetic_records(5), quiet_params(ProjectionKind::Flat), &mut ui);
    assert!(app.handle_key("3", &mut ui));
    assert_eq!(app.mode(), Mode::Chaos);
    assert!(app.handle_key("2", &mut ui));
    assert_eq!(app.mode(), Mode::History);
    assert!(!app.handle_key("q", &mut ui));
    assert_eq!(app.mode(), Mode::History);
    assert_eq!(ui.modes.last(), Some(&Mode::History));
}

#[test]
fn visiting_every_mode_unlocks_once() {
    let mut ui = RecordingUi::default();
    let mut app = App::new(synthetic_records(5), quiet_params(ProjectionKind::Flat), &mut ui);
    app.set_mode(Mode::History, &mut ui);
    app.set_mode(Mode::Chaos, &mut ui);
    assert!(!app.achievements().is_unlocked(Achievement::AllModes));
    app.set_mode(Mode::Rain, &mut ui);
    assert!(app.achievements().is_unlocked(Achievement::AllModes));
    app.set_mode(Mode::Explorer, &mut ui);
    app.set_mode(Mode::Rain, &mut ui);
    assert_eq!(ui.achievements, vec!["Full Spectrum".to_string()]);

    for _ in 0..((ACHIEVEMENT_SHOW_SEC / 0.1) as usize + 2) {
        app.frame(0.1, &mut ui);
    }
    assert!(!app.achievements().banner_visible());
    assert_eq!(ui.hidden_achievements, 1);
}

#[test]
fn hovering_shows_details_and_clicking_bursts() {
    let mut ui = RecordingUi::default();
    let mut app = App::new(synthetic_records(3), quiet_params(ProjectionKind::Flat), &mut ui);
    hover_central(&mut app, &mut ui);
    assert_eq!(ui.details.len(), 1);
    let i = app.hovered().unwrap();
    assert!(app.markers()[i].hovered);

    app.click(&mut ui);
    assert_eq!(app.click_count(), 1);
    assert_eq!(ui.click_counts.last(), Some(&1));
    assert_eq!(app.bursts().len(), 1);
    assert_eq!(
        app.bursts().particle_total(),
        particle_count(app.markers()[i].magnitude, CLICK_BURST_SCALE)
    );
    assert!(!app.annotations().is_empty());

    app.pointer_move(-5000.0, -5000.0, &mut ui);
    assert_eq!(app.hovered(), None);
    assert_eq!(ui.details_hidden, 1);
    assert!(!app.markers()[i].hovered);
}

#[test]
fn ten_clicks_fire_the_streak_and_reset() {
    let mut ui = RecordingUi::default();
    let mut app = App::new(synthetic_records(3), quiet_params(ProjectionKind::Flat), &mut ui);
    hover_central(&mut app, &mut ui);
    for _ in 0..(CLICK_ACHIEVEMENT_THRESHOLD - 1) {
        app.click(&mut ui);
    }
    assert!(ui.achievements.is_empty());
    app.click(&mut ui);
    assert_eq!(ui.achievements, vec!["Seismologist".to_string()]);
    assert_eq!(app.click_count(), 0);
    assert_eq!(ui.click_counts.last(), Some(&0));

    for _ in 0..CLICK_ACHIEVEMENT_THRESHOLD {
        app.click(&mut ui);
    }
    assert_eq!(ui.achievements.len(), 2);
}

#[test]
fn clicking_empty_space_does_nothing() {
    let mut ui = RecordingUi::default();
    let mut app = App::new(synthetic_records(3), quiet_params(ProjectionKind::Flat), &mut ui);
    app.resize(800, 600);
    app.pointer_move(1.0, 1.0, &mut ui);
    app.click(&mut ui);
    assert_eq!(app.click_count(), 0);
    assert!(app.bursts().is_empty());
}

#[test]
fn double_click_flies_then_bursts_on_arrival() {
    let mut ui = RecordingUi::default();
    let mut app = App::new(synthetic_records(3), quiet_params(ProjectionKind::Flat), &mut ui);
    hover_central(&mut app, &mut ui);
    let start_eye = app.camera().eye;
    app.double_click();
    assert!(app.is_flying());
    assert!(app.bursts().is_empty());

    for _ in 0..((CAMERA_FLIGHT_SEC / 0.1) as usize + 2) {
        app.frame(0.1, &mut ui);
    }
    assert!(!app.is_flying());
    assert_ne!(app.camera().eye, start_eye);
    assert_eq!(app.bursts().len(), 1);
}

#[test]
fn history_reveals_in_load_order_through_the_app() {
    let mut ui = RecordingUi::default();
    let mut app = App::new(synthetic_records(6), quiet_params(ProjectionKind::Flat), &mut ui);
    app.set_mode(Mode::History, &mut ui);
    // frame dt is clamped below the tick period
    app.frame(0.1, &mut ui);
    app.frame(0.1, &mut ui);
    let lit: Vec<bool> = app.markers().iter().map(|m| m.opacity == 1.0).collect();
    assert_eq!(lit, vec![true, false, false, false, false, false]);
    assert_eq!(app.bursts().len(), 1);
}

#[test]
fn absurd_magnitude_bursts_are_capped() {
    let table = "Nr;Date;Time UTC;Latitude;Longitude;Depth;Magnitude;Region;Locality\n\
                 1;2024-01-10;03:12:44;63.88;-22.45;10.0;1e30;Reykjanes;Grindavik\n";
    let records = parse_table(table).unwrap();
    assert_eq!(records[0].magnitude, 1e30);

    let mut ui = RecordingUi::default();
    let mut app = App::new(records, quiet_params(ProjectionKind::Flat), &mut ui);
    app.set_mode(Mode::History, &mut ui);
    for _ in 0..3 {
        app.frame(0.1, &mut ui);
    }
    assert!(!app.bursts().is_empty());
    for b in app.bursts().iter() {
        assert_eq!(b.particles.len(), MAX_PARTICLES_PER_BURST);
    }
}

#[test]
fn bursts_decay_and_are_removed() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut engine = BurstEngine::default();
    assert!(engine.spawn(Vec3::ZERO, 2.5, 10.0, &mut rng));
    assert_eq!(engine.particle_total(), 25);
    let mut last = 1.0;
    let mut frames = 0;
    while !engine.is_empty() {
        engine.update(0.05);
        if let Some(b) = engine.iter().next() {
            assert!(b.opacity() < last);
            last = b.opacity();
        }
        frames += 1;
        assert!(frames < 100);
    }
}

#[test]
fn burst_cap_evicts_oldest_first() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut engine = BurstEngine::new(BurstParams {
        max_active: 3,
        ..BurstParams::default()
    });
    for i in 0..5 {
        engine.spawn(Vec3::new(i as f32, 0.0, 0.0), 1.0, 10.0, &mut rng);
    }
    assert_eq!(engine.len(), 3);
    assert_eq!(engine.evicted(), 2);
    let origins: Vec<f32> = engine.iter().map(|b| b.origin.x).collect();
    assert_eq!(origins, vec![2.0, 3.0, 4.0]);
}

#[test]
fn collected_sprites_cover_markers_and_particles() {
    let mut ui = RecordingUi::default();
    let params = VizParams {
        star_count: 7,
        ..VizParams::default()
    };
    let mut app = App::new(synthetic_records(4), params, &mut ui);
    hover_central(&mut app, &mut ui);
    app.click(&mut ui);
    let mut sprites = Vec::new();
    app.collect_sprites(&mut sprites);
    assert_eq!(sprites.len(), 7 + 4 + app.bursts().particle_total());
}
