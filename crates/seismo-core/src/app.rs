//! The explicit application context.
//!
//! Everything the session mutates (markers, mode, bursts, hover, camera, UI
//! counters) lives in [`App`]. Front-ends own one instance, forward input to
//! it and call [`App::frame`] once per displayed frame.

use crate::camera::{Camera, CameraFlight, OrbitControls};
use crate::config::VizParams;
use crate::constants::*;
use crate::interaction::{pick_marker, set_hover, Annotations, ClickCounter};
use crate::mapping::DatasetStats;
use crate::marker::Marker;
use crate::modes::{BurstRequest, Mode, ModeController};
use crate::particles::BurstEngine;
use crate::record::EventRecord;
use crate::scene::{LineVertex, Scene, SceneBuilder, SpriteInstance};
use crate::ui::{Achievement, Achievements, CounterTween, FunFacts, UiSurface};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Pointer travel (px) beyond which a press counts as a drag, not a click.
const DRAG_CLICK_TOLERANCE_PX: f32 = 4.0;

pub struct App {
    pub params: VizParams,
    records: Vec<EventRecord>,
    scene: Scene,
    modes: ModeController,
    bursts: BurstEngine,
    camera: Camera,
    controls: OrbitControls,
    flight: Option<CameraFlight>,
    hover: Option<usize>,
    clicks: ClickCounter,
    annotations: Annotations,
    achievements: Achievements,
    counter: CounterTween,
    fun_facts: FunFacts,
    rng: StdRng,
    viewport: [f32; 2],
    pointer: [f32; 2],
    press_origin: Option<[f32; 2]>,
    requests: Vec<BurstRequest>,
}

impl App {
    /// Build the scene from `records` and enter Explorer.
    pub fn new(records: Vec<EventRecord>, params: VizParams, ui: &mut dyn UiSurface) -> Self {
        ui.set_loading(90.0, "Building scene");
        log::info!("[data] {} events from {}", records.len(), params.data_path);
        let mut rng = StdRng::seed_from_u64(params.seed);
        let scene = SceneBuilder {
            projection_kind: params.projection,
            star_count: params.star_count,
        }
        .build(&records, &mut rng);
        let stats = DatasetStats::from_records(&records);
        let facts = stats.fun_facts(&records);
        let camera = Camera::default();
        let controls = OrbitControls::looking_from(camera.eye, camera.target);
        let mut app = Self {
            bursts: BurstEngine::new(params.bursts.clone()),
            params,
            counter: CounterTween::new(records.len() as u32),
            fun_facts: FunFacts::new(facts),
            records,
            scene,
            modes: ModeController::new(),
            camera,
            controls,
            flight: None,
            hover: None,
            clicks: ClickCounter::default(),
            annotations: Annotations::default(),
            achievements: Achievements::default(),
            rng,
            viewport: [1.0, 1.0],
            pointer: [0.0, 0.0],
            press_origin: None,
            requests: Vec::new(),
        };
        app.set_mode(Mode::Explorer, ui);
        if let Some(fact) = app.fun_facts.current() {
            ui.set_fun_fact(fact);
        }
        ui.set_click_count(0);
        ui.set_loading(100.0, &format!("Loaded {} events", app.records.len()));
        app
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn markers(&self) -> &[Marker] {
        &self.scene.markers
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    pub fn bursts(&self) -> &BurstEngine {
        &self.bursts
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover
    }

    pub fn click_count(&self) -> u32 {
        self.clicks.count()
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub fn ground_vertices(&self) -> &[LineVertex] {
        &self.scene.ground
    }

    /// UI entry point for mode buttons and keys.
    pub fn set_mode(&mut self, mode: Mode, ui: &mut dyn UiSurface) {
        self.modes
            .set_mode(mode, &mut self.scene.markers, &self.scene.projection, &mut self.rng);
        ui.highlight_mode(mode);
        self.achievements.visit_mode(mode, ui);
    }

    /// Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: &str, ui: &mut dyn UiSurface) -> bool {
        match Mode::for_key(key) {
            Some(mode) => {
                self.set_mode(mode, ui);
                true
            }
            None => false,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = [width as f32, height as f32];
        self.camera.set_viewport(width, height);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, ui: &mut dyn UiSurface) {
        self.pointer = [x, y];
        if self.controls.is_dragging() {
            self.controls.drag_to(x, y);
        }
        let (ro, rd) = self.camera.screen_ray(x, y, self.viewport[0], self.viewport[1]);
        let hit = pick_marker(&self.scene.markers, ro, rd);
        if set_hover(&mut self.scene.markers, &mut self.hover, hit) {
            match hit.and_then(|i| self.records.get(i)) {
                Some(r) => ui.show_details(r),
                None => ui.hide_details(),
            }
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.press_origin = Some([x, y]);
        if self.flight.is_none() {
            self.controls.begin_drag(x, y);
        }
    }

    pub fn pointer_up(&mut self) {
        self.controls.end_drag();
    }

    pub fn wheel(&mut self, delta: f32) {
        if self.flight.is_none() {
            self.controls.zoom(delta);
        }
    }

    /// A click on the hovered marker: annotation, small burst, click count.
    pub fn click(&mut self, ui: &mut dyn UiSurface) {
        let moved = self
            .press_origin
            .take()
            .map(|[px, py]| (self.pointer[0] - px).hypot(self.pointer[1] - py))
            .unwrap_or(0.0);
        if moved > DRAG_CLICK_TOLERANCE_PX {
            return;
        }
        let Some(i) = self.hover else {
            return;
        };
        let (Some(m), Some(r)) = (self.scene.markers.get(i), self.records.get(i)) else {
            return;
        };
        let [x, y] = self
            .camera
            .world_to_screen(m.position, self.viewport[0], self.viewport[1])
            .unwrap_or(self.pointer);
        self.annotations.spawn(r, x, y);
        self.bursts.spawn_scaled(
            m.position,
            m.magnitude,
            m.depth_km,
            CLICK_BURST_SCALE,
            &mut self.rng,
        );
        log::info!("[click] {}", r.summary());
        if self.clicks.click() {
            self.achievements.trigger(Achievement::ClickStreak, ui);
        }
        ui.set_click_count(self.clicks.count());
    }

    /// Fly toward the hovered marker; the large burst fires on arrival.
    pub fn double_click(&mut self) {
        let Some(i) = self.hover else {
            return;
        };
        if let Some(m) = self.scene.markers.get(i) {
            self.controls.end_drag();
            self.flight = Some(CameraFlight::toward(i, &self.camera, m.position));
        }
    }

    /// One frame of simulation. `dt` is clamped to `MAX_FRAME_DT`.
    pub fn frame(&mut self, dt: f32, ui: &mut dyn UiSurface) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        if let Some(v) = self.counter.step(dt) {
            ui.set_counter(v);
        }
        if let Some(fact) = self.fun_facts.tick(dt) {
            ui.set_fun_fact(fact);
        }
        self.achievements.update(dt, ui);

        self.requests.clear();
        self.modes
            .update(dt, &mut self.scene.markers, &mut self.rng, &mut self.requests);
        for req in self.requests.drain(..) {
            if let Some(m) = self.scene.markers.get(req.marker) {
                self.bursts
                    .spawn(m.position, req.magnitude, m.depth_km, &mut self.rng);
            }
        }

        match self.flight.as_mut() {
            Some(flight) => {
                if flight.step(dt, &mut self.camera) {
                    let marker = flight.marker;
                    self.flight = None;
                    self.controls = OrbitControls::looking_from(self.camera.eye, self.camera.target);
                    if let Some(m) = self.scene.markers.get(marker) {
                        self.bursts.spawn_scaled(
                            m.position,
                            m.magnitude,
                            m.depth_km,
                            FLIGHT_BURST_SCALE,
                            &mut self.rng,
                        );
                    }
                }
            }
            None => {
                self.controls.update();
                self.controls.apply_to(&mut self.camera);
            }
        }

        self.bursts.update(dt);
        self.annotations.update(dt);
    }

    /// Markers, particles and stars as billboard instances for this frame.
    pub fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        out.clear();
        for s in &self.scene.stars {
            let b = s.brightness;
            out.push(SpriteInstance::new(s.position, STAR_SIZE, [b, b, b * 1.1], b));
        }
        for m in &self.scene.markers {
            out.push(SpriteInstance::new(
                m.position,
                m.display_size(),
                m.base_color(),
                m.display_opacity(),
            ));
        }
        self.bursts.push_instances(out);
    }
}
