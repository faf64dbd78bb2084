use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

pub mod animation;
pub mod config;
pub mod error;
pub mod foliage;
pub mod math;
pub mod mesh;
pub mod ornaments;
pub mod render;
pub mod scene;

use animation::TreeMode;
use config::{CameraParams, TreeConfig};
use error::TreeError;
use math::Vec3;
use render::RenderPipeline;
use scene::TreeScene;

/// Install the panic hook and route `log` to the browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).ok();
}

/// Orbit camera around the tree
#[derive(Debug, Clone, Copy)]
struct OrbitCamera {
    distance: f32,
    angle_x: f32,
    angle_y: f32,
    target: Vec3,
    auto_rotate: f32,
}

impl OrbitCamera {
    const MIN_DISTANCE: f32 = 8.0;
    const MAX_DISTANCE: f32 = 80.0;

    fn from_params(params: &CameraParams) -> Self {
        Self {
            distance: params.distance.clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE),
            angle_x: params.angle_x,
            angle_y: params.angle_y,
            target: params.target,
            auto_rotate: params.auto_rotate,
        }
    }

    fn position(&self) -> Vec3 {
        let (sin_x, cos_x) = self.angle_x.sin_cos();
        let (sin_y, cos_y) = self.angle_y.sin_cos();
        Vec3::new(
            self.target.x + self.distance * cos_x * sin_y,
            self.target.y + self.distance * sin_x,
            self.target.z + self.distance * cos_x * cos_y,
        )
    }

    fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.angle_y += delta_x * 0.01;
        self.angle_x = (self.angle_x + delta_y * 0.01)
            .clamp(-std::f32::consts::FRAC_PI_2 + 0.1, std::f32::consts::FRAC_PI_2 - 0.1);
    }

    fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta * 0.5).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }
}

/// Browser entry point: owns the scene and the renderer
#[wasm_bindgen]
pub struct FestiveTree {
    scene: TreeScene,
    pipeline: RenderPipeline,
    camera: OrbitCamera,
}

#[wasm_bindgen]
impl FestiveTree {
    /// Create a tree with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<FestiveTree, JsValue> {
        Self::with_config(canvas, TreeConfig::default())
    }

    /// Create a tree from a YAML configuration document
    #[wasm_bindgen]
    pub fn from_yaml(canvas: HtmlCanvasElement, yaml: &str) -> Result<FestiveTree, JsValue> {
        let config = TreeConfig::from_yaml(yaml)?;
        Self::with_config(canvas, config)
    }

    fn with_config(canvas: HtmlCanvasElement, config: TreeConfig) -> Result<FestiveTree, JsValue> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or_else(|| TreeError::gl("WebGL2 is not available"))?
            .dyn_into::<WebGl2RenderingContext>()?;

        let seed = config.seed.unwrap_or_else(random_seed);
        let scene = TreeScene::new(&config, seed);

        let mut pipeline = RenderPipeline::new(gl, width, height)?;
        pipeline.fov = config.camera.fov_degrees.to_radians();
        pipeline.upload_foliage(scene.foliage())?;
        pipeline.upload_ornaments(scene.ornaments())?;

        log::info!(
            "festive tree ready: {} foliage points, {} ornaments, seed {}",
            scene.foliage().len(),
            scene.ornaments().len(),
            seed
        );

        Ok(Self {
            scene,
            pipeline,
            camera: OrbitCamera::from_params(&config.camera),
        })
    }

    /// Advance the animation by `dt` seconds and draw a frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        let tick = self.scene.advance(dt);
        self.pipeline.update_ornaments(self.scene.ornaments());

        self.camera.angle_y += self.camera.auto_rotate * tick.delta;
        self.pipeline.camera_position = self.camera.position();
        self.pipeline.camera_target = self.camera.target;

        self.pipeline.render(self.scene.foliage().uniforms(tick));
    }

    #[wasm_bindgen]
    pub fn set_formed(&mut self, formed: bool) {
        self.scene.set_mode(TreeMode::from_formed(formed));
    }

    /// Flip between scattered and formed; returns whether the tree is now forming
    #[wasm_bindgen]
    pub fn toggle_mode(&mut self) -> bool {
        self.scene.toggle_mode().is_formed()
    }

    #[wasm_bindgen]
    pub fn is_formed(&self) -> bool {
        self.scene.mode().is_formed()
    }

    /// Smoothed foliage progress in [0, 1]
    #[wasm_bindgen]
    pub fn progress(&self) -> f32 {
        self.scene.foliage().progress()
    }

    #[wasm_bindgen]
    pub fn foliage_count(&self) -> usize {
        self.scene.foliage().len()
    }

    #[wasm_bindgen]
    pub fn ornament_count(&self) -> usize {
        self.scene.ornaments().len()
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) {
        self.pipeline.resize(width, height);
    }

    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.orbit(delta_x, delta_y);
    }

    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }
}

fn random_seed() -> u64 {
    let high = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let low = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (high << 32) | low
}
