//! RoadRage - a small driving demo
//!
//! Runs a level headless: the avatar follows the level's input script while
//! civilians walk around and the camera orbits, and a status line is logged
//! periodically.

use roadrage::config::AppConfig;
use roadrage::systems::{avatar_status, camera_from_level, RenderSystem, SimulationSystem};
use roadrage_core::{Car, CarTuning, LevelTemplate, World};
use roadrage_input::{DriverController, InputScript};
use roadrage_render::Camera;

/// Main application state
struct App {
    world: World,
    camera: Camera,
    script: InputScript,
    simulation: SimulationSystem,
    render: RenderSystem,
}

impl App {
    fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let level = LevelTemplate::load(&config.level.path)?;

        let car = Car::new(config.car.to_limits(), CarTuning::default());
        let world = level.build(car);
        let camera = camera_from_level(&level.camera, &config.camera, config.aspect());

        if level.script.is_empty() {
            log::warn!("Level '{}' has no input script, the avatar will stand still", level.name);
        }

        let controller = DriverController::new(config.driver.to_settings());
        let simulation = SimulationSystem::new(config.simulation.clone(), controller);

        Ok(Self {
            world,
            camera,
            script: level.script,
            simulation,
            render: RenderSystem::new(),
        })
    }

    fn run(&mut self) {
        while !self.simulation.is_finished() {
            self.simulation.update(&mut self.world, &mut self.camera, &self.script);
            self.render.render_frame(&self.world, &self.camera);
        }

        log::info!(
            "Finished after {:.2}s, {} frames",
            self.simulation.clock().now(),
            self.render.frame_count()
        );
        if let Some(line) = avatar_status(&self.world) {
            log::info!("Final: {}", line);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("{}. Using defaults.", e);
        AppConfig::default()
    });

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.debug.log_level.as_str())).init();
    log::info!("Starting RoadRage");

    let mut app = App::new(&config)?;
    app.run();
    Ok(())
}
