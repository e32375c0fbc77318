//! Vecmath Demo entry point
//!
//! The browser build is the library (`DemoHandle` / `mount`). Natively this
//! runs a scripted session on the headless surface and logs what the page
//! would show.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Vecmath Demo (native, headless) starting...");

    log_worked_examples();

    if let Err(e) = native::run_scripted_session(std::env::args().nth(1)) {
        log::error!("Session failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The page calls `mount` / `DemoHandle.start` exported by the library
}

/// The article's hand-worked numbers, recomputed
#[cfg(not(target_arch = "wasm32"))]
fn log_worked_examples() {
    use glam::Vec2;
    use vecmath_demo::sim::{angle_to, dot, lerp_vec, normalize, point_at_angle, rotate};

    let angle = angle_to(Vec2::new(2.0, 1.0), Vec2::new(5.0, 4.0));
    log::info!(
        "atan2: (2,1) -> (5,4) = {:.6} rad ({:.1} deg)",
        angle,
        angle.to_degrees()
    );

    let r = rotate(Vec2::new(1.5, 0.0), 90f32.to_radians(), None);
    log::info!("rotate (1.5, 0) by 90 deg = ({:.3}, {:.3})", r.x, r.y);

    log::info!(
        "dot (2,0)·(1,1) = {:.1}",
        dot(Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0))
    );

    let l = lerp_vec(Vec2::new(-2.5, -1.0), Vec2::new(2.5, 1.0), 0.3);
    log::info!("lerp (-2.5,-1) -> (2.5,1) at 0.3 = ({:.2}, {:.2})", l.x, l.y);

    let p = point_at_angle(Vec2::new(0.0, -14.0), 60f32.to_radians(), 3.0);
    log::info!("3 units at 60 deg from (0,-14) = ({:.2}, {:.2})", p.x, p.y);

    let n = normalize(Vec2::new(3.0, 4.0));
    let z = normalize(Vec2::ZERO);
    log::info!(
        "normalize (3,4) = ({:.1}, {:.1}); normalize (0,0) = ({}, {})",
        n.x,
        n.y,
        z.x,
        z.y
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::f32::consts::TAU;

    use vecmath_demo::renderer::HeadlessSurface;
    use vecmath_demo::{DemoConfig, Engine};

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// One scripted host event, or a pause measured in frames
    enum Step {
        Press(&'static str),
        Release(&'static str),
        /// Sweep the pointer once around the canvas center
        Sweep { radius: f32, frames: u32 },
        LeavePointer,
        Wait(u32),
    }

    const SCRIPT: &[Step] = &[
        Step::Wait(2),
        Step::Sweep {
            radius: 150.0,
            frames: 120,
        },
        Step::Press("KeyD"),
        Step::Wait(30),
        Step::Press("KeyW"),
        Step::Wait(30),
        Step::Release("KeyD"),
        Step::Press("KeyA"),
        Step::Wait(60),
        Step::Release("KeyW"),
        Step::Release("KeyA"),
        Step::LeavePointer,
        Step::Press("ArrowDown"),
        Step::Wait(45),
        Step::Release("ArrowDown"),
        Step::Wait(10),
    ];

    /// Drive the real engine through a WASD sequence and a pointer sweep.
    ///
    /// `config_path` optionally names a JSON config file.
    pub fn run_scripted_session(config_path: Option<String>) -> Result<(), Box<dyn Error>> {
        let json = config_path.map(std::fs::read_to_string).transpose()?;
        let config = DemoConfig::from_host(json.as_deref())?;

        let surface = HeadlessSurface::new(WIDTH, HEIGHT);
        let mut engine = Engine::start(surface, config, WIDTH as f32, HEIGHT as f32)?;

        let center = (WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);
        let mut now_ms = 0.0;
        let mut step_frame = |engine: &mut Engine<HeadlessSurface>| {
            let result = engine.tick(now_ms);
            now_ms += FRAME_MS;
            result
        };

        for step in SCRIPT {
            match *step {
                Step::Press(code) => {
                    engine.input_mut().key_down(code);
                }
                Step::Release(code) => {
                    engine.input_mut().key_up(code);
                }
                Step::Sweep { radius, frames } => {
                    for i in 0..frames {
                        let theta = TAU * i as f32 / frames as f32;
                        engine.input_mut().pointer_moved(
                            center.0 + radius * theta.cos(),
                            center.1 - radius * theta.sin(),
                        );
                        step_frame(&mut engine)?;
                    }
                }
                Step::LeavePointer => engine.input_mut().pointer_left(),
                Step::Wait(frames) => {
                    for _ in 0..frames {
                        step_frame(&mut engine)?;
                    }
                }
            }
        }

        let entity = engine.entity();
        log::info!(
            "Session done: {} frames, {:.2}s simulated, player at ({:.2}, {:.2}) facing {:.1} deg",
            engine.frames(),
            engine.elapsed(),
            entity.position.x,
            entity.position.y,
            entity.facing.to_degrees()
        );
        if let Some(surface) = engine.surface() {
            log::info!(
                "Last frame: {} vertices, {} readouts",
                surface.last_vertex_count,
                surface.last_readouts.len()
            );
        }
        for readout in engine.readouts() {
            log::info!("  {:>14}: {}", readout.key, readout.text);
        }

        engine.stop();
        Ok(())
    }
}
