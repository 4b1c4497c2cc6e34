//! Cerebral Flow Viz - Entry point
//!
//! Interactive viewer for synthetic hemodynamics on a cerebral vessel tree.
//!
//! CLI Usage:
//!   cargo run                          # Run the interactive viewer
//!   cargo run -- --mode wss            # Start in wall shear stress mode
//!   cargo run -- --diagnose            # Print engine diagnostics (no GUI)
//!   cargo run -- --config my/params    # Load parameters from a directory

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context as _, Result};
use cerebral_flow_viz::{
    color::{synthetic_scalar, VisualizationMode},
    config::Parameters,
    particles::wall_clock_seconds,
    render::{HudAction, RenderState},
    state::{FlowScene, FpsCounter, FrameMetrics, GeometryBackend, HeadlessBackend},
};
use winit::{
    event::{DeviceEvent, ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

/// Parsed command line
struct CliArgs {
    diagnose: bool,
    mode: Option<VisualizationMode>,
    config_dir: Option<PathBuf>,
}

/// Run engine diagnostics without GUI
fn run_diagnostics(params: Parameters) -> Result<()> {
    println!("=== Cerebral Flow Viz - Engine Diagnostics ===\n");

    let mut scene = FlowScene::with_seed(params, HeadlessBackend::new(), 0);
    let samples = scene.params().tube.segments;

    println!("--- Vessels ---");
    for vessel in scene.vessels() {
        let (r_min, r_max) = vessel.radius_range(samples);
        let pathology = vessel
            .pathology
            .map(|p| format!("{:?}", p))
            .unwrap_or_else(|| "none".to_string());
        println!(
            "{:>8}: base r={:.3}, r in [{:.3}, {:.3}], length~{:.2}, speed {:.2}, pathology: {}",
            vessel.name,
            vessel.base_radius,
            r_min,
            r_max,
            vessel.centerline.approximate_length(samples),
            vessel.flow_speed,
            pathology
        );
    }

    println!("\n--- Meshes ---");
    // Every step changes the mode, so every set_mode rebuilds
    let modes = std::iter::successors(Some(scene.mode().next()), |m| Some(m.next()))
        .take(VisualizationMode::ALL.len());
    for mode in modes {
        let start = Instant::now();
        scene.set_mode(mode);
        let elapsed = start.elapsed();
        let geometry = scene.geometry();
        let area: f32 = geometry.meshes().iter().map(|m| m.surface_area()).sum();
        println!(
            "{:>8}: {} tubes, {} vertices, {} triangles, area {:.2}, rebuilt in {:.2?}",
            mode.as_str(),
            geometry.meshes().len(),
            geometry.vertex_count(),
            geometry.triangle_count(),
            area,
            elapsed
        );
        for vessel in scene.vessels() {
            let (lo, hi) = (0..=samples)
                .map(|i| synthetic_scalar(i as f32 / samples as f32, &vessel.name, mode))
                .fold((f32::MAX, f32::MIN), |(lo, hi), s| (lo.min(s), hi.max(s)));
            println!("          {:>8} scalar in [{:.3}, {:.3}]", vessel.name, lo, hi);
        }
    }

    println!("\n--- Particles ---");
    let steps = 600;
    let clock = wall_clock_seconds();
    let start = Instant::now();
    let mut skipped = 0;
    for step in 0..steps {
        skipped += scene.particles_mut().advance(clock + step as f64 / 60.0);
    }
    let elapsed = start.elapsed();
    println!("Pool size: {}", scene.particles().len());
    println!(
        "Advanced {} frames in {:.2?} ({:.1} µs/frame), {} evaluations skipped",
        steps,
        elapsed,
        elapsed.as_secs_f64() * 1e6 / steps as f64,
        skipped
    );

    let rebuilds = scene.geometry().rebuild_count();
    let live = scene.geometry().live_resources();
    let metrics = FrameMetrics::capture(&scene, 0.0);
    println!("\n--- Resources ---");
    println!("Rebuilds: {}, live resources: {}", rebuilds, live);
    println!("{}", serde_json::to_string_pretty(&metrics)?);

    println!("\n=== Diagnostic Checks ===");
    if live == scene.vessels().len() {
        println!("✓ One live resource per vessel after {} rebuilds", rebuilds);
    } else {
        println!("⚠️  WARNING: {} live resources for {} vessels", live, scene.vessels().len());
    }
    if skipped == 0 {
        println!("✓ All particle evaluations succeeded");
    } else {
        println!("⚠️  WARNING: {} particle evaluations skipped", skipped);
    }

    scene.release();
    println!(
        "After release: {} live resources, {} bytes",
        scene.geometry().backend().live_count(),
        scene.geometry().backend().live_bytes()
    );

    Ok(())
}

/// Parse CLI arguments
fn parse_args() -> Result<CliArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        diagnose: false,
        mode: None,
        config_dir: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--diagnose" | "-d" => cli.diagnose = true,
            "--mode" | "-m" => {
                i += 1;
                let value = args.get(i).context("--mode expects a value")?;
                cli.mode = Some(value.parse()?);
            }
            "--config" | "-c" => {
                i += 1;
                let value = args.get(i).context("--config expects a directory")?;
                cli.config_dir = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                println!("Cerebral Flow Viz");
                println!();
                println!("Usage: cerebral-flow-viz [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --diagnose, -d       Print engine diagnostics (no GUI)");
                println!("  --mode, -m MODE      Start mode: velocity, pressure or wss");
                println!("  --config, -c DIR     Load parameters from DIR (default: data/parameters)");
                println!("  --help, -h           Show this help");
                std::process::exit(0);
            }
            other => log::warn!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    Ok(cli)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = parse_args()?;

    let mut params = match &cli.config_dir {
        Some(dir) => Parameters::load_from_dir(dir),
        None => Parameters::load_or_default(),
    };
    if let Some(mode) = cli.mode {
        params.view.initial_mode = mode;
    }

    if cli.diagnose {
        return run_diagnostics(params);
    }

    log::info!("Cerebral Flow Viz starting...");

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Cerebral Flow Viz - Hemodynamics")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .build(&event_loop)?,
    );

    let mut render_state = pollster::block_on(RenderState::new(window.clone(), &params.view))?;
    let mut scene = FlowScene::new(params, render_state.geometry_backend());

    // Input state
    let mut mouse_pressed = false;
    let mut fps = FpsCounter::default();

    log::info!("Controls:");
    log::info!("  Mouse drag: Orbit camera");
    log::info!("  Scroll: Zoom");
    log::info!("  1/2/3: Velocity / Pressure / Wall shear stress");
    log::info!("  Space: Toggle flow animation");
    log::info!("  P: Toggle particle flow");
    log::info!("  R: Reset camera");
    log::info!("  H: Toggle HUD, L: legend, S: stats, F1: help");
    log::info!("  Escape: Exit");

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => {
                if render_state.hud.handle_event(&window, &event) {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        scene.release();
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key_code),
                                state: ElementState::Pressed,
                                repeat: false,
                                ..
                            },
                        ..
                    } => match key_code {
                        KeyCode::Escape => {
                            scene.release();
                            elwt.exit();
                        }
                        KeyCode::Digit1 | KeyCode::Numpad1 => scene.set_mode(VisualizationMode::Velocity),
                        KeyCode::Digit2 | KeyCode::Numpad2 => scene.set_mode(VisualizationMode::Pressure),
                        KeyCode::Digit3 | KeyCode::Numpad3 => scene.set_mode(VisualizationMode::Wss),
                        KeyCode::Space => scene.set_animating(!scene.is_animating()),
                        KeyCode::KeyP => scene.set_show_particles(!scene.show_particles()),
                        KeyCode::KeyR => {
                            render_state.camera.reset();
                            log::info!("Camera reset");
                        }
                        KeyCode::KeyH => render_state.hud.toggle_hud(),
                        KeyCode::KeyL => render_state.hud.toggle_legend(),
                        KeyCode::KeyS => render_state.hud.toggle_stats(),
                        KeyCode::F1 => render_state.hud.toggle_help(),
                        _ => {}
                    },
                    WindowEvent::MouseInput { state, button, .. } => {
                        if button == MouseButton::Left {
                            mouse_pressed = state == ElementState::Pressed;
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let amount = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                        };
                        render_state.camera.zoom(amount);
                    }
                    WindowEvent::Resized(new_size) => {
                        render_state.resize(new_size);
                    }
                    WindowEvent::RedrawRequested => {
                        for action in render_state.hud.take_actions() {
                            match action {
                                HudAction::SetMode(mode) => scene.set_mode(mode),
                                HudAction::SetAnimating(on) => scene.set_animating(on),
                                HudAction::SetShowParticles(on) => scene.set_show_particles(on),
                                HudAction::ResetCamera => render_state.camera.reset(),
                            }
                        }

                        scene.frame(wall_clock_seconds());
                        let dt = render_state.update(&mut scene);
                        let metrics = FrameMetrics::capture(&scene, fps.tick(dt));

                        match render_state.render(&scene, &metrics) {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => render_state.resize(render_state.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                            Err(e) => log::error!("Render error: {:?}", e),
                        }
                    }
                    _ => {}
                }
            }
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } => {
                if mouse_pressed && !render_state.hud.wants_pointer_input() {
                    render_state
                        .camera
                        .orbit(delta.0 as f32 * 0.01, delta.1 as f32 * 0.01);
                }
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
