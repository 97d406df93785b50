//! Fringe Pattern Projector
//!
//! Entry point for the fringe-projector application.

use fringe_projector::config::FringeConfig;
use fringe_projector::display::FringeApp;
use fringe_projector::input::read_interval;
use winit::event_loop::EventLoop;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Fringe Projector starting...");

    let config = match FringeConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            return;
        }
    };

    let interval = if config.prompt_for_interval {
        let stdin = std::io::stdin();
        read_interval(&mut stdin.lock(), &mut std::io::stdout(), config.interval())
    } else {
        config.interval()
    };
    log::info!("Display interval: {:.3} seconds", interval.as_secs_f64());

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    let mut app = FringeApp::new(config, interval);

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }

    if let Some(e) = app.take_error() {
        log::error!("Run ended with error: {}", e);
    }
    if let Some(state) = app.state() {
        log::info!("Final state: {}", state);
    }
    log::info!("Fringe Projector exiting");
}
