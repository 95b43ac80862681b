//! Groundfire entry point
//!
//! Runs the simulation core headless: the autopilot stands in for the input
//! device and a logging presenter stands in for the renderer. Both sit
//! behind the same collaborator traits a real frontend would implement.

use log::info;
use rand::Rng;

use groundfire::autopilot::Autopilot;
use groundfire::consts::FRAME_RATE;
use groundfire::session::{FrameSnapshot, Presenter, SessionController, SystemClock};
use groundfire::sim::SessionPhase;

/// Presents frames as log lines: a status line once per second and every
/// terminal frame.
struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        match frame.phase {
            SessionPhase::Won => {
                info!("YOU WIN! score={}", frame.avatar.score);
            }
            SessionPhase::Lost => {
                info!("GAME OVER! score={}", frame.avatar.score);
            }
            SessionPhase::Active => {
                if frame.frame % FRAME_RATE as u64 == 0 {
                    let reload = if frame.avatar.reloading {
                        format!(" (reloading: {:.1}s)", frame.avatar.reload_remaining)
                    } else {
                        String::new()
                    };
                    info!(
                        "score={} ammo={}/14{} opponents={} shots={}",
                        frame.avatar.score,
                        frame.avatar.ammo,
                        reload,
                        frame.remaining,
                        frame.shots.len()
                    );
                }
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed: u64 = rand::rng().random();
    info!("starting with master seed {seed}");

    let mut controller = SessionController::new(
        seed,
        SystemClock::new(),
        Autopilot::new(3),
        LogPresenter,
    );
    let completed = controller.run();
    info!("done: {completed} sessions played");
}
