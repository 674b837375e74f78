//! Coinfall entry point
//!
//! Native: runs a scene headless at 60 Hz with synthetic clicks and logs a
//! summary. The web build is driven from JS through `coinfall::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use coinfall::audio::LogBackend;
    use coinfall::feedback::Feedback;
    use coinfall::sim::{SceneConfig, SceneKind, SimEvent};
    use coinfall::{Scene, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;

    #[derive(Parser, Debug)]
    #[command(name = "coinfall")]
    #[command(about = "Headless coin physics toys (lava lamp, Galton board)")]
    #[command(version)]
    struct Args {
        /// Scene to run: lava | galton
        #[arg(default_value = "galton")]
        scene: String,

        /// Simulated seconds
        #[arg(short, long, default_value = "30")]
        seconds: f32,

        /// Seconds between synthetic clicks (0 disables them)
        #[arg(short, long, default_value = "2")]
        click_every: f32,

        /// Fixed RNG seed for a repeatable run
        #[arg(long)]
        seed: Option<u64>,

        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();

        let Some(kind) = SceneKind::from_str(&args.scene) else {
            log::error!("Unknown scene '{}' (expected lava or galton)", args.scene);
            std::process::exit(2);
        };
        let settings = args
            .settings
            .as_ref()
            .map(|path| Settings::load_or_default(path))
            .unwrap_or_default();
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Coinfall (native) starting: {} for {}s, seed {}", kind.as_str(), args.seconds, seed);

        let mut scene = Scene::with_rng(SceneConfig::for_kind(kind), Pcg32::seed_from_u64(seed));
        let mut feedback = Feedback::new(kind, LogBackend::new(), &settings);
        // Separate stream so clicks and sparkles don't perturb the physics RNG
        let mut fx_rng = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);

        let frames = (args.seconds.max(0.0) / FRAME_DT).round() as u64;
        let click_frames = if args.click_every > 0.0 {
            ((args.click_every / FRAME_DT).round() as u64).max(1)
        } else {
            0
        };

        let mut totals = Totals::default();
        let events = scene.start();
        totals.count(&events);
        feedback.dispatch(&events, &mut fx_rng);

        for frame in 1..=frames {
            let mut events = scene.frame(FRAME_DT);
            if click_frames > 0 && frame % click_frames == 0 {
                let point = synthetic_click(&scene, frame / click_frames);
                let (_, pointer_events) = scene.pointer_down(point);
                events.extend(pointer_events);
            }
            totals.count(&events);
            feedback.dispatch(&events, &mut fx_rng);
            feedback.update(FRAME_DT);
        }

        scene.stop();
        feedback.shutdown();

        let state = scene.state();
        log::info!(
            "Done: score {}, {} spawned, {} hits, {} captures, {} tilts, {} coins active, {} audio cues",
            scene.score(),
            totals.spawned,
            totals.hits,
            totals.captured,
            totals.tilts,
            state.active_count(),
            feedback.audio().backend().played()
        );
        if !state.bins.is_empty() {
            let counts: Vec<String> = state.bins.iter().map(|b| b.count.to_string()).collect();
            log::info!("Bin counts: [{}]", counts.join(", "));
        }
        for platform in scene.board().platforms.iter().filter(|p| p.is_tiltable()) {
            log::info!("Platform {} tilt {:.2}", platform.id, platform.tilt());
        }
    }

    /// Round-robin target: a coin, a platform, or empty space
    fn synthetic_click(scene: &Scene<Pcg32>, n: u64) -> Option<Vec3> {
        let state = scene.state();
        let board = scene.board();
        match n % 3 {
            0 => state.coins.iter().find(|c| c.active).map(|c| c.pos),
            1 => {
                let tiltable: Vec<_> = board.platforms.iter().filter(|p| p.is_tiltable()).collect();
                if tiltable.is_empty() {
                    Some(Vec3::new(0.0, 9.0, 0.0))
                } else {
                    let platform = tiltable[(n as usize / 3) % tiltable.len()];
                    Some(platform.pos)
                }
            }
            _ => Some(Vec3::new(-4.0, 9.5, 0.0)),
        }
    }

    #[derive(Default)]
    struct Totals {
        spawned: usize,
        hits: usize,
        captured: usize,
        tilts: usize,
    }

    impl Totals {
        fn count(&mut self, events: &[SimEvent]) {
            for event in events {
                match event {
                    SimEvent::Spawned { .. } => self.spawned += 1,
                    SimEvent::Hit { .. } => self.hits += 1,
                    SimEvent::Captured { .. } => self.captured += 1,
                    SimEvent::PlatformTilted { .. } => self.tilts += 1,
                    SimEvent::BackgroundStarted => {}
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is coinfall::web::init, this is just to satisfy the compiler
}
