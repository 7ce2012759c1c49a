//! Plinko Core headless runner
//!
//! Drops a batch of balls on a seeded board with no UI and logs where they
//! landed. Useful for eyeballing payout statistics after tuning changes.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use clap::Parser;

    use plinko_core::consts::*;
    use plinko_core::settings::{PayoutRounding, Settings};
    use plinko_core::sim::{ManualClock, PrizeTable, RiskLevel, Simulation};

    #[derive(Parser, Debug)]
    #[command(name = "plinko-core", about = "Run seeded Plinko drops headlessly")]
    struct Args {
        /// Number of balls to drop
        #[arg(long, default_value_t = 100)]
        drops: u32,
        /// Risk row: low, medium or high
        #[arg(long, default_value = "high")]
        risk: String,
        /// Bet per ball
        #[arg(long)]
        bet: Option<f64>,
        /// RNG seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
        /// JSON settings override
        #[arg(long)]
        config: Option<PathBuf>,
        /// Payout rounding: fractional or whole
        #[arg(long)]
        payout: Option<String>,
        #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
        width: f32,
        #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
        height: f32,
        /// Frames allowed per drop before its ball is written off
        #[arg(long, default_value_t = 5000)]
        max_frames: usize,
    }

    fn load_settings(args: &Args) -> Result<Settings> {
        let mut settings = match &args.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Settings::from_json(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Settings::default(),
        };
        if let Some(seed) = args.seed {
            settings.seed = seed;
        }
        if let Some(payout) = &args.payout {
            settings.payout_rounding = PayoutRounding::from_str(payout)
                .with_context(|| format!("unknown payout rounding '{}'", payout))?;
        }
        log::debug!("Effective settings:\n{}", settings.to_json()?);
        Ok(settings)
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        let risk: RiskLevel = args.risk.parse()?;
        let settings = load_settings(&args)?;
        let cooldown = Duration::from_millis(settings.drop_cooldown_ms);

        log::info!("Plinko core (native) starting with seed {}", settings.seed);

        let clock = ManualClock::new();
        let mut sim = Simulation::with_clock(settings, clock.clone());
        sim.on_resize(args.width, args.height)
            .with_context(|| format!("board {}x{}", args.width, args.height))?;
        if let Some(bet) = args.bet {
            sim.set_bet(bet).context("setting bet")?;
        }

        let starting_balance = sim.balance();
        let mut histogram = [0u32; PRIZE_SLOT_COUNT];
        let mut dropped = 0u32;
        let mut stuck = 0u32;
        let mut lost = 0u32;

        for _ in 0..args.drops {
            if let Err(err) = sim.try_drop_ball(risk) {
                log::warn!("Stopping after {} drops: {}", dropped, err);
                break;
            }
            dropped += 1;

            // One ball at a time keeps the histogram attributable
            for report in sim.run_until_idle(args.max_frames) {
                for exit in report.exits() {
                    histogram[exit.slot] += 1;
                    if exit.stuck {
                        stuck += 1;
                    }
                }
            }
            if sim.is_running() {
                // Stuck-ball limit disabled or above --max-frames: write the
                // ball off by rebuilding the same board
                log::warn!(
                    "Drop {} did not leave the board within {} frames",
                    dropped,
                    args.max_frames
                );
                lost += 1;
                sim.on_resize(args.width, args.height)?;
            }
            clock.advance(cooldown);
        }

        let multipliers = PrizeTable::multipliers(risk);
        for (slot, count) in histogram.iter().enumerate() {
            log::info!("slot {:>2} (x{:<5}) {}", slot, multipliers[slot], count);
        }
        if stuck > 0 || lost > 0 {
            log::warn!(
                "{} balls settled in place after wedging, {} written off",
                stuck,
                lost
            );
        }
        log::info!(
            "{} drops at {} risk: balance {} -> {}",
            dropped,
            risk,
            starting_balance,
            sim.balance()
        );

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::wasm_start`, this is just to satisfy the compiler
}
