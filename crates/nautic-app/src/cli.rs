//! Command-line arguments for the headless runner.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Longest run the runner agrees to, one day.
const MAX_RUN_SECS: f32 = 86_400.0;

#[derive(Debug, Parser)]
#[command(name = "aqua-nautic", version, about = "Plays Aqua Nautic headless with the autopilot", long_about = None)]
pub struct CliArgs {
    /// JSON game configuration. Built-in tuning when omitted.
    #[arg(value_name = "CONFIG.json")]
    pub config: Option<PathBuf>,
    /// Wall-clock seconds to play before giving up.
    #[arg(long, value_name = "SECONDS", default_value_t = 90.0)]
    pub seconds: f32,
    /// RNG seed. Same seed, same round.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl CliArgs {
    /// `--seconds` as a duration, clamped to `[0, one day]`. NaN runs for zero.
    pub fn run_duration(&self) -> Duration {
        let secs = if self.seconds.is_nan() {
            0.0
        } else {
            self.seconds.clamp(0.0, MAX_RUN_SECS)
        };
        Duration::from_secs_f32(secs)
    }
}
