use std::time::Duration;

use clap::Args;
use pomodoro_clock_core::{
    Config, ManualClock, ManualTicker, Phase, RecordingAlert, TimerController,
};
use serde::Serialize;

#[derive(Args)]
pub struct SimulateArgs {
    /// Simulated seconds to run after starting
    #[arg(long)]
    pub seconds: u64,
    /// Work length in minutes (1-60)
    #[arg(long)]
    pub work_min: Option<u32>,
    /// Break length in minutes (1-60)
    #[arg(long)]
    pub break_min: Option<u32>,
}

#[derive(Serialize)]
struct SimulationReport {
    snapshot: pomodoro_clock_core::Event,
    alerts: usize,
    live_ticks: usize,
}

fn set_length(
    timer: &mut TimerController,
    phase: Phase,
    minutes: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let delta = i64::from(minutes) * 60 - i64::from(timer.length_secs(phase));
    if delta == 0 {
        return Ok(());
    }
    let delta = i32::try_from(delta)?;
    timer
        .adjust_length(phase, delta)
        .map(|_| ())
        .ok_or_else(|| format!("{phase} length must be between 1 and 60 minutes").into())
}

pub fn run(args: SimulateArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let clock = ManualClock::new(0);
    let ticker = ManualTicker::new();
    let alert = RecordingAlert::new();
    let mut timer = TimerController::new(clock.clone(), ticker.clone(), alert.clone())
        .with_poll_interval(config.timer.poll_interval());

    if let Some(minutes) = args.work_min {
        set_length(&mut timer, Phase::Work, minutes)?;
    }
    if let Some(minutes) = args.break_min {
        set_length(&mut timer, Phase::Break, minutes)?;
    }

    timer.start();
    let step = timer.poll_interval();
    let total = Duration::from_secs(args.seconds);
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        let dt = step.min(total - elapsed);
        clock.advance(dt);
        elapsed += dt;
        if let Some(handle) = timer.tick_handle() {
            for event in timer.on_tick(handle) {
                tracing::debug!(?event, "simulated tick");
            }
        }
    }

    let report = SimulationReport {
        snapshot: timer.snapshot(),
        alerts: alert.plays(),
        live_ticks: ticker.live_count(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
