//! Interactive terminal session.
//!
//! One task owns the controller and multiplexes three inputs: command lines
//! from stdin, tick handles from the [`TokioTicker`] and Ctrl-C. Nothing else
//! touches controller state.

use std::io::Write;

use pomodoro_clock_core::alert::{AlertSink, BeepAlert, SilentAlert};
use pomodoro_clock_core::{
    AudioClip, ClockView, Config, Control, SystemClock, TimerController, TokioTicker,
    BEEP_SOUND_URL,
};
use tokio::io::{AsyncBufReadExt, BufReader};

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(config))
}

/// Build the alert once. A failed download degrades to the terminal bell.
async fn load_alert(config: &Config) -> Box<dyn AlertSink> {
    if !config.alert.enabled {
        tracing::info!("alerts disabled");
        return Box::new(SilentAlert);
    }
    let player = config.alert.player_command();
    if player.is_none() {
        return Box::new(BeepAlert::bell());
    }
    match AudioClip::fetch(BEEP_SOUND_URL, config.alert.fetch_timeout()).await {
        Ok(clip) => Box::new(BeepAlert::new(Some(clip), player)),
        Err(e) => {
            tracing::warn!(error = %e, "alert sound unavailable, using terminal bell");
            Box::new(BeepAlert::bell())
        }
    }
}

async fn session(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let alert = load_alert(config).await;
    let (ticker, mut ticks) = TokioTicker::new();
    let mut timer = TimerController::new(SystemClock, ticker, alert)
        .with_poll_interval(config.timer.poll_interval());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    println!("{}", ClockView::from_controller(&timer));
    println!("{}", Control::help());

    loop {
        tokio::select! {
            Some(handle) = ticks.recv() => {
                let events = timer.on_tick(handle);
                if !events.is_empty() {
                    let view = ClockView::from_controller(&timer);
                    if events.iter().any(|e| e.is_phase_change()) {
                        println!();
                        println!("{}", view.phase_label);
                    }
                    print!("\r{}  ", view.status_line());
                    stdout.flush()?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if matches!(input, "q" | "quit" | "exit") {
                    break;
                }
                match input.parse::<Control>() {
                    Ok(control) => {
                        if control.dispatch(&mut timer).is_none() {
                            tracing::debug!(?control, "control had no effect");
                        }
                        println!("{}", ClockView::from_controller(&timer));
                    }
                    Err(e) => println!("{e}\n{}", Control::help()),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    // Dropping the controller cancels the live registration.
    drop(timer);
    Ok(())
}
