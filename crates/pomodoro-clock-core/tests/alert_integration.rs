//! Integration tests for loading and playing the alert sound.

use std::io::Read;
use std::time::Duration;

use pomodoro_clock_core::alert::PlayerCommand;
use pomodoro_clock_core::{
    AlertError, AlertSink, AudioClip, BeepAlert, ManualClock, ManualTicker, Phase,
    TimerController,
};

const WAV: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

#[tokio::test]
async fn test_fetch_loads_clip_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/BeepSound.wav")
        .with_status(200)
        .with_header("content-type", "audio/wav")
        .with_body(WAV)
        .expect(1)
        .create_async()
        .await;

    let url = format!("{}/BeepSound.wav", server.url());
    let mut clip = AudioClip::fetch(&url, Duration::from_secs(5)).await.unwrap();
    assert_eq!(clip.len(), WAV.len());

    let mut first = Vec::new();
    clip.read_to_end(&mut first).unwrap();
    clip.rewind();
    let mut second = Vec::new();
    clip.read_to_end(&mut second).unwrap();
    assert_eq!(first, WAV);
    assert_eq!(second, WAV);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_reports_http_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/missing.wav")
        .with_status(404)
        .create_async()
        .await;

    let url = format!("{}/missing.wav", server.url());
    match AudioClip::fetch(&url, Duration::from_secs(5)).await {
        Err(AlertError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_rejects_malformed_url() {
    let err = AudioClip::fetch("not a url", Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, AlertError::InvalidUrl { .. }));
}

#[test]
fn test_broken_player_does_not_stop_phase_change() {
    let clock = ManualClock::new(0);
    let ticker = ManualTicker::new();
    let alert = BeepAlert::new(
        Some(AudioClip::from_bytes(WAV.to_vec())),
        PlayerCommand::parse("pomodoro-clock-missing-player"),
    );
    let mut timer = TimerController::new(clock.clone(), ticker.clone(), alert);
    for _ in 0..24 {
        timer.adjust_length(Phase::Work, -60);
    }
    timer.start();

    for _ in 0..(60_000 / 30) {
        clock.advance(Duration::from_millis(30));
        if let Some(handle) = timer.tick_handle() {
            timer.on_tick(handle);
        }
    }

    assert_eq!(timer.phase(), Phase::Break);
    assert_eq!(timer.remaining_secs(), 300);
    assert!(timer.is_running());
}

#[test]
fn test_beep_alert_keeps_one_clip() {
    let mut alert = BeepAlert::new(Some(AudioClip::from_bytes(WAV.to_vec())), None);
    assert!(alert.play().is_ok());
    assert!(alert.play().is_ok());
    let clip = alert.clip().unwrap();
    assert_eq!(clip.position(), 0);
    assert_eq!(clip.len(), WAV.len());
}

/// Wait until `path` holds at least `len` bytes, or give up after five seconds.
#[cfg(unix)]
fn wait_for_len(path: &std::path::Path, len: usize) -> Vec<u8> {
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    loop {
        let data = std::fs::read(path).unwrap_or_default();
        if data.len() >= len || std::time::Instant::now() > deadline {
            return data;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

#[cfg(unix)]
#[test]
fn test_player_receives_whole_clip_on_every_play() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("played.wav");
    let player = PlayerCommand::parse(&format!("tee -a {}", out.display())).unwrap();
    let mut alert = BeepAlert::new(Some(AudioClip::from_bytes(WAV.to_vec())), Some(player));

    alert.play().unwrap();
    assert_eq!(wait_for_len(&out, WAV.len()), WAV);

    alert.play().unwrap();
    let played = wait_for_len(&out, 2 * WAV.len());
    assert_eq!(played.len(), 2 * WAV.len());
    assert_eq!(&played[..WAV.len()], WAV);
    assert_eq!(&played[WAV.len()..], WAV);
    assert_eq!(alert.clip().unwrap().position(), 0);
}
