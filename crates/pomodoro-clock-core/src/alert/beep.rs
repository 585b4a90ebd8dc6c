use std::io::Write;
use std::process::{Command, Stdio};

use super::{AlertSink, AudioClip};
use crate::error::AlertError;

/// External program that plays audio piped to its stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    program: String,
    args: Vec<String>,
}

impl PlayerCommand {
    /// Split a command line on whitespace. Blank input means "no player".
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Player used when the config does not name one.
    pub fn platform_default() -> &'static str {
        if cfg!(target_os = "linux") {
            "aplay -q -"
        } else {
            ""
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Launch the player and stream `clip` into it on a helper thread.
    ///
    /// Returns once the process is spawned; the write and the wait happen off
    /// the caller's thread.
    fn spawn(&self, mut clip: AudioClip) -> Result<(), AlertError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AlertError::Player {
                program: self.program.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let program = self.program.clone();
        std::thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                if let Err(e) = std::io::copy(&mut clip, &mut stdin) {
                    tracing::warn!(%program, error = %e, "audio player stopped reading");
                }
            }
            if let Err(e) = child.wait() {
                tracing::warn!(%program, error = %e, "audio player did not exit cleanly");
            }
        });
        Ok(())
    }
}

/// The production alert: one clip, loaded once, replayed from the start on
/// every phase change.
///
/// Without a clip or a player it falls back to the terminal bell.
#[derive(Debug, Clone)]
pub struct BeepAlert {
    clip: Option<AudioClip>,
    player: Option<PlayerCommand>,
}

impl BeepAlert {
    pub fn new(clip: Option<AudioClip>, player: Option<PlayerCommand>) -> Self {
        Self { clip, player }
    }

    /// Terminal bell only.
    pub fn bell() -> Self {
        Self::new(None, None)
    }

    pub fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    pub fn player(&self) -> Option<&PlayerCommand> {
        self.player.as_ref()
    }
}

impl AlertSink for BeepAlert {
    fn play(&mut self) -> Result<(), AlertError> {
        match (self.clip.as_mut(), self.player.as_ref()) {
            (Some(clip), Some(player)) => {
                clip.rewind();
                player.spawn(clip.clone())
            }
            _ => ring_bell(),
        }
    }
}

fn ring_bell() -> Result<(), AlertError> {
    let mut out = std::io::stdout().lock();
    out.write_all(b"\x07")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_program_and_args() {
        let cmd = PlayerCommand::parse("aplay -q -").unwrap();
        assert_eq!(cmd.program(), "aplay");
        assert_eq!(cmd.args(), ["-q", "-"]);
        assert!(PlayerCommand::parse("   ").is_none());
    }

    #[test]
    fn missing_player_is_reported() {
        let mut alert = BeepAlert::new(
            Some(AudioClip::from_bytes(vec![0u8; 16])),
            PlayerCommand::parse("pomodoro-clock-no-such-player-binary"),
        );
        match alert.play() {
            Err(AlertError::Player { program, .. }) => {
                assert_eq!(program, "pomodoro-clock-no-such-player-binary")
            }
            other => panic!("expected player error, got {other:?}"),
        }
    }

    #[test]
    fn bell_fallback_succeeds() {
        assert!(BeepAlert::bell().play().is_ok());
    }
}
