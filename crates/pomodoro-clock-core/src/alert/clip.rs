use std::io::{self, Read};
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::AlertError;

/// The short beep played at the end of each phase.
pub const BEEP_SOUND_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/cdn/master/build/testable-projects-fcc/audio/BeepSound.wav";

/// Audio bytes plus a playback cursor.
///
/// Cloning is cheap: clones share the bytes and copy the cursor.
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Arc<[u8]>,
    position: usize,
}

impl AudioClip {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::from(bytes.into()),
            position: 0,
        }
    }

    /// Download the clip once. Non-success statuses are errors.
    pub async fn fetch(url: &str, timeout: Duration) -> Result<Self, AlertError> {
        let parsed = Url::parse(url).map_err(|source| AlertError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let fetch_err = |source: reqwest::Error| AlertError::Fetch {
            url: url.to_string(),
            source,
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(fetch_err)?;
        let resp = client.get(parsed).send().await.map_err(fetch_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AlertError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await.map_err(fetch_err)?;
        tracing::debug!(url, bytes = body.len(), "alert sound loaded");
        Ok(Self::from_bytes(body.to_vec()))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor back to the first byte.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl Read for AudioClip {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let rest = &self.data[self.position..];
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.position += n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_advances_and_rewind_restarts() {
        let mut clip = AudioClip::from_bytes(b"RIFFdata".to_vec());
        let mut head = [0u8; 4];
        clip.read_exact(&mut head).unwrap();
        assert_eq!(&head, b"RIFF");
        assert_eq!(clip.position(), 4);

        let mut rest = Vec::new();
        clip.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"data");
        assert_eq!(clip.read(&mut head).unwrap(), 0);

        clip.rewind();
        let mut all = Vec::new();
        clip.read_to_end(&mut all).unwrap();
        assert_eq!(all, b"RIFFdata");
    }

    #[test]
    fn clones_share_bytes_but_not_cursor() {
        let mut clip = AudioClip::from_bytes(vec![1, 2, 3]);
        let mut one = [0u8; 1];
        clip.read_exact(&mut one).unwrap();
        let mut copy = clip.clone();
        copy.rewind();
        assert_eq!(clip.position(), 1);
        assert_eq!(copy.position(), 0);
        assert_eq!(copy.len(), 3);
    }
}
