use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use super::backend::AudioBackend;
use super::error::BackendError;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, Status};

/// `AudioBackend` backed by a `rodio` sink living on its own thread.
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioBackend {
    /// Open the default output device. Fails when there is none.
    pub fn new() -> Result<Self, BackendError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let audio_handle = spawn_audio_thread(rx, ready_tx);

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = audio_handle.join();
                return Err(e);
            }
            Err(_) => return Err(BackendError::Disconnected),
        }

        Ok(Self {
            tx,
            join: Mutex::new(Some(audio_handle)),
        })
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), BackendError> {
        self.tx.send(cmd).map_err(|_| BackendError::Disconnected)
    }

    fn status(&self) -> Result<Status, BackendError> {
        let (reply, rx) = mpsc::channel();
        self.send(AudioCmd::Status { reply })?;
        rx.recv().map_err(|_| BackendError::Disconnected)
    }

    /// Fade out whatever is playing, stop the audio thread and wait for it.
    /// Safe to call more than once.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
                debug!("audio thread joined");
            }
        }
    }
}

impl AudioBackend for RodioBackend {
    fn load(&self, path: &Path) -> Result<(), BackendError> {
        let (reply, rx) = mpsc::channel();
        self.send(AudioCmd::Load {
            path: path.to_path_buf(),
            reply,
        })?;
        rx.recv().map_err(|_| BackendError::Disconnected)?
    }

    fn play(&self) -> Result<(), BackendError> {
        self.send(AudioCmd::Play)
    }

    fn stop(&self) {
        let _ = self.send(AudioCmd::Stop);
    }

    fn is_busy(&self) -> Result<bool, BackendError> {
        self.status().map(|s| s.busy)
    }

    fn position(&self) -> Result<Duration, BackendError> {
        self.status().map(|s| s.position)
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.quit_softly(Duration::ZERO);
    }
}
