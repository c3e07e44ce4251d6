//! Scripted in-memory `AudioBackend` for session and reporter tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::audio::{AudioBackend, BackendError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Load(PathBuf),
    Play,
    Stop,
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    loaded: Option<PathBuf>,
    playing: bool,
    cursor: usize,
}

/// Each loaded path plays back a fixed list of positions, one per
/// `position()` call, and stops being busy when the list runs out (unless the
/// path is marked endless, in which case the last position repeats forever).
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    positions: HashMap<PathBuf, Vec<Duration>>,
    endless: HashSet<PathBuf>,
    fail_load: HashSet<PathBuf>,
    fail_play: bool,
    fail_poll: HashSet<PathBuf>,
    inner: Mutex<Inner>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn positions(mut self, path: &str, secs: &[u64]) -> Self {
        self.positions.insert(
            PathBuf::from(path),
            secs.iter().map(|&s| Duration::from_secs(s)).collect(),
        );
        self
    }

    pub(crate) fn endless(mut self, path: &str, secs: u64) -> Self {
        self = self.positions(path, &[secs]);
        self.endless.insert(PathBuf::from(path));
        self
    }

    pub(crate) fn failing_load(mut self, path: &str) -> Self {
        self.fail_load.insert(PathBuf::from(path));
        self
    }

    pub(crate) fn failing_play(mut self) -> Self {
        self.fail_play = true;
        self
    }

    pub(crate) fn failing_poll(mut self, path: &str) -> Self {
        self.fail_poll.insert(PathBuf::from(path));
        self
    }

    pub(crate) fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn script_len(&self, path: &Path) -> usize {
        self.positions.get(path).map_or(0, Vec::len)
    }
}

impl AudioBackend for ScriptedBackend {
    fn load(&self, path: &Path) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Load(path.to_path_buf()));
        if self.fail_load.contains(path) {
            return Err(BackendError::Decode {
                path: path.to_path_buf(),
                message: "unrecognized format".into(),
            });
        }
        inner.loaded = Some(path.to_path_buf());
        inner.playing = false;
        inner.cursor = 0;
        Ok(())
    }

    fn play(&self) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Play);
        if self.fail_play {
            return Err(BackendError::Output("device went away".into()));
        }
        inner.playing = inner.loaded.is_some();
        Ok(())
    }

    fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Stop);
        inner.loaded = None;
        inner.playing = false;
        inner.cursor = 0;
    }

    fn is_busy(&self) -> Result<bool, BackendError> {
        let inner = self.inner.lock().unwrap();
        let Some(path) = inner.loaded.as_deref() else {
            return Ok(false);
        };
        if self.fail_poll.contains(path) {
            return Err(BackendError::Disconnected);
        }
        Ok(inner.playing && (self.endless.contains(path) || inner.cursor < self.script_len(path)))
    }

    fn position(&self) -> Result<Duration, BackendError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(path) = inner.loaded.clone() else {
            return Ok(Duration::ZERO);
        };
        let script = self.positions.get(&path).map(Vec::as_slice).unwrap_or(&[]);
        let position = script
            .get(inner.cursor.min(script.len().saturating_sub(1)))
            .copied()
            .unwrap_or_default();
        inner.cursor += 1;
        Ok(position)
    }
}
