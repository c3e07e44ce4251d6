use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::error::BackendError;
use super::sink::create_sink;
use super::types::{AudioCmd, Status};

/// Spawn the thread that owns the output stream and the current sink.
///
/// `ready` receives exactly one message: `Ok(())` once the output device is
/// open, or the error that prevented opening it (the thread then exits).
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    ready: Sender<Result<(), BackendError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(BackendError::Output(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut sink: Option<Sink> = None;

        while let Ok(cmd) = rx.recv() {
            match cmd {
                AudioCmd::Load { path, reply } => {
                    // Never keep two tracks loaded.
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    let result = create_sink(&stream, &path).map(|new_sink| {
                        sink = Some(new_sink);
                    });
                    if let Err(ref e) = result {
                        warn!(error = %e, "load failed");
                    }
                    let _ = reply.send(result);
                }
                AudioCmd::Play => {
                    if let Some(s) = sink.as_ref() {
                        s.play();
                    }
                }
                AudioCmd::Stop => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                }
                AudioCmd::Status { reply } => {
                    let status = sink
                        .as_ref()
                        .map(|s| Status {
                            busy: !s.empty(),
                            position: s.get_pos(),
                        })
                        .unwrap_or_default();
                    let _ = reply.send(status);
                }
                AudioCmd::Quit { fade_out_ms } => {
                    if let Some(s) = sink.take() {
                        fade_out_sink(&s, fade_out_ms);
                        s.stop();
                    }
                    break;
                }
            }
        }
        debug!("audio thread exiting");
    })
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 || sink.is_paused() || sink.empty() {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
