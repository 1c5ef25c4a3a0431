//! Alert playback through rodio
//!
//! The alert file is read and test-decoded once at startup so a missing or
//! broken asset fails before the countdown starts. `OutputStream` is not
//! `Send`, so it lives on a parked audio thread for as long as the player
//! exists; the `Sink` is shared with the render thread and exit watcher.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use rodio::{Decoder, OutputStream, Sink};

use ding_core::AlertPlayer;
use ding_core::config::{AlertSettings, user_sounds_dir};

use crate::error::AudioError;

/// Directory name for sounds shipped alongside the binary
const BUNDLED_SOUNDS_DIR: &str = "audio";

/// Directories searched for alert sounds, user overrides first
pub fn sound_search_dirs(settings: &AlertSettings) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(user) = user_sounds_dir(settings) {
        dirs.push(user);
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir.join(BUNDLED_SOUNDS_DIR));
    }
    dirs.push(PathBuf::from(BUNDLED_SOUNDS_DIR));
    dirs
}

/// First existing `dir/name`, in search order
pub fn find_sound(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter().map(|dir| dir.join(name)).find(|path| path.is_file())
}

/// Resolve the alert file for the requested loudness
pub fn resolve_sound(settings: &AlertSettings, loud: bool) -> Result<PathBuf, AudioError> {
    let name = settings.sound_for(loud);
    let searched = sound_search_dirs(settings);
    find_sound(name, &searched).ok_or_else(|| AudioError::NotFound {
        name: name.to_string(),
        searched,
    })
}

/// Read an alert file and make sure it decodes
pub fn load_sound(path: &Path) -> Result<Arc<[u8]>, AudioError> {
    let bytes: Arc<[u8]> = std::fs::read(path)
        .map_err(|source| AudioError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .into();
    Decoder::new(Cursor::new(Arc::clone(&bytes))).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes)
}

/// Keeps the output stream's thread alive; dropping it releases the device.
struct StreamGuard {
    release: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        drop(self.release.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Open the default output device on a dedicated thread and hand back a sink.
fn open_output() -> Result<(Sink, StreamGuard), AudioError> {
    let (confirm_tx, confirm_rx) = mpsc::channel::<Result<Sink, AudioError>>();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let handle = thread::Builder::new()
        .name("ding-audio".to_string())
        .spawn(move || {
            let (_stream, stream_handle) = match OutputStream::try_default() {
                Ok(output) => output,
                Err(e) => {
                    let _ = confirm_tx.send(Err(AudioError::Device(e)));
                    return;
                }
            };
            match Sink::try_new(&stream_handle) {
                Ok(sink) => {
                    let _ = confirm_tx.send(Ok(sink));
                }
                Err(e) => {
                    let _ = confirm_tx.send(Err(AudioError::Sink(e)));
                    return;
                }
            }
            // Park until the player is dropped
            let _ = release_rx.recv();
        })
        .map_err(AudioError::Thread)?;

    let guard = StreamGuard {
        release: Some(release_tx),
        handle: Some(handle),
    };
    let sink = confirm_rx.recv().map_err(|_| AudioError::ThreadExited)??;
    Ok((sink, guard))
}

/// rodio-backed alert player
pub struct RodioPlayer {
    sink: Sink,
    sound: Arc<[u8]>,
    path: PathBuf,
    _stream: StreamGuard,
}

impl RodioPlayer {
    /// Load `path` and open the default output device. `volume` is 0-100.
    pub fn open(path: &Path, volume: u8) -> Result<Self, AudioError> {
        let sound = load_sound(path)?;
        let (sink, stream) = open_output()?;
        sink.set_volume(f32::from(volume.min(100)) / 100.0);
        tracing::info!(path = %path.display(), volume, "alert sound loaded");
        Ok(Self {
            sink,
            sound,
            path: path.to_path_buf(),
            _stream: stream,
        })
    }
}

impl AlertPlayer for RodioPlayer {
    fn rewind(&self) {
        if !self.sink.empty() {
            self.sink.stop();
        }
    }

    fn play(&self) {
        if self.sink.empty() {
            match Decoder::new(Cursor::new(Arc::clone(&self.sound))) {
                Ok(source) => self.sink.append(source),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "alert sound failed to decode");
                }
            }
        }
        self.sink.play();
    }

    fn is_playing(&self) -> bool {
        !self.sink.empty() && !self.sink.is_paused()
    }
}
