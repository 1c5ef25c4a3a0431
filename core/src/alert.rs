//! Alert player contract
//!
//! Decoding and device output live outside the engine. The engine only needs
//! to restart the alert, start it, and ask whether it is still audible.

/// Playback primitive driven by the render loop and polled by the exit watcher.
///
/// `play` must not block: playback proceeds asynchronously and `is_playing`
/// reports `true` for exactly as long as the alert is audible.
pub trait AlertPlayer: Send + Sync {
    /// Move playback back to the start of the alert
    fn rewind(&self);

    /// Start playback. Safe to call right after `rewind`.
    fn play(&self);

    fn is_playing(&self) -> bool;
}
