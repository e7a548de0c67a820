//! Sound cue direction
//!
//! Maps game events to play/stop commands. Playback itself lives behind the
//! [`AudioSink`] trait so the simulation never depends on an audio backend;
//! a failing sink is logged and otherwise ignored.

use std::fmt;

use crate::config::Config;
use crate::sim::GameEvent;

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Run begins
    Begin,
    /// Ambient title sound, played once at boot
    Galaxy,
    /// Looping music during a run
    Music,
    /// Crash impact
    GameoverImpact,
    /// Voice line after the game-over delay
    GameoverVoice,
    /// Run restarted
    Restart,
}

impl Cue {
    /// Mix level before the configured volumes are applied
    pub fn base_volume(&self) -> f32 {
        match self {
            Cue::Begin | Cue::Galaxy | Cue::GameoverVoice | Cue::Restart => 0.25,
            Cue::GameoverImpact => 0.6,
            Cue::Music => 1.0,
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, Cue::Music)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cue::Begin => "begin",
            Cue::Galaxy => "galaxy",
            Cue::Music => "music1",
            Cue::GameoverImpact => "gameover_impact",
            Cue::GameoverVoice => "gameover_voice",
            Cue::Restart => "restart",
        }
    }
}

/// Playback failure reported by a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No device or context is available
    Unavailable,
    /// The cue's asset failed to load
    MissingAsset(&'static str),
    Backend(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "audio output unavailable"),
            AudioError::MissingAsset(name) => write!(f, "missing sound asset `{name}`"),
            AudioError::Backend(msg) => write!(f, "audio backend error: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Audio backend
pub trait AudioSink {
    fn play(&mut self, cue: Cue, volume: f32) -> Result<(), AudioError>;
    fn stop(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// Logs commands instead of playing them
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: Cue, volume: f32) -> Result<(), AudioError> {
        log::info!("play {} at {:.2}", cue.name(), volume);
        Ok(())
    }

    fn stop(&mut self, cue: Cue) -> Result<(), AudioError> {
        log::info!("stop {}", cue.name());
        Ok(())
    }
}

/// Turns game events into cue commands on a sink
pub struct AudioDirector<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioDirector<S> {
    pub fn new(sink: S, config: &Config) -> Self {
        Self {
            sink,
            master_volume: config.master_volume.clamp(0.0, 1.0),
            sfx_volume: config.sfx_volume.clamp(0.0, 1.0),
            music_volume: config.music_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Volume a cue is played at
    pub fn effective_volume(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if cue.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        cue.base_volume() * self.master_volume * channel
    }

    /// Title screen ambience
    pub fn on_boot(&mut self) {
        self.play(Cue::Galaxy);
    }

    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started => {
                self.play(Cue::Begin);
                self.play(Cue::Music);
            }
            GameEvent::Crashed { .. } => {
                self.stop(Cue::Music);
                self.play(Cue::GameoverImpact);
            }
            GameEvent::DelayedCrashCue => self.play(Cue::GameoverVoice),
            GameEvent::Restarted => {
                self.play(Cue::Restart);
                self.play(Cue::Music);
            }
        }
    }

    pub fn handle_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.handle(event);
        }
    }

    fn play(&mut self, cue: Cue) {
        let volume = self.effective_volume(cue);
        if volume <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play(cue, volume) {
            log::warn!("Failed to play {}: {}", cue.name(), e);
        }
    }

    fn stop(&mut self, cue: Cue) {
        if let Err(e) = self.sink.stop(cue) {
            log::warn!("Failed to stop {}: {}", cue.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Command {
        Play(Cue, f32),
        Stop(Cue),
    }

    #[derive(Default)]
    struct Recorder(Vec<Command>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: Cue, volume: f32) -> Result<(), AudioError> {
            self.0.push(Command::Play(cue, volume));
            Ok(())
        }

        fn stop(&mut self, cue: Cue) -> Result<(), AudioError> {
            self.0.push(Command::Stop(cue));
            Ok(())
        }
    }

    struct Broken;

    impl AudioSink for Broken {
        fn play(&mut self, _cue: Cue, _volume: f32) -> Result<(), AudioError> {
            Err(AudioError::Unavailable)
        }

        fn stop(&mut self, cue: Cue) -> Result<(), AudioError> {
            Err(AudioError::MissingAsset(cue.name()))
        }
    }

    fn director() -> AudioDirector<Recorder> {
        AudioDirector::new(Recorder::default(), &Config::default())
    }

    #[test]
    fn test_event_to_cue_mapping() {
        let mut d = director();
        d.on_boot();
        d.handle_all(&[
            GameEvent::Started,
            GameEvent::Crashed { score: 4 },
            GameEvent::DelayedCrashCue,
            GameEvent::Restarted,
        ]);
        assert_eq!(
            d.sink().0,
            vec![
                Command::Play(Cue::Galaxy, 0.25),
                Command::Play(Cue::Begin, 0.25),
                Command::Play(Cue::Music, 1.0),
                Command::Stop(Cue::Music),
                Command::Play(Cue::GameoverImpact, 0.6),
                Command::Play(Cue::GameoverVoice, 0.25),
                Command::Play(Cue::Restart, 0.25),
                Command::Play(Cue::Music, 1.0),
            ]
        );
    }

    #[test]
    fn test_volumes_scale_by_channel() {
        let config = Config {
            master_volume: 0.5,
            music_volume: 0.5,
            sfx_volume: 1.0,
            ..Config::default()
        };
        let d = AudioDirector::new(Recorder::default(), &config);
        assert_eq!(d.effective_volume(Cue::Music), 0.25);
        assert_eq!(d.effective_volume(Cue::GameoverImpact), 0.3);
    }

    #[test]
    fn test_muted_plays_nothing_but_still_stops() {
        let mut d = director();
        d.set_muted(true);
        d.handle(&GameEvent::Started);
        d.handle(&GameEvent::Crashed { score: 0 });
        assert_eq!(d.sink().0, vec![Command::Stop(Cue::Music)]);
    }

    #[test]
    fn test_failing_sink_does_not_propagate() {
        let mut d = AudioDirector::new(Broken, &Config::default());
        d.on_boot();
        d.handle(&GameEvent::Started);
        d.handle(&GameEvent::Crashed { score: 1 });
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AudioError::MissingAsset("begin").to_string(),
            "missing sound asset `begin`"
        );
    }
}
