//! HUD coordinator.
//!
//! Mirrors the submarine vitals into two fill bars, counts fish, owns the
//! win/lose panels and the out-of-time warning. Gameplay only reads
//! [`Hud::is_game_over`] / [`Hud::is_game_won`] and calls the one-way update
//! methods. Audio and game events are buffered until the engine drains them.

use nautic_core::config::{HudConfig, SoundClip};
use nautic_core::events::{AudioEvent, GameEvent};
use nautic_core::state::{BarView, HudView};

use crate::vitals::VitalsObserver;

pub struct Hud {
    config: HudConfig,
    health_bar: BarView,
    time_bar: BarView,
    fish_count: u32,
    game_over: bool,
    game_won: bool,
    warning_visible: bool,
    warning_alarm: bool,
    ambient_playing: bool,
    controls_enabled: bool,
    volume: f32,
    /// Last maxima seen by the bar updates, used for the reset read-out.
    last_max_health: f32,
    last_max_time: f32,
    audio_events: Vec<AudioEvent>,
    game_events: Vec<GameEvent>,
}

impl Hud {
    pub fn new(config: HudConfig) -> Self {
        let volume = config.volume.clamp(0.0, 1.0);
        let mut hud = Self {
            config,
            health_bar: BarView::default(),
            time_bar: BarView::default(),
            fish_count: 0,
            game_over: false,
            game_won: false,
            warning_visible: false,
            warning_alarm: false,
            ambient_playing: false,
            controls_enabled: false,
            volume,
            last_max_health: 100.0,
            last_max_time: 0.0,
            audio_events: Vec::new(),
            game_events: Vec::new(),
        };
        hud.reset_ui();
        hud
    }

    // --- Queries ---

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_game_won(&self) -> bool {
        self.game_won
    }

    /// Either panel is up.
    pub fn round_over(&self) -> bool {
        self.game_over || self.game_won
    }

    /// The on-screen joystick exists and is accepting input.
    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn fish_count(&self) -> u32 {
        self.fish_count
    }

    pub fn total_fish_needed(&self) -> u32 {
        self.config.total_fish_needed
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn warning_active(&self) -> bool {
        self.warning_alarm
    }

    pub fn ambient_playing(&self) -> bool {
        self.ambient_playing
    }

    pub fn view(&self) -> HudView {
        HudView {
            health: self.health_bar.clone(),
            time: self.time_bar.clone(),
            fish_count: self.fish_count,
            fish_needed: self.config.total_fish_needed,
            fish_text: self.fish_text(),
            warning_visible: self.warning_visible,
            warning_alarm: self.warning_alarm,
            game_over_panel: self.game_over,
            win_panel: self.game_won,
            controls_enabled: self.controls_enabled,
            volume: self.volume,
        }
    }

    pub fn take_audio_events(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.audio_events)
    }

    pub fn take_game_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.game_events)
    }

    /// Record a gameplay milestone raised outside the HUD (mines, bubbles).
    pub fn push_game_event(&mut self, event: GameEvent) {
        self.game_events.push(event);
    }

    /// Emit a one-shot sound at the session volume. Missing clips are skipped.
    pub fn play_sound(&mut self, clip: Option<&SoundClip>) {
        if let Some(clip) = clip {
            self.audio_events.push(AudioEvent::Play {
                clip: clip.name.clone(),
                volume: self.volume,
            });
        }
    }

    // --- Updates ---

    pub fn update_health(&mut self, current: f32, max: f32) {
        let current = current.max(0.0);
        let fraction = fraction(current, max);
        self.last_max_health = max;
        self.health_bar = BarView {
            fill: fraction,
            color: self.config.min_color.lerp(self.config.max_color, fraction),
            text: format!("{}%", current.ceil() as i32),
        };
    }

    pub fn update_time(&mut self, current: f32, max: f32) {
        let current = current.max(0.0);
        let fraction = fraction(current, max);
        self.last_max_time = max;

        if current <= 0.0 && !self.round_over() {
            self.start_warning();
        } else {
            self.stop_warning();
        }

        self.time_bar = BarView {
            fill: fraction,
            color: self.config.min_color.lerp(self.config.max_color, fraction),
            text: format!("{}s", current.ceil() as i32),
        };
    }

    /// Count one collected fish; reaching the target wins the round.
    /// Ignored once the round is over.
    pub fn increment_fish_count(&mut self) {
        if self.round_over() {
            return;
        }
        self.fish_count += 1;
        self.game_events.push(GameEvent::FishCollected {
            count: self.fish_count,
        });
        if self.fish_count >= self.config.total_fish_needed {
            self.show_win_panel();
        }
    }

    pub fn show_game_over_panel(&mut self) {
        if self.round_over() {
            return;
        }
        self.game_over = true;
        log::info!("game over");
        self.game_events.push(GameEvent::GameOver);
        self.end_round(self.config.game_over_sound.clone());
    }

    pub fn show_win_panel(&mut self) {
        if self.round_over() {
            return;
        }
        self.game_won = true;
        log::info!("level cleared with {} fish", self.fish_count);
        self.game_events.push(GameEvent::GameWon);
        self.end_round(self.config.win_sound.clone());
    }

    /// Inverse of both panel transitions: flags and counters cleared, controls
    /// back on, bars full. The ambient loop is left alone.
    pub fn reset_ui(&mut self) {
        self.game_over = false;
        self.game_won = false;
        self.fish_count = 0;
        self.controls_enabled = self.config.has_joystick;

        self.health_bar = BarView {
            fill: 1.0,
            color: self.config.max_color,
            text: format!("{}%", self.last_max_health.ceil() as i32),
        };
        self.time_bar = BarView {
            fill: 1.0,
            color: self.config.max_color,
            text: format!("{}s", self.last_max_time.ceil() as i32),
        };
        self.stop_warning();
    }

    /// Clamp and store the session volume. Loops that are playing follow it.
    pub fn set_sound_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        let playing = [
            (self.ambient_playing, &self.config.ambient_sound),
            (self.warning_alarm, &self.config.warning_sound),
        ];
        for (active, clip) in playing {
            if let (true, Some(clip)) = (active, clip) {
                self.audio_events.push(AudioEvent::SetLoopVolume {
                    clip: clip.name.clone(),
                    volume: self.volume,
                });
            }
        }
    }

    /// Start the background loop. No-op if it is already playing or the
    /// scene has no ambient clip.
    pub fn start_ambient(&mut self) {
        if self.ambient_playing {
            return;
        }
        if let Some(clip) = &self.config.ambient_sound {
            self.ambient_playing = true;
            self.audio_events.push(AudioEvent::StartLoop {
                clip: clip.name.clone(),
                volume: self.volume,
            });
        }
    }

    pub fn stop_ambient(&mut self) {
        if !self.ambient_playing {
            return;
        }
        self.ambient_playing = false;
        if let Some(clip) = &self.config.ambient_sound {
            self.audio_events.push(AudioEvent::StopLoop {
                clip: clip.name.clone(),
            });
        }
    }

    fn end_round(&mut self, sting: Option<SoundClip>) {
        self.controls_enabled = false;
        self.play_sound(sting.as_ref());
        self.stop_warning();
    }

    fn start_warning(&mut self) {
        if !self.warning_alarm {
            self.warning_alarm = true;
            if let Some(clip) = &self.config.warning_sound {
                self.audio_events.push(AudioEvent::StartLoop {
                    clip: clip.name.clone(),
                    volume: self.volume,
                });
            }
        }
        self.warning_visible = self.config.has_warning_image;
    }

    fn stop_warning(&mut self) {
        if self.warning_alarm {
            self.warning_alarm = false;
            if let Some(clip) = &self.config.warning_sound {
                self.audio_events.push(AudioEvent::StopLoop {
                    clip: clip.name.clone(),
                });
            }
        }
        self.warning_visible = false;
    }

    fn fish_text(&self) -> String {
        format!("{}/{}", self.fish_count, self.config.total_fish_needed)
    }
}

impl VitalsObserver for Hud {
    fn vitals_changed(&mut self, health: f32, max_health: f32, time: f32, max_time: f32) {
        self.update_health(health, max_health);
        self.update_time(time, max_time);
    }

    fn vitals_depleted(&mut self) {
        self.show_game_over_panel();
    }
}

/// `current / max` clamped to `[0, 1]`, zero for a non-positive max.
fn fraction(current: f32, max: f32) -> f32 {
    if max > 0.0 {
        (current / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
