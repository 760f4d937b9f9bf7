//! Submarine health/timer state machine.
//!
//! `Active` until health reaches zero, then `GameOver` until [`VitalState::reset`].
//! Every mutation pushes the new values to a [`VitalsObserver`]; the observer
//! never reads the state back.

use nautic_core::config::VitalsConfig;
use nautic_core::enums::VitalPhase;

/// Receiver of vital-state changes (the HUD in the running game).
pub trait VitalsObserver {
    /// Called after every mutation with the current and maximum values.
    fn vitals_changed(&mut self, health: f32, max_health: f32, time: f32, max_time: f32);

    /// Called exactly once per round, when health first reaches zero.
    fn vitals_depleted(&mut self);
}

#[derive(Debug, Clone)]
pub struct VitalState {
    max_health: f32,
    max_time: f32,
    damage_interval: f32,
    damage_amount: f32,
    health: f32,
    time: f32,
    /// Expired seconds since the last time-out damage.
    expiry_timer: f32,
    phase: VitalPhase,
}

impl VitalState {
    /// Build at full health and full time. Observers are not notified until the
    /// first mutation or [`VitalState::reset`].
    pub fn new(config: &VitalsConfig) -> Self {
        let max_health = config.max_health.max(0.0);
        let max_time = config.max_time.max(0.0);
        Self {
            max_health,
            max_time,
            damage_interval: config.damage_interval_secs,
            damage_amount: config.damage_amount,
            health: max_health,
            time: max_time,
            expiry_timer: 0.0,
            phase: VitalPhase::Active,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn time_left(&self) -> f32 {
        self.time
    }

    pub fn max_time(&self) -> f32 {
        self.max_time
    }

    pub fn phase(&self) -> VitalPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == VitalPhase::GameOver
    }

    pub fn is_depleted(&self) -> bool {
        self.health <= 0.0
    }

    /// Back to full health and time, `Active`, accumulator cleared.
    pub fn reset(&mut self, observer: &mut impl VitalsObserver) {
        self.health = self.max_health;
        self.time = self.max_time;
        self.expiry_timer = 0.0;
        self.phase = VitalPhase::Active;
        self.notify(observer);
    }

    /// Remove `damage` health. Ignored once the round is over or for
    /// non-finite input.
    pub fn take_damage(&mut self, damage: f32, observer: &mut impl VitalsObserver) {
        if self.is_game_over() || !damage.is_finite() {
            return;
        }
        self.health = (self.health - damage).clamp(0.0, self.max_health);
        self.notify(observer);
        self.check_depleted(observer);
    }

    /// Add `bonus` seconds to the clock; negative values are penalties.
    pub fn add_time(&mut self, bonus: f32, observer: &mut impl VitalsObserver) {
        if self.is_game_over() || !bonus.is_finite() {
            return;
        }
        self.time = (self.time + bonus).clamp(0.0, self.max_time);
        self.notify(observer);
    }

    /// Per-frame decay. The clock runs down first; once it is empty, every
    /// `damage_interval` seconds of expired time costs `damage_amount` health.
    pub fn tick(&mut self, dt: f32, observer: &mut impl VitalsObserver) {
        if self.is_game_over() || !(dt > 0.0) {
            return;
        }

        let mut expired = dt;
        if self.time > 0.0 {
            expired = (dt - self.time).max(0.0);
            self.time = (self.time - dt).max(0.0);
        }

        let mut time_out_damage = false;
        if self.time <= 0.0 && expired > 0.0 {
            self.expiry_timer += expired;
            if self.expiry_timer >= self.damage_interval {
                self.expiry_timer = 0.0;
                time_out_damage = true;
            }
        }

        if time_out_damage {
            log::debug!("clock expired, applying {} damage", self.damage_amount);
            // take_damage notifies and handles depletion.
            self.take_damage(self.damage_amount, observer);
        } else {
            self.notify(observer);
        }
    }

    fn check_depleted(&mut self, observer: &mut impl VitalsObserver) {
        if self.health <= 0.0 && !self.is_game_over() {
            self.phase = VitalPhase::GameOver;
            log::info!("submarine destroyed");
            observer.vitals_depleted();
        }
    }

    fn notify(&self, observer: &mut impl VitalsObserver) {
        observer.vitals_changed(self.health, self.max_health, self.time, self.max_time);
    }

    #[cfg(test)]
    pub(crate) fn set_expiry_timer(&mut self, secs: f32) {
        self.expiry_timer = secs;
    }
}
