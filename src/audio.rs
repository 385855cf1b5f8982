//! Sound cues
//!
//! The simulation only emits `GameEvent`s; this module maps them to sound
//! effects. On the web they are synthesized with the Web Audio API. Playback
//! is best-effort: every failure is swallowed so a broken audio device can
//! never interrupt a tick.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Projectile fired
    Shoot,
    /// Enemy reached the hive
    HiveHit,
    /// Enemy destroyed
    EnemyKilled,
    /// Upgrade bought
    Purchase,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired { .. } => Some(SoundEffect::Shoot),
            GameEvent::HiveHit { .. } => Some(SoundEffect::HiveHit),
            GameEvent::EnemyKilled { .. } => Some(SoundEffect::EnemyKilled),
            GameEvent::UpgradePurchased { .. } => Some(SoundEffect::Purchase),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::EnemySpawned { .. } => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Shoot => self.play_shoot(ctx, vol),
                SoundEffect::HiveHit => self.play_hive_hit(ctx, vol),
                SoundEffect::EnemyKilled => self.play_enemy_killed(ctx, vol),
                SoundEffect::Purchase => self.play_purchase(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// One oscillator gliding `from` -> `to` Hz while fading out
        fn sweep(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            (from, to): (f32, f32),
            level: f32,
            duration: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration * 0.8)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration * 1.25).ok();
        }

        /// Honey blob leaving the hive - soft rising blip
        fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
            self.sweep(ctx, OscillatorType::Sine, (320.0, 640.0), vol * 0.25, 0.08);
        }

        /// Wasp stings the hive - low thump
        fn play_hive_hit(&self, ctx: &AudioContext, vol: f32) {
            self.sweep(ctx, OscillatorType::Square, (150.0, 50.0), vol * 0.4, 0.16);
        }

        fn play_enemy_killed(&self, ctx: &AudioContext, vol: f32) {
            self.sweep(ctx, OscillatorType::Triangle, (900.0, 200.0), vol * 0.3, 0.12);
        }

        /// Cash register - two quick rising notes
        fn play_purchase(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [660.0, 990.0].into_iter().enumerate() {
                let start = t + i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) {
                    gain.gain().set_value_at_time(0.0, t).ok();
                    gain.gain().set_value_at_time(vol * 0.3, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, start + 0.1)
                        .ok();
                    osc.start().ok();
                    osc.stop_with_when(start + 0.12).ok();
                }
            }
        }

        /// Game over - descending sad tones
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [440.0, 349.0, 262.0].into_iter().enumerate() {
                let start = t + i as f64 * 0.25;
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) {
                    gain.gain().set_value_at_time(0.0, t).ok();
                    gain.gain().set_value_at_time(vol * 0.35, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, start + 0.4)
                        .ok();
                    osc.start().ok();
                    osc.stop_with_when(start + 0.45).ok();
                }
            }
        }
    }
}
