//! Mutable progression state: the save unit every engine operates on.

use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::dark_tree::DarkEffects;

/// The four ephemeral modifier slots a timed buff can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffKey {
    Production,
    Click,
    CostScale,
    Global,
}

/// A temporary multiplier with a tick countdown. When the countdown hits
/// zero the slot reverts to neutral (1.0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedBuff {
    pub value: f64,
    pub ticks_left: u32,
}

/// Ephemeral multiplier surface. Empty slots read as the neutral 1.0.
/// Applying a buff to an occupied slot replaces both the value and the
/// remaining duration, so a superseded buff can never revert its successor
/// early.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifiers {
    pub production: Option<TimedBuff>,
    pub click: Option<TimedBuff>,
    pub cost_scale: Option<TimedBuff>,
    pub global: Option<TimedBuff>,
}

impl Modifiers {
    pub fn slot_mut(&mut self, key: BuffKey) -> &mut Option<TimedBuff> {
        match key {
            BuffKey::Production => &mut self.production,
            BuffKey::Click => &mut self.click,
            BuffKey::CostScale => &mut self.cost_scale,
            BuffKey::Global => &mut self.global,
        }
    }

    pub fn value(&self, key: BuffKey) -> f64 {
        let slot = match key {
            BuffKey::Production => &self.production,
            BuffKey::Click => &self.click,
            BuffKey::CostScale => &self.cost_scale,
            BuffKey::Global => &self.global,
        };
        slot.map_or(1.0, |b| b.value)
    }

    /// Count down all active buffs; expired slots revert to neutral.
    /// Returns the keys that expired this call.
    pub fn tick(&mut self, delta_ticks: u32) -> Vec<BuffKey> {
        let mut expired = Vec::new();
        for key in [
            BuffKey::Production,
            BuffKey::Click,
            BuffKey::CostScale,
            BuffKey::Global,
        ] {
            let slot = self.slot_mut(key);
            if let Some(buff) = slot {
                buff.ticks_left = buff.ticks_left.saturating_sub(delta_ticks);
                if buff.ticks_left == 0 {
                    *slot = None;
                    expired.push(key);
                }
            }
        }
        expired
    }
}

/// Runtime record for one production tier: units owned plus the permanent
/// per-tier multiplier accumulated from tier-bonus upgrades.
#[derive(Clone, Debug, PartialEq)]
pub struct Generator {
    pub count: u64,
    pub multiplier: f64,
}

impl Generator {
    fn new() -> Self {
        Self {
            count: 0,
            multiplier: 1.0,
        }
    }
}

/// Diagnostic / activity log entry, consumed by the host's log panel.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub important: bool,
}

const LOG_CAP: usize = 50;

/// Full mutable progression state. Owned by the composing [`crate::game::Game`];
/// each engine module mutates its own region through explicit calls.
pub struct ProgressionState {
    /// Spendable currency.
    pub balance: f64,
    /// Lifetime production this epoch; reset by prestige.
    pub total_produced: f64,
    /// Lifetime production across all epochs; never reset.
    pub all_time_produced: f64,
    /// Manual clicks this epoch.
    pub total_clicks: u64,
    /// Currency spent this epoch.
    pub total_spent: f64,
    /// Currency per manual click before multipliers.
    pub click_power: f64,
    /// Permanent production multiplier from one-time upgrades.
    pub cps_multiplier: f64,
    /// Permanent multiplier from prestige legacy points.
    pub global_multiplier: f64,
    /// One entry per configured tier, in tier order.
    pub generators: Vec<Generator>,
    pub modifiers: Modifiers,
    pub purchased_upgrades: BTreeSet<String>,
    /// Secondary prestige currency.
    pub dark_matter: f64,
    pub owned_dark_nodes: BTreeSet<String>,
    /// Aggregate of all owned dark-node effects, recomputed on purchase.
    pub dark_effects: DarkEffects,
    pub legacy_points: u64,
    pub prestige_count: u32,
    /// Cached effective production rate. Recomputed eagerly by every
    /// mutation that can change it, never on the tick path.
    pub effective_cps: f64,
    /// xorshift32 state for spawn timing, crits and bonus picks.
    pub rng_state: u32,
    pub log: Vec<LogEntry>,
}

impl ProgressionState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            balance: 0.0,
            total_produced: 0.0,
            all_time_produced: 0.0,
            total_clicks: 0,
            total_spent: 0.0,
            click_power: 1.0,
            cps_multiplier: 1.0,
            global_multiplier: 1.0,
            generators: config.tiers.iter().map(|_| Generator::new()).collect(),
            modifiers: Modifiers::default(),
            purchased_upgrades: BTreeSet::new(),
            dark_matter: 0.0,
            owned_dark_nodes: BTreeSet::new(),
            dark_effects: DarkEffects::default(),
            legacy_points: 0,
            prestige_count: 0,
            effective_cps: 0.0,
            rng_state: 42,
            log: Vec::new(),
        }
    }

    /// xorshift32. Deterministic, wasm-safe, good enough for spawn jitter.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    pub fn add_log(&mut self, text: &str, important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            important,
        });
        if self.log.len() > LOG_CAP {
            self.log.remove(0);
        }
    }

    /// Base production rate: per-tier output with tier bonuses, plus flat
    /// passive generation from the dark tree, before any global multiplier.
    pub fn base_cps(&self, config: &GameConfig) -> f64 {
        let tiers: f64 = self
            .generators
            .iter()
            .zip(&config.tiers)
            .map(|(g, t)| g.count as f64 * t.base_rate * g.multiplier)
            .sum();
        tiers + self.dark_effects.passive_cps
    }

    /// Recompute the cached effective production rate from ownership and
    /// every multiplier surface. Called by mutations, not by the tick.
    pub fn recompute_cps(&mut self, config: &GameConfig) {
        self.effective_cps = self.base_cps(config)
            * self.cps_multiplier
            * self.global_multiplier
            * self.modifiers.value(BuffKey::Production)
            * self.modifiers.value(BuffKey::Global)
            * self.dark_effects.production_mult
            * self.dark_effects.cps_mult
            * self.dark_effects.time_warp;
    }

    /// Currency a single click earns before crit rolls.
    pub fn effective_click_power(&self) -> f64 {
        self.click_power
            * self.global_multiplier
            * self.modifiers.value(BuffKey::Click)
            * self.modifiers.value(BuffKey::Global)
            * self.dark_effects.click_mult
    }

    /// Contribution of one tier to the base rate (host store display).
    pub fn tier_contribution(&self, config: &GameConfig, tier_idx: usize) -> f64 {
        match (self.generators.get(tier_idx), config.tiers.get(tier_idx)) {
            (Some(g), Some(t)) => g.count as f64 * t.base_rate * g.multiplier,
            _ => 0.0,
        }
    }
}
