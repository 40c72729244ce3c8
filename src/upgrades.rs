//! One-time upgrade system: catalog lookup, idempotent purchase, typed
//! permanent effects, and the prestige reset hook.
//!
//! Feature unlocks are not broadcast anywhere: a purchase returns an
//! [`UnlockSignal`] and the composing layer routes it to the interested
//! engine explicitly.

use crate::config::{GameConfig, UpgradeEffect, RETAINED_UPGRADE_ID};
use crate::state::ProgressionState;

/// Feature-unlock signal emitted by certain upgrade effects. The caller
/// (the composing `Game`) forwards it to the engine it concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockSignal {
    /// Start the timed-bonus spawner.
    EventSpawner,
    /// Reveal the prestige panel.
    Prestige,
}

/// Result of an upgrade purchase attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased(Option<UnlockSignal>),
    UnknownId,
    AlreadyOwned,
    InsufficientFunds,
}

impl PurchaseOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased(_))
    }
}

/// Buy an upgrade by id. The effect is applied exactly once; a second
/// attempt fails before any debit.
pub fn buy_upgrade(
    state: &mut ProgressionState,
    config: &GameConfig,
    id: &str,
) -> PurchaseOutcome {
    let def = match config.upgrade(id) {
        Some(d) => d,
        None => {
            state.add_log(&format!("Unknown upgrade id: {id}"), false);
            return PurchaseOutcome::UnknownId;
        }
    };
    if state.purchased_upgrades.contains(id) {
        return PurchaseOutcome::AlreadyOwned;
    }
    if state.balance < def.cost {
        return PurchaseOutcome::InsufficientFunds;
    }

    state.balance -= def.cost;
    state.total_spent += def.cost;
    state.purchased_upgrades.insert(id.to_string());
    let name = def.name.clone();
    let effect = def.effect.clone();
    let signal = apply_effect(state, config, &effect, &name);
    state.recompute_cps(config);
    state.add_log(&format!("Upgrade purchased: {name}"), true);
    PurchaseOutcome::Purchased(signal)
}

fn apply_effect(
    state: &mut ProgressionState,
    config: &GameConfig,
    effect: &UpgradeEffect,
    name: &str,
) -> Option<UnlockSignal> {
    match effect {
        UpgradeEffect::CpsMultiplier(m) => {
            state.cps_multiplier *= m;
            None
        }
        UpgradeEffect::ClickPowerMultiplier(m) => {
            state.click_power *= m;
            None
        }
        UpgradeEffect::TierBonus { tier, multiplier } => {
            match config.tier_index(tier) {
                Some(idx) => state.generators[idx].multiplier *= multiplier,
                None => state.add_log(&format!("{name} targets unknown tier {tier}"), false),
            }
            None
        }
        UpgradeEffect::UnlockEvents => Some(UnlockSignal::EventSpawner),
        UpgradeEffect::UnlockPrestige => Some(UnlockSignal::Prestige),
        UpgradeEffect::Unknown => {
            state.add_log(
                &format!("{name} has an effect this version doesn't understand"),
                false,
            );
            None
        }
    }
}

/// Prestige hook: forget all purchased upgrades except the retained
/// prestige-unlock flag, and return every permanent surface they touched
/// to neutral. Re-applies the retained upgrade's effect so its unlock
/// survives repeated resets; the resulting signals are returned for the
/// composing layer to re-route.
pub fn reset_for_prestige(
    state: &mut ProgressionState,
    config: &GameConfig,
) -> Vec<UnlockSignal> {
    let retained = state.purchased_upgrades.contains(RETAINED_UPGRADE_ID);
    state.purchased_upgrades.clear();
    state.cps_multiplier = 1.0;
    state.click_power = 1.0;
    for g in &mut state.generators {
        g.multiplier = 1.0;
    }

    let mut signals = Vec::new();
    if retained {
        state.purchased_upgrades.insert(RETAINED_UPGRADE_ID.to_string());
        if let Some(def) = config.upgrade(RETAINED_UPGRADE_ID) {
            let name = def.name.clone();
            let effect = def.effect.clone();
            if let Some(signal) = apply_effect(state, config, &effect, &name) {
                signals.push(signal);
            }
        }
    }
    state.recompute_cps(config);
    signals
}
