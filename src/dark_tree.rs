//! Dark-matter upgrade tree: a forest of permanent nodes gated by parent
//! ownership, paid for with the prestige-earned dark matter currency.
//!
//! The aggregate effect of the owned set is a pure fold (multiplicative
//! for multiplier-type effects, additive for rate-type effects), so the
//! order nodes were bought in can never matter.

use std::collections::BTreeSet;

use crate::config::{DarkEffect, GameConfig};
use crate::state::ProgressionState;

/// Folded effects of every owned dark node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DarkEffects {
    pub cost_scale: f64,
    pub production_mult: f64,
    pub cps_mult: f64,
    pub time_warp: f64,
    pub click_mult: f64,
    pub crit_chance: f64,
    pub passive_cps: f64,
}

impl Default for DarkEffects {
    fn default() -> Self {
        Self {
            cost_scale: 1.0,
            production_mult: 1.0,
            cps_mult: 1.0,
            time_warp: 1.0,
            click_mult: 1.0,
            crit_chance: 0.0,
            passive_cps: 0.0,
        }
    }
}

/// Fold the owned node set into an aggregate. Deterministic in the set
/// contents alone; unknown effect kinds contribute nothing.
pub fn compute_effects(config: &GameConfig, owned: &BTreeSet<String>) -> DarkEffects {
    let mut agg = DarkEffects::default();
    for node in config.dark_nodes.iter().filter(|n| owned.contains(&n.id)) {
        match node.effect {
            DarkEffect::CostScale(v) => agg.cost_scale *= v,
            DarkEffect::ProductionMultiplier(v) => agg.production_mult *= v,
            DarkEffect::CpsMultiplier(v) => agg.cps_mult *= v,
            DarkEffect::TimeWarp(v) => agg.time_warp *= v,
            DarkEffect::ClickPowerMultiplier(v) => agg.click_mult *= v,
            DarkEffect::CritChance(v) => agg.crit_chance += v,
            DarkEffect::PassiveCps(v) => agg.passive_cps += v,
            DarkEffect::Unknown => {}
        }
    }
    agg
}

/// Whether a node could be bought right now (gating only, not funds).
pub fn is_unlocked(config: &GameConfig, owned: &BTreeSet<String>, id: &str) -> bool {
    match config.dark_node(id) {
        Some(node) => node
            .parent
            .as_ref()
            .map_or(true, |parent| owned.contains(parent)),
        None => false,
    }
}

/// Buy a dark node. Fails (no state change) on an unknown id, an already
/// owned node, a locked parent, or insufficient dark matter.
pub fn buy_dark_node(state: &mut ProgressionState, config: &GameConfig, id: &str) -> bool {
    let node = match config.dark_node(id) {
        Some(n) => n,
        None => {
            state.add_log(&format!("Unknown dark node id: {id}"), false);
            return false;
        }
    };
    if state.owned_dark_nodes.contains(id) {
        return false;
    }
    if let Some(parent) = &node.parent {
        if !state.owned_dark_nodes.contains(parent) {
            return false;
        }
    }
    if state.dark_matter < node.cost {
        return false;
    }

    state.dark_matter -= node.cost;
    state.owned_dark_nodes.insert(id.to_string());
    if node.effect == DarkEffect::Unknown {
        state.add_log(
            &format!("{} has an effect this version doesn't understand", node.name),
            false,
        );
    }
    state.dark_effects = compute_effects(config, &state.owned_dark_nodes);
    state.recompute_cps(config);
    state.add_log(&format!("Dark node acquired: {}", node.name), true);
    true
}
