//! Prestige (soft reset) engine: legacy point math and the two-phase
//! reset transaction.
//!
//! Points grow with the cube root of epoch production past a configured
//! threshold. A reset converts them into a permanent global multiplier and
//! dark matter, then asks the production and upgrade engines to run their
//! own reset hooks. Sell-price math lives in [`crate::pricing`], shared
//! with the production engine, not duplicated here.

use crate::config::GameConfig;
use crate::state::ProgressionState;
use crate::{logic, upgrades};

/// Legacy points a reset would earn from `total_produced` this epoch.
/// Zero below the threshold, then `floor(cbrt(total / threshold))`,
/// monotone non-decreasing in production.
pub fn legacy_points_for(total_produced: f64, config: &GameConfig) -> u64 {
    if config.prestige_threshold <= 0.0 || total_produced < config.prestige_threshold {
        return 0;
    }
    (total_produced / config.prestige_threshold).cbrt().floor() as u64
}

/// Permanent multiplier granted by an accumulated point total.
pub fn legacy_multiplier_for(points: u64, config: &GameConfig) -> f64 {
    1.0 + points as f64 * config.prestige_bonus_per_point
}

/// Points a reset would add right now (display helper).
pub fn pending_points(state: &ProgressionState, config: &GameConfig) -> u64 {
    legacy_points_for(state.total_produced, config)
}

/// Perform the soft reset. Compute-then-commit: when the epoch has earned
/// zero points the call fails with no state change at all. On success the
/// earned points and matching dark matter are banked, the permanent
/// multiplier is recomputed, epoch stats are zeroed (all-time counters are
/// not), and the production and upgrade engines run their reset hooks.
pub fn perform_reset(state: &mut ProgressionState, config: &GameConfig) -> bool {
    let earned = legacy_points_for(state.total_produced, config);
    if earned == 0 {
        return false;
    }

    state.legacy_points += earned;
    state.dark_matter += earned as f64;
    state.prestige_count += 1;
    state.global_multiplier = legacy_multiplier_for(state.legacy_points, config);

    state.total_produced = 0.0;
    state.total_clicks = 0;
    state.total_spent = 0.0;

    logic::reset_for_prestige(state, config);
    let _retained = upgrades::reset_for_prestige(state, config);

    state.add_log(
        &format!(
            "Ascended! +{earned} legacy points ({} total), production x{:.2}",
            state.legacy_points, state.global_multiplier
        ),
        true,
    );
    true
}
