//! Save/load for the progression state, persisted as versioned JSON in
//! localStorage.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: the current format version. Bump it when adding fields.
//! - `MIN_COMPATIBLE_VERSION`: the oldest version still loadable. Additive
//!   changes keep it where it is (missing fields fall back to defaults);
//!   only a breaking change to an existing field's meaning moves it.
//!
//! A save between the two versions loads with defaults filled in. Anything
//! older, or anything that fails to parse, is discarded and the game starts
//! fresh. Ephemeral state (active buffs, spawner slots, the log) is not
//! part of the save; buffs are short enough that losing them on reload is
//! acceptable.

#[cfg(any(target_arch = "wasm32", test))]
use serde::{Deserialize, Serialize};

#[cfg(any(target_arch = "wasm32", test))]
use crate::config::GameConfig;
#[cfg(any(target_arch = "wasm32", test))]
use crate::dark_tree;
#[cfg(any(target_arch = "wasm32", test))]
use crate::state::ProgressionState;

#[cfg(any(target_arch = "wasm32", test))]
const SAVE_VERSION: u32 = 1;

#[cfg(any(target_arch = "wasm32", test))]
const MIN_COMPATIBLE_VERSION: u32 = 1;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "cake_clicker_save";

/// Autosave cadence in ticks. 10 ticks/sec x 10 seconds = 100 ticks.
pub const AUTOSAVE_INTERVAL: u32 = 100;

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    /// Wall-clock ms at save time, for future offline-progress use.
    saved_at: f64,
    game: GameSave,
}

#[cfg(any(target_arch = "wasm32", test))]
fn one() -> f64 {
    1.0
}

/// Durable slice of [`ProgressionState`]. Buffs, spawner slots, the cached
/// rate and the log are rebuilt or dropped on load, never persisted.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct GameSave {
    balance: f64,
    total_produced: f64,
    all_time_produced: f64,
    total_clicks: u64,
    total_spent: f64,

    #[serde(default = "one")]
    click_power: f64,
    #[serde(default = "one")]
    cps_multiplier: f64,
    #[serde(default = "one")]
    global_multiplier: f64,

    /// Per tier (count, multiplier), in configured tier order.
    generators: Vec<(u64, f64)>,
    purchased_upgrades: Vec<String>,

    dark_matter: f64,
    owned_dark_nodes: Vec<String>,

    legacy_points: u64,
    prestige_count: u32,

    rng_state: u32,
}

#[cfg(any(target_arch = "wasm32", test))]
fn extract_save(state: &ProgressionState, now_ms: f64) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        saved_at: now_ms,
        game: GameSave {
            balance: state.balance,
            total_produced: state.total_produced,
            all_time_produced: state.all_time_produced,
            total_clicks: state.total_clicks,
            total_spent: state.total_spent,
            click_power: state.click_power,
            cps_multiplier: state.cps_multiplier,
            global_multiplier: state.global_multiplier,
            generators: state
                .generators
                .iter()
                .map(|g| (g.count, g.multiplier))
                .collect(),
            purchased_upgrades: state.purchased_upgrades.iter().cloned().collect(),
            dark_matter: state.dark_matter,
            owned_dark_nodes: state.owned_dark_nodes.iter().cloned().collect(),
            legacy_points: state.legacy_points,
            prestige_count: state.prestige_count,
            rng_state: state.rng_state,
        },
    }
}

/// Restore a save into the state. A save with fewer tiers than the current
/// catalog leaves the extra tiers at zero; derived fields (dark effect
/// aggregate, cached rate) are recomputed rather than trusted.
#[cfg(any(target_arch = "wasm32", test))]
fn apply_save(state: &mut ProgressionState, config: &GameConfig, save: &GameSave) {
    state.balance = save.balance;
    state.total_produced = save.total_produced;
    state.all_time_produced = save.all_time_produced;
    state.total_clicks = save.total_clicks;
    state.total_spent = save.total_spent;
    state.click_power = save.click_power;
    state.cps_multiplier = save.cps_multiplier;
    state.global_multiplier = save.global_multiplier;

    for (i, (count, mult)) in save.generators.iter().enumerate() {
        if let Some(g) = state.generators.get_mut(i) {
            g.count = *count;
            g.multiplier = *mult;
        }
    }

    state.purchased_upgrades = save.purchased_upgrades.iter().cloned().collect();
    state.dark_matter = save.dark_matter;
    state.owned_dark_nodes = save.owned_dark_nodes.iter().cloned().collect();
    state.legacy_points = save.legacy_points;
    state.prestige_count = save.prestige_count;
    state.rng_state = save.rng_state;

    state.dark_effects = dark_tree::compute_effects(config, &state.owned_dark_nodes);
    state.recompute_cps(config);
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Persist the state to localStorage. Failures are logged to the console
/// and otherwise ignored; the game keeps running.
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &ProgressionState) {
    let save_data = extract_save(state, js_sys::Date::now());
    let json = match serde_json::to_string(&save_data) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(&format!("cake-clicker: failed to serialize save: {e}").into());
            return;
        }
    };

    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(
                &format!("cake-clicker: failed to write localStorage: {e:?}").into(),
            );
        }
    }
}

/// Restore the state from localStorage. Returns false (leaving the fresh
/// state untouched) when no save exists, it fails to parse, or its version
/// is older than `MIN_COMPATIBLE_VERSION`; unreadable saves are removed.
#[cfg(target_arch = "wasm32")]
pub fn load_game(state: &mut ProgressionState, config: &GameConfig) -> bool {
    let storage = match get_storage() {
        Some(s) => s,
        None => return false,
    };

    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return false,
    };

    let save_data: SaveData = match serde_json::from_str(&json) {
        Ok(d) => d,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("cake-clicker: discarding unreadable save: {e}").into(),
            );
            let _ = storage.remove_item(STORAGE_KEY);
            return false;
        }
    };

    if save_data.version < MIN_COMPATIBLE_VERSION {
        web_sys::console::log_1(
            &format!(
                "cake-clicker: save too old (saved={}, min_compatible={}), starting fresh",
                save_data.version, MIN_COMPATIBLE_VERSION
            )
            .into(),
        );
        let _ = storage.remove_item(STORAGE_KEY);
        return false;
    }

    if save_data.version < SAVE_VERSION {
        web_sys::console::log_1(
            &format!(
                "cake-clicker: migrating save (saved={}, current={})",
                save_data.version, SAVE_VERSION
            )
            .into(),
        );
    }

    apply_save(state, config, &save_data.game);
    true
}

/// Drop the stored save.
#[cfg(target_arch = "wasm32")]
#[allow(dead_code)]
pub fn delete_save() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}
