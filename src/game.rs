//! Composing facade over the engines. The host talks to a [`Game`]; the
//! engines never talk to each other directly. Cross-engine effects travel
//! as explicit values: an upgrade purchase returns an [`UnlockSignal`] and
//! this layer routes it, a collected bonus returns its catalog entry and
//! this layer dispatches the effect.

use crate::config::{BonusEffect, GameConfig};
use crate::events::EventSpawner;
use crate::logic::{self, GeneratorInfo};
use crate::state::{BuffKey, ProgressionState};
use crate::upgrades::{self, PurchaseOutcome, UnlockSignal};
use crate::{dark_tree, prestige, save};

pub struct Game {
    pub config: GameConfig,
    pub state: ProgressionState,
    pub spawner: EventSpawner,
    /// Whether the prestige panel is visible to the host.
    prestige_unlocked: bool,
    ticks_since_save: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let state = ProgressionState::new(&config);
        let spawner = EventSpawner::new(&config);
        Self {
            config,
            state,
            spawner,
            prestige_unlocked: false,
            ticks_since_save: 0,
        }
    }

    /// Restore the persisted save if one exists, then re-derive the unlock
    /// flags from the restored upgrade set.
    #[cfg(target_arch = "wasm32")]
    pub fn load(&mut self) -> bool {
        let loaded = save::load_game(&mut self.state, &self.config);
        if loaded {
            self.sync_unlocks();
        }
        loaded
    }

    /// Persist immediately. The host calls this on teardown (page unload)
    /// so progress between autosaves isn't lost.
    #[cfg(target_arch = "wasm32")]
    pub fn save_now(&self) {
        save::save_game(&self.state);
    }

    /// Advance the simulation by whole ticks. Returns the amount produced.
    pub fn tick(&mut self, delta_ticks: u32) -> f64 {
        let produced = logic::tick(&mut self.state, &self.config, delta_ticks);
        self.spawner.tick(&mut self.state, &self.config, delta_ticks);

        self.ticks_since_save += delta_ticks;
        if self.ticks_since_save >= save::AUTOSAVE_INTERVAL {
            self.ticks_since_save = 0;
            #[cfg(target_arch = "wasm32")]
            save::save_game(&self.state);
        }
        produced
    }

    pub fn click(&mut self) -> f64 {
        logic::click(&mut self.state, &self.config)
    }

    pub fn buy_generator(&mut self, tier_idx: usize, quantity: u64) -> bool {
        logic::buy_generator(&mut self.state, &self.config, tier_idx, quantity)
    }

    pub fn sell_generator(&mut self, tier_idx: usize, quantity: u64) -> bool {
        logic::sell_generator(&mut self.state, &self.config, tier_idx, quantity)
    }

    pub fn can_afford(&self, tier_idx: usize, quantity: u64) -> bool {
        logic::can_afford(&self.state, &self.config, tier_idx, quantity)
    }

    pub fn generator_info(&self, tier_idx: usize) -> Option<GeneratorInfo> {
        logic::generator_info(&self.state, &self.config, tier_idx)
    }

    /// Buy a one-time upgrade and route any unlock signal it carries.
    pub fn buy_upgrade(&mut self, id: &str) -> bool {
        match upgrades::buy_upgrade(&mut self.state, &self.config, id) {
            PurchaseOutcome::Purchased(signal) => {
                if let Some(signal) = signal {
                    self.route_signal(signal);
                }
                true
            }
            _ => false,
        }
    }

    pub fn buy_dark_upgrade(&mut self, id: &str) -> bool {
        dark_tree::buy_dark_node(&mut self.state, &self.config, id)
    }

    pub fn prestige_unlocked(&self) -> bool {
        self.prestige_unlocked
    }

    pub fn pending_legacy_points(&self) -> u64 {
        prestige::pending_points(&self.state, &self.config)
    }

    /// Run the prestige soft reset. The spawner is rebuilt from scratch and
    /// the unlock flags re-derived from whatever upgrades survived.
    pub fn perform_prestige(&mut self) -> bool {
        if !self.prestige_unlocked {
            return false;
        }
        if !prestige::perform_reset(&mut self.state, &self.config) {
            return false;
        }
        self.spawner = EventSpawner::new(&self.config);
        self.prestige_unlocked = false;
        self.sync_unlocks();
        #[cfg(target_arch = "wasm32")]
        save::save_game(&self.state);
        true
    }

    /// Collect the bonus in a spawner slot and dispatch its effect.
    /// Returns the collected bonus's name, or `None` if nothing was there.
    pub fn collect_bonus(&mut self, slot_idx: usize) -> Option<String> {
        let bonus = self
            .spawner
            .collect(&mut self.state, &self.config, slot_idx)?;
        let name = bonus.name.clone();
        let effect = bonus.effect.clone();
        match effect {
            BonusEffect::ProductionMultiplier {
                multiplier,
                duration_secs,
            } => self.apply_buff(BuffKey::Production, multiplier, duration_secs),
            BonusEffect::ClickMultiplier {
                multiplier,
                duration_secs,
            } => self.apply_buff(BuffKey::Click, multiplier, duration_secs),
            BonusEffect::GlobalMultiplier {
                multiplier,
                duration_secs,
            } => self.apply_buff(BuffKey::Global, multiplier, duration_secs),
            BonusEffect::Discount {
                scale,
                duration_secs,
            } => self.apply_buff(BuffKey::CostScale, scale, duration_secs),
            BonusEffect::InstantProduction { seconds } | BonusEffect::TimeWarp { seconds } => {
                let amount = logic::grant_production(&mut self.state, seconds);
                self.state
                    .add_log(&format!("{name} paid out {amount:.0}"), true);
            }
            BonusEffect::Unknown => {
                self.state.add_log(
                    &format!("{name} has an effect this version doesn't understand"),
                    false,
                );
            }
        }
        Some(name)
    }

    pub fn apply_buff(&mut self, key: BuffKey, value: f64, duration_secs: f64) {
        logic::apply_buff(&mut self.state, &self.config, key, value, duration_secs);
    }

    /// Re-derive the unlock flags from the purchased-upgrade set. Used
    /// after loading a save and after a prestige reset, where signals from
    /// the original purchases are long gone.
    fn sync_unlocks(&mut self) {
        let owned: Vec<UnlockSignal> = self
            .config
            .upgrades
            .iter()
            .filter(|u| self.state.purchased_upgrades.contains(&u.id))
            .filter_map(|u| match u.effect {
                crate::config::UpgradeEffect::UnlockEvents => Some(UnlockSignal::EventSpawner),
                crate::config::UpgradeEffect::UnlockPrestige => Some(UnlockSignal::Prestige),
                _ => None,
            })
            .collect();
        for signal in owned {
            self.route_signal(signal);
        }
    }

    fn route_signal(&mut self, signal: UnlockSignal) {
        match signal {
            UnlockSignal::EventSpawner => {
                self.spawner.unlock(&mut self.state, &self.config);
            }
            UnlockSignal::Prestige => {
                self.prestige_unlocked = true;
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
