//! Static game configuration: tuning constants and the four catalogs
//! (production tiers, upgrades, dark-matter nodes, timed bonuses).
//!
//! A `GameConfig` is built once at startup and passed by reference into
//! every operation; there is no mutable global state. The effect enums
//! derive serde with an `Unknown` catch-all so a catalog entry from a newer
//! format degrades to a logged no-op instead of a parse failure.

use serde::{Deserialize, Serialize};

/// Upgrade id that survives a prestige reset (the prestige-unlock flag).
pub const RETAINED_UPGRADE_ID: &str = "ascension_contract";

/// One configured production tier. Tiers are ordered; the ordinal position
/// in `GameConfig::tiers` doubles as the runtime tier index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TierDef {
    pub id: String,
    pub name: String,
    pub base_cost: f64,
    /// Currency per second per unit owned.
    pub base_rate: f64,
}

/// Permanent effect of a one-time upgrade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UpgradeEffect {
    /// Multiplies the production-rate multiplier.
    CpsMultiplier(f64),
    /// Multiplies currency earned per manual click.
    ClickPowerMultiplier(f64),
    /// Multiplies one tier's output.
    TierBonus { tier: String, multiplier: f64 },
    /// Unlocks the timed-bonus spawner.
    UnlockEvents,
    /// Unlocks the prestige panel.
    UnlockPrestige,
    /// Catch-all for effect kinds this engine version doesn't know.
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpgradeDef {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub effect: UpgradeEffect,
}

/// Permanent effect of a dark-matter tree node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DarkEffect {
    /// Scales every generator purchase cost (< 1.0 is a discount).
    CostScale(f64),
    ProductionMultiplier(f64),
    CpsMultiplier(f64),
    /// Speeds up production as if time ran faster.
    TimeWarp(f64),
    ClickPowerMultiplier(f64),
    /// Additive chance for a click to crit.
    CritChance(f64),
    /// Additive flat currency per second.
    PassiveCps(f64),
    #[serde(other)]
    Unknown,
}

/// A node in the dark-matter upgrade forest. A node with a parent is only
/// purchasable once the parent is owned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DarkNodeDef {
    pub id: String,
    pub name: String,
    /// Cost in dark matter.
    pub cost: f64,
    pub parent: Option<String>,
    pub effect: DarkEffect,
}

/// Effect of a collected timed bonus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BonusEffect {
    ProductionMultiplier { multiplier: f64, duration_secs: f64 },
    ClickMultiplier { multiplier: f64, duration_secs: f64 },
    GlobalMultiplier { multiplier: f64, duration_secs: f64 },
    /// Temporary cost scale on purchases (< 1.0 is a discount).
    Discount { scale: f64, duration_secs: f64 },
    /// Grants N seconds of production at the current rate, immediately.
    InstantProduction { seconds: f64 },
    /// Same payout shape as instant production, themed as a time skip.
    TimeWarp { seconds: f64 },
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BonusDef {
    pub id: String,
    pub name: String,
    pub effect: BonusEffect,
}

/// Immutable configuration for one game instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Discrete logic ticks per real-time second.
    pub tick_frequency_hz: u32,
    /// Geometric growth per unit owned for tier prices.
    pub cost_growth_rate: f64,
    /// Fraction of the buy-side price refunded on sale.
    pub sell_refund_rate: f64,
    /// Lifetime production needed for the first legacy point.
    pub prestige_threshold: f64,
    /// Permanent multiplier granted per legacy point.
    pub prestige_bonus_per_point: f64,
    /// Click payout multiplier on a critical click.
    pub crit_multiplier: f64,
    /// Random wait before a bonus appears, uniform in `[min, max]` seconds.
    pub spawn_delay_secs: (f64, f64),
    /// How long a spawned bonus stays collectible on screen.
    pub bonus_duration_secs: f64,
    /// Independent bonus spawn slots.
    pub spawn_slots: usize,
    pub tiers: Vec<TierDef>,
    pub upgrades: Vec<UpgradeDef>,
    pub dark_nodes: Vec<DarkNodeDef>,
    pub bonuses: Vec<BonusDef>,
}

impl GameConfig {
    pub fn tier_index(&self, id: &str) -> Option<usize> {
        self.tiers.iter().position(|t| t.id == id)
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeDef> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn dark_node(&self, id: &str) -> Option<&DarkNodeDef> {
        self.dark_nodes.iter().find(|n| n.id == id)
    }
}

fn tier(id: &str, name: &str, base_cost: f64, base_rate: f64) -> TierDef {
    TierDef {
        id: id.into(),
        name: name.into(),
        base_cost,
        base_rate,
    }
}

fn upgrade(id: &str, name: &str, cost: f64, effect: UpgradeEffect) -> UpgradeDef {
    UpgradeDef {
        id: id.into(),
        name: name.into(),
        cost,
        effect,
    }
}

fn dark(id: &str, name: &str, cost: f64, parent: Option<&str>, effect: DarkEffect) -> DarkNodeDef {
    DarkNodeDef {
        id: id.into(),
        name: name.into(),
        cost,
        parent: parent.map(String::from),
        effect,
    }
}

fn bonus(id: &str, name: &str, effect: BonusEffect) -> BonusDef {
    BonusDef {
        id: id.into(),
        name: name.into(),
        effect,
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_frequency_hz: 10,
            cost_growth_rate: 1.15,
            sell_refund_rate: 0.25,
            prestige_threshold: 1e12,
            prestige_bonus_per_point: 0.02,
            crit_multiplier: 10.0,
            spawn_delay_secs: (30.0, 90.0),
            bonus_duration_secs: 10.0,
            spawn_slots: 1,
            tiers: vec![
                tier("extra_hand", "Extra Hand", 15.0, 0.1),
                tier("home_baker", "Home Baker", 100.0, 1.0),
                tier("pastry_shop", "Pastry Shop", 1_100.0, 8.0),
                tier("bakery_chain", "Bakery Chain", 12_000.0, 47.0),
                tier("cake_factory", "Cake Factory", 130_000.0, 260.0),
                tier("frosting_plant", "Frosting Plant", 1_400_000.0, 1_400.0),
                tier("sugar_refinery", "Sugar Refinery", 20_000_000.0, 7_800.0),
            ],
            upgrades: vec![
                upgrade(
                    "steel_whisk",
                    "Steel Whisk",
                    100.0,
                    UpgradeEffect::ClickPowerMultiplier(2.0),
                ),
                upgrade(
                    "golden_spatula",
                    "Golden Spatula",
                    500.0,
                    UpgradeEffect::CpsMultiplier(1.5),
                ),
                upgrade(
                    "double_frosting",
                    "Double Frosting",
                    5_000.0,
                    UpgradeEffect::CpsMultiplier(2.0),
                ),
                upgrade(
                    "baker_school",
                    "Baker School",
                    10_000.0,
                    UpgradeEffect::TierBonus {
                        tier: "home_baker".into(),
                        multiplier: 2.0,
                    },
                ),
                upgrade(
                    "carbon_whisk",
                    "Carbon-Fiber Whisk",
                    50_000.0,
                    UpgradeEffect::ClickPowerMultiplier(2.0),
                ),
                upgrade(
                    "party_planner",
                    "Party Planner",
                    100_000.0,
                    UpgradeEffect::UnlockEvents,
                ),
                upgrade(
                    "factory_automation",
                    "Factory Automation",
                    2_000_000.0,
                    UpgradeEffect::TierBonus {
                        tier: "cake_factory".into(),
                        multiplier: 2.0,
                    },
                ),
                upgrade(
                    RETAINED_UPGRADE_ID,
                    "Ascension Contract",
                    1_000_000.0,
                    UpgradeEffect::UnlockPrestige,
                ),
            ],
            dark_nodes: vec![
                dark(
                    "dark_core",
                    "Dark Core",
                    1.0,
                    None,
                    DarkEffect::ProductionMultiplier(1.5),
                ),
                dark(
                    "dark_bargain",
                    "Dark Bargain",
                    2.0,
                    Some("dark_core"),
                    DarkEffect::CostScale(0.9),
                ),
                dark(
                    "dark_hands",
                    "Dark Hands",
                    2.0,
                    Some("dark_core"),
                    DarkEffect::ClickPowerMultiplier(2.0),
                ),
                dark(
                    "dark_edge",
                    "Dark Edge",
                    3.0,
                    Some("dark_hands"),
                    DarkEffect::CritChance(0.05),
                ),
                dark(
                    "void_oven",
                    "Void Oven",
                    5.0,
                    None,
                    DarkEffect::TimeWarp(1.25),
                ),
                dark(
                    "void_drip",
                    "Void Drip",
                    3.0,
                    Some("void_oven"),
                    DarkEffect::PassiveCps(5.0),
                ),
                dark(
                    "void_mind",
                    "Void Mind",
                    8.0,
                    Some("void_oven"),
                    DarkEffect::CpsMultiplier(2.0),
                ),
            ],
            bonuses: vec![
                bonus(
                    "sugar_rush",
                    "Sugar Rush",
                    BonusEffect::ProductionMultiplier {
                        multiplier: 7.0,
                        duration_secs: 7.0,
                    },
                ),
                bonus(
                    "frenzy_fingers",
                    "Frenzy Fingers",
                    BonusEffect::ClickMultiplier {
                        multiplier: 10.0,
                        duration_secs: 10.0,
                    },
                ),
                bonus(
                    "lucky_crumb",
                    "Lucky Crumb",
                    BonusEffect::InstantProduction { seconds: 900.0 },
                ),
                bonus(
                    "flash_sale",
                    "Flash Sale",
                    BonusEffect::Discount {
                        scale: 0.75,
                        duration_secs: 15.0,
                    },
                ),
                bonus(
                    "time_icing",
                    "Time Icing",
                    BonusEffect::TimeWarp { seconds: 600.0 },
                ),
                bonus(
                    "golden_hour",
                    "Golden Hour",
                    BonusEffect::GlobalMultiplier {
                        multiplier: 2.0,
                        duration_secs: 30.0,
                    },
                ),
            ],
        }
    }
}
