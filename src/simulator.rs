//! Balance simulator: plays the game greedily for a while and reports
//! progression pacing.
//! Run with: cargo test simulate_greedy -- --nocapture

#[cfg(test)]
mod tests {
    use crate::config::{GameConfig, UpgradeEffect};
    use crate::format::format_compact;
    use crate::state::ProgressionState;
    use crate::{logic, upgrades};

    enum Purchase {
        Tier(usize),
        Upgrade(String),
    }

    /// Pick the affordable purchase with the shortest payback time.
    fn find_best_purchase(state: &ProgressionState, config: &GameConfig) -> Option<Purchase> {
        let mut best: Option<(f64, Purchase)> = None;

        for (idx, tier) in config.tiers.iter().enumerate() {
            let cost = match logic::purchase_cost(state, config, idx, 1) {
                Some(c) => c,
                None => continue,
            };
            if state.balance < cost {
                continue;
            }
            let gain = tier.base_rate * state.generators[idx].multiplier;
            let payback = cost / gain;
            if best.as_ref().map_or(true, |(bp, _)| payback < *bp) {
                best = Some((payback, Purchase::Tier(idx)));
            }
        }

        for up in &config.upgrades {
            if state.purchased_upgrades.contains(&up.id) || state.balance < up.cost {
                continue;
            }
            let gain = match &up.effect {
                UpgradeEffect::CpsMultiplier(m) => state.effective_cps * (m - 1.0),
                UpgradeEffect::TierBonus { tier, multiplier } => config
                    .tier_index(tier)
                    .map(|i| state.tier_contribution(config, i) * (multiplier - 1.0))
                    .unwrap_or(0.0),
                // Assume 5 clicks/sec for click upgrades.
                UpgradeEffect::ClickPowerMultiplier(m) => {
                    state.effective_click_power() * (m - 1.0) * 5.0
                }
                _ => 0.0,
            };
            if gain <= 0.0 {
                continue;
            }
            let payback = up.cost / gain;
            if best.as_ref().map_or(true, |(bp, _)| payback < *bp) {
                best = Some((payback, Purchase::Upgrade(up.id.clone())));
            }
        }

        best.map(|(_, p)| p)
    }

    fn report_stats(state: &ProgressionState, config: &GameConfig, seconds: u32, purchases: u32) {
        eprintln!("--- {}m{}s ---", seconds / 60, seconds % 60);
        eprintln!(
            "  balance: {}  cps: {}  clicks: {}  purchases: {}",
            format_compact(state.balance),
            format_compact(state.effective_cps),
            state.total_clicks,
            purchases
        );
        let counts: Vec<String> = state
            .generators
            .iter()
            .zip(&config.tiers)
            .filter(|(g, _)| g.count > 0)
            .map(|(g, t)| format!("{}:{}", t.name, g.count))
            .collect();
        eprintln!("  tiers: {}", counts.join("  "));
        let owned: Vec<&str> = state
            .purchased_upgrades
            .iter()
            .map(|s| s.as_str())
            .collect();
        eprintln!("  upgrades: {owned:?}");
    }

    fn simulate(total_seconds: u32) -> (ProgressionState, u32) {
        let config = GameConfig::default();
        let mut state = ProgressionState::new(&config);
        let clicks_per_second = 5;
        let mut purchases = 0u32;

        let report_times = [60, 300, 900, 1800, 3600];
        let mut next_report = 0;

        eprintln!("\n=== greedy playthrough, {}min ===", total_seconds / 60);
        for second in 1..=total_seconds {
            for _ in 0..clicks_per_second {
                logic::click(&mut state, &config);
            }
            logic::tick(&mut state, &config, config.tick_frequency_hz);

            // Greedy: keep buying the best payback until nothing fits.
            for _ in 0..20 {
                match find_best_purchase(&state, &config) {
                    Some(Purchase::Tier(idx)) => {
                        if logic::buy_generator(&mut state, &config, idx, 1) {
                            purchases += 1;
                        } else {
                            break;
                        }
                    }
                    Some(Purchase::Upgrade(id)) => {
                        if upgrades::buy_upgrade(&mut state, &config, &id).succeeded() {
                            purchases += 1;
                        } else {
                            break;
                        }
                    }
                    None => break,
                }
            }

            if next_report < report_times.len() && second >= report_times[next_report] {
                report_stats(&state, &config, second, purchases);
                next_report += 1;
            }
        }

        eprintln!("=== final ===");
        report_stats(&state, &config, total_seconds, purchases);
        (state, purchases)
    }

    #[test]
    fn simulate_greedy_30min() {
        let (state, purchases) = simulate(1800);
        // Pacing sanity: half an hour of active play should be well past
        // the first tiers but nowhere near the prestige threshold.
        assert!(purchases > 20, "only {purchases} purchases in 30min");
        assert!(state.generators[0].count > 0);
        assert!(state.effective_cps > 1.0, "cps stalled at {}", state.effective_cps);
        assert!(state.total_produced < 1e12);
        assert!(state.balance >= 0.0);
    }

    #[test]
    fn simulate_greedy_1hour() {
        let (state, _) = simulate(3600);
        assert!(state.all_time_produced > state.balance);
        assert!(state.balance >= 0.0);
    }
}
