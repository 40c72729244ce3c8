//! Timed-bonus spawner: per-slot state machines that place collectible
//! bonuses on screen at random intervals.
//!
//! Slot lifecycle: `Locked → Idle → Armed(countdown) → Active(timer) →
//! Idle`, re-arming automatically while unlocked. The spawner draws its
//! randomness from the state's shared RNG so runs stay reproducible.
//! Collecting hands the catalog entry back to the caller; dispatching the
//! effect is the composing layer's job.

use crate::config::{BonusDef, GameConfig};
use crate::state::ProgressionState;

/// Where a slot is in its spawn cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlotPhase {
    /// Waiting for the unlock signal; never arms.
    Locked,
    /// Unlocked, about to draw a spawn delay.
    Idle,
    /// Counting down to the next spawn.
    Armed { ticks_left: u32 },
    /// A bonus is on screen, collectible until the timer runs out.
    Active {
        ticks_left: u32,
        bonus_idx: usize,
        /// Normalized screen position in [0, 1) for the presentation layer.
        x: f64,
        y: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnSlot {
    pub phase: SlotPhase,
}

pub struct EventSpawner {
    pub slots: Vec<SpawnSlot>,
}

impl EventSpawner {
    /// All slots start locked; an upgrade signal opens them.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            slots: vec![
                SpawnSlot {
                    phase: SlotPhase::Locked
                };
                config.spawn_slots.max(1)
            ],
        }
    }

    /// Unlock every locked slot and arm it with a fresh random delay.
    pub fn unlock(&mut self, state: &mut ProgressionState, config: &GameConfig) {
        for slot in &mut self.slots {
            if slot.phase == SlotPhase::Locked {
                slot.phase = SlotPhase::Armed {
                    ticks_left: draw_spawn_delay(state, config),
                };
            }
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.slots.iter().any(|s| s.phase != SlotPhase::Locked)
    }

    /// Advance every slot. Armed slots activate when their countdown ends;
    /// active slots expire back to a fresh countdown when ignored.
    pub fn tick(&mut self, state: &mut ProgressionState, config: &GameConfig, delta_ticks: u32) {
        if delta_ticks == 0 || config.bonuses.is_empty() {
            return;
        }
        for slot in &mut self.slots {
            match slot.phase {
                SlotPhase::Locked => {}
                SlotPhase::Idle => {
                    slot.phase = SlotPhase::Armed {
                        ticks_left: draw_spawn_delay(state, config),
                    };
                }
                SlotPhase::Armed { ticks_left } => {
                    let left = ticks_left.saturating_sub(delta_ticks);
                    if left == 0 {
                        let bonus_idx = state.next_random() as usize % config.bonuses.len();
                        let x = (state.next_random() % 1000) as f64 / 1000.0;
                        let y = (state.next_random() % 1000) as f64 / 1000.0;
                        let duration = (config.bonus_duration_secs
                            * config.tick_frequency_hz as f64)
                            .round() as u32;
                        slot.phase = SlotPhase::Active {
                            ticks_left: duration.max(1),
                            bonus_idx,
                            x,
                            y,
                        };
                        state.add_log(
                            &format!("A bonus appeared: {}", config.bonuses[bonus_idx].name),
                            true,
                        );
                    } else {
                        slot.phase = SlotPhase::Armed { ticks_left: left };
                    }
                }
                SlotPhase::Active {
                    ticks_left,
                    bonus_idx,
                    x,
                    y,
                } => {
                    let left = ticks_left.saturating_sub(delta_ticks);
                    if left == 0 {
                        state.add_log(
                            &format!("{} faded away", config.bonuses[bonus_idx].name),
                            false,
                        );
                        slot.phase = SlotPhase::Armed {
                            ticks_left: draw_spawn_delay(state, config),
                        };
                    } else {
                        slot.phase = SlotPhase::Active {
                            ticks_left: left,
                            bonus_idx,
                            x,
                            y,
                        };
                    }
                }
            }
        }
    }

    /// The catalog entry currently on screen in a slot, if any.
    pub fn active_bonus<'c>(&self, config: &'c GameConfig, slot_idx: usize) -> Option<&'c BonusDef> {
        match self.slots.get(slot_idx)?.phase {
            SlotPhase::Active { bonus_idx, .. } => config.bonuses.get(bonus_idx),
            _ => None,
        }
    }

    /// Collect the active bonus in a slot. Returns its catalog entry and
    /// re-arms the slot; `None` when nothing is collectible there.
    pub fn collect<'c>(
        &mut self,
        state: &mut ProgressionState,
        config: &'c GameConfig,
        slot_idx: usize,
    ) -> Option<&'c BonusDef> {
        let slot = self.slots.get_mut(slot_idx)?;
        let bonus_idx = match slot.phase {
            SlotPhase::Active { bonus_idx, .. } => bonus_idx,
            _ => return None,
        };
        let bonus = config.bonuses.get(bonus_idx)?;
        slot.phase = SlotPhase::Armed {
            ticks_left: draw_spawn_delay(state, config),
        };
        Some(bonus)
    }
}

/// Uniform random delay within the configured spawn window, in ticks.
fn draw_spawn_delay(state: &mut ProgressionState, config: &GameConfig) -> u32 {
    let hz = config.tick_frequency_hz as f64;
    let min = (config.spawn_delay_secs.0 * hz).round() as u32;
    let max = (config.spawn_delay_secs.1 * hz).round() as u32;
    if max <= min {
        return min.max(1);
    }
    let span = max - min + 1;
    (min + state.next_random() % span).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GameConfig, ProgressionState, EventSpawner) {
        let config = GameConfig::default();
        let state = ProgressionState::new(&config);
        let spawner = EventSpawner::new(&config);
        (config, state, spawner)
    }

    #[test]
    fn locked_slots_never_arm() {
        let (config, mut state, mut spawner) = setup();
        spawner.tick(&mut state, &config, 100_000);
        assert_eq!(spawner.slots[0].phase, SlotPhase::Locked);
        assert!(!spawner.is_unlocked());
    }

    #[test]
    fn unlock_arms_within_configured_window() {
        let (config, mut state, mut spawner) = setup();
        spawner.unlock(&mut state, &config);
        let hz = config.tick_frequency_hz;
        match spawner.slots[0].phase {
            SlotPhase::Armed { ticks_left } => {
                let min = config.spawn_delay_secs.0 as u32 * hz;
                let max = config.spawn_delay_secs.1 as u32 * hz;
                assert!(
                    (min..=max).contains(&ticks_left),
                    "delay {ticks_left} outside [{min}, {max}]"
                );
            }
            other => panic!("expected Armed, got {other:?}"),
        }
    }

    #[test]
    fn armed_slot_activates_after_countdown() {
        let (config, mut state, mut spawner) = setup();
        spawner.slots[0].phase = SlotPhase::Armed { ticks_left: 10 };
        spawner.tick(&mut state, &config, 9);
        assert!(matches!(spawner.slots[0].phase, SlotPhase::Armed { .. }));
        spawner.tick(&mut state, &config, 1);
        assert!(matches!(spawner.slots[0].phase, SlotPhase::Active { .. }));
        assert!(spawner.active_bonus(&config, 0).is_some());
    }

    #[test]
    fn active_position_is_normalized() {
        let (config, mut state, mut spawner) = setup();
        spawner.slots[0].phase = SlotPhase::Armed { ticks_left: 1 };
        spawner.tick(&mut state, &config, 1);
        match spawner.slots[0].phase {
            SlotPhase::Active { x, y, .. } => {
                assert!((0.0..1.0).contains(&x));
                assert!((0.0..1.0).contains(&y));
            }
            other => panic!("expected Active, got {other:?}"),
        }
    }

    #[test]
    fn ignored_bonus_expires_and_rearms() {
        let (config, mut state, mut spawner) = setup();
        spawner.slots[0].phase = SlotPhase::Armed { ticks_left: 1 };
        spawner.tick(&mut state, &config, 1);
        let duration = config.bonus_duration_secs as u32 * config.tick_frequency_hz;
        spawner.tick(&mut state, &config, duration);
        assert!(
            matches!(spawner.slots[0].phase, SlotPhase::Armed { .. }),
            "expected re-armed slot, got {:?}",
            spawner.slots[0].phase
        );
    }

    #[test]
    fn collect_returns_catalog_entry_and_rearms() {
        let (config, mut state, mut spawner) = setup();
        spawner.slots[0].phase = SlotPhase::Armed { ticks_left: 1 };
        spawner.tick(&mut state, &config, 1);
        let bonus = spawner.collect(&mut state, &config, 0);
        assert!(bonus.is_some());
        assert!(matches!(spawner.slots[0].phase, SlotPhase::Armed { .. }));
        // Nothing left to collect.
        assert!(spawner.collect(&mut state, &config, 0).is_none());
    }

    #[test]
    fn collect_on_idle_or_locked_slot_is_none() {
        let (config, mut state, mut spawner) = setup();
        assert!(spawner.collect(&mut state, &config, 0).is_none());
        spawner.slots[0].phase = SlotPhase::Idle;
        assert!(spawner.collect(&mut state, &config, 0).is_none());
        assert!(spawner.collect(&mut state, &config, 99).is_none());
    }

    #[test]
    fn idle_slot_arms_on_next_tick() {
        let (config, mut state, mut spawner) = setup();
        spawner.slots[0].phase = SlotPhase::Idle;
        spawner.tick(&mut state, &config, 1);
        assert!(matches!(spawner.slots[0].phase, SlotPhase::Armed { .. }));
    }

    #[test]
    fn multiple_slots_run_independently() {
        let mut config = GameConfig::default();
        config.spawn_slots = 2;
        let mut state = ProgressionState::new(&config);
        let mut spawner = EventSpawner::new(&config);
        spawner.unlock(&mut state, &config);
        spawner.slots[0].phase = SlotPhase::Armed { ticks_left: 1 };
        spawner.slots[1].phase = SlotPhase::Armed { ticks_left: 500 };
        spawner.tick(&mut state, &config, 1);
        assert!(matches!(spawner.slots[0].phase, SlotPhase::Active { .. }));
        assert!(matches!(spawner.slots[1].phase, SlotPhase::Armed { .. }));
    }

    #[test]
    fn spawn_delays_vary_between_draws() {
        let (config, mut state, _) = setup();
        let draws: Vec<u32> = (0..8).map(|_| draw_spawn_delay(&mut state, &config)).collect();
        assert!(draws.windows(2).any(|w| w[0] != w[1]), "draws never varied: {draws:?}");
    }
}
