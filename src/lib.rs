//! Cake Clicker: the simulation engine behind a browser incremental game.
//!
//! This crate owns the numbers: currency accumulation, geometric bulk
//! pricing, one-time upgrades, timed buffs, the prestige soft-reset and the
//! dark-matter upgrade tree. Rendering and input mapping live in the host
//! page; the host drives [`game::Game`] from its frame loop and draws
//! whatever the getters report.
//!
//! All game logic is deterministic and runs natively for tests. Only the
//! persistence boundary ([`save`]) touches browser APIs, behind
//! `cfg(target_arch = "wasm32")`.

pub mod config;
pub mod dark_tree;
pub mod events;
pub mod format;
pub mod game;
pub mod logic;
pub mod prestige;
pub mod pricing;
pub mod save;
pub mod state;
pub mod time;
pub mod upgrades;

#[cfg(test)]
mod simulator;
