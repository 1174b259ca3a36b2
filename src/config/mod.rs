//! Configuration module for homebudget
//!
//! This module provides configuration management including:
//! - platform path resolution with an environment override
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
