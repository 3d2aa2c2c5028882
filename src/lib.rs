//! WealthWise Planner
//!
//! A personal-finance planning library that:
//! - Computes budgets, loan EMIs, SIP growth, tax, debt payoff and wealth projections
//! - Keeps the user's profile, goals and chat log in a single state value
//! - Updates that state only through pure transforms
//! - Mirrors every new state to a durable JSON snapshot
//! - Answers questions with a keyword-matched canned advisor
//!
//! FLOW:
//! INPUT → ACTION → REDUCE → PERSIST → (CALCULATE) → RENDER

pub mod advisor;
pub mod config;
pub mod error;
pub mod finance;
pub mod models;
pub mod state;
pub mod util;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use advisor::{ChatSession, QueryClassifier, ResponseCategory};
pub use state::{Action, AppState, ProfileStore};
