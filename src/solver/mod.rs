//! Mastermind solving algorithms
//!
//! This module contains the candidate space and the guess selection strategies.

pub mod minimax;
mod space;
pub mod strategy;

pub use space::CandidateSpace;
pub use strategy::{HybridStrategy, MinimaxStrategy, RandomStrategy, Strategy, StrategyType};
