pub mod ai;
pub mod calculators;
pub mod catch;
pub mod decision;
pub mod effects;
pub mod engine;
pub mod rng;
pub mod runner;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;
