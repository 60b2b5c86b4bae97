pub mod benchmark;
pub mod simulator;
