//! Headless 2D robot sandbox: a robot driven by discrete commands through arenas with
//! rectangular obstacles, reporting simulated range-sensor readings.

#[cfg(test)]
mod tests;

pub mod config;
pub mod controller;
pub mod domain;
pub mod programs;
pub mod resource;
pub mod simulator;
