#![allow(dead_code)]

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use simplelog::{Config, LevelFilter, TestLogger};

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

pub fn rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}
