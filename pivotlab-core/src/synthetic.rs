//! Synthetic bars for demos, benchmarks and tests.
//!
//! A seeded random walk from a starting price of 100.0 on weekday daily
//! bars. The seed string is hashed with BLAKE3 so the same seed always
//! produces the same series on every platform.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Bar;

/// First bar timestamp used when the caller does not pick one.
pub fn default_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 2, 21, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Generate `count` weekday bars starting at `start`.
pub fn generate_bars(seed: &str, count: usize, start: DateTime<Utc>) -> Vec<Bar> {
    let seed_bytes: [u8; 32] = *blake3::hash(seed.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed_bytes);

    let mut bars = Vec::with_capacity(count);
    let mut price = 100.0_f64;
    let mut current = start;

    while bars.len() < count {
        let weekday = current.weekday();
        if weekday == Weekday::Sat || weekday == Weekday::Sun {
            current += Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000.0..5_000_000.0_f64).round();

        bars.push(Bar::new(current, open, high, low, close, volume));

        price = close;
        current += Duration::days(1);
    }

    bars
}
