// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generation for continuous domains.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Returns "nice" tick values covering `[min, max]`, aiming for roughly
/// `count` ticks at 1/2/5-multiple steps.
pub fn linear_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = tick_step((max - min) / count.max(1) as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }
    ticks_by_step(min, max, step)
}

/// Rounds a raw step up to the nearest 1/2/5 multiple of a power of ten.
fn tick_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual >= 7.5 {
        10.0
    } else if residual >= 3.5 {
        5.0
    } else if residual >= 1.5 {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

fn ticks_by_step(min: f64, max: f64, step: f64) -> Vec<f64> {
    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;
    let n_f = ((stop - start) / step).round();
    if !n_f.is_finite() || n_f < 0.0 {
        return Vec::new();
    }
    let n_f = n_f.min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "guarded by finite/non-negative checks and capped at 10k"
    )]
    let n = n_f as u64;
    (0..=n).map(|i| start + step * i as f64).collect()
}

/// Returns powers of `base` covering a positive `[min, max]` domain, capped
/// by `count` (0 = uncapped).
pub fn log_ticks(mut min: f64, mut max: f64, base: f64, count: usize) -> Vec<f64> {
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    if min <= 0.0 || !min.is_finite() || !max.is_finite() || base <= 1.0 {
        return Vec::new();
    }
    let log = |x: f64| x.ln() / base.ln();
    let lo = clamp_to_i32(log(min).floor());
    let hi = clamp_to_i32(log(max).ceil());
    let mut out = Vec::new();
    for e in lo..=hi {
        out.push(base.powi(e));
        if count != 0 && out.len() >= count {
            break;
        }
    }
    out
}

fn clamp_to_i32(e: f64) -> i32 {
    let e = e.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
    {
        e as i32
    }
}

// Calendar-friendly steps: seconds, minutes, hours, days, weeks, ~months,
// ~years. Above a year, fall back to 1/2/5 multiples of years.
const TIME_STEPS_SECONDS: &[f64] = &[
    1.0,
    5.0,
    15.0,
    30.0,
    60.0,
    5.0 * 60.0,
    15.0 * 60.0,
    30.0 * 60.0,
    3_600.0,
    3.0 * 3_600.0,
    6.0 * 3_600.0,
    12.0 * 3_600.0,
    86_400.0,
    2.0 * 86_400.0,
    7.0 * 86_400.0,
    30.0 * 86_400.0,
    90.0 * 86_400.0,
    365.0 * 86_400.0,
];

/// Returns "nice" tick values for a time domain expressed in seconds,
/// stepping at calendar-friendly intervals.
pub fn time_ticks_seconds(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let raw = (max - min) / count.max(1) as f64;
    let step = match TIME_STEPS_SECONDS.iter().find(|&&s| s >= raw) {
        Some(&s) => s,
        // Beyond one-year steps: nice multiples of years.
        None => tick_step(raw / (365.0 * 86_400.0)) * 365.0 * 86_400.0,
    };
    if step == 0.0 {
        return alloc::vec![min, max];
    }
    ticks_by_step(min, max, step)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_ticks_cover_the_domain_with_nice_steps() {
        let t = linear_ticks(0.0, 10.0, 5);
        assert_eq!(t, alloc::vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let t = linear_ticks(0.13, 0.97, 5);
        assert!(*t.first().unwrap() <= 0.13);
        assert!(*t.last().unwrap() >= 0.97);
    }

    #[test]
    fn linear_ticks_accept_reversed_and_degenerate_domains() {
        assert_eq!(linear_ticks(10.0, 0.0, 5).first(), Some(&0.0));
        assert_eq!(linear_ticks(3.0, 3.0, 5), alloc::vec![3.0]);
    }

    #[test]
    fn log_ticks_are_powers_of_base() {
        assert_eq!(log_ticks(1.0, 1000.0, 10.0, 0), alloc::vec![
            1.0, 10.0, 100.0, 1000.0
        ]);
        assert!(log_ticks(-1.0, 10.0, 10.0, 0).is_empty());
    }

    #[test]
    fn time_ticks_step_at_calendar_intervals() {
        // 0..2 hours at ~4 ticks steps by 30 minutes.
        let t = time_ticks_seconds(0.0, 7_200.0, 4);
        assert_eq!(t[1] - t[0], 1_800.0);

        // Ten days at ~5 ticks steps by 2 days.
        let t = time_ticks_seconds(0.0, 10.0 * 86_400.0, 5);
        assert_eq!(t[1] - t[0], 2.0 * 86_400.0);
    }
}
