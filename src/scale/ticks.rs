//! Tick generation and SI-prefixed label formatting for panel axes.

const E10: f64 = 7.0710678118654755; // √50
const E5: f64 = 3.1622776601683795; // √10
const E2: f64 = std::f64::consts::SQRT_2;

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Integer bounds and signed increment for a tick run.
///
/// A negative increment `-n` means ticks are `i / n` rather than `i * inc`,
/// which keeps sub-unit steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        inc = 10f64.powf(-power) / factor;
        i1 = (start * inc).round();
        i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        if i2 < i1 && (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        (i1, i2, -inc)
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        if i2 < i1 && (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        (i1, i2, inc)
    }
}

/// Nice step between ticks for the interval; negative for sub-unit steps.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Approximately `count` evenly spaced, round values within `[start, stop]`.
///
/// Steps are 1, 2 or 5 times a power of ten. Reversed intervals produce
/// descending ticks.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if i2 < i1 || i1.is_nan() || i2.is_nan() {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Format `value` with `precision` significant digits and an SI prefix
/// (`2100` → `2.10k` at precision 3).
pub fn format_si(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let precision = precision.max(1);
    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, exponent) = decimal_parts(value.abs(), precision);

    let prefix_exponent = (exponent.div_euclid(3)).clamp(-8, 8) * 3;
    let split = exponent - prefix_exponent + 1;
    let n = digits.len() as i32;

    let body = if split == n {
        digits
    } else if split > n {
        format!("{}{}", digits, "0".repeat((split - n) as usize))
    } else if split > 0 {
        let (int_part, frac_part) = digits.split_at(split as usize);
        format!("{int_part}.{frac_part}")
    } else {
        let keep = (precision as i32 + split - 1).max(0) as usize;
        let (tail, _) = decimal_parts(value.abs(), keep.max(1));
        format!("0.{}{}", "0".repeat((-split) as usize), tail)
    };

    let prefix = SI_PREFIXES[(8 + prefix_exponent / 3) as usize];
    format!("{sign}{body}{prefix}")
}

/// Significant digits (no decimal point) and base-10 exponent of `value`
/// rounded to `precision` digits.
fn decimal_parts(value: f64, precision: usize) -> (String, i32) {
    let rendered = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    (digits, exponent.parse().unwrap_or(0))
}
