//! Round-number tick arithmetic shared by linear and time scales.

const E10: f64 = 7.071_067_811_865_475; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Largest tick count honoured; larger hints are treated as this value.
pub const MAX_TICK_HINT: usize = 1_000;

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Integer tick bounds plus increment.
///
/// A negative `increment` means the real step is `1 / -increment`; this keeps
/// fractional steps exact (`0.1` is represented as `-10`).
#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    first: f64,
    last: f64,
    increment: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> TickSpec {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);

    let (mut first, mut last, increment) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut first = (start * inc).round();
        let mut last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        (first, last, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut first = (start / inc).round();
        let mut last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        (first, last, inc)
    };

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if !first.is_finite() || !last.is_finite() {
        first = 0.0;
        last = -1.0;
    }
    TickSpec {
        first,
        last,
        increment,
    }
}

/// Round tick values covering `[start, stop]`, roughly `count` of them.
///
/// The count is a hint: the result favours 1/2/5 multiples of a power of ten
/// over hitting the requested number exactly.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let spec = tick_spec(lo, hi, count.min(MAX_TICK_HINT) as f64);
    if spec.last < spec.first {
        return Vec::new();
    }

    let n = (spec.last - spec.first) as usize + 1;
    let mut values: Vec<f64> = (0..n)
        .map(|i| {
            let k = spec.first + i as f64;
            if spec.increment < 0.0 {
                k / -spec.increment
            } else {
                k * spec.increment
            }
        })
        .collect();
    if reverse {
        values.reverse();
    }
    values
}

/// Signed increment encoding used by [`nice_domain`].
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count.min(MAX_TICK_HINT) as f64).increment
}

/// Absolute distance between adjacent ticks.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let increment = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    };
    if reverse { -step } else { step }
}

/// Widens `(lo, hi)` outward until both ends sit on a tick boundary.
///
/// Iterates until the increment stops changing, so the result never narrows
/// the input extent.
#[must_use]
pub fn nice_domain(lo: f64, hi: f64, count: usize) -> (f64, f64) {
    if count == 0 || !lo.is_finite() || !hi.is_finite() || lo == hi {
        return (lo, hi);
    }

    let reverse = hi < lo;
    let (mut start, mut stop) = if reverse { (hi, lo) } else { (lo, hi) };
    let mut previous = None;

    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if previous == Some(step) {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        previous = Some(step);
    }

    if reverse { (stop, start) } else { (start, stop) }
}

/// Fixed decimal places needed to print ticks spaced `step` apart.
#[must_use]
pub fn precision_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        (-exponent) as usize
    }
}

/// Formats a numeric tick with thousands grouping and step-derived precision.
#[must_use]
pub fn format_number_tick(value: f64, step: f64) -> String {
    let precision = precision_for_step(step);
    let formatted = format!("{:.*}", precision, value);
    let (sign, body) = match formatted.strip_prefix('-') {
        Some(rest) if rest.chars().any(|c| c != '0' && c != '.') => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", formatted.as_str()),
    };
    let (integer, fraction) = match body.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (body, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
