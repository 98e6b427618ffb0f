use serde::{Deserialize, Serialize};

/// Summary statistics over the answer values, each rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Mean, median and sample standard deviation (n - 1 denominator).
///
/// The deviation is 0 for fewer than two values; an empty slice gives all zeros.
pub fn compute(values: &[u8]) -> StatisticsSummary {
    if values.is_empty() {
        return StatisticsSummary { mean: 0.0, median: 0.0, std_dev: 0.0 };
    }

    let n = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    } else {
        f64::from(sorted[mid])
    };

    let std_dev = if values.len() > 1 {
        let squared: f64 = values.iter().map(|&v| (f64::from(v) - mean).powi(2)).sum();
        (squared / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    StatisticsSummary {
        mean: round2(mean),
        median: round2(median),
        std_dev: round2(std_dev),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
