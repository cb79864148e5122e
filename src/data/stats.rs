use std::cmp::Ordering;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Summary statistics over present values
// ---------------------------------------------------------------------------

/// Arithmetic mean of the present values, `None` when there are none.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .filter_map(|v| *v)
        .fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Sample standard deviation (N−1 denominator) of the present values.
/// Needs at least two present values.
pub fn std_dev(values: &[Option<f64>]) -> Option<f64> {
    let m = mean(values)?;
    let (ss, n) = values
        .iter()
        .filter_map(|v| *v)
        .fold((0.0, 0usize), |(s, n), x| (s + (x - m).powi(2), n + 1));
    (n > 1).then(|| (ss / (n - 1) as f64).sqrt())
}

// ---------------------------------------------------------------------------
// Frequency counting
// ---------------------------------------------------------------------------

/// An `f64` with a total order, so values can key a `BTreeMap`.
/// `-0.0` is normalised to `0.0` on construction.
#[derive(Debug, Clone, Copy)]
pub struct OrderedValue(f64);

impl OrderedValue {
    pub fn new(v: f64) -> Self {
        OrderedValue(v + 0.0)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for OrderedValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedValue {}

impl PartialOrd for OrderedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Count occurrences of each distinct value, in ascending value order.
pub fn value_counts(values: impl IntoIterator<Item = f64>) -> BTreeMap<OrderedValue, usize> {
    let mut counts = BTreeMap::new();
    for v in values {
        *counts.entry(OrderedValue::new(v)).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value; ties go to the smallest value.
pub fn mode(counts: &BTreeMap<OrderedValue, usize>) -> Option<(f64, usize)> {
    // Ascending iteration + strict `>` keeps the first (smallest) of equals.
    let mut best: Option<(f64, usize)> = None;
    for (value, &count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value.get(), count));
        }
    }
    best
}
