use serde::Serialize;

use crate::scale::{format_si, LinearScale};

/// Significant digits in tick labels.
const LABEL_PRECISION: usize = 3;

/// One labelled tick on a panel axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    /// Genome coordinate.
    pub value: f64,
    /// Horizontal offset inside the panel.
    pub offset: f64,
    /// Formatted label.
    pub label: String,
}

/// Ticks for a panel's bottom axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AxisSpec {
    /// Ticks in ascending order, always including both domain ends.
    pub ticks: Vec<AxisTick>,
}

impl AxisSpec {
    /// Default ticks of `inner` plus both ends of its domain.
    pub fn for_scale(inner: &LinearScale, count: usize) -> Self {
        let (lo, hi) = inner.domain();
        let mut values = inner.ticks(count);
        values.push(lo);
        values.push(hi);
        values.sort_by(f64::total_cmp);
        values.dedup();

        let ticks = values
            .into_iter()
            .map(|value| AxisTick {
                value,
                offset: inner.apply(value),
                label: format_si(value, LABEL_PRECISION),
            })
            .collect();
        Self { ticks }
    }

    /// Tick labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_always_labelled() {
        let inner = LinearScale::new((1_234.0, 1_987.0), (0.0, 300.0)).expect("valid scale");
        let axis = AxisSpec::for_scale(&inner, 10);
        let first = axis.ticks.first().expect("ticks");
        let last = axis.ticks.last().expect("ticks");
        assert_eq!(first.value, 1_234.0);
        assert_eq!(first.offset, 0.0);
        assert_eq!(last.value, 1_987.0);
        assert_eq!(last.label, "1.99k");
    }

    #[test]
    fn round_endpoints_are_not_duplicated() {
        let inner = LinearScale::new((1_000.0, 2_000.0), (0.0, 100.0)).expect("valid scale");
        let axis = AxisSpec::for_scale(&inner, 10);
        assert_eq!(axis.ticks.len(), 11);
        assert_eq!(axis.labels()[0], "1.00k");
        assert_eq!(axis.labels()[10], "2.00k");
    }
}
