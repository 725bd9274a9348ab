//! Descriptive column summaries for the batch statistics pass.

use std::cmp::Ordering;

use crate::dataset::DeviceTable;

#[derive(Clone, Debug)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Count / mean / sample std / min / quartiles / max per feature column.
pub fn summarize(table: &DeviceTable) -> Vec<ColumnSummary> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(c, column)| {
            let mut values = table.features.column(c).to_vec();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

            let count = values.len();
            let mean = values.iter().sum::<f64>() / count as f64;
            let divisor = count.saturating_sub(1).max(1) as f64;
            let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / divisor;

            ColumnSummary {
                column: column.clone(),
                count,
                mean,
                std: variance.sqrt(),
                min: values.first().copied().unwrap_or(f64::NAN),
                q25: quantile(&values, 0.25),
                median: quantile(&values, 0.5),
                q75: quantile(&values, 0.75),
                max: values.last().copied().unwrap_or(f64::NAN),
            }
        })
        .collect()
}

/// One aligned row per column, pandas-describe style.
pub fn render_summaries(summaries: &[ColumnSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<28} {:>8} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}\n",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    ));
    for summary in summaries {
        out.push_str(&format!(
            "{:<28} {:>8} {:>14.6} {:>14.6} {:>14.6} {:>14.6} {:>14.6} {:>14.6} {:>14.6}\n",
            summary.column,
            summary.count,
            summary.mean,
            summary.std,
            summary.min,
            summary.q25,
            summary.median,
            summary.q75,
            summary.max
        ));
    }
    out
}

/// Linear-interpolation quantile over an already sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = q * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        let weight = position - low as f64;
        sorted[low] * (1.0 - weight) + sorted[high] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_table() -> DeviceTable {
        DeviceTable {
            columns: vec!["a".into(), "b".into()],
            features: array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0], [5.0, 50.0]],
            labels: vec!["benign_traffic".into(); 5],
        }
    }

    #[test]
    fn test_summary_statistics() {
        let summaries = summarize(&sample_table());

        assert_eq!(summaries.len(), 2);
        let a = &summaries[0];
        assert_eq!(a.count, 5);
        assert!((a.mean - 3.0).abs() < 1e-12);
        assert!((a.std - 1.5811388300841898).abs() < 1e-12);
        assert_eq!(a.min, 1.0);
        assert_eq!(a.q25, 2.0);
        assert_eq!(a.median, 3.0);
        assert_eq!(a.q75, 4.0);
        assert_eq!(a.max, 5.0);
    }

    #[test]
    fn test_quantile_interpolation() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&values, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile(&values, 0.5) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_render_includes_header_and_rows() {
        let rendered = render_summaries(&summarize(&sample_table()));
        let mut lines = rendered.lines();
        assert!(lines.next().unwrap().contains("mean"));
        assert_eq!(lines.count(), 2);
    }
}
