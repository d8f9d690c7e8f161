//! Average precision (AP) and mean average precision (MAP).

use crate::error::{MetricsError, Result};
use crate::eval::ranking::{check_batch, rank_instance};

/// Average precision for one instance.
///
/// Walks the ranked classes and, at each positive, adds
/// `positives_seen / rank`; the sum is divided by the number of positives.
/// An instance without positives is an error, not 0.
pub fn average_precision(gold_label: &[u8], pred_source: &[f64]) -> Result<f64> {
    let ranked = rank_instance(gold_label, pred_source)?;

    let mut sum = 0.0;
    let mut gold_count = 0usize;
    for (idx, pair) in ranked.iter().enumerate() {
        if pair.is_positive() {
            gold_count += 1;
            sum += gold_count as f64 / (idx + 1) as f64;
        }
    }

    if gold_count == 0 {
        return Err(MetricsError::InvalidArgument(format!(
            "average precision undefined: no positive labels among {} classes",
            gold_label.len()
        )));
    }
    Ok(sum / gold_count as f64)
}

/// Mean of [`average_precision`] over every instance of a batch.
///
/// Any zero-positive instance fails the whole batch; callers filter first.
pub fn mean_average_precision(
    gold_labels: &[Vec<u8>],
    pred_sources: &[Vec<f64>],
) -> Result<f64> {
    check_batch(gold_labels, pred_sources)?;
    let mut sum = 0.0;
    for (idx, (gold, pred)) in gold_labels.iter().zip(pred_sources.iter()).enumerate() {
        sum += average_precision(gold, pred).map_err(|e| match e {
            MetricsError::InvalidArgument(msg) => {
                MetricsError::InvalidArgument(format!("instance {}: {}", idx, msg))
            }
            other => other,
        })?;
    }
    Ok(sum / gold_labels.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_precision_known_value() {
        // ranks: 1 (pos), 2 (neg), 3 (pos), 4 (neg) → (1/1 + 2/3) / 2
        let ap = average_precision(&[1, 0, 1, 0], &[0.9, 0.8, 0.3, 0.1]).unwrap();
        assert!((ap - (1.0 + 2.0 / 3.0) / 2.0).abs() < 1e-12);
        assert!((ap - 0.833_333_333_333).abs() < 1e-9);
    }

    #[test]
    fn average_precision_perfect_ranking() {
        let ap = average_precision(&[0, 1, 0, 1, 1], &[0.1, 0.8, 0.2, 0.9, 0.7]).unwrap();
        assert!((ap - 1.0).abs() < 1e-12);
    }

    #[test]
    fn average_precision_worst_ranking() {
        // single positive ranked last of 4
        let ap = average_precision(&[1, 0, 0, 0], &[0.1, 0.9, 0.8, 0.7]).unwrap();
        assert!((ap - 0.25).abs() < 1e-12);
    }

    #[test]
    fn average_precision_no_positives_error() {
        let err = average_precision(&[0, 0, 0, 0], &[0.9, 0.8, 0.3, 0.1]).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidArgument(_)));
    }

    #[test]
    fn average_precision_empty_instance_error() {
        assert!(average_precision(&[], &[]).is_err());
    }

    #[test]
    fn average_precision_length_mismatch() {
        assert!(average_precision(&[1, 0], &[0.9]).is_err());
    }

    #[test]
    fn mean_average_precision_known_value() {
        let labels = vec![vec![1, 0, 1, 0], vec![0, 1, 0, 0]];
        let scores = vec![vec![0.9, 0.8, 0.3, 0.1], vec![0.1, 0.7, 0.6, 0.2]];
        let map = mean_average_precision(&labels, &scores).unwrap();
        assert!((map - (5.0 / 6.0 + 1.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn mean_average_precision_order_independent() {
        let labels = vec![vec![1, 0, 1, 0], vec![0, 1, 0, 0], vec![0, 0, 1, 1]];
        let scores = vec![
            vec![0.9, 0.8, 0.3, 0.1],
            vec![0.1, 0.2, 0.6, 0.7],
            vec![0.4, 0.3, 0.2, 0.5],
        ];
        let forward = mean_average_precision(&labels, &scores).unwrap();

        let order = [2, 0, 1];
        let shuffled_labels: Vec<Vec<u8>> = order.iter().map(|&i| labels[i].clone()).collect();
        let shuffled_scores: Vec<Vec<f64>> = order.iter().map(|&i| scores[i].clone()).collect();
        let shuffled = mean_average_precision(&shuffled_labels, &shuffled_scores).unwrap();
        assert!((forward - shuffled).abs() < 1e-12);
    }

    #[test]
    fn mean_average_precision_propagates_zero_positive() {
        let labels = vec![vec![1, 0], vec![0, 0]];
        let scores = vec![vec![0.9, 0.1], vec![0.5, 0.4]];
        let err = mean_average_precision(&labels, &scores).unwrap_err();
        assert!(err.to_string().contains("instance 1"));
    }

    #[test]
    fn mean_average_precision_length_mismatch() {
        let labels = vec![vec![1, 0], vec![0, 1]];
        let scores = vec![vec![0.9, 0.1]];
        assert!(mean_average_precision(&labels, &scores).is_err());
    }

    #[test]
    fn mean_average_precision_empty() {
        assert!(mean_average_precision(&[], &[]).is_err());
    }
}
