//! Precision@K over ranked class scores.

use crate::error::{MetricsError, Result};
use crate::eval::ranking::{check_batch, rank_instance};

/// Precision at K for one instance: proportion of the top-K ranked classes
/// that are labelled positive and scored at or above `threshold`.
///
/// Returns 0.0 if k is 0. Fails when k exceeds the class count.
pub fn precision_at_k_one_instance(
    gold_label: &[u8],
    pred_source: &[f64],
    k: usize,
    threshold: f64,
) -> Result<f64> {
    if k == 0 {
        return Ok(0.0);
    }
    let num_class = gold_label.len();
    if k > num_class {
        return Err(MetricsError::InvalidArgument(format!(
            "k is greater than the number of classes (k: {}, num_class: {})",
            k, num_class
        )));
    }

    let ranked = rank_instance(gold_label, pred_source)?;
    let true_positives = ranked
        .iter()
        .take(k)
        .filter(|p| p.is_positive() && p.score >= threshold)
        .count();
    Ok(true_positives as f64 / k as f64)
}

/// Precision at K averaged over every instance of a batch.
pub fn precision_at_k(
    gold_labels: &[Vec<u8>],
    pred_sources: &[Vec<f64>],
    k: usize,
    threshold: f64,
) -> Result<f64> {
    check_batch(gold_labels, pred_sources)?;
    let mut sum = 0.0;
    for (gold, pred) in gold_labels.iter().zip(pred_sources.iter()) {
        sum += precision_at_k_one_instance(gold, pred, k, threshold)?;
    }
    Ok(sum / gold_labels.len() as f64)
}
