//! Shared ranking helper: (label, score) pairs ordered by descending score,
//! plus shape validation for label/score matrices.

use crate::error::{MetricsError, Result};
use std::cmp::Ordering;

/// One class of an instance after ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedPair {
    pub label: u8,
    pub score: f64,
}

impl RankedPair {
    /// True if the ground-truth label marks this class as positive.
    pub fn is_positive(&self) -> bool {
        self.label == 1
    }
}

/// Rank one instance's classes by descending score.
///
/// The sort is stable, so classes with equal scores keep their original
/// order. Labels must be 0/1 and scores must not be NaN.
pub fn rank_instance(labels: &[u8], scores: &[f64]) -> Result<Vec<RankedPair>> {
    if labels.len() != scores.len() {
        return Err(MetricsError::InvalidArgument(format!(
            "label length {} != score length {}",
            labels.len(),
            scores.len()
        )));
    }
    if let Some(pos) = labels.iter().position(|&l| l > 1) {
        return Err(MetricsError::InvalidArgument(format!(
            "label at class {} is {}, expected 0 or 1",
            pos, labels[pos]
        )));
    }
    if let Some(pos) = scores.iter().position(|s| s.is_nan()) {
        return Err(MetricsError::InvalidArgument(format!("score at class {} is NaN", pos)));
    }

    let mut ranked: Vec<RankedPair> = labels
        .iter()
        .zip(scores.iter())
        .map(|(&label, &score)| RankedPair { label, score })
        .collect();
    // slice::sort_by is stable; -0.0 and 0.0 compare equal and stay in input order
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(ranked)
}

/// Validate a pair of label/score matrices and return the class count.
///
/// Rejects empty batches, differing instance counts, and rows whose width
/// differs from the first label row.
pub fn check_batch(labels: &[Vec<u8>], scores: &[Vec<f64>]) -> Result<usize> {
    if labels.len() != scores.len() {
        return Err(MetricsError::InvalidArgument(format!(
            "label instances {} != score instances {}",
            labels.len(),
            scores.len()
        )));
    }
    if labels.is_empty() {
        return Err(MetricsError::InvalidArgument("no instances to evaluate".to_string()));
    }

    let num_class = labels[0].len();
    for (idx, (label_row, score_row)) in labels.iter().zip(scores.iter()).enumerate() {
        if label_row.len() != num_class || score_row.len() != num_class {
            return Err(MetricsError::InvalidArgument(format!(
                "instance {}: label width {} / score width {}, expected {}",
                idx,
                label_row.len(),
                score_row.len(),
                num_class
            )));
        }
    }
    Ok(num_class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_orders_by_descending_score() {
        let ranked = rank_instance(&[1, 0, 1, 0], &[0.3, 0.8, 0.9, 0.1]).unwrap();
        let scores: Vec<f64> = ranked.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![0.9, 0.8, 0.3, 0.1]);
        let labels: Vec<u8> = ranked.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec![1, 0, 1, 0]);
    }

    #[test]
    fn rank_ties_keep_original_order() {
        // classes 0..3 all score 0.5; their labels must come out in input order
        let ranked = rank_instance(&[0, 1, 1, 0], &[0.5, 0.5, 0.5, 0.5]).unwrap();
        let labels: Vec<u8> = ranked.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec![0, 1, 1, 0]);
    }

    #[test]
    fn rank_signed_zeros_are_tied() {
        let ranked = rank_instance(&[1, 0], &[-0.0, 0.0]).unwrap();
        let labels: Vec<u8> = ranked.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec![1, 0]);
        let ranked = rank_instance(&[0, 1], &[0.0, -0.0]).unwrap();
        let labels: Vec<u8> = ranked.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec![0, 1]);
    }

    #[test]
    fn rank_length_mismatch_error() {
        let err = rank_instance(&[1, 0], &[0.5]).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidArgument(_)));
    }

    #[test]
    fn rank_non_binary_label_error() {
        assert!(rank_instance(&[2, 0], &[0.5, 0.1]).is_err());
    }

    #[test]
    fn rank_nan_score_error() {
        assert!(rank_instance(&[1, 0], &[f64::NAN, 0.1]).is_err());
    }

    #[test]
    fn rank_empty_instance() {
        assert!(rank_instance(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn check_batch_returns_class_count() {
        let labels = vec![vec![1, 0, 0], vec![0, 1, 1]];
        let scores = vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]];
        assert_eq!(check_batch(&labels, &scores).unwrap(), 3);
    }

    #[test]
    fn check_batch_instance_mismatch() {
        let labels = vec![vec![1, 0], vec![0, 1]];
        let scores = vec![vec![0.9, 0.1]];
        let err = check_batch(&labels, &scores).unwrap_err();
        assert!(err.to_string().contains("2 != score instances 1"));
    }

    #[test]
    fn check_batch_empty() {
        assert!(check_batch(&[], &[]).is_err());
    }

    #[test]
    fn check_batch_ragged_rows() {
        let labels = vec![vec![1, 0], vec![0, 1, 0]];
        let scores = vec![vec![0.9, 0.1], vec![0.2, 0.8, 0.1]];
        assert!(check_batch(&labels, &scores).is_err());
    }
}
