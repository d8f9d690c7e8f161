//! ROC AUC for multi-label classification with micro, macro and
//! support-weighted macro averaging.
//!
//! Binary AUC is delegated to a [`BinaryAuc`] routine. The built-in
//! [`RankSumAuc`] uses the Mann–Whitney U formulation: average ranks over
//! tied scores, so a tied positive/negative pair counts half.

use crate::error::{MetricsError, Result};
use crate::eval::ranking::check_batch;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Binary ROC AUC over one column of labels and scores.
///
/// Implementations must fail with [`MetricsError::InvalidInput`] when only
/// one label value is present.
pub trait BinaryAuc {
    fn binary_auc(&self, labels: &[u8], scores: &[f64]) -> Result<f64>;
}

/// Rank-sum (Mann–Whitney U) AUC.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankSumAuc;

impl BinaryAuc for RankSumAuc {
    fn binary_auc(&self, labels: &[u8], scores: &[f64]) -> Result<f64> {
        if labels.len() != scores.len() {
            return Err(MetricsError::InvalidInput(format!(
                "labels length {} != scores length {}",
                labels.len(),
                scores.len()
            )));
        }
        if labels.is_empty() {
            return Err(MetricsError::InvalidInput("empty input".into()));
        }
        if let Some(pos) = labels.iter().position(|&l| l > 1) {
            return Err(MetricsError::InvalidInput(format!(
                "label {} at position {} is not binary",
                labels[pos], pos
            )));
        }
        if scores.iter().any(|s| s.is_nan()) {
            return Err(MetricsError::InvalidInput("scores contain NaN".into()));
        }

        let n_pos = labels.iter().filter(|&&l| l == 1).count();
        let n_neg = labels.len() - n_pos;
        if n_pos == 0 || n_neg == 0 {
            return Err(MetricsError::InvalidInput(format!(
                "only one class present in labels ({} positive, {} negative), \
                 ROC AUC is not defined",
                n_pos, n_neg
            )));
        }

        let ranks = average_ranks(scores);
        let rank_sum_pos: f64 = labels
            .iter()
            .zip(ranks.iter())
            .filter(|&(&l, _)| l == 1)
            .map(|(_, &r)| r)
            .sum();

        let p = n_pos as f64;
        let n = n_neg as f64;
        Ok((rank_sum_pos - p * (p + 1.0) / 2.0) / (p * n))
    }
}

/// Ascending 1-based ranks; tied scores share the mean of their ranks.
fn average_ranks(scores: &[f64]) -> Vec<f64> {
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && scores[order[j]] == scores[order[i]] {
            j += 1;
        }
        // ranks (i+1)..=j share their mean
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank;
        }
        i = j;
    }
    ranks
}

/// Averaging mode for multi-label AUC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AucAverage {
    /// One AUC over every (instance, class) cell.
    Micro,
    /// Unweighted mean of per-class AUC.
    Macro,
    /// Per-class AUC weighted by each class's share of positives.
    Weighted,
}

impl AucAverage {
    pub const ALL: [AucAverage; 3] =
        [AucAverage::Micro, AucAverage::Macro, AucAverage::Weighted];

    /// Key used in reports and in [`AucScores::to_map`].
    pub fn key(&self) -> &'static str {
        match self {
            AucAverage::Micro => "micro",
            AucAverage::Macro => "macro",
            AucAverage::Weighted => "macro_weighted",
        }
    }
}

impl fmt::Display for AucAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// AUC under all three averaging modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AucScores {
    pub micro: f64,
    #[serde(rename = "macro")]
    pub macro_avg: f64,
    pub macro_weighted: f64,
}

impl AucScores {
    pub fn get(&self, average: AucAverage) -> f64 {
        match average {
            AucAverage::Micro => self.micro,
            AucAverage::Macro => self.macro_avg,
            AucAverage::Weighted => self.macro_weighted,
        }
    }

    /// Results keyed by `micro`, `macro` and `macro_weighted`.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        AucAverage::ALL
            .iter()
            .map(|&mode| (mode.key(), self.get(mode)))
            .collect()
    }
}

/// Shape check for every AUC mode; a batch without classes has no AUC.
fn check_auc_batch(gold_labels: &[Vec<u8>], pred_sources: &[Vec<f64>]) -> Result<usize> {
    let num_class = check_batch(gold_labels, pred_sources)?;
    if num_class == 0 {
        return Err(MetricsError::InvalidArgument(format!(
            "AUC undefined: {} instances with no classes",
            gold_labels.len()
        )));
    }
    Ok(num_class)
}

/// Per-class AUC paired with that class's positive count.
struct ClassAuc {
    auc: f64,
    positives: usize,
}

fn micro_auc<A: BinaryAuc + ?Sized>(
    auc: &A,
    gold_labels: &[Vec<u8>],
    pred_sources: &[Vec<f64>],
) -> Result<f64> {
    let labels: Vec<u8> = gold_labels.iter().flatten().copied().collect();
    let scores: Vec<f64> = pred_sources.iter().flatten().copied().collect();
    auc.binary_auc(&labels, &scores)
}

fn per_class_auc<A: BinaryAuc + ?Sized>(
    auc: &A,
    gold_labels: &[Vec<u8>],
    pred_sources: &[Vec<f64>],
    num_class: usize,
) -> Result<Vec<ClassAuc>> {
    let mut out = Vec::with_capacity(num_class);
    for class in 0..num_class {
        let labels: Vec<u8> = gold_labels.iter().map(|row| row[class]).collect();
        let scores: Vec<f64> = pred_sources.iter().map(|row| row[class]).collect();
        let value = auc.binary_auc(&labels, &scores).map_err(|e| match e {
            MetricsError::InvalidInput(msg) => {
                MetricsError::InvalidInput(format!("class {}: {}", class, msg))
            }
            other => other,
        })?;
        log::trace!("AUC class {}: {:.4}", class, value);
        out.push(ClassAuc {
            auc: value,
            positives: labels.iter().filter(|&&l| l == 1).count(),
        });
    }
    Ok(out)
}

fn macro_mean(classes: &[ClassAuc]) -> f64 {
    classes.iter().map(|c| c.auc).sum::<f64>() / classes.len() as f64
}

fn weighted_mean(classes: &[ClassAuc]) -> Result<f64> {
    let total: usize = classes.iter().map(|c| c.positives).sum();
    if total == 0 {
        return Err(MetricsError::InvalidInput(
            "weighted AUC undefined: no positive labels in any class".into(),
        ));
    }
    Ok(classes
        .iter()
        .map(|c| c.auc * c.positives as f64 / total as f64)
        .sum())
}

/// Multi-label AUC under every averaging mode, using `auc` for each binary
/// evaluation.
pub fn classification_auc_with<A: BinaryAuc + ?Sized>(
    auc: &A,
    gold_labels: &[Vec<u8>],
    pred_sources: &[Vec<f64>],
) -> Result<AucScores> {
    let num_class = check_auc_batch(gold_labels, pred_sources)?;
    let micro = micro_auc(auc, gold_labels, pred_sources)?;
    let classes = per_class_auc(auc, gold_labels, pred_sources, num_class)?;
    Ok(AucScores {
        micro,
        macro_avg: macro_mean(&classes),
        macro_weighted: weighted_mean(&classes)?,
    })
}

/// Multi-label AUC under every averaging mode with [`RankSumAuc`].
///
/// # Errors
///
/// `InvalidArgument` on shape mismatch; `InvalidInput` when any class (or
/// the flattened matrix) has only positives or only negatives.
pub fn classification_auc(
    gold_labels: &[Vec<u8>],
    pred_sources: &[Vec<f64>],
) -> Result<AucScores> {
    classification_auc_with(&RankSumAuc, gold_labels, pred_sources)
}

/// Multi-label AUC for a single averaging mode, using `auc`.
pub fn roc_auc_with<A: BinaryAuc + ?Sized>(
    auc: &A,
    gold_labels: &[Vec<u8>],
    pred_sources: &[Vec<f64>],
    average: AucAverage,
) -> Result<f64> {
    let num_class = check_auc_batch(gold_labels, pred_sources)?;
    match average {
        AucAverage::Micro => micro_auc(auc, gold_labels, pred_sources),
        AucAverage::Macro => {
            let classes = per_class_auc(auc, gold_labels, pred_sources, num_class)?;
            Ok(macro_mean(&classes))
        }
        AucAverage::Weighted => {
            let classes = per_class_auc(auc, gold_labels, pred_sources, num_class)?;
            weighted_mean(&classes)
        }
    }
}

/// Multi-label AUC for a single averaging mode with [`RankSumAuc`].
pub fn roc_auc(
    gold_labels: &[Vec<u8>],
    pred_sources: &[Vec<f64>],
    average: AucAverage,
) -> Result<f64> {
    roc_auc_with(&RankSumAuc, gold_labels, pred_sources, average)
}
