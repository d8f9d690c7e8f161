//! `RankingMetrics`: configured entry point over AUC, Precision@K and MAP.

use crate::config::Config;
use crate::error::Result;
use crate::eval::auc::{
    classification_auc_with, roc_auc_with, AucAverage, AucScores, BinaryAuc, RankSumAuc,
};
use crate::eval::average_precision::{average_precision, mean_average_precision};
use crate::eval::precision::{precision_at_k, precision_at_k_one_instance};
use crate::eval::ranking::check_batch;
use serde::Serialize;

/// Every metric for one label/score batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub num_instances: usize,
    pub num_classes: usize,
    pub top_k: usize,
    pub threshold: f64,
    pub auc: AucScores,
    pub precision_at_k: f64,
    pub mean_average_precision: f64,
}

/// Multi-label ranking metrics with an injected binary AUC routine.
///
/// Holds no mutable state; one instance can be shared across threads when
/// `A` is `Sync`.
#[derive(Debug, Clone)]
pub struct RankingMetrics<A = RankSumAuc> {
    auc: A,
    top_k: usize,
    threshold: f64,
}

impl RankingMetrics<RankSumAuc> {
    /// Rank-sum AUC with the given Precision@K cut-off and threshold.
    pub fn new(top_k: usize, threshold: f64) -> Self {
        Self::with_auc(RankSumAuc, top_k, threshold)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.metrics.top_k, config.metrics.threshold)
    }
}

impl Default for RankingMetrics<RankSumAuc> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl<A: BinaryAuc> RankingMetrics<A> {
    /// Use an already-initialized AUC routine instead of [`RankSumAuc`].
    pub fn with_auc(auc: A, top_k: usize, threshold: f64) -> Self {
        Self {
            auc,
            top_k,
            threshold,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn classification_auc(
        &self,
        gold_labels: &[Vec<u8>],
        pred_sources: &[Vec<f64>],
    ) -> Result<AucScores> {
        classification_auc_with(&self.auc, gold_labels, pred_sources)
    }

    pub fn roc_auc(
        &self,
        gold_labels: &[Vec<u8>],
        pred_sources: &[Vec<f64>],
        average: AucAverage,
    ) -> Result<f64> {
        roc_auc_with(&self.auc, gold_labels, pred_sources, average)
    }

    pub fn precision_at_k_one_instance(
        &self,
        gold_label: &[u8],
        pred_source: &[f64],
        k: usize,
        threshold: f64,
    ) -> Result<f64> {
        precision_at_k_one_instance(gold_label, pred_source, k, threshold)
    }

    pub fn precision_at_k(
        &self,
        gold_labels: &[Vec<u8>],
        pred_sources: &[Vec<f64>],
        k: usize,
        threshold: f64,
    ) -> Result<f64> {
        precision_at_k(gold_labels, pred_sources, k, threshold)
    }

    pub fn average_precision(&self, gold_label: &[u8], pred_source: &[f64]) -> Result<f64> {
        average_precision(gold_label, pred_source)
    }

    pub fn mean_average_precision(
        &self,
        gold_labels: &[Vec<u8>],
        pred_sources: &[Vec<f64>],
    ) -> Result<f64> {
        mean_average_precision(gold_labels, pred_sources)
    }

    /// Compute AUC, Precision@K (configured k and threshold) and MAP.
    ///
    /// The first failing metric's error is returned; no partial report.
    pub fn evaluate(
        &self,
        gold_labels: &[Vec<u8>],
        pred_sources: &[Vec<f64>],
    ) -> Result<MetricsReport> {
        let num_classes = check_batch(gold_labels, pred_sources)?;
        let auc = self.classification_auc(gold_labels, pred_sources)?;
        let p_at_k =
            self.precision_at_k(gold_labels, pred_sources, self.top_k, self.threshold)?;
        let map = self.mean_average_precision(gold_labels, pred_sources)?;

        log::debug!(
            "Evaluated {} instances x {} classes: AUC micro {:.4}, P@{} {:.4}, MAP {:.4}",
            gold_labels.len(),
            num_classes,
            auc.micro,
            self.top_k,
            p_at_k,
            map
        );

        Ok(MetricsReport {
            num_instances: gold_labels.len(),
            num_classes,
            top_k: self.top_k,
            threshold: self.threshold,
            auc,
            precision_at_k: p_at_k,
            mean_average_precision: map,
        })
    }
}
