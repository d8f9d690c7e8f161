//! Evaluation metrics: multi-label AUC, Precision@K, average precision and MAP.

pub mod auc;
pub mod average_precision;
pub mod metrics;
pub mod precision;
pub mod ranking;

pub use auc::{classification_auc, roc_auc, AucAverage, AucScores, BinaryAuc, RankSumAuc};
pub use average_precision::{average_precision, mean_average_precision};
pub use metrics::{MetricsReport, RankingMetrics};
pub use precision::{precision_at_k, precision_at_k_one_instance};
pub use ranking::RankedPair;
