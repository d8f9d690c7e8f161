//! Multi-label classification evaluation metrics.
//!
//! Every operation is a pure function over label (0/1) and score matrices:
//! ROC AUC under micro, macro and support-weighted averaging, Precision@K
//! with a score threshold, average precision and mean average precision.

pub mod config;
pub mod error;
pub mod eval;

pub use config::Config;
pub use error::{MetricsError, Result};
pub use eval::{AucAverage, AucScores, BinaryAuc, MetricsReport, RankSumAuc, RankingMetrics};
