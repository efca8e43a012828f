pub mod analysis;
pub mod database;
pub mod metrics;

pub use analysis::{
    AnalysisError, DisabledAnalyzer, HttpProgressAnalyzer, ImageUpload, ProgressAnalyzer,
    ProgressRequest,
};
pub use database::CareDb;
pub use metrics::{get_metrics, init_metrics, record_analysis, record_submission};
