// Report module: strategic report synthesis (third pipeline stage).

pub mod synthesizer;

pub use synthesizer::{LlmReportSynthesizer, ReportSynthesizer};
