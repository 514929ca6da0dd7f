//! ROI comparison against traditional consulting and market benchmarks

pub mod benchmarks;
mod report;

pub use benchmarks::{ConsultingService, ServiceScope};
pub use report::ValueReport;
