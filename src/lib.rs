pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod cluster;
pub mod dataset;
pub mod decomposition;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod plot;
pub mod preprocessing;
pub mod report;
pub mod selection;
pub mod stats;

pub use cluster::KMeans;
pub use dataset::DeviceTable;
pub use decomposition::Pca;
pub use error::{Error, Result};
pub use pipeline::{AnalysisOptions, run_device_analysis};
pub use preprocessing::StandardScaler;
pub use report::AnalysisReport;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

/// Seed shared by every stage that draws random numbers, unless the caller
/// overrides it.
pub const DEFAULT_SEED: u64 = 11;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
