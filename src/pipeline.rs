//! Per-device orchestration: assemble, standardize, reduce, select a
//! cluster count, cluster, report. Each device run is independent; the
//! first failing stage aborts the run with its error.

use std::path::Path;

use log::info;

use crate::DEFAULT_SEED;
use crate::cluster::KMeans;
use crate::dataset::{self, DeviceTable};
use crate::decomposition::{Pca, select_component_count};
use crate::error::{Error, Result};
use crate::plot::plot_compositions;
use crate::preprocessing::StandardScaler;
use crate::report::{AnalysisReport, cluster_compositions, label_spreads};
use crate::selection::score_cluster_counts;

#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// Fraction of variance the retained components must strictly exceed.
    pub variance_target: f64,
    /// Write the combined table as `<device>.csv`.
    pub save_combined: bool,
    /// Write the reduced matrix as `<device>_pca.csv`.
    pub save_reduced: bool,
    /// Seed threaded into every randomized stage.
    pub seed: u64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            variance_target: 0.9,
            save_combined: false,
            save_reduced: false,
            seed: DEFAULT_SEED,
        }
    }
}

pub fn run_device_analysis(dir: &Path, options: &AnalysisOptions) -> Result<AnalysisReport> {
    if !(options.variance_target > 0.0 && options.variance_target < 1.0) {
        return Err(Error::InvalidInput(format!(
            "variance target must lie in (0, 1), got {}",
            options.variance_target
        )));
    }

    let device = dataset::device_name(dir);
    let table = dataset::assemble(dir)?;
    info!(
        "{}: assembled {} rows, {} features",
        device,
        table.n_rows(),
        table.n_features()
    );

    if options.save_combined {
        let path = dir.join(format!("{}.csv", device));
        info!("{}: writing combined table to {}", device, path.display());
        table.save_csv(&path)?;
    }

    let reduced = reduce(&table, &device, options, dir)?;

    let scores = score_cluster_counts(&reduced, options.seed)?;
    let (best_k, best_score) = scores.best()?;
    info!(
        "{}: davies-bouldin minimum {:.4} at k={}",
        device, best_score, best_k
    );

    let assignments = KMeans::new(best_k)
        .seed(options.seed)
        .fit_predict(&reduced)?;

    let compositions = cluster_compositions(&table.labels, &assignments, best_k);
    let spreads = label_spreads(&table.labels, &assignments);
    plot_compositions(dir, &compositions)?;

    let n_components = reduced.ncols();
    let report = AnalysisReport {
        device,
        variance_target: options.variance_target,
        n_components,
        scores,
        best_k,
        best_score,
        compositions,
        spreads,
    };
    report.save(dir)?;
    Ok(report)
}

/// Standardize, pick the component count from a full fit, then refit
/// constrained to that count and project.
fn reduce(
    table: &DeviceTable,
    device: &str,
    options: &AnalysisOptions,
    dir: &Path,
) -> Result<crate::Matrix> {
    let mut scaler = StandardScaler::new();
    let standardized = scaler.fit_transform(&table.features)?;

    let mut full = Pca::new().seed(options.seed);
    full.fit(&standardized)?;
    let ratios = full.explained_variance_ratio.as_ref().ok_or(Error::NotFitted)?;
    let n_components = select_component_count(ratios, options.variance_target)?;
    info!(
        "{}: {} principal components explain > {} of the variance",
        device, n_components, options.variance_target
    );

    let mut constrained = Pca::new().n_components(n_components).seed(options.seed);
    let reduced = constrained.fit_transform(&standardized)?;

    if options.save_reduced {
        let path = dir.join(format!("{}_pca.csv", device));
        info!("{}: writing reduced matrix to {}", device, path.display());
        dataset::write_matrix_csv(&path, &reduced)?;
    }

    Ok(reduced)
}
