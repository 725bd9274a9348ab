//! Per-cluster scatter images: proportion on the x axis, one mark per
//! traffic type present in the cluster. Rendered without text layers;
//! the bitmap backend carries no font stack.

use std::path::Path;

use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::report::ClusterComposition;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// Writes `cluster_<id>.png` into `dir` for every composition.
pub fn plot_compositions(dir: &Path, compositions: &[ClusterComposition]) -> Result<()> {
    for composition in compositions {
        let path = dir.join(format!("cluster_{}.png", composition.cluster));
        render_composition(&path, composition)?;
    }
    Ok(())
}

fn render_composition(path: &Path, composition: &ClusterComposition) -> Result<()> {
    let n_types = composition.entries.len().max(1);
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(0.0..1.05f64, -0.5f64..(n_types as f64 - 0.5))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_labels(0)
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            composition
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| Circle::new((entry.proportion, i as f64), 4, RED.filled())),
        )
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn plot_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Plot(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CompositionEntry;
    use tempfile::tempdir;

    #[test]
    fn test_plot_writes_one_png_per_cluster() {
        let dir = tempdir().unwrap();
        let compositions = vec![
            ClusterComposition {
                cluster: 0,
                observations: 4,
                entries: vec![
                    CompositionEntry {
                        traffic_type: "benign_traffic".to_string(),
                        count: 3,
                        proportion: 0.75,
                    },
                    CompositionEntry {
                        traffic_type: "scan".to_string(),
                        count: 1,
                        proportion: 0.25,
                    },
                ],
            },
            ClusterComposition {
                cluster: 1,
                observations: 0,
                entries: vec![],
            },
        ];

        plot_compositions(dir.path(), &compositions).unwrap();

        for cluster in 0..2 {
            let path = dir.path().join(format!("cluster_{}.png", cluster));
            assert!(path.is_file());
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }
}
