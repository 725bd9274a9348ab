//! Cluster-count selection over a fixed candidate range.

use log::debug;

use crate::Matrix;
use crate::cluster::KMeans;
use crate::error::{Error, Result};
use crate::metrics::davies_bouldin_score;

/// Candidate cluster counts evaluated for every device.
pub const K_MIN: usize = 2;
pub const K_MAX: usize = 11;

/// Davies-Bouldin score per candidate cluster count, in ascending-k order.
#[derive(Clone, Debug)]
pub struct ScoreTable {
    pub entries: Vec<(usize, f64)>,
}

impl ScoreTable {
    /// Entry with the lowest score. The scan uses strict `<` against the
    /// running minimum, so ties resolve to the smallest k.
    pub fn best(&self) -> Result<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for &(k, score) in &self.entries {
            match best {
                None => best = Some((k, score)),
                Some((_, lowest)) if score < lowest => best = Some((k, score)),
                _ => {}
            }
        }
        best.ok_or_else(|| Error::InvalidInput("empty score table".into()))
    }
}

/// Runs the clustering engine for every k in `[K_MIN, K_MAX]` and scores
/// each assignment against `data`.
pub fn score_cluster_counts(data: &Matrix, seed: u64) -> Result<ScoreTable> {
    let mut entries = Vec::with_capacity(K_MAX - K_MIN + 1);
    for k in K_MIN..=K_MAX {
        let labels = KMeans::new(k).seed(seed).fit_predict(data)?;
        let score = davies_bouldin_score(data, &labels)?;
        debug!("k={}: davies-bouldin {:.4}", k, score);
        entries.push((k, score));
    }
    Ok(ScoreTable { entries })
}
