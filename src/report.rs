//! Structured analysis report: cluster compositions, label spreads, and
//! the rendered per-device text artifact.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::selection::ScoreTable;

#[derive(Clone, Debug, PartialEq)]
pub struct CompositionEntry {
    pub traffic_type: String,
    pub count: usize,
    /// Fraction of the cluster's rows with this label, rounded to 4 decimals.
    pub proportion: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClusterComposition {
    pub cluster: usize,
    pub observations: usize,
    pub entries: Vec<CompositionEntry>,
}

/// Per-cluster label breakdown, one element per cluster id in `[0, k)`.
/// Labels within a cluster appear in sorted order.
pub fn cluster_compositions(
    labels: &[String],
    assignments: &[usize],
    k: usize,
) -> Vec<ClusterComposition> {
    let mut compositions = Vec::with_capacity(k);
    for cluster in 0..k {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut observations = 0usize;
        for (label, &assigned) in labels.iter().zip(assignments.iter()) {
            if assigned == cluster {
                *counts.entry(label.as_str()).or_insert(0) += 1;
                observations += 1;
            }
        }
        let entries = counts
            .into_iter()
            .map(|(traffic_type, count)| CompositionEntry {
                traffic_type: traffic_type.to_string(),
                count,
                proportion: round4(count as f64 / observations as f64),
            })
            .collect();
        compositions.push(ClusterComposition {
            cluster,
            observations,
            entries,
        });
    }
    compositions
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelSpread {
    pub label: String,
    /// (cluster id, rows of this label in that cluster), ascending by id.
    pub per_cluster: Vec<(usize, usize)>,
}

impl LabelSpread {
    pub fn render(&self) -> String {
        let clusters: Vec<String> = self.per_cluster.iter().map(|(c, _)| c.to_string()).collect();
        let counts: Vec<String> = self.per_cluster.iter().map(|(_, n)| n.to_string()).collect();
        format!(
            "{} {{clusters: [{}], counts: [{}]}}",
            self.label,
            clusters.join(", "),
            counts.join(", ")
        )
    }
}

/// How each distinct label distributes across the clusters, labels in
/// sorted order.
pub fn label_spreads(labels: &[String], assignments: &[usize]) -> Vec<LabelSpread> {
    let mut by_label: BTreeMap<&str, BTreeMap<usize, usize>> = BTreeMap::new();
    for (label, &cluster) in labels.iter().zip(assignments.iter()) {
        *by_label
            .entry(label.as_str())
            .or_default()
            .entry(cluster)
            .or_insert(0) += 1;
    }
    by_label
        .into_iter()
        .map(|(label, clusters)| LabelSpread {
            label: label.to_string(),
            per_cluster: clusters.into_iter().collect(),
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct AnalysisReport {
    pub device: String,
    pub variance_target: f64,
    pub n_components: usize,
    pub scores: ScoreTable,
    pub best_k: usize,
    pub best_score: f64,
    pub compositions: Vec<ClusterComposition>,
    pub spreads: Vec<LabelSpread>,
}

impl AnalysisReport {
    /// Fixed section order: device, component count, score table, winning
    /// k, per-cluster counts, per-label spreads.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.device);
        out.push('\n');
        out.push_str(&format!(
            "Number of principal components used to explain {} of the variation : {}\n",
            self.variance_target, self.n_components
        ));

        let scores: Vec<String> = self
            .scores
            .entries
            .iter()
            .map(|(k, score)| format!("{}: {}", k, score))
            .collect();
        out.push_str(&format!("Davies-Bouldin indices : {{{}}}\n", scores.join(", ")));
        out.push_str(&format!(
            "The lowest value of the Davies-Bouldin index ({}) was obtained for K = {}\n",
            self.best_score, self.best_k
        ));

        out.push_str("Number of obs in the different clusters: \n");
        let counts: Vec<String> = self
            .compositions
            .iter()
            .map(|c| format!("{}: {}", c.cluster, c.observations))
            .collect();
        out.push_str(&format!("{{{}}}\n", counts.join(", ")));

        out.push_str("Distribution of the labels among the different clusters: \n");
        for spread in &self.spreads {
            out.push_str(&spread.render());
            out.push('\n');
        }
        out
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::write(dir.join("output_file.txt"), self.render())?;
        Ok(())
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
