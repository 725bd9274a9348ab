use ndarray::ArrayView1;

use crate::error::{Error, Result};
use crate::Matrix;

/// Davies-Bouldin internal validity index: the mean over clusters of the
/// worst (scatter_i + scatter_j) / separation_ij ratio. Lower values mean
/// tighter, better-separated clusters.
///
/// Clusters with no points are skipped; at least two populated clusters
/// are required.
pub fn davies_bouldin_score(x: &Matrix, labels: &[usize]) -> Result<f64> {
    if x.nrows() != labels.len() {
        return Err(Error::InvalidInput(
            "x and labels must have the same length".into(),
        ));
    }
    if labels.is_empty() {
        return Err(Error::InvalidInput("no points to score".into()));
    }

    let n_clusters = labels.iter().copied().max().unwrap_or(0) + 1;

    let mut centroids = Matrix::zeros((n_clusters, x.ncols()));
    let mut counts = vec![0usize; n_clusters];
    for (i, &k) in labels.iter().enumerate() {
        let mut row = centroids.row_mut(k);
        row += &x.row(i);
        counts[k] += 1;
    }

    let populated: Vec<usize> = (0..n_clusters).filter(|&k| counts[k] > 0).collect();
    if populated.len() < 2 {
        return Err(Error::InvalidInput(
            "davies-bouldin needs at least two populated clusters".into(),
        ));
    }

    for &k in &populated {
        let centroid = centroids.row(k).mapv(|v| v / counts[k] as f64);
        centroids.row_mut(k).assign(&centroid);
    }

    // Mean distance of each cluster's points to its centroid.
    let mut scatter = vec![0.0; n_clusters];
    for (i, &k) in labels.iter().enumerate() {
        scatter[k] += euclidean(&x.row(i), &centroids.row(k));
    }
    for &k in &populated {
        scatter[k] /= counts[k] as f64;
    }

    let mut total = 0.0;
    for &i in &populated {
        let mut worst: f64 = 0.0;
        for &j in &populated {
            if i == j {
                continue;
            }
            let separation = euclidean(&centroids.row(i), &centroids.row(j));
            let ratio = if separation > 0.0 {
                (scatter[i] + scatter[j]) / separation
            } else {
                f64::INFINITY
            };
            worst = worst.max(ratio);
        }
        total += worst;
    }

    Ok(total / populated.len() as f64)
}

fn euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_separated_scores_lower_than_overlapping() {
        let separated = array![
            [0.0, 0.0],
            [0.1, 0.1],
            [0.2, 0.0],
            [10.0, 10.0],
            [10.1, 10.1],
            [10.2, 10.0]
        ];
        let overlapping = array![
            [0.0, 0.0],
            [1.0, 1.0],
            [2.0, 0.0],
            [0.5, 0.5],
            [1.5, 1.5],
            [2.5, 0.5]
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];

        let good = davies_bouldin_score(&separated, &labels).unwrap();
        let bad = davies_bouldin_score(&overlapping, &labels).unwrap();

        assert!(good < bad);
        assert!(good > 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let x = array![[0.0, 0.0], [1.0, 1.0]];
        assert!(davies_bouldin_score(&x, &[0]).is_err());
    }

    #[test]
    fn test_single_cluster_rejected() {
        let x = array![[0.0, 0.0], [1.0, 1.0]];
        assert!(davies_bouldin_score(&x, &[0, 0]).is_err());
    }

    #[test]
    fn test_empty_cluster_id_skipped() {
        // id 1 is absent; ids 0 and 2 still give a valid score
        let x = array![[0.0, 0.0], [0.1, 0.1], [5.0, 5.0], [5.1, 5.1]];
        let labels = vec![0, 0, 2, 2];

        assert!(davies_bouldin_score(&x, &labels).is_ok());
    }
}
