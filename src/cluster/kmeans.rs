use ndarray::ArrayView1;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{Error, Result};
use crate::{DEFAULT_SEED, Matrix};

#[derive(Clone, Debug)]
pub struct KMeans {
    pub centroids: Option<Matrix>,
    pub labels: Option<Vec<usize>>,
    pub inertia: Option<f64>,
    n_clusters: usize,
    max_iter: usize,
    tolerance: f64,
    seed: u64,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        if n_clusters == 0 {
            panic!("n_clusters must be > 0, got {}", n_clusters);
        }

        Self {
            centroids: None,
            labels: None,
            inertia: None,
            n_clusters,
            max_iter: 300,
            tolerance: 1e-4,
            seed: DEFAULT_SEED,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(Error::InvalidInput(
                "input matrix must have at least one sample and one feature".into(),
            ));
        }
        if x.nrows() < self.n_clusters {
            return Err(Error::InvalidInput(format!(
                "n_samples={} should be >= n_clusters={}",
                x.nrows(),
                self.n_clusters
            )));
        }

        let mut centroids = self.initial_centroids(x);
        let mut labels = vec![0usize; x.nrows()];

        for _ in 0..self.max_iter {
            let old_centroids = centroids.clone();

            for i in 0..x.nrows() {
                labels[i] = nearest_centroid(&x.row(i), &centroids);
            }

            // Cluster means; an empty cluster keeps its previous centroid.
            let mut sums = Matrix::zeros((self.n_clusters, x.ncols()));
            let mut counts = vec![0usize; self.n_clusters];
            for i in 0..x.nrows() {
                let k = labels[i];
                let mut row = sums.row_mut(k);
                row += &x.row(i);
                counts[k] += 1;
            }
            for k in 0..self.n_clusters {
                if counts[k] > 0 {
                    let centroid = sums.row(k).mapv(|v| v / counts[k] as f64);
                    centroids.row_mut(k).assign(&centroid);
                }
            }

            if max_centroid_shift(&old_centroids, &centroids) < self.tolerance {
                break;
            }
        }

        // Final assignment against the converged centroids.
        for i in 0..x.nrows() {
            labels[i] = nearest_centroid(&x.row(i), &centroids);
        }

        let mut inertia = 0.0;
        for i in 0..x.nrows() {
            let distance = euclidean(&x.row(i), &centroids.row(labels[i]));
            inertia += distance * distance;
        }

        self.centroids = Some(centroids);
        self.labels = Some(labels);
        self.inertia = Some(inertia);

        Ok(())
    }

    pub fn fit_predict(&mut self, x: &Matrix) -> Result<Vec<usize>> {
        self.fit(x)?;
        self.labels.clone().ok_or(Error::NotFitted)
    }

    /// k distinct rows drawn with the configured seed.
    fn initial_centroids(&self, x: &Matrix) -> Matrix {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let picks = rand::seq::index::sample(&mut rng, x.nrows(), self.n_clusters);

        let mut centroids = Matrix::zeros((self.n_clusters, x.ncols()));
        for (k, idx) in picks.into_iter().enumerate() {
            centroids.row_mut(k).assign(&x.row(idx));
        }
        centroids
    }
}

fn nearest_centroid(point: &ArrayView1<f64>, centroids: &Matrix) -> usize {
    let mut min_distance = f64::INFINITY;
    let mut closest = 0;
    for k in 0..centroids.nrows() {
        let distance = euclidean(point, &centroids.row(k));
        if distance < min_distance {
            min_distance = distance;
            closest = k;
        }
    }
    closest
}

fn euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn max_centroid_shift(old_centroids: &Matrix, new_centroids: &Matrix) -> f64 {
    let mut max_shift: f64 = 0.0;
    for k in 0..old_centroids.nrows() {
        let shift = euclidean(&old_centroids.row(k), &new_centroids.row(k));
        max_shift = max_shift.max(shift);
    }
    max_shift
}
