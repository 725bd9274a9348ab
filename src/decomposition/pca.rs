use std::cmp::Ordering;

use ndarray::Axis;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{Error, Result};
use crate::{DEFAULT_SEED, Matrix, Vector};

#[derive(Clone, Debug)]
pub struct Pca {
    pub components: Option<Matrix>,
    pub explained_variance: Option<Vector>,
    pub explained_variance_ratio: Option<Vector>,
    pub mean: Option<Vector>,
    n_components: Option<usize>,
    seed: u64,
}

impl Pca {
    pub fn new() -> Self {
        Self {
            components: None,
            explained_variance: None,
            explained_variance_ratio: None,
            mean: None,
            n_components: None,
            seed: DEFAULT_SEED,
        }
    }

    pub fn n_components(mut self, n_components: usize) -> Self {
        self.n_components = Some(n_components);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        if x.nrows() < 2 || x.ncols() == 0 {
            return Err(Error::InvalidInput(
                "pca needs at least two samples and one feature".into(),
            ));
        }

        let n_features = x.ncols();
        let n_components = self.n_components.unwrap_or(n_features);
        if n_components == 0 || n_components > n_features {
            return Err(Error::InvalidInput(format!(
                "n_components={} must be in 1..={}",
                n_components, n_features
            )));
        }

        let mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| Error::InvalidInput("empty matrix".into()))?;
        let centered = x - &mean.view().insert_axis(Axis(0));
        let n_samples = x.nrows() as f64;
        let cov = centered.t().dot(&centered) / (n_samples - 1.0);
        // Ratios are taken against the full variance, not just the retained
        // components.
        let total_variance = cov.diag().sum();

        let (eigenvalues, components) = dominant_eigenpairs(&cov, n_components, self.seed)?;
        let explained_variance = eigenvalues.mapv(|v| v.max(0.0));
        let explained_variance_ratio = if total_variance > 0.0 {
            &explained_variance / total_variance
        } else {
            Vector::zeros(explained_variance.len())
        };

        self.components = Some(components);
        self.explained_variance = Some(explained_variance);
        self.explained_variance_ratio = Some(explained_variance_ratio);
        self.mean = Some(mean);

        Ok(())
    }

    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let components = self.components.as_ref().ok_or(Error::NotFitted)?;
        let mean = self.mean.as_ref().ok_or(Error::NotFitted)?;

        if x.ncols() != mean.len() {
            return Err(Error::InvalidInput(format!(
                "number of features in x ({}) doesn't match fitted data ({})",
                x.ncols(),
                mean.len()
            )));
        }

        let centered = x - &mean.view().insert_axis(Axis(0));
        Ok(centered.dot(&components.t()))
    }

    pub fn fit_transform(&mut self, x: &Matrix) -> Result<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }
}

impl Default for Pca {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest 1-based component count whose cumulative explained-variance
/// ratio strictly exceeds `variance_target`. Errors when no count within
/// the available components qualifies.
pub fn select_component_count(ratios: &Vector, variance_target: f64) -> Result<usize> {
    let mut cumulative = 0.0;
    for (i, ratio) in ratios.iter().enumerate() {
        cumulative += ratio;
        if cumulative > variance_target {
            return Ok(i + 1);
        }
    }
    Err(Error::VarianceTarget {
        target: variance_target,
    })
}

/// Top eigenpairs of a symmetric matrix by power iteration with deflation,
/// eigenvalues descending. Components are returned one per row.
fn dominant_eigenpairs(matrix: &Matrix, count: usize, seed: u64) -> Result<(Vector, Matrix)> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(Error::InvalidInput(
            "matrix must be square for eigenvalue decomposition".into(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut eigenvalues = Vector::zeros(count);
    let mut components = Matrix::zeros((count, n));
    let mut deflated = matrix.clone();

    for i in 0..count {
        let (lambda, vector) = power_iteration(&deflated, &mut rng);
        eigenvalues[i] = lambda;
        components.row_mut(i).assign(&vector);

        // Deflate the found pair out before searching for the next one.
        let outer = vector
            .view()
            .insert_axis(Axis(1))
            .dot(&vector.view().insert_axis(Axis(0)));
        deflated = &deflated - &(outer * lambda);
    }

    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut sorted_values = Vector::zeros(count);
    let mut sorted_components = Matrix::zeros((count, n));
    for (dst, &src) in order.iter().enumerate() {
        sorted_values[dst] = eigenvalues[src];
        sorted_components.row_mut(dst).assign(&components.row(src));
    }

    Ok((sorted_values, sorted_components))
}

fn power_iteration(matrix: &Matrix, rng: &mut StdRng) -> (f64, Vector) {
    let n = matrix.nrows();
    let mut vector: Vector = Vector::random_using(n, Uniform::new(-1.0, 1.0), rng);
    let norm = vector.dot(&vector).sqrt();
    if norm > 0.0 {
        vector /= norm;
    }

    let mut lambda = 0.0;
    for _ in 0..300 {
        let product = matrix.dot(&vector);
        let next_lambda = vector.dot(&product);
        let norm = product.dot(&product).sqrt();
        if norm < 1e-12 {
            // Null direction: nothing left to extract along this vector.
            return (0.0, vector);
        }
        vector = product / norm;
        if (next_lambda - lambda).abs() < 1e-10 {
            lambda = next_lambda;
            break;
        }
        lambda = next_lambda;
    }

    (lambda, vector)
}
