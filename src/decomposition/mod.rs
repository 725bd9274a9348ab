//! Dimensionality reduction.
//!
//! `Pca` projects standardized traffic features onto their principal
//! components; `select_component_count` picks the smallest number of
//! components whose cumulative explained-variance ratio strictly exceeds a
//! caller-supplied target.
//!
//! # Examples
//!
//! ```rust
//! use netclust::Pca;
//! use netclust::decomposition::select_component_count;
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 2.0, 3.0],
//!     [4.0, 5.0, 6.0],
//!     [7.0, 8.0, 9.0],
//!     [10.0, 11.0, 12.0]
//! ];
//!
//! // Full fit exposes one explained-variance ratio per feature.
//! let mut pca = Pca::new();
//! pca.fit(&x).unwrap();
//! let ratios = pca.explained_variance_ratio.as_ref().unwrap();
//! let count = select_component_count(ratios, 0.9).unwrap();
//!
//! // Refit constrained to the chosen count, then project.
//! let mut reduced = Pca::new().n_components(count);
//! let projected = reduced.fit_transform(&x).unwrap();
//! assert_eq!(projected.nrows(), 4);
//! assert_eq!(projected.ncols(), count);
//! ```

mod pca;

pub use pca::{Pca, select_component_count};
