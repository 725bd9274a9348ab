//! Partitioning clustering.
//!
//! `KMeans` is the centroid-based engine used on the reduced feature
//! space: random initialization from a fixed seed, standard Lloyd
//! iteration, integer cluster ids in `[0, k)`.
//!
//! # Examples
//!
//! ```rust
//! use netclust::KMeans;
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 1.0],
//!     [1.5, 2.0],
//!     [1.2, 1.4],
//!     [8.0, 8.0],
//!     [8.5, 8.2],
//!     [7.9, 8.4]
//! ];
//!
//! let mut kmeans = KMeans::new(2).seed(11);
//! let labels = kmeans.fit_predict(&x).unwrap();
//! assert_eq!(labels.len(), 6);
//!
//! // Same data, same seed: identical assignment.
//! let mut again = KMeans::new(2).seed(11);
//! assert_eq!(again.fit_predict(&x).unwrap(), labels);
//! ```

mod kmeans;

pub use kmeans::KMeans;
