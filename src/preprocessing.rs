use crate::error::{Error, Result};
use crate::{Matrix, Vector};

/// Column-wise standardization to zero mean and unit variance, with the
/// statistics taken from the fitted data itself.
pub struct StandardScaler {
    mean: Option<Vector>,
    std: Option<Vector>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        let mean = data
            .mean_axis(ndarray::Axis(0))
            .ok_or_else(|| Error::InvalidInput("cannot standardize an empty matrix".into()))?;
        // A constant column standardizes to 0.
        let std = data
            .std_axis(ndarray::Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let mean = self.mean.as_ref().ok_or(Error::NotFitted)?;
        let std = self.std.as_ref().ok_or(Error::NotFitted)?;
        if data.ncols() != mean.len() {
            return Err(Error::InvalidInput(format!(
                "expected {} columns, got {}",
                mean.len(),
                data.ncols()
            )));
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(ndarray::Axis(0)) {
            row -= mean;
            row /= std;
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_scaler() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert_eq!(scaled.shape(), data.shape());

        for c in 0..2 {
            let column = scaled.column(c);
            let mean = column.mean().unwrap();
            let std = column.std(0.0);
            assert!(mean.abs() < 1e-10);
            assert!((std - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_constant_column() {
        let data = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        for r in 0..3 {
            assert_eq!(scaled[[r, 0]], 0.0);
        }
    }

    #[test]
    fn test_transform_without_fit() {
        let data = array![[1.0, 2.0]];
        let scaler = StandardScaler::new();

        assert!(scaler.transform(&data).is_err());
    }

    #[test]
    fn test_column_count_mismatch() {
        let train = array![[1.0, 2.0], [3.0, 4.0]];
        let test = array![[1.0, 2.0, 3.0]];
        let mut scaler = StandardScaler::new();
        scaler.fit(&train).unwrap();

        assert!(scaler.transform(&test).is_err());
    }
}
