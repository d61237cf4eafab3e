/// Fraction of the widest deviation added on each side of the axis window.
pub const PADDING: f64 = 0.1;

#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Pearson correlation coefficient. Undefined (`None`) for fewer than two
/// points or a constant series.
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }
    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }
    Some(covariance / (variance_x * variance_y).sqrt())
}

/// Symmetric window around the series mean. The half-range covers the widest
/// deviation on either side, scaled by the padding, so the mean sits at the
/// literal geometric center of the axis regardless of skew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisWindow {
    pub center: f64,
    pub half_range: f64,
}

impl AxisWindow {
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let center = mean(values)?;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let spread = (max - center).abs().max((center - min).abs());
        // A constant series still gets a window so the crosshair renders.
        let half_range = if spread == 0.0 {
            1.0
        } else {
            spread * (1.0 + PADDING)
        };
        Some(Self { center, half_range })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.center - self.half_range
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.center + self.half_range
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        2.0 * self.half_range
    }

    /// Axis range endpoints; a reversed pair flips the axis for
    /// lower-is-better metrics.
    #[must_use]
    pub fn range(&self, inverted: bool) -> [f64; 2] {
        if inverted {
            [self.max(), self.min()]
        } else {
            [self.min(), self.max()]
        }
    }
}

/// Ordinary-least-squares fit of `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy)]
pub struct OlsLine {
    pub slope: f64,
    pub intercept: f64,
}

impl OlsLine {
    /// `None` when fewer than two points remain or the x series has no
    /// variance to regress over.
    #[must_use]
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }
        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;
        let mut covariance = 0.0;
        let mut variance_x = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            covariance += (x - mean_x) * (y - mean_y);
            variance_x += (x - mean_x) * (x - mean_x);
        }
        if variance_x == 0.0 {
            return None;
        }
        let slope = covariance / variance_x;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
