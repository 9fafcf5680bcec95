//! Running count / mean / population standard deviation.

use num_traits::Float;

#[inline]
fn cast<F: Float>(n: usize) -> F {
    F::from(n).unwrap_or_else(F::infinity)
}

/// Count, mean and population standard deviation of a multiset of values.
///
/// An empty summary has mean and stddev of exactly zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary<F> {
    count: usize,
    mean: F,
    stddev: F,
}

impl<F: Float> Default for Summary<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Summary<F> {
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: F::zero(),
            stddev: F::zero(),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> F {
        self.mean
    }

    pub fn stddev(&self) -> F {
        self.stddev
    }

    pub fn variance(&self) -> F {
        self.stddev * self.stddev
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Folds one more value in, in O(1).
    ///
    /// With n values of mean m and variance v, adding x gives
    /// `m' = (n*m + x) / (n+1)` and `v' = (n*(v + (m - m')^2) + (x - m')^2) / (n+1)`.
    pub fn push(&mut self, x: F) {
        let n = cast::<F>(self.count);
        let new_n = cast::<F>(self.count + 1);
        let new_mean = (n * self.mean + x) / new_n;
        let new_var = if self.count > 0 {
            let shift = self.mean - new_mean;
            let dev = x - new_mean;
            (n * (self.variance() + shift * shift) + dev * dev) / new_n
        } else {
            F::zero()
        };

        self.count += 1;
        self.mean = new_mean;
        self.stddev = new_var.max(F::zero()).sqrt();
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<F: Float> FromIterator<F> for Summary<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut moments = Moments::new();
        for x in iter {
            moments.accumulate(x);
        }
        moments.finish()
    }
}

/// Raw power sums, for recomputing a [`Summary`] from scratch in one pass.
#[derive(Clone, Copy, Debug)]
pub struct Moments<F> {
    count: usize,
    sum: F,
    sum_sq: F,
}

impl<F: Float> Default for Moments<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Moments<F> {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: F::zero(),
            sum_sq: F::zero(),
        }
    }

    #[inline]
    pub fn accumulate(&mut self, x: F) {
        self.count += 1;
        self.sum = self.sum + x;
        self.sum_sq = self.sum_sq + x * x;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `mean = sum / n`, `variance = sum_sq / n - mean^2` clamped at zero.
    pub fn finish(&self) -> Summary<F> {
        if self.count == 0 {
            return Summary::new();
        }
        let n = cast::<F>(self.count);
        let mean = self.sum / n;
        let variance = (self.sum_sq / n - mean * mean).max(F::zero());
        Summary {
            count: self.count,
            mean,
            stddev: variance.sqrt(),
        }
    }
}
