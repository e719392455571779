/// Running first and second moments of a scalar observable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Statistics {
    pub count: usize,
    sum: f64,
    sum2: f64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, v: f64) {
        self.count += 1;
        self.sum += v;
        self.sum2 += v * v;
    }

    pub fn extend(&mut self, values: &[f64]) {
        for &v in values {
            self.update(v);
        }
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// ⟨v²⟩.
    pub fn mean2(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum2 / self.count as f64
    }

    /// Population variance ⟨v²⟩ − ⟨v⟩², clamped at zero.
    pub fn variance(&self) -> f64 {
        let m = self.mean();
        (self.mean2() - m * m).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moments() {
        let mut s = Statistics::new();
        s.extend(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.count, 4);
        assert_relative_eq!(s.mean(), 2.5);
        assert_relative_eq!(s.mean2(), 7.5);
        assert_relative_eq!(s.variance(), 1.25);
    }

    #[test]
    fn test_empty() {
        let s = Statistics::new();
        assert_eq!(s.mean(), 0.0);
        assert_eq!(s.variance(), 0.0);
    }
}
