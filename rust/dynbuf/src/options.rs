use dynbuf_common::{Result, verify_arg};

/// Construction parameters of a [`DynamicBuffer`](crate::DynamicBuffer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicBufferOptions {
    /// Size of the backing region allocated up front, in bytes.
    pub initial_capacity: usize,
    /// Multiplier applied to the required size whenever the region must grow.
    ///
    /// Must be finite and greater than `1.0`.
    pub growth_factor: f64,
}

impl DynamicBufferOptions {
    pub const DEFAULT_CAPACITY: usize = 512;
    pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

    pub fn new() -> DynamicBufferOptions {
        DynamicBufferOptions {
            initial_capacity: Self::DEFAULT_CAPACITY,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Sets the size of the initial backing region.
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the growth factor.
    pub fn growth_factor(mut self, growth_factor: f64) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Checks that the options describe a buffer with amortized constant-time growth.
    ///
    /// A growth factor of `1.0` or less (or a non-finite one) is rejected with
    /// `InvalidArgument`.
    pub fn validate(&self) -> Result<()> {
        let growth_factor = self.growth_factor;
        verify_arg!(growth_factor, growth_factor.is_finite());
        verify_arg!(growth_factor, growth_factor > 1.0);
        Ok(())
    }
}

impl Default for DynamicBufferOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DynamicBufferOptions::default();
        assert_eq!(options.initial_capacity, 512);
        assert_eq!(options.growth_factor, 2.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_setters() {
        let options = DynamicBufferOptions::new()
            .initial_capacity(64)
            .growth_factor(1.5);
        assert_eq!(options.initial_capacity, 64);
        assert_eq!(options.growth_factor, 1.5);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_small_factor() {
        for factor in [1.0, 0.5, 0.0, -2.0] {
            let e = DynamicBufferOptions::new()
                .growth_factor(factor)
                .validate()
                .unwrap_err();
            assert!(e.is_invalid_arg(), "factor {factor}");
        }
    }

    #[test]
    fn test_validate_error_message() {
        let e = DynamicBufferOptions::new()
            .growth_factor(0.75)
            .validate()
            .unwrap_err();
        assert_eq!(
            e.to_string(),
            "invalid argument growth_factor: expected growth_factor > 1.0"
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_factor() {
        for factor in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let e = DynamicBufferOptions::new()
                .growth_factor(factor)
                .validate()
                .unwrap_err();
            assert!(e.is_invalid_arg(), "factor {factor}");
        }
    }

    #[test]
    fn test_zero_initial_capacity_is_valid() {
        assert!(
            DynamicBufferOptions::new()
                .initial_capacity(0)
                .validate()
                .is_ok()
        );
    }
}
