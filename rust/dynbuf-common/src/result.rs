use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Returns early from the enclosing function with `InvalidArgument` unless the
/// condition holds. The argument name and the condition text end up in the
/// error message.
///
/// ```
/// fn set_factor(growth_factor: f64) -> dynbuf_common::Result<f64> {
///     dynbuf_common::verify_arg!(growth_factor, growth_factor > 1.0);
///     Ok(growth_factor)
/// }
///
/// assert!(set_factor(1.5).is_ok());
/// assert!(set_factor(1.0).unwrap_err().is_invalid_arg());
/// ```
#[macro_export]
macro_rules! verify_arg {
    ($name:ident, $cond:expr) => {
        $crate::result::ensure_arg($cond, stringify!($name), stringify!($cond))?
    };
}

/// Fails with `InvalidArgument` for `name` unless `holds` is true.
///
/// `requirement` describes the accepted values, e.g. `"growth_factor > 1.0"`.
#[inline]
pub fn ensure_arg(holds: bool, name: &str, requirement: &str) -> Result<()> {
    if holds {
        return Ok(());
    }
    Err(rejected_arg(name, requirement))
}

#[cold]
fn rejected_arg(name: &str, requirement: &str) -> Error {
    Error::invalid_arg(name, format!("expected {requirement}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_size(new_size: usize, len: usize) -> Result<usize> {
        crate::verify_arg!(new_size, new_size >= len);
        Ok(new_size)
    }

    #[test]
    fn test_verify_arg_passes() {
        assert_eq!(buffer_size(10, 10).unwrap(), 10);
        assert_eq!(buffer_size(11, 0).unwrap(), 11);
    }

    #[test]
    fn test_verify_arg_rejects() {
        let e = buffer_size(3, 5).unwrap_err();
        assert!(e.is_invalid_arg());
        assert_eq!(
            e.to_string(),
            "invalid argument new_size: expected new_size >= len"
        );
    }

    #[test]
    fn test_ensure_arg() {
        assert!(ensure_arg(true, "x", "x > 0").is_ok());
        let e = ensure_arg(false, "x", "x > 0").unwrap_err();
        assert_eq!(e.to_string(), "invalid argument x: expected x > 0");
    }
}
