//! Fallbacks for absent values.

/// `value` if present, otherwise `default`.
#[must_use]
pub fn coalesce<T>(value: Option<T>, default: T) -> T {
    value.unwrap_or(default)
}

/// `value` if present, otherwise `T::default()`.
#[must_use]
pub fn coalesce_default<T: Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}

#[must_use]
pub fn coalesce_str(value: Option<&str>) -> &str {
    coalesce(value, "")
}

#[must_use]
pub fn coalesce_bool(value: Option<bool>) -> bool {
    coalesce(value, false)
}

#[must_use]
pub fn coalesce_i32(value: Option<i32>) -> i32 {
    coalesce(value, 0)
}

#[must_use]
pub fn coalesce_i64(value: Option<i64>) -> i64 {
    coalesce(value, 0)
}

#[cfg(test)]
mod tests {
    use super::{
        coalesce, coalesce_bool, coalesce_default, coalesce_i32, coalesce_i64, coalesce_str,
    };

    #[test]
    fn present_value_wins() {
        assert_eq!(coalesce(Some(3), 9), 3);
        assert_eq!(coalesce_str(Some("x")), "x");
        assert!(coalesce_bool(Some(true)));
        assert_eq!(coalesce_i32(Some(-1)), -1);
        assert_eq!(coalesce_i64(Some(i64::MAX)), i64::MAX);
    }

    #[test]
    fn absent_falls_back() {
        assert_eq!(coalesce(None, 9), 9);
        assert_eq!(coalesce_str(None), "");
        assert!(!coalesce_bool(None));
        assert_eq!(coalesce_i32(None), 0);
        assert_eq!(coalesce_i64(None), 0);
        assert_eq!(coalesce_default::<String>(None), "");
        assert_eq!(coalesce_default::<Vec<u8>>(None), Vec::<u8>::new());
    }
}
