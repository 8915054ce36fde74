use crate::common::error::{OpcalcError, Result};

/// Quotient and remainder, refusing a zero denominator.
pub fn div_and_remainder(numerator: i64, denominator: i64) -> Result<(i64, i64)> {
    if denominator == 0 {
        return Err(OpcalcError::DivisionByZero);
    }
    Ok((
        numerator.wrapping_div(denominator),
        numerator.wrapping_rem(denominator),
    ))
}

/// Adds `base` to each of `vals`.
pub fn add_to(base: i64, vals: &[i64]) -> Vec<i64> {
    vals.iter().map(|v| base.wrapping_add(*v)).collect()
}

pub fn make_mult(base: i64) -> impl Fn(i64) -> i64 {
    move |factor| base.wrapping_mul(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_and_remainder() {
        assert_eq!(div_and_remainder(5, 2).unwrap(), (2, 1));
        assert_eq!(div_and_remainder(-7, 2).unwrap(), (-3, -1));
        assert!(matches!(
            div_and_remainder(5, 0),
            Err(OpcalcError::DivisionByZero)
        ));
    }

    #[test]
    fn test_add_to() {
        assert!(add_to(3, &[]).is_empty());
        assert_eq!(add_to(3, &[2]), vec![5]);
        assert_eq!(add_to(3, &[2, 4, 6, 8]), vec![5, 7, 9, 11]);
        assert_eq!(add_to(10, &[4, 3]), vec![14, 13]);
    }

    #[test]
    fn test_make_mult() {
        let two = make_mult(2);
        let three = make_mult(3);
        let pairs: Vec<(i64, i64)> = (0..3).map(|i| (two(i), three(i))).collect();
        assert_eq!(pairs, vec![(0, 0), (2, 3), (4, 6)]);
    }
}
