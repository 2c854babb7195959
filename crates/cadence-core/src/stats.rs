//! Chi-square goodness-of-fit against a uniform distribution.

use statrs::distribution::{ChiSquared, ContinuousCDF};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquare {
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    pub p_value: f64,
}

/// Test observed category counts against equal expected counts.
///
/// Returns `None` when the test is undefined: fewer than two categories or
/// no observations at all.
pub fn chi_square_uniform(counts: &[usize]) -> Option<ChiSquare> {
    let k = counts.len();
    let total: usize = counts.iter().sum();
    if k < 2 || total == 0 {
        return None;
    }

    let expected = total as f64 / k as f64;
    let statistic = counts
        .iter()
        .map(|c| {
            let diff = *c as f64 - expected;
            diff * diff / expected
        })
        .sum::<f64>();
    let degrees_of_freedom = k - 1;

    Some(ChiSquare {
        statistic,
        degrees_of_freedom,
        p_value: chi_square_survival(statistic, degrees_of_freedom),
    })
}

/// P(X >= x) for a chi-square variable with `dof` degrees of freedom.
pub fn chi_square_survival(x: f64, dof: usize) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    match ChiSquared::new(dof as f64) {
        Ok(dist) => dist.sf(x),
        Err(_) => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_two_degrees_of_freedom_is_exponential() {
        // For dof = 2 the survival function is exp(-x / 2).
        for x in [0.5, 2.0, 4.0, 9.8, 20.0] {
            assert!(close(chi_square_survival(x, 2), (-x / 2.0_f64).exp()));
        }
    }

    #[test]
    fn test_one_degree_of_freedom_reference_values() {
        assert!((chi_square_survival(3.841_459, 1) - 0.05).abs() < 1e-5);
        assert!((chi_square_survival(3.6, 1) - 0.057_779).abs() < 1e-5);
    }

    #[test]
    fn test_eight_two_split_is_borderline() {
        let result = chi_square_uniform(&[8, 2]).unwrap();
        assert!(close(result.statistic, 3.6));
        assert!(result.p_value > 0.05);
    }

    #[test]
    fn test_undefined_cases() {
        assert!(chi_square_uniform(&[5]).is_none());
        assert!(chi_square_uniform(&[0, 0]).is_none());
    }

    #[test]
    fn test_even_split_is_not_significant() {
        let result = chi_square_uniform(&[5, 5]).unwrap();
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_skewed_split() {
        let result = chi_square_uniform(&[8, 1, 1]).unwrap();
        assert_eq!(result.degrees_of_freedom, 2);
        assert!(close(result.statistic, 9.8));
        assert!(result.p_value < 0.01);
    }
}
