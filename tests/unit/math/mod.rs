pub mod random;

#[cfg(test)]
mod tests {
    use pixelsnap::math::{mean, upper_median};

    // Tests mean of an empty slice
    // Verified by dividing by the length unconditionally
    #[test]
    fn test_mean_empty_is_zero() {
        assert!(mean(&[]).abs() < f64::EPSILON);
        assert!((mean(&[1.0, 2.0, 6.0]) - 3.0).abs() < f64::EPSILON);
    }

    // Tests even-length median picks the upper middle element
    // Verified by averaging the two middle elements
    #[test]
    fn test_upper_median_even_count() {
        let mut gaps = vec![6.0, 3.0, 5.0, 4.0];
        assert_eq!(upper_median(&mut gaps), Some(5.0));

        let mut odd = vec![9.0, 1.0, 4.0];
        assert_eq!(upper_median(&mut odd), Some(4.0));

        assert_eq!(upper_median(&mut []), None);
    }
}
