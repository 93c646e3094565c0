//! Tests for the MT19937 stream against published reference outputs

#[cfg(test)]
mod tests {
    use pixelsnap::SnapError;
    use pixelsnap::math::random::{MtRandom, index_below, unit_float};
    use rand::{RngCore, SeedableRng};

    // Tests the first tempered words for seed 42
    // Verified by swapping the tempering masks
    #[test]
    fn test_seed_42_words() {
        let mut rng = MtRandom::new(42);
        let words: Vec<u32> = (0..5).map(|_| rng.next_word()).collect();
        assert_eq!(
            words,
            vec![1_608_637_542, 3_421_126_067, 4_083_286_876, 787_846_414, 3_143_890_026]
        );
    }

    // Tests the 10000th output of the canonical default seed
    // Verified by using a single-word shift offset in the twist
    #[test]
    fn test_default_seed_ten_thousandth_word() {
        let mut rng = MtRandom::new(5489);
        let mut last = 0;
        for _ in 0..10_000 {
            last = rng.next_word();
        }
        assert_eq!(last, 4_123_659_995);
    }

    // Tests 53-bit float construction for seed 42
    // Verified by building floats from a single word
    #[test]
    fn test_seed_42_floats() {
        let mut rng = MtRandom::new(42);
        let expected = [
            0.374_540_118_847_362_5,
            0.950_714_306_409_916_2,
            0.731_993_941_811_405_1,
            0.598_658_484_197_036_6,
        ];
        for value in expected {
            assert!((rng.random() - value).abs() < f64::EPSILON);
        }
    }

    // Tests floats for seed 0
    // Verified by skipping the first state word during seeding
    #[test]
    fn test_seed_0_floats() {
        let mut rng = MtRandom::new(0);
        let expected = [
            0.548_813_503_927_324_8,
            0.715_189_366_372_419_5,
            0.602_763_376_071_643_9,
        ];
        for value in expected {
            assert!((rng.random() - value).abs() < f64::EPSILON);
        }
    }

    // Tests randrange floors the scaled float
    // Verified by rounding instead of flooring
    #[test]
    fn test_randrange_seed_42() {
        let mut rng = MtRandom::new(42);
        let draws: Vec<usize> = (0..4).map(|_| rng.randrange(10.0).unwrap()).collect();
        assert_eq!(draws, vec![3, 9, 7, 5]);
    }

    // Tests randrange stays inside [0, stop)
    // Verified by adding one to every draw
    #[test]
    fn test_randrange_bounds() {
        let mut rng = MtRandom::new(7);
        for _ in 0..1_000 {
            assert!(rng.randrange(13.0).unwrap() < 13);
        }
        assert_eq!(rng.randrange(1.0).unwrap(), 0);
    }

    // Tests randrange rejects empty and non-finite ranges
    // Verified by accepting a zero stop
    #[test]
    fn test_randrange_invalid_stop() {
        let mut rng = MtRandom::new(1);
        for stop in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                rng.randrange(stop),
                Err(SnapError::InvalidRandomRange { .. })
            ));
        }
    }

    // Tests equal seeds give equal streams and different seeds diverge
    // Verified by mixing the cursor into the seed
    #[test]
    fn test_reproducible_streams() {
        let mut a = MtRandom::new(123);
        let mut b = MtRandom::new(123);
        let mut c = MtRandom::new(124);

        let stream_a: Vec<u32> = (0..700).map(|_| a.next_word()).collect();
        let stream_b: Vec<u32> = (0..700).map(|_| b.next_word()).collect();
        let stream_c: Vec<u32> = (0..700).map(|_| c.next_word()).collect();

        assert_eq!(stream_a, stream_b);
        assert_ne!(stream_a, stream_c);
    }

    // Tests the rand trait impls share the native stream
    // Verified by reading the seed bytes big-endian
    #[test]
    fn test_rand_traits_match_native_stream() {
        let mut native = MtRandom::new(42);
        let mut seeded = MtRandom::from_seed(42u32.to_le_bytes());

        assert_eq!(seeded.next_u32(), native.next_word());
        assert_eq!(seeded.next_u32(), native.next_word());

        let low = u64::from(native.next_word());
        let high = u64::from(native.next_word());
        assert_eq!(seeded.next_u64(), (high << 32) | low);
    }

    // Tests the generic helpers draw the native floats from any RngCore
    // Verified by building the float from a single word
    #[test]
    fn test_generic_helpers_through_trait_object() {
        let mut source = MtRandom::new(42);
        let rng: &mut dyn RngCore = &mut source;

        assert_eq!(unit_float(rng), 0.374_540_118_847_362_5);
        assert_eq!(unit_float(rng), 0.950_714_306_409_916_2);
        assert!(matches!(
            index_below(rng, 0.0),
            Err(SnapError::InvalidRandomRange { .. })
        ));

        let mut native = MtRandom::new(42);
        native.random();
        native.random();
        assert_eq!(index_below(&mut source, 10.0).unwrap(), native.randrange(10.0).unwrap());
    }
}
