use parquet_core::bloom::SplitBlockFilter;

// Measures the empirical false-positive rate against the sizing formula's
// theoretical target across a range of bits-per-value settings.
#[test]
fn measure_false_positive_rate_across_bits_per_value() {
    let keys = (0..200_000u128)
        .map(|x| x.to_be_bytes().to_vec())
        .collect::<Vec<_>>();

    let non_existent_keys = (200_000..400_000u128)
        .map(|x| x.to_be_bytes().to_vec())
        .collect::<Vec<_>>();

    for bits_per_value in [8u32, 10, 12, 16] {
        let mut filter = SplitBlockFilter::with_capacity(keys.len(), bits_per_value);

        for key in &keys {
            filter.insert(SplitBlockFilter::fingerprint(key));
        }

        let mut false_positives = 0;
        for key in &non_existent_keys {
            if filter.check(SplitBlockFilter::fingerprint(key)) {
                false_positives += 1;
            }
        }

        let rate = false_positives as f64 / non_existent_keys.len() as f64;
        println!("bits/value = {bits_per_value}, empirical FPR = {rate:.5}");

        // spec §8: n false positives / n <= 0.01 at 10 bits/value, with
        // headroom for statistical noise at lower densities too.
        assert!(
            rate <= 0.05,
            "false positive rate too high at {bits_per_value} bits/value: {rate}"
        );
    }
}

#[test]
fn no_false_negatives_regardless_of_sizing() {
    let keys = (0..10_000u128)
        .map(|x| x.to_be_bytes().to_vec())
        .collect::<Vec<_>>();

    for bits_per_value in [1u32, 4, 10, 32] {
        let mut filter = SplitBlockFilter::with_capacity(keys.len(), bits_per_value);
        for key in &keys {
            filter.insert(SplitBlockFilter::fingerprint(key));
        }
        for key in &keys {
            assert!(filter.check(SplitBlockFilter::fingerprint(key)));
        }
    }
}
