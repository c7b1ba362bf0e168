use parquet_core::byte_array_page::ByteArrayPage;
use parquet_core::delta;

fn random_strings(n: usize, seed: u64) -> Vec<String> {
    // Small xorshift PRNG so this test has no dependency on `rand`'s exact
    // string-generation behavior; just needs varied, occasionally
    // prefix-sharing values.
    let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let prefixes = ["app", "apple", "application", "banana", "band", ""];

    (0..n)
        .map(|i| {
            let prefix = prefixes[(next() as usize) % prefixes.len()];
            format!("{prefix}-{i}-{}", next() % 1000)
        })
        .collect()
}

#[test]
fn round_trips_random_prefix_sharing_values() {
    for (n, seed) in [(0usize, 1u64), (1, 2), (5, 3), (500, 4), (2_000, 5)] {
        let values = random_strings(n, seed);
        let page = ByteArrayPage::from_values(values.iter().map(String::as_bytes));

        let mut encoded = Vec::new();
        delta::encode_delta_byte_array(&mut encoded, &page).unwrap();
        let decoded = delta::decode_delta_byte_array(&encoded).unwrap();

        assert_eq!(decoded, page, "mismatch at n={n}");
    }
}

#[test]
fn delta_length_byte_array_round_trips_random_values() {
    for (n, seed) in [(0usize, 10u64), (3, 11), (1_000, 12)] {
        let values = random_strings(n, seed);
        let page = ByteArrayPage::from_values(values.iter().map(String::as_bytes));

        let mut encoded = Vec::new();
        delta::encode_delta_length_byte_array(&mut encoded, &page).unwrap();
        let decoded = delta::decode_delta_length_byte_array(&encoded).unwrap();

        assert_eq!(decoded, page, "mismatch at n={n}");
    }
}

#[test]
fn both_byte_array_codecs_agree_on_values() {
    let values = ["parsley", "parse", "parses", "parsing", "", "parsley2"];
    let page = ByteArrayPage::from_values(values.iter().map(|s| s.as_bytes()));

    let mut via_length = Vec::new();
    delta::encode_delta_length_byte_array(&mut via_length, &page).unwrap();
    let decoded_length = delta::decode_delta_length_byte_array(&via_length).unwrap();

    let mut via_prefix = Vec::new();
    delta::encode_delta_byte_array(&mut via_prefix, &page).unwrap();
    let decoded_prefix = delta::decode_delta_byte_array(&via_prefix).unwrap();

    assert_eq!(decoded_length, page);
    assert_eq!(decoded_prefix, page);
}
