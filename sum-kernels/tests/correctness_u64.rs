mod common;

use common::{assert_all_kernels, iota, seeded_rng};
use rand::Rng;
use sum_kernels::{reference_sum, triangular_sum};

#[test]
fn test_sum_u64_5000() {
    let data = iota::<u64>(5000);
    assert_all_kernels(&data, 12_497_500u64);
}

#[test]
fn test_sum_u64_25m() {
    let n = 25_000_000;
    let data = iota::<u64>(n);
    assert_eq!(triangular_sum::<u64>(n), 312_499_987_500_000);
    assert_all_kernels(&data, 312_499_987_500_000u64);
}

#[test]
fn test_sum_u64_every_small_length() {
    for n in 0..=67 {
        let data = iota::<u64>(n);
        assert_all_kernels(&data, triangular_sum::<u64>(n));
    }
}

#[test]
fn test_sum_u64_boundaries() {
    let data = vec![u64::MAX, 0, 1, u64::MAX - 1, 3];
    // (2^64 - 1) + 1 + (2^64 - 2) + 3 = 2 * 2^64 + 1
    assert_all_kernels(&data, 1u64);
}

#[test]
fn test_sum_u64_random_1m() {
    let mut rng = seeded_rng(6400);
    let data: Vec<u64> = (0..1_000_000).map(|_| rng.gen::<u64>()).collect();
    assert_all_kernels(&data, reference_sum(&data));
}

#[test]
fn test_sum_u64_unaligned_slice() {
    let data = iota::<u64>(515);
    assert_all_kernels(&data[1..], triangular_sum::<u64>(515));
}
