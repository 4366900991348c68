extern crate lfsr_rs;

use lfsr_rs::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const REFERENCE_TAPS: u32 = 0x8020_0003;

#[test]
// Two registers built from the same settings step in lockstep.
fn test_determinism() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..50 {
        let width = rng.gen_range(1..=64);
        let taps = rng.gen_range(1..=u64::max_value());
        let seed = rng.gen_range(1..=u64::max_value());
        let mut a = match RegisterCore::new(width, taps, seed) {
            Ok(core) => core,
            // Masking to the width can leave nothing behind.
            Err(_) => continue,
        };
        let mut b = RegisterCore::new(width, taps, seed).unwrap();
        for _ in 0..1000 {
            assert_eq!(a.step(), b.step());
        }
    }
}

#[test]
fn test_zero_seed_rejected() {
    for width in 1..=64 {
        assert_eq!(
            RegisterCore::new(width, u64::max_value(), 0).unwrap_err(),
            ConfigError::ZeroSeed
        );
        let mut core = RegisterCore::new(width, u64::max_value(), 1).unwrap();
        assert_eq!(core.reset(0).unwrap_err(), ConfigError::ZeroSeed);
    }
    let cfg = LfsrConfig::new(32, REFERENCE_TAPS as u64, 0);
    assert!(cfg.build().is_err());
}

#[test]
// A nonsingular register started away from zero never reaches zero.
fn test_states_stay_nonzero() {
    for topology in &[
        Topology::FibonacciLeft,
        Topology::FibonacciRight,
        Topology::Galois,
    ] {
        for width in 1..=16 {
            let taps = maximal_taps::<u16>(width, *topology).unwrap();
            let mut core =
                RegisterCore::with_topology(width, taps, 1, *topology).unwrap();
            let limit = 1u32 << width;
            for _ in 0..limit {
                let state = core.step();
                assert!(state >= 1 && u32::from(state) < limit);
            }
        }
    }
}

#[test]
fn test_prbs8_maximal() {
    let mut core = RegisterCore::new(8, 0xB8_u8, 1).unwrap();
    let info = SequenceAnalyzer::new().find_period(&mut core, 1 << 8).unwrap();
    assert_eq!(info.cycle_length, 255);
    assert!(info.maximal);
    assert_eq!(info.offset, 0);
}

#[test]
// Every tabled width up to 20 bits is maximal in all three topologies.
fn test_maximal_table() {
    for topology in &[
        Topology::FibonacciLeft,
        Topology::FibonacciRight,
        Topology::Galois,
    ] {
        for width in 1..=20 {
            let config = LfsrConfig::maximal(width, *topology).unwrap();
            let mut core = config.build().unwrap();
            let info = SequenceAnalyzer::new()
                .find_period(&mut core, 1 << width)
                .unwrap();
            assert!(info.maximal, "width {} {}", width, topology);
        }
    }
}

#[test]
#[ignore]
// Walks all 2^32 - 1 states; run with `cargo test --release -- --ignored`.
fn test_reference_register_maximal() {
    let mut core = RegisterCore::new(32, REFERENCE_TAPS, 1).unwrap();
    let info = SequenceAnalyzer::new()
        .find_period(&mut core, 1 << 32)
        .unwrap();
    assert_eq!(info.cycle_length, (1u64 << 32) - 1);
    assert!(info.maximal);
}

#[test]
fn test_reference_trace() {
    let mut core = RegisterCore::new(32, REFERENCE_TAPS, 1).unwrap();
    let record = SequenceAnalyzer::new()
        .seed_convention(SeedConvention::Include)
        .generate(&mut core, 5);
    assert_eq!(record.values(), &[0x1, 0x3, 0x6, 0xd, 0x1b]);

    let mut core = RegisterCore::new(32, REFERENCE_TAPS, 1).unwrap();
    let record = SequenceAnalyzer::new()
        .seed_convention(SeedConvention::Exclude)
        .generate(&mut core, 5);
    assert_eq!(record.values(), &[0x3, 0x6, 0xd, 0x1b, 0x36]);
}

#[test]
fn test_resumable() {
    for mode in &[OutputMode::States, OutputMode::Bits] {
        for convention in &[SeedConvention::Exclude, SeedConvention::Include] {
            let analyzer = SequenceAnalyzer::new()
                .output_mode(*mode)
                .seed_convention(*convention);

            let mut core = RegisterCore::new(32, REFERENCE_TAPS, 1).unwrap();
            let mut joined = analyzer.generate(&mut core, 5).values().to_vec();
            joined.extend_from_slice(analyzer.generate(&mut core, 5).values());

            let mut core = RegisterCore::new(32, REFERENCE_TAPS, 1).unwrap();
            let whole = analyzer.generate(&mut core, 10);
            assert_eq!(joined, whole.values());
        }
    }
}

#[test]
fn test_width_one() {
    let mut core = RegisterCore::new(1, 1_u8, 1).unwrap();
    let record = SequenceAnalyzer::new().generate(&mut core, 32);
    assert!(record.values().iter().all(|v| *v == 0 || *v == 1));
    assert!(RegisterCore::new(1, 1_u8, 0).is_err());
    assert!(RegisterCore::new(1, 1_u8, 2).is_err());
}

#[test]
fn test_bit_balance_of_full_period() {
    let mut core = RegisterCore::new(16, 0xB400_u16, 1).unwrap();
    let record = SequenceAnalyzer::new()
        .output_mode(OutputMode::Bits)
        .generate(&mut core, 65535);
    let ones = output_bit_balance(&record).unwrap() * 65535.0;
    assert_eq!(ones.round() as u64, 32768);
}
