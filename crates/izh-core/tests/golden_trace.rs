//! Regression oracle: register and output trace for the first 51 active ticks
//! after reset, default parameters, zero stimulus.

use izh_core::{LoaderState, NeuronCore, Q9_6, TickInputs};

/// (v, u, spike, potential) after each tick
const GOLDEN: [(i16, i16, u8, u8); 51] = [
    (-4126, -1, 0, 0), (-3828, -2, 0, 5), (-3573, -3, 0, 10),
    (-3351, -4, 0, 14), (-3155, -5, 0, 17), (-2981, -6, 0, 20),
    (-2825, -7, 0, 23), (-2683, -8, 0, 25), (-2553, -9, 0, 28),
    (-2434, -10, 0, 30), (-2324, -11, 0, 31), (-2222, -12, 0, 33),
    (-2126, -13, 0, 35), (-2036, -14, 0, 36), (-1951, -15, 0, 38),
    (-1870, -16, 0, 39), (-1793, -17, 0, 40), (-1720, -18, 0, 41),
    (-1650, -19, 0, 43), (-1583, -20, 0, 44), (-1518, -21, 0, 45),
    (-1455, -22, 0, 46), (-1394, -23, 0, 47), (-1334, -24, 0, 48),
    (-1276, -25, 0, 49), (-1219, -26, 0, 50), (-1163, -27, 0, 50),
    (-1108, -28, 0, 51), (-1053, -29, 0, 52), (-999, -30, 0, 53),
    (-945, -31, 0, 54), (-892, -32, 0, 55), (-839, -33, 0, 56),
    (-786, -34, 0, 56), (-733, -35, 0, 57), (-680, -36, 0, 58),
    (-626, -37, 0, 59), (-572, -38, 0, 60), (-517, -39, 0, 61),
    (-461, -40, 0, 61), (-404, -41, 0, 62), (-346, -42, 0, 63),
    (-287, -43, 0, 64), (-226, -44, 0, 65), (-164, -45, 0, 66),
    (-100, -45, 0, 67), (-34, -45, 0, 68), (35, -45, 0, 69),
    (106, -45, 0, 70), (180, -45, 0, 71), (258, -45, 0, 72),
];

fn fresh_core() -> NeuronCore {
    let mut core = NeuronCore::new();
    for _ in 0..10 {
        core.tick(TickInputs::RESET);
    }
    core
}

#[test]
fn zero_stimulus_trace_matches_bit_for_bit() {
    let mut core = fresh_core();
    for (tick, &(v, u, spike, potential)) in GOLDEN.iter().enumerate() {
        let out = core.tick(TickInputs::run(0));
        assert_eq!(core.v().to_raw(), v, "v at tick {}", tick);
        assert_eq!(core.u().to_raw(), u, "u at tick {}", tick);
        assert_eq!(out.spike() as u8, spike, "spike at tick {}", tick);
        assert_eq!(out.potential(), potential, "potential at tick {}", tick);
        assert!(out.params_ready);
    }
}

#[test]
fn zero_stimulus_first_spike_resets_to_c() {
    let mut core = fresh_core();
    let mut spikes = Vec::new();
    for tick in 0..400u32 {
        let before = core.state();
        let out = core.tick(TickInputs::run(0));
        if out.spike() {
            spikes.push(tick);
            assert_eq!(core.v(), core.params().c);
            assert_eq!(core.u(), before.u + core.params().d);
            assert_eq!(out.output, 0xFF);
        }
    }
    assert_eq!(spikes, vec![65, 130, 196, 262, 329, 396]);
}

#[test]
fn post_spike_rebound() {
    let mut core = fresh_core();
    for _ in 0..66 {
        core.tick(TickInputs::run(0));
    }
    assert_eq!(core.v(), Q9_6::from_int(-65));
    assert_eq!(core.u().to_raw(), 83);

    let out = core.tick(TickInputs::run(0));
    assert!(!out.spike());
    assert_eq!(out.potential(), 5);
    assert_eq!(core.v().to_raw(), -3858);
    assert_eq!(core.u().to_raw(), 82);
    assert_eq!(core.loader_state(), LoaderState::Idle);
}
