//! Property tests for frames, stimulus schedules and trace comparison

use izh_runtime::izh_core::{NeuronCore, TickInputs};
use izh_runtime::{
    RuntimeError, SerialFrame, SimulationEngine, SimulationParams, StimulusPattern, Trace,
    PREAMBLE_TICKS,
};
use proptest::prelude::*;

fn trace_of(ticks: u64, pattern: &StimulusPattern) -> Trace {
    SimulationEngine::new(SimulationParams::new(ticks).unwrap())
        .unwrap()
        .run(pattern)
        .unwrap()
        .trace
}

fn any_pattern() -> impl Strategy<Value = StimulusPattern> {
    prop_oneof![
        any::<u8>().prop_map(StimulusPattern::Constant),
        (any::<u8>(), any::<u64>()).prop_map(|(max, seed)| StimulusPattern::Noise { max, seed }),
        proptest::collection::btree_map(0u64..200, any::<u8>(), 1..6)
            .prop_map(|steps| StimulusPattern::Steps(steps.into_iter().collect())),
    ]
}

proptest! {
    #[test]
    fn frame_text_roundtrip(bytes in any::<[u8; 4]>()) {
        let frame = SerialFrame::new(bytes);
        let text = frame.to_string();
        prop_assert_eq!(text.len(), 8);
        prop_assert_eq!(text.parse::<SerialFrame>().unwrap(), frame);

        let [a, b, c, d] = bytes;
        let grouped = format!("0x{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d);
        prop_assert_eq!(grouped.parse::<SerialFrame>().unwrap(), frame);
    }

    #[test]
    fn drive_carries_bits_after_preamble(bytes in any::<[u8; 4]>(), stimulus in any::<u8>()) {
        let frame = SerialFrame::new(bytes);
        let ticks = frame.drive(stimulus);
        prop_assert_eq!(ticks.len(), SerialFrame::TICKS);
        prop_assert!(ticks.iter().all(|t| t.enable && !t.reset && t.stimulus == stimulus));
        prop_assert!(ticks[..PREAMBLE_TICKS].iter().all(|t| t.load_enable && !t.serial_data));

        let sent: Vec<bool> = ticks[PREAMBLE_TICKS..SerialFrame::TICKS - 1]
            .iter()
            .map(|t| t.serial_data)
            .collect();
        prop_assert_eq!(sent, frame.bits().collect::<Vec<_>>());
        prop_assert!(!ticks[SerialFrame::TICKS - 1].load_enable);
    }

    #[test]
    fn loaded_frame_matches_decoded_params(bytes in any::<[u8; 4]>(), stimulus in any::<u8>()) {
        let mut core = NeuronCore::new();
        core.tick(TickInputs::run(stimulus));
        let frame = SerialFrame::new(bytes);
        let out = frame.load(&mut core, stimulus);
        prop_assert!(out.params_ready);
        prop_assert_eq!(*core.params(), frame.params());
    }

    #[test]
    fn truncated_frame_never_commits(bytes in any::<[u8; 4]>(), bits in 0usize..32) {
        let mut core = NeuronCore::new();
        let before = *core.params();
        for inputs in SerialFrame::new(bytes).truncated(bits, 0) {
            core.tick(inputs);
        }
        prop_assert!(core.outputs().params_ready);
        prop_assert_eq!(*core.params(), before);
    }

    #[test]
    fn step_schedule_text_roundtrip(
        steps in proptest::collection::btree_map(any::<u64>(), any::<u8>(), 1..8)
    ) {
        let text = steps
            .iter()
            .map(|(tick, level)| format!("{}:{}", tick, level))
            .collect::<Vec<_>>()
            .join(",");
        let pattern = StimulusPattern::parse_steps(&text).unwrap();
        prop_assert_eq!(pattern, StimulusPattern::Steps(steps.into_iter().collect()));
    }

    #[test]
    fn identical_runs_compare_equal(pattern in any_pattern(), ticks in 1u64..120) {
        let golden = trace_of(ticks, &pattern);
        let again = trace_of(ticks, &pattern);
        prop_assert_eq!(golden.len() as u64, ticks);
        prop_assert!(again.compare(&golden).is_ok());
    }

    #[test]
    fn stimulus_gap_shows_on_first_tick(low in 0u8..=253, gap in 2u8..=255) {
        let high = low.saturating_add(gap);
        let golden = trace_of(8, &StimulusPattern::Constant(low));
        let actual = trace_of(8, &StimulusPattern::Constant(high));
        match actual.compare(&golden) {
            Err(RuntimeError::TraceMismatch { tick, field, expected, actual }) => {
                prop_assert_eq!(tick, 0);
                prop_assert_eq!(field, "v");
                prop_assert!(actual > expected);
            }
            other => prop_assert!(false, "expected a v mismatch, got {:?}", other),
        }
    }
}
