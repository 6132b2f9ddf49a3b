//! Log volume of batch runs versus single runs

use std::sync::Mutex;

use izh_runtime::{response_curve, SimulationEngine, SimulationParams, StimulusPattern};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Keeps every record emitted by this crate
struct Capture(Mutex<Vec<(Level, String)>>);

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("izh_runtime")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut records) = self.0.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

fn take() -> Vec<(Level, String)> {
    std::mem::take(&mut *CAPTURE.0.lock().unwrap())
}

fn at_info_or_above(records: &[(Level, String)]) -> Vec<&str> {
    records
        .iter()
        .filter(|(level, _)| *level <= Level::Info)
        .map(|(_, message)| message.as_str())
        .collect()
}

// One test per binary: the logger is process-global.
#[test]
fn sweeps_log_once_and_single_runs_log_at_info() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Debug);

    let points = response_curve(&[0, 10, 20, 30], 50, None).unwrap();
    assert_eq!(points.len(), 4);
    let records = take();
    let loud = at_info_or_above(&records);
    assert_eq!(loud.len(), 1, "{:?}", loud);
    assert!(loud[0].starts_with("Response curve: 4 levels"));
    let completed = records
        .iter()
        .filter(|(level, message)| {
            *level == Level::Debug && message.starts_with("Simulation completed")
        })
        .count();
    assert_eq!(completed, 4);

    SimulationEngine::new(SimulationParams::new(20).unwrap())
        .unwrap()
        .run(&StimulusPattern::Constant(0))
        .unwrap();
    let records = take();
    let loud = at_info_or_above(&records);
    assert_eq!(loud.len(), 2, "{:?}", loud);
    assert!(loud[0].starts_with("Starting simulation"));
    assert!(loud[1].starts_with("Simulation completed"));
}
