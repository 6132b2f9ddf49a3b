//! Decode a serial parameter frame

use std::fmt::Write as _;

use clap::Args;
use serde::Serialize;

use izh_core::{ParamKind, ParamSet};
use izh_runtime::SerialFrame;

use super::emit;
use crate::config::{CliConfig, OutputFormat};
use crate::error::CliResult;

/// Decode a 4-byte parameter frame and show its bitstream
#[derive(Args, Debug)]
pub struct FrameCommand {
    /// Frame as 8 hex digits (a, b, c, d), e.g. 05334108
    pub frame: SerialFrame,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct FrameReport {
    frame: String,
    bytes: [u8; 4],
    params: ParamSet,
    bits: String,
    ticks: usize,
}

impl FrameCommand {
    pub fn execute(self, config: &CliConfig) -> CliResult<()> {
        let format = self.format.unwrap_or(config.output.format);
        let report = FrameReport {
            frame: self.frame.to_string(),
            bytes: self.frame.bytes(),
            params: self.frame.params(),
            bits: bitstream(&self.frame),
            ticks: SerialFrame::TICKS,
        };
        emit(format, None, &report, || render(&report))
    }
}

/// Data bits grouped per byte, in transmission order
fn bitstream(frame: &SerialFrame) -> String {
    let bits: Vec<char> = frame.bits().map(|b| if b { '1' } else { '0' }).collect();
    bits.chunks(8)
        .map(|byte| byte.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

fn render(report: &FrameReport) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "frame {}", report.frame);
    for kind in ParamKind::ALL {
        let byte = report.bytes[kind.index()];
        let _ = writeln!(
            text,
            "  {}  0x{:02X} -> {:>6}",
            kind.name(),
            byte,
            report.params.get(kind).to_raw()
        );
    }
    let _ = writeln!(text, "bits:  {}", report.bits);
    let _ = writeln!(text, "ticks: {}", report.ticks);
    text
}
