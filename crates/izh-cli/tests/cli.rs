use assert_cmd::Command;
use izh_runtime::SimulationResult;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::error::Error;
use std::path::Path;
use tempfile::tempdir;

/// `izh` with an isolated (missing) config file so host settings never leak in
fn izh(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("izh").unwrap();
    cmd.env_remove("IZH_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

fn run_json(config: &Path, args: &[&str]) -> Result<Value, Box<dyn Error>> {
    let output = izh(config).args(args).arg("--format").arg("json").output()?;
    assert!(output.status.success(), "izh {:?} failed", args);
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn run_reports_spike_ticks_as_json() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let config = tmp.path().join("config.toml");

    let result = run_json(&config, &["run", "--ticks", "400"])?;
    assert_eq!(result["spike_ticks"], json!([65, 130, 196, 262, 329, 396]));
    assert_eq!(result["total_spikes"], json!(6));
    assert_eq!(result["trace"].as_array().map(Vec::len), Some(400));
    Ok(())
}

#[test]
fn run_text_summary() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    izh(&tmp.path().join("config.toml"))
        .args(["run", "--ticks", "400", "--stimulus", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spike ticks: 65 130 196 262 329 396"))
        .stdout(predicate::str::contains("params:      a=1 b=13 c=-4160 d=128"));
    Ok(())
}

#[test]
fn run_with_step_schedule() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let result = run_json(
        &tmp.path().join("config.toml"),
        &["run", "--ticks", "400", "--steps", "0:0,100:50"],
    )?;
    assert_eq!(result["spike_ticks"], json!([65, 123, 173, 224, 275, 326, 378]));
    Ok(())
}

#[test]
fn noise_runs_repeat_for_the_same_seed() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let config = tmp.path().join("config.toml");
    let args = ["run", "--ticks", "500", "--noise", "30", "--seed", "99"];
    let first = izh(&config).args(args).output()?;
    let second = izh(&config).args(args).output()?;
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[test]
fn bincode_export_roundtrip() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let out = tmp.path().join("out").join("run.bin");

    izh(&tmp.path().join("config.toml"))
        .args(["run", "--ticks", "400", "--frame", "05334108", "--format", "bincode", "--out"])
        .arg(&out)
        .assert()
        .success();

    let result: SimulationResult = bincode::deserialize(&std::fs::read(&out)?)?;
    assert_eq!(result.spike_ticks, vec![62, 125, 188, 251, 313, 375]);
    assert_eq!(result.final_params.b.to_raw(), -19);
    assert_eq!(result.trace.len(), 400);
    Ok(())
}

#[test]
fn bincode_to_stdout_is_rejected() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    izh(&tmp.path().join("config.toml"))
        .args(["run", "--ticks", "10", "--format", "bincode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires --out"));
    Ok(())
}

#[test]
fn frame_decodes_bytes() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    izh(&tmp.path().join("config.toml"))
        .args(["frame", "05:33:41:08"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frame 05334108"))
        .stdout(predicate::str::contains("  a  0x05 ->      1"))
        .stdout(predicate::str::contains("  d  0x08 ->      0"))
        .stdout(predicate::str::contains(
            "bits:  00000101 00110011 01000001 00001000",
        ));
    Ok(())
}

#[test]
fn frame_rejects_bad_hex() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    izh(&tmp.path().join("config.toml"))
        .args(["frame", "0533zz08"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("8 hex digits"));
    Ok(())
}

#[test]
fn sweep_json() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let points = run_json(
        &tmp.path().join("config.toml"),
        &["sweep", "--ticks", "400", "--from", "0", "--to", "20", "--step", "10"],
    )?;
    let levels: Vec<u64> = points
        .as_array()
        .ok_or("expected array")?
        .iter()
        .filter_map(|p| p["stimulus"].as_u64())
        .collect();
    assert_eq!(levels, vec![0, 10, 20]);
    assert_eq!(points[0]["spikes"], json!(6));
    assert_eq!(points[0]["first_spike"], json!(65));
    Ok(())
}

#[test]
fn sweep_rejects_inverted_range() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    izh(&tmp.path().join("config.toml"))
        .args(["sweep", "--from", "9", "--to", "3"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn init_then_configured_run() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let config = tmp.path().join("cfg").join("izh.toml");

    izh(&config).arg("init").assert().success();
    assert!(config.exists(), "init should write the config file");
    izh(&config).arg("init").assert().failure();
    izh(&config).args(["init", "--force"]).assert().success();

    std::fs::write(
        &config,
        "[simulation]\nticks = 400\nframe = \"05334108\"\n\n[output]\nformat = \"json\"\n",
    )?;
    let output = izh(&config).arg("run").output()?;
    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(result["spike_ticks"], json!([62, 125, 188, 251, 313, 375]));
    Ok(())
}
