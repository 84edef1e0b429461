mod support;

use std::fs;
use std::path::Path;
use std::process::Output;

use serde_json::Value;
use tempfile::tempdir;

use support::{run_cacheload, spawn_proxy_server_or_skip, unused_local_url};

fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn read_single_results(dir: &Path) -> Result<Value, String> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| format!("read_dir failed: {}", err))? {
        let entry = entry.map_err(|err| format!("dir entry failed: {}", err))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with("load_test_results_") && name.ends_with(".json") {
            files.push(entry.path());
        }
    }
    let [path] = files.as_slice() else {
        return Err(format!("Expected one results file, found {}", files.len()));
    };
    let body = fs::read_to_string(path).map_err(|err| format!("read results failed: {}", err))?;
    serde_json::from_str(&body).map_err(|err| format!("parse results failed: {}", err))
}

fn raw_results(results: &Value) -> Result<&Vec<Value>, String> {
    results
        .get("raw_results")
        .and_then(Value::as_array)
        .ok_or_else(|| "raw_results missing".to_owned())
}

fn stat_u64(results: &Value, key: &str) -> Result<u64, String> {
    results
        .get("stats")
        .and_then(|stats| stats.get(key))
        .and_then(Value::as_u64)
        .ok_or_else(|| format!("stats.{} missing", key))
}

#[test]
fn e2e_concurrent_mode_writes_results() -> Result<(), String> {
    let Some((url, _server)) = spawn_proxy_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_cacheload(
        dir.path(),
        [
            "--url",
            url.as_str(),
            "--concurrent",
            "4",
            "--total",
            "12",
            "--endpoints",
            "/hit",
            "/miss",
            "--seed",
            "7",
            "--no-color",
        ],
    )?;
    if !output.status.success() {
        return Err(format!("Expected success.\n{}", describe(&output)));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "Starting load test with configuration:",
        "LOAD TEST RESULTS",
        "Results saved to:",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("Missing '{}'.\n{}", expected, describe(&output)));
        }
    }

    let results = read_single_results(dir.path())?;
    let raw = raw_results(&results)?;
    if raw.len() != 12 {
        return Err(format!("Expected 12 raw results, got {}", raw.len()));
    }
    if stat_u64(&results, "successful_requests")? != 12 {
        return Err(format!("Expected 12 successes.\n{}", results));
    }
    let hits = raw
        .iter()
        .filter(|outcome| outcome.get("cache_hit").and_then(Value::as_bool) == Some(true))
        .count();
    if stat_u64(&results, "cache_hits")? != u64::try_from(hits).unwrap_or(u64::MAX) {
        return Err(format!("cache_hits disagrees with raw results.\n{}", results));
    }
    let test_type = results
        .get("config")
        .and_then(|config| config.get("test_type"))
        .and_then(Value::as_str);
    if test_type != Some("concurrent") {
        return Err(format!("Unexpected test_type: {:?}", test_type));
    }
    Ok(())
}

#[test]
fn e2e_cache_mode_warms_up_in_order() -> Result<(), String> {
    let Some((url, _server)) = spawn_proxy_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_cacheload(
        dir.path(),
        [
            "--url",
            url.as_str(),
            "--test-type",
            "cache",
            "--total",
            "10",
            "--cache-ratio",
            "0.5",
            "--endpoints",
            "/hit",
            "/miss",
        ],
    )?;
    if !output.status.success() {
        return Err(format!("Expected success.\n{}", describe(&output)));
    }

    let results = read_single_results(dir.path())?;
    let raw = raw_results(&results)?;
    if raw.len() != 7 {
        return Err(format!("Expected 2 warm-up + 5 wave results, got {}", raw.len()));
    }
    let warmup: Vec<Option<bool>> = raw
        .iter()
        .take(2)
        .map(|outcome| outcome.get("cache_hit").and_then(Value::as_bool))
        .collect();
    if warmup != [Some(true), Some(false)] {
        return Err(format!("Warm-up out of order: {:?}", warmup));
    }
    Ok(())
}

#[test]
fn e2e_throughput_mode_runs_whole_batches() -> Result<(), String> {
    let Some((url, _server)) = spawn_proxy_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_cacheload(
        dir.path(),
        [
            "--url",
            url.as_str(),
            "--test-type",
            "throughput",
            "--duration",
            "1",
            "--concurrent",
            "3",
            "--endpoints",
            "/miss",
        ],
    )?;
    if !output.status.success() {
        return Err(format!("Expected success.\n{}", describe(&output)));
    }

    let results = read_single_results(dir.path())?;
    let raw = raw_results(&results)?;
    if raw.is_empty() || raw.len() % 3 != 0 {
        return Err(format!("Expected whole batches of 3, got {}", raw.len()));
    }
    Ok(())
}

#[test]
fn e2e_non_200_counts_as_error() -> Result<(), String> {
    let Some((url, _server)) = spawn_proxy_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_cacheload(
        dir.path(),
        ["--url", url.as_str(), "--total", "4", "--endpoints", "/missing"],
    )?;
    if !output.status.success() {
        return Err(format!("Expected success.\n{}", describe(&output)));
    }

    let results = read_single_results(dir.path())?;
    if stat_u64(&results, "error_requests")? != 4 {
        return Err(format!("Expected 4 errors.\n{}", results));
    }
    Ok(())
}

#[test]
fn e2e_unreachable_proxy_records_failures() -> Result<(), String> {
    let url = match unused_local_url() {
        Ok(url) => url,
        Err(err) if err.contains("Operation not permitted") => return Ok(()),
        Err(err) => return Err(err),
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_cacheload(
        dir.path(),
        ["--url", url.as_str(), "--total", "3", "--timeout", "2"],
    )?;
    if !output.status.success() {
        return Err(format!("Expected success.\n{}", describe(&output)));
    }

    let results = read_single_results(dir.path())?;
    let raw = raw_results(&results)?;
    let all_failed = raw.iter().all(|outcome| {
        outcome.get("status_code").and_then(Value::as_u64) == Some(0)
            && outcome.get("error").is_some_and(Value::is_string)
    });
    if raw.len() != 3 || !all_failed {
        return Err(format!("Expected 3 transport failures.\n{}", results));
    }
    Ok(())
}

#[test]
fn e2e_zero_total_reports_no_results() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_cacheload(
        dir.path(),
        ["--url", "http://127.0.0.1:9", "--total", "0"],
    )?;
    if !output.status.success() {
        return Err(format!("Expected success.\n{}", describe(&output)));
    }
    if !String::from_utf8_lossy(&output.stdout).contains("No results to analyze") {
        return Err(format!("Missing empty report.\n{}", describe(&output)));
    }

    let results = read_single_results(dir.path())?;
    let error = results
        .get("stats")
        .and_then(|stats| stats.get("error"))
        .and_then(Value::as_str);
    if error != Some("No results to analyze") {
        return Err(format!("Unexpected stats: {}", results));
    }
    Ok(())
}

#[test]
fn e2e_missing_url_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_cacheload(dir.path(), ["--total", "1"])?;
    if output.status.code() != Some(1) {
        return Err(format!("Expected exit code 1.\n{}", describe(&output)));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("Test failed:") {
        return Err(format!("Missing failure message.\n{}", describe(&output)));
    }
    if stderr.matches("Missing URL").count() != 1 {
        return Err(format!("Missing URL reported more than once.\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_config_file_supplies_url() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    fs::write(
        dir.path().join("cacheload.toml"),
        "url = \"http://127.0.0.1:9\"\ntotal = 0\n",
    )
    .map_err(|err| format!("write config failed: {}", err))?;

    let output = run_cacheload(dir.path(), std::iter::empty::<&str>())?;
    if !output.status.success() {
        return Err(format!("Expected success.\n{}", describe(&output)));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("http://127.0.0.1:9") {
        return Err(format!("Config URL not used.\n{}", describe(&output)));
    }
    Ok(())
}
