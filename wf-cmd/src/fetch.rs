//! Single-station fetch and offline reprocessing.

use crate::cycle::run_cycle;
use anyhow::Context;
use log::info;
use serde::Serialize;
use serde_json::Value;
use std::{fs, path::Path};
use wf_smhi::{
    client::{Coordinates, SmhiClient},
    config::ClientConfig,
};

/// File name of the raw chart payload written by `fetch`.
pub const CHART_DATA_FILE: &str = "chart_data.json";

/// File name of the processed result written by `fetch`.
pub const PROCESSED_DATA_FILE: &str = "processed_data.json";

/// Write a value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

/// Run one cycle against SMHI and save both the raw chart payload and the
/// processed result into `output_dir`.
pub async fn run_fetch(
    subid: u32,
    coordinates: Option<Coordinates>,
    output_dir: &Path,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    let client = SmhiClient::with_config(config.clone());
    let cycle = run_cycle(&client, subid, coordinates).await?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    write_json(&output_dir.join(CHART_DATA_FILE), &cycle.chart_data)?;
    write_json(&output_dir.join(PROCESSED_DATA_FILE), &cycle.processed)?;

    info!("Production time used: {}", cycle.production_time);
    info!(
        "Results saved to {} and {} in {}",
        CHART_DATA_FILE,
        PROCESSED_DATA_FILE,
        output_dir.display()
    );
    Ok(())
}

/// Process a saved chart payload into `output`.
pub fn run_process(chart_json: &Path, output: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(chart_json)
        .with_context(|| format!("Failed to read {}", chart_json.display()))?;
    let chart_data: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", chart_json.display()))?;
    let processed = wf_data::process_value(&chart_data)
        .with_context(|| format!("Failed to process {}", chart_json.display()))?;
    write_json(output, &processed)?;
    info!("Processed data written to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CHART_SAMPLE;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wf-cmd-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_run_process_writes_published_shape() {
        let dir = scratch_dir("process");
        let chart_path = dir.join(CHART_DATA_FILE);
        let output_path = dir.join(PROCESSED_DATA_FILE);
        fs::write(&chart_path, CHART_SAMPLE).unwrap();

        run_process(&chart_path, &output_path).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(written["waterflow"]["data"].as_array().unwrap().len(), 5);
        assert_eq!(written["precipitation"]["data"].as_array().unwrap().len(), 2);
        assert_eq!(written["mhq"], 61.0);
        assert_eq!(
            written["waterflow_history"]["history"]
                .as_object()
                .unwrap()
                .len(),
            32
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_process_rejects_missing_file() {
        let dir = scratch_dir("missing");
        let result = run_process(&dir.join("nope.json"), &dir.join("out.json"));
        assert!(result.is_err());
        assert!(!dir.join("out.json").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_process_rejects_malformed_chart() {
        let dir = scratch_dir("malformed");
        let chart_path = dir.join(CHART_DATA_FILE);
        fs::write(&chart_path, r#"{"coutHindcast": {"data": [["x", 1]]}}"#).unwrap();
        let result = run_process(&chart_path, &dir.join("out.json"));
        assert!(result.is_err());
        assert!(!dir.join("out.json").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
