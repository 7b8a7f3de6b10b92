// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `causerie models` command implementation.

use causerie_config::CauserieConfig;
use causerie_core::traits::ProviderAdapter;
use causerie_core::types::ModelSummary;
use causerie_core::CauserieError;
use causerie_ollama::OllamaProvider;
use serde::Serialize;

/// One row of `--json` output.
#[derive(Debug, Serialize)]
struct ModelRow<'a> {
    name: &'a str,
    size: u64,
    modified_at: &'a str,
    configured: bool,
    default: bool,
}

/// Lists installed models, marking those in the configuration.
pub async fn run_models(config: &CauserieConfig, json: bool) -> Result<(), CauserieError> {
    let provider = OllamaProvider::new(&config.ollama)?;
    let models = provider.list_models().await?;

    if json {
        let rows = rows(config, &models);
        let out = serde_json::to_string_pretty(&rows)
            .map_err(|e| CauserieError::Internal(format!("failed to serialize models: {e}")))?;
        println!("{out}");
    } else {
        print!("{}", render_table(config, &models));
    }
    Ok(())
}

fn base_name(name: &str) -> &str {
    name.split(':').next().unwrap_or(name)
}

fn rows<'a>(config: &CauserieConfig, models: &'a [ModelSummary]) -> Vec<ModelRow<'a>> {
    models
        .iter()
        .map(|m| ModelRow {
            name: &m.name,
            size: m.size,
            modified_at: &m.modified_at,
            configured: config
                .ollama
                .available_models
                .iter()
                .any(|c| c == base_name(&m.name)),
            default: base_name(&m.name) == config.ollama.default_model,
        })
        .collect()
}

fn render_table(config: &CauserieConfig, models: &[ModelSummary]) -> String {
    if models.is_empty() {
        return "no models installed (try: ollama pull llama3.2)\n".to_string();
    }
    let mut out = String::new();
    for row in rows(config, models) {
        let marker = match (row.default, row.configured) {
            (true, _) => "*",
            (false, true) => "+",
            (false, false) => " ",
        };
        out.push_str(&format!(
            "{marker} {:<32} {:>8.1} GB  {}\n",
            row.name,
            row.size as f64 / 1e9,
            row.modified_at
        ));
    }
    out
}
