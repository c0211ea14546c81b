//! Shared test fixtures for integration tests.

use std::fs;
use std::path::Path;

use pv_sizer::config::RunSettings;

/// Two-panel catalog from the reference scenario (A: 0.45 kW / 900, B: 0.55 kW / 1000).
pub const SCENARIO_CATALOG: &str = "\
nome,potencia[kW],preco
A,0.45,900
B,0.55,1000
";

/// Writes a catalog CSV and parameter document into `dir`.
///
/// Returns settings pointing at both files.
pub fn write_inputs(dir: &Path, catalog_csv: &str, parameters_json: &str) -> RunSettings {
    let catalog = dir.join("paineis.csv");
    let parameters = dir.join("param.json");
    fs::write(&catalog, catalog_csv).expect("write catalog");
    fs::write(&parameters, parameters_json).expect("write parameters");

    let mut settings = RunSettings::default();
    settings.paths.catalog = catalog;
    settings.paths.parameters = parameters;
    settings
}

/// Parameter document with consumption inputs and one unrelated section.
pub fn parameters_json(monthly_kwh: f64, feed_type: &str) -> String {
    format!(
        r#"{{
  "Dados_Consumo_Bruto": {{
    "media_mensal": {monthly_kwh},
    "consumo_anual": [410, 455, 470, 430]
  }},
  "padrao_alimentacao": "{feed_type}",
  "Dados_Cliente": {{ "nome": "Residência 12", "tarifa": 0.89 }}
}}"#
    )
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("read document");
    serde_json::from_str(&content).expect("valid JSON")
}
