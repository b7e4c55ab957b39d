//! Implementação dos comandos CLI do Bateria.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::Dataset;
use crate::service::BatteryAnalysisService;
use crate::types::config::Config;
use crate::BateriaResult;

const CONFIG_FILE: &str = "bateria.toml";

/// Imprime um valor como JSON formatado na saída padrão.
fn print_json<T: Serialize>(value: &T) -> BateriaResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open(data: &Path, config: &Config) -> BateriaResult<(Dataset, BatteryAnalysisService)> {
    let dataset = Dataset::load(data)?;
    let service = BatteryAnalysisService::from_config(config)?;
    Ok((dataset, service))
}

/// Initializes configuration in the specified directory.
pub fn init(path: Option<PathBuf>) -> BateriaResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(CONFIG_FILE);

    if config_path.exists() {
        println!("Configuração já existe em: {}", config_path.display());
        return Ok(());
    }

    Config::default_config().save(&config_path)?;

    println!("Bateria inicializado com sucesso!");
    println!("Configuração criada em: {}", config_path.display());
    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("bateria {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Análise de testes de bateria com cache de resultados");
}

/// Classificação de saúde de uma bateria.
pub fn health(data: &Path, serial: &str, config: &Config) -> BateriaResult<()> {
    let (dataset, service) = open(data, config)?;
    let battery = dataset.battery_with_state(serial, &service)?;
    print_json(&service.calculate_battery_health(&battery))
}

/// Desempenho nominal de uma bateria.
pub fn performance(data: &Path, serial: &str, config: &Config) -> BateriaResult<()> {
    let (dataset, service) = open(data, config)?;
    let battery = dataset.battery_with_state(serial, &service)?;
    print_json(&service.analyze_battery_performance(&battery))
}

/// Vida útil restante de uma bateria.
pub fn lifetime(data: &Path, serial: &str, config: &Config) -> BateriaResult<()> {
    let (dataset, service) = open(data, config)?;
    let battery = dataset.battery_with_state(serial, &service)?;
    print_json(&service.predict_battery_lifetime(&battery))
}

/// Verificação dos dados cadastrais.
pub fn validate(data: &Path, serial: &str, config: &Config) -> BateriaResult<()> {
    let (dataset, service) = open(data, config)?;
    let battery = dataset.battery(serial)?;
    print_json(&service.validate_battery_data(battery))
}

/// Projeção de vida útil pelo histórico.
pub fn cycle_life(data: &Path, serial: &str, config: &Config) -> BateriaResult<()> {
    let (dataset, service) = open(data, config)?;
    let battery = dataset.battery(serial)?;
    let results = dataset.results_for(Some(serial));
    print_json(&service.analyze_cycle_life(&results, battery)?)
}

/// Ranking de todas as baterias.
pub fn compare(data: &Path, config: &Config) -> BateriaResult<()> {
    let (dataset, service) = open(data, config)?;
    let batteries = dataset.batteries_with_state(&service)?;
    print_json(&service.compare_batteries(&batteries))
}

/// Medições anômalas.
pub fn anomalies(data: &Path, serial: Option<&str>, config: &Config) -> BateriaResult<()> {
    let (dataset, service) = open(data, config)?;
    let results = dataset.results_for(serial);
    let anomalies = service.detect_anomalies(&results);
    tracing::info!(tests = results.len(), anomalies = anomalies.len(), "Anomaly scan finished");
    print_json(&anomalies)
}

/// Resumo dos testes.
pub fn summary(data: &Path, serial: Option<&str>, config: &Config) -> BateriaResult<()> {
    let (dataset, service) = open(data, config)?;
    print_json(&service.test_summary(&dataset.results_for(serial)))
}

/// Executa as análises de bateria duas vezes e mostra as estatísticas do cache.
pub fn stats(data: &Path, config: &Config) -> BateriaResult<()> {
    let (dataset, service) = open(data, config)?;
    let batteries = dataset.batteries_with_state(&service)?;

    for _ in 0..2 {
        for battery in &batteries {
            service.calculate_battery_health(battery);
            service.analyze_battery_performance(battery);
            service.predict_battery_lifetime(battery);
            service.validate_battery_data(battery);
        }
        service.compare_batteries(&batteries);
    }

    print_json(&service.cache_stats())
}
