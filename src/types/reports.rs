//! Relatórios produzidos pelo motor de análise.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::battery::HealthStatus;
use super::test_result::TestStatus;

/// Uma medição fora do padrão estatístico da série.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Métrica analisada (ex.: "capacity").
    pub field: String,

    /// Teste de origem.
    pub test_id: String,

    /// Valor observado.
    pub value: f64,

    /// Média da série.
    pub mean: f64,

    /// Desvio padrão populacional da série.
    pub std_dev: f64,

    /// Motivo legível.
    pub reason: String,
}

/// Projeção de vida útil a partir do histórico de ciclos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleLifeReport {
    pub total_cycles: u32,
    pub average_capacity: f64,
    pub capacity_fade_rate: f64,
    pub remaining_capacity_percent: f64,
    pub estimated_remaining_cycles: u32,
}

/// Resultado de uma validação por regras de negócio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `true` se nenhuma verificação falhou.
    pub is_valid: bool,

    /// Identificadores das verificações reprovadas, em ordem.
    pub failed_checks: Vec<String>,

    /// Uma mensagem por verificação reprovada.
    pub details: Vec<String>,
}

impl ValidationReport {
    /// Relatório sem falhas.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            failed_checks: Vec::new(),
            details: Vec::new(),
        }
    }

    /// Registra uma verificação reprovada.
    pub fn fail(&mut self, check: impl Into<String>, detail: impl Into<String>) {
        self.is_valid = false;
        self.failed_checks.push(check.into());
        self.details.push(detail.into());
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::valid()
    }
}

/// Métricas de desempenho de um teste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub state_of_health: f64,
    pub charge_efficiency: f64,
    pub energy_density: f64,
    pub power_density: f64,
    pub temperature_stability: f64,
}

/// Diferenças entre dois testes (`b - a`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub test_a: String,
    pub test_b: String,
    pub cycle_count_delta: i64,
    pub capacity_delta: f64,
    pub capacity_delta_percent: f64,
    pub internal_resistance_delta: f64,
    pub temperature_delta: f64,
    pub voltage_delta: f64,
    pub current_delta: f64,
}

/// Resumo agregado de uma lista de testes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub pass_rate: f64,
    pub average_capacity: f64,
    pub average_voltage: f64,
    pub average_temperature: f64,
    pub average_internal_resistance: f64,
    pub first_test_date: Option<DateTime<Utc>>,
    pub last_test_date: Option<DateTime<Utc>>,
}

/// Estatísticas descritivas de uma métrica.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Estatísticas de uma lista de testes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub count: usize,
    pub capacity: MetricStats,
    pub voltage: MetricStats,
    pub current: MetricStats,
    pub temperature: MetricStats,
    pub internal_resistance: MetricStats,
    pub status_counts: BTreeMap<TestStatus, usize>,
}

/// Desempenho de uma bateria a partir dos dados nominais.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub serial_number: String,
    /// Energia nominal (Wh).
    pub energy_capacity: f64,
    /// Energia específica (Wh/kg).
    pub specific_energy: f64,
    /// Janela de tensão (V).
    pub voltage_window: f64,
    pub state_of_health: Option<f64>,
    pub state_of_charge: Option<f64>,
    pub health_status: HealthStatus,
    pub rating: PerformanceRating,
}

/// Classificação de desempenho.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    High,
    Medium,
    Low,
    Unrated,
}

impl std::fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceRating::High => write!(f, "HIGH"),
            PerformanceRating::Medium => write!(f, "MEDIUM"),
            PerformanceRating::Low => write!(f, "LOW"),
            PerformanceRating::Unrated => write!(f, "UNRATED"),
        }
    }
}

/// Previsão de vida útil restante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifetimePrediction {
    pub serial_number: String,
    pub rated_cycle_life: u32,
    pub estimated_remaining_cycles: u32,
    pub estimated_remaining_years: f64,
    pub end_of_life_threshold: f64,
    pub state_of_health: Option<f64>,
}

/// Posição de uma bateria no ranking por SOH.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryRanking {
    pub serial_number: String,
    pub state_of_health: Option<f64>,
    pub nominal_capacity: f64,
}

/// Comparação entre várias baterias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub battery_count: usize,
    pub average_state_of_health: f64,
    pub average_nominal_capacity: f64,
    pub best: Option<String>,
    pub worst: Option<String>,
    pub ranking: Vec<BatteryRanking>,
}

/// Indicadores estruturais dos dados de uma bateria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFlags {
    pub has_serial_number: bool,
    pub has_model: bool,
    pub has_manufacturer: bool,
    pub has_chemistry: bool,
    pub capacity_positive: bool,
    pub voltage_positive: bool,
    pub voltage_range_valid: bool,
    pub weight_non_negative: bool,
    pub state_of_health_in_range: bool,
    pub state_of_charge_in_range: bool,
    pub is_valid: bool,
    pub issues: Vec<String>,
}
