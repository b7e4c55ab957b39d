//! Motor de análise de testes de bateria.
//!
//! Funções puras sobre entidades já carregadas em memória: nenhuma delas
//! guarda estado entre chamadas, o que permite memoizá-las na camada de cache.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::types::config::AnalysisConfig;
use crate::types::reports::{
    AnomalyRecord, ComparisonReport, CycleLifeReport, MetricStats, MetricsReport, StatsReport,
    SummaryReport, ValidationReport,
};
use crate::types::{Battery, HealthStatus, TestProfile, TestResult};
use crate::{BateriaError, BateriaResult};

use super::statistics::{detect_outliers, mean, mean_and_std_dev, round_to};

/// Mínimo de resultados para uma base estatística.
const MIN_ANOMALY_SAMPLES: usize = 3;

/// Percentual de capacidade que marca o fim de vida.
pub(crate) const END_OF_LIFE_PERCENT: f64 = 80.0;

/// Métricas examinadas pela detecção de anomalias, na ordem de varredura.
const ANOMALY_METRICS: [(&str, fn(&TestResult) -> f64); 5] = [
    ("capacity", |r| r.capacity),
    ("voltage", |r| r.voltage),
    ("current", |r| r.current),
    ("temperature", |r| r.temperature),
    ("internal_resistance", |r| r.internal_resistance),
];

/// Critério de agrupamento de resultados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupingCriteria {
    /// Por dia do teste (`AAAA-MM-DD`).
    Date,
    /// Por operador.
    Operator,
    /// Por equipamento.
    Equipment,
    /// Por faixa de temperatura.
    TemperatureRange,
    /// Critério não reconhecido: um grupo por `test_id`.
    Other(String),
}

impl std::str::FromStr for GroupingCriteria {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "date" => GroupingCriteria::Date,
            "operator" => GroupingCriteria::Operator,
            "equipment" => GroupingCriteria::Equipment,
            "temperature_range" => GroupingCriteria::TemperatureRange,
            other => GroupingCriteria::Other(other.to_string()),
        })
    }
}

/// Motor de análise.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    /// Cria um novo motor de análise.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Retorna o multiplicador de desvios usado na detecção de anomalias.
    pub fn outlier_multiplier(&self) -> f64 {
        self.config.outlier_multiplier
    }

    /// Estado de saúde (%) = capacidade medida / nominal, limitado a [0, 100].
    pub fn state_of_health(&self, result: &TestResult, battery: &Battery) -> BateriaResult<f64> {
        if !(battery.nominal_capacity > 0.0) {
            return Err(BateriaError::domain(format!(
                "capacidade nominal inválida para {}: {}",
                battery.serial_number, battery.nominal_capacity
            )));
        }
        let soh = result.capacity / battery.nominal_capacity * 100.0;
        Ok(soh.clamp(0.0, 100.0))
    }

    /// Estado de carga (%) pela posição da tensão na faixa da bateria.
    pub fn state_of_charge(&self, voltage: f64, battery: &Battery) -> BateriaResult<f64> {
        let band = battery.max_voltage - battery.min_voltage;
        if band == 0.0 || !band.is_finite() {
            return Err(BateriaError::domain(format!(
                "faixa de tensão nula para {}: max_voltage == min_voltage == {}",
                battery.serial_number, battery.max_voltage
            )));
        }
        let soc = (voltage - battery.min_voltage) / band * 100.0;
        Ok(soc.clamp(0.0, 100.0))
    }

    /// Grava SOH, SOC e classificação de saúde na bateria a partir de um teste.
    pub fn update_battery_state(
        &self,
        battery: &mut Battery,
        result: &TestResult,
    ) -> BateriaResult<()> {
        let soh = self.state_of_health(result, battery)?;
        let soc = self.state_of_charge(result.voltage, battery)?;

        battery.state_of_health = Some(round_to(soh, 2));
        battery.state_of_charge = Some(round_to(soc, 2));
        battery.health_status = HealthStatus::from_soh(battery.state_of_health);
        Ok(())
    }

    /// Projeta a vida útil a partir do histórico de ciclos.
    pub fn analyze_cycle_life(
        &self,
        results: &[TestResult],
        battery: &Battery,
    ) -> BateriaResult<CycleLifeReport> {
        if results.is_empty() {
            return Ok(CycleLifeReport::default());
        }
        if !(battery.nominal_capacity > 0.0) {
            return Err(BateriaError::domain(format!(
                "capacidade nominal inválida para {}: {}",
                battery.serial_number, battery.nominal_capacity
            )));
        }

        let mut ordered: Vec<&TestResult> = results.iter().collect();
        ordered.sort_by_key(|r| r.cycle_count);

        // Não vazio: verificado acima.
        let first = ordered[0];
        let last = ordered[ordered.len() - 1];

        let total_cycles = last.cycle_count;
        let capacities: Vec<f64> = ordered.iter().map(|r| r.capacity).collect();
        let average_capacity = mean(&capacities);

        let capacity_fade_rate = if first.capacity > 0.0 {
            (first.capacity - last.capacity) / first.capacity * 100.0
        } else {
            0.0
        };
        let remaining_capacity_percent = last.capacity / battery.nominal_capacity * 100.0;

        let estimated_remaining_cycles =
            if remaining_capacity_percent > END_OF_LIFE_PERCENT && capacity_fade_rate > 0.0 {
                ((remaining_capacity_percent - END_OF_LIFE_PERCENT) / capacity_fade_rate
                    * total_cycles as f64) as u32
            } else {
                0
            };

        Ok(CycleLifeReport {
            total_cycles,
            average_capacity: round_to(average_capacity, 3),
            capacity_fade_rate: round_to(capacity_fade_rate, 2),
            remaining_capacity_percent: round_to(remaining_capacity_percent, 2),
            estimated_remaining_cycles,
        })
    }

    /// Valida um teste contra o perfil e a bateria.
    ///
    /// Todas as verificações rodam; falhas de regra de negócio são reportadas
    /// como dados, nunca como erro.
    pub fn validate_test_result(
        &self,
        result: &TestResult,
        profile: &TestProfile,
        battery: &Battery,
    ) -> ValidationReport {
        let mut report = ValidationReport::valid();

        if result.temperature < profile.min_temperature
            || result.temperature > profile.max_temperature
        {
            report.fail(
                "temperature_range",
                format!(
                    "temperatura {}°C fora de [{}, {}]°C",
                    result.temperature, profile.min_temperature, profile.max_temperature
                ),
            );
        }

        let v_low = profile.test_voltage * 0.9;
        let v_high = profile.test_voltage * 1.1;
        if result.voltage < v_low || result.voltage > v_high {
            report.fail(
                "voltage_range",
                format!(
                    "tensão {}V fora de ±10% de {}V [{:.3}, {:.3}]",
                    result.voltage, profile.test_voltage, v_low, v_high
                ),
            );
        }

        let i_max = profile.test_current * 1.2;
        if result.current.abs() > i_max {
            report.fail(
                "current_limit",
                format!(
                    "corrente |{}|A acima de 120% de {}A ({:.3}A)",
                    result.current, profile.test_current, i_max
                ),
            );
        }

        let c_low = battery.nominal_capacity * 0.5;
        let c_high = battery.nominal_capacity * 1.2;
        if result.capacity < c_low || result.capacity > c_high {
            report.fail(
                "capacity_range",
                format!(
                    "capacidade {}Ah fora de [50%, 120%] de {}Ah [{:.3}, {:.3}]",
                    result.capacity, battery.nominal_capacity, c_low, c_high
                ),
            );
        }

        report
    }

    /// Métricas de desempenho de um teste.
    pub fn performance_metrics(
        &self,
        result: &TestResult,
        battery: &Battery,
    ) -> BateriaResult<MetricsReport> {
        let soh = self.state_of_health(result, battery)?;
        let charge_efficiency = (100.0 - result.internal_resistance * 0.1).clamp(0.0, 100.0);

        let (energy_density, power_density) = if battery.weight > 0.0 {
            (
                result.capacity * result.voltage / battery.weight,
                result.voltage * result.current / battery.weight,
            )
        } else {
            (0.0, 0.0)
        };
        let temperature_stability = 100.0 - (result.temperature - 25.0).abs() * 2.0;

        Ok(MetricsReport {
            state_of_health: round_to(soh, 2),
            charge_efficiency: round_to(charge_efficiency, 2),
            energy_density: round_to(energy_density, 2),
            power_density: round_to(power_density, 2),
            temperature_stability: round_to(temperature_stability, 2),
        })
    }

    /// Lista medições anômalas nas cinco métricas principais.
    ///
    /// Menos de três resultados não formam base estatística: retorna vazio.
    pub fn detect_anomalies(&self, results: &[TestResult]) -> Vec<AnomalyRecord> {
        if results.len() < MIN_ANOMALY_SAMPLES {
            return Vec::new();
        }

        let mut anomalies = Vec::new();
        for (field, extract) in ANOMALY_METRICS {
            let values: Vec<f64> = results.iter().map(extract).collect();
            let stats = mean_and_std_dev(&values);

            for index in 0..values.len() {
                anomalies.extend(detect_outliers(
                    &values,
                    field,
                    index,
                    results,
                    Some(stats),
                    self.config.outlier_multiplier,
                ));
            }
        }

        tracing::debug!(
            samples = results.len(),
            anomalies = anomalies.len(),
            "Anomaly scan finished"
        );
        anomalies
    }

    /// Diferenças `b - a` entre dois testes.
    pub fn compare_test_results(&self, a: &TestResult, b: &TestResult) -> ComparisonReport {
        let capacity_delta = b.capacity - a.capacity;
        let capacity_delta_percent = if a.capacity > 0.0 {
            capacity_delta / a.capacity * 100.0
        } else {
            0.0
        };

        ComparisonReport {
            test_a: a.test_id.clone(),
            test_b: b.test_id.clone(),
            cycle_count_delta: i64::from(b.cycle_count) - i64::from(a.cycle_count),
            capacity_delta: round_to(capacity_delta, 3),
            capacity_delta_percent: round_to(capacity_delta_percent, 2),
            internal_resistance_delta: round_to(b.internal_resistance - a.internal_resistance, 3),
            temperature_delta: round_to(b.temperature - a.temperature, 2),
            voltage_delta: round_to(b.voltage - a.voltage, 3),
            current_delta: round_to(b.current - a.current, 3),
        }
    }

    /// Verificações estruturais de um perfil editado.
    pub fn validate_test_profile(&self, profile: &TestProfile) -> ValidationReport {
        let mut report = ValidationReport::valid();
        for (field, reason) in profile.violations() {
            report.fail(field, format!("{}: {}", field, reason));
        }
        report
    }

    /// Gera um ID de teste: `BAT-<serial>-<AAAAMMDD>-<8 hex>`.
    pub fn generate_test_id(&self, battery: &Battery) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "BAT-{}-{}-{}",
            battery.serial_number,
            Utc::now().format("%Y%m%d"),
            &suffix[..8]
        )
    }

    /// Resumo agregado; relatório zerado para lista vazia.
    pub fn test_summary(&self, results: &[TestResult]) -> SummaryReport {
        if results.is_empty() {
            return SummaryReport::default();
        }

        let total = results.len();
        let passed = results.iter().filter(|r| r.is_passed).count();
        let avg = |f: fn(&TestResult) -> f64| {
            let values: Vec<f64> = results.iter().map(f).collect();
            round_to(mean(&values), 3)
        };

        SummaryReport {
            total_tests: total,
            passed_tests: passed,
            failed_tests: total - passed,
            pass_rate: round_to(passed as f64 / total as f64 * 100.0, 2),
            average_capacity: avg(|r| r.capacity),
            average_voltage: avg(|r| r.voltage),
            average_temperature: avg(|r| r.temperature),
            average_internal_resistance: avg(|r| r.internal_resistance),
            first_test_date: results.iter().map(|r| r.test_date).min(),
            last_test_date: results.iter().map(|r| r.test_date).max(),
        }
    }

    /// Estatísticas descritivas; relatório zerado para lista vazia.
    pub fn test_statistics(&self, results: &[TestResult]) -> StatsReport {
        if results.is_empty() {
            return StatsReport::default();
        }

        let describe = |f: fn(&TestResult) -> f64| {
            let values: Vec<f64> = results.iter().map(f).collect();
            let (mean, std_dev) = mean_and_std_dev(&values);
            MetricStats {
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                mean: round_to(mean, 3),
                std_dev: round_to(std_dev, 3),
            }
        };

        let mut status_counts = BTreeMap::new();
        for result in results {
            *status_counts.entry(result.test_status).or_insert(0) += 1;
        }

        StatsReport {
            count: results.len(),
            capacity: describe(|r| r.capacity),
            voltage: describe(|r| r.voltage),
            current: describe(|r| r.current),
            temperature: describe(|r| r.temperature),
            internal_resistance: describe(|r| r.internal_resistance),
            status_counts,
        }
    }

    /// Agrupa resultados pelo critério informado.
    pub fn group_test_results(
        &self,
        results: &[TestResult],
        criteria: &GroupingCriteria,
    ) -> BTreeMap<String, Vec<TestResult>> {
        let mut groups: BTreeMap<String, Vec<TestResult>> = BTreeMap::new();

        for result in results {
            let key = match criteria {
                GroupingCriteria::Date => result.test_date.format("%Y-%m-%d").to_string(),
                GroupingCriteria::Operator => result.test_operator.clone(),
                GroupingCriteria::Equipment => result.test_equipment.clone(),
                GroupingCriteria::TemperatureRange => temperature_bucket(result.temperature),
                GroupingCriteria::Other(_) => result.test_id.clone(),
            };
            groups.entry(key).or_default().push(result.clone());
        }

        groups
    }
}

fn temperature_bucket(temperature: f64) -> String {
    if temperature < 20.0 {
        "< 20°C".to_string()
    } else if temperature < 30.0 {
        "20-30°C".to_string()
    } else {
        ">= 30°C".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Measurements, ProfileParameters, TestStatus};
    use chrono::TimeZone;

    fn battery() -> Battery {
        Battery::new("SN-001", 2.0, 3.7, 3.0, 4.2, 0.05).unwrap()
    }

    fn result(id: &str, capacity: f64, voltage: f64, cycles: u32) -> TestResult {
        TestResult::new(
            id,
            "SN-001",
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            Measurements {
                temperature: 25.0,
                humidity: 45.0,
                voltage,
                current: 1.0,
                capacity,
                internal_resistance: 40.0,
                cycle_count: cycles,
                max_temperature: 28.0,
                min_temperature: 22.0,
            },
        )
        .unwrap()
    }

    fn profile() -> TestProfile {
        TestProfile::new(
            "P-1",
            "Padrão",
            ProfileParameters {
                test_voltage: 3.7,
                test_current: 1.0,
                max_cycles: 500,
                test_temperature: 25.0,
                min_temperature: 15.0,
                max_temperature: 35.0,
                charge_voltage: 4.2,
                charge_current: 1.0,
                discharge_voltage: 3.0,
                discharge_current: 1.0,
                cut_off_voltage: 2.8,
                cut_off_current: 0.05,
                sampling_interval: 1.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_state_of_health_example() {
        let engine = AnalysisEngine::default();
        let soh = engine.state_of_health(&result("T-1", 1.8, 3.8, 0), &battery()).unwrap();
        assert!((soh - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_state_of_health_clamped() {
        let engine = AnalysisEngine::default();
        let soh = engine.state_of_health(&result("T-1", 9.0, 3.8, 0), &battery()).unwrap();
        assert_eq!(soh, 100.0);
    }

    #[test]
    fn test_state_of_charge_example() {
        let engine = AnalysisEngine::default();
        let soc = engine.state_of_charge(3.8, &battery()).unwrap();
        assert!((soc - 66.666_666).abs() < 1e-3);

        assert_eq!(engine.state_of_charge(5.0, &battery()).unwrap(), 100.0);
        assert_eq!(engine.state_of_charge(1.0, &battery()).unwrap(), 0.0);
    }

    #[test]
    fn test_state_of_charge_zero_band_is_domain_error() {
        let engine = AnalysisEngine::default();
        let mut b = battery();
        b.min_voltage = b.max_voltage;
        assert!(matches!(
            engine.state_of_charge(3.8, &b),
            Err(BateriaError::Domain(_))
        ));
    }

    #[test]
    fn test_update_battery_state() {
        let engine = AnalysisEngine::default();
        let mut b = battery();
        engine
            .update_battery_state(&mut b, &result("T-1", 1.8, 3.8, 0))
            .unwrap();

        assert_eq!(b.state_of_health, Some(90.0));
        assert_eq!(b.state_of_charge, Some(66.67));
        assert_eq!(b.health_status, HealthStatus::Excellent);
    }

    #[test]
    fn test_cycle_life_example() {
        let engine = AnalysisEngine::default();
        // Fora de ordem de propósito.
        let results = vec![
            result("T-3", 1.6, 3.7, 100),
            result("T-1", 2.0, 3.7, 0),
            result("T-2", 1.9, 3.7, 50),
        ];

        let report = engine.analyze_cycle_life(&results, &battery()).unwrap();
        assert_eq!(report.total_cycles, 100);
        assert_eq!(report.capacity_fade_rate, 20.0);
        assert_eq!(report.remaining_capacity_percent, 80.0);
        assert_eq!(report.estimated_remaining_cycles, 0);
        assert!((report.average_capacity - 1.833).abs() < 1e-9);
    }

    #[test]
    fn test_cycle_life_extrapolation() {
        let engine = AnalysisEngine::default();
        let results = vec![result("T-1", 2.0, 3.7, 0), result("T-2", 1.75, 3.7, 100)];

        let report = engine.analyze_cycle_life(&results, &battery()).unwrap();
        // fade 12.5%, restante 87.5% => (87.5 - 80) / 12.5 * 100 = 60
        assert_eq!(report.capacity_fade_rate, 12.5);
        assert_eq!(report.remaining_capacity_percent, 87.5);
        assert_eq!(report.estimated_remaining_cycles, 60);
    }

    #[test]
    fn test_cycle_life_empty() {
        let engine = AnalysisEngine::default();
        let report = engine.analyze_cycle_life(&[], &battery()).unwrap();
        assert_eq!(report, CycleLifeReport::default());
    }

    #[test]
    fn test_validate_test_result_accumulates() {
        let engine = AnalysisEngine::default();
        let mut r = result("T-1", 0.5, 4.5, 0);
        r.current = -1.5;
        r.temperature = 40.0;

        let report = engine.validate_test_result(&r, &profile(), &battery());
        assert!(!report.is_valid);
        assert_eq!(
            report.failed_checks,
            vec!["temperature_range", "voltage_range", "current_limit", "capacity_range"]
        );
        assert_eq!(report.details.len(), 4);
        assert!(report.details[1].contains("4.5"));
    }

    #[test]
    fn test_validate_test_result_passes() {
        let engine = AnalysisEngine::default();
        let report = engine.validate_test_result(&result("T-1", 1.8, 3.8, 0), &profile(), &battery());
        assert!(report.is_valid);
        assert!(report.failed_checks.is_empty());
    }

    #[test]
    fn test_performance_metrics() {
        let engine = AnalysisEngine::default();
        let mut r = result("T-1", 1.8, 3.8, 0);
        r.temperature = 30.0;

        let m = engine.performance_metrics(&r, &battery()).unwrap();
        assert_eq!(m.state_of_health, 90.0);
        assert_eq!(m.charge_efficiency, 96.0);
        assert_eq!(m.energy_density, 136.8);
        assert_eq!(m.power_density, 76.0);
        assert_eq!(m.temperature_stability, 90.0);
    }

    #[test]
    fn test_performance_metrics_weightless() {
        let engine = AnalysisEngine::default();
        let b = Battery::new("SN-002", 2.0, 3.7, 3.0, 4.2, 0.0).unwrap();
        let m = engine.performance_metrics(&result("T-1", 1.8, 3.8, 0), &b).unwrap();
        assert_eq!(m.energy_density, 0.0);
        assert_eq!(m.power_density, 0.0);
    }

    #[test]
    fn test_detect_anomalies_example() {
        let engine = AnalysisEngine::default();
        let results = vec![
            result("T-1", 2.0, 3.7, 0),
            result("T-2", 2.0, 3.7, 10),
            result("T-3", 0.5, 3.7, 20),
        ];

        let anomalies = engine.detect_anomalies(&results);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].field, "capacity");
        assert_eq!(anomalies[0].test_id, "T-3");
        assert!(anomalies.iter().all(|a| a.field != "internal_resistance"));
    }

    #[test]
    fn test_detect_anomalies_needs_three() {
        let engine = AnalysisEngine::default();
        let results = vec![result("T-1", 2.0, 3.7, 0), result("T-2", 0.1, 3.7, 0)];
        assert!(engine.detect_anomalies(&results).is_empty());
    }

    #[test]
    fn test_compare_test_results() {
        let engine = AnalysisEngine::default();
        let a = result("T-1", 2.0, 3.7, 10);
        let b = result("T-2", 1.8, 3.6, 60);

        let cmp = engine.compare_test_results(&a, &b);
        assert_eq!(cmp.cycle_count_delta, 50);
        assert_eq!(cmp.capacity_delta, -0.2);
        assert_eq!(cmp.capacity_delta_percent, -10.0);
        assert_eq!(cmp.voltage_delta, -0.1);
        assert_eq!(cmp.internal_resistance_delta, 0.0);
    }

    #[test]
    fn test_validate_test_profile() {
        let engine = AnalysisEngine::default();
        let mut p = profile();
        assert!(engine.validate_test_profile(&p).is_valid);

        p.cut_off_voltage = 0.0;
        p.min_temperature = 50.0;
        let report = engine.validate_test_profile(&p);
        assert!(!report.is_valid);
        assert_eq!(report.failed_checks, vec!["cut_off_voltage", "min_temperature"]);
    }

    #[test]
    fn test_generate_test_id() {
        let engine = AnalysisEngine::default();
        let id1 = engine.generate_test_id(&battery());
        let id2 = engine.generate_test_id(&battery());

        let prefix = format!("BAT-SN-001-{}-", Utc::now().format("%Y%m%d"));
        assert!(id1.starts_with(&prefix));
        let suffix = &id1[prefix.len()..];
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_summary_and_statistics() {
        let engine = AnalysisEngine::default();
        let results = vec![
            result("T-1", 2.0, 3.7, 0).with_passed(true).with_status(TestStatus::Completed),
            result("T-2", 1.0, 3.9, 10).with_status(TestStatus::Failed),
        ];

        let summary = engine.test_summary(&results);
        assert_eq!(summary.total_tests, 2);
        assert_eq!(summary.passed_tests, 1);
        assert_eq!(summary.failed_tests, 1);
        assert_eq!(summary.pass_rate, 50.0);
        assert_eq!(summary.average_capacity, 1.5);

        let stats = engine.test_statistics(&results);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.capacity.min, 1.0);
        assert_eq!(stats.capacity.max, 2.0);
        assert_eq!(stats.capacity.std_dev, 0.5);
        assert_eq!(stats.status_counts.get(&TestStatus::Failed), Some(&1));

        assert_eq!(engine.test_summary(&[]), SummaryReport::default());
        assert_eq!(engine.test_statistics(&[]), StatsReport::default());
    }

    #[test]
    fn test_group_by_temperature_range() {
        let engine = AnalysisEngine::default();
        let mut cold = result("T-1", 2.0, 3.7, 0);
        cold.temperature = 10.0;
        let mid = result("T-2", 2.0, 3.7, 0);
        let mut hot = result("T-3", 2.0, 3.7, 0);
        hot.temperature = 30.0;

        let groups = engine.group_test_results(
            &[cold, mid, hot],
            &GroupingCriteria::TemperatureRange,
        );
        assert_eq!(groups.len(), 3);
        assert_eq!(groups["< 20°C"][0].test_id, "T-1");
        assert_eq!(groups["20-30°C"][0].test_id, "T-2");
        assert_eq!(groups[">= 30°C"][0].test_id, "T-3");
    }

    #[test]
    fn test_group_unknown_criteria_by_test_id() {
        let engine = AnalysisEngine::default();
        let criteria: GroupingCriteria = "battery_color".parse().unwrap();
        let results = vec![result("T-1", 2.0, 3.7, 0), result("T-2", 2.0, 3.7, 0)];

        let groups = engine.group_test_results(&results, &criteria);
        assert_eq!(groups.len(), 2);
        assert!(groups.contains_key("T-1"));

        let by_date = engine.group_test_results(&results, &GroupingCriteria::Date);
        assert_eq!(by_date["2024-03-01"].len(), 2);
    }
}
