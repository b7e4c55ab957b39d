//! Análises de nível de bateria expostas pelo serviço.
//!
//! Dependem apenas dos dados nominais e dos campos derivados já gravados na
//! bateria, por isso são as operações memoizadas pelo cache.

use crate::types::reports::{
    BatteryRanking, ComparisonSummary, LifetimePrediction, PerformanceRating, PerformanceReport,
    ValidationFlags,
};
use crate::types::{Battery, HealthStatus};

use super::engine::{AnalysisEngine, END_OF_LIFE_PERCENT};
use super::statistics::{mean, round_to};

/// Ciclos diários assumidos na conversão ciclos → anos.
const CYCLES_PER_YEAR: f64 = 365.0;

/// Vida útil nominal em ciclos, por química.
pub fn rated_cycle_life(chemistry: &str) -> u32 {
    let normalized: String = chemistry
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    match normalized.as_str() {
        "lifepo4" | "lfp" => 2000,
        "leadacid" | "pbacid" | "sla" => 300,
        "nimh" => 500,
        // Li-ion e variantes (NMC, LCO, NCA, LiPo) e químicas desconhecidas.
        _ => 500,
    }
}

impl AnalysisEngine {
    /// Retorna uma cópia da bateria com `health_status` classificado.
    ///
    /// A bateria de entrada nunca é alterada.
    pub fn battery_health(&self, battery: &Battery) -> Battery {
        let mut updated = battery.clone();
        updated.health_status = HealthStatus::from_soh(battery.state_of_health);
        updated
    }

    /// Desempenho a partir dos dados nominais.
    pub fn battery_performance(&self, battery: &Battery) -> PerformanceReport {
        let energy_capacity = battery.nominal_capacity * battery.nominal_voltage;
        let specific_energy = if battery.weight > 0.0 {
            energy_capacity / battery.weight
        } else {
            0.0
        };

        let rating = if battery.weight <= 0.0 {
            PerformanceRating::Unrated
        } else if specific_energy >= 150.0 {
            PerformanceRating::High
        } else if specific_energy >= 80.0 {
            PerformanceRating::Medium
        } else {
            PerformanceRating::Low
        };

        PerformanceReport {
            serial_number: battery.serial_number.clone(),
            energy_capacity: round_to(energy_capacity, 2),
            specific_energy: round_to(specific_energy, 2),
            voltage_window: round_to(battery.max_voltage - battery.min_voltage, 3),
            state_of_health: battery.state_of_health,
            state_of_charge: battery.state_of_charge,
            health_status: HealthStatus::from_soh(battery.state_of_health),
            rating,
        }
    }

    /// Ciclos restantes até o fim de vida (80% do SOH).
    pub fn battery_lifetime(&self, battery: &Battery) -> LifetimePrediction {
        let rated = rated_cycle_life(&battery.chemistry);

        let remaining = match battery.state_of_health {
            Some(soh) if soh > END_OF_LIFE_PERCENT => {
                let soh = soh.min(100.0);
                (rated as f64 * (soh - END_OF_LIFE_PERCENT) / (100.0 - END_OF_LIFE_PERCENT)) as u32
            }
            _ => 0,
        };

        LifetimePrediction {
            serial_number: battery.serial_number.clone(),
            rated_cycle_life: rated,
            estimated_remaining_cycles: remaining,
            estimated_remaining_years: round_to(remaining as f64 / CYCLES_PER_YEAR, 2),
            end_of_life_threshold: END_OF_LIFE_PERCENT,
            state_of_health: battery.state_of_health,
        }
    }

    /// Compara baterias pelo SOH; lista vazia gera resumo zerado.
    pub fn compare_batteries(&self, batteries: &[Battery]) -> ComparisonSummary {
        if batteries.is_empty() {
            return ComparisonSummary::default();
        }

        let mut ranking: Vec<BatteryRanking> = batteries
            .iter()
            .map(|b| BatteryRanking {
                serial_number: b.serial_number.clone(),
                state_of_health: b.state_of_health,
                nominal_capacity: b.nominal_capacity,
            })
            .collect();

        // SOH decrescente, sem SOH por último, desempate pelo número de série.
        ranking.sort_by(|a, b| {
            let soh_a = a.state_of_health.unwrap_or(f64::NEG_INFINITY);
            let soh_b = b.state_of_health.unwrap_or(f64::NEG_INFINITY);
            soh_b
                .total_cmp(&soh_a)
                .then_with(|| a.serial_number.cmp(&b.serial_number))
        });

        let known: Vec<&BatteryRanking> = ranking
            .iter()
            .filter(|r| r.state_of_health.is_some())
            .collect();
        let soh_values: Vec<f64> = known.iter().filter_map(|r| r.state_of_health).collect();
        let capacities: Vec<f64> = batteries.iter().map(|b| b.nominal_capacity).collect();

        ComparisonSummary {
            battery_count: batteries.len(),
            average_state_of_health: round_to(mean(&soh_values), 2),
            average_nominal_capacity: round_to(mean(&capacities), 3),
            best: known.first().map(|r| r.serial_number.clone()),
            worst: known.last().map(|r| r.serial_number.clone()),
            ranking,
        }
    }

    /// Indicadores estruturais; nunca falha.
    pub fn validate_battery_data(&self, battery: &Battery) -> ValidationFlags {
        let in_percent = |v: Option<f64>| v.map_or(true, |v| (0.0..=100.0).contains(&v));

        let checks = [
            ("serial_number", !battery.serial_number.trim().is_empty(), "número de série vazio"),
            ("model", !battery.model.trim().is_empty(), "modelo vazio"),
            ("manufacturer", !battery.manufacturer.trim().is_empty(), "fabricante vazio"),
            ("chemistry", !battery.chemistry.trim().is_empty(), "química vazia"),
            ("nominal_capacity", battery.nominal_capacity > 0.0, "capacidade nominal <= 0"),
            ("nominal_voltage", battery.nominal_voltage > 0.0, "tensão nominal <= 0"),
            (
                "voltage_range",
                battery.max_voltage > battery.min_voltage,
                "max_voltage <= min_voltage",
            ),
            ("weight", battery.weight >= 0.0, "peso negativo"),
            (
                "state_of_health",
                in_percent(battery.state_of_health),
                "SOH fora de [0, 100]",
            ),
            (
                "state_of_charge",
                in_percent(battery.state_of_charge),
                "SOC fora de [0, 100]",
            ),
        ];

        let issues: Vec<String> = checks
            .iter()
            .filter(|(_, ok, _)| !ok)
            .map(|(field, _, msg)| format!("{}: {}", field, msg))
            .collect();

        ValidationFlags {
            has_serial_number: checks[0].1,
            has_model: checks[1].1,
            has_manufacturer: checks[2].1,
            has_chemistry: checks[3].1,
            capacity_positive: checks[4].1,
            voltage_positive: checks[5].1,
            voltage_range_valid: checks[6].1,
            weight_non_negative: checks[7].1,
            state_of_health_in_range: checks[8].1,
            state_of_charge_in_range: checks[9].1,
            is_valid: issues.is_empty(),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery(serial: &str, soh: Option<f64>) -> Battery {
        let b = Battery::new(serial, 2.5, 3.6, 2.5, 4.2, 0.045)
            .unwrap()
            .with_model("INR18650")
            .with_manufacturer("Acme")
            .with_chemistry("Li-ion");
        match soh {
            Some(v) => b.with_state_of_health(v),
            None => b,
        }
    }

    #[test]
    fn test_rated_cycle_life() {
        assert_eq!(rated_cycle_life("LiFePO4"), 2000);
        assert_eq!(rated_cycle_life("Lead-Acid"), 300);
        assert_eq!(rated_cycle_life("NiMH"), 500);
        assert_eq!(rated_cycle_life("Li-ion"), 500);
        assert_eq!(rated_cycle_life(""), 500);
    }

    #[test]
    fn test_battery_health_returns_copy() {
        let engine = AnalysisEngine::default();
        let original = battery("SN-1", Some(85.0));

        let updated = engine.battery_health(&original);
        assert_eq!(updated.health_status, HealthStatus::Good);
        assert_eq!(original.health_status, HealthStatus::Unknown);
    }

    #[test]
    fn test_battery_performance() {
        let engine = AnalysisEngine::default();
        let report = engine.battery_performance(&battery("SN-1", Some(95.0)));

        assert_eq!(report.energy_capacity, 9.0);
        assert_eq!(report.specific_energy, 200.0);
        assert_eq!(report.voltage_window, 1.7);
        assert_eq!(report.rating, PerformanceRating::High);
        assert_eq!(report.health_status, HealthStatus::Excellent);
    }

    #[test]
    fn test_battery_lifetime() {
        let engine = AnalysisEngine::default();

        let p = engine.battery_lifetime(&battery("SN-1", Some(90.0)));
        assert_eq!(p.rated_cycle_life, 500);
        assert_eq!(p.estimated_remaining_cycles, 250);
        assert_eq!(p.estimated_remaining_years, 0.68);

        let p = engine.battery_lifetime(&battery("SN-1", Some(75.0)));
        assert_eq!(p.estimated_remaining_cycles, 0);

        let p = engine.battery_lifetime(&battery("SN-1", None));
        assert_eq!(p.estimated_remaining_cycles, 0);
    }

    #[test]
    fn test_compare_batteries_ranking() {
        let engine = AnalysisEngine::default();
        let batteries = vec![
            battery("SN-B", Some(70.0)),
            battery("SN-C", None),
            battery("SN-A", Some(92.0)),
        ];

        let summary = engine.compare_batteries(&batteries);
        assert_eq!(summary.battery_count, 3);
        assert_eq!(summary.best.as_deref(), Some("SN-A"));
        assert_eq!(summary.worst.as_deref(), Some("SN-B"));
        assert_eq!(summary.average_state_of_health, 81.0);

        let order: Vec<&str> = summary.ranking.iter().map(|r| r.serial_number.as_str()).collect();
        assert_eq!(order, vec!["SN-A", "SN-B", "SN-C"]);
    }

    #[test]
    fn test_compare_batteries_empty() {
        let engine = AnalysisEngine::default();
        assert_eq!(engine.compare_batteries(&[]), ComparisonSummary::default());
    }

    #[test]
    fn test_validate_battery_data() {
        let engine = AnalysisEngine::default();
        assert!(engine.validate_battery_data(&battery("SN-1", Some(90.0))).is_valid);

        let mut b = battery("SN-1", Some(120.0));
        b.model.clear();
        b.weight = -1.0;

        let flags = engine.validate_battery_data(&b);
        assert!(!flags.is_valid);
        assert!(!flags.has_model);
        assert!(!flags.weight_non_negative);
        assert!(!flags.state_of_health_in_range);
        assert!(flags.has_serial_number);
        assert_eq!(flags.issues.len(), 3);
    }
}
