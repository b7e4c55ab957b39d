//! Testes de integração para o motor de análise do Bateria.

use chrono::{DateTime, TimeZone, Utc};

use bateria::analysis::{AnalysisEngine, GroupingCriteria};
use bateria::types::{Battery, Measurements, ProfileParameters, TestProfile, TestResult};
use bateria::{BateriaError, BatteryAnalysisService};

fn date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
}

fn battery() -> Battery {
    Battery::new("SN-100", 2.0, 3.7, 3.0, 4.2, 0.045)
        .expect("valid battery")
        .with_model("18650")
        .with_manufacturer("Acme")
        .with_chemistry("Li-ion")
}

fn result(id: &str, day: u32, cycles: u32, capacity: f64) -> TestResult {
    TestResult::new(
        id,
        "SN-100",
        date(day),
        Measurements {
            temperature: 25.0,
            humidity: 45.0,
            voltage: 3.8,
            current: 1.0,
            capacity,
            internal_resistance: 30.0,
            cycle_count: cycles,
            max_temperature: 28.0,
            min_temperature: 24.0,
        },
    )
    .expect("valid test result")
}

fn profile() -> TestProfile {
    TestProfile::new(
        "P-1",
        "Capacidade 1C",
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
    .expect("valid profile")
}

// Estado de saúde e de carga
mod state_tests {
    use super::*;

    #[test]
    fn test_soh_and_soc_reference_values() {
        let engine = AnalysisEngine::default();
        let battery = battery();
        let test = result("T-1", 1, 10, 1.8);

        let soh = engine.state_of_health(&test, &battery).unwrap();
        let soc = engine.state_of_charge(test.voltage, &battery).unwrap();

        assert!((soh - 90.0).abs() < 1e-9);
        assert!((soc - 66.6667).abs() < 1e-3);
    }

    #[test]
    fn test_soh_and_soc_always_clamped() {
        let engine = AnalysisEngine::default();
        let battery = battery();

        for capacity in [0.001, 0.5, 2.0, 4.0, 1.0e6] {
            let test = result("T-C", 1, 1, capacity);
            let soh = engine.state_of_health(&test, &battery).unwrap();
            assert!((0.0..=100.0).contains(&soh), "soh {} for {}", soh, capacity);
        }

        for voltage in [-1000.0, 0.0, 2.9, 3.6, 4.2, 4.3, 1.0e6] {
            let soc = engine.state_of_charge(voltage, &battery).unwrap();
            assert!((0.0..=100.0).contains(&soc), "soc {} for {}", soc, voltage);
        }
    }

    #[test]
    fn test_flat_voltage_band_is_domain_error() {
        let engine = AnalysisEngine::default();
        let mut battery = battery();
        battery.max_voltage = battery.min_voltage;

        let err = engine.state_of_charge(3.5, &battery).unwrap_err();
        assert!(matches!(err, BateriaError::Domain(_)));
    }

    #[test]
    fn test_update_battery_state_through_service() {
        let service = BatteryAnalysisService::default();
        let mut battery = battery();

        service
            .update_battery_state(&mut battery, &result("T-1", 1, 10, 1.5))
            .unwrap();

        assert_eq!(battery.state_of_health, Some(75.0));
        assert_eq!(battery.health_status.to_string(), "fair");
    }
}

// Ciclo de vida
mod cycle_life_tests {
    use super::*;

    #[test]
    fn test_cycle_life_at_end_of_life_threshold() {
        let engine = AnalysisEngine::default();
        // Fora de ordem para exercitar a ordenação por ciclos.
        let results = vec![
            result("T-3", 3, 100, 1.6),
            result("T-1", 1, 0, 2.0),
            result("T-2", 2, 50, 1.9),
        ];

        let report = engine.analyze_cycle_life(&results, &battery()).unwrap();

        assert_eq!(report.total_cycles, 100);
        assert_eq!(report.capacity_fade_rate, 20.0);
        assert_eq!(report.remaining_capacity_percent, 80.0);
        assert_eq!(report.estimated_remaining_cycles, 0);
        assert!((report.average_capacity - 1.833).abs() < 1e-9);
    }

    #[test]
    fn test_cycle_life_empty_history() {
        let engine = AnalysisEngine::default();
        let report = engine.analyze_cycle_life(&[], &battery()).unwrap();

        assert_eq!(report.total_cycles, 0);
        assert_eq!(report.estimated_remaining_cycles, 0);
    }
}

// Detecção de anomalias
mod anomaly_tests {
    use super::*;

    fn batch() -> Vec<TestResult> {
        vec![
            result("T-1", 1, 10, 2.0),
            result("T-2", 2, 20, 2.0),
            result("T-3", 3, 30, 0.5),
        ]
    }

    #[test]
    fn test_flags_only_the_capacity_drop() {
        let service = BatteryAnalysisService::default();
        let anomalies = service.detect_anomalies(&batch());

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].field, "capacity");
        assert_eq!(anomalies[0].test_id, "T-3");
        assert_eq!(anomalies[0].value, 0.5);
        assert!(anomalies.iter().all(|a| a.field != "internal_resistance"));
    }

    #[test]
    fn test_detection_is_idempotent() {
        let service = BatteryAnalysisService::default();
        let results = batch();

        assert_eq!(
            service.detect_anomalies(&results),
            service.detect_anomalies(&results)
        );
    }

    #[test]
    fn test_two_results_are_not_a_sample() {
        let service = BatteryAnalysisService::default();
        let results = vec![result("T-1", 1, 10, 2.0), result("T-2", 2, 20, 0.1)];

        assert!(service.detect_anomalies(&results).is_empty());
    }
}

// Validação por regras de negócio
mod validation_tests {
    use super::*;
    use bateria::types::TestResultUpdate;

    #[test]
    fn test_validation_accumulates_every_failure() {
        let service = BatteryAnalysisService::default();
        let mut test = result("T-1", 1, 10, 1.9);
        test.update(TestResultUpdate {
            temperature: Some(50.0),
            voltage: Some(5.0),
            current: Some(-2.0),
            capacity: Some(3.0),
            ..Default::default()
        })
        .unwrap();

        let report = service.validate_test_result(&test, &profile(), &battery());

        assert!(!report.is_valid);
        assert_eq!(
            report.failed_checks,
            vec!["temperature_range", "voltage_range", "current_limit", "capacity_range"]
        );
        assert_eq!(report.details.len(), 4);
        assert!(report.details[0].contains("50"));
    }

    #[test]
    fn test_valid_result_passes() {
        let service = BatteryAnalysisService::default();
        let report = service.validate_test_result(&result("T-1", 1, 10, 1.9), &profile(), &battery());

        assert!(report.is_valid);
        assert!(report.failed_checks.is_empty());
    }

    #[test]
    fn test_edited_profile_reports_violations() {
        let service = BatteryAnalysisService::default();
        let mut edited = profile();
        edited.sampling_interval = 0.0;
        edited.min_temperature = 40.0;

        let report = service.validate_test_profile(&edited);

        assert!(!report.is_valid);
        assert!(report.failed_checks.contains(&"sampling_interval".to_string()));
        assert!(report.failed_checks.contains(&"min_temperature".to_string()));
    }
}

// Agregações
mod aggregation_tests {
    use super::*;

    #[test]
    fn test_summary_and_statistics() {
        let service = BatteryAnalysisService::default();
        let results = vec![
            result("T-1", 1, 10, 2.0).with_passed(true),
            result("T-2", 5, 20, 1.8).with_passed(true),
            result("T-3", 3, 30, 1.6),
        ];

        let summary = service.test_summary(&results);
        assert_eq!(summary.total_tests, 3);
        assert_eq!(summary.passed_tests, 2);
        assert_eq!(summary.pass_rate, 66.67);
        assert_eq!(summary.first_test_date, Some(date(1)));
        assert_eq!(summary.last_test_date, Some(date(5)));

        let stats = service.test_statistics(&results);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.capacity.min, 1.6);
        assert_eq!(stats.capacity.max, 2.0);
    }

    #[test]
    fn test_empty_aggregations_are_zeroed() {
        let service = BatteryAnalysisService::default();

        assert_eq!(service.test_summary(&[]).total_tests, 0);
        assert_eq!(service.test_statistics(&[]).count, 0);
    }

    #[test]
    fn test_grouping_by_operator_and_unknown_criteria() {
        let service = BatteryAnalysisService::default();
        let results = vec![
            result("T-1", 1, 10, 2.0).with_operator("ana"),
            result("T-2", 2, 20, 1.9).with_operator("ana"),
            result("T-3", 3, 30, 1.8).with_operator("rui"),
        ];

        let by_operator =
            service.group_test_results(&results, &"operator".parse::<GroupingCriteria>().unwrap());
        assert_eq!(by_operator["ana"].len(), 2);
        assert_eq!(by_operator["rui"].len(), 1);

        let fallback =
            service.group_test_results(&results, &"batch".parse::<GroupingCriteria>().unwrap());
        assert_eq!(fallback.len(), 3);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let service = BatteryAnalysisService::default();
        let a = service.generate_test_id(&battery());
        let b = service.generate_test_id(&battery());

        assert!(a.starts_with("BAT-SN-100-"));
        assert_ne!(a, b);
    }
}
