//! Conjunto de dados carregado de um arquivo JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::service::BatteryAnalysisService;
use crate::types::{Battery, TestProfile, TestResult};
use crate::{BateriaError, BateriaResult};

/// Baterias, testes e perfis de um arquivo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub batteries: Vec<Battery>,

    #[serde(default)]
    pub test_results: Vec<TestResult>,

    #[serde(default)]
    pub profiles: Vec<TestProfile>,
}

impl Dataset {
    /// Carrega e valida todas as entidades do arquivo.
    pub fn load<P: AsRef<Path>>(path: P) -> BateriaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let dataset: Dataset = serde_json::from_str(&content)?;

        for battery in &dataset.batteries {
            battery.validate()?;
        }
        for result in &dataset.test_results {
            result.validate()?;
        }
        for profile in &dataset.profiles {
            profile.validate()?;
        }

        tracing::debug!(
            batteries = dataset.batteries.len(),
            test_results = dataset.test_results.len(),
            profiles = dataset.profiles.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Busca uma bateria pelo número de série.
    pub fn battery(&self, serial: &str) -> BateriaResult<&Battery> {
        self.batteries
            .iter()
            .find(|b| b.serial_number == serial)
            .ok_or_else(|| BateriaError::NotFound(format!("bateria '{}'", serial)))
    }

    /// Testes de uma bateria, ou todos se `serial` for `None`.
    pub fn results_for(&self, serial: Option<&str>) -> Vec<TestResult> {
        self.test_results
            .iter()
            .filter(|r| serial.map_or(true, |s| r.battery_serial_number == s))
            .cloned()
            .collect()
    }

    /// Cópia da bateria com SOH/SOC do teste mais recente, se houver.
    pub fn battery_with_state(
        &self,
        serial: &str,
        service: &BatteryAnalysisService,
    ) -> BateriaResult<Battery> {
        let mut battery = self.battery(serial)?.clone();
        let latest = self
            .test_results
            .iter()
            .filter(|r| r.battery_serial_number == serial)
            .max_by_key(|r| r.test_date);

        if let Some(result) = latest {
            service.update_battery_state(&mut battery, result)?;
        }
        Ok(battery)
    }

    /// Todas as baterias com o estado do teste mais recente.
    pub fn batteries_with_state(
        &self,
        service: &BatteryAnalysisService,
    ) -> BateriaResult<Vec<Battery>> {
        self.batteries
            .iter()
            .map(|b| self.battery_with_state(&b.serial_number, service))
            .collect()
    }
}
