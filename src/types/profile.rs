//! Perfil de teste: parâmetros e critérios de aprovação.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BateriaError, BateriaResult};

/// Perfil de teste reutilizável.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestProfile {
    /// ID do perfil.
    pub profile_id: String,

    /// Nome legível.
    pub name: String,

    pub test_voltage: f64,
    pub test_current: f64,
    pub max_cycles: u32,
    pub test_temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub charge_voltage: f64,
    pub charge_current: f64,
    pub discharge_voltage: f64,
    pub discharge_current: f64,
    pub cut_off_voltage: f64,
    pub cut_off_current: f64,

    /// Intervalo de amostragem em segundos.
    pub sampling_interval: f64,

    /// Descrição opcional.
    #[serde(default)]
    pub description: Option<String>,

    /// Limiares de aprovação por métrica.
    #[serde(default)]
    pub pass_thresholds: BTreeMap<String, f64>,

    /// Limiares de reprovação por métrica.
    #[serde(default)]
    pub fail_thresholds: BTreeMap<String, f64>,

    /// Condições de parada, em ordem.
    #[serde(default)]
    pub rules: Vec<String>,

    /// Versão do perfil.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Parâmetros numéricos de um perfil.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileParameters {
    pub test_voltage: f64,
    pub test_current: f64,
    pub max_cycles: u32,
    pub test_temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub charge_voltage: f64,
    pub charge_current: f64,
    pub discharge_voltage: f64,
    pub discharge_current: f64,
    pub cut_off_voltage: f64,
    pub cut_off_current: f64,
    pub sampling_interval: f64,
}

/// Uma violação estrutural de perfil: (campo, motivo).
pub(crate) type ProfileViolation = (&'static str, String);

impl TestProfile {
    /// Cria um novo perfil validando os parâmetros.
    pub fn new(
        profile_id: impl Into<String>,
        name: impl Into<String>,
        params: ProfileParameters,
    ) -> BateriaResult<Self> {
        let profile = Self {
            profile_id: profile_id.into(),
            name: name.into(),
            test_voltage: params.test_voltage,
            test_current: params.test_current,
            max_cycles: params.max_cycles,
            test_temperature: params.test_temperature,
            min_temperature: params.min_temperature,
            max_temperature: params.max_temperature,
            charge_voltage: params.charge_voltage,
            charge_current: params.charge_current,
            discharge_voltage: params.discharge_voltage,
            discharge_current: params.discharge_current,
            cut_off_voltage: params.cut_off_voltage,
            cut_off_current: params.cut_off_current,
            sampling_interval: params.sampling_interval,
            description: None,
            pass_thresholds: BTreeMap::new(),
            fail_thresholds: BTreeMap::new(),
            rules: Vec::new(),
            version: default_version(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Define a descrição.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adiciona um limiar de aprovação.
    pub fn with_pass_threshold(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.pass_thresholds.insert(metric.into(), value);
        self
    }

    /// Adiciona um limiar de reprovação.
    pub fn with_fail_threshold(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.fail_thresholds.insert(metric.into(), value);
        self
    }

    /// Adiciona uma condição de parada.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Define a versão.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Verifica as invariantes, falhando na primeira violação.
    pub fn validate(&self) -> BateriaResult<()> {
        match self.violations().into_iter().next() {
            Some((field, reason)) => Err(BateriaError::validation(field, reason)),
            None => Ok(()),
        }
    }

    /// Lista todas as violações estruturais, na ordem dos campos.
    pub(crate) fn violations(&self) -> Vec<ProfileViolation> {
        let positive = [
            ("test_voltage", self.test_voltage),
            ("test_current", self.test_current),
            ("max_cycles", self.max_cycles as f64),
            ("charge_voltage", self.charge_voltage),
            ("discharge_voltage", self.discharge_voltage),
            ("cut_off_voltage", self.cut_off_voltage),
            ("sampling_interval", self.sampling_interval),
        ];

        let mut violations: Vec<ProfileViolation> = positive
            .iter()
            .filter(|(_, value)| !(*value > 0.0))
            .map(|(field, value)| (*field, format!("deve ser > 0 (recebido {})", value)))
            .collect();

        if !(self.min_temperature <= self.max_temperature) {
            violations.push((
                "min_temperature",
                format!(
                    "deve ser <= max_temperature ({} > {})",
                    self.min_temperature, self.max_temperature
                ),
            ));
        }

        violations
    }
}
