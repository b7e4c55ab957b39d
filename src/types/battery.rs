//! Bateria física e seus dados nominais.

use serde::{Deserialize, Serialize};

use crate::{BateriaError, BateriaResult};

/// Uma bateria sob teste.
///
/// Os campos são públicos, mas a bateria é tratada como imutável por
/// convenção: apenas os campos derivados (`health_status`,
/// `state_of_health`, `state_of_charge`) são reescritos pelo motor de
/// análise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    /// Número de série (identidade).
    pub serial_number: String,

    /// Modelo.
    #[serde(default)]
    pub model: String,

    /// Fabricante.
    #[serde(default)]
    pub manufacturer: String,

    /// Química (ex.: "Li-ion", "LiFePO4").
    #[serde(default)]
    pub chemistry: String,

    /// Capacidade nominal em Ah.
    pub nominal_capacity: f64,

    /// Tensão nominal em V.
    pub nominal_voltage: f64,

    /// Tensão máxima em V.
    pub max_voltage: f64,

    /// Tensão mínima em V.
    pub min_voltage: f64,

    /// Peso em kg.
    #[serde(default)]
    pub weight: f64,

    /// Classificação de saúde, preenchida pelo motor de análise.
    #[serde(default)]
    pub health_status: HealthStatus,

    /// Estado de saúde (%), se já medido.
    #[serde(default)]
    pub state_of_health: Option<f64>,

    /// Estado de carga (%), se já medido.
    #[serde(default)]
    pub state_of_charge: Option<f64>,
}

impl Battery {
    /// Cria uma nova bateria validando os dados nominais.
    pub fn new(
        serial_number: impl Into<String>,
        nominal_capacity: f64,
        nominal_voltage: f64,
        min_voltage: f64,
        max_voltage: f64,
        weight: f64,
    ) -> BateriaResult<Self> {
        let battery = Self {
            serial_number: serial_number.into(),
            model: String::new(),
            manufacturer: String::new(),
            chemistry: String::new(),
            nominal_capacity,
            nominal_voltage,
            max_voltage,
            min_voltage,
            weight,
            health_status: HealthStatus::Unknown,
            state_of_health: None,
            state_of_charge: None,
        };
        battery.validate()?;
        Ok(battery)
    }

    /// Define o modelo.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Define o fabricante.
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    /// Define a química.
    pub fn with_chemistry(mut self, chemistry: impl Into<String>) -> Self {
        self.chemistry = chemistry.into();
        self
    }

    /// Define o estado de saúde conhecido.
    pub fn with_state_of_health(mut self, soh: f64) -> Self {
        self.state_of_health = Some(soh);
        self
    }

    /// Define o estado de carga conhecido.
    pub fn with_state_of_charge(mut self, soc: f64) -> Self {
        self.state_of_charge = Some(soc);
        self
    }

    /// Verifica as invariantes de construção.
    pub fn validate(&self) -> BateriaResult<()> {
        if self.serial_number.trim().is_empty() {
            return Err(BateriaError::validation("serial_number", "não pode ser vazio"));
        }
        if !(self.nominal_capacity > 0.0) {
            return Err(BateriaError::validation(
                "nominal_capacity",
                format!("deve ser > 0 (recebido {})", self.nominal_capacity),
            ));
        }
        if !(self.nominal_voltage > 0.0) {
            return Err(BateriaError::validation(
                "nominal_voltage",
                format!("deve ser > 0 (recebido {})", self.nominal_voltage),
            ));
        }
        if !(self.max_voltage > self.min_voltage) {
            return Err(BateriaError::validation(
                "max_voltage",
                format!(
                    "deve ser maior que min_voltage ({} <= {})",
                    self.max_voltage, self.min_voltage
                ),
            ));
        }
        if !(self.weight >= 0.0) {
            return Err(BateriaError::validation(
                "weight",
                format!("não pode ser negativo (recebido {})", self.weight),
            ));
        }
        Ok(())
    }
}

/// Classificação de saúde derivada do SOH.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// SOH >= 90%.
    Excellent,
    /// SOH >= 80%.
    Good,
    /// SOH >= 60%.
    Fair,
    /// SOH < 60%.
    Poor,
    /// Sem SOH registrado.
    #[default]
    Unknown,
}

impl HealthStatus {
    /// Classifica um estado de saúde.
    pub fn from_soh(soh: Option<f64>) -> Self {
        match soh {
            Some(v) if v >= 90.0 => HealthStatus::Excellent,
            Some(v) if v >= 80.0 => HealthStatus::Good,
            Some(v) if v >= 60.0 => HealthStatus::Fair,
            Some(v) if v.is_finite() => HealthStatus::Poor,
            _ => HealthStatus::Unknown,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Excellent => write!(f, "excellent"),
            HealthStatus::Good => write!(f, "good"),
            HealthStatus::Fair => write!(f, "fair"),
            HealthStatus::Poor => write!(f, "poor"),
            HealthStatus::Unknown => write!(f, "unknown"),
        }
    }
}
