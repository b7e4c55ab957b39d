//! Resultado de uma execução de teste.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BateriaError, BateriaResult};

/// Faixa aceita para a temperatura ambiente (°C).
pub const TEMPERATURE_RANGE: (f64, f64) = (-50.0, 150.0);

/// Faixa aceita para a umidade relativa (%).
pub const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);

/// Resultado de um teste de bateria.
///
/// Construído uma vez por execução; alterações passam por [`TestResult::update`],
/// que revalida o registro inteiro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// ID único do teste.
    pub test_id: String,

    /// Data do teste.
    pub test_date: DateTime<Utc>,

    /// Número de série da bateria testada.
    pub battery_serial_number: String,

    /// Equipamento usado.
    #[serde(default)]
    pub test_equipment: String,

    /// Operador responsável.
    #[serde(default)]
    pub test_operator: String,

    /// Temperatura ambiente (°C).
    pub temperature: f64,

    /// Umidade relativa (%).
    pub humidity: f64,

    /// Tensão medida (V).
    pub voltage: f64,

    /// Corrente medida (A).
    pub current: f64,

    /// Capacidade medida (Ah).
    pub capacity: f64,

    /// Resistência interna (mΩ).
    pub internal_resistance: f64,

    /// Número de ciclos acumulados.
    pub cycle_count: u32,

    /// Temperatura máxima observada (°C).
    pub max_temperature: f64,

    /// Temperatura mínima observada (°C).
    pub min_temperature: f64,

    /// Série bruta opcional.
    #[serde(default)]
    pub raw_data: Option<Vec<f64>>,

    /// Se o teste passou.
    #[serde(default)]
    pub is_passed: bool,

    /// Situação do teste.
    #[serde(default)]
    pub test_status: TestStatus,
}

/// Grandezas medidas num teste.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub temperature: f64,
    pub humidity: f64,
    pub voltage: f64,
    pub current: f64,
    pub capacity: f64,
    pub internal_resistance: f64,
    pub cycle_count: u32,
    pub max_temperature: f64,
    pub min_temperature: f64,
}

/// Campos substituíveis via [`TestResult::update`]. `None` mantém o valor atual.
#[derive(Debug, Clone, Default)]
pub struct TestResultUpdate {
    pub test_equipment: Option<String>,
    pub test_operator: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub capacity: Option<f64>,
    pub internal_resistance: Option<f64>,
    pub cycle_count: Option<u32>,
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub raw_data: Option<Vec<f64>>,
    pub is_passed: Option<bool>,
    pub test_status: Option<TestStatus>,
}

impl TestResult {
    /// Cria um novo resultado validando as medições.
    pub fn new(
        test_id: impl Into<String>,
        battery_serial_number: impl Into<String>,
        test_date: DateTime<Utc>,
        measurements: Measurements,
    ) -> BateriaResult<Self> {
        let result = Self {
            test_id: test_id.into(),
            test_date,
            battery_serial_number: battery_serial_number.into(),
            test_equipment: String::new(),
            test_operator: String::new(),
            temperature: measurements.temperature,
            humidity: measurements.humidity,
            voltage: measurements.voltage,
            current: measurements.current,
            capacity: measurements.capacity,
            internal_resistance: measurements.internal_resistance,
            cycle_count: measurements.cycle_count,
            max_temperature: measurements.max_temperature,
            min_temperature: measurements.min_temperature,
            raw_data: None,
            is_passed: false,
            test_status: TestStatus::Pending,
        };
        result.validate()?;
        Ok(result)
    }

    /// Define o equipamento.
    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.test_equipment = equipment.into();
        self
    }

    /// Define o operador.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.test_operator = operator.into();
        self
    }

    /// Anexa a série bruta.
    pub fn with_raw_data(mut self, raw_data: Vec<f64>) -> Self {
        self.raw_data = Some(raw_data);
        self
    }

    /// Define a situação.
    pub fn with_status(mut self, status: TestStatus) -> Self {
        self.test_status = status;
        self
    }

    /// Define se passou.
    pub fn with_passed(mut self, passed: bool) -> Self {
        self.is_passed = passed;
        self
    }

    /// Verifica as invariantes de construção.
    pub fn validate(&self) -> BateriaResult<()> {
        if self.test_id.trim().is_empty() {
            return Err(BateriaError::validation("test_id", "não pode ser vazio"));
        }
        let (t_min, t_max) = TEMPERATURE_RANGE;
        if !(t_min..=t_max).contains(&self.temperature) {
            return Err(BateriaError::validation(
                "temperature",
                format!("{} fora de [{}, {}]", self.temperature, t_min, t_max),
            ));
        }
        let (h_min, h_max) = HUMIDITY_RANGE;
        if !(h_min..=h_max).contains(&self.humidity) {
            return Err(BateriaError::validation(
                "humidity",
                format!("{} fora de [{}, {}]", self.humidity, h_min, h_max),
            ));
        }
        if !(self.capacity > 0.0) {
            return Err(BateriaError::validation(
                "capacity",
                format!("deve ser > 0 (recebido {})", self.capacity),
            ));
        }
        if !(self.internal_resistance >= 0.0) {
            return Err(BateriaError::validation(
                "internal_resistance",
                format!("não pode ser negativa (recebido {})", self.internal_resistance),
            ));
        }
        Ok(())
    }

    /// Substitui os campos informados e revalida.
    ///
    /// Se a validação falhar, o resultado original permanece intacto.
    pub fn update(&mut self, update: TestResultUpdate) -> BateriaResult<()> {
        let mut next = self.clone();

        if let Some(v) = update.test_equipment {
            next.test_equipment = v;
        }
        if let Some(v) = update.test_operator {
            next.test_operator = v;
        }
        if let Some(v) = update.temperature {
            next.temperature = v;
        }
        if let Some(v) = update.humidity {
            next.humidity = v;
        }
        if let Some(v) = update.voltage {
            next.voltage = v;
        }
        if let Some(v) = update.current {
            next.current = v;
        }
        if let Some(v) = update.capacity {
            next.capacity = v;
        }
        if let Some(v) = update.internal_resistance {
            next.internal_resistance = v;
        }
        if let Some(v) = update.cycle_count {
            next.cycle_count = v;
        }
        if let Some(v) = update.max_temperature {
            next.max_temperature = v;
        }
        if let Some(v) = update.min_temperature {
            next.min_temperature = v;
        }
        if update.raw_data.is_some() {
            next.raw_data = update.raw_data;
        }
        if let Some(v) = update.is_passed {
            next.is_passed = v;
        }
        if let Some(v) = update.test_status {
            next.test_status = v;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Situação de um teste.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Aborted,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestStatus::Pending => write!(f, "pending"),
            TestStatus::Running => write!(f, "running"),
            TestStatus::Completed => write!(f, "completed"),
            TestStatus::Failed => write!(f, "failed"),
            TestStatus::Aborted => write!(f, "aborted"),
        }
    }
}

impl std::str::FromStr for TestStatus {
    type Err = BateriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TestStatus::Pending),
            "running" => Ok(TestStatus::Running),
            "completed" => Ok(TestStatus::Completed),
            "failed" => Ok(TestStatus::Failed),
            "aborted" => Ok(TestStatus::Aborted),
            other => Err(BateriaError::validation(
                "test_status",
                format!("valor desconhecido '{}'", other),
            )),
        }
    }
}
