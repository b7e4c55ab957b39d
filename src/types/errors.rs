//! Tipos de erro do Bateria.

use thiserror::Error;

/// Tipo de resultado padrão do Bateria.
pub type BateriaResult<T> = Result<T, BateriaError>;

/// Erros possíveis no Bateria.
#[derive(Error, Debug)]
pub enum BateriaError {
    #[error("Campo inválido '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Erro de cálculo: {0}")]
    Domain(String),

    #[error("Não encontrado: {0}")]
    NotFound(String),

    #[error("Operação de cache desconhecida: '{0}'")]
    UnknownOperation(String),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl BateriaError {
    /// Cria um erro de construção apontando o campo inválido.
    pub fn validation<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Cria um erro de cálculo.
    pub fn domain<S: Into<String>>(msg: S) -> Self {
        Self::Domain(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Retorna o campo ofendido, se for um erro de construção.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
