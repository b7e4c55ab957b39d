//! Interface de linha de comando do Bateria.

pub mod commands;
mod dataset;

pub use dataset::Dataset;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bateria - Análise de testes de bateria com cache de resultados.
#[derive(Parser, Debug)]
#[command(name = "bateria")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "bateria.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Classifica a saúde de uma bateria.
    Health {
        /// Arquivo JSON com baterias, testes e perfis.
        #[arg(short, long)]
        data: PathBuf,

        /// Número de série.
        serial: String,
    },

    /// Analisa o desempenho nominal de uma bateria.
    Performance {
        /// Arquivo JSON com baterias, testes e perfis.
        #[arg(short, long)]
        data: PathBuf,

        /// Número de série.
        serial: String,
    },

    /// Prevê a vida útil restante de uma bateria.
    Lifetime {
        /// Arquivo JSON com baterias, testes e perfis.
        #[arg(short, long)]
        data: PathBuf,

        /// Número de série.
        serial: String,
    },

    /// Verifica os dados cadastrais de uma bateria.
    Validate {
        /// Arquivo JSON com baterias, testes e perfis.
        #[arg(short, long)]
        data: PathBuf,

        /// Número de série.
        serial: String,
    },

    /// Projeta a vida útil pelo histórico de ciclos.
    CycleLife {
        /// Arquivo JSON com baterias, testes e perfis.
        #[arg(short, long)]
        data: PathBuf,

        /// Número de série.
        serial: String,
    },

    /// Compara todas as baterias do arquivo.
    Compare {
        /// Arquivo JSON com baterias, testes e perfis.
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Lista medições anômalas.
    Anomalies {
        /// Arquivo JSON com baterias, testes e perfis.
        #[arg(short, long)]
        data: PathBuf,

        /// Restringe a uma bateria.
        #[arg(short, long)]
        serial: Option<String>,
    },

    /// Resume os testes.
    Summary {
        /// Arquivo JSON com baterias, testes e perfis.
        #[arg(short, long)]
        data: PathBuf,

        /// Restringe a uma bateria.
        #[arg(short, long)]
        serial: Option<String>,
    },

    /// Roda todas as análises de bateria e mostra as estatísticas do cache.
    Stats {
        /// Arquivo JSON com baterias, testes e perfis.
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Mostra versão.
    Version,
}
