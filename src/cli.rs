//! Interface de linha de comando baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (serve, classify)
//! e flags globais (--config, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Proxy de análise de sentimento de avaliações de filmes via Gemini.
#[derive(Debug, Parser)]
#[command(name = "review-sentiment", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Caminho para um arquivo de configuração TOML.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Inicia o servidor HTTP (padrão quando nenhum subcomando é informado).
    Serve {
        /// Endereço de escuta; sobrescreve `bind_addr` da configuração.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Classifica uma única avaliação e imprime o sentimento.
    Classify {
        /// Texto da avaliação.
        text: String,
    },
}

impl Cli {
    /// Subcomando efetivo; `serve` quando omitido.
    pub fn subcommand(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Serve { bind: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_defaults_to_serve() {
        let cli = Cli::parse_from(["review-sentiment"]);
        assert!(matches!(cli.subcommand(), Command::Serve { bind: None }));
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_parses_serve_with_bind() {
        let cli = Cli::parse_from(["review-sentiment", "serve", "--bind", "127.0.0.1:8080"]);
        match cli.subcommand() {
            Command::Serve { bind } => assert_eq!(bind.as_deref(), Some("127.0.0.1:8080")),
            other => panic!("expected Serve command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_classify_subcommand() {
        let cli = Cli::parse_from(["review-sentiment", "classify", "What a film"]);
        match cli.subcommand() {
            Command::Classify { text } => assert_eq!(text, "What a film"),
            other => panic!("expected Classify command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "review-sentiment",
            "--config",
            "custom.toml",
            "--verbose",
            "serve",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
