//! Command-line argument parsing.

use bologna_precip_core::CacheBackend;
use bologna_precip_core::week::parse_date;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Bologna precipitation data through the shared cache
#[derive(Parser, Debug)]
#[command(name = "bologna-precip")]
#[command(about = "Query the Bologna open-data precipitation API through the cache")]
#[command(version)]
pub struct Cli {
    /// Override the configured cache backend
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the dataset descriptor
    Dataset,

    /// Print the precipitation records of the week containing DATE
    Week {
        /// Any day of the week, YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Print the Monday-to-Sunday window and cache key for DATE without any I/O
    Range {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Redis,
    Sqlite,
    Memory,
}

impl From<BackendArg> for CacheBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Redis => CacheBackend::Redis,
            BackendArg::Sqlite => CacheBackend::Sqlite,
            BackendArg::Memory => CacheBackend::Memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_dataset() {
        let cli = Cli::try_parse_from(["bologna-precip", "dataset"]).unwrap();
        assert_eq!(cli.command, Command::Dataset);
        assert!(cli.backend.is_none());
        assert!(!cli.pretty);
    }

    #[test]
    fn test_parse_week_with_flags() {
        let cli =
            Cli::try_parse_from(["bologna-precip", "week", "2023-03-15", "--backend", "sqlite", "--pretty"]).unwrap();
        assert_eq!(cli.command, Command::Week { date: date("2023-03-15") });
        assert_eq!(cli.backend, Some(BackendArg::Sqlite));
        assert!(cli.pretty);
    }

    #[test]
    fn test_parse_range_accepts_datetime() {
        let cli = Cli::try_parse_from(["bologna-precip", "range", "2023-03-15T10:00:00"]).unwrap();
        assert_eq!(cli.command, Command::Range { date: date("2023-03-15") });
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(Cli::try_parse_from(["bologna-precip", "week", "15/03/2023"]).is_err());
    }

    #[test]
    fn test_backend_conversion() {
        assert_eq!(CacheBackend::from(BackendArg::Memory), CacheBackend::Memory);
        assert_eq!(CacheBackend::from(BackendArg::Redis), CacheBackend::Redis);
    }
}
