//! Configuration for the trivia server.
//!
//! Flags come from the command line:
//!
//! - `-f <question_file>` (default: "qshort.txt")
//! - `-i <ip>`            (default: "127.0.0.1")
//! - `-p <port>`          (default: 25555)
//!
//! Two knobs that players never need to touch are read from the
//! environment instead:
//!
//! - `TRIVIA_PLAYERS`            (default: "3")
//! - `TRIVIA_BROADCAST_PAUSE_MS` (default: "2")

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::error::ErrorKind;
use clap::Parser;

pub const DEFAULT_PORT: u16 = 25555;
pub const DEFAULT_PLAYERS: usize = 3;
pub const DEFAULT_BROADCAST_PAUSE_MS: u64 = 2;

#[derive(Parser, Debug)]
#[clap(name = "trivia-server")]
#[clap(about = "Host a trivia game for a fixed number of players")]
pub struct Cli {
    /// Question file
    #[clap(short = 'f', long = "file", default_value = "qshort.txt")]
    pub question_file: PathBuf,

    /// IP address to listen on
    #[clap(short, long, default_value = "127.0.0.1")]
    pub ip: IpAddr,

    /// Port to listen on
    #[clap(short, long, default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,
}

/// Parse the process arguments. Help exits 0; any other problem prints
/// to stderr and exits 1.
pub fn parse_cli_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            process::exit(0);
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind to.
    pub ip: IpAddr,

    /// TCP port to listen on.
    pub port: u16,

    /// Question file to load before the accept phase.
    pub question_file: PathBuf,

    /// Exact number of players; the game starts once all are connected.
    pub players: usize,

    /// Pause after each broadcast so consecutive frames are not merged.
    pub broadcast_pause: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            question_file: PathBuf::from("qshort.txt"),
            players: DEFAULT_PLAYERS,
            broadcast_pause: Duration::from_millis(DEFAULT_BROADCAST_PAUSE_MS),
        }
    }
}

impl Config {
    /// Combine parsed flags with the environment knobs.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let players = read_env_or_default("TRIVIA_PLAYERS", DEFAULT_PLAYERS)?;
        if players == 0 {
            bail!("TRIVIA_PLAYERS must be at least 1");
        }
        let pause_ms = read_env_or_default("TRIVIA_BROADCAST_PAUSE_MS", DEFAULT_BROADCAST_PAUSE_MS)?;

        Ok(Config {
            ip: cli.ip,
            port: cli.port,
            question_file: cli.question_file,
            players,
            broadcast_pause: Duration::from_millis(pause_ms),
        })
    }

    /// Convenience: `ip:port` socket address.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid {}: {:?}", key, val)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_usage() {
        let cli = Cli::try_parse_from(["trivia-server"]).unwrap();
        assert_eq!(cli.question_file, PathBuf::from("qshort.txt"));
        assert_eq!(cli.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(cli.port, 25555);
    }

    #[test]
    fn short_flags() {
        let cli =
            Cli::try_parse_from(["trivia-server", "-f", "q.txt", "-i", "0.0.0.0", "-p", "4000"])
                .unwrap();
        assert_eq!(cli.question_file, PathBuf::from("q.txt"));
        assert_eq!(cli.ip, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(cli.port, 4000);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Cli::try_parse_from(["trivia-server", "-p", "0"]).is_err());
        assert!(Cli::try_parse_from(["trivia-server", "-p", "abc"]).is_err());
        assert!(Cli::try_parse_from(["trivia-server", "-i", "localhost:1"]).is_err());
        assert!(Cli::try_parse_from(["trivia-server", "-x"]).is_err());
        assert!(Cli::try_parse_from(["trivia-server", "-f"]).is_err());
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = Cli::try_parse_from(["trivia-server", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    // One test, because the environment is process-wide.
    #[test]
    fn env_knobs() {
        let cli = || Cli::try_parse_from(["trivia-server"]).unwrap();
        env::remove_var("TRIVIA_PLAYERS");
        env::remove_var("TRIVIA_BROADCAST_PAUSE_MS");

        let config = Config::from_cli(cli()).unwrap();
        assert_eq!(config.players, DEFAULT_PLAYERS);
        assert_eq!(config.broadcast_pause, Duration::from_millis(2));

        env::set_var("TRIVIA_PLAYERS", "0");
        let err = Config::from_cli(cli()).unwrap_err();
        assert_eq!(err.to_string(), "TRIVIA_PLAYERS must be at least 1");

        env::set_var("TRIVIA_PLAYERS", "abc");
        let err = Config::from_cli(cli()).unwrap_err();
        assert!(err.to_string().contains("TRIVIA_PLAYERS"));

        env::set_var("TRIVIA_PLAYERS", " 5 ");
        env::set_var("TRIVIA_BROADCAST_PAUSE_MS", "0");
        let config = Config::from_cli(cli()).unwrap();
        assert_eq!(config.players, 5);
        assert!(config.broadcast_pause.is_zero());

        env::set_var("TRIVIA_BROADCAST_PAUSE_MS", "-1");
        let err = Config::from_cli(cli()).unwrap_err();
        assert!(err.to_string().contains("TRIVIA_BROADCAST_PAUSE_MS"));

        env::remove_var("TRIVIA_PLAYERS");
        env::remove_var("TRIVIA_BROADCAST_PAUSE_MS");
    }

    #[test]
    fn socket_addr_joins_ip_and_port() {
        let config = Config {
            port: 4321,
            ..Config::default()
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:4321");
    }
}
