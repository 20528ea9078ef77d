//! Command line for the trivia client.
//!
//! - `-i <ip>`   (default: "127.0.0.1")
//! - `-p <port>` (default: 25555)
//! - `--debug`   verbose logging to stderr

use std::net::{IpAddr, SocketAddr};
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

pub const DEFAULT_PORT: u16 = 25555;

#[derive(Parser, Debug, Clone)]
#[clap(name = "trivia-client")]
#[clap(about = "Join a trivia game")]
pub struct Cli {
    /// Server IP address
    #[clap(short, long, default_value = "127.0.0.1")]
    pub ip: IpAddr,

    /// Server port
    #[clap(short, long, default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Enable debug logging
    #[clap(long)]
    pub debug: bool,
}

impl Cli {
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["trivia-client"]).unwrap();
        assert_eq!(cli.server_addr().to_string(), "127.0.0.1:25555");
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn flags() {
        let cli =
            Cli::try_parse_from(["trivia-client", "-i", "10.0.0.7", "-p", "4000", "--debug"])
                .unwrap();
        assert_eq!(cli.server_addr().to_string(), "10.0.0.7:4000");
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn bad_input_is_an_error() {
        assert!(Cli::try_parse_from(["trivia-client", "-p", "70000"]).is_err());
        assert!(Cli::try_parse_from(["trivia-client", "-i", "nowhere"]).is_err());
        assert!(Cli::try_parse_from(["trivia-client", "-q"]).is_err());
        assert!(Cli::try_parse_from(["trivia-client", "-i"]).is_err());
    }
}
