//! Process configuration, from flags or the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// In-memory product API.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Address to bind.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from(["stockroom", "--port", "8080", "--host", "127.0.0.1"]).unwrap();
        assert_eq!(cfg.addr(), "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Config::try_parse_from(["stockroom", "--port", "http"]).is_err());
    }
}
