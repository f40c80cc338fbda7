//! Startup configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Service configuration. Every flag can also be set from the environment.
#[derive(Clone, Debug, Parser)]
#[command(name = "calcd", version, about = "JSON calculator service")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory served for unmatched GET requests.
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            public_dir: PathBuf::from("public"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_3000() {
        assert_eq!(Config::default().addr(), "0.0.0.0:3000".parse().unwrap());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "calcd", "--host", "127.0.0.1", "--port", "8080", "--public-dir", "/srv/www",
        ])
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.public_dir, PathBuf::from("/srv/www"));
    }
}
