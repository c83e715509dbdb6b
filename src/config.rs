// 🔧 Server configuration from the environment
//
//   RECEIPT_PROCESSOR_HOST   listen address        (default 0.0.0.0)
//   PORT                     listen port           (default 8080)
//   RECEIPT_PROCESSOR_CORS   "permissive" | "off"  (default permissive)

use anyhow::{bail, Context, Result};
use std::env;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsMode {
    Permissive,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors: CorsMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            cors: CorsMode::Permissive,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key → value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host_raw = lookup("RECEIPT_PROCESSOR_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host_raw
            .trim()
            .parse()
            .with_context(|| format!("RECEIPT_PROCESSOR_HOST is not an IP address: {:?}", host_raw))?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let cors = match lookup("RECEIPT_PROCESSOR_CORS").as_deref().map(str::trim) {
            None | Some("") | Some("permissive") => CorsMode::Permissive,
            Some("off") => CorsMode::Off,
            Some(other) => bail!("RECEIPT_PROCESSOR_CORS must be 'permissive' or 'off', got {:?}", other),
        };

        Ok(ServerConfig { host, port, cors })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
