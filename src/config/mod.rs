use std::env;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8000;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key))
    }

    fn from_lookup<F>(var: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let database_url = var("DATABASE_URL")?;
        if database_url.trim().is_empty() {
            return Err(env::VarError::NotPresent);
        }

        Ok(Config {
            database_url,
            server_host: var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.into()),
            server_port: var("SERVER_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        })
    }

    /// 监听地址，host 无法解析时退回双栈默认地址
    pub fn bind_addr(&self) -> SocketAddr {
        let ip = self.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid server_host {:?}, falling back to dual-stack default",
                self.server_host
            );
            IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        });
        SocketAddr::new(ip, self.server_port)
    }
}
