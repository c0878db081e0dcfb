use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use error_stack::{Report, ResultExt};
use kernel::KernelError;

static SERVER_ADDRESS: &str = "SERVER_ADDRESS";
static STORE_BACKEND: &str = "STORE_BACKEND";
static LOG_DIR: &str = "LOG_DIR";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" => Ok(Self::Memory),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown {STORE_BACKEND}: {other:?}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub backend: StoreBackend,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the process environment, with `.env` as a fallback source.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let address = var(SERVER_ADDRESS, "127.0.0.1:5000")?;
        let address = address
            .parse::<SocketAddr>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("Invalid {SERVER_ADDRESS}: {address:?}"))?;
        let backend = var(STORE_BACKEND, "mongodb")?.parse()?;
        let log_dir = PathBuf::from(var(LOG_DIR, "./logs/")?);
        Ok(Self {
            address,
            backend,
            log_dir,
        })
    }
}

fn var(key: &str, default: &str) -> error_stack::Result<String, KernelError> {
    driver::env_or(key, default)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to read {key}"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let value = var("BOOK_SERVER_CONFIG_TEST_UNSET", "127.0.0.1:5000").unwrap();
        assert_eq!(value, "127.0.0.1:5000");
    }

    #[test]
    fn backend_names() {
        assert_eq!("mongodb".parse::<StoreBackend>().unwrap(), StoreBackend::MongoDb);
        assert_eq!("Mongo".parse::<StoreBackend>().unwrap(), StoreBackend::MongoDb);
        assert_eq!(" memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
