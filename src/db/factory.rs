//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "mysql-repo")]
use super::repositories::{MysqlConfig, MysqlRepository};
use super::repository::{RepositoryError, RepositoryResult, StatusRepository};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// MySQL + Diesel implementation
    Mysql,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("mysql", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "my" => Ok(Self::Mysql),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variables.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to MySQL if a database URL is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("MYSQL_DATABASE_URL").is_ok() {
            Self::Mysql
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use storemon_rust::db::{RepositoryFactory, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = RepositoryFactory::create(RepositoryType::Local, None).await?;
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// `mysql_config` is required for the MySQL backend and ignored for
    /// the local one.
    pub async fn create(
        repo_type: RepositoryType,
        mysql_config: Option<&MysqlConfigArg>,
    ) -> RepositoryResult<Arc<dyn StatusRepository>> {
        match repo_type {
            RepositoryType::Mysql => {
                #[cfg(feature = "mysql-repo")]
                {
                    let config = mysql_config.ok_or_else(|| {
                        RepositoryError::configuration("MySQL repository requires MysqlConfig")
                    })?;
                    let mysql = Self::create_mysql(config).await?;
                    Ok(mysql as Arc<dyn StatusRepository>)
                }
                #[cfg(not(feature = "mysql-repo"))]
                {
                    let _ = mysql_config;
                    Err(RepositoryError::configuration(
                        "MySQL repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a MySQL repository.
    #[cfg(feature = "mysql-repo")]
    pub async fn create_mysql(config: &MysqlConfig) -> RepositoryResult<Arc<MysqlRepository>> {
        let repo = MysqlRepository::new(config.clone())?;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn StatusRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` to determine which repository to create.
    /// Defaults to MySQL if a database URL is set, otherwise Local.
    pub async fn from_env() -> RepositoryResult<Arc<dyn StatusRepository>> {
        let repo_type = RepositoryType::from_env();

        match repo_type {
            RepositoryType::Mysql => {
                #[cfg(feature = "mysql-repo")]
                {
                    let config =
                        MysqlConfig::from_env().map_err(RepositoryError::configuration)?;
                    let mysql = Self::create_mysql(&config).await?;
                    Ok(mysql as Arc<dyn StatusRepository>)
                }
                #[cfg(not(feature = "mysql-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "MySQL repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn StatusRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from the default configuration file location.
    ///
    /// Searches for `repository.toml` in standard locations and creates
    /// the appropriate repository instance.
    pub async fn from_default_config() -> RepositoryResult<Arc<dyn StatusRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from a RepositoryConfig instance.
    async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn StatusRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Mysql => {
                #[cfg(feature = "mysql-repo")]
                {
                    let mysql_config = config.to_mysql_config()?.ok_or_else(|| {
                        RepositoryError::configuration(
                            "MySQL repository requires database configuration",
                        )
                    })?;
                    let mysql = Self::create_mysql(&mysql_config).await?;
                    Ok(mysql as Arc<dyn StatusRepository>)
                }
                #[cfg(not(feature = "mysql-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "MySQL repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }
}

/// Alias so `create` can name the config type with the feature off.
#[cfg(feature = "mysql-repo")]
pub type MysqlConfigArg = MysqlConfig;
#[cfg(not(feature = "mysql-repo"))]
pub type MysqlConfigArg = ();
