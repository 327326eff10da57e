use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16,
    // Signs and encrypts the session cookie, must be at least 64 bytes
    pub session_key: SecretString,
    // Marks the session cookie `Secure`, needs https in front of the server
    pub secure_cookies: bool
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings{
    pub username: String,
    pub password: SecretString,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub require_ssl: bool
}

impl DatabaseSettings {
    // url of the server itself, used to create databases
    pub fn get_database_url(&self) -> String{
        format!(
            "postgres://{}:{}@{}:{}{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.ssl_suffix()
        )
    }

    // url of the application database
    pub fn get_database_table_url(&self) -> String{
        format!(
            "postgres://{}:{}@{}:{}/{}{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.name,
            self.ssl_suffix()
        )
    }

    fn ssl_suffix(&self) -> &'static str{
        if self.require_ssl {
            "?sslmode=require"
        } else {
            ""
        }
    }
}

pub enum AppEnvironment{
    Local,
    Production
}

impl AppEnvironment {
    pub fn as_str(&self) -> &'static str{
        match self {
            AppEnvironment::Local => "local",
            AppEnvironment::Production => "production"
        }
    }
}

impl TryFrom<String> for AppEnvironment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`",
                other
            ))
        }
    }
}

impl Settings{
    pub fn get() -> Result<Self, ConfigError>{
        let environment: AppEnvironment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(File::with_name(&format!("configuration/{}.yaml", environment.as_str())))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
