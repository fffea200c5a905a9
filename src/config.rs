use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Dashboard user created at startup if no user with that email exists.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub admin: Option<AdminSeed>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "port number",
                value: raw,
            })?,
            None => 8080,
        };

        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed {
                name: lookup("ADMIN_NAME").unwrap_or_else(|| "Admin".to_string()),
                email,
                password,
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("ADMIN_EMAIL")),
        };

        Ok(Self {
            database_url,
            host,
            port,
            admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let s = settings(&[("DATABASE_URL", "postgres://localhost/dashboard")]).unwrap();

        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 8080);
        assert!(s.admin.is_none());
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(
            settings(&[]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn port_must_be_numeric() {
        let err = settings(&[("DATABASE_URL", "x"), ("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "PORT must be a valid port number, got 'eighty'");
    }

    #[test]
    fn admin_seed_needs_email_and_password() {
        let s = settings(&[
            ("DATABASE_URL", "x"),
            ("ADMIN_EMAIL", "user@nextmail.com"),
            ("ADMIN_PASSWORD", "123456"),
        ])
        .unwrap();
        let admin = s.admin.expect("admin seed");
        assert_eq!(admin.name, "Admin");
        assert_eq!(admin.email, "user@nextmail.com");

        assert!(matches!(
            settings(&[("DATABASE_URL", "x"), ("ADMIN_EMAIL", "user@nextmail.com")]),
            Err(ConfigError::Missing("ADMIN_PASSWORD"))
        ));
    }
}
