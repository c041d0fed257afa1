use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Build-time variable that selects the deployment environment.
pub const ENVIRONMENT_VAR: &str = "COUNTER_ENV";

const COUNTER_PATH: &str = "counter";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("unknown environment {0:?} (expected blue or green)")]
    UnknownEnvironment(String),
    #[error("invalid api url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Blue/green deployment slot whose API the widget talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Blue,
    Green,
}

impl Environment {
    /// Interpret a selector value; unset or blank selects the default slot.
    pub fn from_selector(selector: Option<&str>) -> Result<Self, EndpointError> {
        match selector.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }

    /// Selector baked in when the crate was compiled.
    pub fn from_build_env() -> Result<Self, EndpointError> {
        Self::from_selector(option_env!("COUNTER_ENV"))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Blue => "blue",
            Environment::Green => "green",
        }
    }
}

impl FromStr for Environment {
    type Err = EndpointError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("blue") {
            Ok(Environment::Blue)
        } else if value.eq_ignore_ascii_case("green") {
            Ok(Environment::Green)
        } else {
            Err(EndpointError::UnknownEnvironment(value.to_string()))
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-environment API base URLs as published in the site parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteParams {
    pub api_url_blue: String,
    pub api_url_green: String,
}

impl SiteParams {
    pub fn api_url(&self, environment: Environment) -> &str {
        match environment {
            Environment::Blue => &self.api_url_blue,
            Environment::Green => &self.api_url_green,
        }
    }
}

/// Resolved endpoint for one page lifetime. Cheap to clone, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    environment: Environment,
    base_url: Url,
}

impl EndpointConfig {
    pub fn new(environment: Environment, base_url: &str) -> Result<Self, EndpointError> {
        let base_url = Url::parse(base_url.trim()).map_err(|err| EndpointError::InvalidUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EndpointError::InvalidUrl {
                url: base_url.to_string(),
                message: "url cannot be a base".into(),
            });
        }
        Ok(Self {
            environment,
            base_url,
        })
    }

    pub fn resolve(params: &SiteParams, environment: Environment) -> Result<Self, EndpointError> {
        Self::new(environment, params.api_url(environment))
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base_url>/counter`, keeping any path prefix on the base URL.
    pub fn counter_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}/{COUNTER_PATH}"));
        url
    }
}

