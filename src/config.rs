/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, APP_ENV, 認証ポリシーなど)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::services::authn::{AuthVariant, PolicyOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error(
        "AUTH_EXTRACT_CLAIMS_FROM_TOKEN trusts unverified tokens; set AUTH_ALLOW_UNVERIFIED_TOKENS=true to run it in production"
    )]
    UnverifiedTokensInProduction,
}

/// Authentication policy as configured at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub variant: AuthVariant,
    pub scheme_name: String,
    pub options: PolicyOptions,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub auth: AuthConfig,
    // Only safe behind the Lambda Web Adapter: clients can send this header too.
    pub gateway_context_header_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source (env in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let variant = match lookup("AUTH_VARIANT")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("token") => AuthVariant::TokenFallback,
            Some("gateway") => AuthVariant::GatewayClaims,
            Some(_) => return Err(ConfigError::Invalid("AUTH_VARIANT")),
        };

        let scheme_name = lookup("AUTH_SCHEME_NAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| variant.default_scheme_name().to_string());

        let defaults = PolicyOptions::default();
        let options = PolicyOptions {
            require_token: flag(&lookup, "AUTH_REQUIRE_TOKEN", defaults.require_token)?,
            extract_claims_from_token: flag(
                &lookup,
                "AUTH_EXTRACT_CLAIMS_FROM_TOKEN",
                defaults.extract_claims_from_token,
            )?,
        };

        let allow_unverified = flag(&lookup, "AUTH_ALLOW_UNVERIFIED_TOKENS", false)?;
        if variant == AuthVariant::TokenFallback
            && options.extract_claims_from_token
            && app_env.is_production()
            && !allow_unverified
        {
            return Err(ConfigError::UnverifiedTokensInProduction);
        }

        let gateway_context_header_enabled =
            flag(&lookup, "GATEWAY_CONTEXT_HEADER_ENABLED", false)?;

        Ok(Self {
            addr,
            app_env,
            auth: AuthConfig {
                variant,
                scheme_name,
                options,
            },
            gateway_context_header_enabled,
        })
    }
}

fn flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key)),
    }
}
