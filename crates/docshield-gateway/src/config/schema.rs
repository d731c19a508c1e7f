use serde::Deserialize;
use url::Url;

use docshield_core::error::{DocShieldError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub csrf: CsrfSection,

    #[serde(default)]
    pub features: FeatureFlags,

    #[serde(default)]
    pub store: StoreSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DocShieldError::UnsupportedVersion);
        }

        self.gateway.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Root URL clients reach the service at. When unset, the request's
    /// `Host` header is used with an `http` scheme.
    #[serde(default)]
    pub public_base_url: Option<String>,

    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            public_base_url: None,
            api_key_header: default_api_key_header(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.public_base_url {
            let url = Url::parse(base).map_err(|e| {
                DocShieldError::BadRequest(format!("gateway.public_base_url is invalid: {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
                return Err(DocShieldError::BadRequest(
                    "gateway.public_base_url must be an absolute http(s) url".into(),
                ));
            }
        }
        if self.api_key_header.trim().is_empty() {
            return Err(DocShieldError::BadRequest(
                "gateway.api_key_header must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_api_key_header() -> String {
    "x-api-key".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsrfSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CsrfSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FeatureFlags {
    /// File comments (enrichment + posting).
    #[serde(default)]
    pub comments: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// JSON file of `{collection: [documents]}` loaded at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}
