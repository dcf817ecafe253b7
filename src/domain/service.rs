//! Infrastructure service kinds and per-service operator selections.

use std::collections::BTreeMap;

/// Parameter keys carried in a [`ServiceSelection`].
pub mod params {
    pub const PORT: &str = "port";
    pub const HTTP_PORT: &str = "http_port";
    pub const HTTPS_PORT: &str = "https_port";
    pub const CONSOLE_PORT: &str = "console_port";
    pub const DOMAIN: &str = "domain";
    pub const SSL: &str = "ssl";
    pub const USER: &str = "user";
    pub const PASSWORD: &str = "password";
    pub const DATABASE: &str = "database";
    pub const URL: &str = "url";
    pub const ACCESS_KEY: &str = "access_key";
    pub const SECRET_KEY: &str = "secret_key";
    pub const BUCKET: &str = "bucket";
    pub const REGION: &str = "region";
    pub const ENDPOINT: &str = "endpoint";
}

/// One optional service of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceKind {
    Nginx,
    Api,
    App,
    Postgres,
    Redis,
    ClickHouse,
    Minio,
}

impl ServiceKind {
    /// All kinds in compose emission order.
    pub const ALL: [ServiceKind; 7] = [
        ServiceKind::Nginx,
        ServiceKind::Api,
        ServiceKind::App,
        ServiceKind::Postgres,
        ServiceKind::Redis,
        ServiceKind::ClickHouse,
        ServiceKind::Minio,
    ];

    /// Service name inside the compose network; doubles as container hostname.
    pub fn compose_name(self) -> &'static str {
        match self {
            ServiceKind::Nginx => "nginx",
            ServiceKind::Api => "api",
            ServiceKind::App => "app",
            ServiceKind::Postgres => "db",
            ServiceKind::Redis => "redis",
            ServiceKind::ClickHouse => "clickhouse",
            ServiceKind::Minio => "minio",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ServiceKind::Nginx => "Nginx",
            ServiceKind::Api => "API",
            ServiceKind::App => "App",
            ServiceKind::Postgres => "Postgres",
            ServiceKind::Redis => "Redis",
            ServiceKind::ClickHouse => "ClickHouse",
            ServiceKind::Minio => "MinIO",
        }
    }

    /// Services that keep state in named volumes.
    pub fn named_volumes(self) -> &'static [&'static str] {
        match self {
            ServiceKind::Nginx => &["nginx_logs"],
            ServiceKind::Api | ServiceKind::App => &[],
            ServiceKind::Postgres => &["postgres_data"],
            ServiceKind::Redis => &["redis_data"],
            ServiceKind::ClickHouse => &["clickhouse_data", "clickhouse_logs"],
            ServiceKind::Minio => &["minio_data"],
        }
    }
}

/// How the operator chose to provide an infrastructure dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Deploy a container through the generated compose file.
    Local,
    /// Point at an externally hosted instance.
    External,
    /// Do not use the service at all.
    Skip,
}

impl DeploymentMode {
    pub fn label(self) -> &'static str {
        match self {
            DeploymentMode::Local => "Deploy locally (Docker)",
            DeploymentMode::External => "Use an external server",
            DeploymentMode::Skip => "Skip",
        }
    }
}

/// Operator decision for one service.
///
/// `enabled` means "deployed by the compose file". A disabled selection can still
/// carry parameters describing an externally hosted equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSelection {
    pub enabled: bool,
    pub exposed: bool,
    pub parameters: BTreeMap<String, String>,
}

impl ServiceSelection {
    pub fn local(exposed: bool) -> Self {
        Self { enabled: true, exposed, parameters: BTreeMap::new() }
    }

    pub fn external() -> Self {
        Self { enabled: false, exposed: false, parameters: BTreeMap::new() }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    /// Parameter value, or the empty string when unset.
    pub fn param(&self, key: &str) -> &str {
        self.parameters.get(key).map(String::as_str).unwrap_or("")
    }

    /// Parameter parsed as a port number, falling back when unset or invalid.
    pub fn port_or(&self, key: &str, fallback: u16) -> u16 {
        self.param(key).trim().parse().unwrap_or(fallback)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.param(key) == "true"
    }
}
