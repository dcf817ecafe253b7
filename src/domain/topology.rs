//! Immutable model of one wizard run, shared by every artifact emitter.

use std::collections::BTreeMap;

use url::Url;

use crate::domain::defaults;
use crate::domain::service::{ServiceKind, ServiceSelection, params};

/// Bootstrap administrator and organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSettings {
    pub email: String,
    pub password: String,
    pub org_name: String,
}

/// Outbound mail relay used by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub from: String,
    pub secure: bool,
}

/// Raw answers gathered by the collector, before aggregation.
///
/// `None` means the operator declined (or skipped) that service.
#[derive(Debug, Clone)]
pub struct CollectedAnswers {
    pub admin: AdminSettings,
    pub smtp: Option<SmtpSettings>,
    pub api: Option<ServiceSelection>,
    pub app: Option<ServiceSelection>,
    pub nginx: Option<ServiceSelection>,
    pub origin: String,
    pub auth_secret: String,
    pub postgres: ServiceSelection,
    pub redis: Option<ServiceSelection>,
    pub clickhouse: Option<ServiceSelection>,
    pub minio: Option<ServiceSelection>,
}

/// Complete, immutable set of choices driving artifact generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyModel {
    services: BTreeMap<ServiceKind, ServiceSelection>,
    auth_secret: String,
    database_url: String,
    origin: String,
    admin: AdminSettings,
    smtp: Option<SmtpSettings>,
}

impl TopologyModel {
    /// Aggregate collector answers into a model.
    ///
    /// The proxy is kept only when API or App is deployed. `database_url` is always
    /// derived from the Postgres selection.
    pub fn build(answers: CollectedAnswers) -> Self {
        let CollectedAnswers {
            admin,
            smtp,
            api,
            app,
            nginx,
            origin,
            auth_secret,
            postgres,
            redis,
            clickhouse,
            minio,
        } = answers;

        let has_upstream = api.as_ref().is_some_and(|s| s.enabled)
            || app.as_ref().is_some_and(|s| s.enabled);
        let nginx = nginx.filter(|_| has_upstream);

        let database_url = derive_database_url(&postgres);

        let mut services = BTreeMap::new();
        let optional = [
            (ServiceKind::Nginx, nginx),
            (ServiceKind::Api, api),
            (ServiceKind::App, app),
            (ServiceKind::Postgres, Some(postgres)),
            (ServiceKind::Redis, redis),
            (ServiceKind::ClickHouse, clickhouse),
            (ServiceKind::Minio, minio),
        ];
        for (kind, selection) in optional {
            if let Some(selection) = selection {
                services.insert(kind, selection);
            }
        }

        Self { services, auth_secret, database_url, origin, admin, smtp }
    }

    /// Selection for `kind`, whether deployed locally or hosted elsewhere.
    pub fn service(&self, kind: ServiceKind) -> Option<&ServiceSelection> {
        self.services.get(&kind)
    }

    /// Selection for `kind` only when the compose file deploys it.
    pub fn deployed(&self, kind: ServiceKind) -> Option<&ServiceSelection> {
        self.service(kind).filter(|selection| selection.enabled)
    }

    pub fn is_deployed(&self, kind: ServiceKind) -> bool {
        self.deployed(kind).is_some()
    }

    /// Deployed services in compose order.
    pub fn deployed_services(&self) -> impl Iterator<Item = (ServiceKind, &ServiceSelection)> {
        ServiceKind::ALL.into_iter().filter_map(|kind| self.deployed(kind).map(|s| (kind, s)))
    }

    pub fn auth_secret(&self) -> &str {
        &self.auth_secret
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn admin(&self) -> &AdminSettings {
        &self.admin
    }

    pub fn smtp(&self) -> Option<&SmtpSettings> {
        self.smtp.as_ref()
    }

    /// Whether the reverse proxy terminates TLS.
    pub fn ssl_enabled(&self) -> bool {
        self.deployed(ServiceKind::Nginx).is_some_and(|nginx| {
            nginx.flag(params::SSL) && !nginx.param(params::DOMAIN).trim().is_empty()
        })
    }

    /// Connection URL the application uses for Redis; empty when Redis is skipped.
    pub fn redis_url(&self) -> String {
        match self.service(ServiceKind::Redis) {
            Some(redis) if redis.enabled => {
                let password = redis.param(params::PASSWORD);
                local_url("redis", ServiceKind::Redis, defaults::REDIS_PORT, "", password, "")
            }
            Some(redis) => redis.param(params::URL).to_string(),
            None => String::new(),
        }
    }

    /// HTTP endpoint of ClickHouse; empty when skipped.
    pub fn clickhouse_url(&self) -> String {
        match self.service(ServiceKind::ClickHouse) {
            Some(ch) if ch.enabled => format!(
                "http://{}:{}",
                ServiceKind::ClickHouse.compose_name(),
                defaults::CLICKHOUSE_HTTP_PORT
            ),
            Some(ch) => ch.param(params::URL).to_string(),
            None => String::new(),
        }
    }

    /// S3-compatible endpoint; the in-network MinIO address when deployed locally.
    pub fn s3_endpoint(&self) -> String {
        match self.service(ServiceKind::Minio) {
            Some(minio) if minio.enabled => format!(
                "http://{}:{}",
                ServiceKind::Minio.compose_name(),
                defaults::MINIO_API_PORT
            ),
            Some(minio) => minio.param(params::ENDPOINT).to_string(),
            None => String::new(),
        }
    }
}

/// Derive `DATABASE_URL` from the Postgres selection.
///
/// Local deployments address the `db` container on the compose network; external
/// selections pass the operator-supplied URL through verbatim.
pub fn derive_database_url(postgres: &ServiceSelection) -> String {
    if !postgres.enabled {
        return postgres.param(params::URL).to_string();
    }
    local_url(
        "postgres",
        ServiceKind::Postgres,
        defaults::POSTGRES_PORT,
        postgres.param(params::USER),
        postgres.param(params::PASSWORD),
        postgres.param(params::DATABASE),
    )
}

/// Default public origin given the services chosen so far.
pub fn default_origin(
    api: Option<&ServiceSelection>,
    app: Option<&ServiceSelection>,
    nginx: Option<&ServiceSelection>,
) -> String {
    if let Some(nginx) = nginx {
        let domain = nginx.param(params::DOMAIN).trim();
        if !domain.is_empty() {
            let scheme = if nginx.flag(params::SSL) { "https" } else { "http" };
            return format!("{scheme}://{domain}");
        }
        let port = nginx.port_or(params::HTTP_PORT, defaults::NGINX_HTTP_PORT);
        if port == defaults::NGINX_HTTP_PORT {
            return "http://localhost".to_string();
        }
        return format!("http://localhost:{port}");
    }
    if let Some(app) = app {
        return format!("http://localhost:{}", app.port_or(params::PORT, defaults::APP_PORT));
    }
    let api_port = api.map_or(defaults::API_PORT, |a| a.port_or(params::PORT, defaults::API_PORT));
    format!("http://localhost:{api_port}")
}

fn local_url(
    scheme: &str,
    kind: ServiceKind,
    port: u16,
    user: &str,
    password: &str,
    path: &str,
) -> String {
    let base = format!("{scheme}://{}:{port}", kind.compose_name());
    let Ok(mut url) = Url::parse(&base) else {
        return base;
    };
    if !user.is_empty() && url.set_username(user).is_err() {
        return base;
    }
    if !password.is_empty() && url.set_password(Some(password)).is_err() {
        return base;
    }
    if !path.is_empty() {
        url.set_path(&format!("/{}", path.trim_start_matches('/')));
    }
    url.to_string()
}
