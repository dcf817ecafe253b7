//! `nginx.conf` model and emitter.

use serde::Serialize;

use super::template::TemplateRenderer;
use crate::domain::AppError;
use crate::domain::defaults;
use crate::domain::service::{ServiceKind, params};
use crate::domain::topology::TopologyModel;

pub const NGINX_TEMPLATE: &str = "nginx.conf.j2";

/// Paths the API handles; everything else belongs to the App.
const INGEST_MATCHER: &str = "~ ^/(post|get)/";
const HEALTH_MATCHER: &str = "= /health";
const CERT_DIR: &str = "/etc/nginx/certs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyConfig {
    pub upstreams: Vec<Upstream>,
    pub redirect: Option<RedirectHost>,
    pub host: VirtualHost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Upstream {
    pub name: String,
    pub server: String,
}

/// Plain-HTTP host that only redirects to the TLS host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectHost {
    pub listen: String,
    pub server_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualHost {
    pub listen: String,
    pub server_name: String,
    pub tls: Option<TlsFiles>,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TlsFiles {
    pub certificate: String,
    pub certificate_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Health,
    Api,
    App,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub matcher: String,
    pub kind: LocationKind,
    pub upstream: Option<String>,
    pub timeouts: Option<ProxyTimeouts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyTimeouts {
    pub connect: String,
    pub send: String,
    pub read: String,
}

impl ProxyTimeouts {
    /// Short timeouts for ingestion writes.
    fn ingest() -> Self {
        Self { connect: "5s".into(), send: "10s".into(), read: "10s".into() }
    }

    fn web() -> Self {
        Self { connect: "60s".into(), send: "60s".into(), read: "60s".into() }
    }
}

impl ProxyConfig {
    pub fn location(&self, kind: LocationKind) -> Option<&Location> {
        self.host.locations.iter().find(|location| location.kind == kind)
    }
}

/// Build the proxy model, or `None` when the proxy is not deployed.
pub fn build_proxy_config(model: &TopologyModel) -> Option<ProxyConfig> {
    let nginx = model.deployed(ServiceKind::Nginx)?;
    let domain = nginx.param(params::DOMAIN).trim();
    let ssl = model.ssl_enabled();
    let server_name = if domain.is_empty() { "_".to_string() } else { domain.to_string() };

    let mut upstreams = Vec::new();
    let mut locations = vec![Location {
        matcher: HEALTH_MATCHER.to_string(),
        kind: LocationKind::Health,
        upstream: None,
        timeouts: None,
    }];

    if model.is_deployed(ServiceKind::Api) {
        upstreams.push(upstream_for(ServiceKind::Api));
        locations.push(Location {
            matcher: INGEST_MATCHER.to_string(),
            kind: LocationKind::Api,
            upstream: Some(ServiceKind::Api.compose_name().to_string()),
            timeouts: Some(ProxyTimeouts::ingest()),
        });
    }
    if model.is_deployed(ServiceKind::App) {
        upstreams.push(upstream_for(ServiceKind::App));
        locations.push(Location {
            matcher: "/".to_string(),
            kind: LocationKind::App,
            upstream: Some(ServiceKind::App.compose_name().to_string()),
            timeouts: Some(ProxyTimeouts::web()),
        });
    }

    let (listen, tls, redirect) = if ssl {
        let tls = TlsFiles {
            certificate: format!("{CERT_DIR}/fullchain.pem"),
            certificate_key: format!("{CERT_DIR}/privkey.pem"),
        };
        let redirect = RedirectHost { listen: "80".to_string(), server_name: server_name.clone() };
        ("443 ssl".to_string(), Some(tls), Some(redirect))
    } else {
        ("80".to_string(), None, None)
    };

    Some(ProxyConfig {
        upstreams,
        redirect,
        host: VirtualHost { listen, server_name, tls, locations },
    })
}

pub fn render_proxy_config<R: TemplateRenderer>(
    config: &ProxyConfig,
    renderer: &R,
) -> Result<String, AppError> {
    renderer.render(NGINX_TEMPLATE, config)
}

/// Emit `nginx.conf`, or `None` when the proxy is not deployed.
pub fn emit_proxy_config<R: TemplateRenderer>(
    model: &TopologyModel,
    renderer: &R,
) -> Result<Option<String>, AppError> {
    build_proxy_config(model).map(|config| render_proxy_config(&config, renderer)).transpose()
}

fn upstream_for(kind: ServiceKind) -> Upstream {
    Upstream {
        name: kind.compose_name().to_string(),
        server: format!("{}:{}", kind.compose_name(), defaults::NODE_CONTAINER_PORT),
    }
}
