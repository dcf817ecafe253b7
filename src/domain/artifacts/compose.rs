//! `docker-compose.yaml` model and emitter.

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::defaults;
use crate::domain::service::{ServiceKind, ServiceSelection, params};
use crate::domain::topology::TopologyModel;
use crate::domain::AppError;

const HEADER: &str = "# Generated by deltas-setup. Re-run the wizard to regenerate.\n";
const RESTART_POLICY: &str = "unless-stopped";

const POSTGRES_TUNING: [&str; 7] = [
    "max_connections=200",
    "shared_buffers=256MB",
    "effective_cache_size=768MB",
    "work_mem=8MB",
    "maintenance_work_mem=64MB",
    "wal_buffers=16MB",
    "random_page_cost=1.1",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposeFile {
    pub services: IndexMap<String, ComposeService>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub volumes: IndexMap<String, NamedVolume>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComposeService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    pub restart: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env_file: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub environment: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub ulimits: IndexMap<String, Ulimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<Healthcheck>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ulimit {
    pub soft: u64,
    pub hard: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Healthcheck {
    pub test: Vec<String>,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
}

/// Top-level named volume; serialized as an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamedVolume {}

/// Host-side port binding honoring the exposure policy.
pub fn port_mapping(exposed: bool, host: u16, container: u16) -> String {
    if exposed { format!("{host}:{container}") } else { format!("127.0.0.1:{host}:{container}") }
}

/// Escape `$` so Compose passes an operator-supplied value through verbatim.
pub fn compose_literal(value: &str) -> String {
    value.replace('$', "$$")
}

/// Build the compose model: one block per deployed service, in fixed order.
pub fn build_compose(model: &TopologyModel) -> ComposeFile {
    let mut services = IndexMap::new();
    let mut volumes = IndexMap::new();

    for (kind, selection) in model.deployed_services() {
        let service = match kind {
            ServiceKind::Nginx => nginx_service(model, selection),
            ServiceKind::Api => api_service(model, selection),
            ServiceKind::App => app_service(model, selection),
            ServiceKind::Postgres => postgres_service(selection),
            ServiceKind::Redis => redis_service(selection),
            ServiceKind::ClickHouse => clickhouse_service(selection),
            ServiceKind::Minio => minio_service(selection),
        };
        services.insert(kind.compose_name().to_string(), service);
        for name in kind.named_volumes() {
            volumes.insert((*name).to_string(), NamedVolume {});
        }
    }

    ComposeFile { services, volumes }
}

/// Serialize a compose model to YAML.
pub fn render_compose(compose: &ComposeFile) -> Result<String, AppError> {
    let body = serde_yaml::to_string(compose).map_err(|e| AppError::Serialization {
        what: defaults::COMPOSE_FILE.to_string(),
        details: e.to_string(),
    })?;
    Ok(format!("{HEADER}{body}"))
}

pub fn emit_compose(model: &TopologyModel) -> Result<String, AppError> {
    render_compose(&build_compose(model))
}

fn base_service() -> ComposeService {
    ComposeService { restart: RESTART_POLICY.to_string(), ..ComposeService::default() }
}

fn deployed_names(model: &TopologyModel, kinds: &[ServiceKind]) -> Vec<String> {
    kinds
        .iter()
        .filter(|kind| model.is_deployed(**kind))
        .map(|kind| kind.compose_name().to_string())
        .collect()
}

fn nofile(limit: u64) -> IndexMap<String, Ulimit> {
    IndexMap::from([("nofile".to_string(), Ulimit { soft: limit, hard: limit })])
}

fn nginx_service(model: &TopologyModel, nginx: &ServiceSelection) -> ComposeService {
    let ssl = model.ssl_enabled();
    let http_port = nginx.port_or(params::HTTP_PORT, defaults::NGINX_HTTP_PORT);

    let mut ports = vec![port_mapping(nginx.exposed, http_port, 80)];
    let mut volumes = vec![
        format!("./{}:/etc/nginx/nginx.conf:ro", defaults::NGINX_CONF_FILE),
        "nginx_logs:/var/log/nginx".to_string(),
    ];
    if ssl {
        let https_port = nginx.port_or(params::HTTPS_PORT, defaults::NGINX_HTTPS_PORT);
        ports.push(port_mapping(nginx.exposed, https_port, 443));
        volumes.push("./certs:/etc/nginx/certs:ro".to_string());
    }

    ComposeService {
        image: Some(defaults::NGINX_IMAGE.to_string()),
        ports,
        volumes,
        depends_on: deployed_names(model, &[ServiceKind::Api, ServiceKind::App]),
        ..base_service()
    }
}

fn api_service(model: &TopologyModel, api: &ServiceSelection) -> ComposeService {
    let port = api.port_or(params::PORT, defaults::API_PORT);
    ComposeService {
        build: Some(format!("./{}", defaults::API_DIR)),
        env_file: vec![format!("./{}", defaults::API_ENV_PATH)],
        ports: vec![port_mapping(api.exposed, port, defaults::NODE_CONTAINER_PORT)],
        depends_on: deployed_names(
            model,
            &[ServiceKind::Postgres, ServiceKind::Redis, ServiceKind::ClickHouse],
        ),
        ulimits: nofile(65_536),
        ..base_service()
    }
}

fn app_service(model: &TopologyModel, app: &ServiceSelection) -> ComposeService {
    let port = app.port_or(params::PORT, defaults::APP_PORT);
    ComposeService {
        build: Some(format!("./{}", defaults::APP_DIR)),
        env_file: vec![format!("./{}", defaults::APP_ENV_PATH)],
        ports: vec![port_mapping(app.exposed, port, defaults::NODE_CONTAINER_PORT)],
        depends_on: deployed_names(model, &[ServiceKind::Api]),
        ..base_service()
    }
}

fn postgres_service(db: &ServiceSelection) -> ComposeService {
    let port = db.port_or(params::PORT, defaults::POSTGRES_PORT);
    let user = compose_literal(db.param(params::USER));
    let database = compose_literal(db.param(params::DATABASE));

    let mut command = vec!["postgres".to_string()];
    for flag in POSTGRES_TUNING {
        command.push("-c".to_string());
        command.push(flag.to_string());
    }

    ComposeService {
        image: Some(defaults::POSTGRES_IMAGE.to_string()),
        command,
        environment: IndexMap::from([
            ("POSTGRES_USER".to_string(), user.clone()),
            ("POSTGRES_PASSWORD".to_string(), compose_literal(db.param(params::PASSWORD))),
            ("POSTGRES_DB".to_string(), database.clone()),
        ]),
        ports: vec![port_mapping(db.exposed, port, defaults::POSTGRES_PORT)],
        volumes: vec!["postgres_data:/var/lib/postgresql/data".to_string()],
        healthcheck: Some(Healthcheck {
            test: vec!["CMD-SHELL".to_string(), format!("pg_isready -U {user} -d {database}")],
            interval: "10s".to_string(),
            timeout: "5s".to_string(),
            retries: 5,
        }),
        ..base_service()
    }
}

fn redis_service(redis: &ServiceSelection) -> ComposeService {
    let port = redis.port_or(params::PORT, defaults::REDIS_PORT);
    let mut command: Vec<String> =
        ["redis-server", "--appendonly", "yes"].iter().map(|s| s.to_string()).collect();
    let password = redis.param(params::PASSWORD);
    if !password.is_empty() {
        command.push("--requirepass".to_string());
        command.push(compose_literal(password));
    }

    ComposeService {
        image: Some(defaults::REDIS_IMAGE.to_string()),
        command,
        ports: vec![port_mapping(redis.exposed, port, defaults::REDIS_PORT)],
        volumes: vec!["redis_data:/data".to_string()],
        ..base_service()
    }
}

fn clickhouse_service(ch: &ServiceSelection) -> ComposeService {
    let port = ch.port_or(params::PORT, defaults::CLICKHOUSE_HTTP_PORT);
    ComposeService {
        image: Some(defaults::CLICKHOUSE_IMAGE.to_string()),
        environment: IndexMap::from([
            ("CLICKHOUSE_USER".to_string(), compose_literal(ch.param(params::USER))),
            ("CLICKHOUSE_PASSWORD".to_string(), compose_literal(ch.param(params::PASSWORD))),
            ("CLICKHOUSE_DB".to_string(), compose_literal(ch.param(params::DATABASE))),
        ]),
        ports: vec![port_mapping(ch.exposed, port, defaults::CLICKHOUSE_HTTP_PORT)],
        volumes: vec![
            "clickhouse_data:/var/lib/clickhouse".to_string(),
            "clickhouse_logs:/var/log/clickhouse-server".to_string(),
        ],
        ulimits: nofile(262_144),
        ..base_service()
    }
}

fn minio_service(minio: &ServiceSelection) -> ComposeService {
    let api_port = minio.port_or(params::PORT, defaults::MINIO_API_PORT);
    let console_port = minio.port_or(params::CONSOLE_PORT, defaults::MINIO_CONSOLE_PORT);
    ComposeService {
        image: Some(defaults::MINIO_IMAGE.to_string()),
        command: vec![
            "server".to_string(),
            "/data".to_string(),
            "--console-address".to_string(),
            format!(":{}", defaults::MINIO_CONSOLE_PORT),
        ],
        environment: IndexMap::from([
            ("MINIO_ROOT_USER".to_string(), compose_literal(minio.param(params::USER))),
            ("MINIO_ROOT_PASSWORD".to_string(), compose_literal(minio.param(params::PASSWORD))),
        ]),
        ports: vec![
            port_mapping(minio.exposed, api_port, defaults::MINIO_API_PORT),
            port_mapping(minio.exposed, console_port, defaults::MINIO_CONSOLE_PORT),
        ],
        volumes: vec!["minio_data:/data".to_string()],
        ..base_service()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::topology::{TopologyFixture, minimal_api_stack};

    #[test]
    fn loopback_prefix_only_when_not_exposed() {
        assert_eq!(port_mapping(true, 3000, 3000), "3000:3000");
        assert_eq!(port_mapping(false, 5433, 5432), "127.0.0.1:5433:5432");
    }

    #[test]
    fn services_follow_fixed_order() {
        let model = TopologyFixture::everything().build();
        let compose = build_compose(&model);

        let names: Vec<&str> = compose.services.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["nginx", "api", "app", "db", "redis", "clickhouse", "minio"]);
    }

    #[test]
    fn minimal_stack_has_three_blocks_and_matching_volumes() {
        let compose = build_compose(&minimal_api_stack());

        let names: Vec<&str> = compose.services.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["nginx", "api", "db"]);

        let volumes: Vec<&str> = compose.volumes.keys().map(String::as_str).collect();
        assert_eq!(volumes, vec!["nginx_logs", "postgres_data"]);
    }

    #[test]
    fn dependency_edges_only_reference_deployed_services() {
        let compose = build_compose(&minimal_api_stack());
        assert_eq!(compose.services["nginx"].depends_on, vec!["api"]);
        assert_eq!(compose.services["api"].depends_on, vec!["db"]);

        let full = build_compose(&TopologyFixture::everything().build());
        assert_eq!(full.services["nginx"].depends_on, vec!["api", "app"]);
        assert_eq!(full.services["api"].depends_on, vec!["db", "redis", "clickhouse"]);
        assert_eq!(full.services["app"].depends_on, vec!["api"]);
    }

    #[test]
    fn api_gets_raised_file_descriptor_limit() {
        let compose = build_compose(&minimal_api_stack());
        let api = &compose.services["api"];
        assert_eq!(api.ulimits["nofile"], Ulimit { soft: 65_536, hard: 65_536 });
        assert_eq!(api.ports, vec!["3000:3000"]);
        assert_eq!(api.env_file, vec!["./deltas/.env"]);
    }

    #[test]
    fn postgres_carries_tuning_flags_and_loopback_port() {
        let compose = build_compose(&minimal_api_stack());
        let db = &compose.services["db"];

        assert_eq!(db.command.first().map(String::as_str), Some("postgres"));
        assert!(db.command.contains(&"shared_buffers=256MB".to_string()));
        assert_eq!(db.ports, vec!["127.0.0.1:5432:5432"]);
        assert_eq!(db.environment["POSTGRES_PASSWORD"], "mysecretpassword");
    }

    #[test]
    fn dollar_signs_are_escaped_for_compose() {
        let model = TopologyFixture::everything()
            .with_postgres_password("pa$word")
            .with_redis_password("r$pw")
            .build();
        let text = emit_compose(&model).unwrap();

        assert!(text.contains("POSTGRES_PASSWORD: pa$$word"));
        assert!(text.contains("- r$$pw"));
        assert!(!text.contains("pa$word"));

        let compose = build_compose(&model);
        let redis = &compose.services["redis"].command;
        let flag = redis.iter().position(|arg| arg == "--requirepass").unwrap();
        assert_eq!(redis[flag + 1], "r$$pw");
    }

    #[test]
    fn healthcheck_escapes_operator_names() {
        let model = TopologyFixture::everything().with_postgres_user("ad$min").build();
        let db = &build_compose(&model).services["db"];
        let check = db.healthcheck.as_ref().unwrap();
        assert_eq!(check.test[1], "pg_isready -U ad$$min -d deltas");
        assert_eq!(db.environment["POSTGRES_USER"], "ad$$min");
    }

    #[test]
    fn ssl_adds_https_port_and_cert_mount() {
        let model = TopologyFixture::everything().with_domain("deltas.io", true).build();
        let nginx = &build_compose(&model).services["nginx"];

        assert_eq!(nginx.ports, vec!["80:80", "443:443"]);
        assert!(nginx.volumes.contains(&"./certs:/etc/nginx/certs:ro".to_string()));
    }

    #[test]
    fn external_services_produce_no_blocks() {
        let model = TopologyFixture::everything().with_external_infrastructure().build();
        let compose = build_compose(&model);

        let names: Vec<&str> = compose.services.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["nginx", "api", "app"]);
        assert_eq!(compose.services["api"].depends_on, Vec::<String>::new());
    }

    #[test]
    fn rendered_yaml_parses_back() {
        let text = emit_compose(&TopologyFixture::everything().build()).unwrap();
        assert!(text.starts_with("# Generated by deltas-setup"));

        let parsed: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        let services = parsed.get("services").and_then(|s| s.as_mapping()).unwrap();
        assert_eq!(services.len(), 7);
        assert!(parsed.get("volumes").is_some());
    }

    #[test]
    fn volumes_key_omitted_without_stateful_services() {
        let model = TopologyFixture::everything()
            .with_external_infrastructure()
            .without_nginx()
            .build();
        let text = emit_compose(&model).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert!(parsed.get("volumes").is_none());
    }
}
