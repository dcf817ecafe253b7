//! `.env` document model and emitter.

use serde::Serialize;

use super::template::TemplateRenderer;
use crate::domain::AppError;
use crate::domain::defaults;
use crate::domain::service::{ServiceKind, params};
use crate::domain::topology::{SmtpSettings, TopologyModel};

pub const ENV_TEMPLATE: &str = "env.j2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDocument {
    pub sections: Vec<EnvSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSection {
    pub title: String,
    pub entries: Vec<(String, String)>,
}

impl EnvSection {
    fn new(title: &str, entries: Vec<(&str, String)>) -> Self {
        Self {
            title: title.to_string(),
            entries: entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

impl EnvDocument {
    /// Value of `key` across all sections.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|section| section.entries.iter())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn section(&self, title: &str) -> Option<&EnvSection> {
        self.sections.iter().find(|section| section.title == title)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().flat_map(|s| s.entries.iter().map(|(k, _)| k.as_str()))
    }
}

#[derive(Serialize)]
struct RenderedSection<'a> {
    title: &'a str,
    lines: Vec<String>,
}

/// Build the environment document.
///
/// Redis, ClickHouse, S3 and SMTP keys are always present (empty when unused) so
/// downstream services find every key they read. Postgres keys only appear when
/// Postgres is deployed locally.
pub fn build_env_document(model: &TopologyModel) -> EnvDocument {
    let admin = model.admin();
    let mut sections = vec![
        EnvSection::new("Database", vec![("DATABASE_URL", model.database_url().to_string())]),
        EnvSection::new(
            "Auth",
            vec![
                ("ORIGIN", model.origin().to_string()),
                ("BETTER_AUTH_SECRET", model.auth_secret().to_string()),
            ],
        ),
        EnvSection::new(
            "Admin",
            vec![
                ("ADMIN_EMAIL", admin.email.clone()),
                ("ADMIN_PASSWORD", admin.password.clone()),
                ("ORG_NAME", admin.org_name.clone()),
            ],
        ),
    ];

    if let Some(db) = model.deployed(ServiceKind::Postgres) {
        sections.push(EnvSection::new(
            "Postgres",
            vec![
                ("POSTGRES_USER", db.param(params::USER).to_string()),
                ("POSTGRES_PASSWORD", db.param(params::PASSWORD).to_string()),
                ("POSTGRES_DB", db.param(params::DATABASE).to_string()),
            ],
        ));
    }

    sections.push(EnvSection::new("Redis", vec![("REDIS_URL", model.redis_url())]));

    let clickhouse = model.service(ServiceKind::ClickHouse);
    let ch = |key: &str| clickhouse.map(|s| s.param(key).to_string()).unwrap_or_default();
    sections.push(EnvSection::new(
        "ClickHouse",
        vec![
            ("CLICKHOUSE_URL", model.clickhouse_url()),
            ("CLICKHOUSE_USER", ch(params::USER)),
            ("CLICKHOUSE_PASSWORD", ch(params::PASSWORD)),
            ("CLICKHOUSE_DB", ch(params::DATABASE)),
        ],
    ));

    let s3 = model.service(ServiceKind::Minio);
    let (access_key, secret_key, region) = match s3 {
        Some(minio) if minio.enabled => (
            minio.param(params::USER).to_string(),
            minio.param(params::PASSWORD).to_string(),
            defaults::S3_REGION.to_string(),
        ),
        Some(external) => (
            external.param(params::ACCESS_KEY).to_string(),
            external.param(params::SECRET_KEY).to_string(),
            external.param(params::REGION).to_string(),
        ),
        None => Default::default(),
    };
    let bucket = s3.map(|s| s.param(params::BUCKET).to_string()).unwrap_or_default();
    sections.push(EnvSection::new(
        "S3",
        vec![
            ("S3_ENDPOINT", model.s3_endpoint()),
            ("S3_ACCESS_KEY", access_key),
            ("S3_SECRET_KEY", secret_key),
            ("S3_BUCKET", bucket),
            ("S3_REGION", region),
        ],
    ));

    let smtp = model.smtp();
    let mail = |f: fn(&SmtpSettings) -> String| smtp.map(f).unwrap_or_default();
    sections.push(EnvSection::new(
        "SMTP",
        vec![
            ("SMTP_HOST", mail(|s| s.host.clone())),
            ("SMTP_PORT", mail(|s| s.port.clone())),
            ("SMTP_USER", mail(|s| s.user.clone())),
            ("SMTP_PASSWORD", mail(|s| s.password.clone())),
            ("SMTP_FROM", mail(|s| s.from.clone())),
            ("SMTP_SECURE", mail(|s| s.secure.to_string())),
        ],
    ));

    EnvDocument { sections }
}

/// Quote values the `.env` reader would otherwise misread.
///
/// Values with `$` are single-quoted so Compose's `env_file` loader does not
/// interpolate them.
pub fn format_env_value(value: &str) -> String {
    if value.contains('$') && !value.contains('\'') {
        return format!("'{value}'");
    }
    let needs_quotes =
        value.chars().any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '$'));
    if needs_quotes { format!("\"{value}\"") } else { value.to_string() }
}

pub fn render_env_document<R: TemplateRenderer>(
    document: &EnvDocument,
    renderer: &R,
) -> Result<String, AppError> {
    let sections: Vec<RenderedSection<'_>> = document
        .sections
        .iter()
        .map(|section| RenderedSection {
            title: &section.title,
            lines: section
                .entries
                .iter()
                .map(|(key, value)| format!("{key}={}", format_env_value(value)))
                .collect(),
        })
        .collect();

    #[derive(Serialize)]
    struct Context<'a> {
        sections: Vec<RenderedSection<'a>>,
    }

    renderer.render(ENV_TEMPLATE, &Context { sections })
}

pub fn emit_env_file<R: TemplateRenderer>(
    model: &TopologyModel,
    renderer: &R,
) -> Result<String, AppError> {
    render_env_document(&build_env_document(model), renderer)
}
