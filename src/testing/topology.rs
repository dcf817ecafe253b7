use crate::domain::service::{ServiceKind, ServiceSelection, params};
use crate::domain::topology::{AdminSettings, CollectedAnswers, SmtpSettings, TopologyModel};

pub const EXTERNAL_DATABASE_URL: &str = "postgres://svc:pw@pg.internal:5432/deltas";

/// Builder over collector answers for emitter tests.
#[derive(Debug, Clone)]
pub struct TopologyFixture {
    answers: CollectedAnswers,
}

fn admin() -> AdminSettings {
    AdminSettings {
        email: "admin@example.com".into(),
        password: "StrongPassword123".into(),
        org_name: "Deltas".into(),
    }
}

fn local_postgres(exposed: bool) -> ServiceSelection {
    ServiceSelection::local(exposed)
        .with_param(params::USER, "root")
        .with_param(params::PASSWORD, "mysecretpassword")
        .with_param(params::DATABASE, "deltas")
        .with_param(params::PORT, "5432")
}

fn local_redis(exposed: bool) -> ServiceSelection {
    ServiceSelection::local(exposed)
        .with_param(params::PASSWORD, "redispw")
        .with_param(params::PORT, "6379")
}

fn local_clickhouse(exposed: bool) -> ServiceSelection {
    ServiceSelection::local(exposed)
        .with_param(params::USER, "default")
        .with_param(params::PASSWORD, "chpw")
        .with_param(params::DATABASE, "deltas")
        .with_param(params::PORT, "8123")
}

fn local_minio(exposed: bool) -> ServiceSelection {
    ServiceSelection::local(exposed)
        .with_param(params::USER, "minioadmin")
        .with_param(params::PASSWORD, "minioadmin")
        .with_param(params::BUCKET, "deltas")
        .with_param(params::PORT, "9000")
        .with_param(params::CONSOLE_PORT, "9001")
}

fn nginx(exposed: bool, domain: Option<&str>, ssl: bool) -> ServiceSelection {
    let domain = domain.unwrap_or_default();
    let ssl = ssl && !domain.is_empty();
    ServiceSelection::local(exposed)
        .with_param(params::DOMAIN, domain)
        .with_param(params::SSL, ssl.to_string())
        .with_param(params::HTTP_PORT, "80")
        .with_param(params::HTTPS_PORT, "443")
}

impl TopologyFixture {
    /// Every service deployed locally, SMTP configured, proxy without a domain.
    pub fn everything() -> Self {
        Self {
            answers: CollectedAnswers {
                admin: admin(),
                smtp: Some(SmtpSettings {
                    host: "smtp.example.com".into(),
                    port: "587".into(),
                    user: "mailer".into(),
                    password: "mailpw".into(),
                    from: "noreply@example.com".into(),
                    secure: true,
                }),
                api: Some(ServiceSelection::local(true).with_param(params::PORT, "3000")),
                app: Some(ServiceSelection::local(false).with_param(params::PORT, "3001")),
                nginx: Some(nginx(true, None, false)),
                origin: "http://localhost".into(),
                auth_secret: "test-secret".into(),
                postgres: local_postgres(false),
                redis: Some(local_redis(false)),
                clickhouse: Some(local_clickhouse(false)),
                minio: Some(local_minio(false)),
            },
        }
    }

    /// Build from per-kind flags in [`ServiceKind::ALL`] order.
    pub fn from_flags(
        enabled: [bool; 7],
        exposed: [bool; 7],
        domain: Option<&str>,
        ssl: bool,
    ) -> Self {
        let mut fixture = Self::everything();
        let answers = &mut fixture.answers;
        for (index, kind) in ServiceKind::ALL.into_iter().enumerate() {
            let (on, public) = (enabled[index], exposed[index]);
            match kind {
                ServiceKind::Nginx => answers.nginx = on.then(|| nginx(public, domain, ssl)),
                ServiceKind::Api => {
                    answers.api = on.then(|| {
                        ServiceSelection::local(public).with_param(params::PORT, "3000")
                    })
                }
                ServiceKind::App => {
                    answers.app = on.then(|| {
                        ServiceSelection::local(public).with_param(params::PORT, "3001")
                    })
                }
                ServiceKind::Postgres => {
                    answers.postgres = if on {
                        local_postgres(public)
                    } else {
                        ServiceSelection::external().with_param(params::URL, EXTERNAL_DATABASE_URL)
                    }
                }
                ServiceKind::Redis => answers.redis = on.then(|| local_redis(public)),
                ServiceKind::ClickHouse => {
                    answers.clickhouse = on.then(|| local_clickhouse(public))
                }
                ServiceKind::Minio => answers.minio = on.then(|| local_minio(public)),
            }
        }
        fixture
    }

    pub fn with_domain(mut self, domain: &str, ssl: bool) -> Self {
        let exposed = self.answers.nginx.as_ref().is_none_or(|n| n.exposed);
        self.answers.nginx = Some(nginx(exposed, Some(domain), ssl));
        self
    }

    pub fn without_nginx(mut self) -> Self {
        self.answers.nginx = None;
        self
    }

    /// Override a parameter of the local Postgres deployment; no-op when hosted.
    pub fn with_postgres_param(mut self, key: &str, value: &str) -> Self {
        if self.answers.postgres.enabled {
            self.answers.postgres.parameters.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn with_postgres_password(self, password: &str) -> Self {
        self.with_postgres_param(params::PASSWORD, password)
    }

    pub fn with_postgres_user(self, user: &str) -> Self {
        self.with_postgres_param(params::USER, user)
    }

    pub fn with_redis_password(mut self, password: &str) -> Self {
        if let Some(redis) = self.answers.redis.as_mut().filter(|redis| redis.enabled) {
            redis.parameters.insert(params::PASSWORD.to_string(), password.to_string());
        }
        self
    }

    pub fn with_org_name(mut self, org_name: &str) -> Self {
        self.answers.admin.org_name = org_name.to_string();
        self
    }

    /// Point every infrastructure dependency at a hosted equivalent.
    pub fn with_external_infrastructure(mut self) -> Self {
        self.answers.postgres =
            ServiceSelection::external().with_param(params::URL, EXTERNAL_DATABASE_URL);
        self.answers.redis = Some(
            ServiceSelection::external().with_param(params::URL, "rediss://cache.internal:6380"),
        );
        self.answers.clickhouse = Some(
            ServiceSelection::external()
                .with_param(params::URL, "https://ch.internal:8443")
                .with_param(params::USER, "analytics")
                .with_param(params::PASSWORD, "chpw")
                .with_param(params::DATABASE, "events"),
        );
        self.answers.minio = Some(
            ServiceSelection::external()
                .with_param(params::ENDPOINT, "https://s3.eu-west-1.amazonaws.com")
                .with_param(params::ACCESS_KEY, "AKIA")
                .with_param(params::SECRET_KEY, "secret")
                .with_param(params::BUCKET, "deltas-prod")
                .with_param(params::REGION, "eu-west-1"),
        );
        self
    }

    pub fn nginx_accepted(&self) -> bool {
        self.answers.nginx.is_some()
    }

    pub fn ssl_requested(&self) -> bool {
        self.answers.nginx.as_ref().is_some_and(|n| {
            n.flag(params::SSL) && !n.param(params::DOMAIN).is_empty()
        })
    }

    pub fn build(&self) -> TopologyModel {
        TopologyModel::build(self.answers.clone())
    }
}

/// API exposed on 3000, no App, proxy without domain, local Postgres on loopback.
pub fn minimal_api_stack() -> TopologyModel {
    let mut fixture = TopologyFixture::from_flags(
        [true, true, false, true, false, false, false],
        [true, true, false, false, false, false, false],
        None,
        false,
    );
    fixture.answers.smtp = None;
    fixture.build()
}
