//! Interactive question flow producing [`CollectedAnswers`].

use url::Url;

use crate::domain::configuration::{EnvSnapshot, FallbackChain};
use crate::domain::defaults;
use crate::domain::service::{DeploymentMode, ServiceKind, ServiceSelection, params};
use crate::domain::topology::{AdminSettings, CollectedAnswers, SmtpSettings, default_origin};
use crate::domain::AppError;
use crate::ports::{ArtifactStore, Prompter, SecretSource};

const OVERWRITE_PROMPT: &str = "Existing configuration found. Overwrite it with fresh defaults?";

const POSTGRES_MODES: [DeploymentMode; 2] = [DeploymentMode::Local, DeploymentMode::External];
const OPTIONAL_MODES: [DeploymentMode; 3] =
    [DeploymentMode::Local, DeploymentMode::External, DeploymentMode::Skip];

/// Load previously generated `.env` files unless the operator asks for fresh defaults.
///
/// `app/.env` wins; keys it lacks are filled from `deltas/.env`.
pub fn load_saved_configuration<S, P>(store: &S, prompter: &P) -> Result<EnvSnapshot, AppError>
where
    S: ArtifactStore + ?Sized,
    P: Prompter + ?Sized,
{
    let existing: Vec<&str> = [defaults::APP_ENV_PATH, defaults::API_ENV_PATH]
        .into_iter()
        .filter(|path| store.file_exists(path))
        .collect();
    if existing.is_empty() {
        return Ok(EnvSnapshot::empty());
    }
    if prompter.confirm(OVERWRITE_PROMPT, false)? {
        return Ok(EnvSnapshot::empty());
    }

    let mut snapshot = EnvSnapshot::empty();
    for path in existing {
        snapshot.merge_missing(EnvSnapshot::parse(&store.read_file(path)?));
    }
    Ok(snapshot)
}

/// Asks every wizard question in a fixed order.
pub struct Collector<'a, P: Prompter + ?Sized> {
    prompter: &'a P,
    saved: &'a EnvSnapshot,
}

impl<'a, P: Prompter + ?Sized> Collector<'a, P> {
    pub fn new(prompter: &'a P, saved: &'a EnvSnapshot) -> Self {
        Self { prompter, saved }
    }

    /// Run the full question flow.
    ///
    /// The auth secret is resolved last so a cancelled session never spawns the
    /// secret generator.
    pub fn collect<G: SecretSource + ?Sized>(
        &self,
        secrets: &G,
    ) -> Result<CollectedAnswers, AppError> {
        let admin = self.collect_admin()?;
        let smtp = self.collect_smtp(&admin.email)?;
        let api = self.collect_node_service("API", defaults::API_PORT)?;
        let app = self.collect_node_service("App", defaults::APP_PORT)?;
        let nginx = if api.is_some() || app.is_some() { self.collect_nginx()? } else { None };
        let origin = self.collect_origin(api.as_ref(), app.as_ref(), nginx.as_ref())?;
        let postgres = self.collect_postgres()?;
        let redis = self.collect_redis()?;
        let clickhouse = self.collect_clickhouse()?;
        let minio = self.collect_minio()?;
        let auth_secret = self.resolve_auth_secret(secrets)?;

        Ok(CollectedAnswers {
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
        })
    }

    fn collect_admin(&self) -> Result<AdminSettings, AppError> {
        let email = loop {
            let email =
                self.ask("Admin email", self.saved.get("ADMIN_EMAIL"), defaults::ADMIN_EMAIL)?;
            if email.contains('@') {
                break email;
            }
            self.prompter.warn("Admin email must contain '@'.");
        };

        let password = loop {
            let typed = self.prompter.secret(&format!(
                "Admin password (min {} characters, blank keeps current)",
                defaults::ADMIN_PASSWORD_MIN_LEN
            ))?;
            if typed.is_empty() {
                break FallbackChain::new()
                    .or(self.saved.get("ADMIN_PASSWORD"))
                    .or_literal(defaults::ADMIN_PASSWORD)
                    .resolve();
            }
            if typed.chars().count() >= defaults::ADMIN_PASSWORD_MIN_LEN {
                break typed;
            }
            self.prompter.warn(&format!(
                "Admin password must be at least {} characters.",
                defaults::ADMIN_PASSWORD_MIN_LEN
            ));
        };

        let org_name =
            self.ask("Organization name", self.saved.get("ORG_NAME"), defaults::ORG_NAME)?;

        Ok(AdminSettings { email, password, org_name })
    }

    fn collect_smtp(&self, admin_email: &str) -> Result<Option<SmtpSettings>, AppError> {
        let configured = self.saved.non_empty("SMTP_HOST").is_some();
        if !self.prompter.confirm("Configure SMTP for outgoing mail?", configured)? {
            return Ok(None);
        }

        let host = self.ask("SMTP host", self.saved.get("SMTP_HOST"), "")?;
        let port = self.ask_port("SMTP port", self.saved.get("SMTP_PORT"), defaults::SMTP_PORT)?;
        let user = self.ask("SMTP user", self.saved.get("SMTP_USER"), "")?;
        let password = self.ask_secret("SMTP password", self.saved.get("SMTP_PASSWORD"), "")?;
        let mail_domain = admin_email.rsplit_once('@').map_or("localhost", |(_, domain)| domain);
        let sender = format!("noreply@{mail_domain}");
        let from = self.ask("SMTP from address", self.saved.get("SMTP_FROM"), &sender)?;
        let secure = self.prompter.confirm(
            "Use implicit TLS (SMTPS)?",
            self.saved.get("SMTP_SECURE") == Some("true"),
        )?;

        Ok(Some(SmtpSettings { host, port: port.to_string(), user, password, from, secure }))
    }

    /// API and App share one shape: deploy, host port, exposure.
    fn collect_node_service(
        &self,
        name: &str,
        default_port: u16,
    ) -> Result<Option<ServiceSelection>, AppError> {
        if !self.prompter.confirm(&format!("Deploy the {name} service?"), true)? {
            return Ok(None);
        }
        let port = self.ask_port(&format!("{name} host port"), None, default_port)?;
        let exposed = self.ask_exposed(name, false)?;
        Ok(Some(ServiceSelection::local(exposed).with_param(params::PORT, port.to_string())))
    }

    fn collect_nginx(&self) -> Result<Option<ServiceSelection>, AppError> {
        if !self.prompter.confirm("Deploy Nginx as reverse proxy?", true)? {
            return Ok(None);
        }

        let saved_domain = self.saved_domain();
        let domain =
            self.ask("Domain name (leave blank for none)", saved_domain.as_deref(), "")?;
        let domain = domain.trim().to_string();
        let ssl = if domain.is_empty() {
            false
        } else {
            self.prompter.confirm("Enable SSL (certificates expected in ./certs)?", true)?
        };
        let exposed = self.ask_exposed("Nginx", true)?;
        let http_port = self.ask_port("Nginx HTTP port", None, defaults::NGINX_HTTP_PORT)?;

        Ok(Some(
            ServiceSelection::local(exposed)
                .with_param(params::DOMAIN, domain)
                .with_param(params::SSL, ssl.to_string())
                .with_param(params::HTTP_PORT, http_port.to_string())
                .with_param(params::HTTPS_PORT, defaults::NGINX_HTTPS_PORT.to_string()),
        ))
    }

    fn collect_origin(
        &self,
        api: Option<&ServiceSelection>,
        app: Option<&ServiceSelection>,
        nginx: Option<&ServiceSelection>,
    ) -> Result<String, AppError> {
        let computed = default_origin(api, app, nginx);
        self.ask("Public origin URL", self.saved.get("ORIGIN"), &computed)
    }

    fn collect_postgres(&self) -> Result<ServiceSelection, AppError> {
        let default = self.saved_mode("DATABASE_URL", ServiceKind::Postgres);
        match self.ask_mode("Postgres", &POSTGRES_MODES, default)? {
            DeploymentMode::External => {
                let url = self.ask(
                    "Postgres connection URL",
                    self.saved.get("DATABASE_URL"),
                    "",
                )?;
                Ok(ServiceSelection::external().with_param(params::URL, url))
            }
            _ => {
                let user = self.ask(
                    "Postgres user",
                    self.saved.get("POSTGRES_USER"),
                    defaults::POSTGRES_USER,
                )?;
                let password = self.ask_secret(
                    "Postgres password (blank keeps current)",
                    self.saved.get("POSTGRES_PASSWORD"),
                    defaults::POSTGRES_PASSWORD,
                )?;
                let database = self.ask(
                    "Postgres database",
                    self.saved.get("POSTGRES_DB"),
                    defaults::POSTGRES_DB,
                )?;
                let port = self.ask_port("Postgres host port", None, defaults::POSTGRES_PORT)?;
                let exposed = self.ask_exposed("Postgres", false)?;
                Ok(ServiceSelection::local(exposed)
                    .with_param(params::USER, user)
                    .with_param(params::PASSWORD, password)
                    .with_param(params::DATABASE, database)
                    .with_param(params::PORT, port.to_string()))
            }
        }
    }

    fn collect_redis(&self) -> Result<Option<ServiceSelection>, AppError> {
        let default = self.saved_mode("REDIS_URL", ServiceKind::Redis);
        match self.ask_mode("Redis", &OPTIONAL_MODES, default)? {
            DeploymentMode::Local => {
                let saved_password = self.saved_local_password("REDIS_URL", ServiceKind::Redis);
                let password = self.ask_secret(
                    "Redis password (blank for none)",
                    saved_password.as_deref(),
                    "",
                )?;
                let port = self.ask_port("Redis host port", None, defaults::REDIS_PORT)?;
                let exposed = self.ask_exposed("Redis", false)?;
                Ok(Some(
                    ServiceSelection::local(exposed)
                        .with_param(params::PASSWORD, password)
                        .with_param(params::PORT, port.to_string()),
                ))
            }
            DeploymentMode::External => {
                let url = self.ask("Redis URL", self.saved.get("REDIS_URL"), "")?;
                Ok(Some(ServiceSelection::external().with_param(params::URL, url)))
            }
            DeploymentMode::Skip => Ok(None),
        }
    }

    fn collect_clickhouse(&self) -> Result<Option<ServiceSelection>, AppError> {
        let default = self.saved_mode("CLICKHOUSE_URL", ServiceKind::ClickHouse);
        let mode = self.ask_mode("ClickHouse", &OPTIONAL_MODES, default)?;
        let selection = match mode {
            DeploymentMode::Skip => return Ok(None),
            DeploymentMode::External => {
                let url = self.ask("ClickHouse URL", self.saved.get("CLICKHOUSE_URL"), "")?;
                ServiceSelection::external().with_param(params::URL, url)
            }
            DeploymentMode::Local => ServiceSelection::local(false),
        };

        let user = self.ask(
            "ClickHouse user",
            self.saved.get("CLICKHOUSE_USER"),
            defaults::CLICKHOUSE_USER,
        )?;
        let password =
            self.ask_secret("ClickHouse password", self.saved.get("CLICKHOUSE_PASSWORD"), "")?;
        let database = self.ask(
            "ClickHouse database",
            self.saved.get("CLICKHOUSE_DB"),
            defaults::CLICKHOUSE_DB,
        )?;
        let mut selection = selection
            .with_param(params::USER, user)
            .with_param(params::PASSWORD, password)
            .with_param(params::DATABASE, database);

        if mode == DeploymentMode::Local {
            let port =
                self.ask_port("ClickHouse HTTP host port", None, defaults::CLICKHOUSE_HTTP_PORT)?;
            selection.exposed = self.ask_exposed("ClickHouse", false)?;
            selection = selection.with_param(params::PORT, port.to_string());
        }
        Ok(Some(selection))
    }

    fn collect_minio(&self) -> Result<Option<ServiceSelection>, AppError> {
        let default = self.saved_mode("S3_ENDPOINT", ServiceKind::Minio);
        match self.ask_mode("Object storage (MinIO / S3)", &OPTIONAL_MODES, default)? {
            DeploymentMode::Local => {
                let user = self.ask(
                    "MinIO root user",
                    self.saved.get("S3_ACCESS_KEY"),
                    defaults::MINIO_ROOT_USER,
                )?;
                let password = self.ask_secret(
                    "MinIO root password (blank keeps current)",
                    self.saved.get("S3_SECRET_KEY"),
                    defaults::MINIO_ROOT_PASSWORD,
                )?;
                let bucket =
                    self.ask("Bucket name", self.saved.get("S3_BUCKET"), defaults::MINIO_BUCKET)?;
                let port = self.ask_port("MinIO API host port", None, defaults::MINIO_API_PORT)?;
                let console_port =
                    self.ask_port("MinIO console host port", None, defaults::MINIO_CONSOLE_PORT)?;
                let exposed = self.ask_exposed("MinIO", false)?;
                Ok(Some(
                    ServiceSelection::local(exposed)
                        .with_param(params::USER, user)
                        .with_param(params::PASSWORD, password)
                        .with_param(params::BUCKET, bucket)
                        .with_param(params::PORT, port.to_string())
                        .with_param(params::CONSOLE_PORT, console_port.to_string()),
                ))
            }
            DeploymentMode::External => {
                let endpoint = self.ask("S3 endpoint", self.saved.get("S3_ENDPOINT"), "")?;
                let access_key = self.ask("S3 access key", self.saved.get("S3_ACCESS_KEY"), "")?;
                let secret_key =
                    self.ask_secret("S3 secret key", self.saved.get("S3_SECRET_KEY"), "")?;
                let bucket =
                    self.ask("S3 bucket", self.saved.get("S3_BUCKET"), defaults::MINIO_BUCKET)?;
                let region =
                    self.ask("S3 region", self.saved.get("S3_REGION"), defaults::S3_REGION)?;
                Ok(Some(
                    ServiceSelection::external()
                        .with_param(params::ENDPOINT, endpoint)
                        .with_param(params::ACCESS_KEY, access_key)
                        .with_param(params::SECRET_KEY, secret_key)
                        .with_param(params::BUCKET, bucket)
                        .with_param(params::REGION, region),
                ))
            }
            DeploymentMode::Skip => Ok(None),
        }
    }

    fn resolve_auth_secret<G: SecretSource + ?Sized>(
        &self,
        secrets: &G,
    ) -> Result<String, AppError> {
        match self.saved.non_empty("BETTER_AUTH_SECRET") {
            Some(secret) => Ok(secret.to_string()),
            None => secrets.generate(),
        }
    }

    /// Free-text prompt resolved through input, saved value, then `literal`.
    fn ask(&self, prompt: &str, saved: Option<&str>, literal: &str) -> Result<String, AppError> {
        let default = FallbackChain::new().or(saved).or_literal(literal).first();
        let typed = self.prompter.input(prompt, default)?;
        Ok(FallbackChain::new().or(Some(typed.as_str())).or(default).resolve())
    }

    /// Hidden prompt; blank input keeps the saved value or `literal`.
    fn ask_secret(
        &self,
        prompt: &str,
        saved: Option<&str>,
        literal: &str,
    ) -> Result<String, AppError> {
        let typed = self.prompter.secret(prompt)?;
        Ok(FallbackChain::new().or(Some(typed.as_str())).or(saved).or_literal(literal).resolve())
    }

    fn ask_port(&self, prompt: &str, saved: Option<&str>, fallback: u16) -> Result<u16, AppError> {
        let literal = fallback.to_string();
        loop {
            let answer = self.ask(prompt, saved, &literal)?;
            match answer.trim().parse::<u16>() {
                Ok(port) if port > 0 => return Ok(port),
                _ => self.prompter.warn(&format!("'{answer}' is not a valid port (1-65535).")),
            }
        }
    }

    fn ask_exposed(&self, name: &str, default: bool) -> Result<bool, AppError> {
        self.prompter.confirm(
            &format!("Expose {name} on all interfaces? (No binds to 127.0.0.1 only)"),
            default,
        )
    }

    fn ask_mode(
        &self,
        name: &str,
        modes: &[DeploymentMode],
        default: DeploymentMode,
    ) -> Result<DeploymentMode, AppError> {
        let labels: Vec<&str> = modes.iter().map(|mode| mode.label()).collect();
        let default_index = modes.iter().position(|mode| *mode == default).unwrap_or(0);
        let prompt = format!("How should {name} be provided?");
        let index = self.prompter.select(&prompt, &labels, default_index)?;
        Ok(modes.get(index).copied().unwrap_or(default))
    }

    /// Mode suggested by a saved connection key.
    ///
    /// A fresh run deploys everything locally. With saved configuration an empty
    /// or missing key means the service was skipped.
    fn saved_mode(&self, key: &str, kind: ServiceKind) -> DeploymentMode {
        if self.saved.is_empty() {
            return DeploymentMode::Local;
        }
        match self.saved.non_empty(key) {
            None => DeploymentMode::Skip,
            Some(value) if saved_host(value).as_deref() == Some(kind.compose_name()) => {
                DeploymentMode::Local
            }
            Some(_) => DeploymentMode::External,
        }
    }

    /// Password embedded in a saved URL pointing at the local container.
    fn saved_local_password(&self, key: &str, kind: ServiceKind) -> Option<String> {
        let url = Url::parse(self.saved.non_empty(key)?).ok()?;
        if url.host_str() != Some(kind.compose_name()) {
            return None;
        }
        url.password().map(str::to_string)
    }

    /// Domain from a saved public origin, unless it points at this machine.
    fn saved_domain(&self) -> Option<String> {
        let host = saved_host(self.saved.non_empty("ORIGIN")?)?;
        match host.as_str() {
            "localhost" | "127.0.0.1" => None,
            _ => Some(host),
        }
    }
}

fn saved_host(value: &str) -> Option<String> {
    Url::parse(value).ok()?.host_str().map(str::to_string)
}
