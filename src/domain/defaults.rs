//! Hardcoded fallbacks used when neither the operator nor a saved `.env` supplies a value.

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "StrongPassword123";
pub const ADMIN_PASSWORD_MIN_LEN: usize = 8;
pub const ORG_NAME: &str = "Deltas";

pub const SMTP_PORT: u16 = 587;

pub const API_PORT: u16 = 3000;
pub const APP_PORT: u16 = 3001;
/// Port both Node services listen on inside their containers.
pub const NODE_CONTAINER_PORT: u16 = 3000;

pub const NGINX_HTTP_PORT: u16 = 80;
pub const NGINX_HTTPS_PORT: u16 = 443;

pub const POSTGRES_USER: &str = "root";
pub const POSTGRES_PASSWORD: &str = "mysecretpassword";
pub const POSTGRES_DB: &str = "deltas";
pub const POSTGRES_PORT: u16 = 5432;

pub const REDIS_PORT: u16 = 6379;

pub const CLICKHOUSE_USER: &str = "default";
pub const CLICKHOUSE_DB: &str = "deltas";
pub const CLICKHOUSE_HTTP_PORT: u16 = 8123;

pub const MINIO_ROOT_USER: &str = "minioadmin";
pub const MINIO_ROOT_PASSWORD: &str = "minioadmin";
pub const MINIO_BUCKET: &str = "deltas";
pub const MINIO_API_PORT: u16 = 9000;
pub const MINIO_CONSOLE_PORT: u16 = 9001;
pub const S3_REGION: &str = "us-east-1";

pub const NGINX_IMAGE: &str = "nginx:1.27-alpine";
pub const POSTGRES_IMAGE: &str = "postgres:16-alpine";
pub const REDIS_IMAGE: &str = "redis:7-alpine";
pub const CLICKHOUSE_IMAGE: &str = "clickhouse/clickhouse-server:24.8-alpine";
pub const MINIO_IMAGE: &str = "minio/minio:latest";

/// Conventional locations of previously generated environment files.
pub const APP_ENV_PATH: &str = "app/.env";
pub const API_ENV_PATH: &str = "deltas/.env";
pub const APP_DIR: &str = "app";
pub const API_DIR: &str = "deltas";
pub const COMPOSE_FILE: &str = "docker-compose.yaml";
pub const NGINX_CONF_FILE: &str = "nginx.conf";
