//! Persists an [`ArtifactSet`] through the artifact store.

use crate::domain::artifacts::ArtifactSet;
use crate::domain::defaults;
use crate::domain::AppError;
use crate::ports::ArtifactStore;

/// Write every artifact in a fixed order, calling `on_written` after each file.
///
/// Stops at the first failure; files written before it stay on disk.
pub fn write_artifacts<S, F>(
    store: &S,
    artifacts: &ArtifactSet,
    mut on_written: F,
) -> Result<Vec<String>, AppError>
where
    S: ArtifactStore + ?Sized,
    F: FnMut(&str),
{
    let mut written = Vec::new();
    let mut write = |path: &str, content: &str| -> Result<(), AppError> {
        store.write_file(path, content)?;
        on_written(path);
        written.push(path.to_string());
        Ok(())
    };

    write(defaults::COMPOSE_FILE, &artifacts.compose)?;
    if let Some(nginx_conf) = &artifacts.nginx_conf {
        write(defaults::NGINX_CONF_FILE, nginx_conf)?;
    }

    store.create_dir_all(defaults::APP_DIR)?;
    store.create_dir_all(defaults::API_DIR)?;

    write(defaults::APP_ENV_PATH, &artifacts.env)?;
    write(defaults::API_ENV_PATH, &artifacts.env)?;

    Ok(written)
}
