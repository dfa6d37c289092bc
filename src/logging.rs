use {
  super::*,
  tracing_appender::non_blocking::WorkerGuard,
  tracing_subscriber::EnvFilter,
};

const FILTER_ENV: &str = "BOARD_LOG";

const DEFAULT_FILTER: &str = "info";

pub(crate) fn default_path() -> Result<PathBuf> {
  let base_dir = resolve_state_dir(
    env::var_os("XDG_STATE_HOME").map(PathBuf::from),
    env::var_os("HOME").map(PathBuf::from),
  );

  Ok(match base_dir {
    Some(dir) => dir,
    None => env::current_dir()?.join(".local").join("state"),
  }
  .join("board")
  .join("board.log"))
}

fn ensure_parent_dir(path: &Path) -> Result {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  Ok(())
}

/// Installs the global subscriber. The terminal belongs to the UI, so records
/// go to `path` through a non-blocking writer that is flushed when the
/// returned guard drops.
pub(crate) fn init(path: &Path) -> Result<WorkerGuard> {
  ensure_parent_dir(path)?;

  let file = fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)?;

  let (writer, guard) = tracing_appender::non_blocking(file);

  let filter = EnvFilter::try_from_env(FILTER_ENV)
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  tracing_subscriber::fmt()
    .with_ansi(false)
    .with_env_filter(filter)
    .with_writer(writer)
    .try_init()
    .map_err(|error| anyhow!("could not install log subscriber: {error}"))?;

  Ok(guard)
}

fn resolve_state_dir(
  state_home: Option<PathBuf>,
  home: Option<PathBuf>,
) -> Option<PathBuf> {
  state_home
    .filter(|dir| !dir.as_os_str().is_empty())
    .or_else(|| home.map(|home| home.join(".local").join("state")))
}
