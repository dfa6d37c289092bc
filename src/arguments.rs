use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "board",
  version,
  about = "Browse, add, upvote and delete comments on a comment board"
)]
pub(crate) struct Arguments {
  /// Write logs to this file instead of the default state directory
  #[arg(long, env = "BOARD_LOG_FILE", value_name = "PATH")]
  pub(crate) log_file: Option<PathBuf>,
  /// Base URL of the comment board server
  #[arg(
    long,
    env = "BOARD_URL",
    value_name = "URL",
    default_value = Arguments::DEFAULT_URL
  )]
  pub(crate) url: Url,
}

impl Arguments {
  const DEFAULT_URL: &str = "http://localhost:3000";
}
