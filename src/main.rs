use {
  anyhow::{Context, anyhow},
  app::App,
  arguments::Arguments,
  clap::Parser,
  client::Client,
  command::Command,
  command_dispatch::CommandDispatch,
  comment::Comment,
  comment_input::CommentInput,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  effect::Effect,
  error::ClientError,
  event::Event,
  help_view::HelpView,
  list_view::ListView,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  reqwest::{Method, StatusCode, Url},
  serde::{Deserialize, Deserializer, Serialize, de},
  serde_json::Value,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    env, fs,
    io::{self, IsTerminal, Stdout},
    mem,
    path::{Path, PathBuf},
    process,
    time::{Duration, Instant},
  },
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, info, warn},
  transient_message::TransientMessage,
  utils::{format_upvotes, truncate, wrap_text},
};

mod app;
mod arguments;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod comment_input;
mod effect;
mod error;
mod event;
mod help_view;
mod list_view;
mod logging;
mod state;
mod transient_message;
mod utils;

const BROWSE_STATUS: &str = "↑/k up • ↓/j down • a add • u upvote • d delete • r refresh • q/esc quit • ? help";

const COMPOSE_STATUS: &str =
  "type your comment • enter submit • esc stop editing";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_COMMENTS_STATUS: &str = "Loading comments...";

const BASE_INDENT: &str = " ";

const TRANSIENT_MESSAGE_LIFETIME: Duration = Duration::from_secs(3);

const HELP_TEXT: &str = "\
Navigation:
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first comment
  end     jump to last comment

Actions:
  a / i   write a new comment
  u / +   upvote the selected comment
  d / del delete the selected comment
  r       reload comments from the server
  q       quit board
  esc     close help or quit
  ?       toggle this help

Writing:
  enter   submit the comment
  bksp    delete the last character
  esc     stop editing (text is kept)
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  let log_path = match arguments.log_file {
    Some(path) => path,
    None => logging::default_path()?,
  };

  let _guard = logging::init(&log_path)
    .with_context(|| format!("could not open log file {}", log_path.display()))?;

  let client = Client::new(arguments.url)
    .context("could not configure comment board client")?;

  info!(base_url = %client.base_url(), "starting comment board");

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
