use super::*;

/// Client-side view of the comment board.
///
/// User commands turn into [`Effect`]s for the event loop to run, and their
/// completions come back through [`State::handle_event`]. The comment list is
/// only ever replaced by a list response, appended to by a create response, or
/// edited by an upvote response.
pub(crate) struct State {
  applied_refresh: Option<u64>,
  comments: ListView<Comment>,
  deferred_message: Option<String>,
  help: HelpView,
  input: CommentInput,
  latest_refresh: Option<u64>,
  list_height: usize,
  loading: bool,
  message: String,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  transient_message: Option<TransientMessage>,
}

impl State {
  /// Sends `title` to the server as a new draft comment.
  pub(crate) fn add_comment(&mut self, title: String) {
    debug!(title = %title, "creating comment");

    self.notify(format!("Posting \"{}\"...", truncate(&title, 40)));

    self.pending_effects.push(Effect::CreateComment {
      draft: Comment::draft(title),
    });
  }

  pub(crate) fn comment_view(&self) -> &ListView<Comment> {
    &self.comments
  }

  pub(crate) fn comments(&self) -> &[Comment] {
    self.comments.items()
  }

  pub(crate) fn compose_command(&mut self, key: KeyEvent) -> Option<Command> {
    if self.input.is_focused() {
      Some(self.handle_compose_key(key))
    } else {
      None
    }
  }

  /// Asks the server to delete `comment` and, without waiting for that, for a
  /// fresh list. The refresh may still show the comment; a later one settles
  /// it.
  pub(crate) fn delete(&mut self, comment: &Comment) {
    let Some(id) = comment.id.clone() else {
      self.notify("This comment has not been saved yet".into());
      return;
    };

    debug!(%id, "deleting comment");

    self.notify(format!("Deleting \"{}\"...", truncate(&comment.title, 40)));

    self.pending_effects.push(Effect::DeleteComment { id });

    self.list_all();
  }

  fn delete_selected(&mut self) {
    if let Some(comment) = self.comments.selected_item().cloned() {
      self.delete(&comment);
    }
  }

  pub(crate) fn dispatch_command(&mut self, command: Command) -> CommandDispatch {
    let mut should_exit = false;

    match command {
      Command::Quit => {
        should_exit = true;
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::HideHelp => self.hide_help(),
      Command::SelectNext => self.select_next(),
      Command::SelectPrevious => self.select_previous(),
      Command::PageDown => self.page_down(),
      Command::PageUp => self.page_up(),
      Command::SelectFirst => self.select_index(0),
      Command::SelectLast => {
        self.select_index(self.comments.len().saturating_sub(1));
      }
      Command::StartComposing => self.start_composing(),
      Command::StopComposing => self.stop_composing(),
      Command::SubmitComment => self.submit_comment(),
      Command::UpvoteSelected => self.upvote_selected(),
      Command::DeleteSelected => self.delete_selected(),
      Command::Refresh => self.list_all(),
      Command::None => {}
    }

    CommandDispatch {
      effects: self.take_pending_effects(),
      should_exit,
    }
  }

  fn handle_compose_key(&mut self, key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Esc => Command::StopComposing,
      KeyCode::Enter => Command::SubmitComment,
      KeyCode::Backspace => {
        self.input.pop();
        Command::None
      }
      KeyCode::Char(ch) => {
        let modifiers = key.modifiers;

        if modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER)
        {
          return Command::None;
        }

        self.input.push(ch);

        Command::None
      }
      _ => Command::None,
    }
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::CommentsListed { request_id, result } => {
        if self.latest_refresh == Some(request_id) {
          self.loading = false;
        }

        match result {
          Ok(comments) => {
            if self
              .applied_refresh
              .is_some_and(|applied| request_id < applied)
            {
              debug!(request_id, "dropping stale comment list");
              return;
            }

            debug!(request_id, count = comments.len(), "comments listed");

            self.applied_refresh = Some(request_id);
            self.comments.replace(comments);
          }
          Err(error) => {
            warn!(request_id, %error, "could not list comments");
            self.notify(format!("Could not load comments: {error}"));
          }
        }
      }
      Event::CommentCreated { result } => match result {
        Ok(comment) => {
          info!(id = ?comment.id, "comment created");

          let title = truncate(&comment.title, 40);

          let existing = comment.id.as_deref().and_then(|id| {
            self
              .comments
              .find_mut(|known| known.id.as_deref() == Some(id))
          });

          match existing {
            Some(known) => *known = comment,
            None => self.comments.push(comment),
          }

          self.notify(format!("Added \"{title}\""));
        }
        Err(error) => {
          warn!(%error, "could not create comment");
          self.notify(format!("Could not add comment: {error}"));
        }
      },
      Event::CommentUpvoted { id, result } => match result {
        Ok(upvotes) => {
          info!(%id, upvotes, "comment upvoted");

          if let Some(comment) = self
            .comments
            .find_mut(|comment| comment.id.as_deref() == Some(id.as_str()))
          {
            comment.upvotes = upvotes;
          }
        }
        Err(error) => {
          warn!(%id, %error, "could not upvote comment");
          self.notify(format!("Could not upvote comment: {error}"));
        }
      },
      Event::CommentDeleted { id, result } => match result {
        Ok(()) => info!(%id, "comment deleted"),
        Err(error) => {
          warn!(%id, %error, "could not delete comment");
          self.notify(format!("Could not delete comment: {error}"));
        }
      },
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  fn hide_help(&mut self) {
    self.help.hide(&mut self.message);

    if let Some(message) = self.deferred_message.take() {
      self.set_transient_message(message);
    }
  }

  fn idle_status(&self) -> &'static str {
    if self.input.is_focused() {
      COMPOSE_STATUS
    } else {
      BROWSE_STATUS
    }
  }

  pub(crate) fn input(&self) -> &CommentInput {
    &self.input
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.loading
  }

  /// Requests the full comment list; the newest response wins.
  pub(crate) fn list_all(&mut self) {
    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    self.latest_refresh = Some(request_id);
    self.loading = true;

    self.pending_effects.push(Effect::ListComments { request_id });
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn new() -> Self {
    let mut state = Self {
      applied_refresh: None,
      comments: ListView::default(),
      deferred_message: None,
      help: HelpView::new(),
      input: CommentInput::default(),
      latest_refresh: None,
      list_height: 0,
      loading: false,
      message: BROWSE_STATUS.into(),
      next_request_id: 0,
      pending_effects: Vec::new(),
      transient_message: None,
    };

    state.list_all();

    state
  }

  /// Shows `message` now, or once the help overlay closes. Only the latest
  /// message raised behind the overlay is kept.
  fn notify(&mut self, message: String) {
    if self.help.is_visible() {
      self.deferred_message = Some(message);
    } else {
      self.set_transient_message(message);
    }
  }

  fn page_down(&mut self) {
    let current = self.comments.selected_raw();
    self.select_index(current.saturating_add(self.page_jump()));
  }

  fn page_jump(&self) -> usize {
    // Each comment takes at least three rows: title, upvotes, spacer.
    (self.list_height / 3).saturating_sub(1).max(1)
  }

  fn page_up(&mut self) {
    let current = self.comments.selected_raw();
    self.select_index(current.saturating_sub(self.page_jump()));
  }

  fn select_index(&mut self, target: usize) {
    self.comments.set_selected(target);
  }

  fn select_next(&mut self) {
    let current = self.comments.selected_raw();
    self.select_index(current.saturating_add(1));
  }

  fn select_previous(&mut self) {
    let current = self.comments.selected_raw();
    self.select_index(current.saturating_sub(1));
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.comments.set_offset(offset);
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.original().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), original));

    self.message = message;
  }

  fn start_composing(&mut self) {
    self.input.focus();
    self.transient_message = None;

    if !self.help.is_visible() {
      self.message = COMPOSE_STATUS.into();
    }
  }

  fn stop_composing(&mut self) {
    self.input.blur();
    self.transient_message = None;

    if !self.help.is_visible() {
      self.message = BROWSE_STATUS.into();
    }
  }

  /// Submits the input field. The field is emptied before any response.
  fn submit_comment(&mut self) {
    let title = self.input.take();
    self.add_comment(title);
  }

  pub(crate) fn take_pending_effects(&mut self) -> Vec<Effect> {
    std::mem::take(&mut self.pending_effects)
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = if transient.original() == HELP_STATUS {
          self.idle_status().to_string()
        } else {
          transient.original().to_string()
        };

        self.transient_message = None;
      }
    }
  }

  /// Asks the server to count one more upvote for `comment`; the local
  /// counter follows whatever the server answers.
  pub(crate) fn upvote(&mut self, comment: &Comment) {
    let Some(id) = comment.id.clone() else {
      self.notify("This comment has not been saved yet".into());
      return;
    };

    debug!(%id, "upvoting comment");

    self.pending_effects.push(Effect::UpvoteComment { id });
  }

  fn upvote_selected(&mut self) {
    if let Some(comment) = self.comments.selected_item().cloned() {
      self.upvote(&comment);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn comment(id: &str, title: &str, upvotes: u64) -> Comment {
    Comment {
      id: Some(id.to_string()),
      title: title.to_string(),
      upvotes,
    }
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn list_requests(effects: &[Effect]) -> Vec<u64> {
    effects
      .iter()
      .filter_map(|effect| match effect {
        Effect::ListComments { request_id } => Some(*request_id),
        _ => None,
      })
      .collect()
  }

  fn loaded_state(comments: Vec<Comment>) -> State {
    let mut state = State::new();

    let effects = state.take_pending_effects();

    assert_eq!(list_requests(&effects), vec![0]);

    state.handle_event(Event::CommentsListed {
      request_id: 0,
      result: Ok(comments),
    });

    state
  }

  fn server_error() -> ClientError {
    ClientError::Status {
      method: Method::GET,
      status: StatusCode::INTERNAL_SERVER_ERROR,
      url: Url::parse("http://localhost:3000/comments").unwrap(),
    }
  }

  #[test]
  fn startup_requests_the_comment_list_once() {
    let mut state = State::new();

    assert!(state.is_loading());
    assert_eq!(
      state.take_pending_effects(),
      vec![Effect::ListComments { request_id: 0 }]
    );
  }

  #[test]
  fn list_response_replaces_the_whole_list() {
    let mut state =
      loaded_state(vec![comment("9", "old", 4), comment("8", "older", 1)]);

    state.list_all();

    let request_id = list_requests(&state.take_pending_effects())[0];

    state.handle_event(Event::CommentsListed {
      request_id,
      result: Ok(vec![comment("1", "A", 2)]),
    });

    assert_eq!(state.comments(), &[comment("1", "A", 2)]);
    assert!(!state.is_loading());
  }

  #[test]
  fn repeated_refreshes_of_unchanged_server_agree() {
    let server = vec![comment("1", "A", 2), comment("2", "B", 0)];

    let mut state = loaded_state(server.clone());

    let first = state.comments().to_vec();

    state.list_all();

    let request_id = list_requests(&state.take_pending_effects())[0];

    state.handle_event(Event::CommentsListed {
      request_id,
      result: Ok(server.clone()),
    });

    assert_eq!(first, server);
    assert_eq!(state.comments(), first.as_slice());
  }

  #[test]
  fn stale_list_response_is_dropped() {
    let mut state = loaded_state(Vec::new());

    state.list_all();
    state.list_all();

    let requests = list_requests(&state.take_pending_effects());

    assert_eq!(requests.len(), 2);

    state.handle_event(Event::CommentsListed {
      request_id: requests[1],
      result: Ok(vec![comment("2", "new", 0)]),
    });

    state.handle_event(Event::CommentsListed {
      request_id: requests[0],
      result: Ok(vec![comment("1", "stale", 0)]),
    });

    assert_eq!(state.comments(), &[comment("2", "new", 0)]);
  }

  #[test]
  fn submitting_clears_input_before_response() {
    let mut state = loaded_state(vec![comment("1", "A", 2)]);

    state.dispatch_command(Command::StartComposing);

    for ch in "hi".chars() {
      let command = state.compose_command(key(KeyCode::Char(ch)));
      assert_eq!(command, Some(Command::None));
    }

    assert_eq!(state.input().as_str(), "hi");

    let command = state
      .compose_command(key(KeyCode::Enter))
      .expect("input is focused");

    let dispatch = state.dispatch_command(command);

    assert_eq!(state.input().as_str(), "");
    assert_eq!(
      dispatch.effects,
      vec![Effect::CreateComment {
        draft: Comment {
          id: None,
          title: "hi".into(),
          upvotes: 0,
        },
      }]
    );

    state.handle_event(Event::CommentCreated {
      result: Ok(comment("5", "hi", 0)),
    });

    assert_eq!(state.comments().len(), 2);
    assert_eq!(state.comments().last(), Some(&comment("5", "hi", 0)));
  }

  #[test]
  fn created_comment_already_listed_is_not_duplicated() {
    let mut state = loaded_state(vec![comment("5", "hi", 0)]);

    state.handle_event(Event::CommentCreated {
      result: Ok(comment("5", "hi", 0)),
    });

    assert_eq!(state.comments(), &[comment("5", "hi", 0)]);
  }

  #[test]
  fn failed_create_leaves_list_and_reports() {
    let mut state = loaded_state(vec![comment("1", "A", 2)]);

    state.handle_event(Event::CommentCreated {
      result: Err(server_error()),
    });

    assert_eq!(state.comments(), &[comment("1", "A", 2)]);
    assert!(state.message().starts_with("Could not add comment:"));
  }

  #[test]
  fn upvote_uses_server_counter() {
    let mut state = loaded_state(vec![comment("1", "A", 3)]);

    let dispatch = state.dispatch_command(Command::UpvoteSelected);

    assert_eq!(
      dispatch.effects,
      vec![Effect::UpvoteComment { id: "1".into() }]
    );

    assert_eq!(state.comments()[0].upvotes, 3);

    state.handle_event(Event::CommentUpvoted {
      id: "1".into(),
      result: Ok(7),
    });

    assert_eq!(state.comments()[0].upvotes, 7);
  }

  #[test]
  fn upvote_response_follows_comment_after_reorder() {
    let mut state = loaded_state(vec![comment("1", "A", 0)]);

    state.dispatch_command(Command::UpvoteSelected);

    state.list_all();

    let request_id = list_requests(&state.take_pending_effects())[0];

    state.handle_event(Event::CommentsListed {
      request_id,
      result: Ok(vec![comment("2", "B", 5), comment("1", "A", 0)]),
    });

    state.handle_event(Event::CommentUpvoted {
      id: "1".into(),
      result: Ok(1),
    });

    assert_eq!(
      state.comments(),
      &[comment("2", "B", 5), comment("1", "A", 1)]
    );
  }

  #[test]
  fn unsaved_comments_cannot_be_addressed() {
    let mut state = loaded_state(vec![Comment::draft("pending")]);

    assert!(state.dispatch_command(Command::UpvoteSelected).effects.is_empty());
    assert!(state.dispatch_command(Command::DeleteSelected).effects.is_empty());

    assert_eq!(state.message(), "This comment has not been saved yet");
  }

  #[test]
  fn delete_requests_refresh_without_waiting() {
    let mut state = loaded_state(vec![comment("1", "A", 0)]);

    let dispatch = state.dispatch_command(Command::DeleteSelected);

    assert_eq!(dispatch.effects.len(), 2);
    assert_eq!(dispatch.effects[0], Effect::DeleteComment { id: "1".into() });
    assert_eq!(list_requests(&dispatch.effects).len(), 1);

    assert_eq!(state.comments(), &[comment("1", "A", 0)]);

    state.handle_event(Event::CommentDeleted {
      id: "1".into(),
      result: Ok(()),
    });

    assert!(state.take_pending_effects().is_empty());
  }

  #[test]
  fn failed_delete_reports_without_extra_refresh() {
    let mut state = loaded_state(vec![comment("1", "A", 0)]);

    let dispatch = state.dispatch_command(Command::DeleteSelected);

    assert_eq!(list_requests(&dispatch.effects).len(), 1);

    state.handle_event(Event::CommentDeleted {
      id: "1".into(),
      result: Err(server_error()),
    });

    assert!(state.take_pending_effects().is_empty());
    assert!(state.message().starts_with("Could not delete comment:"));
  }

  #[test]
  fn delete_refresh_landing_early_is_replaced_by_later_one() {
    let mut state = loaded_state(vec![comment("1", "A", 0)]);

    let dispatch = state.dispatch_command(Command::DeleteSelected);
    let early = list_requests(&dispatch.effects)[0];

    state.handle_event(Event::CommentsListed {
      request_id: early,
      result: Ok(vec![comment("1", "A", 0)]),
    });

    let dispatch = state.dispatch_command(Command::Refresh);
    let later = list_requests(&dispatch.effects)[0];

    state.handle_event(Event::CommentsListed {
      request_id: later,
      result: Ok(Vec::new()),
    });

    assert!(state.comments().is_empty());
  }

  #[test]
  fn failed_refresh_keeps_current_list() {
    let mut state = loaded_state(vec![comment("1", "A", 0)]);

    state.list_all();

    let request_id = list_requests(&state.take_pending_effects())[0];

    state.handle_event(Event::CommentsListed {
      request_id,
      result: Err(server_error()),
    });

    assert_eq!(state.comments(), &[comment("1", "A", 0)]);
    assert!(!state.is_loading());
    assert!(state.message().starts_with("Could not load comments:"));
  }

  #[test]
  fn compose_ignores_control_chords_and_escape_keeps_text() {
    let mut state = loaded_state(Vec::new());

    assert_eq!(state.compose_command(key(KeyCode::Char('x'))), None);

    state.dispatch_command(Command::StartComposing);

    assert_eq!(state.message(), COMPOSE_STATUS);

    state.compose_command(key(KeyCode::Char('o')));
    state.compose_command(KeyEvent::new(
      KeyCode::Char('c'),
      KeyModifiers::CONTROL,
    ));
    state.compose_command(key(KeyCode::Char('k')));
    state.compose_command(key(KeyCode::Char('!')));
    state.compose_command(key(KeyCode::Backspace));

    assert_eq!(state.input().as_str(), "ok");

    let command = state.compose_command(key(KeyCode::Esc));

    assert_eq!(command, Some(Command::StopComposing));

    state.dispatch_command(Command::StopComposing);

    assert!(!state.input().is_focused());
    assert_eq!(state.input().as_str(), "ok");
    assert_eq!(state.message(), BROWSE_STATUS);
  }

  #[test]
  fn selection_moves_within_bounds() {
    let mut state = loaded_state(vec![
      comment("1", "A", 0),
      comment("2", "B", 0),
      comment("3", "C", 0),
    ]);

    state.dispatch_command(Command::SelectPrevious);
    assert_eq!(state.comment_view().selected_index(), Some(0));

    state.dispatch_command(Command::SelectLast);
    assert_eq!(state.comment_view().selected_index(), Some(2));

    state.dispatch_command(Command::SelectNext);
    assert_eq!(state.comment_view().selected_index(), Some(2));

    state.dispatch_command(Command::SelectFirst);
    assert_eq!(state.comment_view().selected_index(), Some(0));
  }

  #[test]
  fn failure_behind_help_shows_once_help_closes() {
    let mut state = loaded_state(Vec::new());

    state.dispatch_command(Command::ShowHelp);

    state.handle_event(Event::CommentCreated {
      result: Err(server_error()),
    });

    assert_eq!(state.message(), HELP_STATUS);

    state.dispatch_command(Command::HideHelp);

    assert!(state.message().starts_with("Could not add comment:"));
    assert!(state.deferred_message.is_none());
  }

  #[test]
  fn quit_requests_exit() {
    let mut state = loaded_state(Vec::new());

    let dispatch = state.dispatch_command(Command::Quit);

    assert!(dispatch.should_exit);
    assert!(dispatch.effects.is_empty());
  }
}
