use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn comment_list_item(comment: &Comment, available_width: u16) -> ListItem {
    let prefix_width = BASE_INDENT.chars().count();

    let wrap_width = (available_width as usize)
      .saturating_sub(prefix_width)
      .max(1);

    let mut lines = wrap_text(&comment.title, wrap_width)
      .into_iter()
      .map(|line| {
        Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::styled(line, Style::default().fg(Color::White)),
        ])
      })
      .collect::<Vec<_>>();

    if lines.is_empty() {
      lines.push(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled("(untitled)", Style::default().fg(Color::DarkGray)),
      ]));
    }

    let mut detail = format_upvotes(comment.upvotes);

    if comment.id.is_none() {
      detail.push_str(" • unsaved");
    }

    lines.push(Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::styled(detail, Style::default().fg(Color::DarkGray)),
    ]));

    lines.push(Line::from(Span::raw(BASE_INDENT)));

    ListItem::new(lines)
  }

  fn deliver(sender: &UnboundedSender<Event>, event: Event) {
    if sender.send(event).is_err() {
      debug!("event loop closed, dropping completed request");
    }
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(layout[1].height as usize);

    let count = self.state.comments().len();

    let mut header = vec![Span::styled(
      "COMMENTS",
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )];

    header.push(Span::styled(
      format!(" {count}"),
      Style::default().fg(Color::DarkGray),
    ));

    if self.state.is_loading() {
      header.push(Span::styled(
        " • refreshing",
        Style::default().fg(Color::DarkGray),
      ));
    }

    frame.render_widget(Paragraph::new(Line::from(header)), layout[0]);

    let view = self.state.comment_view();

    let list_items: Vec<ListItem> = if view.is_empty() {
      let text = if self.state.is_loading() {
        LOADING_COMMENTS_STATUS
      } else {
        "No comments yet. Press a to add one."
      };

      vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw(text),
      ]))]
    } else {
      view
        .items()
        .iter()
        .map(|comment| Self::comment_list_item(comment, layout[1].width))
        .collect()
    };

    let mut list_state = ListState::default()
      .with_selected(view.selected_index())
      .with_offset(view.offset());

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self.state.set_offset(list_state.offset());

    let input = self.state.input();

    let border_style = if input.is_focused() {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    let input_widget = Paragraph::new(input.as_str()).block(
      Block::default()
        .title("New comment")
        .borders(Borders::ALL)
        .border_style(border_style),
    );

    frame.render_widget(input_widget, layout[2]);

    if input.is_focused() && !self.state.help_is_visible() {
      let typed = u16::try_from(input.as_str().chars().count())
        .unwrap_or(u16::MAX);

      let max_x = layout[2].x + layout[2].width.saturating_sub(2);

      frame.set_cursor_position((
        (layout[2].x + 1).saturating_add(typed).min(max_x),
        layout[2].y + 1,
      ));
    }

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[3]);

    self.state.help().draw(frame);
  }

  fn execute_effect(&self, effect: Effect) {
    debug!(?effect, "executing effect");

    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    match effect {
      Effect::CreateComment { draft } => {
        self.handle.spawn(async move {
          let result = client.create(&draft).await;
          Self::deliver(&sender, Event::CommentCreated { result });
        });
      }
      Effect::DeleteComment { id } => {
        self.handle.spawn(async move {
          let result = client.delete(&id).await;
          Self::deliver(&sender, Event::CommentDeleted { id, result });
        });
      }
      Effect::ListComments { request_id } => {
        self.handle.spawn(async move {
          let result = client.list().await;
          Self::deliver(&sender, Event::CommentsListed { request_id, result });
        });
      }
      Effect::UpvoteComment { id } => {
        self.handle.spawn(async move {
          let result = client.upvote(&id).await;
          Self::deliver(&sender, Event::CommentUpvoted { id, result });
        });
      }
    }
  }

  pub(crate) fn new(client: Client) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state: State::new(),
    }
  }

  /// Applies finished requests, then starts whatever they asked for next.
  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }

    for effect in self.state.take_pending_effects() {
      self.execute_effect(effect);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let command = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else if let Some(command) = self.state.compose_command(key) {
        command
      } else {
        Command::from_key(key)
      };

      let dispatch = self.state.dispatch_command(command);

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }

      if dispatch.should_exit {
        info!("quitting");
        break;
      }
    }

    Ok(())
  }
}
