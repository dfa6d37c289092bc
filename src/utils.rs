use super::*;

pub(crate) fn format_upvotes(upvotes: u64) -> String {
  match upvotes {
    1 => "1 upvote".to_string(),
    _ => format!("{upvotes} upvotes"),
  }
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with an
/// ellipsis.
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  match text.char_indices().nth(max_chars) {
    Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
    None => text.to_string(),
  }
}

/// Greedy word wrap. Words wider than `width` are split across lines and runs
/// of whitespace collapse to a single space.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let width = width.max(1);

  let mut lines = Vec::new();
  let mut line = String::new();
  let mut line_width = 0;

  for word in text.split_whitespace() {
    let mut word = word;
    let mut word_width = word.chars().count();

    if line_width > 0 && line_width + 1 + word_width > width {
      lines.push(mem::take(&mut line));
      line_width = 0;
    }

    while word_width > width {
      if line_width > 0 {
        lines.push(mem::take(&mut line));
        line_width = 0;
      }

      let cut = word
        .char_indices()
        .nth(width)
        .map_or(word.len(), |(index, _)| index);

      lines.push(word[..cut].to_string());
      word = &word[cut..];
      word_width -= width;
    }

    if word.is_empty() {
      continue;
    }

    if line_width > 0 {
      line.push(' ');
      line_width += 1;
    }

    line.push_str(word);
    line_width += word_width;
  }

  if line_width > 0 {
    lines.push(line);
  }

  lines
}
