/// Available commands and autocomplete logic

/// What a command does once submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
  Home,
  NewCars,
  UsedCars,
  /// Open the search box
  Search,
  Quit,
}

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub action: CommandAction,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

/// All available commands
pub const COMMANDS: &[Command] = &[
  Command {
    name: "home",
    action: CommandAction::Home,
    aliases: &["h", "main"],
    description: "Featured new and used cars",
  },
  Command {
    name: "new",
    action: CommandAction::NewCars,
    aliases: &["n", "new_cars"],
    description: "Brand new cars",
  },
  Command {
    name: "used",
    action: CommandAction::UsedCars,
    aliases: &["u", "used_cars"],
    description: "Clean used cars",
  },
  Command {
    name: "search",
    action: CommandAction::Search,
    aliases: &["s", "find"],
    description: "Search by brand, model, or keyword",
  },
  Command {
    name: "quit",
    action: CommandAction::Quit,
    aliases: &["q", "exit"],
    description: "Exit ebucars",
  },
];

/// Get autocomplete suggestions for a given input
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input_lower = input.to_lowercase();

  if input_lower.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&Command, u32)> = Vec::new();

  for cmd in COMMANDS {
    if cmd.name == input_lower {
      matches.push((cmd, 0));
      continue;
    }

    if cmd.aliases.contains(&input_lower.as_str()) {
      matches.push((cmd, 1));
      continue;
    }

    if cmd.name.starts_with(&input_lower) {
      matches.push((cmd, 2));
      continue;
    }

    if cmd.aliases.iter().any(|a| a.starts_with(&input_lower)) {
      matches.push((cmd, 3));
      continue;
    }

    // Fuzzy (contains)
    if cmd.name.contains(&input_lower) {
      matches.push((cmd, 4));
      continue;
    }

    if cmd.aliases.iter().any(|a| a.contains(&input_lower)) {
      matches.push((cmd, 5));
    }
  }

  matches.sort_by_key(|(_, priority)| *priority);

  matches.into_iter().map(|(cmd, _)| cmd).collect()
}

/// Find the command named exactly by `input` (name or alias).
pub fn lookup(input: &str) -> Option<&'static Command> {
  let input = input.trim().to_lowercase();
  COMMANDS
    .iter()
    .find(|cmd| cmd.name == input || cmd.aliases.contains(&input.as_str()))
}
