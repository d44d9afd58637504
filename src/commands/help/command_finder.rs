use crate::{Data, Error};

type Command = poise::Command<Data, Error>;

pub struct CommandInfo<'a> {
    pub command: &'a Command,
    pub subcommand: Option<&'a Command>,
}

impl CommandInfo<'_> {
    /// The command whose details should be shown
    pub fn target(&self) -> &Command {
        self.subcommand.unwrap_or(self.command)
    }

    pub fn full_name(&self) -> String {
        match self.subcommand {
            Some(sub) => format!("{} {}", self.command.name, sub.name),
            None => self.command.name.clone(),
        }
    }
}

fn answers_to(command: &Command, needle: &str) -> bool {
    command.name.eq_ignore_ascii_case(needle)
        || command
            .aliases
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(needle))
}

/// Top level commands listed in help
pub fn visible(commands: &[Command]) -> impl Iterator<Item = &Command> {
    commands.iter().filter(|command| !command.hide_in_help)
}

/// Every name help can be asked about, subcommands spelled as `parent child`
pub fn all_names(commands: &[Command]) -> Vec<String> {
    let mut names = Vec::new();
    for command in visible(commands) {
        names.push(command.name.clone());
        names.extend(
            command
                .subcommands
                .iter()
                .filter(|sub| !sub.hide_in_help)
                .map(|sub| format!("{} {}", command.name, sub.name)),
        );
    }
    names
}

/// Resolves `name`, `alias`, `parent child` or a bare subcommand name
pub fn find<'a>(commands: &'a [Command], search: &str) -> Option<CommandInfo<'a>> {
    let needle = search.split_whitespace().collect::<Vec<_>>();
    let (first, rest) = needle.split_first()?;

    for command in visible(commands) {
        if !answers_to(command, first) {
            continue;
        }
        let subcommand = match rest.first() {
            Some(sub_name) => Some(
                command
                    .subcommands
                    .iter()
                    .find(|sub| !sub.hide_in_help && answers_to(sub, sub_name))?,
            ),
            None => None,
        };
        return Some(CommandInfo { command, subcommand });
    }

    if rest.is_empty() {
        for command in visible(commands) {
            if let Some(subcommand) = command
                .subcommands
                .iter()
                .find(|sub| !sub.hide_in_help && answers_to(sub, first))
            {
                return Some(CommandInfo {
                    command,
                    subcommand: Some(subcommand),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str, aliases: &[&str], subcommands: Vec<Command>) -> Command {
        Command {
            name: name.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            subcommands,
            ..Default::default()
        }
    }

    fn registry() -> Vec<Command> {
        let mut secret = command("leaveguild", &[], Vec::new());
        secret.hide_in_help = true;
        vec![
            command("8ball", &[], Vec::new()),
            command(
                "tag",
                &[],
                vec![command("create", &[], Vec::new()), command("all", &[], Vec::new())],
            ),
            command("urbandictionary", &["urban", "def"], Vec::new()),
            secret,
        ]
    }

    #[test]
    fn finds_by_name_alias_and_path() {
        let commands = registry();
        let full_name = |search: &str| find(&commands, search).map(|info| info.full_name());
        assert_eq!(full_name("URBAN").as_deref(), Some("urbandictionary"));
        assert_eq!(full_name("tag  create").as_deref(), Some("tag create"));
        assert_eq!(full_name("all").as_deref(), Some("tag all"));
        assert!(find(&commands, "tag missing").is_none());
        assert!(find(&commands, "leaveguild").is_none());
    }

    #[test]
    fn names_include_subcommands_but_not_hidden_commands() {
        assert_eq!(
            all_names(&registry()),
            vec!["8ball", "tag", "tag create", "tag all", "urbandictionary"]
        );
    }
}
