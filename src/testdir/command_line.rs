/// The command handed to [`TestDirectory::run`](crate::TestDirectory::run).
///
/// A command is either one shell line or a list of tokens. In shell mode
/// (the default) tokens are joined with single spaces, so variable
/// expansion and operators keep working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    Line(String),
    Args(Vec<String>),
}

impl CommandLine {
    /// The command as one line of text.
    pub fn joined(&self) -> String {
        match self {
            CommandLine::Line(line) => line.clone(),
            CommandLine::Args(args) => args.join(" "),
        }
    }
}

impl From<&str> for CommandLine {
    fn from(line: &str) -> Self {
        CommandLine::Line(line.to_string())
    }
}

impl From<String> for CommandLine {
    fn from(line: String) -> Self {
        CommandLine::Line(line)
    }
}

impl From<&String> for CommandLine {
    fn from(line: &String) -> Self {
        CommandLine::Line(line.clone())
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(args: Vec<String>) -> Self {
        CommandLine::Args(args)
    }
}

impl From<Vec<&str>> for CommandLine {
    fn from(args: Vec<&str>) -> Self {
        CommandLine::Args(args.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for CommandLine {
    fn from(args: &[&str]) -> Self {
        CommandLine::Args(args.iter().map(|arg| arg.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CommandLine {
    fn from(args: [&str; N]) -> Self {
        CommandLine::Args(args.iter().map(|arg| arg.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_join_with_single_spaces() {
        let command = CommandLine::from(["cc", "-o", "app", "main.c"]);
        assert_eq!(command.joined(), "cc -o app main.c");
    }

    #[test]
    fn line_is_kept_verbatim() {
        let command = CommandLine::from("echo $HOME && ls  -l");
        assert_eq!(command.joined(), "echo $HOME && ls  -l");
    }
}
