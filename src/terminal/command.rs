use indextree::NodeId;

use super::vfs::NamespaceTree;

/// Commands that act on the tree relative to the current directory.
pub trait VfsCommand {
    fn execute(&self, vfs: &mut NamespaceTree, current_dir: NodeId, args: Vec<&str>) -> CommandRes;
}

/// Commands that need no filesystem access.
pub trait Command {
    fn execute(&self, args: Vec<&str>) -> CommandRes;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRes {
    Output {
        is_err: bool,
        stdout_text: Option<String>,
        stderr_text: Option<String>,
    },
    /// Move the cursor to this directory.
    ChangeDir(NodeId),
    Exit,
}

impl Default for CommandRes {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRes {
    /// Create a new empty CommandRes with default values
    pub fn new() -> Self {
        Self::Output {
            is_err: false,
            stdout_text: None,
            stderr_text: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new().with_error().with_stderr(text)
    }

    pub fn with_error(mut self) -> Self {
        if let Self::Output { is_err, .. } = &mut self {
            *is_err = true
        }
        self
    }

    pub fn with_stderr(mut self, text: impl Into<String>) -> Self {
        if let Self::Output { stderr_text, .. } = &mut self {
            *stderr_text = Some(text.into());
        }
        self
    }

    pub fn with_stdout_text(mut self, text: impl Into<String>) -> Self {
        if let Self::Output { stdout_text, .. } = &mut self {
            *stdout_text = Some(text.into())
        }
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Output { is_err: true, .. })
    }

    pub fn stdout_text(&self) -> Option<&str> {
        match self {
            Self::Output { stdout_text, .. } => stdout_text.as_deref(),
            _ => None,
        }
    }

    pub fn stderr_text(&self) -> Option<&str> {
        match self {
            Self::Output { stderr_text, .. } => stderr_text.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cmd {
    Help,
    MkDir,
    Touch,
    Ls,
    Cd,
    Pwd,
    Rm,
    Search,
    RmTmp,
    Exit,
    Unknown,
}

impl From<&str> for Cmd {
    fn from(value: &str) -> Self {
        match value {
            "help" => Self::Help,
            "mkdir" => Self::MkDir,
            "touch" => Self::Touch,
            "ls" => Self::Ls,
            "cd" => Self::Cd,
            "pwd" => Self::Pwd,
            "rm" => Self::Rm,
            "search" => Self::Search,
            "rmtmp" => Self::RmTmp,
            "exit" => Self::Exit,
            _ => Self::Unknown,
        }
    }
}

impl Cmd {
    pub fn all() -> Vec<&'static str> {
        vec![
            "help", "mkdir", "touch", "ls", "cd", "pwd", "rm", "search", "rmtmp", "exit",
        ]
    }
}

/// Exactly one operand, or the error to report.
pub(super) fn single_operand<'a>(cmd: &str, args: &[&'a str]) -> Result<&'a str, CommandRes> {
    match args {
        [] => Err(CommandRes::error(format!("{cmd}: missing operand"))),
        [operand] => Ok(*operand),
        _ => Err(CommandRes::error(format!("{cmd}: too many arguments"))),
    }
}

pub(super) fn no_operands(cmd: &str, args: &[&str]) -> Result<(), CommandRes> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandRes::error(format!("{cmd}: too many arguments")))
    }
}
