mod command;
mod fs_tools;
mod simple_tools;
pub mod vfs;

pub use command::{Cmd, CommandRes};
pub use simple_tools::HELP_TEXT;

use std::collections::HashMap;

use command::{Command, VfsCommand};
use fs_tools::{
    CdCommand, LsCommand, MkdirCommand, RmCommand, RmTmpCommand, SearchCommand, TouchCommand,
};
use indextree::NodeId;
use simple_tools::{ExitCommand, HelpCommand, PwdCommand};
use tracing::{trace, warn};
use vfs::NamespaceTree;

use crate::config::SimulatorConfig;

/// One simulator session: the tree, the current directory and the command
/// table.
pub struct Terminal {
    commands: HashMap<Cmd, Box<dyn Command>>,
    vfs_commands: HashMap<Cmd, Box<dyn VfsCommand>>,
    vfs: NamespaceTree,
    cursor: NodeId,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new(&SimulatorConfig::default())
    }
}

impl Terminal {
    pub fn new(config: &SimulatorConfig) -> Self {
        let vfs = NamespaceTree::new(config.limits);
        let cursor = vfs.get_root();

        let mut terminal = Self {
            commands: HashMap::new(),
            vfs_commands: HashMap::new(),
            vfs,
            cursor,
        };

        terminal.initialize_commands();
        terminal.initialize_vfs_commands(&config.purge_suffix);
        terminal
    }

    fn initialize_commands(&mut self) {
        self.commands.insert(Cmd::Help, Box::new(HelpCommand));
        self.commands.insert(Cmd::Exit, Box::new(ExitCommand));
    }

    fn initialize_vfs_commands(&mut self, purge_suffix: &str) {
        self.vfs_commands.insert(Cmd::MkDir, Box::new(MkdirCommand));
        self.vfs_commands.insert(Cmd::Touch, Box::new(TouchCommand));
        self.vfs_commands.insert(Cmd::Ls, Box::new(LsCommand));
        self.vfs_commands.insert(Cmd::Cd, Box::new(CdCommand));
        self.vfs_commands.insert(Cmd::Pwd, Box::new(PwdCommand));
        self.vfs_commands.insert(Cmd::Rm, Box::new(RmCommand));
        self.vfs_commands.insert(Cmd::Search, Box::new(SearchCommand));
        self.vfs_commands.insert(Cmd::RmTmp, Box::new(RmTmpCommand::new(purge_suffix)));
    }

    pub fn vfs(&self) -> &NamespaceTree {
        &self.vfs
    }

    /// Direct tree access for callers that bypass the command set. The cursor
    /// is re-validated before the next command runs.
    pub fn vfs_mut(&mut self) -> &mut NamespaceTree {
        &mut self.vfs
    }

    pub fn current_dir(&self) -> NodeId {
        self.cursor
    }

    pub fn current_path(&self) -> String {
        self.vfs.node_path(self.cursor)
    }

    pub fn prompt(&self) -> String {
        format!("{}> ", self.current_path())
    }

    /// Falls back to the root when the cursor's directory has been removed.
    fn ensure_cursor(&mut self) {
        if !self.vfs.is_live(self.cursor) {
            warn!("current directory was removed, returning to root");
            self.cursor = self.vfs.get_root();
        }
    }

    pub fn handle_command(&mut self, input: &str) -> CommandRes {
        self.ensure_cursor();

        let mut parts = input.split_whitespace();
        let Some(cmd_text) = parts.next() else {
            return CommandRes::new();
        };
        let cmd = Cmd::from(cmd_text);
        trace!(?cmd, input, "dispatching command");

        let res = if let Some(vfs_command) = self.vfs_commands.get(&cmd) {
            vfs_command.execute(&mut self.vfs, self.cursor, parts.collect())
        } else if let Some(command) = self.commands.get(&cmd) {
            command.execute(parts.collect())
        } else {
            CommandRes::error("Invalid command!")
        };

        if let CommandRes::ChangeDir(target) = res {
            self.cursor = target;
        }
        self.ensure_cursor();
        res
    }

    /// Ends the session, releasing the tree. Returns the number of nodes freed.
    pub fn shutdown(self) -> usize {
        self.vfs.teardown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(terminal: &mut Terminal, input: &str) -> CommandRes {
        terminal.handle_command(input)
    }

    #[test]
    fn test_starts_at_root() {
        let terminal = Terminal::default();
        assert_eq!(terminal.current_dir(), terminal.vfs().get_root());
        assert_eq!(terminal.prompt(), "/> ");
    }

    #[test]
    fn test_cd_moves_cursor() {
        let mut terminal = Terminal::default();
        run(&mut terminal, "mkdir docs");
        run(&mut terminal, "cd docs");
        assert_eq!(terminal.prompt(), "/docs/> ");

        run(&mut terminal, "cd ..");
        assert_eq!(terminal.current_path(), "/");
    }

    #[test]
    fn test_failed_cd_keeps_cursor() {
        let mut terminal = Terminal::default();
        run(&mut terminal, "mkdir docs");
        run(&mut terminal, "touch file");
        run(&mut terminal, "cd docs");
        let before = terminal.current_dir();

        let res = run(&mut terminal, "cd nonexistent");
        assert_eq!(res.stderr_text(), Some("No such directory!"));
        assert_eq!(terminal.current_dir(), before);

        run(&mut terminal, "cd ..");
        run(&mut terminal, "cd file");
        assert_eq!(terminal.current_path(), "/");
    }

    #[test]
    fn test_invalid_and_empty_input() {
        let mut terminal = Terminal::default();
        assert_eq!(run(&mut terminal, "   "), CommandRes::new());
        assert_eq!(
            run(&mut terminal, "format c:").stderr_text(),
            Some("Invalid command!")
        );
        assert_eq!(run(&mut terminal, "exit"), CommandRes::Exit);
    }

    #[test]
    fn test_extra_whitespace_is_ignored() {
        let mut terminal = Terminal::default();
        run(&mut terminal, "  mkdir\t docs  ");
        assert_eq!(run(&mut terminal, "ls").stdout_text(), Some("docs/"));
    }

    #[test]
    fn test_dangling_cursor_resets_to_root() {
        let mut terminal = Terminal::default();
        run(&mut terminal, "mkdir a");
        run(&mut terminal, "cd a");
        run(&mut terminal, "mkdir b");
        run(&mut terminal, "cd b");
        assert_eq!(terminal.current_path(), "/a/b/");

        // Remove an ancestor of the cursor behind the terminal's back
        let root = terminal.vfs().get_root();
        terminal.vfs_mut().remove(root, "a").unwrap();

        // Refill the freed arena slots before the next command runs
        let stale = terminal.current_dir();
        let c = terminal.vfs_mut().create_directory(root, "c").unwrap();
        let d = terminal.vfs_mut().create_directory(c, "d").unwrap();
        assert_ne!(c, stale);
        assert_ne!(d, stale);
        assert!(!terminal.vfs().is_live(stale));

        assert_eq!(run(&mut terminal, "pwd").stdout_text(), Some("/"));
        assert_eq!(terminal.current_dir(), root);
        assert_eq!(run(&mut terminal, "ls").stdout_text(), Some("c/"));
    }

    #[test]
    fn test_configured_purge_suffix() {
        let config = SimulatorConfig {
            purge_suffix: ".bak".to_string(),
            ..Default::default()
        };
        let mut terminal = Terminal::new(&config);
        run(&mut terminal, "touch old.bak");
        run(&mut terminal, "touch keep.tmp");

        let res = run(&mut terminal, "rmtmp");
        assert_eq!(
            res.stdout_text(),
            Some("Deleting temp file: old.bak\nAll temporary (.bak) files removed successfully.")
        );
        assert_eq!(run(&mut terminal, "ls").stdout_text(), Some("keep.tmp"));
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut terminal = Terminal::default();
        run(&mut terminal, "mkdir a");
        run(&mut terminal, "cd a");
        run(&mut terminal, "touch b");
        assert_eq!(terminal.shutdown(), 3);
    }
}
