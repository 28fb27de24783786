use indextree::NodeId;

use super::command::{no_operands, Command, CommandRes, VfsCommand};
use super::vfs::NamespaceTree;

pub const HELP_TEXT: &str = r#"Commands:
 mkdir <dir>      create a directory
 touch <file>     create an empty file
 ls               list the current directory
 cd <dir>         enter a directory
 cd ..            go to the parent directory
 pwd              print the current directory
 rm <name>        remove a file or a directory and everything in it
 search <name>    find entries by exact name below the current directory
 rmtmp            delete temporary files everywhere
 help             show this text
 exit             leave the simulator"#;

pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, _args: Vec<&str>) -> CommandRes {
        CommandRes::new().with_stdout_text(HELP_TEXT)
    }
}

pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _args: Vec<&str>) -> CommandRes {
        CommandRes::Exit
    }
}

pub struct PwdCommand;

impl VfsCommand for PwdCommand {
    fn execute(&self, vfs: &mut NamespaceTree, current_dir: NodeId, args: Vec<&str>) -> CommandRes {
        if let Err(res) = no_operands("pwd", &args) {
            return res;
        }
        CommandRes::new().with_stdout_text(vfs.node_path(current_dir))
    }
}
