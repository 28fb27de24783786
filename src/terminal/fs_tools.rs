use indextree::NodeId;

use super::command::{no_operands, single_operand, CommandRes, VfsCommand};
use super::vfs::{DirListing, NamespaceTree, VfsError, SEPARATOR};

pub const EMPTY_DIRECTORY: &str = "[Empty Directory]";

pub struct MkdirCommand;

impl VfsCommand for MkdirCommand {
    fn execute(&self, vfs: &mut NamespaceTree, current_dir: NodeId, args: Vec<&str>) -> CommandRes {
        let name = match single_operand("mkdir", &args) {
            Ok(name) => name,
            Err(res) => return res,
        };
        match vfs.create_directory(current_dir, name) {
            Ok(_) => CommandRes::new(),
            Err(VfsError::AlreadyExists) => CommandRes::error("Directory already exists!"),
            Err(err) => CommandRes::error(format!("mkdir: {err}")),
        }
    }
}

pub struct TouchCommand;

impl VfsCommand for TouchCommand {
    fn execute(&self, vfs: &mut NamespaceTree, current_dir: NodeId, args: Vec<&str>) -> CommandRes {
        let name = match single_operand("touch", &args) {
            Ok(name) => name,
            Err(res) => return res,
        };
        match vfs.create_file(current_dir, name) {
            Ok(_) => CommandRes::new(),
            Err(VfsError::AlreadyExists) => CommandRes::error("File already exists!"),
            Err(err) => CommandRes::error(format!("touch: {err}")),
        }
    }
}

pub struct LsCommand;

impl VfsCommand for LsCommand {
    fn execute(&self, vfs: &mut NamespaceTree, current_dir: NodeId, args: Vec<&str>) -> CommandRes {
        if let Err(res) = no_operands("ls", &args) {
            return res;
        }
        match vfs.list_directory(current_dir) {
            Ok(DirListing::Empty) => CommandRes::new().with_stdout_text(EMPTY_DIRECTORY),
            Ok(DirListing::Entries(entries)) => {
                let stdout_text = entries
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                CommandRes::new().with_stdout_text(stdout_text)
            }
            Err(err) => CommandRes::error(format!("ls: {err}")),
        }
    }
}

pub struct CdCommand;

impl CdCommand {
    fn target(vfs: &NamespaceTree, current_dir: NodeId, arg: &str) -> Result<NodeId, VfsError> {
        if !arg.contains(SEPARATOR) {
            return vfs.change_dir(current_dir, arg);
        }
        let target = vfs.resolve_path(current_dir, arg)?;
        match vfs.get_node(target) {
            Some(node) if node.is_directory() => Ok(target),
            Some(_) => Err(VfsError::NotADirectory),
            None => Err(VfsError::NotFound),
        }
    }
}

impl VfsCommand for CdCommand {
    fn execute(&self, vfs: &mut NamespaceTree, current_dir: NodeId, args: Vec<&str>) -> CommandRes {
        let arg = match single_operand("cd", &args) {
            Ok(arg) => arg,
            Err(res) => return res,
        };
        match Self::target(vfs, current_dir, arg) {
            Ok(target) => CommandRes::ChangeDir(target),
            Err(_) => CommandRes::error("No such directory!"),
        }
    }
}

pub struct RmCommand;

impl VfsCommand for RmCommand {
    fn execute(&self, vfs: &mut NamespaceTree, current_dir: NodeId, args: Vec<&str>) -> CommandRes {
        let name = match single_operand("rm", &args) {
            Ok(name) => name,
            Err(res) => return res,
        };
        match vfs.remove(current_dir, name) {
            Ok(()) => CommandRes::new(),
            Err(VfsError::NotFound) => CommandRes::error("Not found!"),
            Err(err) => CommandRes::error(format!("rm: {err}")),
        }
    }
}

pub struct SearchCommand;

impl VfsCommand for SearchCommand {
    fn execute(&self, vfs: &mut NamespaceTree, current_dir: NodeId, args: Vec<&str>) -> CommandRes {
        let name = match single_operand("search", &args) {
            Ok(name) => name,
            Err(res) => return res,
        };
        match vfs.search(current_dir, name) {
            Ok(paths) if paths.is_empty() => CommandRes::new(),
            Ok(paths) => CommandRes::new().with_stdout_text(paths.join("\n")),
            Err(err) => CommandRes::error(format!("search: {err}")),
        }
    }
}

/// Purges matching files from the whole tree, whatever the current directory.
pub struct RmTmpCommand {
    suffix: String,
}

impl RmTmpCommand {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl VfsCommand for RmTmpCommand {
    fn execute(
        &self,
        vfs: &mut NamespaceTree,
        _current_dir: NodeId,
        args: Vec<&str>,
    ) -> CommandRes {
        if let Err(res) = no_operands("rmtmp", &args) {
            return res;
        }
        let root = vfs.get_root();
        match vfs.purge_by_suffix(root, &self.suffix) {
            Ok(purged) => {
                let mut lines: Vec<String> = purged
                    .iter()
                    .map(|file| format!("Deleting temp file: {}", file.name))
                    .collect();
                lines.push(format!(
                    "All temporary ({}) files removed successfully.",
                    self.suffix
                ));
                CommandRes::new().with_stdout_text(lines.join("\n"))
            }
            Err(err) => CommandRes::error(format!("rmtmp: {err}")),
        }
    }
}
