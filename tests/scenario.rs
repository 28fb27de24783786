use fs_simulator::config::SimulatorConfig;
use fs_simulator::repl;
use fs_simulator::terminal::vfs::DirListing;
use fs_simulator::terminal::Terminal;
use pretty_assertions::assert_eq;

fn transcript(terminal: Terminal, input: &str) -> String {
    let mut out = Vec::new();
    repl::run(terminal, input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_docs_walkthrough() {
    let input = "mkdir docs\n\
                 touch notes.txt\n\
                 cd docs\n\
                 mkdir temp\n\
                 touch draft.tmp\n\
                 cd ..\n\
                 pwd\n\
                 ls\n\
                 rmtmp\n\
                 cd docs\n\
                 ls\n\
                 exit\n";

    let expected = "/> /> /> /docs/> /docs/> /docs/> \
                    /> /\n\
                    /> docs/\nnotes.txt\n\
                    /> Deleting temp file: draft.tmp\n\
                    All temporary (.tmp) files removed successfully.\n\
                    /> \
                    /docs/> temp/\n\
                    /docs/> Exiting simulator...\n";

    assert_eq!(transcript(Terminal::default(), input), expected);
}

#[test]
fn test_search_from_cursor() {
    let input = "mkdir a\n\
                 mkdir b\n\
                 cd a\n\
                 touch x\n\
                 cd ..\n\
                 cd b\n\
                 mkdir x\n\
                 cd x\n\
                 touch x\n\
                 cd /\n\
                 search x\n\
                 cd b\n\
                 search x\n\
                 search nothing\n\
                 exit\n";

    let expected = "/> /> /> /a/> /a/> /> /b/> /b/> /b/x/> /b/x/> \
                    /> /a/x/\n/b/x/\n/b/x/x/\n\
                    /> \
                    /b/> /b/x/\n/b/x/x/\n\
                    /b/> \
                    /b/> Exiting simulator...\n";

    assert_eq!(transcript(Terminal::default(), input), expected);
}

#[test]
fn test_rm_directory_and_listing() {
    let input = "mkdir keep\n\
                 mkdir gone\n\
                 cd gone\n\
                 touch inner\n\
                 cd ..\n\
                 rm gone\n\
                 ls\n\
                 rm keep\n\
                 ls\n\
                 exit\n";

    let expected = "/> /> /> /gone/> /gone/> /> \
                    /> keep/\n\
                    /> \
                    /> [Empty Directory]\n\
                    /> Exiting simulator...\n";

    assert_eq!(transcript(Terminal::default(), input), expected);
}

#[test]
fn test_limits_from_config() {
    let mut config = SimulatorConfig::default();
    config.limits.max_name_len = 4;
    config.limits.max_nodes = 2;
    let mut terminal = Terminal::new(&config);

    assert_eq!(
        terminal.handle_command("mkdir toolong").stderr_text(),
        Some("mkdir: name too long (7 bytes, max 4)")
    );
    assert!(!terminal.handle_command("mkdir ok").is_error());
    assert_eq!(
        terminal.handle_command("touch f").stderr_text(),
        Some("touch: node capacity exhausted (2 nodes)")
    );

    let root = terminal.vfs().get_root();
    match terminal.vfs().list_directory(root).unwrap() {
        DirListing::Entries(entries) => assert_eq!(entries.len(), 1),
        DirListing::Empty => panic!("expected the directory created before the limit"),
    }
}
