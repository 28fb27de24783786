use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::terminal::{CommandRes, Terminal, HELP_TEXT};

pub const BANNER_TITLE: &str = "=== FILE SYSTEM SIMULATOR ===";
pub const GOODBYE: &str = "Exiting simulator...";

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{BANNER_TITLE}")?;
    writeln!(out, "{HELP_TEXT}")?;
    writeln!(out)
}

/// Runs the read-eval loop until `exit` or end of input, then tears the
/// session down. Returns the number of nodes released.
pub fn run<R: BufRead, W: Write>(
    mut terminal: Terminal,
    mut input: R,
    out: &mut W,
) -> io::Result<usize> {
    let mut buf = Vec::new();

    loop {
        write!(out, "{}", terminal.prompt())?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            // Keep the goodbye off the prompt line.
            writeln!(out)?;
            break;
        }
        // Undecodable bytes become U+FFFD and fall through as an unknown command.
        let line = String::from_utf8_lossy(&buf);

        match terminal.handle_command(&line) {
            CommandRes::Exit => break,
            CommandRes::ChangeDir(_) => {}
            CommandRes::Output {
                stdout_text,
                stderr_text,
                ..
            } => {
                // The simulator reports errors inline, like the rest of its output.
                for text in [stdout_text, stderr_text].into_iter().flatten() {
                    writeln!(out, "{text}")?;
                }
            }
        }
    }

    let released = terminal.shutdown();
    debug!(released, "session closed");
    writeln!(out, "{GOODBYE}")?;
    Ok(released)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transcript(input: &str) -> (String, usize) {
        transcript_bytes(input.as_bytes())
    }

    fn transcript_bytes(input: &[u8]) -> (String, usize) {
        let mut out = Vec::new();
        let released = run(Terminal::default(), input, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), released)
    }

    #[test]
    fn test_exit_stops_reading() {
        let (out, released) = transcript("exit\nmkdir never\n");
        assert_eq!(out, "/> Exiting simulator...\n");
        assert_eq!(released, 1);
    }

    #[test]
    fn test_end_of_input_exits() {
        let (out, released) = transcript("mkdir a\n");
        assert_eq!(out, "/> /> \nExiting simulator...\n");
        assert_eq!(released, 2);
    }

    #[test]
    fn test_errors_are_printed_inline() {
        let (out, _) = transcript("bogus\nrm nothing\nexit\n");
        assert_eq!(
            out,
            "/> Invalid command!\n/> Not found!\n/> Exiting simulator...\n"
        );
    }

    #[test]
    fn test_invalid_utf8_line_is_an_invalid_command() {
        let (out, released) = transcript_bytes(b"mkdir a\n\xff\xfe\nls\nexit\n");
        assert_eq!(
            out,
            "/> /> Invalid command!\n/> a/\n/> Exiting simulator...\n"
        );
        assert_eq!(released, 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (out, _) = transcript("mkdir a\r\nls\r\nexit\r\n");
        assert_eq!(out, "/> /> a/\n/> Exiting simulator...\n");
    }

    #[test]
    fn test_banner() {
        let mut out = Vec::new();
        write_banner(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("\n=== FILE SYSTEM SIMULATOR ===\nCommands:\n"));
        assert!(out.ends_with("leave the simulator\n\n"));
    }
}
