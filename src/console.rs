//! Line-oriented console shared by the menu loop and its handlers.
//!
//! The console is generic over its input and output so the whole session can
//! be driven from in-memory buffers.
use crate::core::{Result, StudentDbError};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

pub const CONTINUE_PROMPT: &str = "Press Enter to continue...";

pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console over the process's stdin and stdout.
    ///
    /// Screen clearing is only enabled when stdout is a terminal, so piped
    /// output carries no escape sequences.
    pub fn stdio() -> Self {
        let stdout = io::stdout();
        let clear = stdout.is_terminal();
        Console::new(io::stdin().lock(), stdout).with_screen_clearing(clear)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console with screen clearing disabled.
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            clear_screen: false,
        }
    }

    pub fn with_screen_clearing(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    pub fn println(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Prints `message` without a newline and reads one line of input.
    ///
    /// The line terminator is stripped; everything else is returned as typed.
    ///
    /// # Errors
    ///
    /// `StudentDbError::InputClosed` when the input has no more lines.
    pub fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(StudentDbError::InputClosed);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    /// Blocks until the user presses Enter.
    pub fn pause(&mut self) -> Result<()> {
        self.prompt(CONTINUE_PROMPT).map(|_| ())
    }

    /// Direct access to the output, for writers that stream rows.
    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_strips_line_terminators() {
        let mut console = console("first\r\nsecond\nthird");
        assert_eq!(console.prompt("> ").unwrap(), "first");
        assert_eq!(console.prompt("> ").unwrap(), "second");
        assert_eq!(console.prompt("> ").unwrap(), "third");
        assert!(matches!(console.prompt("> "), Err(StudentDbError::InputClosed)));
    }

    #[test]
    fn test_prompt_keeps_inner_whitespace() {
        let mut console = console("  Mary Ann \n\n");
        assert_eq!(console.prompt("").unwrap(), "  Mary Ann ");
        assert_eq!(console.prompt("").unwrap(), "");
    }

    #[test]
    fn test_prompt_writes_message() {
        let mut console = console("x\n");
        console.prompt("Enter first name: ").unwrap();
        console.println("done").unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out, "Enter first name: done\n");
    }

    #[test]
    fn test_clear_screen_only_when_enabled() {
        let mut plain = console("");
        plain.clear_screen().unwrap();
        assert!(plain.into_output().is_empty());

        let mut clearing = console("").with_screen_clearing(true);
        clearing.clear_screen().unwrap();
        assert!(!clearing.into_output().is_empty());
    }
}
