use colored::{ColoredString, Colorize};
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};

/// Line-oriented prompting and colored output over any reader/writer pair.
///
/// The session only talks to the terminal through this type, so tests can
/// drive it with a byte buffer in place of stdin.
pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    /// Clears the terminal, unless disabled
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Reads one line without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Shows `message` and reads the answer
    pub fn prompt(&mut self, message: &str, gap: bool) -> io::Result<Option<String>> {
        self.write(message.cyan(), gap)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn info(&mut self, message: &str, gap: bool) -> io::Result<()> {
        self.write(message.green(), gap)
    }

    pub fn summary(&mut self, message: &str, gap: bool) -> io::Result<()> {
        self.write(message.yellow(), gap)
    }

    pub fn output(&mut self, message: &str) -> io::Result<()> {
        self.write(message.white(), false)
    }

    pub fn error(&mut self, message: &str, gap: bool) -> io::Result<()> {
        self.write(message.red(), gap)?;
        self.output.flush()
    }

    fn write(&mut self, message: ColoredString, gap: bool) -> io::Result<()> {
        if gap {
            writeln!(self.output)?;
        }
        writeln!(self.output, "{}", message)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        colored::control::set_override(false);
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut console = console("first\r\nsecond\n\nlast");
        assert_eq!(console.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn test_read_line_keeps_inner_whitespace() {
        let mut console = console("  spaced term \n");
        assert_eq!(
            console.read_line().unwrap().as_deref(),
            Some("  spaced term ")
        );
    }

    #[test]
    fn test_prompt_writes_message() {
        let mut console = console("answer\n");
        let answer = console.prompt("Question?", true).unwrap();
        assert_eq!(answer.as_deref(), Some("answer"));
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "\nQuestion?\n");
    }

    #[test]
    fn test_clear_disabled_writes_nothing() {
        let mut console = console("");
        console.clear().unwrap();
        assert!(console.into_output().is_empty());
    }
}
