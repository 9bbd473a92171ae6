use std::io::{self, BufRead, Write};

/// Line-oriented terminal I/O, injectable for tests.
pub trait Console {
    /// Show `prompt` and read one line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Console bound to the process stdin/stdout.
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut out = self.stdout.lock();
        out.write_all(prompt.as_bytes())?;
        out.flush()?;

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        writeln!(out, "{line}")?;
        out.flush()
    }
}
