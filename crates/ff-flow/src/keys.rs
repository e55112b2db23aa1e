//! Line commands typed at the test prompt.

/// One parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// `1`–`4`, stored zero-based.
    Select(usize),
    /// An empty line.
    Enter,
    /// `b` or `p`.
    Back,
    /// `g N`, stored zero-based.
    Jump(usize),
    Submit,
    Quit,
    Help,
}

pub const HELP: &str = "\
  1-4    select (or toggle) an option
  enter  next question, or submit on the last one
  b, p   previous question
  g N    go to question N
  s      submit
  q      quit without submitting
  ?      this help";

impl KeyCommand {
    /// Parse a line. Unknown input gives `None`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "" => return Some(Self::Enter),
            "b" | "p" => return Some(Self::Back),
            "s" => return Some(Self::Submit),
            "q" => return Some(Self::Quit),
            "?" | "h" => return Some(Self::Help),
            "1" | "2" | "3" | "4" => {
                return line.parse::<usize>().ok().map(|n| Self::Select(n - 1));
            }
            _ => {}
        }
        let target = line.strip_prefix('g')?.trim();
        match target.parse::<usize>() {
            Ok(n) if n >= 1 => Some(Self::Jump(n - 1)),
            _ => None,
        }
    }
}
