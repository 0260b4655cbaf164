/// Operator that connects a segment to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    None,     // first segment
    And,      // &&
    Or,       // ||
    Sequence, // ;
}

impl Connector {
    /// Short-circuit test against the status of the previous segment.
    pub fn should_run(self, last_status: i32) -> bool {
        match self {
            Connector::None | Connector::Sequence => true,
            Connector::And => last_status == 0,
            Connector::Or => last_status != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub connector: Connector,
}

impl Segment {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Splits a line on `&&`, `||` and `;`. A lone `&` or `|` is kept as text.
/// Empty segments (from leading, trailing or doubled operators) are kept so
/// the caller can skip them without touching the status.
pub fn split_logical(input: &str) -> Vec<Segment> {
    let input = strip_comment(input);
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut connector = Connector::None;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        let next = match c {
            '&' if chars.peek() == Some(&'&') => Connector::And,
            '|' if chars.peek() == Some(&'|') => Connector::Or,
            ';' => Connector::Sequence,
            _ => {
                current.push(c);
                continue;
            }
        };
        if next != Connector::Sequence {
            chars.next(); // second character of the operator
        }

        segments.push(Segment {
            text: std::mem::take(&mut current),
            connector,
        });
        connector = next;
    }

    segments.push(Segment {
        text: current,
        connector,
    });
    segments
}

/// Drops everything from a `#` that starts a word.
fn strip_comment(line: &str) -> &str {
    let mut prev_blank = true;
    for (i, c) in line.char_indices() {
        if c == '#' && prev_blank {
            return &line[..i];
        }
        prev_blank = c == ' ' || c == '\t';
    }
    line
}
