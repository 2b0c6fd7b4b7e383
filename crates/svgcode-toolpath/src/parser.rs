//! Path-data parser
//!
//! Turns one path-data string into an ordered list of [`DrawCommand`]s.
//! Repeated operand groups after a single command letter expand into
//! repeated commands of that kind; extra pairs after a moveto become
//! implicit linetos, as the path grammar requires.

use svgcode_core::{CommandKind, DrawCommand, ParseError, Point};

/// Parse a path-data string
///
/// An empty (or whitespace-only) string yields no commands. Any other
/// input must start with a moveto.
pub fn parse_path_data(data: &str) -> Result<Vec<DrawCommand>, ParseError> {
    PathCommandParser::new(data).parse()
}

/// Cursor over the bytes of a path-data string
#[derive(Debug)]
pub struct PathCommandParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PathCommandParser<'a> {
    /// Create a parser over `data`
    pub fn new(data: &'a str) -> Self {
        Self {
            bytes: data.as_bytes(),
            pos: 0,
        }
    }

    /// Parse the whole string
    pub fn parse(mut self) -> Result<Vec<DrawCommand>, ParseError> {
        let mut commands = Vec::new();

        self.skip_separators();
        while let Some(byte) = self.peek() {
            let position = self.pos;
            if !byte.is_ascii_alphabetic() {
                return Err(ParseError::malformed(
                    position,
                    format!("expected command letter, found '{}'", byte as char),
                ));
            }
            self.pos += 1;

            let letter = byte as char;
            let relative = letter.is_ascii_lowercase();
            let mut code = letter.to_ascii_uppercase();

            if commands.is_empty() && code != 'M' {
                return Err(ParseError::malformed(
                    position,
                    "path data must begin with a moveto",
                ));
            }

            match code {
                'Z' => {
                    commands.push(DrawCommand::new(CommandKind::ClosePath, relative, None, None));
                    self.skip_separators();
                    continue;
                }
                'M' | 'L' | 'H' | 'V' | 'C' | 'Q' | 'S' | 'T' | 'A' => {}
                _ => {
                    return Err(ParseError::UnknownCommand {
                        position,
                        code: letter,
                    })
                }
            }

            loop {
                commands.push(self.parse_operands(code, relative)?);
                if code == 'M' {
                    code = 'L';
                }
                self.skip_separators();
                if !self.at_number_start() {
                    break;
                }
            }
        }

        Ok(commands)
    }

    fn parse_operands(&mut self, code: char, relative: bool) -> Result<DrawCommand, ParseError> {
        let command = match code {
            'M' => {
                let to = self.point()?;
                DrawCommand::to_point(CommandKind::MoveTo, relative, to.x, to.y)
            }
            'L' => {
                let to = self.point()?;
                DrawCommand::to_point(CommandKind::LineTo, relative, to.x, to.y)
            }
            'H' => {
                let x = self.number()?;
                DrawCommand::new(CommandKind::HorizontalLineTo, relative, Some(x), None)
            }
            'V' => {
                let y = self.number()?;
                DrawCommand::new(CommandKind::VerticalLineTo, relative, None, Some(y))
            }
            'C' => {
                let ctrl1 = self.point()?;
                let ctrl2 = self.point()?;
                let to = self.point()?;
                DrawCommand::to_point(CommandKind::CurveTo { ctrl1, ctrl2 }, relative, to.x, to.y)
            }
            'Q' => {
                let ctrl = self.point()?;
                let to = self.point()?;
                DrawCommand::to_point(CommandKind::QuadraticCurveTo { ctrl }, relative, to.x, to.y)
            }
            'S' => {
                let ctrl2 = self.point()?;
                let to = self.point()?;
                DrawCommand::to_point(
                    CommandKind::SmoothCurveTo { ctrl1: None, ctrl2 },
                    relative,
                    to.x,
                    to.y,
                )
            }
            'T' => {
                let to = self.point()?;
                DrawCommand::to_point(
                    CommandKind::SmoothQuadraticCurveTo { ctrl: None },
                    relative,
                    to.x,
                    to.y,
                )
            }
            'A' => {
                let rx = self.number()?;
                let ry = self.number()?;
                let x_axis_rotation = self.number()?;
                let large_arc = self.flag()?;
                let sweep = self.flag()?;
                let to = self.point()?;
                DrawCommand::to_point(
                    CommandKind::EllipticalArc {
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                    },
                    relative,
                    to.x,
                    to.y,
                )
            }
            _ => unreachable!("command letters are checked before operands are read"),
        };
        Ok(command)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0C' | b',') = self.peek() {
            self.pos += 1;
        }
    }

    fn at_number_start(&self) -> bool {
        matches!(self.peek(), Some(b'0'..=b'9' | b'+' | b'-' | b'.'))
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }

    fn point(&mut self) -> Result<Point, ParseError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(x, y))
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        self.skip_separators();
        let start = self.pos;

        if let Some(b'+' | b'-') = self.peek() {
            self.pos += 1;
        }
        let mut digits = self.skip_digits();
        if let Some(b'.') = self.peek() {
            self.pos += 1;
            digits += self.skip_digits();
        }
        if digits == 0 {
            self.pos = start;
            return Err(self.expected("number"));
        }

        // Exponent only when digits actually follow, so "1e" leaves the 'e' behind.
        if let Some(b'e' | b'E') = self.peek() {
            let mark = self.pos;
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                self.pos = mark;
            }
        }

        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| ParseError::malformed(start, "invalid number"))?;
        let value = text.parse::<f64>().map_err(|e| {
            ParseError::malformed(start, format!("invalid number '{}': {}", text, e))
        })?;
        if !value.is_finite() {
            return Err(ParseError::malformed(
                start,
                format!("number '{}' is out of range", text),
            ));
        }
        Ok(value)
    }

    fn flag(&mut self) -> Result<bool, ParseError> {
        self.skip_separators();
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.expected("arc flag (0 or 1)")),
        }
    }

    fn expected(&self, what: &str) -> ParseError {
        match self.peek() {
            Some(byte) => ParseError::malformed(
                self.pos,
                format!("expected {}, found '{}'", what, byte as char),
            ),
            None => ParseError::malformed(
                self.pos,
                format!("expected {}, found end of path data", what),
            ),
        }
    }
}
