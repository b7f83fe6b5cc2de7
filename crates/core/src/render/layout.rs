use super::metrics::text_width;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSettings {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub font_size: f64,
    pub line_spacing: f64,
}

impl PageSettings {
    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    pub fn line_advance(&self) -> f64 {
        self.font_size * self.line_spacing
    }

    fn overflows(&self, cursor: f64) -> bool {
        cursor + self.line_advance() > self.height - self.margin
    }
}

impl Default for PageSettings {
    /// A4 portrait, one-inch margins, 12pt text at 1.5 line spacing.
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 72.0,
            font_size: 12.0,
            line_spacing: 1.5,
        }
    }
}

/// A line of text whose baseline sits `y` points below the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

struct Cursor<'a> {
    settings: &'a PageSettings,
    pages: Vec<PageLayout>,
    y: f64,
}

impl<'a> Cursor<'a> {
    fn new(settings: &'a PageSettings) -> Self {
        Self {
            settings,
            pages: vec![PageLayout::default()],
            y: settings.margin,
        }
    }

    fn flush(&mut self, text: String) {
        let line = PlacedLine {
            x: self.settings.margin,
            y: self.y,
            text,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
        self.y += self.settings.line_advance();
    }

    fn break_page_if_full(&mut self) {
        if self.settings.overflows(self.y) {
            self.pages.push(PageLayout::default());
            self.y = self.settings.margin;
        }
    }
}

/// Word-wraps `text` onto fixed-size pages.
///
/// Existing newlines always start a new rendered line. Within a line, words
/// are added while the measured width fits the usable width. The page-full
/// check runs after every wrap and after every source line, including the
/// last one, so a final line that fills a page leaves a blank trailing page.
pub fn layout_pages(text: &str, settings: &PageSettings) -> Vec<PageLayout> {
    let limit = settings.usable_width();
    let mut cursor = Cursor::new(settings);

    for line in source_lines(text) {
        let mut current = String::new();

        for word in line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if text_width(&candidate, settings.font_size) <= limit {
                current = candidate;
            } else {
                let finished = std::mem::replace(&mut current, word.to_string());
                cursor.flush(finished);
                cursor.break_page_if_full();
            }
        }

        if !current.is_empty() {
            cursor.flush(current);
        }
        cursor.break_page_if_full();
    }

    cursor.pages
}

/// Splits on every line boundary `str::lines` misses as well: lone `\r`,
/// vertical tab, form feed, the file/group/record separators, NEL and the
/// Unicode line and paragraph separators. `\r\n` is one break, and a
/// trailing terminator does not produce an extra empty line.
fn source_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..index]);
        start = index + ch.len_utf8();
        if ch == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
