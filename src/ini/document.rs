//! Order-preserving document model.

use std::fmt;

use super::IniError;

/// Name of the section whose keys act as fallbacks for every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Line terminator detected on parse and reused on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// A single `key=value` entry.
///
/// `raw` holds the original source lines until the entry is modified, so
/// untouched entries render exactly as they were read.
#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: String,
    raw: Option<Vec<String>>,
}

impl Entry {
    fn render(&self, out: &mut Vec<String>) {
        if let Some(raw) = &self.raw {
            out.extend(raw.iter().cloned());
            return;
        }

        let mut lines = self.value.split('\n');
        let first = lines.next().unwrap_or_default();
        out.push(format!("{}={first}", self.key));
        out.extend(lines.map(|line| format!("\t{line}")));
    }
}

#[derive(Debug, Clone)]
enum Line {
    Entry(Entry),
    /// Comment or blank line, kept verbatim.
    Other(String),
}

impl Line {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Other(text) if text.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
struct Section {
    name: String,
    header: String,
    lines: Vec<Line>,
}

impl Section {
    fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            Line::Other(_) => None,
        })
    }

    fn find(&self, key: &str) -> Option<&Entry> {
        self.entries().find(|entry| same_key(&entry.key, key))
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.lines.iter_mut().find_map(|line| match line {
            Line::Entry(entry) if same_key(&entry.key, key) => Some(entry),
            _ => None,
        })
    }

    fn ends_with_blank(&self) -> bool {
        self.lines.last().is_some_and(Line::is_blank)
    }

    /// Position right after the last entry, or after the last non-blank line.
    fn insertion_point(&self) -> usize {
        let last_entry = self
            .lines
            .iter()
            .rposition(|line| matches!(line, Line::Entry(_)));
        let last_content = self
            .lines
            .iter()
            .rposition(|line| !line.is_blank());

        last_entry.or(last_content).map_or(0, |idx| idx + 1)
    }
}

fn same_key(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with(';')
}

/// Returns the name of a `[section]` header. Text after the last `]` is
/// ignored, so `[Lab] ; floor 2` names `Lab`.
fn section_header(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix('[')?;
    let name = rest[..rest.rfind(']')?].trim();
    (!name.is_empty()).then_some(name)
}

/// Splits `key=value` / `key: value` at the earliest delimiter.
fn split_entry(trimmed: &str) -> Option<(&str, &str)> {
    let idx = trimmed.find(['=', ':'])?;
    let key = trimmed[..idx].trim_end();
    let value = trimmed[idx + 1..].trim_start();
    Some((key, value))
}

/// A parsed key/value document.
///
/// # Example
///
/// ```
/// use scan_selector::ini::IniDocument;
///
/// let mut doc = IniDocument::parse("[Contents]\nUnit=0\nScannerAddress=10.0.0.1\n").unwrap();
/// assert_eq!(doc.get("Contents", "scanneraddress"), Some("10.0.0.1"));
///
/// doc.set("Contents", "ScannerAddress", "192.168.1.50");
/// assert_eq!(doc.to_string(), "[Contents]\nUnit=0\nScannerAddress=192.168.1.50\n");
/// ```
#[derive(Debug, Clone)]
pub struct IniDocument {
    preamble: Vec<Line>,
    sections: Vec<Section>,
    line_ending: LineEnding,
    trailing_newline: bool,
}

impl IniDocument {
    /// Creates an empty document that renders with `\n` line endings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            preamble: Vec::new(),
            sections: Vec::new(),
            line_ending: LineEnding::Lf,
            trailing_newline: true,
        }
    }

    /// Parses document text.
    ///
    /// A leading UTF-8 byte order mark is ignored.
    ///
    /// # Errors
    ///
    /// Returns an [`IniError`] for entries outside any section, repeated
    /// sections or keys, and lines that cannot be classified.
    pub fn parse(text: &str) -> Result<Self, IniError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut doc = Self::new();
        if text.contains("\r\n") {
            doc.line_ending = LineEnding::CrLf;
        }
        doc.trailing_newline = text.is_empty() || text.ends_with('\n');

        for (idx, line) in text.lines().enumerate() {
            doc.parse_line(idx + 1, line)?;
        }

        Ok(doc)
    }

    fn parse_line(&mut self, number: usize, line: &str) -> Result<(), IniError> {
        let trimmed = line.trim();

        if trimmed.is_empty() || is_comment(trimmed) {
            self.push_other(line);
            return Ok(());
        }

        if line.starts_with(char::is_whitespace) && self.extend_last_entry(line) {
            return Ok(());
        }

        if let Some(name) = section_header(trimmed) {
            if self.section(name).is_some() {
                return Err(IniError::DuplicateSection {
                    name: name.to_string(),
                    line: number,
                });
            }
            self.sections.push(Section {
                name: name.to_string(),
                header: line.to_string(),
                lines: Vec::new(),
            });
            return Ok(());
        }

        let Some((key, value)) = split_entry(trimmed).filter(|(key, _)| !key.is_empty()) else {
            return Err(IniError::Malformed {
                line: number,
                content: trimmed.to_string(),
            });
        };

        let Some(section) = self.sections.last_mut() else {
            return Err(IniError::MissingSectionHeader { line: number });
        };

        if section.find(key).is_some() {
            return Err(IniError::DuplicateKey {
                section: section.name.clone(),
                key: key.to_string(),
                line: number,
            });
        }

        section.lines.push(Line::Entry(Entry {
            key: key.to_string(),
            value: value.to_string(),
            raw: Some(vec![line.to_string()]),
        }));
        Ok(())
    }

    fn push_other(&mut self, line: &str) {
        let target = match self.sections.last_mut() {
            Some(section) => &mut section.lines,
            None => &mut self.preamble,
        };
        target.push(Line::Other(line.to_string()));
    }

    /// Appends an indented line to the entry above it.
    ///
    /// Blank lines between the entry and `line` become empty lines of the
    /// value. Returns `false` when anything else separates them.
    fn extend_last_entry(&mut self, line: &str) -> bool {
        let Some(section) = self.sections.last_mut() else {
            return false;
        };
        let Some(pos) = section.lines.iter().rposition(|line| !line.is_blank()) else {
            return false;
        };
        if !matches!(section.lines[pos], Line::Entry(_)) {
            return false;
        }

        let gap: Vec<Line> = section.lines.drain(pos + 1..).collect();
        let Line::Entry(entry) = &mut section.lines[pos] else {
            return false;
        };

        for blank in gap {
            entry.value.push('\n');
            if let (Some(raw), Line::Other(text)) = (entry.raw.as_mut(), blank) {
                raw.push(text);
            }
        }
        entry.value.push('\n');
        entry.value.push_str(line.trim());
        if let Some(raw) = entry.raw.as_mut() {
            raw.push(line.to_string());
        }
        true
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Returns the line ending used when rendering.
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Returns `true` if a section with this exact name exists.
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Iterates section names in file order, excluding [`DEFAULT_SECTION`].
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .map(|section| section.name.as_str())
            .filter(|name| *name != DEFAULT_SECTION)
    }

    /// Looks up `key` in `section`, falling back to [`DEFAULT_SECTION`].
    ///
    /// Keys compare case-insensitively. Returns `None` if the section does
    /// not exist or neither it nor the default section defines the key.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let found = self.section(section)?.find(key).or_else(|| {
            self.section(DEFAULT_SECTION)
                .and_then(|defaults| defaults.find(key))
        });
        found.map(|entry| entry.value.as_str())
    }

    /// Sets `key` in `section` to `value`, creating either if needed.
    ///
    /// An existing key keeps its spelling and position; a new key is placed
    /// after the last entry of its section; a new section is appended.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let idx = match self.sections.iter().position(|s| s.name == section) {
            Some(idx) => idx,
            None => self.append_section(section),
        };
        let target = &mut self.sections[idx];

        if let Some(entry) = target.find_mut(key) {
            value.clone_into(&mut entry.value);
            entry.raw = None;
            return;
        }

        let at = target.insertion_point();
        target.lines.insert(
            at,
            Line::Entry(Entry {
                key: key.to_string(),
                value: value.to_string(),
                raw: None,
            }),
        );
    }

    fn append_section(&mut self, name: &str) -> usize {
        let separated = match self.sections.last() {
            Some(last) => last.ends_with_blank(),
            None => self.preamble.last().is_none_or(Line::is_blank),
        };
        if !separated {
            let blank = Line::Other(String::new());
            match self.sections.last_mut() {
                Some(last) => last.lines.push(blank),
                None => self.preamble.push(blank),
            }
        }

        self.sections.push(Section {
            name: name.to_string(),
            header: format!("[{name}]"),
            lines: Vec::new(),
        });
        self.sections.len() - 1
    }
}

impl Default for IniDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn render(lines: &[Line], out: &mut Vec<String>) {
            for line in lines {
                match line {
                    Line::Entry(entry) => entry.render(out),
                    Line::Other(text) => out.push(text.clone()),
                }
            }
        }

        let mut out = Vec::new();
        render(&self.preamble, &mut out);
        for section in &self.sections {
            out.push(section.header.clone());
            render(&section.lines, &mut out);
        }

        let eol = self.line_ending.as_str();
        f.write_str(&out.join(eol))?;
        if self.trailing_newline && !out.is_empty() {
            f.write_str(eol)?;
        }
        Ok(())
    }
}
