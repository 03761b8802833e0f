//! Desktop entry (.desktop file) generation.
//!
//! Implements the subset of the XDG Desktop Entry Specification a launcher
//! entry needs. Rendering is deterministic: keys are written in a fixed order
//! and nothing time- or host-dependent is included.

use std::fmt::{self, Write as FmtWrite};
use std::fs;
use std::path::Path;

use crate::error::{Result, ShortcutError};
use crate::platform;
use tracing::debug;

/// Characters that force an `Exec` argument to be quoted.
const EXEC_RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(', ')',
    '`',
];

/// A desktop entry representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Entry type (always "Application" for launchers).
    pub entry_type: String,
    /// Entry name (shown in menus).
    pub name: String,
    /// Comment/description.
    pub comment: Option<String>,
    /// Absolute path of the program to run.
    pub exec: String,
    /// Icon path or themed icon name.
    pub icon: String,
    /// Whether to run in a terminal.
    pub terminal: bool,
    /// Menu categories.
    pub categories: Vec<String>,
    /// Keywords for launcher search.
    pub keywords: Vec<String>,
    /// StartupWMClass for window matching.
    pub startup_wm_class: Option<String>,
}

impl Default for DesktopEntry {
    fn default() -> Self {
        Self {
            entry_type: "Application".to_string(),
            name: String::new(),
            comment: None,
            exec: String::new(),
            icon: String::new(),
            terminal: false,
            categories: Vec::new(),
            keywords: Vec::new(),
            startup_wm_class: None,
        }
    }
}

impl DesktopEntry {
    /// Create a new desktop entry builder.
    pub fn builder() -> DesktopEntryBuilder {
        DesktopEntryBuilder::new()
    }

    /// Write the desktop entry to a file, replacing any existing file.
    ///
    /// The file is marked executable so GNOME/KDE treat it as trusted.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ShortcutError::io_with_path(e, "create directory", parent))?;
        }

        fs::write(path, self.to_string())
            .map_err(|e| ShortcutError::io_with_path(e, "write desktop file", path))?;

        platform::set_executable(path)?;

        debug!("Wrote desktop entry to {:?}", path);

        Ok(())
    }
}

impl fmt::Display for DesktopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut content = String::new();

        writeln!(content, "[Desktop Entry]")?;
        writeln!(content, "Type={}", escape_value(&self.entry_type))?;
        writeln!(content, "Name={}", escape_value(&self.name))?;

        if let Some(ref comment) = self.comment {
            writeln!(content, "Comment={}", escape_value(comment))?;
        }

        writeln!(content, "Exec={}", escape_value(&quote_exec_arg(&self.exec)))?;
        writeln!(content, "Icon={}", escape_value(&self.icon))?;
        writeln!(content, "Terminal={}", self.terminal)?;

        if !self.categories.is_empty() {
            writeln!(content, "Categories={}", join_list(&self.categories))?;
        }

        if !self.keywords.is_empty() {
            writeln!(content, "Keywords={}", join_list(&self.keywords))?;
        }

        if let Some(ref wm_class) = self.startup_wm_class {
            writeln!(content, "StartupWMClass={}", escape_value(wm_class))?;
        }

        f.write_str(&content)
    }
}

/// Escape a string value (`\s`, `\n`, `\t`, `\r`, `\\`).
///
/// Only leading spaces need `\s`; interior spaces are preserved as-is.
fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            ' ' if i == 0 => escaped.push_str("\\s"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Quote a single `Exec` argument.
///
/// `%` is doubled since it introduces field codes. Arguments containing
/// reserved characters are wrapped in double quotes with `"`, `` ` ``, `$`
/// and `\` backslash-escaped.
fn quote_exec_arg(arg: &str) -> String {
    let arg = arg.replace('%', "%%");
    if !arg.contains(EXEC_RESERVED) {
        return arg;
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Join a list value with `;`, including the trailing separator.
fn join_list(items: &[String]) -> String {
    let mut joined = String::new();
    for item in items {
        joined.push_str(&escape_value(item).replace(';', "\\;"));
        joined.push(';');
    }
    joined
}

/// Builder for desktop entries.
pub struct DesktopEntryBuilder {
    entry: DesktopEntry,
}

impl DesktopEntryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entry: DesktopEntry::default(),
        }
    }

    /// Set the entry name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entry.name = name.into();
        self
    }

    /// Set the comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.entry.comment = Some(comment.into());
        self
    }

    /// Set the executable path.
    pub fn exec(mut self, exec: impl Into<String>) -> Self {
        self.entry.exec = exec.into();
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.entry.icon = icon.into();
        self
    }

    /// Set whether to run in terminal.
    pub fn terminal(mut self, terminal: bool) -> Self {
        self.entry.terminal = terminal;
        self
    }

    /// Set the menu categories.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the search keywords.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the window class used to match running windows to this entry.
    pub fn startup_wm_class(mut self, wm_class: impl Into<String>) -> Self {
        self.entry.startup_wm_class = Some(wm_class.into());
        self
    }

    /// Build the desktop entry.
    pub fn build(self) -> DesktopEntry {
        self.entry
    }
}

impl Default for DesktopEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
