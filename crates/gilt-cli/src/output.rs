//! Colored output for CLI commands.
//!
//! Uses `termcolor` for cross-platform colored terminal output.
//! Respects `NO_COLOR` environment variable and `--color` flag.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use gilt_engine::{ObjectRef, PropertyDescriptor, PropertyKey};

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Styled output writer for terminal.
pub struct StyledOutput {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl StyledOutput {
    /// Create a new styled output with the given color choice.
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
            stderr: StandardStream::stderr(choice),
        }
    }

    /// Write text with a specific color and style.
    fn write_styled(&mut self, text: &str, color: Option<Color>, bold: bool) {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        let _ = self.stdout.set_color(&spec);
        let _ = write!(self.stdout, "{}", text);
        let _ = self.stdout.reset();
    }

    /// Green bold text.
    pub fn success(&mut self, text: &str) {
        self.write_styled(text, Some(Color::Green), true);
    }

    /// Cyan text.
    pub fn info(&mut self, text: &str) {
        self.write_styled(text, Some(Color::Cyan), false);
    }

    /// Dim/gray text.
    pub fn dim(&mut self, text: &str) {
        self.write_styled(text, Some(Color::White), false);
    }

    /// Bold white text.
    pub fn bold(&mut self, text: &str) {
        self.write_styled(text, None, true);
    }

    /// Plain text (no color).
    pub fn plain(&mut self, text: &str) {
        let _ = write!(self.stdout, "{}", text);
    }

    /// Newline.
    pub fn newline(&mut self) {
        let _ = writeln!(self.stdout);
    }

    /// Flush stdout.
    pub fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    /// Yellow line on stderr.
    pub fn trace_line(&mut self, text: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        let _ = self.stderr.set_color(&spec);
        let _ = writeln!(self.stderr, "  -> {}", text);
        let _ = self.stderr.reset();
    }

    // ── Property tables ──────────────────────────────────────────────

    /// Print a header line such as `class Person` or `object config`.
    pub fn header(&mut self, keyword: &str, name: &str) {
        self.info(keyword);
        self.plain(" ");
        self.bold(name);
        self.newline();
    }

    /// Print the own properties of `object` under a section label,
    /// skipping the keys in `hidden`.
    pub fn property_table(&mut self, label: &str, object: &ObjectRef, hidden: &[&str]) {
        let keys: Vec<PropertyKey> = object
            .own_keys()
            .into_iter()
            .filter(|key| !hidden.contains(&key.as_str()))
            .collect();
        if keys.is_empty() {
            return;
        }

        self.dim(&format!("  {}", label));
        self.newline();
        for key in keys {
            if let Some(desc) = object.get_own_property(&key) {
                self.plain(&format!("    {:<16}", key.as_str()));
                self.success(&format!("{:<10}", kind_label(&desc)));
                self.dim(&attribute_flags(&desc));
                self.newline();
            }
        }
    }
}

/// `method`, `value`, `get`, `set` or `get/set`
pub fn kind_label(desc: &PropertyDescriptor) -> &'static str {
    match desc {
        PropertyDescriptor::Value { value, .. } if value.as_callable().is_some() => "method",
        PropertyDescriptor::Value { .. } => "value",
        PropertyDescriptor::Accessor { get, set, .. } => match (get.is_some(), set.is_some()) {
            (true, true) => "get/set",
            (true, false) => "get",
            (false, true) => "set",
            (false, false) => "accessor",
        },
    }
}

/// Attribute flags as `wec`, with `-` for a cleared attribute and a blank
/// for `writable` on accessors
pub fn attribute_flags(desc: &PropertyDescriptor) -> String {
    let writable = match desc.writable() {
        Some(true) => 'w',
        Some(false) => '-',
        None => ' ',
    };
    let enumerable = if desc.is_enumerable() { 'e' } else { '-' };
    let configurable = if desc.is_configurable() { 'c' } else { '-' };
    format!("{}{}{}", writable, enumerable, configurable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gilt_engine::Value;

    #[test]
    fn test_attribute_flags() {
        let mut desc = PropertyDescriptor::data(Value::Null);
        assert_eq!(attribute_flags(&desc), "wec");
        desc.set_writable(false);
        desc.set_enumerable(false);
        assert_eq!(attribute_flags(&desc), "--c");

        let accessor = PropertyDescriptor::Accessor {
            get: Some(Value::Null),
            set: None,
            enumerable: false,
            configurable: true,
        };
        assert_eq!(attribute_flags(&accessor), " -c");
        assert_eq!(kind_label(&accessor), "get");
    }

    #[test]
    fn test_kind_label_for_method() {
        let method = Value::Object(ObjectRef::native("m", |_, _| Ok(Value::Null)));
        assert_eq!(kind_label(&PropertyDescriptor::data(method)), "method");
        assert_eq!(kind_label(&PropertyDescriptor::data(Value::from(1))), "value");
    }
}
