//! Rendering a parse result as sourceable shell text.

use crate::config::Parsed;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Backslash sequence standing in for `c` inside double quotes, if `c`
/// needs one.
fn shell_escape(c: char) -> Option<&'static str> {
    Some(match c {
        '$' => "\\$",
        '`' => "\\`",
        '\\' => "\\\\",
        '"' => "\\\"",
        '!' => "\\!",
        '\n' => "\\n",
        '\r' => "\\r",
        '\t' => "\\t",
        _ => return None,
    })
}

/// Wrap `value` in double quotes so the shell reads it back unchanged.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match shell_escape(c) {
            Some(seq) => quoted.push_str(seq),
            None => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Uppercase, with anything that cannot appear in a shell variable name
/// replaced by `_`.
fn to_shell_var_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Render `export` lines for every seen option, followed by a `set --`
/// line that replaces the positional parameters with the residual
/// arguments.
pub fn generate_output_string(parsed: &Parsed, prefix: &str) -> String {
    let mut output = String::new();

    for (name, value) in &parsed.values {
        let var_name = format!("{}{}", prefix, to_shell_var_name(name));
        output.push_str(&format!("export {}={}\n", var_name, quote(value)));
    }

    output.push_str("set --");
    for arg in &parsed.residual {
        output.push(' ');
        output.push_str(&quote(arg));
    }
    output.push('\n');

    output
}

/// Write the rendered output to a temporary file and return its path.
///
/// The file persists until it is removed by the caller.
pub fn generate_output(parsed: &Parsed, prefix: &str) -> Result<PathBuf> {
    write_temp_file(&generate_output_string(parsed, prefix))
}

/// Generate an error script as a string.
///
/// When sourced, it prints the message to stderr and exits 1.
pub fn generate_error_string(program: &str, message: &str) -> String {
    let line = format!("{}: {}", program, message);
    format!("echo {} >&2\nexit 1\n", quote(&line))
}

/// Write an error script to a temporary file and return its path.
pub fn generate_error_output(program: &str, message: &str) -> Result<PathBuf> {
    write_temp_file(&generate_error_string(program, message))
}

/// Write content to a temporary file and return its path.
fn write_temp_file(content: &str) -> Result<PathBuf> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    let path = file.into_temp_path().keep()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_parsed(pairs: &[(&str, &str)], residual: &[&str]) -> Parsed {
        Parsed {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            residual: residual.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_basic_output() {
        let parsed = make_parsed(&[("verbose", "true"), ("output", "file.txt")], &[]);
        let output = generate_output_string(&parsed, "OPT_");

        assert_eq!(
            output,
            "export OPT_VERBOSE=\"true\"\nexport OPT_OUTPUT=\"file.txt\"\nset --\n"
        );
    }

    #[test]
    fn test_residual_arguments() {
        let parsed = make_parsed(&[], &["--wrong", "two words"]);
        let output = generate_output_string(&parsed, "OPT_");

        assert_eq!(output, "set -- \"--wrong\" \"two words\"\n");
    }

    #[test]
    fn test_quote_escapes_shell_metacharacters() {
        let cases = [
            ("plain", r#""plain""#),
            ("", r#""""#),
            ("$HOME/bin", r#""\$HOME/bin""#),
            ("`id`", r#""\`id\`""#),
            (r"C:\tmp", r#""C:\\tmp""#),
            ("wow!", r#""wow\!""#),
            ("a\tb\r\nc", r#""a\tb\r\nc""#),
            ("it's", r#""it's""#),
        ];
        for (raw, want) in cases {
            assert_eq!(quote(raw), want, "quoting {:?}", raw);
        }
    }

    #[test]
    fn test_export_value_is_quoted() {
        let parsed = make_parsed(&[("addr", "10.0.0.1 $x")], &[]);
        let output = generate_output_string(&parsed, "NET_");

        assert_eq!(output, "export NET_ADDR=\"10.0.0.1 \\$x\"\nset --\n");
    }

    #[test]
    fn test_residual_escaping() {
        let parsed = make_parsed(&[], &["$1", "a\\b", "two\nlines", ""]);
        let output = generate_output_string(&parsed, "OPT_");

        assert_eq!(
            output,
            "set -- \"\\$1\" \"a\\\\b\" \"two\\nlines\" \"\"\n"
        );
    }

    #[test]
    fn test_var_name_sanitized() {
        assert_eq!(to_shell_var_name("my-option"), "MY_OPTION");
        assert_eq!(to_shell_var_name("dry.run"), "DRY_RUN");
        assert_eq!(to_shell_var_name("ip6"), "IP6");
    }

    #[test]
    fn test_generate_output_creates_file() {
        let parsed = make_parsed(&[("test", "value")], &["rest"]);
        let path = generate_output(&parsed, "OPT_").unwrap();

        assert!(path.exists());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("export OPT_TEST=\"value\""));
        assert!(contents.contains("set -- \"rest\""));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_generate_error_string() {
        let output = generate_error_string("optcall", "no such option: --foo");
        assert!(output.contains("echo \"optcall: no such option: --foo\" >&2"));
        assert!(output.ends_with("exit 1\n"));
    }

    #[test]
    fn test_generate_error_string_escapes_special_chars() {
        let output = generate_error_string("prog", "bad value: $HOME `test`");
        assert_eq!(
            output,
            "echo \"prog: bad value: \\$HOME \\`test\\`\" >&2\nexit 1\n"
        );
    }

    #[test]
    fn test_generate_error_output_creates_file() {
        let path = generate_error_output("prog", "test error").unwrap();
        assert!(path.exists());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("prog: test error"));
        assert!(contents.contains("exit 1"));

        std::fs::remove_file(path).unwrap();
    }
}
