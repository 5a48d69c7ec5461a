//! CLI output formatting utilities.
//!
//! - JSON syntax highlighting
//! - Section headings above tables

use std::fmt::Write;

use colored::Colorize;

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (default)
pub fn print_highlighted_json(value: &serde_json::Value) {
    let json_str = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{}", highlight_json(&json_str));
}

/// Prints a bold section heading with an item count.
pub fn print_heading(title: &str, count: usize) {
    println!("{}", format!("{title} ({count})").bold());
}

/// Colors a pretty-printed JSON string.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut is_key = false;
    let mut escape_next = false;
    let mut current_token = String::new();
    let mut after_colon = false;

    for ch in json.chars() {
        if escape_next {
            current_token.push(ch);
            escape_next = false;
            continue;
        }

        if ch == '\\' && in_string {
            current_token.push(ch);
            escape_next = true;
            continue;
        }

        match ch {
            '"' => {
                if in_string {
                    current_token.push(ch);
                    if is_key {
                        let _ = write!(out, "{}", current_token.cyan());
                    } else {
                        let _ = write!(out, "{}", current_token.green());
                    }
                    current_token.clear();
                    in_string = false;
                    is_key = false;
                } else {
                    flush_token(&mut out, &mut current_token, after_colon);
                    current_token.push(ch);
                    in_string = true;
                    // Strings before a colon are keys
                    is_key = !after_colon;
                    after_colon = false;
                }
            }
            ':' if !in_string => {
                flush_token(&mut out, &mut current_token, false);
                let _ = write!(out, "{}", ":".white());
                after_colon = true;
            }
            ',' if !in_string => {
                flush_token(&mut out, &mut current_token, after_colon);
                let _ = write!(out, "{}", ",".white());
                after_colon = false;
            }
            '{' | '}' | '[' | ']' if !in_string => {
                flush_token(&mut out, &mut current_token, after_colon);
                let _ = write!(out, "{}", ch.to_string().white().bold());
                after_colon = false;
            }
            _ => current_token.push(ch),
        }
    }

    flush_token(&mut out, &mut current_token, after_colon);
    out
}

/// Appends the current token with appropriate coloring.
fn flush_token(out: &mut String, token: &mut String, is_value: bool) {
    if token.is_empty() {
        return;
    }

    if token.trim().is_empty() || !is_value {
        out.push_str(token);
        token.clear();
        return;
    }

    let start = token.find(|c: char| !c.is_whitespace()).unwrap_or(0);
    let end = token.rfind(|c: char| !c.is_whitespace()).map_or(token.len(), |i| i + 1);

    let prefix = &token[..start];
    let value = &token[start..end];
    let suffix = &token[end..];

    if value == "true" || value == "false" || value == "null" {
        let _ = write!(out, "{}{}{}", prefix, value.magenta(), suffix);
    } else if value.parse::<f64>().is_ok() {
        let _ = write!(out, "{}{}{}", prefix, value.yellow(), suffix);
    } else {
        out.push_str(token);
    }

    token.clear();
}
