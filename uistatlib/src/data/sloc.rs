//! Built-in line classifier.
//!
//! Categorizes each line of a file as blank, code, comment, or code with a
//! trailing/leading comment, based on the comment syntax of the file's
//! extension. This is line-level scanning only: string literals containing
//! comment markers are not recognized as strings.

use super::classifier::LineClassifier;
use super::loc::LocBreakdown;

/// Comment markers for a family of languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Markers that comment out the rest of the line
    pub line: &'static [&'static str],
    /// `(open, close)` block comment delimiters
    pub block: &'static [(&'static str, &'static str)],
}

const C_STYLE: CommentSyntax = CommentSyntax {
    line: &["//"],
    block: &[("/*", "*/")],
};

const PHP: CommentSyntax = CommentSyntax {
    line: &["//", "#"],
    block: &[("/*", "*/")],
};

const CSS: CommentSyntax = CommentSyntax {
    line: &[],
    block: &[("/*", "*/")],
};

const HASH: CommentSyntax = CommentSyntax {
    line: &["#"],
    block: &[],
};

const PYTHON: CommentSyntax = CommentSyntax {
    line: &["#"],
    block: &[("\"\"\"", "\"\"\""), ("'''", "'''")],
};

const RUBY: CommentSyntax = CommentSyntax {
    line: &["#"],
    block: &[("=begin", "=end")],
};

const COFFEE: CommentSyntax = CommentSyntax {
    line: &["#"],
    block: &[("###", "###")],
};

const MARKUP: CommentSyntax = CommentSyntax {
    line: &[],
    block: &[("<!--", "-->")],
};

// `{{!--` must be tried before `{{!`
const HANDLEBARS: CommentSyntax = CommentSyntax {
    line: &[],
    block: &[("{{!--", "--}}"), ("{{!", "}}"), ("<!--", "-->")],
};

const SQL: CommentSyntax = CommentSyntax {
    line: &["--"],
    block: &[("/*", "*/")],
};

const LUA: CommentSyntax = CommentSyntax {
    line: &["--"],
    block: &[("--[[", "]]")],
};

const HASKELL: CommentSyntax = CommentSyntax {
    line: &["--"],
    block: &[("{-", "-}")],
};

/// Look up the comment syntax for an extension (without dot).
pub fn syntax_for(extension: &str) -> Option<CommentSyntax> {
    let syntax = match extension.to_ascii_lowercase().as_str() {
        "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "c" | "cc" | "cpp" | "cxx" | "h"
        | "hpp" | "cs" | "java" | "go" | "rs" | "swift" | "kt" | "kts" | "scala" | "groovy"
        | "dart" | "less" | "scss" | "styl" => C_STYLE,
        "php" => PHP,
        "css" => CSS,
        "py" => PYTHON,
        "rb" => RUBY,
        "coffee" | "litcoffee" => COFFEE,
        "sh" | "bash" | "zsh" | "pl" | "r" | "nim" => HASH,
        "html" | "htm" | "xml" | "svg" => MARKUP,
        "hbs" | "handlebars" | "mustache" => HANDLEBARS,
        "sql" => SQL,
        "lua" => LUA,
        "hs" => HASKELL,
        _ => return None,
    };
    Some(syntax)
}

/// What a single non-blank line contains.
#[derive(Debug, Default)]
struct LineScan {
    code: bool,
    single: bool,
    block: bool,
    todo: bool,
}

fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Scan one line, carrying an open block comment across lines via `open`.
fn scan_line(syntax: &CommentSyntax, line: &str, open: &mut Option<&'static str>) -> LineScan {
    let mut scan = LineScan::default();
    let mut rest = line;

    loop {
        if let Some(close) = *open {
            scan.block = true;
            match rest.find(close) {
                Some(pos) => {
                    scan.todo |= rest[..pos].contains("TODO");
                    rest = &rest[pos + close.len()..];
                    *open = None;
                    continue;
                }
                None => {
                    scan.todo |= rest.contains("TODO");
                    return scan;
                }
            }
        }

        let line_hit = syntax.line.iter().filter_map(|m| rest.find(m)).min();
        let block_hit = syntax
            .block
            .iter()
            .filter_map(|(start, end)| rest.find(start).map(|pos| (pos, *start, *end)))
            .min_by_key(|(pos, _, _)| *pos);

        match (line_hit, block_hit) {
            // A block opener at the same position as a line marker wins
            // (`###` in CoffeeScript, `--[[` in Lua).
            (Some(lp), Some((bp, _, _))) if lp < bp => {
                scan.code |= has_text(&rest[..lp]);
                scan.single = true;
                scan.todo |= rest[lp..].contains("TODO");
                return scan;
            }
            (Some(lp), None) => {
                scan.code |= has_text(&rest[..lp]);
                scan.single = true;
                scan.todo |= rest[lp..].contains("TODO");
                return scan;
            }
            (_, Some((bp, start, end))) => {
                scan.code |= has_text(&rest[..bp]);
                scan.block = true;
                rest = &rest[bp + start.len()..];
                *open = Some(end);
            }
            (None, None) => {
                scan.code |= has_text(rest);
                return scan;
            }
        }
    }
}

/// Count lines of `contents` using `syntax`.
///
/// A trailing newline does not start an extra line.
pub fn classify_with(syntax: &CommentSyntax, contents: &str) -> LocBreakdown {
    let mut loc = LocBreakdown::new();
    let mut open: Option<&'static str> = None;

    for line in contents.lines() {
        loc.total += 1;

        if !has_text(line) {
            loc.empty += 1;
            continue;
        }

        let scan = scan_line(syntax, line, &mut open);

        if scan.code {
            loc.source += 1;
        }
        if scan.single || scan.block {
            loc.comment += 1;
            if scan.block {
                loc.block += 1;
            } else {
                loc.single += 1;
            }
            if scan.code {
                loc.mixed += 1;
            }
            if scan.todo {
                loc.todo += 1;
            }
        }
    }

    loc
}

/// The default [`LineClassifier`], driven by the extension table in
/// [`syntax_for`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SlocClassifier;

impl SlocClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl LineClassifier for SlocClassifier {
    fn supports(&self, extension: &str) -> bool {
        syntax_for(extension).is_some()
    }

    fn classify(&self, contents: &str, extension: &str) -> Option<LocBreakdown> {
        syntax_for(extension).map(|syntax| classify_with(&syntax, contents))
    }
}
