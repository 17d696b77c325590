//! Lightweight Lua/Luau scanner
//!
//! This is not a parser. It lexes just enough to never be fooled by strings
//! and comments, then cuts the token stream into top-level statements by
//! tracking block and bracket nesting. Each statement is classified by its
//! role (declaration, assignment, return, ...) so callers can edit source by
//! position instead of by surface pattern.

use std::collections::HashSet;
use std::ops::Range;

use crate::domain::entities::TopLevelBindings;
use crate::domain::value_objects::LUA_KEYWORDS;

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    Keyword,
    Number,
    Str,
    Comment,
    Punct,
}

/// A token as a byte range into the scanned source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    fn is(&self, src: &str, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text(src) == text
    }
}

/// A bare name bound by a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub span: Range<usize>,
}

/// Role of a top-level statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// `local a, b = ...`, `local a`, `local function a()`
    Local {
        names: Vec<Binding>,
        is_function: bool,
        value: Option<Range<usize>>,
    },
    /// `function a()` (`is_field` for `function a.b()` / `function a:b()`)
    Function { name: Binding, is_field: bool },
    /// `a, b = ...` with bare-name targets only
    Assign {
        targets: Vec<Binding>,
        value: Option<Range<usize>>,
    },
    /// `return ...`; `single_name` is set when the value is one bare name
    Return {
        value: Option<Range<usize>>,
        single_name: Option<String>,
    },
    Other,
}

/// One top-level statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    /// Byte span from the first to the last token, `;` included
    pub span: Range<usize>,
    /// Index range into [`Scan::code`]
    pub tokens: Range<usize>,
}

impl Statement {
    /// True when the statement binds `name` at top level
    pub fn declares(&self, name: &str) -> bool {
        match &self.kind {
            StatementKind::Local { names, .. } => names.iter().any(|b| b.name == name),
            StatementKind::Function {
                name: declared,
                is_field: false,
            } => declared.name == name,
            StatementKind::Assign { targets, .. } => targets.iter().any(|b| b.name == name),
            _ => false,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.kind, StatementKind::Local { .. })
    }
}

/// Result of scanning one source text
#[derive(Debug, Clone)]
pub struct Scan {
    /// Every token except comments, in source order
    pub code: Vec<Token>,
    /// Comment tokens, in source order
    pub comments: Vec<Token>,
    pub statements: Vec<Statement>,
}

impl Scan {
    /// Last top-level statement, if it is a `return`
    pub fn trailing_return(&self) -> Option<&Statement> {
        self.statements
            .last()
            .filter(|s| matches!(s.kind, StatementKind::Return { .. }))
    }

    /// Name of the first top-level Luau `export type` alias, if any
    pub fn exported_type<'a>(&self, src: &'a str) -> Option<&'a str> {
        self.statements.iter().find_map(|stmt| {
            match &self.code[stmt.tokens.clone()] {
                [export, ty, name, ..]
                    if export.is(src, TokenKind::Name, "export")
                        && ty.is(src, TokenKind::Name, "type")
                        && name.kind == TokenKind::Name =>
                {
                    Some(name.text(src))
                }
                _ => None,
            }
        })
    }

    /// Top-level names, split into locals and globals.
    ///
    /// A bare assignment only counts as a global when no earlier top-level
    /// `local` bound the same name.
    pub fn bindings(&self) -> TopLevelBindings {
        let mut bindings = TopLevelBindings::default();
        for stmt in &self.statements {
            match &stmt.kind {
                StatementKind::Local { names, .. } => {
                    for b in names {
                        push_unique(&mut bindings.locals, &b.name);
                    }
                }
                StatementKind::Function {
                    name,
                    is_field: false,
                } => {
                    if !bindings.locals.contains(&name.name) {
                        push_unique(&mut bindings.globals, &name.name);
                    }
                }
                StatementKind::Assign { targets, .. } => {
                    for b in targets {
                        if !bindings.locals.contains(&b.name) {
                            push_unique(&mut bindings.globals, &b.name);
                        }
                    }
                }
                _ => {}
            }
        }
        bindings
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}

/// Lex and split `src` into top-level statements.
pub fn scan(src: &str) -> Scan {
    let (comments, code): (Vec<Token>, Vec<Token>) = tokenize(src)
        .into_iter()
        .partition(|t| t.kind == TokenKind::Comment);
    let statements = split_statements(src, &code)
        .into_iter()
        .map(|range| {
            let toks = &code[range.clone()];
            Statement {
                kind: classify(src, toks),
                span: toks[0].start..toks[toks.len() - 1].end,
                tokens: range,
            }
        })
        .collect();
    Scan {
        code,
        comments,
        statements,
    }
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

const OPERATORS_3: &[&str] = &["...", "..=", "//="];
const OPERATORS_2: &[&str] = &[
    "==", "~=", "<=", ">=", "..", "::", "->", "+=", "-=", "*=", "/=", "%=", "^=", "//",
];

/// Split `src` into tokens, comments included.
///
/// Unterminated strings and comments run to the end of their line (quoted)
/// or of the source (long brackets) instead of failing.
pub fn tokenize(src: &str) -> Vec<Token> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        let kind = if b == b'-' && bytes.get(i + 1) == Some(&b'-') {
            i += 2;
            match long_bracket_level(bytes, i) {
                Some(level) => i = skip_long_bracket(bytes, i, level),
                None => {
                    while i < bytes.len() && bytes[i] != b'\n' {
                        i += 1;
                    }
                }
            }
            TokenKind::Comment
        } else if let Some(level) = long_bracket_level(bytes, i) {
            i = skip_long_bracket(bytes, i, level);
            TokenKind::Str
        } else if b == b'"' || b == b'\'' || b == b'`' {
            i = skip_quoted(bytes, i);
            TokenKind::Str
        } else if b.is_ascii_alphabetic() || b == b'_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            if LUA_KEYWORDS.contains(&&src[start..i]) {
                TokenKind::Keyword
            } else {
                TokenKind::Name
            }
        } else if b.is_ascii_digit()
            || (b == b'.' && bytes.get(i + 1).is_some_and(|c| c.is_ascii_digit()))
        {
            i = skip_number(bytes, i);
            TokenKind::Number
        } else {
            i += punct_len(src, i);
            TokenKind::Punct
        };

        tokens.push(Token {
            kind,
            start,
            end: i,
        });
    }

    tokens
}

/// `[[` is level 0, `[==[` is level 2.
fn long_bracket_level(bytes: &[u8], i: usize) -> Option<usize> {
    if bytes.get(i) != Some(&b'[') {
        return None;
    }
    let mut j = i + 1;
    while bytes.get(j) == Some(&b'=') {
        j += 1;
    }
    (bytes.get(j) == Some(&b'[')).then_some(j - i - 1)
}

fn skip_long_bracket(bytes: &[u8], i: usize, level: usize) -> usize {
    let mut j = i + level + 2;
    while j < bytes.len() {
        if bytes[j] == b']' {
            let mut k = j + 1;
            while k < bytes.len() && bytes[k] == b'=' {
                k += 1;
            }
            if k - j - 1 == level && bytes.get(k) == Some(&b']') {
                return k + 1;
            }
        }
        j += 1;
    }
    bytes.len()
}

fn skip_quoted(bytes: &[u8], i: usize) -> usize {
    let quote = bytes[i];
    let mut j = i + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            c if c == quote => return j + 1,
            b'\n' if quote != b'`' => return j,
            _ => j += 1,
        }
    }
    bytes.len()
}

fn skip_number(bytes: &[u8], i: usize) -> usize {
    let mut j = i + 1;
    while j < bytes.len() {
        let c = bytes[j];
        if matches!(c, b'e' | b'E' | b'p' | b'P') && matches!(bytes.get(j + 1), Some(b'+' | b'-'))
        {
            j += 2;
        } else if c.is_ascii_alphanumeric() || c == b'_' || c == b'.' {
            j += 1;
        } else {
            break;
        }
    }
    j
}

fn punct_len(src: &str, i: usize) -> usize {
    let rest = &src[i..];
    if OPERATORS_3.iter().any(|op| rest.starts_with(op)) {
        return 3;
    }
    if OPERATORS_2.iter().any(|op| rest.starts_with(op)) {
        return 2;
    }
    rest.chars().next().map_or(1, char::len_utf8)
}

// ---------------------------------------------------------------------------
// Statement splitting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Block,
    /// `while`/`for` waiting for its `do`
    LoopHeader,
}

/// Does `tok` end an expression, so that a following name starts a new statement?
fn ends_expression(src: &str, tok: &Token) -> bool {
    match tok.kind {
        TokenKind::Name | TokenKind::Number | TokenKind::Str => true,
        TokenKind::Keyword => matches!(tok.text(src), "end" | "nil" | "true" | "false"),
        TokenKind::Punct => matches!(tok.text(src), ")" | "]" | "}" | "..."),
        TokenKind::Comment => false,
    }
}

/// Is a statement allowed to begin right after `prev`?
fn is_statement_position(src: &str, prev: Option<&Token>) -> bool {
    match prev {
        None => true,
        Some(p) if p.is(src, TokenKind::Punct, ";") => true,
        Some(p) if ends_expression(src, p) => true,
        Some(p) => {
            p.kind == TokenKind::Keyword
                && matches!(p.text(src), "do" | "then" | "else" | "repeat" | "break")
        }
    }
}

fn starts_statement(src: &str, prev: Option<&Token>, tok: &Token, in_type_header: bool) -> bool {
    match tok.kind {
        TokenKind::Keyword => match tok.text(src) {
            "local" | "return" | "for" | "while" | "repeat" | "goto" | "break" | "do" => true,
            "function" | "if" => is_statement_position(src, prev),
            _ => false,
        },
        TokenKind::Name => !in_type_header && prev.is_some_and(|p| ends_expression(src, p)),
        _ => false,
    }
}

/// Luau `type X = ...` / `export type X = ...`: names may follow names until `=`.
fn opens_type_header(src: &str, code: &[Token], idx: usize) -> bool {
    let tok = &code[idx];
    let next = code.get(idx + 1);
    match tok.text(src) {
        "type" => tok.kind == TokenKind::Name && next.is_some_and(|n| n.kind == TokenKind::Name),
        "export" => {
            tok.kind == TokenKind::Name && next.is_some_and(|n| n.is(src, TokenKind::Name, "type"))
        }
        _ => false,
    }
}

fn split_statements(src: &str, code: &[Token]) -> Vec<Range<usize>> {
    let mut statements = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut brackets = 0usize;
    let mut current: Option<usize> = None;
    let mut in_type_header = false;

    for (idx, tok) in code.iter().enumerate() {
        let prev = idx.checked_sub(1).map(|p| &code[p]);
        let text = tok.text(src);

        if frames.is_empty() && brackets == 0 {
            if tok.is(src, TokenKind::Punct, ";") {
                if let Some(start) = current.take() {
                    statements.push(start..idx + 1);
                }
                in_type_header = false;
                continue;
            }

            let begins = match current {
                None => true,
                Some(_) => starts_statement(src, prev, tok, in_type_header),
            };
            if begins {
                if let Some(start) = current.take() {
                    statements.push(start..idx);
                }
                current = Some(idx);
                in_type_header = opens_type_header(src, code, idx);
            } else if in_type_header && text == "=" {
                in_type_header = false;
            }
        }

        match tok.kind {
            TokenKind::Keyword => match text {
                "function" | "repeat" => frames.push(Frame::Block),
                "if" if is_statement_position(src, prev) => frames.push(Frame::Block),
                "while" | "for" => frames.push(Frame::LoopHeader),
                "do" => match frames.last_mut() {
                    Some(frame @ Frame::LoopHeader) => *frame = Frame::Block,
                    _ => frames.push(Frame::Block),
                },
                "end" | "until" => {
                    frames.pop();
                }
                _ => {}
            },
            TokenKind::Punct => match text {
                "(" | "[" | "{" => brackets += 1,
                ")" | "]" | "}" => brackets = brackets.saturating_sub(1),
                _ => {}
            },
            _ => {}
        }
    }

    if let Some(start) = current {
        statements.push(start..code.len());
    }
    statements
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

fn binding(src: &str, tok: &Token) -> Binding {
    Binding {
        name: tok.text(src).to_string(),
        span: tok.span(),
    }
}

/// Tokens of a statement without a trailing `;`
fn without_semicolon<'a>(src: &str, toks: &'a [Token]) -> &'a [Token] {
    match toks.split_last() {
        Some((last, rest)) if last.is(src, TokenKind::Punct, ";") => rest,
        _ => toks,
    }
}

fn value_span(toks: &[Token], from: usize) -> Option<Range<usize>> {
    let first = toks.get(from)?;
    let last = toks.last()?;
    Some(first.start..last.end)
}

fn classify(src: &str, toks: &[Token]) -> StatementKind {
    let toks = without_semicolon(src, toks);
    let Some(first) = toks.first() else {
        return StatementKind::Other;
    };

    match (first.kind, first.text(src)) {
        (TokenKind::Keyword, "local") => classify_local(src, toks),
        (TokenKind::Keyword, "function") => match toks.get(1) {
            Some(name) if name.kind == TokenKind::Name => StatementKind::Function {
                name: binding(src, name),
                is_field: toks
                    .get(2)
                    .is_some_and(|t| matches!(t.text(src), "." | ":")),
            },
            _ => StatementKind::Other,
        },
        (TokenKind::Keyword, "return") => StatementKind::Return {
            value: value_span(toks, 1),
            single_name: match toks {
                [_, only] if only.kind == TokenKind::Name => Some(only.text(src).to_string()),
                _ => None,
            },
        },
        (TokenKind::Name, _) => classify_assign(src, toks),
        _ => StatementKind::Other,
    }
}

fn classify_local(src: &str, toks: &[Token]) -> StatementKind {
    if toks.get(1).is_some_and(|t| t.is(src, TokenKind::Keyword, "function")) {
        return match toks.get(2) {
            Some(name) if name.kind == TokenKind::Name => StatementKind::Local {
                names: vec![binding(src, name)],
                is_function: true,
                value: None,
            },
            _ => StatementKind::Other,
        };
    }

    let mut names = Vec::new();
    let mut i = 1;
    loop {
        match toks.get(i) {
            Some(t) if t.kind == TokenKind::Name => names.push(binding(src, t)),
            _ => return StatementKind::Other,
        }
        i += 1;

        // Luau annotation (`: T`) or attribute (`<const>`)
        if toks.get(i).is_some_and(|t| matches!(t.text(src), ":" | "<")) {
            let mut depth = 0usize;
            while let Some(t) = toks.get(i) {
                match t.text(src) {
                    "(" | "[" | "{" | "<" => depth += 1,
                    ")" | "]" | "}" | ">" => depth = depth.saturating_sub(1),
                    "," | "=" if depth == 0 => break,
                    _ => {}
                }
                i += 1;
            }
        }

        match toks.get(i).map(|t| t.text(src)) {
            Some(",") => i += 1,
            Some("=") => {
                return StatementKind::Local {
                    names,
                    is_function: false,
                    value: value_span(toks, i + 1),
                }
            }
            _ => {
                return StatementKind::Local {
                    names,
                    is_function: false,
                    value: None,
                }
            }
        }
    }
}

fn classify_assign(src: &str, toks: &[Token]) -> StatementKind {
    let mut targets = Vec::new();
    let mut i = 0;
    loop {
        match toks.get(i) {
            Some(t) if t.kind == TokenKind::Name => targets.push(binding(src, t)),
            _ => return StatementKind::Other,
        }
        match toks.get(i + 1).map(|t| (t.kind, t.text(src))) {
            Some((TokenKind::Punct, ",")) => i += 2,
            Some((TokenKind::Punct, "=")) => {
                return StatementKind::Assign {
                    targets,
                    value: value_span(toks, i + 2),
                }
            }
            _ => return StatementKind::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Line helpers
// ---------------------------------------------------------------------------

/// Extend `span` to cover its whole lines (newline included) when only
/// whitespace shares those lines with it.
pub fn whole_line_span(src: &str, span: Range<usize>) -> Option<Range<usize>> {
    let line_start = src[..span.start].rfind('\n').map_or(0, |i| i + 1);
    if !src[line_start..span.start].trim().is_empty() {
        return None;
    }
    let line_end = src[span.end..]
        .find('\n')
        .map_or(src.len(), |i| span.end + i + 1);
    if !src[span.end..line_end].trim().is_empty() {
        return None;
    }
    Some(line_start..line_end)
}

/// Byte offsets of line starts that fall inside a multi-line string or
/// comment. Those lines must never be re-indented or dropped.
pub fn protected_line_starts(src: &str) -> HashSet<usize> {
    let mut protected = HashSet::new();
    for tok in tokenize(src) {
        if !matches!(tok.kind, TokenKind::Str | TokenKind::Comment) {
            continue;
        }
        for (offset, _) in tok.text(src).match_indices('\n') {
            let line_start = tok.start + offset + 1;
            if line_start < tok.end {
                protected.insert(line_start);
            }
        }
    }
    protected
}

/// Remove every comment that sits alone on its line(s).
///
/// Trailing comments after code, and comment-like text inside strings, are
/// kept.
pub fn strip_comment_lines(src: &str) -> String {
    let removals: Vec<Range<usize>> = tokenize(src)
        .into_iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .filter_map(|t| whole_line_span(src, t.span()))
        .collect();

    let mut out = String::with_capacity(src.len());
    let mut cursor = 0;
    for range in removals {
        if range.start < cursor {
            continue;
        }
        out.push_str(&src[cursor..range.start]);
        cursor = range.end;
    }
    out.push_str(&src[cursor..]);
    out
}

/// Apply `(range, replacement)` edits. Ranges must not overlap.
pub fn apply_edits(src: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
    let mut out = src.to_string();
    for (range, replacement) in edits {
        out.replace_range(range, &replacement);
    }
    out
}

/// Drop leading blank lines and trailing whitespace.
pub fn trim_blank_edges(src: &str) -> &str {
    let mut start = 0;
    for line in src.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    src[start..].trim_end()
}
