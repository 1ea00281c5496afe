//! Grammar parsing: expanded syntax text to concrete alternative shapes.

use crate::reference::{TokenReference, parse_token_reference};
use crate::separator::scan_parts;
use crate::SyntaxError;

/// Cap applied to the open-ended repetition operators `+` and `*` so the
/// shape expansion stays finite. Four repetitions cover every multi-value
/// property the builder edits (edges, corners, layered shadows/filters).
pub const MAX_REPEAT: usize = 4;

/// One atomic slot of a shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// A literal keyword, e.g. `none` or `solid`.
    Keyword(String),
    /// A primitive token reference, e.g. `<length [0,10]>`.
    Token(TokenReference),
    /// A function call slot, matched by name.
    Function { name: String },
}

/// One fully expanded, concrete alternative structure a property's value
/// may take: no grammar operators remain.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// The alternative rendered back to grammar text.
    pub text: String,
    /// Ordered atomic components.
    pub components: Vec<Component>,
    /// Join separators between components;
    /// `separators.len() == components.len() - 1` for non-empty shapes.
    pub separators: Vec<char>,
}

impl Shape {
    /// The zero-occurrence shape produced by `?` and `*`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Parse an expanded grammar into its ordered list of concrete shapes.
///
/// The traversal is depth-first and left-to-right: alternation branches in
/// source order, repetition counts ascending, group alternatives in
/// discovery order. Re-parsing identical input reproduces the identical
/// ordered list; downstream per-variant tables (icons, editor options)
/// rely on that.
///
/// # Errors
/// Any [`SyntaxError`] variant; all are configuration errors raised at
/// grammar load time.
pub fn parse_syntax(expanded: &str) -> Result<Vec<Shape>, SyntaxError> {
    let alternatives = expand_alternatives(expanded)?;
    alternatives.iter().map(|text| build_shape(text)).collect()
}

/// Expand a grammar into concrete alternative texts.
fn expand_alternatives(text: &str) -> Result<Vec<String>, SyntaxError> {
    let trimmed = text.trim();
    let branches = split_alternation(trimmed)?;
    let mut out = Vec::new();
    for branch in branches {
        let branch = branch.trim();
        if branch.is_empty() {
            return Err(SyntaxError::EmptyAlternative(trimmed.to_owned()));
        }
        expand_branch(branch, &mut out)?;
    }
    Ok(out)
}

/// Split on `|` outside brackets, parens, and token references.
fn split_alternation(text: &str) -> Result<Vec<&str>, SyntaxError> {
    let mut branches = Vec::new();
    let mut bracket_depth = 0i32;
    let mut paren_depth = 0i32;
    let mut in_token = false;
    let mut start = 0;
    for (offset, ch) in text.char_indices() {
        match ch {
            '<' if !in_token => in_token = true,
            '>' if in_token => in_token = false,
            _ if in_token => {}
            '[' => bracket_depth += 1,
            ']' => {
                bracket_depth -= 1;
                if bracket_depth < 0 {
                    return Err(SyntaxError::Unbalanced {
                        delimiter: ']',
                        text: text.to_owned(),
                    });
                }
            }
            '(' => paren_depth += 1,
            ')' => {
                paren_depth -= 1;
                if paren_depth < 0 {
                    return Err(SyntaxError::Unbalanced {
                        delimiter: ')',
                        text: text.to_owned(),
                    });
                }
            }
            '|' if bracket_depth == 0 && paren_depth == 0 => {
                branches.push(&text[start..offset]);
                start = offset + 1;
            }
            _ => {}
        }
    }
    if bracket_depth != 0 {
        return Err(SyntaxError::Unbalanced {
            delimiter: '[',
            text: text.to_owned(),
        });
    }
    if paren_depth != 0 {
        return Err(SyntaxError::Unbalanced {
            delimiter: '(',
            text: text.to_owned(),
        });
    }
    if in_token {
        return Err(SyntaxError::Unbalanced {
            delimiter: '<',
            text: text.to_owned(),
        });
    }
    branches.push(&text[start..]);
    Ok(branches)
}

/// Repetition suffix attached to an atom.
#[derive(Clone, Copy, Debug)]
enum Repetition {
    One,
    Optional,
    OneOrMore,
    ZeroOrMore,
    Bounded { min: usize, max: usize },
}

impl Repetition {
    fn counts(self) -> std::ops::RangeInclusive<usize> {
        match self {
            Self::One => 1..=1,
            Self::Optional => 0..=1,
            Self::OneOrMore => 1..=MAX_REPEAT,
            Self::ZeroOrMore => 0..=MAX_REPEAT,
            Self::Bounded { min, max } => min..=max,
        }
    }
}

/// An atom of a sequence branch together with the separator that joined it
/// to the preceding atom.
struct BranchItem {
    separator: char,
    alternatives: Vec<String>,
}

/// Expand one sequence branch into alternative texts, appending to `out`
/// in discovery order.
fn expand_branch(branch: &str, out: &mut Vec<String>) -> Result<(), SyntaxError> {
    let items = parse_branch_items(branch)?;
    combine_items(&items, 0, String::new(), out);
    Ok(())
}

/// Depth-first cartesian walk over item alternatives, leftmost item
/// outermost so discovery order follows the source left to right.
fn combine_items(items: &[BranchItem], index: usize, prefix: String, out: &mut Vec<String>) {
    let Some(item) = items.get(index) else {
        out.push(prefix);
        return;
    };
    for alternative in &item.alternatives {
        let next = if alternative.is_empty() {
            prefix.clone()
        } else if prefix.is_empty() {
            alternative.clone()
        } else {
            join_with(&prefix, item.separator, alternative)
        };
        combine_items(items, index + 1, next, out);
    }
}

fn join_with(prefix: &str, separator: char, suffix: &str) -> String {
    match separator {
        ',' => format!("{prefix}, {suffix}"),
        '/' => format!("{prefix} / {suffix}"),
        _ => format!("{prefix} {suffix}"),
    }
}

/// Tokenize a branch into `(separator, atom, repetition)` items, expanding
/// each atom into its alternative texts.
fn parse_branch_items(branch: &str) -> Result<Vec<BranchItem>, SyntaxError> {
    let chars: Vec<char> = branch.chars().collect();
    let mut items: Vec<BranchItem> = Vec::new();
    let mut index = 0;
    let mut separator = ' ';

    while index < chars.len() {
        // Separator run before the next atom.
        if is_separator_char(chars[index]) {
            let mut run = ' ';
            while index < chars.len() && is_separator_char(chars[index]) {
                match chars[index] {
                    '/' => run = '/',
                    ',' if run == ' ' => run = ',',
                    _ => {}
                }
                index += 1;
            }
            separator = run;
            continue;
        }

        let (base, next) = parse_atom(branch, &chars, index)?;
        let (repetition, next) = parse_repetition(branch, &chars, next)?;
        items.push(BranchItem {
            separator,
            alternatives: apply_repetition(&base, repetition),
        });
        separator = ' ';
        index = next;
    }

    Ok(items)
}

#[inline]
fn is_separator_char(ch: char) -> bool {
    ch == ' ' || ch == ',' || ch == '/'
}

/// Parse one atom starting at `index`: a group, a token reference, a
/// function call, or a bare keyword. Returns the atom's alternative texts
/// and the index past it.
fn parse_atom(
    branch: &str,
    chars: &[char],
    index: usize,
) -> Result<(Vec<String>, usize), SyntaxError> {
    match chars[index] {
        '[' => {
            let close = matching_bracket(chars, index).ok_or_else(|| SyntaxError::Unbalanced {
                delimiter: '[',
                text: branch.to_owned(),
            })?;
            let inner: String = chars[index + 1..close].iter().collect();
            let alternatives = expand_alternatives(&inner)?;
            Ok((alternatives, close + 1))
        }
        '<' => {
            let mut end = index;
            while end < chars.len() && chars[end] != '>' {
                end += 1;
            }
            if end == chars.len() {
                return Err(SyntaxError::Unbalanced {
                    delimiter: '<',
                    text: branch.to_owned(),
                });
            }
            let token: String = chars[index..=end].iter().collect();
            // Validate eagerly so bad references fail at load time.
            parse_token_reference(&token)?;
            Ok((vec![token], end + 1))
        }
        _ => {
            // Keyword, possibly turning into a function call at '('.
            let mut end = index;
            let mut paren_depth = 0i32;
            while end < chars.len() {
                let ch = chars[end];
                if ch == '(' {
                    paren_depth += 1;
                } else if ch == ')' {
                    if paren_depth == 0 {
                        break;
                    }
                    paren_depth -= 1;
                } else if paren_depth == 0
                    && (is_separator_char(ch) || matches!(ch, '[' | ']' | '<' | '|' | '+' | '*' | '?' | '{'))
                {
                    break;
                }
                end += 1;
            }
            if paren_depth != 0 {
                return Err(SyntaxError::Unbalanced {
                    delimiter: '(',
                    text: branch.to_owned(),
                });
            }
            let atom: String = chars[index..end].iter().collect();
            Ok((vec![atom], end))
        }
    }
}

/// Parse an optional repetition suffix immediately following an atom.
fn parse_repetition(
    branch: &str,
    chars: &[char],
    index: usize,
) -> Result<(Repetition, usize), SyntaxError> {
    match chars.get(index) {
        Some('+') => Ok((Repetition::OneOrMore, index + 1)),
        Some('*') => Ok((Repetition::ZeroOrMore, index + 1)),
        Some('?') => Ok((Repetition::Optional, index + 1)),
        Some('{') => {
            let mut end = index;
            while end < chars.len() && chars[end] != '}' {
                end += 1;
            }
            if end == chars.len() {
                return Err(SyntaxError::Unbalanced {
                    delimiter: '{',
                    text: branch.to_owned(),
                });
            }
            let body: String = chars[index + 1..end].iter().collect();
            let bounds = parse_bounds(&body)
                .ok_or_else(|| SyntaxError::BadRepetition(body.clone()))?;
            Ok((
                Repetition::Bounded {
                    min: bounds.0,
                    max: bounds.1,
                },
                end + 1,
            ))
        }
        _ => Ok((Repetition::One, index)),
    }
}

fn parse_bounds(body: &str) -> Option<(usize, usize)> {
    let (min_text, max_text) = body.split_once(',')?;
    let min = min_text.trim().parse::<usize>().ok()?;
    let max = max_text.trim().parse::<usize>().ok()?;
    (min <= max).then_some((min, max))
}

/// Enumerate the repeated forms of an atom: counts ascending, and within
/// each count every combination of the base alternatives (rightmost slot
/// varying fastest), so a repeated group admits mixed members like
/// `blur(4px) brightness(0.5)`. The zero count contributes a single empty
/// form.
fn apply_repetition(base: &[String], repetition: Repetition) -> Vec<String> {
    let mut out = Vec::new();
    for count in repetition.counts() {
        if count == 0 {
            out.push(String::new());
            continue;
        }
        append_combinations(base, count, String::new(), &mut out);
    }
    out
}

fn append_combinations(base: &[String], remaining: usize, prefix: String, out: &mut Vec<String>) {
    if remaining == 0 {
        out.push(prefix);
        return;
    }
    for alternative in base {
        let next = if prefix.is_empty() {
            alternative.clone()
        } else {
            format!("{prefix} {alternative}")
        };
        append_combinations(base, remaining - 1, next, out);
    }
}

/// Index of the `]` matching the `[` at `open`, honoring nesting and
/// skipping token references.
fn matching_bracket(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_token = false;
    for (offset, ch) in chars.iter().enumerate().skip(open) {
        match ch {
            '<' if !in_token => in_token = true,
            '>' if in_token => in_token = false,
            _ if in_token => {}
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Classify an alternative text into a [`Shape`].
fn build_shape(text: &str) -> Result<Shape, SyntaxError> {
    let (parts, separators) = scan_parts(text);
    let mut components = Vec::with_capacity(parts.len());
    for part in &parts {
        components.push(classify_component(part)?);
    }
    Ok(Shape {
        text: text.to_owned(),
        components,
        separators,
    })
}

fn classify_component(part: &str) -> Result<Component, SyntaxError> {
    if part.starts_with('<') {
        return Ok(Component::Token(parse_token_reference(part)?));
    }
    if let Some(open) = part.find('(')
        && part.ends_with(')')
        && open > 0
    {
        return Ok(Component::Function {
            name: part[..open].to_owned(),
        });
    }
    Ok(Component::Keyword(part.to_owned()))
}
