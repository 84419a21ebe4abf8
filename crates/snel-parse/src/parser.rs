//! Ordered-choice grammar engine producing a [`CstNode`] tree.

use std::collections::HashMap;

use crate::cst::CstNode;
use crate::error::SyntaxError;
use crate::grammar::{Element, ElementKind, Grammar};
use crate::lexer::Lexer;
use crate::rule::Rule;

/// Maximum nesting of `Prio` evaluations (each operator or parenthesis adds one).
///
/// Every level costs several recursive `walk` frames, so the bound has to
/// stay well inside a 2 MiB thread stack in debug builds.
pub const MAX_PRIO_DEPTH: usize = 64;

/// Parse `src` with the Snel grammar. The whole input must match `START`.
pub fn parse_cst(src: &str) -> Result<CstNode<'_>, SyntaxError> {
    let mut p = Parser::new(Grammar::snel(), src);
    let root = match p.walk_rule(Rule::Start, 0) {
        Ok(root) => root,
        Err(Abort { offset }) => {
            return Err(SyntaxError::at(
                src,
                offset,
                format!("expression nesting exceeds {MAX_PRIO_DEPTH} levels"),
            ))
        }
    };
    match root {
        Some(node) if p.lexer.skip_ws(node.end) == src.len() => Ok(node),
        Some(node) => Err(p.syntax_error(p.lexer.skip_ws(node.end))),
        None => Err(p.syntax_error(0)),
    }
}

struct Abort {
    offset: usize,
}

type Walk<'s> = Result<Option<CstNode<'s>>, Abort>;

enum Memo<'s> {
    /// Alternatives are still being tried; holds the best match so far.
    Growing(Option<CstNode<'s>>),
    Done(Option<CstNode<'s>>),
}

impl<'s> Memo<'s> {
    fn best(&self) -> Option<&CstNode<'s>> {
        match self {
            Memo::Growing(n) | Memo::Done(n) => n.as_ref(),
        }
    }
}

struct Parser<'g, 's> {
    grammar: &'g Grammar,
    src: &'s str,
    lexer: Lexer<'s>,
    /// Prio results keyed by (rule, offset).
    memo: HashMap<(Rule, usize), Memo<'s>>,
    /// Rule owning the `Prio` currently being evaluated, target of `This`.
    prio: Option<Rule>,
    depth: usize,
    furthest: usize,
    expected: Vec<String>,
}

impl<'g, 's> Parser<'g, 's> {
    fn new(grammar: &'g Grammar, src: &'s str) -> Self {
        Self {
            grammar,
            src,
            lexer: Lexer::new(src),
            memo: HashMap::new(),
            prio: None,
            depth: 0,
            furthest: 0,
            expected: Vec::new(),
        }
    }

    fn syntax_error(&self, at: usize) -> SyntaxError {
        if at > self.furthest || self.expected.is_empty() {
            return SyntaxError::at(self.src, at, "unexpected input");
        }
        SyntaxError::at(
            self.src,
            self.furthest,
            format!("expected {}", self.expected.join(", ")),
        )
    }

    fn fail(&mut self, pos: usize, what: String) {
        if pos > self.furthest {
            self.furthest = pos;
            self.expected.clear();
        }
        if pos == self.furthest && !self.expected.contains(&what) {
            self.expected.push(what);
        }
    }

    fn leaf(&self, rule: Rule, element: ElementKind, start: usize, end: usize) -> CstNode<'s> {
        CstNode {
            rule,
            element,
            start,
            end,
            text: &self.src[start..end],
            children: Vec::new(),
        }
    }

    /// Composite node spanning its non-empty children, or empty at `pos`.
    fn branch(
        &self,
        rule: Rule,
        element: ElementKind,
        pos: usize,
        end: usize,
        children: Vec<CstNode<'s>>,
    ) -> CstNode<'s> {
        let start = children
            .iter()
            .find(|c| c.end > c.start)
            .map_or(pos, |c| c.start);
        let start = start.min(end);
        CstNode {
            rule,
            element,
            start,
            end,
            text: &self.src[start..end],
            children,
        }
    }

    fn walk_rule(&mut self, rule: Rule, pos: usize) -> Walk<'s> {
        let grammar = self.grammar;
        match grammar.definition(rule) {
            Some(el) => self.walk(el, Some(rule), pos),
            None => Ok(None),
        }
    }

    fn walk(&mut self, el: &'g Element, name: Option<Rule>, pos: usize) -> Walk<'s> {
        let rule = name.unwrap_or_else(|| el.anonymous_rule());
        match el {
            Element::Ref(target) => self.walk_rule(*target, pos),

            Element::Keyword(kw) => {
                let at = self.lexer.skip_ws(pos);
                match self.lexer.keyword(at, kw) {
                    Some(end) => Ok(Some(self.leaf(rule, el.kind(), at, end))),
                    None => {
                        self.fail(at, format!("`{kw}`"));
                        Ok(None)
                    }
                }
            }
            Element::Token(tok) => {
                let at = self.lexer.skip_ws(pos);
                match self.lexer.token(at, tok) {
                    Some(end) => Ok(Some(self.leaf(rule, el.kind(), at, end))),
                    None => {
                        self.fail(at, format!("`{tok}`"));
                        Ok(None)
                    }
                }
            }
            Element::Lexeme(kind) => {
                let at = self.lexer.skip_ws(pos);
                match self.lexer.lexeme(at, *kind) {
                    Some(end) => Ok(Some(self.leaf(rule, el.kind(), at, end))),
                    None => {
                        self.fail(at, kind.describe().to_string());
                        Ok(None)
                    }
                }
            }

            Element::Sequence(items) => {
                let mut children = Vec::with_capacity(items.len());
                let mut cur = pos;
                for item in items {
                    match self.walk(item, None, cur)? {
                        Some(child) => {
                            cur = child.end.max(cur);
                            children.push(child);
                        }
                        None => return Ok(None),
                    }
                }
                Ok(Some(self.branch(rule, el.kind(), pos, cur, children)))
            }

            Element::Choice(alts) => {
                let mut best: Option<CstNode<'s>> = None;
                for alt in alts {
                    if let Some(node) = self.walk(alt, None, pos)? {
                        if best.as_ref().map_or(true, |b| node.end > b.end) {
                            best = Some(node);
                        }
                    }
                }
                Ok(best.map(|node| {
                    let end = node.end;
                    self.branch(rule, el.kind(), pos, end, vec![node])
                }))
            }

            Element::Repeat(item) => {
                let mut children = Vec::new();
                let mut cur = pos;
                while let Some(child) = self.walk(item, None, cur)? {
                    if child.end <= cur {
                        break;
                    }
                    cur = child.end;
                    children.push(child);
                }
                Ok(Some(self.branch(rule, el.kind(), pos, cur, children)))
            }

            Element::List { item, delim, min } => {
                let mut children = Vec::new();
                let mut cur = pos;
                let mut items = 0;
                let mut delims = 0;
                while let Some(child) = self.walk(item, None, cur)? {
                    cur = child.end.max(cur);
                    children.push(child);
                    items += 1;
                    match self.walk(delim, None, cur)? {
                        Some(sep) => {
                            cur = sep.end;
                            children.push(sep);
                            delims += 1;
                        }
                        None => break,
                    }
                }
                // a trailing delimiter invalidates the list
                if items < *min || (items > 0 && items == delims) {
                    return Ok(None);
                }
                Ok(Some(self.branch(rule, el.kind(), pos, cur, children)))
            }

            Element::Optional(item) => {
                let children: Vec<_> = self.walk(item, None, pos)?.into_iter().collect();
                let end = children.first().map_or(pos, |c| c.end);
                Ok(Some(self.branch(rule, el.kind(), pos, end, children)))
            }

            Element::Prio(alts) => self.walk_prio(alts, rule, pos),

            Element::This => {
                let Some(owner) = self.prio else {
                    return Ok(None);
                };
                let found = match self.memo.get(&(owner, pos)) {
                    Some(memo) => memo.best().cloned(),
                    None => {
                        let grammar = self.grammar;
                        match grammar.definition(owner) {
                            Some(Element::Prio(alts)) => self.walk_prio(alts, owner, pos)?,
                            _ => None,
                        }
                    }
                };
                Ok(found.map(|node| {
                    let end = node.end;
                    self.branch(rule, el.kind(), pos, end, vec![node])
                }))
            }
        }
    }

    /// Seed-growing evaluation: each alternative is tried once, in order, and
    /// replaces the current best only when it consumes strictly more input.
    /// `This` at the same offset sees the best match found so far.
    fn walk_prio(&mut self, alts: &'g [Element], rule: Rule, pos: usize) -> Walk<'s> {
        let key = (rule, pos);
        match self.memo.get(&key) {
            Some(Memo::Done(node)) => return Ok(node.clone()),
            Some(Memo::Growing(node)) => return Ok(node.clone()),
            None => {}
        }
        if self.depth >= MAX_PRIO_DEPTH {
            return Err(Abort { offset: pos });
        }
        self.depth += 1;
        let outer = self.prio.replace(rule);
        self.memo.insert(key, Memo::Growing(None));

        for alt in alts {
            let child = match self.walk(alt, None, pos) {
                Ok(child) => child,
                Err(abort) => {
                    self.prio = outer;
                    self.depth -= 1;
                    return Err(abort);
                }
            };
            let Some(child) = child else { continue };
            let best_end = self
                .memo
                .get(&key)
                .and_then(Memo::best)
                .map_or(pos, |n| n.end);
            if child.end > best_end {
                let end = child.end;
                let node = self.branch(rule, ElementKind::Prio, pos, end, vec![child]);
                self.memo.insert(key, Memo::Growing(Some(node)));
            }
        }

        self.prio = outer;
        self.depth -= 1;
        let best = match self.memo.remove(&key) {
            Some(memo) => memo.best().cloned(),
            None => None,
        };
        self.memo.insert(key, Memo::Done(best.clone()));
        Ok(best)
    }
}
