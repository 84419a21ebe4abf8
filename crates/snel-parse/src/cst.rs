//! Concrete syntax tree produced by the grammar engine.

use serde_json::{json, Value};

use crate::grammar::ElementKind;
use crate::rule::Rule;

/// What the lowering engine needs from a parse tree node.
///
/// Any parser whose nodes can answer these five questions, using the rule
/// ids listed in [`Rule`], can feed [`crate::lower_any`].
pub trait SyntaxNode: Sized {
    fn rule_id(&self) -> &str;
    fn text(&self) -> &str;
    fn start(&self) -> usize;
    fn end(&self) -> usize;
    fn children(&self) -> &[Self];
}

#[derive(Debug, Clone, PartialEq)]
pub struct CstNode<'src> {
    pub(crate) rule: Rule,
    pub(crate) element: ElementKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) text: &'src str,
    pub(crate) children: Vec<CstNode<'src>>,
}

impl<'src> CstNode<'src> {
    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn element(&self) -> ElementKind {
        self.element
    }

    /// Depth-first search for the first node carrying `rule`.
    pub fn find(&self, rule: Rule) -> Option<&CstNode<'src>> {
        if self.rule == rule {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(rule))
    }

    /// Debug dump: `{start, end, name, element, string, children}`.
    pub fn to_json(&self) -> Value {
        let name = if self.rule.is_named() {
            Value::String(self.rule.id().into())
        } else {
            Value::Null
        };
        json!({
            "start": self.start,
            "end": self.end,
            "name": name,
            "element": self.element.as_str(),
            "string": self.text,
            "children": self.children.iter().map(CstNode::to_json).collect::<Vec<_>>(),
        })
    }
}

impl SyntaxNode for CstNode<'_> {
    fn rule_id(&self) -> &str {
        self.rule.id()
    }

    fn text(&self) -> &str {
        self.text
    }

    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.end
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}
