//! The structurizer: a single-pass, stack-driven parser turning a token stream into a
//! [`Node::Module`]. Like the tokenizer, [`parse`] is total: malformed structure is
//! recorded as in-band [`Node::SyntaxError`] nodes and parsing always reaches the end
//! of the token stream.

mod frame;

use frame::Frame;

use crate::position::Position;
use crate::token::{Token, TokenKind};
use crate::tree::{Node, SequenceKind};

/// Parses a token stream (as produced by [`crate::tokenizer::tokenize`]) into a tree
/// rooted at a single [`Node::Module`].
#[tracing::instrument(level = "trace", skip(tokens))]
pub fn parse(tokens: &[Token]) -> Node {
    let mut parser = Parser::new();
    for token in tokens {
        parser.step(token);
    }
    parser.finish()
}

/// Convenience wrapper composing [`crate::tokenizer::tokenize`] and [`parse`].
pub fn parse_source(source: &str) -> Node {
    parse(&crate::tokenizer::tokenize(source))
}

struct Parser {
    stack: Vec<Frame>,
    last_token_end: usize,
}

impl Parser {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Module { position: Position::default(), explicit: false, items: Vec::new() }],
            last_token_end: 0,
        }
    }

    fn step(&mut self, token: &Token) {
        self.last_token_end = token.position.end();

        if matches!(token.kind, TokenKind::Comment) {
            tracing::trace!("comment token ignored");
            return;
        }

        self.close_implicitly(token);
        self.dispatch(token);
    }

    /// Runs the Object-pop and Evaluation/Definition-pop rules to a fixed point before
    /// the current token is dispatched.
    fn close_implicitly(&mut self, token: &Token) {
        loop {
            let mut progressed = false;

            if self.top_is_object() && !matches!(token.kind, TokenKind::Definition | TokenKind::DefinitionStart | TokenKind::ParameterStart) {
                self.pop_into_parent();
                progressed = true;
            }

            if matches!(
                token.kind,
                TokenKind::Separator | TokenKind::SeparatorImplicit | TokenKind::SequenceEnd | TokenKind::DefinitionEnd | TokenKind::ParameterEnd
            ) {
                if self.top_is_evaluation() {
                    self.pop_into_parent();
                    progressed = true;
                }
                if self.top_is_definition() {
                    self.pop_into_parent();
                    progressed = true;
                }
            }

            if !progressed {
                break;
            }
        }
    }

    fn dispatch(&mut self, token: &Token) {
        let pos = token.position;
        match &token.kind {
            TokenKind::Null => self.add_term(Node::Null(pos)),
            TokenKind::True => self.add_term(Node::Bool(true, pos)),
            TokenKind::False => self.add_term(Node::Bool(false, pos)),
            TokenKind::Integer(v) => self.add_term(Node::Integer(*v, pos)),
            TokenKind::Real(v) => self.add_term(Node::Real(*v, pos)),
            TokenKind::String(s) => self.add_term(Node::String(s.clone(), pos)),
            TokenKind::UserError(s) => self.add_term(Node::UserError(s.clone(), pos)),
            TokenKind::SyntaxError(msg) => self.add_term(Node::SyntaxError(msg.clone(), pos)),

            TokenKind::Symbol(name) => {
                self.ensure_evaluation_open(pos);
                self.stack.push(Frame::Object { position: pos, symbol: Some(name.clone()), children: Vec::new() });
            }

            TokenKind::ParameterStart => {
                self.open_anonymous_object_if_needed(pos);
                self.stack.push(Frame::Sequence { kind: SequenceKind::ParameterList, position: pos, explicit: false, children: Vec::new() });
            }
            TokenKind::ParameterEnd => {
                if self.top_is_sequence_kind(SequenceKind::ParameterList) {
                    self.pop_into_parent();
                } else {
                    self.add_term(Node::SyntaxError("no matching opening bracket".into(), pos));
                }
            }

            TokenKind::Definition => {
                if self.top_is_object() {
                    self.stack.push(Frame::Definition { position: pos, body: None });
                } else {
                    self.add_term(Node::SyntaxError("symbol missing".into(), pos));
                }
            }

            TokenKind::DefinitionStart => {
                self.open_anonymous_object_if_needed(pos);
                self.stack.push(Frame::Sequence { kind: SequenceKind::DefinitionBody, position: pos, explicit: false, children: Vec::new() });
            }
            TokenKind::DefinitionEnd => {
                if self.top_is_sequence_kind(SequenceKind::DefinitionBody) {
                    self.pop_into_parent();
                    if self.top_is_object() {
                        self.pop_into_parent();
                    }
                } else {
                    self.add_term(Node::SyntaxError("no matching opening curly bracket".into(), pos));
                }
            }

            TokenKind::Separator => self.set_explicit(),
            TokenKind::SeparatorImplicit => {}

            TokenKind::SequenceStart => {
                self.ensure_evaluation_open(pos);
                self.stack.push(Frame::Sequence { kind: SequenceKind::Default, position: pos, explicit: false, children: Vec::new() });
            }
            TokenKind::SequenceEnd => {
                if self.top_is_sequence_kind(SequenceKind::Default) {
                    self.pop_into_parent();
                } else {
                    self.add_term(Node::SyntaxError("no matching opening parenthesis".into(), pos));
                }
            }

            TokenKind::Comment => unreachable!("comments are filtered out in step()"),
        }
    }

    fn finish(mut self) -> Node {
        let eof_position = Position::empty_at(self.last_token_end, 0, 0);
        while self.stack.len() > 1 {
            let needs_synthetic_close = !matches!(self.stack.last(), Some(Frame::Evaluation { .. } | Frame::Object { .. } | Frame::Definition { .. }));
            if needs_synthetic_close {
                let error = Node::SyntaxError("missing closing parenthesis".into(), eof_position);
                self.stack.last_mut().unwrap().add_child(error);
            }
            self.pop_into_parent();
        }

        let module = self.stack.pop().expect("module frame always present");
        let mut module = module.into_node();
        module.position_mut().extend_to(&eof_position);
        module
    }

    fn ensure_evaluation_open(&mut self, pos: Position) {
        if !self.top_is_evaluation() {
            self.stack.push(Frame::Evaluation { position: pos, terms: Vec::new() });
        }
    }

    fn add_term(&mut self, node: Node) {
        self.ensure_evaluation_open(node.position());
        self.stack.last_mut().unwrap().add_child(node);
    }

    fn open_anonymous_object_if_needed(&mut self, pos: Position) {
        if !self.top_is_object() {
            self.ensure_evaluation_open(pos);
            self.stack.push(Frame::Object { position: pos, symbol: None, children: Vec::new() });
        }
    }

    /// Pops the top frame and attaches it to what is now the top. Every call site only
    /// pops a frame it just confirmed is not the module frame, so the stack always has
    /// somewhere to attach to; checked in debug builds only, since this would be a bug
    /// in this crate, never a property of the input.
    fn pop_into_parent(&mut self) {
        debug_assert!(self.stack.len() > 1, "{}", crate::error::InternalError::StackUnderflow);
        let node = self.stack.pop().expect("caller checked the stack is non-empty").into_node();
        self.stack.last_mut().expect("module frame is never popped").add_child(node);
    }

    fn set_explicit(&mut self) {
        self.stack.last_mut().unwrap().set_explicit();
    }

    fn top_is_object(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Object { .. }))
    }

    fn top_is_evaluation(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Evaluation { .. }))
    }

    fn top_is_definition(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Definition { .. }))
    }

    fn top_is_sequence_kind(&self, kind: SequenceKind) -> bool {
        matches!(self.stack.last(), Some(Frame::Sequence { kind: k, .. }) if *k == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(source: &str) -> Vec<Node> {
        match parse_source(source) {
            Node::Module { items, .. } => items,
            other => panic!("parse_source did not return a Module: {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_an_empty_module_at_zero() {
        let module = parse_source("");
        match module {
            Node::Module { position, items, .. } => {
                assert_eq!(position, Position::default());
                assert!(items.is_empty());
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn comment_only_input_extends_module_span_with_no_children() {
        let module = parse_source("# just a comment");
        match module {
            Node::Module { position, items, .. } => {
                assert!(items.is_empty());
                assert_eq!(position.ch, 0);
                assert_eq!(position.len, "# just a comment".len());
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn plain_values_become_single_term_evaluations() {
        let xs = items("1\ntrue\n'hi'");
        assert_eq!(xs.len(), 3);
        assert!(matches!(&xs[0], Node::Evaluation { terms, .. } if matches!(terms[0], Node::Integer(1, _))));
        assert!(matches!(&xs[1], Node::Evaluation { terms, .. } if matches!(terms[0], Node::Bool(true, _))));
    }

    #[test]
    fn consecutive_separators_do_not_create_empty_evaluations() {
        assert_eq!(items("a,,b").len(), 2);
        assert_eq!(items(",,,a").len(), 1);
    }

    #[test]
    fn empty_sequence_is_a_term() {
        let xs = items("()");
        assert_eq!(xs.len(), 1);
        match &xs[0] {
            Node::Evaluation { terms, .. } => {
                assert!(matches!(&terms[0], Node::Sequence { kind: SequenceKind::Default, children, .. } if children.is_empty()));
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn parameter_lists_and_definition_attach_to_one_object() {
        let xs = items("f[x][y]=z");
        assert_eq!(xs.len(), 1);
        match &xs[0] {
            Node::Evaluation { terms, .. } => match &terms[0] {
                Node::Object { symbol, children, .. } => {
                    assert_eq!(symbol.as_deref(), Some("f"));
                    assert_eq!(children.len(), 3);
                    assert!(matches!(children[0], Node::Sequence { kind: SequenceKind::ParameterList, .. }));
                    assert!(matches!(children[1], Node::Sequence { kind: SequenceKind::ParameterList, .. }));
                    assert!(matches!(children[2], Node::Definition { .. }));
                }
                other => panic!("{other:?}"),
            },
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn bracket_with_no_preceding_symbol_synthesizes_an_anonymous_object() {
        let xs = items("[x]=1");
        assert_eq!(xs.len(), 1);
        match &xs[0] {
            Node::Evaluation { terms, .. } => match &terms[0] {
                Node::Object { symbol, children, .. } => {
                    assert_eq!(*symbol, None);
                    assert_eq!(children.len(), 2);
                    assert!(matches!(children[0], Node::Sequence { kind: SequenceKind::ParameterList, .. }));
                    assert!(matches!(children[1], Node::Definition { .. }));
                }
                other => panic!("{other:?}"),
            },
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn curly_brace_with_no_preceding_symbol_synthesizes_an_anonymous_object() {
        let xs = items("{x}");
        assert_eq!(xs.len(), 1);
        match &xs[0] {
            Node::Evaluation { terms, .. } => match &terms[0] {
                Node::Object { symbol, children, .. } => {
                    assert_eq!(*symbol, None);
                    assert_eq!(children.len(), 1);
                    assert!(matches!(children[0], Node::Sequence { kind: SequenceKind::DefinitionBody, .. }));
                }
                other => panic!("{other:?}"),
            },
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn unmatched_close_paren_is_a_syntax_error_term() {
        let xs = items("a) b");
        assert_eq!(xs.len(), 2);
        match &xs[0] {
            Node::Evaluation { terms, .. } => assert!(matches!(terms[0], Node::Object { .. })),
            other => panic!("{other:?}"),
        }
        match &xs[1] {
            Node::Evaluation { terms, .. } => {
                assert!(matches!(terms[0], Node::SyntaxError(..)));
                assert!(matches!(terms[1], Node::Object { .. }));
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn unclosed_sequence_synthesizes_error_at_eof() {
        let xs = items("a ( b");
        assert_eq!(xs.len(), 1);
        match &xs[0] {
            Node::Evaluation { terms, .. } => match &terms[1] {
                Node::Sequence { children, .. } => {
                    assert_eq!(children.len(), 2);
                    assert!(matches!(children[1], Node::SyntaxError(..)));
                }
                other => panic!("{other:?}"),
            },
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn definition_with_no_body_is_none() {
        let xs = items("f=)");
        assert_eq!(xs.len(), 2);
        match &xs[0] {
            Node::Evaluation { terms, .. } => match &terms[0] {
                Node::Object { children, .. } => {
                    assert!(matches!(&children[0], Node::Definition { body: None, .. }));
                }
                other => panic!("{other:?}"),
            },
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn definition_block_closes_object_then_juxtaposes_next_term() {
        // No separator between `}` and `2`, so they land in one Evaluation, same as `f 2`.
        let xs = items("f{1}2");
        assert_eq!(xs.len(), 1);
        match &xs[0] {
            Node::Evaluation { terms, .. } => {
                assert_eq!(terms.len(), 2);
                assert!(matches!(&terms[0], Node::Object { symbol, .. } if symbol.as_deref() == Some("f")));
                assert!(matches!(terms[1], Node::Integer(2, _)));
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn explicit_flag_set_only_by_comma() {
        match parse_source("a\nb") {
            Node::Module { explicit, .. } => assert!(!explicit),
            other => panic!("{other:?}"),
        }
        match parse_source("a,b") {
            Node::Module { explicit, .. } => assert!(explicit),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn structural_positions_enclose_their_descendants() {
        fn check(node: &Node) {
            let pos = node.position();
            let children: Vec<&Node> = match node {
                Node::Module { items, .. } => items.iter().collect(),
                Node::Sequence { children, .. } => children.iter().collect(),
                Node::Evaluation { terms, .. } => terms.iter().collect(),
                Node::Object { children, .. } => children.iter().collect(),
                Node::Definition { body, .. } => body.iter().map(|b| b.as_ref()).collect(),
                _ => Vec::new(),
            };
            for child in children {
                assert!(child.position().ch >= pos.ch);
                assert!(child.position().end() <= pos.end(), "{:?} does not enclose {:?}", pos, child.position());
                check(child);
            }
        }
        check(&parse_source("f[x]={ a(1, 2)\nb }\n# trailing"));
    }
}
