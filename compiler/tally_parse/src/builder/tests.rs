use super::*;
use crate::parse_line;
use pretty_assertions::assert_eq;
use tally_ir::{Limits, MemoryError};

struct Fixture {
    memory: Memory,
    vars: VariableStore,
    limits: Limits,
}

impl Fixture {
    fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    fn with_limits(limits: Limits) -> Self {
        Fixture {
            memory: Memory::with_limits(&limits),
            vars: VariableStore::with_limits(&limits),
            limits,
        }
    }

    fn parse(&mut self, line: &str) -> Result<Vec<NodeId>, ParseError> {
        parse_line(line, &mut self.memory, &mut self.vars, &self.limits)
    }

    fn parse_err(&mut self, line: &str) -> ParseError {
        self.parse(line).unwrap_err()
    }
}

#[test]
fn test_group_becomes_internal_node() {
    let mut fx = Fixture::new();
    let roots = fx.parse("(- 3 4)").unwrap();
    assert_eq!(roots.len(), 1);

    let Node::Internal { op, left, right } = fx.memory.node(roots[0]).unwrap() else {
        panic!("expected internal node");
    };
    assert_eq!(op, Op::Sub);
    // Children keep source order.
    assert_eq!(fx.memory.leaf_value(left), Ok(3));
    assert_eq!(fx.memory.leaf_value(right), Ok(4));
    assert_eq!(roots[0].tier(), Tier::Transient);
}

#[test]
fn test_roots_in_source_order() {
    let mut fx = Fixture::new();
    let roots = fx.parse("1 (+ 2 3) 4").unwrap();
    assert_eq!(roots.len(), 3);
    assert_eq!(fx.memory.leaf_value(roots[0]), Ok(1));
    assert!(matches!(
        fx.memory.node(roots[1]),
        Ok(Node::Internal { op: Op::Add, .. })
    ));
    assert_eq!(fx.memory.leaf_value(roots[2]), Ok(4));
}

#[test]
fn test_nested_groups() {
    let mut fx = Fixture::new();
    let roots = fx.parse("(* (+ 1 2) (- 5 3))").unwrap();
    assert_eq!(roots.len(), 1);
    let Node::Internal { op, left, right } = fx.memory.node(roots[0]).unwrap() else {
        panic!("expected internal node");
    };
    assert_eq!(op, Op::Mul);
    assert!(matches!(
        fx.memory.node(left),
        Ok(Node::Internal { op: Op::Add, .. })
    ));
    assert!(matches!(
        fx.memory.node(right),
        Ok(Node::Internal { op: Op::Sub, .. })
    ));
}

#[test]
fn test_identifier_wraps_durable_leaf() {
    let mut fx = Fixture::new();
    let roots = fx.parse("x x").unwrap();
    assert_eq!(roots[0], roots[1]);
    assert_eq!(roots[0].tier(), Tier::Durable);
    assert_eq!(fx.vars.get("x"), Some(roots[0]));
}

#[test]
fn test_empty_line_has_no_roots() {
    let mut fx = Fixture::new();
    assert_eq!(fx.parse("   "), Ok(vec![]));
}

#[test]
fn test_underflow_on_short_group() {
    let mut fx = Fixture::new();
    let err = fx.parse_err("(+ 1)");
    assert_eq!(err.kind, ParseErrorKind::StackUnderflow { depth: 3 });
    assert_eq!(err.span, Span::new(4, 5));
    assert_eq!(err.code(), "E1001");
}

#[test]
fn test_lone_close_paren() {
    let mut fx = Fixture::new();
    let err = fx.parse_err(")");
    assert_eq!(err.kind, ParseErrorKind::StackUnderflow { depth: 0 });
}

#[test]
fn test_missing_operator() {
    let mut fx = Fixture::new();
    let err = fx.parse_err("(1 2 3)");
    assert_eq!(err.kind, ParseErrorKind::ExpectedOperator);
    assert_eq!(err.span, Span::new(1, 2));
}

#[test]
fn test_operator_in_operand_position() {
    let mut fx = Fixture::new();
    let err = fx.parse_err("(+ 1 2 +)");
    assert_eq!(err.kind, ParseErrorKind::ExpectedOperand);
}

#[test]
fn test_missing_group_open() {
    let mut fx = Fixture::new();
    let err = fx.parse_err("1 + 2 3)");
    assert_eq!(err.kind, ParseErrorKind::MissingGroupOpen);
    assert_eq!(err.span, Span::new(0, 1));
}

#[test]
fn test_unclosed_group() {
    let mut fx = Fixture::new();
    let err = fx.parse_err("(+ 1 2");
    assert_eq!(err.kind, ParseErrorKind::UnclosedGroup);
    assert_eq!(err.span, Span::new(0, 1));
}

#[test]
fn test_dangling_operator() {
    let mut fx = Fixture::new();
    let err = fx.parse_err("* 2 3");
    assert_eq!(err.kind, ParseErrorKind::DanglingOperator { op: Op::Mul });
}

#[test]
fn test_identifier_too_long() {
    let mut fx = Fixture::new();
    let line = format!("(= {} 1)", "v".repeat(32));
    let err = fx.parse_err(&line);
    assert_eq!(
        err.kind,
        ParseErrorKind::IdentifierTooLong { len: 32, max: 31 }
    );
    assert_eq!(err.span, Span::new(3, 35));
    assert!(fx.vars.is_empty());
}

#[test]
fn test_stack_overflow() {
    let mut fx = Fixture::with_limits(Limits {
        stack_capacity: 3,
        ..Limits::default()
    });
    let err = fx.parse_err("1 2 3 4");
    assert_eq!(err.kind, ParseErrorKind::StackOverflow { capacity: 3 });
    assert_eq!(err.span, Span::new(6, 7));
}

#[test]
fn test_transient_exhaustion() {
    let mut fx = Fixture::with_limits(Limits {
        transient_slots: 4,
        ..Limits::default()
    });
    // Two literals fill the tier; the group node has no room.
    let err = fx.parse_err("(+ 1 2)");
    assert!(matches!(
        err.kind,
        ParseErrorKind::Memory(MemoryError::Exhausted {
            tier: Tier::Transient,
            ..
        })
    ));
}

mod proptest_builder {
    use super::*;
    use proptest::prelude::*;

    fn expr() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            (0u32..1000).prop_map(|n| n.to_string()),
            "[a-z]{1,3}",
        ];
        leaf.prop_recursive(4, 32, 2, |inner| {
            (
                prop::sample::select(vec!['+', '-', '*', '/', '=']),
                inner.clone(),
                inner,
            )
                .prop_map(|(op, l, r)| format!("({op} {l} {r})"))
        })
    }

    proptest! {
        #[test]
        fn one_root_per_expression(exprs in proptest::collection::vec(expr(), 0..5)) {
            let mut fx = Fixture::new();
            let line = exprs.join(" ");
            let roots = fx.parse(&line).unwrap();
            prop_assert_eq!(roots.len(), exprs.len());
        }
    }
}
