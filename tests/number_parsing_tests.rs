use solver::{Pipeline, Solver, SolverError, TokenKind, tokenize};

#[test]
fn parses_integers_and_decimals() {
    let s = Solver::new();
    assert_eq!(s.evaluate("42", Pipeline::Postfix).unwrap(), 42.0);
    assert_eq!(s.evaluate("3.14", Pipeline::Ast).unwrap(), 3.14);
    assert_eq!(s.evaluate("007.50", Pipeline::Postfix).unwrap(), 7.5);
}

#[test]
fn tokens_carry_byte_positions() {
    let toks = tokenize("a + 12.5*(b)").unwrap();
    let got: Vec<(TokenKind, usize)> = toks.into_iter().map(|t| (t.kind, t.pos)).collect();
    assert_eq!(
        got,
        vec![
            (TokenKind::Ident("a".into()), 0),
            (TokenKind::Plus, 2),
            (TokenKind::Number(12.5), 4),
            (TokenKind::Star, 8),
            (TokenKind::LParen, 9),
            (TokenKind::Ident("b".into()), 10),
            (TokenKind::RParen, 11),
            (TokenKind::Eof, 12),
        ]
    );
}

#[test]
fn minus_signs_are_not_folded() {
    let kinds: Vec<TokenKind> = tokenize("--5").unwrap().into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Minus, TokenKind::Minus, TokenKind::Number(5.0), TokenKind::Eof]
    );
}

#[test]
fn identifiers_allow_underscores_and_digits() {
    let kinds: Vec<TokenKind> = tokenize("_a1 circle_area").unwrap().into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident("_a1".into()),
            TokenKind::Ident("circle_area".into()),
            TokenKind::Eof
        ]
    );
}

#[test]
fn rejects_dangling_and_leading_dots() {
    for src in ["1.", ".5", "1.2.3"] {
        match tokenize(src).unwrap_err() {
            SolverError::Syntax(msg) => assert!(msg.contains("unexpected character '.'"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn no_scientific_notation() {
    // `1e3` reads as 1 * e3
    let kinds: Vec<TokenKind> = tokenize("1e3").unwrap().into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Number(1.0), TokenKind::Ident("e3".into()), TokenKind::Eof]
    );
    let s = Solver::new();
    assert_eq!(
        s.evaluate("1e3", Pipeline::Postfix).unwrap_err(),
        SolverError::UndefinedSymbol("e3".into())
    );
}

#[test]
fn rejects_non_ascii_characters() {
    match tokenize("2 × 3").unwrap_err() {
        SolverError::Syntax(msg) => assert!(msg.contains("'×'"), "{}", msg),
        other => panic!("unexpected error: {:?}", other),
    }
}
