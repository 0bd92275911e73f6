use monkey_diagnostic::span::Span;

use super::Lexer;
use crate::token::{Token, TokenKind};
use crate::utils::assert_snapshot_with_source;

fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.is(TokenKind::Eof);
        tokens.push(token);
        if done {
            break tokens;
        }
    }
}

fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| format!("{} {:?}", token.kind, token.literal))
        .collect::<Vec<_>>()
        .join("\n")
}

macro_rules! assert_lex {
    ($source:expr, @$snapshot:literal) => {{
        let source = $source;
        assert_snapshot_with_source!(source => render(&lex(source)), @$snapshot);
    }};
}

macro_rules! assert_kinds {
    ($source:expr => [$($kind:ident $literal:literal),* $(,)?]) => {{
        let actual: Vec<(TokenKind, String)> = lex($source)
            .into_iter()
            .map(|token| (token.kind, token.literal))
            .collect();
        let expected: Vec<(TokenKind, String)> =
            vec![$((TokenKind::$kind, $literal.to_owned())),*];

        assert_eq!(actual, expected);
    }};
}

#[test]
fn fixed_literals_lex_alone() {
    let cases = [
        ("=", TokenKind::Assign),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("!", TokenKind::Bang),
        ("*", TokenKind::Asterisk),
        ("/", TokenKind::Slash),
        ("<", TokenKind::Lt),
        (">", TokenKind::Gt),
        ("==", TokenKind::Eq),
        ("!=", TokenKind::NotEq),
        (",", TokenKind::Comma),
        (";", TokenKind::Semicolon),
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        ("{", TokenKind::LBrace),
        ("}", TokenKind::RBrace),
        ("fn", TokenKind::Function),
        ("let", TokenKind::Let),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("return", TokenKind::Return),
    ];

    for (source, kind) in cases {
        let tokens = lex(source);
        assert_eq!(tokens.len(), 2, "{source:?}");
        assert_eq!(tokens[0].kind, kind, "{source:?}");
        assert_eq!(tokens[0].literal, source);
        assert_eq!(tokens[0].span, Span::new(0, source.len()));
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

#[test]
fn simple_symbols() {
    assert_lex!("=+(){},;", @r#"
    = "="
    + "+"
    ( "("
    ) ")"
    { "{"
    } "}"
    , ","
    ; ";"
    EOF ""
    "#);
}

#[test]
fn two_char_operators() {
    assert_kinds!("== != = ! =! !==" => [
        Eq "==",
        NotEq "!=",
        Assign "=",
        Bang "!",
        Assign "=",
        Bang "!",
        NotEq "!=",
        Assign "=",
        Eof "",
    ]);
}

#[test]
fn two_char_operators_between_operands() {
    let tokens = lex("a==b!=c");

    assert_eq!(tokens[1].kind, TokenKind::Eq);
    assert_eq!(tokens[1].span, Span::new(1, 3));
    assert_eq!(tokens[3].kind, TokenKind::NotEq);
    assert_eq!(tokens[3].span, Span::new(4, 6));
    assert_eq!(tokens[4].literal, "c");
}

#[test]
fn operator_at_end_of_input() {
    assert_kinds!("x =" => [Ident "x", Assign "=", Eof ""]);
    assert_kinds!("!" => [Bang "!", Eof ""]);
}

#[test]
fn identifiers_and_numbers() {
    assert_kinds!("foo_bar _x abc123 007" => [
        Ident "foo_bar",
        Ident "_x",
        Ident "abc",
        Int "123",
        Int "007",
        Eof "",
    ]);
}

#[test]
fn illegal_characters() {
    assert_kinds!("let a = 1 @ 2 $;" => [
        Let "let",
        Ident "a",
        Assign "=",
        Int "1",
        Illegal "@",
        Int "2",
        Illegal "$",
        Semicolon ";",
        Eof "",
    ]);
}

#[test]
fn nul_byte_is_illegal_not_eof() {
    assert_kinds!("1\u{0}2" => [Int "1", Illegal "\u{0}", Int "2", Eof ""]);
}

#[test]
fn non_ascii_is_one_illegal_token() {
    assert_kinds!("é1" => [Illegal "é", Int "1", Eof ""]);
}

#[test]
fn eof_is_repeated() {
    let mut lexer = Lexer::new("  x  ");

    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    for _ in 0..3 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Eof);
        assert_eq!(token.literal, "");
        assert_eq!(token.span, Span::empty(5));
    }
}

#[test]
fn empty_and_blank_input() {
    assert_kinds!("" => [Eof ""]);
    assert_kinds!(" \t\r\n " => [Eof ""]);
}

#[test]
fn spans_track_byte_offsets() {
    let tokens = lex("let x\n  = 10;");
    let spans: Vec<Span> = tokens.iter().map(|token| token.span).collect();

    assert_eq!(
        spans,
        [
            Span::new(0, 3),
            Span::new(4, 5),
            Span::new(8, 9),
            Span::new(10, 12),
            Span::new(12, 13),
            Span::empty(13),
        ]
    );
}

#[test]
fn iterator_stops_before_eof() {
    let kinds: Vec<TokenKind> = Lexer::new("a + 1").map(|token| token.kind).collect();
    assert_eq!(kinds, [TokenKind::Ident, TokenKind::Plus, TokenKind::Int]);

    assert_eq!(Lexer::new("").count(), 0);
}

#[test]
fn program() {
    let source = r#"let five = 5;
let ten = 10;

let add = fn(x, y) {
  x + y;
};

let result = add(five, ten);
!-/*5;
5 < 10 > 5;

if (5 < 10) {
    return true;
} else {
    return false;
}

10 == 10;
10 != 9;
"#;

    assert_kinds!(source => [
        Let "let", Ident "five", Assign "=", Int "5", Semicolon ";",
        Let "let", Ident "ten", Assign "=", Int "10", Semicolon ";",
        Let "let", Ident "add", Assign "=", Function "fn", LParen "(",
        Ident "x", Comma ",", Ident "y", RParen ")", LBrace "{",
        Ident "x", Plus "+", Ident "y", Semicolon ";",
        RBrace "}", Semicolon ";",
        Let "let", Ident "result", Assign "=", Ident "add", LParen "(",
        Ident "five", Comma ",", Ident "ten", RParen ")", Semicolon ";",
        Bang "!", Minus "-", Slash "/", Asterisk "*", Int "5", Semicolon ";",
        Int "5", Lt "<", Int "10", Gt ">", Int "5", Semicolon ";",
        If "if", LParen "(", Int "5", Lt "<", Int "10", RParen ")", LBrace "{",
        Return "return", True "true", Semicolon ";",
        RBrace "}", Else "else", LBrace "{",
        Return "return", False "false", Semicolon ";",
        RBrace "}",
        Int "10", Eq "==", Int "10", Semicolon ";",
        Int "10", NotEq "!=", Int "9", Semicolon ";",
        Eof "",
    ]);
}
