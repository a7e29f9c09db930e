// End-to-end tests for the front end

use pasfront::config::Config;
use pasfront::parser::{Lexer, ReservedWordTable, SourceBuffer, Token, TokenKind};
use pasfront::semantic::{SymbolNode, ValueType};
use pasfront::{compile, Compilation};
use std::fs;
use std::path::Path;

fn compile_str(source: &str) -> Compilation {
    compile(source, &ReservedWordTable::builtin(), &Config::default())
}

fn tokenize(source: &str) -> (SourceBuffer, Vec<Token>) {
    let mut lexer = Lexer::new(SourceBuffer::new(source), ReservedWordTable::builtin());
    let tokens = lexer.tokenize();
    (lexer.into_source(), tokens)
}

fn messages(compilation: &Compilation, kind: TokenKind) -> Vec<String> {
    compilation
        .tokens
        .iter()
        .filter(|t| t.kind == kind)
        .filter_map(|t| t.message.clone())
        .collect()
}

#[test_log::test]
fn test_declared_assignment_is_clean() {
    let compilation = compile_str("program p(); var x: integer; begin x := 1 end.");

    assert_eq!(compilation.diagnostics().count(), 0);

    let program = compilation.scopes.program().unwrap();
    assert_eq!(program.name, "p");
    let leaves: Vec<_> = program.symbols().collect();
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].name, "x");
    assert_eq!(leaves[0].value_type, ValueType::Int);
    assert_eq!(leaves[0].offset, 0);
    assert!(program
        .children
        .iter()
        .all(|child| matches!(child, SymbolNode::Leaf(_))));
}

#[test_log::test]
fn test_undeclared_assignment_reaches_the_end() {
    let compilation = compile_str("program p(); begin x := 1 end.");

    let errors = messages(&compilation, TokenKind::SemanticError);
    assert_eq!(errors, vec!["no variable named x is declared in this scope"]);
    assert_eq!(compilation.diagnostic_count(TokenKind::SyntaxError), 0);

    // The terminal '.' was matched and nothing after it was skipped.
    let last = compilation.tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::EndOfInput);
    let dot = &compilation.tokens[compilation.tokens.len() - 2];
    assert_eq!(dot.kind, TokenKind::Dot);
}

#[test]
fn test_duplicate_declaration_keeps_the_first() {
    let compilation = compile_str(
        "program p();\nprocedure q;\nvar x : integer;\nvar x : real;\nbegin end;\nbegin end.",
    );

    let errors = messages(&compilation, TokenKind::SemanticError);
    assert_eq!(
        errors,
        vec!["a variable or parameter named x is already defined in this scope"]
    );
    let at = compilation
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::SemanticError)
        .unwrap();
    assert_eq!(at.position.line, 3);

    let program = compilation.scopes.program().unwrap();
    let q = program.scopes().next().unwrap();
    let q = compilation.scopes.get(q).unwrap();
    let xs: Vec<_> = q.symbols().filter(|s| s.name == "x").collect();
    assert_eq!(xs.len(), 1);
    assert_eq!(xs[0].value_type, ValueType::Int);
}

#[test]
fn test_call_arity_mismatch_keeps_parsing() {
    let compilation = compile_str(
        "program p();\n\
         var y : integer;\n\
         procedure foo(a : integer);\n\
         begin end;\n\
         begin\n\
           call foo(1, 2);\n\
           y := 2.5\n\
         end.",
    );

    let errors = messages(&compilation, TokenKind::SemanticError);
    assert_eq!(
        errors,
        vec![
            "procedure foo called with 2 arguments but expects 1",
            "cannot assign real to a variable of type integer",
        ]
    );
    assert_eq!(compilation.diagnostic_count(TokenKind::SyntaxError), 0);
}

#[test]
fn test_numeric_literal_rules() {
    let cases = [
        ("007.5", Some("invalid real: leading zeros in xx")),
        ("7.50", Some("invalid real: trailing zeros in yy")),
        ("12345.12345", None),
        ("123456.1", Some("invalid real: xx too long")),
    ];

    for (lexeme, error) in cases {
        let (_, tokens) = tokenize(lexeme);
        let token = &tokens[0];
        assert_eq!(token.lexeme, lexeme, "lexeme of {lexeme}");
        match error {
            Some(message) => {
                assert_eq!(token.kind, TokenKind::LexicalError, "kind of {lexeme}");
                assert_eq!(token.message.as_deref(), Some(message));
            }
            None => assert_eq!(token.kind, TokenKind::Number, "kind of {lexeme}"),
        }
        assert_eq!(tokens[1].kind, TokenKind::EndOfInput);
    }
}

#[test]
fn test_short_words_lex_exactly() {
    for word in ["a", "x1", "begin", "counter99", "abcdefghij", "z0z0z0z0z0"] {
        let (_, tokens) = tokenize(&format!(" {word} "));
        let token = &tokens[0];
        assert!(
            matches!(token.kind, TokenKind::Identifier | TokenKind::Reserved),
            "{word} lexed as {}",
            token.kind
        );
        assert_eq!(token.lexeme, word);
    }
}

/// Character offset of every line start in the buffer's text.
fn line_starts(source: &SourceBuffer) -> (String, Vec<usize>) {
    let mut text = String::new();
    let mut starts = Vec::new();
    let mut offset = 0;
    for n in 0..source.line_count() {
        let line = source.line_text(n).unwrap();
        starts.push(offset);
        offset += line.chars().count() + 1;
        text.push_str(&line);
        text.push('\n');
    }
    (text, starts)
}

#[test]
fn test_lexemes_and_whitespace_rebuild_the_source() {
    let source = "program p ( ) ;\n  var abcdefghijkl : integer ;\n begin x := 007.5 @ 12345.12345 end .";
    let (buffer, tokens) = tokenize(source);
    let (text, starts) = line_starts(&buffer);
    let chars: Vec<char> = text.chars().collect();

    let mut rebuilt = String::new();
    let mut consumed = 0;
    for token in tokens.iter().filter(|t| t.kind != TokenKind::EndOfInput) {
        let start = starts[token.position.line] + token.position.column;
        let gap: String = chars[consumed..start].iter().collect();
        assert!(gap.chars().all(char::is_whitespace), "gap {gap:?} before {token}");
        rebuilt.push_str(&gap);
        rebuilt.push_str(&token.lexeme);
        consumed = start + token.lexeme.chars().count();
    }
    rebuilt.extend(&chars[consumed..]);

    assert_eq!(rebuilt, text);
    assert!(tokens.iter().any(|t| t.kind == TokenKind::LexicalError));
}

#[test]
fn test_positions_never_go_backwards() {
    let source = "program p(); begin\n x := 1 @ # $ 00 ;;; ]] [\n y := abcdefghijklmnop end.";
    let (_, tokens) = tokenize(source);

    assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfInput);
    for pair in tokens.windows(2) {
        assert!(
            pair[0].position < pair[1].position,
            "{} then {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_garbage_terminates() {
    for source in ["", ")))", "program", "program p(; begin end", "begin end.", "@@@@"] {
        let compilation = compile_str(source);
        let ends = compilation
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::EndOfInput)
            .count();
        assert_eq!(ends, 1, "{source:?}");
    }
}

#[test]
fn test_sample_program_is_clean() {
    let source = fs::read_to_string(Path::new("demos/sample.pas")).unwrap();
    let compilation = compile_str(&source);

    let diagnostics: Vec<String> = compilation.diagnostics().map(|t| t.to_string()).collect();
    assert!(diagnostics.is_empty(), "{diagnostics:#?}");

    let program = compilation.scopes.program().unwrap();
    assert_eq!(program.name, "sample");
    assert_eq!(program.offset_counter, 92);
    let procedures: Vec<String> = program
        .scopes()
        .filter_map(|id| compilation.scopes.get(id))
        .map(|scope| scope.name.clone())
        .collect();
    assert_eq!(procedures, vec!["fill", "report"]);
}

#[test_log::test]
fn test_error_program_reports_every_kind() {
    let source = fs::read_to_string(Path::new("demos/errors.pas")).unwrap();
    let compilation = compile_str(&source);

    assert_eq!(compilation.diagnostic_count(TokenKind::LexicalError), 1);
    assert_eq!(compilation.diagnostic_count(TokenKind::SyntaxError), 1);

    let errors = messages(&compilation, TokenKind::SemanticError);
    assert_eq!(
        errors,
        vec![
            "a variable or parameter named x is already defined in this scope",
            "array bounds must be integers with lower <= upper, found 5..1",
            "procedure foo called with 2 arguments but expects 1",
            "cannot assign real to a variable of type integer",
            "condition must be boolean, found integer",
        ]
    );
}
