//! Recursive-descent parser with a precedence-climbing expression parser.
//!
//! The parser is an explicit value (not a process-wide singleton): it owns
//! the [`Lexer`] driving it and borrows the [`Interner`] and [`Handler`] the
//! surrounding compilation session already owns. It aborts at the first
//! diagnostic it emits — there is no error recovery, so every parse method
//! returns `Result<T, ()>` where `Err(())` means "a diagnostic was already
//! recorded, stop".

use rustc_hash::FxHashSet;

use cc_lex::{Lexer, Token, TokenKind};
use cc_util::{DiagnosticBuilder, Handler, Interner, Span, Symbol};

use crate::ast::{
    AssignStmt, BaseType, BinOp, CallSuffix, DeclStmt, Expr, Function, IfStmt, Param, Program,
    ReturnStmt, Stmt, Type, UnOp, WhileStmt,
};

type PResult<T> = Result<T, ()>;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    interner: &'a mut Interner,
    handler: &'a mut Handler,
    function_names: FxHashSet<Symbol>,
    prev_span: Span,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, interner: &'a mut Interner, handler: &'a mut Handler) -> Self {
        Self {
            lexer: Lexer::new(source),
            interner,
            handler,
            function_names: FxHashSet::default(),
            prev_span: Span::DUMMY,
        }
    }

    pub fn parse_program(&mut self) -> PResult<Program<'a>> {
        let mut functions = Vec::new();
        while !self.check(TokenKind::Eof) {
            functions.push(self.parse_function()?);
        }
        Ok(Program { functions })
    }

    fn parse_function(&mut self) -> PResult<Function<'a>> {
        let return_type = self.parse_type()?;
        let name_token = self.expect(TokenKind::Identifier, "expected function name")?;
        let name = self.intern(name_token);

        if !self.function_names.insert(name) {
            return self.error_at(name_token.span, format!("function '{}' is already declared", name_token.text));
        }

        self.expect(TokenKind::LParen, "expected '(' after function name")?;
        let mut declared = FxHashSet::default();
        let params = self.parse_params(&mut declared)?;
        self.expect(TokenKind::RParen, "expected ')' after parameters")?;

        let body_start = self.peek_span(0);
        self.expect(TokenKind::LBrace, "expected '{' to start function body")?;
        let mut body = self.parse_declarations(&mut declared)?;
        body.extend(self.parse_statements()?);
        let close = self.expect(TokenKind::RBrace, "expected '}' to close function body")?;

        Ok(Function {
            return_type,
            name,
            name_span: name_token.span,
            params,
            body,
            span: body_start.to(close.span),
        })
    }

    fn parse_params(&mut self, declared: &mut FxHashSet<Symbol>) -> PResult<Vec<Param>> {
        if self.check(TokenKind::RParen) {
            return Ok(Vec::new());
        }
        if self.check(TokenKind::KwVoid) && self.peek(1).kind == TokenKind::RParen {
            self.eat();
            return Ok(Vec::new());
        }

        let mut params = Vec::new();
        loop {
            let ty = self.parse_type()?;
            let name_token = self.expect(TokenKind::Identifier, "expected parameter name")?;
            let name = self.intern(name_token);
            if !declared.insert(name) {
                return self.error_at(
                    name_token.span,
                    format!("parameter '{}' is already declared in this function", name_token.text),
                );
            }
            params.push(Param { ty, name, span: name_token.span });
            if self.check(TokenKind::Comma) {
                self.eat();
                continue;
            }
            break;
        }
        Ok(params)
    }

    fn parse_type(&mut self) -> PResult<Type> {
        let base = match self.peek(0).kind {
            TokenKind::KwVoid => BaseType::Void,
            TokenKind::KwInt => BaseType::Int,
            TokenKind::KwChar => BaseType::Char,
            TokenKind::KwDouble => BaseType::Double,
            _ => return self.error_here("expected a type"),
        };
        self.eat();
        let mut pointer_depth = 0;
        while self.check(TokenKind::Star) {
            self.eat();
            pointer_depth += 1;
        }
        Ok(Type { base, pointer_depth })
    }

    fn parse_declarations(&mut self, declared: &mut FxHashSet<Symbol>) -> PResult<Vec<Stmt<'a>>> {
        let mut decls = Vec::new();
        while self.starts_type() {
            decls.push(self.parse_decl(declared)?);
        }
        Ok(decls)
    }

    fn parse_decl(&mut self, declared: &mut FxHashSet<Symbol>) -> PResult<Stmt<'a>> {
        let ty = self.parse_type()?;
        let name_token = self.expect(TokenKind::Identifier, "expected declared name")?;
        let name = self.intern(name_token);
        if !declared.insert(name) {
            return self.error_at(name_token.span, format!("'{}' is already declared in this function", name_token.text));
        }
        let init = if self.check(TokenKind::Eq) {
            self.eat();
            Some(self.parse_expr(0)?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "expected ';' after declaration")?;
        Ok(Stmt::Decl(DeclStmt { ty, name, name_span: name_token.span, init }))
    }

    fn starts_type(&mut self) -> bool {
        matches!(self.peek(0).kind, TokenKind::KwVoid | TokenKind::KwInt | TokenKind::KwChar | TokenKind::KwDouble)
    }

    fn parse_statements(&mut self) -> PResult<Vec<Stmt<'a>>> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> PResult<Stmt<'a>> {
        match self.peek(0).kind {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::Identifier if self.peek(1).kind == TokenKind::Eq => self.parse_assignment(),
            TokenKind::Identifier => self.parse_call_stmt(),
            _ => self.error_here("expected a statement"),
        }
    }

    fn parse_block(&mut self) -> PResult<Stmt<'a>> {
        self.eat(); // '{'
        let stmts = self.parse_statements()?;
        self.expect(TokenKind::RBrace, "expected '}' to close block")?;
        Ok(Stmt::Block(stmts))
    }

    fn parse_if(&mut self) -> PResult<Stmt<'a>> {
        let start = self.peek_span(0);
        self.eat(); // 'if'
        self.expect(TokenKind::LParen, "expected '(' after 'if'")?;
        let cond = self.parse_expr(0)?;
        self.expect(TokenKind::RParen, "expected ')' after if condition")?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.check(TokenKind::KwElse) {
            self.eat();
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        let span = start.to(self.last_span());
        Ok(Stmt::If(IfStmt { cond, then_branch, else_branch, span }))
    }

    fn parse_while(&mut self) -> PResult<Stmt<'a>> {
        let start = self.peek_span(0);
        self.eat(); // 'while'
        self.expect(TokenKind::LParen, "expected '(' after 'while'")?;
        let cond = self.parse_expr(0)?;
        self.expect(TokenKind::RParen, "expected ')' after while condition")?;
        let body = Box::new(self.parse_stmt()?);
        let span = start.to(self.last_span());
        Ok(Stmt::While(WhileStmt { cond, body, span }))
    }

    fn parse_return(&mut self) -> PResult<Stmt<'a>> {
        let start = self.peek_span(0);
        self.eat(); // 'return'
        let value = if self.check(TokenKind::Semicolon) { None } else { Some(self.parse_expr(0)?) };
        let end = self.expect(TokenKind::Semicolon, "expected ';' after return")?;
        Ok(Stmt::Return(ReturnStmt { value, span: start.to(end.span) }))
    }

    fn parse_assignment(&mut self) -> PResult<Stmt<'a>> {
        let name_token = self.eat();
        let name = self.intern(name_token);
        self.eat(); // '='
        let value = self.parse_expr(0)?;
        self.expect(TokenKind::Semicolon, "expected ';' after assignment")?;
        Ok(Stmt::Assign(AssignStmt { name, name_span: name_token.span, value }))
    }

    fn parse_call_stmt(&mut self) -> PResult<Stmt<'a>> {
        let expr = self.parse_expr(0)?;
        self.expect(TokenKind::Semicolon, "expected ';' after expression statement")?;
        Ok(Stmt::Expr(expr))
    }

    // --- expressions: precedence climbing -------------------------------

    fn parse_expr(&mut self, min_prec: u8) -> PResult<Expr<'a>> {
        let mut left = self.parse_unary()?;
        loop {
            let (prec, op) = match binary_op(self.peek(0).kind) {
                Some(x) => x,
                None => break,
            };
            if prec < min_prec {
                break;
            }
            self.eat();
            let right = self.parse_expr(prec + 1)?;
            let span = left.span().to(right.span());
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<Expr<'a>> {
        let token = self.peek(0);
        let op = match token.kind {
            TokenKind::Plus => UnOp::Plus,
            TokenKind::Minus => UnOp::Minus,
            TokenKind::Bang => UnOp::Not,
            _ => return self.parse_primary(),
        };
        self.eat();
        let operand = self.parse_unary()?;
        let span = token.span.to(operand.span());
        Ok(Expr::Unary { op, operand: Box::new(operand), span })
    }

    fn parse_primary(&mut self) -> PResult<Expr<'a>> {
        let token = self.peek(0);
        match token.kind {
            TokenKind::IntLiteral => {
                self.eat();
                Ok(Expr::IntLiteral { digits: token.text, span: token.span })
            }
            TokenKind::DoubleLiteral => {
                self.eat();
                let value: f64 = token.text.parse().map_err(|_| ())?;
                Ok(Expr::DoubleLiteral { value, span: token.span })
            }
            TokenKind::StringLiteral => {
                self.eat();
                let value = self.interner.intern(token.text);
                Ok(Expr::StringLiteral { value, span: token.span })
            }
            TokenKind::Identifier => {
                self.eat();
                let name = self.intern(token);
                let call = if self.check(TokenKind::LParen) { Some(self.parse_call_suffix()?) } else { None };
                let span = match &call {
                    Some(c) => token.span.to(c.span),
                    None => token.span,
                };
                Ok(Expr::Ident { name, span, call })
            }
            TokenKind::LParen => {
                self.eat();
                let inner = self.parse_expr(0)?;
                let close = self.expect(TokenKind::RParen, "expected ')' to close parenthesised expression")?;
                Ok(Expr::Paren { inner: Box::new(inner), span: token.span.to(close.span) })
            }
            _ => self.error_here("expected an expression"),
        }
    }

    fn parse_call_suffix(&mut self) -> PResult<CallSuffix<'a>> {
        let open = self.eat(); // '('
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr(0)?);
                if self.check(TokenKind::Comma) {
                    self.eat();
                    continue;
                }
                break;
            }
        }
        let close = self.expect(TokenKind::RParen, "expected ')' to close call arguments")?;
        Ok(CallSuffix { args, span: open.span.to(close.span) })
    }

    // --- token helpers ----------------------------------------------------

    fn peek(&mut self, k: usize) -> Token<'a> {
        self.lexer.peek(k)
    }

    fn peek_span(&mut self, k: usize) -> Span {
        self.peek(k).span
    }

    /// The span of the most recently consumed token — used as the end point
    /// for constructs whose own span is the union of a leading keyword and
    /// whatever was last parsed inside them (`if`, `while`).
    fn last_span(&mut self) -> Span {
        self.prev_span
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        self.peek(0).kind == kind
    }

    fn eat(&mut self) -> Token<'a> {
        let token = self.lexer.eat();
        self.prev_span = token.span;
        token
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> PResult<Token<'a>> {
        if self.check(kind) {
            Ok(self.eat())
        } else {
            self.error_here(message)
        }
    }

    fn intern(&mut self, token: Token<'a>) -> Symbol {
        self.interner.intern(token.text)
    }

    fn error_here<T>(&mut self, message: impl Into<String>) -> PResult<T> {
        let span = self.peek(0).span;
        self.error_at(span, message)
    }

    fn error_at<T>(&mut self, span: Span, message: impl Into<String>) -> PResult<T> {
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
        Err(())
    }
}

fn binary_op(kind: TokenKind) -> Option<(u8, BinOp)> {
    Some(match kind {
        TokenKind::OrOr => (1, BinOp::Or),
        TokenKind::AndAnd => (2, BinOp::And),
        TokenKind::EqEq => (3, BinOp::Eq),
        TokenKind::NotEq => (3, BinOp::Ne),
        TokenKind::Lt => (4, BinOp::Lt),
        TokenKind::Le => (4, BinOp::Le),
        TokenKind::Gt => (4, BinOp::Gt),
        TokenKind::Ge => (4, BinOp::Ge),
        TokenKind::Plus => (5, BinOp::Add),
        TokenKind::Minus => (5, BinOp::Sub),
        TokenKind::Star => (6, BinOp::Mul),
        TokenKind::Slash => (6, BinOp::Div),
        TokenKind::Percent => (6, BinOp::Mod),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one_expr(source: &str) -> Expr<'static> {
        let leaked_interner: &'static mut Interner = Box::leak(Box::new(Interner::new()));
        let leaked_handler: &'static mut Handler = Box::leak(Box::new(Handler::new()));
        let leaked_source: &'static str = Box::leak(format!("int main(void){{ int x = {source}; return x; }}").into_boxed_str());
        let mut parser = Parser::new(leaked_source, leaked_interner, leaked_handler);
        let program = parser.parse_program().expect("parses");
        assert!(!parser.handler.has_errors());
        let func = program.functions.into_iter().next().unwrap();
        let first = func.body.into_iter().next().unwrap();
        match first {
            Stmt::Decl(d) => d.init.unwrap(),
            _ => panic!("expected a decl"),
        }
    }

    #[test]
    fn left_associative_minus_chain() {
        let expr = parse_one_expr("1-2-3");
        match &expr {
            Expr::Binary { op: BinOp::Sub, left, right, .. } => {
                assert!(matches!(**right, Expr::IntLiteral { digits: "3", .. }));
                match &**left {
                    Expr::Binary { op: BinOp::Sub, .. } => {}
                    other => panic!("expected nested subtraction, got {other:?}"),
                }
            }
            other => panic!("expected subtraction at root, got {other:?}"),
        }
    }

    #[test]
    fn precedence_pulls_multiplication_to_the_right() {
        let expr = parse_one_expr("1-2*3");
        match &expr {
            Expr::Binary { op: BinOp::Sub, right, .. } => {
                assert!(matches!(**right, Expr::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("expected subtraction at root, got {other:?}"),
        }
    }

    #[test]
    fn precedence_keeps_multiplication_on_the_left() {
        let expr = parse_one_expr("1*2-3");
        match &expr {
            Expr::Binary { op: BinOp::Sub, left, .. } => {
                assert!(matches!(**left, Expr::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("expected subtraction at root, got {other:?}"),
        }
    }

    #[test]
    fn double_negation_is_not_nested() {
        let expr = parse_one_expr("!!x");
        match &expr {
            Expr::Unary { op: UnOp::Not, operand, .. } => {
                assert!(matches!(**operand, Expr::Unary { op: UnOp::Not, .. }));
            }
            other => panic!("expected not at root, got {other:?}"),
        }
    }

    #[test]
    fn negated_parenthesised_negation() {
        let expr = parse_one_expr("-(-x)");
        match &expr {
            Expr::Unary { op: UnOp::Minus, operand, .. } => {
                assert!(matches!(**operand, Expr::Paren { .. }));
            }
            other => panic!("expected minus at root, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_parameter_names_are_rejected() {
        let mut interner = Interner::new();
        let mut handler = Handler::new();
        let mut parser = Parser::new("int f(int a, int a) { return; }", &mut interner, &mut handler);
        let _ = parser.parse_program();
        assert!(handler.has_errors());
    }

    #[test]
    fn parameter_shadowed_by_local_is_rejected() {
        let mut interner = Interner::new();
        let mut handler = Handler::new();
        let mut parser = Parser::new("int f(int a) { int a; return a; }", &mut interner, &mut handler);
        let _ = parser.parse_program();
        assert!(handler.has_errors());
    }

    #[test]
    fn trailing_code_after_return_is_accepted() {
        let mut interner = Interner::new();
        let mut handler = Handler::new();
        let mut parser =
            Parser::new("int main(void) { return 1; return 2; }", &mut interner, &mut handler);
        let program = parser.parse_program().expect("parses");
        assert!(!handler.has_errors());
        assert_eq!(program.functions[0].body.len(), 2);
    }
}
