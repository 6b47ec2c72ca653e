//! Pretty-printing for the AST.
//!
//! The printer is purely observational: it never drives a decision any
//! other phase depends on, so unlike the lexer/parser/checker it has no
//! error path of its own — a well-typed [`Program`] always prints. Every
//! node kind gets a one-word label, indentation is two spaces per nesting
//! level, and children are visited in source order.

use std::fmt::Write as _;

use cc_par::ast::{
    AssignStmt, BaseType, BinOp, CallSuffix, DeclStmt, Expr, Function, IfStmt, Param, Program,
    ReturnStmt, Stmt, Type, UnOp, WhileStmt,
};
use cc_util::{Interner, Symbol};

/// Render `program` as a two-space-indented tree, resolving interned
/// identifiers through `interner`.
pub fn print_program(program: &Program, interner: &Interner) -> String {
    let mut out = String::new();
    let mut printer = Printer { out: &mut out, interner };
    for function in &program.functions {
        printer.function(function);
    }
    out
}

struct Printer<'a> {
    out: &'a mut String,
    interner: &'a Interner,
}

impl Printer<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn name(&self, symbol: Symbol) -> &str {
        self.interner.resolve(symbol)
    }

    fn function(&mut self, function: &Function) {
        self.line(0, "function");
        self.ty(1, function.return_type);
        self.line(1, self.name(function.name));
        for param in &function.params {
            self.param(1, param);
        }
        for stmt in &function.body {
            self.stmt(1, stmt);
        }
    }

    fn param(&mut self, depth: usize, param: &Param) {
        self.line(depth, "param");
        self.ty(depth + 1, param.ty);
        self.line(depth + 1, self.name(param.name));
    }

    fn ty(&mut self, depth: usize, ty: Type) {
        let base = match ty.base {
            BaseType::Void => "void",
            BaseType::Int => "int",
            BaseType::Char => "char",
            BaseType::Double => "double",
        };
        let mut text = base.to_string();
        for _ in 0..ty.pointer_depth {
            text.push('*');
        }
        self.line(depth, &text);
    }

    fn stmt(&mut self, depth: usize, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(d) => self.decl(depth, d),
            Stmt::Assign(a) => self.assign(depth, a),
            Stmt::If(i) => self.if_stmt(depth, i),
            Stmt::While(w) => self.while_stmt(depth, w),
            Stmt::Block(stmts) => {
                self.line(depth, "block");
                for s in stmts {
                    self.stmt(depth + 1, s);
                }
            }
            Stmt::Return(r) => self.return_stmt(depth, r),
            Stmt::Expr(e) => {
                self.line(depth, "expr-stmt");
                self.expr(depth + 1, e);
            }
        }
    }

    fn decl(&mut self, depth: usize, d: &DeclStmt) {
        self.line(depth, "decl");
        self.ty(depth + 1, d.ty);
        self.line(depth + 1, self.name(d.name));
        if let Some(init) = &d.init {
            self.expr(depth + 1, init);
        }
    }

    fn assign(&mut self, depth: usize, a: &AssignStmt) {
        self.line(depth, "assign");
        self.line(depth + 1, self.name(a.name));
        self.expr(depth + 1, &a.value);
    }

    fn if_stmt(&mut self, depth: usize, i: &IfStmt) {
        self.line(depth, "if");
        self.expr(depth + 1, &i.cond);
        self.stmt(depth + 1, &i.then_branch);
        if let Some(e) = &i.else_branch {
            self.line(depth, "else");
            self.stmt(depth + 1, e);
        }
    }

    fn while_stmt(&mut self, depth: usize, w: &WhileStmt) {
        self.line(depth, "while");
        self.expr(depth + 1, &w.cond);
        self.stmt(depth + 1, &w.body);
    }

    fn return_stmt(&mut self, depth: usize, r: &ReturnStmt) {
        self.line(depth, "return");
        if let Some(value) = &r.value {
            self.expr(depth + 1, value);
        }
    }

    fn expr(&mut self, depth: usize, expr: &Expr) {
        match expr {
            Expr::IntLiteral { digits, .. } => self.line(depth, digits),
            Expr::DoubleLiteral { value, .. } => {
                let mut text = String::new();
                let _ = write!(text, "{value}");
                self.line(depth, &text);
            }
            Expr::StringLiteral { value, .. } => {
                let mut text = String::new();
                let _ = write!(text, "\"{}\"", self.name(*value));
                self.line(depth, &text);
            }
            Expr::Ident { name, call, .. } => match call {
                Some(call) => self.call(depth, *name, call),
                None => self.line(depth, self.name(*name)),
            },
            Expr::Binary { op, left, right, .. } => {
                self.line(depth, binop_label(*op));
                self.expr(depth + 1, left);
                self.expr(depth + 1, right);
            }
            Expr::Unary { op, operand, .. } => {
                self.line(depth, unop_label(*op));
                self.expr(depth + 1, operand);
            }
            Expr::Paren { inner, .. } => {
                self.line(depth, "paren");
                self.expr(depth + 1, inner);
            }
        }
    }

    fn call(&mut self, depth: usize, name: Symbol, call: &CallSuffix) {
        self.line(depth, "call");
        self.line(depth + 1, self.name(name));
        for arg in &call.args {
            self.expr(depth + 1, arg);
        }
    }
}

fn binop_label(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::And => "&&",
        BinOp::Or => "||",
    }
}

fn unop_label(op: UnOp) -> &'static str {
    match op {
        UnOp::Plus => "unary+",
        UnOp::Minus => "unary-",
        UnOp::Not => "!",
    }
}
