//! Intel-syntax x86-64 emission.
//!
//! Every expression leaves its result on the CPU stack; every statement
//! consumes whatever its sub-expressions pushed. There's no register
//! allocator and no separate lowering pass: this walks the AST once and
//! writes assembly text directly into `output`.

use subc_par::ast::{BinOp, Expr, ExprKind, Function, Program, Stmt, Variable};

const ARG_REGS: [&str; 6] = ["rdi", "rsi", "rdx", "rcx", "r8", "r9"];

pub struct AsmGenerator {
    output: String,
    label_count: u32,
}

impl AsmGenerator {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            label_count: 0,
        }
    }

    /// Emits the full program and returns the assembly text.
    pub fn generate(program: &Program) -> String {
        let mut gen = Self::new();
        gen.emit_program(program);
        gen.output
    }

    fn emit(&mut self, line: impl AsRef<str>) {
        self.output.push_str(line.as_ref());
        self.output.push('\n');
    }

    fn next_label(&mut self) -> u32 {
        self.label_count += 1;
        self.label_count
    }

    fn emit_program(&mut self, program: &Program) {
        self.emit(".intel_syntax noprefix");
        self.emit(".data");
        for global in &program.globals {
            self.emit(format!("{}:", global.name));
            self.emit(format!("  .zero {}", global.ty.size()));
        }
        self.emit(".text");
        for function in &program.functions {
            self.emit_function(function);
        }
    }

    fn emit_function(&mut self, function: &Function) {
        let name = function.name.as_str();
        self.emit(format!(".global {}", name));
        self.emit(format!("{}:", name));
        self.emit("  push rbp");
        self.emit("  mov rbp, rsp");
        self.emit(format!("  sub rsp, {}", function.stack_size));

        for (i, param) in function.params.iter().enumerate() {
            self.emit(format!("  mov [rbp-{}], {}", param.offset.get(), ARG_REGS[i]));
        }

        for stmt in &function.body {
            self.emit_stmt(stmt, name);
        }

        self.emit(format!(".L.return.{}:", name));
        self.emit("  mov rsp, rbp");
        self.emit("  pop rbp");
        self.emit("  ret");
    }

    fn emit_stmt(&mut self, stmt: &Stmt, fn_name: &str) {
        match stmt {
            Stmt::Return(e) => {
                self.emit_expr(e);
                self.emit("  pop rax");
                self.emit(format!("  jmp .L.return.{}", fn_name));
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch: None,
            } => {
                let n = self.next_label();
                self.emit_expr(cond);
                self.emit("  pop rax");
                self.emit("  cmp rax, 0");
                self.emit(format!("  je .L.end.{}", n));
                self.emit_stmt(then_branch, fn_name);
                self.emit(format!(".L.end.{}:", n));
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch: Some(else_branch),
            } => {
                let n = self.next_label();
                self.emit_expr(cond);
                self.emit("  pop rax");
                self.emit("  cmp rax, 0");
                self.emit(format!("  je .L.else.{}", n));
                self.emit_stmt(then_branch, fn_name);
                self.emit(format!("  jmp .L.end.{}", n));
                self.emit(format!(".L.else.{}:", n));
                self.emit_stmt(else_branch, fn_name);
                self.emit(format!(".L.end.{}:", n));
            }
            Stmt::While { cond, body } => {
                let n = self.next_label();
                self.emit(format!(".L.begin.{}:", n));
                self.emit_expr(cond);
                self.emit("  pop rax");
                self.emit("  cmp rax, 0");
                self.emit(format!("  je .L.end.{}", n));
                self.emit_stmt(body, fn_name);
                self.emit(format!("  jmp .L.begin.{}", n));
                self.emit(format!(".L.end.{}:", n));
            }
            Stmt::For { init, cond, inc, body } => {
                let n = self.next_label();
                if let Some(init) = init {
                    self.emit_expr(init);
                    self.emit("  add rsp, 8");
                }
                self.emit(format!(".L.begin.{}:", n));
                if let Some(cond) = cond {
                    self.emit_expr(cond);
                    self.emit("  pop rax");
                    self.emit("  cmp rax, 0");
                    self.emit(format!("  je .L.end.{}", n));
                }
                self.emit_stmt(body, fn_name);
                if let Some(inc) = inc {
                    self.emit_expr(inc);
                    self.emit("  add rsp, 8");
                }
                self.emit(format!("  jmp .L.begin.{}", n));
                self.emit(format!(".L.end.{}:", n));
            }
            Stmt::Block(stmts) => {
                for s in stmts {
                    self.emit_stmt(s, fn_name);
                }
            }
            Stmt::Declaration { var, init: Some(init) } => {
                self.gen_addr_var(var);
                self.emit_expr(init);
                self.emit_store();
                self.emit("  add rsp, 8");
            }
            Stmt::Declaration { init: None, .. } => {}
            Stmt::ExprStmt(e) => {
                self.emit_expr(e);
                self.emit("  add rsp, 8");
            }
        }
    }

    fn emit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Number(v) => self.emit(format!("  push {}", v)),
            ExprKind::Var(var) => {
                self.gen_addr_var(var);
                if !expr.ty.is_array() {
                    self.emit_load();
                }
            }
            ExprKind::Addr(inner) => self.gen_addr(inner),
            ExprKind::Deref(inner) => {
                self.emit_expr(inner);
                if !expr.ty.is_array() {
                    self.emit_load();
                }
            }
            ExprKind::Assign(lhs, rhs) => {
                self.gen_addr(lhs);
                self.emit_expr(rhs);
                self.emit_store();
            }
            ExprKind::Binary(op, lhs, rhs) => self.emit_binary(*op, lhs, rhs),
            ExprKind::Call(name, args) => self.emit_call(name.as_str(), args),
        }
    }

    /// Address of an lvalue. Only `Var` and `Deref` nodes are meaningful
    /// addressable forms; anything else falls back to its value, matching
    /// the original implementation's lack of a dedicated lvalue check here.
    fn gen_addr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Var(var) => self.gen_addr_var(var),
            ExprKind::Deref(inner) => self.emit_expr(inner),
            _ => self.emit_expr(expr),
        }
    }

    fn gen_addr_var(&mut self, var: &Variable) {
        if var.is_local {
            self.emit(format!("  lea rax, [rbp-{}]", var.offset.get()));
            self.emit("  push rax");
        } else {
            self.emit(format!("  push offset {}", var.name));
        }
    }

    fn emit_load(&mut self) {
        self.emit("  pop rax");
        self.emit("  mov rax, [rax]");
        self.emit("  push rax");
    }

    fn emit_store(&mut self) {
        self.emit("  pop rdi");
        self.emit("  pop rax");
        self.emit("  mov [rax], rdi");
        self.emit("  push rdi");
    }

    fn emit_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) {
        self.emit_expr(lhs);
        self.emit_expr(rhs);
        self.emit("  pop rdi");
        self.emit("  pop rax");
        match op {
            BinOp::Add => self.emit("  add rax, rdi"),
            BinOp::Sub => self.emit("  sub rax, rdi"),
            BinOp::Mul => self.emit("  imul rax, rdi"),
            BinOp::Div => {
                self.emit("  cqo");
                self.emit("  idiv rdi");
            }
            BinOp::Eq => self.emit_compare("sete"),
            BinOp::Ne => self.emit_compare("setne"),
            BinOp::Lt => self.emit_compare("setl"),
            BinOp::Le => self.emit_compare("setle"),
            BinOp::PtrAdd => {
                let scale = lhs.ty.base().expect("PtrAdd lhs carries a pointer/array type").size();
                self.emit(format!("  imul rdi, {}", scale));
                self.emit("  add rax, rdi");
            }
            BinOp::PtrSub => {
                let scale = lhs.ty.base().expect("PtrSub lhs carries a pointer/array type").size();
                self.emit(format!("  imul rdi, {}", scale));
                self.emit("  sub rax, rdi");
            }
            BinOp::PtrDiff => {
                let scale = lhs.ty.base().expect("PtrDiff lhs carries a pointer/array type").size();
                self.emit("  sub rax, rdi");
                self.emit("  cqo");
                self.emit(format!("  mov rdi, {}", scale));
                self.emit("  idiv rdi");
            }
        }
        self.emit("  push rax");
    }

    fn emit_compare(&mut self, set_insn: &str) {
        self.emit("  cmp rax, rdi");
        self.emit(format!("  {} al", set_insn));
        self.emit("  movzb rax, al");
    }

    /// Evaluates each argument left to right, pops them into `argreg[0..n]`
    /// in reverse so argument 0 lands in `rdi`, then aligns `rsp` to 16
    /// bytes before `call` per the System V AMD64 ABI.
    fn emit_call(&mut self, name: &str, args: &[Expr]) {
        for arg in args {
            self.emit_expr(arg);
        }
        for i in (0..args.len()).rev() {
            self.emit(format!("  pop {}", ARG_REGS[i]));
        }

        let n = self.next_label();
        self.emit("  mov rax, rsp");
        self.emit("  and rax, 15");
        self.emit(format!("  jnz .L.call.{}", n));
        self.emit("  mov rax, 0");
        self.emit(format!("  call {}", name));
        self.emit(format!("  jmp .L.end.{}", n));
        self.emit(format!(".L.call.{}:", n));
        self.emit("  sub rsp, 8");
        self.emit("  mov rax, 0");
        self.emit(format!("  call {}", name));
        self.emit("  add rsp, 8");
        self.emit(format!(".L.end.{}:", n));
        self.emit("  push rax");
    }
}

impl Default for AsmGenerator {
    fn default() -> Self {
        Self::new()
    }
}
