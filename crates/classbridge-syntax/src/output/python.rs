//! Python writer for class definition trees.
//!
//! Emits stub-style Python: decorators, annotated signatures, `pass` bodies.

use crate::python::*;
use crate::traits::{Language, SyntaxTree, WriteError, Writer};
use std::fmt::Write as _;

/// Static instance of the Python writer for registry.
pub static PYTHON_WRITER: PythonWriterImpl = PythonWriterImpl;

/// Python writer implementing the Writer trait.
pub struct PythonWriterImpl;

impl Writer for PythonWriterImpl {
    fn language(&self) -> Language {
        Language::Python
    }

    fn write(&self, tree: &SyntaxTree) -> Result<String, WriteError> {
        match tree {
            SyntaxTree::Python(module) => Ok(PythonWriter::emit(module)),
            SyntaxTree::Swift(_) => Err(WriteError::Representation {
                writer: Language::Python,
                got: tree.language(),
            }),
        }
    }
}

/// Emits Python definition trees as source code.
pub struct PythonWriter {
    output: String,
    indent: usize,
}

impl PythonWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Emit a module to Python source.
    pub fn emit(module: &Module) -> String {
        let mut writer = Self::new();
        writer.write_module(module);
        writer.output
    }

    /// Emit a single class definition.
    pub fn emit_class(class: &ClassDef) -> String {
        let mut writer = Self::new();
        writer.write_class(class);
        writer.output
    }

    /// Render one expression (typically an annotation).
    pub fn emit_expr(expr: &Expr) -> String {
        let mut writer = Self::new();
        writer.write_expr(expr);
        writer.output
    }

    fn write_module(&mut self, module: &Module) {
        let mut prev: Option<&Statement> = None;
        for stmt in &module.body {
            if let Some(prev) = prev {
                let imports = matches!(prev, Statement::ImportFrom { .. })
                    && matches!(stmt, Statement::ImportFrom { .. });
                if !imports {
                    self.output.push_str("\n\n");
                }
            }
            self.write_stmt(stmt);
            prev = Some(stmt);
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    fn write_decorators(&mut self, decorators: &[Expr]) {
        for decorator in decorators {
            self.write_indent();
            self.output.push('@');
            self.write_expr(decorator);
            self.output.push('\n');
        }
    }

    /// Writes an indented block; an empty block becomes `pass`.
    fn write_block(&mut self, body: &[Statement]) {
        self.indent += 1;
        if body.is_empty() {
            self.write_stmt(&Statement::Pass);
        }
        let mut prev: Option<&Statement> = None;
        for stmt in body {
            if prev.is_some_and(|prev| is_definition(prev) || is_definition(stmt)) {
                self.output.push('\n');
            }
            self.write_stmt(stmt);
            prev = Some(stmt);
        }
        self.indent -= 1;
    }

    fn write_class(&mut self, class: &ClassDef) {
        self.write_decorators(&class.decorators);
        self.write_indent();
        self.output.push_str("class ");
        self.output.push_str(&class.name);
        if !class.bases.is_empty() {
            self.output.push('(');
            self.write_expr_list(&class.bases);
            self.output.push(')');
        }
        self.output.push_str(":\n");
        self.write_block(&class.body);
    }

    fn write_function(&mut self, func: &FunctionDef) {
        self.write_decorators(&func.decorators);
        self.write_indent();
        self.output.push_str("def ");
        self.output.push_str(&func.name);
        self.output.push('(');
        let mut first = true;
        for arg in &func.args {
            self.write_separator(&mut first);
            self.write_arg(arg);
        }
        if let Some(arg) = &func.vararg {
            self.write_separator(&mut first);
            self.output.push('*');
            self.write_arg(arg);
        }
        if let Some(arg) = &func.kwarg {
            self.write_separator(&mut first);
            self.output.push_str("**");
            self.write_arg(arg);
        }
        self.output.push(')');
        if let Some(returns) = &func.returns {
            self.output.push_str(" -> ");
            self.write_expr(returns);
        }
        self.output.push_str(":\n");
        self.write_block(&func.body);
    }

    fn write_separator(&mut self, first: &mut bool) {
        if !*first {
            self.output.push_str(", ");
        }
        *first = false;
    }

    fn write_arg(&mut self, arg: &Arg) {
        self.output.push_str(&arg.name);
        if let Some(annotation) = &arg.annotation {
            self.output.push_str(": ");
            self.write_expr(annotation);
        }
    }

    fn write_stmt(&mut self, stmt: &Statement) {
        match stmt {
            Statement::ClassDef(class) => self.write_class(class),
            Statement::FunctionDef(func) => self.write_function(func),
            Statement::AnnAssign(assign) => {
                self.write_indent();
                self.write_expr(&assign.target);
                self.output.push_str(": ");
                self.write_expr(&assign.annotation);
                if let Some(value) = &assign.value {
                    self.output.push_str(" = ");
                    self.write_expr(value);
                }
                self.output.push('\n');
            }
            Statement::Assign(assign) => {
                self.write_indent();
                for target in &assign.targets {
                    self.write_expr(target);
                    self.output.push_str(" = ");
                }
                self.write_expr(&assign.value);
                self.output.push('\n');
            }
            Statement::ImportFrom { module, names } => {
                self.write_indent();
                let _ = writeln!(self.output, "from {} import {}", module, names.join(", "));
            }
            Statement::Pass => {
                self.write_indent();
                self.output.push_str("pass\n");
            }
            Statement::Expr(expr) => {
                self.write_indent();
                self.write_expr(expr);
                self.output.push('\n');
            }
        }
    }

    fn write_expr_list(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_expr(expr);
        }
    }

    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Name(id) => self.output.push_str(id),
            Expr::Attribute { value, attr } => {
                self.write_expr(value);
                self.output.push('.');
                self.output.push_str(attr);
            }
            Expr::Subscript { value, slice } => {
                self.write_expr(value);
                self.output.push('[');
                match slice.as_ref() {
                    // `tuple[()]` keeps its parens; `dict[str, int]` drops them.
                    Expr::Tuple(items) if !items.is_empty() => self.write_expr_list(items),
                    other => self.write_expr(other),
                }
                self.output.push(']');
            }
            Expr::Tuple(items) => {
                self.output.push('(');
                self.write_expr_list(items);
                if items.len() == 1 {
                    self.output.push(',');
                }
                self.output.push(')');
            }
            Expr::List(items) => {
                self.output.push('[');
                self.write_expr_list(items);
                self.output.push(']');
            }
            Expr::Dict(entries) => {
                self.output.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_expr(key);
                    self.output.push_str(": ");
                    self.write_expr(value);
                }
                self.output.push('}');
            }
            Expr::BinOp { left, op, right } => {
                self.write_expr(left);
                self.output.push(' ');
                self.output.push_str(op.as_str());
                self.output.push(' ');
                self.write_expr(right);
            }
            Expr::Call {
                func,
                args,
                keywords,
            } => {
                self.write_expr(func);
                self.output.push('(');
                let mut first = true;
                for arg in args {
                    self.write_separator(&mut first);
                    self.write_expr(arg);
                }
                for keyword in keywords {
                    self.write_separator(&mut first);
                    self.output.push_str(&keyword.name);
                    self.output.push('=');
                    self.write_expr(&keyword.value);
                }
                self.output.push(')');
            }
            Expr::Constant(constant) => self.write_constant(constant),
        }
    }

    fn write_constant(&mut self, constant: &Constant) {
        match constant {
            Constant::None => self.output.push_str("None"),
            Constant::Bool(true) => self.output.push_str("True"),
            Constant::Bool(false) => self.output.push_str("False"),
            Constant::Int(n) => {
                let _ = write!(self.output, "{}", n);
            }
            Constant::Float(f) => {
                // `{:?}` keeps the trailing `.0` on whole numbers.
                let _ = write!(self.output, "{:?}", f);
            }
            Constant::Str(s) => {
                self.output.push('"');
                for c in s.chars() {
                    match c {
                        '"' => self.output.push_str("\\\""),
                        '\\' => self.output.push_str("\\\\"),
                        '\n' => self.output.push_str("\\n"),
                        c => self.output.push(c),
                    }
                }
                self.output.push('"');
            }
            Constant::Ellipsis => self.output.push_str("..."),
        }
    }
}

impl Default for PythonWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_definition(stmt: &Statement) -> bool {
    matches!(stmt, Statement::ClassDef(_) | Statement::FunctionDef(_))
}
