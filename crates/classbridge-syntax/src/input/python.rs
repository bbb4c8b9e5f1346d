//! Tree-sitter based Python reader.
//!
//! Reads class definitions, their annotated fields and method signatures.
//! Method bodies are reduced to nested definitions and assignments; other
//! statements carry no declaration information and are dropped.

use crate::python::*;
use crate::traits::{Language, ReadError, Reader, SyntaxTree};
use tree_sitter::{Node, Parser, Tree};

/// Static instance of the Python reader for registry.
pub static PYTHON_READER: PythonReader = PythonReader;

/// Python reader using tree-sitter.
pub struct PythonReader;

impl Reader for PythonReader {
    fn language(&self) -> Language {
        Language::Python
    }

    fn read(&self, source: &str) -> Result<SyntaxTree, ReadError> {
        read_python(source).map(SyntaxTree::Python)
    }
}

/// Parse Python source into a definition tree.
pub fn read_python(source: &str) -> Result<Module, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_python::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(source);
    ctx.read_module(&tree)
}

struct ReadContext<'a> {
    source: &'a str,
}

impl<'a> ReadContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(name).ok_or_else(|| {
            ReadError::Parse(format!("{} missing {}", node.kind(), name))
        })
    }

    fn read_module(&self, tree: &Tree) -> Result<Module, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            return Err(ReadError::Parse("syntax error in source".into()));
        }

        Ok(Module::new(self.read_statements(root)?))
    }

    fn read_statements(&self, node: Node) -> Result<Vec<Statement>, ReadError> {
        let mut statements = Vec::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            if let Some(stmt) = self.read_stmt(child, Vec::new())? {
                statements.push(stmt);
            }
        }

        Ok(statements)
    }

    fn read_stmt(&self, node: Node, decorators: Vec<Expr>) -> Result<Option<Statement>, ReadError> {
        match node.kind() {
            "class_definition" => self.read_class(node, decorators).map(Some),
            "function_definition" => self.read_function(node, decorators).map(Some),
            "decorated_definition" => {
                let mut decorators = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "decorator" {
                        if let Some(expr) = child.named_child(0) {
                            decorators.push(self.read_expr(expr)?);
                        }
                    }
                }
                let def = self.field(node, "definition")?;
                self.read_stmt(def, decorators)
            }
            "expression_statement" => match node.named_child(0) {
                Some(inner) if inner.kind() == "assignment" => self.read_assignment(inner),
                Some(inner) => match self.read_expr(inner) {
                    Ok(expr) => Ok(Some(Statement::Expr(expr))),
                    Err(ReadError::Unsupported(_)) => Ok(None),
                    Err(err) => Err(err),
                },
                None => Ok(None),
            },
            // Class bodies hold assignments without an expression_statement wrapper.
            "assignment" => self.read_assignment(node),
            "import_from_statement" => self.read_import_from(node).map(Some),
            "pass_statement" => Ok(Some(Statement::Pass)),
            _ => Ok(None),
        }
    }

    fn read_class(&self, node: Node, decorators: Vec<Expr>) -> Result<Statement, ReadError> {
        let name = self.node_text(self.field(node, "name")?).to_string();

        let mut bases = Vec::new();
        if let Some(args) = node.child_by_field_name("superclasses") {
            let mut cursor = args.walk();
            for arg in args.named_children(&mut cursor) {
                // Metaclass and other keyword arguments are not bases.
                if arg.kind() != "keyword_argument" && arg.kind() != "comment" {
                    bases.push(self.read_expr(arg)?);
                }
            }
        }

        let body = self.read_statements(self.field(node, "body")?)?;

        Ok(Statement::ClassDef(ClassDef {
            decorators,
            name,
            bases,
            body,
        }))
    }

    fn read_function(&self, node: Node, decorators: Vec<Expr>) -> Result<Statement, ReadError> {
        let name = self.node_text(self.field(node, "name")?).to_string();
        let mut func = FunctionDef::new(name, Vec::new());
        func.decorators = decorators;

        if let Some(params) = node.child_by_field_name("parameters") {
            self.read_parameters(params, &mut func)?;
        }
        if let Some(returns) = node.child_by_field_name("return_type") {
            func.returns = Some(self.read_type(returns)?);
        }
        func.body = self.read_statements(self.field(node, "body")?)?;

        Ok(Statement::FunctionDef(func))
    }

    fn read_parameters(&self, node: Node, func: &mut FunctionDef) -> Result<(), ReadError> {
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => func.args.push(Arg::bare(self.node_text(child))),
                "default_parameter" => {
                    let name = self.field(child, "name")?;
                    func.args.push(Arg::bare(self.node_text(name)));
                }
                "typed_default_parameter" => {
                    let name = self.field(child, "name")?;
                    let ty = self.read_type(self.field(child, "type")?)?;
                    func.args.push(Arg::typed(self.node_text(name), ty));
                }
                "typed_parameter" => {
                    let ty = self.read_type(self.field(child, "type")?)?;
                    let Some(target) = child.named_child(0) else {
                        continue;
                    };
                    match target.kind() {
                        "list_splat_pattern" => {
                            func.vararg = Some(Arg::typed(self.splat_name(target), ty))
                        }
                        "dictionary_splat_pattern" => {
                            func.kwarg = Some(Arg::typed(self.splat_name(target), ty))
                        }
                        _ => func.args.push(Arg::typed(self.node_text(target), ty)),
                    }
                }
                "list_splat_pattern" => func.vararg = Some(Arg::bare(self.splat_name(child))),
                "dictionary_splat_pattern" => {
                    func.kwarg = Some(Arg::bare(self.splat_name(child)))
                }
                // `*` and `/` separators carry no parameter.
                _ => {}
            }
        }

        Ok(())
    }

    fn splat_name(&self, node: Node) -> String {
        node.named_child(0)
            .map(|n| self.node_text(n).to_string())
            .unwrap_or_default()
    }

    fn read_assignment(&self, node: Node) -> Result<Option<Statement>, ReadError> {
        let left = self.read_expr(self.field(node, "left")?)?;

        let value = match node.child_by_field_name("right") {
            Some(right) if right.kind() == "assignment" => {
                // `a = b = value`
                return Ok(self.read_assignment(right)?.map(|stmt| match stmt {
                    Statement::Assign(mut assign) => {
                        assign.targets.insert(0, left);
                        Statement::Assign(assign)
                    }
                    other => other,
                }));
            }
            Some(right) => match self.read_expr(right) {
                Ok(expr) => Some(expr),
                // Values we cannot model (lambdas, comprehensions) drop the statement.
                Err(ReadError::Unsupported(_)) => return Ok(None),
                Err(err) => return Err(err),
            },
            None => None,
        };

        match node.child_by_field_name("type") {
            Some(ty) => Ok(Some(Statement::AnnAssign(AnnAssign {
                target: left,
                annotation: self.read_type(ty)?,
                value,
            }))),
            None => Ok(value.map(|value| {
                Statement::Assign(Assign {
                    targets: vec![left],
                    value,
                })
            })),
        }
    }

    fn read_import_from(&self, node: Node) -> Result<Statement, ReadError> {
        let module = self.node_text(self.field(node, "module_name")?).to_string();
        let mut cursor = node.walk();
        let names = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.node_text(n).to_string())
            .collect();
        Ok(Statement::ImportFrom { module, names })
    }

    /// Reads an annotation. Newer grammars give annotations their own node
    /// kinds (`generic_type`, `union_type`); older ones wrap an expression.
    fn read_type(&self, node: Node) -> Result<Expr, ReadError> {
        match node.kind() {
            "type" => match node.named_child(0) {
                Some(inner) => self.read_type(inner),
                None => Err(ReadError::Parse("empty type".into())),
            },
            "generic_type" => {
                let base = node
                    .named_child(0)
                    .ok_or_else(|| ReadError::Parse("generic_type missing base".into()))?;
                let base = self.read_type(base)?;
                let mut args = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "type_parameter" {
                        let mut inner = child.walk();
                        for arg in child.named_children(&mut inner) {
                            args.push(self.read_type(arg)?);
                        }
                    }
                }
                let slice = if args.len() == 1 {
                    args.remove(0)
                } else {
                    Expr::Tuple(args)
                };
                Ok(Expr::subscript(base, slice))
            }
            "union_type" => {
                let left = node
                    .named_child(0)
                    .ok_or_else(|| ReadError::Parse("union_type missing left".into()))?;
                let right = node
                    .named_child(1)
                    .ok_or_else(|| ReadError::Parse("union_type missing right".into()))?;
                Ok(Expr::union(self.read_type(left)?, self.read_type(right)?))
            }
            "member_type" => {
                let value = node
                    .named_child(0)
                    .ok_or_else(|| ReadError::Parse("member_type missing value".into()))?;
                let attr = node
                    .named_child(1)
                    .ok_or_else(|| ReadError::Parse("member_type missing attribute".into()))?;
                Ok(Expr::attribute(
                    self.read_type(value)?,
                    self.node_text(attr),
                ))
            }
            // Annotation forms with no tree counterpart read as their text.
            "constrained_type" | "splat_type" => Ok(Expr::name(self.node_text(node))),
            _ => self.read_expr(node),
        }
    }

    fn read_expr(&self, node: Node) -> Result<Expr, ReadError> {
        match node.kind() {
            "identifier" => Ok(Expr::name(self.node_text(node))),
            "attribute" => {
                let object = self.read_expr(self.field(node, "object")?)?;
                let attr = self.node_text(self.field(node, "attribute")?);
                Ok(Expr::attribute(object, attr))
            }
            "subscript" => {
                let value = self.read_expr(self.field(node, "value")?)?;
                let mut cursor = node.walk();
                let mut slices = node
                    .children_by_field_name("subscript", &mut cursor)
                    .map(|n| self.read_type(n))
                    .collect::<Result<Vec<_>, _>>()?;
                let slice = if slices.len() == 1 {
                    slices.remove(0)
                } else {
                    Expr::Tuple(slices)
                };
                Ok(Expr::subscript(value, slice))
            }
            "binary_operator" => {
                let left = self.read_type(self.field(node, "left")?)?;
                let right = self.read_type(self.field(node, "right")?)?;
                let op = match self.node_text(self.field(node, "operator")?) {
                    "|" => Operator::BitOr,
                    "+" => Operator::Add,
                    "-" => Operator::Sub,
                    "*" => Operator::Mul,
                    "/" => Operator::Div,
                    other => return Err(ReadError::Unsupported(format!("operator {}", other))),
                };
                Ok(Expr::BinOp {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                })
            }
            "call" => {
                let func = self.read_expr(self.field(node, "function")?)?;
                let arguments = self.field(node, "arguments")?;
                let mut args = Vec::new();
                let mut keywords = Vec::new();
                let mut cursor = arguments.walk();
                for arg in arguments.named_children(&mut cursor) {
                    match arg.kind() {
                        "keyword_argument" => keywords.push(Keyword {
                            name: self.node_text(self.field(arg, "name")?).to_string(),
                            value: self.read_expr(self.field(arg, "value")?)?,
                        }),
                        "comment" => {}
                        _ => args.push(self.read_expr(arg)?),
                    }
                }
                Ok(Expr::Call {
                    func: Box::new(func),
                    args,
                    keywords,
                })
            }
            "string" => Ok(Expr::Constant(Constant::Str(unquote(self.node_text(node))))),
            "integer" => self
                .node_text(node)
                .replace('_', "")
                .parse()
                .map(|n| Expr::Constant(Constant::Int(n)))
                .map_err(|_| ReadError::Unsupported(format!("integer {}", self.node_text(node)))),
            "float" => self
                .node_text(node)
                .replace('_', "")
                .parse()
                .map(|f| Expr::Constant(Constant::Float(f)))
                .map_err(|_| ReadError::Unsupported(format!("float {}", self.node_text(node)))),
            "unary_operator" => {
                let operand = self.read_expr(self.field(node, "argument")?)?;
                let op = self.node_text(self.field(node, "operator")?);
                match (op, operand) {
                    ("-", Expr::Constant(Constant::Int(n))) => Ok(Expr::Constant(Constant::Int(-n))),
                    ("-", Expr::Constant(Constant::Float(f))) => {
                        Ok(Expr::Constant(Constant::Float(-f)))
                    }
                    ("+", expr) => Ok(expr),
                    (op, _) => Err(ReadError::Unsupported(format!("unary {}", op))),
                }
            }
            "true" => Ok(Expr::Constant(Constant::Bool(true))),
            "false" => Ok(Expr::Constant(Constant::Bool(false))),
            "none" => Ok(Expr::none()),
            "ellipsis" => Ok(Expr::Constant(Constant::Ellipsis)),
            "list" => Ok(Expr::List(self.read_expr_children(node)?)),
            "tuple" => Ok(Expr::Tuple(self.read_expr_children(node)?)),
            "dictionary" => {
                let mut entries = Vec::new();
                let mut cursor = node.walk();
                for pair in node.named_children(&mut cursor) {
                    if pair.kind() == "pair" {
                        entries.push((
                            self.read_expr(self.field(pair, "key")?)?,
                            self.read_expr(self.field(pair, "value")?)?,
                        ));
                    }
                }
                Ok(Expr::Dict(entries))
            }
            "parenthesized_expression" => match node.named_child(0) {
                Some(inner) => self.read_expr(inner),
                None => Ok(Expr::Tuple(Vec::new())),
            },
            "type" | "generic_type" | "union_type" | "member_type" => self.read_type(node),
            other => Err(ReadError::Unsupported(other.to_string())),
        }
    }

    fn read_expr_children(&self, node: Node) -> Result<Vec<Expr>, ReadError> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .map(|n| self.read_expr(n))
            .collect()
    }
}

/// Strips prefix and quotes from a string literal.
fn unquote(text: &str) -> String {
    let body = text.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = body
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    body.to_string()
}
