//! Swift writer for class declaration trees.

use crate::swift::*;
use crate::traits::{Language, SyntaxTree, WriteError, Writer};

/// Static instance of the Swift writer for registry.
pub static SWIFT_WRITER: SwiftWriterImpl = SwiftWriterImpl;

/// Swift writer implementing the Writer trait.
pub struct SwiftWriterImpl;

impl Writer for SwiftWriterImpl {
    fn language(&self) -> Language {
        Language::Swift
    }

    fn write(&self, tree: &SyntaxTree) -> Result<String, WriteError> {
        match tree {
            SyntaxTree::Swift(file) => Ok(SwiftWriter::emit(file)),
            SyntaxTree::Python(_) => Err(WriteError::Representation {
                writer: Language::Swift,
                got: tree.language(),
            }),
        }
    }
}

/// Renders Swift declaration trees as source code.
pub struct SwiftWriter {
    output: String,
    indent: usize,
}

impl SwiftWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Emit a whole file.
    pub fn emit(file: &SourceFile) -> String {
        let mut writer = Self::new();
        for (i, class) in file.classes.iter().enumerate() {
            if i > 0 {
                writer.output.push('\n');
            }
            writer.write_class(class);
        }
        writer.output
    }

    /// Emit a single class declaration.
    pub fn emit_class(class: &ClassDecl) -> String {
        let mut writer = Self::new();
        writer.write_class(class);
        writer.output
    }

    /// Render one type.
    pub fn emit_type(ty: &TypeSyntax) -> String {
        let mut writer = Self::new();
        writer.write_type(ty);
        writer.output
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    fn write_line(&mut self, text: &str) {
        self.write_indent();
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn write_attributes(&mut self, attributes: &[Attribute]) {
        for attr in attributes {
            self.write_indent();
            self.output.push('@');
            self.output.push_str(&attr.name);
            if let Some(args) = &attr.arguments {
                self.output.push('(');
                self.output.push_str(args);
                self.output.push(')');
            }
            self.output.push('\n');
        }
    }

    fn write_modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            self.output.push_str(modifier.as_str());
            self.output.push(' ');
        }
    }

    fn write_class(&mut self, class: &ClassDecl) {
        self.write_attributes(&class.attributes);
        self.write_indent();
        self.write_modifiers(&class.modifiers);
        self.output.push_str(class.kind.keyword());
        self.output.push(' ');
        self.output.push_str(&class.name);
        if !class.inherits.is_empty() {
            self.output.push_str(": ");
            self.write_type_list(&class.inherits);
        }
        self.output.push_str(" {\n");

        self.indent += 1;
        for (i, member) in class.members.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.write_member(member);
        }
        self.indent -= 1;

        self.write_line("}");
    }

    fn write_member(&mut self, member: &Member) {
        match member {
            Member::Variable(var) => self.write_variable(var),
            Member::Initializer(init) => self.write_initializer(init),
            Member::Function(func) => self.write_function(func),
            Member::Unsupported { kind } => {
                self.write_line(&format!("// unsupported member: {}", kind));
            }
        }
    }

    fn write_variable(&mut self, var: &VariableDecl) {
        self.write_attributes(&var.attributes);
        self.write_indent();
        self.write_modifiers(&var.modifiers);
        self.output.push_str(var.binding.keyword());
        self.output.push(' ');
        self.write_pattern(&var.pattern);
        if let Some(ty) = &var.type_annotation {
            self.output.push_str(": ");
            self.write_type(ty);
        }
        if let Some(value) = &var.initializer {
            self.output.push_str(" = ");
            self.output.push_str(value);
        }
        match &var.accessors {
            None => {}
            Some(AccessorBlock::Getter) => self.output.push_str(" { get }"),
            Some(AccessorBlock::Accessors(kinds)) => {
                self.output.push_str(" {");
                for kind in kinds {
                    self.output.push(' ');
                    self.output.push_str(kind.keyword());
                }
                self.output.push_str(" }");
            }
        }
        self.output.push('\n');
    }

    fn write_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(name) | Pattern::OptionalBinding(name) => {
                self.output.push_str(name)
            }
            Pattern::Wildcard => self.output.push('_'),
            Pattern::Tuple(items) => {
                self.output.push('(');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_pattern(item);
                }
                self.output.push(')');
            }
        }
    }

    fn write_initializer(&mut self, init: &InitializerDecl) {
        self.write_attributes(&init.attributes);
        self.write_indent();
        self.write_modifiers(&init.modifiers);
        self.output.push_str("init");
        if init.failable {
            self.output.push('?');
        }
        self.write_parameters(&init.parameters);
        self.write_body(init.body.as_ref());
    }

    fn write_function(&mut self, func: &FunctionDecl) {
        self.write_attributes(&func.attributes);
        self.write_indent();
        self.write_modifiers(&func.modifiers);
        self.output.push_str("func ");
        self.output.push_str(&func.name);
        self.write_parameters(&func.parameters);
        if let Some(ret) = &func.return_type {
            self.output.push_str(" -> ");
            self.write_type(ret);
        }
        self.write_body(func.body.as_ref());
    }

    fn write_parameters(&mut self, params: &[Parameter]) {
        self.output.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            if let Some(label) = &param.label {
                self.output.push_str(label);
                self.output.push(' ');
            }
            self.output.push_str(&param.name);
            self.output.push_str(": ");
            self.write_type(&param.ty);
        }
        self.output.push(')');
    }

    fn write_body(&mut self, body: Option<&CodeBlock>) {
        match body {
            None => self.output.push('\n'),
            Some(block) if block.statements.is_empty() => self.output.push_str(" {}\n"),
            Some(block) => {
                self.output.push_str(" {\n");
                self.indent += 1;
                for stmt in &block.statements {
                    self.write_line(stmt);
                }
                self.indent -= 1;
                self.write_line("}");
            }
        }
    }

    fn write_type_list(&mut self, types: &[TypeSyntax]) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_type(ty);
        }
    }

    fn write_type(&mut self, ty: &TypeSyntax) {
        match ty {
            TypeSyntax::Identifier { name, generic_args } => {
                self.output.push_str(name);
                if !generic_args.is_empty() {
                    self.output.push('<');
                    self.write_type_list(generic_args);
                    self.output.push('>');
                }
            }
            TypeSyntax::Optional(inner) => {
                self.write_wrapped(inner);
                self.output.push('?');
            }
            TypeSyntax::ImplicitlyUnwrapped(inner) => {
                self.write_wrapped(inner);
                self.output.push('!');
            }
            TypeSyntax::Array(element) => {
                self.output.push('[');
                self.write_type(element);
                self.output.push(']');
            }
            TypeSyntax::Dictionary { key, value } => {
                self.output.push('[');
                self.write_type(key);
                self.output.push_str(": ");
                self.write_type(value);
                self.output.push(']');
            }
            TypeSyntax::Tuple(items) => {
                self.output.push('(');
                self.write_type_list(items);
                self.output.push(')');
            }
            TypeSyntax::Function { params, ret } => {
                self.output.push('(');
                self.write_type_list(params);
                self.output.push_str(") -> ");
                self.write_type(ret);
            }
            TypeSyntax::Composition(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(" & ");
                    }
                    self.write_type(part);
                }
            }
        }
    }

    /// Postfix `?`/`!` binds tighter than `->` and `&`.
    fn write_wrapped(&mut self, inner: &TypeSyntax) {
        if matches!(
            inner,
            TypeSyntax::Function { .. } | TypeSyntax::Composition(_)
        ) {
            self.output.push('(');
            self.write_type(inner);
            self.output.push(')');
        } else {
            self.write_type(inner);
        }
    }
}

impl Default for SwiftWriter {
    fn default() -> Self {
        Self::new()
    }
}
