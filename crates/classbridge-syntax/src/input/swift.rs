//! Tree-sitter based Swift reader.
//!
//! Reads `class` and `struct` declarations with their stored and computed
//! properties, initializers and methods. Other top-level declarations
//! (protocols, extensions, enums, free functions) are skipped.

use crate::swift::*;
use crate::traits::{Language, ReadError, Reader, SyntaxTree};
use tree_sitter::{Node, Parser, Tree};

/// Static instance of the Swift reader for registry.
pub static SWIFT_READER: SwiftReader = SwiftReader;

/// Swift reader using tree-sitter.
pub struct SwiftReader;

impl Reader for SwiftReader {
    fn language(&self) -> Language {
        Language::Swift
    }

    fn read(&self, source: &str) -> Result<SyntaxTree, ReadError> {
        read_swift(source).map(SyntaxTree::Swift)
    }
}

/// Parse Swift source into a declaration tree.
pub fn read_swift(source: &str) -> Result<SourceFile, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_swift::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(source);
    ctx.read_source_file(&tree)
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

    /// First named child of the given kind.
    fn child_of_kind<'t>(&self, node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor).find(|c| c.kind() == kind)
    }

    fn read_source_file(&self, tree: &Tree) -> Result<SourceFile, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            return Err(ReadError::Parse("syntax error in source".into()));
        }

        let mut classes = Vec::new();
        let mut cursor = root.walk();

        for child in root.named_children(&mut cursor) {
            if child.kind() == "class_declaration" {
                if let Some(class) = self.read_class(child)? {
                    classes.push(class);
                }
            }
        }

        Ok(SourceFile::new(classes))
    }

    /// `None` for extensions, enums and actors, which share the node kind.
    fn read_class(&self, node: Node) -> Result<Option<ClassDecl>, ReadError> {
        let kind = match node
            .child_by_field_name("declaration_kind")
            .map(|n| self.node_text(n))
        {
            Some("class") => ClassKind::Class,
            Some("struct") => ClassKind::Struct,
            _ => return Ok(None),
        };

        let name = self.node_text(self.field(node, "name")?).to_string();
        let mut class = ClassDecl::new(name);
        class.kind = kind;

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "modifiers" => {
                    let (attributes, modifiers) = self.read_modifiers(child);
                    class.attributes = attributes;
                    class.modifiers = modifiers;
                }
                "inheritance_specifier" => {
                    let ty = child
                        .child_by_field_name("inherits_from")
                        .or_else(|| child.named_child(0));
                    if let Some(ty) = ty {
                        class.inherits.push(self.read_type(ty)?);
                    }
                }
                "class_body" => class.members = self.read_members(child)?,
                _ => {}
            }
        }

        Ok(Some(class))
    }

    fn read_modifiers(&self, node: Node) -> (Vec<Attribute>, Vec<Modifier>) {
        let mut attributes = Vec::new();
        let mut modifiers = Vec::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "attribute" => attributes.push(self.read_attribute(child)),
                "comment" | "multiline_comment" => {}
                _ => modifiers.push(Modifier::parse(self.node_text(child))),
            }
        }

        (attributes, modifiers)
    }

    fn read_attribute(&self, node: Node) -> Attribute {
        let name = self
            .child_of_kind(node, "user_type")
            .map(|n| self.node_text(n))
            .unwrap_or_else(|| self.node_text(node).trim_start_matches('@'))
            .to_string();
        let text = self.node_text(node);
        let arguments = match (text.find('('), text.rfind(')')) {
            (Some(open), Some(close)) if open < close => {
                Some(text[open + 1..close].trim().to_string())
            }
            _ => None,
        };
        Attribute { name, arguments }
    }

    fn read_members(&self, body: Node) -> Result<Vec<Member>, ReadError> {
        let mut members = Vec::new();
        let mut cursor = body.walk();

        for child in body.named_children(&mut cursor) {
            match child.kind() {
                "property_declaration" => members.extend(
                    self.read_property(child)?
                        .into_iter()
                        .map(Member::Variable),
                ),
                "init_declaration" => {
                    members.push(Member::Initializer(self.read_initializer(child)?))
                }
                "function_declaration" => {
                    members.push(Member::Function(self.read_function(child)?))
                }
                "comment" | "multiline_comment" => {}
                other => members.push(Member::Unsupported {
                    kind: other.to_string(),
                }),
            }
        }

        Ok(members)
    }

    /// One declaration per binding: `var a = 1, b: Int` yields two.
    fn read_property(&self, node: Node) -> Result<Vec<VariableDecl>, ReadError> {
        let binding = match self.child_of_kind(node, "value_binding_pattern") {
            Some(b) if self.node_text(b).trim_start().starts_with("let") => BindingSpecifier::Let,
            _ => BindingSpecifier::Var,
        };
        let (attributes, modifiers) = self
            .child_of_kind(node, "modifiers")
            .map(|m| self.read_modifiers(m))
            .unwrap_or_default();

        let mut decls: Vec<VariableDecl> = Vec::new();
        let mut cursor = node.walk();
        let mut after_equals = false;
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                let field = cursor.field_name();
                // Literals such as `nil` are anonymous nodes; the value field still names them.
                if field == Some("value") || (after_equals && child.kind() != "comment") {
                    if let Some(decl) = decls.last_mut() {
                        decl.initializer = Some(self.node_text(child).to_string());
                    }
                } else if child.is_named() {
                    if field == Some("name") {
                        decls.push(VariableDecl {
                            attributes: attributes.clone(),
                            modifiers: modifiers.clone(),
                            binding,
                            pattern: self.read_pattern(child),
                            type_annotation: None,
                            accessors: None,
                            initializer: None,
                        });
                    } else if let Some(decl) = decls.last_mut() {
                        match child.kind() {
                            "type_annotation" => {
                                decl.type_annotation = Some(self.read_annotation(child)?)
                            }
                            "computed_property" => {
                                decl.accessors = Some(self.read_computed(child))
                            }
                            "willset_didset_block" => {
                                decl.accessors = Some(self.read_observers(child))
                            }
                            _ => {}
                        }
                    }
                }
                after_equals = !child.is_named() && child.kind() == "=";
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        if decls.is_empty() {
            return Err(ReadError::Parse("property_declaration missing name".into()));
        }
        Ok(decls)
    }

    fn read_pattern(&self, node: Node) -> Pattern {
        let text = self.node_text(node).trim();
        if text == "_" {
            return Pattern::Wildcard;
        }
        if text.starts_with('(') {
            let mut cursor = node.walk();
            let items = node
                .named_children(&mut cursor)
                .map(|n| self.read_pattern(n))
                .collect();
            return Pattern::Tuple(items);
        }
        if let Some(binding) = text.strip_prefix("let ").or_else(|| text.strip_prefix("var ")) {
            return Pattern::OptionalBinding(binding.trim_end_matches('?').trim().to_string());
        }
        let name = node
            .child_by_field_name("bound_identifier")
            .map(|n| self.node_text(n))
            .unwrap_or(text);
        Pattern::Identifier(name.to_string())
    }

    fn read_computed(&self, node: Node) -> AccessorBlock {
        let mut kinds = Vec::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "computed_getter" => kinds.push(AccessorKind::Get),
                "computed_setter" => kinds.push(AccessorKind::Set),
                "computed_modify" => kinds.push(AccessorKind::Modify),
                _ => {}
            }
        }

        // A body of plain statements is an implicit getter.
        if kinds.is_empty() {
            AccessorBlock::Getter
        } else {
            AccessorBlock::Accessors(kinds)
        }
    }

    fn read_observers(&self, node: Node) -> AccessorBlock {
        let mut kinds = Vec::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "willset_clause" => kinds.push(AccessorKind::WillSet),
                "didset_clause" => kinds.push(AccessorKind::DidSet),
                _ => {}
            }
        }

        AccessorBlock::Accessors(kinds)
    }

    fn read_initializer(&self, node: Node) -> Result<InitializerDecl, ReadError> {
        let mut init = InitializerDecl::new(Vec::new());
        init.body = None;

        let text = self.node_text(node);
        if let Some(pos) = text.find("init") {
            init.failable = text[pos + 4..].trim_start().starts_with('?');
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "modifiers" => {
                    let (attributes, modifiers) = self.read_modifiers(child);
                    init.attributes = attributes;
                    init.modifiers = modifiers;
                }
                "parameter" => init.parameters.push(self.read_parameter(child)?),
                "function_body" => init.body = Some(self.read_body(child)),
                _ => {}
            }
        }

        Ok(init)
    }

    fn read_function(&self, node: Node) -> Result<FunctionDecl, ReadError> {
        let name = self.node_text(self.field(node, "name")?).to_string();
        let mut func = FunctionDecl::new(name, Vec::new());
        func.body = None;

        if let Some(ret) = node.child_by_field_name("return_type") {
            func.return_type = Some(self.read_type(ret)?);
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "modifiers" => {
                    let (attributes, modifiers) = self.read_modifiers(child);
                    func.attributes = attributes;
                    func.modifiers = modifiers;
                }
                "parameter" => func.parameters.push(self.read_parameter(child)?),
                "function_body" => func.body = Some(self.read_body(child)),
                _ => {}
            }
        }

        Ok(func)
    }

    fn read_parameter(&self, node: Node) -> Result<Parameter, ReadError> {
        let name = self.node_text(self.field(node, "name")?).to_string();
        let ty = self.read_type(self.field(node, "type")?)?;
        let ty = if self.node_text(node).trim_end().ends_with('!') {
            TypeSyntax::ImplicitlyUnwrapped(Box::new(ty))
        } else {
            ty
        };
        Ok(Parameter {
            label: node
                .child_by_field_name("external_name")
                .map(|n| self.node_text(n).to_string()),
            name,
            ty,
        })
    }

    fn read_body(&self, node: Node) -> CodeBlock {
        let text = self.node_text(node).trim();
        let inner = text
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .unwrap_or(text);
        CodeBlock {
            statements: inner
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    fn read_annotation(&self, node: Node) -> Result<TypeSyntax, ReadError> {
        let ty = node
            .child_by_field_name("type")
            .or_else(|| node.named_child(0))
            .ok_or_else(|| ReadError::Parse("type_annotation missing type".into()))?;
        let ty = self.read_type(ty)?;
        if self.node_text(node).trim_end().ends_with('!') {
            Ok(TypeSyntax::ImplicitlyUnwrapped(Box::new(ty)))
        } else {
            Ok(ty)
        }
    }

    fn read_type(&self, node: Node) -> Result<TypeSyntax, ReadError> {
        match node.kind() {
            "type_identifier" => Ok(TypeSyntax::ident(self.node_text(node))),
            "user_type" => {
                let mut segments = Vec::new();
                let mut generic_args = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    match child.kind() {
                        "type_identifier" => segments.push(self.node_text(child)),
                        "type_arguments" => {
                            let mut inner = child.walk();
                            generic_args = child
                                .named_children(&mut inner)
                                .map(|arg| self.read_type(arg))
                                .collect::<Result<_, _>>()?;
                        }
                        _ => {}
                    }
                }
                Ok(TypeSyntax::generic(segments.join("."), generic_args))
            }
            "optional_type" => {
                let inner = node
                    .child_by_field_name("wrapped")
                    .or_else(|| node.named_child(0))
                    .ok_or_else(|| ReadError::Parse("optional_type missing wrapped".into()))?;
                Ok(TypeSyntax::optional(self.read_type(inner)?))
            }
            "array_type" => {
                let element = node
                    .child_by_field_name("element")
                    .or_else(|| node.named_child(0))
                    .ok_or_else(|| ReadError::Parse("array_type missing element".into()))?;
                Ok(TypeSyntax::array(self.read_type(element)?))
            }
            "dictionary_type" => {
                let key = node
                    .child_by_field_name("key")
                    .or_else(|| node.named_child(0))
                    .ok_or_else(|| ReadError::Parse("dictionary_type missing key".into()))?;
                let value = node
                    .child_by_field_name("value")
                    .or_else(|| node.named_child(1))
                    .ok_or_else(|| ReadError::Parse("dictionary_type missing value".into()))?;
                Ok(TypeSyntax::dictionary(
                    self.read_type(key)?,
                    self.read_type(value)?,
                ))
            }
            "tuple_type" => {
                let mut items = Vec::new();
                let mut cursor = node.walk();
                for item in node.named_children(&mut cursor) {
                    let ty = if item.kind() == "tuple_type_item" {
                        item.child_by_field_name("type")
                            .or_else(|| item.named_child(item.named_child_count().saturating_sub(1) as _))
                    } else {
                        Some(item)
                    };
                    if let Some(ty) = ty {
                        items.push(self.read_type(ty)?);
                    }
                }
                // `(T)` is a parenthesized type, not a one-element tuple.
                if items.len() == 1 {
                    Ok(items.remove(0))
                } else {
                    Ok(TypeSyntax::Tuple(items))
                }
            }
            "function_type" => {
                let params = match node.child_by_field_name("params") {
                    Some(p) => match self.read_type(p)? {
                        TypeSyntax::Tuple(items) => items,
                        single => vec![single],
                    },
                    None => Vec::new(),
                };
                let ret = self.read_type(self.field(node, "return_type")?)?;
                Ok(TypeSyntax::Function {
                    params,
                    ret: Box::new(ret),
                })
            }
            "protocol_composition_type" => {
                let mut cursor = node.walk();
                let parts = node
                    .named_children(&mut cursor)
                    .map(|n| self.read_type(n))
                    .collect::<Result<_, _>>()?;
                Ok(TypeSyntax::Composition(parts))
            }
            // `some P` / `any P` bridge as `P`.
            "opaque_type" | "existential_type" | "type_modifiers" => match node.named_child(0) {
                Some(inner) => self.read_type(inner),
                None => Ok(TypeSyntax::ident(self.node_text(node))),
            },
            _ => Ok(TypeSyntax::ident(self.node_text(node).trim())),
        }
    }
}
