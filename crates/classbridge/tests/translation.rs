//! End-to-end translation: source trees through extraction and emission.

use classbridge::types::{OptionalStyle, python, swift};
use classbridge::{
    AccessKind, ClassModel, Convention, Direction, EmitOptions, ExtractOptions, MethodModel,
    ParameterModel, Primitive, TranslateConfig, TypeExpr, emit_python_class, emit_swift_class,
    extract_swift_class, infer_access, translate_tree,
};
use classbridge_syntax::python::{Expr, Statement};
use classbridge_syntax::swift::{
    AccessorBlock, AccessorKind, ClassDecl, FunctionDecl, Parameter, Pattern, SourceFile,
    TypeSyntax, VariableDecl,
};
use classbridge_syntax::{PythonWriter, SwiftWriter, SyntaxTree};

fn ident(name: &str) -> TypeSyntax {
    TypeSyntax::ident(name)
}

fn extract(class: &ClassDecl) -> ClassModel {
    extract_swift_class(class, &ExtractOptions::default())
        .expect("class extracts")
        .model
}

fn python_output(tree: &SyntaxTree) -> String {
    match tree {
        SyntaxTree::Python(module) => PythonWriter::emit(module),
        SyntaxTree::Swift(_) => panic!("expected python output"),
    }
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn bridged_read_write_text_property() {
    let class = ClassDecl::new("Person").with_member(VariableDecl::var("name", ident("String")));
    let model = extract(&class);
    assert_eq!(
        model.properties[0].access,
        AccessKind::ReadWrite,
        "stored var is read-write"
    );

    let emitted = emit_python_class(&model, Convention::Bridged, &EmitOptions::default());
    insta::assert_snapshot!(PythonWriter::emit_class(&emitted), @r"
    class Person:
        @property
        def name(self) -> str:
            pass

        @name.setter
        def name(self, value: str) -> None:
            pass
    ");
}

#[test]
fn container_method_only() {
    let class = ClassDecl::new("Index")
        .with_member(VariableDecl::var("size", ident("Int")))
        .with_member(
            FunctionDecl::new(
                "lookup",
                vec![Parameter::new("keys", TypeSyntax::array(ident("String")))],
            )
            .returning(TypeSyntax::optional(ident("Int"))),
        );
    let model = extract(&class);

    let emitted = emit_python_class(&model, Convention::Container, &EmitOptions::default());
    let functions: Vec<_> = emitted
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::FunctionDef(func) => Some(func),
            _ => None,
        })
        .collect();
    assert_eq!(emitted.body.len(), 1);
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name, "lookup");
    assert_eq!(
        functions[0].returns,
        Some(Expr::union(Expr::name("int"), Expr::none()))
    );
    insta::assert_snapshot!(PythonWriter::emit_class(&emitted), @r"
    class Index:
        def lookup(self, keys: list[str]) -> int | None:
            pass
    ");
}

#[test]
fn reactive_integer_property() {
    let class = ClassDecl::new("Counter").with_member(VariableDecl::var("count", ident("Int")));
    let model = extract(&class);

    let emitted = emit_python_class(&model, Convention::Reactive, &EmitOptions::default());
    insta::assert_snapshot!(PythonWriter::emit_class(&emitted), @r"
    class Counter(EventDispatcher):
        count = NumericProperty(0)
    ");
}

#[test]
fn swift_file_to_python_module() {
    let file = SourceFile::new(vec![
        ClassDecl::new("Account")
            .with_attribute("PyClass")
            .with_member(VariableDecl::let_("id", ident("Int")))
            .with_member(VariableDecl::var(
                "tags",
                TypeSyntax::dictionary(ident("String"), TypeSyntax::array(ident("Date"))),
            ))
            .with_member(
                FunctionDecl::new("open", vec![Parameter::labeled("_", "address", ident("URL"))])
                    .returning(ident("Bool")),
            ),
    ]);
    let config = TranslateConfig {
        emit: EmitOptions {
            python_stored_fields: true,
            ..EmitOptions::default()
        },
        ..TranslateConfig::default()
    };

    let translation = translate_tree(&file.into(), &config);
    insta::assert_snapshot!(python_output(&translation.tree), @r"
    class Account:
        @property
        def id(self) -> int:
            pass

        tags: dict[str, list[datetime.datetime]]

        def open(self, address: url) -> bool:
            pass
    ");
}

#[test]
fn python_module_to_swift_file() {
    let module = classbridge_syntax::python::Module::new(vec![Statement::ClassDef(
        classbridge_syntax::python::ClassDef::new(
            "Point",
            vec![
                Statement::ann_assign("x", Expr::name("float")),
                Statement::ann_assign(
                    "label",
                    Expr::union(Expr::none(), Expr::name("str")),
                ),
            ],
        ),
    )]);
    let config = TranslateConfig::new(Direction::PythonToSwift, Convention::Bridged);
    let translation = translate_tree(&module.into(), &config);
    let SyntaxTree::Swift(file) = &translation.tree else {
        panic!("expected swift output");
    };
    insta::assert_snapshot!(SwiftWriter::emit(file), @r"
    @PyClass
    public class Point {
        @PyProperty
        public var x: Double

        @PyProperty
        public var label: String?
    }
    ");
}

#[test]
fn classmethod_survives_a_round_trip() {
    use classbridge_syntax::python::{Arg, ClassDef, FunctionDef, Module};

    let module = Module::new(vec![Statement::ClassDef(ClassDef::new(
        "Color",
        vec![
            Statement::FunctionDef(
                FunctionDef::new("named", vec![Arg::bare("cls"), Arg::typed("name", Expr::name("str"))])
                    .decorated(Expr::name("classmethod")),
            ),
            Statement::FunctionDef(
                FunctionDef::new("blend", vec![Arg::typed("ratio", Expr::name("float"))])
                    .decorated(Expr::name("staticmethod")),
            ),
        ],
    ))]);

    let to_swift = TranslateConfig::new(Direction::PythonToSwift, Convention::Bridged);
    let swift_tree = translate_tree(&module.into(), &to_swift).tree;
    let SyntaxTree::Swift(file) = &swift_tree else {
        panic!("expected swift output");
    };
    let swift_source = SwiftWriter::emit(file);
    assert!(swift_source.contains("public class func named(name: String) {}"), "{}", swift_source);
    assert!(swift_source.contains("public static func blend(ratio: Double) {}"), "{}", swift_source);

    let back = translate_tree(&swift_tree, &TranslateConfig::default());
    insta::assert_snapshot!(python_output(&back.tree), @r"
    class Color:
        @classmethod
        def named(cls, name: str):
            pass

        @staticmethod
        def blend(ratio: float):
            pass
    ");
}

// ============================================================================
// Type translation properties
// ============================================================================

const PRIMITIVES: [Primitive; 9] = [
    Primitive::Text,
    Primitive::WholeNumber,
    Primitive::Decimal,
    Primitive::Flag,
    Primitive::BinaryBlob,
    Primitive::Timestamp,
    Primitive::UriString,
    Primitive::RawHandle,
    Primitive::Void,
];

const STYLES: [OptionalStyle; 3] = [
    OptionalStyle::UnionNullLast,
    OptionalStyle::UnionNullFirst,
    OptionalStyle::Typing,
];

#[test]
fn primitives_round_trip() {
    for primitive in PRIMITIVES {
        let ty = TypeExpr::Primitive(primitive);

        let swift_side = swift::write_type(&ty);
        let python_side = classbridge::swift_to_python(&swift_side, OptionalStyle::default());
        assert_eq!(python::read_type(&python_side), ty, "{:?} via python", primitive);

        let back = classbridge::python_to_swift(&python_side);
        assert_eq!(back, swift_side, "{:?} back to swift", primitive);
    }
}

#[test]
fn optional_symmetry() {
    let ty = TypeExpr::optional(Primitive::Text.into());
    let null_last = Expr::union(Expr::name("str"), Expr::none());
    let null_first = Expr::union(Expr::none(), Expr::name("str"));

    assert_eq!(python::read_type(&null_last), ty);
    assert_eq!(python::read_type(&null_first), ty);
    for style in STYLES {
        assert_eq!(python::read_type(&python::write_type(&ty, style)), ty);
    }
    assert_eq!(
        classbridge::python_to_swift(&null_first),
        TypeSyntax::optional(ident("String"))
    );
}

/// Every type built from `leaves` by up to three wrapping steps.
fn nested_types() -> Vec<TypeExpr> {
    let leaves: Vec<TypeExpr> = PRIMITIVES[..4].iter().map(|p| TypeExpr::Primitive(*p)).collect();
    let wraps: [fn(TypeExpr) -> Option<TypeExpr>; 6] = [
        |t| Some(TypeExpr::array(t)),
        |t| Some(TypeExpr::set(t)),
        |t| Some(TypeExpr::map(Primitive::Text.into(), t)),
        |t| Some(TypeExpr::Tuple(vec![t, Primitive::Flag.into()])),
        |t| Some(TypeExpr::generic("Result", vec![t, Primitive::Text.into()])),
        |t| match t {
            TypeExpr::Optional(_) => None,
            t => Some(TypeExpr::optional(t)),
        },
    ];

    let mut all = leaves.clone();
    let mut frontier = leaves;
    for _ in 0..3 {
        let next: Vec<TypeExpr> = frontier
            .iter()
            .flat_map(|ty| wraps.iter().filter_map(|wrap| wrap(ty.clone())))
            .collect();
        all.extend(next.iter().cloned());
        frontier = next;
    }
    all
}

#[test]
fn nested_containers_keep_their_shape() {
    let types = nested_types();
    assert!(types.len() > 900);
    for ty in &types {
        assert_eq!(&swift::read_type(&swift::write_type(ty)), ty);
        for style in STYLES {
            assert_eq!(&python::read_type(&python::write_type(ty, style)), ty);
        }
    }
}

#[test]
fn translation_is_deterministic() {
    let ty = TypeSyntax::dictionary(
        ident("String"),
        TypeSyntax::optional(TypeSyntax::array(ident("Int"))),
    );
    let first = classbridge::swift_to_python(&ty, OptionalStyle::default());
    let second = classbridge::swift_to_python(&ty, OptionalStyle::default());
    assert_eq!(PythonWriter::emit_expr(&first), PythonWriter::emit_expr(&second));
    assert_eq!(PythonWriter::emit_expr(&first), "dict[str, list[int] | None]");
}

#[test]
fn unknown_is_visible() {
    let func = TypeSyntax::Function {
        params: vec![ident("Int")],
        ret: Box::new(ident("Void")),
    };
    let annotation = classbridge::swift_to_python(&TypeSyntax::array(func), OptionalStyle::default());
    assert_eq!(PythonWriter::emit_expr(&annotation), "list[Any]");
}

// ============================================================================
// Accessor inference and emission order
// ============================================================================

#[test]
fn accessor_kinds_for_each_declaration_form() {
    let int = || ident("Int");
    let mut irrefutable = VariableDecl::var("x", int());
    irrefutable.pattern = Pattern::Tuple(vec![Pattern::Wildcard, Pattern::Wildcard]);

    let cases = [
        (VariableDecl::let_("a", int()), AccessKind::ReadOnly),
        (
            VariableDecl::var("b", int()).with_accessors(AccessorBlock::Getter),
            AccessKind::ReadOnly,
        ),
        (
            VariableDecl::var("c", int()).with_accessors(AccessorBlock::Accessors(vec![
                AccessorKind::Get,
                AccessorKind::Set,
            ])),
            AccessKind::ReadWrite,
        ),
        (VariableDecl::var("d", int()), AccessKind::ReadWrite),
        (irrefutable, AccessKind::ReadOnly),
    ];
    for (decl, expected) in cases {
        assert_eq!(infer_access(&decl), expected, "{:?}", decl.pattern);
    }
}

#[test]
fn member_order_is_stable() {
    let model = ClassModel::new("Shape")
        .with_method(MethodModel {
            name: "area".into(),
            parameters: Vec::new(),
            return_type: Some(Primitive::Decimal.into()),
            is_static: false,
            class_bound: false,
        })
        .with_property("sides", Primitive::WholeNumber.into(), AccessKind::ReadOnly)
        .with_initializer(vec![ParameterModel::new("sides", Primitive::WholeNumber.into())])
        .with_property("name", Primitive::Text.into(), AccessKind::ReadWrite);

    let options = EmitOptions::default();
    let first = SwiftWriter::emit_class(&emit_swift_class(&model, Convention::Bridged, &options));
    let second = SwiftWriter::emit_class(&emit_swift_class(&model, Convention::Bridged, &options));
    assert_eq!(first, second);

    let positions: Vec<_> = ["let sides", "var name", "init(", "func area"]
        .iter()
        .map(|needle| first.find(needle).expect(needle))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", first);
}
