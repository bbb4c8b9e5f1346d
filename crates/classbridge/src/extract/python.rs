use super::{ExtractOptions, Extraction, ModelBuilder};
use crate::convention::read_reactive;
use crate::error::{DiagnosticKind, ExtractError};
use crate::ir::{AccessKind, ClassModel, MethodModel, ParameterModel, TypeExpr};
use crate::markers::decorators;
use crate::types::python::read_type;
use classbridge_syntax::python::{Arg, Assign, ClassDef, Expr, FunctionDef, Statement};
use std::collections::HashSet;

/// Models a Python class.
///
/// `behavior` is an optional second definition of the same class (typically
/// the implementation next to a `.pyi` stub). Members are merged by name:
/// this class wins for types, `behavior` decides which methods exist. See
/// [`merge_behavior`].
///
/// Python has no exposure markers, so `marked_only` keeps public members
/// only (no leading underscore, `__init__` excepted).
pub fn extract_python_class(
    class: &ClassDef,
    behavior: Option<&ClassDef>,
    options: &ExtractOptions,
) -> Result<Extraction, ExtractError> {
    let annotations = extract_single(class, options)?;
    match behavior {
        Some(behavior) => {
            let behavior = extract_single(behavior, options)?;
            Ok(merge_behavior(annotations, behavior))
        }
        None => Ok(annotations),
    }
}

fn extract_single(class: &ClassDef, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    if class.name.trim().is_empty() {
        return Err(ExtractError::MalformedClass {
            reason: "class definition without a name".into(),
        });
    }

    let getters: HashSet<&str> = class
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::FunctionDef(func) if func.has_name_decorator(decorators::PROPERTY) => {
                Some(func.name.as_str())
            }
            _ => None,
        })
        .collect();

    let mut builder = ModelBuilder::new(&class.name);
    for stmt in &class.body {
        match stmt {
            Statement::AnnAssign(ann) => match &ann.target {
                Expr::Name(name) if is_exposed(name, options) => {
                    builder.property(name, read_type(&ann.annotation), AccessKind::ReadWrite)
                }
                Expr::Name(_) => {}
                _ => builder.diagnose(
                    None,
                    DiagnosticKind::UnbindablePattern,
                    "annotation target is not a plain name",
                ),
            },
            Statement::Assign(assign) => assignment(&mut builder, assign, options),
            Statement::FunctionDef(func) => function(&mut builder, func, &getters, options)?,
            Statement::ClassDef(nested) => builder.diagnose(
                Some(&nested.name),
                DiagnosticKind::UnsupportedMember,
                "nested classes are not translated",
            ),
            Statement::ImportFrom { .. } | Statement::Pass | Statement::Expr(_) => {}
        }
    }
    Ok(builder.finish())
}

fn is_exposed(name: &str, options: &ExtractOptions) -> bool {
    !options.marked_only || name == decorators::INIT || !name.starts_with('_')
}

/// `name = StringProperty("")` declares a reactive property; other class
/// attributes are not part of the surface.
fn assignment(builder: &mut ModelBuilder, assign: &Assign, options: &ExtractOptions) {
    let Some(ty) = read_reactive(&assign.value) else {
        if let [Expr::Name(name)] = assign.targets.as_slice() {
            builder.diagnose(
                Some(name),
                DiagnosticKind::UnsupportedMember,
                "class attribute assignments are not translated",
            );
        }
        return;
    };
    match assign.targets.as_slice() {
        [Expr::Name(name)] if is_exposed(name, options) => {
            builder.property(name, ty, AccessKind::ReadWrite)
        }
        [Expr::Name(_)] => {}
        _ => builder.diagnose(
            None,
            DiagnosticKind::UnbindablePattern,
            "assignment does not bind a single name",
        ),
    }
}

fn function(
    builder: &mut ModelBuilder,
    func: &FunctionDef,
    getters: &HashSet<&str>,
    options: &ExtractOptions,
) -> Result<(), ExtractError> {
    if func.name.trim().is_empty() {
        return Err(ExtractError::MalformedMember {
            class: builder.class_name().to_string(),
            reason: "function definition without a name".into(),
        });
    }
    if !is_exposed(&func.name, options) {
        return Ok(());
    }

    if func.has_name_decorator(decorators::PROPERTY) {
        let ty = func.returns.as_ref().map(read_type).unwrap_or(TypeExpr::Unknown);
        builder.property(&func.name, ty, AccessKind::ReadOnly);
        return Ok(());
    }
    if let Some(target) = func.attribute_decorator_target(decorators::SETTER) {
        // `def x(self, value: T)`
        let ty = func
            .args
            .get(1)
            .and_then(|arg| arg.annotation.as_ref())
            .map(read_type)
            .unwrap_or(TypeExpr::Unknown);
        if !getters.contains(target) {
            builder.diagnose(
                Some(target),
                DiagnosticKind::OrphanSetter,
                "setter without a getter",
            );
        }
        builder.property(target, ty, AccessKind::ReadWrite);
        return Ok(());
    }
    if func.attribute_decorator_target(decorators::DELETER).is_some() {
        return Ok(());
    }

    variadics(builder, func);

    if func.name == decorators::INIT {
        builder.initializer(parameters(receiverless(&func.args)));
        return Ok(());
    }

    let is_staticmethod = func.has_name_decorator(decorators::STATICMETHOD);
    let is_classmethod = func.has_name_decorator(decorators::CLASSMETHOD);
    let args = if is_staticmethod {
        &func.args[..]
    } else {
        receiverless(&func.args)
    };
    builder.method(MethodModel {
        name: func.name.clone(),
        parameters: parameters(args),
        return_type: func.returns.as_ref().map(read_type),
        is_static: is_staticmethod || is_classmethod,
        class_bound: is_classmethod,
    });
    Ok(())
}

fn variadics(builder: &mut ModelBuilder, func: &FunctionDef) {
    for (arg, prefix) in [(&func.vararg, "*"), (&func.kwarg, "**")] {
        if let Some(arg) = arg {
            builder.diagnose(
                Some(&func.name),
                DiagnosticKind::VariadicParameter,
                &format!("{}{} dropped", prefix, arg.name),
            );
        }
    }
}

/// Drops `self`/`cls`.
fn receiverless(args: &[Arg]) -> &[Arg] {
    args.get(1..).unwrap_or(&[])
}

fn parameters(args: &[Arg]) -> Vec<ParameterModel> {
    args.iter()
        .map(|arg| {
            let ty = arg.annotation.as_ref().map(read_type).unwrap_or(TypeExpr::Unknown);
            ParameterModel::new(&arg.name, ty)
        })
        .collect()
}

/// Merges an annotation-only extraction with its behavioral counterpart.
///
/// Properties: the annotation class's, in its order, then extras from
/// `behavior`. Initializer and methods: `behavior`'s, with each parameter
/// and return type taken from the same-named annotation member when that
/// type is known.
pub fn merge_behavior(annotations: Extraction, behavior: Extraction) -> Extraction {
    let mut model = annotations.model;
    let behavior_model = behavior.model;

    for prop in behavior_model.properties {
        match model.properties.iter_mut().find(|p| p.name == prop.name) {
            Some(existing) => {
                existing.access = existing.access.widen(prop.access);
                if existing.ty == TypeExpr::Unknown {
                    existing.ty = prop.ty;
                }
            }
            None => model.properties.push(prop),
        }
    }

    let initializer = match (model.initializer.take(), behavior_model.initializer) {
        (Some(typed), Some(mut init)) => {
            overlay_parameters(&mut init.parameters, &typed.parameters);
            Some(init)
        }
        (typed, init) => init.or(typed),
    };

    let methods = behavior_model
        .methods
        .into_iter()
        .map(|mut method| {
            if let Some(typed) = model.methods.iter().find(|m| m.name == method.name) {
                overlay_parameters(&mut method.parameters, &typed.parameters);
                if let Some(ret) = &typed.return_type
                    && *ret != TypeExpr::Unknown
                {
                    method.return_type = Some(ret.clone());
                }
            }
            method
        })
        .collect();

    model.initializer = initializer;
    model.methods = methods;

    let mut diagnostics = annotations.diagnostics;
    diagnostics.extend(behavior.diagnostics.into_iter().filter(|diagnostic| {
        diagnostic.kind != DiagnosticKind::UnknownType
            || diagnostic
                .member
                .as_deref()
                .is_none_or(|member| member_has_unknown(&model, member))
    }));
    tracing::debug!(
        class = %model.name,
        methods = model.methods.len(),
        "merged behavior class"
    );
    Extraction { model, diagnostics }
}

/// Whether a member still carries an untranslatable type after merging.
fn member_has_unknown(model: &ClassModel, member: &str) -> bool {
    if member == "init" {
        return model
            .initializer
            .as_ref()
            .is_some_and(|init| init.parameters.iter().any(|p| p.ty.contains_unknown()));
    }
    let method = model.methods.iter().filter(|m| m.name == member).any(|m| {
        m.parameters.iter().any(|p| p.ty.contains_unknown())
            || m.return_type.as_ref().is_some_and(TypeExpr::contains_unknown)
    });
    let property = model
        .properties
        .iter()
        .any(|p| p.name == member && p.ty.contains_unknown());
    method || property
}

fn overlay_parameters(params: &mut [ParameterModel], typed: &[ParameterModel]) {
    for param in params {
        if let Some(source) = typed.iter().find(|t| t.name == param.name)
            && source.ty != TypeExpr::Unknown
        {
            param.ty = source.ty.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Primitive;
    use classbridge_syntax::python::{AnnAssign, Constant};

    fn name(id: &str) -> Expr {
        Expr::name(id)
    }

    fn method(name: &str, args: Vec<Arg>) -> Statement {
        Statement::FunctionDef(FunctionDef::new(name, args))
    }

    fn extract(class: &ClassDef) -> Extraction {
        extract_python_class(class, None, &ExtractOptions::default()).unwrap()
    }

    #[test]
    fn test_annotations_are_read_write() {
        let class = ClassDef::new(
            "Person",
            vec![
                Statement::ann_assign("name", name("str")),
                Statement::ann_assign("nickname", Expr::union(name("str"), Expr::none())),
            ],
        );
        let model = extract(&class).model;
        assert_eq!(model.properties.len(), 2);
        assert_eq!(model.properties[0].access, AccessKind::ReadWrite);
        assert_eq!(
            model.properties[1].ty,
            TypeExpr::optional(Primitive::Text.into())
        );
    }

    #[test]
    fn test_getter_setter_pair_collapses() {
        let getter = FunctionDef::new("age", vec![Arg::bare("self")])
            .returning(name("int"))
            .decorated(name("property"));
        let setter = FunctionDef::new(
            "age",
            vec![Arg::bare("self"), Arg::typed("value", name("int"))],
        )
        .returning(Expr::none())
        .decorated(Expr::attribute(name("age"), "setter"));
        let readonly = FunctionDef::new("id", vec![Arg::bare("self")])
            .returning(name("int"))
            .decorated(name("property"));
        let class = ClassDef::new(
            "Person",
            vec![
                Statement::FunctionDef(getter),
                Statement::FunctionDef(setter),
                Statement::FunctionDef(readonly),
            ],
        );

        let extraction = extract(&class);
        let model = extraction.model;
        assert!(model.methods.is_empty());
        assert_eq!(model.properties.len(), 2);
        assert_eq!(model.property("age").unwrap().access, AccessKind::ReadWrite);
        assert_eq!(model.property("id").unwrap().access, AccessKind::ReadOnly);
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_orphan_setter() {
        let setter = FunctionDef::new(
            "score",
            vec![Arg::bare("self"), Arg::typed("value", name("float"))],
        )
        .decorated(Expr::attribute(name("score"), "setter"));
        let class = ClassDef::new("Game", vec![Statement::FunctionDef(setter)]);

        let extraction = extract(&class);
        let prop = extraction.model.property("score").expect("score");
        assert_eq!(prop.ty, Primitive::Decimal.into());
        assert_eq!(prop.access, AccessKind::ReadWrite);
        assert_eq!(extraction.diagnostics[0].kind, DiagnosticKind::OrphanSetter);
    }

    #[test]
    fn test_receivers_and_static_methods() {
        let class = ClassDef::new(
            "Person",
            vec![
                method(
                    "__init__",
                    vec![Arg::bare("self"), Arg::typed("name", name("str"))],
                ),
                method("greet", vec![Arg::bare("self"), Arg::typed("other", name("Person"))]),
                Statement::FunctionDef(
                    FunctionDef::new("parse", vec![Arg::typed("text", name("str"))])
                        .decorated(name("staticmethod")),
                ),
                Statement::FunctionDef(
                    FunctionDef::new("default", vec![Arg::bare("cls")])
                        .returning(Expr::Constant(Constant::Str("Person".into())))
                        .decorated(name("classmethod")),
                ),
            ],
        );

        let model = extract(&class).model;
        let init = model.initializer.as_ref().expect("initializer");
        assert_eq!(init.parameters, vec![ParameterModel::new("name", Primitive::Text.into())]);

        let greet = model.method("greet").unwrap();
        assert_eq!(greet.parameters.len(), 1);
        assert!(!greet.is_static);

        let parse = model.method("parse").unwrap();
        assert_eq!(parse.parameters[0].name, "text");
        assert!(parse.is_static);
        assert!(!parse.class_bound);

        let default = model.method("default").unwrap();
        assert!(default.parameters.is_empty());
        assert!(default.is_static);
        assert!(default.class_bound);
        assert_eq!(default.return_type, Some(TypeExpr::Named("Person".into())));
    }

    #[test]
    fn test_variadics_and_nested_classes() {
        let mut func = FunctionDef::new("log", vec![Arg::bare("self")]);
        func.vararg = Some(Arg::bare("args"));
        func.kwarg = Some(Arg::bare("kwargs"));
        let class = ClassDef::new(
            "Logger",
            vec![
                Statement::FunctionDef(func),
                Statement::ClassDef(ClassDef::new("Meta", vec![Statement::Pass])),
            ],
        );

        let extraction = extract(&class);
        assert!(extraction.model.method("log").unwrap().parameters.is_empty());
        let kinds: Vec<_> = extraction.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::VariadicParameter,
                DiagnosticKind::VariadicParameter,
                DiagnosticKind::UnsupportedMember,
            ]
        );
    }

    #[test]
    fn test_reactive_assignments_read_back() {
        let class = ClassDef::new(
            "Widget",
            vec![
                Statement::assign(
                    "count",
                    Expr::call(name("NumericProperty"), vec![Expr::Constant(Constant::Int(0))]),
                ),
                Statement::assign("VERSION", Expr::Constant(Constant::Int(2))),
            ],
        );
        let extraction = extract(&class);
        assert_eq!(
            extraction.model.property("count").unwrap().ty,
            Primitive::WholeNumber.into()
        );
        assert!(extraction.model.property("VERSION").is_none());
        assert_eq!(extraction.diagnostics.len(), 1);
    }

    #[test]
    fn test_unbindable_annotation_target() {
        let class = ClassDef::new(
            "Odd",
            vec![Statement::AnnAssign(AnnAssign {
                target: Expr::attribute(name("self"), "x"),
                annotation: name("int"),
                value: None,
            })],
        );
        let extraction = extract(&class);
        assert!(extraction.model.properties.is_empty());
        assert_eq!(
            extraction.diagnostics[0].kind,
            DiagnosticKind::UnbindablePattern
        );
    }

    #[test]
    fn test_marked_only_keeps_public_members() {
        let class = ClassDef::new(
            "Person",
            vec![
                Statement::ann_assign("_cache", name("dict")),
                Statement::ann_assign("name", name("str")),
                method("__init__", vec![Arg::bare("self")]),
                method("_helper", vec![Arg::bare("self")]),
            ],
        );
        let options = ExtractOptions { marked_only: true };
        let model = extract_python_class(&class, None, &options).unwrap().model;
        assert_eq!(model.properties.len(), 1);
        assert!(model.initializer.is_some());
        assert!(model.methods.is_empty());
    }

    #[test]
    fn test_behavior_merge() {
        let stub = ClassDef::new(
            "Person",
            vec![
                Statement::ann_assign("name", name("str")),
                Statement::FunctionDef(
                    FunctionDef::new(
                        "greet",
                        vec![Arg::bare("self"), Arg::typed("other", name("Person"))],
                    )
                    .returning(name("str")),
                ),
                method("removed", vec![Arg::bare("self")]),
            ],
        );
        let behavior = ClassDef::new(
            "Person",
            vec![
                method("__init__", vec![Arg::bare("self"), Arg::bare("name")]),
                method("greet", vec![Arg::bare("self"), Arg::bare("other")]),
                method("extra", vec![Arg::bare("self")]),
            ],
        );

        let extraction =
            extract_python_class(&stub, Some(&behavior), &ExtractOptions::default()).unwrap();
        let model = extraction.model;

        assert_eq!(model.properties.len(), 1);
        assert!(model.initializer.is_some());
        let names: Vec<_> = model.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["greet", "extra"]);

        let greet = model.method("greet").unwrap();
        assert_eq!(greet.parameters[0].ty, TypeExpr::Named("Person".into()));
        assert_eq!(greet.return_type, Some(Primitive::Text.into()));

        // `greet` was typed by the stub; `__init__` has no typed counterpart.
        let unknown: Vec<_> = extraction
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::UnknownType)
            .map(|d| d.member.as_deref())
            .collect();
        assert_eq!(unknown, vec![Some("init")]);
    }
}
