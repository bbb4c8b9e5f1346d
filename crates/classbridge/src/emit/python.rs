use super::{DEFAULT_REACTIVE_BASE, EmitOptions};
use crate::convention::{Convention, ReactiveKind, reactive_python_value};
use crate::ir::{ClassModel, InitializerModel, MethodModel, ParameterModel, PropertyModel};
use crate::markers::decorators;
use crate::types::python::write_type;
use classbridge_syntax::python::{Arg, ClassDef, Expr, FunctionDef, Module, Statement};
use std::collections::BTreeSet;

/// Emits one Python class for `model` under `convention`.
pub fn emit_python_class(
    model: &ClassModel,
    convention: Convention,
    options: &EmitOptions,
) -> ClassDef {
    let mut class = ClassDef::new(&model.name, Vec::new());
    if convention == Convention::Reactive {
        class.bases.push(Expr::dotted(&options.reactive_base));
    }

    if convention.emits_properties() {
        for prop in &model.properties {
            match convention {
                Convention::Reactive => {
                    let (_, value) = reactive_python_value(&prop.ty);
                    class.body.push(Statement::assign(&prop.name, value));
                }
                _ => class.body.extend(property(prop, options)),
            }
        }
    }
    if convention.emits_initializer()
        && let Some(init) = &model.initializer
    {
        class.body.push(Statement::FunctionDef(initializer(init, options)));
    }
    for method in &model.methods {
        class.body.push(Statement::FunctionDef(function(method, options)));
    }

    if class.body.is_empty() {
        class.body.push(Statement::Pass);
    }

    tracing::debug!(
        class = %model.name,
        convention = convention.name(),
        members = class.body.len(),
        "emitted python class"
    );
    class
}

/// Emits a module with one class per model, in order. The reactive
/// convention also gets the imports its classes use.
pub fn emit_python_module(
    models: &[ClassModel],
    convention: Convention,
    options: &EmitOptions,
) -> Module {
    let mut body = Vec::new();
    if convention == Convention::Reactive {
        if options.reactive_base == DEFAULT_REACTIVE_BASE {
            body.push(Statement::ImportFrom {
                module: "kivy.event".into(),
                names: vec![DEFAULT_REACTIVE_BASE.into()],
            });
        }
        let kinds: BTreeSet<ReactiveKind> = models
            .iter()
            .flat_map(|model| &model.properties)
            .map(|prop| ReactiveKind::for_type(&prop.ty))
            .collect();
        if !kinds.is_empty() {
            body.push(Statement::ImportFrom {
                module: "kivy.properties".into(),
                names: kinds.iter().map(|kind| kind.name().to_string()).collect(),
            });
        }
    }

    body.extend(
        models
            .iter()
            .map(|model| Statement::ClassDef(emit_python_class(model, convention, options))),
    );
    Module::new(body)
}

/// Read-only: a `@property` getter. Read-write: getter plus
/// `@name.setter`, or a plain annotation with `python_stored_fields`.
fn property(prop: &PropertyModel, options: &EmitOptions) -> Vec<Statement> {
    let ty = write_type(&prop.ty, options.optional_style);
    if prop.access.is_writable() && options.python_stored_fields {
        return vec![Statement::ann_assign(&prop.name, ty)];
    }

    let getter = FunctionDef::new(&prop.name, vec![Arg::bare("self")])
        .returning(ty.clone())
        .decorated(Expr::name(decorators::PROPERTY));
    let mut members = vec![Statement::FunctionDef(getter)];

    if prop.access.is_writable() {
        let setter = FunctionDef::new(
            &prop.name,
            vec![Arg::bare("self"), Arg::typed("value", ty)],
        )
        .returning(Expr::none())
        .decorated(Expr::attribute(Expr::name(&prop.name), decorators::SETTER));
        members.push(Statement::FunctionDef(setter));
    }
    members
}

fn initializer(init: &InitializerModel, options: &EmitOptions) -> FunctionDef {
    let mut args = vec![Arg::bare("self")];
    args.extend(arguments(&init.parameters, options));
    FunctionDef::new(decorators::INIT, args)
}

fn function(method: &MethodModel, options: &EmitOptions) -> FunctionDef {
    let mut args = Vec::new();
    if method.class_bound {
        args.push(Arg::bare("cls"));
    } else if !method.is_static {
        args.push(Arg::bare("self"));
    }
    args.extend(arguments(&method.parameters, options));

    let mut def = FunctionDef::new(&method.name, args);
    if method.class_bound {
        def = def.decorated(Expr::name(decorators::CLASSMETHOD));
    } else if method.is_static {
        def = def.decorated(Expr::name(decorators::STATICMETHOD));
    }
    if let Some(ret) = &method.return_type {
        def = def.returning(write_type(ret, options.optional_style));
    }
    def
}

fn arguments<'a>(
    params: &'a [ParameterModel],
    options: &'a EmitOptions,
) -> impl Iterator<Item = Arg> + 'a {
    params
        .iter()
        .map(|p| Arg::typed(&p.name, write_type(&p.ty, options.optional_style)))
}
