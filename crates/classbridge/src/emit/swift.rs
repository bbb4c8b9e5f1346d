use super::EmitOptions;
use crate::convention::{Convention, reactive_swift_default};
use crate::ir::{ClassModel, InitializerModel, MethodModel, ParameterModel, PropertyModel};
use crate::markers::Marker;
use crate::types::swift::write_type;
use classbridge_syntax::swift::{
    BindingSpecifier, ClassDecl, FunctionDecl, InitializerDecl, Member, Modifier,
    Parameter, SourceFile, TypeSyntax, VariableDecl,
};

/// Emits one Swift class for `model` under `convention`.
pub fn emit_swift_class(
    model: &ClassModel,
    convention: Convention,
    options: &EmitOptions,
) -> ClassDecl {
    let mut class = ClassDecl::new(&model.name);
    match convention {
        Convention::Bridged => {
            class.attributes.push(Marker::PyClass.attribute());
            class.modifiers.push(Modifier::Public);
        }
        Convention::Container => {
            class.attributes.push(Marker::PyContainer.attribute());
            if !model.properties.is_empty() {
                class.attributes.push(Marker::DynamicMemberLookup.attribute());
            }
            class.modifiers.push(Modifier::Public);
        }
        Convention::Reactive => {
            class.attributes.push(Marker::PyClass.attribute());
            class.modifiers.push(Modifier::Public);
            class.inherits.push(TypeSyntax::ident(options.reactive_base.as_str()));
        }
    }

    if convention.emits_properties() {
        for prop in &model.properties {
            class.members.push(Member::Variable(property(prop, convention)));
        }
    }
    if convention.emits_initializer()
        && let Some(init) = &model.initializer
    {
        class.members.push(Member::Initializer(initializer(init)));
    }
    for method in &model.methods {
        class.members.push(Member::Function(function(method, convention)));
    }

    tracing::debug!(
        class = %model.name,
        convention = convention.name(),
        members = class.members.len(),
        "emitted swift class"
    );
    class
}

/// Emits a Swift file with one class per model, in order.
pub fn emit_swift_file(
    models: &[ClassModel],
    convention: Convention,
    options: &EmitOptions,
) -> SourceFile {
    SourceFile::new(
        models
            .iter()
            .map(|model| emit_swift_class(model, convention, options))
            .collect(),
    )
}

fn property(prop: &PropertyModel, convention: Convention) -> VariableDecl {
    let binding = match convention {
        Convention::Reactive => BindingSpecifier::Var,
        _ if prop.access.is_writable() => BindingSpecifier::Var,
        _ => BindingSpecifier::Let,
    };
    let mut decl = VariableDecl::new(binding, &prop.name, write_type(&prop.ty));
    decl.attributes.push(Marker::PyProperty.attribute());
    decl.modifiers.push(Modifier::Public);
    if convention == Convention::Reactive {
        decl.initializer = reactive_swift_default(&prop.ty).map(str::to_string);
    }
    decl
}

fn initializer(init: &InitializerModel) -> InitializerDecl {
    let mut decl = InitializerDecl::new(parameters(&init.parameters));
    decl.attributes.push(Marker::PyInit.attribute());
    decl.modifiers.push(Modifier::Public);
    decl
}

fn function(method: &MethodModel, convention: Convention) -> FunctionDecl {
    let mut decl = FunctionDecl::new(&method.name, parameters(&method.parameters));
    decl.return_type = method.return_type.as_ref().map(write_type);

    if convention == Convention::Container {
        // Calls are forwarded to the wrapped object; no body of its own.
        decl.attributes.push(Marker::PyCall.attribute());
        decl.body = None;
    } else {
        decl.attributes.push(Marker::PyMethod.attribute());
        decl.modifiers.push(Modifier::Public);
    }
    if method.class_bound {
        decl.modifiers.push(Modifier::Class);
    } else if method.is_static {
        decl.modifiers.push(Modifier::Static);
    }
    decl
}

fn parameters(params: &[ParameterModel]) -> Vec<Parameter> {
    params
        .iter()
        .map(|p| Parameter::new(&p.name, write_type(&p.ty)))
        .collect()
}
