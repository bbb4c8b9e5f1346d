use super::{ExtractOptions, Extraction, ModelBuilder};
use crate::access::infer_access;
use crate::error::{DiagnosticKind, ExtractError};
use crate::ir::{MethodModel, ParameterModel, TypeExpr};
use crate::markers::Marker;
use crate::types::swift::read_type;
use classbridge_syntax::swift::{
    ClassDecl, FunctionDecl, InitializerDecl, Member, Modifier, Parameter, VariableDecl,
};

/// Models a Swift class or struct.
///
/// Properties go through [`infer_access`]; computed properties are already a
/// single declaration on this side, so getter and setter never show up as
/// separate members.
pub fn extract_swift_class(
    class: &ClassDecl,
    options: &ExtractOptions,
) -> Result<Extraction, ExtractError> {
    if class.name.trim().is_empty() {
        return Err(ExtractError::MalformedClass {
            reason: "class declaration without a name".into(),
        });
    }

    let mut builder = ModelBuilder::new(&class.name);
    for member in &class.members {
        match member {
            Member::Variable(decl) => variable(&mut builder, decl, options),
            Member::Initializer(init) => initializer(&mut builder, init, options),
            Member::Function(func) => function(&mut builder, func, options)?,
            Member::Unsupported { kind } => builder.diagnose(
                None,
                DiagnosticKind::UnsupportedMember,
                &format!("{} members are not translated", kind),
            ),
        }
    }
    Ok(builder.finish())
}

fn variable(builder: &mut ModelBuilder, decl: &VariableDecl, options: &ExtractOptions) {
    if options.marked_only && !Marker::any_in(&decl.attributes, &[Marker::PyProperty]) {
        return;
    }
    let Some(name) = decl.pattern.identifier() else {
        builder.diagnose(
            None,
            DiagnosticKind::UnbindablePattern,
            "property pattern does not bind a single name",
        );
        return;
    };
    if decl.modifiers.iter().any(Modifier::is_type_level) {
        builder.diagnose(
            Some(name),
            DiagnosticKind::UnsupportedMember,
            "static properties are not translated",
        );
        return;
    }

    let ty = decl
        .type_annotation
        .as_ref()
        .map(read_type)
        .unwrap_or(TypeExpr::Unknown);
    builder.property(name, ty, infer_access(decl));
}

fn initializer(builder: &mut ModelBuilder, init: &InitializerDecl, options: &ExtractOptions) {
    if options.marked_only && !Marker::any_in(&init.attributes, &[Marker::PyInit]) {
        return;
    }
    builder.initializer(parameters(&init.parameters));
}

fn function(
    builder: &mut ModelBuilder,
    func: &FunctionDecl,
    options: &ExtractOptions,
) -> Result<(), ExtractError> {
    if func.name.trim().is_empty() {
        return Err(ExtractError::MalformedMember {
            class: builder.class_name().to_string(),
            reason: "function declaration without a name".into(),
        });
    }
    if options.marked_only
        && !Marker::any_in(&func.attributes, &[Marker::PyMethod, Marker::PyCall])
    {
        return Ok(());
    }

    builder.method(MethodModel {
        name: func.name.clone(),
        parameters: parameters(&func.parameters),
        return_type: func.return_type.as_ref().map(read_type),
        is_static: func.is_type_level(),
        class_bound: func.modifiers.contains(&Modifier::Class),
    });
    Ok(())
}

/// Swift methods have no explicit receiver; only the internal name is kept.
fn parameters(params: &[Parameter]) -> Vec<ParameterModel> {
    params
        .iter()
        .map(|p| ParameterModel::new(&p.name, read_type(&p.ty)))
        .collect()
}
