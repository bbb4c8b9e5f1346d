//! Declaration extraction: one class declaration in, one [`ClassModel`] out.

pub mod python;
pub mod swift;

pub use python::{extract_python_class, merge_behavior};
pub use swift::extract_swift_class;

use crate::error::{Diagnostic, DiagnosticKind};
use crate::ir::{
    AccessKind, ClassModel, InitializerModel, MethodModel, ParameterModel, PropertyModel, TypeExpr,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Only extract members (and, at file level, classes) carrying an
    /// exposure marker.
    pub marked_only: bool,
}

/// A modeled class and what was dropped along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub model: ClassModel,
    pub diagnostics: Vec<Diagnostic>,
}

/// Accumulates members in declaration order.
pub(crate) struct ModelBuilder {
    model: ClassModel,
    diagnostics: Vec<Diagnostic>,
}

impl ModelBuilder {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            model: ClassModel::new(name),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn class_name(&self) -> &str {
        &self.model.name
    }

    /// Adds a property, or folds it into an earlier one of the same name:
    /// the first known type is kept and access widens.
    pub(crate) fn property(&mut self, name: &str, ty: TypeExpr, access: AccessKind) {
        if let Some(existing) = self.model.properties.iter_mut().find(|p| p.name == name) {
            existing.access = existing.access.widen(access);
            if existing.ty == TypeExpr::Unknown && ty != TypeExpr::Unknown {
                existing.ty = ty;
            }
            return;
        }
        self.check_type(Some(name), &ty);
        self.model.properties.push(PropertyModel {
            name: name.to_string(),
            ty,
            access,
        });
    }

    pub(crate) fn initializer(&mut self, parameters: Vec<ParameterModel>) {
        if self.model.initializer.is_some() {
            self.diagnose(
                Some("init"),
                DiagnosticKind::DuplicateInitializer,
                "only the first initializer is kept",
            );
            return;
        }
        for param in &parameters {
            self.check_type(Some("init"), &param.ty);
        }
        self.model.initializer = Some(InitializerModel { parameters });
    }

    pub(crate) fn method(&mut self, method: MethodModel) {
        for param in &method.parameters {
            self.check_type(Some(&method.name), &param.ty);
        }
        if let Some(ret) = &method.return_type {
            self.check_type(Some(&method.name), ret);
        }
        self.model.methods.push(method);
    }

    pub(crate) fn diagnose(&mut self, member: Option<&str>, kind: DiagnosticKind, message: &str) {
        tracing::warn!(
            class = %self.model.name,
            member = member.unwrap_or(""),
            kind = kind.as_str(),
            "{}",
            message
        );
        self.diagnostics.push(Diagnostic {
            class: self.model.name.clone(),
            member: member.map(str::to_string),
            kind,
            message: message.to_string(),
        });
    }

    fn check_type(&mut self, member: Option<&str>, ty: &TypeExpr) {
        if ty.contains_unknown() {
            self.diagnose(member, DiagnosticKind::UnknownType, "type has no translation");
        }
    }

    pub(crate) fn finish(self) -> Extraction {
        tracing::debug!(
            class = %self.model.name,
            properties = self.model.properties.len(),
            initializer = self.model.initializer.is_some(),
            methods = self.model.methods.len(),
            diagnostics = self.diagnostics.len(),
            "extracted class"
        );
        Extraction {
            model: self.model,
            diagnostics: self.diagnostics,
        }
    }
}
