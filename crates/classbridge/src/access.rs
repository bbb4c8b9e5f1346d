//! Accessor-kind inference for Swift properties.
//!
//! Python properties need no inference: annotated fields are read-write, and
//! `@property` / `@x.setter` say what they are.

use crate::ir::AccessKind;
use classbridge_syntax::swift::{AccessorBlock, AccessorKind, BindingSpecifier, Pattern, VariableDecl};

/// Decides whether a property is read-only or read-write.
///
/// First match wins:
///
/// 1. `let` binding: read-only.
/// 2. Computed property with only a getter: read-only.
/// 3. Computed property with getter and setter: read-write.
/// 4. `var` bound to a plain name with no `get`/`set` block: read-write.
///    Observer blocks (`willSet`/`didSet`) still make a stored property.
/// 5. Anything else: read-only.
pub fn infer_access(decl: &VariableDecl) -> AccessKind {
    if decl.binding == BindingSpecifier::Let {
        return AccessKind::ReadOnly;
    }

    match &decl.accessors {
        Some(AccessorBlock::Getter) => AccessKind::ReadOnly,
        Some(block) if block.has(AccessorKind::Get) => {
            if block.has(AccessorKind::Set) {
                AccessKind::ReadWrite
            } else {
                AccessKind::ReadOnly
            }
        }
        Some(block) if !is_observer_block(block) => AccessKind::ReadOnly,
        _ => match decl.pattern {
            Pattern::Identifier(_) => AccessKind::ReadWrite,
            _ => AccessKind::ReadOnly,
        },
    }
}

fn is_observer_block(block: &AccessorBlock) -> bool {
    match block {
        AccessorBlock::Getter => false,
        AccessorBlock::Accessors(kinds) => kinds
            .iter()
            .all(|k| matches!(k, AccessorKind::WillSet | AccessorKind::DidSet)),
    }
}
