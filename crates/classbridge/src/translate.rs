//! Whole-tree drivers: extract every class, emit the other side.
//!
//! Classes are independent. A class that fails extraction is reported and
//! left out of the output; its siblings are still translated.

use crate::config::{Direction, TranslateConfig};
use crate::emit::{emit_python_module, emit_swift_file};
use crate::error::{Diagnostic, ExtractError, TranslateError};
use crate::extract::{Extraction, extract_python_class, extract_swift_class};
use crate::ir::ClassModel;
use crate::markers::Marker;
use classbridge_syntax::python::{self, ClassDef};
use classbridge_syntax::swift::SourceFile;
use classbridge_syntax::{SyntaxTree, reader_for, writer_for};
use rayon::prelude::*;
use serde::Serialize;

/// Outcome for one source class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub name: String,
    #[serde(with = "outcome")]
    pub outcome: Result<Vec<Diagnostic>, ExtractError>,
}

impl ClassReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// A translated tree plus one report per source class considered.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub tree: SyntaxTree,
    pub reports: Vec<ClassReport>,
}

impl Translation {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok())
            .flatten()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ExtractError)> {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.name.as_str(), e)))
    }
}

/// Rendered output of [`translate_source`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTranslation {
    pub output: String,
    pub reports: Vec<ClassReport>,
}

/// Translates every class in `tree` into the other representation.
///
/// The source side is the tree's own language; `config.direction` only
/// matters for [`translate_source`], which has to pick a reader.
pub fn translate_tree(tree: &SyntaxTree, config: &TranslateConfig) -> Translation {
    match tree {
        SyntaxTree::Swift(file) => translate_swift(file, config),
        SyntaxTree::Python(module) => {
            let classes = module.classes().map(|class| (class, None));
            translate_python(classes, config)
        }
    }
}

/// Python to Swift with a second module supplying behavior. Classes pair up
/// by name; a class only in `behavior` is ignored.
pub fn translate_python_with_behavior(
    annotations: &python::Module,
    behavior: &python::Module,
    config: &TranslateConfig,
) -> Translation {
    let classes = annotations.classes().map(|class| {
        let partner = behavior.classes().find(|b| b.name == class.name);
        (class, partner)
    });
    translate_python(classes, config)
}

/// Translates independent trees in parallel. Output order matches input.
pub fn translate_batch(trees: &[SyntaxTree], config: &TranslateConfig) -> Vec<Translation> {
    tracing::debug!(trees = trees.len(), "translating batch");
    trees
        .par_iter()
        .map(|tree| translate_tree(tree, config))
        .collect()
}

/// Reads `source` in `config.direction`'s source language, translates it,
/// and renders the result.
pub fn translate_source(
    source: &str,
    config: &TranslateConfig,
) -> Result<SourceTranslation, TranslateError> {
    let from = config.direction.source();
    let to = config.direction.target();
    let reader = reader_for(from).ok_or(TranslateError::NoReader(from))?;
    let writer = writer_for(to).ok_or(TranslateError::NoWriter(to))?;

    let tree = reader.read(source)?;
    let translation = translate_tree(&tree, config);
    let output = writer.write(&translation.tree)?;
    Ok(SourceTranslation {
        output,
        reports: translation.reports,
    })
}

fn translate_swift(file: &SourceFile, config: &TranslateConfig) -> Translation {
    let mut collector = Collector::default();
    for class in &file.classes {
        if config.extract.marked_only
            && !Marker::any_in(&class.attributes, &[Marker::PyClass, Marker::PyContainer])
        {
            tracing::debug!(class = %class.name, "skipping unmarked class");
            continue;
        }
        collector.add(&class.name, extract_swift_class(class, &config.extract));
    }

    let module = emit_python_module(&collector.models, config.convention, &config.emit);
    collector.finish(module.into(), Direction::SwiftToPython)
}

fn translate_python<'a>(
    classes: impl Iterator<Item = (&'a ClassDef, Option<&'a ClassDef>)>,
    config: &TranslateConfig,
) -> Translation {
    let mut collector = Collector::default();
    for (class, behavior) in classes {
        collector.add(
            &class.name,
            extract_python_class(class, behavior, &config.extract),
        );
    }

    let file = emit_swift_file(&collector.models, config.convention, &config.emit);
    collector.finish(file.into(), Direction::PythonToSwift)
}

#[derive(Default)]
struct Collector {
    models: Vec<ClassModel>,
    reports: Vec<ClassReport>,
}

impl Collector {
    fn add(&mut self, name: &str, result: Result<Extraction, ExtractError>) {
        let outcome = match result {
            Ok(extraction) => {
                self.models.push(extraction.model);
                Ok(extraction.diagnostics)
            }
            Err(err) => {
                tracing::warn!(class = %name, error = %err, "class not translated");
                Err(err)
            }
        };
        self.reports.push(ClassReport {
            name: name.to_string(),
            outcome,
        });
    }

    fn finish(self, tree: SyntaxTree, direction: Direction) -> Translation {
        tracing::debug!(
            ?direction,
            classes = self.models.len(),
            failed = self.reports.iter().filter(|r| !r.is_ok()).count(),
            "translated tree"
        );
        Translation {
            tree,
            reports: self.reports,
        }
    }
}

/// Reports serialize as `{"ok": [...]}` or `{"error": "..."}`.
mod outcome {
    use crate::error::{Diagnostic, ExtractError};
    use serde::Serializer;
    use serde::ser::SerializeMap;

    pub fn serialize<S: Serializer>(
        outcome: &Result<Vec<Diagnostic>, ExtractError>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match outcome {
            Ok(diagnostics) => map.serialize_entry("ok", diagnostics)?,
            Err(err) => map.serialize_entry("error", &err.to_string())?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::Convention;
    use crate::error::DiagnosticKind;
    use classbridge_syntax::output::PythonWriter;
    use classbridge_syntax::python::{Expr, Statement};
    use classbridge_syntax::swift::{ClassDecl, FunctionDecl, Pattern, TypeSyntax, VariableDecl};

    fn swift_file() -> SourceFile {
        let mut pair = VariableDecl::var("pair", TypeSyntax::ident("Int"));
        pair.pattern = Pattern::Wildcard;
        SourceFile::new(vec![
            ClassDecl::new("Person")
                .with_attribute("PyClass")
                .with_member(VariableDecl::var("name", TypeSyntax::ident("String")))
                .with_member(pair),
            ClassDecl::new("Broken").with_member(FunctionDecl::new("", Vec::new())),
            ClassDecl::new("Helper")
                .with_member(VariableDecl::let_("size", TypeSyntax::ident("Int"))),
        ])
    }

    fn python_classes(translation: &Translation) -> Vec<String> {
        match &translation.tree {
            SyntaxTree::Python(module) => module.classes().map(|c| c.name.clone()).collect(),
            SyntaxTree::Swift(_) => panic!("expected python output"),
        }
    }

    #[test]
    fn test_failed_class_does_not_abort_siblings() {
        let translation = translate_tree(&swift_file().into(), &TranslateConfig::default());

        assert_eq!(python_classes(&translation), vec!["Person", "Helper"]);
        assert_eq!(translation.reports.len(), 3);
        let failures: Vec<_> = translation.failures().map(|(name, _)| name).collect();
        assert_eq!(failures, vec!["Broken"]);
        let kinds: Vec<_> = translation.diagnostics().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::UnbindablePattern]);
    }

    #[test]
    fn test_marked_only_skips_unmarked_classes() {
        let mut config = TranslateConfig::default();
        config.extract.marked_only = true;
        let translation = translate_tree(&swift_file().into(), &config);
        assert_eq!(python_classes(&translation), vec!["Person"]);
        assert_eq!(translation.reports.len(), 1);
    }

    #[test]
    fn test_python_with_behavior() {
        let stub = python::Module::new(vec![Statement::ClassDef(ClassDef::new(
            "Person",
            vec![Statement::ann_assign("name", Expr::name("str"))],
        ))]);
        let behavior = python::Module::new(vec![Statement::ClassDef(ClassDef::new(
            "Person",
            vec![Statement::FunctionDef(python::FunctionDef::new(
                "greet",
                vec![python::Arg::bare("self")],
            ))],
        ))]);

        let config = TranslateConfig::new(Direction::PythonToSwift, Convention::Bridged);
        let translation = translate_python_with_behavior(&stub, &behavior, &config);
        let SyntaxTree::Swift(file) = &translation.tree else {
            panic!("expected swift output");
        };
        assert_eq!(file.classes.len(), 1);
        assert_eq!(file.classes[0].members.len(), 2);
    }

    #[test]
    fn test_batch_preserves_order() {
        let trees: Vec<SyntaxTree> = (0..16)
            .map(|i| {
                SourceFile::new(vec![ClassDecl::new(format!("Class{}", i))]).into()
            })
            .collect();
        let results = translate_batch(&trees, &TranslateConfig::default());
        let names: Vec<_> = results.iter().flat_map(python_classes).collect();
        let expected: Vec<_> = (0..16).map(|i| format!("Class{}", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_translation_is_deterministic() {
        let config = TranslateConfig::default();
        let render = || match translate_tree(&swift_file().into(), &config).tree {
            SyntaxTree::Python(module) => PythonWriter::emit(&module),
            SyntaxTree::Swift(_) => String::new(),
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn test_report_serialization() {
        let translation = translate_tree(&swift_file().into(), &TranslateConfig::default());
        let json = serde_json::to_value(&translation.reports[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Broken",
                "outcome": {"error": "malformed member in Broken: function declaration without a name"}
            })
        );
    }

    #[test]
    fn test_translate_python_source() {
        let source = "\
class Person:
    name: str
    nickname: str | None

    def greet(self, other: str) -> int | None:
        pass


class Counter(EventDispatcher):
    count = NumericProperty(0)
";
        let config = TranslateConfig::new(Direction::PythonToSwift, Convention::Bridged);
        let result = translate_source(source, &config).unwrap();
        assert!(result.output.contains("public var name: String\n"), "{}", result.output);
        assert!(result.output.contains("public var nickname: String?"), "{}", result.output);
        assert!(result.output.contains("public func greet(other: String) -> Int? {}"));
        assert!(result.output.contains("public var count: Int"), "{}", result.output);
        assert_eq!(result.reports.len(), 2);
        assert!(result.reports.iter().all(ClassReport::is_ok));
    }

    #[test]
    fn test_translate_swift_source() {
        let source = "\
@PyClass
public class Person {
    public let id: Int
    public var nickname: String? = nil
    public func greet(_ other: String) -> Bool { return true }
}
";
        let result = translate_source(source, &TranslateConfig::default()).unwrap();
        insta::assert_snapshot!(result.output, @r"
        class Person:
            @property
            def id(self) -> int:
                pass

            @property
            def nickname(self) -> str | None:
                pass

            @nickname.setter
            def nickname(self, value: str | None) -> None:
                pass

            def greet(self, other: str) -> bool:
                pass
        ");
    }

    #[test]
    fn test_unreadable_source() {
        let err = translate_source("class :\n", &TranslateConfig::new(
            Direction::PythonToSwift,
            Convention::Bridged,
        ))
        .unwrap_err();
        assert!(matches!(err, TranslateError::Read(_)));
    }
}
