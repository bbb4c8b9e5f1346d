use classbridge::types::OptionalStyle;
use classbridge::{TranslateConfig, swift_to_python, translate_batch, translate_tree};
use classbridge_syntax::SyntaxTree;
use classbridge_syntax::swift::{
    AccessorBlock, ClassDecl, FunctionDecl, InitializerDecl, Parameter, SourceFile, TypeSyntax,
    VariableDecl,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn ident(name: &str) -> TypeSyntax {
    TypeSyntax::ident(name)
}

fn nested_type(depth: usize) -> TypeSyntax {
    (0..depth).fold(ident("String"), |ty, level| match level % 3 {
        0 => TypeSyntax::array(ty),
        1 => TypeSyntax::optional(ty),
        _ => TypeSyntax::dictionary(ident("String"), ty),
    })
}

fn wide_class(name: &str, members: usize) -> ClassDecl {
    let mut class = ClassDecl::new(name).with_attribute("PyClass");
    for i in 0..members {
        class = class
            .with_member(VariableDecl::var(format!("field{}", i), nested_type(i % 5)))
            .with_member(
                VariableDecl::var(format!("computed{}", i), ident("Int"))
                    .with_accessors(AccessorBlock::Getter),
            );
    }
    class
        .with_member(InitializerDecl::new(vec![Parameter::new("seed", ident("Int"))]))
        .with_member(
            FunctionDecl::new("lookup", vec![Parameter::new("keys", nested_type(3))])
                .returning(TypeSyntax::optional(ident("Double"))),
        )
}

fn bench_types(c: &mut Criterion) {
    let shallow = ident("Int");
    let deep = nested_type(12);
    c.bench_function("type_primitive", |b| {
        b.iter(|| swift_to_python(black_box(&shallow), OptionalStyle::default()))
    });
    c.bench_function("type_nested_12", |b| {
        b.iter(|| swift_to_python(black_box(&deep), OptionalStyle::default()))
    });
}

fn bench_classes(c: &mut Criterion) {
    let config = TranslateConfig::default();
    let file: SyntaxTree = SourceFile::new(vec![wide_class("Wide", 50)]).into();
    c.bench_function("class_100_properties", |b| {
        b.iter(|| translate_tree(black_box(&file), &config))
    });

    let files: Vec<SyntaxTree> = (0..64)
        .map(|i| SourceFile::new(vec![wide_class(&format!("Class{}", i), 10)]).into())
        .collect();
    c.bench_function("batch_64_files", |b| {
        b.iter(|| translate_batch(black_box(&files), &config))
    });
}

criterion_group!(benches, bench_types, bench_classes);
criterion_main!(benches);
