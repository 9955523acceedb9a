use std::collections::BTreeMap;
use std::path::Path;

use proptest::prelude::*;
use zodgen::paths::normalize;
use zodgen::{OutputFile, PathResolver, Settings, Source};

const FILES: [&str; 4] = ["a/f0.ts", "a/f1.ts", "b/f2.ts", "a/nested/f3.ts"];

/// One record per entry: (record id, file index, ids of earlier records it uses).
type Batch = Vec<(usize, usize, Vec<usize>)>;

fn batch() -> impl Strategy<Value = Batch> {
    (1usize..9)
        .prop_flat_map(|n| {
            (0..n)
                .map(|i| {
                    let earlier: Vec<usize> = (0..i).collect();
                    (Just(i), 0..FILES.len(), proptest::sample::subsequence(earlier, 0..=i.min(3)))
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn sources_for(batch: &Batch) -> Vec<Source> {
    let mut by_file: BTreeMap<usize, String> = BTreeMap::new();
    for (i, file, deps) in batch {
        let text = by_file.entry(*file).or_default();
        text.push_str(&format!("export interface M{i} {{\n\tid: number;\n"));
        for j in deps {
            let array = if j % 2 == 0 { "[]" } else { "" };
            text.push_str(&format!("\tr{j}?: M{j}{array};\n"));
        }
        text.push_str("}\n\n");
    }
    by_file
        .into_iter()
        .map(|(file, text)| Source::new(FILES[file], text))
        .collect()
}

fn run(batch: &Batch, settings: &Settings) -> Vec<OutputFile> {
    let parsed = zodgen::parse(&sources_for(batch)).unwrap();
    zodgen::convert_with(&parsed, settings).unwrap()
}

fn parent(path: &str) -> String {
    Path::new(path).parent().unwrap().to_string_lossy().into_owned()
}

proptest! {
    #[test]
    fn records_follow_their_dependencies(batch in batch()) {
        let files = run(&batch, &Settings::default());

        let mut location: BTreeMap<String, (&str, usize)> = BTreeMap::new();
        for file in &files {
            for (pos, model) in file.models.iter().enumerate() {
                location.insert(model.name.clone(), (file.path.as_str(), pos));
            }
        }
        prop_assert_eq!(location.len(), batch.len());

        for (i, _, deps) in &batch {
            let (path, pos) = location[&format!("M{i}Scheme")];
            let owner = files.iter().find(|f| f.path == path).unwrap();
            for j in deps {
                let dep_name = format!("M{j}Scheme");
                let (dep_path, dep_pos) = location[&dep_name];
                if dep_path == path {
                    prop_assert!(dep_pos < pos, "{} must precede M{}", dep_name, i);
                } else {
                    let imported = owner.imports.iter().any(|imp| {
                        imp.symbols[0] == dep_name && format!("{}.ts", imp.from) == dep_path
                    });
                    prop_assert!(imported, "{} missing import of {}", path, dep_name);
                }
            }
        }
    }

    #[test]
    fn imports_are_unique_and_never_self(batch in batch()) {
        for file in run(&batch, &Settings::default()) {
            let mut seen = std::collections::BTreeSet::new();
            for imp in &file.imports {
                prop_assert!(seen.insert(imp.symbols[0].clone()), "duplicate {}", imp.symbols[0]);
                prop_assert_ne!(format!("{}.ts", imp.from), file.path.clone());
            }
        }
    }

    #[test]
    fn output_paths_mirror_inputs(batch in batch()) {
        for file in run(&batch, &Settings::default()) {
            let source = &file.models[0].source_path;
            let stem = Path::new(source).file_stem().unwrap().to_string_lossy().into_owned();
            prop_assert_eq!(&file.path, &format!("{}/schemes/{stem}.scheme.ts", parent(source)));
            for imp in file.imports.iter().filter(|imp| imp.resolve_relative) {
                prop_assert!(imp.from.contains("/schemes/f"));
                prop_assert!(imp.from.ends_with(".scheme"));
            }
        }
    }

    #[test]
    fn relative_imports_resolve_to_target(batch in batch(), strip in any::<bool>()) {
        let settings = Settings { strip_leading_dot: strip, ..Settings::default() };
        let resolver = PathResolver::new(&settings);
        let files = run(&batch, &settings);
        for file in &files {
            for imp in file.imports.iter().filter(|imp| imp.resolve_relative) {
                let rel = resolver.import_path(&file.path, &imp.from).unwrap();
                prop_assert!(rel.starts_with("./") || rel.starts_with("../"));
                let joined = format!("{}.ts", normalize(&format!("{}/{rel}", parent(&file.path))));
                prop_assert!(files.iter().any(|f| f.path == joined), "{} does not resolve", joined);
            }
        }
    }

    #[test]
    fn field_order_only_permutes_lines(
        (fields, shuffled) in proptest::collection::vec(
            (proptest::sample::subsequence(vec!["number", "string", "boolean", "null", "DateTime"], 1..=3),
             any::<bool>(),
             any::<bool>()),
            1..6,
        )
        .prop_map(|specs| specs.into_iter().enumerate().collect::<Vec<_>>())
        .prop_flat_map(|fields| (Just(fields.clone()), Just(fields).prop_shuffle()))
    ) {
        let render_fields = |fields: &[(usize, (Vec<&str>, bool, bool))]| {
            let mut text = String::from("interface P {\n");
            for (n, (types, nullable, array)) in fields {
                let q = if *nullable { "?" } else { "" };
                let arr = if *array { "[]" } else { "" };
                text.push_str(&format!("\tf{n}{q}: {}{arr};\n", types.join(" | ")));
            }
            text.push('}');
            let parsed = zodgen::parse(&[Source::new("p.ts", text)]).unwrap();
            let files = zodgen::convert(&parsed).unwrap();
            files[0].models[0].raw.clone()
        };

        let original = render_fields(&fields[..]);
        let permuted = render_fields(&shuffled[..]);
        let mut a: Vec<&str> = original.lines().collect();
        let mut b: Vec<&str> = permuted.lines().collect();
        prop_assert_eq!(a.first(), b.first());
        prop_assert_eq!(a.last(), b.last());
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }
}
