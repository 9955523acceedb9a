//! Fixture runner: every directory under `fixtures/` is one case.
//!
//! A case holds `.ts` inputs (at any depth) and either the expected generated
//! files at their output paths, or a `case.json` with an `expectError` regex
//! the failure message must match.
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;
use zodgen::Settings;
use zodgen::discover::{self, FilePredicate};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// run the fixture cases and compare generated schemes with the checked-in ones
#[derive(Parser, Debug)]
#[command(name = "dev-test-runner")]
struct RunnerArgs {
    /// print a JSON report on stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// fixtures directory (default: the workspace `fixtures/`)
    fixtures: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct CaseFile {
    settings: Settings,
    expect_error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CaseReport {
    name: String,
    passed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    problems: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

fn load_case_file(dir: &Path) -> Result<CaseFile, String> {
    let path = dir.join("case.json");
    if !path.is_file() {
        return Ok(CaseFile::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let de = &mut serde_json::Deserializer::from_str(&text);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let at = err.path().to_string();
        format!("{}: at JSON path {at} → {}", path.display(), err.into_inner())
    })
}

fn run_case(dir: &Path) -> Vec<String> {
    let case = match load_case_file(dir) {
        Ok(case) => case,
        Err(problem) => return vec![problem],
    };

    let outcome = FilePredicate::new(Vec::<String>::new(), &case.settings)
        .and_then(|predicate| discover::find_sources(dir, true, &predicate))
        .and_then(zodgen::read_sources)
        .and_then(|sources| zodgen::generate(&sources, &case.settings));

    match (outcome, case.expect_error) {
        (Err(error), Some(pattern)) => match Regex::new(&pattern) {
            Ok(re) if re.is_match(&error.to_string()) => Vec::new(),
            Ok(_) => vec![format!("error `{error}` does not match /{pattern}/")],
            Err(bad) => vec![format!("invalid expectError: {bad}")],
        },
        (Err(error), None) => vec![format!("unexpected {} error: {error}", error.kind())],
        (Ok(_), Some(pattern)) => vec![format!("expected an error matching /{pattern}/")],
        (Ok(rendered), None) => compare(dir, &rendered, &case.settings),
    }
}

/// Generated files whose stem carries the scheme infix, anywhere in `dir`.
fn expected_outputs(dir: &Path, settings: &Settings) -> BTreeSet<PathBuf> {
    let marker = format!(".{}", settings.scheme_infix);
    WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .file_stem()
                .is_some_and(|stem| stem.to_string_lossy().ends_with(&marker))
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn compare(dir: &Path, rendered: &[(String, String)], settings: &Settings) -> Vec<String> {
    let mut problems = Vec::new();
    if rendered.is_empty() {
        problems.push("nothing was generated".to_string());
    }
    let produced: BTreeSet<PathBuf> = rendered.iter().map(|(path, _)| PathBuf::from(path)).collect();
    for missing in expected_outputs(dir, settings).difference(&produced) {
        problems.push(format!("{}: expected but not generated", missing.display()));
    }
    for (path, text) in rendered {
        match std::fs::read_to_string(path) {
            Ok(expected) if expected == *text => {}
            Ok(expected) => problems.push(format!(
                "{path}: output differs\n--- expected\n{expected}--- actual\n{text}"
            )),
            Err(_) => problems.push(format!("{path}: no expected file")),
        }
    }
    problems
}

fn case_dirs(root: &Path) -> walkdir::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

fn main() -> ExitCode {
    let args = RunnerArgs::parse();
    let json = args.json;
    let root = args
        .fixtures
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures"));

    let root = root.canonicalize().unwrap_or(root);
    let dirs = match case_dirs(&root) {
        Ok(dirs) => dirs,
        Err(error) => {
            eprintln!("❌ cannot read {}: {error}", root.display());
            return ExitCode::FAILURE;
        }
    };

    let reports = dirs
        .iter()
        .map(|dir| {
            let problems = run_case(dir);
            CaseReport {
                name: dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
                passed: problems.is_empty(),
                problems,
            }
        })
        .collect::<Vec<_>>();

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(text) => println!("{text}"),
            Err(error) => eprintln!("❌ failed to serialize report: {error}"),
        }
    } else {
        for report in &reports {
            if report.passed {
                eprintln!("✅ {}", report.name);
            } else {
                eprintln!("❌ {}", report.name);
                for problem in &report.problems {
                    eprintln!("   {problem}");
                }
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.passed).count();
    eprintln!("—— {} passed, {failed} failed ——", reports.len() - failed);
    if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
