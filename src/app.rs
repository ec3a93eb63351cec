use clap::Parser;
use docubleach::bleach::constants::FILESIZE_LIMIT;
use docubleach::{
    AdmissionPolicy, BleachEvent, collect_candidate_files, detect_macros, extract_hyperlinks,
    run_bleach_with_sender,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use crate::ui;

/// Elimina macros de documentos Office (OOXML y OLE).
#[derive(Debug, Parser)]
#[command(name = "docubleach", version)]
pub struct Cli {
    /// Archivos o directorios a procesar.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Informa de las macros detectadas y eliminadas en cada archivo.
    #[arg(short = 'c', long = "check")]
    pub check: bool,

    /// Solo detecta macros, sin modificar los archivos.
    #[arg(long, conflicts_with = "links")]
    pub detect: bool,

    /// Lista los hipervínculos externos de los paquetes OOXML.
    #[arg(long)]
    pub links: bool,

    /// Recorre los subdirectorios.
    #[arg(short, long)]
    pub recursive: bool,

    /// Emite los resultados como JSON.
    #[arg(long)]
    pub json: bool,

    /// Tamaño máximo por archivo, en bytes.
    #[arg(long, default_value_t = FILESIZE_LIMIT)]
    pub max_size: u64,

    /// Muestra el registro detallado del motor.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Serialize)]
struct FileReport<T: Serialize> {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> FileReport<T> {
    fn from_result(path: &Path, outcome: docubleach::Result<T>) -> Self {
        match outcome {
            Ok(result) => Self {
                path: path.to_path_buf(),
                result: Some(result),
                error: None,
            },
            Err(error) => Self {
                path: path.to_path_buf(),
                result: None,
                error: Some(error.to_string()),
            },
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let policy = AdmissionPolicy {
        max_file_size: cli.max_size,
    };
    let (files, mut failures) = expand_paths(&cli.paths, cli.recursive);

    if cli.check && !cli.json {
        ui::render_size_limit(policy.max_file_size);
    }

    failures += if cli.detect {
        run_detection(&cli, policy, &files)
    } else if cli.links {
        run_hyperlinks(&cli, policy, &files)
    } else {
        run_removal(&cli, policy, files)
    };

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn expand_paths(paths: &[PathBuf], recursive: bool) -> (Vec<PathBuf>, usize) {
    let mut files = Vec::new();
    let mut failures = 0;

    for path in paths {
        if path.is_dir() {
            match collect_candidate_files(path, recursive) {
                Ok(found) => files.extend(found),
                Err(error) => {
                    failures += 1;
                    ui::render_failure(path, &error.to_string());
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    (files, failures)
}

fn run_detection(cli: &Cli, policy: AdmissionPolicy, files: &[PathBuf]) -> usize {
    let reports: Vec<_> = files
        .iter()
        .map(|path| {
            let outcome = policy.validate(path).and_then(|_| detect_macros(path));
            FileReport::from_result(path, outcome)
        })
        .collect();

    if cli.json {
        print_json(&reports);
    } else {
        for report in &reports {
            match (&report.result, &report.error) {
                (Some(present), _) => ui::render_detection(&report.path, *present),
                (None, Some(error)) => ui::render_failure(&report.path, error),
                (None, None) => {}
            }
        }
    }

    reports.iter().filter(|report| report.error.is_some()).count()
}

fn run_hyperlinks(cli: &Cli, policy: AdmissionPolicy, files: &[PathBuf]) -> usize {
    let reports: Vec<_> = files
        .iter()
        .map(|path| {
            let outcome = policy.validate(path).and_then(|_| extract_hyperlinks(path));
            FileReport::from_result(path, outcome)
        })
        .collect();

    if cli.json {
        print_json(&reports);
    } else {
        for report in &reports {
            match (&report.result, &report.error) {
                (Some(links), _) => ui::render_hyperlinks(&report.path, links),
                (None, Some(error)) => ui::render_failure(&report.path, error),
                (None, None) => {}
            }
        }
    }

    reports.iter().filter(|report| report.error.is_some()).count()
}

fn run_removal(cli: &Cli, policy: AdmissionPolicy, files: Vec<PathBuf>) -> usize {
    let (sender, receiver) = mpsc::channel();
    let worker = thread::spawn(move || run_bleach_with_sender(files, policy, sender));

    let mut reports = Vec::new();
    for event in receiver.iter() {
        match event {
            BleachEvent::Success { result } => {
                if cli.check && !cli.json {
                    ui::render_removal(&result);
                }
                reports.push(FileReport {
                    path: result.path.clone(),
                    result: Some(result),
                    error: None,
                });
            }
            BleachEvent::Failure { path, error } => {
                if !cli.json {
                    ui::render_failure(&path, &error);
                }
                reports.push(FileReport {
                    path,
                    result: None,
                    error: Some(error),
                });
            }
            BleachEvent::Finished {
                successes,
                failures,
            } => {
                if cli.check && !cli.json {
                    ui::render_summary(successes, failures);
                }
            }
            BleachEvent::Started { .. } | BleachEvent::Processing { .. } => {}
        }
    }

    let summary = match worker.join() {
        Ok(summary) => summary,
        Err(_) => {
            ui::render_failure(Path::new("."), "el proceso de limpieza terminó inesperadamente");
            return 1;
        }
    };

    if cli.json {
        print_json(&reports);
    }

    summary.failures
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(error) => eprintln!("No se pudo serializar el resultado: {error}"),
    }
}
