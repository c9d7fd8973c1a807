//! 커맨드라인 변환기
//!
//! ```text
//! adsheet <입력.xlsx> [출력.xlsx]   단일 파일 변환
//! adsheet all                        현재 디렉토리의 모든 리포트 일괄 변환
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use rayon::prelude::*;
use regex::Regex;

use adsheet::{version, ConversionReport, Converter, ConverterBuilder, ConvertError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let converter = match ConverterBuilder::new().build() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("오류: {e}");
            process::exit(1);
        }
    };

    match args.get(1).map(String::as_str) {
        None => {
            eprintln!("사용법: {} <입력.xlsx> [출력.xlsx]", args[0]);
            eprintln!("        {} all", args[0]);
            process::exit(1);
        }
        Some("all") => convert_all(&converter),
        Some(input) => {
            let output = args.get(2).map(PathBuf::from);
            match convert_one(&converter, Path::new(input), output) {
                Ok((report, output_path)) => print_summary(&report, &output_path),
                Err(e) => {
                    eprintln!("오류: {input}: {e}");
                    process::exit(1);
                }
            }
        }
    }
}

/// 파일 하나를 변환하고 실제로 쓴 출력 경로를 반환
fn convert_one(
    converter: &Converter,
    input: &Path,
    output: Option<PathBuf>,
) -> Result<(ConversionReport, PathBuf), ConvertError> {
    let file = File::open(input)?;
    let (report, bytes) = converter.convert_to_buffer(file)?;

    let output_path = match output {
        Some(path) => path,
        None => default_output_path(input, &report),
    };
    std::fs::write(&output_path, bytes)?;

    Ok((report, output_path))
}

/// 출력 경로 결정: 보고 기간이 있으면 버전 파일명, 없으면 `<이름>_변환.xlsx`
fn default_output_path(input: &Path, report: &ConversionReport) -> PathBuf {
    let dir = input.parent().unwrap_or(Path::new("."));

    match &report.base_name {
        Some(base) => {
            let tag = version::next_version(dir, base);
            dir.join(format!("{base}_{tag}.xlsx"))
        }
        None => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "리포트".to_string());
            dir.join(format!("{stem}_변환.xlsx"))
        }
    }
}

/// 현재 디렉토리의 변환 대상 리포트를 병렬로 일괄 변환
fn convert_all(converter: &Converter) {
    let inputs = match collect_inputs(Path::new(".")) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("오류: 디렉토리를 읽을 수 없습니다: {e}");
            process::exit(1);
        }
    };

    if inputs.is_empty() {
        println!("변환할 파일이 없습니다.");
        return;
    }
    println!("{}개 파일 변환 시작", inputs.len());

    let results: Vec<(PathBuf, Result<(ConversionReport, PathBuf), ConvertError>)> = inputs
        .into_par_iter()
        .map(|input| {
            let result = convert_one(converter, &input, None);
            (input, result)
        })
        .collect();

    let mut failures = 0;
    for (input, result) in results {
        match result {
            Ok((report, output_path)) => {
                println!("✓ {} → {}", input.display(), output_path.display());
                print_summary(&report, &output_path);
            }
            Err(e) => {
                failures += 1;
                eprintln!("✗ {}: {e}", input.display());
            }
        }
    }

    if failures > 0 {
        process::exit(1);
    }
}

/// 디렉토리에서 변환 대상 엑셀 파일을 수집
///
/// 이미 변환된 출력(`LYLYL_..._vNN.xlsx`)과 엑셀 임시 파일(`~$...`)은
/// 건너뛴다.
fn collect_inputs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    // 정규식 리터럴은 고정이므로 실패하지 않는다
    let converted = Regex::new(r"^LYLYL_\d{6}_\d{6}_v\d+\.xlsx$")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let is_excel = name.ends_with(".xlsx") || name.ends_with(".xls");
        if is_excel && !name.starts_with("~$") && !converted.is_match(name) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

fn print_summary(report: &ConversionReport, output_path: &Path) {
    println!(
        "  {}행 중 {}행 변환 → {}",
        report.rows_total,
        report.rows_kept,
        output_path.display()
    );
    for diag in &report.diagnostics {
        println!("  주의: {diag}");
    }
}
