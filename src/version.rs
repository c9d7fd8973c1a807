//! Version Module
//!
//! 보고 기간 기반의 출력 파일명과 버전 태그를 만드는 모듈.
//! 파일명 형식은 `LYLYL_<yyMMdd>_<yyMMdd>_vNN.xlsx`이며, 같은 기간의
//! 파일이 이미 있으면 버전 번호를 하나 올린다.
//!
//! 디렉터리를 읽을 수 없거나 기존 파일명이 형식에 맞지 않아도
//! 실패하지 않는다. 그런 경우는 그냥 `v01`부터 시작한다.

use std::path::Path;

use chrono::NaiveDate;
use regex::Regex;

/// 출력 파일명의 고정 접두사
pub const FILE_PREFIX: &str = "LYLYL";

/// 보고 기간으로 기본 파일명을 생성
///
/// ```
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 4, 14).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
/// assert_eq!(adsheet::version::base_name(start, end), "LYLYL_250414_250420");
/// ```
pub fn base_name(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{FILE_PREFIX}_{}_{}",
        start.format("%y%m%d"),
        end.format("%y%m%d")
    )
}

/// 디렉터리에서 다음 버전 태그를 결정
///
/// `<base>_vNN.xlsx` 형식의 기존 파일 중 가장 큰 NN에 1을 더한다.
/// 해당 파일이 없거나 디렉터리를 읽을 수 없으면 `v01`.
pub fn next_version(dir: &Path, base: &str) -> String {
    let mut max_seen: u32 = 0;

    // 파일명 검사는 기회주의적: 읽기 실패나 형식 불일치는 조용히 무시
    if let Ok(pattern) = Regex::new(&format!(r"^{}_v(\d+)\.xlsx$", regex::escape(base))) {
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let file_name = entry.file_name();
                let Some(name) = file_name.to_str() else {
                    continue;
                };
                if let Some(captures) = pattern.captures(name) {
                    if let Ok(n) = captures[1].parse::<u32>() {
                        max_seen = max_seen.max(n);
                    }
                }
            }
        }
    }

    format!("v{:02}", max_seen + 1)
}

/// 디렉터리와 보고 기간으로 완전한 출력 파일명을 생성
pub fn output_filename(dir: &Path, start: NaiveDate, end: NaiveDate) -> String {
    let base = base_name(start, end);
    let version = next_version(dir, &base);
    format!("{base}_{version}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_base_name_uses_two_digit_year() {
        assert_eq!(
            base_name(date(2025, 4, 14), date(2025, 4, 20)),
            "LYLYL_250414_250420"
        );
        assert_eq!(
            base_name(date(2026, 1, 5), date(2026, 1, 11)),
            "LYLYL_260105_260111"
        );
    }

    #[test]
    fn test_next_version_on_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(next_version(dir.path(), "LYLYL_250414_250420"), "v01");
    }

    #[test]
    fn test_next_version_on_missing_dir() {
        assert_eq!(
            next_version(Path::new("/이런/경로/없음"), "LYLYL_250414_250420"),
            "v01"
        );
    }

    #[test]
    fn test_next_version_increments_past_max() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["LYLYL_250414_250420_v01.xlsx", "LYLYL_250414_250420_v03.xlsx"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        // 빠진 v02를 메우지 않고 최대값 다음으로 간다
        assert_eq!(next_version(dir.path(), "LYLYL_250414_250420"), "v04");
    }

    #[test]
    fn test_next_version_skips_other_periods_and_malformed_names() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "LYLYL_250301_250307_v09.xlsx", // 다른 기간
            "LYLYL_250414_250420_vXX.xlsx", // 형식 불일치
            "LYLYL_250414_250420_v02.txt",  // 확장자 불일치
            "메모.md",
        ] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        assert_eq!(next_version(dir.path(), "LYLYL_250414_250420"), "v01");
    }

    #[test]
    fn test_output_filename() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("LYLYL_250414_250420_v01.xlsx"), b"x").unwrap();

        assert_eq!(
            output_filename(dir.path(), date(2025, 4, 14), date(2025, 4, 20)),
            "LYLYL_250414_250420_v02.xlsx"
        );
    }

    #[test]
    fn test_version_past_ninety_nine_keeps_counting() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("LYLYL_250414_250420_v99.xlsx"), b"x").unwrap();
        assert_eq!(next_version(dir.path(), "LYLYL_250414_250420"), "v100");
    }
}
