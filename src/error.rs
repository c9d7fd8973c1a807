//! Error Types Module
//!
//! 크레이트 전체에서 사용하는 구조화 에러 타입을 정의하는 모듈.
//! `thiserror`를 사용하여 에러의 자동 변환과 메시지 포맷을 구현한다.

use thiserror::Error;

/// adsheet 크레이트 전체에서 사용하는 에러 타입
///
/// # 에러의 종류
///
/// - `Io`: 파일 읽기/쓰기 실패. 해당 변환 호출 전체가 실패한다.
/// - `Parse`: calamine이 입력 워크북을 열거나 읽지 못한 경우.
/// - `Write`: rust_xlsxwriter가 출력 워크북 직렬화에 실패한 경우.
/// - `Schema`: 필수 원본 컬럼 누락. 누락된 컬럼 **전체**와 실제로 존재하는
///   컬럼 목록을 함께 보고한다(첫 번째 누락만 보고하지 않는다).
/// - `Config`: 빌더 설정 검증 실패.
/// - `Limit`: 입력 파일 크기 상한 초과.
///
/// 셀 단위 파싱 실패는 에러가 아니다. 해당 셀은 서식 없이 그대로
/// 통과시키고 [`crate::Diagnostic`]으로 수집한다.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// I/O 오류
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 입력 엑셀 파일 해석 오류 (calamine 유래)
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// 출력 엑셀 파일 직렬화 오류 (rust_xlsxwriter 유래)
    #[error("Failed to write Excel file: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// 필수 원본 컬럼 누락
    ///
    /// `missing`은 매핑 선언 순서대로의 누락 컬럼명 전체,
    /// `present`는 입력 1행째에 실제로 존재한 컬럼명 전체이다.
    #[error("Missing required columns: {}; columns present: {}", .missing.join(", "), .present.join(", "))]
    Schema {
        /// 누락된 원본 컬럼명 (전체)
        missing: Vec<String>,
        /// 입력에 실제로 존재한 컬럼명
        present: Vec<String>,
    },

    /// 설정 검증 실패
    #[error("Configuration error: {0}")]
    Config(String),

    /// 입력 크기 제한 초과
    #[error("Input limit exceeded: {0}")]
    Limit(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: ConvertError = io_err.into();

        match error {
            ConvertError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_display() {
        let error: ConvertError =
            io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied").into();
        let msg = error.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("Permission denied"));
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = calamine::Error::Msg("Invalid file format");
        let error: ConvertError = parse_err.into();

        match error {
            ConvertError::Parse(calamine::Error::Msg(msg)) => {
                assert_eq!(msg, "Invalid file format");
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_schema_error_lists_all_missing() {
        let error = ConvertError::Schema {
            missing: vec!["광고 이름".to_string(), "지출 금액 (KRW)".to_string()],
            present: vec!["제목".to_string()],
        };

        let msg = error.to_string();
        assert!(msg.contains("광고 이름"));
        assert!(msg.contains("지출 금액 (KRW)"));
        assert!(msg.contains("제목"));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConvertError::Config("Invalid date format: 'xyz'".to_string());
        let msg = error.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("Invalid date format: 'xyz'"));
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), ConvertError> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(ConvertError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_all_error_prefixes() {
        let io_err: ConvertError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        let parse_err: ConvertError = calamine::Error::Msg("test parse").into();
        assert!(parse_err
            .to_string()
            .starts_with("Failed to parse Excel file"));

        let limit_err = ConvertError::Limit("too big".to_string());
        assert!(limit_err.to_string().starts_with("Input limit exceeded"));
    }
}
