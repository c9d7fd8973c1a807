//! Limits Module
//!
//! 입력 파일 처리 시의 크기 제한을 정의하는 모듈.
//! 업로드 경로로 임의 파일이 들어올 수 있으므로, 워크북을 열기 전에
//! 입력 크기 상한을 적용한다.

/// 입력 처리 제한 설정
#[derive(Debug, Clone)]
pub(crate) struct Limits {
    /// 입력 파일의 최대 크기 (바이트)
    /// 기본값: 100MB (104_857_600 bytes)
    pub max_input_file_size: u64,

    /// 처리할 최대 데이터 행 수
    /// 기본값: 100_000
    pub max_rows: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_file_size: 104_857_600, // 100MB
            max_rows: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_input_file_size, 104_857_600);
        assert_eq!(limits.max_rows, 100_000);
    }
}
