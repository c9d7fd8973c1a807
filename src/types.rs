//! Types Module
//!
//! 크레이트 전체에서 사용하는 공통 데이터 타입을 정의하는 모듈.

use chrono::NaiveDate;
use serde::Serialize;

/// 셀 값을 나타내는 열거형
///
/// 파이프라인은 원본 셀을 타입 그대로 들고 다니며, 숫자 해석은
/// 각 단계에서 best-effort로 시도한다. 해석에 실패한 셀은 서식 없이
/// 출력으로 통과한다.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 수치 (f64)
    Number(f64),

    /// 문자열
    Text(String),

    /// 날짜 (엑셀 날짜 셀에서 변환)
    Date(NaiveDate),

    /// 빈 셀
    Empty,
}

impl CellValue {
    /// 값이 비어 있는지 판정
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 수치로 해석을 시도
    ///
    /// `Number`는 그대로, `Text`는 f64 파싱을 시도한다.
    /// 날짜/빈 셀은 수치로 해석하지 않는다.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// 날짜로 해석을 시도
    ///
    /// `Date`는 그대로, `Text`는 `YYYY-MM-DD` (시각 포함 형식 포함)
    /// 파싱을 시도한다.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::Text(s) => {
                let s = s.trim();
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .or_else(|| {
                        chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                            .ok()
                            .map(|dt| dt.date())
                    })
            }
            _ => None,
        }
    }

    /// 표시용 문자열 (서식 적용 전)
    pub fn as_raw_string(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

/// 광고 게재 상태
///
/// 원본의 `ACTIVE`/`INACTIVE` 값을 대소문자 구분 없이 `ON`/`OFF`로
/// 정규화한다. 그 외의 값은 `Unknown`이 되어 상태 색상을 칠하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    /// 게재 중 (`ACTIVE`)
    On,
    /// 게재 중지 (`INACTIVE`)
    Off,
    /// 알 수 없는 값
    Unknown,
}

impl Status {
    /// 원본 셀 값에서 상태를 해석
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "ACTIVE" => Status::On,
            "INACTIVE" => Status::Off,
            _ => Status::Unknown,
        }
    }

    /// 출력 셀에 쓰는 라벨
    pub fn label(&self) -> &'static str {
        match self {
            Status::On => "ON",
            Status::Off => "OFF",
            Status::Unknown => "",
        }
    }
}

/// 셀 단위 변환 경고
///
/// 서식/색상 적용 시 수치로 해석되지 않은 셀을 기록한다.
/// 이런 셀은 조용히 건너뛰지 않고 호출자에게 목록으로 돌려준다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 원본 시트의 행 번호 (헤더가 1행, 데이터는 2행부터)
    pub row: usize,
    /// 표시 컬럼 라벨
    pub column: String,
    /// 경고 내용
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}행 {} 컬럼: {}", self.row, self.column, self.message)
    }
}

/// 컬럼 매핑 직후의 한 행
///
/// 파생 지표 계산 전의 불변 입력. `spend`는 필터/정렬에 필수이므로
/// 수치로 확정하며, 해석 불가 시 0으로 취급되어 필터에서 제거된다.
#[derive(Debug, Clone)]
pub(crate) struct ReportRow {
    pub status: Status,
    pub report_start: CellValue,
    pub report_end: CellValue,
    pub title: String,
    pub spend: f64,
    pub revenue: CellValue,
    pub roas: CellValue,
    pub cpc: CellValue,
    pub cvr: CellValue,
    pub ctr: CellValue,
    pub clicks: CellValue,
    pub purchases: CellValue,
    pub video_plays: CellValue,
    pub video_plays_3s: CellValue,
    pub video_plays_100: CellValue,
}

/// 파생 지표가 계산된 행
///
/// CVR/CTR은 이 단계에서 단 한 번 스케일 보정이 적용된다.
/// 후크/지속은 분모가 0이거나 수치가 아니면 `None`(결측)이 되고,
/// 결측은 색상 단계에서 최악 밴드(빨강)로 칠해진다.
#[derive(Debug, Clone)]
pub(crate) struct EnrichedRow {
    pub status: Status,
    pub report_start: CellValue,
    pub report_end: CellValue,
    pub title: String,
    pub spend: f64,
    pub revenue: CellValue,
    pub roas: CellValue,
    /// 보정 완료된 CVR (해석 불가 시 원본 그대로)
    pub cvr: CellValue,
    /// 보정 완료된 CTR (해석 불가 시 원본 그대로)
    pub ctr: CellValue,
    pub cpc: CellValue,
    /// 후크율 = 3초 이상 재생 / 재생
    pub hook_rate: Option<f64>,
    /// 지속율 = 100% 재생 / 3초 이상 재생
    pub retention_rate: Option<f64>,
    pub clicks: CellValue,
    pub purchases: CellValue,
    /// 평균객단가 = round(매출 / 구매), 구매 0이면 0
    pub avg_order_value: f64,
}
