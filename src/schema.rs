//! Schema Module
//!
//! 원본 리포트의 필수 컬럼 집합과 출력 컬럼 순서를 선언하는 모듈.
//! 입력 스키마는 광고 플랫폼 내보내기 형식에 고정되어 있다.

use crate::error::ConvertError;
use crate::types::{CellValue, ReportRow, Status};

/// 필수 원본 컬럼명 → 출력 라벨 매핑 (선언 순서 유의)
///
/// 입력 1행째(헤더)에 이 원본 컬럼명이 모두 존재해야 한다.
/// 하나라도 없으면 [`ConvertError::Schema`]로 누락 전체를 보고한다.
pub(crate) const SOURCE_COLUMNS: [(&str, &str); 15] = [
    ("광고 이름", "제목"),
    ("광고 게재", "상태"),
    ("지출 금액 (KRW)", "광고비"),
    ("구매", "구매"),
    ("구매 전환값", "매출"),
    ("구매 ROAS(광고 지출 대비 수익률)", "ROAS"),
    ("CPC(전체) (KRW)", "CPC"),
    ("전환율(CVR)", "CVR"),
    ("CTR(전체)", "CTR"),
    ("클릭(전체)", "클릭"),
    ("동영상 재생", "동영상 재생"),
    ("동영상 3초 이상 재생", "동영상 3초 이상 재생"),
    ("동영상 100% 재생", "동영상 100% 재생"),
    ("보고 시작", "보고 시작"),
    ("보고 종료", "보고 종료"),
];

/// 출력 표시 컬럼 (출력 순서대로)
///
/// 동영상 재생 계열 컬럼은 후크/지속 계산에만 쓰이고 출력에서는
/// 제외된다. 대신 파생 컬럼 세 개(후크, 지속, 평균객단가)가 추가된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColumn {
    /// 상태 (ON/OFF)
    Status,
    /// 보고 시작
    ReportStart,
    /// 보고 종료
    ReportEnd,
    /// 제목 (광고 이름)
    Title,
    /// 광고비
    Spend,
    /// 매출
    Revenue,
    /// ROAS
    Roas,
    /// CPC
    Cpc,
    /// CVR
    Cvr,
    /// CTR
    Ctr,
    /// 후크 (파생)
    HookRate,
    /// 지속 (파생)
    RetentionRate,
    /// 클릭
    Clicks,
    /// 구매
    Purchases,
    /// 평균객단가 (파생)
    AvgOrderValue,
}

impl DisplayColumn {
    /// 출력 순서대로의 전체 컬럼
    pub const ALL: [DisplayColumn; 15] = [
        DisplayColumn::Status,
        DisplayColumn::ReportStart,
        DisplayColumn::ReportEnd,
        DisplayColumn::Title,
        DisplayColumn::Spend,
        DisplayColumn::Revenue,
        DisplayColumn::Roas,
        DisplayColumn::Cpc,
        DisplayColumn::Cvr,
        DisplayColumn::Ctr,
        DisplayColumn::HookRate,
        DisplayColumn::RetentionRate,
        DisplayColumn::Clicks,
        DisplayColumn::Purchases,
        DisplayColumn::AvgOrderValue,
    ];

    /// 출력 헤더 라벨
    pub fn label(&self) -> &'static str {
        match self {
            DisplayColumn::Status => "상태",
            DisplayColumn::ReportStart => "보고 시작",
            DisplayColumn::ReportEnd => "보고 종료",
            DisplayColumn::Title => "제목",
            DisplayColumn::Spend => "광고비",
            DisplayColumn::Revenue => "매출",
            DisplayColumn::Roas => "ROAS",
            DisplayColumn::Cpc => "CPC",
            DisplayColumn::Cvr => "CVR",
            DisplayColumn::Ctr => "CTR",
            DisplayColumn::HookRate => "후크",
            DisplayColumn::RetentionRate => "지속",
            DisplayColumn::Clicks => "클릭",
            DisplayColumn::Purchases => "구매",
            DisplayColumn::AvgOrderValue => "평균객단가",
        }
    }

    /// 출력 열 너비 (문자 단위)
    pub(crate) fn width(&self) -> f64 {
        match self {
            DisplayColumn::Status => 7.0,
            DisplayColumn::ReportStart | DisplayColumn::ReportEnd => 10.0,
            DisplayColumn::Title => 25.0,
            DisplayColumn::Spend | DisplayColumn::Revenue => 12.0,
            DisplayColumn::AvgOrderValue => 9.0,
            _ => 7.0,
        }
    }

    /// 상태 색상이 적용되는 선두 6컬럼 (상태~매출)
    pub(crate) fn takes_status_fill(&self) -> bool {
        matches!(
            self,
            DisplayColumn::Status
                | DisplayColumn::ReportStart
                | DisplayColumn::ReportEnd
                | DisplayColumn::Title
                | DisplayColumn::Spend
                | DisplayColumn::Revenue
        )
    }
}

/// 헤더에서 확정된 원본 컬럼 위치
///
/// [`ColumnMap::resolve`]로 생성되며, 이후 각 데이터 행을
/// [`ReportRow`]로 사영한다.
#[derive(Debug, Clone)]
pub(crate) struct ColumnMap {
    title: usize,
    delivery: usize,
    spend: usize,
    purchases: usize,
    revenue: usize,
    roas: usize,
    cpc: usize,
    cvr: usize,
    ctr: usize,
    clicks: usize,
    video_plays: usize,
    video_plays_3s: usize,
    video_plays_100: usize,
    report_start: usize,
    report_end: usize,
}

impl ColumnMap {
    /// 헤더 행에서 필수 컬럼 위치를 확정
    ///
    /// 누락 컬럼이 있으면 매핑 선언 순서대로 **전부** 모아서
    /// [`ConvertError::Schema`]로 반환한다.
    pub fn resolve(headers: &[String]) -> Result<Self, ConvertError> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = SOURCE_COLUMNS
            .iter()
            .filter(|(source, _)| position(source).is_none())
            .map(|(source, _)| source.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ConvertError::Schema {
                missing,
                present: headers.to_vec(),
            });
        }

        // 이 시점에서 position은 전 컬럼에 대해 Some이 보장된다
        let index = |name: &str| position(name).unwrap_or_default();

        Ok(Self {
            title: index("광고 이름"),
            delivery: index("광고 게재"),
            spend: index("지출 금액 (KRW)"),
            purchases: index("구매"),
            revenue: index("구매 전환값"),
            roas: index("구매 ROAS(광고 지출 대비 수익률)"),
            cpc: index("CPC(전체) (KRW)"),
            cvr: index("전환율(CVR)"),
            ctr: index("CTR(전체)"),
            clicks: index("클릭(전체)"),
            video_plays: index("동영상 재생"),
            video_plays_3s: index("동영상 3초 이상 재생"),
            video_plays_100: index("동영상 100% 재생"),
            report_start: index("보고 시작"),
            report_end: index("보고 종료"),
        })
    }

    /// 원본 한 행을 매핑된 [`ReportRow`]로 사영
    pub fn project(&self, record: &[CellValue]) -> ReportRow {
        let cell = |idx: usize| record.get(idx).cloned().unwrap_or(CellValue::Empty);

        let status = match cell(self.delivery) {
            CellValue::Text(s) => Status::parse(&s),
            _ => Status::Unknown,
        };

        ReportRow {
            status,
            report_start: cell(self.report_start),
            report_end: cell(self.report_end),
            title: cell(self.title).as_raw_string(),
            spend: cell(self.spend).as_number().unwrap_or(0.0),
            revenue: cell(self.revenue),
            roas: cell(self.roas),
            cpc: cell(self.cpc),
            cvr: cell(self.cvr),
            ctr: cell(self.ctr),
            clicks: cell(self.clicks),
            purchases: cell(self.purchases),
            video_plays: cell(self.video_plays),
            video_plays_3s: cell(self.video_plays_3s),
            video_plays_100: cell(self.video_plays_100),
        }
    }
}
