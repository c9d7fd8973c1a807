//! Pipeline Module
//!
//! 행 필터 → 파생 지표 계산 → 정렬의 3단계를 제공하는 모듈.
//! 각 단계는 이전 단계의 출력에 대한 순수 함수이며, 셀을 제자리에서
//! 고쳐 쓰지 않고 단계별로 새 값을 만들어낸다.
//!
//! # 스케일 보정 정책
//!
//! CVR/CTR의 스케일 보정은 **이 모듈에서 단 한 번만** 적용된다.
//! 서식 단계는 표시 형식만 담당하고 값을 다시 고치지 않으므로,
//! 보정을 두 번 적용하는 사고가 구조적으로 불가능하다.
//!
//! - CVR: 원본 값이 100 이상이면 ×0.01 (퍼센트 표기 혼재 대응 휴리스틱)
//! - CTR: 무조건 ×0.01 (원본은 항상 퍼센트 스케일)

use crate::types::{CellValue, EnrichedRow, ReportRow};

/// 소수점 4자리 반올림
pub(crate) fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// 광고비가 0 이하인 행을 제거
///
/// 행에는 진단용 원본 시트 행 번호가 붙어 다닌다.
/// 수치로 해석되지 않은 광고비는 0으로 취급되어 함께 제거된다.
pub(crate) fn filter_rows(rows: Vec<(usize, ReportRow)>) -> Vec<(usize, ReportRow)> {
    rows.into_iter().filter(|(_, row)| row.spend > 0.0).collect()
}

/// 한 행의 파생 지표를 계산
///
/// - 평균객단가: `round(매출 / 구매)`, 구매가 0 이하이거나 수치가 아니면 0.
///   반올림은 f64::round (절반은 0에서 먼 쪽으로).
/// - 후크: `round4(3초 이상 재생 / 재생)`, 분모 0 또는 비수치면 결측.
/// - 지속: `round4(100% 재생 / 3초 이상 재생)`, 동일한 결측 규칙.
/// - CVR/CTR: 위의 스케일 보정을 적용하고 round4. 비수치는 원본 그대로
///   통과하여 서식 단계에서 진단으로 기록된다.
/// - 클릭/구매: 정수로 반올림 (소수가 섞여 들어와도 표시 서식에만 맡기지
///   않고 값 자체를 고친다).
pub(crate) fn enrich(row: ReportRow) -> EnrichedRow {
    let revenue = row.revenue.as_number();
    let purchases = row.purchases.as_number();

    let avg_order_value = match (revenue, purchases) {
        (Some(rev), Some(p)) if p > 0.0 => (rev / p).round(),
        _ => 0.0,
    };

    let hook_rate = ratio(&row.video_plays_3s, &row.video_plays);
    let retention_rate = ratio(&row.video_plays_100, &row.video_plays_3s);

    let cvr = match row.cvr.as_number() {
        Some(v) => {
            let corrected = if v >= 100.0 { v * 0.01 } else { v };
            CellValue::Number(round4(corrected))
        }
        None => row.cvr,
    };

    let ctr = match row.ctr.as_number() {
        Some(v) => CellValue::Number(round4(v * 0.01)),
        None => row.ctr,
    };

    EnrichedRow {
        status: row.status,
        report_start: row.report_start,
        report_end: row.report_end,
        title: row.title,
        spend: row.spend,
        revenue: row.revenue,
        roas: row.roas,
        cvr,
        ctr,
        cpc: row.cpc,
        hook_rate,
        retention_rate,
        clicks: round_count(row.clicks),
        purchases: round_count(row.purchases),
        avg_order_value,
    }
}

/// 건수 셀을 정수로 반올림 (비수치는 그대로)
fn round_count(cell: CellValue) -> CellValue {
    match cell.as_number() {
        Some(v) => CellValue::Number(v.round()),
        None => cell,
    }
}

/// 분자/분모 셀에서 비율을 계산 (round4 적용)
///
/// 분모가 0이거나 어느 쪽이든 수치가 아니면 `None`(결측).
/// 0으로 나누기는 절대 발생하지 않는다.
fn ratio(numerator: &CellValue, denominator: &CellValue) -> Option<f64> {
    match (numerator.as_number(), denominator.as_number()) {
        (Some(n), Some(d)) if d > 0.0 => Some(round4(n / d)),
        _ => None,
    }
}

/// 광고비 내림차순의 안정 정렬
///
/// 동률 행은 원본 순서를 유지한다 (`sort_by`는 안정 정렬).
pub(crate) fn sort_by_spend(rows: &mut [(usize, EnrichedRow)]) {
    rows.sort_by(|(_, a), (_, b)| b.spend.total_cmp(&a.spend));
}
