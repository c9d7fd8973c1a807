//! Format Module
//!
//! 파생 지표까지 계산된 행을 표시용 셀 그리드로 변환하는 모듈.
//! 각 셀은 표시 값·숫자 서식·배경색을 모두 가진 채로 만들어지므로
//! 이후 기록 단계는 셀당 한 번의 쓰기만 수행한다.
//!
//! 수치가 기대되는 자리에서 해석 불가능한 텍스트를 만나면 변환을
//! 중단하지 않고 원문을 그대로 내보내며 [`Diagnostic`]으로 기록한다.

use rust_xlsxwriter::Color;

use crate::color::{self, ColorBand};
use crate::schema::DisplayColumn;
use crate::types::{CellValue, Diagnostic, EnrichedRow};

/// 표시 값
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DisplayValue {
    Number(f64),
    Text(String),
    Blank,
}

/// 서식과 배경색이 결정된 출력 셀
#[derive(Debug, Clone)]
pub(crate) struct FormattedCell {
    pub(crate) value: DisplayValue,
    pub(crate) num_format: Option<String>,
    pub(crate) fill: Option<Color>,
}

impl FormattedCell {
    fn blank() -> Self {
        FormattedCell {
            value: DisplayValue::Blank,
            num_format: None,
            fill: None,
        }
    }

    fn text(value: String, fill: Option<Color>) -> Self {
        FormattedCell {
            value: DisplayValue::Text(value),
            num_format: None,
            fill,
        }
    }

    fn number(value: f64, num_format: String, fill: Option<Color>) -> Self {
        FormattedCell {
            value: DisplayValue::Number(value),
            num_format: Some(num_format),
            fill,
        }
    }
}

/// 출력 한 행: [`DisplayColumn::ALL`] 순서의 15개 셀
#[derive(Debug, Clone)]
pub(crate) struct FormattedRow {
    pub(crate) cells: Vec<FormattedCell>,
}

/// 행 단위 서식기
///
/// 날짜 표시 형식과 통화 접미사는 빌더에서 주입된다.
#[derive(Debug)]
pub(crate) struct RowFormatter {
    date_format: String,
    currency_format: String,
}

impl RowFormatter {
    pub(crate) fn new(date_format: &str, currency_suffix: &str) -> Self {
        RowFormatter {
            date_format: date_format.to_string(),
            currency_format: format!("#,##0{currency_suffix}"),
        }
    }

    /// 한 행을 표시용 셀로 변환
    ///
    /// `source_row`는 진단 메시지에 남길 원본 시트의 1기준 행 번호.
    pub(crate) fn format_row(
        &self,
        row: &EnrichedRow,
        source_row: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> FormattedRow {
        let status_fill = color::status_fill(row.status);

        let cells = DisplayColumn::ALL
            .iter()
            .map(|column| {
                let fill = if column.takes_status_fill() {
                    status_fill
                } else {
                    None
                };
                self.format_cell(*column, row, fill, source_row, diagnostics)
            })
            .collect();

        FormattedRow { cells }
    }

    fn format_cell(
        &self,
        column: DisplayColumn,
        row: &EnrichedRow,
        status_fill: Option<Color>,
        source_row: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> FormattedCell {
        match column {
            DisplayColumn::Status => FormattedCell::text(row.status.label().to_string(), status_fill),
            DisplayColumn::ReportStart => {
                self.date_cell(&row.report_start, column, status_fill, source_row, diagnostics)
            }
            DisplayColumn::ReportEnd => {
                self.date_cell(&row.report_end, column, status_fill, source_row, diagnostics)
            }
            DisplayColumn::Title => FormattedCell::text(row.title.clone(), status_fill),
            DisplayColumn::Spend => {
                FormattedCell::number(row.spend, self.currency_format.clone(), status_fill)
            }
            DisplayColumn::Revenue => self.numeric_cell(
                &row.revenue,
                column,
                &self.currency_format,
                |_| status_fill,
                status_fill,
                source_row,
                diagnostics,
            ),
            DisplayColumn::Roas => self.numeric_cell(
                &row.roas,
                column,
                "0.00",
                |v| Some(color::roas_band(v).fill()),
                Some(ColorBand::Red.fill()),
                source_row,
                diagnostics,
            ),
            DisplayColumn::Cpc => self.numeric_cell(
                &row.cpc,
                column,
                &self.currency_format,
                |v| Some(color::cpc_band(v).fill()),
                Some(ColorBand::Red.fill()),
                source_row,
                diagnostics,
            ),
            DisplayColumn::Cvr => self.numeric_cell(
                &row.cvr,
                column,
                "0.00%",
                |v| Some(color::cvr_band(v).fill()),
                Some(ColorBand::Red.fill()),
                source_row,
                diagnostics,
            ),
            DisplayColumn::Ctr => self.numeric_cell(
                &row.ctr,
                column,
                "0.00%",
                |v| Some(color::ctr_band(v).fill()),
                Some(ColorBand::Red.fill()),
                source_row,
                diagnostics,
            ),
            DisplayColumn::HookRate => ratio_cell(row.hook_rate, color::hook_band(row.hook_rate)),
            DisplayColumn::RetentionRate => {
                ratio_cell(row.retention_rate, color::retention_band(row.retention_rate))
            }
            DisplayColumn::Clicks => self.numeric_cell(
                &row.clicks,
                column,
                "#,##0",
                |_| None,
                None,
                source_row,
                diagnostics,
            ),
            DisplayColumn::Purchases => self.numeric_cell(
                &row.purchases,
                column,
                "#,##0",
                |_| None,
                None,
                source_row,
                diagnostics,
            ),
            DisplayColumn::AvgOrderValue => {
                FormattedCell::number(row.avg_order_value, self.currency_format.clone(), None)
            }
        }
    }

    /// 날짜 셀: 표시 형식으로 렌더링한 텍스트
    ///
    /// 날짜로 해석되지 않는 값은 원문 그대로 내보내고 진단으로 기록한다.
    fn date_cell(
        &self,
        cell: &CellValue,
        column: DisplayColumn,
        fill: Option<Color>,
        source_row: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> FormattedCell {
        match cell.as_date() {
            Some(date) => {
                FormattedCell::text(date.format(&self.date_format).to_string(), fill)
            }
            None => match cell {
                CellValue::Empty => FormattedCell {
                    fill,
                    ..FormattedCell::blank()
                },
                other => {
                    diagnostics.push(Diagnostic {
                        row: source_row,
                        column: column.label().to_string(),
                        message: format!("날짜로 해석할 수 없는 값: {}", other.as_raw_string()),
                    });
                    FormattedCell::text(other.as_raw_string(), fill)
                }
            },
        }
    }

    /// 수치 셀: 값이 수치면 서식과 밴드색을 적용
    ///
    /// 수치가 아니면 `missing_fill`을 칠한다. 밴드 컬럼은 결측을 최악
    /// 밴드(빨강)로 취급하므로 호출 측이 빨강을 넘긴다. 빈 셀은 빈 칸으로,
    /// 해석 불가능한 텍스트는 원문으로 내보내며 후자만 진단으로 기록한다.
    #[allow(clippy::too_many_arguments)]
    fn numeric_cell(
        &self,
        cell: &CellValue,
        column: DisplayColumn,
        num_format: &str,
        fill_for: impl Fn(f64) -> Option<Color>,
        missing_fill: Option<Color>,
        source_row: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> FormattedCell {
        match cell.as_number() {
            Some(v) => FormattedCell::number(v, num_format.to_string(), fill_for(v)),
            None => match cell {
                CellValue::Empty => FormattedCell {
                    fill: missing_fill,
                    ..FormattedCell::blank()
                },
                other => {
                    diagnostics.push(Diagnostic {
                        row: source_row,
                        column: column.label().to_string(),
                        message: format!("수치로 해석할 수 없는 값: {}", other.as_raw_string()),
                    });
                    FormattedCell::text(other.as_raw_string(), missing_fill)
                }
            },
        }
    }
}

/// 후크/지속 셀: 결측이면 빈 칸에 빨강 배경만 남긴다
fn ratio_cell(value: Option<f64>, band: ColorBand) -> FormattedCell {
    match value {
        Some(v) => FormattedCell::number(v, "0%".to_string(), Some(band.fill())),
        None => FormattedCell {
            fill: Some(band.fill()),
            ..FormattedCell::blank()
        },
    }
}
