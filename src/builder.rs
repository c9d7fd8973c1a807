//! Builder Module
//!
//! [`Converter`] 구성을 위한 빌더와 변환 진입점.
//!
//! ```rust,no_run
//! use adsheet::ConverterBuilder;
//!
//! # fn main() -> Result<(), adsheet::ConvertError> {
//! let converter = ConverterBuilder::new()
//!     .with_date_format("%m월%d일")
//!     .with_currency_suffix("원")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Seek, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ConvertError;
use crate::format::RowFormatter;
use crate::limits::Limits;
use crate::parser;
use crate::pipeline;
use crate::schema::ColumnMap;
use crate::types::{Diagnostic, EnrichedRow, ReportRow};

/// 변환 결과 요약
///
/// 변환은 셀 단위 문제로 중단되지 않는다. 해석하지 못한 값은
/// `diagnostics`에 쌓이고 원문 그대로 출력에 남는다.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// 입력 데이터 행 수 (헤더 제외)
    pub rows_total: usize,
    /// 필터 통과 후 출력된 행 수
    pub rows_kept: usize,
    /// 보고 기간 기반 기본 파일명 (`LYLYL_yyMMdd_yyMMdd`)
    ///
    /// 첫 데이터 행의 보고 시작/종료가 날짜로 해석되지 않으면 `None`.
    pub base_name: Option<String>,
    /// 셀 단위 해석 실패 목록
    pub diagnostics: Vec<Diagnostic>,
}

/// [`Converter`] 빌더
#[derive(Debug, Clone)]
pub struct ConverterBuilder {
    date_format: String,
    currency_suffix: String,
    limits: Limits,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self {
            date_format: "%m월%d일".to_string(),
            currency_suffix: "원".to_string(),
            limits: Limits::default(),
        }
    }
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 보고 시작/종료의 표시 형식 (strftime 문법)
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// 통화 컬럼 숫자 서식의 접미사
    pub fn with_currency_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.currency_suffix = suffix.into();
        self
    }

    /// 입력 파일 크기 상한 (바이트)
    pub fn with_max_input_file_size(mut self, bytes: u64) -> Self {
        self.limits.max_input_file_size = bytes;
        self
    }

    /// 데이터 행 수 상한
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.limits.max_rows = rows;
        self
    }

    /// 설정을 검증하고 [`Converter`]를 생성
    pub fn build(self) -> Result<Converter, ConvertError> {
        let invalid = StrftimeItems::new(&self.date_format)
            .any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(ConvertError::Config(format!(
                "잘못된 날짜 형식: {}",
                self.date_format
            )));
        }
        if self.limits.max_rows == 0 {
            return Err(ConvertError::Config("행 수 상한은 1 이상이어야 합니다".to_string()));
        }
        if self.limits.max_input_file_size == 0 {
            return Err(ConvertError::Config(
                "파일 크기 상한은 1 이상이어야 합니다".to_string(),
            ));
        }

        Ok(Converter {
            formatter: RowFormatter::new(&self.date_format, &self.currency_suffix),
            limits: self.limits,
        })
    }
}

/// 성과 리포트 변환기
///
/// [`ConverterBuilder`]로 생성한다. 상태를 갖지 않으므로 하나를 만들어
/// 여러 입력에 재사용할 수 있다.
#[derive(Debug)]
pub struct Converter {
    formatter: RowFormatter,
    limits: Limits,
}

impl Converter {
    /// 입력 리더의 리포트를 변환해 출력 라이터에 XLSX로 기록
    pub fn convert<R, W>(&self, input: R, mut output: W) -> Result<ConversionReport, ConvertError>
    where
        R: Read + Seek,
        W: Write,
    {
        let (report, bytes) = self.convert_to_buffer(input)?;
        output.write_all(&bytes)?;
        Ok(report)
    }

    /// 변환 결과를 메모리 버퍼로 반환
    pub fn convert_to_buffer<R>(
        &self,
        input: R,
    ) -> Result<(ConversionReport, Vec<u8>), ConvertError>
    where
        R: Read + Seek,
    {
        let sheet = parser::read_first_sheet(input, &self.limits)?;
        let column_map = ColumnMap::resolve(&sheet.headers)?;

        let rows: Vec<ReportRow> = sheet
            .records
            .iter()
            .map(|record| column_map.project(record))
            .collect();
        let rows_total = rows.len();
        let base_name = base_name_from(&rows);

        // 헤더가 1행이므로 첫 데이터 행의 시트 행 번호는 2
        let numbered: Vec<(usize, ReportRow)> = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| (i + 2, row))
            .collect();

        let kept = pipeline::filter_rows(numbered);
        let rows_kept = kept.len();

        let mut enriched: Vec<(usize, EnrichedRow)> = kept
            .into_iter()
            .map(|(n, row)| (n, pipeline::enrich(row)))
            .collect();
        pipeline::sort_by_spend(&mut enriched);

        let mut diagnostics = Vec::new();
        let formatted: Vec<_> = enriched
            .iter()
            .map(|(n, row)| self.formatter.format_row(row, *n, &mut diagnostics))
            .collect();

        let bytes = crate::writer::write_workbook(&formatted)?;

        Ok((
            ConversionReport {
                rows_total,
                rows_kept,
                base_name,
                diagnostics,
            },
            bytes,
        ))
    }
}

/// 첫 데이터 행의 보고 기간에서 기본 파일명을 추출
///
/// 시작/종료 둘 다 날짜로 해석되는 첫 행을 쓴다. 끝까지 없으면 `None`.
fn base_name_from(rows: &[ReportRow]) -> Option<String> {
    rows.iter().find_map(|row| {
        let start: NaiveDate = row.report_start.as_date()?;
        let end = row.report_end.as_date()?;
        Some(crate::version::base_name(start, end))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_builder_defaults() {
        assert!(ConverterBuilder::new().build().is_ok());
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let err = ConverterBuilder::new()
            .with_date_format("%월")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(ConverterBuilder::new().with_max_rows(0).build().is_err());
        assert!(ConverterBuilder::new()
            .with_max_input_file_size(0)
            .build()
            .is_err());
    }

    /// 원본 형태의 리포트 워크북을 메모리에 생성
    fn source_workbook(rows: &[Vec<SourceCell>]) -> Vec<u8> {
        use crate::schema::SOURCE_COLUMNS;
        use rust_xlsxwriter::Workbook;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, (source, _)) in SOURCE_COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *source).unwrap();
        }
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                match cell {
                    SourceCell::Num(v) => {
                        worksheet
                            .write_number((row_idx + 1) as u32, col_idx as u16, *v)
                            .unwrap();
                    }
                    SourceCell::Str(s) => {
                        worksheet
                            .write_string((row_idx + 1) as u32, col_idx as u16, *s)
                            .unwrap();
                    }
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    enum SourceCell {
        Num(f64),
        Str(&'static str),
    }

    fn sample_row(title: &'static str, spend: f64) -> Vec<SourceCell> {
        use SourceCell::*;
        // SOURCE_COLUMNS 선언 순서와 같은 컬럼 순서
        vec![
            Str(title),         // 광고 이름
            Str("ACTIVE"),      // 광고 게재
            Num(spend),         // 지출 금액 (KRW)
            Num(3.0),           // 구매
            Num(150000.0),      // 구매 전환값
            Num(3.0),           // ROAS
            Num(900.0),         // CPC
            Num(8.0),           // 전환율(CVR)
            Num(4.5),           // CTR(전체)
            Num(55.0),          // 클릭(전체)
            Num(1000.0),        // 동영상 재생
            Num(450.0),         // 3초 이상 재생
            Num(150.0),         // 100% 재생
            Str("2025-04-14"),  // 보고 시작
            Str("2025-04-20"),  // 보고 종료
        ]
    }

    #[test]
    fn test_convert_end_to_end() {
        let input = source_workbook(&[
            sample_row("저예산", 1000.0),
            sample_row("중단됨", 0.0),
            sample_row("고예산", 90000.0),
        ]);

        let converter = ConverterBuilder::new().build().unwrap();
        let mut output = Vec::new();
        let report = converter
            .convert(Cursor::new(input), &mut output)
            .unwrap();

        assert_eq!(report.rows_total, 3);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(report.base_name.as_deref(), Some("LYLYL_250414_250420"));
        assert!(report.diagnostics.is_empty());

        // 광고비 내림차순: 고예산이 먼저
        use calamine::{Data, Reader, Xlsx};
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(output)).unwrap();
        let range = workbook.worksheet_range("광고 성과").unwrap();
        assert_eq!(range.height(), 3);
        assert_eq!(
            range.get_value((1, 3)).unwrap(),
            &Data::String("고예산".to_string())
        );
        assert_eq!(
            range.get_value((2, 3)).unwrap(),
            &Data::String("저예산".to_string())
        );
    }

    #[test]
    fn test_convert_missing_columns_fails() {
        use rust_xlsxwriter::Workbook;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "엉뚱한 컬럼").unwrap();
        let input = workbook.save_to_buffer().unwrap();

        let converter = ConverterBuilder::new().build().unwrap();
        let err = converter
            .convert_to_buffer(Cursor::new(input))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Schema { .. }));
    }

    #[test]
    fn test_diagnostics_carry_source_row_numbers() {
        let mut bad_row = sample_row("이상한 행", 5000.0);
        bad_row[5] = SourceCell::Str("계산 중"); // ROAS 자리에 텍스트

        let input = source_workbook(&[sample_row("정상", 1000.0), bad_row]);
        let converter = ConverterBuilder::new().build().unwrap();
        let (report, _) = converter.convert_to_buffer(Cursor::new(input)).unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        // 헤더 1행 + 정상 행 다음이므로 시트 행 번호 3
        assert_eq!(report.diagnostics[0].row, 3);
        assert_eq!(report.diagnostics[0].column, "ROAS");
    }

    #[test]
    fn test_base_name_none_when_dates_unparseable() {
        let mut row = sample_row("기간 없음", 1000.0);
        row[13] = SourceCell::Str("미정");
        row[14] = SourceCell::Str("미정");

        let input = source_workbook(&[row]);
        let converter = ConverterBuilder::new().build().unwrap();
        let (report, _) = converter.convert_to_buffer(Cursor::new(input)).unwrap();

        assert_eq!(report.base_name, None);
        assert_eq!(report.rows_kept, 1);
    }
}
