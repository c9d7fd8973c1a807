//! Parser Module
//!
//! calamine을 사용한 입력 워크북 해석.
//! 1행째를 헤더로, 이후를 데이터 행으로 읽어들인다.
//! 여러 시트가 있어도 첫 번째 시트만 처리한다 (원본 리포트는 단일 시트).

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::{Cursor, Read, Seek};

use crate::error::ConvertError;
use crate::limits::Limits;
use crate::types::CellValue;

/// 해석된 시트: 헤더 행 + 데이터 행
#[derive(Debug)]
pub(crate) struct ParsedSheet {
    /// 1행째의 컬럼명 (trim 전)
    pub headers: Vec<String>,
    /// 2행째 이후의 데이터 행
    pub records: Vec<Vec<CellValue>>,
}

/// 입력 리더에서 첫 번째 시트를 읽어들인다
///
/// 워크북을 열기 전에 입력 크기 상한을 적용한다.
/// XLSX 외에 calamine이 열 수 있는 형식(XLS 등)도 허용한다.
pub(crate) fn read_first_sheet<R: Read + Seek>(
    mut input: R,
    limits: &Limits,
) -> Result<ParsedSheet, ConvertError> {
    // 1. 크기 제한을 적용하면서 메모리로 읽어들인다
    let mut buffer = Vec::new();
    let bytes_read = input.read_to_end(&mut buffer)?;

    if bytes_read as u64 > limits.max_input_file_size {
        return Err(ConvertError::Limit(format!(
            "input file size exceeds maximum: {} bytes (max: {} bytes)",
            bytes_read, limits.max_input_file_size
        )));
    }

    // 2. 워크북을 연다
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(ConvertError::Parse)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ConvertError::Parse(calamine::Error::Msg("workbook has no sheets")))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(ConvertError::Parse)?;

    // 3. 헤더 행과 데이터 행으로 분리
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(data_to_header).collect())
        .unwrap_or_default();

    let mut records = Vec::new();
    for row in rows {
        if records.len() >= limits.max_rows {
            return Err(ConvertError::Limit(format!(
                "row count exceeds maximum: {}",
                limits.max_rows
            )));
        }
        records.push(row.iter().map(data_to_cell).collect());
    }

    Ok(ParsedSheet { headers, records })
}

/// calamine 셀 값을 [`CellValue`]로 변환
fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::Date(naive.date()),
            None => CellValue::Empty,
        },
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("{:?}", e)),
        Data::Empty => CellValue::Empty,
        _ => CellValue::Empty,
    }
}

/// 헤더 셀을 컬럼명 문자열로 변환
fn data_to_header(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => format!("{}", other),
    }
}
