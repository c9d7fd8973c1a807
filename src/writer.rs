//! Writer Module
//!
//! 서식이 확정된 셀 그리드를 XLSX 바이트로 기록하는 모듈.
//! 서식 결정은 전부 앞 단계에서 끝났으므로 여기서는 셀당 한 번의
//! 쓰기만 일어난다.

use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::error::ConvertError;
use crate::format::{DisplayValue, FormattedRow};
use crate::schema::DisplayColumn;

const SHEET_NAME: &str = "광고 성과";

/// 셀 그리드를 XLSX 바이트로 직렬화
///
/// 1행은 출력 라벨 헤더, 2행부터 데이터. 열 너비는
/// [`DisplayColumn::width`]를 따른다.
pub(crate) fn write_workbook(rows: &[FormattedRow]) -> Result<Vec<u8>, ConvertError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);

    for (col, column) in DisplayColumn::ALL.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, column.width())?;
        worksheet.write_string_with_format(0, col, column.label(), &header_format)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;

        for (col_idx, cell) in row.cells.iter().enumerate() {
            let col_num = col_idx as u16;

            let mut format = Format::new();
            let mut has_format = false;
            if let Some(num_format) = &cell.num_format {
                format = format.set_num_format(num_format.as_str());
                has_format = true;
            }
            if let Some(fill) = cell.fill {
                format = format.set_background_color(fill);
                has_format = true;
            }

            match &cell.value {
                DisplayValue::Number(v) => {
                    worksheet.write_number_with_format(row_num, col_num, *v, &format)?;
                }
                DisplayValue::Text(s) => {
                    if has_format {
                        worksheet.write_string_with_format(row_num, col_num, s, &format)?;
                    } else {
                        worksheet.write_string(row_num, col_num, s)?;
                    }
                }
                DisplayValue::Blank => {
                    // 배경색이 있는 결측 셀만 빈 칸으로 명시 기록
                    if has_format {
                        worksheet.write_blank(row_num, col_num, &format)?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
