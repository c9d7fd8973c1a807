//! adsheet - 광고 성과 리포트 엑셀 변환기
//!
//! 광고 플랫폼에서 내보낸 성과 리포트(XLSX)를 읽어서
//! 컬럼 매핑, 광고비 0원 행 제거, 파생 지표 계산(평균객단가/후크/지속),
//! 광고비 내림차순 정렬을 수행한 뒤, 숫자 서식과 지표별 조건부 색상이
//! 적용된 워크북으로 다시 내보냅니다.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use adsheet::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("report.xlsx")?;
//!     let output = File::create("LYLYL_250414_250420_v01.xlsx")?;
//!
//!     let report = converter.convert(input, output)?;
//!     println!("{}행 중 {}행 변환", report.rows_total, report.rows_kept);
//!
//!     Ok(())
//! }
//! ```
//!
//! 메모리 버퍼 간 변환은 `Cursor`를 사용합니다:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use adsheet::ConverterBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // 원본 엑셀 파일 바이트
//! let mut converted = Vec::new();
//! converter.convert(Cursor::new(excel_data), &mut converted)?;
//! # Ok(())
//! # }
//! ```
//!
//! # 출력 파일명
//!
//! 출력 파일명은 입력 1행째의 보고 시작/종료 날짜에서
//! `LYLYL_<yyMMdd>_<yyMMdd>_vNN.xlsx` 형태로 결정됩니다.
//! 버전 번호는 [`version::next_version`]이 대상 디렉토리를 스캔하여
//! 기존 최대 버전 + 1을 선택합니다.

mod builder;
mod color;
mod error;
mod format;
mod limits;
mod parser;
mod pipeline;
mod schema;
mod types;
mod writer;

pub mod version;

// 공개API
pub use builder::{ConversionReport, Converter, ConverterBuilder};
pub use color::ColorBand;
pub use error::ConvertError;
pub use schema::DisplayColumn;
pub use types::{Diagnostic, Status};
