//! Color Module
//!
//! 성과 지표를 4단계 색상 밴드로 분류하고, 각 밴드와 상태(ON/OFF)에
//! 대응하는 배경색을 제공하는 모듈. 임계값과 색상은 보고서 관례를
//! 그대로 따른다.
//!
//! | 밴드 | 의미 | 배경색 |
//! |------|------|--------|
//! | Blue | 우수 | `#CCE5FF` |
//! | Green | 양호 | `#D4EDDA` |
//! | Amber | 주의 | `#FFF3CD` |
//! | Red | 미달 | `#F8D7DA` |

use rust_xlsxwriter::Color;

use crate::types::Status;

/// 성과 밴드
///
/// 높은 밴드일수록 성과가 좋다. 결측 지표는 [`ColorBand::Red`]로 분류된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBand {
    Blue,
    Green,
    Amber,
    Red,
}

impl ColorBand {
    /// 밴드의 셀 배경색
    pub(crate) fn fill(self) -> Color {
        match self {
            ColorBand::Blue => Color::RGB(0xCCE5FF),
            ColorBand::Green => Color::RGB(0xD4EDDA),
            ColorBand::Amber => Color::RGB(0xFFF3CD),
            ColorBand::Red => Color::RGB(0xF8D7DA),
        }
    }
}

/// 상태 열 배경색: ON은 파랑, OFF는 회색, 판별 불가면 없음
pub(crate) fn status_fill(status: Status) -> Option<Color> {
    match status {
        Status::On => Some(Color::RGB(0xCCE5FF)),
        Status::Off => Some(Color::RGB(0xE9ECEF)),
        Status::Unknown => None,
    }
}

/// 하한 임계값 배열로 밴드를 결정 (값이 클수록 좋은 지표용)
fn band_at_least(value: f64, thresholds: [f64; 3]) -> ColorBand {
    if value >= thresholds[0] {
        ColorBand::Blue
    } else if value >= thresholds[1] {
        ColorBand::Green
    } else if value >= thresholds[2] {
        ColorBand::Amber
    } else {
        ColorBand::Red
    }
}

/// 후크 지표 밴드: ≥40% 파랑, ≥30% 초록, ≥20% 노랑, 미만·결측 빨강
pub(crate) fn hook_band(value: Option<f64>) -> ColorBand {
    match value {
        Some(v) => band_at_least(v, [0.40, 0.30, 0.20]),
        None => ColorBand::Red,
    }
}

/// 지속 지표 밴드: ≥30% 파랑, ≥20% 초록, ≥10% 노랑, 미만·결측 빨강
pub(crate) fn retention_band(value: Option<f64>) -> ColorBand {
    match value {
        Some(v) => band_at_least(v, [0.30, 0.20, 0.10]),
        None => ColorBand::Red,
    }
}

/// ROAS 밴드: ≥3.0 파랑, ≥2.5 초록, ≥1.0 노랑, 미만 빨강
pub(crate) fn roas_band(value: f64) -> ColorBand {
    band_at_least(value, [3.0, 2.5, 1.0])
}

/// CPC 밴드 (작을수록 좋음): <1,000원 파랑, <1,500원 초록, <2,000원 노랑
pub(crate) fn cpc_band(value: f64) -> ColorBand {
    if value < 1_000.0 {
        ColorBand::Blue
    } else if value < 1_500.0 {
        ColorBand::Green
    } else if value < 2_000.0 {
        ColorBand::Amber
    } else {
        ColorBand::Red
    }
}

/// CVR 밴드: ≥7% 파랑, ≥5% 초록, ≥3% 노랑, 미만 빨강
pub(crate) fn cvr_band(value: f64) -> ColorBand {
    band_at_least(value, [0.07, 0.05, 0.03])
}

/// CTR 밴드: ≥5% 파랑, ≥3% 초록, ≥2% 노랑, 미만 빨강
pub(crate) fn ctr_band(value: f64) -> ColorBand {
    band_at_least(value, [0.05, 0.03, 0.02])
}
