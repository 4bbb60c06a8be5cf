//! テーマとスタイルヘルパー

/// CSS クラス名の定数
pub struct CssClasses;

impl CssClasses {
    // アプリケーション
    pub const APP: &'static str = "app";
    pub const MAIN_WINDOW: &'static str = "main-window";
    pub const APP_HEADER: &'static str = "app-header";

    // ステータス
    pub const STATUS_PANEL: &'static str = "status-panel";
    pub const STAT_ITEM: &'static str = "stat-item";
    pub const STAT_VALUE: &'static str = "stat-value";
    pub const STAT_LABEL: &'static str = "stat-label";

    // チャート
    pub const CHART_PANEL: &'static str = "chart-panel";
    pub const CHART_PLOT: &'static str = "chart-plot";
    pub const CHART_BAR: &'static str = "chart-bar";
    pub const CHART_BAR_COLUMN: &'static str = "chart-bar-column";
    pub const CHART_EMPTY: &'static str = "chart-empty";
}

/// matplotlibのviridisカラーマップの代表点（位置, RGB）
const VIRIDIS_STOPS: [(f64, [u8; 3]); 9] = [
    (0.000, [68, 1, 84]),
    (0.125, [72, 40, 120]),
    (0.250, [62, 74, 137]),
    (0.375, [49, 104, 142]),
    (0.500, [38, 130, 142]),
    (0.625, [31, 158, 137]),
    (0.750, [53, 183, 121]),
    (0.875, [109, 205, 89]),
    (1.000, [253, 231, 37]),
];

/// 平均センチメントをviridisグラデーションの色へ写像する
///
/// 入力は[0, 1]へクランプされる（負の平均は最下端の色になる）。
pub fn viridis_color(value: f64) -> String {
    let t = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };

    let mut lower = VIRIDIS_STOPS[0];
    let mut upper = VIRIDIS_STOPS[VIRIDIS_STOPS.len() - 1];
    for window in VIRIDIS_STOPS.windows(2) {
        if t >= window[0].0 && t <= window[1].0 {
            lower = window[0];
            upper = window[1];
            break;
        }
    }

    let span = upper.0 - lower.0;
    let local = if span <= f64::EPSILON {
        0.0
    } else {
        (t - lower.0) / span
    };

    let channel = |a: u8, b: u8| -> u8 {
        (a as f64 + (b as f64 - a as f64) * local).round() as u8
    };

    format!(
        "#{:02x}{:02x}{:02x}",
        channel(lower.1[0], upper.1[0]),
        channel(lower.1[1], upper.1[1]),
        channel(lower.1[2], upper.1[2]),
    )
}

/// CSSの埋め込み用ヘルパー
pub fn get_embedded_css() -> &'static str {
    include_str!("theme.css")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis_color(0.0), "#440154");
        assert_eq!(viridis_color(1.0), "#fde725");
    }

    #[test]
    fn test_viridis_clamps_out_of_range() {
        assert_eq!(viridis_color(-0.5), viridis_color(0.0));
        assert_eq!(viridis_color(1.5), viridis_color(1.0));
        assert_eq!(viridis_color(f64::NAN), viridis_color(0.0));
    }

    #[test]
    fn test_viridis_midpoint_is_interior_stop() {
        assert_eq!(viridis_color(0.5), "#26828e");
    }
}
