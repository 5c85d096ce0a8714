use plotters::style::RGBAColor;

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub bold_grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    pub line_color: RGBAColor,
    pub marker_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(255, 255, 255, 1.0),
            text_color: RGBAColor(0, 0, 0, 0.9),
            grid_color: RGBAColor(0, 0, 0, 0.08),
            bold_grid_color: RGBAColor(0, 0, 0, 0.25),
            axis_color: RGBAColor(0, 0, 0, 0.9),
            line_color: RGBAColor(0, 255, 0, 1.0),
            marker_color: RGBAColor(255, 0, 0, 1.0),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    /// Image size in pixels, 40cm x 20cm at 96 dpi by default
    pub size: (u32, u32),
    pub line_width: u32,
    pub marker_size: i32,
    pub title_font_size: f64,
    pub font_size: f64,
    pub margin: i32,
    pub label_area_size: i32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            size: (1512, 756),
            line_width: 2,
            marker_size: 3,
            title_font_size: 30.0,
            font_size: 15.0,
            margin: 20,
            label_area_size: 60,
        }
    }
}
