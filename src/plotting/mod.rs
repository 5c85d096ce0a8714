mod axis;
mod chart;
mod styles;


pub use axis::TimeAxis;
pub use chart::{ChartRenderer, PlottersRenderer, Y_AXIS_DESCRIPTION};
pub use styles::{ChartStyle, ChartTheme};
