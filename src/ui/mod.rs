/// UI layer: panels plus the chart, treemap, matrix, and table widgets.
pub mod charts;
pub mod matrix;
pub mod panels;
pub mod table;
pub mod treemap;
