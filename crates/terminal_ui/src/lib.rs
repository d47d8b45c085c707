pub mod ansi;
mod render;

pub use render::{
    CellStyle, LabelPlacement, LineStyles, label_placement, render_line, render_plain,
};
