pub mod colors;
pub mod svg;

pub use self::colors::{fill_missing_colors, ColorGenerator, ColorSettings};
pub use self::svg::{render_document, write_svg, SvgConfig};
