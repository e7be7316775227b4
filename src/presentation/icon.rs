//! Self-contained weather icons

use crate::weather::Symbol;
use base64::{Engine, engine::general_purpose::STANDARD};

const CANVAS_SIZE: u32 = 100;
const GLYPH_SIZE: u32 = 64;

/// An inline SVG image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconResource {
    pub svg: String,
}

impl IconResource {
    /// `data:` URI usable directly as an image source
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(self.svg.as_bytes()))
    }
}

/// Draw a symbol as a centred glyph on a square canvas. Never fails.
#[must_use]
pub fn render_icon(symbol: Symbol) -> IconResource {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{CANVAS_SIZE}' height='{CANVAS_SIZE}'>\
         <text x='50%' y='54%' dominant-baseline='middle' text-anchor='middle' font-size='{GLYPH_SIZE}'>{}</text>\
         </svg>",
        symbol.glyph()
    );
    IconResource { svg }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_symbol_renders_its_glyph() {
        for symbol in Symbol::ALL {
            let icon = render_icon(symbol);
            assert!(icon.svg.starts_with("<svg"));
            assert!(icon.svg.contains("width='100' height='100'"));
            assert!(icon.svg.contains(symbol.glyph()));
        }
    }

    #[test]
    fn test_data_uri_decodes_to_svg() {
        let icon = render_icon(Symbol::Thunderstorm);
        let uri = icon.data_uri();
        let encoded = uri
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("data uri prefix");
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, icon.svg);
        assert!(decoded.contains("\u{26C8}"));
    }
}
