use crate::models::timeline_event::ColorToken;
use egui::Color32;

const FALLBACK_EVENT_COLOR: Color32 = Color32::from_rgb(116, 139, 167);

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Parse a `#RRGGBB` string.
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Fill colour of an event box.
pub fn event_fill(color: ColorToken, is_external: bool) -> Color32 {
    let base = parse_color(color.hex()).unwrap_or(FALLBACK_EVENT_COLOR);
    // Calendar imports are read-mostly; draw them slightly washed out.
    if is_external {
        with_alpha(base, 200)
    } else {
        base
    }
}

#[derive(Clone, Copy)]
pub(crate) struct TimelinePalette {
    pub strip_bg: Color32,
    pub hour_line: Color32,
    pub half_hour_line: Color32,
    pub label_text: Color32,
    pub event_text: Color32,
    pub event_border: Color32,
    pub preview_fill: Color32,
    pub preview_stroke: Color32,
    pub delete_bg: Color32,
    pub delete_text: Color32,
}

impl TimelinePalette {
    pub fn new(is_dark: bool) -> Self {
        if is_dark {
            Self {
                strip_bg: Color32::from_rgb(28, 30, 34),
                hour_line: Color32::from_rgb(70, 74, 80),
                half_hour_line: Color32::from_rgba_unmultiplied(70, 74, 80, 110),
                label_text: Color32::from_gray(150),
                event_text: Color32::from_rgb(245, 245, 245),
                event_border: Color32::from_rgba_unmultiplied(0, 0, 0, 90),
                preview_fill: Color32::from_rgba_unmultiplied(120, 160, 220, 70),
                preview_stroke: Color32::from_rgb(120, 160, 220),
                delete_bg: Color32::from_rgba_unmultiplied(0, 0, 0, 120),
                delete_text: Color32::from_rgb(240, 240, 240),
            }
        } else {
            Self {
                strip_bg: Color32::from_rgb(250, 250, 248),
                hour_line: Color32::from_rgb(210, 212, 216),
                half_hour_line: Color32::from_rgba_unmultiplied(210, 212, 216, 120),
                label_text: Color32::GRAY,
                event_text: Color32::from_rgb(255, 255, 255),
                event_border: Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                preview_fill: Color32::from_rgba_unmultiplied(70, 110, 180, 50),
                preview_stroke: Color32::from_rgb(70, 110, 180),
                delete_bg: Color32::from_rgba_unmultiplied(255, 255, 255, 150),
                delete_text: Color32::from_rgb(60, 60, 60),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#748BA7"), Some(Color32::from_rgb(0x74, 0x8B, 0xA7)));
        assert_eq!(parse_color("748ba7"), Some(Color32::from_rgb(0x74, 0x8B, 0xA7)));
        assert_eq!(parse_color("#FFF"), None);
        assert_eq!(parse_color("#GG0000"), None);
    }

    #[test]
    fn test_every_token_has_a_colour() {
        for token in ColorToken::ALL {
            assert!(parse_color(token.hex()).is_some(), "{:?}", token);
        }
    }

    #[test]
    fn test_external_fill_is_translucent() {
        let local = event_fill(ColorToken::MutedRose, false);
        let external = event_fill(ColorToken::MutedRose, true);
        assert_eq!(local.a(), 255);
        assert!(external.a() < 255);
    }
}
