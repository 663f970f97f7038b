//! Text encoding for the standard Type 1 fonts (WinAnsiEncoding).

/// Encode `text` as WinAnsi bytes. Printable ASCII and Latin-1 pass
/// through, common typographic marks map to their WinAnsi slots, arrows
/// become `->` and anything else becomes `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ' '..='~' => out.push(ch as u8),
            '\u{00A0}'..='\u{00FF}' => out.push(ch as u32 as u8),
            '€' => out.push(0x80),
            '…' => out.push(0x85),
            '‘' => out.push(0x91),
            '’' => out.push(0x92),
            '“' => out.push(0x93),
            '”' => out.push(0x94),
            '•' => out.push(0x95),
            '–' => out.push(0x96),
            '—' => out.push(0x97),
            '→' => out.extend_from_slice(b"->"),
            '\t' => out.push(b' '),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Rough width in points of WinAnsi text set in Helvetica-Bold.
/// Only used to centre the title.
pub fn approx_bold_width(bytes: &[u8], size: f32) -> f32 {
    let units: u32 = bytes
        .iter()
        .map(|&b| match b {
            b' ' => 278,
            b'i' | b'j' | b'l' => 278,
            b'f' | b't' | b'I' => 333,
            b'm' | b'M' | b'W' => 889,
            b'w' => 778,
            b'a'..=b'z' => 580,
            b'A'..=b'Z' => 722,
            b'0'..=b'9' => 556,
            0x97 => 1000,
            0x96 => 556,
            _ => 333,
        })
        .sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(to_win_ansi("Harmony Ratio: 50.0%"), b"Harmony Ratio: 50.0%".to_vec());
    }

    #[test]
    fn test_dash_and_arrow() {
        assert_eq!(to_win_ansi("Stage 4 — X"), b"Stage 4 \x97 X".to_vec());
        assert_eq!(to_win_ansi("60% → dominant"), b"60% -> dominant".to_vec());
    }

    #[test]
    fn test_unsupported_characters_replaced() {
        assert_eq!(to_win_ansi("🙂 ok"), b"? ok".to_vec());
        assert_eq!(to_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_width_scales_with_size() {
        let text = to_win_ansi("Daily Insight Report");
        let w10 = approx_bold_width(&text, 10.0);
        let w20 = approx_bold_width(&text, 20.0);
        assert!(w10 > 0.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-3);
    }
}
