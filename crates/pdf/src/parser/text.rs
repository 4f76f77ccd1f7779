//! Page text reconstruction from content-stream operators.
//!
//! ```text
//! content ops  ->  TextSpan[]  ->  TextLine[]  ->  page text
//!   (per page)      extract         group_spans     render_lines
//! ```
//!
//! Lines are joined with `\n`. Where the vertical gap between two lines is
//! larger than [`PARAGRAPH_GAP_FACTOR`] times the upper line's font size, an
//! empty line is emitted so downstream paragraph splitting sees a break.

use super::backend::{
    get_number_from_value, BackendFontInfo, PageId, PdfBackend, PdfValue, TextDecoder,
};
use crate::PdfError;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A run of text drawn at one position.
#[derive(Debug, Clone)]
pub struct TextSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    pub font_name: String,
}

/// Spans sharing a baseline, left to right.
#[derive(Debug, Clone, Default)]
pub struct TextLine {
    pub spans: Vec<TextSpan>,
    pub y: f32,
    pub font_size: f32,
}

impl TextLine {
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Spans whose baselines differ by at most this many points share a line.
const Y_TOLERANCE: f32 = 1.0;

/// Glyph width as a fraction of font size; no width tables are consulted.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Gaps (points) below this between same-font spans are not word breaks.
const MIN_WORD_GAP: f32 = 1.5;

/// A line gap above this multiple of the font size starts a new paragraph.
pub const PARAGRAPH_GAP_FACTOR: f32 = 1.4;

/// The identity 2x3 matrix: [a, b, c, d, tx, ty].
const IDENTITY_MATRIX: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `m1 x m2` in PDF's row-vector convention, so `m1` is applied first.
fn multiply(m1: [f32; 6], m2: [f32; 6]) -> [f32; 6] {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

fn six_numbers(operands: &[PdfValue]) -> Option<[f32; 6]> {
    let vals: Vec<f32> = operands
        .iter()
        .take(6)
        .filter_map(get_number_from_value)
        .collect();
    match vals[..] {
        [a, b, c, d, e, f] => Some([a, b, c, d, e, f]),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Internal: PDF text-state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct TextState {
    /// Current transformation matrix; survives BT/ET, saved by q/Q.
    ctm: [f32; 6],
    /// Resource key of the current font (`/F1`), not its base name.
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    text_matrix: [f32; 6],
    /// Set by BT, moved by Td/TD/T*/Tm.
    line_matrix: [f32; 6],
    /// Tz as a factor, 1.0 = 100%.
    horiz_scale: f32,
    char_spacing: f32,
    word_spacing: f32,
    text_rise: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY_MATRIX,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 0.0,
            text_matrix: IDENTITY_MATRIX,
            line_matrix: IDENTITY_MATRIX,
            horiz_scale: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            text_rise: 0.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    /// Text space to device space.
    fn device_matrix(&self) -> [f32; 6] {
        multiply(self.text_matrix, self.ctm)
    }

    /// Device-space position of the next glyph, text rise included.
    fn origin(&self) -> (f32, f32) {
        let rise = [1.0, 0.0, 0.0, 1.0, 0.0, self.text_rise];
        let m = multiply(rise, self.device_matrix());
        (m[4], m[5])
    }

    /// Font size in device space: `size * sqrt(b^2 + d^2)`.
    fn effective_font_size(&self) -> f32 {
        let m = self.device_matrix();
        (self.font_size * (m[1].powi(2) + m[3].powi(2)).sqrt()).abs()
    }

    fn device_width(&self, text: &str) -> f32 {
        let m = self.device_matrix();
        let scale = (m[0].powi(2) + m[1].powi(2)).sqrt();
        text.chars().count() as f32 * self.char_width() * scale
    }

    fn char_width(&self) -> f32 {
        self.font_size * APPROX_CHAR_WIDTH_RATIO * self.horiz_scale
    }

    fn advance_x(&mut self, dx: f32) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// Td semantics: translate the line matrix and restart the text matrix there.
    fn translate_line(&mut self, tx: f32, ty: f32) {
        let m = self.line_matrix;
        self.line_matrix[4] = m[0] * tx + m[2] * ty + m[4];
        self.line_matrix[5] = m[1] * tx + m[3] * ty + m[5];
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    /// Move past `text` using the approximate glyph width plus Tc/Tw.
    fn advance_after_show(&mut self, text: &str) {
        let dx: f32 = text
            .chars()
            .map(|ch| {
                let spacing = if ch == ' ' { self.word_spacing } else { 0.0 };
                self.char_width() + self.char_spacing + spacing
            })
            .sum();
        self.advance_x(dx);
    }

    fn span(&self, text: String, x: f32, y: f32) -> TextSpan {
        let width = self.device_width(&text);
        TextSpan {
            text,
            x,
            y,
            width,
            font_size: self.effective_font_size(),
            font_name: self.font_name.clone(),
        }
    }
}

fn number_at(operands: &[PdfValue], idx: usize) -> Option<f32> {
    operands.get(idx).and_then(get_number_from_value)
}

fn decode_operand(val: &PdfValue, decoder: &dyn TextDecoder, font_key: &[u8]) -> String {
    match val {
        PdfValue::Str(bytes) => decoder.decode(font_key, bytes),
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Public API: span extraction
// ---------------------------------------------------------------------------

/// Walk one page's content stream and collect every shown string as a
/// [`TextSpan`].
///
/// Handled operators: `q`, `Q`, `cm`, `BT`, `Tf`, `Tm`, `Td`, `TD`, `T*`, `TL`, `Tc`, `Tw`,
/// `Tz`, `Ts`, `Tj`, `TJ`, `'` and `"`. Everything else is ignored.
pub fn extract_page_spans(
    backend: &dyn PdfBackend,
    page_id: PageId,
) -> Result<Vec<TextSpan>, PdfError> {
    let raw_content = backend.page_content(page_id)?;
    let ops = backend.decode_content(&raw_content)?;
    let fonts = backend.page_fonts(page_id).unwrap_or_default();
    let decoder = backend.text_decoder(page_id);
    let decoder = decoder.as_ref();

    let mut state = TextState::default();
    let mut saved: Vec<[f32; 6]> = Vec::new();
    let mut spans: Vec<TextSpan> = Vec::new();

    for op in &ops {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            "q" => saved.push(state.ctm),
            "Q" => {
                if let Some(ctm) = saved.pop() {
                    state.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = six_numbers(operands) {
                    state.ctm = multiply(m, state.ctm);
                }
            }
            "BT" => {
                state.text_matrix = IDENTITY_MATRIX;
                state.line_matrix = IDENTITY_MATRIX;
            }
            "Tf" => handle_tf(operands, &fonts, &mut state),
            "Tm" => handle_tm(operands, &mut state),
            "Td" => {
                if let (Some(tx), Some(ty)) = (number_at(operands, 0), number_at(operands, 1)) {
                    state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (number_at(operands, 0), number_at(operands, 1)) {
                    state.leading = -ty;
                    state.translate_line(tx, ty);
                }
            }
            "T*" => state.next_line(),
            "TL" => {
                if let Some(v) = number_at(operands, 0) {
                    state.leading = v;
                }
            }
            "Tc" => {
                if let Some(v) = number_at(operands, 0) {
                    state.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some(v) = number_at(operands, 0) {
                    state.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some(v) = number_at(operands, 0) {
                    state.horiz_scale = v / 100.0;
                }
            }
            "Ts" => {
                if let Some(v) = number_at(operands, 0) {
                    state.text_rise = v;
                }
            }
            "Tj" => {
                if let Some(first) = operands.first() {
                    show_string(first, decoder, &mut state, &mut spans);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(arr)) = operands.first() {
                    show_tj_array(arr, decoder, &mut state, &mut spans);
                }
            }
            "'" => {
                state.next_line();
                if let Some(first) = operands.first() {
                    show_string(first, decoder, &mut state, &mut spans);
                }
            }
            "\"" => {
                if operands.len() >= 3 {
                    if let Some(aw) = number_at(operands, 0) {
                        state.word_spacing = aw;
                    }
                    if let Some(ac) = number_at(operands, 1) {
                        state.char_spacing = ac;
                    }
                    state.next_line();
                    show_string(&operands[2], decoder, &mut state, &mut spans);
                }
            }
            _ => {}
        }
    }

    Ok(spans)
}

fn handle_tf(operands: &[PdfValue], fonts: &[BackendFontInfo], state: &mut TextState) {
    let key = match operands.first() {
        Some(PdfValue::Name(n)) | Some(PdfValue::Str(n)) => n.clone(),
        _ => return,
    };
    let Some(size) = number_at(operands, 1) else {
        return;
    };

    state.font_name = fonts
        .iter()
        .find(|info| info.name == key)
        .and_then(|info| info.base_font.clone())
        .unwrap_or_else(|| String::from_utf8_lossy(&key).into_owned());
    state.font_key = key;
    state.font_size = size;
}

fn handle_tm(operands: &[PdfValue], state: &mut TextState) {
    if let Some(m) = six_numbers(operands) {
        state.text_matrix = m;
        state.line_matrix = m;
    }
}

/// Shared by `Tj`, `'` and `"`.
fn show_string(
    operand: &PdfValue,
    decoder: &dyn TextDecoder,
    state: &mut TextState,
    spans: &mut Vec<TextSpan>,
) {
    let text = decode_operand(operand, decoder, &state.font_key);
    if text.is_empty() {
        return;
    }
    let (x, y) = state.origin();
    state.advance_after_show(&text);
    spans.push(state.span(text, x, y));
}

/// `TJ` arrays mix strings with kerning in thousandths of a text unit. A
/// kerning jump wider than ~30% of a glyph is treated as a word space.
fn show_tj_array(
    arr: &[PdfValue],
    decoder: &dyn TextDecoder,
    state: &mut TextState,
    spans: &mut Vec<TextSpan>,
) {
    let mut buf = String::new();
    let (mut span_x, span_y) = state.origin();

    for elem in arr {
        if let PdfValue::Str(_) = elem {
            let fragment = decode_operand(elem, decoder, &state.font_key);
            if buf.is_empty() {
                span_x = state.origin().0;
            }
            buf.push_str(&fragment);
            state.advance_after_show(&fragment);
        } else if let Some(adj) = get_number_from_value(elem) {
            let dx = -adj / 1000.0 * state.font_size * state.horiz_scale;
            if dx > state.char_width() * 0.3 && !buf.is_empty() {
                buf.push(' ');
            }
            state.advance_x(dx);
        }
    }

    let trimmed = buf.trim_end();
    if !trimmed.is_empty() {
        spans.push(state.span(trimmed.to_string(), span_x, span_y));
    }
}

// ---------------------------------------------------------------------------
// Public API: lines and page text
// ---------------------------------------------------------------------------

/// Group spans into lines, top of the page first.
///
/// Within a line, spans are ordered by X. Same-font neighbours are merged,
/// with a space when the horizontal gap looks like a word break.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();

    for span in spans {
        let same_line = current
            .first()
            .is_some_and(|first| (span.y - first.y).abs() <= Y_TOLERANCE);
        if !same_line && !current.is_empty() {
            lines.push(assemble_line(std::mem::take(&mut current)));
        }
        current.push(span);
    }

    if !current.is_empty() {
        lines.push(assemble_line(current));
    }

    lines
}

fn assemble_line(mut spans: Vec<TextSpan>) -> TextLine {
    spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    let mut merged: Vec<TextSpan> = Vec::with_capacity(spans.len());

    for span in spans {
        if let Some(prev) = merged.last_mut() {
            let gap = span.x - (prev.x + prev.width);
            let same_font = prev.font_name == span.font_name
                && (prev.font_size - span.font_size).abs() < 0.5;

            if same_font && gap > -prev.font_size && gap < prev.font_size * 2.0 {
                if gap >= MIN_WORD_GAP && !prev.text.ends_with(' ') && !span.text.starts_with(' ')
                {
                    prev.text.push(' ');
                }
                prev.text.push_str(&span.text);
                prev.width = (span.x + span.width) - prev.x;
                continue;
            }
        }
        merged.push(span);
    }

    let y = merged.first().map(|s| s.y).unwrap_or(0.0);
    let font_size = merged.iter().map(|s| s.font_size).fold(0.0, f32::max);

    TextLine {
        spans: merged,
        y,
        font_size,
    }
}

/// Join lines with `\n`, inserting an empty line at paragraph-sized gaps.
pub fn render_lines(lines: &[TextLine]) -> String {
    let mut out = String::new();
    let mut previous: Option<&TextLine> = None;

    for line in lines {
        if let Some(prev) = previous {
            out.push('\n');
            let gap = (prev.y - line.y).abs();
            if gap > prev.font_size * PARAGRAPH_GAP_FACTOR {
                out.push('\n');
            }
        }
        out.push_str(line.text().trim_end());
        previous = Some(line);
    }

    out
}

/// Reconstruct the text of one page.
pub fn page_text(backend: &dyn PdfBackend, page_id: PageId) -> Result<String, PdfError> {
    let spans = extract_page_spans(backend, page_id)?;
    let lines = group_spans_into_lines(spans);
    Ok(render_lines(&lines))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
