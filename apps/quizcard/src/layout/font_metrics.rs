//! Static character-width tables for the approximate fallback face.
//!
//! When none of a role's TrueType candidates can be loaded the renderer still
//! has to wrap and center text, so it measures with these tables instead.
//! Widths are in em units; multiply by the pixel size to get pixels.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Metric family
// ────────────────────────────────────────────────────────────────────────────

/// Shape of a font role, used to pick both TrueType candidates and the
/// approximate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricFamily {
    /// Proportional sans-serif (titles, subtitles, footer).
    Sans,
    /// Fixed-pitch (question code, options, answer, explanation).
    Mono,
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// `widths[i]` = advance of ASCII character `(i + 32)` at 1em.
///
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub family: MetricFamily,
    widths: [f32; 95],
    /// Advance for anything outside printable ASCII.
    pub average_char_width: f32,
    /// Ascender height in em, used to place the baseline.
    pub ascent: f32,
}

impl FontMetricTable {
    /// Width of `s` in em units. Non-ASCII falls back to `average_char_width`,
    /// tabs count as four spaces.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if c == '\t' {
                    self.widths[0] * 4.0
                } else if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of a single character in em units.
    pub fn char_width(&self, c: char) -> f32 {
        let mut buf = [0u8; 4];
        self.measure_str(c.encode_utf8(&mut buf))
    }
}

pub fn get_metrics(family: MetricFamily) -> &'static FontMetricTable {
    match family {
        MetricFamily::Sans => &SANS_TABLE,
        MetricFamily::Mono => &MONO_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica-class grotesque, close enough to SF / Arial / DejaVu Sans for
/// centering purposes.
static SANS_TABLE: FontMetricTable = FontMetricTable {
    family: MetricFamily::Sans,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.55,
    ascent: 0.77,
};

/// Every printable glyph in a monospace face shares one advance.
static MONO_TABLE: FontMetricTable = FontMetricTable {
    family: MetricFamily::Mono,
    widths: [0.60; 95],
    average_char_width: 0.60,
    ascent: 0.76,
};
