use serde::Serialize;

/// Color with 0.0..=1.0 channels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Rgb {
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Rgb { red, green, blue }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalAlign {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    pub background: Rgb,
    pub foreground: Rgb,
    pub bold: bool,
    pub font_size: u32,
    pub align: HorizontalAlign,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub header_bg: Rgb,
    pub header_text: Rgb,
    pub gold: Rgb,
    pub silver: Rgb,
    pub bronze: Rgb,
    pub alternating_bg: Rgb,
    pub plain_bg: Rgb,
    pub text_dark: Rgb,
    pub summary_bg: Rgb,
}

/// Colors and sizes applied to the dashboard grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub palette: Palette,
    /// Pixel widths for columns A..H.
    pub column_widths: [u32; 8],
    pub header_row_height: u32,
    pub data_row_height: u32,
}

impl Theme {
    pub const fn standard() -> Self {
        Theme {
            palette: Palette {
                header_bg: Rgb::new(0.15, 0.35, 0.75),
                header_text: Rgb::new(1.0, 1.0, 1.0),
                gold: Rgb::new(1.0, 0.84, 0.0),
                silver: Rgb::new(0.85, 0.85, 0.85),
                bronze: Rgb::new(0.9, 0.55, 0.25),
                alternating_bg: Rgb::new(0.98, 0.98, 0.98),
                plain_bg: Rgb::new(1.0, 1.0, 1.0),
                text_dark: Rgb::new(0.15, 0.15, 0.15),
                summary_bg: Rgb::new(0.25, 0.6, 0.8),
            },
            column_widths: [180, 250, 140, 140, 140, 120, 110, 140],
            header_row_height: 35,
            data_row_height: 28,
        }
    }

    pub fn title(&self) -> CellStyle {
        self.banner(self.palette.header_bg, 16)
    }

    pub fn subtitle(&self) -> CellStyle {
        CellStyle {
            background: self.palette.alternating_bg,
            foreground: self.palette.text_dark,
            bold: false,
            font_size: 10,
            align: HorizontalAlign::Center,
        }
    }

    pub fn column_header(&self) -> CellStyle {
        self.banner(self.palette.header_bg, 12)
    }

    pub fn summary_header(&self) -> CellStyle {
        self.banner(self.palette.summary_bg, 14)
    }

    pub fn summary_line(&self) -> CellStyle {
        CellStyle {
            background: self.palette.alternating_bg,
            foreground: self.palette.text_dark,
            bold: false,
            font_size: 11,
            align: HorizontalAlign::Left,
        }
    }

    /// Style for a ranked row. `index` is the zero-based position in the table.
    pub fn ranked_row(&self, rank: usize, index: usize) -> CellStyle {
        let background = match rank {
            1 => self.palette.gold,
            2 => self.palette.silver,
            3 => self.palette.bronze,
            _ if index % 2 == 0 => self.palette.alternating_bg,
            _ => self.palette.plain_bg,
        };
        CellStyle {
            background,
            foreground: self.palette.text_dark,
            bold: rank <= 3,
            font_size: 11,
            align: HorizontalAlign::Center,
        }
    }

    fn banner(&self, background: Rgb, font_size: u32) -> CellStyle {
        CellStyle {
            background,
            foreground: self.palette.header_text,
            bold: true,
            font_size,
            align: HorizontalAlign::Center,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::standard()
    }
}
