use clap::ValueEnum;

/// Horizontal placement of the overlay inside the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement of the overlay inside the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VerticalAlign {
    Top,
    Center,
    #[default]
    Bottom,
}

/// Alignment state mutated by the keyboard and read by the layout every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Width reserved for artwork plus text
    pub min_width: i32,
    /// Rows reserved for the overlay
    pub content_height: i32,
    /// Distance kept from the terminal edge for non-centered alignments
    pub margin: i32,
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl DisplayConfig {
    fn default_min_width() -> i32 {
        60
    }

    fn default_content_height() -> i32 {
        9
    }

    fn default_margin() -> i32 {
        2
    }

    pub fn with_alignment(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
            ..Self::default()
        }
    }

    pub fn center(&mut self) {
        self.horizontal = HorizontalAlign::Center;
        self.vertical = VerticalAlign::Center;
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_width: Self::default_min_width(),
            content_height: Self::default_content_height(),
            margin: Self::default_margin(),
            horizontal: HorizontalAlign::default(),
            vertical: VerticalAlign::default(),
        }
    }
}
