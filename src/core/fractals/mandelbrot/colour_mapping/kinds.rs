#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourMapKind {
    #[default]
    RainbowBands,
    FireGradient,
}

impl ColourMapKind {
    pub const ALL: &'static [Self] = &[Self::RainbowBands, Self::FireGradient];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::RainbowBands => "Rainbow bands",
            Self::FireGradient => "Fire gradient",
        }
    }
}

impl std::fmt::Display for ColourMapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
