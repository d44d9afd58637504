use serenity::all::ReactionType;
use std::fmt;

/// A unicode emoji used as an icon in messages and buttons
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Icon {
    glyph: &'static str,
}

impl Icon {
    pub const fn new(glyph: &'static str) -> Self {
        Self { glyph }
    }

    pub fn as_reaction(&self) -> ReactionType {
        ReactionType::Unicode(self.glyph.to_string())
    }

    pub fn as_str(&self) -> &'static str {
        self.glyph
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph)
    }
}

pub mod icon {
    use super::Icon;

    pub const CHECK: Icon = Icon::new("✅");
    pub const ERROR: Icon = Icon::new("❌");
    pub const BELL: Icon = Icon::new("🔔");
    pub const GEAR: Icon = Icon::new("⚙️");
    pub const PLUS: Icon = Icon::new("➕");
    pub const MINUS: Icon = Icon::new("➖");
    pub const TIMER: Icon = Icon::new("⏱️");
    pub const ALARM: Icon = Icon::new("⏰");
    pub const HASTAG: Icon = Icon::new("#️⃣");
    pub const HAMMER: Icon = Icon::new("🔨");
    pub const PHONE: Icon = Icon::new("☎️");
    pub const QUESTION: Icon = Icon::new("❓");
    pub const THUMBS_UP: Icon = Icon::new("👍");
    pub const THUMBS_DOWN: Icon = Icon::new("👎");
    pub const HOUSE: Icon = Icon::new("🏠");
    pub const CARET_RIGHT: Icon = Icon::new("▶️");
    pub const CARET_LEFT: Icon = Icon::new("◀️");
    pub const CARET_DOUBLE_RIGHT: Icon = Icon::new("⏭️");
    pub const CARET_DOUBLE_LEFT: Icon = Icon::new("⏮️");
}

#[cfg(test)]
mod tests {
    use super::icon;
    use serenity::all::ReactionType;

    #[test]
    fn icons_render_as_unicode() {
        assert_eq!(icon::CHECK.to_string(), "✅");
        assert_eq!(
            icon::THUMBS_UP.as_reaction(),
            ReactionType::Unicode("👍".to_string())
        );
    }
}
