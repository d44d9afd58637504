pub mod color;
pub mod emoji;

pub mod links {
    pub const SOURCE_REPO: &str = "https://github.com/parrot-bot/parrot";
    pub const DECODE_THUMBNAIL: &str =
        "https://upload.wikimedia.org/wikipedia/commons/4/45/Parrot_Logo.png";
    pub const TRANSLATE_THUMBNAIL: &str =
        "https://upload.wikimedia.org/wikipedia/commons/1/14/Google_Translate_logo_%28old%29.png";
    pub const NSFW_REQUIRED_GIF: &str = "https://i.imgur.com/oe4iK5i.gif";
}

pub mod colors {
    pub use super::color::{DANGER, MINT, MOON, PARROT};
}

pub use emoji::{Icon, icon};
