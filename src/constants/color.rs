use serenity::all::Colour;

pub const MINT: Colour = Colour::new(0x4ECCA3);
pub const MOON: Colour = Colour::new(0xA6B1E1);
pub const PARROT: Colour = Colour::new(0x87CEEB);
pub const DANGER: Colour = Colour::new(0xE74C3C);
