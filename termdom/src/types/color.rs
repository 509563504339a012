use palette::{LinSrgb, Mix, Srgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `#rgb`, `rgb(r, g, b)` or a handful of named colors.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = value
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let mut parts = args.split(',').map(|p| p.trim().parse::<u8>());
            let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return None;
            };
            return Some(Rgb::new(r, g, b));
        }
        match value {
            "black" => Some(Rgb::BLACK),
            "white" => Some(Rgb::WHITE),
            "gray" | "grey" => Some(Rgb::new(128, 128, 128)),
            "silver" => Some(Rgb::new(192, 192, 192)),
            "red" => Some(Rgb::new(255, 0, 0)),
            "green" => Some(Rgb::new(0, 128, 0)),
            "blue" => Some(Rgb::new(0, 0, 255)),
            _ => None,
        }
    }

    /// Composite `self` over `below` with the given opacity, in linear light.
    pub fn over(self, below: Rgb, opacity: f32) -> Rgb {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity >= 1.0 {
            return self;
        }
        if opacity <= 0.0 {
            return below;
        }
        let top: LinSrgb = Srgb::new(self.r, self.g, self.b)
            .into_format::<f32>()
            .into_linear();
        let bottom: LinSrgb = Srgb::new(below.r, below.g, below.b)
            .into_format::<f32>()
            .into_linear();
        let mixed = bottom.mix(top, opacity);
        let (r, g, b) = Srgb::<f32>::from_linear(mixed).into_format::<u8>().into_components();
        Rgb::new(r, g, b)
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        6 => Some(Rgb::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
        3 => Some(Rgb::new(
            digit(0, 1)? * 17,
            digit(1, 1)? * 17,
            digit(2, 1)? * 17,
        )),
        _ => None,
    }
}
