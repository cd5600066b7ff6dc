use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

/// Bit set on packed colour metadata so that a dyed pure black (all channels
/// zero) is still distinguishable from an undyed item.
const DYED_FLAG: u16 = 0x8000;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
pub struct RGBColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RGBColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        RGBColor { red, green, blue }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Packs the colour into item metadata (5 bits per channel).
    pub const fn to_meta(self) -> u16 {
        DYED_FLAG
            | ((self.red as u16 >> 3) << 10)
            | ((self.green as u16 >> 3) << 5)
            | (self.blue as u16 >> 3)
    }

    /// Reads a colour previously written by [`RGBColor::to_meta`], `None` if
    /// the item was never dyed.
    pub const fn from_meta(meta: u16) -> Option<Self> {
        if meta & DYED_FLAG == 0 {
            return None;
        }
        Some(Self::new(
            (((meta >> 10) & 0x1F) << 3) as u8,
            (((meta >> 5) & 0x1F) << 3) as u8,
            ((meta & 0x1F) << 3) as u8,
        ))
    }

    /// Mixes colours the way dyeing leather does: channels are averaged and the
    /// result is scaled back up to the average brightness of the inputs.
    pub fn blend(colors: impl IntoIterator<Item = RGBColor>) -> Option<Self> {
        let (mut red, mut green, mut blue, mut max_sum, mut count) = (0u32, 0u32, 0u32, 0u32, 0u32);
        for color in colors {
            red += u32::from(color.red);
            green += u32::from(color.green);
            blue += u32::from(color.blue);
            max_sum += u32::from(color.red.max(color.green).max(color.blue));
            count += 1;
        }
        if count == 0 {
            return None;
        }

        let (red, green, blue) = (red / count, green / count, blue / count);
        let average_max = max_sum / count;
        let max_average = red.max(green).max(blue);
        if max_average == 0 {
            return Some(Self::new(0, 0, 0));
        }
        let scale = |channel: u32| (channel * average_max / max_average).min(255) as u8;
        Some(Self::new(scale(red), scale(green), scale(blue)))
    }
}

/// The 16 dye colours, discriminants double as the metadata of a dye item.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    FromPrimitive,
    ToPrimitive,
)]
#[serde(rename_all = "snake_case")]
pub enum DyeColor {
    White = 0,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    LightGray,
    Cyan,
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

impl DyeColor {
    pub fn from_meta(meta: u16) -> Option<Self> {
        num_traits::FromPrimitive::from_u16(meta)
    }

    pub const fn meta(self) -> u16 {
        self as u16
    }

    pub const fn rgb(self) -> RGBColor {
        RGBColor::from_hex(match self {
            DyeColor::White => 0xF9FFFE,
            DyeColor::Orange => 0xF9801D,
            DyeColor::Magenta => 0xC74EBD,
            DyeColor::LightBlue => 0x3AB3DA,
            DyeColor::Yellow => 0xFED83D,
            DyeColor::Lime => 0x80C71F,
            DyeColor::Pink => 0xF38BAA,
            DyeColor::Gray => 0x474F52,
            DyeColor::LightGray => 0x9D9D97,
            DyeColor::Cyan => 0x169C9C,
            DyeColor::Purple => 0x8932B8,
            DyeColor::Blue => 0x3C44AA,
            DyeColor::Brown => 0x835432,
            DyeColor::Green => 0x5E7C16,
            DyeColor::Red => 0xB02E26,
            DyeColor::Black => 0x1D1D21,
        })
    }
}

impl TryFrom<&str> for DyeColor {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "white" => Ok(DyeColor::White),
            "orange" => Ok(DyeColor::Orange),
            "magenta" => Ok(DyeColor::Magenta),
            "light_blue" => Ok(DyeColor::LightBlue),
            "yellow" => Ok(DyeColor::Yellow),
            "lime" => Ok(DyeColor::Lime),
            "pink" => Ok(DyeColor::Pink),
            "gray" => Ok(DyeColor::Gray),
            "light_gray" => Ok(DyeColor::LightGray),
            "cyan" => Ok(DyeColor::Cyan),
            "purple" => Ok(DyeColor::Purple),
            "blue" => Ok(DyeColor::Blue),
            "brown" => Ok(DyeColor::Brown),
            "green" => Ok(DyeColor::Green),
            "red" => Ok(DyeColor::Red),
            "black" => Ok(DyeColor::Black),
            _ => Err(()),
        }
    }
}
