//! Blend factor codes and renderer-agnostic blend mode resolution

use crate::error::{EmitterError, Result};

/// Source/destination blend factor, stored with its GL enumeration code
///
/// Effect descriptions carry blend factors as raw GL codes (`770` for
/// `SRC_ALPHA`, `771` for `ONE_MINUS_SRC_ALPHA`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
#[repr(u32)]
pub enum BlendFactor {
    Zero = 0,
    One = 1,
    SrcColor = 0x0300,
    OneMinusSrcColor = 0x0301,
    SrcAlpha = 0x0302,
    OneMinusSrcAlpha = 0x0303,
    DstAlpha = 0x0304,
    OneMinusDstAlpha = 0x0305,
    DstColor = 0x0306,
    OneMinusDstColor = 0x0307,
}

impl BlendFactor {
    /// Convert from a GL blend factor code
    pub fn from_gl(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            0x0300 => Ok(Self::SrcColor),
            0x0301 => Ok(Self::OneMinusSrcColor),
            0x0302 => Ok(Self::SrcAlpha),
            0x0303 => Ok(Self::OneMinusSrcAlpha),
            0x0304 => Ok(Self::DstAlpha),
            0x0305 => Ok(Self::OneMinusDstAlpha),
            0x0306 => Ok(Self::DstColor),
            0x0307 => Ok(Self::OneMinusDstColor),
            other => Err(EmitterError::UnknownBlendFactor(other)),
        }
    }

    /// The GL code for this factor
    pub fn gl_code(self) -> u32 {
        self as u32
    }

    /// GL constant name, e.g. `ONE_MINUS_SRC_ALPHA`
    pub fn name(self) -> &'static str {
        match self {
            Self::Zero => "ZERO",
            Self::One => "ONE",
            Self::SrcColor => "SRC_COLOR",
            Self::OneMinusSrcColor => "ONE_MINUS_SRC_COLOR",
            Self::SrcAlpha => "SRC_ALPHA",
            Self::OneMinusSrcAlpha => "ONE_MINUS_SRC_ALPHA",
            Self::DstAlpha => "DST_ALPHA",
            Self::OneMinusDstAlpha => "ONE_MINUS_DST_ALPHA",
            Self::DstColor => "DST_COLOR",
            Self::OneMinusDstColor => "ONE_MINUS_DST_COLOR",
        }
    }
}

impl TryFrom<u32> for BlendFactor {
    type Error = EmitterError;

    fn try_from(code: u32) -> Result<Self> {
        Self::from_gl(code)
    }
}

impl From<BlendFactor> for u32 {
    fn from(factor: BlendFactor) -> Self {
        factor.gl_code()
    }
}

impl std::fmt::Display for BlendFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Abstract blend mode handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Additive blending (src + dst)
    #[default]
    Add,
    /// Alpha blending (src * alpha + dst * (1 - alpha))
    Alpha,
    /// Screen blending (src + dst * (1 - src))
    Screen,
    /// Multiply blending weighted by source alpha
    MultiplyAlpha,
}

impl BlendMode {
    /// Map a factor pair onto a blend mode; unmapped pairs fall back to `Add`
    pub fn from_factors(source: BlendFactor, destination: BlendFactor) -> Self {
        use BlendFactor::{DstColor, One, OneMinusDstColor, OneMinusSrcAlpha, SrcAlpha};

        match (source, destination) {
            (One, One) | (SrcAlpha, One) => Self::Add,
            (DstColor, OneMinusSrcAlpha) => Self::MultiplyAlpha,
            (One, OneMinusSrcAlpha) | (SrcAlpha, OneMinusSrcAlpha) => Self::Alpha,
            (OneMinusDstColor, One) => Self::Screen,
            _ => Self::Add,
        }
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Alpha => "alpha",
            Self::Screen => "screen",
            Self::MultiplyAlpha => "multiply-alpha",
        };
        f.write_str(name)
    }
}

/// Texture properties supplied by whoever decoded the particle texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureInfo {
    /// The texture carries an alpha channel
    pub has_alpha: bool,
    /// Color channels are premultiplied by alpha
    pub premultiplied: bool,
}

impl TextureInfo {
    pub fn new(has_alpha: bool, premultiplied: bool) -> Self {
        Self {
            has_alpha,
            premultiplied,
        }
    }

    /// Premultiplication only means something when there is alpha to multiply by
    pub fn is_premultiplied_alpha(&self) -> bool {
        self.has_alpha && self.premultiplied
    }
}

/// Blend state derived once from the configured factors and the texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendState {
    /// Effective source factor (may differ from the configured one)
    pub source: BlendFactor,
    /// Effective destination factor
    pub destination: BlendFactor,
    /// Resolved abstract mode
    pub mode: BlendMode,
    /// The renderer must scale RGB by opacity to emulate the configured blend
    pub opacity_modifies_color: bool,
    /// Texture flags the resolution was based on
    pub texture: TextureInfo,
}

impl BlendState {
    /// Resolve the configured factor pair against the texture
    ///
    /// `(ONE, ONE_MINUS_SRC_ALPHA)` is the premultiplied-alpha blend. With a
    /// premultiplied texture it is kept and opacity has to be applied to the
    /// color channels too; with a straight-alpha texture the pair is corrected
    /// to `(SRC_ALPHA, ONE_MINUS_SRC_ALPHA)`.
    pub fn resolve(
        source: BlendFactor,
        destination: BlendFactor,
        texture: TextureInfo,
    ) -> Self {
        let mut source = source;
        let mut destination = destination;
        let mut opacity_modifies_color = false;

        if source == BlendFactor::One && destination == BlendFactor::OneMinusSrcAlpha {
            if texture.is_premultiplied_alpha() {
                opacity_modifies_color = true;
            } else {
                log::warn!(
                    "Texture is not premultiplied, correcting blend ONE/ONE_MINUS_SRC_ALPHA to SRC_ALPHA/ONE_MINUS_SRC_ALPHA"
                );
                source = BlendFactor::SrcAlpha;
                destination = BlendFactor::OneMinusSrcAlpha;
            }
        }

        Self {
            source,
            destination,
            mode: BlendMode::from_factors(source, destination),
            opacity_modifies_color,
            texture,
        }
    }
}
